//! Trained model artifact and the process-wide read-only model handle

use crate::data::SalesHistory;
use crate::error::{ForecastError, Result};
use crate::models::exponential_smoothing::TrainedHoltLinear;
use crate::models::linear_trend::TrainedLinearTrend;
use crate::models::{ForecastWindow, TrainedForecastModel};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Version written into every artifact; loading rejects other versions
pub const ARTIFACT_VERSION: u32 = 1;

/// Any trained model that can be written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SavedModel {
    HoltLinear(TrainedHoltLinear),
    LinearTrend(TrainedLinearTrend),
}

impl From<TrainedHoltLinear> for SavedModel {
    fn from(model: TrainedHoltLinear) -> Self {
        SavedModel::HoltLinear(model)
    }
}

impl From<TrainedLinearTrend> for SavedModel {
    fn from(model: TrainedLinearTrend) -> Self {
        SavedModel::LinearTrend(model)
    }
}

impl SavedModel {
    fn inner(&self) -> &dyn TrainedForecastModel {
        match self {
            SavedModel::HoltLinear(model) => model,
            SavedModel::LinearTrend(model) => model,
        }
    }
}

impl TrainedForecastModel for SavedModel {
    fn forecast(&self, horizon: usize) -> Result<ForecastWindow> {
        self.inner().forecast(horizon)
    }

    fn predict(&self, data: &SalesHistory) -> Result<Vec<f64>> {
        self.inner().predict(data)
    }

    fn last_date(&self) -> NaiveDate {
        self.inner().last_date()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }
}

/// Serialized model file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub trained_at: DateTime<Utc>,
    /// Number of daily observations the model was fitted on
    pub history_days: usize,
    pub model: SavedModel,
}

impl ModelArtifact {
    pub fn new(model: impl Into<SavedModel>, history_days: usize) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            trained_at: Utc::now(),
            history_days,
            model: model.into(),
        }
    }

    /// Write the artifact as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;

        info!(path = %path.display(), model = %self.model.name(), "Saved model artifact");
        Ok(())
    }

    /// Read an artifact written by `save`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;

        if artifact.version != ARTIFACT_VERSION {
            return Err(ForecastError::ValidationError(format!(
                "Unsupported model artifact version {} (expected {})",
                artifact.version, ARTIFACT_VERSION
            )));
        }

        Ok(artifact)
    }
}

/// Outcome of the one-time model load
#[derive(Debug)]
pub enum ModelState {
    Ready(ModelArtifact),
    /// The artifact is missing or unreadable; carries the reason
    Unavailable(String),
}

/// Lazily loaded, read-only handle to the model artifact
///
/// The file is read on first access only. Later calls observe the same
/// state, including a failed load.
#[derive(Debug)]
pub struct ModelStore {
    path: PathBuf,
    state: OnceLock<ModelState>,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: OnceLock::new(),
        }
    }

    /// Store that is already initialised with an in-memory artifact
    pub fn preloaded(artifact: ModelArtifact) -> Self {
        let state = OnceLock::new();
        let _ = state.set(ModelState::Ready(artifact));
        Self {
            path: PathBuf::new(),
            state,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &ModelState {
        self.state.get_or_init(|| match ModelArtifact::load(&self.path) {
            Ok(artifact) => {
                info!(path = %self.path.display(), model = %artifact.model.name(), "Model loaded");
                ModelState::Ready(artifact)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Model unavailable");
                ModelState::Unavailable(e.to_string())
            }
        })
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state(), ModelState::Ready(_))
    }

    /// The loaded artifact, or `ModelUnavailable`
    pub fn artifact(&self) -> Result<&ModelArtifact> {
        match self.state() {
            ModelState::Ready(artifact) => Ok(artifact),
            ModelState::Unavailable(reason) => Err(ForecastError::ModelUnavailable(format!(
                "{} ({})",
                self.path.display(),
                reason
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exponential_smoothing::HoltLinear;
    use crate::models::ForecastModel;
    use tempfile::tempdir;

    fn history() -> SalesHistory {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..20).map(|i| start + chrono::Duration::days(i)).collect();
        let revenue = (0..20).map(|i| 1000.0 + 10.0 * i as f64).collect();
        SalesHistory::new(dates, revenue).unwrap()
    }

    #[test]
    fn test_artifact_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        let trained = HoltLinear::new(0.5, 0.2).unwrap().train(&history()).unwrap();
        let artifact = ModelArtifact::new(trained, 20);

        artifact.save(&path).unwrap();
        let loaded = ModelArtifact::load(&path).unwrap();

        assert_eq!(loaded, artifact);
        assert_eq!(loaded.model.forecast(5).unwrap(), artifact.model.forecast(5).unwrap());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("missing.json"));

        assert!(!store.is_available());
        assert!(matches!(store.artifact(), Err(ForecastError::ModelUnavailable(_))));
    }

    #[test]
    fn test_corrupt_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();

        let store = ModelStore::new(&path);
        assert!(matches!(store.state(), ModelState::Unavailable(_)));
    }

    #[test]
    fn test_state_is_loaded_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = ModelStore::new(&path);
        assert!(!store.is_available());

        // Writing the file afterwards does not change the cached state
        let trained = HoltLinear::new(0.5, 0.2).unwrap().train(&history()).unwrap();
        ModelArtifact::new(trained, 20).save(&path).unwrap();
        assert!(!store.is_available());
        assert!(ModelStore::new(&path).is_available());
    }
}
