use sales_forecast::metrics::evaluate_holdout;
use sales_forecast::models::exponential_smoothing::HoltLinear;
use sales_forecast::models::linear_trend::LinearTrend;
use sales_forecast::{
    DataLoader, ForecastError, ForecastModel, ModelArtifact, ModelStore, TrainedForecastModel,
};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

// Helper function to create a small sales export
fn create_sample_data() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "Date,Price,Units_Sold").unwrap();
    for day in 1..=28 {
        let units = 40 + day + if day % 7 == 0 { 15 } else { 0 };
        writeln!(file, "{:02}-02-2023,12.50,{}", day, units).unwrap();
    }

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Load the export
    let data_file = create_sample_data();
    let history = DataLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(history.len(), 28);

    // 2. Score the model on a hold-out split
    let model = LinearTrend::new();
    let accuracy = evaluate_holdout(&model, &history, 0.2).unwrap();
    assert!(accuracy.mape < 10.0);

    // 3. Train on everything and persist
    let trained = model.train(&history).unwrap();
    let dir = tempdir().unwrap();
    let model_path = dir.path().join("forecast_model.json");
    ModelArtifact::new(trained, history.len())
        .save(&model_path)
        .unwrap();

    // 4. Load lazily and forecast
    let store = ModelStore::new(&model_path);
    let artifact = store.artifact().unwrap();
    assert_eq!(artifact.history_days, 28);

    let window = artifact.model.forecast(30).unwrap();
    assert_eq!(window.len(), 30);
    assert_eq!(
        window.first().date(),
        chrono::NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()
    );
    assert!(window.last().estimate() > window.first().estimate() - 20.0);
}

#[test]
fn test_holt_artifact_round_trip_through_store() {
    let data_file = create_sample_data();
    let history = DataLoader::from_csv(data_file.path()).unwrap();
    let trained = HoltLinear::new(0.4, 0.1).unwrap().train(&history).unwrap();
    let expected = trained.forecast(10).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("holt.json");
    ModelArtifact::new(trained, history.len()).save(&path).unwrap();

    let store = ModelStore::new(&path);
    assert!(store.is_available());
    assert_eq!(store.artifact().unwrap().model.forecast(10).unwrap(), expected);
}

#[test]
fn test_missing_model_reports_unavailable() {
    let store = ModelStore::new("/nonexistent/forecast_model.json");
    match store.artifact() {
        Err(ForecastError::ModelUnavailable(msg)) => {
            assert!(msg.contains("forecast_model.json"))
        }
        other => panic!("Expected ModelUnavailable, got {:?}", other),
    }
}
