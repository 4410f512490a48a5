use crate::cli::{Cli, Command, ForecastArgs, Method, SampleDataArgs, TrainArgs};
use crate::present;
use anyhow::Context;
use sales_forecast::metrics::{evaluate_holdout, ForecastAccuracy};
use sales_forecast::models::exponential_smoothing::HoltLinear;
use sales_forecast::models::linear_trend::LinearTrend;
use sales_forecast::utils::{generate_sample_records, write_sales_csv};
use sales_forecast::{DataLoader, ForecastModel, ModelArtifact, SalesHistory, SavedModel};
use std::path::Path;
use strategy_sim::{Dashboard, DashboardConfig, DashboardReport};
use tracing::{info, warn};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Train(args) => {
            let config = DashboardConfig::resolve(cli.config.as_deref())?;
            let path = args.model.clone().unwrap_or_else(|| config.model_path.clone());
            let (artifact, accuracy) = train(&args, &path)?;
            print!(
                "{}",
                present::training_summary(&artifact, accuracy.as_ref(), &path)
            );
        }
        Command::Forecast(args) => {
            let config = DashboardConfig::resolve(cli.config.as_deref())?;
            let report = forecast(&args, config)?;
            print!("{}", present::dashboard_summary(&report));
            if let Some(path) = &args.export {
                println!("\nReport written to {}", path.display());
            }
        }
        Command::SampleData(args) => {
            let days = sample_data(&args)?;
            println!("Wrote {} days of sample sales to {}", days, args.out.display());
        }
    }
    Ok(())
}

fn fit<M>(
    model: &M,
    history: &SalesHistory,
    holdout: f64,
) -> anyhow::Result<(ModelArtifact, Option<ForecastAccuracy>)>
where
    M: ForecastModel,
    M::Trained: Into<SavedModel>,
{
    let accuracy = match evaluate_holdout(model, history, holdout) {
        Ok(accuracy) => Some(accuracy),
        Err(e) => {
            warn!(error = %e, "Skipping hold-out evaluation");
            None
        }
    };

    let trained = model
        .train(history)
        .with_context(|| format!("Training {} failed", model.name()))?;
    Ok((ModelArtifact::new(trained, history.len()), accuracy))
}

/// Fit the chosen model on the full history and save it to `path`
pub fn train(
    args: &TrainArgs,
    path: &Path,
) -> anyhow::Result<(ModelArtifact, Option<ForecastAccuracy>)> {
    let history = DataLoader::from_csv(&args.data).with_context(|| {
        format!("Cannot load sales history from '{}'", args.data.display())
    })?;
    info!(days = history.len(), "Loaded sales history");

    let (artifact, accuracy) = match args.method {
        Method::Holt => fit(&HoltLinear::new(args.alpha, args.beta)?, &history, args.holdout)?,
        Method::Trend => fit(&LinearTrend::new(), &history, args.holdout)?,
    };

    artifact
        .save(path)
        .with_context(|| format!("Cannot write model to '{}'", path.display()))?;
    Ok((artifact, accuracy))
}

/// Run the dashboard pipeline and optionally export the CSV report
pub fn forecast(args: &ForecastArgs, mut config: DashboardConfig) -> anyhow::Result<DashboardReport> {
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }

    let dashboard = Dashboard::new(config);
    let request = dashboard.request(args.currency, args.days);
    let report = dashboard.run(&request)?;

    if let Some(path) = &args.export {
        let bytes = report.export_csv()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Cannot write report to '{}'", path.display()))?;
        info!(path = %path.display(), rows = report.window.len(), "Exported forecast report");
    }

    Ok(report)
}

/// Returns the number of days written
pub fn sample_data(args: &SampleDataArgs) -> anyhow::Result<usize> {
    let records = generate_sample_records(
        args.start,
        args.days,
        args.base_units,
        args.daily_growth,
        args.seed,
    )?;
    write_sales_csv(&args.out, &records)
        .with_context(|| format!("Cannot write sample data to '{}'", args.out.display()))?;
    Ok(records.len())
}
