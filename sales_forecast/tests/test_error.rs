use sales_forecast::error::ForecastError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::SerializationError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("alpha must be between 0 and 1".to_string());
    let error_string = format!("{}", error);
    assert!(error_string.contains("alpha must be between 0 and 1"));

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = format!("{}", ForecastError::from(io_error));
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));

    let error = ForecastError::ModelUnavailable("forecast_model.json".to_string());
    assert_eq!(
        error.to_string(),
        "Model unavailable: forecast_model.json"
    );
}
