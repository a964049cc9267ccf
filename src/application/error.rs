use thiserror::Error;

use crate::domain::ValidationError;
use crate::report::ReportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Invalid vehicle data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
