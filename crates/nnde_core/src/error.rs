use thiserror::Error;

#[derive(Debug, Error)]
pub enum NndeError {
    #[error("invalid training settings: {0}")]
    InvalidSettings(String),

    #[error("invalid boundary data: {0}")]
    InvalidBoundary(String),

    #[error("invalid training set: {0}")]
    InvalidTrainingSet(String),

    #[error(
        "non-finite update for {parameter} at epoch {epoch} (dE/dp = {gradient}, d2E/dp2 = {curvature})"
    )]
    NonFiniteUpdate {
        epoch: usize,
        parameter: String,
        gradient: f64,
        curvature: f64,
    },
}

pub type Result<T> = std::result::Result<T, NndeError>;
