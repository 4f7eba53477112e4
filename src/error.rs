use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid viewport: min={min}, max={max}")]
    InvalidViewport { min: f64, max: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid time span `{0}`")]
    InvalidTimeSpan(String),

    #[error("timeline fetch failed for camera `{camera_id}`: {message}")]
    Fetch { camera_id: String, message: String },
}
