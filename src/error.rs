use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse answers: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for field {key}: {reason}")]
    InvalidAnswer { key: String, reason: String },

    #[error("logo error: {0}")]
    Logo(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("a report is already being generated")]
    SubmissionInFlight,
}
