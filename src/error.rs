use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    /// The identifier failed the `^G-[A-Z0-9]+$` format check. The display
    /// text is the exact diagnostic the loader emits.
    #[error("Invalid Google Analytics Tracking ID. Expected format: G-[A-Z0-9]+")]
    InvalidTrackingId { gid: String },
    #[error("template render error in '{template}': {message}")]
    Template { template: String, message: String },
}

pub type Result<T> = std::result::Result<T, TagError>;
