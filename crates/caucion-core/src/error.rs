use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaucionError {
    #[error("Invalid argument: {field} — {reason}")]
    InvalidArgument { field: String, reason: String },
}
