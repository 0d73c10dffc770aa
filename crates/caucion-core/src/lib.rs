pub mod error;
pub mod fee_schedule;
pub mod types;

#[cfg(feature = "caucion")]
pub mod caucion;

pub use error::CaucionError;
pub use fee_schedule::FeeSchedule;
pub use types::*;

/// Standard result type for all caución operations
pub type CaucionResult<T> = Result<T, CaucionError>;
