mod environment;
mod error;
mod extractors;

pub use environment::{Environment, DEFAULT_REGION};
pub use error::{AppError, ApiErrorResponse};
pub use extractors::ValidatedQuery;
