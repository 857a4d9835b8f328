//! billing-core: shared infrastructure for the billing front end.

pub mod error;
pub mod middleware;
pub mod observability;

pub use error::AppError;
