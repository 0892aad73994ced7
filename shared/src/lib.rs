pub mod error;
pub mod models;

pub use error::{Error, ErrorCode, ErrorResponse};
pub use models::*;

#[cfg(test)]
mod tests;
