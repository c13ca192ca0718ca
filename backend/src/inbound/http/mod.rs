//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod profile;
pub mod schemas;
pub mod state;
pub mod suggestions;
pub mod swaps;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;
