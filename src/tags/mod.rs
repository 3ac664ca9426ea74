pub mod gateway;
pub mod handler;
pub mod ids;
pub mod models;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

// make it easier to just use models
pub use models::*;
