pub mod config;
pub mod endpoint;
pub mod error;
pub mod inference;
pub mod model;
pub mod server;
pub mod templates;

pub use error::{Error, Result};
