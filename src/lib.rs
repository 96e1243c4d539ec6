pub mod agent;
pub mod config;
pub mod content;
pub mod error;
pub mod llm;
pub mod parse;
pub mod server;
pub mod session;

pub use error::{Error, Result};
