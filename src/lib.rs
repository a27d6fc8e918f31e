pub mod config;
pub mod error;
pub mod roster;

pub use config::Config;
pub use error::{Result, RosterError};
