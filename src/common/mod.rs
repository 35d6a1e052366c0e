mod config;
mod error;
mod inventory;
mod models;

pub(crate) use self::config::*;
pub use error::*;
pub use inventory::*;
pub use models::*;
