mod config;
mod models;
mod source;

pub use self::config::*;
pub use source::*;
