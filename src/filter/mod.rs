mod config;
mod site_filter;

pub use self::config::*;
pub use site_filter::*;
