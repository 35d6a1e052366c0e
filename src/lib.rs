pub mod airwave;
pub mod common;
pub mod config;
pub mod filter;
pub mod report;
pub mod service;

pub use crate::config::*;
