//! jobtrack - Terminal Job Application Tracker Library
//!
//! A terminal-based job application tracker with durable local storage,
//! built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
