//! Infrastructure layer providing external service integrations.
//!
//! This module contains the durable storage backends and the persistence
//! adapter that mirrors store state to them.

pub mod persistence;

pub use persistence::*;
