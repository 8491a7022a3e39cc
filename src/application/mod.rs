//! Application layer managing state and business workflows.
//!
//! This module holds the observable store container, the concrete record
//! and session stores built on it, and the terminal application state
//! that coordinates between them and the presentation layer.

pub mod applications;
pub mod session;
pub mod state;
pub mod store;

pub use applications::*;
pub use session::*;
pub use state::*;
pub use store::*;
