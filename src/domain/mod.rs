pub mod models;
pub mod export;
pub mod errors;

pub use models::*;
pub use export::*;
pub use errors::*;
