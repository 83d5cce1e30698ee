pub mod analysis;
pub mod error;
pub mod filter;
pub mod log;

pub use error::{Error, Result};
