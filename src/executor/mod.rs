//! Subprocess execution with timeout enforcement.

mod error;
mod process;
mod request;

pub use error::*;
pub use process::*;
pub use request::*;
