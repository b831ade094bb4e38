pub mod constructors;
pub mod types;

pub use constructors::*;
pub use types::{Error, Kind, Result};
