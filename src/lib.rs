pub mod error;
pub mod proto;

pub use error::{Error, Result};
pub use proto::{frame, Encode, WriteBuffer};
