pub mod config;
pub mod error;
pub mod message;
pub mod owner;

pub use error::{Error, Result};
pub use message::{Message, Role};
pub use owner::Owner;
