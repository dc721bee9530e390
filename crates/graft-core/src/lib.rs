mod error;
pub use error::Error;

pub mod schema;
pub use schema::Schema;

pub mod value;
pub use value::{Key, Type, Value};

/// A Result type alias that uses Graft's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
