pub mod error;
pub mod value;

pub use error::{DachshundError, InvalidArgument, Result};
pub use value::{TypeSpec, ValueKind};
