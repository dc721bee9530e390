pub mod merge;
pub use merge::{from_dict, from_list, update_or_create, MergeOptions, UnknownKeys};

mod object;
pub use object::{FieldValue, Object, ObjectId};

pub mod session;
pub use session::{Op, Session};

pub use graft_core::{schema, value, Error, Result};
