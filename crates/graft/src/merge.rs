//! The tree reconciler: merges untrusted JSON payloads into mapped object
//! graphs, guided by the schema's relation cardinality.

mod from_dict;
pub use from_dict::from_dict;

mod from_list;
pub use from_list::from_list;

mod options;
pub use options::{MergeOptions, UnknownKeys};

mod update_or_create;
pub use update_or_create::update_or_create;
