/**
 * UI Devtools Component Meta - Core
 *
 * Extracts author-written devtools metadata blocks from component sources,
 * evaluates them into structured values, and merges them with the
 * introspected component catalog served to the inspector panel.
 */
pub mod error;
pub mod extract;
pub mod literal;
pub mod merge;
pub mod slug;
pub mod store;
pub mod transform;

pub use error::MetaError;
pub use extract::extract_devtools_block;
pub use literal::{evaluate, LiteralError};
pub use merge::merge_catalog;
pub use slug::{kebab_case, slug_from_component_name, slug_from_file_name};
pub use store::MetaStore;
pub use transform::apply_transform;

/// Default component-name prefix reserved for the library's own components.
pub const DEFAULT_PREFIX: &str = "U";
