/**
 * UI Devtools Component Meta - Query Server
 *
 * Serves the merged component catalog and raw example sources to the
 * browser-based inspector panel during local development.
 */
pub mod introspection;
pub mod server;

pub use introspection::{FileIntrospectionSource, IntrospectionSource};
pub use server::{DevtoolsServer, ServerConfig, ServerContext};
