//! Transform errors.

use crate::literal::LiteralError;
use thiserror::Error;

/// An error raised while processing one component source unit.
///
/// A malformed override block is authored content, so it fails the build
/// for that unit instead of being skipped silently.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("malformed devtools override block in {unit}: {source}")]
    MalformedOverride {
        unit: String,
        #[source]
        source: LiteralError,
    },
}

impl MetaError {
    /// The source unit this error originated from.
    pub fn unit(&self) -> &str {
        match self {
            MetaError::MalformedOverride { unit, .. } => unit,
        }
    }
}
