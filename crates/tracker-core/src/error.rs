//! Error types for core parsing.

use thiserror::Error;

/// A dimension key that is not one of the eight known dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dimension: {0}")]
pub struct UnknownDimension(pub String);
