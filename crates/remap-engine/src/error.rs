//! Mapping engine errors
//!
//! The engine never swallows a failure to produce a partially-correct
//! destination: every error propagates to the immediate caller. Nested
//! member failures are wrapped once, at the level where they occur, with
//! the originating type pair and the member path from the outermost
//! mapping preserved.

use remap_types::TypeError;
use std::fmt;

/// Errors raised during mapping resolution and execution
///
/// `Display`, `Error`, and `From<TypeError>` are implemented by hand
/// because several variants carry a display-only field named `source`,
/// which `thiserror`'s derive would otherwise treat as `Error::source()`.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// No strategy claims the type pair
    UnmappedTypePair {
        /// Source type name
        source: String,
        /// Destination type name
        destination: String,
        /// Member path from the outermost mapping ("<root>" at top level)
        path: String,
    },

    /// A matched strategy could not complete the mapping
    StrategyFailure {
        /// Name of the failing strategy
        strategy: &'static str,
        /// Source type name
        source: String,
        /// Destination type name
        destination: String,
        /// Member path from the outermost mapping ("<root>" at top level)
        path: String,
        /// Underlying cause
        cause: Box<MapError>,
    },

    /// No symbol with a matching name exists on the destination enum
    UnknownEnumSymbol {
        /// The symbol name that was looked up
        symbol: String,
        /// Destination enum name
        ty: String,
    },

    /// A string could not be parsed into the destination primitive
    ParseFailure {
        /// The text that failed to parse
        text: String,
        /// Destination type name
        ty: String,
    },

    /// A user-defined conversion operator failed
    ConversionFailed {
        /// Source type name
        source: String,
        /// Destination type name
        destination: String,
        /// Failure description
        message: String,
    },

    /// Recursive mapping exceeded the nesting bound
    DepthExceeded {
        /// The configured bound
        max: usize,
    },

    /// A type model error surfaced during mapping
    Type(TypeError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::UnmappedTypePair {
                source,
                destination,
                path,
            } => write!(
                f,
                "No mapping strategy for {source} -> {destination} (at {path})"
            ),
            MapError::StrategyFailure {
                strategy,
                source,
                destination,
                path,
                cause,
            } => write!(
                f,
                "Strategy '{strategy}' failed mapping {source} -> {destination} at {path}: {cause}"
            ),
            MapError::UnknownEnumSymbol { symbol, ty } => {
                write!(f, "No symbol matching '{symbol}' on enum {ty}")
            }
            MapError::ParseFailure { text, ty } => {
                write!(f, "Cannot parse '{text}' as {ty}")
            }
            MapError::ConversionFailed {
                source,
                destination,
                message,
            } => write!(
                f,
                "Conversion operator {source} -> {destination} failed: {message}"
            ),
            MapError::DepthExceeded { max } => {
                write!(f, "Mapping exceeded maximum nesting depth {max}")
            }
            MapError::Type(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Type(err) => std::error::Error::source(err),
            _ => None,
        }
    }
}

impl From<TypeError> for MapError {
    fn from(err: TypeError) -> Self {
        MapError::Type(err)
    }
}
