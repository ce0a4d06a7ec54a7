//! Error type for the simulation core.
//!
//! Nothing here is user facing. Errors mark a single malformed entity so the
//! engine can isolate it and keep the rest of the scene advancing.

/// Errors raised while advancing or building simulation state.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A computed or supplied value was NaN or infinite.
    NonFinite {
        what: &'static str,
        context: String,
    },
    /// A body name did not resolve in the orbital tree.
    UnknownBody(String),
    /// The orbital tree description was rejected.
    InvalidTree(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::NonFinite { what, context } => {
                write!(f, "non-finite {} in {}", what, context)
            }
            SimError::UnknownBody(name) => write!(f, "unknown body '{}'", name),
            SimError::InvalidTree(reason) => write!(f, "invalid orbital tree: {}", reason),
        }
    }
}

impl std::error::Error for SimError {}

/// Return `Err(NonFinite)` unless `value` is finite.
pub fn ensure_finite(value: f64, what: &'static str, context: impl FnOnce() -> String) -> Result<f64, SimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFinite {
            what,
            context: context(),
        })
    }
}
