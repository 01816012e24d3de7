//! Macros for trigger error handling.
//!
//! Provides convenience macros for creating and returning [`crate::error::TriggerError`]
//! instances with reduced boilerplate.

/// Creates a [`crate::error::TriggerError`] from error kind and description.
///
/// Accepts either a static description alone or a static description followed by any
/// [`std::fmt::Display`] detail.
#[macro_export]
macro_rules! trigger_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::TriggerError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::TriggerError::from(($kind, $desc, $detail.to_string()))
    };
}

/// Creates and returns a [`crate::error::TriggerError`] from the current function.
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return Err($crate::trigger_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return Err($crate::trigger_error!($kind, $desc, $detail))
    };
}
