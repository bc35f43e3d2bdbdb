//! Outcome conversion traits.

use crate::error::BoxError;

/// Trait for converting a logic or `then` handler's return value into an outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to inner `T` or yields the boxed error
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "handlers must return `()` or a `Result`",
    note = "Return `Err(..)` to halt the publish operation."
)]
pub trait IntoOutcome {
    /// Convert the output into success or an error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}
