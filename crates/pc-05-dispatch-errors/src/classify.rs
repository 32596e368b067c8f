//! # Dispatch Error Classification

use shared_types::{ArithmeticKind, DispatchError, ErrorDescriptor, ErrorRegistry};
use tracing::warn;

/// Map a raw dispatch error to a user-facing descriptor.
///
/// Total function: every input produces a well-formed descriptor. `None`
/// yields the no-error descriptor; a module error unknown to the registry
/// degrades to its positional rendering rather than failing.
pub fn classify(error: Option<&DispatchError>, registry: &ErrorRegistry) -> ErrorDescriptor {
    let Some(error) = error else {
        return ErrorDescriptor::ok();
    };

    let details = match error {
        DispatchError::Module {
            pallet_index,
            error_index,
        } => match registry.lookup(*pallet_index, *error_index) {
            Some(meta) => format!("{}::{}: {}", meta.pallet, meta.error, meta.docs),
            None => {
                warn!(
                    "[pc-05] no metadata for module error {}/{}",
                    pallet_index, error_index
                );
                format!("module error {pallet_index}/{error_index}")
            }
        },
        DispatchError::BadOrigin => {
            "bad origin: the caller may not dispatch this call".to_string()
        }
        DispatchError::Arithmetic(kind) => match kind {
            ArithmeticKind::Overflow => "arithmetic overflow during dispatch".to_string(),
            ArithmeticKind::Underflow => "arithmetic underflow during dispatch".to_string(),
            ArithmeticKind::DivisionByZero => "division by zero during dispatch".to_string(),
        },
        DispatchError::Other(detail) => detail.clone(),
    };

    ErrorDescriptor::failure(details)
}
