//! Interactive console for the claim flow.

mod console;

pub use console::Console;

/// What the console is showing for the current or last attempt.
///
/// Every attempt starts by moving back to `Submitting`; a `Success` or
/// `Failed` always describes the latest attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Nothing attempted yet.
    Idle,
    /// An action is in flight.
    Submitting,
    /// The last action completed, with the notice shown for it.
    Success { notice: String },
    /// The last action failed, with the message shown for it.
    Failed { message: String },
}
