use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cheap, cloneable cooperative-cancellation flag.
///
/// Raised by the REPL loop when the interrupt chord fires while a handler
/// is running. Handlers that want to cooperate poll [`is_cancelled`]; the
/// core never preempts a handler by force.
///
/// [`is_cancelled`]: CancellationSignal::is_cancelled
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal(Arc<AtomicBool>);

impl CancellationSignal {
	/// Creates a fresh, not-yet-cancelled signal.
	pub fn new() -> Self {
		Self(Arc::new(AtomicBool::new(false)))
	}

	/// Raises the signal. Idempotent.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	/// Whether the signal has been raised.
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}

	/// Resets the signal for reuse on the next handler invocation.
	pub fn reset(&self) {
		self.0.store(false, Ordering::SeqCst);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_uncancelled() {
		assert!(!CancellationSignal::new().is_cancelled());
	}

	#[test]
	fn clone_shares_state() {
		let signal = CancellationSignal::new();
		let clone = signal.clone();
		clone.cancel();
		assert!(signal.is_cancelled());
	}

	#[test]
	fn reset_clears_cancellation() {
		let signal = CancellationSignal::new();
		signal.cancel();
		signal.reset();
		assert!(!signal.is_cancelled());
	}
}
