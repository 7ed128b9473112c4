//! Pending-login bookkeeping for redirect-based adapters.
//!
//! A redirect login leaves the page, so the adapter marks the attempt as pending in storage
//! that survives the reload ([`PendingFlagStore`]). When the page comes back the adapter
//! captures the outcome parsed from the redirect, and the orchestrator acknowledges it only
//! after the application callback has settled.

// self
use crate::{_prelude::*, auth::LoginOutcome};

/// Redirect bookkeeping state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingState {
	/// No redirect login is in flight.
	#[default]
	None,
	/// A redirect login was started and has not been acknowledged.
	Pending,
	/// The captured outcome was delivered and acknowledged.
	Acknowledged,
}

/// Storage medium for the pending flag.
pub trait PendingFlagStore
where
	Self: Send + Sync,
{
	/// Reads the persisted state.
	fn load(&self) -> PendingState;

	/// Persists a new state.
	fn store(&self, state: PendingState);
}

/// Process-local [`PendingFlagStore`].
#[derive(Debug, Default)]
pub struct MemoryFlagStore(RwLock<PendingState>);
impl MemoryFlagStore {
	/// Creates a store that starts in `state`, e.g. after restoring a persisted flag.
	pub fn with_state(state: PendingState) -> Self {
		Self(RwLock::new(state))
	}
}
impl PendingFlagStore for MemoryFlagStore {
	fn load(&self) -> PendingState {
		*self.0.read()
	}

	fn store(&self, state: PendingState) {
		*self.0.write() = state;
	}
}

/// `None -> Pending -> Acknowledged` state machine plus the captured outcome.
#[derive(Debug, Default)]
pub struct PendingLogin<S = MemoryFlagStore>
where
	S: PendingFlagStore,
{
	flags: S,
	outcome: Mutex<Option<LoginOutcome>>,
}
impl<S> PendingLogin<S>
where
	S: PendingFlagStore,
{
	/// Wraps a flag store.
	pub fn new(flags: S) -> Self {
		Self { flags, outcome: Mutex::new(None) }
	}

	/// Marks a redirect login as started. Any previously captured outcome is dropped.
	pub fn begin(&self) {
		*self.outcome.lock() = None;

		self.flags.store(PendingState::Pending);
	}

	/// Records the outcome parsed from a redirect.
	///
	/// Returns `false` and ignores the outcome unless a login is pending, so a reload that
	/// replays an old redirect cannot resurrect an acknowledged login.
	pub fn capture(&self, outcome: LoginOutcome) -> bool {
		if self.flags.load() != PendingState::Pending {
			return false;
		}

		*self.outcome.lock() = Some(outcome);

		true
	}

	/// Clears a pending login whose redirect carried nothing.
	pub fn discard(&self) {
		if self.flags.load() == PendingState::Pending {
			*self.outcome.lock() = None;

			self.flags.store(PendingState::None);
		}
	}

	/// Outcome captured while pending and not yet acknowledged.
	pub fn peek(&self) -> Option<LoginOutcome> {
		if self.flags.load() != PendingState::Pending {
			return None;
		}

		self.outcome.lock().clone()
	}

	/// Acknowledges the pending login. Safe to call in any state.
	pub fn acknowledge(&self) {
		if self.flags.load() == PendingState::Pending {
			*self.outcome.lock() = None;

			self.flags.store(PendingState::Acknowledged);
		}
	}

	/// Current bookkeeping state.
	pub fn state(&self) -> PendingState {
		self.flags.load()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn switch() -> LoginOutcome {
		LoginOutcome::SwitchToPersonal { username_hint: "alice@example.com".into() }
	}

	#[test]
	fn capture_requires_pending_flag() {
		let pending = <PendingLogin>::default();

		assert!(!pending.capture(LoginOutcome::Empty));
		assert_eq!(pending.peek(), None);

		pending.begin();

		assert!(pending.capture(switch()));
		assert_eq!(pending.state(), PendingState::Pending);
		assert_eq!(pending.peek(), Some(switch()));
	}

	#[test]
	fn acknowledge_is_idempotent() {
		let pending = <PendingLogin>::default();

		pending.acknowledge();

		assert_eq!(pending.state(), PendingState::None);

		pending.begin();
		pending.capture(LoginOutcome::Empty);
		pending.acknowledge();
		pending.acknowledge();

		assert_eq!(pending.state(), PendingState::Acknowledged);
		assert_eq!(pending.peek(), None);
		assert!(!pending.capture(LoginOutcome::Empty), "Acknowledged logins must stay closed.");
	}

	#[test]
	fn discard_resets_only_pending_logins() {
		let pending = PendingLogin::new(MemoryFlagStore::with_state(PendingState::Pending));

		pending.discard();

		assert_eq!(pending.state(), PendingState::None);

		let acknowledged =
			PendingLogin::new(MemoryFlagStore::with_state(PendingState::Acknowledged));

		acknowledged.discard();

		assert_eq!(acknowledged.state(), PendingState::Acknowledged);
	}
}
