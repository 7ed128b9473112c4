//! In-process counters describing orchestrator activity.

// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for orchestrator activity.
#[derive(Debug, Default)]
pub struct OrchestratorMetrics {
	login_attempts: AtomicU64,
	switches: AtomicU64,
	callbacks: AtomicU64,
	cancellations: AtomicU64,
	silent_attempts: AtomicU64,
	escalations: AtomicU64,
}
impl OrchestratorMetrics {
	/// Returns the number of adapter `login_new_user` dispatches, switch-overs included.
	pub fn login_attempts(&self) -> u64 {
		self.login_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of provider switch-overs followed.
	pub fn switches(&self) -> u64 {
		self.switches.load(Ordering::Relaxed)
	}

	/// Returns the number of completed callback deliveries.
	pub fn callbacks(&self) -> u64 {
		self.callbacks.load(Ordering::Relaxed)
	}

	/// Returns the number of user cancellations swallowed by interactive login.
	pub fn cancellations(&self) -> u64 {
		self.cancellations.load(Ordering::Relaxed)
	}

	/// Returns the number of silent token acquisitions attempted.
	pub fn silent_attempts(&self) -> u64 {
		self.silent_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of silent failures escalated to the interactive path.
	pub fn escalations(&self) -> u64 {
		self.escalations.load(Ordering::Relaxed)
	}

	pub(crate) fn record_login_attempt(&self) {
		self.login_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_switch(&self) {
		self.switches.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_callback(&self) {
		self.callbacks.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cancellation(&self) {
		self.cancellations.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_silent_attempt(&self) {
		self.silent_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_escalation(&self) {
		self.escalations.fetch_add(1, Ordering::Relaxed);
	}
}
