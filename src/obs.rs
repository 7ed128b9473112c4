//! Optional observability helpers for orchestrator operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `oauth2_unified.operation` with `op`, `provider`, and
//!   `stage` fields, plus events for switch-overs, escalations, and swallowed cancellations.
//! - Enable `metrics` to increment `oauth2_unified_operation_total` (labels `op` + `outcome`)
//!   and `oauth2_unified_switch_total` (labels `from` + `to`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Public orchestrator operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Interactive login including switch-overs.
	Login,
	/// Startup reconciliation of cached users and pending redirect logins.
	Reconcile,
	/// Silent token acquisition with interactive fallback.
	AccessToken,
	/// Provider logout.
	Logout,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Login => "login",
			OperationKind::Reconcile => "reconcile",
			OperationKind::AccessToken => "access_token",
			OperationKind::Logout => "logout",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an orchestrator operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// User cancellation swallowed by interactive login.
	Canceled,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
			OperationOutcome::Canceled => "canceled",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
