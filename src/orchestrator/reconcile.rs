//! Startup reconciliation of cached users and pending redirect logins.

// std
use std::sync::atomic::Ordering;
// self
use crate::{
	_prelude::*,
	auth::LoginOutcome,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	orchestrator::Orchestrator,
	provider::ProviderKind,
};

impl Orchestrator {
	/// Delivers logins that adapters discovered on their own before the application is ready.
	///
	/// Cached users are processed first (organizational, then personal), followed by at most
	/// one pending redirect login, preferring the organizational adapter's. Each item runs its
	/// own login chain using the builder's startup request, and a failing item does not stop
	/// the ones after it; the first failure is returned once every item has been processed.
	///
	/// Reconciliation completes once per orchestrator: later calls wait for an in-flight run
	/// and then return `Ok(())`. Only a run that failed without delivering anything can run
	/// again, since nothing it read has been acknowledged yet.
	pub async fn process_startup_logins(&self) -> Result<()> {
		const KIND: OperationKind = OperationKind::Reconcile;

		let span = OperationSpan::new(KIND, None, "process_startup_logins");
		let mut reconciled = self.reconciled.lock().await;

		if *reconciled {
			return Ok(());
		}

		obs::record_operation(KIND, OperationOutcome::Attempt);

		let (delivered, failure) = span
			.instrument(async move {
				let _serialized = self.serialize_logins().await;
				let mut delivered = false;
				let mut failure = None;

				for (provider, outcome) in self.startup_outcomes() {
					match self.run_login_chain(&self.startup_request, provider, outcome).await {
						Ok(()) => delivered = true,
						Err(err) if failure.is_none() => failure = Some(err),
						Err(_) => {},
					}
				}

				(delivered, failure)
			})
			.await;

		if delivered || failure.is_none() {
			*reconciled = true;

			self.ready.store(true, Ordering::Release);
		}

		match failure {
			None => {
				obs::record_operation(KIND, OperationOutcome::Success);

				Ok(())
			},
			Some(err) => {
				obs::record_operation(KIND, OperationOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Snapshots every startup outcome before any of them is delivered, since delivering one
	/// acknowledges pending logins on every adapter.
	fn startup_outcomes(&self) -> Vec<(ProviderKind, LoginOutcome)> {
		let mut outcomes = self
			.configured()
			.filter_map(|(provider, adapter)| {
				adapter.peek_cached_user().map(|outcome| (provider, outcome))
			})
			.collect::<Vec<_>>();
		let pending = self.configured().find_map(|(provider, adapter)| {
			adapter.peek_pending_login().map(|outcome| (provider, outcome))
		});

		outcomes.extend(pending);

		outcomes
	}
}
