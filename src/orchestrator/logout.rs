//! Direct logout dispatch to a single provider.

// self
use crate::{
	_prelude::*,
	auth::UserId,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	orchestrator::Orchestrator,
	provider::ProviderKind,
};

impl Orchestrator {
	/// Signs the user out of `provider`. No switch-over logic applies.
	pub async fn logout_user(
		&self,
		provider: ProviderKind,
		user_id: &UserId,
		user_email: &str,
	) -> Result<()> {
		const KIND: OperationKind = OperationKind::Logout;

		let span = OperationSpan::new(KIND, Some(provider), "logout_user");

		obs::record_operation(KIND, OperationOutcome::Attempt);

		let result: Result<_> = span
			.instrument(async move {
				let adapter = self.adapter(provider)?;

				Ok(adapter.logout_user(user_id, user_email).await?)
			})
			.await;

		match &result {
			Ok(()) => obs::record_operation(KIND, OperationOutcome::Success),
			Err(_) => obs::record_operation(KIND, OperationOutcome::Failure),
		}

		result
	}
}
