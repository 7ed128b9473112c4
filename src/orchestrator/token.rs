//! Silent token acquisition with a single interactive fallback.

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenRefreshResult, TokenSecret, UserId},
	error::{ConfigError, ErrorKind},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	orchestrator::Orchestrator,
	provider::{ProviderKind, TokenRequest},
};

impl Orchestrator {
	/// Acquires a token from `provider`, escalating to the interactive path only when the
	/// silent attempt fails with [`ErrorKind::InteractiveRequired`].
	///
	/// The interactive result is returned as-is. Every other failure, user cancellations
	/// included, is returned without an interactive attempt.
	pub async fn get_access_token(
		&self,
		provider: ProviderKind,
		request: &TokenRequest,
	) -> Result<TokenRefreshResult> {
		const KIND: OperationKind = OperationKind::AccessToken;

		let span = OperationSpan::new(KIND, Some(provider), "get_access_token");

		obs::record_operation(KIND, OperationOutcome::Attempt);

		let result: Result<_> = span
			.instrument(async move {
				let adapter = self.adapter(provider)?;
				let guard = self.token_guard(provider, request);
				let _singleflight = match &guard {
					Some(guard) => Some(guard.lock().await),
					None => None,
				};

				self.metrics.record_silent_attempt();

				match adapter.access_token_silent(request).await {
					Ok(result) => Ok(result),
					Err(err) if err.kind == ErrorKind::InteractiveRequired => {
						self.metrics.record_escalation();
						obs::trace_escalation(provider);

						Ok(adapter.access_token_interactive(request).await?)
					},
					Err(err) => Err(err.into()),
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_operation(KIND, OperationOutcome::Success),
			Err(_) => obs::record_operation(KIND, OperationOutcome::Failure),
		}

		result
	}

	/// Acquires a personal-provider token for `scopes`.
	pub async fn personal_access_token(
		&self,
		user_id: UserId,
		user_email: impl Into<String>,
		scopes: ScopeSet,
		refresh_token: Option<TokenSecret>,
	) -> Result<TokenRefreshResult> {
		let request = TokenRequest::new(user_id, user_email, scopes)
			.with_optional_refresh_token(refresh_token);

		self.get_access_token(ProviderKind::Personal, &request).await
	}

	/// Acquires an organizational-provider token for a single resource id.
	pub async fn organizational_access_token(
		&self,
		user_id: UserId,
		user_email: impl Into<String>,
		resource_id: &str,
		refresh_token: Option<TokenSecret>,
	) -> Result<TokenRefreshResult> {
		if resource_id.is_empty() {
			return Err(ConfigError::MissingResourceId.into());
		}

		let scopes = ScopeSet::resource(resource_id).map_err(ConfigError::from)?;
		let request = TokenRequest::new(user_id, user_email, scopes)
			.with_optional_refresh_token(refresh_token);

		self.get_access_token(ProviderKind::Organizational, &request).await
	}
}
