//! Interactive login and the switch-over chain.

// self
use crate::{
	_prelude::*,
	auth::{LoginOutcome, ResolvedLogin, ScopeSet, SwitchRequest},
	error::ConfigError,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	orchestrator::Orchestrator,
	provider::ProviderKind,
};

/// Arguments carried through one login chain.
///
/// Both provider arguments travel with every step so a switch-over can reuse the original
/// personal scopes or organizational resource id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginRequest {
	/// Scopes requested from the personal provider.
	pub personal_scopes: ScopeSet,
	/// Resource id requested from the organizational provider.
	pub organizational_resource: Option<String>,
	/// Provider the chain starts with.
	pub start: ProviderKind,
}
impl LoginRequest {
	/// Creates a request that starts with the personal provider.
	pub fn new(personal_scopes: ScopeSet) -> Self {
		Self { personal_scopes, organizational_resource: None, start: ProviderKind::Personal }
	}

	/// Sets the organizational resource id. An empty id counts as missing.
	pub fn with_organizational_resource(mut self, resource_id: impl Into<String>) -> Self {
		self.organizational_resource = Some(resource_id.into());

		self
	}

	/// Chooses the starting provider.
	pub fn start_with(mut self, provider: ProviderKind) -> Self {
		self.start = provider;

		self
	}

	fn scopes_for(&self, provider: ProviderKind) -> Result<ScopeSet> {
		match provider {
			ProviderKind::Personal => {
				if self.personal_scopes.is_empty() {
					return Err(ConfigError::MissingScopes.into());
				}

				Ok(self.personal_scopes.clone())
			},
			ProviderKind::Organizational => {
				let resource_id = self
					.organizational_resource
					.as_deref()
					.filter(|id| !id.is_empty())
					.ok_or(ConfigError::MissingResourceId)?;

				Ok(ScopeSet::resource(resource_id).map_err(ConfigError::from)?)
			},
		}
	}
}
impl Default for LoginRequest {
	fn default() -> Self {
		Self::new(ScopeSet::default())
	}
}

impl Orchestrator {
	/// Runs an interactive login, following switch-overs until a concrete identity arrives.
	///
	/// The resolved login is delivered to the completion callback before any adapter
	/// acknowledges it. A user cancellation anywhere in the chain resolves to `Ok(())` without
	/// a callback; every other failure is returned unchanged.
	pub async fn login_new_user(&self, request: &LoginRequest) -> Result<()> {
		const KIND: OperationKind = OperationKind::Login;

		let span = OperationSpan::new(KIND, Some(request.start), "login_new_user");

		obs::record_operation(KIND, OperationOutcome::Attempt);

		let result: Result<_> = span
			.instrument(async move {
				let _serialized = self.serialize_logins().await;
				let outcome = self.dispatch_login(request, request.start, None).await?;

				self.run_login_chain(request, request.start, outcome).await
			})
			.await;

		match result {
			Ok(()) => {
				obs::record_operation(KIND, OperationOutcome::Success);

				Ok(())
			},
			Err(err) if err.is_user_canceled() => {
				self.metrics.record_cancellation();
				obs::trace_cancellation(request.start);
				obs::record_operation(KIND, OperationOutcome::Canceled);

				Ok(())
			},
			Err(err) => {
				obs::record_operation(KIND, OperationOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Calls `login_new_user` on the adapter for `provider` after validating its arguments.
	pub(crate) async fn dispatch_login(
		&self,
		request: &LoginRequest,
		provider: ProviderKind,
		username_hint: Option<&str>,
	) -> Result<LoginOutcome> {
		let adapter = self.adapter(provider)?;
		let scopes = request.scopes_for(provider)?;

		self.metrics.record_login_attempt();

		Ok(adapter.login_new_user(&scopes, username_hint).await?)
	}

	/// Follows switch-overs starting from `outcome`, produced by `from`, then completes the
	/// resolved login.
	pub(crate) async fn run_login_chain(
		&self,
		request: &LoginRequest,
		from: ProviderKind,
		outcome: LoginOutcome,
	) -> Result<()> {
		let mut outcome = outcome;
		let mut from = from;
		let mut switches = 0;

		loop {
			match outcome.resolve() {
				Ok(login) => {
					self.complete(login).await;

					return Ok(());
				},
				Err(SwitchRequest { target, username_hint }) => {
					if switches >= self.config.max_switches {
						return Err(ConfigError::SwitchLimitExceeded {
							limit: self.config.max_switches,
							target,
						}
						.into());
					}

					switches += 1;

					self.metrics.record_switch();
					obs::record_switch(from, target);
					obs::trace_switch(target, switches);

					outcome = self.dispatch_login(request, target, Some(username_hint.as_str())).await?;
					from = target;
				},
			}
		}
	}

	/// Delivers a resolved login, then acknowledges it on every configured adapter.
	async fn complete(&self, login: ResolvedLogin) {
		self.callback.on_login(login).await;
		self.metrics.record_callback();

		for (_, adapter) in self.configured() {
			adapter.acknowledge_login();
		}
	}
}
