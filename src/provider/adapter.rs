//! Capability contract every provider adapter implements.
//!
//! Adapters own all provider I/O (redirects, native SDK calls, REST exchanges) and all mutable
//! session state. The orchestrator only calls the methods below and treats adapters as
//! read-only shared handles.

// self
use crate::{
	_prelude::*,
	auth::{LoginOutcome, ScopeSet, TokenRefreshResult, TokenSecret, UserId},
	error::UnifiedError,
};

/// Boxed future returned by [`ProviderAdapter`] operations.
pub type AdapterFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, UnifiedError>> + 'a + Send>>;

/// Operations a provider adapter must supply.
///
/// Failures are always [`UnifiedError`]s whose kind the adapter derived from the provider's
/// native error (see [`ErrorMapper`](crate::provider::ErrorMapper)). The redirect bookkeeping
/// hooks default to no-ops so SDK-backed adapters only implement the four async operations.
pub trait ProviderAdapter
where
	Self: Send + Sync,
{
	/// Starts an interactive login, optionally pre-filling the username.
	///
	/// Resolves to a [`UserCanceled`](crate::error::ErrorKind::UserCanceled) failure when the
	/// user aborts.
	fn login_new_user<'a>(
		&'a self,
		scopes: &'a ScopeSet,
		username_hint: Option<&'a str>,
	) -> AdapterFuture<'a, LoginOutcome>;

	/// Clears the provider session for the user.
	fn logout_user<'a>(&'a self, user_id: &'a UserId, user_email: &'a str)
	-> AdapterFuture<'a, ()>;

	/// Acquires a token without user interaction.
	///
	/// Fails with [`InteractiveRequired`](crate::error::ErrorKind::InteractiveRequired) when the
	/// silent path cannot satisfy the request.
	fn access_token_silent<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult>;

	/// Acquires a token through a visible login/consent step.
	fn access_token_interactive<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult>;

	/// Outcome captured from a page redirect that has not been acknowledged yet.
	fn peek_pending_login(&self) -> Option<LoginOutcome> {
		None
	}

	/// Session discovered when the adapter was constructed.
	fn peek_cached_user(&self) -> Option<LoginOutcome> {
		None
	}

	/// Clears pending-login bookkeeping. Must be idempotent.
	fn acknowledge_login(&self) {}
}

/// Parameters for silent and interactive token acquisition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
	/// User the token is for.
	pub user_id: UserId,
	/// Sign-in email, used as the login hint.
	pub user_email: String,
	/// Scopes (or the single organizational resource id) requested.
	pub scopes: ScopeSet,
	/// Refresh token available for the silent path.
	pub refresh_token: Option<TokenSecret>,
}
impl TokenRequest {
	/// Creates a request without a refresh token.
	pub fn new(user_id: UserId, user_email: impl Into<String>, scopes: ScopeSet) -> Self {
		Self { user_id, user_email: user_email.into(), scopes, refresh_token: None }
	}

	/// Attaches a refresh token for the silent path.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(refresh_token.into());

		self
	}

	/// Overrides the refresh token, clearing it when `None`.
	pub fn with_optional_refresh_token(mut self, refresh_token: Option<TokenSecret>) -> Self {
		self.refresh_token = refresh_token;

		self
	}
}
