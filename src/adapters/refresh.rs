//! Personal-provider adapter backed by a REST `refresh_token` grant.
//!
//! Silent acquisition redeems the caller's refresh token at the provider's token endpoint.
//! Everything that needs a visible surface (login, consent, logout) goes through the
//! application-supplied [`InteractivePrompt`], so this adapter never renders UI itself.

// self
use crate::{
	_prelude::*,
	auth::{LoginOutcome, ScopeSet, TokenRefreshResult, UserId},
	error::{ErrorKind, UnifiedError},
	http::TokenHttpClient,
	oauth::RefreshFacade,
	provider::{
		AdapterFuture, AppConfig, ErrorMapper, PersonalErrorMapper, ProviderAdapter, TokenRequest,
	},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Refresh adapter specialized for the crate's default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestRefreshAdapter = RefreshGrantAdapter<ReqwestHttpClient>;

/// UI host that performs the interactive half of a REST-backed adapter.
///
/// Implementations typically drive a webview or system browser and must map their own
/// failures (e.g. the user closing the window) into [`UnifiedError`]s.
pub trait InteractivePrompt
where
	Self: Send + Sync,
{
	/// Runs a visible login for `scopes`, pre-filling `username_hint` when given.
	fn login<'a>(
		&'a self,
		config: &'a AppConfig,
		scopes: &'a ScopeSet,
		username_hint: Option<&'a str>,
	) -> AdapterFuture<'a, LoginOutcome>;

	/// Signs `username` out of the provider's web session.
	fn logout<'a>(&'a self, config: &'a AppConfig, username: &'a str) -> AdapterFuture<'a, ()>;
}

/// Personal-provider adapter whose silent path is an OAuth 2.0 refresh grant.
pub struct RefreshGrantAdapter<C>
where
	C: ?Sized + TokenHttpClient,
{
	config: AppConfig,
	token_endpoint: Url,
	http_client: Arc<C>,
	prompt: Arc<dyn InteractivePrompt>,
	error_mapper: Arc<dyn ErrorMapper>,
}
impl<C> RefreshGrantAdapter<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Token endpoint of the consumer Microsoft account service.
	pub const LIVE_TOKEN_ENDPOINT: &'static str = "https://login.live.com/oauth20_token.srf";

	/// Creates an adapter that reuses the caller-provided transport.
	pub fn with_http_client(
		config: AppConfig,
		token_endpoint: Url,
		http_client: impl Into<Arc<C>>,
		prompt: Arc<dyn InteractivePrompt>,
	) -> Self {
		Self {
			config,
			token_endpoint,
			http_client: http_client.into(),
			prompt,
			error_mapper: Arc::new(PersonalErrorMapper),
		}
	}

	/// Replaces the default [`PersonalErrorMapper`].
	pub fn with_error_mapper(mut self, mapper: Arc<dyn ErrorMapper>) -> Self {
		self.error_mapper = mapper;

		self
	}

	/// Application registration this adapter was built with.
	pub fn config(&self) -> &AppConfig {
		&self.config
	}

	/// Token endpoint used for silent acquisition.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}
}
#[cfg(feature = "reqwest")]
impl RefreshGrantAdapter<ReqwestHttpClient> {
	/// Creates an adapter with its own reqwest-backed transport.
	pub fn new(config: AppConfig, token_endpoint: Url, prompt: Arc<dyn InteractivePrompt>) -> Self {
		Self::with_http_client(config, token_endpoint, ReqwestHttpClient::default(), prompt)
	}
}
impl<C> ProviderAdapter for RefreshGrantAdapter<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn login_new_user<'a>(
		&'a self,
		scopes: &'a ScopeSet,
		username_hint: Option<&'a str>,
	) -> AdapterFuture<'a, LoginOutcome> {
		self.prompt.login(&self.config, scopes, username_hint)
	}

	fn logout_user<'a>(&'a self, _user_id: &'a UserId, user_email: &'a str)
	-> AdapterFuture<'a, ()> {
		self.prompt.logout(&self.config, user_email)
	}

	fn access_token_silent<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		Box::pin(async move {
			let refresh_token = request.refresh_token.as_ref().ok_or_else(|| {
				UnifiedError::from_message(
					ErrorKind::InteractiveRequired,
					"No refresh token was passed for silent acquisition.",
				)
			})?;
			let facade = RefreshFacade::new(
				&self.config,
				&self.token_endpoint,
				self.http_client.clone(),
				self.error_mapper.clone(),
			);

			facade.refresh(refresh_token, &request.scopes).await
		})
	}

	fn access_token_interactive<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		Box::pin(async move {
			let outcome = self
				.prompt
				.login(&self.config, &request.scopes, Some(request.user_email.as_str()))
				.await?;
			let LoginOutcome::Full(identity) = outcome else {
				return Err(UnifiedError::from_message(
					ErrorKind::Unknown,
					"Interactive login did not return a full profile.",
				));
			};
			let access_token = identity.access_token.ok_or_else(|| {
				UnifiedError::from_message(
					ErrorKind::Unknown,
					"Interactive login did not return an access token.",
				)
			})?;

			Ok(TokenRefreshResult { access_token, refresh_token: identity.refresh_token })
		})
	}
}
impl<C> Debug for RefreshGrantAdapter<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RefreshGrantAdapter")
			.field("config", &self.config)
			.field("token_endpoint", &self.token_endpoint.as_str())
			.finish()
	}
}
