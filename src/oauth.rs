//! Internal OAuth client facade used by REST-backed adapters.

// crates.io
use oauth2::{
	AuthType, ClientId as OAuthClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RefreshToken, RequestTokenError, Scope, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeSet, TokenRefreshResult, TokenSecret},
	error::{ErrorKind, UnifiedError},
	http::{ResponseMetadataSlot, TokenHttpClient},
	provider::{AdapterOperation, AppConfig, ErrorMapper, ProviderErrorContext},
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, UnifiedError>> + 'a + Send>>;

/// `grant_type=refresh_token` exchanges against a single token endpoint.
pub(crate) struct RefreshFacade<C>
where
	C: ?Sized + TokenHttpClient,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	error_mapper: Arc<dyn ErrorMapper>,
}
impl<C> RefreshFacade<C>
where
	C: ?Sized + TokenHttpClient,
{
	pub(crate) fn new(
		config: &AppConfig,
		token_endpoint: &Url,
		http_client: Arc<C>,
		error_mapper: Arc<dyn ErrorMapper>,
	) -> Self {
		let mut oauth_client = BasicClient::new(OAuthClientId::new(config.client_id.to_string()))
			.set_token_uri(TokenUrl::from_url(token_endpoint.clone()))
			.set_auth_type(AuthType::RequestBody);

		if let Some(secret) = &config.client_secret {
			oauth_client = oauth_client.set_client_secret(ClientSecret::new(secret.expose().into()));
		}

		Self { oauth_client, http_client, error_mapper }
	}

	/// Redeems `refresh_token` for a new access token scoped to `scopes`.
	///
	/// Providers that omit `scope` are assumed to have granted the request as-is, and a
	/// missing `expires_in` yields a token without a known lifetime.
	pub(crate) fn refresh<'a>(
		&'a self,
		refresh_token: &'a TokenSecret,
		scopes: &'a ScopeSet,
	) -> FacadeFuture<'a, TokenRefreshResult> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.with_metadata(meta.clone());
			let refresh_secret = RefreshToken::new(refresh_token.expose().to_owned());
			let mut request = self.oauth_client.exchange_refresh_token(&refresh_secret);

			for scope in scopes.iter() {
				request = request.add_scope(Scope::new(scope.to_owned()));
			}

			let response = request.request_async(&instrumented).await.map_err(|err| {
				map_request_error(
					self.error_mapper.as_ref(),
					AdapterOperation::SilentToken,
					meta.take().and_then(|meta| meta.status),
					err,
				)
			})?;
			let granted = match response.scopes() {
				Some(returned) => ScopeSet::new(returned.iter().map(|scope| scope.as_str().to_owned()))
					.map_err(|err| UnifiedError::new(ErrorKind::Unknown, err))?,
				None => scopes.clone(),
			};
			let expires_in = response
				.expires_in()
				.and_then(|lifetime| i64::try_from(lifetime.as_secs()).ok())
				.map(Duration::seconds)
				.unwrap_or(Duration::ZERO);
			let access_token =
				AccessToken::new(response.access_token().secret().as_str(), granted, expires_in);
			let mut result = TokenRefreshResult::new(access_token);

			if let Some(rotated) = response.refresh_token() {
				result = result.with_refresh_token(rotated.secret().as_str());
			}

			Ok(result)
		})
	}
}

fn map_request_error<E>(
	mapper: &dyn ErrorMapper,
	operation: AdapterOperation,
	status: Option<u16>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> UnifiedError
where
	E: 'static + Send + Sync + StdError,
{
	let mut ctx = match &err {
		RequestTokenError::ServerResponse(response) => {
			let mut ctx =
				ProviderErrorContext::new(operation)
					.with_error_code(AsRef::<str>::as_ref(response.error()));

			if let Some(description) = response.error_description() {
				ctx = ctx.with_error_description(description.as_str());
			}

			ctx
		},
		RequestTokenError::Request(HttpClientError::Http(source)) =>
			ProviderErrorContext::malformed_request(operation)
				.with_error_description(format!("Token request could not be built: {source}.")),
		RequestTokenError::Request(_) => ProviderErrorContext::network_failure(operation),
		RequestTokenError::Parse(source, _body) => ProviderErrorContext::new(operation)
			.with_error_description(parse_failure_description(source)),
		RequestTokenError::Other(message) =>
			ProviderErrorContext::new(operation).with_error_description(message.as_str()),
	};

	if let Some(status) = status {
		ctx = ctx.with_http_status(status);
	}

	mapper.map_error(&ctx, Box::new(err))
}

fn parse_failure_description(source: &serde_path_to_error::Error<serde_json::Error>) -> String {
	format!("Token response could not be parsed at `{}`: {}.", source.path(), source.inner())
}
