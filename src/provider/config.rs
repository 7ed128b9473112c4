//! Per-provider application registration supplied once at adapter construction.

// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	auth::{ClientId, TokenSecret},
};

/// Errors raised while constructing or validating an [`AppConfig`].
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum AppConfigError {
	/// Client identifier is required.
	#[error("Missing client id.")]
	MissingClientId,
	/// Redirect URI is required.
	#[error("Missing redirect URI.")]
	MissingRedirectUri,
	/// Plain HTTP redirects are only accepted for loopback hosts.
	#[error("The redirect URI must use HTTPS unless it targets a loopback host: {url}.")]
	InsecureRedirect {
		/// Redirect URI that failed validation.
		url: String,
	},
}

/// Immutable application registration for one provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAppConfig")]
pub struct AppConfig {
	/// OAuth client identifier.
	pub client_id: ClientId,
	/// Client secret for confidential registrations.
	pub client_secret: Option<TokenSecret>,
	/// Redirect URI registered with the provider.
	pub redirect_uri: Url,
}
impl AppConfig {
	/// Creates a new builder.
	pub fn builder() -> AppConfigBuilder {
		AppConfigBuilder::default()
	}

	fn validate(&self) -> Result<(), AppConfigError> {
		match self.redirect_uri.scheme() {
			"http" if !is_loopback(&self.redirect_uri) =>
				Err(AppConfigError::InsecureRedirect { url: self.redirect_uri.to_string() }),
			_ => Ok(()),
		}
	}
}
impl Debug for AppConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri.as_str())
			.finish()
	}
}

/// Builder for [`AppConfig`] values.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
	client_id: Option<ClientId>,
	client_secret: Option<TokenSecret>,
	redirect_uri: Option<Url>,
}
impl AppConfigBuilder {
	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: ClientId) -> Self {
		self.client_id = Some(client_id);

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<TokenSecret>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn redirect_uri(mut self, url: Url) -> Self {
		self.redirect_uri = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<AppConfig, AppConfigError> {
		let config = AppConfig {
			client_id: self.client_id.ok_or(AppConfigError::MissingClientId)?,
			client_secret: self.client_secret,
			redirect_uri: self.redirect_uri.ok_or(AppConfigError::MissingRedirectUri)?,
		};

		config.validate()?;

		Ok(config)
	}
}

#[derive(Deserialize)]
struct RawAppConfig {
	client_id: ClientId,
	#[serde(default)]
	client_secret: Option<TokenSecret>,
	redirect_uri: Url,
}
impl TryFrom<RawAppConfig> for AppConfig {
	type Error = AppConfigError;

	fn try_from(raw: RawAppConfig) -> Result<Self, Self::Error> {
		let mut builder = AppConfig::builder().client_id(raw.client_id).redirect_uri(raw.redirect_uri);

		if let Some(secret) = raw.client_secret {
			builder = builder.client_secret(secret);
		}

		builder.build()
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(addr)) => addr.is_loopback(),
		Some(Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn client() -> ClientId {
		ClientId::new("0000000048170EF2").expect("Client id fixture should be valid.")
	}

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Redirect fixture should parse.")
	}

	#[test]
	fn builder_requires_client_and_redirect() {
		assert_eq!(AppConfig::builder().build(), Err(AppConfigError::MissingClientId));
		assert_eq!(
			AppConfig::builder().client_id(client()).build(),
			Err(AppConfigError::MissingRedirectUri),
		);
	}

	#[test]
	fn plain_http_redirects_are_loopback_only() {
		let err = AppConfig::builder()
			.client_id(client())
			.redirect_uri(url("http://example.com/auth"))
			.build()
			.expect_err("Public plain-HTTP redirects must be rejected.");

		assert!(matches!(err, AppConfigError::InsecureRedirect { .. }));

		for allowed in [
			"http://localhost:3000/",
			"http://127.0.0.1/cb",
			"http://[::1]/cb",
			"https://login.live.com/oauth20_desktop.srf",
			"msauth.com.example.app://auth",
		] {
			AppConfig::builder()
				.client_id(client())
				.redirect_uri(url(allowed))
				.build()
				.expect("Redirect should be accepted.");
		}
	}

	#[test]
	fn deserialization_validates_and_redacts_secret() {
		let config: AppConfig = serde_json::from_str(
			"{\"client_id\":\"0000000048170EF2\",\"client_secret\":\"s3cret\",\"redirect_uri\":\"https://app.example.com/\"}",
		)
		.expect("Config should deserialize.");

		assert_eq!(config.client_secret.as_ref().map(TokenSecret::expose), Some("s3cret"));
		assert!(!format!("{config:?}").contains("s3cret"));
		assert!(
			serde_json::from_str::<AppConfig>(
				"{\"client_id\":\"abc\",\"redirect_uri\":\"http://example.com/\"}",
			)
			.is_err()
		);
	}
}
