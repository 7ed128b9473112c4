//! Error taxonomy shared by the orchestrator, provider adapters, and callers.
//!
//! Two categories exist side by side. [`UnifiedError`] is what adapters produce after mapping
//! a provider-native failure into an [`ErrorKind`]; the orchestrator forwards it untouched.
//! [`ConfigError`] covers requests that never reach an adapter at all (missing adapter, empty
//! scopes, invalid configuration) and deliberately carries no [`ErrorKind`].

// self
use crate::{_prelude::*, provider::ProviderKind};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed, thread-safe error used for opaque provider causes.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; no adapter was contacted.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Failure reported by a provider adapter, passed through verbatim.
	#[error(transparent)]
	Provider(#[from] UnifiedError),
}
impl Error {
	/// Returns the unified kind for adapter failures, or `None` for configuration errors.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Provider(err) => Some(err.kind),
			Self::Config(_) => None,
		}
	}

	/// Returns `true` when the adapter reported a user-initiated cancellation.
	pub fn is_user_canceled(&self) -> bool {
		self.kind() == Some(ErrorKind::UserCanceled)
	}
}

/// Configuration and validation failures raised before any adapter call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No adapter is configured for the requested provider.
	#[error("The {provider} provider is not configured.")]
	ProviderNotConfigured {
		/// Provider that was requested.
		provider: ProviderKind,
	},
	/// Personal-provider login was requested with an empty scope set.
	#[error("No personal scopes were passed.")]
	MissingScopes,
	/// Organizational-provider login was requested without a resource id.
	#[error("No organizational resource id was passed.")]
	MissingResourceId,
	/// A login chain exceeded the configured number of provider switch-overs.
	#[error("Login chain exceeded {limit} provider switch-overs while switching to {target}.")]
	SwitchLimitExceeded {
		/// Configured switch-over limit.
		limit: usize,
		/// Provider the rejected switch-over targeted.
		target: ProviderKind,
	},
	/// Request scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Identifier validation failed.
	#[error("Identifier is invalid.")]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Application configuration failed validation.
	#[error("Application configuration is invalid.")]
	InvalidAppConfig(#[from] crate::provider::AppConfigError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Unified classification of provider failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
	/// Unmapped or unrecognized provider failure.
	#[default]
	Unknown,
	/// Network or transport failure; safe to retry later.
	ConnectivityIssue,
	/// The silent path cannot satisfy the request; an interactive step is needed.
	InteractiveRequired,
	/// The user aborted an interactive step.
	UserCanceled,
	/// Non-recoverable provider-side misconfiguration.
	CriticalError,
}
impl ErrorKind {
	/// Stable numeric code for the kind.
	pub const fn code(self) -> i32 {
		match self {
			Self::Unknown => -1,
			Self::ConnectivityIssue => 1,
			Self::InteractiveRequired => 2,
			Self::UserCanceled => 3,
			Self::CriticalError => 4,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "unknown",
			Self::ConnectivityIssue => "connectivity_issue",
			Self::InteractiveRequired => "interactive_required",
			Self::UserCanceled => "user_canceled",
			Self::CriticalError => "critical_error",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Provider failure mapped into the unified taxonomy.
///
/// The `cause` keeps the provider-native error so applications can downcast it when they
/// need provider-specific detail.
#[derive(Debug, ThisError)]
#[error("Provider reported {kind}{}.", .description.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
pub struct UnifiedError {
	/// Unified classification derived by the adapter's mapping.
	pub kind: ErrorKind,
	/// Opaque provider-native error.
	#[source]
	pub cause: BoxError,
	/// Optional provider-supplied description.
	pub description: Option<String>,
}
impl UnifiedError {
	/// Wraps a provider-native error with the given kind.
	pub fn new(kind: ErrorKind, cause: impl 'static + Send + Sync + StdError) -> Self {
		Self::from_boxed(kind, Box::new(cause))
	}

	/// Wraps an already boxed provider-native error.
	pub fn from_boxed(kind: ErrorKind, cause: BoxError) -> Self {
		Self { kind, cause, description: None }
	}

	/// Builds an error whose cause is a plain provider message.
	pub fn from_message(kind: ErrorKind, message: impl Into<String>) -> Self {
		Self::new(kind, ProviderMessage(message.into()))
	}

	/// Attaches a provider-supplied description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}
}

/// Provider failure that only carries a message.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{0}")]
pub struct ProviderMessage(pub String);
