//! Per-provider classification of native failures into [`ErrorKind`].
//!
//! Adapters collect whatever the provider reported (OAuth `error` fields, SDK error codes,
//! HTTP status, network failure) into a [`ProviderErrorContext`] and ask their
//! [`ErrorMapper`] for the unified kind. The orchestrator never classifies errors itself.

// self
use crate::{
	_prelude::*,
	error::{ErrorKind, UnifiedError},
};

/// Maps provider-native failure details into the unified taxonomy.
pub trait ErrorMapper
where
	Self: Send + Sync,
{
	/// Classifies a failure.
	fn classify(&self, ctx: &ProviderErrorContext) -> ErrorKind;

	/// Classifies a failure and wraps the native cause into a [`UnifiedError`].
	fn map_error(&self, ctx: &ProviderErrorContext, cause: BoxError) -> UnifiedError {
		let err = UnifiedError::from_boxed(self.classify(ctx), cause);

		match &ctx.error_description {
			Some(description) => err.with_description(description.clone()),
			None => err,
		}
	}
}

/// Adapter operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdapterOperation {
	/// Interactive login.
	Login,
	/// Session logout.
	Logout,
	/// Silent token acquisition.
	SilentToken,
	/// Interactive token acquisition.
	InteractiveToken,
}

/// Provider-native failure details handed to an [`ErrorMapper`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderErrorContext {
	/// Operation that failed.
	pub operation: AdapterOperation,
	/// HTTP status code returned by the provider, when available.
	pub http_status: Option<u16>,
	/// OAuth `error` field or SDK error string.
	pub error_code: Option<String>,
	/// Numeric SDK error code.
	pub numeric_code: Option<i64>,
	/// OAuth `error_description` field or SDK message.
	pub error_description: Option<String>,
	/// Whether the failure happened below HTTP (DNS, TCP, TLS, timeout).
	pub network_error: bool,
	/// Whether the request could not be built locally and never left the process.
	pub malformed_request: bool,
}
impl ProviderErrorContext {
	/// Creates an empty context for the given operation.
	pub fn new(operation: AdapterOperation) -> Self {
		Self {
			operation,
			http_status: None,
			error_code: None,
			numeric_code: None,
			error_description: None,
			network_error: false,
			malformed_request: false,
		}
	}

	/// Convenience constructor for transport-level failures.
	pub fn network_failure(operation: AdapterOperation) -> Self {
		let mut ctx = Self::new(operation);

		ctx.network_error = true;

		ctx
	}

	/// Convenience constructor for requests rejected before they were sent.
	pub fn malformed_request(operation: AdapterOperation) -> Self {
		let mut ctx = Self::new(operation);

		ctx.malformed_request = true;

		ctx
	}

	/// Adds an HTTP status code.
	pub fn with_http_status(mut self, status: u16) -> Self {
		self.http_status = Some(status);

		self
	}

	/// Adds the OAuth/SDK error string.
	pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
		self.error_code = Some(code.into());

		self
	}

	/// Adds a numeric SDK error code.
	pub fn with_numeric_code(mut self, code: i64) -> Self {
		self.numeric_code = Some(code);

		self
	}

	/// Adds the error description.
	pub fn with_error_description(mut self, description: impl Into<String>) -> Self {
		self.error_description = Some(description.into());

		self
	}
}

/// Mapping for the organizational-account provider's SDK and redirect flows.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrganizationalErrorMapper;
impl OrganizationalErrorMapper {
	/// "The server or proxy was not found."
	pub const SERVER_NOT_FOUND: i64 = 0xCAA7_0004;
	/// "The user has cancelled the authorization."
	pub const USER_CANCELED: i64 = 403;
	/// "The user credentials are needed to obtain access token."
	pub const CREDENTIALS_REQUIRED: i64 = 200;
	/// "Resource ... is disabled."
	pub const RESOURCE_DISABLED: i64 = 211;

	const RENEWAL_FAILED: &'static str = "Token Renewal Failed";
	const RENEWAL_TIMEOUT: &'static str = "Token renewal operation failed due to timeout";
}
impl ErrorMapper for OrganizationalErrorMapper {
	fn classify(&self, ctx: &ProviderErrorContext) -> ErrorKind {
		if ctx.malformed_request {
			return ErrorKind::CriticalError;
		}
		if ctx.network_error {
			return ErrorKind::ConnectivityIssue;
		}

		match ctx.error_code.as_deref() {
			Some("interaction_required" | "login_required" | "login required") =>
				return ErrorKind::InteractiveRequired,
			Some(Self::RENEWAL_FAILED)
				if ctx.error_description.as_deref() == Some(Self::RENEWAL_TIMEOUT) =>
				return ErrorKind::ConnectivityIssue,
			_ => {},
		}

		match ctx.numeric_code {
			Some(Self::SERVER_NOT_FOUND) => ErrorKind::ConnectivityIssue,
			Some(Self::USER_CANCELED) => ErrorKind::UserCanceled,
			Some(Self::CREDENTIALS_REQUIRED) => ErrorKind::InteractiveRequired,
			Some(Self::RESOURCE_DISABLED) => ErrorKind::CriticalError,
			_ => ErrorKind::Unknown,
		}
	}
}

/// Mapping for the personal-account provider's REST and webview flows.
#[derive(Clone, Copy, Debug, Default)]
pub struct PersonalErrorMapper;
impl ErrorMapper for PersonalErrorMapper {
	fn classify(&self, ctx: &ProviderErrorContext) -> ErrorKind {
		if ctx.malformed_request {
			return ErrorKind::CriticalError;
		}
		if ctx.network_error {
			return ErrorKind::ConnectivityIssue;
		}

		if let Some(code) = ctx.error_code.as_deref() {
			let code = code.to_ascii_lowercase();

			match code.as_str() {
				"access_denied" => return ErrorKind::UserCanceled,
				"invalid_grant" | "interaction_required" | "login_required" | "consent_required" =>
					return ErrorKind::InteractiveRequired,
				"invalid_client" | "unauthorized_client" => return ErrorKind::CriticalError,
				"temporarily_unavailable" | "server_error" => return ErrorKind::ConnectivityIssue,
				_ => {},
			}
		}

		match ctx.http_status {
			Some(code) if code >= 500 => ErrorKind::ConnectivityIssue,
			_ => ErrorKind::Unknown,
		}
	}
}
