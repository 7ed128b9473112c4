//! Access tokens and refresh results handed back by adapters.

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenSecret},
};

/// Opaque, time-boxed access token.
///
/// A zero `expires_in` means the provider did not report a lifetime; such tokens are never
/// considered expired locally and callers should rely on the resource server instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Bearer token value.
	pub token: TokenSecret,
	/// Scopes the token was granted for.
	pub scopes: ScopeSet,
	/// Lifetime reported by the provider.
	pub expires_in: Duration,
	/// Instant the adapter received the token.
	pub issued_at: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token issued now.
	pub fn new(token: impl Into<TokenSecret>, scopes: ScopeSet, expires_in: Duration) -> Self {
		Self::issued_at(token, scopes, expires_in, OffsetDateTime::now_utc())
	}

	/// Creates a token issued at a specific instant.
	pub fn issued_at(
		token: impl Into<TokenSecret>,
		scopes: ScopeSet,
		expires_in: Duration,
		issued_at: OffsetDateTime,
	) -> Self {
		let expires_in = if expires_in.is_negative() { Duration::ZERO } else { expires_in };

		Self { token: token.into(), scopes, expires_in, issued_at }
	}

	/// Lifetime in whole seconds.
	pub fn expires_in_seconds(&self) -> i64 {
		self.expires_in.whole_seconds()
	}

	/// Absolute expiry, when the provider reported a lifetime that fits the calendar.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		if self.expires_in.is_zero() { None } else { self.issued_at.checked_add(self.expires_in) }
	}

	/// Returns `true` if the token has a known lifetime that ended before `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expiry| instant >= expiry)
	}
}

/// Result of a silent or interactive token acquisition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRefreshResult {
	/// Newly acquired access token.
	pub access_token: AccessToken,
	/// Rotated refresh token, when the provider issued one.
	pub refresh_token: Option<TokenSecret>,
}
impl TokenRefreshResult {
	/// Creates a result without a refresh token.
	pub fn new(access_token: AccessToken) -> Self {
		Self { access_token, refresh_token: None }
	}

	/// Attaches a rotated refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(refresh_token.into());

		self
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn scopes() -> ScopeSet {
		ScopeSet::new(["mail.read"]).expect("Scope fixture should be valid.")
	}

	#[test]
	fn expiry_is_derived_from_issue_instant() {
		let issued = macros::datetime!(2025-11-10 12:00 UTC);
		let token = AccessToken::issued_at("at", scopes(), Duration::seconds(3600), issued);

		assert_eq!(token.expires_in_seconds(), 3600);
		assert_eq!(token.expires_at(), Some(macros::datetime!(2025-11-10 13:00 UTC)));
		assert!(!token.is_expired_at(macros::datetime!(2025-11-10 12:59 UTC)));
		assert!(token.is_expired_at(macros::datetime!(2025-11-10 13:00 UTC)));
	}

	#[test]
	fn unknown_lifetime_never_expires_locally() {
		let issued = macros::datetime!(2025-11-10 12:00 UTC);
		let token = AccessToken::issued_at("at", scopes(), Duration::seconds(-5), issued);

		assert_eq!(token.expires_in, Duration::ZERO);
		assert_eq!(token.expires_at(), None);
		assert!(!token.is_expired_at(macros::datetime!(2030-01-01 00:00 UTC)));
	}

	#[test]
	fn oversized_lifetime_does_not_overflow() {
		let issued = macros::datetime!(2025-11-10 12:00 UTC);
		let token = AccessToken::issued_at("at", scopes(), Duration::seconds(i64::MAX), issued);

		assert_eq!(token.expires_at(), None);
		assert!(!token.is_expired_at(macros::datetime!(2030-01-01 00:00 UTC)));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let result = TokenRefreshResult::new(AccessToken::new("at-secret", scopes(), Duration::ZERO))
			.with_refresh_token("rt-secret");
		let rendered = format!("{result:?}");

		assert!(!rendered.contains("at-secret"));
		assert!(!rendered.contains("rt-secret"));
	}
}
