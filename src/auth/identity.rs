//! Login outcomes reported by adapters and the resolved form delivered to applications.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSecret, UserId},
	provider::ProviderKind,
};

/// Login completed but profile enrichment has not happened yet.
///
/// Typical of redirect-based personal-account flows, where only the token fragment is known
/// after the redirect lands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialIdentity {
	/// Opaque identifier correlating the token with a mailbox/account.
	pub anchor_mailbox_id: String,
	/// Access token minted by the login.
	pub access_token: AccessToken,
	/// Refresh token, when the flow produced one.
	pub refresh_token: Option<TokenSecret>,
}

/// Complete user profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullIdentity {
	/// Provider-assigned user identifier.
	pub user_id: UserId,
	/// Human-readable name.
	pub display_name: String,
	/// Sign-in email address.
	pub email: String,
	/// `true` when the account belongs to the personal-account provider.
	pub is_personal_account: bool,
	/// Opaque identifier correlating tokens with a mailbox/account.
	pub anchor_mailbox_id: String,
	/// Access token, when the login minted one.
	pub access_token: Option<AccessToken>,
	/// Refresh token, when the login minted one.
	pub refresh_token: Option<TokenSecret>,
}

/// Raw outcome of an adapter login.
///
/// The switch variants never reach applications: the orchestrator follows them and only hands
/// a [`ResolvedLogin`] to the completion callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoginOutcome {
	/// The personal provider was used but the account is organizational.
	SwitchToOrganizational {
		/// Username to pre-fill on the organizational login.
		username_hint: String,
	},
	/// The organizational provider was used but the account is personal.
	SwitchToPersonal {
		/// Username to pre-fill on the personal login.
		username_hint: String,
	},
	/// Login succeeded without profile enrichment.
	Partial(PartialIdentity),
	/// Login succeeded with a complete profile.
	Full(FullIdentity),
	/// Nothing to report (e.g. a pure acknowledgement).
	Empty,
}
impl LoginOutcome {
	/// Splits the outcome into a deliverable login or a switch-over request.
	pub fn resolve(self) -> Result<ResolvedLogin, SwitchRequest> {
		match self {
			Self::SwitchToOrganizational { username_hint } =>
				Err(SwitchRequest { target: ProviderKind::Organizational, username_hint }),
			Self::SwitchToPersonal { username_hint } =>
				Err(SwitchRequest { target: ProviderKind::Personal, username_hint }),
			Self::Partial(identity) => Ok(ResolvedLogin::Partial(identity)),
			Self::Full(identity) => Ok(ResolvedLogin::Full(identity)),
			Self::Empty => Ok(ResolvedLogin::Empty),
		}
	}

	/// Returns `true` for either switch-over variant.
	pub fn is_switch(&self) -> bool {
		matches!(self, Self::SwitchToOrganizational { .. } | Self::SwitchToPersonal { .. })
	}
}
impl From<ResolvedLogin> for LoginOutcome {
	fn from(value: ResolvedLogin) -> Self {
		match value {
			ResolvedLogin::Partial(identity) => Self::Partial(identity),
			ResolvedLogin::Full(identity) => Self::Full(identity),
			ResolvedLogin::Empty => Self::Empty,
		}
	}
}

/// Login outcome the completion callback receives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedLogin {
	/// Login succeeded without profile enrichment.
	Partial(PartialIdentity),
	/// Login succeeded with a complete profile.
	Full(FullIdentity),
	/// Nothing to report.
	Empty,
}
impl ResolvedLogin {
	/// Anchor mailbox id of the signed-in account, if any.
	pub fn anchor_mailbox_id(&self) -> Option<&str> {
		match self {
			Self::Partial(identity) => Some(&identity.anchor_mailbox_id),
			Self::Full(identity) => Some(&identity.anchor_mailbox_id),
			Self::Empty => None,
		}
	}
}

/// Signal that the login must be retried against the other provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchRequest {
	/// Provider the login must move to.
	pub target: ProviderKind,
	/// Username to pre-fill on the next login.
	pub username_hint: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::ScopeSet;

	fn partial() -> PartialIdentity {
		PartialIdentity {
			anchor_mailbox_id: "CID:42".into(),
			access_token: AccessToken::new(
				"at",
				ScopeSet::new(["mail.read"]).expect("Scope fixture should be valid."),
				Duration::seconds(3600),
			),
			refresh_token: None,
		}
	}

	#[test]
	fn switch_variants_resolve_to_requests() {
		let to_org = LoginOutcome::SwitchToOrganizational { username_hint: "a@contoso.com".into() };
		let to_personal = LoginOutcome::SwitchToPersonal { username_hint: "b@outlook.com".into() };

		assert!(to_org.is_switch());
		assert_eq!(
			to_org.resolve(),
			Err(SwitchRequest {
				target: ProviderKind::Organizational,
				username_hint: "a@contoso.com".into(),
			}),
		);
		assert_eq!(
			to_personal.resolve().map_err(|switch| switch.target),
			Err(ProviderKind::Personal),
		);
	}

	#[test]
	fn concrete_variants_resolve_to_logins() {
		let resolved = LoginOutcome::Partial(partial()).resolve().expect("Partial must resolve.");

		assert_eq!(resolved.anchor_mailbox_id(), Some("CID:42"));
		assert_eq!(LoginOutcome::from(resolved.clone()), LoginOutcome::Partial(partial()));
		assert_eq!(LoginOutcome::Empty.resolve(), Ok(ResolvedLogin::Empty));
		assert_eq!(ResolvedLogin::Empty.anchor_mailbox_id(), None);
	}

	#[test]
	fn outcomes_serialize_with_type_tag() {
		let json = serde_json::to_value(LoginOutcome::SwitchToPersonal {
			username_hint: "b@outlook.com".into(),
		})
		.expect("Switch outcome should serialize.");

		assert_eq!(json["type"], "switch_to_personal");
		assert_eq!(json["username_hint"], "b@outlook.com");
	}
}
