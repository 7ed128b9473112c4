//! Walks through a login that starts on the personal provider, gets redirected to the
//! organizational one, and then acquires a token silently for the signed-in user.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use time::Duration;
// self
use oauth2_unified::{
	auth::{AccessToken, FullIdentity, LoginOutcome, ScopeSet, TokenRefreshResult, UserId},
	error::{ErrorKind, UnifiedError},
	orchestrator::{LoginRequest, Orchestrator},
	provider::{AdapterFuture, ProviderAdapter, ProviderKind, TokenRequest},
};

const RESOURCE: &str = "https://outlook.office.com";

/// Personal provider that always recognizes the account as organizational.
struct RedirectingPersonal;
impl ProviderAdapter for RedirectingPersonal {
	fn login_new_user<'a>(
		&'a self,
		_scopes: &'a ScopeSet,
		_username_hint: Option<&'a str>,
	) -> AdapterFuture<'a, LoginOutcome> {
		Box::pin(async {
			Ok(LoginOutcome::SwitchToOrganizational { username_hint: "alex@contoso.com".into() })
		})
	}

	fn logout_user<'a>(&'a self, _user_id: &'a UserId, _user_email: &'a str)
	-> AdapterFuture<'a, ()> {
		Box::pin(async { Ok(()) })
	}

	fn access_token_silent<'a>(
		&'a self,
		_request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		Box::pin(async {
			Err(UnifiedError::from_message(ErrorKind::InteractiveRequired, "no personal session"))
		})
	}

	fn access_token_interactive<'a>(
		&'a self,
		_request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		Box::pin(async { Err(UnifiedError::from_message(ErrorKind::UserCanceled, "demo")) })
	}
}

/// Organizational provider that signs everyone in and mints a token per request.
struct Organizational;
impl ProviderAdapter for Organizational {
	fn login_new_user<'a>(
		&'a self,
		scopes: &'a ScopeSet,
		username_hint: Option<&'a str>,
	) -> AdapterFuture<'a, LoginOutcome> {
		Box::pin(async move {
			let email = username_hint.unwrap_or("unknown@contoso.com").to_owned();

			Ok(LoginOutcome::Full(FullIdentity {
				user_id: UserId::new("aad-7f3e")
					.map_err(|e| UnifiedError::new(ErrorKind::CriticalError, e))?,
				display_name: "Alex".into(),
				anchor_mailbox_id: format!("UPN:{email}"),
				email,
				is_personal_account: false,
				access_token: Some(AccessToken::new(
					"at-login",
					scopes.clone(),
					Duration::hours(1),
				)),
				refresh_token: None,
			}))
		})
	}

	fn logout_user<'a>(&'a self, _user_id: &'a UserId, user_email: &'a str)
	-> AdapterFuture<'a, ()> {
		Box::pin(async move {
			println!("Signed {user_email} out of the organizational session.");

			Ok(())
		})
	}

	fn access_token_silent<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		Box::pin(async move {
			Ok(TokenRefreshResult::new(AccessToken::new(
				"at-silent",
				request.scopes.clone(),
				Duration::hours(1),
			)))
		})
	}

	fn access_token_interactive<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		self.access_token_silent(request)
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let orchestrator = Orchestrator::builder(|login| async move {
		println!("Signed in: {:?}.", login.anchor_mailbox_id());
	})
	.personal(Arc::new(RedirectingPersonal))
	.organizational(Arc::new(Organizational))
	.build();

	orchestrator.process_startup_logins().await?;

	let request = LoginRequest::new(ScopeSet::new(["wl.imap", "wl.offline_access"])?)
		.with_organizational_resource(RESOURCE);

	orchestrator.login_new_user(&request).await?;

	let user_id = UserId::new("aad-7f3e")?;
	let token = orchestrator
		.organizational_access_token(user_id.clone(), "alex@contoso.com", RESOURCE, None)
		.await?;

	println!(
		"Silent token for {} expires in {}s.",
		token.access_token.scopes,
		token.access_token.expires_in_seconds()
	);
	println!("Provider switches so far: {}.", orchestrator.metrics().switches());

	orchestrator.logout_user(ProviderKind::Organizational, &user_id, "alex@contoso.com").await?;

	Ok(())
}
