mod common;

// self
use common::*;
use oauth2_unified::{
	auth::ScopeSet,
	error::{ConfigError, Error, ErrorKind},
	orchestrator::{Orchestrator, OrchestratorConfig},
	provider::{ProviderKind, TokenRequest},
};

fn token_request() -> TokenRequest {
	TokenRequest::new(user("uid-alice"), "alice@outlook.com", scopes(&["mail.read"]))
		.with_refresh_token("rt-alice")
}

fn orchestrator(personal: std::sync::Arc<ScriptedAdapter>) -> Orchestrator {
	Orchestrator::builder(|_| async {}).personal(personal).build()
}

#[tokio::test]
async fn silent_success_skips_interactive_path() {
	let journal = journal();
	let personal =
		ScriptedAdapter::new("personal", &journal).silent(Ok(token_result("at-silent"))).into_arc();
	let orchestrator = orchestrator(personal.clone());
	let result = orchestrator
		.get_access_token(ProviderKind::Personal, &token_request())
		.await
		.expect("Silent acquisition should succeed.");

	assert_eq!(result.access_token.token.expose(), "at-silent");
	assert_eq!(*personal.silent_calls.lock(), vec![token_request()]);
	assert!(personal.interactive_calls.lock().is_empty());
	assert_eq!(orchestrator.metrics().escalations(), 0);
}

#[tokio::test]
async fn interactive_required_escalates_exactly_once() {
	let journal = journal();
	let personal = ScriptedAdapter::new("personal", &journal)
		.silent(Err(failure(ErrorKind::InteractiveRequired, "invalid_grant")))
		.interactive(Ok(token_result("at-interactive")))
		.into_arc();
	let orchestrator = orchestrator(personal.clone());
	let result = orchestrator
		.get_access_token(ProviderKind::Personal, &token_request())
		.await
		.expect("Interactive fallback should succeed.");

	assert_eq!(result.access_token.token.expose(), "at-interactive");
	assert_eq!(*personal.interactive_calls.lock(), vec![token_request()]);
	assert_eq!(entries(&journal), ["personal:silent", "personal:interactive"]);
	assert_eq!(orchestrator.metrics().silent_attempts(), 1);
	assert_eq!(orchestrator.metrics().escalations(), 1);
}

#[tokio::test]
async fn interactive_failure_is_returned_as_is() {
	let journal = journal();
	let personal = ScriptedAdapter::new("personal", &journal)
		.silent(Err(failure(ErrorKind::InteractiveRequired, "login_required")))
		.interactive(Err(failure(ErrorKind::UserCanceled, "window closed")))
		.into_arc();
	let orchestrator = orchestrator(personal.clone());
	let err = orchestrator
		.get_access_token(ProviderKind::Personal, &token_request())
		.await
		.expect_err("Cancellations are not swallowed for tokens.");

	assert!(err.is_user_canceled());
	assert_eq!(personal.interactive_calls.lock().len(), 1);
}

#[tokio::test]
async fn other_failures_never_escalate() {
	for kind in [
		ErrorKind::ConnectivityIssue,
		ErrorKind::CriticalError,
		ErrorKind::Unknown,
		ErrorKind::UserCanceled,
	] {
		let journal = journal();
		let personal = ScriptedAdapter::new("personal", &journal)
			.silent(Err(failure(kind, "silent failure")))
			.interactive(Ok(token_result("never")))
			.into_arc();
		let orchestrator = orchestrator(personal.clone());
		let err = orchestrator
			.get_access_token(ProviderKind::Personal, &token_request())
			.await
			.expect_err("Silent failure must surface.");

		assert_eq!(err.kind(), Some(kind));
		assert!(personal.interactive_calls.lock().is_empty(), "{kind} must not escalate.");
	}
}

#[tokio::test]
async fn unconfigured_provider_fails_without_adapter_calls() {
	let journal = journal();
	let personal = ScriptedAdapter::new("personal", &journal).into_arc();
	let orchestrator = orchestrator(personal);
	let err = orchestrator
		.get_access_token(ProviderKind::Organizational, &token_request())
		.await
		.expect_err("Missing adapters must be reported.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::ProviderNotConfigured {
			provider: ProviderKind::Organizational,
		})
	));
	assert!(entries(&journal).is_empty());
}

#[tokio::test]
async fn organizational_tokens_wrap_the_resource_id() {
	let journal = journal();
	let organizational = ScriptedAdapter::new("organizational", &journal)
		.silent(Ok(token_result("at-org")))
		.into_arc();
	let orchestrator =
		Orchestrator::builder(|_| async {}).organizational(organizational.clone()).build();

	orchestrator
		.organizational_access_token(
			user("uid-bob"),
			"bob@contoso.com",
			"https://outlook.office.com",
			None,
		)
		.await
		.expect("Organizational acquisition should succeed.");

	let calls = organizational.silent_calls.lock().clone();

	assert_eq!(calls.len(), 1);
	assert_eq!(
		calls[0].scopes,
		ScopeSet::resource("https://outlook.office.com").expect("Resource should be valid."),
	);
	assert_eq!(calls[0].refresh_token, None);

	let err = orchestrator
		.organizational_access_token(user("uid-bob"), "bob@contoso.com", "", None)
		.await
		.expect_err("Empty resource ids must be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::MissingResourceId)));
	assert_eq!(organizational.silent_calls.lock().len(), 1);
}

#[tokio::test]
async fn personal_tokens_forward_refresh_token() {
	let journal = journal();
	let personal =
		ScriptedAdapter::new("personal", &journal).silent(Ok(token_result("at-silent"))).into_arc();
	let orchestrator = orchestrator(personal.clone());

	orchestrator
		.personal_access_token(
			user("uid-alice"),
			"alice@outlook.com",
			scopes(&["mail.read"]),
			Some("rt-alice".into()),
		)
		.await
		.expect("Personal acquisition should succeed.");

	assert_eq!(*personal.silent_calls.lock(), vec![token_request()]);
}

#[tokio::test]
async fn serialized_token_requests_complete_in_turn() {
	let journal = journal();
	let personal = ScriptedAdapter::new("personal", &journal)
		.silent(Ok(token_result("at-1")))
		.silent(Ok(token_result("at-2")))
		.into_arc();
	let orchestrator = Orchestrator::builder(|_| async {})
		.personal(personal.clone())
		.config(OrchestratorConfig::default().with_serialized_token_requests(true))
		.build();
	let request = token_request();
	let (first, second) = tokio::join!(
		orchestrator.get_access_token(ProviderKind::Personal, &request),
		orchestrator.get_access_token(ProviderKind::Personal, &request),
	);

	assert_eq!(first.expect("First request should succeed.").access_token.token.expose(), "at-1");
	assert_eq!(second.expect("Second request should succeed.").access_token.token.expose(), "at-2");
	assert_eq!(orchestrator.metrics().silent_attempts(), 2);
}

#[tokio::test]
async fn logout_dispatches_to_the_named_provider() {
	let journal = journal();
	let personal = ScriptedAdapter::new("personal", &journal).logout(Ok(())).into_arc();
	let organizational = ScriptedAdapter::new("organizational", &journal)
		.logout(Err(failure(ErrorKind::ConnectivityIssue, "offline")))
		.into_arc();
	let orchestrator = Orchestrator::builder(|_| async {})
		.personal(personal.clone())
		.organizational(organizational.clone())
		.build();

	orchestrator
		.logout_user(ProviderKind::Personal, &user("uid-alice"), "alice@outlook.com")
		.await
		.expect("Personal logout should succeed.");

	let err = orchestrator
		.logout_user(ProviderKind::Organizational, &user("uid-bob"), "bob@contoso.com")
		.await
		.expect_err("Organizational logout failure must surface.");

	assert_eq!(err.kind(), Some(ErrorKind::ConnectivityIssue));
	assert_eq!(
		*personal.logout_calls.lock(),
		vec![(user("uid-alice"), "alice@outlook.com".to_owned())],
	);
	assert_eq!(entries(&journal), ["personal:logout", "organizational:logout"]);

	let lonely = Orchestrator::builder(|_| async {}).build();
	let err = lonely
		.logout_user(ProviderKind::Personal, &user("uid-alice"), "alice@outlook.com")
		.await
		.expect_err("Logout without an adapter must fail.");

	assert!(matches!(err, Error::Config(ConfigError::ProviderNotConfigured { .. })));
}
