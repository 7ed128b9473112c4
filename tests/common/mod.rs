#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use parking_lot::Mutex;
use time::Duration;
// self
use oauth2_unified::{
	adapters::PendingLogin,
	auth::{
		AccessToken, FullIdentity, LoginOutcome, PartialIdentity, ResolvedLogin, ScopeSet,
		TokenRefreshResult, UserId,
	},
	error::{ErrorKind, UnifiedError},
	orchestrator::{CallbackFuture, CompletionCallback},
	provider::{AdapterFuture, ProviderAdapter, TokenRequest},
};

/// Ordered record of adapter calls, acknowledgements, and callback progress.
pub type Journal = Arc<Mutex<Vec<String>>>;

type Script<T> = Mutex<VecDeque<Result<T, UnifiedError>>>;

pub fn journal() -> Journal {
	Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
	journal.lock().clone()
}

pub fn user(id: &str) -> UserId {
	UserId::new(id).expect("User id fixture should be valid.")
}

pub fn scopes(values: &[&str]) -> ScopeSet {
	ScopeSet::new(values.iter().copied()).expect("Scope fixture should be valid.")
}

pub fn failure(kind: ErrorKind, message: &str) -> UnifiedError {
	UnifiedError::from_message(kind, message)
}

pub fn access_token(value: &str, scope_values: &[&str]) -> AccessToken {
	AccessToken::new(value, scopes(scope_values), Duration::hours(1))
}

pub fn token_result(value: &str) -> TokenRefreshResult {
	TokenRefreshResult::new(access_token(value, &["mail.read"])).with_refresh_token("rt-next")
}

pub fn full_identity(email: &str, is_personal_account: bool) -> FullIdentity {
	FullIdentity {
		user_id: user(&format!("uid-{}", email.replace('@', "-at-"))),
		display_name: email.split('@').next().unwrap_or_default().to_owned(),
		email: email.to_owned(),
		is_personal_account,
		anchor_mailbox_id: format!("SMTP:{email}"),
		access_token: Some(access_token("at-login", &["mail.read"])),
		refresh_token: None,
	}
}

pub fn partial_identity(anchor: &str) -> PartialIdentity {
	PartialIdentity {
		anchor_mailbox_id: anchor.to_owned(),
		access_token: access_token("at-partial", &["mail.read"]),
		refresh_token: None,
	}
}

/// Provider adapter that replays queued results and journals every call.
pub struct ScriptedAdapter {
	name: &'static str,
	journal: Journal,
	logins: Script<LoginOutcome>,
	silent: Script<TokenRefreshResult>,
	interactive: Script<TokenRefreshResult>,
	logouts: Script<()>,
	cached: Option<LoginOutcome>,
	pending: PendingLogin,
	acks: AtomicUsize,
	pub login_calls: Mutex<Vec<(ScopeSet, Option<String>)>>,
	pub silent_calls: Mutex<Vec<TokenRequest>>,
	pub interactive_calls: Mutex<Vec<TokenRequest>>,
	pub logout_calls: Mutex<Vec<(UserId, String)>>,
}
impl ScriptedAdapter {
	pub fn new(name: &'static str, journal: &Journal) -> Self {
		Self {
			name,
			journal: journal.clone(),
			logins: Default::default(),
			silent: Default::default(),
			interactive: Default::default(),
			logouts: Default::default(),
			cached: None,
			pending: PendingLogin::default(),
			acks: AtomicUsize::new(0),
			login_calls: Default::default(),
			silent_calls: Default::default(),
			interactive_calls: Default::default(),
			logout_calls: Default::default(),
		}
	}

	pub fn login(self, result: Result<LoginOutcome, UnifiedError>) -> Self {
		self.logins.lock().push_back(result);

		self
	}

	pub fn silent(self, result: Result<TokenRefreshResult, UnifiedError>) -> Self {
		self.silent.lock().push_back(result);

		self
	}

	pub fn interactive(self, result: Result<TokenRefreshResult, UnifiedError>) -> Self {
		self.interactive.lock().push_back(result);

		self
	}

	pub fn logout(self, result: Result<(), UnifiedError>) -> Self {
		self.logouts.lock().push_back(result);

		self
	}

	pub fn cached(mut self, outcome: LoginOutcome) -> Self {
		self.cached = Some(outcome);

		self
	}

	/// Simulates a redirect that came back with `outcome` while a login was pending.
	pub fn pending(self, outcome: LoginOutcome) -> Self {
		self.pending.begin();
		self.pending.capture(outcome);

		self
	}

	pub fn peek_pending(&self) -> Option<LoginOutcome> {
		self.pending.peek()
	}

	pub fn acks(&self) -> usize {
		self.acks.load(Ordering::SeqCst)
	}

	pub fn into_arc(self) -> Arc<Self> {
		Arc::new(self)
	}

	fn record(&self, event: &str) {
		self.journal.lock().push(format!("{}:{event}", self.name));
	}

	fn next<T>(&self, script: &Script<T>, operation: &str) -> Result<T, UnifiedError> {
		script.lock().pop_front().unwrap_or_else(|| {
			Err(failure(ErrorKind::Unknown, &format!("{} has no scripted {operation}", self.name)))
		})
	}
}
impl ProviderAdapter for ScriptedAdapter {
	fn login_new_user<'a>(
		&'a self,
		scopes: &'a ScopeSet,
		username_hint: Option<&'a str>,
	) -> AdapterFuture<'a, LoginOutcome> {
		Box::pin(async move {
			self.record("login");
			self.login_calls.lock().push((scopes.clone(), username_hint.map(str::to_owned)));

			self.next(&self.logins, "login")
		})
	}

	fn logout_user<'a>(&'a self, user_id: &'a UserId, user_email: &'a str)
	-> AdapterFuture<'a, ()> {
		Box::pin(async move {
			self.record("logout");
			self.logout_calls.lock().push((user_id.clone(), user_email.to_owned()));

			self.next(&self.logouts, "logout")
		})
	}

	fn access_token_silent<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		Box::pin(async move {
			self.record("silent");
			self.silent_calls.lock().push(request.clone());

			self.next(&self.silent, "silent token")
		})
	}

	fn access_token_interactive<'a>(
		&'a self,
		request: &'a TokenRequest,
	) -> AdapterFuture<'a, TokenRefreshResult> {
		Box::pin(async move {
			self.record("interactive");
			self.interactive_calls.lock().push(request.clone());

			self.next(&self.interactive, "interactive token")
		})
	}

	fn peek_pending_login(&self) -> Option<LoginOutcome> {
		self.pending.peek()
	}

	fn peek_cached_user(&self) -> Option<LoginOutcome> {
		self.cached.clone()
	}

	fn acknowledge_login(&self) {
		self.record("ack");
		self.acks.fetch_add(1, Ordering::SeqCst);
		self.pending.acknowledge();
	}
}

/// Completion callback that yields mid-delivery so ordering bugs become visible.
pub struct Recorder {
	journal: Journal,
	pub received: Mutex<Vec<ResolvedLogin>>,
}
impl Recorder {
	pub fn new(journal: &Journal) -> Arc<Self> {
		Arc::new(Self { journal: journal.clone(), received: Default::default() })
	}

	pub fn received(&self) -> Vec<ResolvedLogin> {
		self.received.lock().clone()
	}
}
impl CompletionCallback for Recorder {
	fn on_login(&self, login: ResolvedLogin) -> CallbackFuture<'_> {
		Box::pin(async move {
			self.journal.lock().push("callback:start".into());

			tokio::task::yield_now().await;

			self.received.lock().push(login);
			self.journal.lock().push("callback:end".into());
		})
	}
}
