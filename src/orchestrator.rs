//! The provider-agnostic orchestration core.
//!
//! An [`Orchestrator`] holds at most one adapter per [`ProviderKind`] and exposes the unified
//! login, token, logout, and startup reconciliation operations. Login outcomes that ask for
//! the other provider are followed until a concrete [`ResolvedLogin`] arrives, which is handed
//! to the application's [`CompletionCallback`] before any adapter acknowledges it.

pub mod callback;
pub mod metrics;

mod login;
mod logout;
mod reconcile;
mod token;

pub use callback::*;
pub use login::LoginRequest;
pub use metrics::OrchestratorMetrics;

// std
use std::sync::atomic::{AtomicBool, Ordering};
// crates.io
use async_lock::MutexGuard as AsyncMutexGuard;
// self
use crate::{
	_prelude::*,
	auth::{ResolvedLogin, UserId},
	error::ConfigError,
	provider::{ProviderAdapter, ProviderKind, TokenRequest},
};

/// Tunables for an [`Orchestrator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
	/// Switch-overs allowed within one login chain before it fails.
	pub max_switches: usize,
	/// Runs top-level logins and startup reconciliation one at a time.
	pub serialize_logins: bool,
	/// Single-flights token requests per provider, user, and scope set.
	pub serialize_token_requests: bool,
}
impl OrchestratorConfig {
	/// One switch in each direction.
	pub const DEFAULT_MAX_SWITCHES: usize = 2;

	/// Overrides the switch-over limit.
	pub fn with_max_switches(mut self, max_switches: usize) -> Self {
		self.max_switches = max_switches;

		self
	}

	/// Enables or disables login serialization.
	pub fn with_serialized_logins(mut self, enabled: bool) -> Self {
		self.serialize_logins = enabled;

		self
	}

	/// Enables or disables token request single-flighting.
	pub fn with_serialized_token_requests(mut self, enabled: bool) -> Self {
		self.serialize_token_requests = enabled;

		self
	}
}
impl Default for OrchestratorConfig {
	fn default() -> Self {
		Self {
			max_switches: Self::DEFAULT_MAX_SWITCHES,
			serialize_logins: false,
			serialize_token_requests: false,
		}
	}
}

/// Unified login/token/logout front door over the configured provider adapters.
///
/// Construct one per application session through [`Orchestrator::builder`] and share it
/// behind an [`Arc`]; adapters are read-only after construction.
pub struct Orchestrator {
	personal: Option<Arc<dyn ProviderAdapter>>,
	organizational: Option<Arc<dyn ProviderAdapter>>,
	callback: Arc<dyn CompletionCallback>,
	config: OrchestratorConfig,
	startup_request: LoginRequest,
	metrics: Arc<OrchestratorMetrics>,
	login_lock: AsyncMutex<()>,
	token_guards: Mutex<HashMap<TokenGuardKey, Arc<AsyncMutex<()>>>>,
	reconciled: AsyncMutex<bool>,
	ready: AtomicBool,
}
impl Orchestrator {
	/// Starts a builder that delivers resolved logins to `on_login`.
	pub fn builder<F, Fut>(on_login: F) -> OrchestratorBuilder
	where
		F: 'static + Send + Sync + Fn(ResolvedLogin) -> Fut,
		Fut: 'static + Send + Future<Output = ()>,
	{
		OrchestratorBuilder::with_callback(Arc::new(on_login))
	}

	/// Active configuration.
	pub fn config(&self) -> &OrchestratorConfig {
		&self.config
	}

	/// In-process counters for this orchestrator.
	pub fn metrics(&self) -> &Arc<OrchestratorMetrics> {
		&self.metrics
	}

	/// Returns `true` when an adapter is configured for `provider`.
	pub fn is_configured(&self, provider: ProviderKind) -> bool {
		self.slot(provider).is_some()
	}

	/// Returns `true` once startup reconciliation has delivered every outcome it found.
	pub fn is_ready(&self) -> bool {
		self.ready.load(Ordering::Acquire)
	}

	fn slot(&self, provider: ProviderKind) -> Option<&Arc<dyn ProviderAdapter>> {
		match provider {
			ProviderKind::Personal => self.personal.as_ref(),
			ProviderKind::Organizational => self.organizational.as_ref(),
		}
	}

	fn adapter(&self, provider: ProviderKind) -> Result<&Arc<dyn ProviderAdapter>, ConfigError> {
		self.slot(provider).ok_or(ConfigError::ProviderNotConfigured { provider })
	}

	/// Configured adapters, organizational first.
	fn configured(&self) -> impl Iterator<Item = (ProviderKind, &Arc<dyn ProviderAdapter>)> {
		[ProviderKind::Organizational, ProviderKind::Personal]
			.into_iter()
			.filter_map(move |provider| self.slot(provider).map(|adapter| (provider, adapter)))
	}

	async fn serialize_logins(&self) -> Option<AsyncMutexGuard<'_, ()>> {
		if self.config.serialize_logins { Some(self.login_lock.lock().await) } else { None }
	}

	/// Returns (and creates on demand) the single-flight guard for a token request.
	fn token_guard(
		&self,
		provider: ProviderKind,
		request: &TokenRequest,
	) -> Option<Arc<AsyncMutex<()>>> {
		if !self.config.serialize_token_requests {
			return None;
		}

		let key = TokenGuardKey {
			provider,
			user_id: request.user_id.clone(),
			scope_fingerprint: request.scopes.fingerprint(),
		};
		let mut guards = self.token_guards.lock();

		Some(guards.entry(key).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone())
	}
}
impl Debug for Orchestrator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Orchestrator")
			.field("personal_configured", &self.personal.is_some())
			.field("organizational_configured", &self.organizational.is_some())
			.field("config", &self.config)
			.field("ready", &self.is_ready())
			.finish()
	}
}

/// Builder for [`Orchestrator`].
pub struct OrchestratorBuilder {
	personal: Option<Arc<dyn ProviderAdapter>>,
	organizational: Option<Arc<dyn ProviderAdapter>>,
	callback: Arc<dyn CompletionCallback>,
	config: OrchestratorConfig,
	startup_request: LoginRequest,
}
impl OrchestratorBuilder {
	/// Starts a builder around an already shared callback.
	pub fn with_callback(callback: Arc<dyn CompletionCallback>) -> Self {
		Self {
			personal: None,
			organizational: None,
			callback,
			config: OrchestratorConfig::default(),
			startup_request: LoginRequest::default(),
		}
	}

	/// Configures the personal-account adapter.
	pub fn personal(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
		self.personal = Some(adapter);

		self
	}

	/// Configures the organizational-account adapter.
	pub fn organizational(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
		self.organizational = Some(adapter);

		self
	}

	/// Replaces the default [`OrchestratorConfig`].
	pub fn config(mut self, config: OrchestratorConfig) -> Self {
		self.config = config;

		self
	}

	/// Scopes and resource id used when a cached or pending login asks to switch providers
	/// during startup reconciliation.
	pub fn startup_request(mut self, request: LoginRequest) -> Self {
		self.startup_request = request;

		self
	}

	/// Finalizes the orchestrator.
	pub fn build(self) -> Orchestrator {
		Orchestrator {
			personal: self.personal,
			organizational: self.organizational,
			callback: self.callback,
			config: self.config,
			startup_request: self.startup_request,
			metrics: Default::default(),
			login_lock: AsyncMutex::new(()),
			token_guards: Default::default(),
			reconciled: AsyncMutex::new(false),
			ready: AtomicBool::new(false),
		}
	}
}
impl Debug for OrchestratorBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OrchestratorBuilder")
			.field("personal_configured", &self.personal.is_some())
			.field("organizational_configured", &self.organizational.is_some())
			.field("config", &self.config)
			.field("startup_request", &self.startup_request)
			.finish()
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TokenGuardKey {
	provider: ProviderKind,
	user_id: UserId,
	scope_fingerprint: String,
}
