//! Application completion callback.

// self
use crate::{_prelude::*, auth::ResolvedLogin};

/// Boxed future returned by [`CompletionCallback::on_login`].
pub type CallbackFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a + Send>>;

/// Receives every resolved login exactly once.
///
/// The orchestrator awaits the returned future before acknowledging pending redirect logins,
/// so long-running UI work inside the callback is safe.
pub trait CompletionCallback
where
	Self: Send + Sync,
{
	/// Handles a resolved login.
	fn on_login(&self, login: ResolvedLogin) -> CallbackFuture<'_>;
}
impl<F, Fut> CompletionCallback for F
where
	F: Send + Sync + Fn(ResolvedLogin) -> Fut,
	Fut: 'static + Send + Future<Output = ()>,
{
	fn on_login(&self, login: ResolvedLogin) -> CallbackFuture<'_> {
		Box::pin(self(login))
	}
}
