// self
use crate::{_prelude::*, obs::OperationKind, provider::ProviderKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by orchestrator operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the operation, target provider, and call site.
	pub fn new(kind: OperationKind, provider: Option<ProviderKind>, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let provider = provider.map(ProviderKind::as_str).unwrap_or("any");
			let span =
				tracing::info_span!("oauth2_unified.operation", op = kind.as_str(), provider, stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, provider, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits an event when a login chain moves to the other provider.
pub fn trace_switch(target: ProviderKind, switches: usize) {
	#[cfg(feature = "tracing")]
	tracing::info!(target_provider = target.as_str(), switches, "switching login provider");

	#[cfg(not(feature = "tracing"))]
	let _ = (target, switches);
}

/// Emits an event when silent acquisition escalates to the interactive path.
pub fn trace_escalation(provider: ProviderKind) {
	#[cfg(feature = "tracing")]
	tracing::info!(provider = provider.as_str(), "silent token acquisition requires interaction");

	#[cfg(not(feature = "tracing"))]
	let _ = provider;
}

/// Emits an event when interactive login swallows a user cancellation.
pub fn trace_cancellation(provider: ProviderKind) {
	#[cfg(feature = "tracing")]
	tracing::debug!(provider = provider.as_str(), "login canceled by user");

	#[cfg(not(feature = "tracing"))]
	let _ = provider;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn events_noop_without_tracing() {
		trace_switch(ProviderKind::Organizational, 1);
		trace_escalation(ProviderKind::Personal);
		trace_cancellation(ProviderKind::Personal);
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new(OperationKind::Login, None, "instrument_wraps_future");
		let value = span.instrument(async { 7 }).await;

		assert_eq!(value, 7);
	}
}
