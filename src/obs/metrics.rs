// self
use crate::{
	obs::{OperationKind, OperationOutcome},
	provider::ProviderKind,
};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation(kind: OperationKind, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_unified_operation_total",
			"op" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a provider switch-over via the global metrics recorder (when enabled).
pub fn record_switch(from: ProviderKind, to: ProviderKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_unified_switch_total",
			"from" => from.as_str(),
			"to" => to.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (from, to);
	}
}
