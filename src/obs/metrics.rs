// self
use crate::obs::Decision;

/// Records a decision via the global metrics recorder (when enabled).
pub fn record_decision(decision: Decision, mode: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"credential_injector_decision_total",
			"decision" => decision.as_str(),
			"mode" => mode
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (decision, mode);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_decision_noop_without_metrics() {
		record_decision(Decision::CrossOrigin, "header");
	}
}
