// self
use crate::{_prelude::*, obs::Decision};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedProcess<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedProcess<F> = F;

/// Span wrapping a single `process` call.
#[derive(Clone, Debug)]
pub struct InjectionSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl InjectionSpan {
	/// Creates a new span tagged with the attachment mode and target host label.
	pub fn new(mode: &'static str, host: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("credential_injector.process", mode, host);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (mode, host);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedProcess<Fut>
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

/// Emits a debug event explaining why a request left the injector untouched.
pub fn trace_skip(decision: Decision) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(decision = decision.as_str(), "credential not attached");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = decision;
	}
}
