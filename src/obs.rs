//! Optional observability helpers for injection decisions.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `credential_injector.process` with the `mode`
//!   (attachment mode) and `host` (request target) fields, plus debug events for skipped requests.
//! - Enable `metrics` to increment the `credential_injector_decision_total` counter for every
//!   processed request, labeled by `decision` + `mode`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Final decision taken for a single request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
	/// A header or query credential was attached.
	Attached,
	/// The request opted out via `skip_authorization`.
	SkippedByRequest,
	/// The target is cross-origin and not whitelisted, or its URL is malformed.
	CrossOrigin,
	/// No token source is configured.
	NoTokenSource,
	/// The token source resolved to nothing.
	NoCredential,
	/// The token source failed or the credential was unusable.
	Failed,
}
impl Decision {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Decision::Attached => "attached",
			Decision::SkippedByRequest => "skipped_by_request",
			Decision::CrossOrigin => "cross_origin",
			Decision::NoTokenSource => "no_token_source",
			Decision::NoCredential => "no_credential",
			Decision::Failed => "failed",
		}
	}
}
impl Display for Decision {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
