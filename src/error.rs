//! Injector-level error types shared by the decision pipeline, token sources, and configuration.

// self
use crate::_prelude::*;

/// Injector-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used to carry token source and transport failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical injector error exposed by public APIs.
///
/// Any error returned from [`CredentialInjector::process`](crate::CredentialInjector::process)
/// means the request must not be dispatched.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The token source failed to produce a credential.
	#[error("Token source failed to produce a credential.")]
	TokenSource {
		/// Failure reported by the token source.
		#[source]
		source: BoxError,
	},
	/// The credential cannot be carried in an HTTP header value.
	#[error("Credential contains characters that are not allowed in the `{header}` header.")]
	InvalidCredential {
		/// Header the credential was meant for.
		header: String,
	},
}
impl Error {
	/// Wraps a token source failure.
	pub fn token_source(src: impl Into<BoxError>) -> Self {
		Self::TokenSource { source: src.into() }
	}
}

/// Configuration and validation failures raised while building an injector.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Query-parameter mode was selected with an empty parameter name.
	#[error("URL parameter name cannot be empty.")]
	EmptyUrlParam,
	/// The configured header name is not a valid HTTP token.
	#[error("Auth header name `{name}` is not a valid HTTP header name.")]
	InvalidAuthHeader {
		/// Offending header name.
		name: String,
	},
	/// The configured header prefix contains control characters.
	#[error("Auth prefix contains characters that are not allowed in a header value.")]
	InvalidAuthPrefix,
	/// A whitelist entry is not a bare `host` or `host:port`.
	#[error("Whitelist entry `{entry}` is invalid: {reason}.")]
	InvalidWhitelistEntry {
		/// Entry as supplied by the caller.
		entry: String,
		/// Why the entry was rejected.
		reason: &'static str,
	},
	/// The own-origin URL has no host.
	#[error("Origin `{url}` does not contain a host.")]
	InvalidOrigin {
		/// Origin URL as supplied by the caller.
		url: String,
	},
	/// JSON configuration could not be parsed.
	#[error("Injector configuration is invalid at `{path}`.")]
	Parse {
		/// Path to the offending field.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_source_error_keeps_source() {
		let err = Error::token_source("backend unavailable");
		let source = StdError::source(&err).expect("Token source error should expose its cause.");

		assert_eq!(source.to_string(), "backend unavailable");
	}

	#[test]
	fn config_error_converts_into_error() {
		let err: Error = ConfigError::EmptyUrlParam.into();

		assert!(matches!(err, Error::Config(ConfigError::EmptyUrlParam)));
		assert_eq!(err.to_string(), "URL parameter name cannot be empty.");
	}
}
