//! Redacted credential wrapper handed out by token sources.

// self
use crate::_prelude::*;

/// Opaque credential that keeps its value out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);
impl Credential {
	/// Wraps a credential string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the credential carries no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Whether the value can be placed in an HTTP header without enabling header injection.
	pub fn is_header_safe(&self) -> bool {
		is_header_value_safe(&self.0)
	}
}
impl From<String> for Credential {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for Credential {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl AsRef<str> for Credential {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Credential").field(&"<redacted>").finish()
	}
}
impl Display for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Mirrors the byte rules `http::HeaderValue::from_str` enforces: no control characters other
/// than horizontal tab.
pub(crate) fn is_header_value_safe(value: &str) -> bool {
	value.bytes().all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
}
