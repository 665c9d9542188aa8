//! Cross-origin whitelist of hosts trusted to receive credentials.

// std
use std::{collections::BTreeSet, slice::Iter};
// self
use crate::{_prelude::*, origin::HostPort};

/// Set of trusted external hosts.
///
/// Matching is exact on the lower-cased host; there is no wildcard or suffix matching, so
/// `example.com` does not cover `api.example.com`. An entry with a port only matches targets
/// on that effective port, while a bare host matches the host on any port.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Whitelist {
	entries: Vec<HostPort>,
}
impl Whitelist {
	/// Parses and normalizes entries, dropping duplicates.
	pub fn new<I, S>(entries: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let entries = entries
			.into_iter()
			.map(|entry| entry.as_ref().parse::<HostPort>())
			.collect::<Result<BTreeSet<_>, _>>()?;

		Ok(Self { entries: entries.into_iter().collect() })
	}

	/// Number of distinct entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` when only same-origin requests are trusted.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over the normalized entries.
	pub fn iter(&self) -> Iter<'_, HostPort> {
		self.entries.iter()
	}

	/// Whether the effective authority `target` is trusted.
	pub fn permits(&self, target: &HostPort) -> bool {
		self.entries.iter().any(|entry| {
			entry.host == target.host && entry.port.is_none_or(|port| target.port == Some(port))
		})
	}
}
impl<'a> IntoIterator for &'a Whitelist {
	type IntoIter = Iter<'a, HostPort>;
	type Item = &'a HostPort;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn entries_are_normalized_and_deduplicated() {
		let whitelist = Whitelist::new(["Whitelisted.Example.com", "whitelisted.example.COM"])
			.expect("Whitelist fixture should parse.");

		assert_eq!(whitelist.len(), 1);
		assert_eq!(
			whitelist.iter().next(),
			Some(&HostPort::new("whitelisted.example.com", None))
		);
	}

	#[test]
	fn permits_exact_host_only() {
		let whitelist =
			Whitelist::new(["whitelisted.example.com"]).expect("Whitelist fixture should parse.");

		assert!(whitelist.permits(&HostPort::new("Whitelisted.Example.com", Some(443))));
		assert!(!whitelist.permits(&HostPort::new("sub.whitelisted.example.com", Some(443))));
		assert!(!whitelist.permits(&HostPort::new("example.com", Some(443))));
	}

	#[test]
	fn port_entries_require_matching_port() {
		let whitelist = Whitelist::new(["api.example.com:8443", "localhost:443"])
			.expect("Whitelist fixture should parse.");

		assert!(whitelist.permits(&HostPort::new("api.example.com", Some(8443))));
		assert!(!whitelist.permits(&HostPort::new("api.example.com", Some(443))));
		assert!(whitelist.permits(&HostPort::new("localhost", Some(443))));
		assert!(!whitelist.permits(&HostPort::new("localhost", None)));
	}

	#[test]
	fn invalid_entry_fails_whole_whitelist() {
		let err = Whitelist::new(["ok.example.com", "https://bad.example.com"])
			.expect_err("URL-shaped entry should be rejected.");

		assert!(matches!(err, ConfigError::InvalidWhitelistEntry { .. }));
	}
}
