//! Origin modeling: host/port authorities, the caller's own origin, and request target
//! classification.

pub mod whitelist;

pub use whitelist::*;

// crates.io
use url::{Host, ParseError};
// self
use crate::_prelude::*;

/// Lower-cased host plus an optional port.
///
/// For request targets and origins the port is the effective one (explicit, or the scheme
/// default). For whitelist entries it is only present when the entry spelled it out.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostPort {
	/// Normalized host; IPv6 literals keep their brackets.
	pub host: String,
	/// Port, when known.
	pub port: Option<u16>,
}
impl HostPort {
	/// Creates an authority, lower-casing the host.
	pub fn new(host: impl AsRef<str>, port: Option<u16>) -> Self {
		Self { host: host.as_ref().to_ascii_lowercase(), port }
	}

	/// Extracts the effective authority of an absolute URL, if it has a host.
	pub fn from_url(url: &Url) -> Option<Self> {
		let host = url.host_str().filter(|host| !host.is_empty())?;

		Some(Self::new(host, url.port_or_known_default()))
	}
}
impl Display for HostPort {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self.port {
			Some(port) => write!(f, "{}:{port}", self.host),
			None => f.write_str(&self.host),
		}
	}
}
impl FromStr for HostPort {
	type Err = ConfigError;

	/// Parses a bare `host` or `host:port` entry (`[v6]` / `[v6]:port` for IPv6).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = |reason| ConfigError::InvalidWhitelistEntry { entry: s.to_owned(), reason };

		if s.is_empty() {
			return Err(invalid("entry is empty"));
		}
		if s.chars().any(char::is_whitespace) {
			return Err(invalid("entry contains whitespace"));
		}
		if s.contains(['/', '?', '#', '@']) {
			return Err(invalid("entry must be a host or host:port, not a URL"));
		}

		let (host, port) = split_port(s).ok_or_else(|| invalid("port is not a valid number"))?;

		if host.is_empty() {
			return Err(invalid("host is empty"));
		}

		let host =
			Host::parse(host).map_err(|_| invalid("host is not a valid domain or address"))?;

		Ok(Self::new(host.to_string(), port))
	}
}

/// The caller's own origin. Requests to it are always eligible for credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
	url: Url,
	authority: HostPort,
}
impl Origin {
	/// Builds an origin from an absolute URL with a host.
	pub fn from_url(url: Url) -> Result<Self, ConfigError> {
		let authority = HostPort::from_url(&url)
			.ok_or_else(|| ConfigError::InvalidOrigin { url: url.to_string() })?;

		Ok(Self { url, authority })
	}

	/// Parses an origin URL such as `https://app.example.com`.
	pub fn parse(value: &str) -> Result<Self, ConfigError> {
		let url =
			Url::parse(value).map_err(|_| ConfigError::InvalidOrigin { url: value.to_owned() })?;

		Self::from_url(url)
	}

	/// Origin URL as configured.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Effective host and port of the origin.
	pub fn authority(&self) -> &HostPort {
		&self.authority
	}
}
impl Display for Origin {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.authority, f)
	}
}

/// Base used to resolve relative URLs when no origin is configured. `.invalid` never resolves.
const SAME_ORIGIN_BASE: &str = "https://same-origin.invalid/";

/// Where a request URL points relative to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
	/// Relative URL that resolves back to the caller's own host; always same-origin.
	Relative,
	/// URL resolving to a host, either absolute or relative input that escapes the base host.
	Remote {
		/// Lower-cased scheme of the resolved URL.
		scheme: String,
		/// Effective host and port of the resolved URL.
		authority: HostPort,
	},
	/// Absolute URL that cannot be parsed or has no host.
	Malformed,
}
impl Target {
	/// Classifies `url` the way a browser would resolve it.
	///
	/// Relative input is joined against the origin, or against a placeholder `https` base
	/// when no origin is configured. It stays [`Target::Relative`] only when the resolved host
	/// and port are the base's own; anything else (`//host`, `\\host`, `/\host`, leading
	/// whitespace) is a [`Target::Remote`] and must pass the origin gate.
	pub fn classify(url: &str, origin: Option<&Origin>) -> Self {
		match Url::parse(url) {
			Ok(url) => Self::remote(&url),
			Err(ParseError::RelativeUrlWithoutBase) => match origin {
				Some(origin) => Self::resolve(url, origin.url()),
				None => match Url::parse(SAME_ORIGIN_BASE) {
					Ok(base) => Self::resolve(url, &base),
					Err(_) => Self::Malformed,
				},
			},
			Err(_) => Self::Malformed,
		}
	}

	/// Host label suitable for logs and span fields.
	pub fn label(&self) -> String {
		match self {
			Self::Relative => "<relative>".into(),
			Self::Remote { authority, .. } => authority.to_string(),
			Self::Malformed => "<malformed>".into(),
		}
	}

	fn resolve(url: &str, base: &Url) -> Self {
		let Ok(resolved) = base.join(url) else {
			return Self::Malformed;
		};

		if HostPort::from_url(&resolved) == HostPort::from_url(base) {
			Self::Relative
		} else {
			Self::remote(&resolved)
		}
	}

	fn remote(url: &Url) -> Self {
		match HostPort::from_url(url) {
			Some(authority) => Self::Remote { scheme: url.scheme().to_owned(), authority },
			None => Self::Malformed,
		}
	}
}

fn split_port(entry: &str) -> Option<(&str, Option<u16>)> {
	let port_sep = if entry.starts_with('[') {
		entry.find("]:").map(|index| index + 1)
	} else {
		entry.rfind(':')
	};

	match port_sep {
		Some(index) => {
			let port = entry[index + 1..].parse().ok()?;

			Some((&entry[..index], Some(port)))
		},
		None => Some((entry, None)),
	}
}
