// self
use crate::{
	_prelude::*,
	injector::{AttachmentMode, AuthScheme, CredentialInjector, InjectorInner},
	origin::{Origin, Whitelist},
	token::{TokenSource, credential},
};

/// Builder for [`CredentialInjector`] values.
#[derive(Debug, Default)]
pub struct CredentialInjectorBuilder {
	/// Source queried for credentials; requests pass through untouched when unset.
	pub token_source: Option<TokenSource>,
	/// Raw `host` / `host:port` entries trusted across origins.
	pub whitelisted_domains: Vec<String>,
	/// Query parameter name; selects [`AttachmentMode::QueryParam`] when set.
	pub url_param: Option<String>,
	/// The caller's own origin.
	pub origin: Option<Url>,
	/// Header name override for header mode.
	pub auth_header: Option<String>,
	/// Header value prefix override for header mode.
	pub auth_prefix: Option<String>,
}
impl CredentialInjectorBuilder {
	/// Sets the token source.
	pub fn token_source(mut self, source: TokenSource) -> Self {
		self.token_source = Some(source);

		self
	}

	/// Trusts a single cross-origin host.
	pub fn whitelisted_domain(mut self, domain: impl Into<String>) -> Self {
		self.whitelisted_domains.push(domain.into());

		self
	}

	/// Trusts multiple cross-origin hosts.
	pub fn whitelisted_domains<I, S>(mut self, domains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.whitelisted_domains.extend(domains.into_iter().map(Into::into));

		self
	}

	/// Switches to query-parameter mode using `name`.
	pub fn url_param(mut self, name: impl Into<String>) -> Self {
		self.url_param = Some(name.into());

		self
	}

	/// Sets the caller's own origin.
	pub fn origin(mut self, origin: Url) -> Self {
		self.origin = Some(origin);

		self
	}

	/// Overrides the header name used in header mode.
	pub fn auth_header(mut self, name: impl Into<String>) -> Self {
		self.auth_header = Some(name.into());

		self
	}

	/// Overrides the header value prefix used in header mode.
	pub fn auth_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.auth_prefix = Some(prefix.into());

		self
	}

	/// Consumes the builder and validates the resulting injector.
	pub fn build(self) -> Result<CredentialInjector, ConfigError> {
		let mode = match self.url_param {
			Some(name) if name.is_empty() => return Err(ConfigError::EmptyUrlParam),
			Some(name) => AttachmentMode::QueryParam(name),
			None => AttachmentMode::Header,
		};
		let mut scheme = AuthScheme::default();

		if let Some(header) = self.auth_header {
			validate_header_name(&header)?;

			scheme.header = header;
		}
		if let Some(prefix) = self.auth_prefix {
			if !credential::is_header_value_safe(&prefix) {
				return Err(ConfigError::InvalidAuthPrefix);
			}

			scheme.prefix = prefix;
		}

		let whitelist = Whitelist::new(self.whitelisted_domains)?;
		let origin = self.origin.map(Origin::from_url).transpose()?;
		let inner =
			InjectorInner { token_source: self.token_source, whitelist, origin, mode, scheme };

		Ok(CredentialInjector { inner: Arc::new(inner) })
	}
}

fn validate_header_name(name: &str) -> Result<(), ConfigError> {
	let is_token_char = |c: char| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c);

	if !name.is_empty() && name.chars().all(is_token_char) {
		Ok(())
	} else {
		Err(ConfigError::InvalidAuthHeader { name: name.to_owned() })
	}
}
