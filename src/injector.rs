//! The credential injection policy.
//!
//! [`CredentialInjector::process`] decides, per request, whether the target is trusted and, if
//! so, asks the configured [`TokenSource`] for a credential and attaches it either as an auth
//! header or as a named query parameter. Untrusted targets, opted-out requests, and requests
//! for which no credential is available pass through untouched.

/// Builder API for assembling credential injectors.
pub mod builder;
pub mod config;

pub use builder::*;
pub use config::*;

// self
use crate::{
	_prelude::*,
	obs::{self, Decision, InjectionSpan},
	origin::{Origin, Target, Whitelist},
	request::RequestDescriptor,
	token::{Credential, TokenSource},
};

/// Default header carrying the credential.
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";
/// Default prefix placed before the credential in the header value.
pub const DEFAULT_AUTH_PREFIX: &str = "Bearer ";

/// Where an attached credential goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AttachmentMode {
	/// `Authorization: Bearer <credential>` (or the configured [`AuthScheme`]).
	#[default]
	Header,
	/// `?<name>=<credential>` merged into the URL query.
	QueryParam(String),
}
impl AttachmentMode {
	/// Returns a stable label suitable for span or metric fields.
	pub fn as_str(&self) -> &'static str {
		match self {
			AttachmentMode::Header => "header",
			AttachmentMode::QueryParam(_) => "query_param",
		}
	}
}

/// Header name and value prefix used in [`AttachmentMode::Header`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthScheme {
	/// Header name, `Authorization` by default.
	pub header: String,
	/// Value prefix, `Bearer ` by default.
	pub prefix: String,
}
impl Default for AuthScheme {
	fn default() -> Self {
		Self { header: DEFAULT_AUTH_HEADER.into(), prefix: DEFAULT_AUTH_PREFIX.into() }
	}
}

/// Concrete credential placement decided for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attachment {
	/// Set (replace) a header.
	Header {
		/// Header name.
		name: String,
		/// Full header value, prefix included.
		value: Credential,
	},
	/// Merge a query parameter into the URL.
	QueryParam {
		/// Parameter name.
		name: String,
		/// Credential value, unencoded.
		value: Credential,
	},
}
impl Attachment {
	/// Applies the attachment to a descriptor.
	pub fn apply(self, request: &mut RequestDescriptor) {
		match self {
			Attachment::Header { name, value } => request.set_header(name, value.expose()),
			Attachment::QueryParam { name, value } =>
				request.set_query_param(&name, value.expose()),
		}
	}
}

/// Origin-aware credential injector.
///
/// Configuration is fixed at build time and shared behind an [`Arc`], so clones are cheap and
/// concurrent `process` calls never observe mutation.
#[derive(Clone, Debug)]
pub struct CredentialInjector {
	inner: Arc<InjectorInner>,
}
#[derive(Debug)]
struct InjectorInner {
	token_source: Option<TokenSource>,
	whitelist: Whitelist,
	origin: Option<Origin>,
	mode: AttachmentMode,
	scheme: AuthScheme,
}
impl CredentialInjector {
	/// Starts a builder with header mode, an empty whitelist, and no token source.
	pub fn builder() -> CredentialInjectorBuilder {
		CredentialInjectorBuilder::default()
	}

	/// Builds an injector from deserialized configuration plus an optional token source.
	pub fn from_config(
		config: InjectorConfig,
		token_source: Option<TokenSource>,
	) -> Result<Self, ConfigError> {
		let mut builder = config.into_builder();

		builder.token_source = token_source;

		builder.build()
	}

	/// Attachment mode in effect.
	pub fn mode(&self) -> &AttachmentMode {
		&self.inner.mode
	}

	/// Header name and prefix used in header mode.
	pub fn scheme(&self) -> &AuthScheme {
		&self.inner.scheme
	}

	/// Trusted cross-origin hosts.
	pub fn whitelist(&self) -> &Whitelist {
		&self.inner.whitelist
	}

	/// The caller's own origin, if configured.
	pub fn origin(&self) -> Option<&Origin> {
		self.inner.origin.as_ref()
	}

	/// Whether a token source is configured.
	pub fn has_token_source(&self) -> bool {
		self.inner.token_source.is_some()
	}

	/// Whether a request to `url` may receive a credential.
	///
	/// Relative URLs and the configured origin (same scheme, host, and port) are always
	/// eligible; other hosts must be whitelisted. Malformed absolute URLs are never eligible.
	pub fn is_eligible(&self, url: &str) -> bool {
		self.is_target_eligible(&Target::classify(url, self.origin()))
	}

	/// Runs the policy and returns the request, with a credential attached when eligible.
	///
	/// Suspends while the token source resolves. On error the request must not be sent.
	pub async fn process(&self, mut request: RequestDescriptor) -> Result<RequestDescriptor> {
		if let Some(attachment) = self.resolve(&request).await? {
			attachment.apply(&mut request);
		}

		Ok(request)
	}

	/// Runs the policy without mutating the request and returns what would be attached.
	pub async fn resolve(&self, request: &RequestDescriptor) -> Result<Option<Attachment>> {
		let target = Target::classify(&request.url, self.origin());
		let span = InjectionSpan::new(self.inner.mode.as_str(), &target.label());

		span.instrument(self.decide(request, &target)).await
	}

	async fn decide(
		&self,
		request: &RequestDescriptor,
		target: &Target,
	) -> Result<Option<Attachment>> {
		if request.skip_authorization {
			return Ok(self.skip(Decision::SkippedByRequest));
		}
		if !self.is_target_eligible(target) {
			return Ok(self.skip(Decision::CrossOrigin));
		}

		let Some(source) = self.inner.token_source.as_ref() else {
			return Ok(self.skip(Decision::NoTokenSource));
		};
		let credential = match source.fetch(request).await {
			Ok(Some(credential)) if !credential.is_empty() => credential,
			Ok(_) => return Ok(self.skip(Decision::NoCredential)),
			Err(e) => {
				self.record(Decision::Failed);

				return Err(Error::token_source(e));
			},
		};
		let attachment = self.attachment_for(credential).inspect_err(|_| {
			self.record(Decision::Failed);
		})?;

		self.record(Decision::Attached);

		Ok(Some(attachment))
	}

	fn is_target_eligible(&self, target: &Target) -> bool {
		match target {
			Target::Relative => true,
			Target::Malformed => false,
			Target::Remote { scheme, authority } =>
				self.origin().is_some_and(|origin| {
					origin.url().scheme() == scheme && origin.authority() == authority
				}) || self.inner.whitelist.permits(authority),
		}
	}

	fn attachment_for(&self, credential: Credential) -> Result<Attachment> {
		match &self.inner.mode {
			AttachmentMode::Header => {
				let scheme = &self.inner.scheme;

				if !credential.is_header_safe() {
					return Err(Error::InvalidCredential { header: scheme.header.clone() });
				}

				let value = Credential::new(format!("{}{}", scheme.prefix, credential.expose()));

				Ok(Attachment::Header { name: scheme.header.clone(), value })
			},
			AttachmentMode::QueryParam(name) =>
				Ok(Attachment::QueryParam { name: name.clone(), value: credential }),
		}
	}

	fn skip(&self, decision: Decision) -> Option<Attachment> {
		obs::trace_skip(decision);

		self.record(decision);

		None
	}

	fn record(&self, decision: Decision) {
		obs::record_decision(decision, self.inner.mode.as_str());
	}
}
