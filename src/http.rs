//! reqwest integration.
//!
//! [`CredentialInjector::process_reqwest`] runs the same policy as
//! [`CredentialInjector::process`] against a built [`reqwest::Request`]. The decision and the
//! token source see a [`RequestDescriptor`] snapshot; the resulting [`Attachment`] is then
//! written straight into the reqwest request so non-UTF-8 headers and streaming bodies survive.
//! Sending the request stays with the caller.

// crates.io
use reqwest::{
	Request,
	header::{HeaderName, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	injector::{Attachment, CredentialInjector},
	request::RequestDescriptor,
};

impl RequestDescriptor {
	/// Snapshots a reqwest request.
	///
	/// Headers that are not valid UTF-8 are skipped, and only buffered bodies are copied.
	pub fn from_reqwest(request: &Request) -> Self {
		let headers = request
			.headers()
			.iter()
			.filter_map(|(name, value)| {
				Some((name.as_str().to_owned(), value.to_str().ok()?.to_owned()))
			})
			.collect::<BTreeMap<_, _>>();

		Self {
			method: request.method().as_str().to_owned(),
			url: request.url().to_string(),
			headers,
			body: request.body().and_then(|body| body.as_bytes()).map(<[u8]>::to_vec),
			skip_authorization: false,
		}
	}
}

impl Attachment {
	/// Writes the attachment into a reqwest request.
	///
	/// Header values are marked sensitive. Query pairs with the same name are replaced; the
	/// remaining pairs are re-serialized with form encoding.
	pub fn apply_to_reqwest(self, request: &mut Request) -> Result<()> {
		match self {
			Attachment::Header { name, value } => {
				let header = HeaderName::from_bytes(name.as_bytes())
					.map_err(|_| ConfigError::InvalidAuthHeader { name })?;
				let mut header_value = HeaderValue::from_str(value.expose())
					.map_err(|_| Error::InvalidCredential { header: header.to_string() })?;

				header_value.set_sensitive(true);
				request.headers_mut().insert(header, header_value);
			},
			Attachment::QueryParam { name, value } => {
				let url = request.url_mut();
				let retained = url
					.query_pairs()
					.filter(|(key, _)| key.as_ref() != name.as_str())
					.map(|(key, value)| (key.into_owned(), value.into_owned()))
					.collect::<Vec<_>>();
				let mut pairs = url.query_pairs_mut();

				pairs.clear();
				pairs.extend_pairs(retained);
				pairs.append_pair(&name, value.expose());
			},
		}

		Ok(())
	}
}

impl CredentialInjector {
	/// Runs the policy against a reqwest request and returns it, with a credential attached
	/// when eligible.
	///
	/// reqwest requests carry no opt-out flag; use
	/// [`process_reqwest_with`](Self::process_reqwest_with) to skip authorization per request.
	pub async fn process_reqwest(&self, request: Request) -> Result<Request> {
		self.process_reqwest_with(request, false).await
	}

	/// Same as [`process_reqwest`](Self::process_reqwest), with an explicit per-request opt-out.
	///
	/// When `skip_authorization` is `true` the token source is not consulted and the request is
	/// returned untouched.
	pub async fn process_reqwest_with(
		&self,
		mut request: Request,
		skip_authorization: bool,
	) -> Result<Request> {
		let descriptor =
			RequestDescriptor { skip_authorization, ..RequestDescriptor::from_reqwest(&request) };

		if let Some(attachment) = self.resolve(&descriptor).await? {
			attachment.apply_to_reqwest(&mut request)?;
		}

		Ok(request)
	}
}
