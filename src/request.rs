//! Outgoing request descriptor consumed and returned by the injector.

// crates.io
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// Transport-agnostic description of an outgoing HTTP request.
///
/// The injector only ever touches `headers` (one auth header) or the query component of `url`.
/// Every other field passes through unchanged. Header names are matched ASCII
/// case-insensitively by the accessor helpers.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDescriptor {
	/// HTTP method, e.g. `GET`.
	pub method: String,
	/// Absolute (`https://host/path`) or relative (`/path`) request URL.
	pub url: String,
	/// Request headers keyed by name.
	pub headers: BTreeMap<String, String>,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
	/// Opts this request out of credential injection entirely.
	#[serde(alias = "skipAuthorization")]
	pub skip_authorization: bool,
}
impl RequestDescriptor {
	/// Creates a descriptor for the provided method and URL.
	pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
		Self { method: method.into(), url: url.into(), ..Default::default() }
	}

	/// Creates a `GET` descriptor.
	pub fn get(url: impl Into<String>) -> Self {
		Self::new("GET", url)
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_header(name, value);

		self
	}

	/// Attaches a body.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Marks the request so the injector leaves it untouched.
	pub fn skip_authorization(mut self) -> Self {
		self.skip_authorization = true;

		self
	}

	/// Returns the value of a header, ignoring name case.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Counts headers whose name matches `name`, ignoring case.
	pub fn header_count(&self, name: &str) -> usize {
		self.headers.keys().filter(|key| key.eq_ignore_ascii_case(name)).count()
	}

	/// Sets a header, dropping every existing entry whose name differs only by case.
	pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();

		self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
		self.headers.insert(name, value.into());
	}

	/// Merges `name=value` into the URL's query string.
	///
	/// Pairs with other names keep their original encoding, an existing pair named `name` is
	/// replaced, and any fragment stays at the end.
	pub fn set_query_param(&mut self, name: &str, value: &str) {
		self.url = merge_query_param(&self.url, name, value);
	}

	/// Returns the first decoded value of the query parameter `name`, if present.
	pub fn query_param(&self, name: &str) -> Option<String> {
		let (head, _) = split_fragment(&self.url);
		let (_, query) = split_query(head);

		form_urlencoded::parse(query?.as_bytes())
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.into_owned())
	}
}
impl Debug for RequestDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestDescriptor")
			.field("method", &self.method)
			.field("url", &self.url)
			.field("headers", &self.headers.keys().collect::<Vec<_>>())
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("skip_authorization", &self.skip_authorization)
			.finish()
	}
}

fn merge_query_param(url: &str, name: &str, value: &str) -> String {
	let (head, fragment) = split_fragment(url);
	let (path, query) = split_query(head);
	let mut segments = query
		.into_iter()
		.flat_map(|query| query.split('&'))
		.filter(|segment| !segment.is_empty() && !is_pair_named(segment, name))
		.collect::<Vec<_>>();
	let pair = form_urlencoded::Serializer::new(String::new()).append_pair(name, value).finish();

	segments.push(&pair);

	format!("{path}?{}{fragment}", segments.join("&"))
}

fn split_fragment(url: &str) -> (&str, &str) {
	match url.find('#') {
		Some(index) => url.split_at(index),
		None => (url, ""),
	}
}

fn split_query(head: &str) -> (&str, Option<&str>) {
	match head.split_once('?') {
		Some((path, query)) => (path, Some(query)),
		None => (head, None),
	}
}

fn is_pair_named(segment: &str, name: &str) -> bool {
	form_urlencoded::parse(segment.as_bytes()).next().is_some_and(|(key, _)| key == name)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn set_header_replaces_case_variants() {
		let mut request = RequestDescriptor::get("/hello")
			.with_header("authorization", "Bearer old")
			.with_header("X-Trace", "1");

		request.headers.insert("AUTHORIZATION".into(), "Bearer older".into());
		request.set_header("Authorization", "Bearer new");

		assert_eq!(request.header_count("authorization"), 1);
		assert_eq!(request.header("AUTHORIZATION"), Some("Bearer new"));
		assert_eq!(request.header("x-trace"), Some("1"));
	}

	#[test]
	fn query_param_appended_to_bare_path() {
		let mut request = RequestDescriptor::get("/hello");

		request.set_query_param("access_token", "123");

		assert_eq!(request.url, "/hello?access_token=123");
	}

	#[test]
	fn query_param_preserves_existing_pairs_and_fragment() {
		let mut request = RequestDescriptor::get("https://api.example.com/a?b=%20x&c#top");

		request.set_query_param("access_token", "t k");

		assert_eq!(request.url, "https://api.example.com/a?b=%20x&c&access_token=t+k#top");
		assert_eq!(request.query_param("access_token").as_deref(), Some("t k"));
		assert_eq!(request.query_param("b").as_deref(), Some(" x"));
	}

	#[test]
	fn query_param_replaces_same_named_pair() {
		let mut request = RequestDescriptor::get("/hello?access_token=old&page=2&");

		request.set_query_param("access_token", "new");

		assert_eq!(request.url, "/hello?page=2&access_token=new");
	}

	#[test]
	fn query_param_handles_empty_query() {
		let mut request = RequestDescriptor::get("/hello?");

		request.set_query_param("token", "1");

		assert_eq!(request.url, "/hello?token=1");
	}

	#[test]
	fn debug_omits_header_values() {
		let request = RequestDescriptor::get("/").with_header("Authorization", "Bearer secret");
		let rendered = format!("{request:?}");

		assert!(rendered.contains("Authorization"));
		assert!(!rendered.contains("secret"));
	}

	#[test]
	fn deserializes_with_defaults() {
		let request: RequestDescriptor =
			serde_json::from_str(r#"{"url":"/hello","skipAuthorization":true}"#)
				.expect("Request descriptor JSON fixture should deserialize.");

		assert_eq!(request.url, "/hello");
		assert!(request.method.is_empty());
		assert!(request.headers.is_empty());
		assert!(request.skip_authorization);
	}
}
