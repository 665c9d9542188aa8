//! Serializable injector configuration.
//!
//! Field names accept both snake_case and the camelCase spelling used by browser-side
//! interceptors (`whiteListedDomains`, `urlParam`, `authHeader`, `authPrefix`). The token
//! source is code, not data, so it is supplied separately to
//! [`CredentialInjector::from_config`](crate::CredentialInjector::from_config).

// self
use crate::{_prelude::*, injector::CredentialInjectorBuilder};

/// Deserializable configuration surface for a [`CredentialInjector`](crate::CredentialInjector).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InjectorConfig {
	/// Hosts (`host` or `host:port`) trusted to receive credentials across origins.
	#[serde(alias = "whiteListedDomains")]
	pub whitelisted_domains: Vec<String>,
	/// Query parameter name; presence selects query-parameter mode.
	#[serde(alias = "urlParam")]
	pub url_param: Option<String>,
	/// The caller's own origin.
	pub origin: Option<Url>,
	/// Header name override for header mode.
	#[serde(alias = "authHeader")]
	pub auth_header: Option<String>,
	/// Header value prefix override for header mode.
	#[serde(alias = "authPrefix")]
	pub auth_prefix: Option<String>,
}
impl InjectorConfig {
	/// Parses JSON configuration, reporting the path of the first invalid field.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(json);
		let config = serde_path_to_error::deserialize(&mut deserializer)?;

		deserializer.end().map_err(|source| ConfigError::Parse { path: ".".into(), source })?;

		Ok(config)
	}

	/// Converts the configuration into a builder without a token source.
	pub fn into_builder(self) -> CredentialInjectorBuilder {
		CredentialInjectorBuilder {
			token_source: None,
			whitelisted_domains: self.whitelisted_domains,
			url_param: self.url_param,
			origin: self.origin,
			auth_header: self.auth_header,
			auth_prefix: self.auth_prefix,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parses_camel_case_aliases() {
		let config = InjectorConfig::from_json_str(
			r#"{
				"whiteListedDomains": ["whitelisted.Example.com"],
				"urlParam": "access_token",
				"origin": "https://app.example.com"
			}"#,
		)
		.expect("CamelCase config fixture should parse.");

		assert_eq!(config.whitelisted_domains, vec!["whitelisted.Example.com".to_owned()]);
		assert_eq!(config.url_param.as_deref(), Some("access_token"));
		assert_eq!(
			config.origin.as_ref().map(Url::as_str),
			Some("https://app.example.com/")
		);
	}

	#[test]
	fn empty_object_yields_defaults() {
		let config = InjectorConfig::from_json_str("{}").expect("Empty config should parse.");

		assert_eq!(config, InjectorConfig::default());
	}

	#[test]
	fn parse_error_names_the_field() {
		let err = InjectorConfig::from_json_str(r#"{"url_param": 5}"#)
			.expect_err("Numeric url_param should be rejected.");

		match err {
			ConfigError::Parse { path, .. } => assert_eq!(path, "url_param"),
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[test]
	fn trailing_garbage_is_rejected() {
		let err = InjectorConfig::from_json_str("{} {}").expect_err("Trailing data should fail.");

		assert!(matches!(err, ConfigError::Parse { .. }));
	}
}
