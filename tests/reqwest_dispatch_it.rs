// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use credential_injector::{
	CredentialInjector, TokenSource,
	error::Error,
	reqwest::Client,
	url::Url,
};

fn injector_for(origin: &str, whitelist: &[String]) -> CredentialInjector {
	CredentialInjector::builder()
		.token_source(TokenSource::fixed("123"))
		.origin(Url::parse(origin).expect("Origin fixture should parse."))
		.whitelisted_domains(whitelist.iter().cloned())
		.build()
		.expect("Injector fixture should build.")
}

#[tokio::test]
async fn same_origin_dispatch_carries_bearer_header() -> Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/hello").header("authorization", "Bearer 123");
			then.status(200).body("hello");
		})
		.await;
	let client = Client::new();
	let injector = injector_for(&server.base_url(), &[]);
	let request = client.get(server.url("/hello")).build()?;
	let request = injector.process_reqwest(request).await?;
	let response = client.execute(request).await?;

	assert_eq!(response.status().as_u16(), 200);
	assert_eq!(response.text().await?, "hello");

	mock.assert_async().await;

	Ok(())
}

#[tokio::test]
async fn foreign_origin_dispatch_omits_header_unless_whitelisted() -> Result<()> {
	let server = MockServer::start_async().await;
	let bare = server
		.mock_async(|when, then| {
			when.method(GET).path("/public").header_missing("authorization");
			then.status(200);
		})
		.await;
	let trusted = server
		.mock_async(|when, then| {
			when.method(GET).path("/private").header("authorization", "Bearer 123");
			then.status(200);
		})
		.await;
	let client = Client::new();
	let untrusting = injector_for("https://app.example.com", &[]);
	let trusting =
		injector_for("https://app.example.com", &[format!("127.0.0.1:{}", server.port())]);
	let request = untrusting.process_reqwest(client.get(server.url("/public")).build()?).await?;

	client.execute(request).await?;

	let request = trusting.process_reqwest(client.get(server.url("/private")).build()?).await?;

	client.execute(request).await?;

	bare.assert_async().await;
	trusted.assert_async().await;

	Ok(())
}

#[tokio::test]
async fn query_mode_dispatch_carries_url_param() -> Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/hello")
				.query_param("access_token", "123")
				.query_param("page", "2")
				.header_missing("authorization");
			then.status(200);
		})
		.await;
	let client = Client::new();
	let injector = CredentialInjector::builder()
		.token_source(TokenSource::fixed("123"))
		.url_param("access_token")
		.origin(Url::parse(&server.base_url())?)
		.build()?;
	let request =
		injector.process_reqwest(client.get(server.url("/hello?page=2")).build()?).await?;

	client.execute(request).await?;

	mock.assert_async().await;

	Ok(())
}

#[tokio::test]
async fn token_source_failure_prevents_dispatch() -> Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/hello");
			then.status(200);
		})
		.await;
	let client = Client::new();
	let injector = CredentialInjector::builder()
		.token_source(TokenSource::try_from_fn(|_| Err::<Option<String>, _>("vault sealed")))
		.origin(Url::parse(&server.base_url())?)
		.build()?;
	let outcome = injector.process_reqwest(client.get(server.url("/hello")).build()?).await;

	assert!(matches!(outcome, Err(Error::TokenSource { .. })));

	mock.assert_calls_async(0).await;

	Ok(())
}

#[tokio::test]
async fn opted_out_dispatch_omits_header() -> Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/login").header_missing("authorization");
			then.status(204);
		})
		.await;
	let client = Client::new();
	let injector = injector_for(&server.base_url(), &[]);
	let request = client.get(server.url("/login")).build()?;
	let request = injector.process_reqwest_with(request, true).await?;
	let response = client.execute(request).await?;

	assert_eq!(response.status().as_u16(), 204);

	mock.assert_async().await;

	Ok(())
}
