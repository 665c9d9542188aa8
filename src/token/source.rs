//! Token source capability: a single shared function that yields a credential for a request,
//! either immediately or once a future resolves.

// self
use crate::{_prelude::*, request::RequestDescriptor, token::Credential};

/// Boxed future returned by [`TokenSource::fetch`].
///
/// Resolving to `Ok(None)` means "no credential right now" and is not an error.
pub type TokenFuture =
	Pin<Box<dyn Future<Output = Result<Option<Credential>, BoxError>> + 'static + Send>>;

type TokenFn = dyn Fn(&RequestDescriptor) -> TokenFuture + Send + Sync;

/// Caller-supplied capability producing credentials for outgoing requests.
///
/// The source receives the request being processed so it can pick a credential per target.
/// Cloning is cheap; every clone shares the same function.
#[derive(Clone)]
pub struct TokenSource(Arc<TokenFn>);
impl TokenSource {
	/// Wraps a function that already returns a boxed [`TokenFuture`].
	pub fn new<F>(f: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&RequestDescriptor) -> TokenFuture,
	{
		Self(Arc::new(f))
	}

	/// Builds a synchronous source.
	pub fn from_fn<F, T>(f: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&RequestDescriptor) -> Option<T>,
		T: Into<Credential>,
	{
		Self::new(move |request: &RequestDescriptor| -> TokenFuture {
			let credential: Option<Credential> = f(request).map(Into::into);

			Box::pin(std::future::ready(Ok::<_, BoxError>(credential)))
		})
	}

	/// Builds a synchronous source that may fail.
	pub fn try_from_fn<F, T, E>(f: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&RequestDescriptor) -> Result<Option<T>, E>,
		T: Into<Credential>,
		E: Into<BoxError>,
	{
		Self::new(move |request: &RequestDescriptor| -> TokenFuture {
			let outcome: Result<Option<Credential>, BoxError> =
				f(request).map(|value| value.map(Into::into)).map_err(Into::into);

			Box::pin(std::future::ready(outcome))
		})
	}

	/// Builds an asynchronous source.
	///
	/// The returned future must own whatever it needs from the request; it cannot borrow the
	/// descriptor past the call.
	pub fn from_async<F, Fut, T, E>(f: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&RequestDescriptor) -> Fut,
		Fut: 'static + Send + Future<Output = Result<Option<T>, E>>,
		T: Into<Credential>,
		E: Into<BoxError>,
	{
		Self::new(move |request: &RequestDescriptor| -> TokenFuture {
			let fut = f(request);

			Box::pin(async move {
				let outcome: Result<Option<Credential>, BoxError> =
					fut.await.map(|value| value.map(Into::into)).map_err(Into::into);

				outcome
			})
		})
	}

	/// Source that always yields the same credential.
	pub fn fixed(credential: impl Into<Credential>) -> Self {
		let credential = credential.into();

		Self::from_fn(move |_| Some(credential.clone()))
	}

	/// Invokes the source for `request`.
	pub fn fetch(&self, request: &RequestDescriptor) -> TokenFuture {
		(self.0)(request)
	}
}
impl Debug for TokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSource(..)")
	}
}
