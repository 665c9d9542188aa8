//! Origin-aware credential injection for outgoing HTTP requests.
//!
//! A [`CredentialInjector`](injector::CredentialInjector) inspects each request descriptor,
//! decides whether the target is trusted (same origin or an explicitly whitelisted host), asks a
//! pluggable [`TokenSource`](token::TokenSource) for a credential, and attaches it either as an
//! `Authorization: Bearer …` header or as a named query parameter.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
#[cfg(feature = "reqwest")] pub mod http;
pub mod injector;
pub mod obs;
pub mod origin;
pub mod request;
pub mod token;

pub use injector::{AttachmentMode, CredentialInjector};
pub use request::RequestDescriptor;
pub use token::{Credential, TokenSource};

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{BoxError, ConfigError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
