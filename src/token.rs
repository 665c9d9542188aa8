//! Credential values and the pluggable token source capability.

pub mod credential;
pub mod source;

pub use credential::*;
pub use source::*;
