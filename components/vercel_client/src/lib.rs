//! Client for the parts of the Vercel API needed to mirror deployment sources.
//!
//! [`SourceApi`] is the seam the mirror works against; [`VercelClient`] is the
//! HTTP implementation. Configuration is always passed in explicitly through
//! [`ApiConfig`].

mod api;
mod config;
mod error;
mod http;

pub use api::{decode_file_envelope, SourceApi};
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::ClientError;
pub use http::VercelClient;
