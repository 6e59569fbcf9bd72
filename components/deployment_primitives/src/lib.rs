//! Deployment identifier primitives
//!
//! A deployment is addressed either by its opaque ID (`dpl_...`) or by one of
//! its domains. This component turns whatever the user typed into a
//! [`DeploymentRef`]:
//!
//! ```
//! use deployment_primitives::{resolve, DeploymentRef};
//!
//! assert!(matches!(resolve("dpl_abc123"), DeploymentRef::Id(_)));
//! assert_eq!(
//!     resolve("https://foo.vercel.app/path"),
//!     DeploymentRef::Domain("foo.vercel.app".to_string())
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Marker prefix of raw deployment IDs
pub const DEPLOYMENT_ID_PREFIX: &str = "dpl_";

/// Opaque deployment identifier as issued by the hosting API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentId(String);

impl DeploymentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user pointed us at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentRef {
    /// Already an ID, no lookup needed
    Id(DeploymentId),
    /// A domain that still has to be resolved to an ID
    Domain(String),
}

impl fmt::Display for DeploymentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentRef::Id(id) => write!(f, "{}", id),
            DeploymentRef::Domain(domain) => f.write_str(domain),
        }
    }
}

/// Classify user input as a deployment ID or a domain.
///
/// Never fails: input that looks like a URL but does not parse is used as-is.
pub fn resolve(input: &str) -> DeploymentRef {
    if input.starts_with(DEPLOYMENT_ID_PREFIX) {
        return DeploymentRef::Id(DeploymentId::new(input));
    }
    DeploymentRef::Domain(extract_domain(input))
}

/// Normalize input to a bare domain (or ID).
///
/// IDs and bare domains come back unchanged, `http(s)://` URLs are reduced to
/// their host.
pub fn extract_domain(input: &str) -> String {
    if input.starts_with(DEPLOYMENT_ID_PREFIX) {
        return input.to_string();
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        return match Url::parse(input) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => host.to_string(),
                None => {
                    tracing::warn!("URL '{}' has no host, using it as given", input);
                    input.to_string()
                }
            },
            Err(parse_err) => {
                tracing::warn!("Invalid URL format '{}': {}", input, parse_err);
                input.to_string()
            }
        };
    }

    input.to_string()
}
