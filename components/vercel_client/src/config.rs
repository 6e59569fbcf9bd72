use crate::error::ClientError;
use std::fmt;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.vercel.com";

/// Credentials and scoping for every API call
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    token: String,
    team_id: Option<String>,
    base_url: String,
}

impl ApiConfig {
    /// Configuration against the public API with the given bearer token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            team_id: None,
            base_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Scope all calls to a team. Empty strings count as unset.
    pub fn with_team(mut self, team_id: Option<String>) -> Self {
        self.team_id = team_id.filter(|team| !team.trim().is_empty());
        self
    }

    /// Point the client at another API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url,
                reason: "not a base URL".to_string(),
            });
        }
        self.base_url = base_url;
        Ok(self)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &"<redacted>")
            .field("team_id", &self.team_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}
