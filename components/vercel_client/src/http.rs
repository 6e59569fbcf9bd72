use crate::api::{decode_file_envelope, SourceApi};
use crate::config::ApiConfig;
use crate::error::ClientError;
use async_trait::async_trait;
use deployment_primitives::DeploymentId;
use serde::Deserialize;
use source_tree::TreeNode;
use url::Url;

/// [`SourceApi`] over HTTPS with bearer authentication.
///
/// Requests are sent exactly once; reqwest does not retry on its own and
/// neither do we.
pub struct VercelClient {
    config: ApiConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct DeploymentResponse {
    id: String,
}

impl VercelClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vercel-source/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    /// Build `<base>/<segments...>[?teamId=<team>]`, encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let base = self.config.base_url();
        let mut url = Url::parse(base).map_err(|e| ClientError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: base.to_string(),
                reason: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);

        if let Some(team) = self.config.team_id() {
            url.query_pairs_mut().append_pair("teamId", team);
        }
        Ok(url)
    }

    async fn get(&self, url: Url, what: String) -> Result<Vec<u8>, ClientError> {
        tracing::debug!("GET {}", url.path());

        let response = self
            .http
            .get(url)
            .bearer_auth(self.config.token())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::debug!("{} answered {}", what, status);
            return Err(ClientError::from_status(status.as_u16(), what, &body));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl SourceApi for VercelClient {
    async fn lookup_deployment_id(&self, domain: &str) -> Result<DeploymentId, ClientError> {
        let url = self.endpoint(&["v13", "deployments", domain])?;
        let body = self.get(url, format!("deployment {}", domain)).await?;
        let deployment: DeploymentResponse = serde_json::from_slice(&body)?;
        Ok(DeploymentId::new(deployment.id))
    }

    async fn fetch_file_tree(&self, id: &DeploymentId) -> Result<Vec<TreeNode>, ClientError> {
        let url = self.endpoint(&["v6", "deployments", id.as_str(), "files"])?;
        let body = self.get(url, format!("file tree of {}", id)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_file_bytes(&self, id: &DeploymentId, uid: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(&["v7", "deployments", id.as_str(), "files", uid])?;
        let body = self.get(url, format!("file {} of {}", uid, id)).await?;
        decode_file_envelope(&body)
    }
}
