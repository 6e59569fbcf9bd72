use crate::error::ClientError;
use async_trait::async_trait;
use base64::Engine;
use deployment_primitives::{DeploymentId, DeploymentRef};
use serde::Deserialize;
use source_tree::{TreeNode, SOURCE_ROOT};

/// Remote operations the mirror needs
#[async_trait]
pub trait SourceApi: Send + Sync {
    /// Look up the deployment serving `domain` and return its ID
    async fn lookup_deployment_id(&self, domain: &str) -> Result<DeploymentId, ClientError>;

    /// Fetch the top-level entries of a deployment's file tree
    async fn fetch_file_tree(&self, id: &DeploymentId) -> Result<Vec<TreeNode>, ClientError>;

    /// Fetch the decoded content of one file
    async fn fetch_file_bytes(&self, id: &DeploymentId, uid: &str) -> Result<Vec<u8>, ClientError>;

    /// Fetch the tree and keep only the `src` subtree
    async fn fetch_source_tree(&self, id: &DeploymentId) -> Result<TreeNode, ClientError> {
        let nodes = self.fetch_file_tree(id).await?;
        nodes
            .into_iter()
            .find(|node| node.name == SOURCE_ROOT)
            .ok_or_else(|| ClientError::MissingSourceTree { id: id.clone() })
    }

    /// Turn a reference into an ID, looking domains up remotely
    async fn resolve_deployment(&self, reference: &DeploymentRef) -> Result<DeploymentId, ClientError> {
        match reference {
            DeploymentRef::Id(id) => Ok(id.clone()),
            DeploymentRef::Domain(domain) => self.lookup_deployment_id(domain).await,
        }
    }
}

#[derive(Deserialize)]
struct FileEnvelope {
    data: String,
}

/// Decode a file content response: `{"data": "<base64>"}`
pub fn decode_file_envelope(body: &[u8]) -> Result<Vec<u8>, ClientError> {
    let envelope: FileEnvelope = serde_json::from_slice(body)?;
    // long payloads may come wrapped
    let data: String = envelope
        .data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(data)?)
}
