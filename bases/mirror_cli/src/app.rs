// bases/mirror_cli/src/app.rs
use crate::config::Config;
use crate::output::OutputHandler;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use deployment_primitives::{resolve, DeploymentRef};
use source_mirror::{MirrorReport, SourceMirror};
use std::sync::Arc;
use vercel_client::{SourceApi, VercelClient};

pub struct App {
    config: Config,
    output: OutputHandler,
}

impl App {
    pub fn new(config: Config, output: OutputHandler) -> Self {
        Self { config, output }
    }

    pub async fn run(&self) -> Result<MirrorReport> {
        let client = VercelClient::new(self.config.api.clone())
            .wrap_err("failed to set up the HTTP client")?;
        self.mirror_with(Arc::new(client)).await
    }

    async fn mirror_with(&self, api: Arc<dyn SourceApi>) -> Result<MirrorReport> {
        let reference = resolve(&self.config.deployment);
        tracing::debug!("mirroring {} into {}", reference, self.config.destination.display());

        let id = match &reference {
            DeploymentRef::Id(id) => id.clone(),
            DeploymentRef::Domain(domain) => self
                .output
                .track("Getting deployment id", api.resolve_deployment(&reference))
                .await
                .wrap_err_with(|| format!("could not resolve deployment {}", domain))?,
        };

        let tree = self
            .output
            .track("Loading source files tree", api.fetch_source_tree(&id))
            .await
            .wrap_err_with(|| format!("could not load the file tree of {}", id))?;

        let mut mirror = SourceMirror::new(api, &self.config.destination)
            .with_observer(self.output.download_observer());
        if let Some(jobs) = self.config.jobs {
            mirror = mirror.with_concurrency_limit(jobs);
        }

        let report = mirror.mirror_tree(&tree, &id).await?;
        self.output.print_summary(&report, mirror.destination());
        Ok(report)
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}
