// bases/mirror_cli/src/config.rs
use crate::args::Args;
use std::path::PathBuf;
use thiserror::Error;
use vercel_client::{ApiConfig, ClientError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing VERCEL_TOKEN in .env file or environment")]
    MissingToken,

    #[error("Missing deployment URL or id")]
    MissingDeployment,

    #[error(transparent)]
    Api(#[from] ClientError),
}

/// Everything a run needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub deployment: String,
    pub destination: PathBuf,
    pub api: ApiConfig,
    pub jobs: Option<usize>,
    pub strict: bool,
}

impl Config {
    /// Create configuration from CLI arguments (with environment fallbacks
    /// already applied by clap)
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let token = args
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let deployment = args
            .deployment
            .map(|deployment| deployment.trim().to_string())
            .filter(|deployment| !deployment.is_empty())
            .ok_or(ConfigError::MissingDeployment)?;

        // the deployment argument doubles as the directory name
        let destination = args
            .destination
            .unwrap_or_else(|| PathBuf::from(&deployment));

        let api = ApiConfig::new(token.trim())
            .with_team(args.team)
            .with_base_url(args.api_url)?;

        Ok(Self {
            deployment,
            destination,
            api,
            jobs: args.jobs.map(usize::from),
            strict: args.strict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use vercel_client::DEFAULT_API_URL;

    fn args() -> Args {
        Args {
            deployment: Some("foo.vercel.app".to_string()),
            destination: None,
            token: Some("secret".to_string()),
            team: None,
            api_url: DEFAULT_API_URL.to_string(),
            jobs: None,
            strict: false,
            verbose: false,
        }
    }

    #[test]
    fn destination_defaults_to_deployment() {
        let config = Config::from_args(args()).unwrap();
        assert_eq!(config.deployment, "foo.vercel.app");
        assert_eq!(config.destination, PathBuf::from("foo.vercel.app"));
        assert_eq!(config.api.token(), "secret");
        assert_eq!(config.api.team_id(), None);
        assert_eq!(config.jobs, None);
    }

    #[test]
    fn explicit_destination_and_team() {
        let config = Config::from_args(Args {
            destination: Some(PathBuf::from("out")),
            team: Some("team_1".to_string()),
            jobs: Some(4),
            ..args()
        })
        .unwrap();
        assert_eq!(config.destination, PathBuf::from("out"));
        assert_eq!(config.api.team_id(), Some("team_1"));
        assert_eq!(config.jobs, Some(4));
    }

    #[test]
    fn token_is_required() {
        assert_matches!(
            Config::from_args(Args { token: None, ..args() }),
            Err(ConfigError::MissingToken)
        );
        assert_matches!(
            Config::from_args(Args {
                token: Some(" ".to_string()),
                ..args()
            }),
            Err(ConfigError::MissingToken)
        );
    }

    #[test]
    fn missing_token_reported_before_missing_deployment() {
        assert_matches!(
            Config::from_args(Args {
                token: None,
                deployment: None,
                ..args()
            }),
            Err(ConfigError::MissingToken)
        );
    }

    #[test]
    fn deployment_is_required() {
        assert_matches!(
            Config::from_args(Args {
                deployment: None,
                ..args()
            }),
            Err(ConfigError::MissingDeployment)
        );
    }

    #[test]
    fn bad_api_url_is_a_config_error() {
        assert_matches!(
            Config::from_args(Args {
                api_url: "::nope".to_string(),
                ..args()
            }),
            Err(ConfigError::Api(ClientError::InvalidBaseUrl { .. }))
        );
    }
}
