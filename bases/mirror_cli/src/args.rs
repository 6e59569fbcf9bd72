// bases/mirror_cli/src/args.rs
use clap::Parser;
use std::path::PathBuf;
use vercel_client::DEFAULT_API_URL;

/// Download the source files of a Vercel deployment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Deployment URL, domain or id (dpl_...)
    pub deployment: Option<String>,

    /// Directory to write the sources to (defaults to the deployment argument)
    pub destination: Option<PathBuf>,

    /// API token
    #[arg(long, env = "VERCEL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Team id to scope API calls to
    #[arg(long, env = "VERCEL_TEAM")]
    pub team: Option<String>,

    /// API base URL
    #[arg(long, env = "VERCEL_API_URL", default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,

    /// Maximum number of concurrent downloads (unlimited by default)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Exit with an error when some files could not be mirrored
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments() {
        let args = Args::try_parse_from([
            "vercel-source",
            "--token",
            "t",
            "https://foo.vercel.app",
            "out",
        ])
        .unwrap();
        assert_eq!(args.deployment.as_deref(), Some("https://foo.vercel.app"));
        assert_eq!(args.destination, Some(PathBuf::from("out")));
        assert_eq!(args.token.as_deref(), Some("t"));
        assert!(!args.strict);
    }

    #[test]
    fn jobs_must_be_positive() {
        assert!(Args::try_parse_from(["vercel-source", "-j", "0", "dpl_x"]).is_err());
        let args = Args::try_parse_from(["vercel-source", "-j", "8", "--strict", "dpl_x"]).unwrap();
        assert_eq!(args.jobs, Some(8));
        assert!(args.strict);
    }
}
