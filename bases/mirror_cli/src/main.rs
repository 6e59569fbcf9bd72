// bases/mirror_cli/src/main.rs
mod app;
mod args;
mod config;
mod output;

use app::App;
use args::Args;
use clap::Parser;
use color_eyre::Result;
use config::Config;
use output::OutputHandler;
use source_mirror::MirrorReport;

const EXIT_FATAL: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_PARTIAL: i32 = 3;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // a missing .env file is fine, real environment variables win
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let output = OutputHandler::new(args.verbose);
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(config_error) => {
            output.print_config_error(&config_error);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let strict = config.strict;
    let app = App::new(config, output);

    let outcome = app.run().await;
    if let Err(error) = &outcome {
        app.print_error(error);
    }
    match exit_code(&outcome, strict) {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}

/// Partial mirrors only fail the run under `--strict`
fn exit_code(outcome: &Result<MirrorReport>, strict: bool) -> i32 {
    match outcome {
        Ok(report) if strict && !report.is_complete() => EXIT_PARTIAL,
        Ok(_) => 0,
        Err(_) => EXIT_FATAL,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,vercel_source=debug,source_mirror=debug,vercel_client=debug,deployment_primitives=debug"
    } else {
        // per-file failures are listed in the summary
        "warn,source_mirror=error"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
