//! # newrelic-deployment
//!
//! Notify New Relic APM about an application deployment.
//!
//! ## Usage
//!
//! ```bash
//! # As a host module: the host passes the path of a JSON args file
//! newrelic-deployment /tmp/args.json
//!
//! # From the command line
//! newrelic-deployment --token AAAAAA --app-name myapp \
//!     --user 'ansible deployment' --revision 1.0
//!
//! # Resolve the application but don't record anything
//! newrelic-deployment --token AAAAAA --app-name myapp --check
//! ```
//!
//! The JSON result is printed on stdout; the exit status is non-zero on failure.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use newrelic_deployment::module::{self, ModuleInvocation, ModuleResult};
use newrelic_deployment::config::parse_bool;
use newrelic_deployment::observability;
use newrelic_deployment::{DeploymentParams, NewRelicREST, NotifierConfig, RunMode};

/// Notify New Relic about an application deployment
#[derive(Parser, Debug)]
#[command(name = "newrelic-deployment", version)]
#[command(
    about = "Notify New Relic about app deployments",
    long_about = None,
    after_help = "\
Exactly one of --app-name or --application-id is required.

Environment:
  NEWRELIC_API_ENDPOINT          API base URL (default https://api.newrelic.com)
  NEWRELIC_HTTP_TIMEOUT_SECS     timeout per HTTP call (default 30)
  NEWRELIC_DEPLOYMENT_LOG_LEVEL  log level when RUST_LOG is unset (default info)
"
)]
struct Cli {
    /// JSON args file written by the host; replaces all parameter flags
    #[arg(
        value_name = "ARGS_FILE",
        conflicts_with_all = [
            "token",
            "app_name",
            "application_id",
            "changelog",
            "description",
            "revision",
            "user",
            "appname",
            "environment",
            "validate_certs",
            "check",
        ]
    )]
    args_file: Option<PathBuf>,

    /// API key, sent in the X-Api-Key header
    #[arg(long)]
    token: Option<String>,

    /// Application name as configured in newrelic.yml
    #[arg(long)]
    app_name: Option<String>,

    /// Application id, found in the URL when viewing the application
    #[arg(long)]
    application_id: Option<String>,

    /// List of changes for this deployment
    #[arg(long)]
    changelog: Option<String>,

    /// Text annotation for the deployment
    #[arg(long)]
    description: Option<String>,

    /// Revision number (e.g. git commit SHA)
    #[arg(long)]
    revision: Option<String>,

    /// Name of the user or process that triggered this deployment
    #[arg(long)]
    user: Option<String>,

    /// Name of the application (accepted, not sent)
    #[arg(long)]
    appname: Option<String>,

    /// Environment of this deployment (accepted, not sent)
    #[arg(long)]
    environment: Option<String>,

    /// Validate TLS certificates (yes/no, true/false, on/off, 1/0)
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        value_name = "BOOL",
        value_parser = parse_host_bool
    )]
    validate_certs: bool,

    /// Resolve the application but do not record the deployment
    #[arg(long)]
    check: bool,

    /// Timeout per HTTP call in seconds (overrides NEWRELIC_HTTP_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

/// Accept the same boolean spellings as the args file
fn parse_host_bool(value: &str) -> Result<bool, String> {
    parse_bool(value).ok_or_else(|| format!("'{value}' is not a valid boolean (use yes/no)"))
}

impl Cli {
    fn into_invocation(self) -> Result<ModuleInvocation, newrelic_deployment::NotifyError> {
        if let Some(path) = self.args_file {
            debug!("Reading module arguments from {}", path.display());
            return module::load_args(&path);
        }

        Ok(ModuleInvocation {
            params: DeploymentParams {
                token: self.token,
                app_name: self.app_name,
                application_id: self.application_id,
                changelog: self.changelog,
                description: self.description,
                revision: self.revision,
                user: self.user,
                appname: self.appname,
                environment: self.environment,
                validate_certs: Some(self.validate_certs),
            },
            mode: if self.check {
                RunMode::CheckOnly
            } else {
                RunMode::Apply
            },
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = NotifierConfig::from_env();
    if let Some(timeout) = cli.timeout_secs {
        config.http_timeout_secs = timeout;
    }

    if let Err(e) = observability::init_tracing(&config) {
        eprintln!("{e:#}");
    }

    // Configure rustls crypto provider before any TLS connection is made
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let result = match cli.into_invocation() {
        Ok(invocation) => {
            info!("Notifying New Relic via {}", config.api_endpoint);
            module::run(invocation, |request| {
                NewRelicREST::new(&config, request.validate_certs())
            })
            .await
        }
        Err(e) => ModuleResult::failure(e.to_string()),
    };

    println!("{}", result.to_json());

    if result.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
