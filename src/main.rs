use std::path::PathBuf;

use anyhow::{Context, Error};
use clap::Parser;
use clap_stdin::MaybeStdin;
use sbi_trust::config::TrustServiceConfig;
use sbi_trust::trust::{HttpTrustServiceClient, TrustServiceClient};
use sbi_trust::{ValidationRequest, ValidationResult, Validator, ValidatorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Validate the signatures and certificate trust of one SBI response.
    Validate {
        /// Validation request JSON (`methodName`, `methodResponse`, `extraInfoJson`), or `-` for stdin.
        request: MaybeStdin<String>,
        /// Validator config JSON file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the Trust Service URL of the config.
        #[arg(long)]
        trust_url: Option<String>,
    },
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().action {
        Action::Validate {
            request,
            config,
            trust_url,
        } => {
            let config = load_config(config, trust_url)?;
            let client = trust_client(&config.trust_service)?;
            let result = validate(&request, config, client)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>, trust_url: Option<String>) -> Result<ValidatorConfig, Error> {
    let mut config = match path {
        Some(path) => ValidatorConfig::from_path(path)?,
        None => ValidatorConfig::default(),
    };
    if let Some(url) = trust_url {
        config.trust_service.url = url;
    }
    Ok(config)
}

#[cfg(feature = "reqwest")]
fn trust_client(
    config: &TrustServiceConfig,
) -> Result<HttpTrustServiceClient<sbi_trust::trust::ReqwestClient>, Error> {
    let http = sbi_trust::trust::ReqwestClient::with_timeout(config.timeout)?;
    Ok(HttpTrustServiceClient::new(http, config))
}

#[cfg(not(feature = "reqwest"))]
fn trust_client(config: &TrustServiceConfig) -> Result<HttpTrustServiceClient<()>, Error> {
    tracing::warn!("built without the `reqwest` feature, every trust check will fail");
    Ok(HttpTrustServiceClient::new((), config))
}

fn validate<C: TrustServiceClient>(
    request: &str,
    config: ValidatorConfig,
    client: C,
) -> Result<ValidationResult, Error> {
    let request: ValidationRequest =
        serde_json::from_str(request).context("could not parse validation request")?;
    Ok(Validator::new(config, client).validate(&request))
}
