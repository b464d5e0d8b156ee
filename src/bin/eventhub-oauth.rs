use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use eventhub_oauth::config::loader;
use eventhub_oauth::config::settings::ServiceConfig;
use eventhub_oauth::helpers::jwt::decode_claims;
use eventhub_oauth::kafka::client_properties;
use eventhub_oauth::utils::logging::{self, LogLevel};
use eventhub_oauth::{EventHubsTokenProvider, ProviderOptions, TokenOutcome};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional YAML config file
    #[arg(short, long, env = "CONFIG")]
    config: Option<String>,
    /// Event Hubs namespace, overrides the config file and EVENTHUB_NAMESPACE
    #[arg(short, long)]
    namespace: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the Kafka bootstrap brokers of the namespace
    Brokers,
    /// Print the Kafka client properties for SASL OAUTHBEARER
    Properties {
        #[arg(long)]
        json: bool,
    },
    /// Request one bearer token through the Azure credential chain
    Token {
        /// Print the raw token instead of a redacted one
        #[arg(long)]
        show: bool,
        /// Print the decoded (unverified) JWT claims
        #[arg(long)]
        claims: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load optional YAML config, start logging
    // -------------------------------

    let args = Args::parse();
    let service_config = match &args.config {
        Some(path) => loader::file_to_config(Path::new(path)).await?,
        None => ServiceConfig::default(),
    };
    logging::run(service_config.logging.as_ref(), args.log_level);

    // -------------------------------
    // 2. Build the provider: --namespace, config file, EVENTHUB_NAMESPACE
    // -------------------------------

    let namespace = service_config.explicit_namespace(args.namespace.as_deref());
    let mut options = ProviderOptions::new();
    if let Some(namespace) = namespace {
        options = options.with_namespace(namespace);
    }
    let provider = EventHubsTokenProvider::new(options)?;
    info!(namespace = %provider.namespace(), "provider ready");

    // -------------------------------
    // 3. Run the command
    // -------------------------------

    match args.command {
        Command::Brokers => {
            for broker in provider.brokers() {
                println!("{broker}");
            }
        }
        Command::Properties { json } => {
            let props = client_properties(&provider);
            if json {
                println!("{}", serde_json::to_string_pretty(&props)?);
            } else {
                for (key, value) in props {
                    println!("{key}={value}");
                }
            }
        }
        Command::Token { show, claims } => {
            let token = match provider.get_bearer_token().await? {
                TokenOutcome::Issued(token) => token,
                TokenOutcome::Handled => return Err(anyhow!("token request was not completed")),
            };

            println!("scope: {}", provider.token_scope());
            match token.expires_at {
                Some(at) => println!("expires_at: {}", at.to_rfc3339()),
                None => println!("expires_at: unknown"),
            }
            println!("token: {}", if show { token.value.clone() } else { redact(&token.value) });

            if claims {
                match decode_claims(&token.value) {
                    Ok(claims) => println!("claims: {}", serde_json::to_string_pretty(&claims)?),
                    Err(e) => warn!(error = %e, "token is not a decodable JWT"),
                }
            }
        }
    }

    Ok(())
}

fn redact(token: &str) -> String {
    let visible: String = token.chars().take(8).collect();
    format!("{visible}... ({} chars)", token.chars().count())
}
