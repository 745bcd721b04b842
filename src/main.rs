//! authbridge CLI entry point

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use anyhow::{Context, Result};
use authbridge::channel::{serve, MethodCall, MethodResult};
use authbridge::platform::{parse_browser_url, AppIdentifierProvider, BrowserPresenter};
use authbridge::config::Config;
use authbridge::ui;

#[derive(Parser)]
#[command(name = "authbridge")]
#[command(about = "Native bridge for browser-based OAuth2 with PKCE")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration to ~/.authbridge/config.json
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Generate a PKCE parameter set and print it as JSON
    Parameters {
        /// Print labelled fields instead of JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Open a URL in the browser
    Open {
        /// URL of the authentication page
        url: String,
    },

    /// Print the application bundle identifier
    BundleId,

    /// Invoke a single method on the channel
    Call {
        /// Method name (parameters, openUrl, bundleIdentifier)
        method: String,

        /// JSON arguments
        #[arg(short, long)]
        args: Option<String>,
    },

    /// Serve method calls as JSON lines on stdin/stdout
    Serve,
}

impl Commands {
    /// Whether the subcommand reads ~/.authbridge/config.json
    fn uses_config(&self) -> bool {
        matches!(
            self,
            Commands::Open { .. } | Commands::BundleId | Commands::Call { .. } | Commands::Serve
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for replies
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = if cli.command.uses_config() {
        authbridge::config::load()?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Init { force } => {
            let path = authbridge::config::init(force)?;
            ui::print_success(&format!("Wrote default configuration to {:?}", path));
        }

        Commands::Parameters { pretty } => {
            let params = authbridge::generate_parameters()?;
            if pretty {
                ui::print_field("verifier", &params.verifier);
                ui::print_field("code_challenge", &params.code_challenge);
                ui::print_field("code_challenge_method", params.code_challenge_method.as_str());
                ui::print_field("state", &params.state);
            } else {
                println!("{}", serde_json::to_string_pretty(&params)?);
            }
        }

        Commands::Open { url } => {
            let url = parse_browser_url(&url)?;
            ui::print_step(&format!("Opening {}", url));
            config.browser().present(&url)?;
            ui::print_success("Browser opened");
        }

        Commands::BundleId => {
            println!("{}", config.identity().bundle_identifier()?);
        }

        Commands::Call { method, args } => {
            let arguments = match args {
                Some(raw) => serde_json::from_str(&raw).context("--args must be valid JSON")?,
                None => serde_json::Value::Null,
            };
            let channel = config.method_channel();
            let method_name = method.clone();
            let result = channel.invoke(&MethodCall::new(method, arguments));
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.is_success() {
                match &result {
                    MethodResult::Error { message, .. } => ui::print_error(message),
                    _ => ui::print_error(&format!("Method not implemented: {}", method_name)),
                }
                std::process::exit(1);
            }
        }

        Commands::Serve => {
            let channel = config.method_channel();
            ui::print_header(channel.name());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve(&channel, stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}
