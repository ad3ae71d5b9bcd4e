//! metalinv CLI
//!
//! Ansible dynamic inventory for the Metal Enrollment API. Queries the
//! enrollment server and prints a grouping document on stdout; all
//! diagnostics go to stderr so Ansible sees nothing but JSON.

use clap::{CommandFactory, Parser};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;
use metalinv_client::HttpClient;
use metalinv_inventory::InventoryBuilder;

#[derive(Parser)]
#[command(name = "metalinv")]
#[command(about = "Ansible dynamic inventory for the Metal Enrollment API", long_about = None)]
struct Cli {
    /// List all hosts grouped by status and custom group
    #[arg(long)]
    list: bool,

    /// Get variables for a specific host
    #[arg(long, value_name = "HOSTNAME", conflicts_with = "list")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // stdout is reserved for inventory JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    tracing::debug!(api_url = %config.api_url, "configured");

    let mut client = HttpClient::new(&config.api_url)
        .wrap_err_with(|| format!("invalid enrollment API URL: {}", config.api_url))?;
    if let Some(token) = &config.token {
        client = client.with_token(token);
    }
    let builder = InventoryBuilder::new(client);

    if cli.list {
        let document = builder.build().await?;
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else if let Some(hostname) = cli.host {
        let rendered = match builder.host_vars(&hostname).await? {
            Some(vars) => serde_json::to_string_pretty(&vars)?,
            None => "{}".to_string(),
        };
        println!("{rendered}");
    } else {
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    Ok(())
}
