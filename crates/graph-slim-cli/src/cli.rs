//! CLI argument definitions and the fetch command.

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

use graph_slim::GraphClient;

use crate::output;

/// Fetch a Microsoft Graph resource, following pagination.
///
/// Credentials are read from AZURE_TENANT_ID, AZURE_CLIENT_ID, and
/// AZURE_CLIENT_SECRET.
#[derive(Parser, Debug)]
#[command(name = "graph-get")]
#[command(author, version, about)]
pub struct Cli {
    /// Resource path to fetch (e.g. /users or /me)
    #[arg(default_value = "/me", value_parser = NonEmptyStringValueParser::new())]
    pub path: String,

    /// Graph API version (v1.0 or beta)
    #[arg(long, default_value = "v1.0")]
    pub api_version: String,

    /// Additional query parameter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    let params = parse_params(&cli.params)?;
    let client = GraphClient::from_env().context("Failed to resolve credentials")?;

    let query: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    match client.get(&cli.path, &query, &cli.api_version).await {
        Ok(resources) => {
            if cli.pretty {
                output::json_pretty(&resources)?;
            } else {
                output::json(&resources)?;
            }
            Ok(())
        }
        Err(err) => {
            output::error(&err.to_string());
            if let Some(last) = client.last_response().await {
                eprintln!("{}", serde_json::to_string_pretty(&last.body)?);
            }
            std::process::exit(1);
        }
    }
}

fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => bail!("invalid --param '{}': expected KEY=VALUE", entry),
        })
        .collect()
}
