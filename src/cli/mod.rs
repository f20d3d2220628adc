pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "cashcard")]
#[command(about = "Cash card CLI - command-line client for the cash card API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "CASHCARD_URL", default_value = "http://localhost:8080", help = "API base URL")]
    pub url: String,

    #[arg(long, short = 'u', global = true, env = "CASHCARD_USER", help = "Username for Basic auth")]
    pub user: Option<String>,

    #[arg(long, short = 'p', global = true, env = "CASHCARD_PASSWORD", hide_env_values = true, help = "Password for Basic auth")]
    pub password: Option<String>,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List a page of your cash cards")]
    List {
        #[arg(long, help = "Zero-based page number")]
        page: Option<u32>,
        #[arg(long, help = "Page size")]
        size: Option<u32>,
        #[arg(long, help = "Sort order such as amount,desc (repeatable)")]
        sort: Vec<String>,
    },

    #[command(about = "Show one cash card")]
    Get {
        #[arg(help = "Cash card ID")]
        id: i64,
    },

    #[command(about = "Create a cash card")]
    Create {
        #[arg(help = "Amount, e.g. 250.00")]
        amount: Decimal,
    },

    #[command(about = "Change the amount of a cash card")]
    Update {
        #[arg(help = "Cash card ID")]
        id: i64,
        #[arg(help = "New amount")]
        amount: Decimal,
    },

    #[command(about = "Delete a cash card")]
    Delete {
        #[arg(help = "Cash card ID")]
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// `--text` wins over `--json`; text is the default
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let user = cli
        .user
        .ok_or_else(|| anyhow::anyhow!("No user given (use --user or CASHCARD_USER)"))?;
    let client = client::CashCardClient::new(cli.url, user, cli.password);

    commands::cards::handle(&client, cli.command, output_format).await
}
