use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use statusboard_core::{badges, StatusSnapshot};

#[derive(Parser, Debug)]
#[command(name = "statusboardctl", about = "Query a running statusboard daemon")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Fetch the current status snapshot.
    Status {
        #[arg(long, env = "STATUSBOARD_URL", default_value = "http://127.0.0.1:8080")]
        daemon: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check that the daemon is up.
    Health {
        #[arg(long, env = "STATUSBOARD_URL", default_value = "http://127.0.0.1:8080")]
        daemon: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();

    match args.cmd {
        Cmd::Status { daemon, format } => {
            let url = format!("{}/api/app-status", daemon.trim_end_matches('/'));
            let snapshot: StatusSnapshot = client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("request {url}"))?
                .error_for_status()
                .context("status endpoint")?
                .json()
                .await
                .context("decode status snapshot")?;

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                Format::Text => {
                    for badge in badges(&snapshot) {
                        println!("{badge}");
                    }
                }
            }
        }
        Cmd::Health { daemon } => {
            let url = format!("{}/healthz", daemon.trim_end_matches('/'));
            let body = client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("request {url}"))?
                .error_for_status()?
                .text()
                .await?;
            println!("{body}");
        }
    }

    Ok(())
}
