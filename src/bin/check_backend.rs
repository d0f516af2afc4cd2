use anyhow::{Context, Result};
use clap::Parser;

use triagetui::backend::ClassifierClient;
use triagetui::config::Config;

/// Check the classifier is reachable, optionally classifying one email
#[derive(Parser, Debug)]
#[command(name = "check_backend")]
struct Args {
    /// Raw email file to classify
    #[arg(long)]
    classify: Option<String>,

    /// Model provider for --classify (default from config)
    #[arg(long)]
    provider: Option<String>,

    /// Also trigger a fetch-and-classify run
    #[arg(long)]
    fetch: bool,

    /// Config file (default: ~/.config/triagetui/config.toml)
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref());
    let client = ClassifierClient::new(&config.backend)?;

    println!("Health: {}", config.backend.health_url);
    let health = client.health_check().context("health check failed")?;
    println!(
        "  {} {}",
        health.status.as_deref().unwrap_or("ok"),
        health.message.as_deref().unwrap_or("")
    );

    if args.fetch {
        let resp = client.fetch_and_classify().context("fetch-classify failed")?;
        println!(
            "Fetch-classify: {}",
            resp.message.as_deref().unwrap_or("done")
        );
    }

    if let Some(path) = args.classify {
        let path = shellexpand::tilde(&path).into_owned();
        let email = std::fs::read_to_string(&path)
            .with_context(|| format!("could not read {}", path))?;
        let resp = client
            .classify_email(&email, args.provider.as_deref())
            .context("classification failed")?;
        println!("Classification:");
        println!("{}", serde_json::to_string_pretty(&resp.rest)?);
    }

    Ok(())
}
