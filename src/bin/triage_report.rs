use anyhow::Result;
use clap::Parser;

use triagetui::backend::{ClassifierClient, TriageBackend};
use triagetui::config::Config;
use triagetui::triage::{normalize_response, sample_tickets, Ticket, View};
use triagetui::ui::{priority_tag, truncate};

/// Fetch the ticket feed once and print a view's queue plus the dashboard
#[derive(Parser, Debug)]
#[command(name = "triage_report")]
struct Args {
    /// View key: "dashboard", "all_inbox", or a department id
    #[arg(long, default_value = "all_inbox")]
    view: String,

    /// Config file (default: ~/.config/triagetui/config.toml)
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref());
    let client = ClassifierClient::new(&config.backend)?;

    let tickets: Vec<Ticket> = match client.fetch_tickets() {
        Ok(body) => normalize_response(body),
        Err(e) => {
            println!("Backend unavailable ({}), using sample tickets\n", e);
            sample_tickets()
        }
    };

    let views = config.view_controller();
    let view = View::from_key(&args.view);

    if view != View::Dashboard {
        let resolved = views.resolve(&view, &tickets, None);
        println!("{} ({} tickets)", views.label(&view), resolved.tickets.len());
        for t in &resolved.tickets {
            println!(
                "  {} {} {:18} {}",
                priority_tag(&t.priority),
                truncate(&t.date_display(), 12),
                truncate(&t.sender, 18),
                truncate(&t.subject, 50).trim_end(),
            );
        }
        let unrouted = views.router().unrouted(&tickets);
        if !unrouted.is_empty() {
            println!("\n{} tickets match no department", unrouted.len());
        }
        println!();
    }

    let stats = views.dashboard(&tickets);
    println!(
        "Total: {}  Urgent: {}  Negative: {}",
        stats.total, stats.urgent, stats.negative
    );
    for entry in &stats.categories {
        println!("  {:16} {}", entry.category.as_str(), entry.count);
    }

    Ok(())
}
