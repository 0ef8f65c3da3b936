use clap::{Parser, Subcommand};
use std::sync::Arc;

use wikifetch::api::create_router;
use wikifetch::config::CONFIG;
use wikifetch::data_models::SearchResult;
use wikifetch::gateway::{GatewayConfig, WikipediaGateway};
use wikifetch::query_engine::QueryEngine;

#[derive(Parser, Debug)]
#[command(name = "wikifetch", about = "Look up Wikipedia articles from the command line or over HTTP")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the search page and JSON API
    Serve {
        /// Address to listen on (defaults to BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Resolve one query and print the result
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber (handles both tracing and log crate)
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .init();

    let gateway = WikipediaGateway::new(GatewayConfig::from(&*CONFIG))?;
    let query_engine = Arc::new(QueryEngine::new(Arc::new(gateway)));

    match cli.command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("listening on http://{}", listener.local_addr()?);
            axum::serve(listener, create_router(query_engine)).await?;
        }
        Command::Search { query } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("Please enter a search term.");
            }
            match query_engine.resolve(&query).await {
                SearchResult::Success {
                    article,
                    suggestions,
                } => {
                    println!("{}\n{}\n\n{}", article.title, article.link, article.summary);
                    if !suggestions.is_empty() {
                        println!("\nSee also:");
                        for title in suggestions {
                            println!("  - {title}");
                        }
                    }
                }
                SearchResult::Failure { message } => anyhow::bail!(message),
            }
        }
    }
    Ok(())
}
