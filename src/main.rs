//! Wordcrawl main entry point
//!
//! Crawls a single site and prints the most frequent words found across it.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;
use wordcrawl::config::{self, EngineConfig};
use wordcrawl::engine::{cancel_pair, CancelHandle, CrawlEngine};
use wordcrawl::processor::HttpPageProcessor;
use wordcrawl::report::print_report;

/// Wordcrawl: a host-scoped word-frequency crawler
///
/// Crawls the seed URL's site, staying on its host, and reports the most
/// frequent words of at least the configured length once the whole site has
/// been visited. Ctrl-C interrupts the crawl and reports partial results.
#[derive(Parser, Debug)]
#[command(name = "wordcrawl")]
#[command(version)]
#[command(about = "Find the most frequent words on a web site", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Number of parallel workers
    #[arg(short, long, default_value_t = 5)]
    concurrency: usize,

    /// Minimum word length to track
    #[arg(long = "min-len", default_value_t = 10)]
    min_len: usize,

    /// Show the top 'this many' words
    #[arg(long = "tot-words", default_value_t = 10)]
    tot_words: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Usage problems exit with code 1, not clap's default 2.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    });

    setup_logging(cli.verbose, cli.quiet);

    let config = EngineConfig {
        concurrency: cli.concurrency,
        min_word_len: cli.min_len,
        top_words: cli.tot_words,
    };
    config::validate(&config)?;

    let seed = match Url::parse(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("The url '{}' is not syntactically valid: {}", cli.url, e);
            std::process::exit(1);
        }
    };

    let processor = HttpPageProcessor::new(&config, &seed)
        .context("failed to initialize the page processor")?;

    let (cancel_handle, cancel_signal) = cancel_pair();
    spawn_signal_listener(cancel_handle);

    tracing::info!("Beginning run, type Ctrl-C to interrupt");

    let top_words = config.top_words;
    let engine = CrawlEngine::new(config, processor);
    let report = engine.run(&seed, cancel_signal).await;

    tracing::info!(
        "Crawl finished: {} pages visited, {} failures",
        report.pages_visited(),
        report.failures().len()
    );

    print_report(&report, top_words);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordcrawl=info,warn"),
            1 => EnvFilter::new("wordcrawl=debug,info"),
            2 => EnvFilter::new("wordcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Flips the cancellation flag on SIGINT or SIGTERM
fn spawn_signal_listener(handle: CancelHandle) {
    tokio::spawn(async move {
        let terminate = async {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{signal, SignalKind};
                match signal(SignalKind::terminate()) {
                    Ok(mut sig) => {
                        sig.recv().await;
                    }
                    Err(e) => {
                        tracing::error!("failed to install SIGTERM handler: {}", e);
                        std::future::pending::<()>().await;
                    }
                }
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("failed to listen for Ctrl-C: {}", e);
                    return;
                }
                tracing::info!("SIGINT received");
            }
            _ = terminate => {
                tracing::info!("SIGTERM received");
            }
        }

        handle.cancel();
    });
}
