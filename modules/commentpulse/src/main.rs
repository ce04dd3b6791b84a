use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commentpulse::export::write_csv_file;
use commentpulse::summary::{per_video_counts, top_words, unique_texts, LabelCounts};
use commentpulse::{
    BatchReport, BatchRunner, IngestOptions, Ingestor, ResultCache, RetryPolicy, VaderScorer,
};
use commentpulse_common::{Config, SentimentLabel};
use youtube_client::YouTubeClient;

/// Videos tracked when no inputs are given on the command line.
const DEFAULT_INPUTS: &[&str] = &[
    "https://youtu.be/Ugfjq0rDz8g?si=vWNO6nEAj9XB2LOB",
    "https://youtu.be/Lr1OHmBpwjw?si=9Mvu8o69V8Zt40yn",
    "https://youtu.be/5BFIAHBBdao?si=LPNB-8ZtJIk3xZVu",
    "https://youtu.be/UzAgIMvb3c0?si=fH01vTOsKuUb8IoF",
    "https://youtu.be/6tAZ-3FSYr0?si=rKhlEpS3oO7BOOtR",
    "https://youtu.be/M-Qsvh18JNM?si=JJZ2-RKikuexaNw5",
    "https://youtu.be/vSbe5C7BTuM?si=2MPkRB08C3P9Vilt",
    "https://youtu.be/Y7hcBMJDNwk?si=rI0-dsunElb5XMVl",
    "https://youtu.be/iySgErYzRR0?si=05mihs5jDRDXYgSZ",
    "https://youtu.be/gwEt2_yxTmc?si=rfBwVGhePy35YA5D",
    "https://youtu.be/9RCbgFi1idc?si=x7ILIEMAow5geJWS",
    "https://youtu.be/ZgkVHrihbXM?si=k8OittX6RL_gcgrd",
    "https://youtu.be/xvHiRY7skIk?si=nzAUYB71fQpLD2lv",
];

#[derive(Parser)]
#[command(name = "commentpulse")]
#[command(about = "Fetch YouTube comments and classify their sentiment")]
#[command(version)]
struct Cli {
    /// Video ids or URLs (watch, youtu.be, shorts, embed, live)
    inputs: Vec<String>,

    /// Max comments per video (overrides COMMENT_CAP)
    #[arg(long)]
    cap: Option<usize>,

    /// Write the classified comments to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the N most frequent words
    #[arg(long, default_value_t = 0)]
    top_words: usize,

    /// Re-run every REFRESH_INTERVAL_SECS until interrupted
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("commentpulse=info".parse()?))
        .init();

    let cli = Cli::parse();

    info!("Comment Pulse starting...");

    let config = Config::from_env()?;
    config.log_redacted();

    let inputs: Vec<String> = if cli.inputs.is_empty() {
        DEFAULT_INPUTS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.inputs.clone()
    };
    let cap = cli.cap.unwrap_or(config.comment_cap);

    let client = YouTubeClient::new(config.youtube_api_key.clone())
        .with_base_url(config.youtube_api_base_url.clone())
        .with_timeout(config.request_timeout);
    let ingestor = Ingestor::new(Arc::new(client), Arc::new(VaderScorer::new())).with_options(
        IngestOptions {
            page_size: config.page_size,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                base_delay: config.retry_base_delay,
            },
        },
    );
    let runner = BatchRunner::new(ingestor, ResultCache::new(config.cache_ttl), cap);

    loop {
        let report = runner.run(inputs.as_slice()).await;
        print_report(&report, cli.top_words);

        if let Some(path) = &cli.csv {
            write_csv_file(&report.table, path)?;
            info!(path = %path.display(), rows = report.table.len(), "CSV written");
        }

        if !cli.watch {
            break;
        }

        info!(
            every_secs = config.refresh_interval.as_secs(),
            "Waiting for next refresh (Ctrl-C to stop)"
        );
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, exiting");
                break;
            }
            _ = tokio::time::sleep(config.refresh_interval) => {}
        }
    }

    Ok(())
}

fn print_report(report: &BatchReport, top_n: usize) {
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    if report.is_empty() {
        println!("\nNo comments found (check the video ids or the API key).");
        return;
    }

    let table = &report.table;
    let counts = LabelCounts::from_table(table);

    println!("\n=== Comments per video ===");
    for (i, (video_id, count)) in per_video_counts(table).iter().enumerate() {
        println!("Video {:<3} {video_id}  {count:>5}", i + 1);
    }

    println!("\n=== Overall ===");
    println!("Total comments:    {}", table.len());
    println!("Distinct comments: {}", unique_texts(table));

    println!("\n=== Sentiment ===");
    for label in SentimentLabel::ALL {
        println!(
            "{:<9} {:>6}  {:>5.1}%",
            label.as_str(),
            counts.get(label),
            counts.percent(label)
        );
    }

    if top_n > 0 {
        println!("\n=== Top words ===");
        for (word, count) in top_words(table, top_n) {
            println!("{word:<20} {count:>5}");
        }
    }
}
