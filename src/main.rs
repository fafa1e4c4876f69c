use anyhow::{Context, Result};
use clap::Parser;
use rcollect::{init_tracing_once, Credentials, RedditClient, RunPlan, TracingReporter};
use std::path::PathBuf;

const DEFAULT_SUBREDDITS: [&str; 3] = ["technology", "programming", "datascience"];

/// Collect Reddit posts (hot + keyword search), dedup, and export to CSV.
#[derive(Debug, Parser)]
#[command(name = "rcollect", version, about)]
struct Args {
    /// dotenv file with REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET, REDDIT_USER_AGENT
    #[arg(long, default_value = ".env", env = "RCOLLECT_ENV_FILE")]
    env_file: PathBuf,

    /// Subreddit to collect from (repeatable). Defaults to a small built-in list.
    #[arg(long = "subreddit", short = 's')]
    subreddits: Vec<String>,

    /// Keyword search query (repeatable), run once per query across all subreddits.
    #[arg(long = "query", short = 'q')]
    queries: Vec<String>,

    /// Posts per subreddit for each pass.
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Seconds to pause after each subreddit.
    #[arg(long, default_value_t = 0.0)]
    pause: f64,

    /// Skip the hot listing pass.
    #[arg(long)]
    no_hot: bool,

    #[arg(long, short = 'o', default_value = "reddit_data.csv")]
    out: PathBuf,

    /// Also harvest comments of exported posts into this CSV.
    #[arg(long)]
    comments_out: Option<PathBuf>,

    #[arg(long, default_value_t = 20)]
    max_comments: usize,

    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing_once();

    let creds = Credentials::from_env_file(&args.env_file)?;
    let client = RedditClient::connect(&creds).context("authenticate with Reddit")?;

    let subreddits = if args.subreddits.is_empty() {
        DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect()
    } else {
        args.subreddits
    };

    let mut plan = RunPlan::new(&args.out)
        .subreddits(subreddits)
        .queries(args.queries)
        .limit_per_sub(args.limit)
        .pause_seconds(args.pause)
        .max_comments_per_post(args.max_comments)
        .progress(!args.no_progress)
        .hot(!args.no_hot);
    if let Some(path) = &args.comments_out {
        plan = plan.comments_out(path);
    }

    let summary = plan.run(&client, &TracingReporter)?;
    println!("Wrote {} posts to {}", summary.posts_written, args.out.display());
    Ok(())
}
