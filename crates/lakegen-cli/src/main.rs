use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "lakegen")]
#[command(about = "Test data volume generator for object storage", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one generation batch directly
    Generate {
        /// Source container to read the listing from
        #[arg(short, long)]
        src_bucket: String,

        /// Destination container to copy generated objects into
        #[arg(short, long)]
        dest_bucket: String,

        /// Number of objects to generate
        #[arg(short, long, default_value_t = 10)]
        num_files: usize,

        /// Size class label recorded with the batch
        #[arg(long, default_value = "M")]
        size_class: String,

        /// Storage backend URL (s3://, file:///path, memory://)
        #[arg(long, default_value = "s3://")]
        storage: String,

        /// Number of concurrent copy workers (default: number of CPUs)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Receive and process at most one queued work request
    Consume {
        /// SQS queue URL to receive work requests from
        #[arg(short, long)]
        queue_url: String,

        /// Storage backend URL (s3://, file:///path, memory://)
        #[arg(long, default_value = "s3://")]
        storage: String,

        /// Number of concurrent copy workers (default: number of CPUs)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Long-poll wait time for the receive, in seconds
        #[arg(long, default_value_t = 10)]
        wait_secs: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    // Priority: RUST_LOG env var > verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Generate {
            src_bucket,
            dest_bucket,
            num_files,
            size_class,
            storage,
            workers,
        } => {
            commands::generate::run(
                &src_bucket,
                &dest_bucket,
                num_files,
                &size_class,
                &storage,
                workers,
            )
            .await?;
        }
        Commands::Consume {
            queue_url,
            storage,
            workers,
            wait_secs,
        } => {
            commands::consume::run(&queue_url, &storage, workers, wait_secs).await?;
        }
    }

    Ok(())
}
