use boundedbuf::BoundedBuffer;
use clap::Parser;
use eyre::{Context, Result};
use handoff::config::RunConfig;
use handoff::worker::{Consumer, Producer};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

static LONG_VERSION: OnceLock<String> = OnceLock::new();

fn get_long_version() -> &'static str {
    LONG_VERSION.get_or_init(|| {
        format!(
            "{} (commit: {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_REVISION", "unknown")
        )
    })
}

#[derive(Parser)]
#[command(name = "handoff")]
#[command(about = "bounded buffer producer/consumer driver")]
#[command(version = None, long_version = get_long_version())]
struct Args {
    #[arg(short, long, help = "configuration file path (toml format)")]
    config: Option<String>,

    #[arg(long, help = "buffer capacity, overrides the config file")]
    capacity: Option<usize>,

    #[arg(long, help = "number of items to produce and consume")]
    items: Option<u64>,

    #[arg(long, help = "produced values are drawn from [0, bound)")]
    value_bound: Option<i32>,

    #[arg(
        long,
        value_parser = humantime::parse_duration,
        help = "delay between items (e.g. 5ms, 1s)"
    )]
    pace: Option<Duration>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let base = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load config path={}", path))?,
        None => RunConfig::default(),
    };

    let config = RunConfig::builder(
        args.capacity.unwrap_or(base.capacity()),
        args.items.unwrap_or(base.items()),
    )
    .value_bound(args.value_bound.unwrap_or(base.value_bound()))
    .build();

    eyre::ensure!(config.value_bound() > 0, "value bound must be positive");

    info!(
        capacity = config.capacity(),
        items = config.items(),
        value_bound = config.value_bound(),
        "starting run"
    );

    let buffer = Arc::new(BoundedBuffer::new(config.capacity())?);

    let ctrlc_buffer = buffer.clone();
    ctrlc::set_handler(move || {
        warn!("received ctrl+c, cancelling run");
        ctrlc_buffer.close();
    })?;

    let items = config.items();

    let producer = Producer::new(buffer.clone(), config.value_bound(), args.pace);
    let producer_handle = thread::Builder::new()
        .name("producer".to_string())
        .spawn(move || producer.run(items))?;

    let consumer = Consumer::new(buffer.clone(), args.pace);
    let consumer_handle = thread::Builder::new()
        .name("consumer".to_string())
        .spawn(move || consumer.run(items))?;

    let produced = producer_handle
        .join()
        .map_err(|_| eyre::eyre!("producer thread panicked"))?;
    let consumed = consumer_handle
        .join()
        .map_err(|_| eyre::eyre!("consumer thread panicked"))?;

    match (produced, consumed) {
        (Ok(produced), Ok(consumed)) => {
            eyre::ensure!(
                produced == consumed,
                "consumed sequence diverged from produced sequence"
            );
            info!(
                produced = produced.len(),
                consumed = consumed.len(),
                final_len = buffer.len(),
                "run complete"
            );
        }
        (produced, consumed) => {
            warn!(
                produced_ok = produced.is_ok(),
                consumed_ok = consumed.is_ok(),
                final_len = buffer.len(),
                "run cancelled before completion"
            );
        }
    }

    Ok(())
}
