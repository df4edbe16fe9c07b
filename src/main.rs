//! PredictIt arbitrage scanner entry point.

use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use rand::Rng;
use time::OffsetDateTime;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use predictit_scanner::analysis::{evaluate_snapshot, rank_results, AnalysisBatch, RankField};
use predictit_scanner::config::Config;
use predictit_scanner::market::PredictItClient;
use predictit_scanner::metrics;
use predictit_scanner::report;

/// PredictIt arbitrage scanner.
#[derive(Parser, Debug)]
#[command(name = "predictit-scanner")]
#[command(about = "Scans PredictIt markets for arbitrage and +EV opportunities")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Override the rank field (expected_profit or guaranteed_profit).
    #[arg(long)]
    sort: Option<RankField>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the polling loop (default).
    Run {
        /// Override the rank field.
        #[arg(long)]
        sort: Option<RankField>,
    },

    /// Fetch and evaluate one snapshot, then exit.
    Scan {
        /// Override the rank field.
        #[arg(long)]
        sort: Option<RankField>,

        /// Emit the classified batch as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("predictit_scanner=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Scan { sort, json }) => cmd_scan(sort, json).await,
        Some(Command::Run { sort }) => cmd_run(sort).await,
        None => cmd_run(args.sort).await,
    }
}

/// Load and validate configuration, applying the CLI sort override.
fn load_config(sort_override: Option<RankField>) -> anyhow::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(sort) = sort_override {
        config.sort_field = sort;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PREDICTIT SCANNER - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  API URL: {}", config.predictit_api_url);
    println!("  Maxed Markets: {:?}", config.maxed_market_ids);
    println!("  Annual Return Rate: {}", config.annual_return_rate);
    println!("  Alert Threshold: {}", config.alert_threshold);
    println!("  Sort Field: {}", config.sort_field);
    println!("  Poll Interval: {}s (+0..{}s jitter)", config.poll_interval_secs, config.poll_jitter_secs);
    println!("  Metrics: {}", if config.metrics_enabled {
        format!("enabled on port {}", config.metrics_port)
    } else {
        "disabled".to_string()
    });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch and evaluate one snapshot.
async fn run_cycle(client: &PredictItClient, config: &Config) -> anyhow::Result<AnalysisBatch> {
    let fetch_start = Instant::now();
    let snapshot = client.fetch_snapshot().await?;
    metrics::record_fetch_latency(fetch_start);

    let as_of = OffsetDateTime::now_utc().date();
    let mut batch = evaluate_snapshot(&snapshot, config, as_of);
    rank_results(&mut batch.results, config.sort_field);
    metrics::record_markets_flagged(batch.results.len());

    Ok(batch)
}

/// Run one cycle and print the report.
async fn cmd_scan(sort: Option<RankField>, json: bool) -> anyhow::Result<()> {
    let config = load_config(sort)?;
    let client = PredictItClient::new(&config);

    let batch = run_cycle(&client, &config).await?;

    if json {
        println!("{}", report::render_json(&batch, &config)?);
    } else {
        print!("{}", report::render_text(&batch, &config));
    }

    Ok(())
}

/// Run the polling loop until Ctrl-C.
async fn cmd_run(sort: Option<RankField>) -> anyhow::Result<()> {
    let config = load_config(sort)?;

    if config.metrics_enabled {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], config.metrics_port));
        if let Err(e) = builder.install() {
            warn!("Failed to start metrics listener: {}", e);
        } else {
            info!("Metrics listening on port {}", config.metrics_port);
        }
    }

    let client = PredictItClient::new(&config);

    info!("========================================");
    info!("PREDICTIT SCANNER STARTED");
    info!("========================================");
    info!("API URL: {}", config.predictit_api_url);
    info!("Sort field: {}", config.sort_field);
    info!("Maxed markets: {:?}", config.maxed_market_ids);
    info!("========================================");

    loop {
        match run_cycle(&client, &config).await {
            Ok(batch) => {
                print!("{}", report::render_text(&batch, &config));

                if batch.alert {
                    metrics::inc_alerts_fired();
                    report::audible_alert().await;
                }

                metrics::inc_cycles_completed();
            }
            Err(e) => {
                metrics::inc_fetch_failures();
                warn!("Cycle failed: {}. Retrying next cycle.", e);
            }
        }

        let jitter = rand::thread_rng().gen_range(0..=config.poll_jitter_secs);
        let delay = Duration::from_secs(config.poll_interval_secs + jitter);

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, exiting");
                break;
            }
        }
    }

    Ok(())
}
