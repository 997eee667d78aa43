//! LFU Memo - A bounded memoization cache
//!
//! Demo binary: memoizes a deliberately slow computation over a workload of
//! integers from concurrent tasks and prints the resulting cache state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lfu_memo::{spawn_stats_reporter, CallArgs, Config, MemoCache};

/// Workload used when no integers are given on the command line.
const DEMO_WORKLOAD: &[u32] = &[27, 97, 27, 871, 27, 97, 6171, 77031, 27, 871, 97, 837799];

/// Main entry point for the LFU Memo demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache with the configured capacity
/// 4. Start the stats reporter if an interval is configured
/// 5. Run the workload from concurrent tasks
/// 6. Print the final snapshot and statistics as JSON
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lfu_memo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: max_limit={}, report_interval={}s",
        config.max_limit, config.report_interval
    );

    let cache = Arc::new(
        MemoCache::<u64>::from_config(&config).context("failed to build cache")?,
    );

    let reporter = (config.report_interval > 0)
        .then(|| spawn_stats_reporter(cache.clone(), config.report_interval));

    let workload = parse_workload(std::env::args().skip(1))?;
    info!("Running workload of {} calls", workload.len());

    let mut handles = Vec::with_capacity(workload.len());
    for n in workload {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            let args = CallArgs::new().arg(n);
            cache
                .try_call_async(&args, |_| async move {
                    // Stand-in for an expensive call
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    collatz_steps(u64::from(n))
                })
                .await
        }));
    }

    for handle in handles {
        let steps = handle.await.context("workload task panicked")??;
        info!("Collatz stopping time: {}", steps);
    }

    if let Some(reporter) = reporter {
        reporter.abort();
        warn!("Stats reporter aborted");
    }

    let report = json!({
        "snapshot": cache.snapshot(),
        "stats": cache.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn parse_workload<I: Iterator<Item = String>>(args: I) -> Result<Vec<u32>> {
    let workload = args
        .map(|raw| {
            raw.parse::<u32>()
                .with_context(|| format!("not a non-negative integer: {:?}", raw))
        })
        .collect::<Result<Vec<_>>>()?;

    if workload.is_empty() {
        Ok(DEMO_WORKLOAD.to_vec())
    } else {
        Ok(workload)
    }
}

/// Number of Collatz steps needed to reach 1.
///
/// # Errors
/// Fails if an intermediate value overflows `u64`.
fn collatz_steps(start: u64) -> Result<u64> {
    let mut n = start;
    let mut steps = 0;
    while n > 1 {
        n = if n % 2 == 0 {
            n / 2
        } else {
            n.checked_mul(3)
                .and_then(|m| m.checked_add(1))
                .ok_or_else(|| anyhow!("Collatz sequence from {} overflows u64", start))?
        };
        steps += 1;
    }
    Ok(steps)
}
