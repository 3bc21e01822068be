use std::time::Duration;

use clap::Parser;
use shared::HTTP_PORT;

use crate::liveness_sweeper::DEFAULT_SWEEP_INTERVAL;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, default_value_t = HTTP_PORT)]
    pub port: u16,

    /// Seconds between two liveness sweeps.
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub sweep_interval_secs: u64,

    /// Upper bound for a single outbound write, 0 to wait forever.
    #[arg(long, default_value_t = 10_000)]
    pub write_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub sweep_interval: Duration,
    pub write_timeout: Option<Duration>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let write_timeout = match args.write_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        Self {
            addr: format!("{}:{}", args.host, args.port),
            sweep_interval: Duration::from_secs(args.sweep_interval_secs),
            write_timeout,
        }
    }
}
