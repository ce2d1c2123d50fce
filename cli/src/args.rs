use clap::Parser;
use probe_core::config::{CONCURRENT_PORT, DEFAULT_COUNT, DEFAULT_HOST, SEQUENTIAL_PORT};
use probe_core::ProbeConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Send one GET and fail unless it answers 200", long_about = None)]
pub struct SequentialArgs {
    /// Target hostname
    #[arg(long, env = "PROBE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Target port
    #[arg(long, env = "PROBE_PORT", default_value_t = SEQUENTIAL_PORT)]
    pub port: u16,
}

impl SequentialArgs {
    pub fn config(&self) -> ProbeConfig {
        ProbeConfig::sequential()
            .with_host(self.host.clone())
            .with_port(self.port)
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Fire a batch of GETs through a worker pool", long_about = None)]
pub struct ConcurrentArgs {
    /// Target hostname
    #[arg(long, env = "PROBE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Target port
    #[arg(long, env = "PROBE_PORT", default_value_t = CONCURRENT_PORT)]
    pub port: u16,

    /// Number of requests to send
    #[arg(short = 'n', long, env = "PROBE_COUNT", default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Worker threads; defaults to the number of cores
    #[arg(short = 'c', long, env = "PROBE_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Exit non-zero if any probe fails
    #[arg(long)]
    pub strict: bool,

    /// Print the collected summary as one JSON line
    #[arg(long)]
    pub json: bool,
}

impl ConcurrentArgs {
    pub fn config(&self) -> ProbeConfig {
        let config = ProbeConfig::concurrent()
            .with_host(self.host.clone())
            .with_port(self.port)
            .with_count(self.count);
        match self.concurrency {
            Some(concurrency) => config.with_concurrency(concurrency),
            None => config,
        }
    }
}
