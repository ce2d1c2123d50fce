use clap::Parser;
use probe_cli::{init_tracing, run_concurrent, ConcurrentArgs};
use probe_core::Prober;

fn main() -> anyhow::Result<()> {
    let args = ConcurrentArgs::parse();
    init_tracing();

    let prober = Prober::new(args.config());
    run_concurrent(&prober, args.strict, args.json, &mut std::io::stdout())
}
