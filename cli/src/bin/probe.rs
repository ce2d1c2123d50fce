use clap::Parser;
use probe_cli::{init_tracing, run_sequential, SequentialArgs};
use probe_core::Prober;

fn main() -> anyhow::Result<()> {
    let args = SequentialArgs::parse();
    init_tracing();

    let prober = Prober::new(args.config());
    run_sequential(&prober, &mut std::io::stdout())
}
