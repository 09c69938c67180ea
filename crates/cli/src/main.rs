//! Pipeline simulator CLI.
//!
//! Assembles the input file, loads the image at address 0, and runs the
//! machine until HALT drains the pipeline. The per-cycle register dump goes
//! to stdout; stage-level narration is `tracing` output on stderr (enable
//! with `-v` or `RUST_LOG=debug`). Exits 0 on normal termination, 1 on an
//! assembly error or a runtime fault.

use std::{fs, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pipesim_core::{Config, Processor, assemble};

#[derive(Parser, Debug)]
#[command(
    name = "simulator",
    version,
    about = "Cycle-accurate in-order scalar pipeline simulator",
    long_about = "Assemble a program and simulate it tick-by-tick on a five-stage \
                  scalar pipeline with register renaming, operand forwarding and \
                  always-not-taken branch prediction.\n\nExamples:\n  \
                  simulator program.asm\n  simulator program.asm --speed 2\n  \
                  simulator program.asm --no-forward -v"
)]
struct Cli {
    /// Assembly file to execute.
    input_file: String,

    /// Clock throttle: pause speed/4 seconds per tick (0 = full speed).
    #[arg(short, long, default_value_t = 0)]
    speed: u64,

    /// Serialise the machine: tick after every stage instead of pipelining.
    #[arg(long)]
    no_pipeline: bool,

    /// Disable destination renaming (destinations join the hazard wait-check).
    #[arg(long)]
    no_rename: bool,

    /// Disable result forwarding (consumers wait for the physical write).
    #[arg(long)]
    no_forward: bool,

    /// Enable stage-level trace output on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = fs::read_to_string(&cli.input_file).unwrap_or_else(|err| {
        eprintln!("could not read file `{}`: {err}", cli.input_file);
        process::exit(1);
    });

    let image = assemble(&source).unwrap_or_else(|err| {
        eprintln!("assembly failed: {err}");
        process::exit(1);
    });

    let mut config = Config::default();
    config.general.speed = cli.speed;
    config.pipeline.pipelined = !cli.no_pipeline;
    config.pipeline.rename_registers = !cli.no_rename;
    config.pipeline.forward_results = !cli.no_forward;

    let mut processor = Processor::new(config);
    processor.load_image(&image);

    match processor.run() {
        Ok(stats) => stats.print(),
        Err(err) => {
            eprintln!("simulation aborted: {err}");
            processor.stats().print();
            process::exit(1);
        }
    }
}
