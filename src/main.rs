use clap::Parser;
use tidymove::cli::{Cli, run};
use tidymove::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        OutputFormatter::error(&e);
        std::process::exit(1);
    }
}
