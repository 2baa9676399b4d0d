//! CLI entry point for the seed grid renderer

use clap::Parser;
use seedgrid::io::cli::{Cli, PageProcessor};
use seedgrid::io::logging::init_logging;

fn main() -> seedgrid::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut processor = PageProcessor::new(cli);
    processor.process()
}
