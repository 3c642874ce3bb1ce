//! CLI entry point for the socket-constrained tile map generator

use clap::Parser;
use sockettile::io::cli::{Cli, TileMapGenerator};
use sockettile::io::logging::init_logger;

fn main() -> sockettile::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let generator = TileMapGenerator::new(cli);
    generator.run().map(|_| ()).inspect_err(|error| {
        log::error!("{error}");
    })
}
