//! This crate contains the source code for the `mazegraph` binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "The package is not published, so it carries no repository or readme."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazegraph::{init_logger, run, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    init_logger(config.level())?;

    run(&config)
}
