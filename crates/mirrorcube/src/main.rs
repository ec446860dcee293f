//! Headless driver for a pair of mirrored 3×3×3 cube views.

mod cli;
mod script;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install()?;

    cli::exec(args)
}
