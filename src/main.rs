use clap::Parser;
use miette::Result;
use proxysheet::cli::Cli;
use proxysheet::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    proxysheet::cli::build::run(cli.build, &printer)?;

    Ok(())
}
