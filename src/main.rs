use clap::Parser;
use dfork::config::{Cli, Command};
use dfork::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Copy(args) => {
            init_tracing(cli.verbose, "dfork=error");
            // Convert CLI args to Config - this validates immediately
            let config = Config::resolve(cli.config.as_deref(), &args.common)?;
            dfork::commands::copy::run(args, config)?;
        }
        Command::Serve(args) => {
            init_tracing(cli.verbose, "dfork=info");
            let config = Config::resolve(cli.config.as_deref(), &args.common)?;
            println!("dfork v{}", dfork::VERSION);
            dfork::commands::serve::run(args, config)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, quiet_default: &str) {
    let default = if verbose { "dfork=debug" } else { quiet_default };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
