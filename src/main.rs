use clap::Parser;
use hashout::config::{Args, RunConfig};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> ExitCode {
    let start = Instant::now();
    let args = Args::parse();

    // WHY: stdout is reserved for error text and the elapsed line, so logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");
    let config = RunConfig::from(args);

    match hashout::run(&config).await {
        Ok(stats) => {
            info!(?stats, "Run complete");
            if config.print_elapsed {
                println!("{:?}", start.elapsed());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
