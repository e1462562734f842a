use clap::Parser;
use param_inject_cli::commands::inject_cmd::{execute, InjectArgs};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// param-inject: substitute `$$NAME` parameters into pipeline documents
#[derive(Parser)]
#[command(name = "param-inject", version)]
#[command(about = "Substitute $$NAME parameters into pipeline documents", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: InjectArgs,
}

fn main() {
    // Logs go to stderr so stdout carries only the document.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("PARAM_INJECT_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli.args) {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
