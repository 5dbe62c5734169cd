use clap::Parser;

use claude_ask::cli::{init_tracing, run};
use claude_ask::{ClaudeAgent, Cli};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Failures are reported on stdout by `run`; the exit status stays 0.
    let mut stdout = std::io::stdout();
    if let Err(e) = run(&cli, || ClaudeAgent::new(None), &mut stdout).await {
        eprintln!("failed to write output: {}", e);
    }
}
