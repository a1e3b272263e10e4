use clap::Parser;
use comps::cli::{commands, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = commands::dispatch(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
