use clap::Parser;
use dotenv::dotenv;
use termtutor::run_with_config_path;

/// termtutor - interactive AI tutor for the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from `.env` file into std::env (optional)
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load config, init logging and run
    run_with_config_path(&args.config).await
}
