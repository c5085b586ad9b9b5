use clap::{Parser, Subcommand};
use components::demo::{DemoArgs, handle_demo};
use components::format::{FormatArgs, handle_format};
use dotenv::dotenv;

mod components;

#[derive(Parser)]
#[command(name = "datepick", version, about = "Date pickers for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive demo page
    Demo(DemoArgs),
    /// Print the text a closed picker would show for a value
    Format(FormatArgs),
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let code = match cli.command {
        // the demo installs its own in-memory logger
        Commands::Demo(args) => handle_demo(args).await,
        Commands::Format(args) => {
            env_logger::init();
            handle_format(args)
        }
    };
    std::process::exit(code);
}
