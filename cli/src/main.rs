mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    match commands.command {
        Commands::Info => {
            terminal::print::header("local network identity");
            info::info()
        }
        Commands::Discover(args) => {
            terminal::print::header("subnet discovery");
            discover::discover(args).await
        }
    }
}
