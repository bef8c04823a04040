use clap::Parser;
use error_stack::Result;

mod server;

/// Command line options for jotter.
#[derive(Debug, Parser)]
#[command(about = "Notes-taking API server", version, author, long_about)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Option<Subcommand>,
}

impl Cli {
    pub fn run(self) -> Result<(), server::StartServerError> {
        match self.subcommand.unwrap_or_default() {
            Subcommand::Server(args) => server::run(&args),
        }
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Expose the jotter HTTP API (default)
    Server(server::ServerCommand),
}

impl Default for Subcommand {
    fn default() -> Self {
        Self::Server(server::ServerCommand::default())
    }
}
