use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dough-tui")]
#[command(about = "Terminal timers for fermenting dough batches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    Run,
    /// Print every tracked batch and the next ready time
    List,
    /// Start a batch that is ready after the given number of hours
    Add {
        /// Batch name, e.g. "Friday pies"
        name: String,
        /// Fermentation time in hours, e.g. 48 or 1.5
        hours: String,
    },
    /// Stop tracking a batch
    Delete {
        /// Batch id as shown by `list`
        id: String,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

impl Cli {
    pub fn command(self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }
}
