use clap::{Args, Parser, Subcommand};
use seqproc::{Batch, ProcessorError, DELAY_ENV_VAR};

#[derive(Parser)]
#[command(
    name = "seqproc",
    version,
    about = "Cancellable sequential task processor",
    long_about = "Process a batch of numbers one at a time with a delay between items,\n\
                  reporting progress as it goes. Cancellation is cooperative: it is\n\
                  observed before the next item starts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a batch of numeric items
    Run(RunArgs),
    /// Check that a batch is valid without processing it
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct BatchInput {
    /// Items to process, in order
    #[arg(allow_negative_numbers = true, conflicts_with = "json_items")]
    pub items: Vec<String>,

    /// Items as a JSON array (e.g. '[1, 2, 3]')
    #[arg(long)]
    pub json_items: Option<String>,
}

impl BatchInput {
    pub fn to_batch(&self) -> Result<Batch, ProcessorError> {
        match self.json_items {
            Some(ref text) => Batch::from_json_str(text),
            None => Batch::parse_items(&self.items),
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: BatchInput,

    /// Delay between items in milliseconds (default: 1000)
    #[arg(long, env = DELAY_ENV_VAR)]
    pub delay_ms: Option<u64>,

    /// Request cancellation after this many milliseconds
    #[arg(long)]
    pub cancel_after_ms: Option<u64>,

    /// Print the run outcome as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: BatchInput,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
