mod command;
mod logging;

pub use command::OptionArgs;
pub use logging::init_logging;

use anyhow::Result;
use clap::Parser;
use mapto_core::Options;
use std::io::Write;

/// Command-line front end running the mapping generator over Rust source
/// files
#[derive(Debug, Default)]
pub struct MaptoCli {
    options: Options,
}

impl MaptoCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MaptoCli whose options are the defaults for every
    /// command. Command-line flags override them.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse and execute a command from command-line arguments.
    ///
    /// Returns `false` when the input has mapping errors.
    pub fn parse_and_run(&self) -> Result<bool> {
        let cli = Cli::parse();
        self.run(cli, &mut std::io::stdout().lock())
    }

    /// Parse and execute a command from an iterator of arguments, writing
    /// its output to `out`
    pub fn parse_from<I, T>(&self, args: I, out: &mut dyn Write) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli, out)
    }

    fn run(&self, cli: Cli, out: &mut dyn Write) -> Result<bool> {
        match cli.command {
            Command::Generate(cmd) => cmd.run(&self.options, out),
            Command::Check(cmd) => cmd.run(&self.options, out),
            Command::Explain(cmd) => cmd.run(&self.options, out),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mapto")]
#[command(about = "MapTo - generates mapping code between Rust structs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Print the file with the generated mappings expanded
    Generate(command::GenerateCommand),

    /// Report mapping diagnostics
    Check(command::CheckCommand),

    /// Print the resolved mapping models as JSON
    Explain(command::ExplainCommand),
}
