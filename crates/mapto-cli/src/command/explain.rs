use super::{FileArg, OptionArgs};
use anyhow::Result;
use clap::Parser;
use mapto_core::Options;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ExplainCommand {
    #[command(flatten)]
    input: FileArg,

    #[command(flatten)]
    options: OptionArgs,
}

impl ExplainCommand {
    /// Prints every resolved model, including the namespaces it imports, and
    /// the diagnostics of the types that did not resolve
    pub(crate) fn run(self, defaults: &Options, out: &mut dyn Write) -> Result<bool> {
        let options = self.options.options(defaults)?;
        let generation = super::expand(&self.input.file, &options)?.generation;

        let report = serde_json::json!({
            "models": generation.models,
            "diagnostics": generation.diagnostics,
        });

        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;

        Ok(generation.is_ok())
    }
}
