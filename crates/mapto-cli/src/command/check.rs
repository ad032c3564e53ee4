use super::{FileArg, OptionArgs};
use anyhow::Result;
use clap::Parser;
use mapto_core::Options;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    input: FileArg,

    #[command(flatten)]
    options: OptionArgs,
}

impl CheckCommand {
    pub(crate) fn run(self, defaults: &Options, out: &mut dyn Write) -> Result<bool> {
        let options = self.options.options(defaults)?;
        let generation = super::expand(&self.input.file, &options)?.generation;

        for diagnostic in generation.diagnostics.iter() {
            writeln!(out, "{diagnostic}")?;
        }

        let errors = generation
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.is_error())
            .count();

        match errors {
            0 => writeln!(out, "ok: {} mapped types", generation.models.len())?,
            1 => writeln!(out, "failed: 1 error")?,
            n => writeln!(out, "failed: {n} errors")?,
        }

        Ok(errors == 0)
    }
}
