use super::{FileArg, OptionArgs};
use anyhow::{Context, Result};
use clap::Parser;
use mapto_core::Options;
use quote::ToTokens;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    input: FileArg,

    /// Write the expanded file here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    options: OptionArgs,
}

impl GenerateCommand {
    pub(crate) fn run(self, defaults: &Options, out: &mut dyn Write) -> Result<bool> {
        let options = self.options.options(defaults)?;
        let expansion = super::expand(&self.input.file, &options)?;

        for diagnostic in expansion.generation.diagnostics.iter() {
            eprintln!("{diagnostic}");
        }

        let code = expansion.file.to_token_stream().to_string();

        match &self.output {
            Some(path) => std::fs::write(path, code)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => writeln!(out, "{code}")?,
        }

        Ok(expansion.generation.is_ok())
    }
}
