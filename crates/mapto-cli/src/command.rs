mod check;
mod explain;
mod generate;

pub use check::CheckCommand;
pub use explain::ExplainCommand;
pub use generate::GenerateCommand;

use anyhow::{Context, Result};
use clap::Args;
use mapto_codegen::Expansion;
use mapto_core::{AccessModifier, Options};
use std::path::{Path, PathBuf};

/// Flags shaping the generated code, shared by every command
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Visibility of generated methods: public, internal or private
    #[arg(long)]
    access: Option<AccessModifier>,

    /// Do not attach documentation to generated items
    #[arg(long)]
    no_docs: bool,

    /// Also generate conversions from `Option<&Source>`
    #[arg(long)]
    nullable: bool,

    /// Build property as `key=value`, e.g. `mapto_generate_xml_document=false`
    #[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    properties: Vec<(String, String)>,
}

impl OptionArgs {
    /// Build properties replace `defaults` when any are given. Flags apply
    /// last.
    pub fn options(&self, defaults: &Options) -> Result<Options> {
        let mut options = if self.properties.is_empty() {
            defaults.clone()
        } else {
            Options::from_properties(self.properties.iter().cloned())?
        };

        if let Some(access) = self.access {
            options = options.access_modifier(access);
        }

        if self.no_docs {
            options = options.generate_xml_document(false);
        }

        if self.nullable {
            options = options.support_nullable_reference_types(true);
        }

        Ok(options)
    }
}

fn parse_property(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected `key=value`, found `{arg}`")),
    }
}

/// Reads and expands a source file
fn expand(path: &Path, options: &Options) -> Result<Expansion> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let file = syn::parse_file(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let expansion = mapto_codegen::expand_file(&file, options)
        .with_context(|| format!("invalid mapping declarations in {}", path.display()))?;

    tracing::debug!(
        file = %path.display(),
        models = expansion.generation.models.len(),
        diagnostics = expansion.generation.diagnostics.len(),
        "expanded file"
    );

    Ok(expansion)
}

/// The source file argument of a command
#[derive(Args, Debug)]
struct FileArg {
    /// Rust source file declaring mapped types
    file: PathBuf,
}
