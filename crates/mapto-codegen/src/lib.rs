mod error;
mod expand;
mod options;
mod schema;

use mapto_core::schema::Namespace;
use mapto_core::{Generation, Options};
use proc_macro2::TokenStream;
use quote::ToTokens;

/// Expands `#[mapto::mappings(...)]` placed on an inline module.
///
/// Resolution diagnostics are returned as compile errors next to the
/// module, so that the types of the module stay available to the rest of
/// the crate.
pub fn generate(args: TokenStream, input: TokenStream) -> syn::Result<TokenStream> {
    let options = options::from_args(args)?;
    let mut module: syn::ItemMod = syn::parse2(input)?;

    if module.content.is_none() {
        return Err(syn::Error::new_spanned(
            &module,
            "#[mappings] requires an inline module",
        ));
    }

    let root = Namespace::new(module.ident.to_string());

    let errors = match &mut module.content {
        Some((_, items)) => expand_items(root, items, &options)?.errors,
        None => None,
    };

    let mut tokens = module.to_token_stream();

    if let Some(errors) = errors {
        tokens.extend(errors.to_compile_error());
    }

    Ok(tokens)
}

/// The result of expanding a whole source file
#[derive(Debug)]
pub struct Expansion {
    /// The file with mapping attributes removed and generated code added
    pub file: syn::File,

    /// The resolved models and diagnostics
    pub generation: Generation,
}

/// Expands every mapped type declared in `file`
pub fn expand_file(file: &syn::File, options: &Options) -> syn::Result<Expansion> {
    let mut file = file.clone();
    let generation = expand_items(Namespace::new("crate"), &mut file.items, options)?.generation;

    Ok(Expansion { file, generation })
}

struct Outcome {
    generation: Generation,
    errors: Option<syn::Error>,
}

fn expand_items(
    root: Namespace,
    items: &mut Vec<syn::Item>,
    options: &Options,
) -> syn::Result<Outcome> {
    let input = schema::Input::from_items(root.clone(), items)?;
    let generation = mapto_core::generate(&input.schema, options);
    let mut expanded = expand::expand(&input, &generation);

    tracing::debug!(
        root = %input.root,
        models = generation.models.len(),
        diagnostics = generation.diagnostics.len(),
        "expanded mappings"
    );

    expand::strip_helpers(items);
    expand::place(&root, items, &mut expanded.items);

    Ok(Outcome {
        generation,
        errors: expanded.errors,
    })
}
