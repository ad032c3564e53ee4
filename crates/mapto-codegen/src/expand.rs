mod construct;
mod ext;
mod place;
mod update;
mod util;

pub(crate) use place::{place, strip_helpers};

use crate::schema::{Decl, Input};

use heck::ToSnakeCase;
use indexmap::IndexMap;
use mapto_core::schema::{Namespace, TypePath};
use mapto_core::{AccessModifier, Generation, MappingModel, Options};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Code generated for a module tree
#[derive(Debug, Default)]
pub(crate) struct Expanded {
    /// Generated items by the namespace they belong to
    pub(crate) items: IndexMap<Namespace, Vec<TokenStream>>,

    /// Every resolved diagnostic, pointing into the input
    pub(crate) errors: Option<syn::Error>,
}

struct Expand<'a> {
    input: &'a Input,

    model: &'a MappingModel,

    /// The mapped type
    target: &'a Decl,

    /// The type it is mapped from
    source: &'a Decl,

    /// Path prefix for mapto types
    mapto: TokenStream,

    /// Binding of the mapping context in generated functions
    context: syn::Ident,

    /// Binding of the source value in generated functions
    source_ident: syn::Ident,

    /// `<source>` in generated names
    source_snake: String,
}

/// Expands every model of `generation`
pub(crate) fn expand(input: &Input, generation: &Generation) -> Expanded {
    let mut expanded = Expanded::default();

    for model in &generation.models {
        let target_name = TypePath::new(model.namespace.clone(), &model.type_name).definition_name();

        let (Some(target), Some(source)) = (
            input.decls.get(&target_name),
            input.decls.get(&model.source_full_name),
        ) else {
            continue;
        };

        let tokens = Expand::new(input, model, target, source).expand();

        expanded
            .items
            .entry(model.namespace.clone())
            .or_default()
            .push(tokens);
    }

    for diagnostic in &generation.diagnostics {
        let err = syn::Error::new(input.span_of(&diagnostic.location), diagnostic);

        match &mut expanded.errors {
            Some(errors) => errors.combine(err),
            None => expanded.errors = Some(err),
        }
    }

    expanded
}

impl<'a> Expand<'a> {
    fn new(input: &'a Input, model: &'a MappingModel, target: &'a Decl, source: &'a Decl) -> Self {
        let source_snake = model.source_type_name.to_snake_case();
        let context = util::ident("context");

        Expand {
            input,
            model,
            target,
            source,
            mapto: quote!(_mapto),
            source_ident: source_binding(&source_snake, model, target),
            context,
            source_snake,
        }
    }

    fn expand(&self) -> TokenStream {
        let ident = &self.target.ident;
        let ext_trait = self.expand_ext_trait();

        let constructors = self.expand_constructors();
        let update_method = self.expand_update_method();
        let to_json = self.expand_to_json();
        let conversions = self.expand_conversions();

        let code = wrap_in_const(quote! {
            impl #ident {
                #constructors
                #update_method
                #to_json
            }

            #conversions
        });

        quote! {
            #ext_trait
            #code
        }
    }

    fn vis(&self) -> TokenStream {
        match self.model.options.generated_methods_access_modifier {
            AccessModifier::Public => quote!(pub),
            AccessModifier::Internal => quote!(pub(crate)),
            AccessModifier::Private => quote!(),
        }
    }

    /// A doc attribute, when documentation is requested
    fn doc(&self, text: &str) -> TokenStream {
        if !self.model.options.generate_xml_document {
            return quote!();
        }

        let text = format!(" {text}");
        quote!(#[doc = #text])
    }

    /// `#[map_from(...)]` as written
    fn source_path(&self) -> TokenStream {
        let path = &self.target.source;
        quote!(#path)
    }

    fn with_context_ident(&self) -> syn::Ident {
        format_ident!("from_{}_with_context", self.source_snake)
    }

    fn from_ident(&self) -> syn::Ident {
        format_ident!("from_{}", self.source_snake)
    }

    fn options(&self) -> &Options {
        &self.model.options
    }
}

/// The source parameter is named after its type unless that is not an
/// identifier or collides with another parameter
fn source_binding(snake: &str, model: &MappingModel, target: &Decl) -> syn::Ident {
    let collides = model.extra_parameters.iter().any(|extra| {
        target
            .members
            .get(&extra.name)
            .is_some_and(|member| member.ident == snake)
    });

    match syn::parse_str::<syn::Ident>(snake) {
        Ok(ident) if !collides => ident,
        _ => util::ident("source"),
    }
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use ::mapto as _mapto;
            #code
        };
    }
}
