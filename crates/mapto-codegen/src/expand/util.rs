use mapto_core::schema::Literal;
use proc_macro2::TokenStream;
use quote::quote;

/// Creates a new identifier prefixed with `__mapto_` to avoid name collisions
/// with user-defined names in generated code
pub(crate) fn ident(name: &str) -> syn::Ident {
    quote::format_ident!("__mapto_{name}")
}

/// Accesses a member by name: a field, or a tuple index
pub(crate) fn member(name: &str) -> syn::Member {
    match name.parse::<u32>() {
        Ok(index) => syn::Member::Unnamed(syn::Index {
            index,
            span: proc_macro2::Span::call_site(),
        }),
        Err(_) => syn::Member::Named(quote::format_ident!("{name}")),
    }
}

pub(crate) fn literal(literal: &Literal) -> TokenStream {
    match literal {
        Literal::Bool(value) => quote!(#value),
        Literal::Int(value) => {
            let lit = proc_macro2::Literal::i64_suffixed(*value);
            quote!(#lit)
        }
        Literal::Float(value) => {
            let lit = proc_macro2::Literal::f64_suffixed(*value);
            quote!(#lit)
        }
        Literal::Str(value) => quote!(#value),
        Literal::Char(value) => quote!(#value),
    }
}
