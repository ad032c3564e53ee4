use mapto_core::{AccessModifier, Options};

use proc_macro2::TokenStream;
use syn::parse::Parser;

/// Parses the arguments of `#[mapto::mappings(...)]`.
///
/// `access = "public" | "internal" | "private"`, `docs = bool` and
/// `nullable = bool` are accepted, in any order.
pub(crate) fn from_args(args: TokenStream) -> syn::Result<Options> {
    let mut options = Options::default();

    if args.is_empty() {
        return Ok(options);
    }

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("access") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            let access: AccessModifier = lit
                .value()
                .parse()
                .map_err(|err| syn::Error::new_spanned(&lit, err))?;

            options.generated_methods_access_modifier = access;
        } else if meta.path.is_ident("docs") {
            let lit: syn::LitBool = meta.value()?.parse()?;
            options.generate_xml_document = lit.value;
        } else if meta.path.is_ident("nullable") {
            let lit: syn::LitBool = meta.value()?.parse()?;
            options.support_nullable_reference_types = lit.value;
        } else {
            return Err(meta.error("expected `access`, `docs` or `nullable`"));
        }

        Ok(())
    });

    parser.parse2(args)?;

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn parses_all_options() {
        let options = from_args(quote!(access = "internal", docs = false, nullable = true)).unwrap();

        assert_eq!(
            options,
            Options::new()
                .access_modifier(AccessModifier::Internal)
                .generate_xml_document(false)
                .support_nullable_reference_types(true)
        );
    }

    #[test]
    fn rejects_unknown_arguments() {
        let err = from_args(quote!(visibility = "pub")).unwrap_err();
        assert!(err.to_string().contains("expected `access`"));

        let err = from_args(quote!(access = "protected")).unwrap_err();
        assert!(err.to_string().contains("protected"));
    }
}
