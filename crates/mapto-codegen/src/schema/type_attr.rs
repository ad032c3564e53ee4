use crate::error::ErrorSet;

/// Mapping attributes placed on a struct
#[derive(Debug, Default)]
pub(crate) struct TypeAttr {
    /// `#[map_from(Source)]`
    pub(crate) map_from: Option<syn::Path>,

    /// `#[use_update]`
    pub(crate) use_update: bool,

    /// `#[json_extension]`
    pub(crate) json_extension: bool,
}

pub(crate) const NAMES: &[&str] = &["map_from", "use_update", "json_extension"];

impl TypeAttr {
    pub(crate) fn from_ast(attrs: &[syn::Attribute]) -> syn::Result<TypeAttr> {
        let mut result = TypeAttr::default();
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if attr.path().is_ident("map_from") {
                if result.map_from.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[map_from] attribute"));
                    continue;
                }

                result.map_from = errs.check(attr.parse_args::<syn::Path>());
            } else if attr.path().is_ident("use_update") {
                if let Some(flag) = errs.check(flag(attr, "use_update", result.use_update)) {
                    result.use_update = flag;
                }
            } else if attr.path().is_ident("json_extension") {
                if let Some(flag) = errs.check(flag(attr, "json_extension", result.json_extension)) {
                    result.json_extension = flag;
                }
            }
        }

        errs.finish()?;
        Ok(result)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.map_from.is_none() && !self.use_update && !self.json_extension
    }
}

/// A path-only marker attribute
pub(crate) fn flag(attr: &syn::Attribute, name: &str, seen: bool) -> syn::Result<bool> {
    attr.meta.require_path_only()?;

    if seen {
        return Err(syn::Error::new_spanned(
            attr,
            format!("duplicate #[{name}] attribute"),
        ));
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn parses_type_attributes() {
        let item: syn::ItemStruct = parse_quote! {
            #[derive(Debug)]
            #[map_from(dto::Employee)]
            #[use_update]
            struct EmployeeView;
        };

        let attr = TypeAttr::from_ast(&item.attrs).unwrap();
        let expected: syn::Path = parse_quote!(dto::Employee);

        assert_eq!(attr.map_from, Some(expected));
        assert!(attr.use_update);
        assert!(!attr.json_extension);
    }

    #[test]
    fn reports_every_duplicate() {
        let item: syn::ItemStruct = parse_quote! {
            #[map_from(A)]
            #[map_from(B)]
            #[json_extension]
            #[json_extension]
            struct View;
        };

        let err = TypeAttr::from_ast(&item.attrs).unwrap_err();
        let messages: Vec<_> = err.into_iter().map(|err| err.to_string()).collect();

        assert_eq!(
            messages,
            [
                "duplicate #[map_from] attribute",
                "duplicate #[json_extension] attribute"
            ]
        );
    }

    #[test]
    fn markers_take_no_arguments() {
        let item: syn::ItemStruct = parse_quote! {
            #[use_update(always)]
            struct View;
        };

        assert!(TypeAttr::from_ast(&item.attrs).is_err());
    }
}
