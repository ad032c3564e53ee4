use super::type_attr::flag;
use crate::error::ErrorSet;

use mapto_core::schema::Literal;
use syn::parse::{Parse, ParseStream};

/// Mapping attributes placed on a field or a constructor parameter
#[derive(Debug, Default)]
pub(crate) struct MemberAttr {
    /// `#[map_property(source = "name")]`
    pub(crate) map_property: Option<syn::LitStr>,

    /// `#[ignore_member]`
    pub(crate) ignore: bool,

    /// `#[converter(Path)]` or `#[converter(Path, params(...))]`
    pub(crate) converter: Option<ConverterAttr>,

    /// `#[read_only]`
    pub(crate) read_only: bool,

    /// `#[map_base]`, the field holds the inherited part of the struct
    pub(crate) map_base: bool,
}

#[derive(Debug)]
pub(crate) struct ConverterAttr {
    pub(crate) path: syn::Path,
    pub(crate) params: Vec<Literal>,
}

pub(crate) const NAMES: &[&str] = &[
    "map_property",
    "ignore_member",
    "converter",
    "read_only",
    "map_base",
];

impl MemberAttr {
    pub(crate) fn from_ast(attrs: &[syn::Attribute]) -> syn::Result<MemberAttr> {
        let mut result = MemberAttr::default();
        let mut errs = ErrorSet::new();

        for attr in attrs {
            let path = attr.path();

            if path.is_ident("map_property") {
                if result.map_property.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[map_property] attribute"));
                    continue;
                }

                result.map_property = errs.check(parse_map_property(attr));
            } else if path.is_ident("converter") {
                if result.converter.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[converter] attribute"));
                    continue;
                }

                result.converter = errs.check(attr.parse_args::<ConverterAttr>());
            } else if path.is_ident("ignore_member") {
                if let Some(flag) = errs.check(flag(attr, "ignore_member", result.ignore)) {
                    result.ignore = flag;
                }
            } else if path.is_ident("read_only") {
                if let Some(flag) = errs.check(flag(attr, "read_only", result.read_only)) {
                    result.read_only = flag;
                }
            } else if path.is_ident("map_base") {
                if let Some(flag) = errs.check(flag(attr, "map_base", result.map_base)) {
                    result.map_base = flag;
                }
            }
        }

        errs.finish()?;
        Ok(result)
    }
}

fn parse_map_property(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let mut source = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("source") {
            source = Some(meta.value()?.parse::<syn::LitStr>()?);
            Ok(())
        } else {
            Err(meta.error("expected `source = \"name\"`"))
        }
    })?;

    source.ok_or_else(|| syn::Error::new_spanned(attr, "expected `source = \"name\"`"))
}

impl Parse for ConverterAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let path: syn::Path = input.parse()?;
        let mut params = vec![];

        if input.parse::<Option<syn::Token![,]>>()?.is_some() && !input.is_empty() {
            let ident: syn::Ident = input.parse()?;

            if ident != "params" {
                return Err(syn::Error::new_spanned(ident, "expected `params(...)`"));
            }

            let content;
            syn::parenthesized!(content in input);

            let exprs = content.parse_terminated(syn::Expr::parse, syn::Token![,])?;

            for expr in &exprs {
                params.push(literal(expr)?);
            }

            input.parse::<Option<syn::Token![,]>>()?;
        }

        Ok(ConverterAttr { path, params })
    }
}

/// Converter parameters are literals, optionally negated
fn literal(expr: &syn::Expr) -> syn::Result<Literal> {
    let err = || syn::Error::new_spanned(expr, "converter parameters must be literals");

    match expr {
        syn::Expr::Lit(lit) => match &lit.lit {
            syn::Lit::Str(lit) => Ok(Literal::Str(lit.value())),
            syn::Lit::Int(lit) => Ok(Literal::Int(lit.base10_parse()?)),
            syn::Lit::Float(lit) => Ok(Literal::Float(lit.base10_parse()?)),
            syn::Lit::Bool(lit) => Ok(Literal::Bool(lit.value)),
            syn::Lit::Char(lit) => Ok(Literal::Char(lit.value())),
            _ => Err(err()),
        },
        syn::Expr::Unary(unary) if matches!(unary.op, syn::UnOp::Neg(_)) => {
            match literal(&unary.expr)? {
                Literal::Int(value) => Ok(Literal::Int(-value)),
                Literal::Float(value) => Ok(Literal::Float(-value)),
                _ => Err(err()),
            }
        }
        syn::Expr::Group(group) => literal(&group.expr),
        _ => Err(err()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn first_field(fields: syn::FieldsNamed) -> syn::Field {
        fields.named.into_iter().next().unwrap()
    }

    #[test]
    fn parses_member_attributes() {
        let field = first_field(parse_quote!({
            #[map_property(source = "name")]
            #[read_only]
            full_name: String
        }));

        let attr = MemberAttr::from_ast(&field.attrs).unwrap();
        assert_eq!(attr.map_property.unwrap().value(), "name");
        assert!(attr.read_only);
        assert!(!attr.ignore);
        assert!(attr.converter.is_none());
    }

    #[test]
    fn parses_converter_parameters() {
        let field = first_field(parse_quote!({
            #[converter(conv::Scale, params(-2, 0.5, "km", true, 'x'))]
            distance: f64
        }));

        let converter = MemberAttr::from_ast(&field.attrs).unwrap().converter.unwrap();
        let expected: syn::Path = parse_quote!(conv::Scale);

        assert_eq!(converter.path, expected);
        assert_eq!(
            converter.params,
            [
                Literal::Int(-2),
                Literal::Float(0.5),
                Literal::from("km"),
                Literal::Bool(true),
                Literal::Char('x'),
            ]
        );

        let field = first_field(parse_quote!({
            #[converter(Upper)]
            name: String
        }));
        let converter = MemberAttr::from_ast(&field.attrs).unwrap().converter.unwrap();
        assert!(converter.params.is_empty());
    }

    #[test]
    fn rejects_malformed_attributes() {
        let field = first_field(parse_quote!({
            #[converter(Upper, params(len()))]
            #[map_property(name = "x")]
            name: String
        }));

        let err = MemberAttr::from_ast(&field.attrs).unwrap_err();
        let messages: Vec<_> = err.into_iter().map(|err| err.to_string()).collect();

        assert_eq!(
            messages,
            [
                "converter parameters must be literals",
                "expected `source = \"name\"`"
            ]
        );
    }
}
