use crate::schema::is_helper;

use indexmap::IndexMap;
use mapto_core::schema::Namespace;
use proc_macro2::TokenStream;
use syn::visit_mut::{self, VisitMut};

/// Appends generated items to the module each one belongs to
pub(crate) fn place(
    current: &Namespace,
    items: &mut Vec<syn::Item>,
    generated: &mut IndexMap<Namespace, Vec<TokenStream>>,
) {
    for item in items.iter_mut() {
        if let syn::Item::Mod(module) = item {
            if let Some((_, content)) = &mut module.content {
                let namespace = current.join(&module.ident.to_string());
                place(&namespace, content, generated);
            }
        }
    }

    if let Some(tokens) = generated.shift_remove(current) {
        items.extend(tokens.into_iter().map(syn::Item::Verbatim));
    }
}

/// Removes the attributes consumed by the generator, which the compiler
/// would otherwise reject
pub(crate) fn strip_helpers(items: &mut [syn::Item]) {
    let mut strip = StripHelpers;

    for item in items {
        strip.visit_item_mut(item);
    }
}

struct StripHelpers;

impl VisitMut for StripHelpers {
    fn visit_item_struct_mut(&mut self, node: &mut syn::ItemStruct) {
        node.attrs.retain(|attr| !is_helper(attr));
        visit_mut::visit_item_struct_mut(self, node);
    }

    fn visit_item_enum_mut(&mut self, node: &mut syn::ItemEnum) {
        node.attrs.retain(|attr| !is_helper(attr));
        visit_mut::visit_item_enum_mut(self, node);
    }

    fn visit_field_mut(&mut self, node: &mut syn::Field) {
        node.attrs.retain(|attr| !is_helper(attr));
        visit_mut::visit_field_mut(self, node);
    }

    fn visit_pat_type_mut(&mut self, node: &mut syn::PatType) {
        node.attrs.retain(|attr| !is_helper(attr));
        visit_mut::visit_pat_type_mut(self, node);
    }

    // Function bodies are left alone
    fn visit_block_mut(&mut self, _: &mut syn::Block) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::{quote, ToTokens};
    use syn::parse_quote;

    #[test]
    fn strips_only_mapping_attributes() {
        let mut items: Vec<syn::Item> = vec![parse_quote! {
            #[derive(Debug)]
            #[map_from(Baz)]
            struct Foo {
                #[map_property(source = "id")]
                #[serde(rename = "key")]
                key: i32,
            }
        }];

        strip_helpers(&mut items);

        let expected: syn::Item = parse_quote! {
            #[derive(Debug)]
            struct Foo {
                #[serde(rename = "key")]
                key: i32,
            }
        };

        assert_eq!(
            items[0].to_token_stream().to_string(),
            expected.to_token_stream().to_string()
        );
    }

    #[test]
    fn places_into_nested_modules() {
        let mut items: Vec<syn::Item> = vec![parse_quote! {
            mod views {
                struct View;
            }
        }];

        let root = Namespace::new("app");
        let mut generated = IndexMap::new();
        generated.insert(root.join("views"), vec![quote!(fn nested() {})]);
        generated.insert(root.clone(), vec![quote!(fn top() {})]);

        place(&root, &mut items, &mut generated);

        assert!(generated.is_empty());
        assert_eq!(items.len(), 2);

        let syn::Item::Mod(module) = &items[0] else {
            panic!("expected a module");
        };

        assert_eq!(module.content.as_ref().unwrap().1.len(), 2);
    }
}
