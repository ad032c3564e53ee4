use super::Expand;
use crate::schema::Shape;

use mapto_core::mapping::Conversion;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

impl Expand<'_> {
    pub(super) fn expand_update_method(&self) -> TokenStream {
        if !self.model.needs_update_method() || self.target.shape != Shape::Named {
            return quote!();
        }

        let mapto = &self.mapto;
        let vis = self.vis();
        let context = &self.context;
        let source = &self.source_ident;
        let source_path = self.source_path();
        let update = format_ident!("update_from_{}", self.source_snake);

        let needs_context = self.model.writable_members().any(|member| {
            matches!(
                member.conversion,
                Conversion::Nested { .. } | Conversion::Enumerable { .. }
            )
        });

        let context_decl = if needs_context {
            quote!(let #context = &mut #mapto::MappingContext::new();)
        } else {
            quote!()
        };

        let assignments = self.model.writable_members().filter_map(|member| {
            let field = &self.target.members.get(&member.name)?.access;
            let value = self.expand_conversion(member);
            Some(quote!(self.#field = #value;))
        });

        let doc = self.doc(&format!(
            "Overwrites the writable members of this `{}` with the values of a `{}`.",
            self.model.type_name, self.model.source_type_name,
        ));

        quote! {
            #doc
            #vis fn #update(&mut self, #source: &#source_path) {
                #context_decl
                #( #assignments )*
            }
        }
    }

    pub(super) fn expand_to_json(&self) -> TokenStream {
        if !self.model.json_extension {
            return quote!();
        }

        let mapto = &self.mapto;
        let vis = self.vis();

        let doc = self.doc(&format!(
            "Serializes this `{}` to a JSON string.",
            self.model.type_name
        ));

        quote! {
            #doc
            #vis fn to_json(&self) -> #mapto::serde_json::Result<::std::string::String> {
                #mapto::serde_json::to_string(self)
            }
        }
    }
}
