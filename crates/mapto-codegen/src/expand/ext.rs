use super::Expand;

use heck::{ToSnakeCase, ToUpperCamelCase};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

impl Expand<'_> {
    /// `MapFrom` and `From` impls, and the extension trait impls. A source
    /// alone must be enough to build the target.
    pub(super) fn expand_conversions(&self) -> TokenStream {
        if !self.model.is_infallible_from_source() {
            return quote!();
        }

        let mapto = &self.mapto;
        let ident = &self.target.ident;
        let context = &self.context;
        let source = &self.source_ident;
        let source_path = self.source_path();
        let with_context = self.with_context_ident();
        let trait_ident = self.ext_trait_ident();
        let to_target = self.to_target_ident();

        let optional = if self.options().support_nullable_reference_types {
            quote! {
                impl #trait_ident for ::core::option::Option<&#source_path> {
                    type Output = ::core::option::Option<#ident>;

                    fn #to_target(self) -> Self::Output {
                        self.map(<#ident as ::core::convert::From<&#source_path>>::from)
                    }
                }
            }
        } else {
            quote!()
        };

        quote! {
            impl #mapto::MapFrom<#source_path> for #ident {
                fn map_from_with_context<'a>(
                    #context: &mut #mapto::MappingContext<'a>,
                    #source: &'a #source_path,
                ) -> Self {
                    Self::#with_context(#context, #source)
                }
            }

            impl ::core::convert::From<&#source_path> for #ident {
                fn from(#source: &#source_path) -> Self {
                    Self::#with_context(&mut #mapto::MappingContext::new(), #source)
                }
            }

            impl #trait_ident for &#source_path {
                type Output = #ident;

                fn #to_target(self) -> Self::Output {
                    <#ident as ::core::convert::From<Self>>::from(self)
                }
            }

            #optional
        }
    }

    /// `<Source>To<Target>`, declared next to the target so that it can be
    /// imported with it
    pub(super) fn expand_ext_trait(&self) -> TokenStream {
        if !self.model.is_infallible_from_source() {
            return quote!();
        }

        let vis = self.vis();
        let trait_ident = self.ext_trait_ident();
        let to_target = self.to_target_ident();

        let doc = self.doc(&format!(
            "Maps a `{}` into a `{}`.",
            self.model.source_type_name, self.model.type_name,
        ));

        quote! {
            #doc
            #vis trait #trait_ident {
                type Output;

                fn #to_target(self) -> Self::Output;
            }
        }
    }

    fn ext_trait_ident(&self) -> syn::Ident {
        format_ident!(
            "{}To{}",
            self.model.source_type_name.to_upper_camel_case(),
            self.model.type_name.to_upper_camel_case()
        )
    }

    fn to_target_ident(&self) -> syn::Ident {
        format_ident!("to_{}", self.model.type_name.to_snake_case())
    }
}
