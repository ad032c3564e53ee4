use super::{util, Expand};
use crate::schema::Shape;

use mapto_core::mapping::compat;
use mapto_core::schema::{Ty, TypePath};
use mapto_core::{mapping::Conversion, MappedMember};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

impl Expand<'_> {
    pub(super) fn expand_constructors(&self) -> TokenStream {
        let mapto = &self.mapto;
        let vis = self.vis();
        let context = &self.context;
        let source = &self.source_ident;
        let source_path = self.source_path();
        let with_context = self.with_context_ident();
        let body = self.expand_construct_expr();

        let extra_params = self.model.extra_parameters.iter().filter_map(|extra| {
            let member = self.target.members.get(&extra.name)?;
            let ident = &member.ident;
            let ty = &member.ty;
            Some(quote!(#ident: #ty))
        });

        let extra_args: Vec<_> = self
            .model
            .extra_parameters
            .iter()
            .filter_map(|extra| self.target.members.get(&extra.name))
            .map(|member| &member.ident)
            .collect();

        let extra_params: Vec<_> = extra_params.collect();

        let with_context_doc = self.doc(&format!(
            "Creates a `{}` from a `{}`, reusing values already mapped through `context`.",
            self.model.type_name, self.model.source_type_name,
        ));

        let secondary = if self.model.generate_secondary_constructor {
            let from = self.from_ident();
            let doc = self.doc(&format!(
                "Creates a `{}` from a `{}`.",
                self.model.type_name, self.model.source_type_name,
            ));

            quote! {
                #doc
                #vis fn #from(#source: &#source_path, #( #extra_params ),*) -> Self {
                    Self::#with_context(&mut #mapto::MappingContext::new(), #source, #( #extra_args ),*)
                }
            }
        } else {
            quote!()
        };

        quote! {
            #with_context_doc
            #vis fn #with_context<'a>(
                #context: &mut #mapto::MappingContext<'a>,
                #source: &'a #source_path,
                #( #extra_params ),*
            ) -> Self {
                #body
            }

            #secondary
        }
    }

    /// Builds `Self` from the source, the extra parameters and defaults
    fn expand_construct_expr(&self) -> TokenStream {
        let values: Vec<_> = self
            .target
            .members
            .iter()
            .map(|(name, member)| (&member.access, self.expand_member_value(name)))
            .collect();

        match self.target.shape {
            Shape::Named => {
                let base = self.target.base.as_ref().map(|base| {
                    let ident = &base.ident;
                    let value = self.expand_base_value(&base.ty);
                    quote!(#ident: #value,)
                });

                let fields = values.iter().map(|(access, value)| quote!(#access: #value));

                quote!(Self { #base #( #fields ),* })
            }
            Shape::Tuple => {
                let values = values.iter().map(|(_, value)| value);

                match &self.target.record_ctor {
                    Some(ctor) => quote!(Self::#ctor(#( #values ),*)),
                    None => quote!(Self(#( #values ),*)),
                }
            }
            _ => quote!(Self),
        }
    }

    /// The value a target member is constructed with
    fn expand_member_value(&self, name: &str) -> TokenStream {
        if let Some(mapped) = self
            .model
            .source_members
            .iter()
            .find(|mapped| mapped.name == name)
        {
            return self.expand_conversion(mapped);
        }

        if self.model.extra_parameters.iter().any(|extra| extra.name == name) {
            if let Some(member) = self.target.members.get(name) {
                let ident = &member.ident;
                return quote!(#ident);
            }
        }

        quote!(::core::default::Default::default())
    }

    /// Converts the source member of `mapped` into the target member's type
    pub(super) fn expand_conversion(&self, mapped: &MappedMember) -> TokenStream {
        let mapto = &self.mapto;
        let context = &self.context;
        let access = self.expand_source_access(&mapped.source_name);
        let cloned = quote!(::core::clone::Clone::clone(&#access));

        match &mapped.conversion {
            Conversion::Direct => match (&mapped.source_ty, &mapped.ty) {
                (Ty::Dyn(_), _) => cloned,
                (_, Ty::Dyn(_)) => quote!(::std::boxed::Box::new(#cloned)),
                (source, target) if compat::needs_into(source, target) => {
                    quote!(::core::convert::Into::into(#cloned))
                }
                _ => cloned,
            },
            Conversion::Converter {
                converter,
                parameters,
            } => {
                let converter = match self
                    .target
                    .members
                    .get(&mapped.name)
                    .and_then(|member| member.converter.as_ref())
                {
                    Some(path) => quote!(#path),
                    None => {
                        let ident = format_ident!("{}", converter.name);
                        quote!(#ident)
                    }
                };

                let params = parameters.iter().map(util::literal);

                quote! {
                    #mapto::TypeConverter::convert(
                        &<#converter as ::core::default::Default>::default(),
                        #cloned,
                        &[#( #mapto::Param::from(#params) ),*],
                    )
                }
            }
            Conversion::Nested { .. } => {
                quote!(#context.map_from_with_context(&#access))
            }
            Conversion::Enumerable { .. } => {
                quote! {
                    #access
                        .iter()
                        .map(|element| #context.map_from_with_context(element))
                        .collect()
                }
            }
        }
    }

    /// The inherited part of the target, mapped from the matching part of
    /// the source
    fn expand_base_value(&self, ty: &syn::Type) -> TokenStream {
        let mapto = &self.mapto;
        let context = &self.context;
        let source = &self.source_ident;

        let base_source = match &self.model.base_source {
            Some(base_source) => match self.base_access(base_source) {
                Some(access) => quote!(&#access),
                None => quote!(::core::convert::AsRef::as_ref(#source)),
            },
            None => quote!(#source),
        };

        quote!(<#ty as #mapto::MapFrom<_>>::map_from_with_context(#context, #base_source))
    }

    /// Reads a member of the source, following `#[map_base]` fields to
    /// inherited members
    pub(super) fn expand_source_access(&self, name: &str) -> TokenStream {
        let source = &self.source_ident;
        let mut access = quote!(#source);

        let declared_in = self
            .input
            .schema
            .type_def(&self.source_path_ty())
            .and_then(|def| {
                self.input
                    .schema
                    .members(def, false)
                    .into_iter()
                    .chain(def.widest_constructor().into_iter().flat_map(|ctor| &ctor.params))
                    .find(|member| member.name == name)
            })
            .map(|member| member.declared_in.clone())
            .unwrap_or_else(|| self.model.source_full_name.clone());

        let mut current = self.source;
        let mut current_name = self.model.source_full_name.clone();

        while current_name != declared_in {
            let Some(base) = &current.base else { break };
            let Some(next) = self.input.decls.get(&base.path.definition_name()) else {
                break;
            };

            let ident = &base.ident;
            access = quote!(#access.#ident);
            current = next;
            current_name = base.path.definition_name();
        }

        match current.members.get(name) {
            Some(member) => {
                let member = &member.access;
                quote!(#access.#member)
            }
            None => {
                let ident = util::member(name);
                quote!(#access.#ident)
            }
        }
    }

    /// Path from the source value to its base of type `base_source`
    fn base_access(&self, base_source: &TypePath) -> Option<TokenStream> {
        let target = base_source.definition_name();
        let source = &self.source_ident;

        let mut access = quote!(#source);
        let mut current = self.source;

        loop {
            let base = current.base.as_ref()?;
            let ident = &base.ident;
            access = quote!(#access.#ident);

            if base.path.definition_name() == target {
                return Some(access);
            }

            current = self.input.decls.get(&base.path.definition_name())?;
        }
    }

    fn source_path_ty(&self) -> TypePath {
        TypePath::new(
            self.model.source_namespace.clone(),
            &self.model.source_type_name,
        )
    }
}
