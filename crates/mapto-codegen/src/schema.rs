mod ctor;

mod member_attr;
use member_attr::MemberAttr;

mod ty;
use ty::Types;

mod type_attr;
use type_attr::TypeAttr;

mod walk;
use walk::Scoped;

use crate::error::ErrorSet;

use indexmap::IndexMap;
use mapto_core::schema::{
    Attribute, Constructor, KnownTypes, Member, MemberKind, Namespace, Schema, Ty, TypeDef,
    TypeKind, TypePath,
};
use mapto_core::Location;
use proc_macro2::Span;
use quote::format_ident;
use syn::ext::IdentExt;
use syn::spanned::Spanned;

/// The lowered module tree: the schema the engine resolves over, and the
/// syntax the emitter needs to refer back to
#[derive(Debug)]
pub(crate) struct Input {
    pub(crate) schema: Schema,

    /// Declarations by full name, in declaration order
    pub(crate) decls: IndexMap<String, Decl>,

    /// Namespace of the outermost module
    pub(crate) root: Namespace,
}

#[derive(Debug)]
pub(crate) struct Decl {
    pub(crate) ident: syn::Ident,

    pub(crate) namespace: Namespace,

    pub(crate) shape: Shape,

    /// The source type as written in `#[map_from(...)]`
    pub(crate) source: Option<syn::Path>,

    /// The `#[map_base]` field
    pub(crate) base: Option<BaseField>,

    /// Members by name. For tuple structs, the parameters of the widest
    /// constructor in order.
    pub(crate) members: IndexMap<String, MemberDecl>,

    /// The associated function building a tuple struct from its members.
    /// `None` when the tuple constructor itself is the widest.
    pub(crate) record_ctor: Option<syn::Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Named,
    Tuple,
    Unit,
    Enum,
    Trait,
}

#[derive(Debug)]
pub(crate) struct BaseField {
    pub(crate) ident: syn::Ident,
    pub(crate) ty: syn::Type,
    pub(crate) path: TypePath,
}

#[derive(Debug, Clone)]
pub(crate) struct MemberDecl {
    /// Binding used when the member is taken as a parameter
    pub(crate) ident: syn::Ident,

    /// `value.<access>` reads the member
    pub(crate) access: syn::Member,

    pub(crate) ty: syn::Type,

    /// The converter as written in `#[converter(...)]`
    pub(crate) converter: Option<syn::Path>,

    pub(crate) span: Span,
}

/// Returns `true` for attributes the generator consumes
pub(crate) fn is_helper(attr: &syn::Attribute) -> bool {
    type_attr::NAMES
        .iter()
        .chain(member_attr::NAMES)
        .any(|name| attr.path().is_ident(name))
}

impl Input {
    /// Lowers the items of a module tree rooted at `root`
    pub(crate) fn from_items(root: Namespace, items: &[syn::Item]) -> syn::Result<Input> {
        let namespaces = walk::namespaces(&root, items);
        let items = walk::collect(&namespaces, items);

        let mut lower = Lower::default();

        for scoped in &items.structs {
            lower.types.declare(scoped.item.ident.unraw().to_string(), scoped.namespace);
        }

        for scoped in &items.enums {
            lower.types.declare(scoped.item.ident.unraw().to_string(), scoped.namespace);
        }

        for scoped in &items.traits {
            lower.types.declare(scoped.item.ident.unraw().to_string(), scoped.namespace);
        }

        for scoped in &items.structs {
            lower.lower_struct(*scoped);
        }

        for scoped in &items.enums {
            lower.lower_enum(*scoped);
        }

        for scoped in &items.traits {
            lower.lower_trait(*scoped);
        }

        for scoped in &items.impls {
            lower.lower_impl(*scoped);
        }

        lower.finish(root)
    }

    /// The declaration of a mapped type, by bare name
    pub(crate) fn decl_by_name(&self, name: &str) -> Option<&Decl> {
        let mut named = self.decls.values().filter(|decl| decl.ident.unraw() == name);
        let first = named.next()?;

        if first.source.is_some() {
            return Some(first);
        }

        named.find(|decl| decl.source.is_some()).or(Some(first))
    }

    /// Where a diagnostic points to in the input
    pub(crate) fn span_of(&self, location: &Location) -> Span {
        let Some(decl) = self.decl_by_name(&location.type_name) else {
            return Span::call_site();
        };

        location
            .member
            .as_ref()
            .and_then(|member| decl.members.get(member))
            .map(|member| member.span)
            .unwrap_or_else(|| decl.ident.span())
    }
}

/// A constructor pending the choice of a tuple struct's widest one
#[derive(Debug)]
struct PendingCtor {
    /// `None` for the tuple constructor
    ident: Option<syn::Ident>,
    params: Vec<(String, MemberDecl)>,
}

#[derive(Debug, Default)]
struct Lower {
    types: Types,
    known: KnownTypes,
    defs: IndexMap<String, (TypeDef, Decl)>,
    ctors: IndexMap<String, Vec<PendingCtor>>,
    errs: ErrorSet,
}

impl Lower {
    fn lower_struct(&mut self, scoped: Scoped<'_, syn::ItemStruct>) {
        let item = scoped.item;
        let namespace = scoped.namespace;
        let name = item.ident.unraw().to_string();

        let attr = self.errs.check(TypeAttr::from_ast(&item.attrs)).unwrap_or_default();

        if attr.map_from.is_some() && !item.generics.params.is_empty() {
            self.errs.push(syn::Error::new_spanned(
                &item.generics,
                "types with #[map_from] cannot be generic",
            ));
        }

        let mut decl = Decl {
            ident: item.ident.clone(),
            namespace: namespace.clone(),
            shape: Shape::Unit,
            source: attr.map_from.clone(),
            base: None,
            members: IndexMap::new(),
            record_ctor: None,
        };

        let mut def = TypeDef::structure(namespace.clone(), name.clone());
        self.type_attrs(&mut def, &attr, namespace);

        match &item.fields {
            syn::Fields::Named(fields) => {
                decl.shape = Shape::Named;

                for field in &fields.named {
                    let Some(ident) = &field.ident else { continue };
                    let Some(field_attr) = self.errs.check(MemberAttr::from_ast(&field.attrs))
                    else {
                        continue;
                    };

                    if field_attr.map_base {
                        self.base_field(&mut decl, ident, field);
                        continue;
                    }

                    let name = ident.unraw().to_string();
                    let member_decl = MemberDecl {
                        ident: ident.clone(),
                        access: syn::Member::Named(ident.clone()),
                        ty: field.ty.clone(),
                        converter: field_attr.converter.as_ref().map(|c| c.path.clone()),
                        span: ident.span(),
                    };

                    def.members
                        .push(self.member(&name, &field.ty, namespace, field_attr, MemberKind::Field));
                    decl.members.insert(name, member_decl);
                }
            }
            syn::Fields::Unnamed(fields) => {
                decl.shape = Shape::Tuple;
                def.kind = TypeKind::Record;

                let mut params = vec![];
                let mut pending = vec![];

                for (index, field) in fields.unnamed.iter().enumerate() {
                    let Some(field_attr) = self.errs.check(MemberAttr::from_ast(&field.attrs))
                    else {
                        continue;
                    };

                    if field_attr.map_base {
                        self.errs.push(syn::Error::new_spanned(
                            field,
                            "#[map_base] requires a named field",
                        ));
                        continue;
                    }

                    let name = index.to_string();
                    let member_decl = MemberDecl {
                        ident: format_ident!("field_{index}"),
                        access: syn::Member::Unnamed(index.into()),
                        ty: field.ty.clone(),
                        converter: field_attr.converter.as_ref().map(|c| c.path.clone()),
                        span: field.ty.span(),
                    };

                    let member = self.member(&name, &field.ty, namespace, field_attr, MemberKind::Field);

                    params.push(member.clone().kind(MemberKind::Parameter).read_only());
                    def.members.push(member);
                    pending.push((name, member_decl));
                }

                def.constructors.push(Constructor::implicit(params));
                self.ctors
                    .entry(def.full_name())
                    .or_default()
                    .push(PendingCtor {
                        ident: None,
                        params: pending,
                    });
            }
            syn::Fields::Unit => {}
        }

        if let Some(base) = &decl.base {
            def.kind = TypeKind::Class;
            def.base = Some(base.path.clone());
        }

        self.defs.insert(def.full_name(), (def, decl));
    }

    fn lower_enum(&mut self, scoped: Scoped<'_, syn::ItemEnum>) {
        let item = scoped.item;

        if let Some(attr) = self.errs.check(TypeAttr::from_ast(&item.attrs)) {
            if !attr.is_empty() {
                self.errs.push(syn::Error::new_spanned(
                    &item.ident,
                    "mapping attributes are only supported on structs",
                ));
            }
        }

        let def = TypeDef::structure(scoped.namespace.clone(), item.ident.unraw().to_string());
        self.declare(def, &item.ident, scoped.namespace, Shape::Enum);
    }

    fn lower_trait(&mut self, scoped: Scoped<'_, syn::ItemTrait>) {
        let item = scoped.item;
        let def = TypeDef::interface(scoped.namespace.clone(), item.ident.unraw().to_string());
        self.declare(def, &item.ident, scoped.namespace, Shape::Trait);
    }

    fn declare(&mut self, def: TypeDef, ident: &syn::Ident, namespace: &Namespace, shape: Shape) {
        let decl = Decl {
            ident: ident.clone(),
            namespace: namespace.clone(),
            shape,
            source: None,
            base: None,
            members: IndexMap::new(),
            record_ctor: None,
        };

        self.defs.insert(def.full_name(), (def, decl));
    }

    fn lower_impl(&mut self, scoped: Scoped<'_, syn::ItemImpl>) {
        let item = scoped.item;
        let namespace = scoped.namespace;

        let syn::Type::Path(self_ty) = &*item.self_ty else {
            return;
        };

        if self_ty.qself.is_some() {
            return;
        }

        let key = self.types.path(&self_ty.path, namespace).definition_name();

        if !self.defs.contains_key(&key) {
            return;
        }

        if let Some((negative, path, _)) = &item.trait_ {
            if negative.is_none() {
                let interface = self.types.path(path, namespace);

                if let Some((def, _)) = self.defs.get_mut(&key) {
                    def.interfaces.push(interface);
                }
            }

            return;
        }

        let Some(type_name) = self.defs.get(&key).map(|(def, _)| def.name().to_string()) else {
            return;
        };

        for impl_item in &item.items {
            let syn::ImplItem::Fn(function) = impl_item else {
                continue;
            };

            if !ctor::is_constructor(&function.sig, &type_name) {
                continue;
            }

            let mut params = vec![];
            let mut pending = vec![];

            for (index, input) in function.sig.inputs.iter().enumerate() {
                let syn::FnArg::Typed(pat_type) = input else {
                    continue;
                };

                let Some(param_attr) = self.errs.check(MemberAttr::from_ast(&pat_type.attrs))
                else {
                    continue;
                };

                let ident = match &*pat_type.pat {
                    syn::Pat::Ident(pat) => pat.ident.clone(),
                    _ => format_ident!("arg_{index}"),
                };

                let name = ident.unraw().to_string();
                let member_decl = MemberDecl {
                    ident: ident.clone(),
                    access: syn::Member::Unnamed(index.into()),
                    ty: (*pat_type.ty).clone(),
                    converter: param_attr.converter.as_ref().map(|c| c.path.clone()),
                    span: ident.span(),
                };

                let member = self.member(
                    &name,
                    &pat_type.ty,
                    namespace,
                    param_attr,
                    MemberKind::Parameter,
                );

                params.push(member);
                pending.push((name, member_decl));
            }

            let typed: Vec<_> = params
                .iter()
                .map(|param| (param.name.clone(), param.ty.clone()))
                .collect();

            let constructor = Constructor {
                params,
                initializer: ctor::initializer(&function.block, &type_name, &typed, &self.known),
                implicit: false,
            };

            if let Some((def, _)) = self.defs.get_mut(&key) {
                def.constructors.push(constructor);
            }

            self.ctors.entry(key.clone()).or_default().push(PendingCtor {
                ident: Some(function.sig.ident.clone()),
                params: pending,
            });
        }
    }

    fn type_attrs(&mut self, def: &mut TypeDef, attr: &TypeAttr, namespace: &Namespace) {
        if let Some(source) = &attr.map_from {
            def.attrs.push(Attribute::MapFrom(self.types.path(source, namespace)));
        }

        if attr.use_update {
            def.attrs.push(Attribute::UseUpdate);
        }

        if attr.json_extension {
            def.attrs.push(Attribute::JsonExtension);
        }
    }

    fn member(
        &self,
        name: &str,
        ty: &syn::Type,
        namespace: &Namespace,
        attr: MemberAttr,
        kind: MemberKind,
    ) -> Member {
        let mut member = Member::new(name, self.types.ty(ty, namespace)).kind(kind);

        if attr.read_only || kind == MemberKind::Parameter {
            member = member.read_only();
        }

        if let Some(source) = attr.map_property {
            member = member.attr(Attribute::map_property(source.value()));
        }

        if attr.ignore {
            member = member.attr(Attribute::IgnoreMember);
        }

        if let Some(converter) = attr.converter {
            let path = self.types.path(&converter.path, namespace);
            member = member.attr(Attribute::converter(path, converter.params));
        }

        member
    }

    fn base_field(&mut self, decl: &mut Decl, ident: &syn::Ident, field: &syn::Field) {
        if decl.base.is_some() {
            self.errs.push(syn::Error::new_spanned(
                ident,
                "only one #[map_base] field is allowed",
            ));
            return;
        }

        match self.types.ty(&field.ty, &decl.namespace) {
            Ty::Path(path) => {
                decl.base = Some(BaseField {
                    ident: ident.clone(),
                    ty: field.ty.clone(),
                    path,
                })
            }
            _ => self.errs.push(syn::Error::new_spanned(
                &field.ty,
                "#[map_base] field must hold a struct",
            )),
        }
    }

    /// Picks the members of tuple structs from their widest constructor
    fn settle_records(&mut self) {
        for (key, (_, decl)) in &mut self.defs {
            if decl.shape != Shape::Tuple {
                continue;
            }

            let Some(ctors) = self.ctors.get_mut(key) else {
                continue;
            };

            let widest = ctors
                .iter()
                .enumerate()
                .fold(None::<(usize, usize)>, |widest, (index, ctor)| match widest {
                    Some((_, len)) if ctor.params.len() <= len => widest,
                    _ => Some((index, ctor.params.len())),
                });

            let Some((index, _)) = widest else { continue };

            let ctor = ctors.swap_remove(index);

            for (position, (name, mut member)) in ctor.params.into_iter().enumerate() {
                member.access = syn::Member::Unnamed(position.into());
                decl.members.insert(name, member);
            }

            decl.record_ctor = ctor.ident;
        }
    }

    /// Every base of a mapped struct must be a declared mapped struct
    fn verify_bases(&mut self) {
        for (def, decl) in self.defs.values() {
            let Some(base) = &decl.base else { continue };

            match self.defs.get(&base.path.definition_name()) {
                None => self.errs.push(syn::Error::new_spanned(
                    &base.ty,
                    format!("base type `{}` is not declared", base.path.full_name()),
                )),
                Some((base_def, _)) if def.map_from().is_some() && base_def.map_from().is_none() => {
                    self.errs.push(syn::Error::new_spanned(
                        &base.ty,
                        format!(
                            "base type `{}` of a mapped type must have #[map_from]",
                            base_def.name()
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    fn finish(mut self, root: Namespace) -> syn::Result<Input> {
        self.settle_records();
        self.verify_bases();

        let Lower {
            known, defs, errs, ..
        } = self;

        errs.finish()?;

        let mut builder = Schema::builder();
        builder.known_types(known);

        let mut decls = IndexMap::with_capacity(defs.len());

        for (key, (def, decl)) in defs {
            builder.add(def);
            decls.insert(key, decl);
        }

        let schema = builder
            .build()
            .map_err(|err| syn::Error::new(Span::call_site(), err))?;

        Ok(Input {
            schema,
            decls,
            root,
        })
    }
}
