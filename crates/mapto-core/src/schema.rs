//! The type model the generator resolves mappings over
//!
//! Front ends lower their source language into this model: namespaces,
//! nominal types with their members, constructors, implemented interfaces
//! and recognized attributes. The model is built once per run and is
//! read-only afterwards.

mod attribute;
pub use attribute::{Attribute, AttributeKind, Attributes, Literal};

mod builder;
pub use builder::Builder;

mod known;
pub use known::KnownTypes;

mod member;
pub use member::{Member, MemberKind};

mod namespace;
pub use namespace::Namespace;

mod ty;
pub use ty::{Primitive, Ty, TypePath};

mod type_def;
pub use type_def::{Constructor, TypeDef, TypeKind};

use crate::{Error, Result};
use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    /// Declared types, keyed by their full path
    types: IndexMap<String, TypeDef>,

    /// Well-known types resolved for this run
    known: KnownTypes,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn known(&self) -> &KnownTypes {
        &self.known
    }

    /// Declared types in declaration order
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Get a type by path. Generic arguments on `path` are ignored.
    pub fn type_def(&self, path: &TypePath) -> Option<&TypeDef> {
        self.types.get(&path.definition_name())
    }

    /// Get the declaration behind a type reference, if it is a declared
    /// nominal type
    pub fn type_of(&self, ty: &Ty) -> Option<&TypeDef> {
        match ty {
            Ty::Path(path) | Ty::Dyn(path) => self.type_def(path),
            Ty::Primitive(_) => None,
        }
    }

    /// Get a type by its full name (`ns::Name`) or, when unambiguous, by its
    /// bare name.
    pub fn resolve(&self, name: &str) -> Result<&TypeDef> {
        if let Some(def) = self.types.get(name) {
            return Ok(def);
        }

        let mut matches = self.types.values().filter(|def| def.name() == name);

        match (matches.next(), matches.next()) {
            (Some(def), None) => Ok(def),
            _ => Err(Error::type_not_found(name)),
        }
    }

    /// Walks the base chain of `def`, nearest base first
    pub fn bases<'a>(&'a self, def: &'a TypeDef) -> impl Iterator<Item = &'a TypeDef> + 'a {
        let mut current = def;
        std::iter::from_fn(move || {
            let base = self.type_def(current.base.as_ref()?)?;
            current = base;
            Some(base)
        })
    }

    /// Members of `def`, inherited members first.
    ///
    /// When `declared_only` is set, members inherited from base types are
    /// excluded.
    pub fn members<'a>(&'a self, def: &'a TypeDef, declared_only: bool) -> Vec<&'a Member> {
        let mut members = vec![];

        if !declared_only {
            let bases: Vec<_> = self.bases(def).collect();

            for base in bases.into_iter().rev() {
                members.extend(base.members.iter());
            }
        }

        members.extend(def.members.iter());
        members
    }

    /// Every interface implemented by `def` or one of its bases
    pub fn all_interfaces<'a>(&'a self, def: &'a TypeDef) -> impl Iterator<Item = &'a TypePath> {
        std::iter::once(def)
            .chain(self.bases(def))
            .flat_map(|def| def.interfaces.iter())
    }

    /// Returns `true` if the type at `path` implements `interface`
    pub fn implements(&self, path: &TypePath, interface: &TypePath) -> bool {
        self.type_def(path)
            .is_some_and(|def| self.all_interfaces(def).any(|i| i == interface))
    }

    pub fn has_attribute(&self, member: &Member, kind: AttributeKind) -> bool {
        member.attrs.has(kind)
    }

    pub fn attribute<'a>(&self, member: &'a Member, kind: AttributeKind) -> Option<&'a Attribute> {
        member.attrs.get(kind)
    }

    pub fn is_primitive(&self, ty: &Ty) -> bool {
        ty.is_primitive()
    }

    /// Returns `true` for generic collections whose elements can be mapped
    /// one by one: well-known collection types and declared types that
    /// implement a well-known collection interface.
    pub fn is_generic_enumerable(&self, ty: &Ty) -> bool {
        let Ty::Path(path) = ty else {
            return false;
        };

        if path.args.len() == 1 && self.known.is_enumerable(path) {
            return true;
        }

        self.type_def(path).is_some_and(|def| {
            self.all_interfaces(def)
                .any(|interface| self.known.is_enumerable(interface))
        })
    }

    /// The element type of a generic enumerable
    pub fn enumerable_element<'a>(&self, ty: &'a Ty) -> Option<&'a Ty> {
        if !self.is_generic_enumerable(ty) {
            return None;
        }

        ty.as_path()?.args.first()
    }
}
