use super::{Attribute, AttributeKind, Attributes, Member, Namespace, Ty, TypePath};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub path: TypePath,

    pub kind: TypeKind,

    /// Base type, for classes
    pub base: Option<TypePath>,

    /// Implemented interfaces, with their generic arguments
    pub interfaces: Vec<TypePath>,

    /// Declared members, in declaration order. Inherited members are not
    /// included.
    pub members: Vec<Member>,

    pub constructors: Vec<Constructor>,

    pub attrs: Attributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Record,
    Interface,
}

/// A constructor of a type
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub params: Vec<Member>,

    /// Argument types forwarded to the constructor's initializer, if it
    /// delegates. `None` entries are arguments whose type is unknown.
    pub initializer: Option<Vec<Option<Ty>>>,

    /// Provided by the language rather than written by the user, e.g. a
    /// tuple struct's own constructor
    pub implicit: bool,
}

impl TypeDef {
    pub fn new(path: TypePath, kind: TypeKind) -> Self {
        Self {
            path,
            kind,
            base: None,
            interfaces: vec![],
            members: vec![],
            constructors: vec![],
            attrs: Attributes::new(),
        }
    }

    pub fn class(namespace: impl Into<Namespace>, name: impl Into<String>) -> Self {
        Self::new(TypePath::new(namespace, name), TypeKind::Class)
    }

    pub fn structure(namespace: impl Into<Namespace>, name: impl Into<String>) -> Self {
        Self::new(TypePath::new(namespace, name), TypeKind::Struct)
    }

    pub fn record(namespace: impl Into<Namespace>, name: impl Into<String>) -> Self {
        Self::new(TypePath::new(namespace, name), TypeKind::Record)
    }

    pub fn interface(namespace: impl Into<Namespace>, name: impl Into<String>) -> Self {
        Self::new(TypePath::new(namespace, name), TypeKind::Interface)
    }

    pub fn base(mut self, base: TypePath) -> Self {
        self.base = Some(base);
        self
    }

    pub fn implements(mut self, interface: TypePath) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }

    pub fn map_from(&self) -> Option<&TypePath> {
        self.attrs.map_from()
    }

    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.attrs.has(kind)
    }

    pub fn name(&self) -> &str {
        &self.path.name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.path.namespace
    }

    pub fn full_name(&self) -> String {
        self.path.definition_name()
    }

    /// A reference to this type
    pub fn ty(&self) -> Ty {
        Ty::Path(self.path.clone())
    }

    /// The constructor with the most parameters. The first one declared wins
    /// a tie.
    pub fn widest_constructor(&self) -> Option<&Constructor> {
        self.constructors
            .iter()
            .reduce(|widest, ctor| {
                if ctor.params.len() > widest.params.len() {
                    ctor
                } else {
                    widest
                }
            })
    }
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
            TypeKind::Interface => "interface",
        }
    }
}

impl Constructor {
    pub fn new(params: Vec<Member>) -> Self {
        Self {
            params,
            initializer: None,
            implicit: false,
        }
    }

    pub fn implicit(params: Vec<Member>) -> Self {
        Self {
            implicit: true,
            ..Self::new(params)
        }
    }

    pub fn forwards(mut self, args: Vec<Option<Ty>>) -> Self {
        self.initializer = Some(args);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MemberKind, Primitive};

    fn param(name: &str) -> Member {
        Member::new(name, Primitive::I32).kind(MemberKind::Parameter)
    }

    #[test]
    fn widest_constructor_prefers_first_on_tie() {
        let def = TypeDef::record("app", "Point")
            .constructor(Constructor::new(vec![param("x")]))
            .constructor(Constructor::new(vec![param("x"), param("y")]))
            .constructor(Constructor::new(vec![param("a"), param("b")]));

        let widest = def.widest_constructor().unwrap();
        assert_eq!(widest.params[0].name, "x");
        assert_eq!(widest.params.len(), 2);

        assert!(TypeDef::record("app", "Unit").widest_constructor().is_none());
    }
}
