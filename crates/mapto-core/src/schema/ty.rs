use super::Namespace;

use serde::Serialize;

/// The declared type of a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum Ty {
    /// A built-in scalar
    Primitive(Primitive),

    /// A nominal type, possibly generic
    Path(TypePath),

    /// A reference to any implementation of an interface (`Box<dyn Trait>`)
    Dyn(TypePath),
}

/// A nominal type reference: namespace, name and generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypePath {
    pub namespace: Namespace,
    pub name: String,
    pub args: Vec<Ty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
}

impl Ty {
    pub fn path(namespace: impl Into<Namespace>, name: impl Into<String>) -> Ty {
        Ty::Path(TypePath::new(namespace, name))
    }

    /// `Option<inner>`
    pub fn option(inner: Ty) -> Ty {
        Ty::Path(TypePath::new(Namespace::global(), "Option").with_args(vec![inner]))
    }

    /// `Vec<element>`
    pub fn vec(element: Ty) -> Ty {
        Ty::Path(TypePath::new(Namespace::global(), "Vec").with_args(vec![element]))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Ty::Primitive(_))
    }

    pub fn as_path(&self) -> Option<&TypePath> {
        match self {
            Ty::Path(path) => Some(path),
            _ => None,
        }
    }

    /// The namespace the type is declared in; primitives have none
    pub fn namespace(&self) -> Option<&Namespace> {
        match self {
            Ty::Path(path) | Ty::Dyn(path) => Some(&path.namespace),
            Ty::Primitive(_) => None,
        }
    }
}

impl From<Primitive> for Ty {
    fn from(primitive: Primitive) -> Ty {
        Ty::Primitive(primitive)
    }
}

impl From<TypePath> for Ty {
    fn from(path: TypePath) -> Ty {
        Ty::Path(path)
    }
}

impl TypePath {
    pub fn new(namespace: impl Into<Namespace>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            args: vec![],
        }
    }

    pub fn with_args(mut self, args: Vec<Ty>) -> Self {
        self.args = args;
        self
    }

    /// `ns::Name`, without generic arguments. Identifies the declaration.
    pub fn definition_name(&self) -> String {
        if self.namespace.is_global() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    /// `ns::Name<Args>`
    pub fn full_name(&self) -> String {
        let mut name = self.definition_name();
        write_args(&mut name, &self.args);
        name
    }
}

impl core::fmt::Display for TypePath {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut name = self.name.clone();
        write_args(&mut name, &self.args);
        f.write_str(&name)
    }
}

impl core::fmt::Display for Ty {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Ty::Primitive(primitive) => f.write_str(primitive.name()),
            Ty::Path(path) => core::fmt::Display::fmt(path, f),
            Ty::Dyn(path) => write!(f, "Box<dyn {path}>"),
        }
    }
}

fn write_args(out: &mut String, args: &[Ty]) {
    if args.is_empty() {
        return;
    }

    let args: Vec<_> = args.iter().map(ToString::to_string).collect();
    out.push('<');
    out.push_str(&args.join(", "));
    out.push('>');
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Primitive> {
        use Primitive::*;

        Some(match name {
            "bool" => Bool,
            "char" => Char,
            "i8" => I8,
            "i16" => I16,
            "i32" => I32,
            "i64" => I64,
            "i128" => I128,
            "isize" => Isize,
            "u8" => U8,
            "u16" => U16,
            "u32" => U32,
            "u64" => U64,
            "u128" => U128,
            "usize" => Usize,
            "f32" => F32,
            "f64" => F64,
            "String" => String,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        use Primitive::*;

        match self {
            Bool => "bool",
            Char => "char",
            I8 => "i8",
            I16 => "i16",
            I32 => "i32",
            I64 => "i64",
            I128 => "i128",
            Isize => "isize",
            U8 => "u8",
            U16 => "u16",
            U32 => "u32",
            U64 => "u64",
            U128 => "u128",
            Usize => "usize",
            F32 => "f32",
            F64 => "f64",
            String => "String",
        }
    }

    /// Returns `true` if every value of `self` converts to `target` without
    /// loss, mirroring the standard library's `From` impls between scalars.
    pub fn widens_to(self, target: Primitive) -> bool {
        use Primitive::*;

        matches!(
            (self, target),
            (U8, U16 | U32 | U64 | U128 | Usize | I16 | I32 | I64 | I128 | Isize | F32 | F64 | Char)
                | (U16, U32 | U64 | U128 | Usize | I32 | I64 | I128 | F32 | F64)
                | (U32, U64 | U128 | I64 | I128 | F64)
                | (U64, U128 | I128)
                | (I8, I16 | I32 | I64 | I128 | Isize | F32 | F64)
                | (I16, I32 | I64 | I128 | Isize | F32 | F64)
                | (I32, I64 | I128 | F64)
                | (I64, I128)
                | (F32, F64)
                | (Char, U32 | U64 | U128)
        )
    }
}
