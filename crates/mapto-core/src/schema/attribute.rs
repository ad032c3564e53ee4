use super::TypePath;

use serde::Serialize;

/// A marker recognized on a type or a member.
///
/// Front ends resolve annotations into this closed set once, while building
/// the schema. Resolution never inspects attribute names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribute {
    /// The type is generated from the named source type
    MapFrom(TypePath),

    /// The member is matched against a differently named source member
    MapProperty { source: String },

    /// The member is excluded from mapping
    IgnoreMember,

    /// The member is produced by a user-supplied converter
    Converter {
        converter: TypePath,
        parameters: Vec<Literal>,
    },

    /// An update method is generated for the type
    UseUpdate,

    /// A JSON serialization method is generated for the type
    JsonExtension,
}

/// Discriminant of [`Attribute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    MapFrom,
    MapProperty,
    IgnoreMember,
    Converter,
    UseUpdate,
    JsonExtension,
}

/// A literal converter parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Char(char),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Vec<Attribute>);

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::MapFrom(_) => AttributeKind::MapFrom,
            Attribute::MapProperty { .. } => AttributeKind::MapProperty,
            Attribute::IgnoreMember => AttributeKind::IgnoreMember,
            Attribute::Converter { .. } => AttributeKind::Converter,
            Attribute::UseUpdate => AttributeKind::UseUpdate,
            Attribute::JsonExtension => AttributeKind::JsonExtension,
        }
    }

    pub fn converter(converter: TypePath, parameters: Vec<Literal>) -> Self {
        Attribute::Converter {
            converter,
            parameters,
        }
    }

    pub fn map_property(source: impl Into<String>) -> Self {
        Attribute::MapProperty {
            source: source.into(),
        }
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attr: Attribute) {
        self.0.push(attr);
    }

    pub fn has(&self, kind: AttributeKind) -> bool {
        self.get(kind).is_some()
    }

    /// The first attribute of the given kind
    pub fn get(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.0.iter().find(|attr| attr.kind() == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn map_from(&self) -> Option<&TypePath> {
        match self.get(AttributeKind::MapFrom)? {
            Attribute::MapFrom(source) => Some(source),
            _ => None,
        }
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<char> for Literal {
    fn from(value: char) -> Self {
        Literal::Char(value)
    }
}

impl core::fmt::Display for Literal {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value:?}"),
            Literal::Str(value) => write!(f, "{value:?}"),
            Literal::Char(value) => write!(f, "{value:?}"),
        }
    }
}
