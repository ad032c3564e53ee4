use super::{Attribute, AttributeKind, Attributes, Literal, Ty, TypePath};

use serde::Serialize;

/// A data member of a type: a field, a property or a constructor parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,

    pub ty: Ty,

    pub kind: MemberKind,

    /// Read-only members can only be set at construction
    pub read_only: bool,

    /// Full name of the enclosing type. Set by the schema builder.
    pub declared_in: String,

    pub attrs: Attributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Property,
    Parameter,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: impl Into<Ty>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            kind: MemberKind::Field,
            read_only: false,
            declared_in: String::new(),
            attrs: Attributes::new(),
        }
    }

    pub fn kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }

    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.attrs.has(kind)
    }

    /// The explicit source member name, if renamed
    pub fn rename(&self) -> Option<&str> {
        match self.attrs.get(AttributeKind::MapProperty)? {
            Attribute::MapProperty { source } => Some(source),
            _ => None,
        }
    }

    /// The name used to find this member's counterpart
    pub fn lookup_name(&self) -> &str {
        self.rename().unwrap_or(&self.name)
    }

    pub fn is_ignored(&self) -> bool {
        self.attrs.has(AttributeKind::IgnoreMember)
    }

    /// The converter type and its constructor parameters
    pub fn converter(&self) -> Option<(&TypePath, &[Literal])> {
        match self.attrs.get(AttributeKind::Converter)? {
            Attribute::Converter {
                converter,
                parameters,
            } => Some((converter, parameters)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Primitive;

    #[test]
    fn rename_overrides_lookup_name() {
        let member = Member::new("full_name", Primitive::String);
        assert_eq!(member.lookup_name(), "full_name");

        let member = member.attr(Attribute::map_property("name"));
        assert_eq!(member.rename(), Some("name"));
        assert_eq!(member.lookup_name(), "name");
    }

    #[test]
    fn converter_parameters() {
        let member = Member::new("created", Primitive::String).attr(Attribute::converter(
            TypePath::new("app::conv", "DateFormat"),
            vec![Literal::from("%Y")],
        ));

        let (converter, params) = member.converter().unwrap();
        assert_eq!(converter.name, "DateFormat");
        assert_eq!(params, [Literal::from("%Y")]);
        assert!(!member.is_ignored());
    }
}
