//! Resolution diagnostics
//!
//! A diagnostic records why a type could not be mapped. Diagnostics are
//! collected per mapped type in declaration order and never abort the run:
//! a type with diagnostics is excluded from generation while its siblings
//! are still processed.

use crate::schema::{Member, TypeDef, TypePath};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The mapped type itself could not be found
    TypeNotFound,

    /// The map-from directive is missing or does not name a known type
    MapFromAttributeNotFound,

    /// No member of the target resolved against the source
    NoMatchingPropertyFound,

    /// A member matched by name but no conversion tier applies
    NoMatchingPropertyTypeFound,

    /// A converter does not convert from the source member type to the
    /// target member type
    InvalidConverterGenericArguments,

    /// A user-written source constructor does not forward a mapping context
    /// and the source instance
    MissingConstructorArgument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Where a diagnostic applies: a type and, optionally, one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub type_name: String,
    pub member: Option<String>,
}

/// Ordered, append-only collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::TypeNotFound => "MT0001",
            DiagnosticKind::MapFromAttributeNotFound => "MT0002",
            DiagnosticKind::NoMatchingPropertyFound => "MT0003",
            DiagnosticKind::NoMatchingPropertyTypeFound => "MT0004",
            DiagnosticKind::InvalidConverterGenericArguments => "MT0005",
            DiagnosticKind::MissingConstructorArgument => "MT0006",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DiagnosticKind::TypeNotFound => "type not found",
            DiagnosticKind::MapFromAttributeNotFound => "map-from source type not found",
            DiagnosticKind::NoMatchingPropertyFound => "no matching property found",
            DiagnosticKind::NoMatchingPropertyTypeFound => "no matching property type found",
            DiagnosticKind::InvalidConverterGenericArguments => {
                "invalid converter generic arguments"
            }
            DiagnosticKind::MissingConstructorArgument => "missing constructor argument",
        }
    }

    pub fn severity(self) -> Severity {
        Severity::Error
    }
}

impl Location {
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: None,
        }
    }

    pub fn of_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: Some(member.into()),
        }
    }
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, location: Location, message: String) -> Self {
        Self {
            kind,
            location,
            message,
        }
    }

    pub fn type_not_found(type_name: &str) -> Self {
        Self::new(
            DiagnosticKind::TypeNotFound,
            Location::of_type(type_name),
            format!("unable to find type `{type_name}`"),
        )
    }

    pub fn map_from_attribute_not_found(target: &TypeDef) -> Self {
        let message = match target.map_from() {
            Some(source) => format!(
                "`{}` maps from `{}`, which is not declared",
                target.name(),
                source.full_name()
            ),
            None => format!("`{}` has no map-from source type", target.name()),
        };

        Self::new(
            DiagnosticKind::MapFromAttributeNotFound,
            Location::of_type(target.name()),
            message,
        )
    }

    pub fn no_matching_property_found(target: &TypeDef, source: &TypeDef) -> Self {
        Self::new(
            DiagnosticKind::NoMatchingPropertyFound,
            Location::of_type(target.name()),
            format!(
                "type `{}` does not have any members matching `{}`",
                target.name(),
                source.name()
            ),
        )
    }

    pub fn no_matching_property_type_found(target: &TypeDef, member: &Member) -> Self {
        Self::new(
            DiagnosticKind::NoMatchingPropertyTypeFound,
            Location::of_member(target.name(), &member.name),
            format!(
                "cannot map `{}` because the source and destination types are not \
                 implicitly convertible; consider a type converter or ignoring the member",
                member.name
            ),
        )
    }

    pub fn invalid_converter_generic_arguments(
        target: &TypeDef,
        member: &Member,
        source: &Member,
        converter: &TypePath,
    ) -> Self {
        Self::new(
            DiagnosticKind::InvalidConverterGenericArguments,
            Location::of_member(target.name(), &member.name),
            format!(
                "converter `{}` on `{}` must implement `TypeConverter<{}, {}>`",
                converter, member.name, source.ty, member.ty
            ),
        )
    }

    pub fn missing_constructor_argument(target: &TypeDef, source: &TypeDef) -> Self {
        Self::new(
            DiagnosticKind::MissingConstructorArgument,
            Location::of_type(target.name()),
            format!(
                "the constructor of `{}` taking `{}` must forward a mapping context and the \
                 source instance",
                target.name(),
                source.name()
            ),
        )
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let severity = match self.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(
            f,
            "{severity}[{}] {}: {}",
            self.code(),
            self.location,
            self.message
        )
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}.{member}", self.type_name),
            None => f.write_str(&self.type_name),
        }
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.0.iter().map(|diagnostic| diagnostic.kind).collect()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
