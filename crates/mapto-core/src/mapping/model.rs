use crate::schema::{Literal, Namespace, Ty, TypeKind, TypePath};
use crate::Options;

use serde::Serialize;

/// The resolved plan for one mapped type.
///
/// A model is a pure function of the target type, its source type and the
/// options. It is built once per run and consumed by an emitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingModel {
    pub options: Options,

    /// Namespace of the target type
    pub namespace: Namespace,

    pub kind: TypeKind,

    pub type_name: String,

    pub source_namespace: Namespace,

    pub source_type_name: String,

    /// `ns::Source`
    pub source_full_name: String,

    /// An update method is requested
    pub updatable: bool,

    /// A JSON serialization method is requested
    pub json_extension: bool,

    /// The target inherits from another mapped type
    pub has_base_class: bool,

    /// The inherited mapped type, if any
    pub base_type: Option<TypePath>,

    /// The inherited mapped type's source, if any
    pub base_source: Option<TypePath>,

    /// Target members resolved against the source, in target declaration
    /// order. Drives the primary constructor.
    pub source_members: Vec<MappedMember>,

    /// Source members resolved against the target, in source declaration
    /// order. Drives the update method.
    pub type_members: Vec<MappedMember>,

    /// Target members without a source counterpart. Generated constructors
    /// take them as additional parameters.
    pub extra_parameters: Vec<ExtraParameter>,

    /// Namespaces the generated code refers to, in first-use order. Neither
    /// the target's own namespace nor the global namespace appear here.
    pub imports: Vec<Namespace>,

    /// A context-forwarding constructor taking only the source must be
    /// generated
    pub generate_secondary_constructor: bool,
}

/// One resolved correspondence between a target member and a source member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedMember {
    /// Name of the member being assigned
    pub name: String,

    /// Type of the member being assigned
    pub ty: Ty,

    /// Name of the member read from
    pub source_name: String,

    /// Type of the member read from
    pub source_ty: Ty,

    pub conversion: Conversion,

    pub read_only: bool,
}

/// How a source value becomes a target value. Exactly one applies per
/// member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    /// Assigned as is, or through an implicit widening
    Direct,

    /// Converted by a user-supplied type converter
    Converter {
        converter: TypePath,
        parameters: Vec<Literal>,
    },

    /// Mapped recursively; `source` is the mapped-from type
    Nested { source: Ty },

    /// Mapped element by element
    Enumerable {
        /// Element type of the source collection
        source_element: Ty,

        /// Element type of the target collection
        element: Ty,
    },
}

/// A target member without a source counterpart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraParameter {
    pub name: String,
    pub ty: Ty,
    pub read_only: bool,
}

impl MappedMember {
    pub fn is_direct(&self) -> bool {
        matches!(self.conversion, Conversion::Direct)
    }

    pub fn converter(&self) -> Option<(&TypePath, &[Literal])> {
        match &self.conversion {
            Conversion::Converter {
                converter,
                parameters,
            } => Some((converter, parameters)),
            _ => None,
        }
    }

    /// The mapped-from type, set only for nested mappings
    pub fn mapped_source_type_name(&self) -> Option<String> {
        match &self.conversion {
            Conversion::Nested { source } => Some(source.to_string()),
            _ => None,
        }
    }

    /// The target element type, set only for element-wise mappings
    pub fn enumerable_type_argument(&self) -> Option<&Ty> {
        match &self.conversion {
            Conversion::Enumerable { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn is_enumerable(&self) -> bool {
        matches!(self.conversion, Conversion::Enumerable { .. })
    }
}

impl MappingModel {
    /// Forward mappings of members that can only be set at construction
    pub fn read_only_members(&self) -> impl Iterator<Item = &MappedMember> {
        self.source_members.iter().filter(|member| member.read_only)
    }

    /// Reverse mappings of members the update method assigns
    pub fn writable_members(&self) -> impl Iterator<Item = &MappedMember> {
        self.type_members.iter().filter(|member| !member.read_only)
    }

    pub fn needs_update_method(&self) -> bool {
        self.updatable && self.writable_members().next().is_some()
    }

    pub fn has_enumerable_members(&self) -> bool {
        self.source_members.iter().any(MappedMember::is_enumerable)
    }

    /// `From<&Source>` and the extension trait only exist when a source
    /// alone is enough to build the target
    pub fn is_infallible_from_source(&self) -> bool {
        self.extra_parameters.is_empty()
    }
}
