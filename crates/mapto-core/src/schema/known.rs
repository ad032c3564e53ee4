use super::{Namespace, TypePath};

/// Types the generator treats specially.
///
/// Resolved once per run. Well-known types match by name and, when the
/// reference carries a namespace, by namespace as well, so that both
/// `Vec<T>` and `std::vec::Vec<T>` are recognized.
#[derive(Debug, Clone)]
pub struct KnownTypes {
    /// The context threaded through generated constructors
    pub mapping_context: TypePath,

    /// The two-parameter conversion capability converters implement
    pub type_converter: TypePath,

    /// Generic collections mapped element by element
    pub enumerables: Vec<TypePath>,

    /// The optional wrapper used for lifting
    pub optional: TypePath,

    /// Baseline import of the host runtime
    pub runtime_namespace: Namespace,

    /// Baseline import of the support crate
    pub support_namespace: Namespace,
}

impl Default for KnownTypes {
    fn default() -> Self {
        let collections = [
            ("std::vec", "Vec"),
            ("std::collections", "VecDeque"),
            ("std::collections", "LinkedList"),
            ("std::collections", "HashSet"),
            ("std::collections", "BTreeSet"),
            ("std::collections", "BinaryHeap"),
        ];

        Self {
            mapping_context: TypePath::new("mapto", "MappingContext"),
            type_converter: TypePath::new("mapto", "TypeConverter"),
            enumerables: collections
                .into_iter()
                .map(|(namespace, name)| TypePath::new(namespace, name))
                .collect(),
            optional: TypePath::new("std::option", "Option"),
            runtime_namespace: Namespace::new("std"),
            support_namespace: Namespace::new("mapto"),
        }
    }
}

impl KnownTypes {
    /// Registers an additional enumerable collection
    pub fn with_enumerable(mut self, path: TypePath) -> Self {
        self.enumerables.push(path);
        self
    }

    pub fn is_enumerable(&self, path: &TypePath) -> bool {
        self.enumerables.iter().any(|known| same_type(known, path))
    }

    pub fn is_type_converter(&self, path: &TypePath) -> bool {
        same_type(&self.type_converter, path)
    }

    pub fn is_mapping_context(&self, path: &TypePath) -> bool {
        same_type(&self.mapping_context, path)
    }

    pub fn is_optional(&self, path: &TypePath) -> bool {
        path.args.len() == 1 && same_type(&self.optional, path)
    }
}

fn same_type(known: &TypePath, path: &TypePath) -> bool {
    known.name == path.name
        && (path.namespace.is_global() || known.namespace == path.namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Ty;

    #[test]
    fn matches_by_name_or_full_path() {
        let known = KnownTypes::default();

        assert!(known.is_enumerable(&TypePath::new("", "Vec")));
        assert!(known.is_enumerable(&TypePath::new("std::collections", "HashSet")));
        assert!(!known.is_enumerable(&TypePath::new("app", "Vec")));

        assert!(known.is_type_converter(&TypePath::new("", "TypeConverter")));
        assert!(known.is_mapping_context(&TypePath::new("mapto", "MappingContext")));

        let option = Ty::option(Ty::path("app", "Foo"));
        assert!(known.is_optional(option.as_path().unwrap()));
        assert!(!known.is_optional(&TypePath::new("", "Option")));
    }
}
