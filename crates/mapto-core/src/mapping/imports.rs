use crate::schema::{KnownTypes, Namespace, Ty};

use indexmap::IndexSet;

/// Namespaces required by the code generated for one type.
///
/// Seeded with the runtime and support namespaces. Keeps first-registration
/// order and ignores duplicates.
#[derive(Debug, Clone)]
pub struct Imports {
    /// Namespace of the type being generated
    current: Namespace,

    entries: IndexSet<Namespace>,
}

impl Imports {
    pub fn new(current: Namespace, known: &KnownTypes) -> Self {
        let mut imports = Self {
            current,
            entries: IndexSet::new(),
        };

        imports.register(&known.runtime_namespace);
        imports.register(&known.support_namespace);
        imports
    }

    /// Registers `namespace` unless it is global, the current namespace, or
    /// already present. Returns `true` if it was added.
    pub fn register(&mut self, namespace: &Namespace) -> bool {
        if namespace.is_global() || *namespace == self.current {
            return false;
        }

        self.entries.insert(namespace.clone())
    }

    /// Registers the namespace of `ty` and of its generic arguments
    pub fn register_ty(&mut self, ty: &Ty) {
        if let Some(namespace) = ty.namespace() {
            self.register(namespace);
        }

        if let Ty::Path(path) | Ty::Dyn(path) = ty {
            for arg in &path.args {
                self.register_ty(arg);
            }
        }
    }

    pub fn contains(&self, namespace: &Namespace) -> bool {
        self.entries.contains(namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Namespace> {
        self.entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ns(path: &str) -> Namespace {
        Namespace::new(path)
    }

    #[test]
    fn seeded_with_baseline() {
        let imports = Imports::new(ns("app"), &KnownTypes::default());
        assert_eq!(imports.into_vec(), [ns("std"), ns("mapto")]);
    }

    #[test]
    fn first_registration_wins() {
        let mut imports = Imports::new(ns("app"), &KnownTypes::default());

        assert!(imports.register(&ns("app::models")));
        assert!(imports.register(&ns("app::dto")));
        assert!(!imports.register(&ns("app::models")));
        assert!(!imports.register(&ns("std")));

        assert_eq!(
            imports.into_vec(),
            [ns("std"), ns("mapto"), ns("app::models"), ns("app::dto")]
        );
    }

    #[test]
    fn skips_global_and_current() {
        let mut imports = Imports::new(ns("app"), &KnownTypes::default());

        assert!(!imports.register(&Namespace::global()));
        assert!(!imports.register(&ns("app")));
        assert!(!imports.contains(&ns("app")));
    }

    #[test]
    fn registers_generic_arguments() {
        let mut imports = Imports::new(ns("app"), &KnownTypes::default());
        imports.register_ty(&Ty::vec(Ty::path("app::models", "Employee")));

        assert!(imports.contains(&ns("app::models")));
    }
}
