use crate::MapFrom;

use by_address::ByThinAddress;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Values mapped so far while building one object graph.
///
/// A source instance that is reached more than once is mapped once; later
/// requests for the same target type get a clone of the first result.
/// Instances are identified by address, so the context borrows every source
/// it has seen.
#[derive(Debug, Default)]
pub struct MappingContext<'a> {
    mapped: HashMap<Key<'a>, Box<dyn Any>>,
}

/// Source instance, source type, target type
type Key<'a> = (ByThinAddress<&'a dyn Any>, TypeId, TypeId);

fn key<'a, S: Any, D: Any>(source: &'a S) -> Key<'a> {
    (
        ByThinAddress(source as &dyn Any),
        TypeId::of::<S>(),
        TypeId::of::<D>(),
    )
}

impl<'a> MappingContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` as the mapping of `source` to `D`
    pub fn register<S: Any, D: Any>(&mut self, source: &'a S, value: D) {
        self.mapped.insert(key::<S, D>(source), Box::new(value));
    }

    /// The mapping of `source` to `D`, if already registered
    pub fn lookup<S: Any, D: Any>(&self, source: &'a S) -> Option<&D> {
        self.mapped
            .get(&key::<S, D>(source))
            .and_then(|value| value.downcast_ref())
    }

    /// Maps `source` to `D`, reusing a previous mapping of the same instance
    pub fn map_from_with_context<S, D>(&mut self, source: &'a S) -> D
    where
        S: Any,
        D: MapFrom<S> + Clone + Any,
    {
        if let Some(value) = self.lookup::<S, D>(source) {
            return value.clone();
        }

        let value = D::map_from_with_context(self, source);
        self.register(source, value.clone());
        value
    }

    /// Number of mapped instances
    pub fn len(&self) -> usize {
        self.mapped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty()
    }
}
