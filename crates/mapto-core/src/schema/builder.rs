use super::{KnownTypes, Schema, TypeDef};
use crate::{Error, Result};

use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Default)]
pub struct Builder {
    /// Well-known types for the run
    known: KnownTypes,

    /// Declared types, in declaration order
    types: Vec<TypeDef>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn known_types(&mut self, known: KnownTypes) -> &mut Self {
        self.known = known;
        self
    }

    pub fn add(&mut self, def: TypeDef) -> &mut Self {
        self.types.push(def);
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let mut types = IndexMap::with_capacity(self.types.len());

        for def in &self.types {
            let mut def = def.clone();
            let full_name = def.full_name();

            for member in &mut def.members {
                member.declared_in = full_name.clone();
            }

            for param in def.constructors.iter_mut().flat_map(|ctor| ctor.params.iter_mut()) {
                param.declared_in = full_name.clone();
            }

            if types.insert(full_name.clone(), def).is_some() {
                return Err(Error::invalid_schema(format!(
                    "type `{full_name}` is declared more than once"
                )));
            }
        }

        let schema = Schema {
            types,
            known: self.known.clone(),
        };

        schema.verify()?;

        tracing::debug!(types = schema.types.len(), "built schema");

        Ok(schema)
    }
}

impl Schema {
    fn verify(&self) -> Result<()> {
        for def in self.types.values() {
            self.verify_base_chain(def)?;
        }

        Ok(())
    }

    fn verify_base_chain(&self, def: &TypeDef) -> Result<()> {
        let mut visited = IndexSet::new();
        visited.insert(def.full_name());

        let mut current = def;

        while let Some(base) = &current.base {
            let Some(base_def) = self.type_def(base) else {
                return Err(Error::invalid_schema(format!(
                    "base type `{}` of `{}` is not declared",
                    base.full_name(),
                    current.full_name()
                )));
            };

            if !visited.insert(base_def.full_name()) {
                return Err(Error::invalid_schema(format!(
                    "type `{}` inherits from itself",
                    def.full_name()
                )));
            }

            current = base_def;
        }

        Ok(())
    }
}
