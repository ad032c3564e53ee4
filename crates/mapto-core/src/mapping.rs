//! Mapping resolution
//!
//! Every type carrying a map-from directive is resolved independently into
//! a [`MappingModel`]: which target member is read from which source member,
//! and through which conversion. Failures are reported as diagnostics and
//! only exclude the failing type.

mod assemble;
pub use assemble::{assemble, assemble_by_name};

pub mod compat;

mod imports;
pub use imports::Imports;

pub mod matcher;

mod model;
pub use model::{Conversion, ExtraParameter, MappedMember, MappingModel};

mod resolve;
pub use resolve::{Resolution, Resolver};

mod strategy;

use crate::schema::AttributeKind;
use crate::{Diagnostics, Options, Schema};

use serde::Serialize;

/// The outcome of a generation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct Generation {
    /// Models of every type that resolved, in declaration order
    pub models: Vec<MappingModel>,

    /// Diagnostics of every type that failed, in declaration order
    pub diagnostics: Diagnostics,
}

/// Resolves every mapped type in `schema`
pub fn generate(schema: &Schema, options: &Options) -> Generation {
    let mut generation = Generation::default();

    for target in schema.types() {
        if !target.has_attribute(AttributeKind::MapFrom) {
            continue;
        }

        match assemble(schema, target, options) {
            Ok(model) => generation.models.push(model),
            Err(diagnostics) => generation.diagnostics.extend(diagnostics),
        }
    }

    generation
}

impl Generation {
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn model(&self, type_name: &str) -> Option<&MappingModel> {
        self.models
            .iter()
            .find(|model| model.type_name == type_name)
    }
}
