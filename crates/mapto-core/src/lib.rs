pub mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Location, Severity};

mod error;
pub use error::Error;

pub mod mapping;
pub use mapping::{generate, Generation, MappedMember, MappingModel};

mod options;
pub use options::{AccessModifier, Options};

pub mod schema;
pub use schema::Schema;

/// A Result type alias that uses MapTo's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
