use crate::{MappingContext, Param};

/// Construction of a type from a source type it maps from.
///
/// Implemented by `#[mapto::mappings]` for every mapped struct whose members
/// can all be read from the source.
pub trait MapFrom<S>: Sized {
    /// Builds `Self` from `source`, sharing already mapped instances through
    /// `context`
    fn map_from_with_context<'a>(context: &mut MappingContext<'a>, source: &'a S) -> Self;

    fn map_from(source: &S) -> Self {
        Self::map_from_with_context(&mut MappingContext::new(), source)
    }
}

/// A user-supplied conversion from `S` to `D`, selected per member with
/// `#[converter(...)]`.
///
/// Converters are built with [`Default`] for every conversion. `parameters`
/// holds the literals given in `#[converter(Type, params(...))]`, in order.
pub trait TypeConverter<S, D> {
    fn convert(&self, source: S, parameters: &[Param]) -> D;
}
