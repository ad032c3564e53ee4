use super::{compat, matcher, Conversion, Imports, MappedMember};
use crate::schema::{Member, Schema, Ty, TypeDef, TypePath};
use crate::{Diagnostic, Diagnostics};

/// Resolves members of one target type against its source type.
///
/// A resolver is scoped to a single target type. It owns the diagnostics
/// and imports accumulated while resolving that type.
#[derive(Debug)]
pub struct Resolver<'a> {
    schema: &'a Schema,

    /// The type being mapped
    target: &'a TypeDef,

    diagnostics: Diagnostics,

    imports: Imports,
}

/// Outcome of resolving one member
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The member maps from a source member
    Mapped(MappedMember),

    /// The member has no source counterpart
    Unmatched,

    /// The member has a source counterpart but no conversion applies
    Unresolved,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema, target: &'a TypeDef) -> Self {
        Self {
            schema,
            target,
            diagnostics: Diagnostics::new(),
            imports: Imports::new(target.namespace().clone(), schema.known()),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(target_type = %self.target.full_name(), code = diagnostic.code(), "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    pub fn imports(&self) -> &Imports {
        &self.imports
    }

    pub fn imports_mut(&mut self) -> &mut Imports {
        &mut self.imports
    }

    pub fn finish(self) -> (Imports, Diagnostics) {
        (self.imports, self.diagnostics)
    }

    /// Resolves `member` of the target type against the source `candidates`.
    ///
    /// Tiers are tried in order and the first that applies wins: direct
    /// assignment, the member's converter, then nested or element-wise
    /// mapping. Once the type has a diagnostic, only direct assignment is
    /// attempted for the remaining members.
    pub fn resolve(&mut self, member: &Member, candidates: &[&Member]) -> Resolution {
        let Some(source) = matcher::find_source_member(candidates, member) else {
            tracing::trace!(member = %member.name, "no source member");
            return Resolution::Unmatched;
        };

        match self.resolve_pair(member, source, true) {
            Some(mapped) => Resolution::Mapped(mapped),
            None => Resolution::Unresolved,
        }
    }

    /// Resolves the target member mapping from `source`, if any, without
    /// reporting diagnostics.
    pub fn resolve_reverse(&mut self, source: &Member, targets: &[&Member]) -> Option<MappedMember> {
        let member = matcher::find_target_member(targets, source)?;
        self.resolve_pair(member, source, false)
    }

    fn resolve_pair(&mut self, member: &Member, source: &Member, report: bool) -> Option<MappedMember> {
        let conversion = self.conversion(member, source, report)?;

        self.imports.register_ty(&member.ty);

        match &conversion {
            Conversion::Nested { source } => self.imports.register_ty(source),
            Conversion::Enumerable {
                source_element,
                element,
            } => {
                self.imports.register_ty(element);
                self.imports.register_ty(source_element);
            }
            _ => {}
        }

        Some(MappedMember {
            name: member.name.clone(),
            ty: member.ty.clone(),
            source_name: source.name.clone(),
            source_ty: source.ty.clone(),
            conversion,
            read_only: member.read_only,
        })
    }

    fn conversion(&mut self, member: &Member, source: &Member, report: bool) -> Option<Conversion> {
        if compat::is_compatible(self.schema, &source.ty, &member.ty) {
            tracing::trace!(member = %member.name, "direct");
            return Some(Conversion::Direct);
        }

        if !self.diagnostics.is_empty() {
            tracing::trace!(member = %member.name, "skipped; type already failed");
            return None;
        }

        if let Some((converter, parameters)) = member.converter() {
            if self.is_valid_converter(converter, &source.ty, &member.ty) {
                tracing::trace!(member = %member.name, converter = %converter, "converter");
                return Some(Conversion::Converter {
                    converter: converter.clone(),
                    parameters: parameters.to_vec(),
                });
            }

            if report {
                self.report(Diagnostic::invalid_converter_generic_arguments(
                    self.target,
                    member,
                    source,
                    converter,
                ));
            }

            return None;
        }

        if let Some(conversion) = self.nested(&source.ty, &member.ty) {
            tracing::trace!(member = %member.name, "nested");
            return Some(conversion);
        }

        if report {
            self.report(Diagnostic::no_matching_property_type_found(self.target, member));
        }

        None
    }

    /// A converter is valid when it implements the converter capability
    /// from exactly the source type to exactly the target type.
    fn is_valid_converter(&self, converter: &TypePath, source: &Ty, target: &Ty) -> bool {
        let Some(def) = self.schema.type_def(converter) else {
            return false;
        };

        let known = self.schema.known();

        self.schema.all_interfaces(def).any(|interface| {
            known.is_type_converter(interface)
                && interface.args.len() == 2
                && interface.args[0] == *source
                && interface.args[1] == *target
        })
    }

    fn nested(&self, source: &Ty, target: &Ty) -> Option<Conversion> {
        if self.maps_from(target, source) {
            return Some(Conversion::Nested {
                source: source.clone(),
            });
        }

        if target.is_primitive() {
            return None;
        }

        let element = self.schema.enumerable_element(target)?;
        let source_element = self.schema.enumerable_element(source)?;

        if self.maps_from(element, source_element) {
            return Some(Conversion::Enumerable {
                source_element: source_element.clone(),
                element: element.clone(),
            });
        }

        None
    }

    /// Returns `true` if `target` is declared as mapped from `source`
    fn maps_from(&self, target: &Ty, source: &Ty) -> bool {
        let (Some(def), Some(source)) = (self.schema.type_of(target), source.as_path()) else {
            return false;
        };

        def.map_from()
            .is_some_and(|map_from| map_from.definition_name() == source.definition_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Primitive};
    use crate::DiagnosticKind;

    fn schema() -> Schema {
        Schema::builder()
            .add(TypeDef::structure("app", "A").member(Member::new("x", Primitive::I32)))
            .add(
                TypeDef::structure("app::view", "B")
                    .attr(Attribute::MapFrom(TypePath::new("app", "A")))
                    .member(Member::new("x", Primitive::I32)),
            )
            .add(TypeDef::structure("app::view", "Target"))
            .build()
            .unwrap()
    }

    #[test]
    fn unmatched_is_not_a_diagnostic() {
        let schema = schema();
        let target = schema.resolve("Target").unwrap();
        let mut resolver = Resolver::new(&schema, target);

        let member = Member::new("missing", Primitive::I32);
        assert_eq!(resolver.resolve(&member, &[]), Resolution::Unmatched);
        assert!(resolver.diagnostics().is_empty());
    }

    #[test]
    fn nested_requires_matching_source() {
        let schema = schema();
        let target = schema.resolve("Target").unwrap();
        let mut resolver = Resolver::new(&schema, target);

        let source = Member::new("inner", Ty::path("app", "A"));
        let member = Member::new("inner", Ty::path("app::view", "B"));

        let Resolution::Mapped(mapped) = resolver.resolve(&member, &[&source]) else {
            panic!("expected a mapping");
        };
        assert_eq!(mapped.mapped_source_type_name().as_deref(), Some("A"));

        let source = Member::new("inner", Ty::path("app::view", "Target"));
        assert_eq!(resolver.resolve(&member, &[&source]), Resolution::Unresolved);
        assert_eq!(
            resolver.diagnostics().kinds(),
            [DiagnosticKind::NoMatchingPropertyTypeFound]
        );
    }

    #[test]
    fn reverse_is_quiet() {
        let schema = schema();
        let target = schema.resolve("Target").unwrap();
        let mut resolver = Resolver::new(&schema, target);

        let source = Member::new("count", Primitive::String);
        let member = Member::new("count", Primitive::I32);

        assert!(resolver.resolve_reverse(&source, &[&member]).is_none());
        assert!(resolver.diagnostics().is_empty());
    }
}
