use super::strategy::Strategy;
use super::{ExtraParameter, MappingModel, Resolution, Resolver};
use crate::schema::{AttributeKind, Member, Schema, Ty, TypeDef};
use crate::{Diagnostic, Diagnostics, Options};

/// Assembles the mapping model of `target`.
///
/// Returns every diagnostic raised for the type instead of a model when any
/// member fails to resolve. Sibling types are unaffected.
pub fn assemble(
    schema: &Schema,
    target: &TypeDef,
    options: &Options,
) -> Result<MappingModel, Diagnostics> {
    let _span = tracing::debug_span!("assemble", target = %target.full_name()).entered();

    let result = assemble_type(schema, target, options);

    match &result {
        Ok(model) => tracing::debug!(
            members = model.source_members.len(),
            extra_parameters = model.extra_parameters.len(),
            "mapping model ready"
        ),
        Err(diagnostics) => tracing::debug!(diagnostics = diagnostics.len(), "mapping failed"),
    }

    result
}

/// Assembles the mapping model of the type called `name`
pub fn assemble_by_name(
    schema: &Schema,
    name: &str,
    options: &Options,
) -> Result<MappingModel, Diagnostics> {
    match schema.resolve(name) {
        Ok(target) => assemble(schema, target, options),
        Err(_) => Err(Diagnostic::type_not_found(name).into()),
    }
}

fn assemble_type(
    schema: &Schema,
    target: &TypeDef,
    options: &Options,
) -> Result<MappingModel, Diagnostics> {
    let Some(source) = target.map_from().and_then(|path| schema.type_def(path)) else {
        return Err(Diagnostic::map_from_attribute_not_found(target).into());
    };

    let base = target
        .base
        .as_ref()
        .and_then(|base| schema.type_def(base))
        .filter(|base| base.map_from().is_some());

    let strategy = Strategy::of(target.kind);
    let declared_only = base.is_some() && strategy.inherits;

    let mut resolver = Resolver::new(schema, target);
    resolver.imports_mut().register(source.namespace());

    let targets = mappable(strategy.members(schema, target, declared_only));
    let candidates = mappable(Strategy::of(source.kind).members(schema, source, false));

    let mut source_members = vec![];
    let mut extra_parameters = vec![];

    for member in &targets {
        match resolver.resolve(member, &candidates) {
            Resolution::Mapped(mapped) => source_members.push(mapped),
            Resolution::Unmatched => extra_parameters.push(ExtraParameter {
                name: member.name.clone(),
                ty: member.ty.clone(),
                read_only: member.read_only,
            }),
            Resolution::Unresolved => {}
        }
    }

    let type_members: Vec<_> = candidates
        .iter()
        .filter_map(|member| resolver.resolve_reverse(member, &targets))
        .collect();

    if source_members.is_empty()
        && !candidates.is_empty()
        && base.is_none()
        && resolver.diagnostics().is_empty()
    {
        resolver.report(Diagnostic::no_matching_property_found(target, source));
    }

    let generate_secondary_constructor = secondary_constructor(&mut resolver, schema, target, source);

    let (imports, diagnostics) = resolver.finish();

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    Ok(MappingModel {
        options: options.clone(),
        namespace: target.namespace().clone(),
        kind: target.kind,
        type_name: target.name().to_string(),
        source_namespace: source.namespace().clone(),
        source_type_name: source.name().to_string(),
        source_full_name: source.full_name(),
        updatable: target.has_attribute(AttributeKind::UseUpdate),
        json_extension: target.has_attribute(AttributeKind::JsonExtension),
        has_base_class: base.is_some(),
        base_type: base.map(|base| base.path.clone()),
        base_source: base.and_then(|base| base.map_from().cloned()),
        source_members,
        type_members,
        extra_parameters,
        imports: imports.into_vec(),
        generate_secondary_constructor,
    })
}

fn mappable(members: Vec<&Member>) -> Vec<&Member> {
    members
        .into_iter()
        .filter(|member| !member.is_ignored())
        .collect()
}

/// Returns `true` if a constructor taking only the source must be generated.
///
/// A user-written single-parameter constructor taking the source replaces
/// the generated one. It must forward a mapping context and the source to
/// the context-aware constructor. Implicit constructors are not considered.
fn secondary_constructor(
    resolver: &mut Resolver<'_>,
    schema: &Schema,
    target: &TypeDef,
    source: &TypeDef,
) -> bool {
    let is_source = |ty: &Ty| {
        ty.as_path()
            .is_some_and(|path| path.definition_name() == source.full_name())
    };

    let Some(ctor) = target
        .constructors
        .iter()
        .filter(|ctor| !ctor.implicit)
        .find(|ctor| ctor.params.len() == 1 && is_source(&ctor.params[0].ty))
    else {
        return true;
    };

    let forwards = match ctor.initializer.as_deref() {
        Some([Some(context), Some(instance)]) => {
            context
                .as_path()
                .is_some_and(|path| schema.known().is_mapping_context(path))
                && is_source(instance)
        }
        _ => false,
    };

    if !forwards {
        resolver.report(Diagnostic::missing_constructor_argument(target, source));
    }

    false
}
