use crate::schema::{Schema, Ty};

/// Returns `true` if a value of type `source` can be assigned to a member of
/// type `target` without an explicit conversion.
///
/// Identical types, lossless primitive widening, lifting into `Option` and
/// boxing into an implemented trait object qualify. Narrowing never does.
pub fn is_compatible(schema: &Schema, source: &Ty, target: &Ty) -> bool {
    if source == target {
        return true;
    }

    match (source, target) {
        (Ty::Primitive(source), Ty::Primitive(target)) => source.widens_to(*target),
        (_, Ty::Path(target)) if schema.known().is_optional(target) => {
            target.args.first() == Some(source)
        }
        (Ty::Path(source), Ty::Dyn(interface)) => schema.implements(source, interface),
        _ => false,
    }
}

/// Returns `true` if assigning requires a widening or lifting conversion
pub fn needs_into(source: &Ty, target: &Ty) -> bool {
    source != target && !matches!(target, Ty::Dyn(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Primitive, TypeDef, TypePath};

    fn schema() -> Schema {
        Schema::builder()
            .add(TypeDef::interface("geo", "Shape"))
            .add(TypeDef::structure("geo", "Circle").implements(TypePath::new("geo", "Shape")))
            .add(TypeDef::structure("geo", "Line"))
            .build()
            .unwrap()
    }

    #[test]
    fn identical() {
        let schema = schema();
        let circle = Ty::path("geo", "Circle");

        assert!(is_compatible(&schema, &circle, &circle));
        assert!(is_compatible(&schema, &Primitive::String.into(), &Primitive::String.into()));
    }

    #[test]
    fn widening_but_not_narrowing() {
        let schema = schema();
        let int = Ty::from(Primitive::I32);
        let long = Ty::from(Primitive::I64);

        assert!(is_compatible(&schema, &int, &long));
        assert!(!is_compatible(&schema, &long, &int));
        assert!(!is_compatible(&schema, &int, &Primitive::String.into()));
    }

    #[test]
    fn option_lifting() {
        let schema = schema();
        let int = Ty::from(Primitive::I32);

        assert!(is_compatible(&schema, &int, &Ty::option(int.clone())));
        assert!(!is_compatible(&schema, &Ty::option(int.clone()), &int));
        assert!(!is_compatible(
            &schema,
            &Primitive::I16.into(),
            &Ty::option(int.clone())
        ));
    }

    #[test]
    fn interface_boxing() {
        let schema = schema();
        let shape = Ty::Dyn(TypePath::new("geo", "Shape"));

        assert!(is_compatible(&schema, &Ty::path("geo", "Circle"), &shape));
        assert!(!is_compatible(&schema, &Ty::path("geo", "Line"), &shape));
        assert!(!is_compatible(&schema, &shape, &Ty::path("geo", "Circle")));
    }
}
