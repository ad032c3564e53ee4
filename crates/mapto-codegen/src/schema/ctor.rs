use mapto_core::schema::{KnownTypes, Ty};

/// Returns `true` for associated functions that build the type: no
/// receiver, returning `Self` or the type by name.
pub(crate) fn is_constructor(sig: &syn::Signature, type_name: &str) -> bool {
    if sig.receiver().is_some() {
        return false;
    }

    let syn::ReturnType::Type(_, ty) = &sig.output else {
        return false;
    };

    match &**ty {
        syn::Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                segment.arguments.is_none() && (segment.ident == "Self" || segment.ident == type_name)
            }),
        _ => false,
    }
}

/// The argument types a constructor forwards to another associated
/// function of the same type, when its body ends in such a call.
///
/// `Self::from_source_with_context(&mut MappingContext::new(), source)`
/// forwards a mapping context and the type of `source`.
pub(crate) fn initializer(
    block: &syn::Block,
    type_name: &str,
    params: &[(String, Ty)],
    known: &KnownTypes,
) -> Option<Vec<Option<Ty>>> {
    let syn::Stmt::Expr(tail, None) = block.stmts.last()? else {
        return None;
    };

    let syn::Expr::Call(call) = strip(tail) else {
        return None;
    };

    let syn::Expr::Path(func) = strip(&call.func) else {
        return None;
    };

    let segments = &func.path.segments;
    let owner = segments.iter().rev().nth(1)?;

    if owner.ident != "Self" && owner.ident != type_name {
        return None;
    }

    Some(
        call.args
            .iter()
            .map(|arg| argument(arg, params, known))
            .collect(),
    )
}

fn argument(expr: &syn::Expr, params: &[(String, Ty)], known: &KnownTypes) -> Option<Ty> {
    match strip(expr) {
        syn::Expr::Reference(reference) => {
            if reference.mutability.is_some() && is_new_context(&reference.expr, known) {
                return Some(Ty::Path(known.mapping_context.clone()));
            }

            argument(&reference.expr, params, known)
        }
        syn::Expr::Path(path) if path.qself.is_none() => {
            let ident = path.path.get_ident()?;

            params
                .iter()
                .find(|(name, _)| ident == name)
                .map(|(_, ty)| ty.clone())
        }
        _ => None,
    }
}

/// `MappingContext::new()` or `MappingContext::default()`
fn is_new_context(expr: &syn::Expr, known: &KnownTypes) -> bool {
    let syn::Expr::Call(call) = strip(expr) else {
        return false;
    };

    let syn::Expr::Path(func) = strip(&call.func) else {
        return false;
    };

    let mut segments = func.path.segments.iter().rev();

    let (Some(method), Some(owner)) = (segments.next(), segments.next()) else {
        return false;
    };

    call.args.is_empty()
        && (method.ident == "new" || method.ident == "default")
        && owner.ident == known.mapping_context.name.as_str()
}

fn strip(expr: &syn::Expr) -> &syn::Expr {
    match expr {
        syn::Expr::Paren(paren) => strip(&paren.expr),
        syn::Expr::Group(group) => strip(&group.expr),
        _ => expr,
    }
}
