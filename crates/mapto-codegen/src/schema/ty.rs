use mapto_core::schema::{Namespace, Primitive, Ty, TypePath};

use indexmap::IndexMap;
use quote::ToTokens;

/// Resolves written types against the declared items.
///
/// Type names are looked up by their last segment. A name declared in a
/// single module resolves there; otherwise the written prefix, then the
/// current module disambiguate. Undeclared types keep their written prefix
/// as namespace.
#[derive(Debug, Default)]
pub(crate) struct Types {
    /// Declaring modules by type name
    declared: IndexMap<String, Vec<Namespace>>,
}

impl Types {
    pub(crate) fn declare(&mut self, name: String, namespace: &Namespace) {
        self.declared.entry(name).or_default().push(namespace.clone());
    }

    pub(crate) fn is_declared(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    pub(crate) fn ty(&self, ty: &syn::Type, current: &Namespace) -> Ty {
        match ty {
            syn::Type::Reference(reference) => self.ty(&reference.elem, current),
            syn::Type::Paren(paren) => self.ty(&paren.elem, current),
            syn::Type::Group(group) => self.ty(&group.elem, current),
            syn::Type::TraitObject(object) => match trait_bound(&object.bounds) {
                Some(path) => Ty::Dyn(self.path(path, current)),
                None => opaque(ty),
            },
            syn::Type::Path(type_path) if type_path.qself.is_none() => {
                if let Some(object) = boxed_trait_object(&type_path.path) {
                    return Ty::Dyn(self.path(object, current));
                }

                let path = &type_path.path;

                if let Some(primitive) = self.primitive(path) {
                    return Ty::Primitive(primitive);
                }

                Ty::Path(self.path(path, current))
            }
            _ => opaque(ty),
        }
    }

    pub(crate) fn path(&self, path: &syn::Path, current: &Namespace) -> TypePath {
        let Some(last) = path.segments.last() else {
            return TypePath::new(Namespace::global(), path.to_token_stream().to_string());
        };

        let name = last.ident.to_string();

        let written = Namespace::new(
            path.segments
                .iter()
                .take(path.segments.len() - 1)
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>()
                .join("::"),
        );

        let namespace = match self.declared.get(&name).map(Vec::as_slice) {
            Some([namespace]) => namespace.clone(),
            Some(candidates) => candidates
                .iter()
                .find(|ns| !written.is_global() && ns.as_str().ends_with(written.as_str()))
                .or_else(|| candidates.iter().find(|ns| *ns == current))
                .unwrap_or(&candidates[0])
                .clone(),
            None => written,
        };

        let args = match &last.arguments {
            syn::PathArguments::AngleBracketed(args) => args
                .args
                .iter()
                .filter_map(|arg| match arg {
                    syn::GenericArgument::Type(ty) => Some(self.ty(ty, current)),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        };

        TypePath::new(namespace, name).with_args(args)
    }

    fn primitive(&self, path: &syn::Path) -> Option<Primitive> {
        let last = path.segments.last()?;
        let name = last.ident.to_string();

        if !last.arguments.is_none() || self.is_declared(&name) {
            return None;
        }

        Primitive::from_name(&name)
    }
}

/// `Box<dyn Trait>`
fn boxed_trait_object(path: &syn::Path) -> Option<&syn::Path> {
    let last = path.segments.last()?;

    if last.ident != "Box" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };

    match args.args.first()? {
        syn::GenericArgument::Type(syn::Type::TraitObject(object)) => trait_bound(&object.bounds),
        _ => None,
    }
}

fn trait_bound(
    bounds: &syn::punctuated::Punctuated<syn::TypeParamBound, syn::Token![+]>,
) -> Option<&syn::Path> {
    bounds.iter().find_map(|bound| match bound {
        syn::TypeParamBound::Trait(bound) => Some(&bound.path),
        _ => None,
    })
}

/// Types the model does not look into, such as tuples and arrays, are kept
/// by their written form
fn opaque(ty: &syn::Type) -> Ty {
    Ty::Path(TypePath::new(
        Namespace::global(),
        ty.to_token_stream().to_string(),
    ))
}
