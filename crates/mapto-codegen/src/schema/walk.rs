use mapto_core::schema::Namespace;

/// An item together with the module it is declared in
#[derive(Debug)]
pub(crate) struct Scoped<'a, T> {
    pub(crate) namespace: &'a Namespace,
    pub(crate) item: &'a T,
}

// Only references are held, so copying never requires `T: Copy`
impl<T> Clone for Scoped<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Scoped<'_, T> {}

/// Items of a module tree, grouped by kind
#[derive(Debug, Default)]
pub(crate) struct Items<'a> {
    pub(crate) structs: Vec<Scoped<'a, syn::ItemStruct>>,
    pub(crate) enums: Vec<Scoped<'a, syn::ItemEnum>>,
    pub(crate) traits: Vec<Scoped<'a, syn::ItemTrait>>,
    pub(crate) impls: Vec<Scoped<'a, syn::ItemImpl>>,
}

/// Every namespace reachable from the root, parents first. Namespaces are
/// allocated up front so that collected items can borrow them.
pub(crate) fn namespaces(root: &Namespace, items: &[syn::Item]) -> Vec<Namespace> {
    let mut out = vec![root.clone()];
    push_namespaces(root, items, &mut out);
    out
}

fn push_namespaces(current: &Namespace, items: &[syn::Item], out: &mut Vec<Namespace>) {
    for item in items {
        if let syn::Item::Mod(module) = item {
            if let Some((_, content)) = &module.content {
                let namespace = current.join(&module.ident.to_string());
                out.push(namespace.clone());
                push_namespaces(&namespace, content, out);
            }
        }
    }
}

/// Collects items of the module tree. `namespaces` must come from
/// [`namespaces`] for the same tree.
pub(crate) fn collect<'a>(namespaces: &'a [Namespace], items: &'a [syn::Item]) -> Items<'a> {
    let mut out = Items::default();
    let mut next = 0;
    collect_module(namespaces, &mut next, items, &mut out);
    out
}

fn collect_module<'a>(
    namespaces: &'a [Namespace],
    next: &mut usize,
    items: &'a [syn::Item],
    out: &mut Items<'a>,
) {
    let namespace = &namespaces[*next];
    *next += 1;

    for item in items {
        match item {
            syn::Item::Struct(item) => out.structs.push(Scoped { namespace, item }),
            syn::Item::Enum(item) => out.enums.push(Scoped { namespace, item }),
            syn::Item::Trait(item) => out.traits.push(Scoped { namespace, item }),
            syn::Item::Impl(item) => out.impls.push(Scoped { namespace, item }),
            syn::Item::Mod(module) => {
                if let Some((_, content)) = &module.content {
                    collect_module(namespaces, next, content, out);
                }
            }
            _ => {}
        }
    }
}
