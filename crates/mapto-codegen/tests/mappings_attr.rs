use mapto_codegen::generate;
use pretty_assertions::assert_eq;
use proc_macro2::TokenStream;
use quote::quote;

fn module(tokens: TokenStream) -> syn::ItemMod {
    syn::parse2(tokens).unwrap()
}

fn items(module: &syn::ItemMod) -> &[syn::Item] {
    &module.content.as_ref().unwrap().1
}

fn errors(err: syn::Error) -> Vec<String> {
    err.into_iter().map(|err| err.to_string()).collect()
}

#[test]
fn generated_code_lands_in_the_target_module() {
    let output = generate(
        quote!(access = "private"),
        quote! {
            mod models {
                pub struct Baz { pub id: i32 }

                pub mod views {
                    #[map_from(super::Baz)]
                    pub struct Foo { pub id: i32 }
                }
            }
        },
    )
    .unwrap();

    let module = module(output);
    assert_eq!(items(&module).len(), 2);

    let syn::Item::Mod(views) = &items(&module)[1] else {
        panic!("expected the views module");
    };

    let kinds: Vec<_> = items(views)
        .iter()
        .map(|item| match item {
            syn::Item::Struct(_) => "struct",
            syn::Item::Trait(_) => "trait",
            syn::Item::Const(_) => "const",
            _ => "other",
        })
        .collect();

    assert_eq!(kinds, ["struct", "trait", "const"]);

    let syn::Item::Trait(ext) = &items(views)[1] else {
        panic!("expected the extension trait");
    };

    assert_eq!(ext.ident, "BazToFoo");
    assert!(matches!(ext.vis, syn::Visibility::Inherited));
}

#[test]
fn diagnostics_become_compile_errors() {
    let output = generate(
        TokenStream::new(),
        quote! {
            mod models {
                pub struct Baz { pub id: String }

                #[map_from(Baz)]
                pub struct Foo { pub id: i32 }

                #[map_from(Missing)]
                pub struct Bar { pub id: i32 }
            }
        },
    )
    .unwrap()
    .to_string();

    assert!(output.starts_with("mod models"));
    assert_eq!(output.matches("compile_error").count(), 2);
    assert!(output.contains("MT0004"));
    assert!(output.contains("MT0002"));
    assert!(!output.contains("map_from"));
}

#[test]
fn rejects_modules_without_body() {
    let err = generate(TokenStream::new(), quote!(mod models;)).unwrap_err();
    assert_eq!(errors(err), ["#[mappings] requires an inline module"]);

    let err = generate(quote!(docs = "yes"), quote!(mod models {})).unwrap_err();
    assert!(err.to_string().contains("expected boolean literal"));
}

#[test]
fn rejects_malformed_declarations() {
    let err = generate(
        TokenStream::new(),
        quote! {
            mod models {
                pub struct Person { pub name: String }
                pub struct PersonView { pub name: String }

                #[map_from(Person)]
                pub struct Employee {
                    #[map_base]
                    pub person: PersonView,
                    #[map_base]
                    pub other: PersonView,
                }

                #[map_from(Person)]
                pub struct Generic<T> { pub name: T }

                #[map_from(Person)]
                pub enum Kind { A }
            }
        },
    )
    .unwrap_err();

    assert_eq!(
        errors(err),
        [
            "only one #[map_base] field is allowed",
            "types with #[map_from] cannot be generic",
            "mapping attributes are only supported on structs",
            "base type `PersonView` of a mapped type must have #[map_from]",
        ]
    );
}
