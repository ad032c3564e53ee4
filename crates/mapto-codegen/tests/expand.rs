use mapto_codegen::{expand_file, Expansion};
use mapto_core::{AccessModifier, DiagnosticKind, Options};
use pretty_assertions::assert_eq;
use quote::ToTokens;
use syn::parse_quote;

fn expand(src: &str) -> Expansion {
    expand_with(src, &Options::default())
}

fn expand_with(src: &str, options: &Options) -> Expansion {
    let file = syn::parse_file(src).unwrap();
    expand_file(&file, options).unwrap()
}

/// Re-parses the expanded file so generated items can be inspected
fn reparse(expansion: &Expansion) -> syn::File {
    syn::parse2(expansion.file.to_token_stream()).unwrap()
}

/// Every associated function in the file, including those generated inside
/// `const _` blocks
fn functions(items: &[syn::Item]) -> Vec<syn::ImplItemFn> {
    let mut out = vec![];

    for item in items {
        match item {
            syn::Item::Impl(item) => out.extend(item.items.iter().filter_map(|item| match item {
                syn::ImplItem::Fn(function) => Some(function.clone()),
                _ => None,
            })),
            syn::Item::Mod(module) => {
                if let Some((_, content)) = &module.content {
                    out.extend(functions(content));
                }
            }
            syn::Item::Const(item) => {
                if let syn::Expr::Block(block) = &*item.expr {
                    let items: Vec<_> = block
                        .block
                        .stmts
                        .iter()
                        .filter_map(|stmt| match stmt {
                            syn::Stmt::Item(item) => Some(item.clone()),
                            _ => None,
                        })
                        .collect();

                    out.extend(functions(&items));
                }
            }
            _ => {}
        }
    }

    out
}

fn function_names(expansion: &Expansion) -> Vec<String> {
    functions(&reparse(expansion).items)
        .iter()
        .map(|function| function.sig.ident.to_string())
        .collect()
}

fn function(expansion: &Expansion, name: &str) -> syn::ImplItemFn {
    functions(&reparse(expansion).items)
        .into_iter()
        .find(|function| function.sig.ident == name)
        .unwrap_or_else(|| panic!("no function `{name}`"))
}

fn body(expansion: &Expansion, name: &str) -> String {
    function(expansion, name).block.to_token_stream().to_string()
}

fn tokens(block: syn::Block) -> String {
    block.to_token_stream().to_string()
}

#[test]
fn direct_members() {
    let expansion = expand(
        r#"
        mod dto {
            pub struct Baz {
                pub id: i32,
                pub name: String,
                pub count: i32,
            }
        }

        mod views {
            #[map_from(crate::dto::Baz)]
            pub struct Foo {
                pub id: i64,
                pub name: String,
                #[ignore_member]
                pub cached: bool,
            }
        }
        "#,
    );

    assert!(expansion.generation.is_ok());
    assert_eq!(
        function_names(&expansion),
        [
            "from_baz_with_context",
            "from_baz",
            "map_from_with_context",
            "from",
            "to_foo"
        ]
    );

    assert_eq!(
        body(&expansion, "from_baz_with_context"),
        tokens(parse_quote!({
            Self {
                id: ::core::convert::Into::into(::core::clone::Clone::clone(&baz.id)),
                name: ::core::clone::Clone::clone(&baz.name),
                cached: ::core::default::Default::default()
            }
        }))
    );

    let model = expansion.generation.model("Foo").unwrap();
    assert_eq!(model.source_full_name, "crate::dto::Baz");
    assert!(model.imports.iter().any(|ns| ns.as_str() == "crate::dto"));
}

#[test]
fn helper_attributes_are_removed() {
    let expansion = expand(
        r#"
        pub struct Baz { pub id: i32 }

        #[derive(Debug)]
        #[map_from(Baz)]
        pub struct Foo {
            #[map_property(source = "id")]
            pub key: i32,
        }
        "#,
    );

    let file = reparse(&expansion);
    let foo = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Struct(item) if item.ident == "Foo" => Some(item),
            _ => None,
        })
        .unwrap();

    let attrs: Vec<_> = foo
        .attrs
        .iter()
        .map(|attr| attr.path().to_token_stream().to_string())
        .collect();

    assert_eq!(attrs, ["derive"]);
    assert!(foo.fields.iter().all(|field| field.attrs.is_empty()));

    assert_eq!(
        body(&expansion, "from_baz_with_context"),
        tokens(parse_quote!({
            Self {
                key: ::core::clone::Clone::clone(&baz.id)
            }
        }))
    );
}

#[test]
fn unmatched_members_become_parameters() {
    let expansion = expand(
        r#"
        pub struct Baz { pub id: i32 }

        #[map_from(Baz)]
        pub struct Foo {
            pub id: i32,
            pub label: String,
        }
        "#,
    );

    assert_eq!(function_names(&expansion), ["from_baz_with_context", "from_baz"]);

    let from = function(&expansion, "from_baz");
    let expected: syn::ImplItemFn = parse_quote! {
        pub fn from_baz(baz: &Baz, label: String) -> Self {
            Self::from_baz_with_context(&mut _mapto::MappingContext::new(), baz, label)
        }
    };

    let mut from = from;
    from.attrs.clear();

    assert_eq!(
        from.to_token_stream().to_string(),
        expected.to_token_stream().to_string()
    );
}

#[test]
fn nested_and_collection_members() {
    let expansion = expand(
        r#"
        pub struct Item { pub sku: String }

        pub struct Order {
            pub id: i32,
            pub lines: Vec<Item>,
            pub main: Item,
        }

        #[map_from(Item)]
        #[derive(Clone)]
        pub struct ItemView { pub sku: String }

        #[map_from(Order)]
        pub struct OrderView {
            pub id: i32,
            pub lines: Vec<ItemView>,
            pub main: ItemView,
        }
        "#,
    );

    assert!(expansion.generation.is_ok());
    assert_eq!(
        body(&expansion, "from_order_with_context"),
        tokens(parse_quote!({
            Self {
                id: ::core::clone::Clone::clone(&order.id),
                lines: order
                    .lines
                    .iter()
                    .map(|element| __mapto_context.map_from_with_context(element))
                    .collect(),
                main: __mapto_context.map_from_with_context(&order.main)
            }
        }))
    );
}

#[test]
fn converter_members() {
    let expansion = expand(
        r#"
        #[derive(Default)]
        pub struct Celsius;

        impl mapto::TypeConverter<f64, String> for Celsius {
            fn convert(&self, source: f64, parameters: &[mapto::Param]) -> String {
                format!("{source}")
            }
        }

        pub struct Reading { pub value: f64 }

        #[map_from(Reading)]
        pub struct ReadingView {
            #[converter(Celsius, params(1, "C"))]
            pub value: String,
        }
        "#,
    );

    assert!(expansion.generation.is_ok());
    assert_eq!(
        body(&expansion, "from_reading_with_context"),
        tokens(parse_quote!({
            Self {
                value: _mapto::TypeConverter::convert(
                    &<Celsius as ::core::default::Default>::default(),
                    ::core::clone::Clone::clone(&reading.value),
                    &[_mapto::Param::from(1i64), _mapto::Param::from("C")],
                )
            }
        }))
    );
}

#[test]
fn converter_with_wrong_types_is_reported() {
    let expansion = expand(
        r#"
        #[derive(Default)]
        pub struct Celsius;

        impl mapto::TypeConverter<f32, String> for Celsius {
            fn convert(&self, source: f32, parameters: &[mapto::Param]) -> String {
                format!("{source}")
            }
        }

        pub struct Reading { pub value: f64 }

        #[map_from(Reading)]
        pub struct ReadingView {
            #[converter(Celsius)]
            pub value: String,
        }
        "#,
    );

    assert_eq!(
        expansion.generation.diagnostics.kinds(),
        [DiagnosticKind::InvalidConverterGenericArguments]
    );
    assert_eq!(function_names(&expansion), ["convert"]);
}

#[test]
fn mismatched_types_are_reported() {
    let expansion = expand(
        r#"
        pub struct Baz { pub id: String, pub count: i32 }

        #[map_from(Baz)]
        pub struct Foo { pub id: i32 }

        #[map_from(Baz)]
        pub struct Bar { pub count: i32 }
        "#,
    );

    assert_eq!(
        expansion.generation.diagnostics.kinds(),
        [DiagnosticKind::NoMatchingPropertyTypeFound]
    );

    let diagnostic = expansion.generation.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.location.type_name, "Foo");
    assert_eq!(diagnostic.location.member.as_deref(), Some("id"));

    // Siblings still expand
    assert_eq!(
        function_names(&expansion),
        ["from_baz_with_context", "from_baz", "map_from_with_context", "from", "to_bar"]
    );
}

#[test]
fn inherited_members() {
    let expansion = expand(
        r#"
        pub struct Person { pub name: String }

        pub struct Employee {
            #[map_base]
            pub person: Person,
            pub salary: u32,
        }

        #[map_from(Person)]
        pub struct PersonView { pub name: String }

        #[map_from(Employee)]
        pub struct EmployeeView {
            #[map_base]
            pub person: PersonView,
            pub salary: u32,
        }

        #[map_from(Employee)]
        pub struct Badge { pub name: String }
        "#,
    );

    assert!(expansion.generation.is_ok());

    let model = expansion.generation.model("EmployeeView").unwrap();
    assert!(model.has_base_class);

    let bodies: Vec<_> = functions(&reparse(&expansion).items)
        .into_iter()
        .filter(|function| function.sig.ident == "from_employee_with_context")
        .map(|function| tokens(function.block))
        .collect();

    assert_eq!(
        bodies,
        [
            tokens(parse_quote!({
                Self {
                    person: <PersonView as _mapto::MapFrom<_>>::map_from_with_context(
                        __mapto_context,
                        &employee.person
                    ),
                    salary: ::core::clone::Clone::clone(&employee.salary)
                }
            })),
            tokens(parse_quote!({
                Self {
                    name: ::core::clone::Clone::clone(&employee.person.name)
                }
            })),
        ]
    );
}

#[test]
fn tuple_structs() {
    let expansion = expand(
        r#"
        pub struct Point(pub i32, pub i32);

        #[map_from(Point)]
        pub struct PointView(pub i64, pub i64);
        "#,
    );

    assert_eq!(
        body(&expansion, "from_point_with_context"),
        tokens(parse_quote!({
            Self(
                ::core::convert::Into::into(::core::clone::Clone::clone(&point.0)),
                ::core::convert::Into::into(::core::clone::Clone::clone(&point.1))
            )
        }))
    );
}

#[test]
fn tuple_struct_wrapping_its_source() {
    let expansion = expand(
        r#"
        pub struct Baz { pub id: i32 }

        #[map_from(Baz)]
        pub struct Foo(pub Baz);
        "#,
    );

    // Only the missing member match is reported, not the tuple constructor
    assert_eq!(
        expansion.generation.diagnostics.kinds(),
        [DiagnosticKind::NoMatchingPropertyFound]
    );
}

#[test]
fn user_constructor_replaces_generated_one() {
    let expansion = expand(
        r#"
        pub struct Baz { pub id: i32 }

        #[map_from(Baz)]
        pub struct Foo { pub id: i32 }

        impl Foo {
            pub fn new(baz: &Baz) -> Self {
                Self::from_baz_with_context(&mut mapto::MappingContext::new(), baz)
            }
        }
        "#,
    );

    assert!(expansion.generation.is_ok());
    assert!(!expansion.generation.model("Foo").unwrap().generate_secondary_constructor);
    assert_eq!(
        function_names(&expansion),
        ["new", "from_baz_with_context", "map_from_with_context", "from", "to_foo"]
    );

    let expansion = expand(
        r#"
        pub struct Baz { pub id: i32 }

        #[map_from(Baz)]
        pub struct Foo { pub id: i32 }

        impl Foo {
            pub fn new(baz: &Baz) -> Self {
                Foo { id: baz.id }
            }
        }
        "#,
    );

    assert_eq!(
        expansion.generation.diagnostics.kinds(),
        [DiagnosticKind::MissingConstructorArgument]
    );
}

#[test]
fn update_and_json_methods() {
    let expansion = expand(
        r#"
        pub struct Baz { pub id: i32, pub count: i32 }

        #[map_from(Baz)]
        #[use_update]
        #[json_extension]
        pub struct Foo {
            #[read_only]
            pub id: i32,
            pub count: i32,
        }
        "#,
    );

    let update = function(&expansion, "update_from_baz");

    assert_eq!(
        tokens(update.block),
        tokens(parse_quote!({
            self.count = ::core::clone::Clone::clone(&baz.count);
        }))
    );

    assert_eq!(
        body(&expansion, "to_json"),
        tokens(parse_quote!({
            _mapto::serde_json::to_string(self)
        }))
    );
}

#[test]
fn options_shape_generated_signatures() {
    let src = r#"
        pub struct Baz { pub id: i32 }

        #[map_from(Baz)]
        pub struct Foo { pub id: i32 }
    "#;

    let options = Options::new()
        .access_modifier(AccessModifier::Internal)
        .generate_xml_document(false)
        .support_nullable_reference_types(true);

    let expansion = expand_with(src, &options);

    let from = function(&expansion, "from_baz");
    assert!(from.attrs.is_empty());
    assert_eq!(from.vis.to_token_stream().to_string(), "pub (crate)");

    let names = function_names(&expansion);
    assert_eq!(names.iter().filter(|name| *name == "to_foo").count(), 2);

    let documented = function(&expand(src), "from_baz");
    assert!(documented.attrs.iter().all(|attr| attr.path().is_ident("doc")));
    assert_eq!(documented.attrs.len(), 1);

    // Resolution does not depend on options
    assert_eq!(
        expansion.generation.model("Foo").unwrap().source_members,
        expand(src).generation.model("Foo").unwrap().source_members
    );
}
