use mapto_cli::MaptoCli;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

const MODELS: &str = r#"
pub struct Baz { pub id: i32, pub name: String }

#[map_from(Baz)]
pub struct Foo { pub id: i64, pub name: String }
"#;

const BROKEN: &str = r#"
pub struct Baz { pub id: String }

#[map_from(Baz)]
pub struct Foo { pub id: i32 }

#[map_from(Missing)]
pub struct Bar { pub id: i32 }
"#;

/// Writes `contents` to a file unique to the calling test
fn source_file(test: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mapto-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let path = dir.join(format!("{test}.rs"));
    std::fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> (bool, String) {
    let mut out = vec![];
    let ok = MaptoCli::new()
        .parse_from(std::iter::once("mapto").chain(args.iter().copied()), &mut out)
        .unwrap();

    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn check_reports_success() {
    let path = source_file("check_reports_success", MODELS);
    let (ok, out) = run(&["check", path.to_str().unwrap()]);

    assert!(ok);
    assert_eq!(out, "ok: 1 mapped types\n");
}

#[test]
fn check_reports_diagnostics() {
    let path = source_file("check_reports_diagnostics", BROKEN);
    let (ok, out) = run(&["check", path.to_str().unwrap()]);

    assert!(!ok);

    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("error[MT0004] Foo.id"));
    assert!(lines[1].starts_with("error[MT0002] Bar"));
    assert_eq!(lines[2], "failed: 2 errors");
}

#[test]
fn generate_prints_expanded_code() {
    let path = source_file("generate_prints_expanded_code", MODELS);
    let (ok, out) = run(&["generate", path.to_str().unwrap(), "--access", "internal"]);

    assert!(ok);
    assert!(out.contains("pub (crate) fn from_baz_with_context"));
    assert!(out.contains("trait BazToFoo"));
    assert!(!out.contains("# [map_from"));
}

#[test]
fn generate_writes_to_a_file() {
    let path = source_file("generate_writes_to_a_file", MODELS);
    let output = path.with_extension("out.rs");

    let (ok, out) = run(&[
        "generate",
        path.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--no-docs",
    ]);

    assert!(ok);
    assert!(out.is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("fn from_baz"));
    assert!(!written.contains("doc"));
}

#[test]
fn explain_prints_models_as_json() {
    let path = source_file("explain_prints_models_as_json", MODELS);
    let (ok, out) = run(&["explain", path.to_str().unwrap()]);

    assert!(ok);

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    let model = &report["models"][0];

    assert_eq!(model["type_name"], "Foo");
    assert_eq!(model["source_type_name"], "Baz");
    assert_eq!(model["source_members"].as_array().unwrap().len(), 2);
    assert_eq!(report["diagnostics"], serde_json::json!([]));
}

#[test]
fn bad_property_is_an_error() {
    let path = source_file("bad_property_is_an_error", MODELS);
    let mut out = vec![];

    let result = MaptoCli::new().parse_from(
        [
            "mapto",
            "check",
            path.to_str().unwrap(),
            "--property",
            "mapto_generate_xml_document=maybe",
        ],
        &mut out,
    );

    assert!(result.is_err());
}
