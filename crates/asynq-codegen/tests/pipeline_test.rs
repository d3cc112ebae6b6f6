//! End-to-end tests for the generation pipeline.
//!
//! Tests the complete workflow:
//! 1. Scan a module directory
//! 2. Build the generation model
//! 3. Render, write, and format the output

use asynq_codegen::{Formatter, Generator, ModelBuilder, scan_directory};
use asynq_codegen_core::{CodegenConfig, Error, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// In-memory canonicalizer: strips trailing whitespace and records calls.
#[derive(Debug, Clone, Default)]
struct TrimFormatter {
    calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl Formatter for TrimFormatter {
    fn format(&self, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(path.to_path_buf());

        let content = std::fs::read_to_string(path).map_err(|e| Error::Format {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let trimmed: String = content
            .lines()
            .map(|line| format!("{}\n", line.trim_end()))
            .collect();

        std::fs::write(path, trimmed).map_err(|e| Error::Format {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Copies the example module into a temporary directory.
fn example_module() -> TempDir {
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/example01/mod.rs");
    let dir = TempDir::new().unwrap();
    std::fs::copy(source, dir.path().join("mod.rs")).unwrap();
    dir
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn config(dir: &Path) -> CodegenConfig {
    CodegenConfig::new(dir).with_package_name("example01")
}

#[test]
fn test_end_to_end_example_module() {
    let dir = example_module();
    let formatter = TrimFormatter::default();

    let report = Generator::new(config(dir.path()))
        .unwrap()
        .with_formatter(formatter.clone())
        .run()
        .unwrap();

    assert_eq!(report.task_count, 2);
    assert_eq!(report.output, dir.path().join("asynq_generated.rs"));
    assert_eq!(*formatter.calls.borrow(), vec![report.output.clone()]);

    let generated = std::fs::read_to_string(&report.output).unwrap();
    assert_eq!(generated.matches("pub async fn enqueue_").count(), 2);
    assert!(generated.contains("pub async fn enqueue_send_email("));
    assert!(generated.contains("pub async fn enqueue_send_sms("));
    assert!(generated.contains("\"send_email\""));
    assert!(generated.contains("\"send_sms_message\""));
    assert!(!generated.contains("DeliveryReceipt"));
    assert!(generated.lines().all(|line| line == line.trim_end()));
}

#[test]
fn test_generated_source_is_valid_rust() {
    let dir = example_module();
    let report = Generator::new(config(dir.path()))
        .unwrap()
        .with_formatter(TrimFormatter::default())
        .run()
        .unwrap();

    let generated = std::fs::read_to_string(&report.output).unwrap();
    let syntax = syn::parse_file(&generated).unwrap();

    let imports: Vec<String> = syntax
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Use(item) => match &item.tree {
                syn::UseTree::Path(path) if path.ident == "super" => match &*path.tree {
                    syn::UseTree::Name(name) => Some(name.ident.to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(imports, ["SendEmail", "SendSMS"]);

    let enqueue_fns = syntax
        .items
        .iter()
        .filter(|item| {
            matches!(item, syn::Item::Fn(f) if f.sig.ident.to_string().starts_with("enqueue_"))
        })
        .count();
    assert_eq!(enqueue_fns, 2);
}

#[test]
fn test_keyword_struct_name_aborts_generation() {
    let dir = example_module();
    write(dir.path(), "types.rs", "/// asynq:task\npub struct Type { a: u8 }");

    let err = Generator::new(config(dir.path()))
        .unwrap()
        .with_formatter(TrimFormatter::default())
        .run()
        .unwrap_err();

    assert!(err.is_directive_error());
    assert!(err.to_string().contains("types.rs:2"));
    assert!(!dir.path().join("asynq_generated.rs").exists());
}

#[test]
fn test_regeneration_ignores_previous_output() {
    let dir = example_module();
    let generator = Generator::new(config(dir.path()))
        .unwrap()
        .with_formatter(TrimFormatter::default());

    let first = generator.run().unwrap();
    let first_content = std::fs::read_to_string(&first.output).unwrap();

    let second = generator.run().unwrap();
    let second_content = std::fs::read_to_string(&second.output).unwrap();

    assert_eq!(first.task_count, second.task_count);
    assert_eq!(first_content, second_content);
}

#[test]
fn test_model_is_deterministic_across_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "zeta.rs", "/// asynq:task\npub struct Alpha { a: u8 }");
    write(dir.path(), "alpha.rs", "/// asynq:task\npub struct Zeta { a: u8 }");
    write(dir.path(), "mod.rs", "/// asynq:task\npub struct Middle { a: u8 }");

    let build = || {
        let package = scan_directory(dir.path(), Some("tasks")).unwrap();
        ModelBuilder::new().build(&package).unwrap()
    };

    let first = build();
    let second = build();
    assert_eq!(first, second);

    let names: Vec<_> = first
        .records
        .iter()
        .map(|r| (r.declared_name.as_str(), r.source_module.as_deref()))
        .collect();
    assert_eq!(
        names,
        [
            ("Alpha", Some("zeta")),
            ("Middle", None),
            ("Zeta", Some("alpha"))
        ]
    );
}

#[test]
fn test_override_and_default_names() {
    let dir = example_module();
    let model = Generator::new(config(dir.path())).unwrap().inspect().unwrap();

    let pairs: Vec<_> = model
        .records
        .iter()
        .map(|r| (r.declared_name.as_str(), r.resource_name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [("SendEmail", "send_email"), ("SendSMS", "send_sms_message")]
    );
    assert_eq!(model.package_name.as_deref(), Some("example01"));
}

#[test]
fn test_unannotated_module_generates_empty_bindings() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "mod.rs",
        "pub struct Plain { a: u8 }\n/// Just docs.\npub struct Documented { a: u8 }",
    );

    let generator = Generator::new(config(dir.path()))
        .unwrap()
        .with_formatter(TrimFormatter::default());
    let model = generator.inspect().unwrap();
    assert!(model.is_empty());
    assert!(model.package_name.is_none());

    let output = generator.generate(&model).unwrap();
    let generated = std::fs::read_to_string(output).unwrap();
    assert!(!generated.contains("pub async fn enqueue_"));
}

#[test]
fn test_malformed_directive_reports_file_and_line() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "mod.rs", "/// asynq:task\npub struct Good { a: u8 }");
    write(
        dir.path(),
        "sms.rs",
        "use std::fmt;\n\n/// asynq:task foo bar\npub struct SendSMS { a: u8 }",
    );

    let err = Generator::new(config(dir.path()))
        .unwrap()
        .with_formatter(TrimFormatter::default())
        .run()
        .unwrap_err();

    match err {
        Error::Directive { path, line, .. } => {
            assert!(path.ends_with("sms.rs"));
            assert_eq!(line, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("asynq_generated.rs").exists());
}

#[test]
fn test_syntax_error_aborts_scan() {
    let dir = example_module();
    write(dir.path(), "broken.rs", "pub struct {");

    let err = Generator::new(config(dir.path()))
        .unwrap()
        .inspect()
        .unwrap_err();
    assert!(err.is_scan_error());
}

#[test]
fn test_atomic_write_output() {
    let dir = example_module();
    let generator = Generator::new(config(dir.path()).with_atomic_write(true))
        .unwrap()
        .with_formatter(TrimFormatter::default());

    let report = generator.run().unwrap();
    assert!(report.output.exists());

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 2, "unexpected files: {leftovers:?}");
}

#[test]
fn test_config_file_in_working_dir() {
    let dir = example_module();
    write(
        dir.path(),
        "asynq-codegen.toml",
        "output = \"queue_generated.rs\"\npackage_name = \"mail\"\n",
    );

    let config = CodegenConfig::discover(dir.path()).unwrap();
    let report = Generator::new(config)
        .unwrap()
        .with_formatter(TrimFormatter::default())
        .run()
        .unwrap();

    assert_eq!(report.output, dir.path().join("queue_generated.rs"));
    let generated = std::fs::read_to_string(&report.output).unwrap();
    assert!(generated.contains("package `mail`"));
}
