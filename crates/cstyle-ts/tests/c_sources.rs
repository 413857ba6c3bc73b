//! Integration test: real C files through the Tree-sitter front end.

use cstyle_core::{CheckKind, Config, SourceParser, Validator};
use cstyle_ts::TreeSitterParser;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn check(config: &str, files: &[PathBuf]) -> cstyle_core::LintResult {
    Validator::builder()
        .config(Config::parse(config).unwrap())
        .files(files.iter().cloned())
        .build()
        .run(&TreeSitterParser::new())
        .unwrap()
}

const MAIN_ARGV: &str = "int main(int argc, char **Argv)\n{\n  return 0;\n}\n";

#[test]
fn pointer_prefix_on_parameter() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "main.c", MAIN_ARGV);

    let result = check("[Options]\npointer_prefix = \"p\"\n", &[file.clone()]);

    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert_eq!(d.file(), file.as_path());
    assert_eq!((d.line(), d.column()), (1, 27));
    assert_eq!(d.reason, "\"Argv\" is invalid - expected pointer prefix \"p\"");
}

#[test]
fn repeated_prefix_counts_every_level() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "main.c", &MAIN_ARGV.replace("Argv", "pArgv"));

    let result = check(
        "[Options]\npointer_prefix = \"p\"\npointer_prefix_repeat = true\n",
        &[file],
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].reason, "\"pArgv\" is invalid - expected pointer prefix \"pp\"");
}

#[test]
fn goto_and_returns() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "flow.c",
        "int f(int x)\n{\n  if (x)\n    return 1;\n  goto out;\nout:\n  return 0;\n}\n",
    );

    let harmful = check("", &[file.clone()]);
    assert_eq!(harmful.diagnostics.len(), 1);
    assert_eq!(harmful.diagnostics[0].check, CheckKind::GotoHarmful);
    assert_eq!(harmful.diagnostics[0].line(), 5);

    let preferred = check("[Options]\nprefer_goto = true\n", &[file]);
    assert_eq!(preferred.diagnostics.len(), 1);
    assert_eq!(preferred.diagnostics[0].check, CheckKind::GotoPreference);
    assert_eq!(preferred.diagnostics[0].line(), 7);
}

#[test]
fn naming_rules_over_a_file() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "names.c",
        "#define max_len 16\nstruct Point { int x; };\nenum { red };\n",
    );

    let result = check(
        "[Rules]\nmacro_definition = '[A-Z_]+'\nstruct_decl = '[a-z_]+'\nenum_constant_decl = '[A-Z]+'\n",
        &[file],
    );
    let reasons: Vec<&str> = result.diagnostics.iter().map(|d| d.reason.as_str()).collect();
    assert_eq!(
        reasons,
        [
            "\"max_len\" is invalid - failed regexp check \"[A-Z_]+\"",
            "\"Point\" is invalid - failed regexp check \"[a-z_]+\"",
            "\"red\" is invalid - failed regexp check \"[A-Z]+\"",
        ]
    );
}

#[test]
fn broken_files_are_reported_as_failures() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.c", "int count;\n");
    let bad = write(&dir, "bad.c", "int main( {\n");

    let result = check("", &[good, bad.clone()]);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.files_checked, 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].file, bad);
}

#[test]
fn cpp_files_use_the_cpp_grammar() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "widget.cpp", "namespace ui {\nclass widget {\n  int *size_;\n};\n}\n");

    let tree = TreeSitterParser::new().parse(&file).unwrap();
    assert_eq!(tree.walk_preorder().count(), 4);

    let result = check("[Rules]\nclass_decl = '[A-Z][a-z]+'\n", &[file]);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].reason, "\"widget\" is invalid - failed regexp check \"[A-Z][a-z]+\"");
}
