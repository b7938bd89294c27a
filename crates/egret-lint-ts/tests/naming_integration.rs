//! Integration test: TypeScript naming checks end-to-end via Analyzer.
//!
//! Uses fixture files under `tests/fixtures/egret/` to verify that the
//! full source → tree-sitter → `SyntaxTree` → `TsEgret` → Analyzer pipeline
//! reports the expected naming violations.

use egret_lint_core::{Analyzer, AnalyzerError, Config, LintResult, Severity};
use egret_lint_rules::TsEgret;
use egret_lint_ts::TypeScriptParser;
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/egret")
}

fn fixture_config() -> Config {
    Config::from_file(&fixture_root().join("egret-lint.toml")).expect("fixture config should parse")
}

fn analyzer(root: &Path, config: Config) -> Analyzer {
    Analyzer::builder()
        .root(root)
        .config(config)
        .parser(TypeScriptParser::typescript())
        .parser(TypeScriptParser::tsx())
        .rule(TsEgret::new())
        .build()
        .expect("analyzer should build")
}

fn tip(key: &str) -> &'static str {
    egret_lint_rules::EGRET_TIPS
        .iter()
        .find(|(k, _)| k.as_str() == key)
        .map(|(_, message)| message)
        .expect("known key")
}

fn summary(result: &LintResult) -> Vec<String> {
    result
        .violations
        .iter()
        .map(|v| {
            format!(
                "{}:{}:{}",
                v.location.file.display(),
                v.location.line,
                v.location.column
            )
        })
        .collect()
}

// ── Fixture project ──

#[test]
fn reports_violations_in_fixture_project() {
    let result = analyzer(&fixture_root(), fixture_config())
        .analyze()
        .expect("analysis should succeed");

    // Main.ts and HallView.tsx are clean; node_modules and libs are excluded.
    assert_eq!(result.files_checked, 3);
    assert_eq!(
        summary(&result),
        [
            "src/scene/SceneHall.ts:2:11",
            "src/scene/SceneHall.ts:3:9",
            "src/scene/SceneHall.ts:5:12",
            "src/scene/SceneHall.ts:14:12",
            "src/scene/SceneHall.ts:15:16",
            "src/scene/SceneHall.ts:18:9",
            "src/scene/SceneHall.ts:19:13",
        ]
    );
    assert!(result.has_errors());
    assert!(result.violations.iter().all(|v| v.code == "EG001"));
    assert!(result.violations.iter().all(|v| v.rule == "ts-egret"));
}

#[test]
fn messages_follow_the_tip_table() {
    let result = analyzer(&fixture_root(), fixture_config())
        .analyze()
        .expect("analysis should succeed");

    let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
    let expected: Vec<&str> = ["const", "let_p", "interface", "cls", "property_s", "method", "var"]
        .into_iter()
        .map(tip)
        .collect();
    assert_eq!(messages, expected);
}

#[test]
fn disabled_rule_reports_nothing() {
    let config = Config::parse(
        "[analyzer]\nexclude = [\"**/node_modules/**\", \"**/libs/**\"]\n\n[rules.ts-egret]\nenabled = false\n",
    )
    .expect("config should parse");

    let result = analyzer(&fixture_root(), config)
        .analyze()
        .expect("analysis should succeed");
    assert_eq!(result.files_checked, 3);
    assert!(result.violations.is_empty());
}

#[test]
fn violations_keep_traversal_order_within_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("Main.ts"), "let g_a = { Foo() {} }, Bad = 1;\n")
        .expect("write");

    let result = analyzer(dir.path(), Config::default())
        .analyze()
        .expect("analysis should succeed");

    // `Bad` is bound after the initializer holding `Foo`, but its statement
    // is visited first.
    assert_eq!(summary(&result), ["Main.ts:1:25", "Main.ts:1:13"]);
    let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages, [tip("let"), tip("method")]);
}

// ── Single sources ──

fn check(source: &str) -> Vec<String> {
    let analyzer = analyzer(Path::new("/project"), Config::default());
    analyzer
        .check_source(Path::new("/project/src/Main.ts"), source)
        .expect("source should check")
        .into_iter()
        .map(|v| format!("{}:{}", v.location.line, v.location.column))
        .collect()
}

#[test]
fn class_name_scenarios() {
    assert_eq!(check("class textField {}\n"), ["1:1"]);
    assert!(check("class TextField {}\n").is_empty());
}

#[test]
fn global_variable_scenarios() {
    assert_eq!(check("let scene_hall = 1;\n"), ["1:5"]);
    assert!(check("let g_scene_hall = 1;\n").is_empty());
    assert_eq!(check("namespace game {\n    const GAME_NAME = 1;\n}\n"), ["2:11"]);
    assert!(check("namespace game {\n    const C_GAME_NAME = 1;\n}\n").is_empty());
}

#[test]
fn var_is_reported_once_per_statement() {
    assert_eq!(check("var x = 1, y = 2;\n"), ["1:1"]);
}

#[test]
fn destructured_bindings_are_checked_by_name() {
    let analyzer = analyzer(Path::new("/project"), Config::default());
    let violations = analyzer
        .check_source(Path::new("/project/src/Main.ts"), "const { a } = obj;\n")
        .expect("source should check");

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, tip("const"));
    assert_eq!(violations[0].location.offset, 8);
    assert_eq!(violations[0].location.length, 1);
    assert_eq!(violations[0].location.column, 9);
}

#[test]
fn declare_and_export_wrappers_keep_root_scope() {
    assert_eq!(check("export let hall = 1;\n"), ["1:12"]);
    assert_eq!(check("declare const c_name: string;\n"), ["1:15"]);
}

#[test]
fn columns_count_characters() {
    // "名前" is six bytes but two characters.
    assert_eq!(check("let g_名前 = 1; let Bad = 2;\n"), ["1:19"]);
}

#[test]
fn severity_is_error() {
    let analyzer = analyzer(Path::new("/project"), Config::default());
    let violations = analyzer
        .check_source(Path::new("/project/a.ts"), "class bad {}\n")
        .expect("source should check");
    assert_eq!(violations[0].severity, Severity::Error);
}

// ── Parse failures ──

#[test]
fn unparsable_files_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("Broken.ts"), "class {\n").expect("write");
    std::fs::write(dir.path().join("Good.ts"), "class good {}\n").expect("write");

    let result = analyzer(dir.path(), Config::default())
        .analyze()
        .expect("analysis should succeed");
    assert_eq!(result.files_checked, 1);
    assert_eq!(summary(&result), ["Good.ts:1:1"]);
}

#[test]
fn unparsable_files_fail_when_requested() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("Broken.ts"), "class {\n").expect("write");

    let err = Analyzer::builder()
        .root(dir.path())
        .parser(TypeScriptParser::typescript())
        .rule(TsEgret::new())
        .fail_on_parse_error(true)
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect_err("analysis should fail");
    assert!(matches!(err, AnalyzerError::Parse { .. }), "{err:?}");
}
