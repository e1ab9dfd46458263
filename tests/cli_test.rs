use assert_cmd::Command;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn declmap(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("declmap").unwrap();
    cmd.current_dir(dir).env_remove("DECLMAP_NAMESPACE");
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("app")).unwrap();
    fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
    fs::write(
        dir.path().join("app/actions.ts"),
        "export async function getTodos(): Promise<Todo[]> {}\nexport const f = (a?: string) => {};\n",
    )
    .unwrap();
    fs::write(dir.path().join("app/types.d.ts"), "export declare function skip(): void;").unwrap();
    fs::write(dir.path().join("node_modules/pkg/index.ts"), "export function dep() {}").unwrap();
    dir
}

fn stdout(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_extract_json() {
    let dir = project();
    let out = stdout(declmap(dir.path()).args(["extract", ".", "--no-parallel"]));

    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let modules = json.as_array().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0]["id"], "app/actions.ts");
    assert_eq!(modules[0]["signatures"][0]["name"], "getTodos");
    assert_eq!(modules[0]["signatures"][1]["kind"], "arrow-binding");
}

#[test]
fn test_extract_text_single_file() {
    let dir = project();
    let out = stdout(declmap(dir.path()).args(["extract", "app/actions.ts", "--format", "text"]));

    assert!(out.starts_with("actions.ts\n"));
    assert!(out.contains("async getTodos(): Promise<Todo[]>  [declaration]"));
    assert!(out.contains("f(a?: string)  [arrow-binding]"));
}

#[test]
fn test_emit_to_file() {
    let dir = project();
    declmap(dir.path())
        .args(["emit", ".", "--namespace", "Rpc", "-o", "actions.d.ts"])
        .assert()
        .success();

    let document = fs::read_to_string(dir.path().join("actions.d.ts")).unwrap();
    assert!(document.starts_with("declare module \"app/actions.ts\" {\n"));
    assert!(document.contains("  export function f(a?: string): any;\n"));
    assert!(document.contains("  namespace Rpc {\n    namespace AppActions {\n"));
    assert!(!document.contains("dep"));
}

#[test]
fn test_namespace_from_env_and_config() {
    let dir = project();
    fs::write(dir.path().join(".declmap.toml"), "[emit]\nnamespace = \"FromConfig\"\n").unwrap();

    let out = stdout(declmap(dir.path()).args(["emit", "."]));
    assert!(out.contains("namespace FromConfig {"));

    let out = stdout(
        declmap(dir.path())
            .env("DECLMAP_NAMESPACE", "FromEnv")
            .args(["emit", "."]),
    );
    assert!(out.contains("namespace FromEnv {"));
}

#[test]
fn test_config_ignore_patterns() {
    let dir = project();
    fs::write(dir.path().join("app/legacy.ts"), "export function old() {}").unwrap();
    fs::write(dir.path().join(".declmap.toml"), "[files]\nignore = [\"app/legacy*\"]\n").unwrap();

    let out = stdout(declmap(dir.path()).args(["extract", "."]));
    assert!(!out.contains("legacy"));
    assert!(out.contains("getTodos"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = project();
    fs::write(dir.path().join(".declmap.toml"), "[emit\nnamespace = ").unwrap();

    let output = declmap(dir.path()).args(["extract", "."]).assert().failure();
    let stderr = String::from_utf8(output.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Failed to load configuration"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = project();
    declmap(dir.path())
        .args(["extract", ".", "--config", "nope.toml"])
        .assert()
        .failure();
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();
    declmap(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".declmap.toml").exists());

    declmap(dir.path()).arg("init").assert().failure();
    declmap(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_malformed_module_still_succeeds() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.ts"), "export function broken(a: {").unwrap();

    let out = stdout(declmap(dir.path()).args(["extract", "."]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["signatures"], serde_json::json!([]));
    assert_eq!(json[0]["warnings"][0]["kind"], "parse-failure");
}
