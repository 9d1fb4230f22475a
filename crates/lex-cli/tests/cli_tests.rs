use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;
use tempfile::tempdir;

fn run(bin: &str, args: &[&Path]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn")
}

fn extract_element(args: &[&Path]) -> Output {
    run(env!("CARGO_BIN_EXE_extract_element"), args)
}

fn get_stack_order(args: &[&Path]) -> Output {
    run(env!("CARGO_BIN_EXE_get_stack_order"), args)
}

fn write_fixture(dir: &Path, name: &str, v: serde_json::Value) -> std::path::PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, serde_json::to_string(&v).unwrap()).unwrap();
    p
}

fn hat_doc() -> serde_json::Value {
    json!({
        "assets": [{"nm": "hat"}, {"nm": "shoe"}],
        "layers": [{"nm": "hat"}]
    })
}

#[test]
fn extract_prints_json_to_stdout() {
    let dir = tempdir().unwrap();
    let src = write_fixture(dir.path(), "loser01_character01.json", hat_doc());
    let out = extract_element(&[src.as_path(), Path::new("hat")]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v, json!({"asset": [{"nm": "hat"}], "layer": {"nm": "hat"}}));
}

#[test]
fn extract_writes_output_file() {
    let dir = tempdir().unwrap();
    let src = write_fixture(dir.path(), "loser01_character01.json", hat_doc());
    let dest = dir.path().join("hat.json");
    let out = extract_element(&[src.as_path(), Path::new("hat"), dest.as_path()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let first = std::fs::read(&dest).unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("assets found: 1"));

    let again = extract_element(&[src.as_path(), Path::new("hat"), dest.as_path()]);
    assert!(again.status.success());
    assert_eq!(std::fs::read(&dest).unwrap(), first);
}

#[test]
fn extract_no_match_exits_nonzero_without_output() {
    let dir = tempdir().unwrap();
    let src = write_fixture(dir.path(), "loser01_character01.json", hat_doc());
    let dest = dir.path().join("scarf.json");
    let out = extract_element(&[src.as_path(), Path::new("scarf"), dest.as_path()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dest.exists());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no assets or layers found matching 'scarf'"));
}

#[test]
fn extract_missing_input_and_args() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let out = extract_element(&[missing.as_path(), Path::new("hat")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: file not found"));

    let out = extract_element(&[missing.as_path()]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn extract_invalid_json_exits_nonzero() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("bad.json");
    std::fs::write(&src, "{").unwrap();
    let out = extract_element(&[src.as_path(), Path::new("hat")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: invalid JSON"));
}

#[test]
fn stack_order_writes_index_and_listing() {
    let dir = tempdir().unwrap();
    let src = write_fixture(
        dir.path(),
        "run02_character01.json",
        json!({"layers": [{"nm": "bg"}, {"nm": "fg"}]}),
    );
    let out = get_stack_order(&[src.as_path()]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("# Stack Order (bottom to top):"));
    assert!(stderr.contains("  1. bg"));
    assert!(stderr.contains("  2. fg"));

    let idx = std::fs::read_to_string(dir.path().join("stack-order.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&idx).unwrap();
    assert_eq!(v, json!({"run02": ["bg", "fg"]}));
}

#[test]
fn stack_order_missing_arg_or_file() {
    let out = get_stack_order(&[]);
    assert_eq!(out.status.code(), Some(1));

    let dir = tempdir().unwrap();
    let out = get_stack_order(&[dir.path().join("run01_x.json").as_path()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("stack-order.json").exists());
}

#[test]
fn stack_order_invalid_json_exits_nonzero() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("run02_character01.json");
    std::fs::write(&src, "{ \"layers\": [").unwrap();
    let out = get_stack_order(&[src.as_path()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: invalid JSON"));
    assert!(!dir.path().join("stack-order.json").exists());
}

#[test]
fn stack_order_reports_added_then_replaced() {
    let dir = tempdir().unwrap();
    let src = write_fixture(
        dir.path(),
        "run02_character01.json",
        json!({"layers": [{"nm": "bg"}]}),
    );
    let first = get_stack_order(&[src.as_path()]);
    assert!(first.status.success());
    let stderr = String::from_utf8_lossy(&first.stderr);
    assert!(stderr.contains("added new entry for 'run02'"));
    assert!(stderr.contains("(1 animations in file)"));

    let second = get_stack_order(&[src.as_path()]);
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("replaced existing entry for 'run02'"));
}

#[test]
fn stack_order_warns_on_corrupt_index() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("stack-order.json"), "{ nope").unwrap();
    let src = write_fixture(
        dir.path(),
        "idle_character01.json",
        json!({"layers": [{"nm": "body"}]}),
    );
    let out = get_stack_order(&[src.as_path()]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid JSON, creating new one"));
    let idx = std::fs::read_to_string(dir.path().join("stack-order.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&idx).unwrap();
    assert_eq!(v, json!({"idle": ["body"]}));
}

#[test]
fn extract_no_match_warning_survives_quiet_logging() {
    let dir = tempdir().unwrap();
    let src = write_fixture(dir.path(), "loser01_character01.json", hat_doc());
    let out = Command::new(env!("CARGO_BIN_EXE_extract_element"))
        .args([src.as_path(), Path::new("scarf")])
        .env("RUST_LOG", "error")
        .output()
        .expect("spawn");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("warning: no assets or layers found"));
}
