//! End-to-end tests for the weavec CLI.
//!
//! Each test writes a weave.toml manifest into a temp dir, invokes the built
//! binary on it and checks stdout, stderr and the exit status.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const PET_MANIFEST: &str = r#"
[[type]]
name = "com.example.Pet"

[type.json]
from_json_method = "from<TypeName>"
to_json_array_method = ""
from_json_array_method = "from<TypeNamePlural>"
"#;

/// Find the weavec binary in the target directory.
fn find_weavec() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("cannot find current exe")
        .parent()
        .expect("cannot find parent dir")
        .to_path_buf();

    // Navigate from `deps/` to the target directory
    if path.file_name().map_or(false, |n| n == "deps") {
        path = path.parent().unwrap().to_path_buf();
    }

    let weavec = path.join("weavec");
    assert!(
        weavec.exists(),
        "weavec binary not found at {}. Run `cargo build -p weavec` first.",
        weavec.display()
    );
    weavec
}

/// Helper: write `manifest` to a temp dir and run weavec with `args`
/// followed by the manifest path.
fn weavec(dir: &Path, manifest: &str, args: &[&str]) -> Output {
    let manifest_path = dir.join("weave.toml");
    std::fs::write(&manifest_path, manifest).expect("failed to write weave.toml");
    Command::new(find_weavec())
        .args(args)
        .arg(&manifest_path)
        .env_remove("WEAVE_LOG")
        .output()
        .expect("failed to invoke weavec")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ── synth ──────────────────────────────────────────────────────────────

#[test]
fn synth_prints_aspect() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(temp_dir.path(), PET_MANIFEST, &["synth"]);

    assert!(output.status.success(), "weavec failed: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("privileged aspect Pet_Weave_Json {"), "{}", out);
    assert!(out.contains("public String Pet.toJson() {"), "{}", out);
    assert!(out.contains("public static Pet Pet.fromPet(String json) {"), "{}", out);
    assert!(
        out.contains("public static Collection<Pet> Pet.fromPets(String json) {"),
        "{}",
        out
    );
    assert!(!out.contains("toJsonArray"), "{}", out);
}

#[test]
fn synth_json_output() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(temp_dir.path(), PET_MANIFEST, &["synth", "--json"]);
    assert!(output.status.success(), "weavec failed: {}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1, "{}", out);
    let report: serde_json::Value = serde_json::from_str(lines[0])
        .unwrap_or_else(|e| panic!("invalid JSON output: {}\n{}", e, out));

    assert_eq!(report["type"], "com.example.Pet");
    assert_eq!(report["aspect"], "com.example.Pet_Weave_Json");
    assert_eq!(
        report["declared_by"],
        "MID:weave.json#SRC_MAIN_JAVA?com.example.Pet"
    );
    let methods = report["methods"].as_array().unwrap();
    let names: Vec<&str> = methods.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["toJson", "fromPet", "fromPets"]);
    assert_eq!(methods[2]["return_type"], "java.util.Collection<com.example.Pet>");
    assert_eq!(report["outcomes"][2]["status"], "disabled");
    assert_eq!(report["outcomes"][2]["operation"], "toJsonArray");
}

#[test]
fn synth_writes_aspect_files() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let out_dir = temp_dir.path().join("generated");
    let output = weavec(
        temp_dir.path(),
        PET_MANIFEST,
        &["synth", "--out-dir", out_dir.to_str().unwrap()],
    );
    assert!(output.status.success(), "weavec failed: {}", stderr(&output));

    let aspect = out_dir
        .join("com")
        .join("example")
        .join("Pet_Weave_Json.aj");
    let text = std::fs::read_to_string(&aspect)
        .unwrap_or_else(|e| panic!("missing {}: {}", aspect.display(), e));
    assert!(text.starts_with("// Generated by weave. Do not edit.\n"));
    assert!(text.contains("package com.example;"));
    assert!(stdout(&output).contains("Pet_Weave_Json.aj"));
}

#[test]
fn json_and_out_dir_conflict() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let out_dir = temp_dir.path().join("generated");
    let output = weavec(
        temp_dir.path(),
        PET_MANIFEST,
        &["synth", "--json", "--out-dir", out_dir.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot be used with"), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert!(!out_dir.exists());
}

#[test]
fn declared_methods_are_not_regenerated() {
    let manifest = r#"
[[type]]
name = "com.example.Pet"

[[type.method]]
name = "toJson"
returns = "java.lang.String"
"#;
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(temp_dir.path(), manifest, &["synth"]);
    assert!(output.status.success(), "weavec failed: {}", stderr(&output));
    let out = stdout(&output);
    assert!(!out.contains("Pet.toJson()"), "{}", out);
    assert!(out.contains("Pet.fromJsonToPet(String json)"), "{}", out);
}

#[test]
fn type_filter() {
    let manifest = r#"
[[type]]
name = "com.example.Pet"
[[type]]
name = "com.example.Owner"
"#;
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(temp_dir.path(), manifest, &["synth", "--type", "Owner"]);
    assert!(output.status.success(), "weavec failed: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Owner_Weave_Json"), "{}", out);
    assert!(!out.contains("Pet_Weave_Json"), "{}", out);

    let output = weavec(temp_dir.path(), manifest, &["synth", "--type", "Vet"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no type named `Vet`"), "{}", stderr(&output));
}

// ── failures ───────────────────────────────────────────────────────────

#[test]
fn invalid_name_reports_diagnostic_and_fails() {
    let manifest = r#"
[[type]]
name = "com.example.Pet"
[type.json]
from_json_method = "from <TypeName>"
"#;
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(temp_dir.path(), manifest, &["synth", "--no-color"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("J0001"), "{}", err);
    assert!(err.contains("from Pet"), "{}", err);
    // The other operations are still generated.
    assert!(stdout(&output).contains("Pet.toJson()"));
}

#[test]
fn json_mode_diagnostics_are_json() {
    let manifest = r#"
[[type]]
name = "com.example.Pet"
[type.json]
to_json_method = "class"
"#;
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(temp_dir.path(), manifest, &["synth", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    let line = err
        .lines()
        .find(|l| l.starts_with('{'))
        .unwrap_or_else(|| panic!("no JSON diagnostic in: {}", err));
    let diag: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(diag["code"], "J0001");
    assert_eq!(diag["operation"], "toJson");
}

#[test]
fn malformed_manifest_fails() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(
        temp_dir.path(),
        "[[type]]\nname = \"com..Pet\"\n",
        &["synth"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid manifest"), "{}", stderr(&output));
}

#[test]
fn missing_manifest_fails() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = Command::new(find_weavec())
        .args(["synth"])
        .arg(temp_dir.path().join("absent.toml"))
        .output()
        .expect("failed to invoke weavec");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read"), "{}", stderr(&output));
}

// ── names ──────────────────────────────────────────────────────────────

#[test]
fn names_lists_every_operation() {
    let manifest = r#"
[[type]]
name = "zoo.Mouse"
plural = "Mice"

[type.json]
to_json_array_method = ""

[[type.method]]
name = "toJson"
returns = "java.lang.String"
"#;
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = weavec(temp_dir.path(), manifest, &["names"]);
    assert!(output.status.success(), "weavec failed: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "zoo.Mouse\n\
         \x20 toJson         toJson (declared)\n\
         \x20 fromJson       fromJsonToMouse\n\
         \x20 toJsonArray    (disabled)\n\
         \x20 fromJsonArray  fromJsonArrayToMice\n"
    );
}
