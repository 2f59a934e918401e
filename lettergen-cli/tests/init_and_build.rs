use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn lettergen_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lettergen"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn init_project(home: &TempDir, root: &Path) {
    lettergen_cmd(home.path())
        .arg("init")
        .arg(root)
        .assert()
        .success();
}

#[test]
fn init_scaffolds_project() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("letters");

    lettergen_cmd(home.path())
        .arg("init")
        .arg(&root)
        .assert()
        .success()
        .stdout(contains("Project ready"));

    for rel in [
        "lettergen.yaml",
        "templates/letter.tex",
        "data/to.json",
        "data/from.json",
        "data/metadata.json",
    ] {
        assert!(root.join(rel).is_file(), "missing {rel}");
    }
    assert!(root.join("assets").is_dir());

    let yaml = fs::read_to_string(root.join("lettergen.yaml")).unwrap();
    assert!(yaml.contains("pdflatex"), "{yaml}");
}

#[test]
fn init_keeps_existing_files_unless_forced() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("letters");
    init_project(&home, &root);

    let to = root.join("data/to.json");
    fs::write(&to, r#"[{"name":"Mine"}]"#).unwrap();

    lettergen_cmd(home.path())
        .arg("init")
        .arg(&root)
        .assert()
        .success()
        .stdout(contains("kept"));
    assert_eq!(fs::read_to_string(&to).unwrap(), r#"[{"name":"Mine"}]"#);

    lettergen_cmd(home.path())
        .args(["init", "--force"])
        .arg(&root)
        .assert()
        .success();
    assert!(fs::read_to_string(&to).unwrap().contains("Alice Example"));
}

#[test]
fn build_without_config_points_at_init() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("empty");
    fs::create_dir_all(&root).unwrap();

    lettergen_cmd(home.path())
        .args(["build", "--project"])
        .arg(&root)
        .assert()
        .failure()
        .stderr(contains("lettergen init"));
}

#[test]
fn build_with_defaults_reports_missing_data() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("empty");
    fs::create_dir_all(&root).unwrap();

    lettergen_cmd(home.path())
        .args(["build", "--defaults", "--project"])
        .arg(&root)
        .assert()
        .failure()
        .stderr(contains("metadata.json"));
}

#[test]
fn dry_run_lists_letters_without_output() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("letters");
    init_project(&home, &root);

    lettergen_cmd(home.path())
        .args(["build", "--dry-run", "--project"])
        .arg(&root)
        .assert()
        .success()
        .stdout(
            contains("[dry-run]")
                .and(contains("alice-example.pdf"))
                .and(contains("Bob Example")),
        );
    assert!(!root.join("out").exists());
}

#[test]
fn dry_run_json_honours_output_override() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("letters");
    let elsewhere = home.path().join("pdfs");
    init_project(&home, &root);

    let output = lettergen_cmd(home.path())
        .args(["build", "--dry-run", "--json", "--project"])
        .arg(&root)
        .arg("--output")
        .arg(&elsewhere)
        .output()
        .expect("run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["dry_run"], true);
    let letters = json["letters"].as_array().expect("letters");
    assert_eq!(letters.len(), 2);
    assert_eq!(letters[1]["file_stem"], "bob-example");
    assert_eq!(
        letters[0]["output"],
        elsewhere.join("alice-example.pdf").display().to_string()
    );
}

#[test]
fn unknown_compiler_fails_and_leaves_no_output() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("letters");
    init_project(&home, &root);

    lettergen_cmd(home.path())
        .args(["build", "--compiler", "lettergen-no-such-engine", "--project"])
        .arg(&root)
        .assert()
        .failure()
        .stderr(contains("compile tex into pdf").and(contains("lettergen-no-such-engine")));
    let leftovers = fs::read_dir(root.join("out")).map(|d| d.count()).unwrap_or(0);
    assert_eq!(leftovers, 0);
}

#[test]
#[cfg(unix)]
fn end_to_end_build_with_fake_engine() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("letters");
    init_project(&home, &root);

    // Stand-in engine: copies the source to `<stem>.pdf` once the logo is staged.
    fs::write(root.join("assets/logo.txt"), "logo").unwrap();
    fs::write(
        root.join("lettergen.yaml"),
        r#"compiler:
  program: sh
  args: ["-c", 'test -f logo.txt && cp "$0" "${0%.tex}.pdf"']
"#,
    )
    .unwrap();

    lettergen_cmd(home.path())
        .args(["build", "--project"])
        .arg(&root)
        .assert()
        .success()
        .stdout(contains("Built 2 letters"))
        .stderr(contains("generated tex files"));

    let alice = fs::read_to_string(root.join("out/alice-example.pdf")).expect("alice pdf");
    assert!(alice.contains("Alice Example"), "{alice}");
    assert!(alice.contains("Dear Sir or Madam,"), "{alice}");
    let bob = fs::read_to_string(root.join("out/bob-example.pdf")).expect("bob pdf");
    assert!(bob.contains("Dear Bob,"), "{bob}");
    assert!(!root.join("out/logo.txt").exists(), "assets are not delivered");
}
