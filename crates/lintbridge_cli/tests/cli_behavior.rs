//! Integration tests for CLI behavior
//!
//! These tests run the binary against a small JSHint stand-in and check
//! its output and exit codes.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn lintbridge_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lintbridge"))
}

fn fake_jshint() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fake_jshint.js")
}

/// Command checking with the fake JSHint from an empty temp directory.
fn check_cmd(dir: &TempDir) -> Command {
    let mut cmd = lintbridge_cmd();
    cmd.current_dir(dir.path())
        .arg("check")
        .arg("--linter")
        .arg("jshint")
        .arg("--script")
        .arg(fake_jshint());
    cmd
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        lintbridge_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        lintbridge_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn rejects_unknown_linter() {
        lintbridge_cmd()
            .args(["check", "--linter", "eslint", "a.js"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown linter"));
    }

    #[test]
    fn rejects_zero_tab_width() {
        lintbridge_cmd()
            .args(["check", "--editor-tab-width", "0", "a.js"])
            .assert()
            .failure();
    }
}

mod check_command {
    use super::*;

    #[test]
    fn clean_file_exits_zero() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("clean.js");
        file.write_str("var a = 1;\na += 1;\n").unwrap();

        check_cmd(&dir)
            .arg(file.path())
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Checked 1 files (0 failed), found 0 issues"));
    }

    #[test]
    fn findings_exit_one() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.js");
        file.write_str("var unused_x = 1;\nundef_a();\n").unwrap();

        check_cmd(&dir)
            .arg(file.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("2:1 error: 'undef_a' is not defined."))
            .stdout(predicate::str::contains("1:1 unused: 'unused_x' in demo"))
            .stdout(predicate::str::contains("found 2 issues"));
    }

    #[test]
    fn lists_undefined_variables() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.js");
        file.write_str("undef_a(undef_b);\n").unwrap();

        check_cmd(&dir)
            .arg(file.path())
            .arg("--undefined-vars")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("undefined variables: undef_a, undef_b"));
    }

    #[test]
    fn json_output() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.js");
        file.write_str("x;\n\tundef_a;\nvar unused_y;\n").unwrap();

        let output = check_cmd(&dir)
            .arg(file.path())
            .args(["--format", "json", "--undefined-vars", "--editor-tab-width", "1"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let items = &json[0]["items"];

        assert_eq!(items[0]["kind"], "error");
        assert_eq!(items[0]["line"], 1);
        assert_eq!(items[0]["column"], 1);
        assert_eq!(items[0]["primary_text"], "'undef_a' is not defined.");
        assert_eq!(items[1]["kind"], "unused_variable");
        assert_eq!(items[1]["line"], 2);
        assert_eq!(items[1]["secondary_text"], "demo");
        assert_eq!(json[0]["undefined_variables"], serde_json::json!(["undef_a"]));
    }

    #[test]
    fn tab_width_changes_columns() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("tabs.js");
        file.write_str("\tundef_a;\n").unwrap();

        check_cmd(&dir)
            .arg(file.path())
            .assert()
            .stdout(predicate::str::contains("1:5 error"));

        check_cmd(&dir)
            .arg(file.path())
            .args(["--editor-tab-width", "1"])
            .assert()
            .stdout(predicate::str::contains("1:2 error"));
    }

    #[test]
    fn options_are_passed_to_linter() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.js");
        file.write_str("var a = 1;\n").unwrap();

        check_cmd(&dir).arg(file.path()).assert().code(0);

        check_cmd(&dir)
            .arg(file.path())
            .args(["--options", "{strict: true}"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Missing \"use strict\" statement."));
    }

    #[test]
    fn invalid_options_exit_two() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.js");
        file.write_str("var a = 1;\n").unwrap();

        check_cmd(&dir)
            .arg(file.path())
            .args(["--options", "{strict: }"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid linter options"));
    }

    #[test]
    fn missing_file_exits_two() {
        let dir = TempDir::new().unwrap();

        check_cmd(&dir)
            .arg(dir.path().join("nonexistent.js"))
            .assert()
            .code(2)
            .stdout(predicate::str::contains("(1 failed)"));
    }

    #[test]
    fn reports_lines_beyond_u32() {
        let dir = TempDir::new().unwrap();
        let script = dir.child("far.js");
        script
            .write_str(
                "var JSHINT = function () {};\n\
                 JSHINT.data = function () {\n\
                     return { errors: [{ line: 5000000000, character: 1, reason: 'far', evidence: '' }] };\n\
                 };\n",
            )
            .unwrap();
        let file = dir.child("app.js");
        file.write_str("x;\n").unwrap();

        lintbridge_cmd()
            .current_dir(dir.path())
            .arg("check")
            .arg(file.path())
            .args(["--linter", "jshint", "--script"])
            .arg(script.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("5000000000:1 error: far"));
    }

    #[test]
    fn checks_several_files() {
        let dir = TempDir::new().unwrap();
        let clean = dir.child("clean.js");
        clean.write_str("var a;\n").unwrap();
        let dirty = dir.child("dirty.js");
        dirty.write_str("undef_a;\n").unwrap();

        check_cmd(&dir)
            .arg(clean.path())
            .arg(dirty.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("dirty.js:"))
            .stdout(predicate::str::contains("clean.js:").not())
            .stdout(predicate::str::contains("Checked 2 files"));
    }

    #[test]
    fn fails_without_script() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.js");
        file.write_str("var a;\n").unwrap();

        lintbridge_cmd()
            .current_dir(dir.path())
            .arg("check")
            .arg(file.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("No jslint script configured"));
    }
}

mod configuration {
    use super::*;

    #[test]
    fn discovers_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::copy(fake_jshint(), dir.child("jshint.js").path()).unwrap();
        dir.child(".lintbridge.jsonc")
            .write_str(
                r#"{
                    // checked in next to the sources
                    "linter": "jshint",
                    "bundled_script": "jshint.js",
                    "options": { "strict": true },
                }"#,
            )
            .unwrap();
        let file = dir.child("src/app.js");
        file.write_str("var a = 1;\n").unwrap();

        lintbridge_cmd()
            .current_dir(dir.child("src").path())
            .arg("check")
            .arg(file.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Missing \"use strict\" statement."));
    }

    #[test]
    fn invalid_config_exits_two() {
        let dir = TempDir::new().unwrap();
        let config = dir.child("broken.json");
        config.write_str(r#"{ "editor_tab_width": 0 }"#).unwrap();

        lintbridge_cmd()
            .arg("--config")
            .arg(config.path())
            .args(["check", "a.js"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("editor_tab_width must be at least 1"));
    }

    #[test]
    fn runs_downloaded_version() {
        let dir = TempDir::new().unwrap();
        let scripts = dir.child("scripts");
        scripts.child("jshint").create_dir_all().unwrap();
        std::fs::copy(fake_jshint(), scripts.child("jshint/2.1.10.js").path()).unwrap();
        let file = dir.child("app.js");
        file.write_str("undef_a;\n").unwrap();

        lintbridge_cmd()
            .current_dir(dir.path())
            .arg("check")
            .arg(file.path())
            .args(["--linter", "jshint", "--script-version", "2.1.10"])
            .arg("--scripts-dir")
            .arg(scripts.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("'undef_a' is not defined."));
    }

    #[test]
    fn missing_downloaded_version_exits_two() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("app.js");
        file.write_str("undef_a;\n").unwrap();

        lintbridge_cmd()
            .current_dir(dir.path())
            .arg("check")
            .arg(file.path())
            .args(["--linter", "jshint", "--script-version", "9.9.9"])
            .arg("--scripts-dir")
            .arg(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("has not been downloaded"));
    }
}

mod versions_command {
    use super::*;

    #[test]
    fn lists_downloaded_versions() {
        let dir = TempDir::new().unwrap();
        dir.child("jslint/2013-01-01.js").write_str("var JSLINT;").unwrap();
        dir.child("jslint/2014-07-08.js").write_str("var JSLINT;").unwrap();

        lintbridge_cmd()
            .current_dir(dir.path())
            .arg("versions")
            .arg("--scripts-dir")
            .arg(dir.path())
            .assert()
            .success()
            .stdout("2013-01-01\n2014-07-08\n");
    }

    #[test]
    fn requires_scripts_dir() {
        let dir = TempDir::new().unwrap();

        lintbridge_cmd()
            .current_dir(dir.path())
            .arg("versions")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("No scripts directory"));
    }
}
