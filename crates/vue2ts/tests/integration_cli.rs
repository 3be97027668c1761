//! Integration tests for the vue2ts binary.
//!
//! Each test writes components into a temporary directory, runs the binary
//! with `--output json` and checks both the report and the files on disk.

use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// TEST INFRASTRUCTURE
// ============================================================================

#[derive(Debug, Deserialize)]
struct Report {
    converted: usize,
    skipped: usize,
    failed: usize,
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    input: String,
    output: Option<String>,
    status: String,
    class_name: Option<String>,
    message: Option<String>,
}

const COUNTER: &str = r#"<template>
  <button @click="increment">{{ count }}</button>
</template>

<script>
import Icon from './Icon.vue';

export default {
  name: 'counter',
  components: { Icon },
  props: { step: { type: Number, default: 1 } },
  data() {
    return { count: 0 };
  },
  watch: {
    count: 'report',
  },
  methods: {
    increment() {
      this.count += this.step;
    },
    report(value) {
      console.log(value);
    },
  },
};
</script>

<style scoped>
button { color: red; }
</style>
"#;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vue2ts"))
        .args(args)
        .env_remove("VUE2TS_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run vue2ts")
}

fn run_json(input: &Path, extra: &[&str]) -> (Report, Output) {
    let input = input.to_str().unwrap();
    let mut args = vec!["-i", input, "--output", "json"];
    args.extend_from_slice(extra);
    let output = run(&args);
    let report = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "invalid JSON report ({e}):\n{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    });
    (report, output)
}

fn write(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Drops whitespace and unifies quotes so assertions do not depend on the
/// emitter's layout.
fn compact(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '"' { '\'' } else { c })
        .collect()
}

fn file_name(path: &str) -> &str {
    Path::new(path).file_name().unwrap().to_str().unwrap()
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_converts_single_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Counter.vue", COUNTER);

    let (report, output) = run_json(&dir.path().join("Counter.vue"), &[]);
    assert!(output.status.success());
    assert_eq!(report.converted, 1);
    assert_eq!(report.files[0].status, "converted");
    assert_eq!(report.files[0].class_name.as_deref(), Some("Counter"));
    assert_eq!(
        report.files[0].output.as_deref().map(file_name),
        Some("Counter2ts.vue")
    );

    let converted = fs::read_to_string(dir.path().join("Counter2ts.vue")).unwrap();
    assert!(converted.starts_with("<template>\n  <button @click=\"increment\">"));
    assert!(converted.contains("<script lang=\"ts\">\n"));
    let script = compact(&converted);
    assert!(script.contains("import{Component,Vue,Prop,Watch}from'vue-property-decorator';"));
    assert!(script.contains("@Component({components:{Icon}})classCounterextendsVue{"));
    assert!(script.contains("@Watch('count')onCountChange(newVal,oldVal){this.report(newVal,oldVal);}"));
    assert!(script.contains("publiccount:number=0;"));
    assert!(script.contains("}exportdefaultCounter;"));
    assert!(converted.ends_with("</script>\n\n<style scoped>\nbutton { color: red; }\n</style>\n"));

    // The input is left untouched.
    assert_eq!(fs::read_to_string(dir.path().join("Counter.vue")).unwrap(), COUNTER);
}

#[test]
fn test_directory_mode() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/A.vue", COUNTER);
    write(&dir, "src/nested/B.vue", COUNTER);
    write(&dir, "src/A2ts.vue", COUNTER);
    write(&dir, "src/Step2ts.vue", COUNTER);
    write(&dir, "src/legacy/C.vue", COUNTER);
    write(&dir, "node_modules/lib/D.vue", COUNTER);
    write(&dir, "dist/E.vue", COUNTER);
    write(&dir, "src/notes.txt", "not a component");

    let (report, output) = run_json(dir.path(), &["--ignore", "**/legacy/**"]);
    assert!(output.status.success());

    let inputs: Vec<&str> = report.files.iter().map(|f| file_name(&f.input)).collect();
    // `A2ts.vue` is the output of `A.vue`; `Step2ts.vue` has no source and
    // is a component of its own.
    assert_eq!(inputs, vec!["A.vue", "Step2ts.vue", "B.vue"]);
    assert!(dir.path().join("src/Step2ts2ts.vue").exists());
    assert!(dir.path().join("src/nested/B2ts.vue").exists());
    assert!(!dir.path().join("src/legacy/C2ts.vue").exists());
    assert!(!dir.path().join("node_modules/lib/D2ts.vue").exists());
}

#[test]
fn test_failures_do_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    write(&dir, "A.vue", "<template><div /></template>");
    write(&dir, "B.vue", COUNTER);
    write(&dir, "C.vue", "<script>export default { data() { console.log(1) } }</script>");
    write(&dir, "D.vue", "<script>\nexport default {\n  name: ,\n}\n</script>");
    write(&dir, "E.vue", "<script>\nexport const helper = 1;\n</script>");

    let (report, output) = run_json(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!((report.converted, report.skipped, report.failed), (1, 1, 3));

    let messages: Vec<(&str, &str)> = report
        .files
        .iter()
        .map(|f| (f.status.as_str(), f.message.as_deref().unwrap_or("")))
        .collect();
    assert_eq!(messages[0], ("failed", "no <script> block found in the component"));
    assert_eq!(messages[1], ("converted", ""));
    assert_eq!(messages[2], ("failed", "`data` does not return anything"));
    assert_eq!(messages[3].0, "failed");
    assert!(
        messages[3].1.starts_with("failed to parse script at 3:"),
        "{}",
        messages[3].1
    );
    assert_eq!(messages[4], ("skipped", "no default exported options object"));

    assert!(dir.path().join("B2ts.vue").exists());
    assert!(!dir.path().join("E2ts.vue").exists());
}

#[test]
fn test_stdout_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Counter.vue", COUNTER);

    let output = run(&["-i", dir.path().join("Counter.vue").to_str().unwrap(), "--stdout"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<script lang=\"ts\">"));
    assert!(stdout.contains("class Counter extends Vue"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("converted"));
    assert!(!dir.path().join("Counter2ts.vue").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["-i", dir.path().join("missing").to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("input path does not exist"));
}

#[test]
fn test_version_flag() {
    let output = run(&["-v"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("vue2ts {}", env!("CARGO_PKG_VERSION"))
    );
}
