use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const BIN: &str = env!("CARGO_BIN_EXE_javadoc-index");
const ACCEPT: &str = "basic.NodeProcessor#accept(org.w3c.dom.Node)";

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "javadoc_index_it_{}_{}_{}",
        std::process::id(),
        nanos,
        name
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn testdata() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata/javadoc")
        .display()
        .to_string()
}

fn run(args: &[&str], envs: &[(&str, &str)], cwd: Option<&Path>) -> anyhow::Result<Output> {
    let mut cmd = Command::new(BIN);
    cmd.args(args)
        .env_remove("RUST_LOG")
        .env_remove("JAVADOC_INDEX_LOG")
        .env_remove("JAVADOC_INDEX_SOURCES");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    Ok(cmd.output()?)
}

fn run_ok(args: &[&str]) -> anyhow::Result<String> {
    let out = run(args, &[], None)?;
    if !out.status.success() {
        return Err(anyhow::anyhow!(
            "command failed: status={:?}, stderr={}",
            out.status.code(),
            String::from_utf8_lossy(&out.stderr)
        ));
    }
    Ok(String::from_utf8(out.stdout)?)
}

#[test]
fn paths_lists_every_entry() -> anyhow::Result<()> {
    let stdout = run_ok(&["paths", &testdata()])?;
    assert_eq!(
        stdout,
        format!(
            "basic\nbasic.NodeProcessor\n{ACCEPT}\nbasic.NodeProcessor#process(org.w3c.dom.Node)\n"
        )
    );
    Ok(())
}

#[test]
fn index_prints_json() -> anyhow::Result<()> {
    let stdout = run_ok(&["index", &testdata()])?;
    let json: Value = serde_json::from_str(&stdout)?;

    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["path"], "basic");
    assert_eq!(entries[0]["location"]["kind"], "package");
    assert_eq!(entries[0]["javadoc"]["comment"], "(no comment)");

    let accept = &entries[2];
    assert_eq!(accept["path"], ACCEPT);
    assert_eq!(accept["location"]["kind"], "method");
    assert_eq!(accept["location"]["method_name"], "accept");
    assert_eq!(accept["location"]["parameters"], "(org.w3c.dom.Node)");
    assert_eq!(
        accept["javadoc"]["tags"]["param"],
        "aNode The DOM node to process."
    );
    Ok(())
}

#[test]
fn index_writes_text_to_output_file() -> anyhow::Result<()> {
    let base = temp_dir("text_output");
    let target = base.join("out/index.txt");
    let target_arg = target.display().to_string();
    let stdout = run_ok(&["index", &testdata(), "-f", "text", "-o", &target_arg])?;
    assert!(stdout.is_empty());

    let text = std::fs::read_to_string(&target)?;
    assert!(text.starts_with("basic\n  (no comment)\nbasic.NodeProcessor\n"));
    assert!(text.contains(&format!(
        "{ACCEPT}\n  Defines if this visitor should process the provided node.\n  (param): aNode The DOM node to process.\n"
    )));

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn show_renders_one_entry() -> anyhow::Result<()> {
    let stdout = run_ok(&["show", "basic.NodeProcessor", &testdata()])?;
    assert_eq!(
        stdout,
        "basic.NodeProcessor\n  Processor/visitor pattern specification for DOM Nodes.\n  (author): <a href=\"mailto:lj@jguru.se\">Lennart J&ouml;relid</a>, Mr. Foo\n  (see): org.w3c.dom.Node\n"
    );

    let json: Value = serde_json::from_str(&run_ok(&["show", ACCEPT, &testdata(), "-f", "json"])?)?;
    assert_eq!(json["path"], ACCEPT);
    assert_eq!(json["location"]["class_name"], "NodeProcessor");
    Ok(())
}

#[test]
fn show_unknown_path_fails() -> anyhow::Result<()> {
    let out = run(&["show", "basic.Missing", &testdata()], &[], None)?;
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("basic.Missing"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn sources_fall_back_to_env_var() -> anyhow::Result<()> {
    let cwd = temp_dir("env_sources");
    let data = testdata();
    let out = run(&["paths"], &[("JAVADOC_INDEX_SOURCES", &data)], Some(&cwd))?;
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout)?.starts_with("basic\n"));

    let _ = std::fs::remove_dir_all(cwd);
    Ok(())
}

#[test]
fn no_sources_anywhere_fails() -> anyhow::Result<()> {
    let cwd = temp_dir("no_sources");
    let out = run(&["paths"], &[], Some(&cwd))?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("JAVADOC_INDEX_SOURCES"));

    let _ = std::fs::remove_dir_all(cwd);
    Ok(())
}

#[test]
fn debug_logging_goes_to_stderr() -> anyhow::Result<()> {
    let out = run(&["--log-level", "debug", "paths", &testdata()], &[], None)?;
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Processing [1] java sources."), "stderr: {stderr}");
    assert!(String::from_utf8(out.stdout)?.starts_with("basic\n"));
    Ok(())
}
