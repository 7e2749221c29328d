use assert_cmd::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;

fn is_numbered_rs(entry: &fs::DirEntry) -> bool {
    let path = entry.path();
    path.is_file()
        && path.extension() == Some(OsStr::new("rs"))
        && path
            .file_name()
            .and_then(OsStr::to_str)
            .is_some_and(|n| n.starts_with(|c: char| c.is_ascii_digit()))
}

#[test]
fn run_all_demos_with_mock() {
    let entries = fs::read_dir(Path::new("examples")).expect("read examples dir");
    let mut found_any = false;
    for entry in entries.flatten().filter(is_numbered_rs) {
        let path = entry.path();
        let name = path
            .file_stem()
            .and_then(OsStr::to_str)
            .expect("example name")
            .to_string();
        found_any = true;
        Command::new("cargo")
            .arg("run")
            .arg("--example")
            .arg(&name)
            .env("NETLIQ_DEMOS_USE_MOCK", "1")
            .assert()
            .success();
    }
    assert!(found_any, "no demos found to run");
}
