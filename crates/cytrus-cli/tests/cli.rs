//! Binary-level tests that need no network.

use std::path::PathBuf;
use std::process::Command;

use cytrus_schema::manifest;
use cytrus_schema::{BundleChunk, BundleEntry, ChunkRef, ContentHash, FileEntry, Fragment};
use tempfile::TempDir;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self { temp_dir }
    }

    fn cytrus_cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cytrus"));
        cmd.current_dir(self.temp_dir.path());
        // Point at an address nothing listens on so a stray request fails fast.
        cmd.env("CYTRUS_CDN", "http://127.0.0.1:9");
        cmd
    }

    fn write_manifest(&self) -> PathBuf {
        let fragment = Fragment {
            name: "main".to_string(),
            files: vec![FileEntry {
                name: "bin/game".to_string(),
                size: 4,
                hash: ContentHash::new("a9993e364706816aba3e25717850c26c9cd0d89d"),
                executable: true,
                chunks: vec![ChunkRef {
                    hash: ContentHash::new("c0"),
                    size: 4,
                    offset: 0,
                }],
            }],
            bundles: vec![BundleEntry {
                hash: ContentHash::new("ab01"),
                chunks: [(ContentHash::new("c0"), BundleChunk { size: 4, offset: 0 })]
                    .into_iter()
                    .collect(),
            }],
        };
        let path = self.temp_dir.path().join("release.manifest");
        std::fs::write(&path, manifest::encode(&[fragment]).unwrap()).unwrap();
        path
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.cytrus_cmd().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sync"));
    assert!(stdout.contains("probe"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_inspect_local_manifest_as_json() {
    let ctx = TestContext::new();
    let path = ctx.write_manifest();

    let output = ctx
        .cytrus_cmd()
        .args(["inspect", "--json", "--file"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let files: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(files[0]["name"], "bin/game");
    assert_eq!(files[0]["size"], 4);
    assert_eq!(files[0]["executable"], true);
}

#[test]
fn test_inspect_rejects_garbage() {
    let ctx = TestContext::new();
    let path = ctx.temp_dir.path().join("junk");
    std::fs::write(&path, b"not a manifest").unwrap();

    let output = ctx
        .cytrus_cmd()
        .args(["inspect", "--file"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_sync_without_cdn_fails() {
    let ctx = TestContext::new();
    let output = ctx
        .cytrus_cmd()
        .args(["--quiet", "--timeout-secs", "2", "sync", "--pin", "6.0_2.70.12.31"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!ctx.temp_dir.path().join("output").join("6.0_2.70.12.31").exists());
}
