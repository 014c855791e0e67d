//! End-to-end platform sync against a mock CDN.

use std::sync::Arc;
use std::time::Duration;

use cytrus_core::{
    CdnClient, CdnConfig, NullReporter, RetryPolicy, SyncConfig, SyncError, sync_platform,
};
use cytrus_schema::manifest;
use cytrus_schema::{BundleChunk, BundleEntry, ChunkRef, ContentHash, FileEntry, Fragment};
use mockito::Server;
use tempfile::TempDir;

const VERSION: &str = "6.0_2.70.12.31";
const MANIFEST_PATH: &str = "/dofus/releases/main/windows/6.0_2.70.12.31.manifest";

fn release() -> Vec<u8> {
    let bundle = BundleEntry {
        hash: ContentHash::new("ab01"),
        chunks: [
            (ContentHash::new("c0"), BundleChunk { size: 4, offset: 0 }),
            (ContentHash::new("c1"), BundleChunk { size: 2, offset: 4 }),
        ]
        .into_iter()
        .collect(),
    };
    let chunk = |hash: &str| ChunkRef {
        hash: ContentHash::new(hash),
        size: 0,
        offset: 0,
    };
    let fragment = Fragment {
        name: "main".to_string(),
        files: vec![
            FileEntry {
                name: "data/a.bin".to_string(),
                size: 4,
                hash: ContentHash::default(),
                executable: false,
                chunks: vec![chunk("c0")],
            },
            FileEntry {
                name: "b.bin".to_string(),
                size: 2,
                hash: ContentHash::default(),
                executable: false,
                chunks: vec![chunk("c1")],
            },
        ],
        bundles: vec![bundle],
    };
    manifest::encode(&[fragment]).unwrap()
}

fn client(server: &Server) -> CdnClient {
    let config = CdnConfig::new("dofus")
        .with_base_url(server.url())
        .with_request_timeout(Duration::from_secs(5));
    CdnClient::new(&config).unwrap()
}

#[tokio::test]
async fn syncs_platform_from_cdn() {
    let mut server = Server::new_async().await;
    let _manifest = server
        .mock("GET", MANIFEST_PATH)
        .with_status(200)
        .with_body(release())
        .create_async()
        .await;
    let first = server
        .mock("GET", "/dofus/bundles/ab/ab01")
        .match_header("range", "bytes=0-3")
        .with_status(206)
        .with_body("ABCD")
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/dofus/bundles/ab/ab01")
        .match_header("range", "bytes=4-5")
        .with_status(206)
        .with_body("EF")
        .expect(1)
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    let config = SyncConfig::new("main", VERSION, out.path())
        .with_retry(RetryPolicy::new(3, Duration::from_millis(1)));

    let result = sync_platform(&client(&server), &config, "windows", Arc::new(NullReporter))
        .await
        .unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(result.completed, 2);
    assert_eq!(result.bytes, 6);
    let dir = out.path().join(VERSION).join("windows");
    assert_eq!(std::fs::read(dir.join("data").join("a.bin")).unwrap(), b"ABCD");
    assert_eq!(std::fs::read(dir.join("b.bin")).unwrap(), b"EF");
    first.assert_async().await;
    second.assert_async().await;

    // Everything is on disk now: no bundle traffic the second time.
    let again = sync_platform(&client(&server), &config, "windows", Arc::new(NullReporter))
        .await
        .unwrap();
    assert_eq!(again.skipped, 2);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn missing_manifest_is_fatal() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", MANIFEST_PATH)
        .with_status(404)
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    let config = SyncConfig::new("main", VERSION, out.path());

    let err = sync_platform(&client(&server), &config, "windows", Arc::new(NullReporter))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Fetch(_)));
    assert!(!out.path().join(VERSION).exists());
}

#[tokio::test]
async fn corrupt_manifest_is_fatal() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", MANIFEST_PATH)
        .with_status(200)
        .with_body([0xffu8; 7])
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    let config = SyncConfig::new("main", VERSION, out.path());

    let err = sync_platform(&client(&server), &config, "windows", Arc::new(NullReporter))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Manifest(_)));
}
