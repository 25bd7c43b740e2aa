//! Tests for the filesystem object store.

use panelwright_error::PanelwrightErrorKind;
use panelwright_storage::{
    FileSystemObjectStore, MediaKind, ObjectStore, StorageErrorKind, UploadOptions,
};
use tempfile::TempDir;

fn store(temp_dir: &TempDir) -> FileSystemObjectStore {
    FileSystemObjectStore::new(temp_dir.path(), None).unwrap()
}

#[tokio::test]
async fn test_upload_and_download() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);

    let path = MediaKind::Image.object_path("user_1", "comic_1", 1);
    let object = store
        .upload("comic-images", &path, b"png bytes", &UploadOptions::upsert(MediaKind::Image))
        .await
        .unwrap();

    assert_eq!(object.bucket, "comic-images");
    assert_eq!(object.path, "user_1/comic_1/panel_1.png");
    assert_eq!(object.content_type, "image/png");
    assert_eq!(object.size_bytes, 9);
    assert_eq!(object.content_hash.len(), 64);
    assert!(object.public_url.starts_with("file://"));
    assert!(object.public_url.ends_with("comic-images/user_1/comic_1/panel_1.png"));

    let data = store.download("comic-images", &path).await.unwrap();
    assert_eq!(data, b"png bytes");
    assert!(temp_dir.path().join("comic-images/user_1/comic_1/panel_1.png").exists());
}

#[tokio::test]
async fn test_upsert_replaces_content() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);
    let options = UploadOptions::upsert(MediaKind::Audio);

    store
        .upload("comic-audio", "u/c/panel_1.wav", b"first", &options)
        .await
        .unwrap();
    store
        .upload("comic-audio", "u/c/panel_1.wav", b"second", &options)
        .await
        .unwrap();

    let data = store.download("comic-audio", "u/c/panel_1.wav").await.unwrap();
    assert_eq!(data, b"second");
}

#[tokio::test]
async fn test_upload_without_upsert_rejects_existing() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);
    let options = UploadOptions {
        content_type: "image/png".to_string(),
        upsert: false,
    };

    store
        .upload("comic-images", "u/c/panel_1.png", b"a", &options)
        .await
        .unwrap();
    let err = store
        .upload("comic-images", "u/c/panel_1.png", b"b", &options)
        .await
        .unwrap_err();

    match err.kind() {
        PanelwrightErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::AlreadyExists(_)));
        }
        other => panic!("Expected storage error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejects_escaping_paths() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);
    let options = UploadOptions::upsert(MediaKind::Image);

    assert!(
        store
            .upload("comic-images", "../outside.png", b"x", &options)
            .await
            .is_err()
    );
    assert!(store.upload("comic-images", "", b"x", &options).await.is_err());
    assert!(store.upload("../etc", "a.png", b"x", &options).await.is_err());
}

#[tokio::test]
async fn test_download_missing_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);

    let err = store
        .download("comic-images", "nobody/none/panel_1.png")
        .await
        .unwrap_err();
    match err.kind() {
        PanelwrightErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::NotFound(_)));
        }
        other => panic!("Expected storage error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_and_remove() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);
    let options = UploadOptions::upsert(MediaKind::Image);

    for panel_id in [2, 1, 3] {
        let path = MediaKind::Image.object_path("user_1", "comic_9", panel_id);
        store.upload("comic-images", &path, b"x", &options).await.unwrap();
    }

    let listed = store.list("comic-images", "user_1/comic_9").await.unwrap();
    assert_eq!(
        listed,
        vec![
            "user_1/comic_9/panel_1.png",
            "user_1/comic_9/panel_2.png",
            "user_1/comic_9/panel_3.png",
        ]
    );

    let removed = store
        .remove(
            "comic-images",
            &[
                "user_1/comic_9/panel_1.png".to_string(),
                "user_1/comic_9/panel_7.png".to_string(),
            ],
        )
        .await
        .unwrap();
    assert_eq!(removed, vec!["user_1/comic_9/panel_1.png"]);

    let listed = store.list("comic-images", "user_1/comic_9").await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_list_missing_folder_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);

    let listed = store.list("comic-audio", "user_x/comic_y").await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_public_base_url() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemObjectStore::new(
        temp_dir.path(),
        Some("https://media.example.com/storage/".to_string()),
    )
    .unwrap();

    let url = store.public_url("comic-audio", "u/c/panel_2.wav");
    assert_eq!(url, "https://media.example.com/storage/comic-audio/u/c/panel_2.wav");
    assert!(store.is_hosted(&url));
    assert!(!store.is_hosted("https://replicate.delivery/xyz/out.png"));
}
