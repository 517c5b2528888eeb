//! Unit tests for media ingestion and removal

use std::sync::Arc;

use crate::errors::DomainError;
use crate::services::media::{ImageFile, MediaService, MediaServiceConfig, MockMediaStore};

fn service(store: Arc<MockMediaStore>) -> MediaService<MockMediaStore> {
    MediaService::new(store, MediaServiceConfig::default())
}

fn image(name: &str, bytes: &[u8]) -> ImageFile {
    ImageFile {
        file_name: name.to_string(),
        bytes: bytes.to_vec(),
    }
}

#[tokio::test]
async fn test_ingest_empty_batch_uploads_nothing() {
    let store = Arc::new(MockMediaStore::new());
    let urls = service(store.clone()).ingest(&[]).await.unwrap();
    assert!(urls.is_empty());
    assert_eq!(store.upload_count(), 0);
}

#[tokio::test]
async fn test_ingest_preserves_input_order() {
    let store = Arc::new(MockMediaStore::new());
    let files = vec![image("a.png", b"aaa"), image("b.png", b"bbb"), image("c.png", b"ccc")];

    let urls = service(store.clone()).ingest(&files).await.unwrap();
    assert_eq!(urls.len(), 3);
    assert_eq!(urls[0], "https://media.test/listings/image-0.png");
    assert_eq!(urls[2], "https://media.test/listings/image-2.png");

    let uploads = store.uploads();
    assert!(uploads[0].0.starts_with("data:image/png;base64,"));
    assert_eq!(uploads[0].1, "listings");
}

#[tokio::test]
async fn test_ingest_aborts_on_first_failure() {
    let store = Arc::new(MockMediaStore::new());
    store.fail_uploads_from(1);
    let files = vec![image("a.png", b"aaa"), image("b.png", b"bbb"), image("c.png", b"ccc")];

    let result = service(store.clone()).ingest(&files).await;
    assert!(matches!(result, Err(DomainError::UploadFailed { .. })));
    // First upload went through, second failed, third was never attempted
    assert_eq!(store.upload_count(), 2);
}

#[tokio::test]
async fn test_oversized_image_fails_before_any_upload() {
    let store = Arc::new(MockMediaStore::new());
    let service = MediaService::new(
        store.clone(),
        MediaServiceConfig {
            max_image_bytes: 4,
            ..Default::default()
        },
    );
    let files = vec![image("ok.png", b"ab"), image("big.png", b"abcdef")];

    let result = service.ingest(&files).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert_eq!(store.upload_count(), 0);
}

#[tokio::test]
async fn test_remove_derives_public_ids() {
    let store = Arc::new(MockMediaStore::new());
    let urls = vec![
        "https://res.cloudinary.example/roost/image/upload/v17/listings/abc123.jpg".to_string(),
        "https://res.cloudinary.example/roost/image/upload/v17/listings/def456.png".to_string(),
    ];

    service(store.clone()).remove(&urls).await;
    assert_eq!(store.destroys(), vec!["listings/abc123", "listings/def456"]);
}

#[tokio::test]
async fn test_remove_swallows_destroy_failures() {
    let store = Arc::new(MockMediaStore::new());
    store.fail_destroys();
    let urls = vec![
        "https://media.test/listings/a.png".to_string(),
        "https://media.test/listings/b.png".to_string(),
    ];

    // Must not panic or propagate; both destroys are still attempted
    service(store.clone()).remove(&urls).await;
    assert_eq!(store.destroys().len(), 2);
}

#[tokio::test]
async fn test_public_id_edge_cases() {
    let service = service(Arc::new(MockMediaStore::new()));

    // Trailing slash leaves no final segment
    assert_eq!(service.public_id_for("https://media.test/listings/"), None);
    // Extensionless segment is used as-is
    assert_eq!(
        service.public_id_for("https://media.test/listings/raw"),
        Some("listings/raw".to_string())
    );
    // Everything after the first dot counts as extension
    assert_eq!(
        service.public_id_for("https://media.test/listings/photo.final.jpg"),
        Some("listings/photo".to_string())
    );
}
