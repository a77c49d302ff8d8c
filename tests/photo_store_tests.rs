use bytes::Bytes;
use employee_directory::photos::{PhotoStore, PhotoStoreError};

fn filename_of(reference: &str) -> &str {
    reference
        .strip_prefix("/uploads/")
        .expect("reference should start with /uploads/")
}

#[tokio::test]
async fn test_store_returns_uploads_reference() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    let reference = store
        .store(Bytes::from("image bytes"), "avatar.png")
        .await
        .unwrap();

    assert!(reference.starts_with("/uploads/"));
    assert!(reference.ends_with("-avatar.png"));
}

#[tokio::test]
async fn test_store_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    let data = Bytes::from("hello photo");
    let reference = store.store(data.clone(), "photo.jpg").await.unwrap();

    let retrieved = store.read(filename_of(&reference)).await.unwrap();
    assert_eq!(retrieved, data);
}

#[tokio::test]
async fn test_store_generates_unique_filenames() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    let first = store.store(Bytes::from("one"), "same.png").await.unwrap();
    let second = store.store(Bytes::from("two"), "same.png").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(
        store.read(filename_of(&first)).await.unwrap(),
        Bytes::from("one")
    );
    assert_eq!(
        store.read(filename_of(&second)).await.unwrap(),
        Bytes::from("two")
    );
}

#[tokio::test]
async fn test_store_strips_path_components_from_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    let reference = store
        .store(Bytes::from("data"), "../../etc/passwd")
        .await
        .unwrap();

    let filename = filename_of(&reference);
    assert!(!filename.contains('/'));
    assert!(filename.ends_with("-passwd"));
    assert!(dir.path().join(filename).exists());
}

#[tokio::test]
async fn test_remove_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    let reference = store.store(Bytes::from("data"), "gone.png").await.unwrap();
    let filename = filename_of(&reference).to_string();
    assert!(dir.path().join(&filename).exists());

    store.remove(&reference).await;
    assert!(!dir.path().join(&filename).exists());
}

#[tokio::test]
async fn test_remove_empty_reference_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    // Must not panic or error
    store.remove("").await;
}

#[tokio::test]
async fn test_remove_missing_file_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    store.remove("/uploads/123-already-gone.png").await;
}

#[tokio::test]
async fn test_remove_ignores_references_outside_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    std::fs::write(dir.path().join("keep.png"), b"data").unwrap();
    store.remove("keep.png").await;

    assert!(dir.path().join("keep.png").exists());
}

#[tokio::test]
async fn test_read_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path()).unwrap();

    let result = store.read("missing.png").await;
    assert!(matches!(result, Err(PhotoStoreError::NotFound(_))));
}

#[tokio::test]
async fn test_read_rejects_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let store = PhotoStore::new(dir.path().join("uploads")).unwrap();

    std::fs::write(dir.path().join("secret.txt"), b"secret").unwrap();

    let result = store.read("../secret.txt").await;
    assert!(matches!(result, Err(PhotoStoreError::NotFound(_))));

    let result = store.read("..").await;
    assert!(matches!(result, Err(PhotoStoreError::NotFound(_))));
}
