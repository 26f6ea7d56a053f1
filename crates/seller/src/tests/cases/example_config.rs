use {
    crate::infra::config,
    std::path::Path,
};

/// Test that the example configuration file is valid.
#[tokio::test]
async fn test() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("example.toml");

    let config = config::file::load(&path).await;

    assert!(!config.buyers.is_empty());
    assert!(config.signal_store.is_some());
    let sequential = config.sequential.unwrap();
    assert!(!sequential.sellers.is_empty());
}
