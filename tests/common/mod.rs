use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use termchat::config::ProviderConfig;
use termchat::storage::TranscriptStore;

#[allow(dead_code)]
pub fn create_temp_store() -> (TranscriptStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = TranscriptStore::new(tmp.path().join("conversation_history.txt"));
    (store, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn provider_config(endpoint: impl Into<String>) -> ProviderConfig {
    ProviderConfig {
        endpoint: endpoint.into(),
        api_key: "test-key".to_string(),
    }
}
