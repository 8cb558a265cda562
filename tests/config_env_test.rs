//! Environment overrides for `ClientConfig`. Serialized because they
//! mutate process-wide env vars.

use bloghub::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_PAGE_SIZE, ENV_API_URL, ENV_HOME, ENV_IMAGE_ORIGIN};
use serial_test::serial;
use std::path::PathBuf;

fn clear_env() {
    std::env::remove_var(ENV_API_URL);
    std::env::remove_var(ENV_IMAGE_ORIGIN);
    std::env::remove_var(ENV_HOME);
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();
    let config = ClientConfig::from_env();
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert!(config.storage_path().ends_with(".bloghub/storage.json"));
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    std::env::set_var(ENV_API_URL, "http://localhost:1337/api/");
    std::env::set_var(ENV_IMAGE_ORIGIN, "http://localhost:1337");
    std::env::set_var(ENV_HOME, "/tmp/bloghub-test");

    let config = ClientConfig::from_env();
    clear_env();

    assert_eq!(config.api_url, "http://localhost:1337/api");
    assert_eq!(config.image_origin, "http://localhost:1337");
    assert_eq!(config.storage_path(), PathBuf::from("/tmp/bloghub-test/storage.json"));
    assert_eq!(config.log_path(), PathBuf::from("/tmp/bloghub-test/bloghub.log"));
    assert_eq!(
        config.image_url(Some("/uploads/cover.png")),
        "http://localhost:1337/uploads/cover.png"
    );
}

#[test]
#[serial]
fn test_empty_env_values_are_ignored() {
    clear_env();
    std::env::set_var(ENV_API_URL, "");
    let config = ClientConfig::from_env();
    clear_env();
    assert_eq!(config.api_url, DEFAULT_API_URL);
}

#[test]
#[serial]
fn test_flags_win_over_env() {
    clear_env();
    std::env::set_var(ENV_API_URL, "http://from-env/api");
    let config = ClientConfig::from_env()
        .with_api_url("http://from-flag/api")
        .with_log_file("/tmp/explicit.log");
    clear_env();
    assert_eq!(config.api_url, "http://from-flag/api");
    assert_eq!(config.log_path(), PathBuf::from("/tmp/explicit.log"));
}
