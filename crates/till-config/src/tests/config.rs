use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_no_config_file_when_load_then_defaults_apply() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.backoff_step_ms, 300);
    assert_eq!(config.timeouts.profile_ms, 12_000);
    assert_eq!(config.timeouts.company_ms, 4_500);
    assert_eq!(config.timeouts.watchdog_ms, 8_000);
    assert_eq!(config.storage.signed_url_ttl_secs, 86_400);
    assert_eq!(config.storage.signed_url_refresh_margin_secs, 60);
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_config_toml_when_load_then_values_are_read() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
[platform]
base_url = "https://proj.example.co"
anon_key = "public-anon-key"

[retry]
max_attempts = 5
"#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.platform.base_url, "https://proj.example.co");
    assert_eq!(config.platform.anon_key, "public-anon-key");
    assert_eq!(config.retry.max_attempts, 5);
    // Untouched sections keep defaults
    assert_eq!(config.timeouts.branches_ms, 4_500);
}

#[test]
#[serial]
fn given_env_override_when_load_then_env_wins_over_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[platform]\nbase_url = \"https://from-toml.example.co\"\n",
    )
    .unwrap();
    let _url = EnvGuard::set("TILL_PLATFORM_BASE_URL", "https://from-env.example.co");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.platform.base_url, "https://from-env.example.co");
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "not [valid toml").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_cache_dir_override_when_cache_dir_then_override_wins() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _dir = EnvGuard::set("TILL_CACHE_DIR", "/tmp/till-cache-test");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(
        config.cache_dir().unwrap(),
        std::path::PathBuf::from("/tmp/till-cache-test")
    );
}
