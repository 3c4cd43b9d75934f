use authdeck::config::{ClientKind, Config};
use std::time::Duration;

fn http_config() -> Config {
    let mut config = Config::default();
    config.auth.organization_id = "org-1".to_string();
    config
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.auth.client, ClientKind::Http);
    assert_eq!(config.auth.base_url, "http://localhost:3000/api/auth");
    assert_eq!(config.auth.session_token_env, "AUTHDECK_SESSION_TOKEN");
    assert_eq!(config.auth.request_timeout(), Duration::from_secs(30));
    assert!(config.auth.localize_errors);
    assert_eq!(config.ui.start_view, "teams");
    assert_eq!(config.ui.toast_duration(), Duration::from_secs(4));
    assert_eq!(config.providers.social, vec!["github", "google"]);
    assert!(config.providers.other.is_empty());
    assert!(!config.logging.enabled);
    assert!(config.localization.is_empty());
}

#[test]
fn test_config_validation() {
    let mut config = http_config();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Unknown start view should fail
    config.ui.start_view = "sessions".to_string();
    assert!(config.validate().is_err());

    // Reset and test out of range toast duration
    config.ui.start_view = "providers".to_string();
    config.ui.toast_duration_secs = 0;
    assert!(config.validate().is_err());

    config.ui.toast_duration_secs = 4;
    config.auth.request_timeout_secs = 1000;
    assert!(config.validate().is_err());

    config.auth.request_timeout_secs = 10;
    config.providers.other = vec!["  ".to_string()];
    assert!(config.validate().is_err());
}

#[test]
fn test_http_client_requires_organization() {
    let config = Config::default();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("organization_id"));
}

#[test]
fn test_http_client_requires_valid_base_url() {
    let mut config = http_config();
    config.auth.base_url = "localhost without scheme".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_memory_client_uses_demo_organization() {
    let mut config = Config::default();
    config.auth.client = ClientKind::Memory;
    config.auth.base_url = String::new();

    assert!(config.validate().is_ok());
    assert_eq!(config.auth.effective_organization_id(), "org-demo");

    config.auth.organization_id = "org-7".to_string();
    assert_eq!(config.auth.effective_organization_id(), "org-7");
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("client = \"http\""));
    assert!(toml_str.contains("start_view = \"teams\""));
    assert!(toml_str.contains("toast_duration_secs = 4"));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[auth]
client = "memory"

[providers]
other = ["keycloak"]

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.auth.client, ClientKind::Memory);
    assert_eq!(config.providers.other, vec!["keycloak"]);
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.providers.social, vec!["github", "google"]);
    assert_eq!(config.auth.request_timeout_secs, 30);
    assert_eq!(config.ui.start_view, "teams");
}

#[test]
fn test_empty_config_deserialization() {
    // Test that empty TOML uses all defaults
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.auth.base_url, default_config.auth.base_url);
    assert_eq!(config.ui.toast_duration_secs, default_config.ui.toast_duration_secs);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_localization_overrides() {
    let config: Config = toml::from_str(
        r#"
[localization]
CREATE_TEAM_SUCCESS = "Team is ready"
"#,
    )
    .unwrap();

    let localization = config.localization();
    assert_eq!(localization.text("CREATE_TEAM_SUCCESS"), "Team is ready");
    assert_eq!(localization.text("DELETE_TEAM_SUCCESS"), "Team deleted successfully");
}

#[test]
fn test_load_from_file_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("authdeck.toml");

    std::fs::write(&path, "[auth]\norganization_id = \"org-1\"\n").unwrap();
    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.auth.organization_id, "org-1");

    std::fs::write(&path, "[ui]\nstart_view = \"nowhere\"\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());

    std::fs::write(&path, "[auth\n").unwrap();
    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_generate_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");

    // Generate config should create the directory structure
    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());
    assert!(config_path.exists());

    // Verify the file contains expected content
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# authdeck Configuration File"));
    assert!(content.contains("[auth]"));
    assert!(content.contains("session_token_env = \"AUTHDECK_SESSION_TOKEN\""));

    // The generated file parses back into the defaults
    let parsed: Config = toml::from_str(&content).unwrap();
    assert_eq!(parsed.ui.start_view, "teams");
}
