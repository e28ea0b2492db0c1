use bookvault::config::Config;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.storage.database_path.is_none());
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Unknown log level should fail
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    // Level names are case-insensitive
    config.logging.level = "DEBUG".to_string();
    assert!(config.validate().is_ok());
    assert_eq!(config.logging.level_filter(), log::LevelFilter::Debug);

    // Empty database path should fail
    config.storage.database_path = Some(PathBuf::new());
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[storage]
database_path = "/var/lib/bookvault/library.db"
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(
        config.storage.database_path,
        Some(PathBuf::from("/var/lib/bookvault/library.db"))
    );

    // Check that unspecified values use defaults
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_config_deserialization() {
    // Test that empty TOML uses all defaults
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.storage.database_path, default_config.storage.database_path);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.logging.level, default_config.logging.level);
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let dir = std::env::temp_dir().join("bookvault_test_invalid_config");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"verbose\"\n").unwrap();

    assert!(Config::load_from_file(&path).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_generate_config_creates_directory() {
    use std::fs;

    // Create a temporary path that doesn't exist
    let temp_dir = std::env::temp_dir().join("bookvault_test_config");
    let config_path = temp_dir.join("nested").join("config.toml");

    // Ensure the directory doesn't exist initially
    if temp_dir.exists() {
        let _ = fs::remove_dir_all(&temp_dir);
    }
    assert!(!temp_dir.exists());

    // Generate config should create the directory structure
    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());
    assert!(config_path.exists());

    // Verify the file contains expected content and loads back
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# bookvault Configuration File"));
    assert!(content.contains("level = \"info\""));

    let loaded = Config::load_from_file(&config_path).unwrap();
    assert!(loaded.storage.database_path.is_none());

    // Clean up
    let _ = fs::remove_dir_all(&temp_dir);
}

#[test]
fn test_default_config_path_is_under_xdg_dir() {
    // Config directory may be unavailable in sandboxed runs
    let Ok(dir) = Config::get_xdg_config_dir() else {
        return;
    };
    let path = Config::get_default_config_path().unwrap();
    assert!(dir.ends_with("bookvault"));
    assert_eq!(path, dir.join("config.toml"));
}
