#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::game::MAX_CELL_WIDTH;
    use crate::config::loader::{ConfigError, load_config_from_path, save_config_to_path};
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::tempdir;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("config.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let (_temp_dir, config_path) = create_test_config_path();

        let config = load_config_from_path(&config_path).unwrap();

        assert_eq!(config, Config::default());
        assert!(config_path.exists());
        let written = fs::read_to_string(&config_path).unwrap();
        assert!(written.contains("gravity_period_ms = 500"));
    }

    #[test]
    fn test_save_then_load() {
        let (_temp_dir, config_path) = create_test_config_path();
        let config = Config {
            gravity_period_ms: 250,
            seed: Some(1234),
            ..Config::default()
        };

        save_config_to_path(&config, &config_path).unwrap();
        let loaded = load_config_from_path(&config_path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.gravity_period(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "soft_drop_period_ms = 80\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();

        assert_eq!(config.soft_drop_period(), Duration::from_millis(80));
        assert_eq!(config.gravity_period_ms, 500);
        assert_eq!(config.cell_width, 2);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "gravity_period_ms = \"fast\"\n").unwrap();

        let result = load_config_from_path(&config_path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("zero.toml");
        fs::write(&config_path, "gravity_period_ms = 0\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("gravity_period_ms"));
    }

    #[test]
    fn test_zero_cell_width_is_rejected() {
        let config = Config {
            cell_width: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_oversized_cell_width_is_rejected() {
        let config = Config {
            cell_width: 7000,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("cell_width"));

        let widest = Config {
            cell_width: MAX_CELL_WIDTH,
            ..Config::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_oversized_cell_width_in_file_is_rejected() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "cell_width = 7000\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
