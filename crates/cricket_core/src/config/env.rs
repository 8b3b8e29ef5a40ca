use super::ScoringConfig;
use std::path::Path;
use std::{env, fs};

pub const SCORING_CONFIG_PATH_ENV: &str = "CRICKET_SCORING_CONFIG_PATH";

/// Load the scoring config named by `CRICKET_SCORING_CONFIG_PATH`.
///
/// Unset or blank falls back to the defaults. `.yaml`/`.yml` files are
/// parsed as YAML, anything else as JSON.
pub fn config_from_env() -> Result<ScoringConfig, String> {
    let Ok(path) = env::var(SCORING_CONFIG_PATH_ENV) else {
        return Ok(ScoringConfig::standard());
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(ScoringConfig::standard());
    }

    load_config_file(Path::new(path))
        .map_err(|e| format!("{e} (from {SCORING_CONFIG_PATH_ENV}='{path}')"))
}

pub(crate) fn load_config_file(path: &Path) -> Result<ScoringConfig, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read scoring config {}: {e}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let config = if is_yaml {
        ScoringConfig::from_yaml(&content)
            .map_err(|e| format!("Failed to parse scoring config YAML {}: {e}", path.display()))?
    } else {
        ScoringConfig::from_json(&content)
            .map_err(|e| format!("Failed to parse scoring config JSON {}: {e}", path.display()))?
    };

    config
        .validate()
        .map_err(|e| format!("Invalid scoring config {}: {e}", path.display()))?;

    tracing::debug!(path = %path.display(), ?config, "loaded scoring config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml_and_json_files() {
        let dir = TempDir::new().unwrap();

        let yaml_path = dir.path().join("rules.yaml");
        fs::write(&yaml_path, "credit_run_out_to_bowler: false\n").unwrap();
        let config = load_config_file(&yaml_path).unwrap();
        assert!(!config.credit_run_out_to_bowler);

        let json_path = dir.path().join("rules.json");
        fs::write(&json_path, r#"{"snapshot_recent_events": 12}"#).unwrap();
        let config = load_config_file(&json_path).unwrap();
        assert_eq!(config.snapshot_recent_events, 12);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"all_out_wickets": 0}"#).unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(err.contains("bad.json"), "{err}");
        assert!(load_config_file(&dir.path().join("missing.json")).is_err());
    }
}
