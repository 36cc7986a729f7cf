//! Persistence for configuration in `.git/gsync/`.

use super::SyncConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name for gsync files within the git dir and the user config dir.
const GSYNC_DIR: &str = "gsync";

/// Filename for configuration.
const CONFIG_FILE: &str = "config.toml";

/// Path of the per-repository config file.
pub fn repo_config_path(git_dir: &Path) -> PathBuf {
    git_dir.join(GSYNC_DIR).join(CONFIG_FILE)
}

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(GSYNC_DIR).join(CONFIG_FILE))
}

/// Load one config file.
///
/// Returns `None` if the file doesn't exist.
pub fn load_config_from(path: &Path) -> Result<Option<SyncConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: SyncConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    Ok(Some(config))
}

/// Load the effective config: repository file, else user file, else defaults.
pub fn load_config(git_dir: &Path) -> Result<SyncConfig> {
    if let Some(config) = load_config_from(&repo_config_path(git_dir))? {
        return Ok(config);
    }
    if let Some(path) = user_config_path()
        && let Some(config) = load_config_from(&path)?
    {
        return Ok(config);
    }
    Ok(SyncConfig::default())
}

/// Save config to the repository file.
///
/// Creates the `.git/gsync/` directory if it doesn't exist.
pub fn save_config(git_dir: &Path, config: &SyncConfig) -> Result<PathBuf> {
    let dir = git_dir.join(GSYNC_DIR);
    let path = dir.join(CONFIG_FILE);

    // Ensure directory exists
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .map_err(|e| Error::Config(format!("failed to create {}: {e}", dir.display())))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;

    let content_with_header = format!("# gsync configuration\n\n{content}");

    fs::write(&path, content_with_header)
        .map_err(|e| Error::Config(format!("failed to write {}: {e}", path.display())))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_fake_git_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        temp
    }

    #[test]
    fn test_repo_config_path() {
        let temp = setup_fake_git_dir();
        let path = repo_config_path(&temp.path().join(".git"));
        assert!(path.ends_with(".git/gsync/config.toml"));
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let temp = setup_fake_git_dir();
        let loaded = load_config_from(&repo_config_path(&temp.path().join(".git"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_creates_directory() {
        let temp = setup_fake_git_dir();
        let git_dir = temp.path().join(".git");
        assert!(!git_dir.join("gsync").exists());

        let path = save_config(&git_dir, &SyncConfig::default()).unwrap();

        assert!(git_dir.join("gsync").exists());
        assert_eq!(path, repo_config_path(&git_dir));
        assert!(path.exists());
    }

    #[test]
    fn test_repo_file_wins() {
        let temp = setup_fake_git_dir();
        let git_dir = temp.path().join(".git");

        let mut config = SyncConfig::default();
        config.reference_branch = "upstream/develop".to_string();
        config.sweep.include_remote_branches = true;
        config.sweep.exclude = vec!["wip".to_string()];
        save_config(&git_dir, &config).unwrap();

        let loaded = load_config(&git_dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = setup_fake_git_dir();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(git_dir.join("gsync")).unwrap();
        fs::write(repo_config_path(&git_dir), "fetch = false\n[sweep]\nexclude = [\"gh-pages\"]\n")
            .unwrap();

        let loaded = load_config_from(&repo_config_path(&git_dir)).unwrap().unwrap();
        assert!(!loaded.fetch);
        assert_eq!(loaded.reference_branch, "origin/main");
        assert_eq!(loaded.remote, "origin");
        assert_eq!(loaded.sweep.exclude, vec!["gh-pages"]);
        assert!(!loaded.sweep.include_remote_branches);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp = setup_fake_git_dir();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(git_dir.join("gsync")).unwrap();
        fs::write(repo_config_path(&git_dir), "fetch = \"sometimes\"\n").unwrap();

        match load_config_from(&repo_config_path(&git_dir)) {
            Err(Error::Config(msg)) => assert!(msg.contains("failed to parse")),
            other => panic!("Expected Config error, got: {other:?}"),
        }
    }

    #[test]
    fn test_file_contains_header_comment() {
        let temp = setup_fake_git_dir();
        let path = save_config(&temp.path().join(".git"), &SyncConfig::default()).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("# gsync configuration"));
    }
}
