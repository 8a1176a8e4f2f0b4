use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "reflex").map(|pd| pd.config_dir().join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("reflex");
            Some(state_dir.join("reflex.log"))
        } else {
            ProjectDirs::from("", "", "reflex")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("reflex.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_have_expected_file_names() {
        if let Some(p) = AppDirs::log_path() {
            assert_eq!(p.file_name().and_then(|s| s.to_str()), Some("reflex.log"));
        }
        if let Some(p) = AppDirs::config_path() {
            assert_eq!(p.file_name().and_then(|s| s.to_str()), Some("config.json"));
        }
    }
}
