//! File path helpers

use std::path::{Path, PathBuf};

/// Expand a path string to an absolute path.
///
/// - `~` and `~/rest` expand to the home directory
/// - relative paths (`data.json`, `./data`, `../data`) are joined to the
///   current directory, without canonicalizing
/// - absolute paths pass through unchanged
///
/// Surrounding whitespace is ignored; an empty string means the current
/// directory.
///
/// ```text
/// expand_path("~/.centreview/centreview.json") // -> /home/user/.centreview/centreview.json
/// expand_path("data/centre_users.json")        // -> /current/dir/data/centre_users.json
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

/// Shorten a path for display by replacing the home directory with `~`
pub fn display_path(path: &Path) -> String {
    match dirs::home_dir() {
        Some(home) if !home.as_os_str().is_empty() => match path.strip_prefix(&home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        },
        _ => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_expand_absolute_unchanged() {
        assert_eq!(
            expand_path("/srv/centre_users.json"),
            PathBuf::from("/srv/centre_users.json")
        );
    }

    #[test]
    fn test_expand_relative_dataset_path() {
        let result = expand_path("data/centre_users.json");
        let cwd = std::env::current_dir().unwrap();
        assert!(result.is_absolute());
        assert_eq!(result, cwd.join("data/centre_users.json"));
    }

    #[test]
    fn test_expand_dot_prefixed() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("./centreview.json"), cwd.join("./centreview.json"));
        assert_eq!(expand_path("../shared.json"), cwd.join("../shared.json"));
    }

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_path("~"), home);
        assert_eq!(
            expand_path("~/.centreview/centreview.json"),
            home.join(".centreview/centreview.json")
        );
    }

    #[test]
    fn test_tilde_user_form_is_relative() {
        // ~name is not expanded
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("~other/file"), cwd.join("~other/file"));
    }

    #[test]
    #[cfg(unix)]
    fn test_expand_trims_whitespace() {
        assert_eq!(expand_path("  /srv/data.json \n"), PathBuf::from("/srv/data.json"));
    }

    #[test]
    fn test_expand_empty_is_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path(""), cwd);
        assert_eq!(expand_path("   "), cwd);
    }

    #[test]
    fn test_display_path_collapses_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(display_path(&home), "~");
        assert_eq!(
            display_path(&home.join("data").join("users.json")),
            format!("~/{}", PathBuf::from("data").join("users.json").display())
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_display_path_outside_home() {
        let path = Path::new("/definitely/not/home/users.json");
        assert_eq!(display_path(path), "/definitely/not/home/users.json");
    }
}
