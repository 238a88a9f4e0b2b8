//! User-data resolution for server requests.
//!
//! User data can be given inline or read from a local file. The payload is
//! passed through unchanged; encoding for the wire happens in
//! [`crate::server::serialize`].

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;

/// Errors raised while resolving user data.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum UserDataError {
    /// Raised when both inline and file sources are provided.
    #[error("user data cannot be provided both inline and via file")]
    BothProvided,
    /// Raised when a file path is empty or only whitespace.
    #[error("user data file path must not be empty")]
    FilePathEmpty,
    /// Raised when reading the file source fails.
    #[error("failed to read user data file `{path}`: {message}")]
    FileRead {
        /// Expanded path that failed to read.
        path: String,
        /// Underlying error message.
        message: String,
    },
}

/// Resolves user data from either an inline value or a file.
///
/// Inline and file sources are mutually exclusive. A leading `~/` in the file
/// path expands to the home directory.
///
/// # Errors
///
/// Returns [`UserDataError`] when both sources are given or the file cannot be
/// read.
pub fn resolve_user_data(
    inline: Option<&str>,
    file: Option<&str>,
) -> Result<Option<String>, UserDataError> {
    if inline.is_some() && file.is_some() {
        return Err(UserDataError::BothProvided);
    }

    if let Some(payload) = inline {
        return Ok(Some(payload.to_owned()));
    }

    let Some(path) = file else {
        return Ok(None);
    };

    if path.trim().is_empty() {
        return Err(UserDataError::FilePathEmpty);
    }

    let expanded = expand_tilde(path);
    read_to_string_ambient(&expanded)
        .map(Some)
        .map_err(|message| UserDataError::FileRead {
            path: expanded.clone(),
            message,
        })
}

fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return format!("{}/{rest}", home.to_string_lossy());
    }
    path.to_owned()
}

fn read_to_string_ambient(path: &str) -> Result<String, String> {
    let path_buf = Utf8Path::new(path);

    let (dir_path, file_path) = if path_buf.is_absolute() {
        let parent = path_buf
            .parent()
            .ok_or_else(|| format!("path has no parent directory: {path_buf}"))?;
        let file_name = path_buf
            .file_name()
            .ok_or_else(|| format!("path has no file name: {path_buf}"))?;
        (parent, Utf8Path::new(file_name))
    } else {
        (Utf8Path::new("."), path_buf)
    };

    let dir =
        Dir::open_ambient_dir(dir_path, ambient_authority()).map_err(|err| err.to_string())?;
    dir.read_to_string(file_path).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_both_sources() {
        assert_eq!(
            resolve_user_data(Some("inline"), Some("file.txt")),
            Err(UserDataError::BothProvided)
        );
    }

    #[test]
    fn returns_none_without_sources() {
        assert_eq!(resolve_user_data(None, None), Ok(None));
    }

    #[test]
    fn returns_inline_payload_verbatim() {
        assert_eq!(
            resolve_user_data(Some("#cloud-config\n"), None),
            Ok(Some(String::from("#cloud-config\n")))
        );
    }

    #[test]
    fn rejects_blank_path() {
        assert_eq!(
            resolve_user_data(None, Some("  ")),
            Err(UserDataError::FilePathEmpty)
        );
    }

    #[test]
    fn reads_absolute_file() {
        let tmp = tempfile::tempdir().unwrap_or_else(|err| panic!("temp dir: {err}"));
        let path = tmp.path().join("user-data.sh");
        std::fs::write(&path, "#!/bin/sh\n").unwrap_or_else(|err| panic!("write: {err}"));
        let path_str = path
            .to_str()
            .unwrap_or_else(|| panic!("temp path should be utf8: {}", path.display()));

        assert_eq!(
            resolve_user_data(None, Some(path_str)),
            Ok(Some(String::from("#!/bin/sh\n")))
        );
    }

    #[test]
    fn reports_missing_file_path() {
        let err = resolve_user_data(None, Some("/nonexistent-dir-for-tests/user-data"))
            .expect_err("missing file should fail");
        assert!(
            matches!(err, UserDataError::FileRead { ref path, .. } if path == "/nonexistent-dir-for-tests/user-data"),
            "unexpected error: {err}"
        );
    }
}
