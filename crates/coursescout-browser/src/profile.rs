use crate::Result;
use std::path::{Path, PathBuf};

/// Chrome user-data directory for one session
///
/// Temporary profiles are removed when the value is dropped; persistent
/// profiles survive the run so cookies and consent banners stick.
pub struct ProfileDir {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileDir {
    pub fn temporary() -> Result<Self> {
        let path = tempfile::Builder::new()
            .prefix("coursescout-profile-")
            .tempdir()?
            .keep();

        Ok(Self {
            path,
            is_temporary: true,
        })
    }

    /// Use (and create if needed) a profile directory that outlives the run
    pub fn persistent(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileDir {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                tracing::warn!(
                    "Failed to remove temporary profile {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_profile_is_removed_on_drop() {
        let profile = ProfileDir::temporary().unwrap();
        let path = profile.path().to_path_buf();

        assert!(path.is_dir());
        assert!(profile.is_temporary());

        drop(profile);
        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_profile_is_created_and_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile_path = temp_dir.path().join("profiles").join("alura");

        let profile = ProfileDir::persistent(profile_path.clone()).unwrap();
        assert!(profile_path.is_dir());
        assert!(!profile.is_temporary());

        drop(profile);
        assert!(profile_path.exists());
    }
}
