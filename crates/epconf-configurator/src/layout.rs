use std::path::{Path, PathBuf};

pub const BACKUP_SUFFIX: &str = ".epconf.orig";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn binaries_dir(&self) -> PathBuf {
        self.root.join("eds-binaries")
    }

    pub fn php_binaries_dir(&self) -> PathBuf {
        self.binaries_dir().join("php")
    }

    pub fn cacert_path(&self) -> PathBuf {
        self.root.join("cacert.pem")
    }

    pub fn backup_path(&self, ini_path: &Path) -> PathBuf {
        let mut name = ini_path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(BACKUP_SUFFIX);
        ini_path.with_file_name(name)
    }
}
