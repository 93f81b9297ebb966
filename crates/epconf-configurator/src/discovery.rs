use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use epconf_core::PhpVersion;
use tracing::debug;

use crate::InstallLayout;

pub const PHP_INI_FILE_NAME: &str = "php.ini";
pub const VERSION_SIDECAR_FILE_NAME: &str = "snapshot.txt";
pub const VERSION_LABEL: &str = "Version:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredIni {
    pub path: PathBuf,
    pub version: PhpVersion,
}

impl DiscoveredIni {
    pub fn directory_name(&self) -> String {
        self.path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnversionedIni {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub inis: Vec<DiscoveredIni>,
    pub unversioned: Vec<UnversionedIni>,
}

pub fn discover_php_inis(layout: &InstallLayout) -> Result<DiscoveryReport> {
    let mut report = DiscoveryReport::default();
    for path in find_php_ini_candidates(&layout.php_binaries_dir())? {
        let dir = path.parent().unwrap_or(layout.root());
        match detect_php_version(dir) {
            Ok(version) => {
                debug!("found {} (PHP {version})", path.display());
                report.inis.push(DiscoveredIni { path, version });
            }
            Err(err) => report.unversioned.push(UnversionedIni {
                path,
                reason: format!("{err:#}"),
            }),
        }
    }
    Ok(report)
}

pub fn find_php_ini_candidates(scan_root: &Path) -> Result<Vec<PathBuf>> {
    if !scan_root.is_dir() {
        debug!("nothing to scan at {}", scan_root.display());
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    queue.push_back(scan_root.to_path_buf());

    while let Some(dir) = queue.pop_front() {
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("failed reading php directory {}", dir.display()))?
        {
            let entry =
                entry.with_context(|| format!("failed to iterate entry in {}", dir.display()))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .with_context(|| format!("failed to read file type: {}", path.display()))?;
            if file_type.is_dir() {
                queue.push_back(path);
            } else if file_type.is_file()
                && path.extension().and_then(|value| value.to_str()) == Some("ini")
                && path.file_name().and_then(|value| value.to_str()) == Some(PHP_INI_FILE_NAME)
            {
                candidates.push(path);
            }
        }
    }

    candidates.sort();
    Ok(candidates)
}

pub fn detect_php_version(dir: &Path) -> Result<PhpVersion> {
    let sidecar = dir.join(VERSION_SIDECAR_FILE_NAME);
    let file = File::open(&sidecar)
        .with_context(|| format!("failed to open version file: {}", sidecar.display()))?;

    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("failed to read version file: {}", sidecar.display()))?;
        if let Some(version) = PhpVersion::parse_labeled_line(&line, VERSION_LABEL) {
            return Ok(version);
        }
    }

    Err(anyhow!(
        "no '{VERSION_LABEL}' line found in {}",
        sidecar.display()
    ))
}
