use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use epconf_core::{ExtensionCatalog, IniDocument, ResourceLimits};
use tracing::{debug, info};

use crate::discovery::DiscoveredIni;
use crate::InstallLayout;

pub const MARKER_SECTION: &str = "EPConf";
pub const MARKER_KEY: &str = "rewritten";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub path: PathBuf,
    pub backup_created: bool,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PatchEngine {
    layout: InstallLayout,
    catalog: ExtensionCatalog,
    limits: ResourceLimits,
}

impl PatchEngine {
    pub fn new(layout: InstallLayout, catalog: ExtensionCatalog, limits: ResourceLimits) -> Self {
        Self {
            layout,
            catalog,
            limits,
        }
    }

    pub fn patch(&self, ini: &DiscoveredIni) -> Result<PatchOutcome> {
        let mut doc = IniDocument::load(&ini.path)?;

        let backup_created = !doc.section_exists(MARKER_SECTION);
        if backup_created {
            let backup = self.layout.backup_path(&ini.path);
            fs::copy(&ini.path, &backup).with_context(|| {
                format!(
                    "failed to back up {} to {}",
                    ini.path.display(),
                    backup.display()
                )
            })?;
            debug!("saved pristine copy to {}", backup.display());
        }

        let extensions = self.catalog.extension_names(&ini.version);
        let cacert = self.layout.cacert_path().display().to_string();

        doc.set(MARKER_SECTION, MARKER_KEY, 1_u32);
        doc.set(
            "PHP",
            "max_execution_time",
            self.limits.max_execution_time,
        );
        doc.set("PHP", "memory_limit", self.limits.memory_limit.as_str());
        doc.set(
            "PHP",
            "upload_max_filesize",
            self.limits.upload_max_filesize.as_str(),
        );
        doc.set("PHP", "post_max_size", self.limits.post_max_size.as_str());
        doc.set("PHP", "extension", extensions.clone());
        doc.set("curl", "curl.cainfo", cacert.as_str());
        doc.set("openssl", "openssl.cafile", cacert);

        doc.save(&ini.path)?;
        info!("php.ini updated in {}", ini.directory_name());

        Ok(PatchOutcome {
            path: ini.path.clone(),
            backup_created,
            extensions,
        })
    }
}
