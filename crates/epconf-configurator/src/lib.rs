mod certificate;
mod discovery;
mod error;
mod layout;
mod patch;

use std::path::PathBuf;

use epconf_core::{ExtensionCatalog, ResourceLimits};
use tracing::{info, warn};

pub use certificate::{
    install_certificate_bundle, CertificateSource, HttpCertificateSource, DEFAULT_CERTIFICATE_URL,
};
pub use discovery::{
    detect_php_version, discover_php_inis, find_php_ini_candidates, DiscoveredIni, DiscoveryReport,
    UnversionedIni, PHP_INI_FILE_NAME, VERSION_LABEL, VERSION_SIDECAR_FILE_NAME,
};
pub use error::{
    ConfiguratorError, ERROR_CERTIFICATE_DOWNLOAD_FAILED, ERROR_EASYPHP_FOLDER_NOT_FOUND,
    ERROR_INI_DISCOVERY_FAILED, ERROR_INI_PATCH_FAILED, ERROR_PHP_VERSION_NOT_DETECTED,
};
pub use layout::{InstallLayout, BACKUP_SUFFIX};
pub use patch::{PatchEngine, PatchOutcome, MARKER_KEY, MARKER_SECTION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguratorOptions {
    pub certificate_url: String,
    pub limits: ResourceLimits,
    pub catalog: ExtensionCatalog,
}

impl Default for ConfiguratorOptions {
    fn default() -> Self {
        Self {
            certificate_url: DEFAULT_CERTIFICATE_URL.to_string(),
            limits: ResourceLimits::default(),
            catalog: ExtensionCatalog::default(),
        }
    }
}

#[derive(Debug)]
pub struct Configurator {
    layout: InstallLayout,
    options: ConfiguratorOptions,
    errors: Vec<ConfiguratorError>,
    patched: Vec<PatchOutcome>,
}

impl Configurator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, ConfiguratorOptions::default())
    }

    pub fn with_options(root: impl Into<PathBuf>, options: ConfiguratorOptions) -> Self {
        Self {
            layout: InstallLayout::new(root),
            options,
            errors: Vec::new(),
            patched: Vec::new(),
        }
    }

    pub fn process(&mut self, certificates: &dyn CertificateSource) -> bool {
        self.errors.clear();
        self.patched.clear();

        if !self.layout.root().is_dir() {
            let message = format!(
                "The target folder does not exist at [{}].",
                self.layout.root().display()
            );
            return self.add_error(message, ERROR_EASYPHP_FOLDER_NOT_FOUND);
        }

        let cacert = self.layout.cacert_path();
        match install_certificate_bundle(certificates, &self.options.certificate_url, &cacert) {
            Ok(bytes) => info!("cacert.pem downloaded and saved ({bytes} bytes)."),
            Err(err) => {
                return self.add_error(
                    format!("Could not install the certificate bundle: {err:#}"),
                    ERROR_CERTIFICATE_DOWNLOAD_FAILED,
                );
            }
        }

        let report = match discover_php_inis(&self.layout) {
            Ok(report) => report,
            Err(err) => {
                return self.add_error(
                    format!("Could not scan for php.ini files: {err:#}"),
                    ERROR_INI_DISCOVERY_FAILED,
                );
            }
        };

        for unversioned in report.unversioned {
            warn!(
                "skipping {}: unknown PHP version",
                unversioned.path.display()
            );
            self.add_error(
                format!(
                    "Could not detect the PHP version for [{}]: {}",
                    unversioned.path.display(),
                    unversioned.reason
                ),
                ERROR_PHP_VERSION_NOT_DETECTED,
            );
        }

        let engine = PatchEngine::new(
            self.layout.clone(),
            self.options.catalog.clone(),
            self.options.limits.clone(),
        );
        for ini in &report.inis {
            match engine.patch(ini) {
                Ok(outcome) => self.patched.push(outcome),
                Err(err) => {
                    self.add_error(
                        format!("Could not update [{}]: {err:#}", ini.path.display()),
                        ERROR_INI_PATCH_FAILED,
                    );
                }
            }
        }

        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfiguratorError] {
        &self.errors
    }

    pub fn patched(&self) -> &[PatchOutcome] {
        &self.patched
    }

    fn add_error(&mut self, message: String, code: u32) -> bool {
        self.errors.push(ConfiguratorError::new(message, code));
        false
    }
}
