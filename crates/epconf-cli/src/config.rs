use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use epconf_configurator::ConfiguratorOptions;
use epconf_core::ResourceLimits;
use serde::Deserialize;

pub(crate) const DEFAULT_CONFIG_FILE_NAME: &str = "epconf.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EpconfConfig {
    pub(crate) easyphp_path: Option<PathBuf>,
    pub(crate) certificate_url: Option<String>,
    pub(crate) limits: ResourceLimits,
}

impl EpconfConfig {
    pub(crate) fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("failed to parse epconf config")
    }

    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE_NAME);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to load config: {}", path.display()))
    }

    pub(crate) fn configurator_options(
        &self,
        certificate_url: Option<String>,
    ) -> ConfiguratorOptions {
        let defaults = ConfiguratorOptions::default();
        ConfiguratorOptions {
            certificate_url: certificate_url
                .or_else(|| self.certificate_url.clone())
                .unwrap_or(defaults.certificate_url),
            limits: self.limits.clone(),
            catalog: defaults.catalog,
        }
    }
}

pub(crate) fn resolve_root(cli_root: Option<PathBuf>, config: &EpconfConfig) -> Result<PathBuf> {
    let Some(root) = cli_root.or_else(|| config.easyphp_path.clone()) else {
        bail!(
            "no EasyPHP folder given: pass it as an argument, set EPCONF_EASYPHP_PATH \
             or easyphp_path in {DEFAULT_CONFIG_FILE_NAME}"
        );
    };
    if root.as_os_str().is_empty() {
        bail!("EasyPHP folder must not be empty");
    }

    std::path::absolute(&root)
        .with_context(|| format!("failed to resolve EasyPHP folder: {}", root.display()))
}
