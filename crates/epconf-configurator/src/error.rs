use std::fmt;

use serde::Serialize;

pub const ERROR_EASYPHP_FOLDER_NOT_FOUND: u32 = 41701;
pub const ERROR_CERTIFICATE_DOWNLOAD_FAILED: u32 = 41702;
pub const ERROR_PHP_VERSION_NOT_DETECTED: u32 = 41703;
pub const ERROR_INI_PATCH_FAILED: u32 = 41704;
pub const ERROR_INI_DISCOVERY_FAILED: u32 = 41705;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfiguratorError {
    message: String,
    code: u32,
}

impl ConfiguratorError {
    pub fn new(message: impl Into<String>, code: u32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self.code,
            ERROR_EASYPHP_FOLDER_NOT_FOUND
                | ERROR_CERTIFICATE_DOWNLOAD_FAILED
                | ERROR_INI_DISCOVERY_FAILED
        )
    }
}

impl fmt::Display for ConfiguratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
