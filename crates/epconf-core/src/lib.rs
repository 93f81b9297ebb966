mod catalog;
mod ini;
mod settings;
mod version;

pub use catalog::{ExtensionCatalog, ExtensionEntry, LEGACY_EXTENSION_PREFIX};
pub use ini::{IniDocument, IniValue, GLOBAL_SECTION};
pub use settings::ResourceLimits;
pub use version::{PhpVersion, LEGACY_EXTENSION_NAMING_BELOW};

#[cfg(test)]
mod tests;
