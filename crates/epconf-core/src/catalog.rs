use crate::version::PhpVersion;

pub const LEGACY_EXTENSION_PREFIX: &str = "php_";

// Emission order is load order: exif must come after mbstring.
const DEFAULT_EXTENSIONS: &[(&str, bool)] = &[
    ("bz2", true),
    ("curl", true),
    ("fileinfo", false),
    ("gd2", true),
    ("gettext", true),
    ("gmp", false),
    ("intl", false),
    ("imap", false),
    ("interbase", false),
    ("ldap", false),
    ("mbstring", true),
    ("exif", true),
    ("mysqli", true),
    ("oci8_12c", false),
    ("odbc", false),
    ("openssl", true),
    ("pdo_firebird", false),
    ("pdo_mysql", true),
    ("pdo_oci", false),
    ("pdo_odbc", false),
    ("pdo_pgsql", false),
    ("pdo_sqlite", true),
    ("pgsql", false),
    ("shmop", false),
    ("snmp", false),
    ("soap", false),
    ("sockets", true),
    ("sqlite3", true),
    ("tidy", false),
    ("xmlrpc", false),
    ("xsl", true),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionEntry {
    pub name: String,
    pub enabled: bool,
}

impl ExtensionEntry {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionCatalog {
    entries: Vec<ExtensionEntry>,
}

impl ExtensionCatalog {
    pub fn from_entries(entries: impl IntoIterator<Item = ExtensionEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    pub fn extension_names(&self, version: &PhpVersion) -> Vec<String> {
        let prefix = if version.uses_legacy_extension_names() {
            LEGACY_EXTENSION_PREFIX
        } else {
            ""
        };

        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| format!("{prefix}{}", entry.name))
            .collect()
    }
}

impl Default for ExtensionCatalog {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_EXTENSIONS
                .iter()
                .map(|(name, enabled)| ExtensionEntry::new(*name, *enabled)),
        )
    }
}
