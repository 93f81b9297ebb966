use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use semver::Version;

pub const LEGACY_EXTENSION_NAMING_BELOW: Version = Version::new(7, 4, 0);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhpVersion(Version);

impl PhpVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let trimmed = input.trim_start();
        let token_len = trimmed
            .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
            .unwrap_or(trimmed.len());
        let token = trimmed[..token_len].trim_end_matches('.');
        if token.is_empty() || token.starts_with('.') {
            return Err(anyhow!("no numeric version found in '{}'", input.trim()));
        }

        let mut components = [0_u64; 3];
        for (index, part) in token.split('.').enumerate() {
            if index >= components.len() {
                break;
            }
            if part.is_empty() {
                return Err(anyhow!("malformed version token '{token}'"));
            }
            components[index] = part
                .parse()
                .with_context(|| format!("invalid version component '{part}' in '{token}'"))?;
        }

        Ok(Self::new(components[0], components[1], components[2]))
    }

    pub fn parse_labeled_line(line: &str, label: &str) -> Option<Self> {
        let rest = line.trim_start().strip_prefix(label)?;
        Self::parse(rest).ok()
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn uses_legacy_extension_names(&self) -> bool {
        self.0 < LEGACY_EXTENSION_NAMING_BELOW
    }
}

impl FromStr for PhpVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
