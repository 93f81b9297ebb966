use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};

pub const GLOBAL_SECTION: &str = "";

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for IniValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for IniValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<u32> for IniValue {
    fn from(value: u32) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for IniValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Section { name: String, raw: String },
    Entry {
        key: String,
        prefix: String,
        value: String,
    },
    Verbatim(String),
}

impl Line {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            return Self::Verbatim(raw.to_string());
        }

        if let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return Self::Section {
                name: inner.trim().to_string(),
                raw: raw.to_string(),
            };
        }

        let Some(eq) = raw.find('=') else {
            return Self::Verbatim(raw.to_string());
        };
        let key = raw[..eq].trim();
        if key.is_empty() {
            return Self::Verbatim(raw.to_string());
        }

        let after_eq = &raw[eq + 1..];
        let padding = after_eq.len() - after_eq.trim_start_matches([' ', '\t']).len();
        let value_start = eq + 1 + padding;
        Self::Entry {
            key: key.to_string(),
            prefix: raw[..value_start].to_string(),
            value: raw[value_start..].to_string(),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Section { raw, .. } | Self::Verbatim(raw) => raw.clone(),
            Self::Entry { prefix, value, .. } => format!("{prefix}{value}"),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Verbatim(raw) if raw.trim().is_empty())
    }

    fn is_section(&self, section: &str) -> bool {
        matches!(self, Self::Section { name, .. } if name == section)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TerminatedLine {
    line: Line,
    ending: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniDocument {
    bom: bool,
    lines: Vec<TerminatedLine>,
    line_ending: &'static str,
    final_newline: bool,
}

impl IniDocument {
    pub fn parse(content: &str) -> Self {
        let (bom, content) = match content.strip_prefix(BOM) {
            Some(rest) => (true, rest),
            None => (false, content),
        };
        let crlf = content.matches("\r\n").count();
        let lf = content.matches('\n').count() - crlf;
        let line_ending = if crlf > lf { "\r\n" } else { "\n" };

        let mut lines = Vec::new();
        let mut rest = content;
        while !rest.is_empty() {
            let (raw, ending, next) = match rest.find('\n') {
                Some(at) => match rest[..at].strip_suffix('\r') {
                    Some(raw) => (raw, "\r\n", &rest[at + 1..]),
                    None => (&rest[..at], "\n", &rest[at + 1..]),
                },
                None => (rest, "", ""),
            };
            lines.push(TerminatedLine {
                line: Line::parse(raw),
                ending,
            });
            rest = next;
        }

        Self {
            bom,
            lines,
            line_ending,
            final_newline: content.is_empty() || content.ends_with('\n'),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read ini file: {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .with_context(|| format!("failed to write ini file: {}", path.display()))
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        if self.bom {
            output.push(BOM);
        }
        for entry in &self.lines {
            output.push_str(&entry.line.render());
            output.push_str(entry.ending);
        }
        output
    }

    pub fn section_exists(&self, section: &str) -> bool {
        section == GLOBAL_SECTION || self.section_header(section).is_some()
    }

    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.values(section, key).into_iter().next()
    }

    pub fn values(&self, section: &str, key: &str) -> Vec<&str> {
        self.entry_indices(section, key)
            .into_iter()
            .filter_map(|index| match &self.lines[index].line {
                Line::Entry { value, .. } => Some(value.trim_end()),
                _ => None,
            })
            .collect()
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<IniValue>) {
        let values = match value.into() {
            IniValue::Scalar(value) => vec![value],
            IniValue::List(values) => values,
        };

        let existing = self.entry_indices(section, key);
        if let Some(&first) = existing.first() {
            let ending = self.lines[first].ending;
            let prefix = match &self.lines[first].line {
                Line::Entry { prefix, .. } => prefix.clone(),
                _ => format!("{key}="),
            };
            for index in existing.iter().rev() {
                self.lines.remove(*index);
            }
            self.insert_entries(first, key, &prefix, ending, values);
            self.normalize_endings();
            return;
        }

        let at = match self.section_body(section) {
            Some(body) => body
                .clone()
                .rev()
                .find(|index| matches!(self.lines[*index].line, Line::Entry { .. }))
                .map(|index| index + 1)
                .unwrap_or(body.start),
            None => {
                if matches!(self.lines.last(), Some(last) if !last.line.is_blank()) {
                    self.push_line(Line::Verbatim(String::new()));
                }
                self.push_line(Line::Section {
                    name: section.to_string(),
                    raw: format!("[{section}]"),
                });
                self.lines.len()
            }
        };
        let prefix = format!("{key}=");
        self.insert_entries(at, key, &prefix, self.line_ending, values);
        self.normalize_endings();
    }

    fn push_line(&mut self, line: Line) {
        self.lines.push(TerminatedLine {
            line,
            ending: self.line_ending,
        });
    }

    fn insert_entries(
        &mut self,
        at: usize,
        key: &str,
        prefix: &str,
        ending: &'static str,
        values: Vec<String>,
    ) {
        for (offset, value) in values.into_iter().enumerate() {
            let entry = TerminatedLine {
                line: Line::Entry {
                    key: key.to_string(),
                    prefix: prefix.to_string(),
                    value,
                },
                ending,
            };
            self.lines.insert(at + offset, entry);
        }
    }

    fn normalize_endings(&mut self) {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return;
        };
        for (index, entry) in self.lines.iter_mut().enumerate() {
            if index == last && !self.final_newline {
                entry.ending = "";
            } else if entry.ending.is_empty() {
                entry.ending = self.line_ending;
            }
        }
    }

    fn entry_indices(&self, section: &str, key: &str) -> Vec<usize> {
        let mut current = GLOBAL_SECTION;
        let mut indices = Vec::new();
        for (index, entry) in self.lines.iter().enumerate() {
            match &entry.line {
                Line::Section { name, .. } => current = name.as_str(),
                Line::Entry { key: entry_key, .. } if current == section && entry_key == key => {
                    indices.push(index);
                }
                _ => {}
            }
        }
        indices
    }

    fn section_header(&self, section: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|entry| entry.line.is_section(section))
    }

    fn section_body(&self, section: &str) -> Option<Range<usize>> {
        let start = if section == GLOBAL_SECTION {
            0
        } else {
            self.section_header(section)? + 1
        };
        let end = self.lines[start..]
            .iter()
            .position(|entry| matches!(entry.line, Line::Section { .. }))
            .map(|offset| start + offset)
            .unwrap_or(self.lines.len());
        Some(start..end)
    }
}
