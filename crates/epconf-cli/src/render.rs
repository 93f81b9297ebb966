use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};
use anyhow::{Context, Result};
use epconf_configurator::{ConfiguratorError, PatchOutcome};
use serde::Serialize;

pub(crate) const SUCCESS_MESSAGE: &str = "All PHP ini files adjusted successfully.";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    patched: Vec<String>,
    errors: &'a [ConfiguratorError],
}

pub(crate) fn current_output_style() -> OutputStyle {
    resolve_output_style(
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    )
}

pub(crate) fn resolve_output_style(stdout_is_terminal: bool, no_color: bool) -> OutputStyle {
    if stdout_is_terminal && !no_color {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub(crate) fn render_report_lines(
    style: OutputStyle,
    success: bool,
    errors: &[ConfiguratorError],
) -> Vec<String> {
    let mut lines = Vec::new();
    if success {
        lines.push(String::new());
        lines.push(render_status_line(style, "SUCCESS", SUCCESS_MESSAGE));
    }
    for error in errors {
        lines.push(render_status_line(style, "ERROR", &error.to_string()));
    }
    lines
}

pub(crate) fn render_report_json(
    success: bool,
    patched: &[PatchOutcome],
    errors: &[ConfiguratorError],
) -> Result<String> {
    let report = JsonReport {
        success,
        patched: patched
            .iter()
            .map(|outcome| outcome.path.display().to_string())
            .collect(),
        errors,
    };
    serde_json::to_string_pretty(&report).context("failed to serialize report")
}

fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("{status}: {message}"),
        OutputStyle::Rich => format!("{}: {message}", colorize(status_style(status), status)),
    }
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "SUCCESS" => AnsiColor::BrightGreen,
        "ERROR" => AnsiColor::BrightRed,
        _ => AnsiColor::BrightBlue,
    };
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
