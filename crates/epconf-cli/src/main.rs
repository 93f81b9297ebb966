mod config;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use epconf_configurator::{Configurator, HttpCertificateSource};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{resolve_root, EpconfConfig};
use crate::render::{current_output_style, render_report_json, render_report_lines};

#[derive(Parser, Debug)]
#[command(name = "epconf")]
#[command(about = "Adjusts every php.ini of an EasyPHP installation", long_about = None)]
struct Cli {
    #[arg(env = "EPCONF_EASYPHP_PATH")]
    root: Option<PathBuf>,
    #[arg(long, env = "EPCONF_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long)]
    certificate_url: Option<String>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Plain)]
    format: ReportFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ReportFormat {
    Plain,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = EpconfConfig::load(cli.config.as_deref())?;
    let root = resolve_root(cli.root, &config)?;
    let options = config.configurator_options(cli.certificate_url);
    debug!(
        "configuring {} from {}",
        root.display(),
        options.certificate_url
    );

    let certificates = HttpCertificateSource::new()?;
    let mut configurator = Configurator::with_options(root, options);
    let success = configurator.process(&certificates);

    match cli.format {
        ReportFormat::Plain => {
            let style = current_output_style();
            for line in render_report_lines(style, success, configurator.errors()) {
                println!("{line}");
            }
        }
        ReportFormat::Json => {
            println!(
                "{}",
                render_report_json(success, configurator.patched(), configurator.errors())?
            );
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
