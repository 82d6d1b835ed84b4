//! `wrapgen`: generate wrapper components from a component manifest.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wrapgen_core::codegen::Generator;
use wrapgen_core::{Framework, GeneratorConfig, Manifest};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrameworkArg {
    React,
    Vue,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::React => Framework::React,
            FrameworkArg::Vue => Framework::Vue,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wrapgen", about = "Generate React/Vue wrappers for remotely hosted components")]
struct Args {
    /// Component manifest (JSON).
    #[arg(long)]
    manifest: PathBuf,

    /// Output directory. Overrides the config file.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Target framework. Overrides the config file.
    #[arg(long, value_enum)]
    framework: Option<FrameworkArg>,

    /// Runtime helper to copy into the output directory when missing.
    #[arg(long)]
    helper_source: Option<PathBuf>,

    /// Generator config (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => {
            let out = args
                .out
                .clone()
                .context("--out is required without --config")?;
            let framework = args
                .framework
                .context("--framework is required without --config")?;
            GeneratorConfig::new(out, framework.into())
        }
    };

    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    if let Some(framework) = args.framework {
        config.framework = framework.into();
    }
    if let Some(helper) = &args.helper_source {
        config.helper_source = Some(helper.clone());
    }
    Ok(config)
}

fn run(args: Args) -> Result<bool> {
    let config = resolve_config(&args)?;
    let manifest = Manifest::load(&args.manifest)?;
    info!(
        components = manifest.components.len(),
        framework = %config.framework,
        out = %config.output_dir.display(),
        "generating wrappers"
    );

    let report = Generator::new(config)
        .run(&manifest)
        .context("generation pass aborted")?;

    for (component, err) in &report.failed {
        error!(%component, error = %err, "component failed");
    }
    Ok(report.is_success())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
