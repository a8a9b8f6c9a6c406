//! `fabric-tools render`: run the placeholder renderer on a single file

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use scaffolder_core::templates::{placeholder_names, render, Params};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Template file containing `${{ name }}` placeholders
    pub file: PathBuf,

    /// Parameter value, repeatable (`-p mod_id=examplemod`)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only list the placeholder names the file references
    #[arg(long)]
    pub list: bool,
}

/// Parse one `key=value` pair; the value may itself contain `=`
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{}': expected key=value", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid parameter '{}': empty name", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Collect parameters, rejecting a name given twice
pub fn collect_params(pairs: Vec<(String, String)>) -> Result<Params> {
    let mut params = Params::new();
    for (key, value) in pairs {
        if params.contains_key(&key) {
            anyhow::bail!("Parameter '{}' given more than once", key);
        }
        params.insert(key, value);
    }
    Ok(params)
}

pub async fn execute(args: RenderArgs) -> Result<()> {
    let template = fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    if args.list {
        let names = placeholder_names(&template)
            .with_context(|| format!("Failed to scan {}", args.file.display()))?;
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    let params = collect_params(args.params)?;
    debug!(file = %args.file.display(), params = params.len(), "rendering");

    let rendered = render(&template, &params)
        .with_context(|| format!("Failed to render {}", args.file.display()))?;

    for warning in &rendered.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered.text)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Wrote".green(), path.display());
        }
        None => print!("{}", rendered.text),
    }

    Ok(())
}
