//! Renders the catalog as plain markdown text.
//!
//! Writes to stdout by default so the output can sit in pipelines; `--output`
//! writes the same bytes to a file instead. Anything presentational beyond
//! plain markdown (contents tables, anchors, highlighting) is out of scope.

use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::path::PathBuf;
use tenets::{CatalogIndex, render_catalog, resolve_catalog_path};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let catalog_path = resolve_catalog_path(args.catalog.as_deref())?;
    let index = CatalogIndex::load(&catalog_path)?;

    let mut rendered = String::new();
    render_catalog(index.catalog(), &mut rendered)
        .context("rendering catalog to markdown")?;

    match args.output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("writing rendered catalog to {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

struct CliArgs {
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    let path = next_value(&mut args, "--catalog")?;
                    if catalog.is_some() {
                        bail!("--catalog may only be provided once");
                    }
                    catalog = Some(PathBuf::from(path));
                }
                "--output" | "-o" => {
                    let path = next_value(&mut args, "--output")?;
                    if output.is_some() {
                        bail!("--output may only be provided once");
                    }
                    output = Some(PathBuf::from(path));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs { catalog, output })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: tenet-render [--catalog PATH] [--output PATH]\n\
Renders the tenet catalog as plain markdown. Output goes to stdout unless\n\
--output names a file.\n"
}

fn print_usage() {
    print!("{}", usage());
}
