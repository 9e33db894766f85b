//! Catalog checker for authors.
//!
//! Validates catalog files (or a catalog document on stdin) and reports every
//! violation it can find instead of stopping at the first, so one run is
//! enough to fix an authored file. Exit code is non-zero when anything is
//! invalid.

use anyhow::{Context, Result, bail};
use serde_json::from_str;
use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use tenets::{
    CatalogIndex, TenetCatalog, build_language_coverage, collect_violations,
    load_catalog_from_path, resolve_catalog_path, unused_languages, validate_catalog_files,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let mut failures: Vec<String> = Vec::new();

    let catalog_paths = if args.catalogs.is_empty() && args.dirs.is_empty() && !args.stdin {
        vec![resolve_catalog_path(None)?]
    } else {
        args.catalogs.clone()
    };

    for path in &catalog_paths {
        failures.extend(check_catalog_file(path, args.quiet)?);
    }

    if !args.dirs.is_empty() {
        failures.extend(validate_catalog_files(&args.dirs)?);
    }

    if args.stdin {
        failures.extend(check_stdin(args.quiet)?);
    }

    for failure in &failures {
        eprintln!("error: {failure}");
    }
    if !failures.is_empty() {
        bail!("{} validation error(s)", failures.len());
    }
    Ok(())
}

/// Check one catalog file, returning failure messages.
///
/// A passing file goes through the full strict load (schema included); a
/// failing one is re-parsed so every structural violation can be listed, not
/// just the first.
fn check_catalog_file(path: &PathBuf, quiet: bool) -> Result<Vec<String>> {
    match CatalogIndex::load(path) {
        Ok(index) => {
            if !quiet {
                println!(
                    "ok: {} ({} entries)",
                    path.display(),
                    index.entries().count()
                );
            }
            let coverage = build_language_coverage(&index)?;
            for tag in unused_languages(&coverage) {
                eprintln!(
                    "warning: {}: declared language '{tag}' has no examples",
                    path.display()
                );
            }
            Ok(Vec::new())
        }
        Err(load_err) => {
            let mut failures = Vec::new();
            match load_catalog_from_path(path) {
                Ok(catalog) => {
                    let violations = collect_violations(&catalog);
                    if violations.is_empty() {
                        failures.push(format!("{}: {load_err:#}", path.display()));
                    } else {
                        for violation in violations {
                            failures.push(format!("{}: {violation}", path.display()));
                        }
                    }
                }
                Err(_) => failures.push(format!("{}: {load_err:#}", path.display())),
            }
            Ok(failures)
        }
    }
}

fn check_stdin(quiet: bool) -> Result<Vec<String>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;
    if input.trim().is_empty() {
        bail!("no catalog document provided on stdin");
    }

    let catalog: TenetCatalog = match from_str(&input) {
        Ok(catalog) => catalog,
        Err(err) => return Ok(vec![format!("<stdin>: invalid catalog: {err}")]),
    };

    let violations = collect_violations(&catalog);
    if !violations.is_empty() {
        return Ok(violations
            .into_iter()
            .map(|violation| format!("<stdin>: {violation}"))
            .collect());
    }

    let index = CatalogIndex::from_catalog(catalog)?;
    if !quiet {
        println!("ok: <stdin> ({} entries)", index.entries().count());
    }
    let coverage = build_language_coverage(&index)?;
    for tag in unused_languages(&coverage) {
        eprintln!("warning: <stdin>: declared language '{tag}' has no examples");
    }
    Ok(Vec::new())
}

struct CliArgs {
    catalogs: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
    stdin: bool,
    quiet: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalogs = Vec::new();
        let mut dirs = Vec::new();
        let mut stdin = false;
        let mut quiet = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    let path = next_value(&mut args, "--catalog")?;
                    catalogs.push(PathBuf::from(path));
                }
                "--dir" => {
                    let path = next_value(&mut args, "--dir")?;
                    dirs.push(PathBuf::from(path));
                }
                "--stdin" => {
                    if stdin {
                        bail!("--stdin may only be provided once");
                    }
                    stdin = true;
                }
                "--quiet" | "-q" => quiet = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            catalogs,
            dirs,
            stdin,
            quiet,
        })
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
    "Usage: tenet-check [--catalog PATH]... [--dir DIR]... [--stdin] [--quiet]\n\
Validates tenet catalog files and reports every violation found. With no\n\
arguments the workspace catalog is checked. Exit code is non-zero when any\n\
input is invalid.\n"
}

fn print_usage() {
    print!("{}", usage());
}
