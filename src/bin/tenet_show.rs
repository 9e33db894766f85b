//! Shows a single catalog entry by id or position.
//!
//! Prints the entry as a markdown section by default; `--json` emits the full
//! entry as compact JSON for scripting. Unknown ids fail with the known ids
//! named so typos are quick to spot.

use anyhow::{Context, Result, bail};
use std::env;
use tenets::{CatalogIndex, EntryId, PrincipleEntry, render_entry, resolve_catalog_path};

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

    let entry: &PrincipleEntry = match (&args.id, args.position) {
        (Some(id), None) => index.require_entry(id)?,
        (None, Some(position)) => match index.entry_at(position) {
            Some(entry) => entry,
            None => bail!(
                "no entry at position {position}; catalog has {} entries",
                index.entries().count()
            ),
        },
        _ => bail!("exactly one of --id or --position is required"),
    };

    if args.json {
        println!("{}", serde_json::to_string(entry)?);
        return Ok(());
    }

    let mut rendered = String::new();
    render_entry(entry, &index.catalog().docs, &mut rendered)
        .context("rendering entry to markdown")?;
    print!("{rendered}");
    Ok(())
}

struct CliArgs {
    catalog: Option<std::path::PathBuf>,
    id: Option<EntryId>,
    position: Option<usize>,
    json: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog = None;
        let mut id: Option<EntryId> = None;
        let mut position: Option<usize> = None;
        let mut json = false;

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
                    catalog = Some(std::path::PathBuf::from(path));
                }
                "--id" => {
                    let raw = next_value(&mut args, "--id")?;
                    if id.is_some() {
                        bail!("--id may only be provided once");
                    }
                    id = Some(EntryId(raw));
                }
                "--position" | "-p" => {
                    let raw = next_value(&mut args, "--position")?;
                    if position.is_some() {
                        bail!("--position may only be provided once");
                    }
                    let parsed: usize = raw
                        .parse()
                        .with_context(|| format!("invalid position: {raw}"))?;
                    position = Some(parsed);
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            catalog,
            id,
            position,
            json,
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
    "Usage: tenet-show (--id ID | --position N) [--catalog PATH] [--json]\n\
Prints one catalog entry as a markdown section, or as compact JSON with\n\
--json. Positions are zero-based in authored order.\n"
}

fn print_usage() {
    print!("{}", usage());
}
