//! Lists catalog entries in stable authored order.
//!
//! The text form prints one `id<TAB>title<TAB>languages` line per entry so the
//! output diffs cleanly across runs; `--json` emits entry snapshots.
//! `--language` filters to entries illustrating any of the given tags, and
//! `--coverage` reports which declared languages the examples exercise.

use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use std::env;
use tenets::{
    CatalogIndex, EntrySnapshot, build_language_coverage, resolve_catalog_path, split_list,
    unused_languages,
};

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

    if args.coverage {
        return print_coverage(&index, args.json);
    }

    let filter: BTreeSet<String> = args.languages.iter().cloned().collect();
    let snapshots: Vec<EntrySnapshot> = index
        .entries()
        .map(|entry| entry.snapshot())
        .filter(|snapshot| {
            filter.is_empty()
                || snapshot
                    .languages
                    .iter()
                    .any(|language| filter.contains(language.as_str()))
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string(&snapshots)?);
        return Ok(());
    }

    for snapshot in &snapshots {
        let languages: Vec<&str> = snapshot
            .languages
            .iter()
            .map(|language| language.as_str())
            .collect();
        println!(
            "{}\t{}\t{}",
            snapshot.id.0,
            snapshot.title,
            languages.join(",")
        );
    }
    Ok(())
}

fn print_coverage(index: &CatalogIndex, json: bool) -> Result<()> {
    let coverage = build_language_coverage(index).context("building language coverage")?;

    if json {
        println!("{}", serde_json::to_string(&coverage)?);
        return Ok(());
    }

    for (tag, entry) in &coverage {
        if entry.has_example {
            println!(
                "{tag}: {} entries ({})",
                entry.entry_ids.len(),
                entry.entry_ids.join(", ")
            );
        } else {
            println!("{tag}: unused");
        }
    }
    for tag in unused_languages(&coverage) {
        eprintln!("warning: declared language '{tag}' has no examples");
    }
    Ok(())
}

struct CliArgs {
    catalog: Option<std::path::PathBuf>,
    json: bool,
    languages: Vec<String>,
    coverage: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog = None;
        let mut json = false;
        let mut languages: Vec<String> = Vec::new();
        let mut coverage = false;

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
                "--json" => json = true,
                "--language" | "-l" => {
                    let raw = next_value(&mut args, "--language")?;
                    languages.extend(split_list(&raw));
                }
                "--coverage" => coverage = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        if coverage && !languages.is_empty() {
            bail!("--coverage cannot be combined with --language filters");
        }

        Ok(CliArgs {
            catalog,
            json,
            languages,
            coverage,
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
    "Usage: tenet-list [--catalog PATH] [--json] [--language LIST] [--coverage]\n\
Lists catalog entries in authored order as id<TAB>title<TAB>languages lines.\n\
--language filters by comma- or space-separated tags; --coverage reports\n\
declared languages against the examples that use them.\n"
}

fn print_usage() {
    print!("{}", usage());
}
