//! Command-line scanner: reads a Gradle build log, reports version-catalog
//! failures with file positions where they can be recovered.

use clap::Parser;
use lens_catalog::{CatalogResolver, TomlErrorParser, scan_build_output};
use lens_core::BuildIssue;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog-lens")]
#[command(about = "Scan Gradle build output for version-catalog failures")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Build log to scan; reads stdin when omitted
    #[arg(value_name = "LOG")]
    log: Option<PathBuf>,

    /// Gradle project root used to resolve catalog files
    #[arg(long, default_value = ".", value_name = "DIR")]
    project_root: PathBuf,

    /// Extra catalog mapping, repeatable (e.g. --catalog deps=tools/deps.versions.toml)
    #[arg(long = "catalog", value_name = "NAME=PATH", value_parser = parse_catalog_mapping)]
    catalogs: Vec<(String, PathBuf)>,

    /// Print issues as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn parse_catalog_mapping(raw: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got '{raw}'"))?;
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got '{raw}'"));
    }
    Ok((name.to_owned(), PathBuf::from(path)))
}

fn read_log(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_issue(issue: &BuildIssue) {
    println!("{}", issue.description);
    if let Some(nav) = &issue.navigation {
        // Positions are stored 0-based; print them 1-based like compilers do.
        println!(
            "  --> {}:{}:{}",
            nav.path.display(),
            nav.line + 1,
            nav.column + 1
        );
    }
    println!();
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let text = match read_log(cli.log.as_deref()) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read build log: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut resolver = CatalogResolver::new(&cli.project_root);
    for (name, path) in cli.catalogs {
        resolver.insert(name, path);
    }
    let parser = TomlErrorParser::new(resolver);

    let mut issues: Vec<BuildIssue> = Vec::new();
    let blocks = scan_build_output(&text, &parser, &mut issues);
    tracing::debug!(blocks, issues = issues.len(), "scan finished");

    if cli.json {
        match serde_json::to_string_pretty(&issues) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: cannot serialize issues: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for issue in &issues {
            print_issue(issue);
        }
        match issues.len() {
            0 => println!("No version-catalog failures found."),
            1 => println!("1 version-catalog failure found."),
            n => println!("{n} version-catalog failures found."),
        }
    }

    if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
