use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use catalog_cli::args::{parse_query_args, USAGE};
use catalog_cli::render::render_text;
use catalog_core::config::Config;
use catalog_core::loader::JsonCatalogSource;
use catalog_core::types::QueryDescriptor;
use catalog_query::CatalogQueryEngine;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    args.remove(0);
    if args.is_empty() { eprintln!("{}", USAGE); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn init_logging(config: &Config) {
    let level: String = config.get("log.level").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn catalog_path(config: &Config, given: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match given {
        Some(path) => Ok(path),
        None => config
            .get_path("catalog.path")
            .context("no catalog path given and catalog.path is not configured"),
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    init_logging(&config);
    let (cmd, args) = parse_args();
    let engine = CatalogQueryEngine::new();
    match cmd.as_str() {
        "query" => {
            let base = config.query_settings()?.apply(QueryDescriptor::new());
            let query = parse_query_args(&args, base)?;
            let source = JsonCatalogSource::new(catalog_path(&config, query.path.clone())?);
            let output = engine.execute_source(&source, &query.descriptor, &query.aggregates, |_, result| {
                if query.json { serde_json::to_string_pretty(&result).map_err(anyhow::Error::from) } else { Ok(render_text(&result)) }
            })??;
            print!("{}", output);
            if query.json { println!(); }
        }
        "categories" => {
            let source = JsonCatalogSource::new(catalog_path(&config, args.first().map(PathBuf::from))?);
            let output = engine.execute_source(&source, &QueryDescriptor::new(), &[], |catalog, result| {
                let mut lines = vec![format!("{} categories across {} items", result.category_counts.len(), catalog.len())];
                lines.extend(result.category_counts.iter().map(|(category, count)| format!("  {}: {} items", category, count)));
                lines.join("\n")
            })?;
            println!("{}", output);
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        _ => { eprintln!("Unknown command: {}\n{}", cmd, USAGE); std::process::exit(1); }
    }
    Ok(())
}
