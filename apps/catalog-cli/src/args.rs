use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use catalog_core::types::{
    AggregateRequest, CategoryFilter, QueryDescriptor, RangeBound, SortDirection, SortKey, TagMode,
};

pub const USAGE: &str = "Usage: catalog-cli <query|categories> [catalog-path] [options]

query options:
  --search TEXT            case-insensitive substring match
  --category NAME          repeat for any-of selection; 'all' clears it
  --tag TAG                repeat to require several tags
  --all-tags               item must carry every --tag (default: any)
  --range METRIC:MIN:MAX   inclusive bounds, either side may be empty
  --flag NAME=true|false   required flag value
  --sort KEY               'name' or a metric name
  --desc                   sort descending
  --best METRIC[:asc|desc] report the lowest (asc) or highest (desc) item
  --query FILE             JSON query descriptor; later options refine it
  --json                   print the result as JSON";

#[derive(Debug, Clone, PartialEq)]
pub struct QueryArgs {
    pub path: Option<PathBuf>,
    pub descriptor: QueryDescriptor,
    pub aggregates: Vec<AggregateRequest>,
    pub json: bool,
}

/// Parses the arguments following `query`. `base` carries the configured
/// defaults and is replaced wholesale by `--query FILE`.
pub fn parse_query_args(args: &[String], base: QueryDescriptor) -> Result<QueryArgs> {
    let mut parsed = QueryArgs { path: None, descriptor: base, aggregates: Vec::new(), json: false };
    let mut categories: Vec<String> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| iter.next().cloned().ok_or_else(|| anyhow!("{} requires a value", flag));
        match arg.as_str() {
            "--search" => parsed.descriptor.search_text = value("--search")?,
            "--category" => categories.push(value("--category")?),
            "--tag" => {
                parsed.descriptor.tags.insert(value("--tag")?);
            }
            "--all-tags" => parsed.descriptor.tag_mode = TagMode::All,
            "--range" => {
                let (metric, bound) = parse_range(&value("--range")?)?;
                parsed.descriptor.ranges.insert(metric, bound);
            }
            "--flag" => {
                let (name, wanted) = parse_flag(&value("--flag")?)?;
                parsed.descriptor.flags.insert(name, wanted);
            }
            "--sort" => parsed.descriptor.sort_key = SortKey::from(value("--sort")?),
            "--desc" => parsed.descriptor.sort_direction = SortDirection::Descending,
            "--best" => parsed.aggregates.push(parse_best(&value("--best")?)?),
            "--query" => {
                let file = value("--query")?;
                let raw = fs::read_to_string(&file).with_context(|| format!("reading query file {}", file))?;
                parsed.descriptor =
                    serde_json::from_str(&raw).with_context(|| format!("parsing query file {}", file))?;
            }
            "--json" => parsed.json = true,
            other if other.starts_with("--") => bail!("unknown option: {}", other),
            other => {
                if parsed.path.is_some() {
                    bail!("unexpected argument: {}", other);
                }
                parsed.path = Some(PathBuf::from(other));
            }
        }
    }
    match categories.len() {
        0 => {}
        1 => parsed.descriptor.category = CategoryFilter::from(categories[0].as_str()),
        _ => parsed.descriptor.category = CategoryFilter::from_labels(categories),
    }
    Ok(parsed)
}

fn parse_range(raw: &str) -> Result<(String, RangeBound)> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [metric, min, max] = parts.as_slice() else {
        bail!("range must look like METRIC:MIN:MAX, got '{}'", raw);
    };
    if metric.is_empty() {
        bail!("range is missing a metric name: '{}'", raw);
    }
    let bound = |s: &str| -> Result<Option<f64>> {
        if s.is_empty() {
            return Ok(None);
        }
        s.parse::<f64>().map(Some).with_context(|| format!("invalid bound '{}' in range '{}'", s, raw))
    };
    Ok((metric.to_string(), RangeBound::new(bound(*min)?, bound(*max)?)))
}

fn parse_flag(raw: &str) -> Result<(String, bool)> {
    let (name, value) = raw.split_once('=').unwrap_or((raw, "true"));
    let wanted = value.parse::<bool>().with_context(|| format!("flag value must be true or false, got '{}'", value))?;
    Ok((name.to_string(), wanted))
}

fn parse_best(raw: &str) -> Result<AggregateRequest> {
    let (metric, direction) = match raw.split_once(':') {
        Some((metric, dir)) => (
            metric,
            SortDirection::parse(dir).ok_or_else(|| anyhow!("direction must be asc or desc, got '{}'", dir))?,
        ),
        None => (raw, SortDirection::Ascending),
    };
    Ok(AggregateRequest::new(metric, direction))
}
