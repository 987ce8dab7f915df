//! `metric-trees-cli`: a configuration-driven driver that loads a dataset,
//! builds one of the five index structures, and answers range queries
//! against it either interactively or in a batch-statistics mode.

mod config;
mod data;
mod distance;
mod error;
mod index_build;
mod selector;
mod utils;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use config::{Config, RunMode};
use error::CliError;
use metric_trees::Object;

/// The default configuration path consulted when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a JSON configuration file. If omitted, `./config.json` is
    /// tried; if that is also absent, the driver falls back to interactive
    /// prompts for every setting.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let (_guard, log_path) = match utils::configure_logger("metric-trees-cli.log") {
        Ok(result) => result,
        Err(e) => {
            eprintln!("failed to configure logger: {e}");
            std::process::exit(1);
        }
    };
    ftlog::info!("logging to {}", log_path.display());

    if let Err(e) = run(args) {
        ftlog::error!("fatal error: {e}");
        eprintln!("fatal error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config_path = args.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = match std::fs::read_to_string(&config_path) {
        Ok(text) => {
            ftlog::info!("loaded configuration from {}", config_path.display());
            serde_json::from_str::<Config>(&text)?
        }
        Err(_) => {
            ftlog::info!("no configuration file at {}; falling back to interactive prompts", config_path.display());
            println!("no configuration file found at {}; let's build one interactively.", config_path.display());
            prompt_for_config()?
        }
    };

    let (objects, kind) = data::load(&config.dataset.name, config.dataset.load_count)?;
    ftlog::info!("loaded {} objects of kind {:?} from {}", objects.len(), kind, config.dataset.name.display());
    let data: Vec<usize> = (0..objects.len()).collect();

    let distance = distance::build(&config.distance_function, kind, &objects)?;
    let mut selector = selector::build(&config.pivot_selector)?;
    let index = index_build::build(&config.index_structure, &data, &objects, distance.as_ref(), selector.as_mut())?;
    ftlog::info!("built {} over {} objects", index.name(), objects.len());

    println!("built {} over {} objects using {}", index.name(), objects.len(), distance.name());

    run_preset_queries(&config, &index, &objects, distance.as_ref(), kind);

    match config.run_mode {
        RunMode::Interactive => interactive_loop(&index, &objects, distance.as_ref(), kind),
        RunMode::BatchQueryStatistics => batch_query_statistics(&config, &index, &objects, distance.as_ref()),
    }

    Ok(())
}

/// Runs every query listed in `config.queries`, printing hits and distance
/// counts per query. A failed query is logged and skipped, matching
/// spec.md §7's "logs them and continues" error policy.
fn run_preset_queries(config: &Config, index: &metric_trees::Index, objects: &[Object], distance: &dyn metric_trees::Distance, kind: data::DataKind) {
    if config.queries.is_empty() {
        return;
    }
    println!("\n=== running {} preset queries ===", config.queries.len());
    for (i, query) in config.queries.iter().enumerate() {
        let label = query.description.clone().unwrap_or_else(|| format!("query {}", i + 1));
        let q = match utils::resolve_query_point(&query.query_point, objects, kind) {
            Ok(q) => q,
            Err(e) => {
                ftlog::error!("{label}: failed to resolve query point: {e}");
                println!("{label}: failed to resolve query point: {e}");
                continue;
            }
        };
        match index.search(&q, objects, distance, query.radius) {
            Ok((hits, count)) => {
                println!("{label}: radius {} -> {} hits, {count} distance calls", query.radius, hits.len());
            }
            Err(e) => {
                ftlog::error!("{label}: query failed: {e}");
                println!("{label}: query failed: {e}");
            }
        }
    }
}

/// Reads radius/query-point pairs from stdin until `exit`, printing hits and
/// distance counts for each. Malformed input and failed queries are logged
/// and the loop continues to the next prompt, per spec.md §7.
fn interactive_loop(index: &metric_trees::Index, objects: &[Object], distance: &dyn metric_trees::Distance, kind: data::DataKind) {
    println!("\n=== interactive mode (type 'exit' to quit) ===");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("radius> ");
        let _ = std::io::stdout().flush();
        let Some(Ok(radius_line)) = lines.next() else {
            break;
        };
        let radius_line = radius_line.trim();
        if radius_line.eq_ignore_ascii_case("exit") {
            break;
        }
        let radius: f64 = match radius_line.parse() {
            Ok(r) => r,
            Err(_) => {
                println!("not a valid radius, try again");
                continue;
            }
        };

        print!("query point> ");
        let _ = std::io::stdout().flush();
        let Some(Ok(point_line)) = lines.next() else {
            break;
        };
        let point_line = point_line.trim();

        let query_object = match kind {
            data::DataKind::Vector => {
                let parsed: Result<Vec<f64>, _> = point_line.split_whitespace().map(str::parse::<f64>).collect();
                match parsed {
                    Ok(values) => Object::Vector(values),
                    Err(_) => {
                        println!("could not parse query point as a vector of floats");
                        continue;
                    }
                }
            }
            data::DataKind::Text => Object::Text(point_line.to_string()),
        };

        match index.search(&query_object, objects, distance, radius) {
            Ok((hits, count)) => {
                if hits.is_empty() {
                    println!("no hits, {count} distance calls");
                } else {
                    println!("{} hits, {count} distance calls", hits.len());
                }
            }
            Err(e) => {
                ftlog::error!("interactive query failed: {e}");
                println!("query failed: {e}");
            }
        }
    }
    println!("goodbye!");
}

/// Runs `batch_query_num` queries, drawn directly from the loaded dataset by
/// position, at `batch_radius`, and reports mean/std-dev/variance of hit
/// counts and distance counts across the queries that succeeded. Queries run
/// concurrently via [`metric_trees::Index::par_batch_search`]; per spec.md
/// §5 this only changes scheduling, not results.
fn batch_query_statistics(config: &Config, index: &metric_trees::Index, objects: &[Object], distance: &dyn metric_trees::Distance) {
    let Some(radius) = config.batch_radius else {
        println!("run_mode is batch_query_statistics but batch_radius is not set; skipping");
        return;
    };
    let n = config.batch_query_num.unwrap_or(objects.len()).min(objects.len());

    println!("\n=== batch query statistics: {n} queries at radius {radius} ===");

    let queries: Vec<(Object, f64)> = objects.iter().take(n).map(|q| (q.clone(), radius)).collect();
    let results = index.par_batch_search(&queries, objects, distance);

    let mut hit_counts = Vec::with_capacity(n);
    let mut distance_counts = Vec::with_capacity(n);
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Ok((hits, count)) => {
                hit_counts.push(hits.len());
                distance_counts.push(count);
            }
            Err(e) => {
                ftlog::error!("batch query {i} failed: {e}");
                println!("query {i} failed: {e}");
            }
        }
    }

    let hit_stats = utils::Stats::compute(&hit_counts);
    let distance_stats = utils::Stats::compute(&distance_counts);
    println!(
        "completed {} of {n} queries\n  hit counts: mean {:.2}, std_dev {:.2}, variance {:.2}\n  distance counts: mean {:.2}, std_dev {:.2}, variance {:.2}",
        hit_counts.len(),
        hit_stats.mean,
        hit_stats.std_dev,
        hit_stats.variance,
        distance_stats.mean,
        distance_stats.std_dev,
        distance_stats.variance,
    );
}

/// Builds a [`Config`] by prompting on stdin, used when no configuration
/// file is found. Only asks for the handful of settings needed to load a
/// dataset and build an index; queries are left empty and the run falls
/// through to the interactive query loop.
fn prompt_for_config() -> Result<Config, CliError> {
    let dataset_path = prompt_line("dataset path: ")?;
    let load_count = prompt_line("load count: ")?.parse::<usize>().map_err(|e| CliError::Config(format!("invalid load_count: {e}")))?;

    let vector_distance = prompt_line("vector distance (Manhattan/Euclidean/Chebyshev), blank if string dataset: ")?;
    let string_distance = prompt_line("string distance (Hamming/Edit/Weighted Edit), blank if vector dataset: ")?;

    let seed = prompt_line("pivot selector seed (Random selector): ")?.parse::<u64>().map_err(|e| CliError::Config(format!("invalid seed: {e}")))?;

    let index_name = prompt_line("index structure (Pivot Table/General Hyper-plane Tree/Vantage Point Tree): ")?;
    let max_leaf_size = prompt_line("max_leaf_size: ")?.parse::<usize>().map_err(|e| CliError::Config(format!("invalid max_leaf_size: {e}")))?;
    let pivot_k = prompt_line("pivot_k: ")?.parse::<usize>().map_err(|e| CliError::Config(format!("invalid pivot_k: {e}")))?;

    let string_distance_name = match string_distance.to_lowercase().as_str() {
        "" => None,
        "hamming" => Some("Hamming"),
        "edit" => Some("Edit"),
        "weighted edit" | "weightededit" => Some("Weighted Edit Distance"),
        other => return Err(CliError::Config(format!("unrecognized string distance '{other}'"))),
    };

    let distance_function_json = serde_json::json!({
        "vector": if vector_distance.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(format!("{vector_distance} Distance")) },
        "string": string_distance_name,
    });

    let config_json = serde_json::json!({
        "dataset": { "name": dataset_path, "load_count": load_count },
        "distance_function": distance_function_json,
        "pivot_selector": { "name": "Random", "params": { "seed": seed } },
        "index_structure": { "name": index_name, "max_leaf_size": max_leaf_size, "pivot_k": pivot_k },
        "queries": [],
        "run_mode": "interactive",
    });

    serde_json::from_value(config_json).map_err(CliError::from)
}

fn prompt_line(label: &str) -> Result<String, CliError> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
