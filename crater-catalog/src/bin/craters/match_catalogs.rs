//! Crater-in-crater matching over two catalogs
//!
//! Loads the child and parent catalogs, runs the matcher, checkpoints the raw
//! mapping, then writes `<name>.csv` and `<name>.json`.

use crate::cli::{CatalogArgs, Cli, MatchArgs};
use crate::progress_bar::BarProgress;
use anyhow::Context;
use crater_catalog::io::{
    load_catalog, write_csv, write_json, CatalogSchema, Checkpoint, LoadOptions,
};
use crater_catalog::matching::{LogProgress, MatchOptions, Matcher, ProgressObserver};
use crater_core::{Crater, OverlapMapping, SphericalBody};
use std::fs;

pub fn run(args: &MatchArgs, cli: &Cli) -> anyhow::Result<()> {
    let body = body_from_radius(args.catalogs.radius)?;
    print_plan(args, cli, &body);

    let (children, parents) = load_catalogs(&args.catalogs)?;
    println!(
        "Loaded {} child craters (< {} km) and {} parent craters",
        children.len(),
        args.catalogs.max_child_diameter,
        parents.len()
    );

    let mapping = match_in_pool(args, body, &children, &parents)?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {:?}", args.output_dir))?;
    let checkpoint = Checkpoint::for_output(&args.output_dir, &args.name);
    checkpoint
        .save(&mapping)
        .context("Failed to write checkpoint")?;
    if cli.verbose {
        eprintln!("Checkpoint written to {:?}", checkpoint.path());
    }

    write_outputs(args, &mapping).with_context(|| {
        format!(
            "Failed to write outputs; raw result kept at {:?}",
            checkpoint.path()
        )
    })?;

    if !args.keep_checkpoint {
        checkpoint.discard()?;
    }

    print_summary(&mapping, children.len());
    Ok(())
}

/// Moon unless the radius was overridden.
pub fn body_from_radius(radius_km: f64) -> anyhow::Result<SphericalBody> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        anyhow::bail!("Body radius must be positive, got {}", radius_km);
    }
    if radius_km == SphericalBody::MOON.mean_radius_km {
        Ok(SphericalBody::MOON)
    } else {
        Ok(SphericalBody::with_radius("custom body", radius_km))
    }
}

pub fn load_catalogs(args: &CatalogArgs) -> anyhow::Result<(Vec<Crater>, Vec<Crater>)> {
    let child_options = LoadOptions {
        max_diameter_km: Some(args.max_child_diameter),
    };
    let children = load_catalog(&args.children, &CatalogSchema::robbins(), &child_options)
        .with_context(|| format!("Failed to load child catalog {:?}", args.children))?;
    let parents = load_catalog(&args.parents, &CatalogSchema::yang(), &LoadOptions::default())
        .with_context(|| format!("Failed to load parent catalog {:?}", args.parents))?;
    Ok((children, parents))
}

fn match_in_pool(
    args: &MatchArgs,
    body: SphericalBody,
    children: &[Crater],
    parents: &[Crater],
) -> anyhow::Result<OverlapMapping> {
    let threads = resolve_threads(args.threads);
    let options = MatchOptions {
        body,
        progress_interval: args.progress_interval,
        parallel: threads > 1,
    };
    let matcher = Matcher::new(options);

    let bar;
    let observer: &dyn ProgressObserver = if args.no_progress {
        &LogProgress
    } else {
        bar = BarProgress::new(children.len() as u64);
        &bar
    };

    if threads <= 1 {
        return Ok(matcher.run(children, parents, observer));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build thread pool")?;
    Ok(pool.install(|| matcher.run(children, parents, observer)))
}

fn resolve_threads(threads: usize) -> usize {
    if threads == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        threads
    }
}

fn write_outputs(args: &MatchArgs, mapping: &OverlapMapping) -> anyhow::Result<()> {
    let csv_path = args.output_dir.join(format!("{}.csv", args.name));
    write_csv(&csv_path, mapping)?;
    println!("Written {} parents to {:?}", mapping.len(), csv_path);

    let json_path = args.output_dir.join(format!("{}.json", args.name));
    write_json(&json_path, mapping)?;
    println!("Written {} parents to {:?}", mapping.len(), json_path);
    Ok(())
}

fn print_plan(args: &MatchArgs, cli: &Cli, body: &SphericalBody) {
    println!("=== Crater Matching ===");
    println!("Children: {:?}", args.catalogs.children);
    println!("Parents: {:?}", args.catalogs.parents);
    println!("Body: {}", body);
    println!("Threads: {}", resolve_threads(args.threads));
    println!("Output: {:?}", args.output_dir.join(&args.name));
    println!("Verbose: {}", cli.verbose);
    println!();
}

fn print_summary(mapping: &OverlapMapping, child_count: usize) {
    let matched = mapping.association_count();
    println!("\n=== Summary ===");
    println!("Parents with children: {}", mapping.len());
    println!("Children matched: {}", matched);
    println!("Children unmatched: {}", child_count - matched);
}
