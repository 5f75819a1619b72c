//! Re-validate an existing mapping against parent radii

use crate::cli::{Cli, CorrectArgs};
use crate::match_catalogs::{body_from_radius, load_catalogs};
use anyhow::Context;
use crater_catalog::io::{read_json, write_csv, write_json};
use crater_catalog::matching::Corrector;

pub fn run(args: &CorrectArgs, cli: &Cli) -> anyhow::Result<()> {
    let body = body_from_radius(args.catalogs.radius)?;

    println!("=== Mapping Correction ===");
    println!("Mapping: {:?}", args.mapping);
    println!("Children: {:?}", args.catalogs.children);
    println!("Parents: {:?}", args.catalogs.parents);
    println!("Body: {}", body);
    println!("Output: {:?}", args.output);
    if let Some(csv) = &args.csv {
        println!("CSV: {:?}", csv);
    }
    println!();

    let mapping = read_json(&args.mapping)
        .with_context(|| format!("Failed to read mapping {:?}", args.mapping))?;
    let (children, parents) = load_catalogs(&args.catalogs)?;
    if cli.verbose {
        eprintln!(
            "Loaded {} children and {} parents for {} mapped parents",
            children.len(),
            parents.len(),
            mapping.len()
        );
    }

    let (corrected, report) = Corrector::new(body)
        .correct_with_report(&mapping, &children, &parents)
        .context("Correction aborted")?;

    write_json(&args.output, &corrected)
        .with_context(|| format!("Failed to write {:?}", args.output))?;
    println!("Written {} parents to {:?}", corrected.len(), args.output);

    if let Some(csv) = &args.csv {
        write_csv(csv, &corrected).with_context(|| format!("Failed to write {:?}", csv))?;
        println!("Written {} parents to {:?}", corrected.len(), csv);
    }

    println!("\n=== Summary ===");
    println!("{}", report);
    println!("Dropped: {} children, {} parents", report.children_dropped(), report.parents_dropped());
    Ok(())
}
