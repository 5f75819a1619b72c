//! Download the Robbins and Yang crater databases
//!
//! Each file is fetched to a `.tmp` sibling and renamed into place once the
//! body has been written, so an interrupted run never leaves a partial CSV.

use crate::cli::{Cli, DownloadArgs, SourceCatalog};
use anyhow::Context;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

struct RemoteCatalog {
    name: &'static str,
    url: &'static str,
    filename: &'static str,
}

static ROBBINS: RemoteCatalog = RemoteCatalog {
    name: "Robbins (2018)",
    url: "https://pdsimage2.wr.usgs.gov/Individual_Investigations/moon_lro.kaguya_multi_craterdatabase_robbins_2018/data/lunar_crater_database_robbins_2018.csv",
    filename: "lunar_crater_database_robbins_2018.csv",
};

static YANG: RemoteCatalog = RemoteCatalog {
    name: "Yang et al. (2020)",
    url: "https://figshare.com/ndownloader/files/24160592",
    filename: "yang_aged_database.csv",
};

fn selected(catalog: SourceCatalog) -> Vec<&'static RemoteCatalog> {
    match catalog {
        SourceCatalog::Robbins => vec![&ROBBINS],
        SourceCatalog::Yang => vec![&YANG],
        SourceCatalog::All => vec![&ROBBINS, &YANG],
    }
}

pub fn run(args: &DownloadArgs, cli: &Cli) -> anyhow::Result<()> {
    fs::create_dir_all(&args.output)?;
    let catalogs = selected(args.catalog);

    println!("=== Crater Database Download ===");
    println!("Output: {:?}", args.output);
    for catalog in &catalogs {
        println!("  {} -> {}", catalog.name, catalog.filename);
    }
    println!();

    let mut downloaded = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for catalog in &catalogs {
        let dest = args.output.join(catalog.filename);
        if dest.exists() && !args.force {
            println!("{} already present, skipping (use --force to refetch)", catalog.filename);
            skipped += 1;
            continue;
        }

        if cli.verbose {
            eprintln!("Fetching {}", catalog.url);
        }
        match download_with_retry(catalog.url, &dest, args.retries) {
            Ok(bytes) => {
                println!(
                    "{} ({:.1} MB)",
                    catalog.filename,
                    bytes as f64 / 1_048_576.0
                );
                downloaded += 1;
            }
            Err(e) => {
                eprintln!("FAILED {}: {:#}", catalog.filename, e);
                failed += 1;
            }
        }
    }

    println!("\n=== Summary ===");
    println!("Downloaded: {}", downloaded);
    println!("Skipped: {}", skipped);
    println!("Failed: {}", failed);

    if failed > 0 {
        anyhow::bail!("{} downloads failed. Re-run to retry.", failed);
    }
    Ok(())
}

fn download_with_retry(url: &str, dest: &Path, max_retries: u32) -> anyhow::Result<u64> {
    let mut attempt = 0;
    loop {
        match download_file(url, dest) {
            Ok(bytes) => return Ok(bytes),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                tracing::warn!(url, attempt, max_retries, error = %e, "download failed, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

fn download_file(url: &str, dest: &Path) -> anyhow::Result<u64> {
    let response =
        reqwest::blocking::get(url).with_context(|| format!("Failed to connect: {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    let tmp_path = dest.with_extension("csv.tmp");
    let bytes = response.bytes().context("Failed to read body")?;
    let mut file =
        File::create(&tmp_path).with_context(|| format!("Failed to create {:?}", tmp_path))?;
    file.write_all(&bytes)?;
    file.flush()?;
    drop(file);

    if bytes.is_empty() {
        let _ = fs::remove_file(&tmp_path);
        anyhow::bail!("Empty response from {}", url);
    }

    fs::rename(&tmp_path, dest)
        .with_context(|| format!("Failed to rename {:?} -> {:?}", tmp_path, dest))?;
    Ok(bytes.len() as u64)
}
