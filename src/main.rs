// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use indexmap::IndexMap;
use tracing_subscriber::EnvFilter;

use resto_search::build::{compute_crc32, load_vehicles, run_build, BuildConfig, SiteStats};
use resto_search::render::results_summary;
use resto_search::scoring::explain_record;
use resto_search::search::tokenize_query;
use resto_search::{RecordType, SearchEngine, SearchFilters, SearchIndex};

mod cli;
use cli::display::{
    format_size, highlight_terms, pad_right, paint, row, score_value, section_bot, section_mid,
    section_top, tier_label, type_badge, Color, BOLD, DIM,
};
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Index {
            input,
            output,
            compact,
            quiet,
        } => run_index(input, output, compact, quiet),
        Commands::Search {
            file,
            query,
            brand,
            record_type,
            limit,
            json,
            explain,
        } => run_search(&file, &query, &brand, &record_type, limit, json, explain),
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Stats { input, json } => run_stats(&input, json),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run_index(input: PathBuf, output: PathBuf, compact: bool, quiet: bool) -> Result<(), String> {
    let config = BuildConfig {
        input_dir: input,
        output_path: output,
        pretty: !compact,
        progress: !quiet && atty::is(atty::Stream::Stderr),
    };
    let summary = run_build(&config).map_err(|e| e.to_string())?;

    eprintln!("✓ Search index built successfully!");
    eprintln!("  - {} issues", summary.issues);
    eprintln!("  - {} torque specs", summary.torque_specs);
    eprintln!("  - {} guides", summary.guides);
    eprintln!("  - {} suppliers", summary.suppliers);
    eprintln!(
        "  {} ({}, {} brotli, crc32 {:08x})",
        summary.output_path.display(),
        format_size(summary.bytes),
        format_size(summary.brotli_bytes),
        summary.checksum
    );
    Ok(())
}

fn load_engine(file: &Path) -> Result<SearchEngine, String> {
    let engine = SearchEngine::new();
    engine.load_from_path(file).map_err(|e| e.to_string())?;
    Ok(engine)
}

fn run_search(
    file: &Path,
    query: &str,
    brand: &str,
    record_type: &str,
    limit: Option<usize>,
    json: bool,
    explain: bool,
) -> Result<(), String> {
    let engine = load_engine(file)?;
    let filters = SearchFilters::parse(brand, record_type).map_err(|e| e.to_string())?;
    let hits = engine
        .search_limited(query, &filters, limit)
        .map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&hits).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    let terms = tokenize_query(query);
    section_top(&format!("SEARCH \"{}\"", query));
    row(&paint(Color::Cyan, &[], &results_summary(hits.len())));
    for hit in &hits {
        let record = &hit.record;
        section_mid(record.id());
        row(&format!(
            "{} {} {}",
            score_value(hit.score),
            type_badge(hit.record_type),
            highlight_terms(record.label(), query)
        ));
        row(&paint(
            Color::Gray,
            &[DIM],
            &format!(
                "       {} {} ({})  {}",
                record.brand(),
                record.model_name(),
                record.years(),
                record.anchor()
            ),
        ));
        if explain {
            let breakdown = explain_record(record, &terms);
            let tiers: Vec<String> = terms
                .iter()
                .zip(&breakdown.tiers)
                .map(|(term, tier)| match tier {
                    Some(tier) => format!("{}={}", term, tier_label(*tier)),
                    None => format!("{}=-", term),
                })
                .collect();
            let bonus = if breakdown.bonus_applied { " x1.5" } else { "" };
            row(&format!("       {}{}", tiers.join(" "), bonus));
        }
    }
    section_bot();
    Ok(())
}

fn read_index(file: &Path) -> Result<(SearchIndex, Vec<u8>), String> {
    let bytes = fs::read(file).map_err(|e| format!("failed to read {}: {}", file.display(), e))?;
    let index = serde_json::from_slice(&bytes)
        .map_err(|e| format!("malformed index {}: {}", file.display(), e))?;
    Ok((index, bytes))
}

fn run_inspect(file: &Path) -> Result<(), String> {
    let (index, bytes) = read_index(file)?;

    section_top("INDEX");
    row(&format!("File       {}", file.display()));
    row(&format!("Size       {}", format_size(bytes.len())));
    row(&format!("CRC32      {:08x}", compute_crc32(&bytes)));
    row(&format!("Records    {}", index.len()));

    section_mid("COLLECTIONS");
    for record_type in RecordType::ALL {
        row(&format!(
            "{} {}",
            pad_right(&type_badge(record_type), 12),
            index.count(record_type)
        ));
    }

    // Models per brand, first-seen order.
    let mut models: IndexMap<&str, Vec<(&str, &str)>> = IndexMap::new();
    let identities = index
        .issues
        .iter()
        .map(|r| (&r.brand, &r.model, &r.model_name))
        .chain(index.torque_specs.iter().map(|r| (&r.brand, &r.model, &r.model_name)))
        .chain(index.guides.iter().map(|r| (&r.brand, &r.model, &r.model_name)))
        .chain(index.suppliers.iter().map(|r| (&r.brand, &r.model, &r.model_name)));
    for (brand, model, model_name) in identities {
        let entry = models.entry(brand.as_str()).or_default();
        if !entry.iter().any(|(m, _)| *m == model.as_str()) {
            entry.push((model.as_str(), model_name.as_str()));
        }
    }

    section_mid("BRANDS");
    for (brand, entries) in &models {
        let names: Vec<String> = entries
            .iter()
            .map(|(model, name)| format!("{} ({})", model, name))
            .collect();
        row(&format!(
            "{} {}",
            pad_right(&paint(Color::Yellow, &[BOLD], brand), 12),
            names.join(", ")
        ));
    }
    section_bot();
    Ok(())
}

fn run_stats(input: &Path, json: bool) -> Result<(), String> {
    let vehicles = load_vehicles(input).map_err(|e| e.to_string())?;
    let stats = SiteStats::collect(vehicles.iter().map(|v| &v.record));

    if json {
        let out = serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    let line = |label: &str, value: usize| {
        let value = paint(Color::Green, &[BOLD], &value.to_string());
        row(&format!("{} {}", pad_right(label, 20), value));
    };

    section_top("SITE STATS");
    line("Vehicles", stats.vehicles);
    line("Guides", stats.guides);
    line("  restoration", stats.restoration_guides);
    line("  diy", stats.diy_guides);
    line("Torque specs", stats.torque_specs);
    line("Suppliers", stats.suppliers);
    section_bot();
    Ok(())
}
