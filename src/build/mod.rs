//! Build pipeline: vehicle JSON files in, one search index artifact out.
//!
//! 1. List and parse `*.json` in the input directory (parallel, sorted)
//! 2. Flatten into the four collections ([`build_index_from_loaded`])
//! 3. Serialize, create the output directory, write the artifact
//! 4. Report counts, size, compressed size and checksum

pub mod builder;
pub mod document;
pub mod keywords;
pub mod parallel;
pub mod stats;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crc32fast::Hasher as Crc32Hasher;
#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::error::BuildError;
use crate::types::{RecordType, SearchIndex};

pub use builder::*;
pub use document::*;
pub use keywords::*;
pub use parallel::*;
pub use stats::*;

/// Where the static site keeps its vehicle data.
pub const DEFAULT_INPUT_DIR: &str = "src/_data/vehicles";

/// Where the client fetches the index from.
pub const DEFAULT_OUTPUT_PATH: &str = "src/search-index.json";

/// Inputs for [`run_build`].
#[derive(Clone, Debug)]
pub struct BuildConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    /// Two-space indented JSON (the default) or a single line.
    pub pretty: bool,
    /// Draw progress bars on stderr.
    pub progress: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pretty: true,
            progress: false,
        }
    }
}

impl BuildConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }
}

/// What a build wrote.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub vehicles: usize,
    pub issues: usize,
    pub torque_specs: usize,
    pub guides: usize,
    pub suppliers: usize,
    pub bytes: usize,
    pub brotli_bytes: usize,
    pub checksum: u32,
}

impl BuildSummary {
    fn new(output_path: &Path, vehicles: usize, index: &SearchIndex, bytes: &[u8]) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
            vehicles,
            issues: index.count(RecordType::Issue),
            torque_specs: index.count(RecordType::Torque),
            guides: index.count(RecordType::Guide),
            suppliers: index.count(RecordType::Supplier),
            bytes: bytes.len(),
            brotli_bytes: brotli_size(bytes),
            checksum: compute_crc32(bytes),
        }
    }
}

/// Serialize an index to the artifact's JSON bytes.
///
/// Pretty output uses two-space indentation, matching what the site's build
/// step has always emitted, so diffs of the committed artifact stay readable.
pub fn serialize_index(index: &SearchIndex, pretty: bool) -> Result<Vec<u8>, BuildError> {
    let result = if pretty {
        serde_json::to_vec_pretty(index)
    } else {
        serde_json::to_vec(index)
    };
    result.map_err(BuildError::Serialize)
}

pub fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Size of `data` after brotli at quality 11, i.e. what a CDN would serve.
pub fn brotli_size(data: &[u8]) -> usize {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        if encoder.write_all(data).is_err() {
            return data.len();
        }
    }
    compressed.len()
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

#[cfg(feature = "parallel")]
fn load_for_build(config: &BuildConfig) -> Result<Vec<LoadedVehicle>, BuildError> {
    if !config.progress {
        return load_vehicles(&config.input_dir);
    }

    let multi = MultiProgress::new();
    let load_pb = multi.add(ProgressBar::new(0));
    load_pb.set_style(create_progress_style());
    load_pb.set_prefix("Loading");
    load_pb.set_message("vehicles...");

    let vehicles = load_vehicles_with_progress(&config.input_dir, &load_pb)?;
    load_pb.finish_with_message(format!("loaded {} vehicles", vehicles.len()));
    Ok(vehicles)
}

#[cfg(not(feature = "parallel"))]
fn load_for_build(config: &BuildConfig) -> Result<Vec<LoadedVehicle>, BuildError> {
    load_vehicles(&config.input_dir)
}

/// Run a full build: load, flatten, write.
///
/// Any malformed vehicle aborts the build before the output file is touched,
/// so a previous good artifact is never replaced by a partial one.
pub fn run_build(config: &BuildConfig) -> Result<BuildSummary, BuildError> {
    let vehicles = load_for_build(config)?;
    if vehicles.is_empty() {
        tracing::warn!(
            input = %config.input_dir.display(),
            "no vehicle files found; writing empty index"
        );
    }

    let index = build_index_from_loaded(&vehicles)?;
    let bytes = serialize_index(&index, config.pretty)?;

    if let Some(parent) = config.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(&config.output_path, &bytes).map_err(|source| BuildError::Io {
        path: config.output_path.clone(),
        source,
    })?;

    let summary = BuildSummary::new(&config.output_path, vehicles.len(), &index, &bytes);
    tracing::info!(
        output = %summary.output_path.display(),
        vehicles = summary.vehicles,
        issues = summary.issues,
        torque_specs = summary.torque_specs,
        guides = summary.guides,
        suppliers = summary.suppliers,
        bytes = summary.bytes,
        checksum = format_args!("{:08x}", summary.checksum),
        "search index built"
    );
    Ok(summary)
}
