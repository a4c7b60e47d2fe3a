// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel loading of vehicle files.
//!
//! Each vehicle is its own JSON file, and parsing them is embarrassingly
//! parallel. Rayon's `par_iter()` preserves input order on `collect()`, and
//! the file list is sorted up front, so the loaded order (and therefore the
//! index byte layout) doesn't depend on directory iteration order or thread
//! scheduling.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::BuildError;

use super::document::{LoadedVehicle, VehicleRecord};

/// List `*.json` files directly inside `dir`, sorted by file name.
pub fn list_vehicle_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let io_err = |source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse one vehicle file.
pub fn load_vehicle(path: &Path) -> Result<LoadedVehicle, BuildError> {
    let content = fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record: VehicleRecord =
        serde_json::from_str(&content).map_err(|source| BuildError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let origin = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(LoadedVehicle { origin, record })
}

/// Load every vehicle file in `dir`. The first failure aborts the load.
#[cfg(feature = "parallel")]
pub fn load_vehicles(dir: &Path) -> Result<Vec<LoadedVehicle>, BuildError> {
    list_vehicle_files(dir)?
        .par_iter()
        .map(|path| load_vehicle(path))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn load_vehicles(dir: &Path) -> Result<Vec<LoadedVehicle>, BuildError> {
    list_vehicle_files(dir)?
        .iter()
        .map(|path| load_vehicle(path))
        .collect()
}

/// Load every vehicle file in `dir`, ticking `progress` per file.
#[cfg(feature = "parallel")]
pub fn load_vehicles_with_progress(
    dir: &Path,
    progress: &ProgressBar,
) -> Result<Vec<LoadedVehicle>, BuildError> {
    let files = list_vehicle_files(dir)?;
    let total = files.len();
    progress.set_length(total as u64);
    let counter = AtomicUsize::new(0);

    files
        .par_iter()
        .map(|path| {
            let vehicle = load_vehicle(path)?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            Ok(vehicle)
        })
        .collect()
}
