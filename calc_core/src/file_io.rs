//! # File I/O Module
//!
//! Worksheet and input-record file operations:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//! - **Input records**: Load a single calculator input from a JSON file
//!
//! ## File Format
//!
//! Worksheets are saved as `.hexc` files containing pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{load_worksheet, save_worksheet};
//! use calc_core::worksheet::Worksheet;
//! use std::path::Path;
//!
//! let ws = Worksheet::new("Engineer", "25-001", "Client");
//! let path = Path::new("lift.hexc");
//! save_worksheet(&ws, path)?;
//!
//! let loaded = load_worksheet(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::errors::{CalcError, CalcResult};
use crate::worksheet::{Worksheet, SCHEMA_VERSION};

/// Worksheet file extension
pub const WORKSHEET_EXTENSION: &str = "hexc";

fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Save a worksheet to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize worksheet to JSON
/// 2. Write to a temporary file (.hexc.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_worksheet(worksheet: &Worksheet, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(worksheet).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension(format!("{WORKSHEET_EXTENSION}.tmp"));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    // A failed write or sync must not leave a partial .tmp behind
    let discard = |operation: &str, e: std::io::Error| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error(operation, tmp_path.display().to_string(), e.to_string())
    };

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| discard("write temp file", e))?;

    tmp_file.sync_all().map_err(|e| discard("sync temp file", e))?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), "worksheet saved");
    Ok(())
}

/// Load a worksheet from a file.
///
/// # Returns
///
/// * `Ok(Worksheet)` - Successfully loaded worksheet
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_worksheet(path: &Path) -> CalcResult<Worksheet> {
    let contents = read_to_string(path)?;

    let worksheet: Worksheet = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&worksheet.meta.version)?;

    info!(path = %path.display(), job_id = %worksheet.meta.job_id, "worksheet loaded");
    Ok(worksheet)
}

/// Load a single input record (e.g. a `BeamInput`) from a JSON file.
///
/// ```rust,no_run
/// use calc_core::calculations::BeamInput;
/// use calc_core::file_io::load_input;
/// use std::path::Path;
///
/// let beam: BeamInput = load_input(Path::new("beam.json"))?;
/// # Ok::<(), calc_core::errors::CalcError>(())
/// ```
pub fn load_input<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor than ours is rejected
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::BeamInput;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.hexc");

        let mut ws = Worksheet::new("Test Engineer", "TEST-001", "Test Client");
        ws.bolt_shear.edit(|b| b.x_ft = 10.0);
        save_worksheet(&ws, &path).unwrap();

        let loaded = load_worksheet(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.bolt_shear.input().x_ft, 10.0);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atomic.hexc");
        let tmp_path = path.with_extension("hexc.tmp");

        save_worksheet(&Worksheet::default(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());
    }

    #[test]
    fn test_failed_save_removes_tmp_file() {
        let dir = tempdir().unwrap();
        // Renaming a file over a non-empty directory fails
        let path = dir.path().join("occupied.hexc");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = save_worksheet(&Worksheet::default(), &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!path.with_extension("hexc.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_worksheet(&dir.path().join("missing.hexc")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.hexc");
        fs::write(&path, "{ not json").unwrap();
        let err = load_worksheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_newer_version_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.hexc");
        let mut ws = Worksheet::default();
        ws.meta.version = "0.9.0".to_string();
        save_worksheet(&ws, &path).unwrap();

        let err = load_worksheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_input_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beam.json");
        fs::write(&path, r#"{ "support_span_in": 40.0, "load_position_in": 20.0 }"#).unwrap();

        let beam: BeamInput = load_input(&path).unwrap();
        assert_eq!(beam.support_span_in, 40.0);
        assert_eq!(beam.applied_force_lbf, 0.0);
    }
}
