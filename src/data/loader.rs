use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;

use super::model::{age_bucket, Dataset, Record};

/// Default data file, resolved against the process working directory.
pub const DATA_FILE: &str = "Mental_Health_and_Social_Media_Balance_Dataset.csv";

/// Column headers the CSV must carry, in no particular order.
const REQUIRED_COLUMNS: [&str; 8] = [
    "Age",
    "Gender",
    "Social_Media_Platform",
    "Daily_Screen_Time(hrs)",
    "Sleep_Quality(1-10)",
    "Stress_Level(1-10)",
    "Happiness_Index(1-10)",
    "Exercise_Frequency(week)",
];

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Terminal load failures. Either way the session renders nothing but the
/// error message; per-chart degradation is handled downstream.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data file does not exist.
    #[error("data file not found: {path}")]
    DataUnavailable { path: PathBuf },

    /// The file exists but could not be read or does not match the schema.
    #[error("invalid data in {path}: {message}")]
    DataInvalid { path: PathBuf, message: String },
}

impl LoadError {
    fn invalid(path: &Path, message: impl Into<String>) -> Self {
        LoadError::DataInvalid {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read the survey CSV at `path` into a [`Dataset`], deriving the age
/// bucket for every row. The file handle is released before returning.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::DataUnavailable {
            path: path.to_path_buf(),
        });
    }

    let mut reader =
        csv::Reader::from_path(path).map_err(|e| LoadError::invalid(path, e.to_string()))?;

    // Validate the schema up front so a missing column reads as one clear
    // error instead of a per-row deserialization failure.
    let headers = reader
        .headers()
        .map_err(|e| LoadError::invalid(path, e.to_string()))?;
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::invalid(
                path,
                format!("missing required column '{required}'"),
            ));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let mut rec =
            result.map_err(|e| LoadError::invalid(path, format!("row {row_no}: {e}")))?;
        rec.age_range = age_bucket(rec.age).ok_or_else(|| {
            LoadError::invalid(
                path,
                format!("row {row_no}: age {} outside 10..=100", rec.age),
            )
        })?;
        records.push(rec);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Session-wide memoization
// ---------------------------------------------------------------------------

fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<Dataset>>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Dataset>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Memoized [`load_dataset`]: the first successful load per path is kept
/// for the lifetime of the process and repeated calls return the cached
/// table without touching the filesystem. Failures are not cached.
pub fn load_dataset_cached(path: &Path) -> Result<Arc<Dataset>, LoadError> {
    let mut guard = cache().lock().unwrap_or_else(|poisoned| {
        // The cache holds only immutable Arcs; a poisoned lock is still usable.
        poisoned.into_inner()
    });
    if let Some(dataset) = guard.get(path) {
        return Ok(Arc::clone(dataset));
    }
    let dataset = Arc::new(load_dataset(path)?);
    guard.insert(path.to_path_buf(), Arc::clone(&dataset));
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Age,Gender,Social_Media_Platform,Daily_Screen_Time(hrs),\
Sleep_Quality(1-10),Stress_Level(1-10),Happiness_Index(1-10),Exercise_Frequency(week)";

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        write!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::DataUnavailable { .. }));
    }

    #[test]
    fn valid_csv_loads_with_derived_buckets() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "ok.csv",
            "18,Female,Instagram,4.5,7,5,8,3\n33,Male,TikTok,2.0,6,4,4,1\n60,Female,Facebook,1.5,8,3,6,2\n",
        );
        let ds = load_dataset(&path).unwrap();
        assert!(!ds.is_empty());
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].age_range, "15-20");
        assert_eq!(ds.records[1].age_range, "31-35");
        assert_eq!(ds.records[2].age_range, "50+");
        assert_eq!(ds.platforms.len(), 3);
        assert_eq!(ds.genders.len(), 2);
    }

    #[test]
    fn missing_column_is_data_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        // No Happiness_Index column.
        writeln!(
            file,
            "Age,Gender,Social_Media_Platform,Daily_Screen_Time(hrs),\
Sleep_Quality(1-10),Stress_Level(1-10),Exercise_Frequency(week)"
        )
        .unwrap();
        writeln!(file, "18,Female,Instagram,4.5,7,5,3").unwrap();
        drop(file);

        let err = load_dataset(&path).unwrap_err();
        match err {
            LoadError::DataInvalid { message, .. } => {
                assert!(message.contains("Happiness_Index(1-10)"), "{message}");
            }
            other => panic!("expected DataInvalid, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_cell_is_data_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "bad.csv", "18,Female,Instagram,lots,7,5,8,3\n");
        assert!(matches!(
            load_dataset(&path).unwrap_err(),
            LoadError::DataInvalid { .. }
        ));
    }

    #[test]
    fn out_of_domain_age_is_data_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "age.csv", "7,Female,Instagram,4.5,7,5,8,3\n");
        match load_dataset(&path).unwrap_err() {
            LoadError::DataInvalid { message, .. } => assert!(message.contains("age"), "{message}"),
            other => panic!("expected DataInvalid, got {other:?}"),
        }
    }

    #[test]
    fn cached_load_returns_the_same_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "cached.csv", "22,Male,X,3.0,7,5,6,2\n");
        let first = load_dataset_cached(&path).unwrap();
        // Deleting the file proves the second call never re-reads it.
        std::fs::remove_file(&path).unwrap();
        let second = load_dataset_cached(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
