//! tasas-import - bulk loader for the university fee dataset
//!
//! Reads the JSON document (`{"unis": [...]}`), validates and normalizes
//! every university record, resolves its logo from the `uni_<code>.jpg`
//! naming convention and upserts rows into `universities` and `fees`.
//!
//! One bad record never aborts the batch: validation failures are logged
//! and the driver moves on. Only a missing input file, invalid JSON, a
//! document without a `unis` list or a broken database stop the run.

pub mod batch;
pub mod error;
pub mod fees;
pub mod logo;
pub mod normalize;
pub mod university;

use std::path::PathBuf;

use tasas_common::YearWindow;

pub use batch::{import_file, run, ImportSummary};
pub use error::{ImportError, Result};
pub use fees::{upsert_fees, FeeReport};
pub use logo::short_code_without_center;
pub use normalize::parse_number;
pub use university::{upsert_university, UpsertOutcome};

/// Settings for one import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Directory holding the source `uni_<code>.jpg` logos
    pub logo_dir: PathBuf,
    /// Media folder logos are copied into
    pub media_dir: PathBuf,
    /// Re-save universities that already exist (and re-import their fees)
    pub overwrite: bool,
    /// Academic years looked up in every record
    pub window: YearWindow,
}
