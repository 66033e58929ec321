//! Fee upsert: one fee row per academic year present in a record

use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use tasas_common::db::{insert_fee, FeeDraft, University};
use tasas_common::{DegreeLevel, FeeType, YearWindow};

use crate::normalize::{parse_number, text_field};

const TIER_KEYS: [&str; 4] = ["tasas1", "tasas2", "tasas3", "tasas4"];

/// Per-university result of [`upsert_fees`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeReport {
    pub created: usize,
    /// Years with no `tasas_<year>` entry
    pub missing: usize,
    /// Years whose entry failed validation or could not be stored
    pub invalid: usize,
}

/// Record key holding the fees of `year`
pub fn fee_key(year: i32) -> String {
    format!("tasas_{}", year)
}

/// Insert a fee row for every year of `window` the record has data for
///
/// Never fails: every problem is logged and the loop moves on to the next
/// year.
pub async fn upsert_fees(
    pool: &SqlitePool,
    record: &Map<String, Value>,
    university: &University,
    window: YearWindow,
) -> FeeReport {
    let mut report = FeeReport::default();

    for year in window.years() {
        let data = match record.get(&fee_key(year)) {
            None | Some(Value::Null) => {
                warn!("Fees for {} not valid for university: {}", year, university.name);
                report.missing += 1;
                continue;
            }
            Some(Value::Object(data)) => data,
            Some(other) => {
                warn!(
                    "Fees for {} not valid for university: {}: expected an object, got {}",
                    year, university.name, other
                );
                report.invalid += 1;
                continue;
            }
        };

        let fee = fee_draft(year, data);

        if let Err(e) = fee.validate() {
            warn!(
                "Fees for {} not valid for university: {}: {:?}",
                year,
                university.name,
                e.messages()
            );
            report.invalid += 1;
            continue;
        }

        match insert_fee(pool, university.id, &fee).await {
            Ok(saved) => {
                debug!("Stored fees for {} at '{}' (id {})", year, university.short_code, saved.id);
                report.created += 1;
            }
            Err(e) => {
                warn!("Could not store fees for {} at university {}: {}", year, university.name, e);
                report.invalid += 1;
            }
        }
    }

    report
}

/// Undergraduate price-per-credit fee row from a `tasas_<year>` object
fn fee_draft(year: i32, data: &Map<String, Value>) -> FeeDraft {
    FeeDraft {
        academic_year: year,
        fee_type: FeeType::PricePerCredit,
        degree_level: DegreeLevel::Undergraduate,
        tiers: TIER_KEYS.map(|key| parse_number(data.get(key))),
        source_url: text_field(data, "url"),
    }
}
