pub mod narration;
pub mod palette;
pub mod schedule;

use serde::Serialize;

use crate::lookup::Lookup;
use crate::model::MedicationRecord;
use palette::Swatch;
use schedule::{DailySlots, DoseHint};

/// A record plus everything the patient-facing sheet shows next to it.
#[derive(Debug, Clone, Serialize)]
pub struct Enriched {
    #[serde(flatten)]
    pub record: MedicationRecord,
    pub emoji: String,
    pub purpose: String,
    pub video_url: Option<String>,
    pub hint: DoseHint,
    pub slots: DailySlots,
    pub swatch: Swatch,
}

/// Decorate records in order; the swatch follows the record's position in
/// the final list, not within its page.
pub fn enrich(records: &[MedicationRecord], lookup: &Lookup) -> Vec<Enriched> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let pictogram = lookup.pictogram(&record.name);
            Enriched {
                emoji: pictogram.emoji,
                purpose: pictogram.purpose,
                video_url: lookup.video(&record.name),
                hint: schedule::dose_hint(&record.instructions),
                slots: schedule::daily_slots(&record.instructions),
                swatch: palette::swatch_for(i),
                record: record.clone(),
            }
        })
        .collect()
}

/// Names to send for interaction analysis. A single medication has nothing
/// to interact with, so there is no request.
pub fn interaction_names(records: &[MedicationRecord]) -> Option<Vec<String>> {
    if records.len() > 1 {
        Some(records.iter().map(|r| r.name.clone()).collect())
    } else {
        None
    }
}
