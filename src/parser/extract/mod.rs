pub mod clean;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::blocks::Block;
use crate::model::MedicationRecord;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)\-]\s*").unwrap());
static ROUTE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\|\s*(?:Oral|Uso.*)$").unwrap());
static QUANTITY_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+\d+\s+(?:comprimidos?|c[áa]psulas?)[\s\w]*$").unwrap()
});
static FORM_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+Comprimido$").unwrap());
static NAME_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Paciente|Cidade|Estado").unwrap());
static NOTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Recomenda[çc](?:[õo]es|[ãa]o)|Obs|Observa[çc](?:[õo]es|[ãa]o)|Aten[çc][ãa]o|Importante)\b\.?\s*:?\s*(.+)",
    )
    .unwrap()
});

const MIN_NAME_CHARS: usize = 3;

/// Medication name from a block header, without the item number and the
/// route/packaging suffixes. `None` when what remains is not a plausible name.
pub fn extract_name(header: &str) -> Option<String> {
    let name = MARKER_RE.replace(header.trim(), "");
    let name = ROUTE_SUFFIX_RE.replace(&name, "");
    let name = QUANTITY_SUFFIX_RE.replace(&name, "");
    let name = FORM_SUFFIX_RE.replace(&name, "");
    let name = name.trim();

    if name.chars().count() < MIN_NAME_CHARS {
        debug!(header, "rejected block: name too short");
        return None;
    }
    if NAME_NOISE_RE.is_match(name) {
        debug!(header, "rejected block: patient/location noise");
        return None;
    }
    Some(name.to_string())
}

/// Split a block body into (instructions, recommendations). The first notes
/// label and everything after it become the recommendations.
pub fn split_notes(body: &[String]) -> (String, String) {
    let mut remainder = body.join(" ");
    let Some(caps) = NOTES_RE.captures(&remainder) else {
        return (remainder, String::new());
    };

    let recommendations = caps[1].trim().to_string();
    let range = caps.get(0).map(|m| m.range()).unwrap_or_default();
    remainder.replace_range(range, "");
    (remainder.trim().to_string(), recommendations)
}

/// Turn one block into a record, or `None` if the block has no usable name.
pub fn extract(block: &Block) -> Option<MedicationRecord> {
    let name = extract_name(&block.header)?;
    let (instructions, recommendations) = split_notes(&block.body);
    Some(MedicationRecord::new(
        &name,
        &clean::clean(&instructions),
        &clean::clean(&recommendations),
    ))
}

// ── Tests ──
