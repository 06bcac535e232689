use std::collections::HashSet;

use sha2::{Digest, Sha256};

use super::extract::clean::collapse_whitespace;
use crate::model::MedicationRecord;

/// Content hashes seen on one page. Build a fresh scope per page: the two
/// printed copies of a page collapse into one, while identical medications
/// on different pages are separate prescriptions and must all be kept.
#[derive(Debug, Default)]
pub struct DedupScope {
    seen: HashSet<[u8; 32]>,
}

impl DedupScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a record's content is seen in this scope.
    pub fn admit(&mut self, record: &MedicationRecord) -> bool {
        self.seen.insert(content_key(record))
    }
}

fn content_key(record: &MedicationRecord) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(collapse_whitespace(&record.name).to_lowercase());
    hasher.update(b"\n");
    hasher.update(collapse_whitespace(&record.instructions).to_lowercase());
    let mut key = [0u8; 32];
    key.copy_from_slice(&hasher.finalize());
    key
}
