pub mod blocks;
pub mod dedup;
pub mod extract;
pub mod kind;
pub mod normalize;
pub mod rules;

use serde::Serialize;
use tracing::debug;

use crate::model::MedicationRecord;
use dedup::DedupScope;
use kind::PrescriptionType;

/// Medications and category extracted from one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Prescription {
    pub kind: PrescriptionType,
    pub pages: usize,
    pub medications: Vec<MedicationRecord>,
}

/// Per-page pipeline: text → lines → blocks → records, deduplicated within `scope`.
pub fn process_page(raw: &str, scope: &mut DedupScope) -> Vec<MedicationRecord> {
    let text = normalize::normalize(raw);
    let lines = rules::filter_lines(&text);
    let blocks = blocks::group_blocks(&lines);

    let mut records = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let Some(record) = extract::extract(block) else {
            continue;
        };
        if scope.admit(&record) {
            records.push(record);
        } else {
            debug!(name = %record.name, "dropped duplicate copy");
        }
    }
    records
}

/// Run every page with its own dedup scope and classify the whole text.
pub fn process_document<S: AsRef<str>>(pages: &[S]) -> Prescription {
    let full_text = pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    let medications = pages
        .iter()
        .flat_map(|page| process_page(page.as_ref(), &mut DedupScope::new()))
        .collect();

    Prescription {
        kind: kind::classify(&full_text),
        pages: pages.len(),
        medications,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::INSTRUCTIONS_PLACEHOLDER;

    fn page(text: &str) -> Vec<MedicationRecord> {
        process_page(text, &mut DedupScope::new())
    }

    fn names(records: &[MedicationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn empty_page() {
        assert!(page("").is_empty());
        assert!(page("  \n\t\r\n ").is_empty());
    }

    #[test]
    fn basic_block() {
        let records = page(
            "1. Amoxicilina 500mg | Oral\nTomar 1 comprimido a cada 8 horas\nObs: Tomar com alimentos",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Amoxicilina 500mg");
        assert_eq!(records[0].instructions, "Tomar 1 comprimido a cada 8 horas");
        assert_eq!(records[0].recommendations, "Tomar com alimentos");
    }

    #[test]
    fn signature_line_has_no_influence() {
        let with_sig = page(
            "1. Losartana 50mg\nTomar 1 vez ao dia\nDra. Maria Silva (CRM-GO 12345)",
        );
        let without = page("1. Losartana 50mg\nTomar 1 vez ao dia");
        assert_eq!(with_sig, without);
        assert!(with_sig
            .iter()
            .all(|r| !r.instructions.contains("Maria") && !r.recommendations.contains("CRM")));
    }

    #[test]
    fn two_copies_on_one_page() {
        let copy = "1ª Via\n1. Dipirona 500mg\nTomar se dor ou febre\n2. Omeprazol 20mg\nEm jejum\n";
        let records = page(&format!("{}{}", copy, copy.replace("1ª", "2ª")));
        assert_eq!(names(&records), vec!["Dipirona 500mg", "Omeprazol 20mg"]);
    }

    #[test]
    fn same_medication_on_two_pages_kept() {
        let p = "1. Dipirona 500mg\nTomar se dor";
        let rx = process_document(&[p, p]);
        assert_eq!(rx.pages, 2);
        assert_eq!(names(&rx.medications), vec!["Dipirona 500mg", "Dipirona 500mg"]);
    }

    #[test]
    fn pagination_suffix_stripped() {
        let records = page("1. Dipirona 500mg\nTomar se dor.1 / 2");
        assert_eq!(records[0].instructions, "Tomar se dor");
    }

    #[test]
    fn block_without_body() {
        let records = page("1. Paracetamol 750mg\n2. Ibuprofeno 600mg\nTomar 8/8h");
        assert_eq!(records[0].instructions, INSTRUCTIONS_PLACEHOLDER);
        assert_eq!(records[1].instructions, "Tomar 8/8h");
    }

    #[test]
    fn order_follows_markers() {
        let records = page("3. Losartana 50mg\nManhã\n1. Dipirona 500mg\nSe dor\n2. Omeprazol 20mg\nJejum");
        assert_eq!(
            names(&records),
            vec!["Losartana 50mg", "Dipirona 500mg", "Omeprazol 20mg"]
        );
    }

    #[test]
    fn document_kind_from_all_pages() {
        let rx = process_document(&["1. Dipirona 500mg\nSe dor", "RECEITUÁRIO ESPECIAL"]);
        assert_eq!(rx.kind, PrescriptionType::Especial);
        assert_eq!(rx.medications.len(), 1);
    }

    #[test]
    fn names_satisfy_invariants() {
        let text = "1. AB\n2. Paciente: Fulano\n3. Cidade: Catalão\n4. Sertralina 50mg\nTomar à noite";
        let records = page(text);
        assert_eq!(names(&records), vec!["Sertralina 50mg"]);
        assert!(records.iter().all(|r| r.name.chars().count() >= 3));
    }

    #[test]
    fn esus_fixture() {
        let text = std::fs::read_to_string("tests/fixtures/esus_simples.txt").unwrap();
        let rx = process_document(&text.split('\x0c').collect::<Vec<_>>());
        assert_eq!(rx.kind, PrescriptionType::Comum);
        assert_eq!(
            names(&rx.medications),
            vec!["Amoxicilina 500mg", "Dipirona Sódica 500mg", "Omeprazol 20mg"]
        );
        let amox = &rx.medications[0];
        assert_eq!(amox.instructions, "Tomar 1 cápsula de 8 em 8 horas por 7 dias");
        assert_eq!(amox.recommendations, "Tomar até o fim do tratamento");
        for r in &rx.medications {
            assert!(!r.instructions.contains("EMITENTE"));
            assert!(!r.instructions.contains("CRM"));
            assert!(!r.instructions.contains("Rua"));
        }
    }

    #[test]
    fn controlled_two_page_fixture() {
        let text = std::fs::read_to_string("tests/fixtures/esus_controlado.txt").unwrap();
        let pages: Vec<&str> = text.split('\x0c').collect();
        let rx = process_document(&pages);
        assert_eq!(rx.pages, 2);
        assert_eq!(rx.kind, PrescriptionType::Especial);
        assert_eq!(
            names(&rx.medications),
            vec!["Clonazepam 2mg", "Sertralina 50mg", "Clonazepam 2mg"]
        );
    }
}
