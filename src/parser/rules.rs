use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Delete the matched text and keep the rest of the line.
    Truncate,
    /// Drop the whole line.
    Discard,
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub action: Action,
    pub re: Regex,
}

impl Rule {
    fn new(name: &'static str, action: Action, pattern: &str) -> Self {
        Rule {
            name,
            action,
            re: Regex::new(pattern).unwrap(),
        }
    }
}

/// Ordered line-filter catalog. All truncate rules come before any discard
/// rule, so a line is never dropped for text that was already cut away.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use Action::*;
    vec![
        // ── Truncate ──
        Rule::new("emitente", Truncate, r"(?i)EMITENTE.*$"),
        Rule::new("pagination_code", Truncate, r"\.?\s*\d+\s*/\s*\d+\s*$"),
        Rule::new("printed_at", Truncate, r"(?i)Impresso\s+em.*$"),
        Rule::new("citizen", Truncate, r"(?i)CIDADÃO.*$"),
        // ── Discard ──
        Rule::new("via_marker", Discard, r"(?i)[12][ªa]\s*Via"),
        Rule::new("create_pdf", Discard, r"(?i)CreatePDF"),
        Rule::new("digital_signature", Discard, r"(?i)Assinado\s+digitalmente"),
        Rule::new("crm_reference", Discard, r"(?i)\(CRM.*\)"),
        Rule::new("crm", Discard, r"(?i)CRM"),
        Rule::new("doctor_prefix", Discard, r"(?i)^Dra?\.?\s+"),
        Rule::new(
            "personal_name",
            Discard,
            r"^[A-ZÀ-Ú][a-zà-ú]+(?:\s+[A-ZÀ-Ú][a-zà-ú]+){2,}$",
        ),
        Rule::new("page_residue", Discard, r"(?i)Página\s+\d+"),
        Rule::new("electronic_header", Discard, r"(?i)PRESCRIÇÃO\s+ELETRÔNICA"),
        Rule::new(
            "form_header",
            Discard,
            r"(?i)RECEITU[ÁA]RIO.*(?:SIMPLES|ESPECIAL|CONTROLADO|VIA)",
        ),
        Rule::new("patient_guidance_header", Discard, r"(?i)ORIENTAÇ[ÃÂ]O\s+AO\s+PACIENTE"),
        Rule::new(
            "physician_role",
            Discard,
            r"(?i)Médico\s+da\s+estratégia\s+de\s+saúde",
        ),
        Rule::new("issue_date", Discard, r"(?i)Data\s+de\s+emiss"),
        Rule::new(
            "dateline",
            Discard,
            r"^\p{Lu}[\p{L} ]*?\s*-\s*[A-Z]{2},\s*\d{1,2}\s+de\s+\p{Ll}+\s+de\s+\d{4}",
        ),
        Rule::new(
            "street_address",
            Discard,
            r"(?i)\b(?:Rua|Av\.|Avenida|Alameda|Travessa|Praça)\s+",
        ),
        Rule::new("postal_code", Discard, r"CEP:?\s*\d{5}"),
    ]
});

/// Outcome of running one line through the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Keep(String),
    /// Nothing was left after truncation.
    Blank,
    /// Dropped by the named rule.
    Drop(&'static str),
}

pub fn apply_rules(line: &str) -> Verdict {
    let mut line = line.to_string();

    for rule in RULES.iter().filter(|r| r.action == Action::Truncate) {
        if let Some(m) = rule.re.find(&line) {
            line.truncate(m.start());
        }
    }

    let line = line.trim();
    if line.is_empty() {
        return Verdict::Blank;
    }

    match RULES
        .iter()
        .filter(|r| r.action == Action::Discard)
        .find(|r| r.re.is_match(line))
    {
        Some(rule) => Verdict::Drop(rule.name),
        None => Verdict::Keep(line.to_string()),
    }
}

/// Split normalized text into lines and keep the survivors, in order.
pub fn filter_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|raw| match apply_rules(raw) {
            Verdict::Keep(line) => Some(line),
            Verdict::Blank => None,
            Verdict::Drop(rule) => {
                debug!(rule, line = raw.trim(), "discarded line");
                None
            }
        })
        .collect()
}

// ── Tests ──
