use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ESPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)RECEITU[ÁA]RIO\s+ESPECIAL").unwrap());
static CONTROLADO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)RECEITU[ÁA]RIO\s+(?:CONTROLADO|AZUL|AMARELO)").unwrap());
static ANTIMICROBIANO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ANTIMICROBIANOS?").unwrap());

/// Regulatory category of the prescription form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionType {
    #[default]
    Comum,
    Especial,
    Controlado,
    Antimicrobiano,
}

impl PrescriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrescriptionType::Comum => "comum",
            PrescriptionType::Especial => "especial",
            PrescriptionType::Controlado => "controlado",
            PrescriptionType::Antimicrobiano => "antimicrobiano",
        }
    }
}

impl fmt::Display for PrescriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a whole document (all pages concatenated). First match wins.
pub fn classify(text: &str) -> PrescriptionType {
    if ESPECIAL_RE.is_match(text) {
        PrescriptionType::Especial
    } else if CONTROLADO_RE.is_match(text) {
        PrescriptionType::Controlado
    } else if ANTIMICROBIANO_RE.is_match(text) {
        PrescriptionType::Antimicrobiano
    } else {
        PrescriptionType::Comum
    }
}
