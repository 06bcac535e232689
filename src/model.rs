use serde::Serialize;

/// Shown when a medication block carries no usable dosage text.
pub const INSTRUCTIONS_PLACEHOLDER: &str = "Verificar posologia na receita original";

/// One medication as printed on the prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationRecord {
    pub name: String,
    pub instructions: String,
    pub recommendations: String,
    /// Reserved; the extractor never fills it.
    pub duration: String,
    /// Reserved; the extractor never fills it.
    pub quantity: String,
}

impl MedicationRecord {
    pub fn new(name: &str, instructions: &str, recommendations: &str) -> Self {
        let instructions = if instructions.is_empty() {
            INSTRUCTIONS_PLACEHOLDER
        } else {
            instructions
        };
        MedicationRecord {
            name: name.to_string(),
            instructions: instructions.to_string(),
            recommendations: recommendations.to_string(),
            duration: String::new(),
            quantity: String::new(),
        }
    }
}
