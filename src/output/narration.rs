use crate::model::MedicationRecord;

pub const INTRO: &str = "Atenção para as instruções da sua receita: ";

/// Text handed to the speech synthesizer: the intro, then one sentence per
/// medication in prescription order.
pub fn narrate<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a MedicationRecord>,
{
    records.into_iter().fold(INTRO.to_string(), |mut text, r| {
        text.push_str(&format!(" {}, tomar {}.", r.name, r.instructions));
        text
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_only() {
        assert_eq!(narrate(&Vec::<MedicationRecord>::new()), INTRO);
    }

    #[test]
    fn sentences_in_order() {
        let records = [
            MedicationRecord::new("Dipirona 500mg", "1 comprimido se dor", ""),
            MedicationRecord::new("Omeprazol 20mg", "1 cápsula em jejum", "x"),
        ];
        assert_eq!(
            narrate(&records),
            "Atenção para as instruções da sua receita:  Dipirona 500mg, tomar 1 comprimido se dor. Omeprazol 20mg, tomar 1 cápsula em jejum."
        );
    }
}
