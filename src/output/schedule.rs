use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EVERY_HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)a cada (\d+)\s?horas?").unwrap());
static TIMES_A_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*vez(?:es)?\s*(?:ao|por)\s*dia").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    Turno,
    Frequencia,
    Dose,
}

/// Badge shown next to a medication's instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoseHint {
    pub kind: HintKind,
    pub label: String,
}

pub fn dose_hint(instructions: &str) -> DoseHint {
    let text = instructions.to_lowercase();
    let hint = |kind, label: String| DoseHint { kind, label };

    if text.contains("pela noite") || text.contains("ao deitar") {
        return hint(HintKind::Turno, "Noite".into());
    }
    if text.contains("pela manhã") || text.contains("em jejum") {
        return hint(HintKind::Turno, "Manhã".into());
    }
    if let Some(caps) = EVERY_HOURS_RE.captures(&text) {
        return hint(HintKind::Frequencia, format!("A cada {}h", &caps[1]));
    }
    if let Some(caps) = TIMES_A_DAY_RE.captures(&text) {
        return hint(HintKind::Frequencia, format!("{}x ao dia", &caps[1]));
    }
    hint(HintKind::Dose, "Ver receita".into())
}

/// Which of the four daily columns of the printed timetable get a mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailySlots {
    pub morning: bool,
    pub lunch: bool,
    pub afternoon: bool,
    pub night: bool,
}

impl DailySlots {
    const ALL: DailySlots = DailySlots {
        morning: true,
        lunch: true,
        afternoon: true,
        night: true,
    };
}

/// Timetable marks inferred from free-text instructions.
///
/// "N vezes ao dia" fills slots first; an "a cada N horas" interval then
/// replaces them outright, and morning/night words only ever add a mark.
pub fn daily_slots(instructions: &str) -> DailySlots {
    let text = instructions.to_lowercase();
    let mut slots = DailySlots::default();

    if let Some(times) = capture_number(&TIMES_A_DAY_RE, &text) {
        slots.morning = times >= 1;
        slots.night = times >= 2;
        slots.afternoon = times >= 3;
        slots.lunch = times >= 4;
    }

    if let Some(hours) = capture_number(&EVERY_HOURS_RE, &text) {
        slots = match hours {
            0..=6 => DailySlots::ALL,
            7..=8 => DailySlots {
                lunch: false,
                ..DailySlots::ALL
            },
            9..=12 => DailySlots {
                morning: true,
                night: true,
                ..DailySlots::default()
            },
            _ => slots,
        };
    }

    if text.contains("manh") || text.contains("jejum") {
        slots.morning = true;
    }
    if text.contains("noite") || text.contains("deitar") {
        slots.night = true;
    }
    slots
}

fn capture_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?[1].parse().ok()
}
