use serde::Serialize;

/// Color and fill pattern that tells medications apart on the printed sheet,
/// also for readers who cannot rely on color alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub pattern: &'static str,
}

const fn swatch(r: u8, g: u8, b: u8, pattern: &'static str) -> Swatch {
    Swatch { r, g, b, pattern }
}

pub const PALETTE: [Swatch; 12] = [
    swatch(59, 130, 246, "horizontal"),
    swatch(239, 68, 68, "vertical"),
    swatch(16, 185, 129, "diagonal"),
    swatch(245, 158, 11, "pontos"),
    swatch(139, 92, 246, "grade"),
    swatch(236, 72, 153, "ondas"),
    swatch(6, 182, 212, "xis"),
    swatch(251, 146, 60, "quadrados"),
    swatch(163, 230, 53, "triangulos"),
    swatch(251, 113, 133, "zigzag"),
    swatch(148, 163, 184, "tijolos"),
    swatch(129, 140, 248, "losangos"),
];

pub fn swatch_for(position: usize) -> Swatch {
    PALETTE[position % PALETTE.len()]
}

impl Swatch {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_every_twelve() {
        assert_eq!(swatch_for(0), swatch_for(12));
        assert_eq!(swatch_for(11).pattern, "losangos");
        assert_eq!(swatch_for(13).pattern, "vertical");
    }

    #[test]
    fn patterns_unique() {
        let mut patterns: Vec<_> = PALETTE.iter().map(|s| s.pattern).collect();
        patterns.sort();
        patterns.dedup();
        assert_eq!(patterns.len(), 12);
    }

    #[test]
    fn hex() {
        assert_eq!(swatch_for(0).hex(), "#3b82f6");
    }
}
