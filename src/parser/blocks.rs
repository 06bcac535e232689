use std::sync::LazyLock;

use regex::Regex;

static ITEM_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)\-]\s+").unwrap());
static SECTION_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:MEDICAMENTOS?|RECOMENDAÇ(?:ÕES|ÃO)|OBSERVAÇ(?:ÕES|ÃO))\b").unwrap()
});
static NOTES_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:RECOMENDAÇ(?:ÕES|ÃO)|OBSERVAÇ(?:ÕES|ÃO))\b").unwrap());

/// Lines of one numbered medication item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The numbered line that opened the item, e.g. `"1. Amoxicilina 500mg"`.
    pub header: String,
    pub body: Vec<String>,
}

impl Block {
    fn open(header: &str) -> Self {
        Block {
            header: header.to_string(),
            body: Vec::new(),
        }
    }
}

#[derive(Debug)]
enum GroupState {
    NoBlock,
    InBlock(Block),
}

pub fn is_item_marker(line: &str) -> bool {
    ITEM_MARKER_RE.is_match(line)
}

/// Group filtered lines into one block per numbered item, in source order.
/// Lines before the first numbered item have nothing to attach to and are dropped.
pub fn group_blocks(lines: &[String]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = GroupState::NoBlock;

    for line in lines {
        if is_item_marker(line) {
            let next = GroupState::InBlock(Block::open(line));
            if let GroupState::InBlock(done) = std::mem::replace(&mut state, next) {
                blocks.push(done);
            }
            continue;
        }

        match &mut state {
            GroupState::InBlock(current) => {
                // Generic section headers are noise; notes headers mark where
                // the recommendations start.
                if !SECTION_HEADER_RE.is_match(line) || NOTES_HEADER_RE.is_match(line) {
                    current.body.push(line.clone());
                }
            }
            GroupState::NoBlock => {}
        }
    }

    if let GroupState::InBlock(last) = state {
        blocks.push(last);
    }

    blocks
}

// ── Tests ──
