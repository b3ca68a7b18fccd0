//! Prepositional-phrase entity extraction
//!
//! Splits a message into `<preposition> <phrase>` spans: "at Swiggy via
//! UPI" yields `(at, "Swiggy")` and `(via, "UPI")`. Phrases run up to the
//! next preposition that follows whitespace, or to the end of the message,
//! and never span a line break.

use crate::patterns::preposition_re;

/// Prepositions that introduce an entity phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preposition {
    At,
    From,
    To,
    Via,
    Through,
    With,
}

impl Preposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::At => "at",
            Self::From => "from",
            Self::To => "to",
            Self::Via => "via",
            Self::Through => "through",
            Self::With => "with",
        }
    }

    /// at / to / from point at a counterparty, the rest at a payment rail.
    pub fn marks_merchant(&self) -> bool {
        matches!(self, Self::At | Self::To | Self::From)
    }

    pub fn marks_channel(&self) -> bool {
        !self.marks_merchant()
    }
}

impl std::str::FromStr for Preposition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "at" => Ok(Self::At),
            "from" => Ok(Self::From),
            "to" => Ok(Self::To),
            "via" => Ok(Self::Via),
            "through" => Ok(Self::Through),
            "with" => Ok(Self::With),
            _ => Err(format!("Unknown preposition: {}", s)),
        }
    }
}

/// One `(preposition, phrase)` span; the phrase borrows from the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity<'a> {
    pub preposition: Preposition,
    pub phrase: &'a str,
}

/// Entity spans of one message, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities<'a> {
    items: Vec<Entity<'a>>,
}

impl<'a> Entities<'a> {
    pub fn all(&self) -> &[Entity<'a>] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Phrases after at / to / from, first one is the primary candidate
    pub fn merchant_candidates(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.items
            .iter()
            .filter(|e| e.preposition.marks_merchant())
            .map(|e| e.phrase)
    }

    /// First phrase after via / through / with
    pub fn channel_candidate(&self) -> Option<&'a str> {
        self.items
            .iter()
            .find(|e| e.preposition.marks_channel())
            .map(|e| e.phrase)
    }
}

/// Scan `text` for non-overlapping preposition phrases.
pub fn extract_entities(text: &str) -> Entities<'_> {
    let re = preposition_re();
    let mut items = Vec::new();
    let mut pos = 0;

    while let Some(m) = re.find_at(text, pos) {
        let after = &text[m.end()..];
        let phrase_start = m.end() + (after.len() - after.trim_start().len());

        // Needs whitespace, then at least one character of phrase
        if phrase_start == m.end() || phrase_start == text.len() {
            pos = m.end();
            continue;
        }

        match phrase_end(text, phrase_start) {
            Some(end) => {
                if let Ok(preposition) = m.as_str().parse::<Preposition>() {
                    items.push(Entity {
                        preposition,
                        phrase: &text[phrase_start..end],
                    });
                }
                pos = end;
            }
            // Later prepositions inside the unfinished phrase may still start one
            None => pos = m.end(),
        }
    }

    Entities { items }
}

/// Byte offset where the phrase starting at `start` stops, trailing
/// whitespace excluded: before the next preposition preceded by whitespace,
/// else at the end of the message. Never before the phrase's first char.
///
/// `None` when the phrase would have to cross a line break to get there.
fn phrase_end(text: &str, start: usize) -> Option<usize> {
    let first_len = text[start..].chars().next().map_or(0, char::len_utf8);
    let mut search = start + first_len;

    let mut stop = text.len();
    while let Some(next) = preposition_re().find_at(text, search) {
        if text[..next.start()].ends_with(char::is_whitespace) {
            stop = next.start();
            break;
        }
        search = next.end();
    }

    let end = text[..stop].trim_end().len();
    if text[start..end].contains('\n') {
        return None;
    }
    Some(end)
}
