use crate::codepoints::{flatten_ranges, format_codepoint, Codepoint, CodepointRange};
use std::{collections::BTreeSet, fmt};

/// How well a font covers a target codepoint set.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub enum CoverageStatus {
    /// Every target codepoint is present.
    Full,
    /// Some codepoints are missing, but no more than the tolerance allows.
    Tolerated(usize),
    /// More codepoints are missing than the tolerance allows.
    Insufficient(usize),
}
impl CoverageStatus {
    pub fn classify(missing: usize, tolerance: usize) -> Self {
        if missing == 0 {
            CoverageStatus::Full
        } else if missing <= tolerance {
            CoverageStatus::Tolerated(missing)
        } else {
            CoverageStatus::Insufficient(missing)
        }
    }

    pub fn is_acceptable(&self) -> bool {
        !matches!(self, CoverageStatus::Insufficient(_))
    }
}

/// The result of checking a font's codepoints against a target.
#[derive(Clone, Debug)]
pub struct Coverage {
    pub missing: BTreeSet<Codepoint>,
}
impl Coverage {
    pub fn check(font: &BTreeSet<Codepoint>, target: &[CodepointRange]) -> Coverage {
        let target = flatten_ranges(target);
        Coverage { missing: target.difference(font).copied().collect() }
    }

    /// Whether the font contains every target codepoint.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn status(&self, tolerance: usize) -> CoverageStatus {
        CoverageStatus::classify(self.missing.len(), tolerance)
    }

    /// Formats the missing codepoints as `0x0600, 0x0601, ...`.
    pub fn missing_list(&self) -> String {
        let items: Vec<_> = self.missing.iter().map(|x| format_codepoint(*x)).collect();
        items.join(", ")
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageStatus::Full => write!(f, "✅ Full coverage"),
            CoverageStatus::Tolerated(n) => write!(f, "⚠️ Missing {n} codepoints (tolerated)"),
            CoverageStatus::Insufficient(n) => write!(f, "❌ Missing {n} codepoints"),
        }
    }
}
