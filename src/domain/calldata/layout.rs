//! The two candidate encodings of the inner "create agenda" payload.
//!
//! Nothing in the payload says which one was used, so the decoder predicts the
//! exact size each layout would occupy and tries the closer one first.

use alloy_primitives::U256;
use serde::Serialize;

const WORD: usize = 32;

/// Inner payload layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    /// `(address[] targets, uint256 notice, uint256 voting, bool atomic, bytes[] calldatas)`
    A,
    /// Layout A followed by a trailing `string memo`.
    B,
}

impl Layout {
    pub fn head_words(self) -> usize {
        match self {
            Layout::A => 5,
            Layout::B => 6,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Layout::A => Layout::B,
            Layout::B => Layout::A,
        }
    }
}

/// Byte length each layout would occupy given the array lengths found in a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LengthPrediction {
    pub layout_a: Option<usize>,
    pub layout_b: Option<usize>,
}

impl LengthPrediction {
    /// Layout to try first and the fallback, for a payload of `actual` bytes.
    ///
    /// The closer prediction wins; ties, and the case where neither layout can
    /// be sized, favor layout B.
    pub fn attempt_order(&self, actual: usize) -> [Layout; 2] {
        let distance = |predicted: Option<usize>| predicted.map(|p| p.abs_diff(actual));
        let preferred = match (distance(self.layout_a), distance(self.layout_b)) {
            (Some(a), Some(b)) if a < b => Layout::A,
            (Some(_), None) => Layout::A,
            _ => Layout::B,
        };
        [preferred, preferred.other()]
    }
}

/// Predict both layouts' sizes from the `targets` length and the element
/// lengths recorded in the payload.
pub fn predict_lengths(payload: &[u8]) -> LengthPrediction {
    let Some(targets_len) = word_at(payload, 0).and_then(|at| word_at(payload, at)) else {
        return LengthPrediction::default();
    };

    let layout_a = dynamic_array_size(payload, targets_len).and_then(|arrays| {
        Layout::A.head_words().checked_mul(WORD)?.checked_add(arrays)
    });
    let layout_b = layout_a.and_then(|a| {
        let memo_len = word_at(payload, 5 * WORD)
            .filter(|offset| *offset >= Layout::B.head_words() * WORD)
            .and_then(|at| word_at(payload, at))?;
        a.checked_add(WORD)?.checked_add(WORD)?.checked_add(padded_len(memo_len)?)
    });

    LengthPrediction { layout_a, layout_b }
}

/// Combined tail size of `targets` and `calldatas`, both holding `n` entries.
fn dynamic_array_size(payload: &[u8], n: usize) -> Option<usize> {
    // Each array entry takes at least a word, so a larger `n` cannot fit.
    if n > payload.len() / WORD {
        return None;
    }
    let targets = WORD + n * WORD;

    let calldatas_at = word_at(payload, 4 * WORD)?;
    let elements_at = calldatas_at.checked_add(WORD)?;
    let mut calldatas = WORD + n * WORD;
    for index in 0..n {
        let offset = word_at(payload, elements_at.checked_add(index * WORD)?)?;
        let len = word_at(payload, elements_at.checked_add(offset)?)?;
        calldatas = calldatas.checked_add(WORD)?.checked_add(padded_len(len)?)?;
    }

    targets.checked_add(calldatas)
}

fn word_at(payload: &[u8], at: usize) -> Option<usize> {
    let word = payload.get(at..at.checked_add(WORD)?)?;
    usize::try_from(U256::from_be_slice(word)).ok()
}

fn padded_len(len: usize) -> Option<usize> {
    len.checked_add(WORD - 1).map(|n| n / WORD * WORD)
}
