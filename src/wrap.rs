// ── Long-token soft wrapping ──────────────────────────────────────────────────
//
// The native message box only breaks lines at whitespace, so a long URL, hash
// or path pushes the dialog wider than the screen.  `wrap` inserts invisible
// ZERO WIDTH SPACE break opportunities after separator punctuation and inside
// long unbroken runs.  Pure safe Rust, no platform dependencies.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Zero-width break opportunity inserted by [`wrap`] (U+200B ZERO WIDTH SPACE).
pub const BREAK_MARKER: char = '\u{200B}';

/// Separators that commonly appear inside URLs, paths and identifiers.
/// A marker is always inserted right after one of these.
const BREAKABLE: [char; 15] = [
    '-', '_', '/', '\\', ':', '.', '@', '#', '?', '&', '=', '+', '~', '|', ',',
];

/// Per-call wrapping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapConfig {
    pub enabled: bool,
    /// Maximum run of ordinary characters before a marker is forced.
    /// Zero or negative disables wrapping.
    pub threshold: i32,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 24,
        }
    }
}

fn is_breakable(ch: char) -> bool {
    BREAKABLE.contains(&ch)
}

/// Insert [`BREAK_MARKER`]s so that no unbroken run exceeds `config.threshold`.
///
/// Returns the input unchanged (borrowed) when wrapping is disabled, the text
/// is empty, or the threshold is not positive.  Stripping every marker from
/// the output yields the input again.
///
/// Applying `wrap` to its own output is *not* a no-op: markers are inserted
/// again after every separator, and previously inserted markers count as
/// ordinary characters.
pub fn wrap(text: &str, config: WrapConfig) -> Cow<'_, str> {
    if !config.enabled || text.is_empty() || config.threshold <= 0 {
        return Cow::Borrowed(text);
    }
    // threshold > 0 checked above.
    let threshold = config.threshold as usize;

    let mut out = String::with_capacity(text.len() + 16);
    let mut run = 0usize;

    for ch in text.chars() {
        out.push(ch);

        if ch.is_whitespace() {
            run = 0;
            continue;
        }

        if is_breakable(ch) {
            out.push(BREAK_MARKER);
            run = 0;
            continue;
        }

        run += 1;
        if run >= threshold {
            out.push(BREAK_MARKER);
            run = 0;
        }
    }

    Cow::Owned(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
