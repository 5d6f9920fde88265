// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only module in the crate where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

mod host; // DialogHost over user32/gdi32, CBT hook procedure
mod messages; // raw window-message and style constants

pub(crate) mod dpi; // display DPI query

pub use host::Win32Host;
