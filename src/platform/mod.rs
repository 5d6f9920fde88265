// ── Platform layer ────────────────────────────────────────────────────────────
//
// The rest of the crate talks to the OS only through `host::DialogHost`.  No
// `unsafe` lives here; all Win32 FFI is confined to the `win32` sub-module
// and never leaks outward.

#[cfg(windows)]
pub mod win32;
