// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – user32 / gdi32 FFI and the CBT hook procedure
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Right-to-left, localized message boxes built on the native Windows dialog.
//!
//! A thread-scoped CBT hook catches the stock message box as it activates and
//! rewrites its button captions, swaps in a custom font, forces the default
//! button and makes focus cues visible.  Long unbroken tokens in the message
//! text get zero-width break opportunities first so they wrap.
//!
//! Everything except `platform::win32` is platform neutral and drives the
//! window system through [`DialogHost`].

pub mod buttons;
pub mod customizer;
pub mod error;
pub mod font;
pub mod font_table;
pub mod hook;
pub mod host;
pub mod platform;
pub mod settings;
pub mod show;
pub mod wrap;

#[cfg(test)]
mod testing;

pub use buttons::{ButtonRole, Buttons, DialogResult, Icon, ShowOptions};
pub use error::{DialogError, Result};
pub use font_table::FontTable;
pub use host::{DialogHost, FontHandle, WindowId};
pub use settings::Settings;
pub use show::MessageBox;
pub use wrap::{wrap, WrapConfig, BREAK_MARKER};

#[cfg(windows)]
pub use platform::win32::Win32Host;
#[cfg(windows)]
pub use show::show;
