// ── Dialog customizer ─────────────────────────────────────────────────────────
//
// Reacts to the two lifecycle events delivered by the hook:
//
//   Activate → localize button captions and inject the configured font,
//              then force a visible default button.
//   Destroy  → release the font injected into that dialog.
//
// Runs inside an OS callback, so nothing here may fail outward: every step
// returns a `Result` that is logged and dropped, and a failed step leaves the
// dialog unmodified-but-working.

use tracing::{debug, trace, warn};

use crate::{
    buttons::ButtonRole,
    error::{DialogError, Result},
    font::FontDescriptor,
    font_table::FontTable,
    host::{DialogHost, FontHandle, WindowId, BUTTON_CLASS, DIALOG_CLASS, STATIC_CLASS},
};

/// Used when the display DPI cannot be queried.
const FALLBACK_DPI: u32 = 96;

/// Roles tried, in order, when no explicit default is requested.
const DEFAULT_PRIORITY: [ButtonRole; 2] = [ButtonRole::Ok, ButtonRole::Yes];

/// Font injected into customized dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub face: String,
    pub point_size: f64,
}

/// What one hook session does to the dialogs it sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customization {
    /// `None` leaves the system font in place.
    pub font: Option<FontSpec>,
    /// Explicit default-button override, tried before OK and Yes.
    pub preferred_default: Option<ButtonRole>,
}

/// Result of handling an Activate event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Not a standard dialog; left alone.
    Ignored,
    Customized {
        /// A new font was created and registered for this dialog.
        font_registered: bool,
    },
}

/// Handle Activate for `dialog`.
pub fn on_activate<H: DialogHost>(
    host: &H,
    table: &FontTable,
    customization: &Customization,
    dialog: WindowId,
) -> Activation {
    if !is_standard_dialog(host, dialog) {
        trace!(window = dialog.0, "activate: not a standard dialog, skipping");
        return Activation::Ignored;
    }

    localize_captions(host, dialog);

    let mut font_registered = false;
    if let Some(font) = &customization.font {
        match apply_font(host, table, font, dialog) {
            Ok(created) => font_registered = created,
            Err(e) => warn!(window = dialog.0, error = %e, "dialog font not applied"),
        }
    }

    if let Err(e) = focus_default_button(host, dialog, customization.preferred_default) {
        debug!(window = dialog.0, error = %e, "default button left unchanged");
    }

    debug!(window = dialog.0, font_registered, "dialog customized");
    Activation::Customized { font_registered }
}

/// Handle Destroy for `dialog`: release its font if one was registered.
///
/// Returns whether a font was released.  Unknown ids are expected (every
/// window on the thread is reported) and ignored.
pub fn on_destroy<H: DialogHost>(host: &H, table: &FontTable, dialog: WindowId) -> bool {
    let released = table.take_and_release(dialog, |font| host.delete_font(font));
    if released {
        debug!(window = dialog.0, "dialog font released");
    }
    released
}

// ── Steps ─────────────────────────────────────────────────────────────────────

fn is_standard_dialog<H: DialogHost>(host: &H, window: WindowId) -> bool {
    host.class_name(window)
        .is_some_and(|class| class.eq_ignore_ascii_case(DIALOG_CLASS))
}

fn localize_captions<H: DialogHost>(host: &H, dialog: WindowId) {
    for role in ButtonRole::ALL {
        let Some(button) = host.dlg_item(dialog, role.control_id()) else {
            continue;
        };
        if let Err(e) = host.set_text(button, role.caption()) {
            warn!(window = dialog.0, ?role, error = %e, "caption not replaced");
        }
    }
}

/// Ensure `dialog` has a registered font and push it to every button and
/// static control.  Returns `true` when the font was created by this call.
fn apply_font<H: DialogHost>(
    host: &H,
    table: &FontTable,
    wanted: &FontSpec,
    dialog: WindowId,
) -> Result<bool> {
    if wanted.face.trim().is_empty() {
        return Ok(false);
    }

    // Activate repeats whenever the dialog regains activation; the font made
    // the first time is still registered and still applied.
    let (font, created) = match table.get(dialog) {
        Some(font) => (font, false),
        None => (create_and_register(host, table, wanted, dialog)?, true),
    };

    for child in host.children(dialog) {
        let takes_font = host.class_name(child).is_some_and(|class| {
            class.eq_ignore_ascii_case(BUTTON_CLASS) || class.eq_ignore_ascii_case(STATIC_CLASS)
        });
        if takes_font {
            host.set_font(child, font);
        }
    }
    Ok(created)
}

fn create_and_register<H: DialogHost>(
    host: &H,
    table: &FontTable,
    wanted: &FontSpec,
    dialog: WindowId,
) -> Result<FontHandle> {
    let dpi = host.vertical_dpi().unwrap_or(FALLBACK_DPI);
    let descriptor = FontDescriptor::for_dialog(&wanted.face, wanted.point_size, dpi)
        .ok_or_else(|| DialogError::InvalidSettings(format!("point size {}", wanted.point_size)))?;
    let font = host.create_font(&descriptor)?;

    if let Some(stale) = table.put(dialog, font) {
        warn!(window = dialog.0, "replaced a stale font entry for a reused window id");
        host.delete_font(stale);
    }
    Ok(font)
}

fn focus_default_button<H: DialogHost>(
    host: &H,
    dialog: WindowId,
    preferred: Option<ButtonRole>,
) -> Result<()> {
    let (role, button) = preferred
        .into_iter()
        .chain(DEFAULT_PRIORITY)
        .find_map(|role| host.dlg_item(dialog, role.control_id()).map(|b| (role, b)))
        .ok_or(DialogError::Missing("default button"))?;

    if let Err(e) = host.set_foreground(dialog) {
        debug!(window = dialog.0, error = %e, "could not bring dialog to foreground");
    }
    host.set_default_id(dialog, role.control_id());
    host.set_default_style(button);
    if let Err(e) = host.set_focus(button) {
        debug!(window = dialog.0, ?role, error = %e, "could not focus default button");
    }

    // Mouse-activated dialogs start with focus rectangles hidden.
    host.clear_focus_cues(dialog);
    for child in host.children(dialog) {
        host.clear_focus_cues(child);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
