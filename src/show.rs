// ── Show orchestrator ─────────────────────────────────────────────────────────
//
// Public entry point.  One `show` call:
//   1. wraps long tokens in the message text,
//   2. opens a hook session for the calling thread,
//   3. blocks in the native message box while the hook customizes it,
//   4. closes the session and maps the pressed button to a `DialogResult`.

use tracing::{debug, warn};

use crate::{
    buttons::{ButtonRole, Buttons, DialogResult, Icon, ShowOptions},
    font_table::FontTable,
    hook::HookSession,
    host::{DialogHost, WindowId},
    settings::Settings,
    wrap::wrap,
};

// ── MB_* style bits ───────────────────────────────────────────────────────────

const MB_OK: u32 = 0x0000_0000;
const MB_OKCANCEL: u32 = 0x0000_0001;
const MB_YESNOCANCEL: u32 = 0x0000_0003;
const MB_YESNO: u32 = 0x0000_0004;

const MB_ICONHAND: u32 = 0x0000_0010;
const MB_ICONQUESTION: u32 = 0x0000_0020;
const MB_ICONEXCLAMATION: u32 = 0x0000_0030;
const MB_ICONASTERISK: u32 = 0x0000_0040;

/// `MB_DEFBUTTON1`; `MB_DEFBUTTON2` and `3` follow in steps of 0x100.
const MB_DEFBUTTON1: u32 = 0x0000_0000;
const MB_DEFBUTTON_STEP: u32 = 0x0000_0100;

const MB_RIGHT: u32 = 0x0008_0000;
const MB_RTLREADING: u32 = 0x0010_0000;

// ── Request ───────────────────────────────────────────────────────────────────

/// A message box to show.
#[derive(Debug, Clone, Default)]
pub struct MessageBox<'a> {
    pub owner: Option<WindowId>,
    pub text: &'a str,
    /// `None` uses the owner's title, or else the executable name.
    pub caption: Option<&'a str>,
    pub buttons: Buttons,
    pub icon: Icon,
    /// Overrides which button starts as the default.  Ignored when the role is
    /// not part of `buttons`.
    pub default_button: Option<ButtonRole>,
    pub options: ShowOptions,
}

impl<'a> MessageBox<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    pub fn owner(mut self, owner: WindowId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn caption(mut self, caption: &'a str) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn default_button(mut self, role: ButtonRole) -> Self {
        self.default_button = Some(role);
        self
    }

    pub fn options(mut self, options: ShowOptions) -> Self {
        self.options = options;
        self
    }

    /// Show on the calling thread using the process-wide settings and font
    /// table.  Blocks until the user dismisses the dialog.
    #[cfg(windows)]
    pub fn show(&self) -> DialogResult {
        self.show_with(
            &crate::platform::win32::Win32Host,
            FontTable::global(),
            &crate::settings::current(),
        )
    }

    /// Show through an arbitrary window system.
    pub fn show_with<H: DialogHost>(
        &self,
        host: &H,
        table: &'static FontTable,
        settings: &Settings,
    ) -> DialogResult {
        let text = wrap(self.text, settings.wrap_config());
        let caption = self.resolve_caption(host);
        let style = self.native_style(settings);

        let mut session =
            HookSession::acquire(host, table, settings.customization(self.explicit_default()));
        let pressed = host.message_box(self.owner, &text, &caption, style);
        session.release();

        let result = match pressed {
            Ok(id) => DialogResult::from_native(id, self.buttons),
            Err(e) => {
                warn!(error = %e, "message box failed");
                DialogResult::None
            }
        };
        debug!(?result, buttons = ?self.buttons, "message box closed");
        result
    }

    /// The caller's default override, if it names a button that exists.
    fn explicit_default(&self) -> Option<ButtonRole> {
        self.default_button
            .filter(|&role| self.buttons.contains(role))
    }

    /// Full `MB_*` flag word for the native call.
    pub(crate) fn native_style(&self, settings: &Settings) -> u32 {
        let buttons = match self.buttons {
            Buttons::Ok => MB_OK,
            Buttons::OkCancel => MB_OKCANCEL,
            Buttons::YesNo => MB_YESNO,
            Buttons::YesNoCancel => MB_YESNOCANCEL,
        };
        let icon = match self.icon {
            Icon::None => 0,
            Icon::Error => MB_ICONHAND,
            Icon::Question => MB_ICONQUESTION,
            Icon::Warning => MB_ICONEXCLAMATION,
            Icon::Information => MB_ICONASTERISK,
        };

        let default_role = self
            .explicit_default()
            .unwrap_or(self.buttons.natural_default());
        let default_bits = self
            .buttons
            .position(default_role)
            .map_or(MB_DEFBUTTON1, |i| i as u32 * MB_DEFBUTTON_STEP);

        let options = if settings.right_to_left {
            self.options.union(ShowOptions::RTL)
        } else {
            self.options
        };
        let mut layout = 0;
        if options.right_to_left {
            layout |= MB_RTLREADING;
        }
        if options.right_align {
            layout |= MB_RIGHT;
        }

        buttons | icon | default_bits | layout
    }

    fn resolve_caption<H: DialogHost>(&self, host: &H) -> String {
        if let Some(caption) = self.caption {
            return caption.to_owned();
        }
        self.owner
            .and_then(|owner| host.window_text(owner))
            .filter(|title| !title.trim().is_empty())
            .or_else(executable_name)
            .unwrap_or_default()
    }
}

fn executable_name() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.file_stem()?.to_string_lossy().into_owned())
}

/// Show a message box on the calling thread and return the pressed button.
#[cfg(windows)]
pub fn show(
    text: &str,
    caption: &str,
    buttons: Buttons,
    icon: Icon,
    default_button: Option<ButtonRole>,
    options: ShowOptions,
) -> DialogResult {
    MessageBox {
        owner: None,
        text,
        caption: Some(caption),
        buttons,
        icon,
        default_button,
        options,
    }
    .show()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
