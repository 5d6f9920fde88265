// ── Button roles, button sets and results ─────────────────────────────────────
//
// Closed value sets shared by the customizer and the show orchestrator.
// The role → (control id, caption) mapping is one exhaustive match; nothing
// here dispatches dynamically.

/// A push button the native message box may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonRole {
    Ok,
    Cancel,
    Abort,
    Retry,
    Ignore,
    Yes,
    No,
    TryAgain,
    Continue,
}

impl ButtonRole {
    /// Every role, in table order.
    pub const ALL: [ButtonRole; 9] = [
        Self::Ok,
        Self::Cancel,
        Self::Abort,
        Self::Retry,
        Self::Ignore,
        Self::Yes,
        Self::No,
        Self::TryAgain,
        Self::Continue,
    ];

    /// `(native control id, localized caption)`.
    ///
    /// Control ids are the `IDOK`…`IDCONTINUE` values the system dialog
    /// assigns to its buttons.
    const fn entry(self) -> (i32, &'static str) {
        match self {
            Self::Ok => (1, "تایید"),
            Self::Cancel => (2, "انصراف"),
            Self::Abort => (3, "قطع"),
            Self::Retry => (4, "تلاش مجدد"),
            Self::Ignore => (5, "نادیده گرفتن"),
            Self::Yes => (6, "بله"),
            Self::No => (7, "خیر"),
            Self::TryAgain => (10, "تلاش مجدد"),
            Self::Continue => (11, "ادامه"),
        }
    }

    /// Native control identifier of this button inside the dialog.
    pub const fn control_id(self) -> i32 {
        self.entry().0
    }

    /// Localized caption written over the system's own text.
    pub const fn caption(self) -> &'static str {
        self.entry().1
    }

    pub fn from_control_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.control_id() == id)
    }
}

// ── Button sets ───────────────────────────────────────────────────────────────

/// The button combinations the caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Buttons {
    #[default]
    Ok,
    OkCancel,
    YesNo,
    YesNoCancel,
}

impl Buttons {
    /// Roles in on-screen order; the index is the `MB_DEFBUTTONn` position.
    pub fn roles(self) -> &'static [ButtonRole] {
        match self {
            Self::Ok => &[ButtonRole::Ok],
            Self::OkCancel => &[ButtonRole::Ok, ButtonRole::Cancel],
            Self::YesNo => &[ButtonRole::Yes, ButtonRole::No],
            Self::YesNoCancel => &[ButtonRole::Yes, ButtonRole::No, ButtonRole::Cancel],
        }
    }

    pub fn contains(self, role: ButtonRole) -> bool {
        self.roles().contains(&role)
    }

    /// Zero-based position of `role` in this set.
    pub fn position(self, role: ButtonRole) -> Option<usize> {
        self.roles().iter().position(|&r| r == role)
    }

    /// Role that is the default when the caller expresses no preference.
    pub fn natural_default(self) -> ButtonRole {
        self.roles()[0]
    }
}

// ── Icons & options ───────────────────────────────────────────────────────────

/// Stock icon shown next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    #[default]
    None,
    /// Hand / stop sign.
    Error,
    Question,
    /// Exclamation mark.
    Warning,
    /// Lower-case "i" (asterisk).
    Information,
}

/// Layout options forwarded to the native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowOptions {
    /// Right-to-left reading order.
    pub right_to_left: bool,
    /// Right-aligned message text.
    pub right_align: bool,
}

impl ShowOptions {
    pub const RTL: ShowOptions = ShowOptions {
        right_to_left: true,
        right_align: true,
    };

    pub fn union(self, other: ShowOptions) -> ShowOptions {
        ShowOptions {
            right_to_left: self.right_to_left || other.right_to_left,
            right_align: self.right_align || other.right_align,
        }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Outcome reported to the caller of `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogResult {
    #[default]
    None,
    Ok,
    Cancel,
    Yes,
    No,
}

impl DialogResult {
    /// Map the control id returned by the native call.
    ///
    /// Ids whose role is not part of `buttons` (or has no result equivalent)
    /// map to `None`.
    pub fn from_native(id: i32, buttons: Buttons) -> DialogResult {
        let Some(role) = ButtonRole::from_control_id(id) else {
            return DialogResult::None;
        };
        if !buttons.contains(role) {
            return DialogResult::None;
        }
        match role {
            ButtonRole::Ok => DialogResult::Ok,
            ButtonRole::Cancel => DialogResult::Cancel,
            ButtonRole::Yes => DialogResult::Yes,
            ButtonRole::No => DialogResult::No,
            _ => DialogResult::None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
