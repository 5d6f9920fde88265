// ── Central error type ────────────────────────────────────────────────────────
//
// Fallible operations inside the crate return `error::Result<T>`.  None of
// these errors ever reaches the caller of `show`: inside the hook callback
// every failure is logged and swallowed, and the dialog simply stays
// unmodified.

/// Every error that rtlbox can produce.
#[derive(Debug)]
pub enum DialogError {
    /// A Win32 API call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// A customization target (control, font, DPI) could not be resolved.
    Missing(&'static str),

    /// Settings JSON could not be parsed.
    Json(serde_json::Error),

    /// Settings parsed but hold a value that cannot be used.
    InvalidSettings(String),
}

impl std::fmt::Display for DialogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::Missing(what) => write!(f, "{what} not available"),
            Self::Json(e) => write!(f, "settings JSON error: {e}"),
            Self::InvalidSettings(why) => write!(f, "invalid settings: {why}"),
        }
    }
}

impl std::error::Error for DialogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Win32 { .. } | Self::Missing(_) | Self::InvalidSettings(_) => None,
        }
    }
}

impl From<serde_json::Error> for DialogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// `windows::core::Error` carries an HRESULT.  Failures captured from
// GetLastError arrive as FACILITY_WIN32 HRESULTs (0x8007xxxx); those are
// unwrapped back to the plain Win32 code so both paths display alike.
#[cfg(windows)]
impl From<windows::core::Error> for DialogError {
    fn from(e: windows::core::Error) -> Self {
        Self::Win32 {
            function: "Win32 API",
            code: win32_code(e.code().0 as u32),
        }
    }
}

/// Low word of a FACILITY_WIN32 HRESULT; any other HRESULT is kept whole.
#[cfg(any(windows, test))]
fn win32_code(hresult: u32) -> u32 {
    if hresult & 0xFFFF_0000 == 0x8007_0000 {
        hresult & 0xFFFF
    } else {
        hresult
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DialogError>;
