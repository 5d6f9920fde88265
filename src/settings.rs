// ── Settings ──────────────────────────────────────────────────────────────────
//
// Process-wide knobs for dialog customization.  The host application sets
// them at startup (directly or from a JSON fragment); nothing is read from or
// written to disk here.
// No `unsafe`; pure safe Rust plus serde_json.

use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::{
    buttons::ButtonRole,
    customizer::{Customization, FontSpec},
    error::{DialogError, Result},
    wrap::WrapConfig,
};

/// Customization settings applied by every `show` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Font family injected into the dialog; must already be installed.
    pub font_face: String,
    /// Font size in points.
    pub font_point_size: f64,
    pub apply_custom_font: bool,
    /// Insert zero-width breaks into long URLs, hashes and paths.
    pub wrap_long_tokens: bool,
    pub wrap_threshold: i32,
    /// Always request right-to-left reading and right alignment.
    pub right_to_left: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_face: "Vazirmatn FD".to_owned(),
            font_point_size: 10.0,
            apply_custom_font: true,
            wrap_long_tokens: true,
            wrap_threshold: 24,
            right_to_left: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON.  Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Settings> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.font_point_size.is_finite() || self.font_point_size <= 0.0 {
            return Err(DialogError::InvalidSettings(format!(
                "font_point_size must be a positive number, got {}",
                self.font_point_size
            )));
        }
        Ok(())
    }

    pub fn wrap_config(&self) -> WrapConfig {
        WrapConfig {
            enabled: self.wrap_long_tokens,
            threshold: self.wrap_threshold,
        }
    }

    /// What the hook does to each dialog.  `preferred_default` is the caller's
    /// explicit default-button override, if any.
    pub fn customization(&self, preferred_default: Option<ButtonRole>) -> Customization {
        let font = (self.apply_custom_font && !self.font_face.trim().is_empty()).then(|| {
            FontSpec {
                face: self.font_face.clone(),
                point_size: self.font_point_size,
            }
        });
        Customization {
            font,
            preferred_default,
        }
    }
}

// ── Process-wide current settings ─────────────────────────────────────────────

static CURRENT: LazyLock<RwLock<Settings>> = LazyLock::new(|| RwLock::new(Settings::default()));

/// Snapshot of the settings used by [`crate::show`].
pub fn current() -> Settings {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide settings after validating them.
pub fn replace(settings: Settings) -> Result<()> {
    settings.validate()?;
    *CURRENT.write().unwrap_or_else(PoisonError::into_inner) = settings;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
