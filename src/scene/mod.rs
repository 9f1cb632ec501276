//! Scene configuration: canvas, frame count, corridors and drawing style.

mod perth;
/// Illustrative drawing constants.
pub mod style;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{RoadreelError, RoadreelResult};
use crate::geo::corridor::Corridor;
use crate::render::surface::validate_canvas;

pub use style::Style;

/// Latitude limit of the Web-Mercator square.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Everything needed to render an animation, as loaded from JSON.
///
/// Every field is optional in JSON; missing fields take the values of [`SceneDef::default`],
/// which renders the built-in Perth corridors at 1920x1080 over 120 frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneDef {
    /// Output size.
    pub canvas: Canvas,
    /// Total number of frames in the animation.
    pub frames: u64,
    /// Opaque background fill as `[r, g, b]`.
    pub background: [u8; 3],
    /// Corridors in drawing order.
    pub corridors: Vec<Corridor>,
    /// Drawing constants.
    pub style: Style,
}

impl Default for SceneDef {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            frames: 120,
            background: [10, 15, 30],
            corridors: perth::corridors(),
            style: Style::default(),
        }
    }
}

impl SceneDef {
    /// Parse and validate a scene from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> RoadreelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(text: &str) -> RoadreelResult<Self> {
        let scene: Self = serde_json::from_str(text)
            .map_err(|e| RoadreelError::serde(format!("scene JSON: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Background as an opaque color.
    pub fn background(&self) -> Rgba8 {
        Rgba8::from(self.background)
    }

    /// Check structural constraints that do not depend on projection.
    ///
    /// Corridors with fewer than two points are allowed here; they are skipped at draw time.
    pub fn validate(&self) -> RoadreelResult<()> {
        validate_canvas(self.canvas)?;
        if self.frames == 0 {
            return Err(RoadreelError::validation("scene frames must be >= 1"));
        }
        if self.corridors.is_empty() {
            return Err(RoadreelError::validation("scene needs at least one corridor"));
        }

        let mut names = BTreeSet::new();
        for c in &self.corridors {
            if c.name.trim().is_empty() {
                return Err(RoadreelError::validation("corridor name must be non-empty"));
            }
            if !names.insert(c.name.as_str()) {
                return Err(RoadreelError::validation(format!(
                    "duplicate corridor name '{}'",
                    c.name
                )));
            }
            for p in &c.points {
                if !p.lat.is_finite() || !p.lng.is_finite() {
                    return Err(RoadreelError::validation(format!(
                        "corridor '{}' has a non-finite coordinate",
                        c.name
                    )));
                }
                if p.lat.abs() >= MAX_MERCATOR_LAT || p.lng.abs() > 180.0 {
                    return Err(RoadreelError::validation(format!(
                        "corridor '{}' point [{}, {}] is outside the Web-Mercator domain",
                        c.name, p.lat, p.lng
                    )));
                }
            }
        }

        self.style.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
