use crate::foundation::core::Rgba8;

/// WGS84 coordinate in degrees. Serialized as `[lat, lng]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.lat, p.lng]
    }
}

/// Illustrative congestion level used to color a corridor's flow lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLevel {
    /// Free flow (50 km/h and up).
    Flowing,
    /// 30 to 50 km/h.
    Moderate,
    /// 15 to 30 km/h.
    Heavy,
    /// Below 15 km/h.
    Gridlock,
}

impl TrafficLevel {
    /// Cycle used for corridors that don't name a level.
    pub const CYCLE: [TrafficLevel; 3] = [Self::Flowing, Self::Moderate, Self::Heavy];

    /// Level assigned to the `idx`-th corridor when none is configured.
    pub fn for_index(idx: usize) -> Self {
        Self::CYCLE[idx % Self::CYCLE.len()]
    }

    /// Opaque display color.
    pub fn color(self) -> Rgba8 {
        match self {
            Self::Flowing => Rgba8::rgb(16, 185, 129),
            Self::Moderate => Rgba8::rgb(245, 158, 11),
            Self::Heavy => Rgba8::rgb(239, 68, 68),
            Self::Gridlock => Rgba8::rgb(153, 27, 27),
        }
    }
}

/// A named road segment as an ordered polyline of geographic points.
///
/// Corridors with fewer than two points still contribute to the projection bounds but are
/// skipped by every drawing routine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Corridor {
    /// Display name, unique within a scene.
    pub name: String,
    /// Ordered centerline points.
    pub points: Vec<GeoPoint>,
    /// Optional fixed traffic level; defaults to the index-based cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<TrafficLevel>,
}

impl Corridor {
    /// Create a corridor from `(lat, lng)` pairs.
    pub fn new(name: impl Into<String>, points: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self {
            name: name.into(),
            points: points.into_iter().map(GeoPoint::from).collect(),
            level: None,
        }
    }

    /// Same corridor with a fixed traffic level.
    pub fn with_level(mut self, level: TrafficLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// `true` when the corridor has enough points to be drawn as a path.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Traffic level for this corridor at position `idx` in its scene.
    pub fn level_or_cycle(&self, idx: usize) -> TrafficLevel {
        self.level.unwrap_or_else(|| TrafficLevel::for_index(idx))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/corridor.rs"]
mod tests;
