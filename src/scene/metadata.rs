use crate::scene::style::LocationLabels;

/// Text and orientation burned into one captured frame.
///
/// `time` and `date` are opaque, already-localized strings. Each entry of `location_lines` is
/// drawn as one physical line, in order; an empty list means the location never resolved.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WatermarkMetadata {
    pub time: String,
    pub date: String,
    #[serde(default)]
    pub location_lines: Vec<String>,
    /// Set for front-facing captures; the scene is flipped back before painting.
    #[serde(default)]
    pub mirror: bool,
}

impl WatermarkMetadata {
    pub fn new(time: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            date: date.into(),
            location_lines: Vec::new(),
            mirror: false,
        }
    }

    pub fn with_location_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(self, status: &LocationStatus, labels: &LocationLabels) -> Self {
        self.with_location_lines(status.to_lines(labels))
    }

    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }
}

/// Snapshot of the geolocation collaborator at capture time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LocationStatus {
    /// No fix and no pending request.
    #[default]
    Unresolved,
    /// A position request is still in flight.
    Searching,
    /// The platform refused or failed to provide a position.
    Unavailable,
    Fix {
        latitude: f64,
        longitude: f64,
    },
}

impl LocationStatus {
    /// Pre-format the status into watermark lines.
    ///
    /// Coordinates are printed with five decimals, one axis per line.
    pub fn to_lines(&self, labels: &LocationLabels) -> Vec<String> {
        match *self {
            LocationStatus::Unresolved => Vec::new(),
            LocationStatus::Searching => vec![labels.searching.clone()],
            LocationStatus::Unavailable => vec![labels.unavailable.clone()],
            LocationStatus::Fix {
                latitude,
                longitude,
            } => vec![
                format!("{}: {latitude:.5}", labels.latitude),
                format!("{}: {longitude:.5}", labels.longitude),
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/metadata.rs"]
mod tests;
