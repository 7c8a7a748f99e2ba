use std::fmt;
use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::error::{StampError, StampResult};
use crate::scene::style::FontWeights;

/// Which text run a face is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Bold monospace clock inside the info box.
    Time,
    /// Semi-bold proportional date line.
    Date,
    /// Light proportional location lines.
    Location,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Time, FontRole::Date, FontRole::Location];

    pub(crate) fn index(self) -> usize {
        match self {
            FontRole::Time => 0,
            FontRole::Date => 1,
            FontRole::Location => 2,
        }
    }

    pub fn weight(self, weights: &FontWeights) -> f32 {
        match self {
            FontRole::Time => weights.time,
            FontRole::Date => weights.date,
            FontRole::Location => weights.location,
        }
    }

    fn preferred_families(self) -> &'static [fontdb::Family<'static>] {
        match self {
            FontRole::Time => MONO_FAMILIES,
            FontRole::Date | FontRole::Location => SANS_FAMILIES,
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontRole::Time => "time",
            FontRole::Date => "date",
            FontRole::Location => "location",
        })
    }
}

const MONO_FAMILIES: &[fontdb::Family<'static>] = &[
    fontdb::Family::Name("DejaVu Sans Mono"),
    fontdb::Family::Name("Liberation Mono"),
    fontdb::Family::Name("Noto Sans Mono"),
    fontdb::Family::Name("Menlo"),
    fontdb::Family::Name("Consolas"),
    fontdb::Family::Name("Courier New"),
    fontdb::Family::Monospace,
];

const SANS_FAMILIES: &[fontdb::Family<'static>] = &[
    fontdb::Family::Name("Inter"),
    fontdb::Family::Name("DejaVu Sans"),
    fontdb::Family::Name("Liberation Sans"),
    fontdb::Family::Name("Noto Sans"),
    fontdb::Family::Name("Helvetica"),
    fontdb::Family::Name("Arial"),
    fontdb::Family::SansSerif,
];

/// Raw font file bytes plus the face index inside a collection.
#[derive(Clone, Debug)]
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index: 0,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> StampResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            StampError::measurement(format!("read font '{}': {e}", path.display()))
        })?;
        Ok(Self::from_bytes(bytes))
    }
}

/// One face per [`FontRole`].
#[derive(Clone, Debug)]
pub struct FontSet {
    faces: [FontFace; 3],
}

impl FontSet {
    pub fn new(time: FontFace, date: FontFace, location: FontFace) -> Self {
        Self {
            faces: [time, date, location],
        }
    }

    pub fn from_files(
        time: impl AsRef<Path>,
        date: impl AsRef<Path>,
        location: impl AsRef<Path>,
    ) -> StampResult<Self> {
        Ok(Self::new(
            FontFace::from_path(time)?,
            FontFace::from_path(date)?,
            FontFace::from_path(location)?,
        ))
    }

    /// Pick faces from the installed system fonts.
    ///
    /// Each role asks for its preferred families at its configured weight and falls back to
    /// any installed face. Fails only when no font is installed at all.
    pub fn from_system(weights: &FontWeights) -> StampResult<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system font database");
        Self::from_database(&db, weights)
    }

    pub(crate) fn from_database(db: &fontdb::Database, weights: &FontWeights) -> StampResult<Self> {
        Ok(Self::new(
            query_face(db, FontRole::Time, weights)?,
            query_face(db, FontRole::Date, weights)?,
            query_face(db, FontRole::Location, weights)?,
        ))
    }

    pub fn face(&self, role: FontRole) -> &FontFace {
        &self.faces[role.index()]
    }
}

fn query_face(
    db: &fontdb::Database,
    role: FontRole,
    weights: &FontWeights,
) -> StampResult<FontFace> {
    let weight = role.weight(weights).round().clamp(1.0, 1000.0) as u16;
    let query = fontdb::Query {
        families: role.preferred_families(),
        weight: fontdb::Weight(weight),
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| StampError::measurement(format!("no font installed for {role} text")))?;

    db.with_face_data(id, |data, index| FontFace {
        bytes: Arc::new(data.to_vec()),
        index,
    })
    .ok_or_else(|| StampError::measurement(format!("font data for {role} text is unreadable")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
