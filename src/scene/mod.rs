pub(crate) mod color;
pub(crate) mod metadata;
pub(crate) mod style;
