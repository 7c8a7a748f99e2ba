pub(crate) mod plan;
pub(crate) mod shapes;
pub(crate) mod text;
