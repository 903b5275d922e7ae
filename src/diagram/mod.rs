pub(crate) mod builder;
pub(crate) mod d2;
pub(crate) mod extract;
pub(crate) mod fallback;
pub(crate) mod model;
pub(crate) mod sequence;
pub(crate) mod svg;
