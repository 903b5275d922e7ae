pub(crate) mod d2;
pub(crate) mod rasterizer;
pub(crate) mod svg;
