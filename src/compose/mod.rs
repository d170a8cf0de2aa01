pub mod compositor;
pub(crate) mod raster;
