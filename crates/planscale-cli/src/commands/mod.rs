pub mod rescale;
