pub mod transformation;
