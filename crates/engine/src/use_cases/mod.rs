//! Use cases - User story orchestration.

pub mod transformation;

pub use transformation::TransformationUseCases;
