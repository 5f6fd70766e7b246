//! Infrastructure layer: ports and their adapters.

pub mod clock;
pub mod config;
pub mod image_folder;
pub mod localization;
pub mod memory_store;
pub mod ports;
pub mod selection;
pub mod sqlite_store;
