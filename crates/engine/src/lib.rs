//! Morphin Engine library.
//!
//! Applies and reverts size-changing buffs and polymorph transformations on
//! stored characters.
//!
//! ## Structure
//!
//! - `use_cases/` - Casting, previewing, and reverting transformations
//! - `infrastructure/` - Ports and adapters (SQLite, in-memory, image folder)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
