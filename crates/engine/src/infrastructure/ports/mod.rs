//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Character storage (SQLite or in-memory)
//! - Selection of the character to act on
//! - Token image lookup
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{ImageLookupError, RepoError};
pub use external::{ImageLookupPort, SelectionPort};
pub use repos::CharacterStore;
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockImageLookupPort, MockSelectionPort};
#[cfg(test)]
pub use repos::MockCharacterStore;
#[cfg(test)]
pub use testing::MockClockPort;
