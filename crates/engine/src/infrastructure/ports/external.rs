//! Ports for collaborators outside the character store.

use async_trait::async_trait;
use morphin_domain::CharacterId;

use super::error::ImageLookupError;

/// The characters the invoking user currently has selected and owns.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionPort: Send + Sync {
    fn selected(&self) -> Vec<CharacterId>;
}

/// Token image lookup by form name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageLookupPort: Send + Sync {
    /// Path of an image for `form_name`, or `None` if there is no match.
    async fn find_image(&self, form_name: &str) -> Result<Option<String>, ImageLookupError>;
}
