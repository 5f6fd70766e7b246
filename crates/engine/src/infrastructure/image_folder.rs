//! Token image lookup in a local folder.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::infrastructure::ports::{ImageLookupError, ImageLookupPort};

const IMAGE_EXTENSIONS: [&str; 9] = [
    "png", "jpg", "jpeg", "webp", "svg", "gif", "avif", "bmp", "tiff",
];

/// Matches `<FormName>.<ext>` in one folder, with the form name reduced to
/// ASCII letters and digits. Names compare exactly, case included, and the
/// extension must be one of the lowercase image extensions.
pub struct FolderImageLookup {
    root: PathBuf,
}

impl FolderImageLookup {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn error(&self, e: std::io::Error) -> ImageLookupError {
        let path = self.root.display().to_string();
        match e.kind() {
            ErrorKind::PermissionDenied => ImageLookupError::Forbidden { path },
            _ => ImageLookupError::Io {
                path,
                message: e.to_string(),
            },
        }
    }
}

/// "Grizzly Bear" -> "GrizzlyBear"
pub fn image_stem(form_name: &str) -> String {
    form_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn is_image(extension: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension)
}

#[async_trait]
impl ImageLookupPort for FolderImageLookup {
    async fn find_image(&self, form_name: &str) -> Result<Option<String>, ImageLookupError> {
        let stem = image_stem(form_name);
        if stem.is_empty() {
            return Ok(None);
        }

        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| self.error(e))?;
        let mut matches = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| self.error(e))? {
            let path = entry.path();
            let (Some(file_stem), Some(extension)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            if file_stem == stem && is_image(extension) {
                matches.push(path.display().to_string());
            }
        }
        matches.sort();
        Ok(matches.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_non_alphanumerics() {
        assert_eq!(image_stem("Grizzly Bear"), "GrizzlyBear");
        assert_eq!(image_stem("Will-o'-Wisp 2"), "WilloWisp2");
        assert_eq!(image_stem("  "), "");
    }

    #[tokio::test]
    async fn finds_matching_image_by_form_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("DireBat.webp"), b"img").unwrap();
        std::fs::write(dir.path().join("DireBat.txt"), b"notes").unwrap();
        let lookup = FolderImageLookup::new(dir.path());

        let found = lookup.find_image("Dire Bat").await.unwrap();
        assert!(found.is_some_and(|p| p.ends_with("DireBat.webp")));
        assert_eq!(lookup.find_image("Tiger").await.unwrap(), None);
    }

    #[tokio::test]
    async fn match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("direbat.webp"), b"img").unwrap();
        std::fs::write(dir.path().join("Wolf.PNG"), b"img").unwrap();
        let lookup = FolderImageLookup::new(dir.path());

        assert_eq!(lookup.find_image("Dire Bat").await.unwrap(), None);
        assert_eq!(lookup.find_image("Wolf").await.unwrap(), None);

        std::fs::write(dir.path().join("Wolf.png"), b"img").unwrap();
        let found = lookup.find_image("Wolf").await.unwrap();
        assert!(found.is_some_and(|p| p.ends_with("Wolf.png")));
    }

    #[tokio::test]
    async fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = FolderImageLookup::new(dir.path().join("nope"));
        assert!(matches!(
            lookup.find_image("Wolf").await,
            Err(ImageLookupError::Io { .. })
        ));
    }
}
