//! Small utility helpers shared across the crate.

use std::env;
use std::path::Path;

/// Return the first non-empty environment variable from `keys`, or `None`.
pub fn env_first(keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Ok(value) = env::var(key) {
            if !value.trim().is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Map an accepted attachment extension to its declared media type.
///
/// Returns `None` for anything outside the document/text allowlist; the
/// filter is by extension only, file contents are never inspected.
pub fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn media_type_covers_the_allowlist() {
        assert_eq!(
            media_type_for(&PathBuf::from("submission.PDF")),
            Some("application/pdf")
        );
        assert_eq!(
            media_type_for(&PathBuf::from("notes.txt")),
            Some("text/plain")
        );
        assert_eq!(
            media_type_for(&PathBuf::from("guidance.md")),
            Some("text/markdown")
        );
    }

    #[test]
    fn media_type_rejects_everything_else() {
        assert_eq!(media_type_for(&PathBuf::from("image.png")), None);
        assert_eq!(media_type_for(&PathBuf::from("no_extension")), None);
    }
}
