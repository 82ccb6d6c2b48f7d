//! Extension-based bucket classification.

use std::fmt;
use std::path::Path;

/// Label used for files without an extension.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Name of a bucket directory under the destination root.
///
/// Always a lowercase token without dots, or `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketLabel(String);

impl BucketLabel {
    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the `"unknown"` fallback.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_LABEL
    }
}

impl fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for BucketLabel {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl From<BucketLabel> for String {
    fn from(label: BucketLabel) -> Self {
        label.0
    }
}

/// Classify a file name into its bucket label.
///
/// The label is the text after the last `.` of the base name, lowercased.
/// Names without a dot, dotfiles like `.bashrc` and names ending in a dot
/// have no extension and map to `"unknown"`. Compound suffixes classify by
/// their final part only: `archive.tar.gz` goes to `"gz"`.
///
/// ```
/// use sortcopy::classify;
///
/// assert_eq!(classify("a.TXT").as_str(), "txt");
/// assert_eq!(classify("README").as_str(), "unknown");
/// assert_eq!(classify("archive.tar.gz").as_str(), "gz");
/// ```
pub fn classify(file_name: impl AsRef<Path>) -> BucketLabel {
    let label = file_name
        .as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty());

    BucketLabel(label.unwrap_or_else(|| UNKNOWN_LABEL.to_owned()))
}
