//! Deterministic file names derived from listing links.

use regex::Regex;
use std::sync::LazyLock;

/// Used when decoding and stripping leave nothing.
pub(crate) const DEFAULT_FILE_NAME: &str = "download";

/// Anything that is not a word character, whitespace, or hyphen.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static file-name pattern"));

/// Derives a file name from a listing link.
///
/// Percent-decodes the link (invalid UTF-8 is replaced lossily), removes every
/// character outside `{word, whitespace, -}`, then replaces spaces with `_`.
/// The function is idempotent: applying it to its own output is a no-op.
///
/// # Examples
///
/// - `"Super%20Mario%20Sunshine%20(USA).zip"` → `"Super_Mario_Sunshine_USAzip"`
pub fn derive_file_name(link: &str) -> String {
    let decoded_bytes = urlencoding::decode_binary(link.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded_bytes);
    let stripped = DISALLOWED.replace_all(&decoded, "");
    let name = stripped.replace(' ', "_");
    if name.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        name
    }
}
