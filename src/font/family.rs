//! Canonical family names for the `<format>/<family>` directory level.
//!
//! The declared family from font metadata is preferred. When it is missing,
//! the family is guessed from the file name by dropping Nerd Font markers and
//! everything from the first style keyword (or separator) onwards. Nerd Font
//! variants always end in a literal `NF` so they never share a directory with
//! the unpatched family.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::font::metadata::MetadataProvider;
use crate::font::nerd::is_nerd_font_with;
use crate::models::{FontFile, FontMetadata};
use crate::utils::naming::{sanitize, MAX_NAME_LEN, UNKNOWN_NAME};

/// Suffix carried by every Nerd Font family
pub const NERD_SUFFIX: &str = "NF";

lazy_static! {
    static ref FAMILY_NERD_TOKENS: Regex = Regex::new(r"(?i)nerd font|nf|powerline").unwrap();
    static ref FILENAME_NERD_TOKENS: Regex =
        Regex::new(r"(?i)nerd[ _-]?fonts?|nerd|nf|powerline").unwrap();
    static ref REPEATED_SPACES: Regex = Regex::new(r" {2,}").unwrap();
    static ref STYLE_KEYWORD: Regex = Regex::new(
        r"(?i)[-_ ](?:regular|normal|bold|italic|light|medium|heavy|black|thin|condensed|extended|oblique|roman)"
    )
    .unwrap();
}

/// Resolve the canonical family directory name for a font
pub fn resolve_family(font: &FontFile, provider: &dyn MetadataProvider) -> String {
    let metadata = provider.query(font.path());
    resolve_family_with(font, &metadata)
}

/// Same as [`resolve_family`], for callers that already queried the metadata
pub fn resolve_family_with(font: &FontFile, metadata: &FontMetadata) -> String {
    let is_nerd = is_nerd_font_with(font, metadata);

    let candidate = match metadata.family().and_then(family_from_metadata) {
        Some(family) => family,
        None => {
            debug!("No usable family metadata for {}, using file name", font.file_name());
            family_from_file_name(font.stem())
        }
    };

    let candidate = if is_nerd {
        with_nerd_suffix(&candidate)
    } else {
        candidate
    };

    if candidate.is_empty() || candidate.eq_ignore_ascii_case(NERD_SUFFIX) {
        return fallback_name(is_nerd);
    }
    candidate
}

/// Sanitized family from a declared name, `None` if nothing meaningful remains
/// once the Nerd Font markers are removed
fn family_from_metadata(declared: &str) -> Option<String> {
    let stripped = FAMILY_NERD_TOKENS.replace_all(declared, "");
    let stripped = REPEATED_SPACES.replace_all(&stripped, " ");
    let stripped = stripped.trim();

    if !stripped.chars().any(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(sanitize(stripped))
}

/// Guess the family from a file stem such as `JetBrainsMono-NerdFont-Bold`
fn family_from_file_name(stem: &str) -> String {
    let stripped = FILENAME_NERD_TOKENS.replace_all(stem, "");

    let family = match STYLE_KEYWORD.find(&stripped) {
        Some(keyword) => &stripped[..keyword.start()],
        None => stripped
            .split(['-', '_', ' '])
            .next()
            .unwrap_or_default(),
    };

    if family.is_empty() {
        sanitize(stem)
    } else {
        sanitize(family)
    }
}

fn with_nerd_suffix(candidate: &str) -> String {
    let mut base = candidate;
    while base.len() >= 2 && base[base.len() - 2..].eq_ignore_ascii_case(NERD_SUFFIX) {
        base = &base[..base.len() - 2];
    }
    // the suffix must fit inside the name length limit
    base = &base[..base.len().min(MAX_NAME_LEN - NERD_SUFFIX.len())];
    format!("{}{}", base, NERD_SUFFIX)
}

fn fallback_name(is_nerd: bool) -> String {
    if is_nerd {
        format!("{}{}", UNKNOWN_NAME, NERD_SUFFIX)
    } else {
        UNKNOWN_NAME.to_string()
    }
}
