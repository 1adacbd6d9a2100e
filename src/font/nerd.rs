use lazy_static::lazy_static;
use regex::Regex;

use crate::font::metadata::MetadataProvider;
use crate::models::{FontFile, FontMetadata};

/// Private Use Area blocks Nerd Fonts patch their icons into
const NERD_GLYPH_RANGES: [(u32, u32); 2] = [(0xE000, 0xE3FF), (0xF000, 0xF7FF)];

lazy_static! {
    static ref NERD_MARKER: Regex = Regex::new(r"(?i)nerd|nf|powerline").unwrap();
}

/// Decide whether a font is a Nerd Font variant
pub fn is_nerd_font(font: &FontFile, provider: &dyn MetadataProvider) -> bool {
    let metadata = provider.query(font.path());
    is_nerd_font_with(font, &metadata)
}

/// Same as [`is_nerd_font`], for callers that already queried the metadata
pub fn is_nerd_font_with(font: &FontFile, metadata: &FontMetadata) -> bool {
    if metadata.charset().is_some_and(charset_has_nerd_glyphs) {
        return true;
    }

    NERD_MARKER.is_match(font.stem())
        || metadata.family().is_some_and(|family| NERD_MARKER.is_match(family))
}

/// Whether a charset descriptor covers any codepoint in the Nerd Font glyph blocks.
///
/// The descriptor is a list of whitespace separated hex tokens, each either a
/// single codepoint or an inclusive `lo-hi` range. Tokens that do not parse are
/// ignored.
pub fn charset_has_nerd_glyphs(charset: &str) -> bool {
    charset
        .split_whitespace()
        .filter_map(parse_range)
        .any(|(lo, hi)| {
            NERD_GLYPH_RANGES
                .iter()
                .any(|&(start, end)| lo <= end && hi >= start)
        })
}

fn parse_range(token: &str) -> Option<(u32, u32)> {
    let (lo, hi) = match token.split_once('-') {
        Some((lo, hi)) => (lo, hi),
        None => (token, token),
    };
    let lo = u32::from_str_radix(lo, 16).ok()?;
    let hi = u32::from_str_radix(hi, 16).ok()?;
    (lo <= hi).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct Fixed(FontMetadata);

    impl MetadataProvider for Fixed {
        fn query(&self, _path: &Path) -> FontMetadata {
            self.0.clone()
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn font(name: &str) -> FontFile {
        FontFile::new(format!("/fonts/{}", name)).unwrap()
    }

    fn charset(descriptor: &str) -> FontMetadata {
        FontMetadata {
            family_name: Some("Plain Sans".to_string()),
            charset: Some(descriptor.to_string()),
        }
    }

    #[test]
    fn private_use_glyphs_mark_nerd_font() {
        let provider = Fixed(charset("20-7e a0-17f e0a0-e0a2"));
        assert!(is_nerd_font(&font("PlainSans-Regular.ttf"), &provider));
    }

    #[test]
    fn glyph_ranges_are_case_insensitive_and_overlap_checked() {
        assert!(charset_has_nerd_glyphs("20-7E F0FF"));
        assert!(charset_has_nerd_glyphs("dfff-e001"));
        assert!(charset_has_nerd_glyphs("eeee-f000"));
        assert!(!charset_has_nerd_glyphs("20-7e e400-efff f800-fffd"));
        assert!(!charset_has_nerd_glyphs("garbage 1e000x"));
    }

    #[test]
    fn plain_font_is_not_nerd() {
        let provider = Fixed(charset("20-7e a0-17f"));
        assert!(!is_nerd_font(&font("PlainSans-Regular.ttf"), &provider));
    }

    #[test]
    fn filename_markers_without_metadata() {
        let none = Fixed(FontMetadata::unavailable());
        assert!(is_nerd_font(&font("JetBrainsMono-NerdFont-Bold.ttf"), &none));
        assert!(is_nerd_font(&font("Hack-NF-Regular.ttf"), &none));
        assert!(is_nerd_font(&font("DejaVuSansMono-Powerline.ttf"), &none));
        assert!(!is_nerd_font(&font("FiraCode-Regular.ttf"), &none));
    }

    #[test]
    fn family_marker_counts() {
        let provider = Fixed(FontMetadata {
            family_name: Some("Meslo LG S Nerd Font".to_string()),
            charset: None,
        });
        assert!(is_nerd_font(&font("meslo.ttf"), &provider));
    }

    #[test]
    fn sentinel_family_is_ignored() {
        let provider = Fixed(FontMetadata {
            family_name: Some("Unknown Family".to_string()),
            charset: Some(String::new()),
        });
        assert!(!is_nerd_font(&font("Plain.ttf"), &provider));
    }

    #[test]
    fn extension_is_not_searched_for_markers() {
        let none = Fixed(FontMetadata::unavailable());
        assert!(!is_nerd_font(&font("Plain.nerd"), &none));
        assert!(is_nerd_font(&font("PlainNF.otf"), &none));
    }
}
