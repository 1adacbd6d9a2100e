use crate::models::FormatCategory;

/// Known font extensions and the category each one is filed under
pub const FORMAT_TABLE: &[(&str, FormatCategory)] = &[
    ("ttf", FormatCategory::TrueType),
    ("otf", FormatCategory::OpenType),
    ("woff", FormatCategory::WebFonts),
    ("woff2", FormatCategory::WebFonts),
    ("pfb", FormatCategory::Type1),
    ("pfa", FormatCategory::Type1),
    ("pfm", FormatCategory::Type1),
];

/// Map a file extension (with or without the leading dot) to its format category
pub fn classify(extension: &str) -> FormatCategory {
    let extension = extension.trim_start_matches('.');
    FORMAT_TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(extension))
        .map(|(_, category)| *category)
        .unwrap_or(FormatCategory::Unknown)
}

/// Whether files with this extension are picked up during discovery
pub fn is_font_extension(extension: &str) -> bool {
    classify(extension) != FormatCategory::Unknown
}
