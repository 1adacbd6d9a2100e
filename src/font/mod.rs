//! Font classification: format category, Nerd Font detection and family names

pub mod family;
pub mod format;
pub mod metadata;
pub mod nerd;

pub use family::{resolve_family, resolve_family_with};
pub use format::{classify, is_font_extension};
pub use metadata::{provider_for, FcQuery, MetadataProvider, NativeReader, NoMetadata};
pub use nerd::{is_nerd_font, is_nerd_font_with};
