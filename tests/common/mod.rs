#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fontcanon::font::MetadataProvider;
use fontcanon::models::FontMetadata;

/// Metadata provider answering from a table keyed by file name
#[derive(Default)]
pub struct FakeMetadata {
    by_name: HashMap<String, FontMetadata>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family(mut self, file_name: &str, family: &str) -> Self {
        self.by_name.insert(
            file_name.to_string(),
            FontMetadata {
                family_name: Some(family.to_string()),
                charset: Some("20-7e a0-ff".to_string()),
            },
        );
        self
    }

    pub fn with_charset(mut self, file_name: &str, family: &str, charset: &str) -> Self {
        self.by_name.insert(
            file_name.to_string(),
            FontMetadata {
                family_name: Some(family.to_string()),
                charset: Some(charset.to_string()),
            },
        );
        self
    }
}

impl MetadataProvider for FakeMetadata {
    fn query(&self, path: &Path) -> FontMetadata {
        path.file_name()
            .and_then(|name| self.by_name.get(name.to_string_lossy().as_ref()))
            .cloned()
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Write a fake font file, creating parent directories
pub fn write_font(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Every file under `root` as a sorted list of paths relative to it
pub fn tree(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
