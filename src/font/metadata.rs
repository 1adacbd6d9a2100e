use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use font_kit::font::Font;
use tracing::debug;
use ttf_parser::Face;

use crate::error::{Error, Result};
use crate::models::{FontMetadata, MetadataBackend};
use crate::utils::exec;

/// Something that can tell us a font's declared family and codepoint coverage.
///
/// Implementations never fail: anything that goes wrong is reported as
/// [`FontMetadata::unavailable`] and callers fall back to filename heuristics.
pub trait MetadataProvider: Send + Sync {
    fn query(&self, path: &Path) -> FontMetadata;

    /// Short name used in log output
    fn name(&self) -> &'static str;
}

/// Provider for runs that rely on filenames alone
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataProvider for NoMetadata {
    fn query(&self, _path: &Path) -> FontMetadata {
        FontMetadata::unavailable()
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Queries fontconfig's `fc-query` for the first face of each file
#[derive(Debug, Clone)]
pub struct FcQuery {
    program: PathBuf,
}

impl FcQuery {
    pub const PROGRAM: &'static str = "fc-query";
    const FORMAT: &'static str = "%{family[0]}\n%{charset}\n";

    /// Locate `fc-query` on `PATH`
    pub fn locate() -> Option<Self> {
        exec::find_program(Self::PROGRAM).map(|program| Self { program })
    }

    fn run(&self, path: &Path) -> Result<FontMetadata> {
        let program = self.program.to_string_lossy();
        let path_arg = path.to_string_lossy();
        let output = exec::run(&program, &["-i", "0", "-f", Self::FORMAT, &path_arg])?;
        Ok(parse_fc_query_output(&output.stdout))
    }
}

impl MetadataProvider for FcQuery {
    fn query(&self, path: &Path) -> FontMetadata {
        self.run(path).unwrap_or_else(|e| {
            debug!("fc-query gave no metadata for {}: {}", path.display(), e);
            FontMetadata::unavailable()
        })
    }

    fn name(&self) -> &'static str {
        Self::PROGRAM
    }
}

/// Split `fc-query` output into family (first line) and charset (second line)
pub fn parse_fc_query_output(stdout: &str) -> FontMetadata {
    let mut lines = stdout.lines();
    let family_name = lines
        .next()
        .map(|line| line.split(',').next().unwrap_or("").trim().to_string())
        .filter(|family| !family.is_empty());
    let charset = lines
        .next()
        .map(|line| line.trim().to_string())
        .filter(|charset| !charset.is_empty());

    FontMetadata {
        family_name,
        charset,
    }
}

/// Reads sfnt fonts in process: family via font-kit, coverage via ttf-parser's cmap
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeReader;

impl NativeReader {
    fn read(&self, path: &Path) -> Result<FontMetadata> {
        let data = fs::read(path)?;
        if !has_sfnt_magic(&data) {
            return Err(Error::Metadata(format!(
                "{} is not a TrueType/OpenType file",
                path.display()
            )));
        }

        let charset = Face::parse(&data, 0)
            .ok()
            .map(|face| unicode_coverage(&face))
            .filter(|ranges| !ranges.is_empty())
            .map(|ranges| format_charset(&ranges));

        let family_name = match Font::from_bytes(Arc::new(data), 0) {
            Ok(font) => Some(font.family_name()).filter(|family| !family.trim().is_empty()),
            Err(e) => {
                debug!("font-kit could not load {}: {}", path.display(), e);
                None
            }
        };

        Ok(FontMetadata {
            family_name,
            charset,
        })
    }
}

impl MetadataProvider for NativeReader {
    fn query(&self, path: &Path) -> FontMetadata {
        self.read(path).unwrap_or_else(|e| {
            debug!("No native metadata for {}: {}", path.display(), e);
            FontMetadata::unavailable()
        })
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

/// Build the provider a configuration asks for
pub fn provider_for(backend: MetadataBackend) -> Result<Box<dyn MetadataProvider>> {
    let provider: Box<dyn MetadataProvider> = match backend {
        MetadataBackend::Auto => match FcQuery::locate() {
            Some(fc_query) => Box::new(fc_query),
            None => {
                debug!("fc-query not found, reading font metadata natively");
                Box::new(NativeReader)
            }
        },
        MetadataBackend::FcQuery => Box::new(FcQuery::locate().ok_or_else(|| {
            Error::Config(format!("{} was requested but is not on PATH", FcQuery::PROGRAM))
        })?),
        MetadataBackend::Native => Box::new(NativeReader),
        MetadataBackend::None => Box::new(NoMetadata),
    };
    Ok(provider)
}

fn has_sfnt_magic(data: &[u8]) -> bool {
    matches!(
        data.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true")
    )
}

/// Sorted, merged codepoint ranges covered by the font's Unicode cmap subtables
fn unicode_coverage(face: &Face) -> Vec<(u32, u32)> {
    let mut codepoints = Vec::new();
    if let Some(cmap) = face.tables().cmap {
        for subtable in cmap.subtables {
            if subtable.is_unicode() {
                subtable.codepoints(|cp| codepoints.push(cp));
            }
        }
    }
    codepoints.sort_unstable();
    codepoints.dedup();

    let mut ranges: Vec<(u32, u32)> = Vec::new();
    for cp in codepoints {
        match ranges.last_mut() {
            Some((_, hi)) if *hi + 1 == cp => *hi = cp,
            _ => ranges.push((cp, cp)),
        }
    }
    ranges
}

/// Render ranges the way `fc-query` prints a charset
fn format_charset(ranges: &[(u32, u32)]) -> String {
    ranges
        .iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                format!("{:x}", lo)
            } else {
                format!("{:x}-{:x}", lo, hi)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
