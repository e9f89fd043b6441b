//! Loading program images from their comma-separated text form.

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, NamedSource, Result};

use crate::error;
use crate::span::{Idx, Span};
use crate::Word;

/// Parse a comma-separated list of base-10 integers into an image.
///
/// Whitespace around each integer is ignored, so a trailing newline is fine.
pub fn parse(src: &str) -> Result<Vec<Word>> {
    if src.trim().is_empty() {
        return Err(error::load_empty(src));
    }

    let mut image = Vec::new();
    for cell in cells(src) {
        let text = &src[cell.as_range()];
        if text.is_empty() {
            return Err(error::load_missing(cell, src));
        }
        let value = text
            .parse::<Word>()
            .map_err(|e| error::load_bad_int(cell, src, e))?;
        image.push(value);
    }
    Ok(image)
}

/// Read and parse the image stored at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).into_diagnostic()?;
    parse(&contents).map_err(|report| {
        report.with_source_code(NamedSource::new(path.display().to_string(), contents.clone()))
    })
}

/// Spans of every cell with surrounding whitespace removed.
///
/// An empty cell yields an empty span positioned where the integer was expected.
fn cells(src: &str) -> impl Iterator<Item = Span> + '_ {
    let mut offs = 0;
    src.split(',').map(move |cell| {
        let leading = cell.len() - cell.trim_start().len();
        let span = Span::new(Idx(offs + leading), cell.trim().len());
        offs += cell.len() + 1;
        span
    })
}
