//! Feature input for the upload, validate and estimate commands.
//!
//! Every argument is a file, a directory (walked recursively), a coordinate
//! pair, or `-` for stdin; no arguments at all means stdin. Records are read
//! one line at a time and only when the consumer asks for the next one.

use serde_json::Value;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tilesets_core::feature::point_feature;
use tilesets_core::{Result, TilesetsError};
use tracing::debug;

/// ASCII record separator used by GeoJSON text sequences (RFC 8142).
const RS: char = '\u{1e}';

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    /// A coordinate pair given directly on the command line.
    Inline(String),
}

/// Resolves command-line arguments into an ordered list of sources.
pub fn sources(args: &[String]) -> Result<Vec<Source>> {
    if args.is_empty() {
        return Ok(vec![Source::Stdin]);
    }
    let mut out = Vec::new();
    for arg in args {
        let path = Path::new(arg);
        if arg == "-" {
            out.push(Source::Stdin);
        } else if path.is_dir() {
            walk(path, &mut out)?;
        } else if path.exists() || coordinate_pair(arg).is_none() {
            out.push(Source::File(path.to_path_buf()));
        } else {
            out.push(Source::Inline(arg.clone()));
        }
    }
    Ok(out)
}

fn walk(dir: &Path, out: &mut Vec<Source>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            walk(&path, out)?;
        } else {
            out.push(Source::File(path));
        }
    }
    Ok(())
}

/// Lazy feature stream over a list of sources.
pub struct FeatureReader {
    sources: VecDeque<Source>,
    current: Option<Box<dyn BufRead>>,
    pending: VecDeque<Value>,
    line: String,
}

impl FeatureReader {
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            sources: sources.into(),
            current: None,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }

    pub fn from_args(args: &[String]) -> Result<Self> {
        Ok(Self::new(sources(args)?))
    }

    /// Opens the next source; inline pairs are queued directly.
    fn advance(&mut self) -> Result<bool> {
        while let Some(source) = self.sources.pop_front() {
            match source {
                Source::Stdin => {
                    self.current = Some(Box::new(BufReader::new(io::stdin())));
                    return Ok(true);
                }
                Source::File(path) => {
                    debug!(path = %path.display(), "reading features");
                    let file = File::open(&path).map_err(|e| {
                        io::Error::new(e.kind(), format!("{}: {e}", path.display()))
                    })?;
                    self.current = Some(Box::new(BufReader::new(file)));
                    return Ok(true);
                }
                Source::Inline(text) => {
                    if let Some((lng, lat)) = coordinate_pair(&text) {
                        self.pending.push_back(point_feature(lng, lat));
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    fn read_record(&mut self) -> Result<Option<String>> {
        loop {
            let Some(reader) = self.current.as_mut() else {
                return Ok(None);
            };
            self.line.clear();
            if reader.read_line(&mut self.line)? == 0 {
                self.current = None;
                return Ok(None);
            }
            let record = self.line.trim_matches(|c: char| c == RS || c.is_whitespace());
            if !record.is_empty() {
                return Ok(Some(record.to_string()));
            }
        }
    }

    fn next_feature(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(feature) = self.pending.pop_front() {
                return Ok(Some(feature));
            }
            if let Some(record) = self.read_record()? {
                self.pending.extend(parse_record(&record)?);
                continue;
            }
            if !self.advance()? {
                return Ok(None);
            }
        }
    }
}

impl Iterator for FeatureReader {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_feature() {
            Ok(Some(feature)) => Some(Ok(feature)),
            Ok(None) => None,
            Err(e) => {
                // Stop after the first error.
                self.sources.clear();
                self.current = None;
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}

/// Parses one non-empty line into zero or more features.
pub fn parse_record(record: &str) -> Result<Vec<Value>> {
    if !record.starts_with('{') {
        if let Some((lng, lat)) = coordinate_pair(record) {
            return Ok(vec![point_feature(lng, lat)]);
        }
    }
    let value: Value = serde_json::from_str(record)?;
    match value.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => match value.get("features") {
            Some(Value::Array(features)) => Ok(features.clone()),
            _ => Err(TilesetsError::Usage(
                "FeatureCollection has no features array".into(),
            )),
        },
        _ => Ok(vec![value]),
    }
}

/// Reads `[lng, lat]`, `lng, lat` or `lng lat`.
pub fn coordinate_pair(text: &str) -> Option<(f64, f64)> {
    let inner = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    let mut parts = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let lng = parts.next()?.parse().ok()?;
    let lat = parts.next()?.parse().ok()?;
    match parts.next() {
        None => Some((lng, lat)),
        Some(_) => None,
    }
}
