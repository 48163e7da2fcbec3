// crates/tilesets-core/src/api/upload.rs

use crate::error::{Result, TilesetsError};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use tracing::debug;

/// Writes each feature as compact JSON followed by `\n`.
///
/// Pulls the stream lazily, so a validating stream aborts at the first bad
/// feature. Returns the number of features written.
pub fn write_features<W, I, E>(mut out: W, features: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = std::result::Result<Value, E>>,
    TilesetsError: From<E>,
{
    let mut count = 0;
    for feature in features {
        serde_json::to_writer(&mut out, &feature?)?;
        out.write_all(b"\n")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

/// A line-delimited upload body spooled to an anonymous temporary file.
#[derive(Debug)]
pub struct SpooledBody {
    pub file: File,
    pub len: u64,
    pub features: usize,
}

impl SpooledBody {
    pub fn from_features<I, E>(features: I) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<Value, E>>,
        TilesetsError: From<E>,
    {
        let mut file = tempfile::tempfile()?;
        let count = write_features(BufWriter::new(&mut file), features)?;
        let len = file.seek(SeekFrom::End(0))?;
        file.rewind()?;
        debug!(features = count, bytes = len, "spooled upload body");
        Ok(Self {
            file,
            len,
            features: count,
        })
    }
}

pub type ProgressFn = Box<dyn FnMut(u64, u64) + Send>;

/// Reader that reports `(bytes_read, total)` after every read.
pub struct ProgressReader<R> {
    inner: R,
    read: u64,
    total: u64,
    on_progress: ProgressFn,
}

impl<R: Read> ProgressReader<R> {
    pub fn new(inner: R, total: u64, on_progress: ProgressFn) -> Self {
        Self {
            inner,
            read: 0,
            total,
            on_progress,
        }
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.read += n as u64;
        (self.on_progress)(self.read, self.total);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn writes_compact_lines_in_key_order() {
        let features = vec![
            json!({"id": 1, "type": "Feature", "geometry": {"type": "Point", "coordinates": [125.6, 10.1]}, "properties": {"name": "Dinagat Islands"}}),
            json!({"id": 3, "delete": true}),
        ];
        let mut out = Vec::new();
        let n = write_features(&mut out, features.into_iter().map(Ok::<_, TilesetsError>)).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"id\":1,\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\",\"coordinates\":[125.6,10.1]},\"properties\":{\"name\":\"Dinagat Islands\"}}\n{\"id\":3,\"delete\":true}\n"
        );
    }

    #[test]
    fn stops_at_first_error() {
        let items: Vec<std::result::Result<Value, TilesetsError>> = vec![
            Ok(json!({"a": 1})),
            Err(TilesetsError::Usage("boom".into())),
            Ok(json!({"b": 2})),
        ];
        let mut out = Vec::new();
        assert!(write_features(&mut out, items).is_err());
        assert_eq!(out, b"{\"a\":1}\n");
    }

    #[test]
    fn spooled_body_is_rewound() {
        let body = SpooledBody::from_features(vec![Ok::<_, TilesetsError>(json!({"a": 1}))]).unwrap();
        assert_eq!(body.len, 8);
        assert_eq!(body.features, 1);
        let mut text = String::new();
        let mut file = body.file;
        file.read_to_string(&mut text).unwrap();
        assert_eq!(text, "{\"a\":1}\n");
    }

    #[test]
    fn progress_reaches_total() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut reader = ProgressReader::new(
            &b"0123456789"[..],
            10,
            Box::new(move |read, total| sink.lock().unwrap().push((read, total))),
        );
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).unwrap();
        assert_eq!(seen.lock().unwrap().iter().rev().find(|(r, _)| *r > 0), Some(&(10, 10)));
    }
}
