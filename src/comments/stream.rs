//! NDJSON plumbing for the comment converter.
//!
//! Input is one JSON object per line, from a file or stdin; output is the
//! converted records, one per line, in input order. Records are processed
//! one at a time so memory use stays flat regardless of file size.

use crate::Result;
use crate::comments::reshape;

use anyhow::Context;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

/// Open the conversion input: `-` selects stdin, anything else is a path.
pub fn open_input(file: &str) -> Result<Box<dyn BufRead>> {
    if file == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let fh = File::open(file).with_context(|| format!("read comments file {}", file))?;
        Ok(Box::new(BufReader::new(fh)))
    }
}

/// Convert every record on `reader`, writing one JSON object per line.
///
/// A line that does not hold a JSON object aborts the run with an error
/// naming the offending line; output written so far is not rolled back.
/// Returns the number of converted records.
pub fn convert(reader: impl BufRead, mut writer: impl Write) -> Result<usize> {
    let mut count = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.with_context(|| format!("read comment at line {}", lno))?;

        let record: Map<String, Value> = serde_json::from_str(&line)
            .with_context(|| format!("comment parse error at line {}: {:?}", lno, line))?;

        serde_json::to_writer(&mut writer, &reshape(record))
            .with_context(|| format!("write converted comment from line {}", lno))?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
