//! Fixed-width parser for the GV100AD municipality directory.
//!
//! Each line is one record. Only municipality records (type `60`) are kept.
//! The map goes from municipality name to its 8-digit regional key.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::{ArsError, ArsResult};

const RECORD_TYPE: (usize, usize) = (0, 2);
const ARS: (usize, usize) = (10, 18);
const MUNICIPALITY: (usize, usize) = (22, 72);
const MIN_LINE_LENGTH: usize = 72;
const MUNICIPALITY_RECORD: &str = "60";

/// Municipality name to regional key.
pub type ArsCodes = BTreeMap<String, String>;

/// Parse a single record, returning `(name, ars)` for municipality lines.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let chars: Vec<char> = line.chars().collect();

    if chars.len() < MIN_LINE_LENGTH {
        return None;
    }
    if column(&chars, RECORD_TYPE) != MUNICIPALITY_RECORD {
        return None;
    }

    let name = column(&chars, MUNICIPALITY).trim().to_string();
    if name.is_empty() {
        return None;
    }

    let ars = column(&chars, ARS).trim().to_string();
    Some((name, ars))
}

/// Parse a whole directory held in memory.
pub fn parse_str(content: &str) -> ArsCodes {
    content.lines().filter_map(parse_line).collect()
}

/// Parse a directory from any buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> ArsResult<ArsCodes> {
    let mut codes = ArsCodes::new();
    for line in reader.lines() {
        // Later records win, same as inserting into a map in file order
        if let Some((name, ars)) = parse_line(&line?) {
            codes.insert(name, ars);
        }
    }
    Ok(codes)
}

/// Parse a directory file.
pub fn parse_file(path: &Path) -> ArsResult<ArsCodes> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ArsError::FileNotFound(path.to_path_buf()),
        _ => ArsError::Io(e),
    })?;

    let codes = parse_reader(BufReader::new(file))?;
    debug!(path = %path.display(), count = codes.len(), "Parsed municipality directory");
    Ok(codes)
}

fn column(chars: &[char], (start, end): (usize, usize)) -> String {
    chars[start..end.min(chars.len())].iter().collect()
}
