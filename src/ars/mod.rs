//! Official regional keys (Amtlicher Regionalschlüssel, ARS).
//!
//! - `parser`: reads the fixed-width GV100AD directory
//! - `registry`: loads it once and answers lookups

mod error;
pub mod parser;
mod registry;


pub use error::{ArsError, ArsResult};
pub use parser::{ArsCodes, parse_file, parse_reader, parse_str};
pub use registry::ArsRegistry;

const DISTRICT_DIGITS: usize = 5;
const DISTRICT_KEY_LEN: usize = 12;

/// District-level key that the NINA dashboard is indexed by.
///
/// Keeps the first five digits (state, government region, district) and
/// pads with zeros to twelve digits: `09162000` becomes `091620000000`.
pub fn district_key(ars: &str) -> ArsResult<String> {
    let ars = ars.trim();
    let valid = matches!(ars.len(), 8 | DISTRICT_KEY_LEN) && ars.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(ArsError::InvalidKey(ars.to_string()));
    }

    Ok(format!(
        "{:0<width$}",
        &ars[..DISTRICT_DIGITS],
        width = DISTRICT_KEY_LEN
    ))
}
