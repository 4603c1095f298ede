//! parser for PML object definitions containing tests

use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, TestCase};

mod definition;

pub use definition::{parse_definition, parse_reader, ParsingError};

/// Read a file and return an owned String, so that errors reported later
/// can refer back to the source.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read(filename) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(error) => Ok(decode_windows_1252(error.as_bytes())),
        },
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Characters for bytes 0x80 to 0x9F in Windows code page 1252. The five
/// bytes that code page leaves undefined map to the C1 control of the same
/// value.
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// PML sources written on Windows are usually in code page 1252 rather
/// than UTF-8. Outside 0x80..=0x9F it agrees with Latin-1.
fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => WINDOWS_1252_HIGH[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}

/// Parse the content of an object definition file into the TestCase it
/// declares.
pub fn parse(filename: &Path, content: &str) -> Result<TestCase, ParsingError> {
    let result = parse_definition(content);

    match result {
        Ok(case) => {
            debug!(
                "{}: found {} test{}{}{}",
                filename.display(),
                case.len(),
                if case.len() == 1 { "" } else { "s" },
                if case.has_set_up() { ", setUp" } else { "" },
                if case.has_tear_down() { ", tearDown" } else { "" }
            );
            Ok(case)
        }
        Err(error) => {
            debug!("{}: {}", filename.display(), error);
            Err(error)
        }
    }
}

#[cfg(test)]
#[path = "checks/definition.rs"]
mod check;

#[cfg(test)]
#[path = "checks/errors.rs"]
mod errors;
