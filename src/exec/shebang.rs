// src/exec/shebang.rs

//! `#!` interpreter line parsing.

use std::io::{BufRead, BufReader, Read};

/// Upper bound on how much of the first line is read.
pub const MAX_SHEBANG_LEN: u64 = 4096;

/// Why a file has no usable interpreter line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShebangError {
    Missing,
    Empty,
    NotUtf8,
    Read(String),
}

impl std::fmt::Display for ShebangError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShebangError::Missing => write!(f, "no '#!' interpreter line"),
            ShebangError::Empty => write!(f, "'#!' line names no interpreter"),
            ShebangError::NotUtf8 => write!(f, "'#!' line is not valid UTF-8"),
            ShebangError::Read(e) => write!(f, "could not read first line: {e}"),
        }
    }
}

/// Read the first line of `reader` and tokenize its `#!` directive.
///
/// `#!/bin/sh -e` yields `["/bin/sh", "-e"]`.
pub fn read_shebang(reader: impl Read) -> Result<Vec<String>, ShebangError> {
    let mut first_line = Vec::new();
    BufReader::new(reader.take(MAX_SHEBANG_LEN))
        .read_until(b'\n', &mut first_line)
        .map_err(|e| ShebangError::Read(e.to_string()))?;

    parse_shebang(&first_line)
}

/// Tokenize a single line. The trailing line terminator is optional.
pub fn parse_shebang(line: &[u8]) -> Result<Vec<String>, ShebangError> {
    let line = line.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(line);
    let Some(rest) = line.strip_prefix(b"#!") else {
        return Err(ShebangError::Missing);
    };

    let rest = std::str::from_utf8(rest).map_err(|_| ShebangError::NotUtf8)?;
    let tokens: Vec<String> = rest.split_ascii_whitespace().map(str::to_string).collect();

    if tokens.is_empty() {
        return Err(ShebangError::Empty);
    }
    Ok(tokens)
}
