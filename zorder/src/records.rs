use morton::{Encoder, MortonError};
use std::num::ParseFloatError;
use std::str::Utf8Error;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("line is not valid UTF-8: {0}")]
    Encoding(Utf8Error),
    #[error("expected two comma separated values, found {0}")]
    TokenCount(usize),
    #[error("unable to parse {token:?} as a number: {source}")]
    BadNumber {
        token: String,
        source: ParseFloatError,
    },
}

/// Why a single input line produced no code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Encode(#[from] MortonError),
}

/// Parses a `x,y` line. Whitespace around the line and around each value is ignored.
pub fn parse_record(line: &str) -> Result<(f64, f64), ParseError> {
    let tokens: Vec<&str> = line.trim().split(',').collect();
    if tokens.len() != 2 {
        return Err(ParseError::TokenCount(tokens.len()));
    }
    let parse = |token: &str| {
        let token = token.trim();
        token.parse::<f64>().map_err(|source| ParseError::BadNumber {
            token: token.to_owned(),
            source,
        })
    };
    Ok((parse(tokens[0])?, parse(tokens[1])?))
}

pub fn encode_record(line: &str, encoder: &Encoder) -> Result<u64, RecordError> {
    let (x, y) = parse_record(line)?;
    Ok(encoder.encode(x, y)?)
}
