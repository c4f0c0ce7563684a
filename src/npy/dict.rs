//! Header dictionary parsing.
//!
//! The header region is a restricted Python-literal dictionary such as
//!
//! ```text
//! {'descr': '<f8', 'fortran_order': False, 'shape': (2, 3), }
//! ```
//!
//! followed by space padding and a newline. The parser is a state machine
//! consuming one byte per transition over the buffered header region. It
//! tolerates arbitrary whitespace around tokens and either quote character
//! for strings; key order is not assumed. The `descr` and `shape` values are
//! parsed in two passes: the first pass measures (string length, dimension
//! count), then the scan position jumps back to the value start and the
//! second pass fills the allocation.

use log::trace;

use super::error::{NpyError, Result};

/// The three recognized dictionary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Descr,
    FortranOrder,
    Shape,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "descr" => Some(Self::Descr),
            "fortran_order" => Some(Self::FortranOrder),
            "shape" => Some(Self::Shape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the opening `{`.
    BeforeDict,
    /// Inside the dictionary, before the next key (or the closing `}`).
    BetweenPairs,
    /// Accumulating key characters up to the closing quote.
    Key,
    /// After the key, waiting for `:`.
    AfterKey,
    /// After `:`, skipping whitespace up to the value.
    AfterColon,
    /// Measuring the descr string (pass 1).
    DescrLen,
    /// Filling the descr string (pass 2).
    DescrCopy,
    /// Reading the single significant character of the order-flag literal.
    FortranOrder,
    /// Counting shape dimensions (pass 1).
    ShapeLen,
    /// Accumulating shape elements (pass 2).
    ShapeElems,
    /// After a value, waiting for `,` or `}`.
    WaitComma,
    /// After the closing `}`; trailing padding is ignored.
    Closing,
}

/// Parsed fields of the header dictionary.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HeaderDict {
    pub descr: String,
    pub fortran_order: bool,
    pub shape: Vec<u64>,
}

fn is_space(c: u8) -> bool {
    c == b' ' || c == b'\t' || c == b'\n'
}

/// Parses the buffered header region.
///
/// Keys the parser does not recognize, a missing opening `{`, and a header
/// that ends before the closing `}` are all format errors. Keys that are
/// simply absent leave their field at its default (empty descr, row-major,
/// empty shape).
pub fn parse(header: &[u8]) -> Result<HeaderDict> {
    let mut dict = HeaderDict::default();
    let mut state = State::BeforeDict;

    let mut key = String::new();
    // Index of the first byte of the current value body, for the pass-2 jump.
    let mut value_start = 0usize;
    let mut descr_len = 0usize;
    let mut shape_len = 0usize;
    let mut shape_i = 0usize;
    // Last significant byte seen in shape pass 1, to decide whether a final
    // element precedes the closing parenthesis.
    let mut last_sig = 0u8;

    let mut i = 0;
    while i < header.len() {
        let c = header[i];
        match state {
            State::BeforeDict => {
                if c != b'{' {
                    return Err(NpyError::InvalidHeader(
                        "expected '{' to open the header dictionary".to_string(),
                    ));
                }
                state = State::BetweenPairs;
            }
            State::BetweenPairs => {
                if c == b'\'' || c == b'"' {
                    key.clear();
                    state = State::Key;
                } else if c == b'}' {
                    state = State::Closing;
                }
                // ignore everything else between pairs
            }
            State::Key => {
                if c == b'\'' || c == b'"' {
                    state = State::AfterKey;
                } else {
                    key.push(c as char);
                }
            }
            State::AfterKey => {
                if c == b':' {
                    state = State::AfterColon;
                }
            }
            State::AfterColon => {
                if !is_space(c) {
                    let field = Field::from_key(&key).ok_or_else(|| {
                        NpyError::InvalidHeader(format!("unknown header key '{}'", key))
                    })?;
                    trace!("header key '{}' at offset {}", key, i);
                    match field {
                        Field::Descr => {
                            // c is the opening quote; the string body starts
                            // at the next byte.
                            value_start = i + 1;
                            descr_len = 0;
                            state = State::DescrLen;
                        }
                        Field::FortranOrder => {
                            // c is the first character of the literal itself;
                            // re-process it in the value state.
                            state = State::FortranOrder;
                            continue;
                        }
                        Field::Shape => {
                            // c is the opening parenthesis.
                            value_start = i + 1;
                            shape_len = 0;
                            last_sig = 0;
                            state = State::ShapeLen;
                        }
                    }
                }
            }
            State::DescrLen => {
                if c == b'\'' || c == b'"' {
                    dict.descr = String::with_capacity(descr_len);
                    state = State::DescrCopy;
                    i = value_start;
                    continue;
                }
                descr_len += 1;
            }
            State::DescrCopy => {
                if c == b'\'' || c == b'"' {
                    state = State::WaitComma;
                } else {
                    dict.descr.push(c as char);
                }
            }
            State::FortranOrder => {
                // Only the first character matters: 'T' of True. The rest of
                // the literal is swallowed by the comma-waiting state.
                dict.fortran_order = c == b'T';
                state = State::WaitComma;
            }
            State::ShapeLen => {
                if !is_space(c) {
                    if c == b',' {
                        last_sig = c;
                        shape_len += 1;
                    }
                    if c.is_ascii_digit() {
                        last_sig = c;
                    }
                    if c == b')' {
                        // A trailing comma before ')' does not add another
                        // element; a trailing digit does.
                        if last_sig.is_ascii_digit() {
                            shape_len += 1;
                        }
                        trace!("shape has {} dimensions", shape_len);
                        dict.shape = vec![0; shape_len];
                        shape_i = 0;
                        state = State::ShapeElems;
                        i = value_start;
                        continue;
                    }
                }
            }
            State::ShapeElems => {
                if !is_space(c) {
                    if c.is_ascii_digit() {
                        dict.shape[shape_i] = dict.shape[shape_i] * 10 + u64::from(c - b'0');
                    }
                    if c == b',' {
                        shape_i += 1;
                    }
                    if c == b')' {
                        state = State::WaitComma;
                    }
                }
            }
            State::WaitComma => {
                if c == b',' {
                    state = State::BetweenPairs;
                }
                if c == b'}' {
                    state = State::Closing;
                }
                // ignore everything else
            }
            State::Closing => {
                // trailing padding
            }
        }
        i += 1;
    }

    if state != State::Closing {
        return Err(NpyError::InvalidHeader(
            "unexpected end of header".to_string(),
        ));
    }

    Ok(dict)
}
