//! Base64 text form of binaries.
//!
//! Uses the alphabet `A-Z a-z 0-9 + -` without padding. A trailing group of
//! one or two bytes becomes two or three characters.

use base64::Engine;
use base64::alphabet::Alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::CTagError;

/// The 64 symbols, indexed by sextet value.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-";

const CTAG_ALPHABET: Alphabet = match Alphabet::new(ALPHABET) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("CTag base64 alphabet is malformed"),
};

const CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_allow_trailing_bits(true)
    .with_decode_padding_mode(DecodePaddingMode::RequireNone);

const ENGINE: GeneralPurpose = GeneralPurpose::new(&CTAG_ALPHABET, CONFIG);

/// Encodes bytes as base64 text.
pub fn encode_base64(bytes: &[u8]) -> String {
    ENGINE.encode(bytes)
}

/// Decodes base64 text into bytes.
///
/// Text of exactly one character is rejected; empty text decodes to nothing.
/// A lone symbol after the last full group carries no byte and is dropped.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CTagError> {
    let input = text.as_bytes();
    match input.len() {
        0 => return Ok(Vec::new()),
        1 => return Err(single_symbol()),
        _ => {}
    }

    let mut out = Vec::with_capacity(input.len() / 4 * 3 + 2);
    let full = input.len() - input.len() % 4;
    decode_group(&input[..full], &mut out)?;
    decode_group(&input[full..], &mut out)?;
    Ok(out)
}

/// Decodes symbols into bytes appended to `out`.
///
/// A trailing group of `n` symbols yields `n - 1` bytes; a lone symbol yields
/// nothing but must still belong to the alphabet.
pub(crate) fn decode_group(group: &[u8], out: &mut Vec<u8>) -> Result<(), CTagError> {
    match group {
        [] => Ok(()),
        [lone] => check_symbol(*lone),
        _ => ENGINE.decode_vec(group, out).map_err(CTagError::base64),
    }
}

/// Error for text holding exactly one symbol.
pub(crate) fn single_symbol() -> CTagError {
    CTagError::base64("text holds a single character, needs at least 2 or exactly 0")
}

fn check_symbol(c: u8) -> Result<(), CTagError> {
    if ALPHABET.as_bytes().contains(&c) {
        return Ok(());
    }
    Err(CTagError::base64(format!(
        "character {:?} is not in the alphabet",
        c as char
    )))
}
