//! Text codec: ordered list of strings <-> single base64 token.
//!
//! The list is serialized as a JSON array, the JSON text is taken as UTF-8
//! bytes and those bytes are base64 encoded with the standard alphabet. Every
//! step works on bytes, so any Unicode content survives unchanged.

use alloc::string::String;
use alloc::vec::Vec;
use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use serde_json::Value;

use crate::error::*;

/// Standard alphabet that, like `atob`, also accepts tokens missing their `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes `lines` into a base64 token.
pub fn encode_lines<S: AsRef<str>>(lines: &[S]) -> Result<String> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let json = serde_json::to_string(&lines)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Decodes a token produced by [`encode_lines`].
pub fn decode_lines(token: &str) -> Result<Vec<String>> {
    let bytes = LENIENT.decode(token.trim())?;
    let json = String::from_utf8(bytes)?;

    // parse loosely first so a well-formed non-array is reported as such
    let Value::Array(items) = serde_json::from_str::<Value>(&json)? else {
        return Err(CodecError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(line) => Ok(line),
            _ => Err(CodecError::NotAString { index }),
        })
        .collect()
}

/// Like [`encode_lines`], but logs the failure and returns an empty token.
pub fn encode_lines_or_empty<S: AsRef<str>>(lines: &[S]) -> String {
    encode_lines(lines).unwrap_or_else(|err| {
        log::error!("Error encoding lines: {}", err);
        String::new()
    })
}

/// Like [`decode_lines`], but logs the failure and returns an empty list.
pub fn decode_lines_or_empty(token: &str) -> Vec<String> {
    decode_lines(token).unwrap_or_else(|err| {
        log::error!("Error decoding lines: {}", err);
        Vec::new()
    })
}
