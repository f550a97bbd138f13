//! Binary <-> text codec for WebAuthn material crossing JSON.
//!
//! Encodes as base64url without padding. Decoding is lenient: padded or
//! unpadded input, URL-safe or standard alphabet.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, thiserror::Error)]
#[error("invalid base64 input: {0}")]
pub struct DecodeError(#[from] base64::DecodeError);

pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    if text.contains(['+', '/']) {
        let normalized: String = text
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();
        return Ok(LENIENT_URL_SAFE.decode(normalized)?);
    }
    Ok(LENIENT_URL_SAFE.decode(text)?)
}
