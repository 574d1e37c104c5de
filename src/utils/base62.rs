//! Fixed-width base62 encoding of store identifiers into short codes.
//!
//! Short codes are a pure function of the record identifier: the identifier is
//! written in base 62 using the alphabet `0-9a-zA-Z` and left-padded with `'0'`
//! to [`CODE_LENGTH`] characters. Because store identifiers are never reused,
//! two records can never share a code.

use thiserror::Error;

/// Symbols in digit order: digits, lowercase, uppercase.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Width of every encoded short code.
pub const CODE_LENGTH: usize = 7;

/// Largest identifier that fits in [`CODE_LENGTH`] symbols (`62^7 - 1`).
pub const MAX_ID: u64 = 3_521_614_606_207;

const BASE: u64 = 62;

/// Errors produced by [`encode`] and [`decode`].
///
/// Both indicate a broken contract between the store and the encoder rather
/// than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base62Error {
    #[error("identifier {id} exceeds the largest encodable identifier {max}", max = MAX_ID)]
    EncodingOverflow { id: u64 },

    #[error("invalid base62 character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("code {0:?} does not fit in a 64-bit identifier")]
    DecodeOverflow(String),
}

/// Encodes an identifier as a [`CODE_LENGTH`]-character base62 code.
///
/// # Errors
///
/// Returns [`Base62Error::EncodingOverflow`] when `id > MAX_ID`; the code is
/// never silently widened.
///
/// # Examples
///
/// ```
/// use url_redirector::utils::base62::encode;
///
/// assert_eq!(encode(0).unwrap(), "0000000");
/// assert_eq!(encode(1).unwrap(), "0000001");
/// assert_eq!(encode(1_000_000).unwrap(), "0004c92");
/// ```
pub fn encode(id: u64) -> Result<String, Base62Error> {
    if id > MAX_ID {
        return Err(Base62Error::EncodingOverflow { id });
    }

    let mut digits = [ALPHABET[0]; CODE_LENGTH];
    let mut remaining = id;

    // Least-significant digit lands in the last slot; untouched slots keep the padding.
    for slot in digits.iter_mut().rev() {
        if remaining == 0 {
            break;
        }
        *slot = ALPHABET[(remaining % BASE) as usize];
        remaining /= BASE;
    }

    Ok(digits.iter().map(|&b| b as char).collect())
}

/// Decodes a base62 code back into its identifier.
///
/// Leading `'0'` symbols are padding and contribute nothing. Codes of any
/// length are accepted as long as the value fits in a `u64`.
///
/// # Errors
///
/// - [`Base62Error::InvalidCharacter`] for a symbol outside [`ALPHABET`]
/// - [`Base62Error::DecodeOverflow`] when the value exceeds `u64::MAX`
pub fn decode(code: &str) -> Result<u64, Base62Error> {
    code.chars()
        .enumerate()
        .try_fold(0u64, |acc, (position, ch)| {
            let digit = symbol_value(ch).ok_or(Base62Error::InvalidCharacter { ch, position })?;

            acc.checked_mul(BASE)
                .and_then(|shifted| shifted.checked_add(digit))
                .ok_or_else(|| Base62Error::DecodeOverflow(code.to_string()))
        })
}

/// Returns true when `code` has the exact shape of an encoded short code.
///
/// Handlers use this to answer "not found" for impossible codes without
/// touching the cache or the store.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| symbol_value(c).is_some())
}

fn symbol_value(ch: char) -> Option<u64> {
    let value = match ch {
        '0'..='9' => ch as u64 - '0' as u64,
        'a'..='z' => ch as u64 - 'a' as u64 + 10,
        'A'..='Z' => ch as u64 - 'A' as u64 + 36,
        _ => return None,
    };
    Some(value)
}
