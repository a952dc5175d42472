//! Value codec
//!
//! Converts typed values to the strings held by the store and back.
//!
//! ## Encoding
//!
//! | Static type | Stored form |
//! |-------------|-------------|
//! | integers of any width, floats, `bool`, `char`, `str`/`String` | textual literal (`42`, `1.5`, `true`, `x`) |
//! | newtype structs around a primitive | literal of the inner value |
//! | anything else (structs, enums, sequences, maps, `Option`, `()`) | JSON document |
//!
//! Primitive literals are locale-invariant and parse back losslessly.
//!
//! ## Decoding
//!
//! The representation is never tagged in the store. [`decode`] re-derives it
//! from the type the caller asks for:
//!
//! - primitives decode absent or empty input to their zero value;
//! - `String` decodes absent input to `""`;
//! - `Option<T>` decodes absent, empty or `null` input to `None` and parses
//!   anything else as JSON, so `Some("")` survives a round trip;
//! - composites parse JSON and fail with [`Error::Deserialization`] on absent
//!   or malformed input. This path is never defaulted.
//!
//! Asking for `i64` against a JSON document is a parse error, not a
//! negotiation: the caller owns the type contract.
//!
//! ```
//! use redkey_core::codec::{decode, encode};
//!
//! assert_eq!(encode(&42u32).unwrap(), "42");
//! assert_eq!(decode::<u32>(Some("42")).unwrap(), 42);
//! assert_eq!(decode::<u32>(None).unwrap(), 0);
//! assert_eq!(decode::<String>(None).unwrap(), "");
//! ```

mod de;
mod ser;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use de::WireDeserializer;
use ser::LiteralSerializer;

/// Stored form chosen for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Direct textual literal of a primitive
    Literal,
    /// JSON document
    Document,
}

/// Encode a value to its stored string
///
/// Primitives take the literal fast path; everything else is serialized as
/// JSON.
///
/// # Errors
///
/// Returns [`Error::Serialization`] only if the value's `Serialize` impl
/// itself fails (for example a map with non-string keys).
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    encode_with_encoding(value).map(|(stored, _)| stored)
}

/// Encode a value and report which stored form was used
pub fn encode_with_encoding<T: Serialize + ?Sized>(value: &T) -> Result<(String, Encoding)> {
    match value.serialize(LiteralSerializer) {
        Ok(literal) => Ok((literal, Encoding::Literal)),
        Err(_) => {
            let document = serde_json::to_string(value)
                .map_err(|e| Error::serialization(e.to_string()))?;
            tracing::trace!(target: "redkey::codec", len = document.len(), "Encoded document");
            Ok((document, Encoding::Document))
        }
    }
}

/// Encode every value, preserving order
pub fn encode_all<'a, T, I>(values: I) -> Result<Vec<String>>
where
    T: Serialize + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values.into_iter().map(encode).collect()
}

/// Decode a possibly-absent stored value into `T`
///
/// `None` means the store had no value (missing key, missing field, empty
/// pop).
pub fn decode<T: DeserializeOwned>(stored: Option<&str>) -> Result<T> {
    T::deserialize(WireDeserializer::new(stored))
}

/// Decode a present stored value into `T`
pub fn decode_str<T: DeserializeOwned>(stored: &str) -> Result<T> {
    decode(Some(stored))
}

/// Decode every stored value, preserving order and length
pub fn decode_all<T, I, S>(stored: I) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    stored
        .into_iter()
        .map(|s| decode_str(s.as_ref()))
        .collect()
}

/// Decode a batch where each slot may be absent
pub fn decode_all_optional<T: DeserializeOwned>(stored: &[Option<String>]) -> Result<Vec<T>> {
    stored.iter().map(|s| decode(s.as_deref())).collect()
}
