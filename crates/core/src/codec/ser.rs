//! Primitive literal serializer
//!
//! A `serde::Serializer` that succeeds only when the value reaches the serde
//! data model as a single primitive (bool, integer, float, char, str). Any
//! other shape reports [`LiteralError::NotPrimitive`] on the first call, and the
//! caller falls back to a JSON document.
//!
//! Newtype structs are transparent, so `UserId(42)` encodes as `42`. Options
//! are never literals: a bare `Some("")` or `Some("null")` would read back as
//! `None`.

use serde::ser::{self, Impossible, Serialize};
use std::fmt;

#[derive(Debug)]
pub(crate) enum LiteralError {
    NotPrimitive,
    Custom(String),
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralError::NotPrimitive => f.write_str("value is not a primitive literal"),
            LiteralError::Custom(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for LiteralError {}

impl ser::Error for LiteralError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        LiteralError::Custom(msg.to_string())
    }
}

type Reject = Impossible<String, LiteralError>;

/// Serializer producing the invariant textual literal of a primitive value
pub(crate) struct LiteralSerializer;

impl ser::Serializer for LiteralSerializer {
    type Ok = String;
    type Error = LiteralError;

    type SerializeSeq = Reject;
    type SerializeTuple = Reject;
    type SerializeTupleStruct = Reject;
    type SerializeTupleVariant = Reject;
    type SerializeMap = Reject;
    type SerializeStruct = Reject;
    type SerializeStructVariant = Reject;

    fn serialize_bool(self, v: bool) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    // `Display` for floats is locale-free and prints the shortest string
    // that parses back to the same value.
    fn serialize_f32(self, v: f32) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String, LiteralError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, LiteralError> {
        Ok(v.to_owned())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_none(self) -> Result<String, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<String, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_unit(self) -> Result<String, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<String, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, LiteralError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, LiteralError> {
        Err(LiteralError::NotPrimitive)
    }
}
