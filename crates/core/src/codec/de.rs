//! Wire value deserializer
//!
//! A `serde::Deserializer` over an optional stored string. What it does is
//! decided by which `deserialize_*` hook the target type calls:
//!
//! - primitive hooks parse the literal, and absent/empty input yields the
//!   zero value (`0`, `0.0`, `false`, `'\0'`, `""`);
//! - `deserialize_option` maps absent, empty and `null` to `None` and reads
//!   anything else as a JSON document;
//! - every composite hook parses a JSON document and fails on absent input.

use serde::de::{self, Deserializer as _, Visitor};
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::deserialization(msg.to_string())
    }
}

/// Deserializer for one stored value
#[derive(Debug)]
pub(crate) struct WireDeserializer<'de> {
    input: Option<&'de str>,
}

impl<'de> WireDeserializer<'de> {
    pub(crate) fn new(input: Option<&'de str>) -> Self {
        Self { input }
    }

    /// Present, non-empty input
    fn literal(&self) -> Option<&'de str> {
        self.input.filter(|s| !s.is_empty())
    }

    fn parse<T>(&self) -> Result<T>
    where
        T: FromStr + Default,
        T::Err: Display,
    {
        match self.literal() {
            None => Ok(T::default()),
            Some(raw) => raw.parse::<T>().map_err(|e| {
                Error::deserialization(format!(
                    "invalid {} literal {:?}: {}",
                    std::any::type_name::<T>(),
                    raw,
                    e
                ))
            }),
        }
    }

    fn document(
        &self,
        expected: &str,
    ) -> Result<serde_json::Deserializer<serde_json::de::StrRead<'de>>> {
        match self.literal() {
            Some(raw) => Ok(serde_json::Deserializer::from_str(raw)),
            None => Err(Error::deserialization(format!(
                "no stored value for composite type {}",
                expected
            ))),
        }
    }
}

/// Runs a composite hook against the JSON document and rejects trailing input
macro_rules! delegate_document {
    ($self:ident, $expected:expr, |$de:ident| $call:expr) => {{
        let mut $de = $self.document($expected)?;
        let value = $call?;
        $de.end()?;
        Ok(value)
    }};
}

macro_rules! deserialize_number {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                visitor.$visit(self.parse::<$ty>()?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for WireDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        delegate_document!(self, "any", |doc| (&mut doc).deserialize_any(visitor))
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let value = match self.literal() {
            None => false,
            Some(raw) if raw.eq_ignore_ascii_case("true") || raw == "1" => true,
            Some(raw) if raw.eq_ignore_ascii_case("false") || raw == "0" => false,
            Some(raw) => {
                return Err(Error::deserialization(format!(
                    "invalid bool literal {:?}",
                    raw
                )))
            }
        };
        visitor.visit_bool(value)
    }

    deserialize_number! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let Some(raw) = self.literal() else {
            return visitor.visit_char('\0');
        };
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::deserialization(format!(
                "invalid char literal {:?}: expected exactly one character",
                raw
            ))),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(self.input.unwrap_or(""))
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        delegate_document!(self, "bytes", |doc| (&mut doc).deserialize_bytes(visitor))
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        delegate_document!(self, "bytes", |doc| (&mut doc).deserialize_byte_buf(visitor))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.literal() {
            None | Some("null") => visitor.visit_none(),
            Some(_) => {
                delegate_document!(self, "option", |doc| (&mut doc).deserialize_option(visitor))
            }
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.literal() {
            None => visitor.visit_unit(),
            Some(_) => delegate_document!(self, "()", |doc| (&mut doc).deserialize_unit(visitor)),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        match self.literal() {
            None => visitor.visit_unit(),
            Some(_) => delegate_document!(self, name, |doc| (&mut doc)
                .deserialize_unit_struct(name, visitor)),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        delegate_document!(self, "sequence", |doc| (&mut doc).deserialize_seq(visitor))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        delegate_document!(self, "tuple", |doc| (&mut doc).deserialize_tuple(len, visitor))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        delegate_document!(self, name, |doc| (&mut doc)
            .deserialize_tuple_struct(name, len, visitor))
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        delegate_document!(self, "map", |doc| (&mut doc).deserialize_map(visitor))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        delegate_document!(self, name, |doc| (&mut doc)
            .deserialize_struct(name, fields, visitor))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        delegate_document!(self, name, |doc| (&mut doc)
            .deserialize_enum(name, variants, visitor))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}
