/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

use crate::NoMemory;

/// Value type of an attribute, as returned by
/// [AttributeCursor::kind()](crate::AttributeCursor::kind).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeType {
    Integer,
    Float,
    String,
    /// Returned for null cursors.
    Unknown,
}

/// A typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    /// Classifies the attribute text.
    ///
    /// Decimal digits give an integer. Digits with a single `.` or `,`
    /// separator give a float. Anything else, including a sign or an
    /// integer too big for the accumulator, keeps the text as is.
    ///
    /// Fractional digits are summed in single precision, one digit at
    /// a time, so `"1.23"` gives `1.0f32 + 0.2 + 0.03` widened to
    /// `f64`.
    pub fn infer(text: &str) -> Result<AttributeValue, NoMemory> {
        let mut int: i64 = 0;
        let mut float: f32 = 0.0;
        let mut is_float = false;

        for &c in text.as_bytes() {
            if matches!(c, b'.' | b',') && !is_float {
                is_float = true;
                float = int as f32;
                int = 1;
                continue;
            }
            if !c.is_ascii_digit() {
                return Ok(AttributeValue::Text(owned(text)?));
            }
            let digit = i64::from(c - b'0');
            let next = if is_float {
                int.checked_mul(10)
            } else {
                int.checked_mul(10).and_then(|n| n.checked_add(digit))
            };
            let Some(next) = next else {
                return Ok(AttributeValue::Text(owned(text)?));
            };
            if is_float {
                float += digit as f32 / next as f32;
            }
            int = next;
        }

        if is_float {
            Ok(AttributeValue::Float(f64::from(float)))
        } else {
            Ok(AttributeValue::Integer(int))
        }
    }

    pub fn kind(&self) -> AttributeType {
        match self {
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::Float(_) => AttributeType::Float,
            AttributeValue::Text(_) => AttributeType::String,
        }
    }
}

/// Same text as written in attribute values by the serializer,
/// without the quotes.
impl Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Integer(n) => write!(f, "{}", n),
            AttributeValue::Float(x) => write!(f, "{:.6}", x),
            AttributeValue::Text(s) if s.is_empty() => f.write_str("null"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

pub(crate) fn owned(s: &str) -> Result<String, NoMemory> {
    let mut buf = String::new();
    buf.try_reserve_exact(s.len())?;
    buf.push_str(s);
    Ok(buf)
}
