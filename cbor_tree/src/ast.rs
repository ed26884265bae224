/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * CBOR Abstract Syntax Tree
 *
 * An owned, heap-allocated tree representation of a single CBOR (RFC8949) data item, shared by
 * the encoder and decoder.
 **************************************************************************************************/
use crate::error::CBORError;

use std::convert::TryFrom;

use half::f16;

/// The data type for CBOR Items. Items own their payloads, so a decoded tree is independent of
/// the buffer it was parsed from and may outlive it.
///
/// CBOR item representations are as follows:
///
/// - Positive and negative integers are stored as a u64, with enum tags used to distinguish
///   positive (UInt) and negative (NInt) numbers. `NInt(n)` denotes the value -1 - n, so the
///   whole range -2^64..=-1 is representable and zero is always `UInt(0)`.
/// - The bstr and tstr types own their payloads; a tstr payload is valid UTF-8 by construction
/// - Arrays are a sequence of items; maps are a sequence of (key, value) pairs in insertion
///   order. Pairs are never deduplicated or reordered by the model
/// - Tagged items hold the tag number and a single boxed content item
/// - Simple types are stored as a u8, except for the four assigned codes which have their own
///   variants (Bool, Null, Undefined)
/// - Floats are stored at the width they were constructed with. `Float16` keeps the raw binary16
///   bit pattern, so NaN payloads survive a decode/encode round trip
#[derive(Debug, Clone)]
pub enum CBOR {
    UInt(u64),
    NInt(u64),
    Bstr(Vec<u8>),
    Tstr(String),
    Array(Vec<CBOR>),
    Map(Vec<(CBOR, CBOR)>),
    Tag(u64, Box<CBOR>),
    Simple(u8),
    Bool(bool),
    Null,
    Undefined,
    Float16(f16),
    Float32(f32),
    Float64(f64),
}

/// Equality over items is structural, with one deviation from the IEEE-754 comparison the float
/// payload types would otherwise provide: Float16/Float32/Float64 compare by bit pattern. A NaN
/// therefore equals itself, NaNs with distinct payloads differ, and 0.0 differs from -0.0.
impl PartialEq for CBOR {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CBOR::UInt(a), CBOR::UInt(b)) => a == b,
            (CBOR::NInt(a), CBOR::NInt(b)) => a == b,
            (CBOR::Bstr(a), CBOR::Bstr(b)) => a == b,
            (CBOR::Tstr(a), CBOR::Tstr(b)) => a == b,
            (CBOR::Array(a), CBOR::Array(b)) => a == b,
            (CBOR::Map(a), CBOR::Map(b)) => a == b,
            (CBOR::Tag(ta, a), CBOR::Tag(tb, b)) => ta == tb && a == b,
            (CBOR::Simple(a), CBOR::Simple(b)) => a == b,
            (CBOR::Bool(a), CBOR::Bool(b)) => a == b,
            (CBOR::Null, CBOR::Null) => true,
            (CBOR::Undefined, CBOR::Undefined) => true,
            (CBOR::Float16(a), CBOR::Float16(b)) => a.to_bits() == b.to_bits(),
            (CBOR::Float32(a), CBOR::Float32(b)) => a.to_bits() == b.to_bits(),
            (CBOR::Float64(a), CBOR::Float64(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

// Bit-pattern comparison is reflexive, so full equivalence holds.
impl Eq for CBOR {}

impl CBOR {
    /// Return `true` for the numeric variants: `UInt`, `NInt`, `Float16`, `Float32` and
    /// `Float64`.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CBOR::UInt(_) | CBOR::NInt(_) | CBOR::Float16(_) | CBOR::Float32(_) | CBOR::Float64(_)
        )
    }

    /// Return the sign and raw magnitude of an integer item, or `None` for every other variant.
    ///
    /// The magnitude of `NInt(n)` is the stored argument `n`, not the absolute value 1 + n of
    /// the integer it denotes, so the full 64-bit argument range is preserved.
    #[inline]
    pub fn sign_magnitude(&self) -> Option<(i8, u64)> {
        match self {
            CBOR::UInt(v) => Some((1, *v)),
            CBOR::NInt(v) => Some((-1, *v)),
            _ => None,
        }
    }
}

/***************************************************************************************************
 * Standard Trait Implementations: From value to CBOR. Always succeeds
 **************************************************************************************************/

/// Convert a bool into CBOR
impl From<bool> for CBOR {
    #[inline(always)]
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Convert a u8 into CBOR
impl From<u8> for CBOR {
    #[inline(always)]
    fn from(v: u8) -> Self {
        Self::UInt(v as u64)
    }
}

/// Convert a u16 into CBOR
impl From<u16> for CBOR {
    #[inline(always)]
    fn from(v: u16) -> Self {
        Self::UInt(v as u64)
    }
}

/// Convert a u32 into CBOR
impl From<u32> for CBOR {
    #[inline(always)]
    fn from(v: u32) -> Self {
        Self::UInt(v as u64)
    }
}

/// Convert a u64 into CBOR
impl From<u64> for CBOR {
    #[inline(always)]
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

/// Convert an i8 into CBOR
impl From<i8> for CBOR {
    #[inline]
    fn from(v: i8) -> Self {
        Self::from(v as i64)
    }
}

/// Convert an i16 into CBOR
impl From<i16> for CBOR {
    #[inline]
    fn from(v: i16) -> Self {
        Self::from(v as i64)
    }
}

/// Convert an i32 into CBOR
impl From<i32> for CBOR {
    #[inline]
    fn from(v: i32) -> Self {
        Self::from(v as i64)
    }
}

/// Convert an i64 into CBOR.
///
/// Total over the whole i64 range: -1 - v never overflows because v < 0, and i64::MIN maps to
/// `NInt(i64::MAX as u64)`.
impl From<i64> for CBOR {
    #[inline]
    fn from(v: i64) -> Self {
        if v < 0 {
            Self::NInt((-1 - v) as u64)
        } else {
            Self::UInt(v as u64)
        }
    }
}

/// Convert an &str into CBOR. The payload is copied into an owned string.
impl From<&str> for CBOR {
    #[inline]
    fn from(v: &str) -> Self {
        Self::Tstr(v.to_owned())
    }
}

/// Convert a String into CBOR
impl From<String> for CBOR {
    #[inline]
    fn from(v: String) -> Self {
        Self::Tstr(v)
    }
}

/// Convert an &[u8] into CBOR. The payload is copied into an owned buffer.
impl From<&[u8]> for CBOR {
    #[inline]
    fn from(v: &[u8]) -> Self {
        Self::Bstr(v.to_vec())
    }
}

/// Convert a Vec<u8> into CBOR
impl From<Vec<u8>> for CBOR {
    #[inline]
    fn from(v: Vec<u8>) -> Self {
        Self::Bstr(v)
    }
}

/// Convert an f16 into CBOR. The bit pattern is preserved exactly.
impl From<f16> for CBOR {
    #[inline]
    fn from(v: f16) -> Self {
        Self::Float16(v)
    }
}

/// Convert an f32 into CBOR
impl From<f32> for CBOR {
    #[inline]
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

/// Convert an f64 into CBOR
impl From<f64> for CBOR {
    #[inline]
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

/// Convert a sequence of items into a CBOR array
impl From<Vec<CBOR>> for CBOR {
    #[inline]
    fn from(v: Vec<CBOR>) -> Self {
        Self::Array(v)
    }
}

/// Convert a sequence of pairs into a CBOR map, preserving insertion order
impl From<Vec<(CBOR, CBOR)>> for CBOR {
    #[inline]
    fn from(v: Vec<(CBOR, CBOR)>) -> Self {
        Self::Map(v)
    }
}

/***************************************************************************************************
 * Standard Trait Implementations: Try to convert CBOR into a value. Always fallible
 **************************************************************************************************/

/// Attempt to convert CBOR into bool
impl TryFrom<CBOR> for bool {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::Bool(v) => Ok(v),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert CBOR into u8
impl TryFrom<CBOR> for u8 {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::UInt(v) if v <= u8::MAX as u64 => Ok(v as u8),
            CBOR::UInt(_) => Err(CBORError::OutOfRange),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert CBOR into u16
impl TryFrom<CBOR> for u16 {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::UInt(v) if v <= u16::MAX as u64 => Ok(v as u16),
            CBOR::UInt(_) => Err(CBORError::OutOfRange),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert CBOR into u32
impl TryFrom<CBOR> for u32 {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::UInt(v) if v <= u32::MAX as u64 => Ok(v as u32),
            CBOR::UInt(_) => Err(CBORError::OutOfRange),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert CBOR into u64
impl TryFrom<CBOR> for u64 {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::UInt(v) => Ok(v),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert CBOR into i64
///
/// This will fail, for unsigned values, if n > i64::MAX.
/// This will fail, for negative values, if the denoted value is below i64::MIN.
///
/// In both cases it is sufficient to check that the MSB of the stored argument is clear: a
/// negative argument n with the MSB clear denotes -1 - n, which is exactly the bitwise
/// complement of n in two's complement representation.
impl TryFrom<CBOR> for i64 {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::UInt(v) if v <= i64::MAX as u64 => Ok(v as i64),
            CBOR::NInt(v) if v <= i64::MAX as u64 => Ok(!v as i64),
            CBOR::UInt(_) | CBOR::NInt(_) => Err(CBORError::OutOfRange),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert CBOR into i128
///
/// This always succeeds for integer items, as every integer CBOR can represent fits in 128
/// bits.
impl TryFrom<CBOR> for i128 {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::UInt(v) => Ok(v as i128),
            CBOR::NInt(v) => Ok(-1 - (v as i128)),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert a CBOR item into a String
impl TryFrom<CBOR> for String {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::Tstr(s) => Ok(s),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}

/// Attempt to convert a CBOR item into a Vec<u8>
impl TryFrom<CBOR> for Vec<u8> {
    type Error = CBORError;

    fn try_from(value: CBOR) -> core::result::Result<Self, Self::Error> {
        match value {
            CBOR::Bstr(bytes) => Ok(bytes),
            _ => Err(CBORError::IncompatibleType),
        }
    }
}
