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
 * cbor_tree CBOR Error API
 *
 * Error values reported while decoding CBOR (RFC8949) items or converting them to/from other
 * types. A failed operation aborts; no partial result is ever returned.
 **************************************************************************************************/
use std::result;

use thiserror::Error;

/// An alias for Result<T, CBORError> used throughout this crate.
pub type Result<T> = result::Result<T, CBORError>;

/// `CBORError` provides information about failures while decoding CBOR items and while
/// converting CBOR items to/from other types.
#[derive(Copy, Clone, Error, Debug, PartialEq, Eq)]
pub enum CBORError {
    /// The decoder needed to read beyond the end of the input buffer.
    #[error("Buffer insufficient to process the next item")]
    EndOfBuffer,
    /// A reserved Additional Information value (28..=30), or indefinite-length AI on an item
    /// that does not permit it.
    #[error("Reserved or misplaced additional information value {0}")]
    InvalidAdditionalInfo(u8),
    /// A break stop code (0xff) was read where a data item was expected.
    #[error("Break outside of an indefinite-length item")]
    UnexpectedBreak,
    /// The initial byte cannot begin a well-formed item.
    #[error("Initial byte {0:#04x} does not encode a well-formed item")]
    InvalidInitialByte(u8),
    /// A tstr payload contains an invalid UTF8 sequence.
    #[error("A tstr contains an invalid UTF8 sequence")]
    UTF8Error,
    /// Container nesting exceeded the configured depth limit.
    #[error("Nesting depth exceeds the configured limit")]
    ExcessiveNesting,
    /// Input remained after the top-level item and trailing data is disallowed.
    #[error("Unconsumed bytes after the top-level item")]
    TrailingBytes,
    /// An indefinite-length string contained a chunk other than a definite-length string of
    /// the type indicated by the `str`.
    #[error("Indefinite-length string chunks must be definite-length {0}")]
    InvalidChunkType(&'static str),
    /// A map key has no corresponding value. Reserved: the current decode paths report a
    /// misplaced break or buffer end instead.
    #[error("Map does not contain a value for every key")]
    InvalidMapStructure,
    /// A length argument exceeds the addressable range for a contiguous buffer.
    #[error("Length argument exceeds the addressable range")]
    LengthOutOfRange,
    /// A number conversion has overflowed or underflowed.
    #[error("Overflow or underflow in number conversion")]
    OutOfRange,
    /// Attempt to convert an item to an incompatible type.
    #[error("Attempt to convert an item of incompatible type")]
    IncompatibleType,
}
