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
 * cbor_tree module definition
 *
 * A CBOR (RFC8949) encoder and decoder over an owned value tree, with support for
 * deterministic encoding.
 **************************************************************************************************/

#![warn(missing_docs)]

//! # CBOR_TREE
//!
//! The `cbor_tree` crate converts between an owned, in-memory tree representation of a CBOR
//! data item and its [RFC 8949](https://datatracker.ietf.org/doc/rfc8949/) binary encoding.
//! The typical use-case is a protocol endpoint or tool that needs to inspect, build or rewrite
//! whole CBOR items rather than deserialize them into fixed application structs.
//!
//! The decoder accepts every well-formed encoding, including indefinite-length containers and
//! chunked byte and text strings, and produces a [`types::CBOR`] tree that owns its payloads.
//! The encoder always produces preferred serialization (definite lengths, shortest argument
//! widths) and can optionally produce the RFC 8949 §4.2 deterministic form: map entries sorted
//! by the bytewise order of their encoded keys, and floats narrowed to the smallest width that
//! preserves their bit pattern.
//!
//! ## Features
//!
//! - All CBOR primitive types: positive and negative integers over the full 64-bit argument
//!   range, `tstr`, `bstr`, arrays, maps, tags, simple values, and floats including `f16`.
//! - Structural equality over decoded trees, with floats compared by bit pattern so NaN
//!   payloads and signed zeros survive a round trip.
//! - Conversions to/from Rust primitive types.
//! - Configurable nesting-depth limit and trailing-byte strictness on the decoder.
//! - Diagnostic-notation output for logs and tests via [`debug::Diag`].
//!
//! Decoding and encoding are pure transformations: no I/O, no shared state, and no logging
//! happen inside the codec, so disjoint inputs may be processed from as many threads as
//! desired.
//!
//! ## Encoding
//!
//! Values are built with the [`types::CBOR`] constructors (or the `From` conversions) and
//! serialized with an [`encoder::CBOREncoder`]:
//!
//! ```
//! use cbor_tree::encoder::CBOREncoder;
//! use cbor_tree::types::CBOR;
//!
//! let claims = CBOR::Map(vec![
//!     (CBOR::from(1u8), CBOR::from("a")),
//!     (CBOR::from(2u8), CBOR::from(true)),
//! ]);
//! let bytes = CBOREncoder::new().encode(&claims);
//! assert_eq!(bytes, vec![0xa2, 0x01, 0x61, 0x61, 0x02, 0xf5]);
//! ```
//!
//! With deterministic encoding enabled, map order in the model no longer shows through to the
//! wire:
//!
//! ```
//! use cbor_tree::encoder::{CBOREncoder, EncoderOptions};
//! use cbor_tree::types::CBOR;
//!
//! let map = CBOR::Map(vec![
//!     (CBOR::from("b"), CBOR::from(2u8)),
//!     (CBOR::from("a"), CBOR::from(1u8)),
//! ]);
//! let encoder = CBOREncoder::with_options(EncoderOptions {
//!     canonical_map_ordering: true,
//! });
//! assert_eq!(
//!     encoder.encode(&map),
//!     vec![0xa2, 0x61, 0x61, 0x01, 0x61, 0x62, 0x02]
//! );
//! ```
//!
//! ## Decoding
//!
//! ```
//! use cbor_tree::decoder::CBORDecoder;
//! use cbor_tree::error::CBORError;
//! use cbor_tree::types::CBOR;
//!
//! fn main() -> Result<(), CBORError> {
//!     // An indefinite-length byte string: two chunks reassembled into one payload
//!     let item = CBORDecoder::new().decode(&[0x5f, 0x42, 0x01, 0x02, 0x41, 0x03, 0xff])?;
//!     assert_eq!(item, CBOR::Bstr(vec![0x01, 0x02, 0x03]));
//!
//!     // Trees round-trip: re-encoding uses the definite-length form
//!     let item = CBORDecoder::new().decode(&[0x82, 0x20, 0xf6])?;
//!     assert_eq!(item, CBOR::Array(vec![CBOR::from(-1i8), CBOR::Null]));
//!     Ok(())
//! }
//! ```

pub(crate) mod ast;
pub(crate) mod constants;
pub(crate) mod decode;
mod diag;
pub(crate) mod encode;

/// The `error` module contains error definitions used throughout `cbor_tree`.
pub mod error;

/// The `types` module exports the [`types::CBOR`] structure which represents a single CBOR
/// item tree.
pub mod types {
    pub use super::ast::CBOR;
}

/// The `decoder` module exports the types for decoding CBOR items from a buffer.
pub mod decoder {
    pub use super::decode::{CBORDecoder, DecoderOptions};
}

/// The `encoder` module exports the types for encoding CBOR items onto a buffer.
pub mod encoder {
    pub use super::encode::{CBOREncoder, EncoderOptions};
}

/// The `debug` module exports diagnostic-notation output helpers.
pub mod debug {
    pub use super::diag::Diag;
}
