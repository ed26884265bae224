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
 * CBOR Encoder
 *
 * A serializer for CBOR (RFC8949) item trees. Always emits preferred serialization: definite
 * lengths only, and the shortest argument width for every prefix. Deterministic encoding
 * (bytewise-sorted map keys, narrowest lossless float width) is available as an option.
 **************************************************************************************************/
use crate::ast::CBOR;
use crate::constants::*;

use half::f16;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/***************************************************************************************************
 * Encoder and its options
 **************************************************************************************************/

/// Options controlling the output form of [`CBOREncoder`].
#[derive(Debug, Default, Copy, Clone)]
pub struct EncoderOptions {
    /// When set, produce the RFC8949 §4.2 deterministic form. One switch governs both of its
    /// obligations: map entries are emitted in bytewise lexicographic order of their encoded
    /// keys, and every float is emitted at the narrowest width that preserves its bit pattern
    /// exactly (NaNs collapse to the canonical half-width quiet NaN).
    pub canonical_map_ordering: bool,
}

/// Encodes a [`CBOR`] item tree into a byte buffer.
///
/// Every item expressible in the model has an encoding, so `encode` cannot fail. The encoder
/// holds no state between calls; `options` is a public field and may be adjusted between calls.
///
/// ## Example
/// ```
/// use cbor_tree::encoder::CBOREncoder;
/// use cbor_tree::types::CBOR;
///
/// let bytes = CBOREncoder::new().encode(&CBOR::from(24u8));
/// assert_eq!(bytes, vec![0x18, 0x18]);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct CBOREncoder {
    /// Output-form settings applied on every encode call.
    pub options: EncoderOptions,
}

impl CBOREncoder {
    /// Construct an encoder with default options (non-canonical output).
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an encoder with the given options.
    pub fn with_options(options: EncoderOptions) -> Self {
        CBOREncoder { options }
    }

    /// Encode a single data item, returning its byte representation.
    #[cfg_attr(feature = "trace", trace)]
    pub fn encode(&self, item: &CBOR) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode_item(&mut bytes, item, self.options.canonical_map_ordering);
        bytes
    }
}

/***************************************************************************************************
 * Item emission
 **************************************************************************************************/

/// Emit one item onto `out`. `canonical` is threaded through every recursion, including the
/// side buffers used to sort map keys, so nested containers inside keys are canonicalized too.
#[cfg_attr(feature = "trace", trace)]
fn encode_item(out: &mut Vec<u8>, item: &CBOR, canonical: bool) {
    match item {
        CBOR::UInt(v) => encode_prefix(out, MT_UINT, *v),
        // The stored argument is emitted as-is; it already denotes -1 - n
        CBOR::NInt(v) => encode_prefix(out, MT_NINT, *v),
        CBOR::Bstr(bytes) => {
            encode_prefix(out, MT_BSTR, bytes.len() as u64);
            out.extend_from_slice(bytes);
        }
        CBOR::Tstr(s) => {
            encode_prefix(out, MT_TSTR, s.len() as u64);
            out.extend_from_slice(s.as_bytes());
        }
        CBOR::Array(items) => {
            encode_prefix(out, MT_ARRAY, items.len() as u64);
            for item in items {
                encode_item(out, item, canonical);
            }
        }
        CBOR::Map(pairs) => encode_map(out, pairs, canonical),
        CBOR::Tag(tag, content) => {
            encode_prefix(out, MT_TAG, *tag);
            encode_item(out, content, canonical);
        }
        // Codes below 24 ride on the AI bits, larger ones take the two-byte form. The caller
        // is trusted with codes in the reserved 24..=31 range
        CBOR::Simple(code) => encode_prefix(out, MT_SIMPLE, *code as u64),
        CBOR::Bool(false) => out.push(MT_SIMPLE | 20),
        CBOR::Bool(true) => out.push(MT_SIMPLE | 21),
        CBOR::Null => out.push(MT_SIMPLE | 22),
        CBOR::Undefined => out.push(MT_SIMPLE | 23),
        CBOR::Float16(v) => {
            if canonical {
                encode_float_canonical(out, f64::from(*v));
            } else {
                out.push(MT_FLOAT | PAYLOAD_TWO_BYTES);
                out.extend_from_slice(&v.to_be_bytes());
            }
        }
        CBOR::Float32(v) => {
            if canonical {
                encode_float_canonical(out, *v as f64);
            } else {
                out.push(MT_FLOAT | PAYLOAD_FOUR_BYTES);
                out.extend_from_slice(&v.to_be_bytes());
            }
        }
        CBOR::Float64(v) => {
            if canonical {
                encode_float_canonical(out, *v);
            } else {
                out.push(MT_FLOAT | PAYLOAD_EIGHT_BYTES);
                out.extend_from_slice(&v.to_be_bytes());
            }
        }
    }
}

/// Emit a map. In canonical mode each key is first encoded into its own buffer and the pairs
/// are sorted by those buffers; `Vec<u8>` ordering is exactly the bytewise lexicographic
/// comparison RFC8949 §4.2.1 asks for. Keys with equal encodings keep some order - duplicates
/// are the caller's business and are not rejected.
fn encode_map(out: &mut Vec<u8>, pairs: &[(CBOR, CBOR)], canonical: bool) {
    encode_prefix(out, MT_MAP, pairs.len() as u64);
    if canonical {
        let mut entries: Vec<(Vec<u8>, &CBOR)> = pairs
            .iter()
            .map(|(key, value)| {
                let mut key_bytes = Vec::new();
                encode_item(&mut key_bytes, key, true);
                (key_bytes, value)
            })
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (key_bytes, value) in entries {
            out.extend_from_slice(&key_bytes);
            encode_item(out, value, true);
        }
    } else {
        for (key, value) in pairs {
            encode_item(out, key, canonical);
            encode_item(out, value, canonical);
        }
    }
}

/***************************************************************************************************
 * Prefix and float helpers
 **************************************************************************************************/

/// Emit the MT/AI byte and argument extension for a (major type, argument) pair.
///
/// Arguments are always encoded using preferred serialization as defined in RFC8949: on the AI
/// bits below 24, otherwise in the narrowest of the 1, 2, 4 or 8 byte big-endian extensions.
/// Indefinite-length markers are never emitted.
fn encode_prefix(out: &mut Vec<u8>, mt: u8, value: u64) {
    let vs = value.to_be_bytes();
    if value < 24 {
        out.push(mt | vs[7]);
    } else if value <= u8::MAX as u64 {
        out.push(mt | PAYLOAD_ONE_BYTE);
        out.push(vs[7]);
    } else if value <= u16::MAX as u64 {
        out.push(mt | PAYLOAD_TWO_BYTES);
        out.extend_from_slice(&vs[6..]);
    } else if value <= u32::MAX as u64 {
        out.push(mt | PAYLOAD_FOUR_BYTES);
        out.extend_from_slice(&vs[4..]);
    } else {
        out.push(mt | PAYLOAD_EIGHT_BYTES);
        out.extend_from_slice(&vs);
    }
}

/// Emit the deterministic encoding of a float, viewed as binary64.
///
/// Every NaN collapses to the canonical half-width quiet NaN. Any other value is downcast and
/// upcast again through binary16, then binary32; the first width whose round trip reproduces
/// the binary64 bit pattern exactly is used. Bit-pattern comparison rather than `==` keeps
/// -0.0 distinct from 0.0 here.
fn encode_float_canonical(out: &mut Vec<u8>, v: f64) {
    if v.is_nan() {
        out.push(MT_FLOAT | PAYLOAD_TWO_BYTES);
        out.extend_from_slice(&F16_CANONICAL_NAN.to_be_bytes());
        return;
    }
    let half = f16::from_f64(v);
    if f64::from(half).to_bits() == v.to_bits() {
        out.push(MT_FLOAT | PAYLOAD_TWO_BYTES);
        out.extend_from_slice(&half.to_be_bytes());
        return;
    }
    let single = v as f32;
    if (single as f64).to_bits() == v.to_bits() {
        out.push(MT_FLOAT | PAYLOAD_FOUR_BYTES);
        out.extend_from_slice(&single.to_be_bytes());
        return;
    }
    out.push(MT_FLOAT | PAYLOAD_EIGHT_BYTES);
    out.extend_from_slice(&v.to_be_bytes());
}
