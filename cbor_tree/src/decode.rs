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
 * CBOR Decoder
 *
 * A deserializer for CBOR (RFC8949) producing an owned item tree. Accepts every well-formed
 * encoding: definite and indefinite-length containers, and chunked byte and text strings.
 **************************************************************************************************/
use crate::ast::CBOR;
use crate::constants::*;
use crate::error::{CBORError, Result};

use std::convert::TryFrom;

use half::f16;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/***************************************************************************************************
 * Decoder and its options
 **************************************************************************************************/

/// Options controlling how strictly [`CBORDecoder`] treats its input.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum number of nested containers. The top-level item sits at depth zero, and every
    /// array element, map key or value, tagged payload and string chunk is one level deeper
    /// than the item that contains it.
    pub max_nesting_depth: usize,
    /// When `false`, any bytes left over after the first top-level item cause
    /// [`CBORError::TrailingBytes`].
    pub allow_trailing_data: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_nesting_depth: 256,
            allow_trailing_data: false,
        }
    }
}

/// Decodes a byte buffer into a [`CBOR`] item tree.
///
/// The decoder holds no state between calls; the parse cursor is local to each
/// [`CBORDecoder::decode`] invocation, so a single decoder may be reused freely. `options` is a
/// public field and may be adjusted between calls.
///
/// ## Example
/// ```
/// use cbor_tree::decoder::CBORDecoder;
/// use cbor_tree::types::CBOR;
///
/// let item = CBORDecoder::new().decode(&[0x18, 0x18]).unwrap();
/// assert_eq!(item, CBOR::UInt(24));
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct CBORDecoder {
    /// Strictness settings applied on every decode call.
    pub options: DecoderOptions,
}

impl CBORDecoder {
    /// Construct a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a decoder with the given options.
    pub fn with_options(options: DecoderOptions) -> Self {
        CBORDecoder { options }
    }

    /// Decode a single data item from `bytes`.
    ///
    /// Unless [`DecoderOptions::allow_trailing_data`] is set, the item must consume the whole
    /// buffer. On failure the typed error is returned and no partial tree is observable.
    #[cfg_attr(feature = "trace", trace)]
    pub fn decode(&self, bytes: &[u8]) -> Result<CBOR> {
        let (next_index, item) = parse_item(bytes, 0, 0, &self.options)?;
        if next_index < bytes.len() && !self.options.allow_trailing_data {
            Err(CBORError::TrailingBytes)
        } else {
            Ok(item)
        }
    }
}

/***************************************************************************************************
 * CBOR Parser
 **************************************************************************************************/

/// Parse a single CBOR Item from `buf` starting at `start_index`.
///
/// On success a pair, `(usize, CBOR)`, is returned where the `usize` value is the index in `buf`
/// of the next item - this may be one past the end of `buf` for the final item. All reads are
/// bounds checked.
///
/// `depth` is the nesting level of the item being parsed; container parsers pass `depth + 1`
/// when descending.
#[cfg_attr(feature = "trace", trace)]
fn parse_item(buf: &[u8], start_index: usize, depth: usize, opts: &DecoderOptions) -> Result<(usize, CBOR)> {
    if depth > opts.max_nesting_depth {
        return Err(CBORError::ExcessiveNesting);
    }
    if !within(buf, start_index, 0) {
        return Err(CBORError::EndOfBuffer);
    }
    let initial = buf[start_index];
    match initial & MT_MASK {
        MT_UINT => parse_argument(buf, start_index).map(|(next, v)| (next, CBOR::UInt(v))),
        MT_NINT => parse_argument(buf, start_index).map(|(next, v)| (next, CBOR::NInt(v))),
        MT_BSTR => {
            let (next, payload) = parse_string(buf, start_index, depth, opts, MT_BSTR, "bstr")?;
            Ok((next, CBOR::Bstr(payload)))
        }
        MT_TSTR => {
            let (next, payload) = parse_string(buf, start_index, depth, opts, MT_TSTR, "tstr")?;
            // For a chunked tstr, well-formedness is required of the reassembled payload, not
            // of each chunk, so the check happens after concatenation.
            match String::from_utf8(payload) {
                Ok(s) => Ok((next, CBOR::Tstr(s))),
                Err(_) => Err(CBORError::UTF8Error),
            }
        }
        MT_ARRAY => parse_array(buf, start_index, depth, opts),
        MT_MAP => parse_map(buf, start_index, depth, opts),
        MT_TAG => parse_tag(buf, start_index, depth, opts),
        MT_SIMPLE => parse_major7(buf, start_index),
        // Unreachable: the three MT bits cover majors 0..=7 exactly
        _ => Err(CBORError::InvalidInitialByte(initial)),
    }
}

/***************************************************************************************************
 * Argument parsing
 **************************************************************************************************/

/// Parse the argument of the item whose MT/AI byte is at `start_index`.
///
/// Values 0..=23 are carried on the AI bits themselves; 24..=27 select a 1, 2, 4 or 8 byte
/// big-endian extension. The reserved values 28..=30 fail, as does 31 - callers that permit an
/// indefinite length must check for AI 31 before asking for an argument.
#[cfg_attr(feature = "trace", trace)]
fn parse_argument(buf: &[u8], start_index: usize) -> Result<(usize, u64)> {
    let ai = buf[start_index] & AI_MASK;
    match ai {
        0..=PAYLOAD_AI_BITS => Ok((start_index + 1, ai as u64)),
        PAYLOAD_ONE_BYTE => read_be_uint(buf, start_index + 1, 1),
        PAYLOAD_TWO_BYTES => read_be_uint(buf, start_index + 1, 2),
        PAYLOAD_FOUR_BYTES => read_be_uint(buf, start_index + 1, 4),
        PAYLOAD_EIGHT_BYTES => read_be_uint(buf, start_index + 1, 8),
        _ => Err(CBORError::InvalidAdditionalInfo(ai)),
    }
}

/// Parse an argument that will be used as an in-memory length or count, rejecting values that
/// cannot index a contiguous buffer on this platform before any allocation is attempted.
fn parse_length(buf: &[u8], start_index: usize) -> Result<(usize, usize)> {
    let (next, arg) = parse_argument(buf, start_index)?;
    match usize::try_from(arg) {
        Ok(len) => Ok((next, len)),
        Err(_) => Err(CBORError::LengthOutOfRange),
    }
}

/***************************************************************************************************
 * Byte string and text string helpers
 **************************************************************************************************/

/// Parse the payload of a bstr or tstr item (major type given by `mt`), reassembling chunked
/// payloads when the length is indefinite.
///
/// Each chunk of an indefinite-length string must itself be a definite-length string of the
/// same major type; anything else, including a nested indefinite string, fails with
/// [`CBORError::InvalidChunkType`].
#[cfg_attr(feature = "trace", trace)]
fn parse_string(
    buf: &[u8],
    start_index: usize,
    depth: usize,
    opts: &DecoderOptions,
    mt: u8,
    kind: &'static str,
) -> Result<(usize, Vec<u8>)> {
    if buf[start_index] & AI_MASK != PAYLOAD_INDEFINITE {
        let (next, payload) = parse_definite_string(buf, start_index)?;
        return Ok((next, payload.to_vec()));
    }
    let mut index = start_index + 1;
    let mut payload = Vec::new();
    loop {
        if !within(buf, index, 0) {
            return Err(CBORError::EndOfBuffer);
        }
        if buf[index] == BREAK {
            return Ok((index + 1, payload));
        }
        // A chunk is a nested decode and counts against the depth limit like any other
        if depth + 1 > opts.max_nesting_depth {
            return Err(CBORError::ExcessiveNesting);
        }
        if buf[index] & MT_MASK != mt || buf[index] & AI_MASK == PAYLOAD_INDEFINITE {
            return Err(CBORError::InvalidChunkType(kind));
        }
        let (next, chunk) = parse_definite_string(buf, index)?;
        payload.extend_from_slice(chunk);
        index = next;
    }
}

/// Parse a definite-length string item, returning a slice over its payload within `buf`.
fn parse_definite_string(buf: &[u8], start_index: usize) -> Result<(usize, &[u8])> {
    let (payload_index, length) = parse_length(buf, start_index)?;
    read_extent(buf, payload_index, length)
}

/***************************************************************************************************
 * Array, Map and Tag helpers
 **************************************************************************************************/

/// Parse an array. An array of length N is a sequence of N items, any of which may itself be a
/// container. An indefinite-length array runs until its break byte.
#[cfg_attr(feature = "trace", trace)]
fn parse_array(buf: &[u8], start_index: usize, depth: usize, opts: &DecoderOptions) -> Result<(usize, CBOR)> {
    let mut items = Vec::new();
    if buf[start_index] & AI_MASK == PAYLOAD_INDEFINITE {
        let mut index = start_index + 1;
        loop {
            if !within(buf, index, 0) {
                return Err(CBORError::EndOfBuffer);
            }
            if buf[index] == BREAK {
                return Ok((index + 1, CBOR::Array(items)));
            }
            let (next, item) = parse_item(buf, index, depth + 1, opts)?;
            items.push(item);
            index = next;
        }
    } else {
        let (mut index, n_items) = parse_length(buf, start_index)?;
        for _ in 0..n_items {
            let (next, item) = parse_item(buf, index, depth + 1, opts)?;
            items.push(item);
            index = next;
        }
        Ok((index, CBOR::Array(items)))
    }
}

/// Parse a map. A map of N pairs is a sequence of 2N items; keys and values alternate and pairs
/// are kept in encounter order. Nothing rejects duplicate keys - the model preserves whatever
/// the encoding carried.
///
/// In an indefinite-length map the break byte is only legal in key position; a break in value
/// position surfaces as [`CBORError::UnexpectedBreak`] from the nested item parse.
#[cfg_attr(feature = "trace", trace)]
fn parse_map(buf: &[u8], start_index: usize, depth: usize, opts: &DecoderOptions) -> Result<(usize, CBOR)> {
    let mut pairs = Vec::new();
    if buf[start_index] & AI_MASK == PAYLOAD_INDEFINITE {
        let mut index = start_index + 1;
        loop {
            if !within(buf, index, 0) {
                return Err(CBORError::EndOfBuffer);
            }
            if buf[index] == BREAK {
                return Ok((index + 1, CBOR::Map(pairs)));
            }
            let (value_index, key) = parse_item(buf, index, depth + 1, opts)?;
            let (next, value) = parse_item(buf, value_index, depth + 1, opts)?;
            pairs.push((key, value));
            index = next;
        }
    } else {
        let (mut index, n_pairs) = parse_length(buf, start_index)?;
        for _ in 0..n_pairs {
            let (value_index, key) = parse_item(buf, index, depth + 1, opts)?;
            let (next, value) = parse_item(buf, value_index, depth + 1, opts)?;
            pairs.push((key, value));
            index = next;
        }
        Ok((index, CBOR::Map(pairs)))
    }
}

/// Parse a tagged item: the argument is the tag number, followed by exactly one content item.
#[cfg_attr(feature = "trace", trace)]
fn parse_tag(buf: &[u8], start_index: usize, depth: usize, opts: &DecoderOptions) -> Result<(usize, CBOR)> {
    let (content_index, tag) = parse_argument(buf, start_index)?;
    let (next, item) = parse_item(buf, content_index, depth + 1, opts)?;
    Ok((next, CBOR::Tag(tag, Box::new(item))))
}

/***************************************************************************************************
 * Major type 7: simple values and floats
 **************************************************************************************************/

/// Parse a major type 7 item.
///
/// AI values 0..=19 and the one read via AI 24 yield `Simple`; 20..=23 are the assigned simple
/// values; 25..=27 are the three float widths. The float payloads are rebuilt from their bit
/// patterns, so non-canonical NaNs decode to exactly the NaN that was sent.
///
/// Note that a code read via AI 24 is *not* checked against the code >= 32 rule of RFC8949
/// §3.3; a two-byte encoding of a small simple value decodes to the same `Simple` item its
/// one-byte form would.
#[cfg_attr(feature = "trace", trace)]
fn parse_major7(buf: &[u8], start_index: usize) -> Result<(usize, CBOR)> {
    let ai = buf[start_index] & AI_MASK;
    match ai {
        0..=19 => Ok((start_index + 1, CBOR::Simple(ai))),
        20 => Ok((start_index + 1, CBOR::Bool(false))),
        21 => Ok((start_index + 1, CBOR::Bool(true))),
        22 => Ok((start_index + 1, CBOR::Null)),
        23 => Ok((start_index + 1, CBOR::Undefined)),
        PAYLOAD_ONE_BYTE => {
            let (next, code) = read_be_uint(buf, start_index + 1, 1)?;
            Ok((next, CBOR::Simple(code as u8)))
        }
        PAYLOAD_TWO_BYTES => {
            let (next, bits) = read_be_uint(buf, start_index + 1, 2)?;
            Ok((next, CBOR::Float16(f16::from_bits(bits as u16))))
        }
        PAYLOAD_FOUR_BYTES => {
            let (next, bits) = read_be_uint(buf, start_index + 1, 4)?;
            Ok((next, CBOR::Float32(f32::from_bits(bits as u32))))
        }
        PAYLOAD_EIGHT_BYTES => {
            let (next, bits) = read_be_uint(buf, start_index + 1, 8)?;
            Ok((next, CBOR::Float64(f64::from_bits(bits))))
        }
        PAYLOAD_INDEFINITE => Err(CBORError::UnexpectedBreak),
        _ => Err(CBORError::InvalidAdditionalInfo(ai)),
    }
}

/***************************************************************************************************
 * Other helpers
 **************************************************************************************************/

/// Return `true` if it is possible to obtain a slice of length `len` starting from `start` from
/// `buf`. The addition is checked: `len` may originate from an attacker-supplied 64-bit
/// argument.
#[inline]
fn within(buf: &[u8], start: usize, len: usize) -> bool {
    start.checked_add(len).map_or(false, |end| end <= buf.len())
}

/// Return the index of the next item to parse and a slice over the extent within `buf`.
fn read_extent(buf: &[u8], start: usize, length: usize) -> Result<(usize, &[u8])> {
    if within(buf, start, length) {
        Ok((start + length, &buf[start..start + length]))
    } else {
        Err(CBORError::EndOfBuffer)
    }
}

/// Read `nbytes` (1..=8) big-endian bytes as an unsigned value.
fn read_be_uint(buf: &[u8], start: usize, nbytes: usize) -> Result<(usize, u64)> {
    let (next, bytes) = read_extent(buf, start, nbytes)?;
    let mut v: u64 = 0;
    for b in bytes {
        v = (v << 8) | *b as u64;
    }
    Ok((next, v))
}
