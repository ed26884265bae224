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
 * Test cases for decoder error reporting and decoder options
 **************************************************************************************************/

extern crate cbor_tree;

use cbor_tree::decoder::{CBORDecoder, DecoderOptions};
use cbor_tree::error::CBORError;
use cbor_tree::types::CBOR;

use hex_literal::hex;

fn decode_err(bytes: &[u8]) -> CBORError {
    CBORDecoder::new()
        .decode(bytes)
        .expect_err("malformed test vector must not decode")
}

#[test]
fn trailing_bytes_rejected_by_default() {
    assert_eq!(decode_err(&hex!("0100")), CBORError::TrailingBytes);
    assert_eq!(decode_err(&hex!("f6f6")), CBORError::TrailingBytes);
}

#[test]
fn trailing_bytes_accepted_when_allowed() {
    let decoder = CBORDecoder::with_options(DecoderOptions {
        allow_trailing_data: true,
        ..Default::default()
    });
    assert_eq!(decoder.decode(&hex!("0100")), Ok(CBOR::UInt(1)));
}

#[test]
fn truncated_input_reports_end_of_buffer() {
    for bytes in [
        &[][..],                  // no initial byte at all
        &hex!("18")[..],          // missing one-byte argument
        &hex!("1903")[..],        // missing half of a two-byte argument
        &hex!("6261")[..],        // tstr payload cut short
        &hex!("44010203")[..],    // bstr payload cut short
        &hex!("8301")[..],        // array missing elements
        &hex!("a101")[..],        // map missing a value
        &hex!("c2")[..],          // tag missing its content
        &hex!("5f4101")[..],      // indefinite bstr missing its break
        &hex!("9f01")[..],        // indefinite array missing its break
        &hex!("f9")[..],          // half float missing payload
    ] {
        assert_eq!(decode_err(bytes), CBORError::EndOfBuffer);
    }
}

#[test]
fn reserved_additional_info_rejected() {
    for (bytes, ai) in [
        (&hex!("1c")[..], 28u8),
        (&hex!("1d")[..], 29),
        (&hex!("1e")[..], 30),
        (&hex!("3c")[..], 28),
        (&hex!("5c")[..], 28),
        (&hex!("7d")[..], 29),
        (&hex!("9e")[..], 30),
        (&hex!("bc")[..], 28),
        (&hex!("dd")[..], 29),
        (&hex!("fc")[..], 28),
        (&hex!("fd")[..], 29),
        (&hex!("fe")[..], 30),
    ] {
        assert_eq!(decode_err(bytes), CBORError::InvalidAdditionalInfo(ai));
    }
}

#[test]
fn indefinite_marker_illegal_outside_strings_and_containers() {
    // Majors 0, 1 and 6 have no indefinite form
    assert_eq!(decode_err(&hex!("1f")), CBORError::InvalidAdditionalInfo(31));
    assert_eq!(decode_err(&hex!("3f")), CBORError::InvalidAdditionalInfo(31));
    assert_eq!(decode_err(&hex!("df")), CBORError::InvalidAdditionalInfo(31));
}

#[test]
fn stray_break_rejected() {
    // At the top level
    assert_eq!(decode_err(&hex!("ff")), CBORError::UnexpectedBreak);
    // Inside a definite-length container, where no break is ever legal
    assert_eq!(decode_err(&hex!("81ff")), CBORError::UnexpectedBreak);
    assert_eq!(decode_err(&hex!("a1ff00")), CBORError::UnexpectedBreak);
    // In value position of an indefinite map: the pair is incomplete
    assert_eq!(decode_err(&hex!("bf01ff")), CBORError::UnexpectedBreak);
    // As tagged content
    assert_eq!(decode_err(&hex!("c1ff")), CBORError::UnexpectedBreak);
}

#[test]
fn chunked_strings_require_matching_definite_chunks() {
    // tstr chunk inside an indefinite bstr
    assert_eq!(
        decode_err(&hex!("5f6161ff")),
        CBORError::InvalidChunkType("bstr")
    );
    // bstr chunk inside an indefinite tstr
    assert_eq!(
        decode_err(&hex!("7f4161ff")),
        CBORError::InvalidChunkType("tstr")
    );
    // Indefinite chunks may not nest
    assert_eq!(
        decode_err(&hex!("5f5f4101ffff")),
        CBORError::InvalidChunkType("bstr")
    );
    // Nor may any non-string item appear as a chunk
    assert_eq!(
        decode_err(&hex!("7f00ff")),
        CBORError::InvalidChunkType("tstr")
    );
}

#[test]
fn text_utf8_is_checked_on_the_concatenation() {
    // A definite tstr with a broken sequence
    assert_eq!(decode_err(&hex!("62c328")), CBORError::UTF8Error);
    // Chunks that are individually broken but concatenate to valid UTF-8 are accepted:
    // c3 / a9 joins into a two-byte sequence
    assert_eq!(
        CBORDecoder::new().decode(&hex!("7f61c361a9ff")),
        Ok(CBOR::from("\u{00e9}"))
    );
    // ... and a concatenation that remains broken is rejected
    assert_eq!(decode_err(&hex!("7f616161c3ff")), CBORError::UTF8Error);
}

#[test]
fn nesting_depth_is_bounded() {
    let decoder = CBORDecoder::with_options(DecoderOptions {
        max_nesting_depth: 4,
        ..Default::default()
    });
    // Four nested arrays around a uint: the innermost item sits at depth 4
    assert!(decoder.decode(&hex!("8181818100")).is_ok());
    // One more level pushes an item to depth 5
    assert_eq!(
        decoder.decode(&hex!("818181818100")),
        Err(CBORError::ExcessiveNesting)
    );
    // Tagged content and map entries deepen the nesting like array elements do
    assert!(decoder.decode(&hex!("c1c1c1c100")).is_ok());
    assert_eq!(
        decoder.decode(&hex!("c1c1c1c1c100")),
        Err(CBORError::ExcessiveNesting)
    );
    assert_eq!(
        decoder.decode(&hex!("81818181a10000")),
        Err(CBORError::ExcessiveNesting)
    );
    // Indefinite containers count the same as definite ones
    assert!(decoder.decode(&hex!("9f9f9f9f00ffffffff")).is_ok());
    assert_eq!(
        decoder.decode(&hex!("9f9f9f9f9f00ffffffffff")),
        Err(CBORError::ExcessiveNesting)
    );
}

#[test]
fn string_chunks_count_against_nesting_depth() {
    let decoder = CBORDecoder::with_options(DecoderOptions {
        max_nesting_depth: 0,
        ..Default::default()
    });
    // A definite string is a single item at depth 0
    assert!(decoder.decode(&hex!("4101")).is_ok());
    // A chunk is a nested decode at depth 1
    assert_eq!(
        decoder.decode(&hex!("5f4101ff")),
        Err(CBORError::ExcessiveNesting)
    );
}

#[test]
fn default_depth_limit_is_256() {
    let decoder = CBORDecoder::new();

    let mut bytes = vec![0x81u8; 256];
    bytes.push(0x00);
    assert!(decoder.decode(&bytes).is_ok());

    let mut bytes = vec![0x81u8; 257];
    bytes.push(0x00);
    assert_eq!(decoder.decode(&bytes), Err(CBORError::ExcessiveNesting));
}

#[test]
fn two_byte_simple_codes_are_not_range_checked() {
    // Codes below 32 via the two-byte form decode like their one-byte equivalents would
    assert_eq!(
        CBORDecoder::new().decode(&hex!("f810")),
        Ok(CBOR::Simple(16))
    );
    assert_eq!(
        CBORDecoder::new().decode(&hex!("f81f")),
        Ok(CBOR::Simple(31))
    );
}

#[test]
fn oversized_length_argument_fails_before_allocation() {
    // A bstr claiming 2^64 - 1 payload bytes; the read is refused against the real buffer
    let err = decode_err(&hex!("5bffffffffffffffff"));
    assert!(
        err == CBORError::EndOfBuffer || err == CBORError::LengthOutOfRange,
        "unexpected error {:?}",
        err
    );
}

#[test]
fn decoder_is_reusable() {
    let decoder = CBORDecoder::new();
    assert_eq!(decoder.decode(&hex!("00")), Ok(CBOR::UInt(0)));
    assert_eq!(decoder.decode(&hex!("ff")), Err(CBORError::UnexpectedBreak));
    assert_eq!(decoder.decode(&hex!("00")), Ok(CBOR::UInt(0)));
}
