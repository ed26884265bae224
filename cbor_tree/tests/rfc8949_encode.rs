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
 * Test cases from RFC8949 Appendix A, for encoding
 **************************************************************************************************/

extern crate cbor_tree;

use cbor_tree::decoder::CBORDecoder;
use cbor_tree::encoder::CBOREncoder;
use cbor_tree::types::CBOR;

use half::f16;
use hex_literal::hex;

fn encode(item: &CBOR) -> Vec<u8> {
    CBOREncoder::new().encode(item)
}

#[test]
fn rfc8949_encode_uint() {
    for (val, expect) in [
        (0u64, &hex!("00")[..]),
        (1, &hex!("01")[..]),
        (10, &hex!("0a")[..]),
        (23, &hex!("17")[..]),
        (24, &hex!("1818")[..]),
        (25, &hex!("1819")[..]),
        (100, &hex!("1864")[..]),
        (1000, &hex!("1903e8")[..]),
        (1000000, &hex!("1a000f4240")[..]),
        (1000000000000, &hex!("1b000000e8d4a51000")[..]),
        (18446744073709551615, &hex!("1bffffffffffffffff")[..]),
    ] {
        assert_eq!(encode(&CBOR::UInt(val)), expect);
    }
}

#[test]
fn rfc8949_encode_nint() {
    for (val, expect) in [
        (-1i64, &hex!("20")[..]),
        (-10, &hex!("29")[..]),
        (-100, &hex!("3863")[..]),
        (-1000, &hex!("3903e7")[..]),
        (i64::MIN, &hex!("3b7fffffffffffffff")[..]),
    ] {
        assert_eq!(encode(&CBOR::from(val)), expect);
    }
    // The full negative argument range reaches past i64
    assert_eq!(
        encode(&CBOR::NInt(u64::MAX)),
        &hex!("3bffffffffffffffff")[..]
    );
}

/// Each argument boundary must move to the next-wider encoding exactly at the transition.
#[test]
fn encode_argument_width_transitions() {
    for (val, expect) in [
        (23u64, &hex!("17")[..]),
        (24, &hex!("1818")[..]),
        (255, &hex!("18ff")[..]),
        (256, &hex!("190100")[..]),
        (65535, &hex!("19ffff")[..]),
        (65536, &hex!("1a00010000")[..]),
        (4294967295, &hex!("1affffffff")[..]),
        (4294967296, &hex!("1b0000000100000000")[..]),
    ] {
        assert_eq!(encode(&CBOR::UInt(val)), expect);
        // The same ladder drives every major type
        let mut negative = expect.to_vec();
        negative[0] |= 0b001_00000;
        assert_eq!(encode(&CBOR::NInt(val)), negative);
        let mut tagged = expect.to_vec();
        tagged[0] |= 0b110_00000;
        tagged.push(0x00);
        assert_eq!(encode(&CBOR::Tag(val, Box::new(CBOR::UInt(0)))), tagged);
    }
}

#[test]
fn encode_empty_items() {
    assert_eq!(encode(&CBOR::Bstr(vec![])), &hex!("40")[..]);
    assert_eq!(encode(&CBOR::Tstr(String::new())), &hex!("60")[..]);
    assert_eq!(encode(&CBOR::Array(vec![])), &hex!("80")[..]);
    assert_eq!(encode(&CBOR::Map(vec![])), &hex!("a0")[..]);
}

#[test]
fn rfc8949_encode_strings() {
    assert_eq!(encode(&CBOR::Bstr(vec![1, 2, 3, 4])), &hex!("4401020304")[..]);
    assert_eq!(encode(&CBOR::from("a")), &hex!("6161")[..]);
    assert_eq!(encode(&CBOR::from("IETF")), &hex!("6449455446")[..]);
    assert_eq!(encode(&CBOR::from("\u{00fc}")), &hex!("62c3bc")[..]);
    assert_eq!(encode(&CBOR::from("\u{6c34}")), &hex!("63e6b0b4")[..]);
}

#[test]
fn rfc8949_encode_array() {
    assert_eq!(
        encode(&CBOR::Array(vec![CBOR::UInt(1), CBOR::UInt(2), CBOR::UInt(3)])),
        &hex!("83010203")[..]
    );
    let expect: Vec<CBOR> = (1..=25u64).map(CBOR::UInt).collect();
    assert_eq!(
        encode(&CBOR::Array(expect)),
        &hex!("98190102030405060708090a0b0c0d0e0f101112131415161718181819")[..]
    );
}

#[test]
fn rfc8949_encode_map() {
    // Model order shows through to the wire when not canonicalizing
    assert_eq!(
        encode(&CBOR::Map(vec![
            (CBOR::UInt(1), CBOR::from("a")),
            (CBOR::UInt(2), CBOR::Bool(true)),
        ])),
        &hex!("a201616102f5")[..]
    );
    assert_eq!(
        encode(&CBOR::Map(vec![
            (CBOR::from("a"), CBOR::UInt(1)),
            (CBOR::from("b"), CBOR::Array(vec![CBOR::UInt(2), CBOR::UInt(3)])),
        ])),
        &hex!("a26161016162820203")[..]
    );
}

#[test]
fn rfc8949_encode_tag() {
    assert_eq!(
        encode(&CBOR::Tag(1, Box::new(CBOR::UInt(1363896240)))),
        &hex!("c11a514b67b0")[..]
    );
    assert_eq!(
        encode(&CBOR::Tag(23, Box::new(CBOR::Bstr(vec![1, 2, 3, 4])))),
        &hex!("d74401020304")[..]
    );
}

#[test]
fn rfc8949_encode_simple() {
    assert_eq!(encode(&CBOR::Bool(false)), &hex!("f4")[..]);
    assert_eq!(encode(&CBOR::Bool(true)), &hex!("f5")[..]);
    assert_eq!(encode(&CBOR::Null), &hex!("f6")[..]);
    assert_eq!(encode(&CBOR::Undefined), &hex!("f7")[..]);
    assert_eq!(encode(&CBOR::Simple(16)), &hex!("f0")[..]);
    assert_eq!(encode(&CBOR::Simple(255)), &hex!("f8ff")[..]);
    // Codes in the reserved range are emitted as given; the caller is trusted
    assert_eq!(encode(&CBOR::Simple(24)), &hex!("f818")[..]);
}

#[test]
fn rfc8949_encode_float() {
    // Outside canonical mode each float keeps its stored width
    assert_eq!(
        encode(&CBOR::Float16(f16::from_bits(0x3e00))),
        &hex!("f93e00")[..]
    );
    assert_eq!(encode(&CBOR::Float32(100000.0)), &hex!("fa47c35000")[..]);
    assert_eq!(encode(&CBOR::Float64(1.1)), &hex!("fb3ff199999999999a")[..]);
    assert_eq!(encode(&CBOR::Float64(1.5)), &hex!("fb3ff8000000000000")[..]);
    assert_eq!(
        encode(&CBOR::Float64(f64::from_bits(0x7ff8000000000001))),
        &hex!("fb7ff8000000000001")[..]
    );
}

/// Everything the encoder emits must decode back to an equal tree.
#[test]
fn encode_decode_agreement() {
    let items = [
        CBOR::UInt(0),
        CBOR::from(-1i64),
        CBOR::NInt(u64::MAX),
        CBOR::Bstr(vec![0xde, 0xad, 0xbe, 0xef]),
        CBOR::from("streaming"),
        CBOR::Array(vec![CBOR::UInt(1), CBOR::from("two"), CBOR::Null]),
        CBOR::Map(vec![
            (CBOR::from("dup"), CBOR::UInt(1)),
            (CBOR::from("dup"), CBOR::UInt(2)),
        ]),
        CBOR::Tag(55799, Box::new(CBOR::Undefined)),
        CBOR::Simple(99),
        CBOR::Float16(f16::from_bits(0x7e01)),
        CBOR::Float32(f32::NAN),
        CBOR::Float64(-0.0),
    ];
    let decoder = CBORDecoder::new();
    for item in items {
        let bytes = encode(&item);
        assert_eq!(
            decoder.decode(&bytes).expect("encoder output must decode"),
            item
        );
    }
}
