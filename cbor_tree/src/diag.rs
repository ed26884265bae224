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
/// # diag - CBOR diagnostic style output for structured binary data
///
/// CBOR diagnostic notation is defined in RFC8949 §8 and extended slightly in RFC8610. It is a
/// readable, roughly-JSON rendering of a data item intended for logs, test failures and debug
/// tooling, not for machine consumption.
///
/// ## Format recap
///
/// - `<tag> ( <data> )` is used to denote tags.
/// - Integer and float types are formatted in their natural programming language formats;
///   -Infinity, Infinity and NaN are written as you might expect.
/// - true, false, null and undefined mean what you would expect; other simple values are
///   written `simple(n)`.
/// - Text strings are written "as a string" in double quotes.
/// - Byte strings are written as h'0123456789abcdef'.
use crate::ast::CBOR;

use std::error::Error;
use std::io::Write;

/// Trait defining a helper function for conveniently displaying information in CBOR
/// diagnostic format.
pub trait Diag {
    fn cbor_diag(&self, outfp: &mut dyn Write) -> Result<(), Box<dyn Error>>;
}

impl Diag for CBOR {
    fn cbor_diag(&self, outfp: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        diag_item(self, outfp)?;
        Ok(())
    }
}

fn diag_item(item: &CBOR, out: &mut dyn Write) -> std::io::Result<()> {
    match item {
        CBOR::UInt(v) => write!(out, "{}", v),
        CBOR::NInt(v) => write!(out, "{}", -1 - (*v as i128)),
        CBOR::Bstr(bytes) => {
            write!(out, "h'")?;
            for b in bytes {
                write!(out, "{:02x}", b)?;
            }
            write!(out, "'")
        }
        CBOR::Tstr(s) => {
            write!(out, "\"")?;
            for c in s.chars() {
                match c {
                    '"' => write!(out, "\\\"")?,
                    '\\' => write!(out, "\\\\")?,
                    _ => write!(out, "{}", c)?,
                }
            }
            write!(out, "\"")
        }
        CBOR::Array(items) => {
            write!(out, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                diag_item(item, out)?;
            }
            write!(out, "]")
        }
        CBOR::Map(pairs) => {
            write!(out, "{{")?;
            for (i, (key, value)) in pairs.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                diag_item(key, out)?;
                write!(out, ": ")?;
                diag_item(value, out)?;
            }
            write!(out, "}}")
        }
        CBOR::Tag(tag, content) => {
            write!(out, "{}(", tag)?;
            diag_item(content, out)?;
            write!(out, ")")
        }
        CBOR::Simple(code) => write!(out, "simple({})", code),
        CBOR::Bool(false) => write!(out, "false"),
        CBOR::Bool(true) => write!(out, "true"),
        CBOR::Null => write!(out, "null"),
        CBOR::Undefined => write!(out, "undefined"),
        CBOR::Float16(v) => diag_float(f64::from(*v), out),
        CBOR::Float32(v) => diag_float(*v as f64, out),
        CBOR::Float64(v) => diag_float(*v, out),
    }
}

fn diag_float(v: f64, out: &mut dyn Write) -> std::io::Result<()> {
    if v.is_nan() {
        write!(out, "NaN")
    } else if v == f64::INFINITY {
        write!(out, "Infinity")
    } else if v == f64::NEG_INFINITY {
        write!(out, "-Infinity")
    } else {
        // {:?} keeps a trailing ".0" on integral values, as diagnostic notation expects
        write!(out, "{:?}", v)
    }
}
