//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//

//! Named text encodings used to turn text into chunks and materialized bytes back into text.

use crate::error::{BufferListError, InvalidBase64, InvalidHex, UnknownEncoding};
use snafu::ResultExt;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Hex,
    Utf8,
    /// 7 bit ASCII. Decoding drops the high bit of every byte.
    Ascii,
    /// One byte per character, also known as `binary`.
    Latin1,
    Base64,
    /// Little endian UTF-16, also known as `ucs2`.
    Utf16Le,
}

impl Encoding {
    pub const ALL: [Encoding; 6] = [
        Encoding::Hex,
        Encoding::Utf8,
        Encoding::Ascii,
        Encoding::Latin1,
        Encoding::Base64,
        Encoding::Utf16Le,
    ];

    /// Converts text into the bytes it represents under this encoding.
    ///
    /// Only hex and base64 can fail, since their text must be well formed.
    /// Latin1 and ASCII keep the low byte of each UTF-16 code unit.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, BufferListError> {
        let bytes = match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Ascii | Encoding::Latin1 => text.encode_utf16().map(|unit| unit as u8).collect(),
            Encoding::Utf16Le => text.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect(),
            Encoding::Hex => hex::decode(text).context(InvalidHex)?,
            Encoding::Base64 => base64::decode(text).context(InvalidBase64)?,
        };
        Ok(bytes)
    }

    /// Renders bytes as text. Invalid UTF-8 and UTF-16 sequences become U+FFFD,
    /// and a trailing odd byte is ignored by UTF-16.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Ascii => bytes.iter().map(|b| char::from(b & 0x7f)).collect(),
            Encoding::Latin1 => bytes.iter().map(|b| char::from(*b)).collect(),
            Encoding::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            Encoding::Hex => hex::encode(bytes),
            Encoding::Base64 => base64::encode(bytes),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::Utf8 => "utf8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
            Encoding::Base64 => "base64",
            Encoding::Utf16Le => "utf16le",
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Utf8
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = BufferListError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "hex" => Ok(Encoding::Hex),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "ascii" => Ok(Encoding::Ascii),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "base64" => Ok(Encoding::Base64),
            "ucs2" | "ucs-2" | "utf16le" | "utf-16le" => Ok(Encoding::Utf16Le),
            _ => UnknownEncoding { name }.fail(),
        }
    }
}
