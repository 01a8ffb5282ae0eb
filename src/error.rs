//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//

use base64::DecodeError as Base64Error;
use hex::FromHexError;
use snafu::{Backtrace, Snafu};

/// This kind of error that can be produced while encoding into or decoding from a BufferList.
///
/// Range arguments to copy and slice never produce an error, they are clamped instead.
#[derive(Debug, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum BufferListError {
    #[snafu(display("Value {} is larger than the maximum value {} for an unsigned 64 bit integer", value, max))]
    ValueTooLarge {
        value: u64,
        max: u64,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Cannot read {} bytes at offset {} from a buffer of length {}",
        width,
        offset,
        length
    ))]
    OutOfBounds {
        offset: usize,
        width: usize,
        length: usize,
        backtrace: Backtrace,
    },

    #[snafu(display("Unknown encoding: {}", name))]
    UnknownEncoding { name: String },

    #[snafu(display("Could not decode hex text: {}", source))]
    InvalidHex { source: FromHexError },

    #[snafu(display("Could not decode base64 text: {}", source))]
    InvalidBase64 { source: Base64Error },
}
