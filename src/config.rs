//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//

use crate::encoding::Encoding;
use derive_builder::*;
use getset::CopyGetters;

/// The largest integer a double precision float represents exactly (2^53 - 1).
/// Use it as `max_u64` to interoperate with peers that store integers as doubles.
pub const MAX_SAFE_INTEGER: u64 = 0x001F_FFFF_FFFF_FFFF;

#[derive(Builder, Debug, CopyGetters, Clone, PartialEq)]
#[builder(setter(into))]
pub struct BufferListConfig {
    /// Upper bound enforced when writing or reading a 64 bit integer.
    #[get_copy = "pub"]
    #[builder(default = "u64::max_value()")]
    pub max_u64: u64,

    /// Encoding used for text sources and for `Display`.
    #[get_copy = "pub"]
    #[builder(default = "Encoding::Utf8")]
    pub default_encoding: Encoding,
}

impl Default for BufferListConfig {
    fn default() -> Self {
        BufferListConfig {
            max_u64: u64::max_value(),
            default_encoding: Encoding::default(),
        }
    }
}
