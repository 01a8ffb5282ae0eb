//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//

#![deny(
    clippy::all,
    clippy::cargo,
    clippy::else_if_without_else,
    clippy::empty_line_after_outer_attr,
    clippy::multiple_inherent_impl,
    clippy::mut_mut,
    clippy::path_buf_push_overwrite
)]
#![warn(
    clippy::cargo_common_metadata,
    clippy::mutex_integer,
    clippy::needless_borrow,
    clippy::similar_names
)]
#![allow(clippy::multiple_crate_versions)]

//! A list of byte chunks that reads like one contiguous buffer.
//!
//! [`BufferList`] collects chunks without copying them and resolves logical offsets to chunks
//! on demand, so building or parsing a binary message piece by piece does not pay for a
//! concatenation on every step. On top of it:
//! * [`BinaryCodec`] writes and reads little endian integers and tag prefixed varints.
//! * [`BufferListReader`] reads a list sequentially through `std::io::Read` and `Seek`.
//! * [`Encoding`] converts text to chunks and materialized ranges back to text.
//!
//! ```
//! use buffer_list::{BinaryCodec, BufferList, Encoding};
//!
//! let mut list = BufferList::new();
//! list.write_varint(2).unwrap();
//! list.write_varint(0xfe).unwrap();
//! list.append("hi");
//!
//! assert_eq!(list.to_string_with(Encoding::Hex, ..), "02fdfe006869");
//! let first = list.read_varint(0).unwrap();
//! let second = list.read_varint(first.next_offset).unwrap();
//! assert_eq!((second.value, second.next_offset), (0xfe, 4));
//! ```
pub mod buffer_list;
pub mod codec;
pub mod config;
pub mod encoding;
pub mod error;
pub mod reader;

pub use buffer_list::{BufferList, ChunkOffset, Source};
pub use codec::{BinaryCodec, VarInt};
pub use config::{BufferListConfig, BufferListConfigBuilder, MAX_SAFE_INTEGER};
pub use encoding::Encoding;
pub use error::BufferListError;
pub use reader::BufferListReader;
