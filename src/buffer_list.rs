//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//

use crate::config::BufferListConfig;
use crate::encoding::Encoding;
use crate::error::BufferListError;
use bytes::{Bytes, BytesMut};
use derive_new::new;
use std::fmt;
use std::io;
use std::iter::FromIterator;
use std::ops::{Bound, RangeBounds};
use tracing::trace;

/// Position of a logical offset inside the chunk list.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOffset {
    /// Index of the chunk holding the byte.
    pub index: usize,
    /// Offset of the byte inside that chunk.
    pub offset: usize,
}

/// Everything that can be appended to a [`BufferList`].
#[derive(Debug, Clone)]
pub enum Source {
    /// A single chunk, appended as is.
    Chunk(Bytes),
    /// Another list. Its chunks are appended one by one, so lists never nest.
    List(BufferList),
    /// A single byte, wrapped as a one byte chunk.
    Byte(u8),
    /// Text, appended as its UTF-8 bytes.
    Text(String),
    /// Several chunks, each appended independently.
    Chunks(Vec<Bytes>),
}

impl From<Bytes> for Source {
    fn from(chunk: Bytes) -> Self {
        Source::Chunk(chunk)
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Chunk(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Source::Chunk(Bytes::copy_from_slice(bytes))
    }
}

impl<const N: usize> From<[u8; N]> for Source {
    fn from(bytes: [u8; N]) -> Self {
        Source::Chunk(Bytes::copy_from_slice(&bytes))
    }
}

impl From<u8> for Source {
    fn from(byte: u8) -> Self {
        Source::Byte(byte)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_owned())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<BufferList> for Source {
    fn from(list: BufferList) -> Self {
        Source::List(list)
    }
}

impl From<&BufferList> for Source {
    fn from(list: &BufferList) -> Self {
        Source::List(list.clone())
    }
}

impl From<Vec<Bytes>> for Source {
    fn from(chunks: Vec<Bytes>) -> Self {
        Source::Chunks(chunks)
    }
}

/// A logical byte sequence made of a list of immutable chunks.
///
/// Appending never copies or merges chunks, it only pushes them at the tail. Reads resolve a
/// logical offset to a chunk and walk forward from there, so a range that lies in a single
/// chunk is returned without copying.
///
/// ```
/// use buffer_list::BufferList;
///
/// let mut list = BufferList::new();
/// list.append("abcd").append("efg").append("hi").append("j");
///
/// assert_eq!(list.len(), 10);
/// assert_eq!(list.get(4), Some(b'e'));
/// assert_eq!(&list.slice(3..8)[..], b"defgh");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferList {
    chunks: Vec<Bytes>,
    // cumulative end offset of every chunk, ends[i] is the sum of the lengths of chunks[..=i]
    ends: Vec<usize>,
    length: usize,
    config: BufferListConfig,
}

// Where materialized bytes go: a fresh allocation, or a caller's buffer at an offset.
enum Target<'a> {
    Slice,
    Copy { dst: &'a mut [u8], start: usize },
}

enum Materialized {
    Sliced(Bytes),
    Copied(usize),
}

impl Materialized {
    fn len(&self) -> usize {
        match self {
            Materialized::Sliced(bytes) => bytes.len(),
            Materialized::Copied(copied) => *copied,
        }
    }

    fn into_bytes(self) -> Bytes {
        match self {
            Materialized::Sliced(bytes) => bytes,
            Materialized::Copied(_) => Bytes::new(),
        }
    }
}

impl BufferList {
    pub fn new() -> Self {
        BufferList::default()
    }

    pub fn with_config(config: BufferListConfig) -> Self {
        BufferList {
            config,
            ..BufferList::default()
        }
    }

    /// Creates a list seeded with a single append.
    pub fn from_source<S: Into<Source>>(source: S) -> Self {
        let mut list = BufferList::new();
        list.append(source);
        list
    }

    pub fn config(&self) -> &BufferListConfig {
        &self.config
    }

    /// Total number of bytes across all chunks.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> std::slice::Iter<'_, Bytes> {
        self.chunks.iter()
    }

    /// Appends a source at the tail and returns the list for chaining.
    ///
    /// Zero length chunks are kept but never hold a logical offset.
    pub fn append<S: Into<Source>>(&mut self, source: S) -> &mut Self {
        match source.into() {
            Source::Chunk(chunk) => self.push_chunk(chunk),
            Source::List(list) => {
                trace!("flattening {} chunks into the list", list.chunks.len());
                for chunk in list.chunks {
                    self.push_chunk(chunk);
                }
            }
            Source::Byte(byte) => self.push_chunk(Bytes::copy_from_slice(&[byte])),
            Source::Text(text) => self.push_chunk(Bytes::from(text)),
            Source::Chunks(chunks) => {
                for chunk in chunks {
                    self.push_chunk(chunk);
                }
            }
        }
        self
    }

    /// Appends text converted with a named encoding.
    ///
    /// Hex and base64 text must be well formed. On failure nothing is appended.
    pub fn append_encoded(&mut self, text: &str, encoding: Encoding) -> Result<&mut Self, BufferListError> {
        let bytes = encoding.encode(text)?;
        self.push_chunk(Bytes::from(bytes));
        Ok(self)
    }

    fn push_chunk(&mut self, chunk: Bytes) {
        self.length += chunk.len();
        self.ends.push(self.length);
        self.chunks.push(chunk);
    }

    /// Maps a logical offset to the chunk that holds it, or `None` if the offset is not below `len()`.
    pub fn locate(&self, offset: usize) -> Option<ChunkOffset> {
        if offset >= self.length {
            return None;
        }
        // zero length chunks share their end with the previous chunk and are skipped here
        let index = self.ends.partition_point(|&end| end <= offset);
        let chunk_start = self.ends[index] - self.chunks[index].len();
        Some(ChunkOffset::new(index, offset - chunk_start))
    }

    /// Copies the bytes of `range` into `dst` starting at `dst_start` and returns how many bytes were copied.
    ///
    /// The range is clamped to the list, and the copy is truncated to the space left in `dst`.
    pub fn copy<R: RangeBounds<usize>>(&self, dst: &mut [u8], dst_start: usize, range: R) -> usize {
        self.materialize(
            Target::Copy {
                dst,
                start: dst_start,
            },
            range,
        )
        .len()
    }

    /// Returns the bytes of `range` as one contiguous buffer.
    ///
    /// A range inside a single chunk shares that chunk's memory. An empty or out of bounds range
    /// gives an empty buffer.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Bytes {
        self.materialize(Target::Slice, range).into_bytes()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.slice(..).to_vec()
    }

    /// Returns the byte at `index`.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.slice(index..index.saturating_add(1)).first().copied()
    }

    /// Renders the bytes of `range` as text in the given encoding.
    pub fn to_string_with<R: RangeBounds<usize>>(&self, encoding: Encoding, range: R) -> String {
        encoding.decode(&self.slice(range))
    }

    // Resolves the requested range to [start, end) within the list, None if it is empty.
    fn normalize<R: RangeBounds<usize>>(&self, range: &R) -> Option<(usize, usize)> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.length,
        }
        .min(self.length);

        if start >= self.length || end <= start {
            None
        } else {
            Some((start, end))
        }
    }

    fn materialize<R: RangeBounds<usize>>(&self, target: Target<'_>, range: R) -> Materialized {
        let slicing = matches!(target, Target::Slice);
        let empty = || {
            if slicing {
                Materialized::Sliced(Bytes::new())
            } else {
                Materialized::Copied(0)
            }
        };

        let (start, mut end) = match self.normalize(&range) {
            Some(bounds) => bounds,
            None => return empty(),
        };
        let (dst, mut cursor) = match target {
            Target::Copy { dst, start: dst_start } => {
                let room = dst.len().saturating_sub(dst_start);
                end = end.min(start.saturating_add(room));
                if end <= start {
                    return empty();
                }
                (Some(dst), dst_start)
            }
            Target::Slice => (None, 0),
        };
        let requested = end - start;

        // the whole list
        if start == 0 && end == self.length {
            return match dst {
                None => Materialized::Sliced(self.concat()),
                Some(dst) => {
                    for chunk in &self.chunks {
                        dst[cursor..cursor + chunk.len()].copy_from_slice(chunk);
                        cursor += chunk.len();
                    }
                    Materialized::Copied(requested)
                }
            };
        }

        let ChunkOffset { index, offset } = match self.locate(start) {
            Some(located) => located,
            None => return empty(),
        };

        // a sub range of a single chunk
        let first = &self.chunks[index];
        if requested <= first.len() - offset {
            return match dst {
                None => Materialized::Sliced(first.slice(offset..offset + requested)),
                Some(dst) => {
                    dst[cursor..cursor + requested].copy_from_slice(&first[offset..offset + requested]);
                    Materialized::Copied(requested)
                }
            };
        }

        trace!(
            "collecting {} bytes from offset {} starting at chunk {}",
            requested,
            start,
            index
        );
        let mut owned = Vec::<u8>::new();
        let out: &mut [u8] = match dst {
            Some(dst) => dst,
            None => {
                owned.resize(requested, 0);
                &mut owned[..]
            }
        };

        let mut remaining = requested;
        let mut offset = offset;
        for chunk in &self.chunks[index..] {
            let available = chunk.len() - offset;
            if remaining > available {
                out[cursor..cursor + available].copy_from_slice(&chunk[offset..]);
                cursor += available;
                remaining -= available;
                offset = 0;
            } else {
                out[cursor..cursor + remaining].copy_from_slice(&chunk[offset..offset + remaining]);
                break;
            }
        }

        if slicing {
            Materialized::Sliced(Bytes::from(owned))
        } else {
            Materialized::Copied(requested)
        }
    }

    fn concat(&self) -> Bytes {
        if self.chunks.len() == 1 {
            return self.chunks[0].clone();
        }
        let mut buf = BytesMut::with_capacity(self.length);
        for chunk in &self.chunks {
            buf.extend_from_slice(chunk);
        }
        buf.freeze()
    }
}

impl PartialEq for BufferList {
    /// Lists are equal when they hold the same bytes, however they are chunked.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .chunks
                .iter()
                .flat_map(|chunk| chunk.iter())
                .eq(other.chunks.iter().flat_map(|chunk| chunk.iter()))
    }
}

impl Eq for BufferList {}

impl fmt::Display for BufferList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_string_with(self.config.default_encoding(), ..))
    }
}

impl From<Bytes> for BufferList {
    fn from(chunk: Bytes) -> Self {
        BufferList::from_source(chunk)
    }
}

impl From<Vec<u8>> for BufferList {
    fn from(bytes: Vec<u8>) -> Self {
        BufferList::from_source(bytes)
    }
}

impl From<Vec<Bytes>> for BufferList {
    fn from(chunks: Vec<Bytes>) -> Self {
        BufferList::from_source(chunks)
    }
}

impl Extend<Bytes> for BufferList {
    fn extend<I: IntoIterator<Item = Bytes>>(&mut self, iter: I) {
        for chunk in iter {
            self.push_chunk(chunk);
        }
    }
}

impl FromIterator<Bytes> for BufferList {
    fn from_iter<I: IntoIterator<Item = Bytes>>(iter: I) -> Self {
        let mut list = BufferList::new();
        list.extend(iter);
        list
    }
}

impl io::Write for BufferList {
    /// Appends a copy of `buf` as a new chunk.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !buf.is_empty() {
            self.push_chunk(Bytes::copy_from_slice(buf));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
