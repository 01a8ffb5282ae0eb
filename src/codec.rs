//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//

//! Little endian integer and varint codecs layered on [`BufferList`].
//!
//! Every write appends one freshly allocated chunk of the exact width, and every read slices the
//! exact width out of the list, so values may straddle chunk boundaries.
//!
//! Varints use a one byte tag:
//!
//! | value              | encoding                  |
//! |--------------------|---------------------------|
//! | `< 0xFD`           | the value as one byte     |
//! | `<= 0xFFFF`        | `0xFD` then a `u16` (LE)  |
//! | `<= 0xFFFF_FFFF`   | `0xFE` then a `u32` (LE)  |
//! | larger             | `0xFF` then a `u64` (LE)  |

use crate::buffer_list::BufferList;
use crate::error::{BufferListError, OutOfBounds, ValueTooLarge};
use byteorder::{ByteOrder, LittleEndian};
use derive_new::new;
use snafu::ensure;
use tracing::debug;

pub const VARINT_U16_TAG: u8 = 0xfd;
pub const VARINT_U32_TAG: u8 = 0xfe;
pub const VARINT_U64_TAG: u8 = 0xff;

/**
 * An integer with a fixed little endian width.
 */
pub trait FixedWidth: Sized + Copy {
    const WIDTH: usize;
    fn put(self, buf: &mut [u8]);
    fn get(buf: &[u8]) -> Self;
}

impl FixedWidth for u8 {
    const WIDTH: usize = 1;
    fn put(self, buf: &mut [u8]) {
        buf[0] = self;
    }
    fn get(buf: &[u8]) -> Self {
        buf[0]
    }
}

macro_rules! impl_fixed_width {
    ($($ty:ty: $width:expr => $write:ident / $read:ident),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = $width;
                fn put(self, buf: &mut [u8]) {
                    LittleEndian::$write(buf, self);
                }
                fn get(buf: &[u8]) -> Self {
                    LittleEndian::$read(buf)
                }
            }
        )*
    };
}

impl_fixed_width!(
    u16: 2 => write_u16 / read_u16,
    u32: 4 => write_u32 / read_u32,
);

/// A decoded varint and the offset right after its encoding.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt {
    pub value: u64,
    pub next_offset: usize,
}

impl VarInt {
    /// Number of bytes `value` occupies once encoded.
    pub fn encoded_len(value: u64) -> usize {
        if value < u64::from(VARINT_U16_TAG) {
            1
        } else if value <= 0xffff {
            3
        } else if value <= 0xffff_ffff {
            5
        } else {
            9
        }
    }
}

/**
 * trait for reading and writing binary integers on a chunked buffer.
 */
pub trait BinaryCodec {
    fn write_u8(&mut self, n: u8);
    fn write_u16_le(&mut self, n: u16);
    fn write_u32_le(&mut self, n: u32);
    /// Fails without appending when `n` is above the configured maximum.
    fn write_u64_le(&mut self, n: u64) -> Result<(), BufferListError>;
    fn write_varint(&mut self, n: u64) -> Result<(), BufferListError>;

    fn read_u8(&self, offset: usize) -> Result<u8, BufferListError>;
    fn read_u16_le(&self, offset: usize) -> Result<u16, BufferListError>;
    fn read_u32_le(&self, offset: usize) -> Result<u32, BufferListError>;
    fn read_u64_le(&self, offset: usize) -> Result<u64, BufferListError>;
    fn read_varint(&self, offset: usize) -> Result<VarInt, BufferListError>;
}

fn write_fixed<T: FixedWidth>(list: &mut BufferList, value: T) {
    let mut chunk = vec![0u8; T::WIDTH];
    value.put(&mut chunk);
    list.append(chunk);
}

fn read_fixed<T: FixedWidth>(list: &BufferList, offset: usize) -> Result<T, BufferListError> {
    let bytes = list.slice(offset..offset.saturating_add(T::WIDTH));
    ensure!(
        bytes.len() == T::WIDTH,
        OutOfBounds {
            offset,
            width: T::WIDTH,
            length: list.len()
        }
    );
    Ok(T::get(&bytes))
}

fn verify_uint(value: u64, max: u64) -> Result<(), BufferListError> {
    if value > max {
        debug!("rejecting integer {} above the maximum {}", value, max);
        return ValueTooLarge { value, max }.fail();
    }
    Ok(())
}

impl BinaryCodec for BufferList {
    fn write_u8(&mut self, n: u8) {
        write_fixed(self, n);
    }

    fn write_u16_le(&mut self, n: u16) {
        write_fixed(self, n);
    }

    fn write_u32_le(&mut self, n: u32) {
        write_fixed(self, n);
    }

    fn write_u64_le(&mut self, n: u64) -> Result<(), BufferListError> {
        verify_uint(n, self.config().max_u64())?;
        let mut chunk = vec![0u8; 8];
        LittleEndian::write_u32(&mut chunk[..4], (n & 0xffff_ffff) as u32);
        LittleEndian::write_u32(&mut chunk[4..], (n >> 32) as u32);
        self.append(chunk);
        Ok(())
    }

    fn write_varint(&mut self, n: u64) -> Result<(), BufferListError> {
        if n < u64::from(VARINT_U16_TAG) {
            self.write_u8(n as u8);
        } else if n <= 0xffff {
            self.write_u8(VARINT_U16_TAG);
            self.write_u16_le(n as u16);
        } else if n <= 0xffff_ffff {
            self.write_u8(VARINT_U32_TAG);
            self.write_u32_le(n as u32);
        } else {
            // checked before the tag goes out so a rejected value leaves no trace
            verify_uint(n, self.config().max_u64())?;
            self.write_u8(VARINT_U64_TAG);
            self.write_u64_le(n)?;
        }
        Ok(())
    }

    fn read_u8(&self, offset: usize) -> Result<u8, BufferListError> {
        read_fixed(self, offset)
    }

    fn read_u16_le(&self, offset: usize) -> Result<u16, BufferListError> {
        read_fixed(self, offset)
    }

    fn read_u32_le(&self, offset: usize) -> Result<u32, BufferListError> {
        read_fixed(self, offset)
    }

    fn read_u64_le(&self, offset: usize) -> Result<u64, BufferListError> {
        let low = self.read_u32_le(offset)?;
        let high = self.read_u32_le(offset.saturating_add(4))?;
        let n = u64::from(low) | (u64::from(high) << 32);
        verify_uint(n, self.config().max_u64())?;
        Ok(n)
    }

    fn read_varint(&self, offset: usize) -> Result<VarInt, BufferListError> {
        let tag = self.read_u8(offset)?;
        let payload = offset.saturating_add(1);
        let (value, size) = match tag {
            VARINT_U16_TAG => (u64::from(self.read_u16_le(payload)?), 3),
            VARINT_U32_TAG => (u64::from(self.read_u32_le(payload)?), 5),
            VARINT_U64_TAG => (self.read_u64_le(payload)?, 9),
            _ => (u64::from(tag), 1),
        };
        Ok(VarInt::new(value, offset + size))
    }
}
