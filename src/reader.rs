//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//

use crate::buffer_list::BufferList;
use crate::codec::BinaryCodec;
use crate::error::BufferListError;
use std::convert::TryFrom;
use std::io::{Error, ErrorKind, Read, Seek, SeekFrom};

/// Reads a [`BufferList`] sequentially from a cursor.
///
/// Implements [`Read`] and [`Seek`], so `byteorder::ReadBytesExt` works across chunk boundaries.
/// Seeking past the end is allowed; reads there return 0 bytes.
///
/// # Examples
/// ```
/// use buffer_list::{BinaryCodec, BufferList, BufferListReader};
/// use byteorder::{BigEndian, ReadBytesExt};
///
/// let mut list = BufferList::new();
/// list.write_varint(300).unwrap();
/// list.append(vec![0x00, 0x01]).append(vec![0x02, 0x03]);
///
/// let mut reader = BufferListReader::new(&list);
/// assert_eq!(reader.read_varint().unwrap(), 300);
/// assert_eq!(reader.read_u32::<BigEndian>().unwrap(), 0x0001_0203);
/// ```
#[derive(Debug, Clone)]
pub struct BufferListReader<'a> {
    list: &'a BufferList,
    offset: u64,
}

impl<'a> BufferListReader<'a> {
    pub fn new(list: &'a BufferList) -> Self {
        BufferListReader { list, offset: 0 }
    }

    pub fn current_offset(&self) -> u64 {
        self.offset
    }

    /// Number of bytes between the cursor and the end of the list.
    pub fn remaining(&self) -> usize {
        (self.list.len() as u64).saturating_sub(self.offset) as usize
    }

    /// Decodes the varint at the cursor and moves past it.
    ///
    /// The cursor does not move when decoding fails.
    pub fn read_varint(&mut self) -> Result<u64, BufferListError> {
        let varint = self.list.read_varint(self.position())?;
        self.offset = varint.next_offset as u64;
        Ok(varint.value)
    }

    fn position(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(usize::max_value())
    }
}

impl Read for BufferListReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let read = self.list.copy(buf, 0, self.position()..);
        self.offset += read as u64;
        Ok(read)
    }
}

impl Seek for BufferListReader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let (base, delta) = match pos {
            SeekFrom::Start(offset) => {
                self.offset = offset;
                return Ok(offset);
            }
            SeekFrom::End(delta) => (self.list.len() as u64, delta),
            SeekFrom::Current(delta) => (self.offset, delta),
        };
        let target = if delta >= 0 {
            base.checked_add(delta as u64)
        } else {
            base.checked_sub(delta.unsigned_abs())
        };
        match target {
            Some(offset) => {
                self.offset = offset;
                Ok(offset)
            }
            None => Err(Error::new(
                ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use byteorder::{LittleEndian, ReadBytesExt};

    fn create_list() -> BufferList {
        let mut list = BufferList::new();
        list.append(vec![1u8, 2]).append(vec![3u8]).append(vec![4u8, 5, 6, 7]);
        list
    }

    #[test]
    fn test_read_across_chunks() {
        let list = create_list();
        let mut reader = BufferListReader::new(&list);

        let mut buf = [0u8; 3];
        assert_eq!(reader.read(&mut buf).expect("read"), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(reader.remaining(), 4);

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).expect("read to end");
        assert_eq!(rest, vec![4, 5, 6, 7]);
        assert_eq!(reader.read(&mut buf).expect("read at end"), 0);
    }

    #[test]
    fn test_byte_seek() {
        let list = create_list();
        let mut reader = BufferListReader::new(&list);

        reader.seek(SeekFrom::Start(1)).expect("seek from start");
        assert_eq!(reader.read_u16::<LittleEndian>().expect("read u16"), 0x0302);

        reader.seek(SeekFrom::Current(-2)).expect("seek backwards");
        assert_eq!(reader.current_offset(), 1);

        reader.seek(SeekFrom::End(-1)).expect("seek from end");
        assert_eq!(reader.read_u8().expect("read last byte"), 7);

        assert!(reader.seek(SeekFrom::Current(-100)).is_err());
        assert_eq!(reader.current_offset(), 7);

        reader.seek(SeekFrom::End(10)).expect("seek past end");
        assert_eq!(reader.remaining(), 0);
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn test_read_varints_in_sequence() {
        let mut list = BufferList::new();
        list.write_varint(2).unwrap();
        list.write_varint(0xfe).unwrap();
        list.write_varint(0xff_ffff).unwrap();
        list.write_u8(0xfe);

        let mut reader = BufferListReader::new(&list);
        assert_eq!(reader.read_varint().unwrap(), 2);
        assert_eq!(reader.read_varint().unwrap(), 0xfe);
        assert_eq!(reader.read_varint().unwrap(), 0xff_ffff);
        assert_eq!(reader.current_offset(), 9);

        // the last tag promises four bytes that are not there
        assert!(reader.read_varint().is_err());
        assert_eq!(reader.current_offset(), 9);
    }
}
