use std::io::{self, Cursor, Read};
use std::net::{Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, ReadBytesExt};

use super::Error;

/// A byte source a packet is decoded from
///
/// Everything is read sequentially. Compressed names additionally need to
/// jump to an absolute offset in the packet and back, which only sources
/// with random access can do.
pub trait Source: Read {
    /// Number of bytes from the start of the packet to the read position
    fn offset(&self) -> u64;

    /// Moves the read position to an absolute offset in the packet
    ///
    /// Sources without random access keep the default, which fails with
    /// [`Error::NotSeekable`].
    fn seek_to(&mut self, offset: u64) -> Result<(), Error> {
        let _ = offset;
        Err(Error::NotSeekable {
            offset: self.offset(),
        })
    }
}

impl<T: AsRef<[u8]>> Source for Cursor<T> {
    fn offset(&self) -> u64 {
        self.position()
    }

    fn seek_to(&mut self, offset: u64) -> Result<(), Error> {
        self.set_position(offset);
        Ok(())
    }
}

/// Wraps a plain reader, e.g. a socket, as a non-seekable `Source`
///
/// Packets without compression pointers decode fine from a stream; the
/// first pointer fails the decode with [`Error::NotSeekable`].
#[derive(Debug)]
pub struct Stream<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> Stream<R> {
    pub fn new(inner: R) -> Stream<R> {
        Stream { inner, offset: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Stream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.offset += read as u64;
        Ok(read)
    }
}

impl<R: Read> Source for Stream<R> {
    fn offset(&self) -> u64 {
        self.offset
    }
}

fn short_read(err: io::Error, offset: u64, expected: usize) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::ShortRead { offset, expected }
    } else {
        Error::Io(err)
    }
}

pub(crate) fn read_u8<S: Source>(src: &mut S) -> Result<u8, Error> {
    let offset = src.offset();
    src.read_u8().map_err(|e| short_read(e, offset, 1))
}

pub(crate) fn read_u16<S: Source>(src: &mut S) -> Result<u16, Error> {
    let offset = src.offset();
    src.read_u16::<BigEndian>()
        .map_err(|e| short_read(e, offset, 2))
}

pub(crate) fn read_u32<S: Source>(src: &mut S) -> Result<u32, Error> {
    let offset = src.offset();
    src.read_u32::<BigEndian>()
        .map_err(|e| short_read(e, offset, 4))
}

pub(crate) fn read_bytes<S: Source>(src: &mut S, len: usize) -> Result<Vec<u8>, Error> {
    let offset = src.offset();
    let mut buf = vec![0; len];
    src.read_exact(&mut buf)
        .map_err(|e| short_read(e, offset, len))?;
    Ok(buf)
}

pub(crate) fn read_ipv4<S: Source>(src: &mut S) -> Result<Ipv4Addr, Error> {
    read_u32(src).map(Ipv4Addr::from)
}

pub(crate) fn read_ipv6<S: Source>(src: &mut S) -> Result<Ipv6Addr, Error> {
    let offset = src.offset();
    let mut octets = [0u8; 16];
    src.read_exact(&mut octets)
        .map_err(|e| short_read(e, offset, 16))?;
    Ok(Ipv6Addr::from(octets))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_width_reads() {
        let data = b"\x12\x34\xde\xad\xbe\xef\x01\x02\x03\x04";
        let mut src = Cursor::new(&data[..]);
        assert_eq!(read_u16(&mut src).unwrap(), 0x1234);
        assert_eq!(read_u32(&mut src).unwrap(), 0xdead_beef);
        assert_eq!(read_ipv4(&mut src).unwrap(), Ipv4Addr::new(1, 2, 3, 4));
        assert_eq!(src.offset(), 10);
    }

    #[test]
    fn short_read_reports_offset() {
        let data = b"\x00\x01\x02";
        let mut src = Cursor::new(&data[..]);
        read_u16(&mut src).unwrap();
        match read_u16(&mut src) {
            Err(Error::ShortRead {
                offset: 2,
                expected: 2,
            }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn ipv6_block() {
        let mut data = vec![0u8; 16];
        data[0] = 0x20;
        data[1] = 0x01;
        data[15] = 1;
        let mut src = Cursor::new(&data[..]);
        assert_eq!(
            read_ipv6(&mut src).unwrap(),
            "2001::1".parse::<Ipv6Addr>().unwrap()
        );
    }

    #[test]
    fn stream_counts_and_refuses_to_seek() {
        let data = b"\x00\x05\x00\x00\x00\x07";
        let mut src = Stream::new(&data[..]);
        assert_eq!(read_u16(&mut src).unwrap(), 5);
        assert_eq!(src.offset(), 2);
        assert!(matches!(
            src.seek_to(0),
            Err(Error::NotSeekable { offset: 2 })
        ));
        assert_eq!(read_u32(&mut src).unwrap(), 7);
    }
}
