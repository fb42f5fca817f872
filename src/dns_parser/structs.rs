use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use log::debug;

use super::source::{read_u16, read_u32};
use super::{Class, Error, Name, QueryClass, QueryType, RData, Source, Type};

/// A parsed chunk of data in the Query section of the packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: Name,
    pub qtype: QueryType,
    pub qclass: QueryClass,
}

impl Question {
    pub fn new(qname: Name, qtype: QueryType, qclass: QueryClass) -> Question {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    pub fn read_from<S: Source>(src: &mut S) -> Result<Question, Error> {
        Ok(Question {
            qname: Name::read_from(src)?,
            qtype: QueryType::from(read_u16(src)?),
            qclass: QueryClass::from(read_u16(src)?),
        })
    }

    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.qname.write_to(writer)?;
        writer.write_u16::<BigEndian>(self.qtype.into())?;
        writer.write_u16::<BigEndian>(self.qclass.into())
    }
}

/// A single DNS record
///
/// The common prefix (owner, type, class, TTL, payload length) followed by
/// the payload. The type lives in `data`, see [`ResourceRecord::typ`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub cls: Class,
    pub ttl: u32,
    /// Payload length as declared on the wire
    pub length: u16,
    pub data: RData,
}

impl ResourceRecord {
    /// Creates a record, computing the payload length from `data`
    ///
    /// Raw data tagged with a type that has its own `RData` variant is
    /// refused with `RawKnownType`.
    pub fn new(name: Name, cls: Class, ttl: u32, data: RData) -> Result<ResourceRecord, Error> {
        data.check()?;
        let mut payload = Vec::new();
        data.write_to(&mut payload)?;
        if payload.len() > u16::MAX as usize {
            return Err(Error::RdataTooLong(payload.len()));
        }

        Ok(ResourceRecord {
            name,
            cls,
            ttl,
            length: payload.len() as u16,
            data,
        })
    }

    pub fn typ(&self) -> Type {
        self.data.typ()
    }

    pub fn read_from<S: Source>(src: &mut S) -> Result<ResourceRecord, Error> {
        let name = Name::read_from(src)?;
        let typ = Type::from(read_u16(src)?);
        let cls = Class::from(read_u16(src)?);
        let ttl = read_u32(src)?;
        let length = read_u16(src)?;

        let start = src.offset();
        let data = RData::read_from(typ, length, src)?;
        if let RData::Unknown { .. } = data {
            debug!("skipped {} bytes of {:?} record for {}", length, typ, name);
        } else if src.offset() - start != u64::from(length) {
            debug!(
                "{:?} record for {} declares {} bytes but used {}",
                typ,
                name,
                length,
                src.offset() - start
            );
        }

        Ok(ResourceRecord {
            name,
            cls,
            ttl,
            length,
            data,
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn question_wire_form() {
        let question = Question::new(
            Name::from_str("example.com").unwrap(),
            QueryType::A,
            QueryClass::IN,
        );
        let mut buf = Vec::new();
        question.write_to(&mut buf).unwrap();
        assert_eq!(&buf[..], &b"\x07example\x03com\x00\x00\x01\x00\x01"[..]);

        let parsed = Question::read_from(&mut Cursor::new(&buf[..])).unwrap();
        assert_eq!(parsed, question);
    }

    #[test]
    fn question_only_codes() {
        let parsed = Question::read_from(&mut Cursor::new(&b"\x00\x00\xfc\x00\xff"[..])).unwrap();
        assert!(parsed.qname.is_root());
        assert_eq!(parsed.qtype, QueryType::AXFR);
        assert_eq!(parsed.qclass, QueryClass::Any);
    }

    #[test]
    fn record_length_is_computed() {
        let rr = ResourceRecord::new(
            Name::from_str("example.com").unwrap(),
            Class::IN,
            60,
            RData::CNAME(Name::from_str("alias.example.com").unwrap()),
        )
        .unwrap();
        assert_eq!(rr.length, 19);
        assert_eq!(rr.typ(), Type::CNAME);
    }

    #[test]
    fn raw_payload_needs_an_opaque_type() {
        let owner = Name::from_str("example.com").unwrap();
        let raw = |typ| RData::Unknown {
            typ,
            data: b"\x01a\x00".to_vec(),
        };
        match ResourceRecord::new(owner.clone(), Class::IN, 60, raw(Type::Unknown(5))) {
            Err(Error::RawKnownType(5)) => (),
            other => panic!("unexpected result: {:?}", other),
        }

        let rr = ResourceRecord::new(owner, Class::IN, 60, raw(Type::Unknown(99))).unwrap();
        assert_eq!(rr.length, 3);
    }

    #[test]
    fn unknown_record_is_skipped_by_length() {
        let data = b"\x00\x00\x63\x00\x01\x00\x00\x00\x0a\x00\x03abc\
                     \x00\x00\x01\x00\x01\x00\x00\x00\x0a\x00\x04\x0a\x00\x00\x01";
        let mut src = Cursor::new(&data[..]);

        let unknown = ResourceRecord::read_from(&mut src).unwrap();
        assert_eq!(unknown.typ(), Type::Unknown(99));
        assert_eq!(unknown.length, 3);
        assert_eq!(src.position(), 14);

        let a = ResourceRecord::read_from(&mut src).unwrap();
        assert_eq!(a.data, RData::A(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(a.ttl, 10);
        assert_eq!(src.position() as usize, data.len());
    }

    #[test]
    fn truncated_unknown_payload() {
        let data = b"\x00\x00\x63\x00\x01\x00\x00\x00\x0a\x00\x10abc";
        match ResourceRecord::read_from(&mut Cursor::new(&data[..])) {
            Err(Error::ShortRead {
                offset: 11,
                expected: 16,
            }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
