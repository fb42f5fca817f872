use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, WriteBytesExt};

use super::source::{read_bytes, read_ipv4, read_ipv6, read_u16, read_u32, read_u8};
use super::{Error, Name, Source, Type};

/// Payload of a start-of-authority record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Soa {
    /// Name server that was the original source of data for the zone
    pub primary_ns: Name,
    /// Mailbox of the person responsible for the zone
    pub mailbox: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum_ttl: u32,
}

/// The enumeration that represents known types of DNS resource records data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(Name),
    NS(Name),
    PTR(Name),
    MD(Name),
    MF(Name),
    MB(Name),
    MG(Name),
    MR(Name),
    SOA(Soa),
    MX {
        preference: u16,
        exchange: Name,
    },
    /// One or more character strings
    TXT(Vec<Vec<u8>>),
    HINFO {
        cpu: Vec<u8>,
        os: Vec<u8>,
    },
    MINFO {
        /// Mailbox responsible for the mailing list or mailbox
        rmailbx: Name,
        /// Mailbox receiving error messages
        emailbx: Name,
    },
    // Anything that can't be parsed yet
    Unknown {
        typ: Type,
        data: Vec<u8>,
    },
}

impl RData {
    pub fn typ(&self) -> Type {
        match *self {
            RData::A(..) => Type::A,
            RData::AAAA(..) => Type::AAAA,
            RData::CNAME(..) => Type::CNAME,
            RData::NS(..) => Type::NS,
            RData::PTR(..) => Type::PTR,
            RData::MD(..) => Type::MD,
            RData::MF(..) => Type::MF,
            RData::MB(..) => Type::MB,
            RData::MG(..) => Type::MG,
            RData::MR(..) => Type::MR,
            RData::SOA(..) => Type::SOA,
            RData::MX { .. } => Type::MX,
            RData::TXT(..) => Type::TXT,
            RData::HINFO { .. } => Type::HINFO,
            RData::MINFO { .. } => Type::MINFO,
            RData::Unknown { typ, .. } => typ,
        }
    }

    /// The address carried by A and AAAA records
    pub fn address(&self) -> Option<IpAddr> {
        match *self {
            RData::A(ip) => Some(IpAddr::V4(ip)),
            RData::AAAA(ip) => Some(IpAddr::V6(ip)),
            _ => None,
        }
    }

    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        match *self {
            RData::A(ip) => writer.write_all(&ip.octets()),
            RData::AAAA(ip) => writer.write_all(&ip.octets()),

            RData::CNAME(ref name)
            | RData::NS(ref name)
            | RData::PTR(ref name)
            | RData::MD(ref name)
            | RData::MF(ref name)
            | RData::MB(ref name)
            | RData::MG(ref name)
            | RData::MR(ref name) => name.write_to(writer),

            RData::SOA(ref soa) => {
                soa.primary_ns.write_to(writer)?;
                soa.mailbox.write_to(writer)?;
                writer.write_u32::<BigEndian>(soa.serial)?;
                writer.write_u32::<BigEndian>(soa.refresh)?;
                writer.write_u32::<BigEndian>(soa.retry)?;
                writer.write_u32::<BigEndian>(soa.expire)?;
                writer.write_u32::<BigEndian>(soa.minimum_ttl)
            }
            RData::MX {
                preference,
                ref exchange,
            } => {
                writer.write_u16::<BigEndian>(preference)?;
                exchange.write_to(writer)
            }
            RData::TXT(ref strings) => {
                for string in strings {
                    write_character_string(writer, string)?;
                }
                Ok(())
            }
            RData::HINFO { ref cpu, ref os } => {
                write_character_string(writer, cpu)?;
                write_character_string(writer, os)
            }
            RData::MINFO {
                ref rmailbx,
                ref emailbx,
            } => {
                rmailbx.write_to(writer)?;
                emailbx.write_to(writer)
            }
            RData::Unknown { ref data, .. } => writer.write_all(data),
        }
    }

    /// Rejects raw data tagged with a type that has its own variant
    ///
    /// Such a payload would be decoded as that variant on the way back, so
    /// it can't be encoded faithfully.
    pub(crate) fn check(&self) -> Result<(), Error> {
        match *self {
            RData::Unknown { typ, .. } if has_layout(typ) => {
                Err(Error::RawKnownType(typ.into()))
            }
            _ => Ok(()),
        }
    }

    /// Decodes the payload of a record of type `typ`
    ///
    /// Known types consume exactly their own shape, which may be more or
    /// less than `length` on malformed packets. Other types consume
    /// `length` raw bytes.
    pub fn read_from<S: Source>(typ: Type, length: u16, src: &mut S) -> Result<RData, Error> {
        Ok(match Type::from(u16::from(typ)) {
            Type::A => RData::A(read_ipv4(src)?),
            Type::AAAA => RData::AAAA(read_ipv6(src)?),
            Type::CNAME => RData::CNAME(Name::read_from(src)?),
            Type::NS => RData::NS(Name::read_from(src)?),
            Type::PTR => RData::PTR(Name::read_from(src)?),
            Type::MD => RData::MD(Name::read_from(src)?),
            Type::MF => RData::MF(Name::read_from(src)?),
            Type::MB => RData::MB(Name::read_from(src)?),
            Type::MG => RData::MG(Name::read_from(src)?),
            Type::MR => RData::MR(Name::read_from(src)?),
            Type::SOA => RData::SOA(Soa {
                primary_ns: Name::read_from(src)?,
                mailbox: Name::read_from(src)?,
                serial: read_u32(src)?,
                refresh: read_u32(src)?,
                retry: read_u32(src)?,
                expire: read_u32(src)?,
                minimum_ttl: read_u32(src)?,
            }),
            Type::MX => RData::MX {
                preference: read_u16(src)?,
                exchange: Name::read_from(src)?,
            },
            Type::TXT => {
                let start = src.offset();
                let data = read_bytes(src, length as usize)?;
                RData::TXT(split_character_strings(&data, start)?)
            }
            Type::HINFO => RData::HINFO {
                cpu: read_character_string(src)?,
                os: read_character_string(src)?,
            },
            Type::MINFO => RData::MINFO {
                rmailbx: Name::read_from(src)?,
                emailbx: Name::read_from(src)?,
            },
            typ => RData::Unknown {
                typ,
                data: read_bytes(src, length as usize)?,
            },
        })
    }
}

/// Whether records of `typ` decode to a dedicated variant
fn has_layout(typ: Type) -> bool {
    match Type::from(u16::from(typ)) {
        Type::NULL | Type::WKS | Type::Unknown(_) => false,
        _ => true,
    }
}

fn write_character_string<T: io::Write>(writer: &mut T, string: &[u8]) -> io::Result<()> {
    if string.len() > 255 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "character string is longer than 255 bytes",
        ));
    }
    writer.write_u8(string.len() as u8)?;
    writer.write_all(string)
}

fn read_character_string<S: Source>(src: &mut S) -> Result<Vec<u8>, Error> {
    let len = read_u8(src)?;
    read_bytes(src, len as usize)
}

fn split_character_strings(data: &[u8], start: u64) -> Result<Vec<Vec<u8>>, Error> {
    let mut strings = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        let end = pos + 1 + data[pos] as usize;
        if end > data.len() {
            return Err(Error::ShortRead {
                offset: start + pos as u64 + 1,
                expected: data[pos] as usize,
            });
        }
        strings.push(data[pos + 1..end].to_vec());
        pos = end;
    }
    Ok(strings)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::str::FromStr;

    use super::*;

    fn parse(typ: Type, data: &[u8]) -> (Result<RData, Error>, u64) {
        let mut src = Cursor::new(data);
        let rdata = RData::read_from(typ, data.len() as u16, &mut src);
        (rdata, src.position())
    }

    fn encode(rdata: &RData) -> Vec<u8> {
        let mut buf = Vec::new();
        rdata.write_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn parse_addresses() {
        let (rdata, _) = parse(Type::A, b"\x01\x02\x03\x04");
        let rdata = rdata.unwrap();
        assert_eq!(rdata, RData::A(Ipv4Addr::new(1, 2, 3, 4)));
        assert_eq!(rdata.address(), Some(IpAddr::from([1, 2, 3, 4])));

        let ip = Ipv6Addr::new(0x2a00, 0x1450, 0x4026, 0x803, 0, 0, 0, 0x200e);
        let (rdata, pos) = parse(Type::AAAA, &ip.octets());
        assert_eq!(rdata.unwrap(), RData::AAAA(ip));
        assert_eq!(pos, 16);

        let (rdata, _) = parse(Type::A, b"\x01\x02\x03");
        assert!(matches!(rdata, Err(Error::ShortRead { .. })));
    }

    #[test]
    fn parse_mx() {
        let (rdata, pos) = parse(Type::MX, b"\x00\x0a\x04mail\x07example\x00");
        assert_eq!(
            rdata.unwrap(),
            RData::MX {
                preference: 10,
                exchange: Name::from_str("mail.example").unwrap(),
            }
        );
        assert_eq!(pos, 16);
    }

    #[test]
    fn soa_with_compressed_names() {
        // both names point back into the owner name at offset 0
        let mut data = b"\x07example\x03com\x00".to_vec();
        let start = data.len() as u64;
        data.extend_from_slice(b"\x02ns\xc0\x00\x05admin\xc0\x00");
        data.extend_from_slice(b"\x00\x00\x00\x01\x00\x00\x0e\x10\x00\x00\x02\x58");
        data.extend_from_slice(b"\x00\x09\x3a\x80\x00\x00\x01\x2c\xff");

        let mut src = Cursor::new(&data[..]);
        src.set_position(start);
        let rdata = RData::read_from(Type::SOA, 0, &mut src).unwrap();
        assert_eq!(
            rdata,
            RData::SOA(Soa {
                primary_ns: Name::from_str("ns.example.com").unwrap(),
                mailbox: Name::from_str("admin.example.com").unwrap(),
                serial: 1,
                refresh: 3600,
                retry: 600,
                expire: 604800,
                minimum_ttl: 300,
            })
        );
        assert_eq!(src.position() as usize, data.len() - 1);
    }

    #[test]
    fn txt_strings_fill_length() {
        let (rdata, pos) = parse(Type::TXT, b"\x06path=/\x00\x03a=b");
        assert_eq!(
            rdata.unwrap(),
            RData::TXT(vec![b"path=/".to_vec(), Vec::new(), b"a=b".to_vec()])
        );
        assert_eq!(pos, 12);

        let (rdata, _) = parse(Type::TXT, b"\x05abc");
        assert!(matches!(
            rdata,
            Err(Error::ShortRead {
                offset: 1,
                expected: 5
            })
        ));
    }

    #[test]
    fn hinfo_and_minfo() {
        let (rdata, _) = parse(Type::HINFO, b"\x05INTEL\x05LINUX");
        assert_eq!(
            rdata.unwrap(),
            RData::HINFO {
                cpu: b"INTEL".to_vec(),
                os: b"LINUX".to_vec(),
            }
        );

        let (rdata, _) = parse(Type::MINFO, b"\x05lists\x00\x06errors\x00");
        assert_eq!(
            rdata.unwrap(),
            RData::MINFO {
                rmailbx: Name::from_str("lists").unwrap(),
                emailbx: Name::from_str("errors").unwrap(),
            }
        );
    }

    #[test]
    fn unknown_types_keep_raw_bytes() {
        let (rdata, pos) = parse(Type::Unknown(33), b"\x00\x01\x00\x02\x1f\x90\x00");
        assert_eq!(
            rdata.unwrap(),
            RData::Unknown {
                typ: Type::Unknown(33),
                data: b"\x00\x01\x00\x02\x1f\x90\x00".to_vec(),
            }
        );
        assert_eq!(pos, 7);

        let (rdata, _) = parse(Type::NULL, b"\xde\xad");
        assert_eq!(rdata.unwrap().typ(), Type::NULL);
    }

    #[test]
    fn dispatch_uses_type_value() {
        let (rdata, _) = parse(Type::Unknown(1), b"\x0a\x00\x00\x01");
        assert_eq!(rdata.unwrap(), RData::A(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn raw_data_of_known_type() {
        let raw = |typ| RData::Unknown {
            typ,
            data: b"\x01a\x00".to_vec(),
        };
        assert!(matches!(raw(Type::Unknown(5)).check(), Err(Error::RawKnownType(5))));
        assert!(matches!(raw(Type::MX).check(), Err(Error::RawKnownType(15))));
        assert!(raw(Type::NULL).check().is_ok());
        assert!(raw(Type::Unknown(99)).check().is_ok());
        assert!(RData::CNAME(Name::from_str("a").unwrap()).check().is_ok());
    }

    #[test]
    fn write_payloads() {
        assert_eq!(encode(&RData::A(Ipv4Addr::new(1, 2, 3, 4))), b"\x01\x02\x03\x04");
        assert_eq!(
            encode(&RData::CNAME(Name::from_str("a.b").unwrap())),
            b"\x01a\x01b\x00"
        );
        assert_eq!(
            encode(&RData::TXT(vec![b"x=1".to_vec(), b"y".to_vec()])),
            b"\x03x=1\x01y"
        );

        let too_long = RData::TXT(vec![vec![b'a'; 256]]);
        assert!(too_long.write_to(&mut Vec::new()).is_err());
    }

    #[test]
    fn names_are_written_expanded() {
        let soa = RData::SOA(Soa {
            primary_ns: Name::from_str("ns.example.com").unwrap(),
            mailbox: Name::from_str("admin.example.com").unwrap(),
            serial: 7,
            refresh: 1,
            retry: 2,
            expire: 3,
            minimum_ttl: 4,
        });
        let buf = encode(&soa);
        assert_eq!(buf.len(), 16 + 19 + 20);
        let (rdata, _) = parse(Type::SOA, &buf);
        assert_eq!(rdata.unwrap(), soa);
    }
}
