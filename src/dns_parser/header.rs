use std::io;

use byteorder::{BigEndian, ByteOrder};

use super::source::{read_u16, read_u8};
use super::{Error, Opcode, ResponseCode, Source};

const FLAG_REPLY: u8 = 0b1000_0000;
const OPCODE_MASK: u8 = 0b0111_1000;
const FLAG_AUTHORITATIVE: u8 = 0b0000_0100;
const FLAG_TRUNCATED: u8 = 0b0000_0010;
const FLAG_RECURSION_DESIRED: u8 = 0b0000_0001;
const FLAG_RECURSION_AVAILABLE: u8 = 0b1000_0000;
const RCODE_MASK: u8 = 0b0000_1111;
/// Largest opcode or response code the header can carry
const MAX_CODE: u8 = 15;

/// Represents the fixed-size header of every DNS packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    /// Set for responses, clear for queries
    pub reply: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
    pub questions: u16,
    pub answers: u16,
    pub authorities: u16,
    pub additional: u16,
}

impl Default for Header {
    fn default() -> Header {
        Header {
            id: 0,
            reply: false,
            opcode: Opcode::StandardQuery,
            authoritative: false,
            truncated: false,
            recursion_desired: false,
            recursion_available: false,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            authorities: 0,
            additional: 0,
        }
    }
}

impl Header {
    /// Wire size of the header
    pub const SIZE: usize = 12;

    pub fn read_from<S: Source>(src: &mut S) -> Result<Header, Error> {
        let id = read_u16(src)?;
        let b1 = read_u8(src)?;
        let b2 = read_u8(src)?;
        Ok(Header {
            id,
            reply: b1 & FLAG_REPLY != 0,
            opcode: Opcode::from((b1 & OPCODE_MASK) >> 3),
            authoritative: b1 & FLAG_AUTHORITATIVE != 0,
            truncated: b1 & FLAG_TRUNCATED != 0,
            recursion_desired: b1 & FLAG_RECURSION_DESIRED != 0,
            recursion_available: b2 & FLAG_RECURSION_AVAILABLE != 0,
            response_code: ResponseCode::from(b2 & RCODE_MASK),
            questions: read_u16(src)?,
            answers: read_u16(src)?,
            authorities: read_u16(src)?,
            additional: read_u16(src)?,
        })
    }

    /// Packs the header into `data`
    ///
    /// Fails with `CodeTooWide` when the opcode or the response code
    /// doesn't fit in its 4-bit field.
    pub fn write(&self, data: &mut [u8; Header::SIZE]) -> Result<(), Error> {
        check_code("opcode", self.opcode.into())?;
        check_code("response code", self.response_code.into())?;
        *data = self.pack();
        Ok(())
    }

    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> Result<(), Error> {
        let mut buf = [0u8; Header::SIZE];
        self.write(&mut buf)?;
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Packs a header whose codes are known to fit
    pub(crate) fn pack(&self) -> [u8; Header::SIZE] {
        let mut b1 = (u8::from(self.opcode) << 3) & OPCODE_MASK;
        if self.reply {
            b1 |= FLAG_REPLY;
        }
        if self.authoritative {
            b1 |= FLAG_AUTHORITATIVE;
        }
        if self.truncated {
            b1 |= FLAG_TRUNCATED;
        }
        if self.recursion_desired {
            b1 |= FLAG_RECURSION_DESIRED;
        }
        let mut b2 = u8::from(self.response_code) & RCODE_MASK;
        if self.recursion_available {
            b2 |= FLAG_RECURSION_AVAILABLE;
        }

        let mut data = [0u8; Header::SIZE];
        BigEndian::write_u16(&mut data[..2], self.id);
        data[2] = b1;
        data[3] = b2;
        BigEndian::write_u16(&mut data[4..6], self.questions);
        BigEndian::write_u16(&mut data[6..8], self.answers);
        BigEndian::write_u16(&mut data[8..10], self.authorities);
        BigEndian::write_u16(&mut data[10..12], self.additional);
        data
    }

    pub(crate) fn set_truncated(data: &mut [u8]) {
        data[2] |= FLAG_TRUNCATED;
    }

    pub(crate) fn question_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[4..6])
    }

    pub(crate) fn answer_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[6..8])
    }

    pub(crate) fn authority_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[8..10])
    }

    pub(crate) fn additional_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[10..12])
    }

    pub(crate) fn inc_questions(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[4..6])
    }

    pub(crate) fn inc_answers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[6..8])
    }

    pub(crate) fn inc_authorities(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[8..10])
    }

    pub(crate) fn inc_additional(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[10..12])
    }

    fn inc_count(field: &mut [u8]) -> Option<u16> {
        let count = BigEndian::read_u16(field).checked_add(1)?;
        BigEndian::write_u16(field, count);
        Some(count)
    }
}

fn check_code(field: &'static str, code: u8) -> Result<(), Error> {
    if code > MAX_CODE {
        return Err(Error::CodeTooWide { field, code });
    }
    Ok(())
}
