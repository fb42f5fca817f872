use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use log::debug;

use super::{Error, Header, Opcode, Question, ResourceRecord, ResponseCode};

pub enum Questions {}
pub enum Answers {}
pub enum Nameservers {}
pub enum Additional {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}

impl MoveTo<Answers> for Questions {}

impl MoveTo<Nameservers> for Questions {}
impl MoveTo<Nameservers> for Answers {}

impl MoveTo<Additional> for Questions {}
impl MoveTo<Additional> for Answers {}
impl MoveTo<Additional> for Nameservers {}

/// Allows to build a DNS packet
///
/// Sections are filled in wire order; the type parameter tracks which
/// section is being written so that e.g. a question can't follow an answer.
/// Section counts in the header are kept up to date as entries are added.
pub struct Builder<S> {
    buf: Vec<u8>,
    max_size: Option<usize>,
    _state: PhantomData<S>,
}

impl Builder<Questions> {
    /// Creates a new query
    ///
    /// Initially all sections are empty. You're expected to fill
    /// the questions section with `add_question`
    pub fn new_query(id: u16, recursion: bool) -> Builder<Questions> {
        let head = Header {
            id,
            recursion_desired: recursion,
            ..Header::default()
        };
        Builder::start(head.pack())
    }

    pub fn new_response(id: u16, recursion: bool, authoritative: bool) -> Builder<Questions> {
        let head = Header {
            id,
            reply: true,
            opcode: Opcode::StandardQuery,
            authoritative,
            recursion_desired: recursion,
            response_code: ResponseCode::NoError,
            ..Header::default()
        };
        Builder::start(head.pack())
    }

    /// Starts a packet with the flags of `header`
    ///
    /// The section counts of `header` are ignored, they are counted while
    /// entries are added. Fails when the opcode or the response code is
    /// wider than 4 bits.
    pub fn with_header(header: &Header) -> Result<Builder<Questions>, Error> {
        let head = Header {
            questions: 0,
            answers: 0,
            authorities: 0,
            additional: 0,
            ..*header
        };
        let mut bytes = [0u8; Header::SIZE];
        head.write(&mut bytes)?;
        Ok(Builder::start(bytes))
    }

    fn start(head: [u8; Header::SIZE]) -> Builder<Questions> {
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&head);
        Builder {
            buf,
            max_size: Some(512),
            _state: PhantomData,
        }
    }
}

impl<T> Builder<T> {
    fn write_rr(&mut self, rr: &ResourceRecord) -> Result<(), Error> {
        rr.data.check()?;
        rr.name.write_to(&mut self.buf)?;
        self.buf.write_u16::<BigEndian>(rr.typ().into())?;
        self.buf.write_u16::<BigEndian>(rr.cls.into())?;
        self.buf.write_u32::<BigEndian>(rr.ttl)?;

        let size_offset = self.buf.len();
        self.buf.write_u16::<BigEndian>(0)?;

        let data_offset = self.buf.len();
        rr.data.write_to(&mut self.buf)?;
        let data_size = self.buf.len() - data_offset;
        if data_size > u16::MAX as usize {
            return Err(Error::RdataTooLong(data_size));
        }

        BigEndian::write_u16(
            &mut self.buf[size_offset..size_offset + 2],
            data_size as u16,
        );
        Ok(())
    }

    /// Returns the final packet
    ///
    /// When packet is not truncated method returns `Ok(packet)`. If
    /// packet is truncated the method returns `Err(packet)`. In both
    /// cases the packet is fully valid.
    ///
    /// In the server implementation you may use
    /// `x.build().unwrap_or_else(|x| x)`.
    ///
    /// Truncation only sets the TC flag, records past the limit are kept.
    pub fn build(mut self) -> Result<Vec<u8>, Vec<u8>> {
        match self.max_size {
            Some(max_size) if self.buf.len() > max_size => {
                debug!(
                    "packet of {} bytes exceeds {} bytes, marking as truncated",
                    self.buf.len(),
                    max_size
                );
                Header::set_truncated(&mut self.buf[..Header::SIZE]);
                Err(self.buf)
            }
            _ => Ok(self.buf),
        }
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            max_size: self.max_size,
            _state: PhantomData,
        }
    }

    pub fn set_max_size(&mut self, max_size: Option<usize>) {
        self.max_size = max_size;
    }

    pub fn is_empty(&self) -> bool {
        Header::question_count(&self.buf) == 0
            && Header::answer_count(&self.buf) == 0
            && Header::authority_count(&self.buf) == 0
            && Header::additional_count(&self.buf) == 0
    }
}

impl<T: MoveTo<Questions>> Builder<T> {
    /// Adds a question to the packet
    ///
    /// Fails with `TooManyRecords` when there are already 65535 questions
    /// in the buffer.
    pub fn add_question(self, question: &Question) -> Result<Builder<Questions>, Error> {
        let mut builder = self.move_to::<Questions>();

        question.write_to(&mut builder.buf)?;
        Header::inc_questions(&mut builder.buf).ok_or(Error::TooManyRecords)?;
        Ok(builder)
    }
}

impl<T: MoveTo<Answers>> Builder<T> {
    pub fn add_answer(self, rr: &ResourceRecord) -> Result<Builder<Answers>, Error> {
        let mut builder = self.move_to::<Answers>();

        builder.write_rr(rr)?;
        Header::inc_answers(&mut builder.buf).ok_or(Error::TooManyRecords)?;
        Ok(builder)
    }
}

impl<T: MoveTo<Nameservers>> Builder<T> {
    pub fn add_nameserver(self, rr: &ResourceRecord) -> Result<Builder<Nameservers>, Error> {
        let mut builder = self.move_to::<Nameservers>();

        builder.write_rr(rr)?;
        Header::inc_authorities(&mut builder.buf).ok_or(Error::TooManyRecords)?;
        Ok(builder)
    }
}

impl<T: MoveTo<Additional>> Builder<T> {
    pub fn add_additional(self, rr: &ResourceRecord) -> Result<Builder<Additional>, Error> {
        let mut builder = self.move_to::<Additional>();

        builder.write_rr(rr)?;
        Header::inc_additional(&mut builder.buf).ok_or(Error::TooManyRecords)?;
        Ok(builder)
    }
}
