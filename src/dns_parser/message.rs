use std::convert::TryFrom;
use std::io::{self, Cursor};
use std::net::IpAddr;

use log::trace;
use rand::{thread_rng, Rng};

use super::{
    Additional, Answers, Builder, Error, Header, Nameservers, Opcode, Question, RData,
    ResourceRecord, ResponseError, Source,
};

/// A complete DNS message
///
/// Owns its header, questions and the three record sections. Messages
/// built by hand keep the header counts in sync through the `add_*`
/// methods; encoding always writes the actual section sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

fn count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

fn read_records<S: Source>(src: &mut S, count: u16) -> Result<Vec<ResourceRecord>, Error> {
    let mut records = Vec::new();
    for _ in 0..count {
        records.push(ResourceRecord::read_from(src)?);
    }
    Ok(records)
}

impl Message {
    /// Creates an empty standard query
    ///
    /// An `id` of zero is replaced by a random one.
    pub fn query(id: u16, recursion_desired: bool) -> Message {
        let mut message = Message::default();
        message.set_id(id);
        message.set_recursion_desired(recursion_desired);
        message
    }

    /// Parses a complete packet
    ///
    /// Compressed names are resolved against `data`. The response code is
    /// not interpreted, see [`Message::check_status`].
    pub fn parse(data: &[u8]) -> Result<Message, Error> {
        Message::read_from(&mut Cursor::new(data))
    }

    /// Parses a packet and fails if the server reported an error in it
    pub fn parse_checked(data: &[u8]) -> Result<Message, Error> {
        let message = Message::parse(data)?;
        message.check_status()?;
        Ok(message)
    }

    /// Decodes header, questions, answers, authorities and additional
    /// records, in this order
    pub fn read_from<S: Source>(src: &mut S) -> Result<Message, Error> {
        let header = Header::read_from(src)?;

        let mut questions = Vec::new();
        for _ in 0..header.questions {
            questions.push(Question::read_from(src)?);
        }
        let answers = read_records(src, header.answers)?;
        let authorities = read_records(src, header.authorities)?;
        let additional = read_records(src, header.additional)?;

        trace!(
            "parsed message {} ({} questions, {} answers, {} authorities, {} additional) in {} bytes",
            header.id,
            questions.len(),
            answers.len(),
            authorities.len(),
            additional.len(),
            src.offset()
        );

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additional,
        })
    }

    /// Encodes the message, names uncompressed
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut builder = Builder::with_header(&self.header)?;
        builder.set_max_size(None);

        for question in &self.questions {
            builder = builder.add_question(question)?;
        }
        let mut builder = builder.move_to::<Answers>();
        for rr in &self.answers {
            builder = builder.add_answer(rr)?;
        }
        let mut builder = builder.move_to::<Nameservers>();
        for rr in &self.authorities {
            builder = builder.add_nameserver(rr)?;
        }
        let mut builder = builder.move_to::<Additional>();
        for rr in &self.additional {
            builder = builder.add_additional(rr)?;
        }

        let packet = builder.build().unwrap_or_else(|x| x);
        trace!("encoded message {} in {} bytes", self.header.id, packet.len());
        Ok(packet)
    }

    /// Encodes the message into `writer`, returning the number of bytes
    /// written
    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> Result<usize, Error> {
        let packet = self.to_bytes()?;
        writer.write_all(&packet)?;
        Ok(packet.len())
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.questions = count(self.questions.len());
    }

    pub fn add_answer(&mut self, rr: ResourceRecord) {
        self.answers.push(rr);
        self.header.answers = count(self.answers.len());
    }

    pub fn add_authority(&mut self, rr: ResourceRecord) {
        self.authorities.push(rr);
        self.header.authorities = count(self.authorities.len());
    }

    pub fn add_additional(&mut self, rr: ResourceRecord) {
        self.additional.push(rr);
        self.header.additional = count(self.additional.len());
    }

    /// Uses `id` as the message id, or a random one if `id` is zero
    pub fn set_id(&mut self, id: u16) {
        if id == 0 {
            self.set_random_id();
        } else {
            self.header.id = id;
        }
    }

    pub fn set_random_id(&mut self) {
        self.header.id = thread_rng().gen_range(1..=u16::MAX);
    }

    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.header.opcode = opcode;
    }

    pub fn set_recursion_desired(&mut self, recursion_desired: bool) {
        self.header.recursion_desired = recursion_desired;
    }

    /// The failure reported by the response code, if any
    pub fn response_error(&self) -> Option<ResponseError> {
        self.header.response_code.error()
    }

    pub fn check_status(&self) -> Result<(), ResponseError> {
        match self.response_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Answer, authority and additional records, in this order
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additional.iter())
    }

    /// Addresses of all A and AAAA records in the message
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.records().filter_map(|rr| rr.data.address()).collect()
    }

    /// Targets of all CNAME records in the message, dotted
    pub fn canonical_names(&self) -> Vec<String> {
        self.records()
            .filter_map(|rr| match rr.data {
                RData::CNAME(ref name) => Some(name.to_string()),
                _ => None,
            })
            .collect()
    }
}
