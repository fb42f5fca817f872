use std::fmt;
use std::io;
use std::str::FromStr;

use byteorder::WriteBytesExt;

use super::source::{read_bytes, read_u8};
use super::{Error, Source};

/// Longest label payload allowed by the length tag format
pub const MAX_LABEL_LENGTH: usize = 63;
/// Longest name in wire format, length tags and terminator included
pub const MAX_NAME_LENGTH: usize = 255;
/// Compression pointers followed while decoding a single name before
/// the name is considered to loop
pub const MAX_POINTER_HOPS: usize = 64;

const POINTER_MASK: u8 = 0b1100_0000;

/// A single length-prefixed segment of a name
///
/// The zero-length label terminates every name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Vec<u8>);

impl Label {
    pub fn new<T: Into<Vec<u8>>>(bytes: T) -> Result<Label, Error> {
        let bytes = bytes.into();
        if bytes.len() > MAX_LABEL_LENGTH {
            return Err(Error::LabelTooLong(bytes.len()));
        }
        Ok(Label(bytes))
    }

    fn root() -> Label {
        Label(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &byte in &self.0 {
            match byte {
                b'.' | b'\\' => write!(f, "\\{}", byte as char)?,
                0x21..=0x7e => write!(f, "{}", byte as char)?,
                _ => write!(f, "\\{:03}", byte)?,
            }
        }
        Ok(())
    }
}

/// A domain name: a sequence of labels ending with the empty label
///
/// Names are always stored fully expanded, compression only exists on the
/// wire and is resolved while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Label>,
}

impl Name {
    /// The root name, consisting of the terminator only
    pub fn root() -> Name {
        Name {
            labels: vec![Label::root()],
        }
    }

    /// Builds a name from its labels, adding the terminator
    pub fn from_labels<I: IntoIterator<Item = Label>>(labels: I) -> Result<Name, Error> {
        let mut all = Vec::new();
        for label in labels {
            if label.is_empty() {
                return Err(Error::EmptyLabel);
            }
            all.push(label);
        }
        all.push(Label::root());

        let name = Name { labels: all };
        let len = name.wire_len();
        if len > MAX_NAME_LENGTH {
            return Err(Error::NameTooLong(len));
        }
        Ok(name)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Every label as a string, the empty terminator included
    pub fn label_strings(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|label| String::from_utf8_lossy(label.as_bytes()).into_owned())
            .collect()
    }

    pub fn is_root(&self) -> bool {
        self.labels.len() == 1
    }

    /// Size of the uncompressed wire form
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|label| label.len() + 1).sum()
    }

    /// Decodes a name at the current position of `src`
    ///
    /// Compression pointers are followed with an explicit hop limit. When
    /// the name ended behind a pointer, the source is left right after the
    /// first pointer's two bytes.
    pub fn read_from<S: Source>(src: &mut S) -> Result<Name, Error> {
        let mut labels = Vec::new();
        let mut wire_len = 0;
        let mut resume = None;
        let mut hops = 0;

        loop {
            let offset = src.offset();
            let tag = read_u8(src)?;
            match tag & POINTER_MASK {
                POINTER_MASK => {
                    let low = read_u8(src)?;
                    let target = u64::from(u16::from(tag & !POINTER_MASK) << 8 | u16::from(low));

                    hops += 1;
                    if hops > MAX_POINTER_HOPS {
                        return Err(Error::CompressionLoop { offset });
                    }
                    if resume.is_none() {
                        resume = Some(src.offset());
                    }
                    src.seek_to(target).map_err(|err| match err {
                        Error::NotSeekable { .. } => Error::NotSeekable { offset },
                        err => err,
                    })?;
                }
                0 => {
                    let len = tag as usize;
                    wire_len += len + 1;
                    if wire_len > MAX_NAME_LENGTH {
                        return Err(Error::NameTooLong(wire_len));
                    }
                    labels.push(Label(read_bytes(src, len)?));
                    if len == 0 {
                        break;
                    }
                }
                _ => return Err(Error::UnknownLabelFormat { offset, tag }),
            }
        }

        if let Some(offset) = resume {
            src.seek_to(offset)?;
        }
        Ok(Name { labels })
    }

    /// Writes the name uncompressed, terminator included
    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for label in &self.labels {
            writer.write_u8(label.len() as u8)?;
            writer.write_all(label.as_bytes())?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses a dotted name; the trailing dot is optional
    fn from_str(name: &str) -> Result<Name, Error> {
        let name = name.strip_suffix('.').unwrap_or(name);
        if name.is_empty() {
            return Ok(Name::root());
        }
        let labels = name
            .split('.')
            .map(|part| Label::new(part.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        Name::from_labels(labels)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in &self.labels[..self.labels.len() - 1] {
            write!(f, "{}.", label)?;
        }
        Ok(())
    }
}
