//! Encoding and decoding of DNS packets (RFC 1035)

mod builder;
mod enums;
mod error;
mod header;
mod message;
mod name;
mod rrdata;
mod source;
mod structs;

pub use self::builder::{Additional, Answers, Builder, MoveTo, Nameservers, Questions};
pub use self::enums::{Class, Opcode, QueryClass, QueryType, ResponseCode, Type};
pub use self::error::{Error, ResponseError};
pub use self::header::Header;
pub use self::message::Message;
pub use self::name::{Label, Name, MAX_LABEL_LENGTH, MAX_NAME_LENGTH, MAX_POINTER_HOPS};
pub use self::rrdata::{RData, Soa};
pub use self::source::{Source, Stream};
pub use self::structs::{Question, ResourceRecord};
