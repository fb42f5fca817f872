use std::io;

use thiserror::Error;

/// Error parsing or building a DNS packet
#[derive(Debug, Error)]
pub enum Error {
    #[error("packet ended at offset {offset}, {expected} more bytes were expected")]
    ShortRead { offset: u64, expected: usize },
    #[error("label at offset {offset} has unknown label format (tag {tag:#04x})")]
    UnknownLabelFormat { offset: u64, tag: u8 },
    #[error("cannot dereference compression pointer at offset {offset} without random access")]
    NotSeekable { offset: u64 },
    #[error("compression pointers starting at offset {offset} form a loop")]
    CompressionLoop { offset: u64 },
    #[error("label of {0} bytes is longer than 63 bytes")]
    LabelTooLong(usize),
    #[error("name contains an empty label")]
    EmptyLabel,
    #[error("name of {0} bytes is longer than 255 bytes")]
    NameTooLong(usize),
    #[error("section has more than 65535 entries")]
    TooManyRecords,
    #[error("record data of {0} bytes is longer than 65535 bytes")]
    RdataTooLong(usize),
    #[error("{field} {code} does not fit in 4 bits")]
    CodeTooWide { field: &'static str, code: u8 },
    #[error("record type {0} has a known layout and can't carry raw data")]
    RawKnownType(u16),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Failure reported by the server in the response code of a reply
///
/// This is not a parsing error: the packet was decoded successfully, the
/// server just said no.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResponseError {
    #[error("the name server was unable to interpret the query")]
    FormatError,
    #[error("the name server was unable to process this query")]
    ServerFailure,
    #[error("the domain name referenced in the query does not exist")]
    NameError,
    #[error("the name server does not support the requested query")]
    NotImplemented,
    #[error("the name server refuses to perform the specified operation")]
    Refused,
}
