//! DNS message wire codec.
//!
//! Converts DNS messages between their in-memory form ([`Message`]) and the
//! bytes sent over the wire: the 12-byte header with its packed flags,
//! names with compression pointers, and resource records of every RFC 1035
//! type plus AAAA. Records of other types are kept as raw bytes.
//!
//! ```
//! use std::str::FromStr;
//! use dnswire::{Message, Name, QueryClass, QueryType, Question};
//!
//! let mut query = Message::query(0, true);
//! query.add_question(Question::new(
//!     Name::from_str("example.com").unwrap(),
//!     QueryType::A,
//!     QueryClass::IN,
//! ));
//! let packet = query.to_bytes().unwrap();
//!
//! let parsed = Message::parse(&packet).unwrap();
//! assert_eq!(parsed, query);
//! assert!(parsed.addresses().is_empty());
//! ```
//!
//! Sockets, timeouts and retries are left to the caller.

mod dns_parser;

pub use crate::dns_parser::*;
