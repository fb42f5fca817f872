use super::ResponseError;

/// Declares a wire code enum with an `Unknown` arm for unassigned values.
///
/// Conversions in both directions are provided through `From`, so decoding
/// never fails on a code it doesn't know. Equality and hashing go through
/// the wire value: `Unknown(1)` of `Type` is the same type as `A`.
macro_rules! code_enum {
    (
        $(#[$attr:meta])*
        pub enum $name:ident: $int:ty {
            $( $(#[$vattr:meta])* $variant:ident = $value:literal, )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy)]
        pub enum $name {
            $( $(#[$vattr])* $variant, )*
            /// A code without a named variant
            Unknown($int),
        }

        impl From<$int> for $name {
            fn from(code: $int) -> Self {
                match code {
                    $( $value => $name::$variant, )*
                    code => $name::Unknown(code),
                }
            }
        }

        impl From<$name> for $int {
            fn from(value: $name) -> Self {
                match value {
                    $( $name::$variant => $value, )*
                    $name::Unknown(code) => code,
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                <$int>::from(*self) == <$int>::from(*other)
            }
        }

        impl Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&<$int>::from(*self), state)
            }
        }
    };
}

code_enum! {
    /// The TYPE value of a resource record
    pub enum Type: u16 {
        /// a host address
        A = 1,
        /// an authoritative name server
        NS = 2,
        /// a mail destination (obsolete, use MX)
        MD = 3,
        /// a mail forwarder (obsolete, use MX)
        MF = 4,
        /// the canonical name for an alias
        CNAME = 5,
        /// marks the start of a zone of authority
        SOA = 6,
        /// a mailbox domain name
        MB = 7,
        /// a mail group member
        MG = 8,
        /// a mail rename domain name
        MR = 9,
        /// a null RR
        NULL = 10,
        /// a well known service description
        WKS = 11,
        /// a domain name pointer
        PTR = 12,
        /// host information
        HINFO = 13,
        /// mailbox or mail list information
        MINFO = 14,
        /// mail exchange
        MX = 15,
        /// text strings
        TXT = 16,
        /// IPv6 host address (RFC 3596)
        AAAA = 28,
    }
}

code_enum! {
    /// The QTYPE value of a question
    ///
    /// A superset of [`Type`]: every record type is a valid query type.
    pub enum QueryType: u16 {
        A = 1,
        NS = 2,
        MD = 3,
        MF = 4,
        CNAME = 5,
        SOA = 6,
        MB = 7,
        MG = 8,
        MR = 9,
        NULL = 10,
        WKS = 11,
        PTR = 12,
        HINFO = 13,
        MINFO = 14,
        MX = 15,
        TXT = 16,
        AAAA = 28,
        /// a request for a transfer of an entire zone
        AXFR = 252,
        /// a request for mailbox-related records (MB, MG or MR)
        MAILB = 253,
        /// a request for mail agent RRs (obsolete, see MX)
        MAILA = 254,
        /// a request for all records
        All = 255,
    }
}

impl From<Type> for QueryType {
    fn from(typ: Type) -> QueryType {
        QueryType::from(u16::from(typ))
    }
}

code_enum! {
    /// The CLASS value of a resource record
    pub enum Class: u16 {
        /// the Internet
        IN = 1,
        /// the CSNET class (obsolete)
        CS = 2,
        /// the CHAOS class
        CH = 3,
        /// Hesiod
        HS = 4,
    }
}

code_enum! {
    /// The QCLASS value of a question
    pub enum QueryClass: u16 {
        IN = 1,
        CS = 2,
        CH = 3,
        HS = 4,
        /// any class
        Any = 255,
    }
}

impl From<Class> for QueryClass {
    fn from(cls: Class) -> QueryClass {
        QueryClass::from(u16::from(cls))
    }
}

code_enum! {
    /// The kind of query carried by a message (4 bits on the wire)
    pub enum Opcode: u8 {
        StandardQuery = 0,
        InverseQuery = 1,
        ServerStatusRequest = 2,
    }
}

code_enum! {
    /// The RCODE of a message (4 bits on the wire)
    pub enum ResponseCode: u8 {
        NoError = 0,
        FormatError = 1,
        ServerFailure = 2,
        NameError = 3,
        NotImplemented = 4,
        Refused = 5,
    }
}

impl ResponseCode {
    /// Maps the code to the failure it reports, if any
    ///
    /// Reserved codes are not interpreted and map to `None`, same as
    /// `NoError`.
    pub fn error(self) -> Option<ResponseError> {
        match ResponseCode::from(u8::from(self)) {
            ResponseCode::NoError => None,
            ResponseCode::FormatError => Some(ResponseError::FormatError),
            ResponseCode::ServerFailure => Some(ResponseError::ServerFailure),
            ResponseCode::NameError => Some(ResponseError::NameError),
            ResponseCode::NotImplemented => Some(ResponseError::NotImplemented),
            ResponseCode::Refused => Some(ResponseError::Refused),
            ResponseCode::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_codes_survive_conversion() {
        assert_eq!(Type::from(99), Type::Unknown(99));
        assert_eq!(u16::from(Type::Unknown(99)), 99);
        assert_eq!(Type::from(28), Type::AAAA);
        assert_eq!(u16::from(QueryType::All), 255);
        assert_eq!(QueryClass::from(255), QueryClass::Any);
        assert_eq!(Opcode::from(7), Opcode::Unknown(7));
    }

    #[test]
    fn record_type_is_a_query_type() {
        assert_eq!(QueryType::from(Type::MX), QueryType::MX);
        assert_eq!(QueryType::from(Type::Unknown(300)), QueryType::Unknown(300));
        assert_eq!(QueryClass::from(Class::CH), QueryClass::CH);
    }

    #[test]
    fn response_code_mapping() {
        assert_eq!(ResponseCode::from(0).error(), None);
        assert_eq!(ResponseCode::from(1).error(), Some(ResponseError::FormatError));
        assert_eq!(ResponseCode::from(2).error(), Some(ResponseError::ServerFailure));
        assert_eq!(ResponseCode::from(3).error(), Some(ResponseError::NameError));
        assert_eq!(ResponseCode::from(4).error(), Some(ResponseError::NotImplemented));
        assert_eq!(ResponseCode::from(5).error(), Some(ResponseError::Refused));
        assert_eq!(ResponseCode::from(9).error(), None);
        assert_eq!(ResponseCode::Unknown(3).error(), Some(ResponseError::NameError));
    }

    #[test]
    fn codes_compare_by_value() {
        use std::collections::HashSet;

        assert_eq!(Type::Unknown(1), Type::A);
        assert_eq!(QueryType::Unknown(255), QueryType::All);
        assert_eq!(Opcode::Unknown(2), Opcode::ServerStatusRequest);
        assert_ne!(Class::Unknown(2), Class::IN);

        let mut seen = HashSet::new();
        seen.insert(Type::AAAA);
        assert!(seen.contains(&Type::Unknown(28)));
        assert!(!seen.insert(Type::Unknown(28)));
        assert_eq!(seen.len(), 1);
    }
}
