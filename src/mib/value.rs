//! Semantic values exchanged with the transport.
//!
//! The agent never sees encoded bytes. The transport decodes a SET value
//! into one of these and encodes the response value from one.

use core::fmt;

use heapless::String;

/// Capacity of a text value (sysDescr and friends, placeholders).
pub const TEXT_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// OCTET STRING
    Text(String<TEXT_LEN>),
    /// INTEGER
    Integer(i32),
    /// TimeTicks, hundredths of a second
    TimeTicks(u32),
    /// NULL, the value a manager sends when a trigger takes no argument
    Null,
}

impl Value {
    /// Text value, truncated to [`TEXT_LEN`] bytes on a char boundary.
    pub fn text(s: &str) -> Self {
        let mut end = s.len().min(TEXT_LEN);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        let mut out = String::new();
        let _ = out.push_str(&s[..end]);
        Self::Text(out)
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Integer(n) => write!(f, "{n}"),
            Self::TimeTicks(t) => write!(f, "ticks({t})"),
            Self::Null => write!(f, "null"),
        }
    }
}
