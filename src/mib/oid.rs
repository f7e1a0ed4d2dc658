//! Object identifiers.
//!
//! Identifiers compare segment by segment as integers, so `1.1 < 1.2 <
//! 1.10`, and a prefix sorts before every identifier it prefixes. Textual
//! comparison gets both of those wrong.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use heapless::Vec;

/// Longest identifier the agent accepts (segments).
pub const MAX_OID_LEN: usize = 32;

/// An owned identifier as received from the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Oid(Vec<u32, MAX_OID_LEN>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidError {
    /// Empty segment, non-digit, or a segment overflowing `u32`.
    Malformed,
    /// More than [`MAX_OID_LEN`] segments.
    TooLong,
}

impl fmt::Display for OidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed identifier"),
            Self::TooLong => write!(f, "identifier longer than {MAX_OID_LEN} segments"),
        }
    }
}

impl Oid {
    pub fn from_segments(segments: &[u32]) -> Result<Self, OidError> {
        Vec::from_slice(segments)
            .map(Self)
            .map_err(|()| OidError::TooLong)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Numeric, segment-wise ordering of two identifiers.
///
/// `const` so the registry can check its own ordering at compile time.
pub const fn compare(a: &[u32], b: &[u32]) -> Ordering {
    let mut i = 0;
    while i < a.len() && i < b.len() {
        if a[i] < b[i] {
            return Ordering::Less;
        }
        if a[i] > b[i] {
            return Ordering::Greater;
        }
        i += 1;
    }
    if a.len() < b.len() {
        Ordering::Less
    } else if a.len() > b.len() {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self.as_slice(), other.as_slice())
    }
}

impl FromStr for Oid {
    type Err = OidError;

    /// Parse dotted form. A single leading dot is accepted (`.1.3.6`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('.').unwrap_or(s);
        let mut segments = Vec::new();
        if s.is_empty() {
            return Ok(Self(segments));
        }
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(OidError::Malformed);
            }
            let n: u32 = part.parse().map_err(|_| OidError::Malformed)?;
            segments.push(n).map_err(|_| OidError::TooLong)?;
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dotted(f, self.as_slice())
    }
}

/// Write `segments` in dotted form.
pub fn write_dotted(f: &mut impl fmt::Write, segments: &[u32]) -> fmt::Result {
    for (i, n) in segments.iter().enumerate() {
        if i > 0 {
            f.write_char('.')?;
        }
        write!(f, "{n}")?;
    }
    Ok(())
}
