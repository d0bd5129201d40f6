use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::str::Utf8Error;

/// Owned byte string whose last byte is always zero.
///
/// The terminator is part of the buffer. If the source bytes already ended in
/// a zero, no second terminator is appended, so `as_bytes_with_nul().len()`
/// matches what the loader read from the image in that case.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TerminatedString(Box<[u8]>);

impl TerminatedString {
    /// Wraps a buffer that already ends in a zero byte. Hands the buffer back
    /// untouched if it is empty or unterminated.
    pub fn from_vec_with_nul(buf: Vec<u8>) -> Result<Self, Vec<u8>> {
        match buf.last() {
            Some(0) => Ok(Self(buf.into_boxed_slice())),
            _ => Err(buf),
        }
    }

    /// Takes ownership of `buf` and appends a zero byte unless it already ends
    /// in one. Reserve the extra byte up front to keep this from reallocating.
    pub fn terminate(mut buf: Vec<u8>) -> Self {
        if buf.last() != Some(&0) {
            buf.push(0);
        }
        Self(buf.into_boxed_slice())
    }

    /// Content up to (not including) the final terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..self.0.len() - 1]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }
}

impl From<&str> for TerminatedString {
    fn from(s: &str) -> Self {
        let mut buf = Vec::with_capacity(s.len() + 1);
        buf.extend_from_slice(s.as_bytes());
        Self::terminate(buf)
    }
}

impl PartialEq<str> for TerminatedString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for TerminatedString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Display for TerminatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.as_bytes().utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{fffd}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TerminatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_bytes().escape_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn rejects_unterminated_buffers() {
        assert!(TerminatedString::from_vec_with_nul(vec![]).is_err());
        assert_eq!(
            TerminatedString::from_vec_with_nul(vec![b'a']),
            Err(vec![b'a'])
        );
    }

    #[test]
    fn content_excludes_terminator() {
        let s = TerminatedString::from_vec_with_nul(vec![b'o', b'k', 0]).unwrap();
        assert_eq!(s.as_bytes(), b"ok");
        assert_eq!(s.as_bytes_with_nul(), b"ok\0");
        assert_eq!(s.len(), 2);
        assert_eq!(s, "ok");
    }

    #[test]
    fn display_is_lossy() {
        let s = TerminatedString::from_vec_with_nul(vec![b'a', 0xff, 0]).unwrap();
        assert_eq!(format!("{}", s), "a\u{fffd}");
        assert!(s.to_str().is_err());
    }

    #[test]
    fn terminate_appends_only_when_missing() {
        assert_eq!(TerminatedString::terminate(vec![]).as_bytes_with_nul(), &[0]);
        assert_eq!(
            TerminatedString::terminate(vec![b'a', 0, 0]).as_bytes_with_nul(),
            b"a\0\0"
        );
        assert_eq!(
            TerminatedString::terminate(vec![b'a']).as_bytes_with_nul(),
            b"a\0"
        );
    }

    #[test]
    fn from_str_appends_terminator_once() {
        assert_eq!(TerminatedString::from("net").as_bytes_with_nul(), b"net\0");
        assert_eq!(TerminatedString::from("net\0").as_bytes_with_nul(), b"net\0");
        assert!(TerminatedString::from("").is_empty());
    }
}
