//! Buffering and decoding of `\uXXXX` escape sequences.
//!
//! The [`UnicodeEscapeBuffer`] accumulates four ASCII hexadecimal digits and
//! decodes them once the fourth arrives. A high surrogate is held until the
//! next escape supplies the matching low surrogate, so astral characters
//! written as UTF-16 pairs decode to a single `char`.
//!
//! # Errors
//!
//! Every failure is a [`SyntaxError::InvalidUnicodeEscape`] carrying the
//! digits seen so far:
//!
//! - a character that is not an ASCII hex digit;
//! - an escape that decodes to `"` (U+0022), which would end the string;
//! - a lone or out-of-order surrogate.
use crate::error::SyntaxError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    buffer: [u8; 4],
    len: u8,
    high_surrogate: Option<u32>,
}

impl UnicodeEscapeBuffer {
    /// Clears any accumulated digits and a pending high surrogate.
    pub fn reset(&mut self) {
        self.len = 0;
        self.high_surrogate = None;
    }

    /// `true` when no digits of an escape are buffered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` while a high surrogate waits for its low half.
    pub fn awaiting_low_surrogate(&self) -> bool {
        self.high_surrogate.is_some()
    }

    /// Gives up on a pending high surrogate, returning the error to raise.
    pub fn abandon(&mut self) -> SyntaxError {
        let err = SyntaxError::InvalidUnicodeEscape(format!(
            "{:04X}",
            self.high_surrogate.unwrap_or_default()
        ));
        self.reset();
        err
    }

    /// Feeds one hex digit.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen, or when the
    ///   four digits formed a high surrogate.
    /// - `Ok(Some(ch))` once a full code point is decoded.
    pub fn feed(&mut self, c: char) -> Result<Option<char>, SyntaxError> {
        if !c.is_ascii_hexdigit() {
            let mut seen = self.digits().to_string();
            seen.push(c);
            self.reset();
            return Err(SyntaxError::InvalidUnicodeEscape(seen));
        }

        #[allow(clippy::cast_possible_truncation)]
        {
            self.buffer[self.len as usize] = c as u8;
        }
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }

        let digits = self.digits().to_string();
        self.len = 0;
        let invalid = || SyntaxError::InvalidUnicodeEscape(digits.clone());
        let code = u32::from_str_radix(&digits, 16).map_err(|_| invalid())?;

        let decoded = match (self.high_surrogate.take(), code) {
            (Some(high), 0xDC00..=0xDFFF) => {
                char::from_u32(0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00))
            }
            (Some(_), _) | (None, 0xDC00..=0xDFFF) => None,
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(code);
                return Ok(None);
            }
            (None, 0x22) => None,
            (None, _) => char::from_u32(code),
        };

        match decoded {
            Some(ch) => Ok(Some(ch)),
            None => {
                self.reset();
                Err(invalid())
            }
        }
    }

    fn digits(&self) -> &str {
        // only ASCII hex digits are ever stored
        core::str::from_utf8(&self.buffer[..self.len as usize]).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::UnicodeEscapeBuffer;
    use crate::error::SyntaxError;

    fn feed_all(buf: &mut UnicodeEscapeBuffer, digits: &str) -> Result<Option<char>, SyntaxError> {
        let mut last = Ok(None);
        for ch in digits.chars() {
            last = buf.feed(ch);
            if last.is_err() {
                break;
            }
        }
        last
    }

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::default();
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('4').unwrap(), None);
        assert_eq!(buf.feed('1').unwrap(), Some('A'));
    }

    #[test]
    fn mixed_case_hex() {
        let mut buf = UnicodeEscapeBuffer::default();
        assert_eq!(feed_all(&mut buf, "AbCd"), Ok(char::from_u32(0xABCD)));
    }

    #[test]
    fn reset_clears_buffer() {
        let mut buf = UnicodeEscapeBuffer::default();
        assert!(buf.feed('F').unwrap().is_none());
        buf.reset();
        assert_eq!(feed_all(&mut buf, "0042"), Ok(Some('B')));
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::default();
        assert_eq!(
            feed_all(&mut buf, "00G"),
            Err(SyntaxError::InvalidUnicodeEscape("00G".into()))
        );
    }

    #[test]
    fn quote_is_rejected() {
        let mut buf = UnicodeEscapeBuffer::default();
        assert_eq!(
            feed_all(&mut buf, "0022"),
            Err(SyntaxError::InvalidUnicodeEscape("0022".into()))
        );
    }

    #[test]
    fn surrogate_pair_combines() {
        let mut buf = UnicodeEscapeBuffer::default();
        assert_eq!(feed_all(&mut buf, "D83D"), Ok(None));
        assert!(buf.awaiting_low_surrogate());
        assert_eq!(feed_all(&mut buf, "DE00"), Ok(Some('😀')));
        assert!(!buf.awaiting_low_surrogate());
    }

    #[test]
    fn lone_surrogates_are_rejected() {
        let mut buf = UnicodeEscapeBuffer::default();
        assert_eq!(
            feed_all(&mut buf, "DC00"),
            Err(SyntaxError::InvalidUnicodeEscape("DC00".into()))
        );

        assert_eq!(feed_all(&mut buf, "D800"), Ok(None));
        assert_eq!(
            feed_all(&mut buf, "0041"),
            Err(SyntaxError::InvalidUnicodeEscape("0041".into()))
        );

        assert_eq!(feed_all(&mut buf, "DBFF"), Ok(None));
        assert_eq!(buf.abandon(), SyntaxError::InvalidUnicodeEscape("DBFF".into()));
        assert!(!buf.awaiting_low_surrogate());
    }
}
