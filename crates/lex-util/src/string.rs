//! SML string constants and their escapes.

use crate::is_whitespace;

/// A kind of string error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The string was not closed with a matching `"`.
  Unclosed,
  /// There was an invalid escape.
  InvalidEscape,
  /// There was non-whitespace in a string continuation.
  NonWhitespaceInContinuation,
}

/// Consumes a string constant whose opening `"` is at `bs[*idx]`, leaving
/// `idx` just past the closing `"`. Returns the decoded bytes, with escapes
/// replaced.
///
/// # Errors
///
/// The first malformed thing aborts the scan, with the index at which it was
/// noticed.
///
/// # Panics
///
/// If `bs[*idx]` is not `"` on entry.
pub fn get(idx: &mut usize, bs: &[u8]) -> Result<Vec<u8>, (usize, Error)> {
  assert_eq!(bs[*idx], b'"', "should be called at an opening quote");
  *idx += 1;
  let mut out = Vec::<u8>::new();
  loop {
    match bs.get(*idx) {
      None | Some(&b'\n') => return Err((*idx, Error::Unclosed)),
      Some(&b'"') => {
        *idx += 1;
        return Ok(out);
      }
      Some(&b'\\') => escape(&mut out, idx, bs)?,
      Some(&b) => push(&mut out, idx, b),
    }
  }
}

/// `bs[*idx]` is the backslash.
fn escape(out: &mut Vec<u8>, idx: &mut usize, bs: &[u8]) -> Result<(), (usize, Error)> {
  *idx += 1;
  let b = next(*idx, bs)?;
  match b {
    b'a' => push(out, idx, 7),
    b'b' => push(out, idx, 8),
    b't' => push(out, idx, 9),
    b'n' => push(out, idx, 10),
    b'v' => push(out, idx, 11),
    b'f' => push(out, idx, 12),
    b'r' => push(out, idx, 13),
    b'"' => push(out, idx, b'"'),
    b'\\' => push(out, idx, b'\\'),
    b'^' => {
      *idx += 1;
      let c = next(*idx, bs)?;
      if !(64..=95).contains(&c) {
        return Err((*idx, Error::InvalidEscape));
      }
      push(out, idx, c - 64);
    }
    b'u' => {
      let mut val = 0u16;
      for _ in 0..4 {
        *idx += 1;
        let c = next(*idx, bs)?;
        let Some(d) = hex_digit(c) else { return Err((*idx, Error::InvalidEscape)) };
        val = (val << 4) | u16::from(d);
      }
      *idx += 1;
      let [hi, lo] = val.to_be_bytes();
      if hi != 0 {
        out.push(hi);
      }
      out.push(lo);
    }
    _ if b.is_ascii_digit() => {
      let mut val = u16::from(b - b'0');
      for _ in 0..2 {
        *idx += 1;
        let c = next(*idx, bs)?;
        if !c.is_ascii_digit() {
          return Err((*idx, Error::InvalidEscape));
        }
        val = val * 10 + u16::from(c - b'0');
      }
      let Ok(val) = u8::try_from(val) else { return Err((*idx, Error::InvalidEscape)) };
      push(out, idx, val);
    }
    _ if is_whitespace(b) => loop {
      *idx += 1;
      let c = next(*idx, bs)?;
      if c == b'\\' {
        *idx += 1;
        break;
      }
      if !is_whitespace(c) {
        return Err((*idx, Error::NonWhitespaceInContinuation));
      }
    },
    _ => return Err((*idx, Error::InvalidEscape)),
  }
  Ok(())
}

fn next(idx: usize, bs: &[u8]) -> Result<u8, (usize, Error)> {
  match bs.get(idx) {
    Some(&b) => Ok(b),
    None => Err((idx, Error::Unclosed)),
  }
}

fn push(out: &mut Vec<u8>, idx: &mut usize, b: u8) {
  out.push(b);
  *idx += 1;
}

fn hex_digit(b: u8) -> Option<u8> {
  match b {
    b'0'..=b'9' => Some(b - b'0'),
    b'a'..=b'f' => Some(b - b'a' + 10),
    b'A'..=b'F' => Some(b - b'A' + 10),
    _ => None,
  }
}
