//! Nested block comments delimited by `(*` and `*)`.

/// An error for a comment not closed before EOF.
#[derive(Debug)]
pub struct UnclosedError;

/// If `bs[*idx..]` begins with `(*`, consumes the whole comment, including
/// arbitrarily nested inner comments, and returns `Ok(true)`. Nesting is
/// tracked with an explicit depth counter, so depth is bounded only by the
/// input length.
///
/// # Errors
///
/// If EOF arrives while the comment is still open.
pub fn get(idx: &mut usize, bs: &[u8]) -> Result<bool, UnclosedError> {
  if bs.get(*idx) != Some(&b'(') || bs.get(*idx + 1) != Some(&b'*') {
    return Ok(false);
  }
  *idx += 2;
  let mut depth = 1usize;
  while depth != 0 {
    match (bs.get(*idx), bs.get(*idx + 1)) {
      (Some(&b'('), Some(&b'*')) => {
        *idx += 2;
        depth += 1;
      }
      (Some(&b'*'), Some(&b')')) => {
        *idx += 2;
        depth -= 1;
      }
      (Some(_), Some(_)) => *idx += 1,
      _ => return Err(UnclosedError),
    }
  }
  Ok(true)
}
