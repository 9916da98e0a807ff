use crate::{Position, SourceFile};
use text_size::{TextRange, TextSize};

fn file(s: &str) -> SourceFile {
  SourceFile::new("test.sml".into(), s.to_owned())
}

fn pos(line: u32, col: u32) -> Position {
  Position { line, col }
}

#[test]
fn empty() {
  let f = file("");
  assert_eq!(f.position(TextSize::new(0)), pos(1, 1));
}

#[test]
fn one_line() {
  let f = file("val x = 3");
  assert_eq!(f.position(TextSize::new(0)), pos(1, 1));
  assert_eq!(f.position(TextSize::new(4)), pos(1, 5));
  assert_eq!(f.position(TextSize::new(9)), pos(1, 10));
}

#[test]
fn multi_line() {
  let f = file("val x = 3\nval y =\n  4\n");
  assert_eq!(f.position(TextSize::new(9)), pos(1, 10));
  assert_eq!(f.position(TextSize::new(10)), pos(2, 1));
  assert_eq!(f.position(TextSize::new(17)), pos(2, 8));
  assert_eq!(f.position(TextSize::new(20)), pos(3, 3));
}

#[test]
fn line_range() {
  let f = file("val x = 3\nval y =\n  4\n");
  assert_eq!(f.line_range(1), TextRange::new(TextSize::new(0), TextSize::new(10)));
  assert_eq!(f.line_range(2), TextRange::new(TextSize::new(10), TextSize::new(18)));
  assert_eq!(f.slice(f.line_range(2)), "val y =\n");
}
