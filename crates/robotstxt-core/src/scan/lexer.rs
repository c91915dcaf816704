//! Byte-level lexing primitives for robots.txt lines.
//!
//! These are nom parsers over `&[u8]`; nothing here assumes the input is
//! valid UTF-8.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::char,
    combinator::{opt, rest},
    sequence::preceded,
};

/// The UTF-8 encoding of U+FEFF.
const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

fn is_line_end(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

fn is_comment_start(b: u8) -> bool {
    b == b'#'
}

fn is_separator(b: u8) -> bool {
    b == b':'
}

/// Recognizes a line terminator: `\r\n`, `\n`, or a lone `\r`.
pub fn line_ending(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((tag("\r\n"), tag("\n"), tag("\r"))).parse(input)
}

/// Splits off the next physical line, consuming (but not returning) its terminator.
pub fn line(input: &[u8]) -> IResult<&[u8], &[u8]> {
    (take_till(is_line_end), opt(line_ending))
        .map(|(content, _)| content)
        .parse(input)
}

/// Recognizes an optional leading byte order mark.
pub fn byte_order_mark(input: &[u8]) -> IResult<&[u8], Option<&[u8]>> {
    opt(tag(BYTE_ORDER_MARK)).parse(input)
}

/// Returns the part of a line before any `#` comment.
pub fn content(line: &[u8]) -> IResult<&[u8], &[u8]> {
    take_till(is_comment_start)(line)
}

/// The raw halves of a `keyword: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    /// Everything before the first colon.
    pub key: &'a [u8],
    /// Everything after the first colon, or `None` when there is no colon.
    pub value: Option<&'a [u8]>,
}

impl Field<'_> {
    /// Byte offset of the value within the line content.
    pub fn value_offset(&self) -> usize {
        self.key.len() + 1
    }
}

/// Splits line content at the first colon.
pub fn field(input: &[u8]) -> IResult<&[u8], Field<'_>> {
    (take_till(is_separator), opt(preceded(char(':'), rest)))
        .map(|(key, value)| Field { key, value })
        .parse(input)
}

/// Trims ASCII whitespace, returning the trimmed slice and the number of
/// bytes removed from the front.
pub fn trim(input: &[u8]) -> (&[u8], usize) {
    let start = input.trim_ascii_start();
    let leading = input.len() - start.len();
    (start.trim_ascii_end(), leading)
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank(input: &[u8]) -> bool {
    input.trim_ascii().is_empty()
}
