//! Class header and assignment recognition.

use std::sync::LazyLock;

use regex::Regex;

use super::source::Segment;

/// `class Name` or `class Name: Base`, at the end of the text before `{`.
static CLASS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+([A-Za-z_]\w*)\s*(?::\s*([A-Za-z_]\w*))?\s*$")
        .expect("valid class header pattern")
});

/// `name = value` or `name[] = value`.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][\w\[\]]*)\s*=\s*((?s).*?)\s*$").expect("valid assignment pattern")
});

/// A matched class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassHeader<'a> {
    pub name: &'a str,
    /// Declared base class after `:`.
    pub base: Option<&'a str>,
    /// Byte offset of the `class` keyword.
    pub offset: usize,
}

/// A matched `name = value` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Match the class header that a `{` segment ends with.
pub fn match_class_header<'a>(segment: &Segment<'a>) -> Option<ClassHeader<'a>> {
    let caps = CLASS_HEADER.captures(segment.text)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?;

    Some(ClassHeader {
        name: name.as_str(),
        base: caps.get(2).map(|m| m.as_str()),
        offset: segment.start + whole.start(),
    })
}

/// Match an assignment statement.
pub fn match_assignment<'a>(segment: &Segment<'a>) -> Option<Assignment<'a>> {
    let caps = ASSIGNMENT.captures(segment.text)?;
    Some(Assignment {
        name: caps.get(1)?.as_str(),
        value: caps.get(2)?.as_str(),
    })
}
