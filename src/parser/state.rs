//! Scanner state machine.
//!
//! [`transition`] is a pure function from the current state and the next
//! segment to the action the scanner should take and the state that
//! follows. It decides what a segment *is*; the scanner owns the block
//! stack and decides what gets emitted.

use super::header::{match_assignment, match_class_header, Assignment, ClassHeader};
use super::source::{Segment, SegmentKind};

/// Where the scanner is in the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the outer display class.
    Display,
    /// Inside a block right after a nested class closed.
    Class,
    /// Reading properties of the display block.
    PropertyOfDisplay,
    /// Reading properties of a control block.
    PropertyOfControl,
}

/// What the scanner does with one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<'a> {
    /// The outer display class opens.
    OpenDisplay(ClassHeader<'a>),
    /// A nested class opens.
    OpenControl(ClassHeader<'a>),
    /// A brace block with no class header; skip it whole.
    SkipBlock,
    /// An assignment to the innermost block. Unrecognized names are dropped
    /// by the receiver.
    Assign(Assignment<'a>),
    /// Nothing to record (forward declarations, stray text).
    Ignore,
    /// The innermost block closes. A final assignment written without its
    /// `;` (`y = 0.2 }`) comes along and applies before the close.
    Close(Option<Assignment<'a>>),
}

/// A transition together with the state it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub next: ScanState,
    pub action: Transition<'a>,
}

impl<'a> Step<'a> {
    fn new(next: ScanState, action: Transition<'a>) -> Self {
        Self { next, action }
    }

    fn stay(state: ScanState, action: Transition<'a>) -> Self {
        Self::new(state, action)
    }
}

/// Decide the action for `segment` in `state`.
pub fn transition<'a>(state: ScanState, segment: &Segment<'a>) -> Step<'a> {
    match state {
        ScanState::Display => match segment.kind {
            SegmentKind::Open => match match_class_header(segment) {
                Some(header) => Step::new(ScanState::PropertyOfDisplay, Transition::OpenDisplay(header)),
                None => Step::stay(state, Transition::SkipBlock),
            },
            SegmentKind::Statement | SegmentKind::Close => Step::stay(state, Transition::Ignore),
        },
        ScanState::Class | ScanState::PropertyOfDisplay | ScanState::PropertyOfControl => {
            match segment.kind {
                SegmentKind::Open => match match_class_header(segment) {
                    Some(header) => Step::new(
                        ScanState::PropertyOfControl,
                        Transition::OpenControl(header),
                    ),
                    None => Step::stay(state, Transition::SkipBlock),
                },
                SegmentKind::Statement => match match_assignment(segment) {
                    Some(assignment) => Step::stay(state, Transition::Assign(assignment)),
                    None => Step::stay(state, Transition::Ignore),
                },
                SegmentKind::Close => {
                    Step::new(ScanState::Class, Transition::Close(match_assignment(segment)))
                }
            }
        }
    }
}
