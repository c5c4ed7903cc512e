//! Single-pass descriptor scanner.

use std::fmt;

use crate::error::{DlgError, Result};
use crate::types::{Control, Display, Property};

use super::header::{Assignment, ClassHeader};
use super::source::{mask_source, Cursor};
use super::state::{transition, ScanState, Transition};

/// Input ran out with blocks still open. Controls closed before that point
/// are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incomplete {
    /// Names of the blocks still open, outermost first.
    pub open_blocks: Vec<String>,
    /// Byte offset where scanning stopped.
    pub stopped_at: usize,
}

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "descriptor ends inside {} (unclosed: {})",
            self.open_blocks.last().map(String::as_str).unwrap_or("?"),
            self.open_blocks.join(" > ")
        )
    }
}

/// Result of one parse call.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDialog {
    /// The outer display class.
    pub display: Display,
    /// Emitted controls in declaration order.
    pub controls: Vec<Control>,
    /// Set when the scan stopped before the display closed.
    pub incomplete: Option<Incomplete>,
}

impl ParsedDialog {
    /// Find an emitted control by class name.
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name == name)
    }
}

/// A class block seen during the scan.
struct Block {
    record: Control,
    /// Indices of nested class blocks, in declaration order.
    children: Vec<usize>,
    closed: bool,
}

impl Block {
    /// A block that only groups other classes (`class controls { ... }`).
    ///
    /// Anything with a declared type or position is a control even when it
    /// nests classes of its own (list boxes with a `ScrollBar`, controls
    /// groups).
    fn is_container(&self) -> bool {
        !self.children.is_empty() && self.record.kind.is_none() && !self.record.has_position()
    }
}

/// What the enclosing block is to its nested classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    /// The display or a container: every leaf inside is a control.
    Container,
    /// A control: nested leaves are helper blocks unless they declare a
    /// position.
    Control,
}

/// Per-call scan state. Nothing outlives [`parse_descriptor`].
///
/// Block 0 is the display. Emission is decided once the scan ends, when
/// every block knows whether it nests other classes.
struct ScanContext {
    state: ScanState,
    blocks: Vec<Block>,
    /// Indices of the blocks still open, outermost first.
    stack: Vec<usize>,
    finished: bool,
}

impl ScanContext {
    fn new() -> Self {
        Self {
            state: ScanState::Display,
            blocks: Vec::new(),
            stack: Vec::new(),
            finished: false,
        }
    }

    fn open(&mut self, header: ClassHeader<'_>) {
        let index = self.blocks.len();
        self.blocks.push(Block {
            record: Control::new(header.name, header.base.map(str::to_string), header.offset),
            children: Vec::new(),
            closed: false,
        });
        if let Some(&parent) = self.stack.last() {
            self.blocks[parent].children.push(index);
        }
        self.stack.push(index);
    }

    fn assign(&mut self, assignment: Assignment<'_>) {
        let Some(property) = Property::from_name(assignment.name) else {
            return;
        };
        if let Some(&index) = self.stack.last() {
            self.blocks[index].record.set_property(property, assignment.value);
        }
    }

    fn close(&mut self) {
        let Some(index) = self.stack.pop() else {
            return;
        };
        self.blocks[index].closed = true;
        if self.stack.is_empty() {
            self.finished = true;
        }
    }

    /// Collect controls under `index` in declaration order. Blocks still
    /// open at the end of input are never emitted, but closed blocks
    /// inside them are.
    fn collect(&self, index: usize, parent: Parent, out: &mut Vec<Control>) {
        for &child in &self.blocks[index].children {
            let block = &self.blocks[child];
            if block.is_container() {
                self.collect(child, Parent::Container, out);
                continue;
            }

            let emit = match parent {
                Parent::Container => true,
                Parent::Control => block.record.has_position(),
            };
            if emit && block.closed {
                out.push(block.record.clone());
            }
            self.collect(child, Parent::Control, out);
        }
    }

    fn finish(self, stopped_at: usize) -> Result<ParsedDialog> {
        if self.blocks.is_empty() {
            return Err(DlgError::NoDisplayFound);
        }

        let mut controls = Vec::new();
        self.collect(0, Parent::Container, &mut controls);

        let incomplete = (!self.finished).then(|| Incomplete {
            open_blocks: self
                .stack
                .iter()
                .map(|&i| self.blocks[i].record.name.clone())
                .collect(),
            stopped_at,
        });

        let mut blocks = self.blocks;
        let display = blocks.swap_remove(0).record;

        Ok(ParsedDialog {
            display,
            controls,
            incomplete,
        })
    }
}

/// Parse descriptor text into its display and controls.
///
/// Every call scans with fresh state. Malformed or truncated text yields
/// the controls that closed before the problem, with
/// [`ParsedDialog::incomplete`] set. The only failure is
/// [`DlgError::NoDisplayFound`] when the text has no outer class at all.
///
/// Scanning stops once the display block closes.
pub fn parse_descriptor(source: &str) -> Result<ParsedDialog> {
    let masked = mask_source(source);
    let mut cursor = Cursor::new(&masked);
    let mut ctx = ScanContext::new();

    while !ctx.finished {
        let Some(segment) = cursor.next_segment() else {
            break;
        };
        let step = transition(ctx.state, &segment);
        ctx.state = step.next;

        match step.action {
            Transition::OpenDisplay(header) | Transition::OpenControl(header) => ctx.open(header),
            Transition::SkipBlock => {
                cursor.skip_block();
            }
            Transition::Assign(assignment) => ctx.assign(assignment),
            Transition::Ignore => {}
            Transition::Close(assignment) => {
                if let Some(assignment) = assignment {
                    ctx.assign(assignment);
                }
                ctx.close();
            }
        }
    }

    let stopped_at = cursor.position();
    ctx.finish(stopped_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(parsed: &ParsedDialog) -> Vec<&str> {
        parsed.controls.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_single_layer() {
        let source = "class RscTitles { class Layer1 { x=0; y=0; w=0.3; h=0.05; }; };";
        let parsed = parse_descriptor(source).unwrap();

        assert_eq!(parsed.display.name, "RscTitles");
        assert_eq!(parsed.controls.len(), 1);

        let layer = &parsed.controls[0];
        assert_eq!(layer.name, "Layer1");
        assert_eq!(layer.kind, None);
        assert_eq!(layer.offset, source.find("class Layer1").unwrap());
        assert_eq!(layer.w.as_deref(), Some("0.3"));
        assert!(parsed.incomplete.is_none());
    }

    #[test]
    fn test_controls_in_declaration_order() {
        let source = r#"
class MyDialog {
    idd = 4100;
    class Background: RscText { x = 0; y = 0; w = 1; h = 1; };
    class Title: RscText { idc = 1000; x = 0.1; y = 0.1; w = 0.5; h = 0.05; };
    class Close: RscButton { idc = 1001; x = 0.8; y = 0.9; w = 0.1; h = 0.05; };
};
"#;
        let parsed = parse_descriptor(source).unwrap();

        assert_eq!(names(&parsed), vec!["Background", "Title", "Close"]);
        assert_eq!(parsed.display.idd, Some(4100));
        assert_eq!(parsed.controls[1].kind.as_deref(), Some("RscText"));
        assert_eq!(parsed.controls[2].idc, Some(1001));
    }

    #[test]
    fn test_empty_display_has_no_controls() {
        let parsed = parse_descriptor("class Empty { idd = 1; };").unwrap();
        assert!(parsed.controls.is_empty());
        assert_eq!(parsed.display.name, "Empty");
    }

    #[test]
    fn test_no_display_is_fatal() {
        assert!(matches!(parse_descriptor(""), Err(DlgError::NoDisplayFound)));
        assert!(matches!(
            parse_descriptor("just some text; nothing here;"),
            Err(DlgError::NoDisplayFound)
        ));
        assert!(matches!(
            parse_descriptor("class RscText;\nclass RscButton;"),
            Err(DlgError::NoDisplayFound)
        ));
    }

    #[test]
    fn test_unrecognized_properties_are_not_stored() {
        let source = r#"
class D {
    class Box: RscText {
        x = 0.1;
        colorBackground[] = {0,0,0,1};
        style = 2;
        y = 0.2;
        w = 0.3;
        h = 0.4;
    };
};
"#;
        let parsed = parse_descriptor(source).unwrap();
        let boxed = parsed.control("Box").unwrap();

        assert_eq!(boxed.x.as_deref(), Some("0.1"));
        assert_eq!(boxed.y.as_deref(), Some("0.2"));
        assert_eq!(boxed.h.as_deref(), Some("0.4"));
    }

    #[test]
    fn test_forward_declarations_and_includes() {
        let source = r#"#include "defines.hpp"
class RscText;
class RscButton;

class Menu {
    // class Commented { x = 1; };
    class Item: RscButton { x = 0.1; y = 0.1; w = 0.1; h = 0.1; };
};
"#;
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(parsed.display.name, "Menu");
        assert_eq!(names(&parsed), vec!["Item"]);
    }

    #[test]
    fn test_container_blocks_are_transparent() {
        let source = r#"
class Shop {
    idd = 7000;
    class ControlsBackground {
        class Back: RscText { x = 0; y = 0; w = 1; h = 1; };
    };
    class Controls {
        class List: RscListBox { x = 0.1; y = 0.1; w = 0.4; h = 0.8; };
        class Buy: RscButton { x = 0.6; y = 0.8; w = 0.2; h = 0.05; };
    };
};
"#;
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(names(&parsed), vec!["Back", "List", "Buy"]);
    }

    #[test]
    fn test_helper_blocks_inside_control_are_not_emitted() {
        let source = r#"
class D {
    class Info: RscStructuredText {
        x = 0.1; y = 0.1; w = 0.2; h = 0.2;
        class Attributes { font = "PuristaMedium"; align = "center"; };
    };
};
"#;
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(names(&parsed), vec!["Info"]);
        assert_eq!(parsed.controls[0].w.as_deref(), Some("0.2"));
    }

    #[test]
    fn test_nameless_block_is_skipped() {
        let source = "class D { weird { x = 5; }; class A { x = 0.1; }; };";
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(names(&parsed), vec!["A"]);
        assert_eq!(parsed.controls[0].x.as_deref(), Some("0.1"));
    }

    #[test]
    fn test_truncated_input_keeps_closed_controls() {
        let source = "class D { class A { x = 0; y = 0; w = 1; h = 1; }; class B { x = 0.5;";
        let parsed = parse_descriptor(source).unwrap();

        assert_eq!(names(&parsed), vec!["A"]);
        let incomplete = parsed.incomplete.unwrap();
        assert_eq!(incomplete.open_blocks, vec!["D".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_scan_stops_at_display_close() {
        let source = "class First { class A { x = 0; }; }; class Second { class B { x = 0; }; };";
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(parsed.display.name, "First");
        assert_eq!(names(&parsed), vec!["A"]);
    }

    #[test]
    fn test_last_assignment_without_semicolon_is_kept() {
        let source = "class D { class A { x = 0.1; y = 0.2 }; };";
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(names(&parsed), vec!["A"]);
        assert_eq!(parsed.controls[0].y.as_deref(), Some("0.2"));
    }

    #[test]
    fn test_controls_without_position_in_container_are_emitted() {
        let source = r#"
class D {
    class Controls {
        class Title: RscTitle { idc = 5; text = "Hi"; };
        class Note: RscText { idc = 6; };
    };
};
"#;
        let parsed = parse_descriptor(source).unwrap();

        assert_eq!(names(&parsed), vec!["Title", "Note"]);
        assert_eq!(parsed.controls[0].idc, Some(5));
        assert!(!parsed.controls[0].has_position());
    }

    #[test]
    fn test_untyped_leaf_in_container_is_emitted() {
        let source = "class D { class controls { class Plain { idc = 1; }; }; };";
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(names(&parsed), vec!["Plain"]);
    }

    #[test]
    fn test_controls_group_children() {
        let source = r#"
class D {
    class Group: RscControlsGroup {
        x = 0.1; y = 0.1; w = 0.5; h = 0.5;
        class VScrollbar { width = 0.02; };
        class Controls {
            class Inner: RscText { idc = 10; };
            class Positioned: RscText { x = 0; y = 0; w = 0.1; h = 0.1; };
        };
    };
};
"#;
        let parsed = parse_descriptor(source).unwrap();
        assert_eq!(names(&parsed), vec!["Group", "Inner", "Positioned"]);
    }

    #[test]
    fn test_crlf_macro_continuation_is_not_code() {
        let source = "#define CTRL(n) \\\r\n  class n { x = 0.1; y = 0.1; w = 0.1; h = 0.1; };\r\nclass D {\r\n  class Real { x = 0.2; y = 0.2; w = 0.1; h = 0.1; };\r\n};\r\n";
        let parsed = parse_descriptor(source).unwrap();

        assert_eq!(parsed.display.name, "D");
        assert_eq!(names(&parsed), vec!["Real"]);
        assert!(parsed.incomplete.is_none());
    }

    #[test]
    fn test_independent_calls_do_not_share_state() {
        let first = parse_descriptor("class D1 { class A { x = 0; }; class B { x = 0; }; };").unwrap();
        let second = parse_descriptor("class D2 { class C { x = 0; }; };").unwrap();

        assert_eq!(names(&first), vec!["A", "B"]);
        assert_eq!(names(&second), vec!["C"]);
        assert_eq!(second.display.name, "D2");
    }
}
