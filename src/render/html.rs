//! HTML preview of a dialog layout.
//!
//! Each control is an absolutely positioned box inside a relative
//! container. Boxes carry `data-offset`, `data-line` and `data-column` so a
//! host can jump to the declaration in the source file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::dialog::DialogPreview;
use crate::error::{DlgError, Result};
use crate::parser::offset_to_location;
use crate::types::{GeometryError, Layout, ResolvedControl};

const STYLE: &str = "\
body { background: #1e1e1e; color: #ddd; font-family: sans-serif; }
.dlg-layout { position: relative; }
.dlg-control { position: absolute; box-sizing: border-box; font-size: 12px; \
border: 1px dashed white; overflow: hidden; }
.dlg-errors { color: #f48771; }
";

/// Render one control box.
pub fn render_control(control: &ResolvedControl, source: &str) -> String {
    let location = offset_to_location(source, control.offset);
    let title = match &control.kind {
        Some(kind) => format!("{} ({})", control.name, kind),
        None => control.name.clone(),
    };

    format!(
        "<div class=\"dlg-control\" style=\"left: {}px; top: {}px; width: {}px; height: {}px;\" \
         data-offset=\"{}\" data-line=\"{}\" data-column=\"{}\" title=\"{}\">{}</div>",
        format_px(control.pos_x),
        format_px(control.pos_y),
        format_px(control.width),
        format_px(control.height),
        control.offset,
        location.line,
        location.column,
        escape(&title),
        escape(&control.name),
    )
}

/// Render the layout container with all control boxes.
pub fn render_layout(layout: &Layout, source: &str) -> String {
    let (width, height) = layout.extent();
    let mut html = format!(
        "<div class=\"dlg-layout\" style=\"width: {}px; height: {}px;\">\n",
        format_px(width),
        format_px(height)
    );
    for control in layout.controls() {
        html.push_str("  ");
        html.push_str(&render_control(control, source));
        html.push('\n');
    }
    html.push_str("</div>");
    html
}

/// Render a complete preview page.
pub fn render_page(preview: &DialogPreview, source: &str) -> String {
    let mut body = render_layout(&preview.layout, source);
    if !preview.geometry_errors.is_empty() {
        body.push('\n');
        body.push_str(&render_errors(&preview.geometry_errors, source));
    }
    document(preview.display_name(), &body)
}

/// Render the page shown when a descriptor cannot be parsed at all.
pub fn render_error_page(message: &str) -> String {
    document("error", &format!("<pre class=\"dlg-errors\">ERROR: {}</pre>", escape(message)))
}

/// Write rendered HTML to disk.
pub fn write_html(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DlgError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    fs::write(path, html).map_err(|e| DlgError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write preview: {}", e),
    })
}

fn render_errors(errors: &[GeometryError], source: &str) -> String {
    let mut html = String::from("<ul class=\"dlg-errors\">\n");
    for error in errors {
        let location = offset_to_location(source, error.offset);
        let _ = writeln!(
            html,
            "  <li data-offset=\"{}\">{} ({})</li>",
            error.offset,
            escape(&error.to_string()),
            location
        );
    }
    html.push_str("</ul>");
    html
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

/// Pixel values with at most two decimals, no trailing zeros.
fn format_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{}", rounded)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MarginMode;
    use tempfile::tempdir;

    const LAYER: &str = "class RscTitles { class Layer1 { x=0; y=0; w=0.3; h=0.05; }; };";

    #[test]
    fn test_render_control_snapshot() {
        let preview = DialogPreview::from_source(LAYER, MarginMode::Truncated).unwrap();
        let html = render_control(&preview.layout.controls()[0], LAYER);

        insta::assert_snapshot!(html, @r#"<div class="dlg-control" style="left: 0px; top: 0px; width: 660px; height: 75px;" data-offset="18" data-line="1" data-column="19" title="Layer1">Layer1</div>"#);
    }

    #[test]
    fn test_render_layout_contains_every_control() {
        let source = r#"
class D {
    class A: RscText { x = 0.1; y = 0.1; w = 0.1; h = 0.1; };
    class B: RscButton { x = 0.2; y = 0.2; w = 0.1; h = 0.1; };
};
"#;
        let preview = DialogPreview::from_source(source, MarginMode::Original).unwrap();
        let html = render_layout(&preview.layout, source);

        assert!(html.starts_with("<div class=\"dlg-layout\""));
        assert!(html.contains("title=\"A (RscText)\">A</div>"));
        assert!(html.contains("title=\"B (RscButton)\">B</div>"));
        assert!(html.contains("data-line=\"3\""));
        assert!(html.contains("data-line=\"4\""));
    }

    #[test]
    fn test_render_page_lists_geometry_errors() {
        let source = "class D { class A { x = 0; y = 0; h = 0.1; }; };";
        let preview = DialogPreview::from_source(source, MarginMode::Truncated).unwrap();
        let page = render_page(&preview, source);

        assert!(page.contains("<title>D</title>"));
        assert!(page.contains("Control &#39;A&#39; has no numeric value for `w`"));
    }

    #[test]
    fn test_error_page_is_escaped() {
        let page = render_error_page("bad <input>");
        assert!(page.contains("ERROR: bad &lt;input&gt;"));
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(660.0), "660");
        assert_eq!(format_px(12.3456), "12.35");
        assert_eq!(format_px(-0.0), "0");
    }

    #[test]
    fn test_write_html_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("dialog.html");
        write_html("<p>hi</p>", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>hi</p>");
    }
}
