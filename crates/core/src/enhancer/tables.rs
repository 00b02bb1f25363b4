//! Responsive conversion of layout tables.
//!
//! Documents exported from word processors often use borderless tables to
//! position images and text side by side. Such a table is turned into flex
//! rows so the cells wrap on narrow screens. A table counts as a layout table
//! when none of its cells declare a positive border width; bordered tables
//! hold real data and are left alone. Their bordered cells are marked to keep
//! their style, so a second pass still sees the borders and classifies the
//! table the same way.

use kuchikiki::NodeRef;

use super::{KEEP_STYLE_ATTR, apply_kept_style, get_attribute, has_attribute, select_nodes, style_of};
use crate::style::leading_number;

const BORDER_WIDTH_PROPERTIES: [&str; 4] = [
    "border-top-width",
    "border-bottom-width",
    "border-left-width",
    "border-right-width",
];

pub(super) fn make_layout_tables_responsive(root: &NodeRef) {
    for table in select_nodes(root, "table") {
        let bordered = bordered_cells(&table);
        if !bordered.is_empty() {
            for cell in &bordered {
                mark_kept(cell);
            }
            continue;
        }
        for row in select_nodes(&table, "tr") {
            convert_row(&row);
        }
    }
}

/// `<td>` cells under `table` that declare a positive border width. A table
/// without any is a layout table.
///
/// A borderless data table is indistinguishable from a layout table here and
/// will be reflowed too.
fn bordered_cells(table: &NodeRef) -> Vec<NodeRef> {
    select_nodes(table, "td")
        .into_iter()
        .filter(|cell| {
            let style = style_of(cell);
            BORDER_WIDTH_PROPERTIES.iter().any(|property| {
                style
                    .get(property)
                    .is_some_and(|value| leading_number(value) > 0.0)
            })
        })
        .collect()
}

fn mark_kept(node: &NodeRef) {
    if let Some(element) = node.as_element() {
        element
            .attributes
            .borrow_mut()
            .insert(KEEP_STYLE_ATTR, "true".to_string());
    }
}

fn convert_row(row: &NodeRef) {
    let mut style = style_of(row);
    style.set("display", "flex");
    style.set("flex-wrap", "wrap");
    style.set("align-items", "center");
    style.remove("height");
    apply_kept_style(row, &style);

    let cells = select_nodes(row, "td");
    let cell_count = cells.len();
    for cell in &cells {
        convert_cell(cell, cell_count);
    }
}

fn convert_cell(cell: &NodeRef, cell_count: usize) {
    let basis = match get_attribute(cell, "width") {
        Some(width) => flex_basis(&width),
        None => equal_share(cell_count),
    };

    let mut style = style_of(cell);
    style.set("flex", &format!("1 1 {}", basis));
    style.set("box-sizing", "border-box");
    style.set("min-width", "min-content");
    style.set("margin-block-end", "16px");
    apply_kept_style(cell, &style);

    for image in select_nodes(cell, "img") {
        widen_image(&image);
    }
}

/// Keeps images from collapsing below 80% of their max width once the row wraps.
fn widen_image(image: &NodeRef) {
    if has_attribute(image, KEEP_STYLE_ATTR) {
        return;
    }

    let mut style = style_of(image);
    let max_width = match style.get("max-width") {
        Some(value) if value != "none" => value.to_string(),
        _ => return,
    };
    style.set("min-width", &format!("calc({} * 0.8)", max_width));
    apply_kept_style(image, &style);
}

/// Converts a `width` attribute into a flex basis; bare integers are pixels.
pub(super) fn flex_basis(width: &str) -> String {
    if !width.is_empty() && width.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}px", width)
    } else {
        width.to_string()
    }
}

/// Equal percentage share for a row of `cell_count` cells (`4` → `25%`).
pub(super) fn equal_share(cell_count: usize) -> String {
    let share = format!("{:.4}", 100.0 / cell_count.max(1) as f64);
    let share = share.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", share)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance;

    #[test]
    fn flex_basis_adds_px_to_integers() {
        assert_eq!(flex_basis("120"), "120px");
        assert_eq!(flex_basis("30%"), "30%");
        assert_eq!(flex_basis("12.5em"), "12.5em");
        assert_eq!(flex_basis(""), "");
    }

    #[test]
    fn equal_share_formats_percentages() {
        assert_eq!(equal_share(1), "100%");
        assert_eq!(equal_share(4), "25%");
        assert_eq!(equal_share(3), "33.3333%");
        assert_eq!(equal_share(8), "12.5%");
    }

    #[test]
    fn converts_cell_widths_to_flex_basis() {
        let out = enhance(
            r#"<table><tr><td width="120">A</td><td width="30%">B</td></tr></table>"#,
        );
        assert!(out.contains("flex:1 1 120px"), "{out}");
        assert!(out.contains("flex:1 1 30%"), "{out}");
    }

    #[test]
    fn cells_without_width_share_the_row() {
        let out = enhance("<table><tr><td>A</td><td>B</td><td>C</td><td>D</td></tr></table>");
        assert_eq!(out.matches("flex:1 1 25%").count(), 4, "{out}");
    }

    #[test]
    fn layout_rows_become_flex_rows() {
        let out = enhance(r#"<table><tr style="height:40px;color:red"><td>A</td></tr></table>"#);
        assert!(
            out.contains("color:red;display:flex;flex-wrap:wrap;align-items:center"),
            "{out}"
        );
        assert!(!out.contains("height:40px"), "{out}");
        assert!(out.contains(KEEP_STYLE_ATTR));
    }

    #[test]
    fn layout_cells_get_flex_item_styles() {
        let out = enhance("<table><tr><td>A</td></tr></table>");
        assert!(
            out.contains(
                "flex:1 1 100%;box-sizing:border-box;min-width:min-content;margin-block-end:16px"
            ),
            "{out}"
        );
    }

    #[test]
    fn bordered_tables_are_not_converted() {
        for property in BORDER_WIDTH_PROPERTIES {
            let html = format!(
                r#"<table><tr><td>A</td><td style="{}:1px">B</td></tr></table>"#,
                property
            );
            let out = enhance(&html);
            assert!(!out.contains("display:flex"), "{property}: {out}");
            assert!(out.contains("<td>A</td>"), "{property}: {out}");
        }
    }

    #[test]
    fn bordered_cells_keep_their_style() {
        let out = enhance(
            r#"<table><tr><td style="border-top-width:1px;color:red">A</td><td style="color:blue">B</td></tr></table>"#,
        );
        assert!(out.contains(r#"style="border-top-width:1px;color:red""#), "{out}");
        assert!(out.contains("<td>B</td>"), "{out}");
        assert_eq!(enhance(&out), out);
    }

    #[test]
    fn zero_border_width_still_counts_as_layout() {
        let out = enhance(
            r#"<table><tr><td style="border-top-width:0px;border-left-width:0">A</td></tr></table>"#,
        );
        assert!(out.contains("display:flex"), "{out}");
    }

    #[test]
    fn large_layout_tables_are_converted() {
        let mut html = String::from("<table>");
        for _ in 0..20 {
            html.push_str("<tr><td>a</td><td>b</td></tr>");
        }
        html.push_str("</table>");
        let out = enhance(&html);
        assert_eq!(out.matches("display:flex").count(), 20);
    }

    #[test]
    fn images_in_layout_cells_get_min_width() {
        let out = enhance(
            r#"<table><tr><td><img src="a.png" style="max-width:300px"></td></tr></table>"#,
        );
        assert!(out.contains("max-width:300px;min-width:calc(300px * 0.8)"), "{out}");
    }

    #[test]
    fn images_without_max_width_are_untouched() {
        let out = enhance(
            r#"<table><tr><td><img src="a.png" style="max-width:none"><img src="b.png"></td></tr></table>"#,
        );
        assert!(!out.contains("min-width:calc"), "{out}");
        assert!(out.contains(r#"style="max-width:none""#), "{out}");
    }

    #[test]
    fn already_marked_images_are_skipped() {
        let out = enhance(
            r#"<table><tr><td><img data-keep-style="true" style="max-width:300px"></td></tr></table>"#,
        );
        assert!(!out.contains("min-width:calc"), "{out}");
    }

    #[test]
    fn styles_outside_layout_tables_are_still_stripped() {
        let out = enhance(
            r#"<p style="color:red">x</p><table><tr><td><span style="color:blue">y</span></td></tr></table>"#,
        );
        assert!(out.contains("<p>x</p>"), "{out}");
        assert!(out.contains("<span>y</span>"), "{out}");
    }
}
