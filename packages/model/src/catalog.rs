//! # Element Catalog
//!
//! Builds new elements with the defaults the component palette drops into a
//! page: name, styles, category, initial widget fields, and for layout
//! presets the nested cell containers.

use crate::element::{Content, Element, ElementType, Fields, Styles};
use crate::id_generator::IdGenerator;
use serde_json::{json, Value};

/// Default request body for a freshly dropped ETL widget
pub const ETL_DEFAULT_BODY: &str =
    r#"{"pipeline_name":"","limit":"","page_number":1,"filterStatus":"","data_flow_type":"ETL"}"#;

/// Styles every container and text element starts from
pub fn default_styles() -> Styles {
    styles(&[
        ("backgroundPosition", "center"),
        ("objectFit", "cover"),
        ("backgroundRepeat", "no-repeat"),
        ("textAlign", "left"),
        ("opacity", "100%"),
    ])
}

/// Create a new element of `kind` with fresh ids for it and any preset children
pub fn create_element(kind: ElementType, ids: &mut IdGenerator) -> Element {
    use ElementType::*;

    match kind {
        H1 | H2 | H3 | H4 | H5 | H6 => {
            let level = &kind.as_str()[1..];
            let (font_size, font_weight) = match kind {
                H1 => ("2.5rem", "700"),
                H2 => ("2rem", "700"),
                H3 => ("1.75rem", "600"),
                H4 => ("1.5rem", "600"),
                H5 => ("1.25rem", "600"),
                _ => ("1rem", "600"),
            };
            let mut style = text_styles();
            extend(
                &mut style,
                &[
                    ("fontSize", font_size),
                    ("fontWeight", font_weight),
                    ("lineHeight", "1.2"),
                    ("marginBottom", "0.5rem"),
                ],
            );
            leaf(ids, kind, &format!("Heading {}", level), style, json!({ "innerText": format!("Heading {}", level) }))
        }
        Paragraph => {
            let mut style = text_styles();
            extend(&mut style, &[("fontSize", "1rem"), ("lineHeight", "1.5"), ("marginBottom", "1rem")]);
            leaf(ids, kind, "Paragraph", style, json!({ "innerText": "Paragraph" }))
        }
        Span => {
            let mut style = text_styles();
            extend(&mut style, &[("fontSize", "1rem"), ("display", "inline")]);
            leaf(ids, kind, "Text", style, json!({ "innerText": "Text" }))
        }
        Image => leaf(ids, kind, "Image", Styles::new(), json!({})),
        Container => container(ids, kind, "Container", default_styles(), vec![]),
        Section => container(ids, kind, "Section", default_styles(), vec![]),
        Form => container(ids, kind, "Form", default_styles(), vec![]),
        TwoCol => {
            let children = cells(ids, &[None, None]);
            container(ids, kind, "Two Columns", row_styles(), children)
        }
        ThreeCol => {
            let children = cells(ids, &[None, None, None]);
            container(ids, kind, "Three Columns", row_styles(), children)
        }
        TwoRow => {
            let children = cells(ids, &[None, None]);
            container(ids, kind, "Two Rows", column_styles(), children)
        }
        ThreeRow => {
            let children = cells(ids, &[None, None, None]);
            container(ids, kind, "Three Rows", column_styles(), children)
        }
        Header2Col => {
            let children = vec![cell(ids, None), nested_two_col(ids, [None, None])];
            container(ids, kind, "Header + 2 Cols", column_styles(), children)
        }
        TwoColFooter => {
            let children = vec![nested_two_col(ids, [None, None]), cell(ids, None)];
            container(ids, kind, "2 Cols + Footer", column_styles(), children)
        }
        Sidebar2Row => {
            let children = vec![cell(ids, Some("2")), nested_two_row(ids)];
            container(ids, kind, "Sidebar + 2 Rows", row_styles(), children)
        }
        Grid2x2 => {
            let children = cells(ids, &[None, None, None, None]);
            container(ids, kind, "2x2 Grid", grid_styles(2, 2), children)
        }
        Layout1 => {
            let children = vec![nested_two_col(ids, [Some("2"), Some("1")]), cell(ids, None)];
            container(ids, kind, "Layout 1", column_styles(), children)
        }
        Layout2 => {
            let mut children = cells(ids, &[Some("1"), Some("1")]);
            children.push(nested_two_row(ids));
            container(ids, kind, "Layout 2", row_styles(), children)
        }
        Layout3 => {
            let first = cell(ids, Some("2"));
            let grid_cells = cells(ids, &[None, None, None, None]);
            let mut grid_style = grid_styles(2, 2);
            extend(&mut grid_style, &[("width", "100%"), ("flex", "1")]);
            let grid = container(ids, Grid2x2, "2x2 Grid", grid_style, grid_cells);
            container(ids, kind, "Layout 3", row_styles(), vec![first, grid])
        }
        Layout4 => {
            let children = vec![nested_three_col(ids, [None, None, None]), cell(ids, None)];
            container(ids, kind, "Layout 4", column_styles(), children)
        }
        Layout5 => {
            let children = vec![
                nested_two_col(ids, [Some("2"), Some("1")]),
                nested_three_col(ids, [None, None, None]),
            ];
            container(ids, kind, "Layout 5", column_styles(), children)
        }
        Layout6 => {
            let children = vec![
                nested_three_col(ids, [Some("1"), Some("1"), Some("2")]),
                nested_two_col(ids, [Some("1"), Some("2")]),
            ];
            container(ids, kind, "Layout 6", column_styles(), children)
        }
        Layout7 => {
            let children = cells(ids, &[None, None, None, None, None, None]);
            container(ids, kind, "Layout 7", grid_styles(3, 2), children)
        }
        Layout8 => {
            let children = vec![
                nested_two_col(ids, [None, None]),
                nested_three_col(ids, [None, None, None]),
            ];
            container(ids, kind, "Layout 8", column_styles(), children)
        }
        Video => leaf(ids, kind, "Video", Styles::new(), json!({ "videoUrl": "", "controls": true })),
        Audio => leaf(ids, kind, "Audio", Styles::new(), json!({ "audioUrl": "", "controls": true })),
        Marquee => leaf(
            ids,
            kind,
            "Marquee",
            styles(&[("color", "black"), ("fontSize", "1rem")]),
            json!({ "marqueeText": "Scrolling text..." }),
        ),
        Icon => leaf(
            ids,
            kind,
            "Icon",
            styles(&[("fontSize", "1.5rem")]),
            json!({ "iconName": "Star", "href": "" }),
        ),
        Embed => leaf(ids, kind, "Embed", Styles::new(), json!({ "embedUrl": "" })),
        Link => leaf(
            ids,
            kind,
            "Link",
            styles(&[("color", "blue"), ("textDecoration", "underline")]),
            json!({ "innerText": "Link", "href": "#" }),
        ),
        Button => leaf(ids, kind, "Button", Styles::new(), json!({ "buttonLabel": "Button", "href": "#" })),
        Input => leaf(ids, kind, "Input", Styles::new(), json!({ "inputType": "text", "placeholder": "" })),
        Textarea => leaf(ids, kind, "Textarea", Styles::new(), json!({ "placeholder": "Enter text..." })),
        Select => leaf(
            ids,
            kind,
            "Select",
            Styles::new(),
            json!({ "options": "Option 1\nOption 2\nOption 3", "placeholder": "Select..." }),
        ),
        Checkbox => leaf(ids, kind, "Checkbox", Styles::new(), json!({ "innerText": "Checkbox", "checked": false })),
        Radio => leaf(
            ids,
            kind,
            "Radio",
            Styles::new(),
            json!({ "innerText": "Radio", "name": "radio", "value": "option1" }),
        ),
        SubmitButton => leaf(ids, kind, "Submit", Styles::new(), json!({ "buttonLabel": "Submit" })),
        OrderedList => leaf(ids, kind, "Ordered List", Styles::new(), json!({ "listItems": "Item 1\nItem 2\nItem 3" })),
        UnorderedList => leaf(
            ids,
            kind,
            "Unordered List",
            Styles::new(),
            json!({ "listItems": "Item 1\nItem 2\nItem 3" }),
        ),
        ListItem => leaf(ids, kind, "List Item", Styles::new(), json!({ "innerText": "List item" })),
        Blockquote => leaf(
            ids,
            kind,
            "Blockquote",
            styles(&[("borderLeft", "4px solid #ccc"), ("paddingLeft", "1rem"), ("fontStyle", "italic")]),
            json!({ "innerText": "Quote text" }),
        ),
        Code => leaf(
            ids,
            kind,
            "Code",
            styles(&[("fontFamily", "monospace"), ("backgroundColor", "#f4f4f4"), ("padding", "0.5rem")]),
            json!({ "codeText": "const x = 1;" }),
        ),
        Divider => leaf(
            ids,
            kind,
            "Divider",
            styles(&[("border", "none"), ("borderTop", "1px solid #ccc"), ("margin", "1rem 0")]),
            json!({}),
        ),
        Badge => leaf(ids, kind, "Badge", Styles::new(), json!({ "badgeText": "Badge" })),
        Spacer => leaf(ids, kind, "Spacer", Styles::new(), json!({ "spacerHeight": "24px", "spacerWidth": "100%" })),
        Table => leaf(
            ids,
            kind,
            "Table",
            Styles::new(),
            json!({ "tableHeaders": "Col1, Col2, Col3", "tableRows": "A1, A2, A3\nB1, B2, B3" }),
        ),
        Accordion => leaf(
            ids,
            kind,
            "Accordion",
            Styles::new(),
            json!({ "accordionItems": "Item 1|Content 1\nItem 2|Content 2" }),
        ),
        Tabs => leaf(
            ids,
            kind,
            "Tabs",
            Styles::new(),
            json!({ "tabLabels": "Tab 1, Tab 2", "tabContents": "Content 1\nContent 2" }),
        ),
        Card => leaf(
            ids,
            kind,
            "Card",
            Styles::new(),
            json!({ "cardTitle": "Card Title", "cardBody": "Card body text.", "cardImageUrl": "" }),
        ),
        Etl => container(ids, kind, "Extract Load and Transform (ETL)", default_styles(), vec![])
            .with_extra("apiEndpoint", "")
            .with_extra("tenantName", "")
            .with_extra("request", "POST")
            .with_extra("body", ETL_DEFAULT_BODY)
            .with_extra("useToken", true),
        Body => Element::root(),
    }
}

fn leaf(ids: &mut IdGenerator, kind: ElementType, name: &str, styles: Styles, fields: Value) -> Element {
    let fields = match fields {
        Value::Object(map) => map,
        _ => Fields::new(),
    };
    Element::new(ids.new_id(), kind, name, Content::Fields(fields)).with_styles(styles)
}

// Children are built before the parent so ids come out in creation order
fn container(ids: &mut IdGenerator, kind: ElementType, name: &str, styles: Styles, children: Vec<Element>) -> Element {
    Element::new(ids.new_id(), kind, name, Content::Children(children)).with_styles(styles)
}

fn cell(ids: &mut IdGenerator, flex: Option<&str>) -> Element {
    let mut style = default_styles();
    extend(&mut style, &[("width", "100%")]);
    if let Some(flex) = flex {
        extend(&mut style, &[("flex", flex)]);
    }
    container(ids, ElementType::Container, "Container", style, vec![])
}

fn cells(ids: &mut IdGenerator, flexes: &[Option<&str>]) -> Vec<Element> {
    flexes.iter().map(|flex| cell(ids, *flex)).collect()
}

fn nested_two_col(ids: &mut IdGenerator, flexes: [Option<&str>; 2]) -> Element {
    let children = cells(ids, &flexes);
    let mut style = row_styles();
    extend(&mut style, &[("width", "100%")]);
    container(ids, ElementType::TwoCol, "Two Columns", style, children)
}

fn nested_three_col(ids: &mut IdGenerator, flexes: [Option<&str>; 3]) -> Element {
    let children = cells(ids, &flexes);
    let mut style = row_styles();
    extend(&mut style, &[("width", "100%")]);
    container(ids, ElementType::ThreeCol, "Three Columns", style, children)
}

fn nested_two_row(ids: &mut IdGenerator) -> Element {
    let children = cells(ids, &[None, None]);
    let mut style = column_styles();
    extend(&mut style, &[("width", "100%"), ("flex", "1")]);
    container(ids, ElementType::TwoRow, "Two Rows", style, children)
}

fn text_styles() -> Styles {
    let mut style = styles(&[("color", "black")]);
    style.extend(default_styles());
    style
}

fn row_styles() -> Styles {
    let mut style = default_styles();
    extend(&mut style, &[("display", "flex")]);
    style
}

fn column_styles() -> Styles {
    let mut style = default_styles();
    extend(&mut style, &[("display", "flex"), ("flexDirection", "column")]);
    style
}

fn grid_styles(columns: usize, rows: usize) -> Styles {
    let mut style = default_styles();
    style.insert("display".to_string(), json!("grid"));
    style.insert("gridTemplateColumns".to_string(), json!(format!("repeat({}, 1fr)", columns)));
    style.insert("gridTemplateRows".to_string(), json!(format!("repeat({}, 1fr)", rows)));
    style
}

fn styles(pairs: &[(&str, &str)]) -> Styles {
    let mut style = Styles::new();
    extend(&mut style, pairs);
    style
}

fn extend(style: &mut Styles, pairs: &[(&str, &str)]) {
    for (key, value) in pairs {
        style.insert((*key).to_string(), json!(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Category;
    use std::collections::HashSet;

    fn all_ids(element: &Element, out: &mut Vec<String>) {
        out.push(element.id.clone());
        for child in element.children().unwrap_or_default() {
            all_ids(child, out);
        }
    }

    #[test]
    fn test_every_type_has_matching_content_shape() {
        let mut ids = IdGenerator::from_seed("cat");
        for kind in ElementType::ALL {
            let element = create_element(*kind, &mut ids);
            assert_eq!(element.kind, Some(*kind), "{}", kind);
            assert_eq!(element.category, Some(kind.category()), "{}", kind);
            let holds_children =
                kind.category() == crate::element::Category::Container || *kind == ElementType::Form;
            assert_eq!(element.is_container(), holds_children, "{}", kind);
        }
    }

    #[test]
    fn test_heading_defaults() {
        let mut ids = IdGenerator::from_seed("h");
        let h2 = create_element(ElementType::H2, &mut ids);

        assert_eq!(h2.name, "Heading 2");
        assert_eq!(h2.field_str("innerText"), Some("Heading 2"));
        assert_eq!(h2.styles["fontSize"], json!("2rem"));
        assert_eq!(h2.styles["color"], json!("black"));
        assert_eq!(h2.category, Some(Category::Text));
    }

    #[test]
    fn test_layout_presets_get_unique_ids() {
        let mut ids = IdGenerator::from_seed("l");
        let layout = create_element(ElementType::Layout3, &mut ids);

        let mut collected = Vec::new();
        all_ids(&layout, &mut collected);
        let unique: HashSet<_> = collected.iter().collect();

        // root + first cell + grid + 4 grid cells
        assert_eq!(collected.len(), 7);
        assert_eq!(unique.len(), collected.len());

        let children = layout.children().unwrap();
        assert_eq!(children[1].kind, Some(ElementType::Grid2x2));
        assert_eq!(children[1].children().unwrap().len(), 4);
    }

    #[test]
    fn test_etl_widget_connection_fields() {
        let mut ids = IdGenerator::from_seed("e");
        let etl = create_element(ElementType::Etl, &mut ids);

        assert!(etl.is_container());
        assert_eq!(etl.extra["request"], json!("POST"));
        assert_eq!(etl.extra["useToken"], json!(true));
        let body: Value = serde_json::from_str(etl.extra["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["data_flow_type"], json!("ETL"));
    }

    #[test]
    fn test_body_is_root() {
        let mut ids = IdGenerator::from_seed("b");
        assert_eq!(create_element(ElementType::Body, &mut ids), Element::root());
    }
}
