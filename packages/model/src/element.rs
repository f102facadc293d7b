use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Id of the sentinel root element
pub const ROOT_ID: &str = "__body";

/// Open style map (CSS property name → value)
pub type Styles = Map<String, Value>;

/// Widget-specific fields of a leaf element
pub type Fields = Map<String, Value>;

/// Element node of a page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    #[serde(default)]
    pub styles: Styles,

    #[serde(default)]
    pub name: String,

    /// `None` only on the empty selection sentinel
    #[serde(rename = "type", default)]
    pub kind: Option<ElementType>,

    #[serde(default)]
    pub category: Option<Category>,

    pub content: Content,

    /// Fields attached to the node itself (form action, data-widget connection, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Either the children of a container or the fields of a leaf widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Children(Vec<Element>),
    Fields(Fields),
}

impl Content {
    pub fn is_children(&self) -> bool {
        matches!(self, Content::Children(_))
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Children(Vec::new())
    }
}

impl Element {
    /// Create an element with empty styles; category is derived from the type
    pub fn new(id: impl Into<String>, kind: ElementType, name: impl Into<String>, content: Content) -> Self {
        Self {
            id: id.into(),
            styles: Styles::new(),
            name: name.into(),
            kind: Some(kind),
            category: Some(kind.category()),
            content,
            extra: Map::new(),
        }
    }

    /// The `__body` root of a page
    pub fn root() -> Self {
        Self::new(ROOT_ID, ElementType::Body, "Body", Content::Children(Vec::new()))
    }

    /// Sentinel used for "nothing selected"
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            styles: Styles::new(),
            name: String::new(),
            kind: None,
            category: None,
            content: Content::Children(Vec::new()),
            extra: Map::new(),
        }
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_empty_sentinel(&self) -> bool {
        self.id.is_empty() && self.kind.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.kind == Some(ElementType::Body)
    }

    pub fn is_container(&self) -> bool {
        self.content.is_children()
    }

    pub fn children(&self) -> Option<&[Element]> {
        match &self.content {
            Content::Children(children) => Some(children),
            Content::Fields(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            Content::Fields(_) => None,
        }
    }

    pub fn fields(&self) -> Option<&Fields> {
        match &self.content {
            Content::Fields(fields) => Some(fields),
            Content::Children(_) => None,
        }
    }

    /// Read a string widget field (`innerText`, `href`, ...)
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields().and_then(|f| f.get(key)).and_then(Value::as_str)
    }
}

/// Closed set of element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "h1")]
    H1,
    #[serde(rename = "h2")]
    H2,
    #[serde(rename = "h3")]
    H3,
    #[serde(rename = "h4")]
    H4,
    #[serde(rename = "h5")]
    H5,
    #[serde(rename = "h6")]
    H6,
    #[serde(rename = "p")]
    Paragraph,
    #[serde(rename = "span")]
    Span,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "2Col")]
    TwoCol,
    #[serde(rename = "3Col")]
    ThreeCol,
    #[serde(rename = "2Row")]
    TwoRow,
    #[serde(rename = "3Row")]
    ThreeRow,
    #[serde(rename = "Header2Col")]
    Header2Col,
    #[serde(rename = "2ColFooter")]
    TwoColFooter,
    #[serde(rename = "Sidebar2Row")]
    Sidebar2Row,
    #[serde(rename = "Grid2x2")]
    Grid2x2,
    Layout1,
    Layout2,
    Layout3,
    Layout4,
    Layout5,
    Layout6,
    Layout7,
    Layout8,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "marquee")]
    Marquee,
    #[serde(rename = "icon")]
    Icon,
    #[serde(rename = "embed")]
    Embed,
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "form")]
    Form,
    #[serde(rename = "input")]
    Input,
    #[serde(rename = "textarea")]
    Textarea,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "radio")]
    Radio,
    #[serde(rename = "submitButton")]
    SubmitButton,
    #[serde(rename = "ol")]
    OrderedList,
    #[serde(rename = "ul")]
    UnorderedList,
    #[serde(rename = "li")]
    ListItem,
    #[serde(rename = "blockquote")]
    Blockquote,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "hr")]
    Divider,
    #[serde(rename = "badge")]
    Badge,
    #[serde(rename = "spacer")]
    Spacer,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "accordion")]
    Accordion,
    #[serde(rename = "tabs")]
    Tabs,
    #[serde(rename = "card")]
    Card,
    /// External data (ETL) widget
    #[serde(rename = "etl")]
    Etl,
    #[serde(rename = "__body")]
    Body,
}

impl ElementType {
    pub const ALL: &'static [ElementType] = &[
        ElementType::H1,
        ElementType::H2,
        ElementType::H3,
        ElementType::H4,
        ElementType::H5,
        ElementType::H6,
        ElementType::Paragraph,
        ElementType::Span,
        ElementType::Container,
        ElementType::Section,
        ElementType::Link,
        ElementType::TwoCol,
        ElementType::ThreeCol,
        ElementType::TwoRow,
        ElementType::ThreeRow,
        ElementType::Header2Col,
        ElementType::TwoColFooter,
        ElementType::Sidebar2Row,
        ElementType::Grid2x2,
        ElementType::Layout1,
        ElementType::Layout2,
        ElementType::Layout3,
        ElementType::Layout4,
        ElementType::Layout5,
        ElementType::Layout6,
        ElementType::Layout7,
        ElementType::Layout8,
        ElementType::Video,
        ElementType::Image,
        ElementType::Audio,
        ElementType::Marquee,
        ElementType::Icon,
        ElementType::Embed,
        ElementType::Button,
        ElementType::Form,
        ElementType::Input,
        ElementType::Textarea,
        ElementType::Select,
        ElementType::Checkbox,
        ElementType::Radio,
        ElementType::SubmitButton,
        ElementType::OrderedList,
        ElementType::UnorderedList,
        ElementType::ListItem,
        ElementType::Blockquote,
        ElementType::Code,
        ElementType::Divider,
        ElementType::Badge,
        ElementType::Spacer,
        ElementType::Table,
        ElementType::Accordion,
        ElementType::Tabs,
        ElementType::Card,
        ElementType::Etl,
        ElementType::Body,
    ];

    /// Wire tag, as stored in saved documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::H1 => "h1",
            ElementType::H2 => "h2",
            ElementType::H3 => "h3",
            ElementType::H4 => "h4",
            ElementType::H5 => "h5",
            ElementType::H6 => "h6",
            ElementType::Paragraph => "p",
            ElementType::Span => "span",
            ElementType::Container => "container",
            ElementType::Section => "section",
            ElementType::Link => "link",
            ElementType::TwoCol => "2Col",
            ElementType::ThreeCol => "3Col",
            ElementType::TwoRow => "2Row",
            ElementType::ThreeRow => "3Row",
            ElementType::Header2Col => "Header2Col",
            ElementType::TwoColFooter => "2ColFooter",
            ElementType::Sidebar2Row => "Sidebar2Row",
            ElementType::Grid2x2 => "Grid2x2",
            ElementType::Layout1 => "Layout1",
            ElementType::Layout2 => "Layout2",
            ElementType::Layout3 => "Layout3",
            ElementType::Layout4 => "Layout4",
            ElementType::Layout5 => "Layout5",
            ElementType::Layout6 => "Layout6",
            ElementType::Layout7 => "Layout7",
            ElementType::Layout8 => "Layout8",
            ElementType::Video => "video",
            ElementType::Image => "image",
            ElementType::Audio => "audio",
            ElementType::Marquee => "marquee",
            ElementType::Icon => "icon",
            ElementType::Embed => "embed",
            ElementType::Button => "button",
            ElementType::Form => "form",
            ElementType::Input => "input",
            ElementType::Textarea => "textarea",
            ElementType::Select => "select",
            ElementType::Checkbox => "checkbox",
            ElementType::Radio => "radio",
            ElementType::SubmitButton => "submitButton",
            ElementType::OrderedList => "ol",
            ElementType::UnorderedList => "ul",
            ElementType::ListItem => "li",
            ElementType::Blockquote => "blockquote",
            ElementType::Code => "code",
            ElementType::Divider => "hr",
            ElementType::Badge => "badge",
            ElementType::Spacer => "spacer",
            ElementType::Table => "table",
            ElementType::Accordion => "accordion",
            ElementType::Tabs => "tabs",
            ElementType::Card => "card",
            ElementType::Etl => "etl",
            ElementType::Body => "__body",
        }
    }

    /// Quick-settings category assigned at creation time
    pub fn category(&self) -> Category {
        use ElementType::*;
        match self {
            H1 | H2 | H3 | H4 | H5 | H6 | Paragraph | Span => Category::Text,
            Link => Category::Link,
            Image | Button => Category::Basic,
            Video | Audio | Marquee | Icon | Embed => Category::Media,
            Form | Input | Textarea | Select | Checkbox | Radio | SubmitButton => Category::Form,
            OrderedList | UnorderedList | ListItem | Blockquote | Code | Divider | Badge | Spacer | Table
            | Accordion | Tabs | Card => Category::Content,
            Container | Section | TwoCol | ThreeCol | TwoRow | ThreeRow | Header2Col | TwoColFooter
            | Sidebar2Row | Grid2x2 | Layout1 | Layout2 | Layout3 | Layout4 | Layout5 | Layout6 | Layout7
            | Layout8 | Etl | Body => Category::Container,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown element type: {}", s))
    }
}

/// Coarse classification used to pick the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Container,
    Text,
    Link,
    Basic,
    Media,
    Form,
    Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_detection_uses_content() {
        let leaf = Element::new("a", ElementType::Paragraph, "Paragraph", Content::Fields(Fields::new()));
        let container = Element::new("b", ElementType::Container, "Container", Content::Children(vec![]));

        assert!(!leaf.is_container());
        assert!(container.is_container());
        assert!(leaf.children().is_none());
        assert_eq!(container.children().map(|c| c.len()), Some(0));
    }

    #[test]
    fn test_element_wire_shape() {
        let mut fields = Fields::new();
        fields.insert("innerText".to_string(), json!("Hello"));
        let element = Element::new("p-1", ElementType::Paragraph, "Paragraph", Content::Fields(fields))
            .with_extra("formAction", "/submit");

        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], json!("p"));
        assert_eq!(value["category"], json!("Text"));
        assert_eq!(value["content"]["innerText"], json!("Hello"));
        assert_eq!(value["formAction"], json!("/submit"));
    }

    #[test]
    fn test_empty_sentinel_serializes_null_type() {
        let value = serde_json::to_value(Element::empty()).unwrap();
        assert_eq!(value["type"], Value::Null);
        assert_eq!(value["category"], Value::Null);
        assert_eq!(value["content"], json!([]));

        let back: Element = serde_json::from_value(value).unwrap();
        assert!(back.is_empty_sentinel());
    }

    #[test]
    fn test_untagged_content_parsing() {
        let json = r#"{
            "id": "c1",
            "name": "Two Columns",
            "styles": { "display": "flex", "flex": 2 },
            "type": "2Col",
            "category": "Container",
            "content": [
                { "id": "t1", "name": "Text", "styles": {}, "type": "span", "category": "Text",
                  "content": { "innerText": "hi" } }
            ],
            "apiEndpoint": "https://example.test"
        }"#;

        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind, Some(ElementType::TwoCol));
        assert_eq!(element.styles["flex"], json!(2));
        assert_eq!(element.extra["apiEndpoint"], json!("https://example.test"));

        let children = element.children().unwrap();
        assert_eq!(children[0].field_str("innerText"), Some("hi"));
    }

    #[test]
    fn test_type_tags_round_trip_through_from_str() {
        for kind in ElementType::ALL {
            assert_eq!(kind.as_str().parse::<ElementType>(), Ok(*kind));
        }
        assert!("carousel".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_categories() {
        assert_eq!(ElementType::H3.category(), Category::Text);
        assert_eq!(ElementType::Layout7.category(), Category::Container);
        assert_eq!(ElementType::Form.category(), Category::Form);
    }
}
