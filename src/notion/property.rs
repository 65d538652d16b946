//! Kind-tagged Notion property values
//!
//! Every property object carries a `type` field naming the key that holds its
//! value, e.g. `{"type": "number", "number": 23.5}`. Only the kinds an expense
//! row can be built from are modelled; everything else decodes to
//! [`PropertyValue::Unsupported`].

use serde::Deserialize;

/// A run of rich text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: Option<String>,

    #[serde(default)]
    pub text: Option<TextContent>,
}

impl RichText {
    fn content(&self) -> &str {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().map(|t| t.content.as_str()))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

/// A select or multi-select option
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

/// Payload of a date property
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,

    #[serde(default)]
    pub end: Option<String>,
}

/// Computed value of a formula property
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    String {
        #[serde(default)]
        string: Option<String>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    #[serde(other)]
    Other,
}

/// One property value, discriminated by its kind tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    Formula {
        formula: FormulaValue,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// The kind tag, for log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::Number { .. } => "number",
            Self::Select { .. } => "select",
            Self::MultiSelect { .. } => "multi_select",
            Self::Date { .. } => "date",
            Self::Formula { .. } => "formula",
            Self::Unsupported => "unsupported",
        }
    }

    /// Concatenated text of a title, rich text or string formula
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Title { title: runs } | Self::RichText { rich_text: runs } => {
                Some(runs.iter().map(RichText::content).collect())
            }
            Self::Formula {
                formula: FormulaValue::String { string },
            } => Some(string.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Numeric value of a number or number formula
    ///
    /// `Some(None)` means the kind is numeric but the value is empty.
    pub fn number(&self) -> Option<Option<f64>> {
        match self {
            Self::Number { number } => Some(*number),
            Self::Formula {
                formula: FormulaValue::Number { number },
            } => Some(*number),
            _ => None,
        }
    }

    /// Start of a date or date formula
    ///
    /// `Some(None)` means the kind is a date but it is empty.
    pub fn date_start(&self) -> Option<Option<&str>> {
        let value = match self {
            Self::Date { date } => date.as_ref(),
            Self::Formula {
                formula: FormulaValue::Date { date },
            } => date.as_ref(),
            _ => return None,
        };
        Some(value.and_then(|d| d.start.as_deref()))
    }

    /// Category label from a select, the first multi-select option, or text
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Select { select } => Some(
                select
                    .as_ref()
                    .map(|option| option.name.clone())
                    .unwrap_or_default(),
            ),
            Self::MultiSelect { multi_select } => Some(
                multi_select
                    .first()
                    .map(|option| option.name.clone())
                    .unwrap_or_default(),
            ),
            _ => self.text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> PropertyValue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_number() {
        let value = decode(json!({ "id": "a", "type": "number", "number": 23.5 }));
        assert_eq!(value.number(), Some(Some(23.5)));

        let empty = decode(json!({ "id": "a", "type": "number", "number": null }));
        assert_eq!(empty.number(), Some(None));
    }

    #[test]
    fn test_select_and_multi_select() {
        let select = decode(json!({ "type": "select", "select": { "id": "x", "name": "Food", "color": "red" } }));
        assert_eq!(select.label().as_deref(), Some("Food"));

        let empty = decode(json!({ "type": "select", "select": null }));
        assert_eq!(empty.label().as_deref(), Some(""));

        let multi = decode(json!({ "type": "multi_select", "multi_select": [
            { "name": "Travel" }, { "name": "Work" }
        ] }));
        assert_eq!(multi.label().as_deref(), Some("Travel"));
    }

    #[test]
    fn test_rich_text_concatenates_runs() {
        let value = decode(json!({ "type": "rich_text", "rich_text": [
            { "type": "text", "text": { "content": "Lunch " }, "plain_text": "Lunch " },
            { "type": "text", "text": { "content": "with team" } }
        ] }));
        assert_eq!(value.text().as_deref(), Some("Lunch with team"));
        assert_eq!(value.label().as_deref(), Some("Lunch with team"));
    }

    #[test]
    fn test_date_start() {
        let value = decode(json!({ "type": "date", "date": { "start": "2024-01-05", "end": null } }));
        assert_eq!(value.date_start(), Some(Some("2024-01-05")));

        let empty = decode(json!({ "type": "date", "date": null }));
        assert_eq!(empty.date_start(), Some(None));
    }

    #[test]
    fn test_formula_results() {
        let number = decode(json!({ "type": "formula", "formula": { "type": "number", "number": 12 } }));
        assert_eq!(number.number(), Some(Some(12.0)));

        let text = decode(json!({ "type": "formula", "formula": { "type": "string", "string": "hi" } }));
        assert_eq!(text.text().as_deref(), Some("hi"));

        let other = decode(json!({ "type": "formula", "formula": { "type": "boolean", "boolean": true } }));
        assert_eq!(other.number(), None);
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let value = decode(json!({ "type": "checkbox", "checkbox": true }));
        assert_eq!(value, PropertyValue::Unsupported);
        assert_eq!(value.kind(), "unsupported");
        assert_eq!(value.number(), None);
        assert_eq!(value.text(), None);
    }
}
