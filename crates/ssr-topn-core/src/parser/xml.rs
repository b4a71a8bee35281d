//! XML document parser for Top-N responses
//!
//! Turns the raw response body into owned result entries. Text is kept
//! as-is apart from trimming; interpretation happens in the row extractor.

use roxmltree::{Document, Node};

use crate::error::{Result, TopnError};

/// Skater node of a result entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkaterEntry {
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub given_native: String,
    pub family_native: String,
}

/// One `<result>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultEntry {
    pub time: String,
    pub date: String,
    pub event: String,
    /// `None` when the result has no `<skater>` child
    pub skater: Option<SkaterEntry>,
}

/// Parsed Top-N response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsDocument {
    pub results: Vec<ResultEntry>,
}

impl ResultsDocument {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Parses a Top-N XML body
///
/// Every `<result>` element in the document is collected, whatever its
/// depth. A well-formed document without results is valid and yields an
/// empty list.
///
/// # Errors
/// Returns `XmlError` if the body is not well-formed XML
pub fn parse_results_document(xml: &str) -> Result<ResultsDocument> {
    let document = Document::parse(xml).map_err(|e| TopnError::XmlError(e.to_string()))?;

    let results = document
        .descendants()
        .filter(|n| n.has_tag_name("result"))
        .map(parse_result)
        .collect();

    Ok(ResultsDocument { results })
}

fn parse_result(node: Node) -> ResultEntry {
    ResultEntry {
        time: child_text(node, "time"),
        date: child_text(node, "date"),
        event: child_text(node, "event"),
        skater: child(node, "skater").map(parse_skater),
    }
}

fn parse_skater(node: Node) -> SkaterEntry {
    SkaterEntry {
        id: child_text(node, "id"),
        given_name: child_text(node, "givenname"),
        family_name: child_text(node, "familyname"),
        given_native: child_text(node, "givennative"),
        family_native: child_text(node, "familynative"),
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

/// Trimmed text of the first direct child called `name`, or ""
fn child_text(node: Node, name: &str) -> String {
    child(node, name)
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_result() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <topn>
            <result>
                <time>38,12</time>
                <date>2021-02-14</date>
                <event>Finnish Junior Championships</event>
                <skater>
                    <id>12345</id>
                    <givenname>Anna</givenname>
                    <familyname>Virtanen</familyname>
                </skater>
            </result>
        </topn>"#;

        let doc = parse_results_document(xml).unwrap();
        assert_eq!(doc.len(), 1);

        let entry = &doc.results[0];
        assert_eq!(entry.time, "38,12");
        assert_eq!(entry.date, "2021-02-14");
        assert_eq!(entry.event, "Finnish Junior Championships");

        let skater = entry.skater.as_ref().unwrap();
        assert_eq!(skater.id, "12345");
        assert_eq!(skater.given_name, "Anna");
        assert_eq!(skater.family_name, "Virtanen");
        assert_eq!(skater.given_native, "");
    }

    #[test]
    fn test_parse_nested_results() {
        let xml = r#"<root><list><result><time>40,00</time></result></list>
            <result><time>41,00</time></result></root>"#;
        let doc = parse_results_document(xml).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.results[0].time, "40,00");
        assert_eq!(doc.results[1].time, "41,00");
    }

    #[test]
    fn test_parse_missing_skater() {
        let xml = "<topn><result><time>DNS</time></result></topn>";
        let doc = parse_results_document(xml).unwrap();
        assert_eq!(doc.results[0].skater, None);
        assert_eq!(doc.results[0].date, "");
    }

    #[test]
    fn test_parse_native_names() {
        let xml = r#"<topn><result><time>39,00</time><skater>
            <givennative>Юлия</givennative><familynative>Иванова</familynative>
            </skater></result></topn>"#;
        let doc = parse_results_document(xml).unwrap();
        let skater = doc.results[0].skater.as_ref().unwrap();
        assert_eq!(skater.given_native, "Юлия");
        assert_eq!(skater.family_native, "Иванова");
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse_results_document("<topn/>").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        let result = parse_results_document("<topn><result></topn>");
        assert!(matches!(result, Err(TopnError::XmlError(_))));
    }
}
