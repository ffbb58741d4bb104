//! Glossary extraction
//!
//! JATS articles list abbreviations as
//! `<glossary><def-list><def-item><term>ER</term><def>Estrogen Receptor</def></def-item>...`.

use std::collections::BTreeMap;
use crate::Result;
use crate::xml;

/// Term → definition, unique per term.
pub type Glossary = BTreeMap<String, String>;

/// Extract every `glossary/def-list/def-item` term and definition.
///
/// Items missing a `term` or `def` child are skipped. Term and definition
/// are the trimmed text of their first matching child. When a term repeats,
/// the later item in document order wins.
pub fn extract_glossary(document: &str) -> Result<Glossary> {
    let root = xml::parse(document)?;
    let mut glossary = Glossary::new();

    for item in def_items(&root) {
        let (Some(term), Some(def)) = (item.first_child("term"), item.first_child("def")) else {
            continue;
        };
        glossary.insert(term.text().trim().to_string(), def.text().trim().to_string());
    }

    Ok(glossary)
}

/// `glossary/def-list/def-item` elements, in document order.
fn def_items(root: &xml::Element) -> Vec<&xml::Element> {
    let mut items = Vec::new();
    // (element, parent name, grandparent name)
    let mut pending: Vec<(&xml::Element, Option<&str>, Option<&str>)> = vec![(root, None, None)];

    while let Some((el, parent, grandparent)) = pending.pop() {
        if el.name == "def-item" && parent == Some("def-list") && grandparent == Some("glossary") {
            items.push(el);
        }
        let children: Vec<_> = el
            .child_elements()
            .map(|child| (child, Some(el.name.as_str()), parent))
            .collect();
        pending.extend(children.into_iter().rev());
    }
    items
}

/// Glossary of one document; a document that does not parse has none.
pub fn get_abbreviations(document: &str) -> Glossary {
    extract_glossary(document).unwrap_or_else(|e| {
        tracing::warn!("Glossary extraction skipped: {}", e);
        Glossary::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glossary(pairs: &[(&str, &str)]) -> Glossary {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_single_item() {
        let xml = "<glossary><def-list><def-item><term>ER</term><def>Estrogen Receptor</def></def-item></def-list></glossary>";
        assert_eq!(get_abbreviations(xml), glossary(&[("ER", "Estrogen Receptor")]));
    }

    #[test]
    fn test_nested_in_article_with_markup() {
        let xml = r#"<article><back><glossary><title>Abbreviations</title><def-list>
            <def-item><term> <italic>TNF</italic> </term><def><p>tumor necrosis
            factor</p></def></def-item>
            <def-item><term>IL-6</term><def><p>interleukin 6</p></def></def-item>
        </def-list></glossary></back></article>"#;
        let result = get_abbreviations(xml);
        assert_eq!(result.get("TNF").map(String::as_str), Some("tumor necrosis\n            factor"));
        assert_eq!(result.get("IL-6").map(String::as_str), Some("interleukin 6"));
    }

    #[test]
    fn test_malformed_input_is_empty() {
        assert!(get_abbreviations("not xml at all").is_empty());
        assert!(get_abbreviations("<glossary><def-list><def-item><term>ER</term>").is_empty());
        assert!(extract_glossary("<glossary>").is_err());
    }

    #[test]
    fn test_malformed_attributes_are_empty() {
        let bare = "<glossary bad><def-list><def-item><term>ER</term>\
            <def>Estrogen Receptor</def></def-item></def-list></glossary>";
        let repeated = r#"<glossary><def-list><def-item x="1" x="2"><term>ER</term><def>E</def></def-item></def-list></glossary>"#;
        assert!(get_abbreviations(bare).is_empty());
        assert!(get_abbreviations(repeated).is_empty());
        assert!(extract_glossary(repeated).is_err());
    }

    #[test]
    fn test_nested_glossary_follows_document_order() {
        let xml = "<glossary><def-list>\
            <def-item><term>A</term><def><glossary><def-list>\
                <def-item><term>ER</term><def>inner</def></def-item>\
            </def-list></glossary></def></def-item>\
            <def-item><term>ER</term><def>outer</def></def-item>\
            </def-list></glossary>";
        let result = get_abbreviations(xml);
        assert_eq!(result.get("ER").map(String::as_str), Some("outer"));
        assert_eq!(result.get("A").map(String::as_str), Some("ERinner"));
    }

    #[test]
    fn test_item_without_def_is_skipped() {
        let xml = "<glossary><def-list>\
            <def-item><term>ER</term></def-item>\
            <def-item><def>orphan</def></def-item>\
            <def-item><term>PR</term><def>Progesterone Receptor</def></def-item>\
            </def-list></glossary>";
        assert_eq!(get_abbreviations(xml), glossary(&[("PR", "Progesterone Receptor")]));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let xml = "<glossary><def-list>\
            <def-item><term>ER</term><def>Estrogen Receptor</def></def-item>\
            <def-item><term>ER</term><def>Endoplasmic Reticulum</def></def-item>\
            </def-list></glossary>";
        assert_eq!(get_abbreviations(xml), glossary(&[("ER", "Endoplasmic Reticulum")]));
    }

    #[test]
    fn test_items_outside_glossary_ignored() {
        let xml = "<article><def-list><def-item><term>X</term><def>y</def></def-item></def-list></article>";
        assert!(get_abbreviations(xml).is_empty());
    }

    #[test]
    fn test_first_term_and_def_used() {
        let xml = "<glossary><def-list><def-item>\
            <term>A</term><term>B</term><def>first</def><def>second</def>\
            </def-item></def-list></glossary>";
        assert_eq!(get_abbreviations(xml), glossary(&[("A", "first")]));
    }
}
