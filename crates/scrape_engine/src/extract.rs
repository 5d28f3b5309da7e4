use scrape_core::{ExtractRule, ScrapedRecord};
use scraper::ElementRef;

use crate::Document;

pub trait Extractor: Send + Sync {
    fn extract(&self, document: &Document, rule: &ExtractRule) -> Vec<ScrapedRecord>;
}

/// Selects elements by exact tag name and exact attribute value.
///
/// - tag names compare against the parser's lowercase names
/// - the attribute value must match the whole string, so `class="price big"`
///   does not match `price`
/// - text is every visible descendant text node (not inside `script`,
///   `style` or `template`), whitespace-collapsed
#[derive(Debug, Default, Clone, Copy)]
pub struct TagExtractor;

impl Extractor for TagExtractor {
    fn extract(&self, document: &Document, rule: &ExtractRule) -> Vec<ScrapedRecord> {
        let tree = document.tree();
        let field = rule.field_name();

        tree.root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| matches_rule(element, rule))
            .map(|element| ScrapedRecord::new(field.clone(), normalized_text(&element)))
            .collect()
    }
}

fn matches_rule(element: &ElementRef<'_>, rule: &ExtractRule) -> bool {
    let value = element.value();
    value.name() == rule.tag && value.attr(&rule.attribute) == Some(rule.value.as_str())
}

/// Elements whose text is never rendered.
const HIDDEN_TEXT_PARENTS: [&str; 3] = ["script", "style", "template"];

fn normalized_text(element: &ElementRef<'_>) -> String {
    let raw: String = element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != element.id())
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|parent| HIDDEN_TEXT_PARENTS.contains(&parent.name()));
            (!hidden).then_some(&**text)
        })
        .collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
