use argus_core::error::AppError;
use argus_core::traits::Cleaner;
use ego_tree::iter::Edge;
use scraper::{Html, Node};

/// Tags whose text is never rendered.
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Extracts the visible text of an HTML document.
///
/// Approximates what a browser would render as text: markup is dropped,
/// script/style/noscript bodies are skipped, and the surviving text nodes
/// are joined with runs of whitespace collapsed to single spaces.
#[derive(Debug, Clone, Default)]
pub struct VisibleTextCleaner;

impl VisibleTextCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl Cleaner for VisibleTextCleaner {
    fn clean(&self, html: &str) -> Result<String, AppError> {
        let doc = Html::parse_document(html);

        let mut parts: Vec<&str> = Vec::new();
        let mut skipped_depth = 0usize;
        for edge in doc.root_element().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Element(el) if SKIPPED_TAGS.contains(&el.name()) => skipped_depth += 1,
                    Node::Text(text) if skipped_depth == 0 => parts.push(text),
                    _ => {}
                },
                Edge::Close(node) => {
                    if let Node::Element(el) = node.value() {
                        if SKIPPED_TAGS.contains(&el.name()) {
                            skipped_depth -= 1;
                        }
                    }
                }
            }
        }

        let joined = parts.join(" ");
        Ok(joined.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}
