//! Parse stage: turns a document's raw HTML text into plain extracted text
//! plus a deduplicated list of absolute outgoing links, skipping
//! non-textual elements and image links.

use scraper::{Html, Selector};
use url::Url;

use crate::core::cancel::CancelScope;
use crate::core::channel::Receiver;
use crate::core::stage;
use crate::pkg::prepare_link;

use super::task::Task;

const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "iframe", "img", "noscript"];
const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".tiff", ".svg", ".webp",
];

pub fn parse(scope: CancelScope, input: Receiver<Task>, capacity: usize) -> Receiver<Task> {
    stage::map(scope, input, capacity, |task| async move { parse_one(task) })
}

fn parse_one(task: Task) -> Task {
    if task.finished {
        return task;
    }

    let Ok(base_url) = Url::parse(&task.document.uri) else {
        return task.fail(["crawl.parse: invalid base URL"]);
    };

    let html = Html::parse_document(&task.document.text);
    let (text, links) = extract_content(&html, &base_url);

    let mut task = task;
    task.document.text = text;
    task.document.links = links;
    task
}

fn extract_content(html: &Html, base_url: &Url) -> (String, Vec<String>) {
    let mut text = String::new();
    let mut links = std::collections::HashSet::new();

    let anchor_selector = Selector::parse("a[href]").unwrap();
    for element in html.select(&anchor_selector) {
        if let Some(href) = element.value().attr("href") {
            if !is_image_link(href) {
                if let Ok(resolved) = base_url.join(href) {
                    links.insert(prepare_link(resolved.as_str()));
                }
            }
        }
    }

    collect_text(html.root_element(), &mut text);

    (text, links.into_iter().collect())
}

fn collect_text(element: scraper::ElementRef, out: &mut String) {
    for node in element.children() {
        match node.value() {
            scraper::node::Node::Element(el) => {
                if NON_TEXT_ELEMENTS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_el) = scraper::ElementRef::wrap(node) {
                    collect_text(child_el, out);
                }
            }
            scraper::node::Node::Text(text_node) => {
                let trimmed = text_node.text.trim();
                if !trimmed.is_empty() {
                    out.push_str(&trimmed.replace('\u{a0}', " "));
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn is_image_link(link: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| link.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_and_skips_non_text_elements() {
        let html = Html::parse_document(
            "<html><body><p>Привет мир</p><script>ignored()</script>\
             <a href=\"/other\">link</a></body></html>",
        );
        let base = Url::parse("https://example.org/page").unwrap();
        let (text, links) = extract_content(&html, &base);

        assert!(text.contains("Привет"));
        assert!(!text.contains("ignored"));
        assert_eq!(links, vec!["https://example.org/other".to_string()]);
    }

    #[test]
    fn drops_image_links() {
        let html = Html::parse_document(
            "<html><body><a href=\"/pic.png\">pic</a><a href=\"/page\">page</a></body></html>",
        );
        let base = Url::parse("https://example.org/").unwrap();
        let (_text, links) = extract_content(&html, &base);

        assert_eq!(links, vec!["https://example.org/page".to_string()]);
    }
}
