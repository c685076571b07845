//! Text helpers over `scraper` element trees.

use scraper::ElementRef;

/// All descendant text nodes concatenated, as rendered.
pub(crate) fn collect_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Descendant text nodes joined with `\n`, so `<br>`-separated runs land on their own lines.
pub(crate) fn text_lines(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join("\n")
}

/// Trimmed, non-empty descendant text nodes.
pub(crate) fn stripped_strings(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn text_views() {
        let doc = Html::parse_document("<p><b>TEXT BOOKS:</b><br>1. One<br> 2. Two </p>");
        let sel = Selector::parse("p").unwrap();
        let p = doc.select(&sel).next().unwrap();

        assert_eq!(collect_text(p), "TEXT BOOKS:1. One 2. Two ");
        assert_eq!(text_lines(p), "TEXT BOOKS:\n1. One\n 2. Two ");
        assert_eq!(stripped_strings(p), vec!["TEXT BOOKS:", "1. One", "2. Two"]);
    }
}
