use regex::Regex;
use scraper::{ElementRef, Selector};
use serde::Serialize;
use url::Url;

use crate::query::{create_selector, first_matching, own_texts, Document};
use crate::{Error, Result};

/// Links from the index page to every major group page, in document order.
pub fn group_links(html: &str, base: &Url) -> Result<Vec<Url>> {
    links_with(html, base, r#"a[href*="tab=group"]"#)
}

/// Links from a group page to each of its SIC description pages, in document order.
pub fn description_links(html: &str, base: &Url) -> Result<Vec<Url>> {
    links_with(html, base, r#"a[href*="tab=description"]"#)
}

/// Every matching `href` resolved against `base`. Repeated links are kept.
fn links_with(html: &str, base: &Url, sel_str: &str) -> Result<Vec<Url>> {
    let doc = Document::parse(html);
    let selector = create_selector(sel_str)?;
    doc.attr_values(&selector, "href")
        .into_iter()
        .map(|href| Ok(base.join(href)?))
        .collect()
}

/// Everything a description page says about its SIC code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionPage {
    pub division_code: String,
    pub division_name: String,
    pub group_code: String,
    pub group_name: String,
    pub sic_code: String,
    pub sic_name: String,
    pub sic_description: String,
    /// One example per line.
    pub sic_examples: String,
}

impl DescriptionPage {
    pub fn into_record(self, url: &Url) -> ManualRecord {
        ManualRecord {
            sic_code: self.sic_code,
            sic_name: self.sic_name,
            group_code: self.group_code,
            group_name: self.group_name,
            division_code: self.division_code,
            division_name: self.division_name,
            url: url.to_string(),
            sic_description: self.sic_description,
            sic_examples: self.sic_examples,
        }
    }
}

/// One row of the compiled table. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManualRecord {
    pub sic_code: String,
    pub sic_name: String,
    pub group_code: String,
    pub group_name: String,
    pub division_code: String,
    pub division_name: String,
    pub url: String,
    pub sic_description: String,
    pub sic_examples: String,
}

/// Selectors and patterns for description pages, compiled once per run.
pub struct DescriptionExtractor {
    division_sel: Selector,
    group_sel: Selector,
    heading_sel: Selector,
    desc_sel: Selector,
    division_rx: Regex,
    group_rx: Regex,
    sic_rx: Regex,
}

impl DescriptionExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            division_sel: create_selector(r#"a[title*="Division"]"#)?,
            group_sel: create_selector(r#"a[title*="Major Group"]"#)?,
            heading_sel: create_selector("h2")?,
            desc_sel: create_selector(r#"span[class*="blueTen"]"#)?,
            division_rx: Regex::new(r"^Division ([A-Z]): (.+)")?,
            group_rx: Regex::new(r"^Major Group (\d+): (.+)")?,
            sic_rx: Regex::new(r"^Description for (\d{4}): (.+)")?,
        })
    }

    pub fn extract(&self, html: &str) -> Result<DescriptionPage> {
        let doc = Document::parse(html);

        let division_titles = doc.attr_values(&self.division_sel, "title");
        let (division_code, division_name) = code_and_name(&division_titles, &self.division_rx, "division title")?;

        let group_titles = doc.attr_values(&self.group_sel, "title");
        let (group_code, group_name) = code_and_name(&group_titles, &self.group_rx, "major group title")?;

        let headings = doc.own_texts(&self.heading_sel);
        let (sic_code, sic_name) = code_and_name(&headings, &self.sic_rx, "SIC description heading")?;

        let sic_description = match doc.own_texts(&self.desc_sel).as_slice() {
            [] => String::new(),
            [text] => text.to_string(),
            texts => {
                return Err(Error::AmbiguousContent {
                    what: "description text",
                    count: texts.len(),
                })
            }
        };

        let sic_examples = doc
            .select(&self.desc_sel)
            .filter_map(next_list)
            .flat_map(|ul| ul.children().filter_map(ElementRef::wrap))
            .filter(|el| el.value().name() == "li")
            .flat_map(own_texts)
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(DescriptionPage {
            division_code,
            division_name,
            group_code,
            group_name,
            sic_code,
            sic_name,
            sic_description,
            sic_examples,
        })
    }
}

fn code_and_name(candidates: &[&str], pattern: &Regex, what: &'static str) -> Result<(String, String)> {
    let caps = first_matching(candidates, pattern).ok_or(Error::PatternNotFound { what })?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// The first `<ul>` among the siblings after `el`.
fn next_list(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| sib.value().name() == "ul")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description_page(body: &str) -> String {
        format!(
            r#"<html><body>
            <a href="sic_manual.display?id=1&tab=division" title="Division A: Agriculture">Division A</a>
            <a href="sic_manual.display?id=1&tab=group" title="Major Group 01: Crop Production">Major Group 01</a>
            <h2>Description for 0111: Wheat</h2>
            <div>{body}</div>
            </body></html>"#
        )
    }

    #[test]
    fn extracts_the_full_record() {
        let html = description_page(
            r#"<span class="blueTen">Growing of wheat.</span>
            <ul><li> Winter wheat </li><li>Spring wheat</li></ul>"#,
        );
        let page = DescriptionExtractor::new().unwrap().extract(&html).unwrap();
        assert_eq!(
            page,
            DescriptionPage {
                division_code: "A".into(),
                division_name: "Agriculture".into(),
                group_code: "01".into(),
                group_name: "Crop Production".into(),
                sic_code: "0111".into(),
                sic_name: "Wheat".into(),
                sic_description: "Growing of wheat.".into(),
                sic_examples: "Winter wheat\nSpring wheat".into(),
            }
        );
    }

    #[test]
    fn missing_span_leaves_description_and_examples_empty() {
        let html = description_page("<ul><li>Not an example</li></ul>");
        let page = DescriptionExtractor::new().unwrap().extract(&html).unwrap();
        assert_eq!(page.sic_description, "");
        assert_eq!(page.sic_examples, "");
    }

    #[test]
    fn duplicated_description_span_is_ambiguous() {
        let html = description_page(
            r#"<span class="blueTen">One.</span><span class="blueTen">Two.</span>"#,
        );
        let err = DescriptionExtractor::new().unwrap().extract(&html).unwrap_err();
        assert!(matches!(err, Error::AmbiguousContent { count: 2, .. }));
    }

    #[test]
    fn skips_titles_that_only_mention_the_level() {
        let html = r#"<a title="Division list">back</a>
            <a title="Division D: Manufacturing">D</a>
            <a title="Major Group 20: Food And Kindred Products">20</a>
            <h2>Description list</h2><h2>Description for 2011: Meat Packing Plants</h2>"#;
        let page = DescriptionExtractor::new().unwrap().extract(html).unwrap();
        assert_eq!(page.division_code, "D");
        assert_eq!(page.group_name, "Food And Kindred Products");
        assert_eq!(page.sic_code, "2011");
    }

    #[test]
    fn missing_group_title_fails() {
        let html = r#"<a title="Division A: Agriculture">A</a><h2>Description for 0111: Wheat</h2>"#;
        let err = DescriptionExtractor::new().unwrap().extract(html).unwrap_err();
        assert!(matches!(err, Error::PatternNotFound { what: "major group title" }));
    }

    #[test]
    fn links_resolve_against_base_and_keep_repeats() {
        let base = Url::parse("https://www.osha.gov/pls/imis/sic_manual.html").unwrap();
        let html = r#"<a href="sic_manual.display?id=1&amp;tab=group">1</a>
            <a href="/pls/imis/sic_manual.display?id=2&amp;tab=group">2</a>
            <a href="sic_manual.display?id=1&amp;tab=group">1 again</a>
            <a href="sic_manual.display?id=5&amp;tab=description">desc</a>"#;

        let links: Vec<String> = group_links(html, &base).unwrap().iter().map(Url::to_string).collect();
        assert_eq!(
            links,
            vec![
                "https://www.osha.gov/pls/imis/sic_manual.display?id=1&tab=group",
                "https://www.osha.gov/pls/imis/sic_manual.display?id=2&tab=group",
                "https://www.osha.gov/pls/imis/sic_manual.display?id=1&tab=group",
            ]
        );
        assert_eq!(description_links(html, &base).unwrap().len(), 1);
    }

    #[test]
    fn description_links_keep_order_and_repeats() {
        let base = Url::parse("https://www.osha.gov/pls/imis/sic_manual.html").unwrap();
        let html = r#"<ul>
            <li><a href="sic_manual.display?id=381&amp;tab=description">0111</a></li>
            <li><a href="/pls/imis/sic_manual.display?id=12&amp;tab=description">0112</a></li>
            <li><a href="sic_manual.display?id=3&amp;tab=group">back to group</a></li>
            <li><a href="sic_manual.display?id=381&amp;tab=description">0111 again</a></li>
            </ul>"#;

        let links: Vec<String> = description_links(html, &base)
            .unwrap()
            .iter()
            .map(Url::to_string)
            .collect();
        assert_eq!(
            links,
            vec![
                "https://www.osha.gov/pls/imis/sic_manual.display?id=381&tab=description",
                "https://www.osha.gov/pls/imis/sic_manual.display?id=12&tab=description",
                "https://www.osha.gov/pls/imis/sic_manual.display?id=381&tab=description",
            ]
        );
    }
}
