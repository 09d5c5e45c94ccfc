//! Typed lookups over a parsed HTML page.
//!
//! Every lookup returns what it found, so a missing element is an explicit
//! `None` or empty list the caller decides about.

use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result};

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    /// Values of `attr` on every element matching `selector`, in document order.
    pub fn attr_values<'a>(&'a self, selector: &Selector, attr: &str) -> Vec<&'a str> {
        self.html
            .select(selector)
            .filter_map(|el| el.value().attr(attr))
            .collect()
    }

    /// Direct text children of every element matching `selector`, in document order.
    pub fn own_texts<'a>(&'a self, selector: &Selector) -> Vec<&'a str> {
        self.html.select(selector).flat_map(own_texts).collect()
    }
}

/// Text nodes that are direct children of `el`; nested elements are skipped.
pub fn own_texts<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    el.children().filter_map(|node| node.value().as_text().map(|text| &**text))
}

/// Captures of the first candidate that `pattern` matches.
pub fn first_matching<'t>(candidates: &[&'t str], pattern: &Regex) -> Option<Captures<'t>> {
    candidates.iter().find_map(|&text| pattern.captures(text))
}

#[inline]
pub fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
