//! Small helpers for building markup from attribute maps.
//!
//! Attribute values are escaped, content is not: content is expected to be
//! markup already (e.g. the output of [`icon`]).

use hypertext::{Raw, prelude::*};
use indexmap::IndexMap;

/// HTML attributes in the order they should be written out.
pub type Attributes = IndexMap<String, String>;

pub fn attrs<K: Into<String>, V: Into<String>>(
    pairs: impl IntoIterator<Item = (K, V)>,
) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

pub fn render_attributes(attributes: &Attributes) -> String {
    let mut out = String::new();
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out
}

/// An element whose attributes are only known at runtime. `maud!` needs
/// attribute names up front, so the tags are written out as raw markup
/// around the (already rendered) content.
pub struct Tag<'a, C: Renderable> {
    pub name: &'a str,
    pub attributes: &'a Attributes,
    pub content: C,
}

impl<C: Renderable> Renderable for Tag<'_, C> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let open =
            format!("<{}{}>", self.name, render_attributes(self.attributes));
        let close = format!("</{}>", self.name);
        maud! {
            (Raw::dangerously_create(&open))
            (self.content)
            (Raw::dangerously_create(&close))
        }
        .render_to(buffer);
    }
}

/// A glyphicon, e.g. `Icon { name: "trash" }`.
pub struct Icon<'a> {
    pub name: &'a str,
}

impl Renderable for Icon<'_> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            span class=(format!("glyphicon glyphicon-{}", self.name)) {}
        }
        .render_to(buffer);
    }
}

pub fn tag(name: &str, content: &str, attributes: &Attributes) -> String {
    Tag {
        name,
        attributes,
        content: Raw::dangerously_create(content),
    }
    .render()
    .into_inner()
}

/// An anchor pointing at `url`. `href` is always written first and cannot be
/// overridden through `attributes`.
pub fn a(content: &str, url: &str, attributes: &Attributes) -> String {
    let mut all = Attributes::with_capacity(attributes.len() + 1);
    all.insert("href".to_string(), url.to_string());
    for (name, value) in attributes {
        if name != "href" {
            all.insert(name.clone(), value.clone());
        }
    }
    tag("a", content, &all)
}

pub fn icon(name: &str) -> String {
    Icon { name }.render().into_inner()
}
