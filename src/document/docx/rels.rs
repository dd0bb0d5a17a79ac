//! Part relationships (`word/_rels/document.xml.rels`).

use anyhow::Result;

use crate::document::xml::{self, Element, Node};

const HYPERLINK_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
const PACKAGE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

#[derive(Debug, Clone)]
pub struct Relationships {
    root: Element,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            root: Element::new("Relationships").with_attr("xmlns", PACKAGE_RELATIONSHIPS_NS),
        }
    }
}

impl Relationships {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            root: xml::parse(source)?,
        })
    }

    fn entries(&self) -> impl Iterator<Item = &Element> {
        self.root.elements().filter(|el| el.name == "Relationship")
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Target of the relationship with the given id.
    pub fn target(&self, id: &str) -> Option<&str> {
        self.entries()
            .find(|el| el.attr("Id") == Some(id))
            .and_then(|el| el.attr("Target"))
    }

    /// Id of an external hyperlink relationship for `url`, adding one when
    /// no existing relationship points at it.
    pub fn hyperlink_id(&mut self, url: &str) -> String {
        if let Some(id) = self
            .entries()
            .find(|el| el.attr("Type") == Some(HYPERLINK_TYPE) && el.attr("Target") == Some(url))
            .and_then(|el| el.attr("Id"))
        {
            return id.to_string();
        }

        let id = self.next_id();
        let relationship = Element::new("Relationship")
            .with_attr("Id", id.clone())
            .with_attr("Type", HYPERLINK_TYPE)
            .with_attr("Target", url)
            .with_attr("TargetMode", "External");
        self.root.children.push(Node::Element(relationship));
        id
    }

    fn next_id(&self) -> String {
        let highest = self
            .entries()
            .filter_map(|el| el.attr("Id"))
            .filter_map(|id| id.strip_prefix("rId"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("rId{}", highest + 1)
    }

    pub fn to_xml(&self) -> String {
        self.root.to_document_string()
    }
}
