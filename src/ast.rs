use serde::{Deserialize, Serialize};

/// A node of the source tree that describes one interchange.
///
/// Segments are leaves carrying their data elements; containers (the interchange
/// itself, functional groups, messages, loops) carry child nodes in stream order.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct EdiNode {
    pub tag: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Segment(Vec<Element>),
    Container(Vec<EdiNode>),
}

/// One data element. A single component is a simple element, several make a
/// composite, and no components at all is an omitted element.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element(pub Vec<String>);

impl Element {
    pub fn simple(value: impl Into<String>) -> Self {
        Element(vec![value.into()])
    }

    pub fn composite<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Element(components.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        Element(Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(String::is_empty)
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }
}

impl EdiNode {
    pub fn segment(tag: impl Into<String>, elements: Vec<Element>) -> Self {
        EdiNode {
            tag: tag.into(),
            kind: NodeKind::Segment(elements),
        }
    }

    pub fn container(tag: impl Into<String>, children: Vec<EdiNode>) -> Self {
        EdiNode {
            tag: tag.into(),
            kind: NodeKind::Container(children),
        }
    }

    #[must_use]
    pub fn is_segment(&self) -> bool {
        matches!(self.kind, NodeKind::Segment(_))
    }

    /// Child nodes of a container; empty for segments.
    pub fn children(&self) -> &[EdiNode] {
        match &self.kind {
            NodeKind::Container(children) => children,
            NodeKind::Segment(_) => &[],
        }
    }

    /// Data elements of a segment; `None` for containers.
    pub fn elements(&self) -> Option<&[Element]> {
        match &self.kind {
            NodeKind::Segment(elements) => Some(elements),
            NodeKind::Container(_) => None,
        }
    }
}
