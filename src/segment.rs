use crate::ast::{EdiNode, Element};
use crate::context::SeparatorContext;
use crate::error::SegmentError;

/// Describes the segment type a node is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDescriptor {
    pub tag: &'static str,
    pub max_elements: usize,
}

/// Interchange header.
pub const UNB: SegmentDescriptor = SegmentDescriptor {
    tag: "UNB",
    max_elements: 11,
};

/// Functional group header.
pub const UNG: SegmentDescriptor = SegmentDescriptor {
    tag: "UNG",
    max_elements: 8,
};

/// Functional group trailer.
pub const UNE: SegmentDescriptor = SegmentDescriptor {
    tag: "UNE",
    max_elements: 2,
};

/// Interchange trailer.
pub const UNZ: SegmentDescriptor = SegmentDescriptor {
    tag: "UNZ",
    max_elements: 2,
};

/// Renders a located node as segment text.
pub trait SegmentEncoder {
    /// # Errors
    /// `SegmentError::NotFound` when `node` is `None`, `SegmentError::Format`
    /// when the node cannot be rendered as `descriptor`.
    fn encode(
        &self,
        descriptor: &SegmentDescriptor,
        node: Option<&EdiNode>,
        ctx: &SeparatorContext,
    ) -> Result<String, SegmentError>;

    /// Renders a segment with no descriptor, as message content is.
    ///
    /// # Errors
    /// `SegmentError::Format` when the node is not a segment.
    fn encode_content(&self, node: &EdiNode, ctx: &SeparatorContext) -> Result<String, SegmentError>;
}

/// Writes `TAG`, then each element prefixed by the data separator with its
/// components joined by the component separator, then the terminator.
/// Trailing omitted elements and trailing empty components are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelimitedEncoder;

impl DelimitedEncoder {
    fn render(&self, tag: &str, elements: &[Element], ctx: &SeparatorContext) -> String {
        let used = elements
            .iter()
            .rposition(|e| !e.is_empty())
            .map_or(0, |last| last + 1);

        let mut out = String::from(tag);
        for element in &elements[..used] {
            out.push(ctx.data());
            let components = element.components();
            let used_components = components
                .iter()
                .rposition(|c| !c.is_empty())
                .map_or(0, |last| last + 1);
            for (i, component) in components[..used_components].iter().enumerate() {
                if i > 0 {
                    out.push(ctx.component());
                }
                out.push_str(&ctx.escape(component));
            }
        }
        out.push(ctx.terminator());
        out
    }
}

impl SegmentEncoder for DelimitedEncoder {
    fn encode(
        &self,
        descriptor: &SegmentDescriptor,
        node: Option<&EdiNode>,
        ctx: &SeparatorContext,
    ) -> Result<String, SegmentError> {
        let node = node.ok_or_else(|| SegmentError::NotFound {
            tag: descriptor.tag.to_string(),
        })?;

        if node.tag != descriptor.tag {
            return Err(SegmentError::Format {
                tag: descriptor.tag.to_string(),
                reason: format!("node is tagged '{}'", node.tag),
            });
        }

        let elements = node.elements().ok_or_else(|| SegmentError::Format {
            tag: descriptor.tag.to_string(),
            reason: "expected a segment, found a container".to_string(),
        })?;

        if elements.len() > descriptor.max_elements {
            return Err(SegmentError::Format {
                tag: descriptor.tag.to_string(),
                reason: format!(
                    "{} data elements, at most {} allowed",
                    elements.len(),
                    descriptor.max_elements
                ),
            });
        }

        Ok(self.render(descriptor.tag, elements, ctx))
    }

    fn encode_content(&self, node: &EdiNode, ctx: &SeparatorContext) -> Result<String, SegmentError> {
        let elements = node.elements().ok_or_else(|| SegmentError::Format {
            tag: node.tag.clone(),
            reason: "expected a segment, found a container".to_string(),
        })?;
        Ok(self.render(&node.tag, elements, ctx))
    }
}
