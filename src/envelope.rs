use crate::ast::EdiNode;
use crate::context::SeparatorContext;
use crate::error::{EdiError, SegmentError};
use crate::lookup::TreeLookup;
use crate::segment::{SegmentDescriptor, SegmentEncoder};
use log::{debug, trace};

/// Outcome of rendering one envelope segment. Errors travel in the `Err` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Emission {
    Segment(String),
    Absent,
}

/// Per-step behavior of an interchange envelope, called by
/// [`drive`](crate::driver::drive) in a fixed order.
pub trait EnvelopeSteps {
    fn separator_advice(&self, root: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError>;
    fn interchange_header(&self, root: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError>;
    fn group_header(&self, group: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError>;
    fn group_body(&self, group: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError>;
    fn group_trailer(&self, group: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError>;
    /// Called for every segment child of the interchange root, including the
    /// header and trailer nodes, in document order.
    fn interchange_content(
        &self,
        root: &EdiNode,
        segment: &EdiNode,
        out: &mut Vec<String>,
    ) -> Result<(), EdiError>;
    fn interchange_trailer(&self, root: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError>;
}

/// Builds the `UNA` service string advice, or `None` when the context uses
/// the dialect defaults.
///
/// Layout: tag, component separator, data separator, decimal mark, release
/// indicator, reserved space, segment terminator.
#[must_use]
pub fn separator_advice(ctx: &SeparatorContext) -> Option<String> {
    if ctx.is_default() {
        return None;
    }
    let profile = ctx.profile();
    let mut advice = String::with_capacity(profile.advice_tag.len() + 6);
    advice.push_str(profile.advice_tag);
    advice.push(ctx.component());
    advice.push(ctx.data());
    advice.push(profile.decimal_mark);
    advice.push(ctx.release());
    advice.push(' ');
    advice.push(ctx.terminator());
    Some(advice)
}

/// EDIFACT envelope: `UNA`, `UNB`, optional `UNG`/`UNE` per group, `UNZ`.
#[derive(Debug, Clone)]
pub struct EdifactEnvelope<L, E> {
    ctx: SeparatorContext,
    lookup: L,
    encoder: E,
}

impl<L: TreeLookup, E: SegmentEncoder> EdifactEnvelope<L, E> {
    pub fn new(ctx: SeparatorContext, lookup: L, encoder: E) -> Self {
        EdifactEnvelope {
            ctx,
            lookup,
            encoder,
        }
    }

    pub fn context(&self) -> &SeparatorContext {
        &self.ctx
    }

    fn render(&self, parent: &EdiNode, descriptor: &SegmentDescriptor) -> Result<Emission, EdiError> {
        let node = self.lookup.find(parent, descriptor.tag);
        match self.encoder.encode(descriptor, node, &self.ctx) {
            Ok(text) => Ok(Emission::Segment(text)),
            Err(SegmentError::NotFound { .. }) => Ok(Emission::Absent),
            Err(e) => Err(e.into()),
        }
    }

    fn mandatory(
        &self,
        parent: &EdiNode,
        descriptor: &SegmentDescriptor,
        out: &mut Vec<String>,
    ) -> Result<(), EdiError> {
        let node = self.lookup.find(parent, descriptor.tag);
        let text = self.encoder.encode(descriptor, node, &self.ctx)?;
        trace!("emitted {}", descriptor.tag);
        out.push(text);
        Ok(())
    }

    fn optional(
        &self,
        parent: &EdiNode,
        descriptor: &SegmentDescriptor,
        out: &mut Vec<String>,
    ) -> Result<(), EdiError> {
        match self.render(parent, descriptor)? {
            Emission::Segment(text) => {
                trace!("emitted {}", descriptor.tag);
                out.push(text);
            }
            Emission::Absent => debug!("{} absent in group '{}', skipped", descriptor.tag, parent.tag),
        }
        Ok(())
    }

    fn content(&self, node: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError> {
        if node.is_segment() {
            out.push(self.encoder.encode_content(node, &self.ctx)?);
            return Ok(());
        }
        if node.children().is_empty() {
            return Err(SegmentError::Format {
                tag: node.tag.clone(),
                reason: "empty container in message content".to_string(),
            }
            .into());
        }
        for child in node.children() {
            self.content(child, out)?;
        }
        Ok(())
    }
}

impl<L: TreeLookup, E: SegmentEncoder> EnvelopeSteps for EdifactEnvelope<L, E> {
    fn separator_advice(&self, _root: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError> {
        if let Some(advice) = separator_advice(&self.ctx) {
            out.push(advice);
        }
        Ok(())
    }

    fn interchange_header(&self, root: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError> {
        self.mandatory(root, &self.ctx.profile().interchange_header, out)
    }

    fn group_header(&self, group: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError> {
        self.optional(group, &self.ctx.profile().group_header, out)
    }

    /// Encodes every segment of the group's messages in document order,
    /// leaving out the group's own boundary segments.
    fn group_body(&self, group: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError> {
        let profile = self.ctx.profile();
        for child in group.children() {
            if child.tag == profile.group_header.tag || child.tag == profile.group_trailer.tag {
                continue;
            }
            self.content(child, out)?;
        }
        Ok(())
    }

    fn group_trailer(&self, group: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError> {
        self.optional(group, &self.ctx.profile().group_trailer, out)
    }

    /// Segments directly under the interchange are group-less messages; the
    /// service segments among them are written by their own steps.
    fn interchange_content(
        &self,
        _root: &EdiNode,
        segment: &EdiNode,
        out: &mut Vec<String>,
    ) -> Result<(), EdiError> {
        let profile = self.ctx.profile();
        if segment.tag == profile.interchange_header.tag
            || segment.tag == profile.interchange_trailer.tag
            || segment.tag == profile.advice_tag
        {
            return Ok(());
        }
        self.content(segment, out)
    }

    fn interchange_trailer(&self, root: &EdiNode, out: &mut Vec<String>) -> Result<(), EdiError> {
        self.mandatory(root, &self.ctx.profile().interchange_trailer, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Element;
    use crate::context::{Dialect, SeparatorOverride};
    use crate::lookup::FirstChild;
    use crate::segment::DelimitedEncoder;

    fn envelope(ctx: SeparatorContext) -> EdifactEnvelope<FirstChild, DelimitedEncoder> {
        EdifactEnvelope::new(ctx, FirstChild, DelimitedEncoder)
    }

    fn default_envelope() -> EdifactEnvelope<FirstChild, DelimitedEncoder> {
        envelope(SeparatorContext::default_for(Dialect::Edifact))
    }

    #[test]
    fn test_advice_for_custom_separators() {
        let overrides = SeparatorOverride {
            component: Some(':'),
            data: Some(';'),
            release: Some('!'),
            terminator: Some('\''),
            ..Default::default()
        };
        let ctx = SeparatorContext::new(Dialect::Edifact, Some(&overrides)).unwrap();
        let advice = separator_advice(&ctx).unwrap();
        assert_eq!(advice, "UNA:;.! '");
        assert_eq!(advice.chars().count(), 9);
    }

    #[test]
    fn test_no_advice_for_defaults() {
        let ctx = SeparatorContext::default_for(Dialect::Edifact);
        assert_eq!(separator_advice(&ctx), None);

        let mut out = Vec::new();
        default_envelope()
            .separator_advice(&EdiNode::container("INTERCHANGE", vec![]), &mut out)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_group_boundaries_are_skipped() {
        let group = EdiNode::container("GROUP", vec![]);
        let env = default_envelope();
        let mut out = Vec::new();
        env.group_header(&group, &mut out).unwrap();
        env.group_trailer(&group, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_group_header_is_fatal() {
        let group = EdiNode::container("GROUP", vec![EdiNode::container("UNG", vec![])]);
        let mut out = Vec::new();
        let err = default_envelope().group_header(&group, &mut out).unwrap_err();
        assert!(matches!(err, EdiError::Segment(SegmentError::Format { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_interchange_header_is_fatal() {
        let root = EdiNode::container("INTERCHANGE", vec![]);
        let mut out = Vec::new();
        let err = default_envelope().interchange_header(&root, &mut out).unwrap_err();
        assert_eq!(
            err,
            EdiError::Segment(SegmentError::NotFound {
                tag: "UNB".to_string()
            })
        );
    }

    #[test]
    fn test_group_body_skips_boundaries() {
        let group = EdiNode::container(
            "GROUP",
            vec![
                EdiNode::segment("UNG", vec![Element::simple("INVOIC")]),
                EdiNode::container(
                    "MESSAGE",
                    vec![
                        EdiNode::segment("UNH", vec![Element::simple("1")]),
                        EdiNode::container(
                            "LOOP",
                            vec![EdiNode::segment("NAD", vec![Element::simple("BY")])],
                        ),
                        EdiNode::segment("UNT", vec![Element::simple("3"), Element::simple("1")]),
                    ],
                ),
                EdiNode::segment("UNE", vec![Element::simple("1")]),
            ],
        );

        let mut out = Vec::new();
        default_envelope().group_body(&group, &mut out).unwrap();
        assert_eq!(out, vec!["UNH+1'", "NAD+BY'", "UNT+3+1'"]);
    }

    #[test]
    fn test_interchange_content_skips_service_segments() {
        let root = EdiNode::container("INTERCHANGE", vec![]);
        let env = default_envelope();
        let mut out = Vec::new();
        for tag in ["UNA", "UNB", "UNZ"] {
            env.interchange_content(&root, &EdiNode::segment(tag, vec![Element::simple("X")]), &mut out)
                .unwrap();
        }
        assert!(out.is_empty());

        env.interchange_content(&root, &EdiNode::segment("UNH", vec![Element::simple("1")]), &mut out)
            .unwrap();
        assert_eq!(out, vec!["UNH+1'"]);
    }

    #[test]
    fn test_empty_container_in_message_is_fatal() {
        let group = EdiNode::container(
            "GROUP",
            vec![EdiNode::container("MESSAGE", vec![EdiNode::container("UNH", vec![])])],
        );
        let mut out = Vec::new();
        let err = default_envelope().group_body(&group, &mut out).unwrap_err();
        assert!(matches!(err, EdiError::Segment(SegmentError::Format { tag, .. }) if tag == "UNH"));
    }
}
