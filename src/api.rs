use crate::ast::EdiNode;
use crate::context::{Dialect, SeparatorContext, SeparatorOverride};
use crate::driver::drive;
use crate::envelope::EdifactEnvelope;
use crate::error::EdiError;
use crate::lookup::{FirstChild, TreeLookup};
use crate::segment::{DelimitedEncoder, SegmentEncoder};
use serde::Serialize;

/// The result of a successful encode: the envelope and message segments in
/// stream order, plus the separators they were written with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedInterchange {
    segments: Vec<String>,
    context: SeparatorContext,
}

impl EncodedInterchange {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn context(&self) -> &SeparatorContext {
        &self.context
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }

    /// Joins the segments into one EDI stream, appending `postfix` (for
    /// example `"\n"`) after every segment.
    #[must_use]
    pub fn to_edi(&self, postfix: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(segment);
            out.push_str(postfix);
        }
        out
    }

    /// Serializes the segments and the separator context into pretty-printed JSON.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }
}

/// Encodes an interchange tree as EDIFACT.
///
/// This is the primary entry point. `overrides` replaces any subset of the
/// default separators and may name the dialect; when the resulting separators
/// differ from the defaults a `UNA` advice is written first.
///
/// # Errors
///
/// Returns an `EdiError` if the separators are invalid, the `UNB` or `UNZ`
/// segment is missing, or any segment is malformed.
pub fn encode(root: &EdiNode, overrides: Option<&SeparatorOverride>) -> Result<EncodedInterchange, EdiError> {
    let context = SeparatorContext::new(Dialect::Edifact, overrides)?;
    encode_with(root, &context, FirstChild, DelimitedEncoder)
}

/// Encodes with a prebuilt context and caller-supplied lookup and segment
/// encoder strategies.
///
/// # Errors
///
/// Returns an `EdiError` if a mandatory segment is missing or any segment is malformed.
pub fn encode_with<L, E>(
    root: &EdiNode,
    context: &SeparatorContext,
    lookup: L,
    encoder: E,
) -> Result<EncodedInterchange, EdiError>
where
    L: TreeLookup,
    E: SegmentEncoder,
{
    let steps = EdifactEnvelope::new(*context, lookup, encoder);
    let segments = drive(&steps, root)?;
    Ok(EncodedInterchange {
        segments,
        context: *context,
    })
}
