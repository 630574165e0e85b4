use crate::ast::EdiNode;
use crate::envelope::EnvelopeSteps;
use crate::error::{EdiError, SegmentError};
use log::{debug, warn};
use std::fmt::Display;

/// Position of the driver within one interchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    AwaitingAdvice,
    HeaderEmitted,
    GroupHeaderAttempted,
    GroupBodyExternal,
    GroupTrailerAttempted,
    TrailerEmitted,
    Aborted,
}

impl Display for EnvelopeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EnvelopeState::AwaitingAdvice => "awaiting advice",
            EnvelopeState::HeaderEmitted => "header emitted",
            EnvelopeState::GroupHeaderAttempted => "group header attempted",
            EnvelopeState::GroupBodyExternal => "group body",
            EnvelopeState::GroupTrailerAttempted => "group trailer attempted",
            EnvelopeState::TrailerEmitted => "trailer emitted",
            EnvelopeState::Aborted => "aborted",
        };
        write!(f, "{name}")
    }
}

/// Runs `steps` over `root` in the fixed envelope order:
///
/// ```text
/// advice, header, { group header, group body, group trailer | loose segment }*, trailer
/// ```
///
/// Container children of `root` are groups; segment children are handed to
/// [`EnvelopeSteps::interchange_content`], both in document order. On the
/// first error the partially filled buffer is dropped and the error returned.
///
/// # Errors
/// Returns whatever error a step reports, or `SegmentError::Format` when
/// `root` is a segment rather than a container.
pub fn drive<S: EnvelopeSteps + ?Sized>(steps: &S, root: &EdiNode) -> Result<Vec<String>, EdiError> {
    drive_traced(steps, root).1
}

/// Same as [`drive`], also reporting the state the driver ended in:
/// `TrailerEmitted` on success, `Aborted` otherwise.
pub fn drive_traced<S: EnvelopeSteps + ?Sized>(
    steps: &S,
    root: &EdiNode,
) -> (EnvelopeState, Result<Vec<String>, EdiError>) {
    let mut state = EnvelopeState::AwaitingAdvice;
    let result = run(steps, root, &mut state);
    if let Err(e) = &result {
        warn!("envelope aborted from state '{state}': {e}");
        state = EnvelopeState::Aborted;
    }
    debug!("envelope finished in state '{state}'");
    (state, result)
}

fn run<S: EnvelopeSteps + ?Sized>(
    steps: &S,
    root: &EdiNode,
    state: &mut EnvelopeState,
) -> Result<Vec<String>, EdiError> {
    if root.is_segment() {
        return Err(SegmentError::Format {
            tag: root.tag.clone(),
            reason: "interchange root must be a container".to_string(),
        }
        .into());
    }

    let mut out = Vec::new();

    steps.separator_advice(root, &mut out)?;
    steps.interchange_header(root, &mut out)?;
    *state = EnvelopeState::HeaderEmitted;

    for child in root.children() {
        if child.is_segment() {
            steps.interchange_content(root, child, &mut out)?;
            continue;
        }
        debug!("entering group '{}'", child.tag);
        steps.group_header(child, &mut out)?;
        *state = EnvelopeState::GroupHeaderAttempted;
        steps.group_body(child, &mut out)?;
        *state = EnvelopeState::GroupBodyExternal;
        steps.group_trailer(child, &mut out)?;
        *state = EnvelopeState::GroupTrailerAttempted;
    }

    steps.interchange_trailer(root, &mut out)?;
    *state = EnvelopeState::TrailerEmitted;
    Ok(out)
}
