use crate::ast::EdiNode;

/// Locates a named node inside a subtree.
pub trait TreeLookup {
    fn find<'a>(&self, subtree: &'a EdiNode, tag: &str) -> Option<&'a EdiNode>;
}

/// Returns the first direct child carrying the requested tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChild;

impl TreeLookup for FirstChild {
    fn find<'a>(&self, subtree: &'a EdiNode, tag: &str) -> Option<&'a EdiNode> {
        subtree.children().iter().find(|child| child.tag == tag)
    }
}
