//! Synthesis context.

use std::fmt;

use eqv_types::TypeDescriptor;

/// The chain of types whose synthesis led to the current request.
///
/// Each recursion level works on its own extended copy, so sibling fields
/// never see each other's entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynthesisContext {
    stack: Vec<TypeDescriptor>,
}

impl SynthesisContext {
    /// Context of a top-level request.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A copy of this context with `ty` pushed on top.
    #[must_use]
    pub fn clone_and_add(&self, ty: &TypeDescriptor) -> Self {
        let mut stack = self.stack.clone();
        stack.push(ty.clone());
        SynthesisContext { stack }
    }

    /// Is `ty` already being synthesized further up the chain?
    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.stack.contains(ty)
    }

    /// Number of enclosing synthesis requests.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl fmt::Display for SynthesisContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.stack.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
