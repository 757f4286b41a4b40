//! Filter/map binding registers.

use quill_types::Value;

/// Which construct a binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `Φ` blocks, read with `φ`.
    Filter,
    /// `Ψ` blocks, read with `ψ`.
    Map,
}

/// Stacks of bound elements with push/pop semantics.
///
/// Entering a block pushes the current element; leaving pops it, which
/// restores whatever the enclosing block of the same kind had bound.
/// A kind is bound while its stack is non-empty.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    filters: Vec<Value>,
    maps: Vec<Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    fn stack(&self, kind: BindingKind) -> &Vec<Value> {
        match kind {
            BindingKind::Filter => &self.filters,
            BindingKind::Map => &self.maps,
        }
    }

    fn stack_mut(&mut self, kind: BindingKind) -> &mut Vec<Value> {
        match kind {
            BindingKind::Filter => &mut self.filters,
            BindingKind::Map => &mut self.maps,
        }
    }

    /// Bind `value` for a block that is being entered.
    pub fn push(&mut self, kind: BindingKind, value: Value) {
        self.stack_mut(kind).push(value);
    }

    /// Drop the innermost binding of a block that is being left.
    pub fn pop(&mut self, kind: BindingKind) -> Option<Value> {
        self.stack_mut(kind).pop()
    }

    /// The innermost bound element, if a block of this kind is active.
    pub fn current(&self, kind: BindingKind) -> Option<&Value> {
        self.stack(kind).last()
    }
}
