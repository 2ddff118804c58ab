/*!
The mutable focus triple `(item, position, size)` plus active axis (§3, §4.3), and the
save/yield/restore discipline every axis iterator follows.

Rust has no generator sugar with implicit `try/finally`, so the save/restore discipline is
expressed as an RAII guard: [`FocusGuard`] snapshots the focus on construction and restores
it on [`Drop`], which fires whether the guard goes out of scope normally, via an early
`break`, via a propagated panic, or because the caller dropped the enclosing iterator
mid-traversal. This resolves the distilled specification's open question about cancellation
(§4.3, §5) in favor of unconditional restore rather than "undefined behavior on
abandonment".
*/

use crate::axis::Axis;
use crate::node::Node;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Focus {
    pub item: Option<Node>,
    pub position: usize,
    pub size: usize,
    pub axis: Option<Axis>,
}

/// Restores a [`Focus`] to its pre-entry snapshot when dropped.
pub struct FocusGuard<'a> {
    focus: &'a mut Focus,
    snapshot: (Option<Node>, usize, usize, Option<Axis>),
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Focus {
    pub fn new(item: Option<Node>, position: usize, size: usize) -> Self {
        Self {
            item,
            position,
            size,
            axis: None,
        }
    }

    fn snapshot(&self) -> (Option<Node>, usize, usize, Option<Axis>) {
        (self.item.clone(), self.position, self.size, self.axis)
    }
}

impl<'a> FocusGuard<'a> {
    /// Snapshot `focus` and mark `axis` as the axis now being traversed (§4.3 step 1-2).
    pub fn enter(focus: &'a mut Focus, axis: Axis) -> Self {
        let snapshot = focus.snapshot();
        focus.axis = Some(axis);
        Self { focus, snapshot }
    }

    pub fn focus_mut(&mut self) -> &mut Focus {
        self.focus
    }
}

impl<'a> Drop for FocusGuard<'a> {
    fn drop(&mut self) {
        let (item, position, size, axis) = self.snapshot.clone();
        self.focus.item = item;
        self.focus.position = position;
        self.focus.size = size;
        self.focus.axis = axis;
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_on_normal_drop() {
        let mut focus = Focus::new(None, 1, 1);
        {
            let mut guard = FocusGuard::enter(&mut focus, Axis::Child);
            guard.focus_mut().position = 3;
            guard.focus_mut().size = 5;
            assert_eq!(guard.focus_mut().axis, Some(Axis::Child));
        }
        assert_eq!(focus.position, 1);
        assert_eq!(focus.size, 1);
        assert_eq!(focus.axis, None);
    }

    #[test]
    fn guard_restores_on_early_drop_mid_iteration() {
        let mut focus = Focus::new(None, 7, 7);
        let guard = FocusGuard::enter(&mut focus, Axis::Descendant);
        drop(guard);
        assert_eq!(focus.position, 7);
        assert_eq!(focus.axis, None);
    }
}
