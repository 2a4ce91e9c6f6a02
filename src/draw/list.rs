use std::rc::Rc;

use super::op::DrawOp;

/// An ordered sequence of draw ops, shared between styles through `Rc`.
#[derive(Debug, Clone, Default)]
pub struct DrawOpList {
    ops: Vec<DrawOp>,
}

impl DrawOpList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Whether `child` is reachable through nested list or tile ops.
    /// Shared lists are immutable, so a list never reaches itself.
    pub fn contains(&self, child: &Rc<DrawOpList>) -> bool {
        self.ops
            .iter()
            .filter_map(DrawOp::child_list)
            .any(|nested| Rc::ptr_eq(nested, child) || nested.contains(child))
    }
}

impl FromIterator<DrawOp> for DrawOpList {
    fn from_iter<I: IntoIterator<Item = DrawOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}
