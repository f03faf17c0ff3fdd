//! Search nodes and their arena.
//!
//! Nodes live in a `Vec` owned by a single search call; a node refers to
//! its parent by [`NodeIdx`].  Parents are always pushed before children,
//! so the back-references form a tree rooted at index 0 (the start).

use vn_core::Cell;

use crate::cost::Move;

vn_core::typed_id! {
    /// Index of a node in the per-search arena.
    pub struct NodeIdx(u32);
}

#[derive(Clone, Debug)]
pub struct SearchNode {
    pub cell:    Cell,
    /// Accumulated cost from the start.
    pub g:       u32,
    /// Heuristic estimate to the goal.
    pub h:       f64,
    pub parent:  Option<NodeIdx>,
    pub is_jump: bool,
    pub is_fall: bool,
}

impl SearchNode {
    pub fn root(cell: Cell, h: f64) -> Self {
        Self { cell, g: 0, h, parent: None, is_jump: false, is_fall: false }
    }

    pub fn child(cell: Cell, g: u32, h: f64, parent: NodeIdx, mv: Move) -> Self {
        Self {
            cell,
            g,
            h,
            parent: Some(parent),
            is_jump: mv == Move::Jump,
            is_fall: mv == Move::Fall,
        }
    }

    #[inline]
    pub fn f(&self) -> f64 {
        self.g as f64 + self.h
    }
}

/// Append-only node storage for one search.
#[derive(Default)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn with_capacity(n: usize) -> Self {
        Self { nodes: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, node: SearchNode) -> NodeIdx {
        let idx = NodeIdx(self.nodes.len() as u32);
        self.nodes.push(node);
        idx
    }

    #[inline]
    pub fn get(&self, idx: NodeIdx) -> &SearchNode {
        &self.nodes[idx.index()]
    }

    /// Nodes from the root to `idx`, in path order.
    pub fn chain(&self, idx: NodeIdx) -> Vec<&SearchNode> {
        let mut out = Vec::new();
        let mut cur = Some(idx);
        while let Some(i) = cur {
            let node = self.get(i);
            out.push(node);
            cur = node.parent;
        }
        out.reverse();
        out
    }
}
