//! Search nodes to raw path elements.

use vn_search::PathNode;

use crate::PathElement;

/// Map each node to one element: jump-flagged nodes become [`Jump`], fall
/// nodes [`Fall`], everything else [`Travel`].
///
/// The node right after a fall is the landing spot the fall already implies
/// and is dropped, unless it is the final node of the path.
///
/// [`Jump`]: PathElement::Jump
/// [`Fall`]: PathElement::Fall
/// [`Travel`]: PathElement::Travel
pub fn convert(nodes: &[PathNode]) -> Vec<PathElement> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut i = 0;
    while i < nodes.len() {
        let node = &nodes[i];
        if node.is_jump {
            out.push(PathElement::Jump(node.cell));
        } else if node.is_fall {
            out.push(PathElement::Fall(node.cell));
            if i + 2 < nodes.len() {
                i += 1;
            }
        } else {
            out.push(PathElement::Travel(node.cell));
        }
        i += 1;
    }
    out
}
