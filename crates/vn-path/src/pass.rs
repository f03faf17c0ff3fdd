//! Simplification passes.

use crate::PathElement;

/// One stage of the simplifier.  Must keep element order and be idempotent.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn apply(&self, elements: Vec<PathElement>) -> Vec<PathElement>;
}

// ── CollinearTravelPass ───────────────────────────────────────────────────────

/// Collapse runs of three or more `Travel` elements that advance by the same
/// unit horizontal step into a single `TravelVector` from the first cell of
/// the run to the last.  Runs are taken greedily from the left.
pub struct CollinearTravelPass;

impl Pass for CollinearTravelPass {
    fn name(&self) -> &'static str {
        "collinear-travel"
    }

    fn apply(&self, elements: Vec<PathElement>) -> Vec<PathElement> {
        let mut out = Vec::with_capacity(elements.len());
        let mut i = 0;
        while i < elements.len() {
            let end = run_end(&elements, i);
            if end - i >= 2 {
                out.push(PathElement::TravelVector {
                    from: elements[i].destination(),
                    to:   elements[end].destination(),
                });
            } else {
                out.extend_from_slice(&elements[i..=end]);
            }
            i = end + 1;
        }
        out
    }
}

/// Index of the last element of the collinear travel run starting at `start`
/// (`start` itself when no run begins there).
fn run_end(elements: &[PathElement], start: usize) -> usize {
    let PathElement::Travel(first) = elements[start] else {
        return start;
    };
    let Some(PathElement::Travel(second)) = elements.get(start + 1) else {
        return start;
    };
    let step = *second - first;
    let (dx, dy, dz) = step;
    if dy != 0 || dx.abs() > 1 || dz.abs() > 1 || (dx, dz) == (0, 0) {
        return start;
    }
    let mut end = start + 1;
    while let Some(PathElement::Travel(next)) = elements.get(end + 1) {
        let PathElement::Travel(prev) = elements[end] else { break };
        if *next - prev != step {
            break;
        }
        end += 1;
    }
    end
}

// ── FallColumnPass ────────────────────────────────────────────────────────────

/// Drop `Travel`/`Fall` elements in the same column below a `Fall`: the drop
/// itself carries the agent there.  The final element is always kept.
pub struct FallColumnPass;

impl Pass for FallColumnPass {
    fn name(&self) -> &'static str {
        "fall-column"
    }

    fn apply(&self, elements: Vec<PathElement>) -> Vec<PathElement> {
        let n = elements.len();
        let mut out = Vec::with_capacity(n);
        let mut anchor = None;
        for (i, e) in elements.into_iter().enumerate() {
            if let Some(top) = anchor {
                let cell = e.destination();
                let droppable = matches!(e, PathElement::Travel(_) | PathElement::Fall(_));
                if droppable && i + 1 < n && cell.same_column(top) && cell.y < top.y {
                    continue;
                }
            }
            anchor = match e {
                PathElement::Fall(c) => Some(c),
                _ => None,
            };
            out.push(e);
        }
        out
    }
}

// ── JumpStepPass ──────────────────────────────────────────────────────────────

/// Fold a vertical hop into the step it lands on.
///
/// The search climbs a one-cell step as "jump straight up, then move
/// across".  When a `Jump` sits directly above the previous element and the
/// next element starts at a neighbouring cell on the jump's level, the jump
/// is retargeted to that cell.  A following `Travel` to it is absorbed; a
/// following `TravelVector` starting there is kept.
pub struct JumpStepPass;

impl Pass for JumpStepPass {
    fn name(&self) -> &'static str {
        "jump-step"
    }

    fn apply(&self, elements: Vec<PathElement>) -> Vec<PathElement> {
        let mut out: Vec<PathElement> = Vec::with_capacity(elements.len());
        let mut i = 0;
        while i < elements.len() {
            let e = elements[i];
            if let PathElement::Jump(j) = e {
                let above_prev = out.last().is_some_and(|p| p.destination() == j.down(1));
                let landing = match elements.get(i + 1) {
                    Some(PathElement::Travel(b)) => Some((*b, true)),
                    Some(PathElement::TravelVector { from, .. }) => Some((*from, false)),
                    _ => None,
                };
                if let Some((b, absorb)) = landing {
                    if above_prev && b.y == j.y && !b.same_column(j) {
                        out.push(PathElement::Jump(b));
                        i += if absorb { 2 } else { 1 };
                        continue;
                    }
                }
            }
            out.push(e);
            i += 1;
        }
        out
    }
}
