//! Insertion point calculation.

use kurbo::Rect;

use crate::ids::TaskId;
use crate::layout::Placement;

/// Find where a dragged card belongs for a pointer at `pointer_y`.
///
/// `candidates` are the column's other cards in visual order. The card goes
/// before the nearest card whose vertical midpoint lies below the pointer;
/// with no such card it goes to the end. On equal distances the earlier card
/// wins.
pub fn insertion_point<I>(pointer_y: f64, candidates: I) -> Placement
where
    I: IntoIterator<Item = (TaskId, Rect)>,
{
    let mut closest: Option<(f64, TaskId)> = None;
    for (id, rect) in candidates {
        let offset = pointer_y - (rect.y0 + rect.height() / 2.0);
        if offset >= 0.0 {
            continue;
        }
        match &closest {
            Some((best, _)) if offset <= *best => {}
            _ => closest = Some((offset, id)),
        }
    }
    match closest {
        Some((_, id)) => Placement::Before(id),
        None => Placement::End,
    }
}

/// Whether `item` already sits at `placement` within `order`.
pub fn is_in_place(order: &[TaskId], item: &TaskId, placement: &Placement) -> bool {
    let Some(index) = order.iter().position(|i| i == item) else {
        return false;
    };
    match placement {
        Placement::Before(next) => order.get(index + 1) == Some(next),
        Placement::End => index + 1 == order.len(),
    }
}
