use crate::config::MAX_QUANTITY;

/// Move selection cursor one item up.
pub fn select_prev(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Move selection cursor one item down, never past `max`.
pub fn select_next(selected: usize, max: usize) -> usize {
    if selected < max {
        selected + 1
    } else {
        max
    }
}

/// Move a cursor up, wrapping from the first item to the last.
pub fn wrap_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else if selected == 0 || selected >= item_count {
        item_count - 1
    } else {
        selected - 1
    }
}

/// Move a cursor down, wrapping from the last item to the first.
pub fn wrap_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        0
    }
}

pub fn quantity_up(qty: u8) -> u8 {
    qty.saturating_add(1).clamp(1, MAX_QUANTITY)
}

pub fn quantity_down(qty: u8) -> u8 {
    qty.saturating_sub(1).clamp(1, MAX_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_boundaries() {
        assert_eq!(select_prev(0), 0);
        assert_eq!(select_prev(3), 2);
        assert_eq!(select_next(0, 0), 0);
        assert_eq!(select_next(0, 2), 1);
        assert_eq!(select_next(2, 2), 2);
    }

    #[test]
    fn wrapping_both_directions() {
        assert_eq!(wrap_prev(0, 5), 4);
        assert_eq!(wrap_prev(4, 5), 3);
        assert_eq!(wrap_next(4, 5), 0);
        assert_eq!(wrap_next(0, 5), 1);
        assert_eq!(wrap_next(0, 1), 0);
        assert_eq!(wrap_prev(0, 1), 0);
    }

    #[test]
    fn quantity_stays_in_range() {
        let mut q = 1;
        for _ in 0..25 {
            q = quantity_up(q);
        }
        assert_eq!(q, MAX_QUANTITY);
        for _ in 0..25 {
            q = quantity_down(q);
        }
        assert_eq!(q, 1);
    }
}
