//! Adjacent-swap reordering for editable lists
//!
//! Backs the "move up / move down" buttons of photo, tax, fee and season
//! rows. Moves that would leave the list are no-ops.

/// Swap item `index` with its predecessor. Returns whether anything moved.
pub fn move_up<T>(items: &mut [T], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items.swap(index - 1, index);
    true
}

/// Swap item `index` with its successor. Returns whether anything moved.
pub fn move_down<T>(items: &mut [T], index: usize) -> bool {
    if index + 1 >= items.len() {
        return false;
    }
    items.swap(index, index + 1);
    true
}

/// Remove item `index` if present
pub fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}
