use rand::Rng;

/// Removes and returns one element chosen uniformly at random.
pub fn pick_uniform<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..items.len());
    Some(items.swap_remove(idx))
}
