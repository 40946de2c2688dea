use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic per-id jitter in [-1, 1] on each axis. Used to scatter
/// initial layout positions without a fixed arrangement that could leave a
/// symmetric graph stuck at a zero-net-force configuration.
pub fn stable_pair(id: u64) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn truncate_label(label: &str, max_chars: usize) -> &str {
    match label.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &label[..byte_index],
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        for id in [0u64, 1, 42, u64::MAX] {
            let (x1, y1) = stable_pair(id);
            let (x2, y2) = stable_pair(id);
            assert_eq!((x1, y1), (x2, y2));
            assert!((-1.0..=1.0).contains(&x1));
            assert!((-1.0..=1.0).contains(&y1));
        }
    }

    #[test]
    fn truncate_label_respects_char_boundaries() {
        assert_eq!(truncate_label("entity", 12), "entity");
        assert_eq!(truncate_label("a very long relation label", 12), "a very long ");
        assert_eq!(truncate_label("Zürich Hauptbahnhof", 6), "Zürich");
    }
}
