//! Slice helpers used when laying out charts and tables

/// Split `items` into consecutive chunks of `size`, the last one possibly shorter
///
/// # Panics
///
/// If `size` is zero.
pub fn slices<T: Clone>(size: usize, items: &[T]) -> Vec<Vec<T>> {
    assert!(size > 0, "slices of size 0");
    items.chunks(size).map(<[T]>::to_vec).collect()
}

pub fn last<T>(items: &[T]) -> Option<&T> {
    items.last()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_slices() {
        assert_eq!(
            slices(3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]
        );
    }

    #[test]
    fn partial_last_slice() {
        assert_eq!(
            slices(3, &[1, 2, 3, 4, 5, 6, 7, 8]),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]
        );
        assert_eq!(slices(4, &[1]), vec![vec![1]]);
        assert!(slices::<u8>(2, &[]).is_empty());
    }

    #[test]
    fn last_item() {
        assert_eq!(last(&["a", "b"]), Some(&"b"));
        assert_eq!(last::<u8>(&[]), None);
    }
}
