//! Partitioning of series requests into provider-legal batches.

/// Maximum ids per request without a registration key.
pub const UNREGISTERED_BATCH_LIMIT: usize = 25;

/// Maximum ids per request with a registration key.
pub const REGISTERED_BATCH_LIMIT: usize = 50;

/// Returns the per-request id ceiling for the given credential state.
#[must_use]
pub const fn batch_limit(credentialed: bool) -> usize {
    if credentialed {
        REGISTERED_BATCH_LIMIT
    } else {
        UNREGISTERED_BATCH_LIMIT
    }
}

/// Splits `ids` into consecutive batches of at most `max_batch_size`.
///
/// Batches preserve input order and cover every id exactly once. A
/// `max_batch_size` of zero is treated as one.
#[must_use]
pub fn split<T>(ids: &[T], max_batch_size: usize) -> Vec<&[T]> {
    ids.chunks(max_batch_size.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sixty_unregistered() {
        let ids: Vec<String> = (0..60).map(|i| format!("S{i:02}")).collect();
        let batches = split(&ids, batch_limit(false));

        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![25, 25, 10]);

        let flattened: Vec<&String> = batches.iter().flat_map(|b| b.iter()).collect();
        assert_eq!(flattened, ids.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_split_registered_limit() {
        let ids: Vec<u32> = (0..60).collect();
        let sizes: Vec<usize> = split(&ids, batch_limit(true))
            .iter()
            .map(|b| b.len())
            .collect();
        assert_eq!(sizes, vec![50, 10]);
    }

    #[test]
    fn test_split_edge_cases() {
        let empty: Vec<u32> = Vec::new();
        assert!(split(&empty, 25).is_empty());

        let exact: Vec<u32> = (0..25).collect();
        assert_eq!(split(&exact, 25).len(), 1);

        let few = [1, 2, 3];
        assert_eq!(split(&few, 0), vec![&[1][..], &[2][..], &[3][..]]);
    }
}
