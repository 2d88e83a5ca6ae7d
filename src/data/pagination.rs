use serde::Serialize;
use std::ops::Range;

/// Page metadata for a filtered and sorted collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Requested page, 1-indexed, exactly as the caller passed it
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// Never less than 1, even for an empty collection
    pub total_pages: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl PageInfo {
    /// Number of pages needed for `total_items`, minimum 1
    pub fn pages_for(total_items: usize, page_size: usize) -> usize {
        total_items.div_ceil(page_size.max(1)).max(1)
    }
}

/// Compute page metadata and the index range of the page window
///
/// The window is `[(page-1)*page_size, page*page_size)` clipped to
/// `total_items`; an out-of-range page gives an empty range. The caller's
/// page is reported back unchanged, never clamped. A zero page size is
/// treated as 1.
pub fn paginate(total_items: usize, page: usize, page_size: usize) -> (PageInfo, Range<usize>) {
    let page_size = page_size.max(1);
    let total_pages = PageInfo::pages_for(total_items, page_size);

    let range = if page == 0 {
        0..0
    } else {
        let start = (page - 1).saturating_mul(page_size).min(total_items);
        let end = page.saturating_mul(page_size).min(total_items);
        start..end
    };

    let info = PageInfo {
        page,
        page_size,
        total_items,
        total_pages,
        can_go_previous: page > 1,
        can_go_next: page < total_pages,
    };
    (info, range)
}

/// Slice of `items` for the requested page
pub fn page_slice<I>(items: &[I], page: usize, page_size: usize) -> (PageInfo, &[I]) {
    let (info, range) = paginate(items.len(), page, page_size);
    (info, &items[range])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_items_page_size_two() {
        let items = [1, 2, 3, 4, 5];

        let (info, slice) = page_slice(&items, 1, 2);
        assert_eq!(info.total_pages, 3);
        assert_eq!(slice, &[1, 2]);
        assert!(!info.can_go_previous);
        assert!(info.can_go_next);

        let (info, slice) = page_slice(&items, 3, 2);
        assert_eq!(slice, &[5]);
        assert!(info.can_go_previous);
        assert!(!info.can_go_next);

        let (info, slice) = page_slice(&items, 4, 2);
        assert!(slice.is_empty());
        assert!(!info.can_go_next);
        assert_eq!(info.page, 4);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let items: [u8; 0] = [];
        let (info, slice) = page_slice(&items, 1, 10);
        assert_eq!(info.total_items, 0);
        assert_eq!(info.total_pages, 1);
        assert!(slice.is_empty());
        assert!(!info.can_go_next);
        assert!(!info.can_go_previous);
    }

    #[test]
    fn test_page_zero_is_empty() {
        let items = [1, 2, 3];
        let (info, slice) = page_slice(&items, 0, 2);
        assert!(slice.is_empty());
        assert!(!info.can_go_previous);
        assert!(info.can_go_next);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let items = [1, 2, 3];
        let (_, slice) = page_slice(&items, usize::MAX, usize::MAX);
        assert!(slice.is_empty());
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let items = [7, 8];
        let (info, slice) = page_slice(&items, 2, 0);
        assert_eq!(info.page_size, 1);
        assert_eq!(info.total_pages, 2);
        assert_eq!(slice, &[8]);
    }

    #[test]
    fn test_pages_cover_collection() {
        let items: Vec<usize> = (0..23).collect();
        let (info, _) = page_slice(&items, 1, 5);
        let rebuilt: Vec<usize> = (1..=info.total_pages)
            .flat_map(|page| page_slice(&items, page, 5).1.to_vec())
            .collect();
        assert_eq!(rebuilt, items);
    }
}
