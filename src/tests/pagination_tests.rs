#[cfg(test)]
mod tests {
    use crate::db::documents::{page_offset, slice_has_more};

    #[test]
    fn test_page_offset_first_page_is_zero() {
        assert_eq!(page_offset(1, 10), 0);
    }

    #[test]
    fn test_page_offset_advances_by_page_size() {
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(3, 10), 20);
        assert_eq!(page_offset(5, 25), 100);
    }

    #[test]
    fn test_page_offset_clamps_pages_below_one() {
        assert_eq!(page_offset(0, 10), 0);
        assert_eq!(page_offset(-3, 10), 0);
    }

    #[test]
    fn test_slice_has_more() {
        assert!(slice_has_more(0, 10, 25));
        assert!(slice_has_more(10, 10, 25));
        assert!(!slice_has_more(20, 5, 25));
        assert!(!slice_has_more(30, 0, 25));
        assert!(!slice_has_more(0, 25, 25));
    }

    /// 25 chunks at page size 10, replayed against the slice arithmetic
    /// the store uses: page 1 -> chunks 0..10 with more, page 3 ->
    /// chunks 20..25 without, page 4 -> empty without.
    #[test]
    fn test_twenty_five_chunk_boundaries() {
        let total: i64 = 25;
        let page_size: i64 = 10;
        let all: Vec<i64> = (0..total).collect();

        let slice_for = |page: i64| -> (Vec<i64>, bool) {
            let offset = page_offset(page, page_size);
            let slice: Vec<i64> = all
                .iter()
                .copied()
                .skip(offset as usize)
                .take(page_size as usize)
                .collect();
            let has_more = slice_has_more(offset, slice.len(), total);
            (slice, has_more)
        };

        let (page1, more1) = slice_for(1);
        assert_eq!(page1, (0..10).collect::<Vec<i64>>());
        assert!(more1);

        let (page3, more3) = slice_for(3);
        assert_eq!(page3, (20..25).collect::<Vec<i64>>());
        assert!(!more3);

        let (page4, more4) = slice_for(4);
        assert!(page4.is_empty());
        assert!(!more4);
    }
}
