use serde::{Deserialize, Serialize};

/// Page metadata reported alongside every feed response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub number: u32,
    pub total_pages: u32,
    pub total_items: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// A fixed-size slice of an ordered sequence.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Slices `items` into the requested 1-indexed page. Out-of-range
    /// requests clamp to the nearest valid page instead of failing: page
    /// zero or below becomes page one, anything past the end becomes the
    /// last page. An empty sequence yields a single empty page.
    pub fn slice(items: Vec<T>, page_size: usize, requested: i64) -> Page<T> {
        let page_size = page_size.max(1);
        let total_items = items.len();
        let total_pages = (total_items.div_ceil(page_size)).max(1) as u32;

        let number = requested.clamp(1, i64::from(total_pages)) as u32;

        let start = (number as usize - 1) * page_size;
        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect();

        Page {
            items,
            meta: PageMeta {
                number,
                total_pages,
                total_items,
                has_next: number < total_pages,
                has_prev: number > 1,
            },
        }
    }
}
