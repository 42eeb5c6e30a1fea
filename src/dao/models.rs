use serde::{Deserialize, Serialize};

#[inline(always)]
fn default_page() -> u64 {
    0
}
#[inline(always)]
fn default_size() -> u64 {
    100
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pageable {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

impl Pageable {
    #[inline]
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    #[inline]
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Cuts the page described by `pageable` out of the complete, ordered
    /// list of elements.
    pub fn from_slice_of(all: Vec<T>, pageable: Pageable) -> Self {
        let total_elements = all.len() as u64;
        let offset = usize::try_from(pageable.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(pageable.size).unwrap_or(usize::MAX);

        let content = all.into_iter().skip(offset).take(size).collect();

        Self {
            content,
            number: pageable.page,
            size: pageable.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.content
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slicing() {
        let all: Vec<u32> = (0..25).collect();

        let page = Page::from_slice_of(all.clone(), Pageable::new(1, 10));
        assert_eq!(page.as_slice(), &(10..20).collect::<Vec<_>>()[..]);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages(), 3);

        let last = Page::from_slice_of(all.clone(), Pageable::new(2, 10));
        assert_eq!(last.as_slice(), &[20, 21, 22, 23, 24]);

        let past_end = Page::from_slice_of(all, Pageable::new(9, 10));
        assert!(past_end.is_empty());
        assert_eq!(past_end.total_elements, 25);
    }

    #[test]
    fn test_zero_sized_page() {
        let page = Page::from_slice_of(vec![1, 2, 3], Pageable::new(0, 0));
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_pageable_defaults() {
        let p: Pageable = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Pageable::default());
        assert_eq!(p.size, 100);

        let p: Pageable = serde_json::from_str(r#"{"page":3,"size":20}"#).unwrap();
        assert_eq!(p.offset(), 60);
    }
}
