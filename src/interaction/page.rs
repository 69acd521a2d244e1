//! Page slicing and navigation state for paginated views.

use crate::error::AppError;

/// Ordered collection split into fixed-size pages.
///
/// Built once from the source collection; the view never re-fetches data,
/// so the items are captured here for the session's lifetime.
pub struct PageSet<T> {
    pages: Vec<Vec<T>>,
}

impl<T> PageSet<T> {
    /// Splits `items` into pages of `per_page` entries.
    ///
    /// Every page except possibly the last holds exactly `per_page` items.
    /// An empty input still produces a single empty page so a view always
    /// has something to render.
    pub fn build(items: Vec<T>, per_page: usize) -> Result<Self, AppError> {
        if per_page == 0 {
            return Err(AppError::InvalidPageSize);
        }

        let mut pages: Vec<Vec<T>> = Vec::new();
        let mut current = Vec::new();
        for item in items {
            current.push(item);
            if current.len() == per_page {
                pages.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() || pages.is_empty() {
            pages.push(current);
        }

        Ok(Self { pages })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> &[T] {
        &self.pages[index]
    }
}

/// Navigation request against a paginated view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    First,
    Previous,
    Next,
    Last,
    Index(usize),
}

/// Current position within a page set.
///
/// Out-of-range requests are rejected, never clamped: a stale click on an
/// edge resolves to `None` and leaves the position untouched.
#[derive(Clone, Copy, Debug)]
pub struct NavState {
    index: usize,
    page_count: usize,
}

impl NavState {
    pub fn new(page_count: usize) -> Self {
        Self {
            index: 0,
            page_count: page_count.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Resolves a navigation request to a concrete index, or `None` when
    /// the request falls outside the page range.
    pub fn resolve(&self, target: NavTarget) -> Option<usize> {
        match target {
            NavTarget::First => Some(0),
            NavTarget::Previous => self.index.checked_sub(1),
            NavTarget::Next => {
                let next = self.index + 1;
                (next < self.page_count).then_some(next)
            }
            NavTarget::Last => Some(self.page_count - 1),
            NavTarget::Index(index) => (index < self.page_count).then_some(index),
        }
    }

    /// Commits an accepted navigation. Callers resolve first, so `index`
    /// is always in range here.
    pub fn set_index(&mut self, index: usize) {
        debug_assert!(index < self.page_count);
        self.index = index;
    }

    pub fn at_first(&self) -> bool {
        self.index == 0
    }

    pub fn at_last(&self) -> bool {
        self.index == self.page_count - 1
    }
}
