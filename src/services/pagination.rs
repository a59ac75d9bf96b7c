use std::num::IntErrorKind;

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    /// Missing or non-numeric input falls back to the first page. Numbers too
    /// large to represent stay out of range.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::new(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Self::new(i64::MAX),
                IntErrorKind::NegOverflow => Self::new(i64::MIN),
                _ => Self::default(),
            },
        }
    }

    /// `None` for pages below 1, which can never hold records.
    pub fn window(self) -> Option<PageWindow> {
        if self.0 < 1 {
            return None;
        }
        let offset = (self.0 - 1).checked_mul(QUESTIONS_PER_PAGE)?;
        Some(PageWindow {
            offset,
            limit: QUESTIONS_PER_PAGE,
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

/// OFFSET/LIMIT pair handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Applies the window to an already ordered sequence.
    pub fn slice<T: Clone>(self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let len = usize::try_from(self.limit).unwrap_or(0);
        items.iter().skip(start).take(len).cloned().collect()
    }
}
