//! Page counter for the listing view.
//!
//! The pager owns the current/total counters and the two pieces of display
//! text derived from them. Navigation that moves the counter returns the new
//! page number; the gallery treats that as its page-change event and reloads
//! the listing. Out-of-range moves return `None` and change nothing.

/// Text shown in the pager controls. Rewritten after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerDisplay {
    /// Content of `.info-page`.
    pub current: String,
    /// Content of `.total-pages`.
    pub total: String,
}

#[derive(Debug, Clone)]
pub struct Pager {
    current_page: u32,
    total_pages: u32,
    display: PagerDisplay,
}

impl Pager {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let mut pager = Self {
            current_page,
            total_pages,
            display: PagerDisplay {
                current: String::new(),
                total: String::new(),
            },
        };
        pager.update_display();
        pager
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn display(&self) -> &PagerDisplay {
        &self.display
    }

    /// Record the page count reported by the last listing.
    ///
    /// `current_page` is left alone even if it now exceeds `n`.
    pub fn set_total_pages(&mut self, n: u32) {
        self.total_pages = n;
        self.update_display();
    }

    /// Move to the next page if there is one.
    pub fn advance(&mut self) -> Option<u32> {
        if self.current_page < self.total_pages {
            Some(self.set_current_page(self.current_page + 1))
        } else {
            None
        }
    }

    /// Move to the previous page if there is one.
    pub fn retreat(&mut self) -> Option<u32> {
        if self.current_page > 1 {
            Some(self.set_current_page(self.current_page - 1))
        } else {
            None
        }
    }

    /// Jump back to page 1. Always reports a change, even from page 1.
    pub fn reset_current_page(&mut self) -> u32 {
        self.set_current_page(1)
    }

    fn set_current_page(&mut self, page: u32) -> u32 {
        self.current_page = page;
        self.update_display();
        page
    }

    fn update_display(&mut self) {
        self.display.current = self.current_page.to_string();
        self.display.total = format!("Total pages: {}", self.total_pages);
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
