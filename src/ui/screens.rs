use crate::catalog::{visible_books, Category, FilterState};
use crate::models::Book;
use crate::session::Session;

/// Backing state for the browse view: the full catalog plus the currently
/// visible subset derived from the filter state and the favorites-only
/// toggle. The catalog is never mutated; every refresh recomputes `visible`
/// from scratch.
pub(crate) struct BrowseScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) visible: Vec<Book>,
    pub(crate) filter: FilterState,
    pub(crate) favorites_only: bool,
    pub(crate) selected: usize,
}

impl BrowseScreen {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        let visible = books.clone();
        Self {
            books,
            visible,
            filter: FilterState::default(),
            favorites_only: false,
            selected: 0,
        }
    }

    /// Recompute the visible list from the catalog. The favorites-only pass
    /// consults the session, which is why it cannot live in the pure filter
    /// engine.
    pub(crate) fn apply_filter(&mut self, session: &Session) {
        let mut visible = visible_books(&self.books, &self.filter);
        if self.favorites_only {
            visible.retain(|book| session.is_favorite(&book.isbn13));
        }
        self.visible = visible;
        self.ensure_in_bounds();
    }

    pub(crate) fn set_search(&mut self, term: Option<String>, session: &Session) {
        self.filter.search_term = term.unwrap_or_default();
        self.apply_filter(session);
    }

    pub(crate) fn set_category(&mut self, category: Category, session: &Session) {
        self.filter.category = category;
        self.apply_filter(session);
    }

    pub(crate) fn toggle_favorites_only(&mut self, session: &Session) -> bool {
        self.favorites_only = !self.favorites_only;
        self.apply_filter(session);
        self.favorites_only
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.visible.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.selected = self.visible.len() - 1;
        }
    }

    /// Clamp the selection index to a valid book in the visible list.
    fn ensure_in_bounds(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }
    }

    /// True once a search term is actually narrowing the list.
    pub(crate) fn has_search(&self) -> bool {
        !self.filter.search_term.trim().is_empty()
    }
}

/// Popup state for choosing a category from the fixed set.
pub(crate) struct CategoryPicker {
    pub(crate) selected: usize,
}

impl CategoryPicker {
    /// Open the picker with the active category preselected.
    pub(crate) fn new(current: Category) -> Self {
        let selected = Category::ALL
            .iter()
            .position(|category| *category == current)
            .unwrap_or(0);
        Self { selected }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = Category::ALL.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn current(&self) -> Category {
        Category::ALL[self.selected]
    }
}

/// Scroll state for the cart modal. The entry list itself lives on the
/// session; this only remembers how far the user has scrolled.
pub(crate) struct CartView {
    pub(crate) scroll: u16,
}

impl CartView {
    pub(crate) fn new() -> Self {
        Self { scroll: 0 }
    }

    pub(crate) fn scroll_by(&mut self, delta: isize, line_count: usize) {
        let max = line_count.saturating_sub(1) as isize;
        let new = (self.scroll as isize + delta).clamp(0, max);
        self.scroll = new as u16;
    }
}

/// Input line state for the chat panel. The transcript persists on the app
/// for the whole session; only the half-typed message lives here.
#[derive(Default)]
pub(crate) struct ChatInput {
    pub(crate) input: String,
}

impl ChatInput {
    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.input.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }
}
