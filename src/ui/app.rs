//! Application state machine for the bookstore browser. This file records not
//! just *what* each UI state does but also *why* the interactions behave the
//! way they do. Every key press funnels through the active `Mode`, which
//! returns the next mode to run; the `Screen` tracks the one-way journey from
//! the loading state into either the browse view or the terminal
//! load-failure view.

use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::api::{CatalogFetch, FetchPoll};
use crate::catalog::Category;
use crate::chat::{ChatLog, Sender};
use crate::models::Book;
use crate::pricing::{PriceTag, INR_RATE};
use crate::session::Session;

use super::helpers::{bottom_right_rect, centered_rect};
use super::screens::{BrowseScreen, CartView, CategoryPicker, ChatInput};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per book card in the browse list.
const BOOK_CARD_HEIGHT: u16 = 6;

/// High-level navigation states. The session starts in `Loading` and moves
/// exactly once: to `Browse` when the catalog fetch reports success, or to
/// `LoadFailed` when it reports failure. There is no way back and no retry.
enum Screen {
    Loading,
    Browse(BrowseScreen),
    LoadFailed(String),
}

/// Fine-grained modes layered over the current screen. Interactions borrow
/// from modal flows (Normal vs. overlay vs. confirmation) so the keyboard
/// model stays predictable.
enum Mode {
    Normal,
    /// Search mode: typing updates the query and filters the visible list.
    Searching(SearchState),
    PickingCategory(CategoryPicker),
    ViewingCart(CartView),
    ConfirmCheckout,
    ShowingTerms,
    ShowingAbout,
    Chatting(ChatInput),
}

/// State for an active inline search. `query` is the current text shown in
/// the search bar.
struct SearchState {
    query: String,
}

/// Status line surfaced in the footer until the next interaction replaces or
/// clears it.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    /// Convert the status kind to a Ratatui style.
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The struct combines the
/// catalog journey, the session-scoped selections, the chat transcript, and
/// the active mode.
pub struct App {
    /// In-flight catalog fetch. Consumed (set to `None`) once the worker
    /// reports, so the channel is polled only while it can still deliver.
    fetch: Option<CatalogFetch>,
    /// Active high-level screen.
    screen: Screen,
    /// Current interaction mode for that screen.
    mode: Mode,
    /// Favorites and cart. Lives exactly as long as the app.
    session: Session,
    /// Chat transcript. Persists across open/close of the chat panel.
    chat: ChatLog,
    /// Optional status line surfaced in the footer.
    status: Option<StatusMessage>,
}

impl App {
    /// Construct the app in its loading state, holding the handle to the
    /// already-started catalog fetch.
    pub fn new(fetch: CatalogFetch) -> Self {
        Self {
            fetch: Some(fetch),
            screen: Screen::Loading,
            mode: Mode::Normal,
            session: Session::new(),
            chat: ChatLog::new(),
            status: None,
        }
    }

    /// Drain the fetch channel once per event-loop tick. The transition out
    /// of `Loading` happens here and nowhere else.
    pub(crate) fn poll_catalog(&mut self) {
        if !matches!(self.screen, Screen::Loading) {
            return;
        }
        let Some(fetch) = &self.fetch else {
            return;
        };
        match fetch.poll() {
            FetchPoll::Pending => {}
            FetchPoll::Ready(Ok(books)) => {
                self.fetch = None;
                self.set_status(
                    format!("Loaded {} new releases.", books.len()),
                    StatusKind::Info,
                );
                self.screen = Screen::Browse(BrowseScreen::new(books));
            }
            FetchPoll::Ready(Err(err)) => {
                self.fetch = None;
                self.screen = Screen::LoadFailed(err.to_string());
            }
        }
    }

    /// Top-level key dispatcher. The design funnels every key through the
    /// active `Mode`, which returns the next mode to run. The boolean result
    /// tells the outer loop whether the user requested an exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
            Mode::PickingCategory(picker) => self.handle_pick_category(code, picker),
            Mode::ViewingCart(view) => self.handle_view_cart(code, view),
            Mode::ConfirmCheckout => self.handle_confirm_checkout(code),
            Mode::ShowingTerms => Self::handle_info_modal(code, Mode::ShowingTerms),
            Mode::ShowingAbout => Self::handle_info_modal(code, Mode::ShowingAbout),
            Mode::Chatting(input) => self.handle_chat(code, input),
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Handle keys while in `Mode::Normal`. This branch performs most of the
    /// navigation work and returns the next mode the application should
    /// switch to.
    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            // Before the fetch resolves (and after it fails) the only
            // meaningful action is quitting.
            Screen::Loading | Screen::LoadFailed(_) => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    *exit = true;
                }
                Ok(Mode::Normal)
            }
            Screen::Browse(ref mut browse) => {
                let mut status_to_set: Option<(String, StatusKind)> = None;

                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => browse.move_selection(-1),
                    KeyCode::Down => browse.move_selection(1),
                    KeyCode::PageUp => browse.move_selection(-5),
                    KeyCode::PageDown => browse.move_selection(5),
                    KeyCode::Home => browse.select_first(),
                    KeyCode::End => browse.select_last(),
                    KeyCode::Char('f') => {
                        return Ok(Mode::Searching(SearchState {
                            query: String::new(),
                        }));
                    }
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        return Ok(Mode::PickingCategory(CategoryPicker::new(
                            browse.filter.category,
                        )));
                    }
                    KeyCode::Char('b') | KeyCode::Char('B') => {
                        return Ok(Mode::ViewingCart(CartView::new()));
                    }
                    KeyCode::Char('t') | KeyCode::Char('T') => return Ok(Mode::ShowingTerms),
                    KeyCode::Char('i') | KeyCode::Char('I') => return Ok(Mode::ShowingAbout),
                    KeyCode::Char('m') | KeyCode::Char('M') => {
                        return Ok(Mode::Chatting(ChatInput::default()));
                    }
                    KeyCode::Char(' ') => {
                        if let Some(book) = browse.current_book().cloned() {
                            let now_favorite = self.session.toggle_favorite(&book.isbn13);
                            // Un-favoriting a book while the favorites-only
                            // view is active removes it from the list.
                            if browse.favorites_only {
                                browse.apply_filter(&self.session);
                            }
                            let message = if now_favorite {
                                format!("Added '{}' to favorites.", book.title)
                            } else {
                                format!("Removed '{}' from favorites.", book.title)
                            };
                            status_to_set = Some((message, StatusKind::Info));
                        } else {
                            status_to_set =
                                Some(("No book selected.".to_string(), StatusKind::Error));
                        }
                    }
                    KeyCode::Char('a') | KeyCode::Char('A') => {
                        if let Some(book) = browse.current_book().cloned() {
                            self.session.add_to_cart(book.clone());
                            let count = self.session.cart().len();
                            let noun = if count == 1 { "item" } else { "items" };
                            status_to_set = Some((
                                format!("Added '{}' to cart ({count} {noun}).", book.title),
                                StatusKind::Info,
                            ));
                        } else {
                            status_to_set =
                                Some(("No book selected.".to_string(), StatusKind::Error));
                        }
                    }
                    KeyCode::Char('v') | KeyCode::Char('V') => {
                        let active = browse.toggle_favorites_only(&self.session);
                        let message = if active {
                            "Showing favorite books only.".to_string()
                        } else {
                            "Showing all books.".to_string()
                        };
                        status_to_set = Some((message, StatusKind::Info));
                    }
                    KeyCode::Enter => {
                        if let Some(book) = browse.current_book().cloned() {
                            status_to_set = Some(open_store_page(&book));
                        }
                    }
                    _ => {}
                }

                if let Some((text, kind)) = status_to_set {
                    self.set_status(text, kind);
                }

                Ok(Mode::Normal)
            }
        }
    }

    /// Handle keys while an inline search is active. The search overlays the
    /// browse list and updates the filter as the user types. Esc clears the
    /// filter and exits the search, while navigation and Enter retain the
    /// normal browse behavior against the filtered results.
    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        // Search only exists on top of the browse screen; otherwise abort.
        let browse = match &mut self.screen {
            Screen::Browse(b) => b,
            _ => return Ok(Mode::Normal),
        };

        match code {
            KeyCode::Esc => {
                browse.set_search(None, &self.session);
                return Ok(Mode::Normal);
            }
            KeyCode::Up => {
                browse.move_selection(-1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Down => {
                browse.move_selection(1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::PageUp => {
                browse.move_selection(-5);
                return Ok(Mode::Searching(state));
            }
            KeyCode::PageDown => {
                browse.move_selection(5);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Home => {
                browse.select_first();
                return Ok(Mode::Searching(state));
            }
            KeyCode::End => {
                browse.select_last();
                return Ok(Mode::Searching(state));
            }
            KeyCode::Enter => {
                if let Some(book) = browse.current_book().cloned() {
                    let (text, kind) = open_store_page(&book);
                    self.set_status(text, kind);
                }
                return Ok(Mode::Searching(state));
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
            }
            _ => {}
        }

        if state.query.trim().is_empty() {
            browse.set_search(None, &self.session);
        } else {
            browse.set_search(Some(state.query.clone()), &self.session);
        }

        Ok(Mode::Searching(state))
    }

    /// Keyboard handler for the category popup. Enter applies the highlighted
    /// category to the browse filter; Esc keeps the previous one.
    fn handle_pick_category(&mut self, code: KeyCode, mut picker: CategoryPicker) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Up => {
                picker.move_selection(-1);
                Mode::PickingCategory(picker)
            }
            KeyCode::Down => {
                picker.move_selection(1);
                Mode::PickingCategory(picker)
            }
            KeyCode::Home => {
                picker.move_selection(-(Category::ALL.len() as isize));
                Mode::PickingCategory(picker)
            }
            KeyCode::End => {
                picker.move_selection(Category::ALL.len() as isize);
                Mode::PickingCategory(picker)
            }
            KeyCode::Enter => {
                let category = picker.current();
                if let Screen::Browse(browse) = &mut self.screen {
                    browse.set_category(category, &self.session);
                }
                self.set_status(
                    format!("Category: {}.", category.label()),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            _ => Mode::PickingCategory(picker),
        }
    }

    /// Cart modal handler. Enter moves on to the checkout confirmation as
    /// long as there is something to buy.
    fn handle_view_cart(&mut self, code: KeyCode, mut view: CartView) -> Mode {
        let line_count = self.session.cart().len();
        match code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                self.clear_status();
                Mode::Normal
            }
            KeyCode::Up => {
                view.scroll_by(-1, line_count);
                Mode::ViewingCart(view)
            }
            KeyCode::Down => {
                view.scroll_by(1, line_count);
                Mode::ViewingCart(view)
            }
            KeyCode::PageUp => {
                view.scroll_by(-5, line_count);
                Mode::ViewingCart(view)
            }
            KeyCode::PageDown => {
                view.scroll_by(5, line_count);
                Mode::ViewingCart(view)
            }
            KeyCode::Enter => {
                if self.session.cart().is_empty() {
                    self.set_status("Your cart is empty.", StatusKind::Error);
                    Mode::ViewingCart(view)
                } else {
                    Mode::ConfirmCheckout
                }
            }
            _ => Mode::ViewingCart(view),
        }
    }

    /// Confirmation dialog for the mock purchase. Confirming clears the cart;
    /// nothing else in the session is touched.
    fn handle_confirm_checkout(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Checkout cancelled.", StatusKind::Info);
                Mode::ViewingCart(CartView::new())
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let count = self.session.cart().len();
                let noun = if count == 1 { "item" } else { "items" };
                self.session.clear_cart();
                self.set_status(
                    format!("Purchase complete. {count} {noun} cleared from the cart."),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            _ => Mode::ConfirmCheckout,
        }
    }

    /// Shared handler for the static terms/about modals.
    fn handle_info_modal(code: KeyCode, keep: Mode) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Mode::Normal,
            _ => keep,
        }
    }

    /// Chat panel handler. The transcript lives on the app, so closing the
    /// panel only discards the half-typed input line.
    fn handle_chat(&mut self, code: KeyCode, mut input: ChatInput) -> Mode {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                Mode::Normal
            }
            KeyCode::Enter => {
                if self.chat.send(&input.input) {
                    input.input.clear();
                }
                Mode::Chatting(input)
            }
            KeyCode::Backspace => {
                input.backspace();
                Mode::Chatting(input)
            }
            KeyCode::Char(ch) => {
                input.push_char(ch);
                Mode::Chatting(input)
            }
            _ => Mode::Chatting(input),
        }
    }

    /// Main render routine invoked each tick by Ratatui. Splits the frame
    /// into content and footer regions and dispatches to the active screen,
    /// then layers the active mode's overlay on top.
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Loading => self.draw_loading(frame, content_area),
            Screen::Browse(browse) => self.draw_browse(frame, content_area, browse),
            Screen::LoadFailed(message) => self.draw_load_failed(frame, content_area, message),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::PickingCategory(picker) => self.draw_category_picker(frame, area, picker),
            Mode::ViewingCart(view) => self.draw_cart(frame, area, view),
            Mode::ConfirmCheckout => self.draw_confirm_checkout(frame, area),
            Mode::ShowingTerms => self.draw_terms(frame, area),
            Mode::ShowingAbout => self.draw_about(frame, area),
            Mode::Chatting(input) => self.draw_chat(frame, area, input),
            Mode::Normal => {}
        }
    }

    /// Render the waiting state shown until the catalog fetch reports.
    fn draw_loading(&self, frame: &mut Frame, area: Rect) {
        let message = Paragraph::new("Fetching new releases from itbook.store...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Loading"));
        frame.render_widget(message, area);
    }

    /// Render the terminal failure state. The fetch is never retried, so the
    /// only remaining action is quitting.
    fn draw_load_failed(&self, frame: &mut Frame, area: Rect, message: &str) {
        let lines = vec![
            Line::from(Span::styled(
                "Could not load the catalog.",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Q to exit.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Load Failed"));
        frame.render_widget(paragraph, area);
    }

    /// Render the browse view: a header summarizing the filter and session
    /// counters, followed by the scrolling book cards.
    fn draw_browse(&self, frame: &mut Frame, area: Rect, browse: &BrowseScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let mut summary = vec![
            Span::raw(format!("Category: {}", browse.filter.category.label())),
            Span::raw(format!(
                "   Cart: {}   Favorites: {}",
                self.session.cart().len(),
                self.session.favorite_count()
            )),
        ];
        if browse.has_search() {
            summary.push(Span::raw(format!(
                "   Search: {}",
                browse.filter.search_term
            )));
        }
        if browse.favorites_only {
            summary.push(Span::styled(
                "   Favorites only",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    "New IT Books",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  •  {} of {} shown",
                    browse.visible.len(),
                    browse.books.len()
                )),
            ]),
            Line::from(summary),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("IT Bookstore"));
        frame.render_widget(header, chunks[0]);

        if browse.books.is_empty() {
            let message = Paragraph::new("The catalog came back empty.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        if browse.visible.is_empty() {
            let message_text = if browse.favorites_only && browse.has_search() {
                "No favorite books match the current search."
            } else if browse.favorites_only {
                "No favorites yet. Press Space on a book to add one."
            } else if browse.has_search() {
                "No books match the current search."
            } else {
                "No books in this category."
            };
            let message = Paragraph::new(message_text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        self.render_book_cards(frame, chunks[1], &browse.visible, browse.selected);
    }

    /// Helper displaying the scrollable list of book cards. The window starts
    /// at whatever offset keeps the selected card visible.
    fn render_book_cards(&self, frame: &mut Frame, area: Rect, books: &[Book], selected: usize) {
        if books.is_empty() || area.height == 0 {
            return;
        }

        let card_height = BOOK_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = books.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = (start + capacity).min(len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(BOOK_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            if chunk.height == 0 {
                continue;
            }

            let book_index = start + idx;
            if book_index >= len {
                break;
            }

            let book = &books[book_index];
            let mut block = Block::default().borders(Borders::ALL);
            let mut paragraph_style = Style::default();
            if book_index == selected {
                block = block.style(Style::default().fg(Color::Yellow));
                paragraph_style = Style::default().fg(Color::Yellow);
            }

            let mut lines = Vec::new();
            let title = if book_index == selected {
                format!("▶ {}", book.title)
            } else {
                book.title.clone()
            };
            lines.push(Line::from(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )));

            if !book.subtitle.trim().is_empty() {
                lines.push(Line::from(Span::styled(
                    book.subtitle.trim().to_string(),
                    Style::default().fg(Color::Gray),
                )));
            }

            let tag = PriceTag::from_source(&book.price);
            lines.push(Line::from(Span::styled(
                format!("{}  •  {}  •  {}", tag.inr, tag.usd, tag.eur),
                Style::default().fg(Color::Green),
            )));

            if self.session.is_favorite(&book.isbn13) {
                lines.push(Line::from(Span::styled(
                    "♥ Favorite",
                    Style::default().fg(Color::Magenta),
                )));
            }

            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Left)
                .style(paragraph_style);

            frame.render_widget(paragraph, *chunk);
        }
    }

    /// Draw a small search bar at the top of the provided `area` showing the
    /// current query and placing the cursor at the end of the typed text.
    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    /// Render the category selection popup.
    fn draw_category_picker(&self, frame: &mut Frame, area: Rect, picker: &CategoryPicker) {
        let popup_area = centered_rect(40, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Select Category")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let applied = match &self.screen {
            Screen::Browse(browse) => browse.filter.category,
            _ => Category::All,
        };

        let items: Vec<ListItem> = Category::ALL
            .iter()
            .map(|category| {
                if *category == applied {
                    ListItem::new(format!("{} (current)", category.label()))
                } else {
                    ListItem::new(category.label())
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::NONE))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(picker.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    /// Render the cart modal with per-entry prices and the rupee total.
    fn draw_cart(&self, frame: &mut Frame, area: Rect, view: &CartView) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let cart = self.session.cart();
        let noun = if cart.len() == 1 { "item" } else { "items" };
        let block = Block::default()
            .title(format!("Checkout ({} {noun})", cart.len()))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        if cart.is_empty() {
            let lines = vec![
                Line::from("Your cart is empty."),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to close.",
                    Style::default().fg(Color::Gray),
                )),
            ];
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, inner);
            return;
        }

        let mut lines: Vec<Line> = cart
            .iter()
            .map(|book| {
                let tag = PriceTag::from_source(&book.price);
                Line::from(format!("{} - {} / {}", book.display_title(), tag.inr, tag.usd))
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Total: ₹{:.2}", self.session.cart_total(INR_RATE)),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "This is a mock checkout - no real payment will be processed.",
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            "Enter to complete purchase • Esc to close",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((view.scroll, 0));
        frame.render_widget(paragraph, inner);
    }

    /// Render the purchase confirmation popup.
    fn draw_confirm_checkout(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Complete Purchase")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let count = self.session.cart().len();
        let noun = if count == 1 { "item" } else { "items" };
        let lines = vec![
            Line::from(format!(
                "Complete the purchase of {count} {noun} for ₹{:.2}?",
                self.session.cart_total(INR_RATE)
            )),
            Line::from("The cart is emptied; no real payment is processed."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    /// Render the static terms modal.
    fn draw_terms(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Terms & Conditions")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from("All purchases are subject to availability and ITBookStore policies."),
            Line::from("Prices and book availability may change without prior notice."),
            Line::from("Favorites and cart live only for this session and are gone after exit."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to close.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    /// Render the static about modal.
    fn draw_about(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("About Us").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(
                "Welcome to the IT Book Store! We provide the latest and most popular IT books \
                 to help you learn and grow in the tech industry.",
            ),
            Line::from(""),
            Line::from(
                "Our goal is to make tech education accessible, enjoyable, and up-to-date with \
                 the fast-paced world of information technology.",
            ),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to close.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    /// Render the chat panel docked to the bottom-right corner, transcript on
    /// top and the input line underneath.
    fn draw_chat(&self, frame: &mut Frame, area: Rect, input: &ChatInput) {
        let popup_area = bottom_right_rect(44, 16, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Chatbot").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);
        if inner.height < 2 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        // Show the tail of the transcript that fits the panel.
        let capacity = chunks[0].height as usize;
        let messages = self.chat.messages();
        let start = messages.len().saturating_sub(capacity);
        let lines: Vec<Line> = messages[start..]
            .iter()
            .map(|message| match message.sender {
                Sender::User => Line::from(vec![
                    Span::styled("You: ", Style::default().fg(Color::Green)),
                    Span::raw(message.text.clone()),
                ]),
                Sender::Bot => Line::from(vec![
                    Span::styled("Bot: ", Style::default().fg(Color::Magenta)),
                    Span::raw(message.text.clone()),
                ]),
            })
            .collect();
        let transcript = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(transcript, chunks[0]);

        let prompt = Paragraph::new(Span::raw(format!("> {}", input.input)));
        frame.render_widget(prompt, chunks[1]);
        let cursor_x = chunks[1].x + 2 + input.input.chars().count() as u16;
        frame.set_cursor_position((cursor_x, chunks[1].y));
    }

    /// Render the footer that hosts transient status messages and the current
    /// set of keyboard shortcuts.
    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    /// Build the instruction line based on the active screen/mode. Keeping
    /// this logic centralized avoids duplication inside `draw_footer`.
    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::Searching(_)) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open Page   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Done"),
            ]),
            (_, Mode::PickingCategory(_)) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::ViewingCart(_)) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Complete Purchase   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
            (_, Mode::ConfirmCheckout) => Line::from(vec![
                Span::styled("[y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[n/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::ShowingTerms) | (_, Mode::ShowingAbout) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
            (_, Mode::Chatting(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Send   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
            (Screen::Browse(_), _) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open Page   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Favorite   "),
                Span::styled("[a]", key_style),
                Span::raw(" Add to Cart   "),
                Span::styled("[v]", key_style),
                Span::raw(" Favorites   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[c]", key_style),
                Span::raw(" Category   "),
                Span::styled("[b]", key_style),
                Span::raw(" Checkout   "),
                Span::styled("[t]", key_style),
                Span::raw(" Terms   "),
                Span::styled("[i]", key_style),
                Span::raw(" About   "),
                Span::styled("[m]", key_style),
                Span::raw(" Chat   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    /// Set a status message that will appear in the footer on the next draw
    /// call.
    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    /// Clear any existing status from the footer.
    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Open the book's store page in the system browser, phrasing the outcome as
/// a status line. Shared by the normal and search-mode Enter handlers.
fn open_store_page(book: &Book) -> (String, StatusKind) {
    let link = book.url.trim();
    if link.is_empty() {
        (
            "This book does not have a store page.".to_string(),
            StatusKind::Error,
        )
    } else if let Err(err) = open_link(link) {
        (
            format!("Failed to open store page: {err}"),
            StatusKind::Error,
        )
    } else {
        (format!("Opened {}.", book.title), StatusKind::Info)
    }
}
