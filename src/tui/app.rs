use chrono::{Local, NaiveDate, TimeDelta};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::board::BirthdayBoard;
use crate::domain::{BirthEntry, DateSelection};
use crate::tui::calendar::shift_months;
use crate::tui::event::FetchSettled;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Calendar,
    Births,
    Favourites,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Calendar => ActivePane::Births,
            ActivePane::Births => ActivePane::Favourites,
            ActivePane::Favourites => ActivePane::Calendar,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActivePane::Calendar => ActivePane::Favourites,
            ActivePane::Births => ActivePane::Calendar,
            ActivePane::Favourites => ActivePane::Births,
        }
    }
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub board: BirthdayBoard,
    pub today: NaiveDate,
    /// Day under the calendar cursor
    pub cursor: NaiveDate,
    /// Day most recently sent to the board
    pub picked: Option<NaiveDate>,
    pub birth_index: usize,
    pub birth_list_state: ListState,
    pub favourites_scroll: u16,
    pub editing_search: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(board: BirthdayBoard) -> Self {
        Self::starting_at(board, Local::now().date_naive())
    }

    pub fn starting_at(board: BirthdayBoard, today: NaiveDate) -> Self {
        let mut birth_list_state = ListState::default();
        birth_list_state.select(Some(0));

        Self {
            active_pane: ActivePane::Calendar,
            board,
            today,
            cursor: today,
            picked: None,
            birth_index: 0,
            birth_list_state,
            favourites_scroll: 0,
            editing_search: false,
            should_quit: false,
            status_message: None,
        }
    }

    /// Selection event for the day under the cursor.
    pub fn pick_cursor(&mut self) -> DateSelection {
        self.picked = Some(self.cursor);
        self.birth_index = 0;
        self.birth_list_state.select(Some(0));
        DateSelection::from_date(self.cursor)
    }

    pub fn apply_settled(&mut self, settled: FetchSettled) {
        if self.board.settle(settled.generation, settled.result) {
            self.birth_index = 0;
            self.clamp_birth_index();
        }
    }

    pub fn visible_count(&self) -> usize {
        self.board.filtered_entries().len()
    }

    pub fn selected_entry(&self) -> Option<BirthEntry> {
        self.board
            .filtered_entries()
            .get(self.birth_index)
            .map(|entry| (*entry).clone())
    }

    pub fn toggle_selected_favourite(&mut self) -> Option<bool> {
        let entry = self.selected_entry()?;
        let favourite = self.board.toggle_favourite(&entry);
        self.favourites_scroll = self.favourites_scroll.min(self.max_favourites_scroll());
        Some(favourite)
    }

    /// Last line of the favourites pane that may sit at the top.
    fn max_favourites_scroll(&self) -> u16 {
        let lines = self.board.grouped_favourites().line_count();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub fn clamp_birth_index(&mut self) {
        let count = self.visible_count();
        if self.birth_index >= count {
            self.birth_index = count.saturating_sub(1);
        }
        self.birth_list_state.select(Some(self.birth_index));
    }

    fn move_cursor(&mut self, days: i64) {
        let moved = TimeDelta::try_days(days).and_then(|d| self.cursor.checked_add_signed(d));
        if let Some(moved) = moved {
            self.cursor = moved;
        }
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Calendar => self.move_cursor(-7),
            ActivePane::Births => {
                if self.birth_index > 0 {
                    self.birth_index -= 1;
                    self.birth_list_state.select(Some(self.birth_index));
                }
            }
            ActivePane::Favourites => {
                self.favourites_scroll = self.favourites_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Calendar => self.move_cursor(7),
            ActivePane::Births => {
                if self.birth_index + 1 < self.visible_count() {
                    self.birth_index += 1;
                    self.birth_list_state.select(Some(self.birth_index));
                }
            }
            ActivePane::Favourites => {
                if self.favourites_scroll < self.max_favourites_scroll() {
                    self.favourites_scroll += 1;
                }
            }
        }
    }

    pub fn move_left(&mut self) {
        if self.active_pane == ActivePane::Calendar {
            self.move_cursor(-1);
        }
    }

    pub fn move_right(&mut self) {
        if self.active_pane == ActivePane::Calendar {
            self.move_cursor(1);
        }
    }

    pub fn shift_month(&mut self, months: i32) {
        self.cursor = shift_months(self.cursor, months);
    }

    pub fn jump_to_today(&mut self) {
        self.cursor = self.today;
    }

    /// Enter search editing. Refused until births are loaded.
    pub fn start_search(&mut self) -> bool {
        self.editing_search = self.board.is_search_enabled();
        self.editing_search
    }

    /// Feed a key to the search line while editing.
    pub fn handle_search_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.editing_search = false,
            KeyCode::Backspace => self.board.pop_search_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.board.push_search_char(c)
            }
            _ => {}
        }
        self.clamp_birth_index();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BirthPayload;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loaded_app() -> TuiApp {
        let mut app = TuiApp::starting_at(BirthdayBoard::new(), ymd(2024, 12, 10));
        let selection = app.pick_cursor();
        let request = app.board.select_date(selection).unwrap();
        app.apply_settled(FetchSettled {
            generation: request.generation,
            result: Ok(BirthPayload::new(vec![
                BirthEntry::new("Ada Lovelace"),
                BirthEntry::new("Emily Dickinson"),
                BirthEntry::new("Alan Turing"),
            ])),
        });
        app.active_pane = ActivePane::Births;
        app
    }

    #[test]
    fn test_pane_cycle() {
        assert_eq!(ActivePane::Calendar.next(), ActivePane::Births);
        assert_eq!(ActivePane::Favourites.next(), ActivePane::Calendar);
        assert_eq!(ActivePane::Calendar.prev(), ActivePane::Favourites);
    }

    #[test]
    fn test_calendar_cursor_moves() {
        let mut app = TuiApp::starting_at(BirthdayBoard::new(), ymd(2024, 12, 31));
        app.move_right();
        assert_eq!(app.cursor, ymd(2025, 1, 1));
        app.move_up();
        assert_eq!(app.cursor, ymd(2024, 12, 25));
        app.shift_month(-1);
        assert_eq!(app.cursor, ymd(2024, 11, 25));
        app.jump_to_today();
        assert_eq!(app.cursor, ymd(2024, 12, 31));
    }

    #[test]
    fn test_pick_cursor_builds_selection() {
        let mut app = TuiApp::starting_at(BirthdayBoard::new(), ymd(2024, 1, 5));
        let selection = app.pick_cursor();
        assert_eq!(selection, DateSelection::new(2024, 0, 5));
        assert_eq!(app.picked, Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_search_refused_before_load() {
        let mut app = TuiApp::starting_at(BirthdayBoard::new(), ymd(2024, 1, 5));
        assert!(!app.start_search());
        assert!(!app.editing_search);
    }

    #[test]
    fn test_search_editing_filters_and_clamps() {
        let mut app = loaded_app();
        app.move_down();
        app.move_down();
        assert_eq!(app.birth_index, 2);

        assert!(app.start_search());
        for c in "ada".chars() {
            app.handle_search_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        assert_eq!(app.board.search_query(), "ada");
        assert_eq!(app.visible_count(), 1);
        assert_eq!(app.birth_index, 0);

        app.handle_search_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.board.search_query(), "ad");

        app.handle_search_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!app.editing_search);
    }

    #[test]
    fn test_toggle_selected_favourite() {
        let mut app = loaded_app();
        app.move_down();

        assert_eq!(app.toggle_selected_favourite(), Some(true));
        assert_eq!(app.board.favourites()[0].text, "Emily Dickinson");
        assert!(app.selected_entry().unwrap().is_favourite);

        assert_eq!(app.toggle_selected_favourite(), Some(false));
        assert!(app.board.favourites().is_empty());
    }

    #[test]
    fn test_favourites_scroll_stops_at_last_line() {
        let mut app = loaded_app();
        app.toggle_selected_favourite();
        app.move_down();
        app.toggle_selected_favourite();
        // "December 10" heading plus two texts
        app.active_pane = ActivePane::Favourites;
        for _ in 0..10 {
            app.move_down();
        }
        assert_eq!(app.favourites_scroll, 2);

        app.move_up();
        assert_eq!(app.favourites_scroll, 1);
    }

    #[test]
    fn test_favourites_scroll_follows_removal() {
        let mut app = loaded_app();
        app.toggle_selected_favourite();
        app.move_down();
        app.toggle_selected_favourite();
        app.favourites_scroll = 2;

        app.toggle_selected_favourite();
        assert_eq!(app.favourites_scroll, 1);
        app.move_up();
        app.toggle_selected_favourite();
        assert_eq!(app.favourites_scroll, 0);

        app.active_pane = ActivePane::Favourites;
        app.move_down();
        assert_eq!(app.favourites_scroll, 0);
    }

    #[test]
    fn test_toggle_with_nothing_loaded() {
        let mut app = TuiApp::starting_at(BirthdayBoard::new(), ymd(2024, 1, 5));
        assert_eq!(app.toggle_selected_favourite(), None);
    }
}
