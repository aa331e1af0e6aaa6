use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::board::ResultPanel;
use crate::config::ColorConfig;
use crate::tui::app::{ActivePane, TuiApp};
use crate::tui::calendar::{month_grid, WEEKDAY_HEADER};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // Calendar + search
            Constraint::Min(30),    // Births + favourites
        ])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Calendar pane
            Constraint::Length(3),  // Search line
            Constraint::Min(0),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Births pane
            Constraint::Min(5),         // Favourites pane
        ])
        .split(columns[1]);

    render_calendar_pane(frame, app, left[0], colors);
    render_search_line(frame, app, left[1], colors);
    render_births_pane(frame, app, right[0], colors);
    render_favourites_pane(frame, app, right[1], colors);
    render_status_bar(frame, app, rows[1], colors);
}

fn border_style(is_active: bool, colors: &ColorConfig) -> Style {
    if is_active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn highlight_style(is_active: bool, colors: &ColorConfig) -> Style {
    if is_active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    }
}

fn render_calendar_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Calendar;

    let mut lines = vec![Line::from(Span::styled(
        WEEKDAY_HEADER,
        Style::default().fg(colors.weekday_header),
    ))];

    for week in month_grid(app.cursor) {
        let mut spans = Vec::with_capacity(13);
        for (i, cell) in week.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let Some(day) = cell else {
                spans.push(Span::raw("  "));
                continue;
            };
            let date = app.cursor.with_day(*day);
            let style = if date == Some(app.cursor) {
                highlight_style(is_active, colors)
            } else if date.is_some() && date == app.picked {
                Style::default()
                    .fg(colors.selected_day)
                    .add_modifier(Modifier::BOLD)
            } else if date == Some(app.today) {
                Style::default()
                    .fg(colors.today)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("{:>2}", day), style));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .title(format!(" {} ", app.cursor.format("%B %Y")))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_search_line(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let query = app.board.search_query();

    let (content, style) = if !app.board.is_search_enabled() {
        (
            "Select a date first".to_string(),
            Style::default().fg(colors.search_disabled),
        )
    } else if app.editing_search {
        (
            format!("{}_", query),
            Style::default().fg(colors.search_active),
        )
    } else if query.is_empty() {
        (
            "/ to search".to_string(),
            Style::default().fg(colors.search_disabled),
        )
    } else {
        (query.to_string(), Style::default())
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style(app.editing_search, colors));

    frame.render_widget(Paragraph::new(content).style(style).block(block), area);
}

fn render_births_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Births;

    let heading = match app.board.selected_date() {
        Some(date) => format!("Birthdays on {}", date),
        None => "Birthdays".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let items: Vec<ListItem> = match app.board.result_panel() {
        ResultPanel::NoDateSelected => {
            let message = Paragraph::new("Date has not been selected yet")
                .style(Style::default().fg(colors.notice).add_modifier(Modifier::BOLD))
                .block(block.title(format!(" {} ", heading)));
            frame.render_widget(message, area);
            return;
        }
        ResultPanel::Loading => {
            let message =
                Paragraph::new("Loading...").block(block.title(format!(" {} ", heading)));
            frame.render_widget(message, area);
            return;
        }
        ResultPanel::Failed(error) => {
            let message = Paragraph::new(error.to_string())
                .style(Style::default().fg(colors.error))
                .wrap(Wrap { trim: false })
                .block(block.title(format!(" {} ", heading)));
            frame.render_widget(message, area);
            return;
        }
        ResultPanel::Entries(entries) => entries
            .iter()
            .map(|entry| {
                let marker = if entry.is_favourite {
                    Span::styled("★ ", Style::default().fg(colors.favourite_marker))
                } else {
                    Span::raw("☆ ")
                };
                ListItem::new(Line::from(vec![marker, Span::raw(entry.display_text())]))
            })
            .collect(),
    };

    let title = format!(
        " {} ({}) [{}/{}] ",
        heading,
        items.len(),
        (app.birth_index + 1).min(items.len()),
        items.len()
    );

    let list = List::new(items)
        .block(block.title(title))
        .highlight_style(highlight_style(is_active, colors))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.birth_list_state);
}

fn render_favourites_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Favourites;
    let grouped = app.board.grouped_favourites();

    let content = if grouped.is_empty() {
        Text::from(Span::styled(
            "Favourite birthdays list is empty",
            Style::default().fg(colors.notice).add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut lines = Vec::new();
        for (i, group) in grouped.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                group.date.to_string(),
                Style::default()
                    .fg(colors.favourite_date)
                    .add_modifier(Modifier::BOLD),
            )));
            for text in &group.texts {
                lines.push(Line::from(format!("    {}", text)));
            }
        }
        Text::from(lines)
    };

    let block = Block::default()
        .title(format!(" Favourite Birthdays ({}) ", app.board.favourites().len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.favourites_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.editing_search {
        "Type to filter  Backspace:Delete  Enter/Esc:Done".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match app.active_pane {
            ActivePane::Calendar => {
                "hjkl:Move  n/p:Month  t:Today  Enter:Select  /:Search  Tab:Pane  q:Quit"
            }
            ActivePane::Births => "j/k:Nav  f:Favourite  o:Open  /:Search  Tab:Pane  q:Quit",
            ActivePane::Favourites => "j/k:Scroll  Tab:Pane  q:Quit",
        }
        .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
