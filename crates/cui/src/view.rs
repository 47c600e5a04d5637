use crate::app::{format_card, App, FocusPane};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use wildpile_core::{Card, Outcome, GRID_SLOTS, HAND_SLOTS};

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Length(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(root[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(7)])
        .split(middle[1]);

    draw_grid(frame, middle[0], app);
    draw_draw_pile(frame, right[0], app);
    draw_hand(frame, right[1], app);
    draw_events(frame, root[2], app);

    if app.outcome_message().is_some() {
        draw_outcome_popup(frame, app);
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "Wildpile | Focus: {} | Hint: {}",
        app.focus_label(app.focus),
        app.next_hint()
    );
    let summary = format!(
        "Deck {}  Seed {}  Outcome {}",
        app.game.deck_len(),
        app.game.seed(),
        outcome_label(app.game.outcome())
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(summary),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_grid(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem<'_>> = (0..GRID_SLOTS)
        .map(|idx| card_item(app.grid_label(idx), app.game.grid()[idx]))
        .collect();
    let block = pane_block("Piles (0-9)", app.focus == FocusPane::Grid);
    let mut state = ListState::default();
    state.select(Some(app.grid_cursor.min(GRID_SLOTS - 1)));
    frame.render_stateful_widget(slot_list(items, block), area, &mut state);
}

fn draw_hand(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem<'_>> = (0..HAND_SLOTS)
        .map(|idx| card_item(app.hand_label(idx), app.game.hand()[idx]))
        .collect();
    let block = pane_block("Hand (F1-F5)", app.focus == FocusPane::Hand);
    let mut state = ListState::default();
    state.select(Some(app.hand_cursor.min(HAND_SLOTS - 1)));
    frame.render_stateful_widget(slot_list(items, block), area, &mut state);
}

fn draw_draw_pile(frame: &mut Frame, area: Rect, app: &App) {
    let current = match app.game.current() {
        Some(card) => Line::from(format_card(&card))
            .style(card_style(&card).add_modifier(Modifier::BOLD)),
        None => Line::from("Draw (d)"),
    };
    let lines = vec![
        Line::from(format!("Deck: {}", app.game.deck_len())),
        current,
    ];
    let block = Block::default().borders(Borders::ALL).title("Current");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_outcome_popup(frame: &mut Frame, app: &App) {
    let Some((title, text)) = app.outcome_message() else {
        return;
    };
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);
    let color = if app.game.outcome() == Outcome::Won {
        Color::Green
    } else {
        Color::Red
    };
    let lines = vec![
        Line::from(text),
        Line::from(""),
        Line::from("Enter / r  play again"),
    ];
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("q quit | ? help | tab switch piles/hand | arrows/jk move"),
        Line::from("d draw | r/n new game"),
        Line::from("enter/space use the slot under the cursor"),
        Line::from("0-9 use a pile directly | F1-F5 use a hand slot directly"),
        Line::from("A drawn card goes onto a pile or into an empty hand slot."),
        Line::from("Select a hand card or pile, then pick the pile to move it to."),
        Line::from("Ranks must be one apart (K and A wrap). FREE matches anything."),
        Line::from("Win by placing every card; lose with a full hand and a stuck card."),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn card_item(label: String, card: Option<Card>) -> ListItem<'static> {
    match card {
        Some(card) => ListItem::new(label).style(card_style(&card)),
        None => ListItem::new(label).style(Style::default().fg(Color::DarkGray)),
    }
}

fn card_style(card: &Card) -> Style {
    if card.is_wild() {
        Style::default().fg(Color::Magenta)
    } else if card.suit.is_red() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

fn slot_list<'a>(items: Vec<ListItem<'a>>, block: Block<'a>) -> List<'a> {
    List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ")
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::InProgress => "in progress",
        Outcome::Won => "won",
        Outcome::Lost => "lost",
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
