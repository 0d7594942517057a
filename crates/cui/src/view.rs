use crate::app::{format_values, App, FocusPane, PromptMode, NUMBER_GRID_WIDTH, STAR_GRID_WIDTH};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rulotto_core::{PlayerView, Selection, SelectionStatus};

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(16),
            Constraint::Length(10),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(root[1]);

    let grids = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(6)])
        .split(middle[0]);

    draw_grid(frame, grids[0], app, FocusPane::Numbers);
    draw_grid(frame, grids[1], app, FocusPane::Stars);
    draw_roster(frame, middle[1], app);
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame);
    }
    if app.prompt_mode.is_some() {
        draw_prompt(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "Rulotto CUI | Focus: {} | Hint: {}",
        app.focus_label(app.focus),
        app.next_hint()
    );
    let lobby = match &app.snapshot.draw {
        Some(draw) => format!(
            "players {} | {} spots left | prize {} | draw {} + {}",
            app.snapshot.players.len(),
            app.snapshot.remaining_spots,
            app.snapshot.prize,
            format_values(&draw.numbers),
            format_values(&draw.stars)
        ),
        None => format!(
            "players {} | {} spots left | prize {} | no draw yet",
            app.snapshot.players.len(),
            app.snapshot.remaining_spots,
            app.snapshot.prize
        ),
    };
    let form = format!(
        "form: chosen_numbers={} chosen_stars={}",
        app.slip.numbers.field_value(),
        app.slip.stars.field_value()
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(lobby),
        Line::from(form),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_grid(frame: &mut Frame, area: Rect, app: &App, pane: FocusPane) {
    let (selection, cursor, width, name) = match pane {
        FocusPane::Numbers => (
            &app.slip.numbers,
            app.number_cursor,
            NUMBER_GRID_WIDTH,
            "Numbers",
        ),
        FocusPane::Stars => (&app.slip.stars, app.star_cursor, STAR_GRID_WIDTH, "Stars"),
        FocusPane::Roster | FocusPane::Events => return,
    };
    let focused = app.focus == pane;
    let rule = selection.rule();
    let values: Vec<u8> = (rule.min..=rule.max).collect();
    let mut lines: Vec<Line<'_>> = values
        .chunks(width)
        .map(|row| grid_row(selection, row, cursor, focused))
        .collect();
    if selection.status() == SelectionStatus::Full {
        lines.push(Line::from(Span::styled(
            "Limit reached!",
            Style::default().fg(Color::Red),
        )));
    }
    let title = format!("{name} {}/{}", selection.len(), rule.cap);
    let block = pane_block(&title, focused);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn grid_row(selection: &Selection, row: &[u8], cursor: usize, focused: bool) -> Line<'static> {
    let rule = selection.rule();
    let spans: Vec<Span<'static>> = row
        .iter()
        .map(|&value| {
            let mut style = Style::default();
            if selection.contains(value) {
                style = style
                    .fg(Color::Black)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD);
            } else if !selection.is_enabled(value) {
                style = style.add_modifier(Modifier::DIM);
            }
            if focused && (value - rule.min) as usize == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Span::styled(format!(" {value:>2} "), style)
        })
        .collect();
    Line::from(spans)
}

fn draw_roster(frame: &mut Frame, area: Rect, app: &App) {
    let players = &app.snapshot.players;
    let scored = app.snapshot.draw.is_some();
    let items: Vec<ListItem<'_>> = if players.is_empty() {
        vec![ListItem::new("empty lobby")]
    } else {
        players
            .iter()
            .map(|player| ListItem::new(roster_label(player, scored)))
            .collect()
    };
    let title = format!(
        "Roster {}/{}",
        players.len(),
        players.len() + app.snapshot.remaining_spots
    );
    let block = pane_block(&title, app.focus == FocusPane::Roster);
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !players.is_empty() {
        state.select(Some(app.roster_cursor.min(players.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn roster_label(player: &PlayerView, scored: bool) -> String {
    let mut label = format!(
        "{} [{} + {}]",
        player.name,
        format_values(&player.numbers),
        format_values(&player.stars)
    );
    if scored {
        label.push_str(&format!(" => {:.2}", player.gains));
    }
    label
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
    let block = pane_block("Events", app.focus == FocusPane::Events);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("q quit | ? help | tab focus | arrows/hjkl move"),
        Line::from("space/enter toggle the cell | r random fill | esc clear slip"),
        Line::from("s submit the slip (asks for a name)"),
        Line::from("g generate players | x remove all players"),
        Line::from("d run the draw | m set the prize pool"),
        Line::from("f refresh the lobby from the server"),
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

fn draw_prompt(frame: &mut Frame, app: &App) {
    let Some(mode) = app.prompt_mode else {
        return;
    };
    let area = centered_rect(70, 28, frame.area());
    frame.render_widget(Clear, area);
    let (title, note) = match mode {
        PromptMode::Name => ("Player Name", "The lobby accepts letters and spaces."),
        PromptMode::Generate => ("Generate Players", "How many random players to seat."),
        PromptMode::Prize => ("Prize Pool", "Plain digits, e.g. 3000000."),
    };
    let lines = vec![
        Line::from("Enter=send  Esc=cancel"),
        Line::from(note),
        Line::from(""),
        Line::from(format!("> {}", app.prompt_input)),
    ];
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
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
