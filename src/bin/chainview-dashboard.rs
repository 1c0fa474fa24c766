#![forbid(unsafe_code)]
//! Terminal dashboard for a blockchain node - TUI edition

use chainview::app::{Dashboard, UiEvent};
use chainview::config::load_config;
use chainview::surface::{InteractiveSurface, SurfaceState};
use chainview::view::{TableRow, NO_NODES_MESSAGE};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as TuiBlock, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

const LOG_FILE: &str = "chainview.log";

fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn draw_transactions(f: &mut ratatui::Frame, area: Rect, state: &SurfaceState) {
    let header = Row::new(
        state
            .transactions
            .headers
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    );

    let rows = state.transactions.rows.iter().map(|row| match row {
        TableRow::Data {
            index,
            recipient_address,
            sender_address,
            value,
        } => Row::new(vec![
            Cell::from(index.to_string()),
            Cell::from(recipient_address.clone()).style(Style::default().fg(Color::Green)),
            Cell::from(sender_address.clone()).style(Style::default().fg(Color::Yellow)),
            Cell::from(value.clone()),
        ]),
        // ratatui rows have no colspan; the message goes in the widest column.
        TableRow::Placeholder { message, .. } => Row::new(vec![
            Cell::from(""),
            Cell::from(message.clone()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(""),
            Cell::from(""),
        ]),
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        TuiBlock::default()
            .borders(Borders::ALL)
            .title(" Transactions to be added to the next block "),
    );

    f.render_widget(table, area);
}

fn draw_wallet(f: &mut ratatui::Frame, area: Rect, state: &SurfaceState) {
    let lines: Vec<Line> = match &state.wallet {
        Some(details) => details
            .fields
            .iter()
            .map(|field| {
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", field.label),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        field.value.clone(),
                        if field.full_key {
                            Style::default().fg(Color::White)
                        } else {
                            Style::default().fg(Color::Gray)
                        },
                    ),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "Press 'w' to generate a wallet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let title = state
        .wallet
        .as_ref()
        .map(|d| format!(" {} ", d.heading))
        .unwrap_or_else(|| " Wallet ".to_string());
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(TuiBlock::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn draw_nodes(f: &mut ratatui::Frame, area: Rect, state: &SurfaceState) {
    let lines: Vec<Line> = if state.nodes.is_empty() {
        vec![Line::from(Span::styled(
            NO_NODES_MESSAGE,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state
            .nodes
            .nodes
            .iter()
            .map(|n| Line::from(format!("• {}", n)))
            .collect()
    };
    let paragraph =
        Paragraph::new(lines).block(TuiBlock::default().borders(Borders::ALL).title(" Nodes "));
    f.render_widget(paragraph, area);
}

fn centered(area: Rect, width_pct: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_pct.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    }
}

fn draw_ui(f: &mut ratatui::Frame, surface: &InteractiveSurface, node_url: &str) {
    let state = surface.snapshot();
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Transactions
            Constraint::Length(7), // Wallet
            Constraint::Length(6), // Nodes
            Constraint::Length(1), // Key help
        ])
        .split(size);

    let updated = surface
        .last_update()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let title = Paragraph::new(Line::from(vec![
        Span::styled("⛏️  CHAINVIEW  ", header_style()),
        Span::styled(node_url.to_string(), Style::default().fg(Color::White)),
        Span::styled(
            format!("   updated {}", updated),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(TuiBlock::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    draw_transactions(f, chunks[1], &state);
    draw_wallet(f, chunks[2], &state);
    draw_nodes(f, chunks[3], &state);

    let help = Paragraph::new(
        "[r] refresh  [m] mine  [w] new wallet  [n] nodes  [c] resolve conflicts  [q] quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);

    if let Some(message) = surface.current_prompt() {
        let area = centered(size, 60, 5);
        let popup = Paragraph::new(vec![
            Line::from(Span::styled(message, Style::default().fg(Color::White))),
            Line::from(Span::styled(
                "Press Enter to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            TuiBlock::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Node says "),
        );
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    chainview::logging::init_to_file(LOG_FILE)?;
    let config = load_config()?;

    let surface = Arc::new(InteractiveSurface::new());
    let dashboard = Dashboard::from_config(&config, surface.clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.start().await });
    }

    // Main UI loop
    let result: Result<(), Box<dyn std::error::Error>> = loop {
        if let Err(e) = terminal.draw(|f| draw_ui(f, &surface, &config.node.url)) {
            break Err(e.into());
        }

        let ready = match event::poll(Duration::from_millis(100)) {
            Ok(ready) => ready,
            Err(e) => break Err(e.into()),
        };
        if !ready {
            // Let dispatched tasks make progress between redraws.
            tokio::task::yield_now().await;
            continue;
        }

        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        };

        if surface.current_prompt().is_some() {
            // The prompt is modal: only dismissal gets through.
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                surface.dismiss();
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break Ok(()),
            KeyCode::Char('r') => {
                dashboard.dispatch(UiEvent::RefreshTransactions);
            }
            KeyCode::Char('m') => {
                dashboard.dispatch(UiEvent::Mine);
            }
            KeyCode::Char('w') => {
                dashboard.dispatch(UiEvent::GenerateWallet);
            }
            KeyCode::Char('n') => {
                dashboard.dispatch(UiEvent::RefreshNodes);
            }
            KeyCode::Char('c') => {
                dashboard.dispatch(UiEvent::ResolveConflicts);
            }
            _ => {}
        }
    };

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_on_wide_terminal() {
        let area = Rect::new(0, 0, 1000, 50);
        let popup = centered(area, 70, 7);
        assert_eq!(popup.width, 700);
        assert_eq!(popup.x, 150);
        assert_eq!(popup.y, 21);

        let widest = Rect {
            x: 0,
            y: 0,
            width: u16::MAX,
            height: 10,
        };
        let max = centered(widest, 70, 20);
        assert_eq!(max.width, 45874);
        assert_eq!(max.height, 10);
    }
}
