//! NFT Marketplace TUI - Actor-based client for an NFT marketplace contract
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - ledger calls, IPFS uploads and file reads

mod config;
mod constants;
mod models;
mod ui;
mod messages;
mod app;
mod network;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use app::AppActor;
use config::MarketConfig;
use constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
use messages::ui_events::{key_to_ui_event, Form, InputMode};
use models::SessionState;
use network::{create_client, ContractClient, HttpJsonRpc, IpfsStore, NetworkActor};
use ui::{editing_hint, labeled, operation_color, render_input, render_tabs, session_color, short_hex};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Resolve the target environment before touching the terminal
    let config = MarketConfig::load()?;
    let client = create_client();
    let ledger = ContractClient::new(
        HttpJsonRpc::new(client.clone(), config.rpc_url.clone()),
        config.contract_address,
    );
    let store = IpfsStore::new(client, config.add_endpoint(), config.storage_auth.clone());
    tracing::info!(
        contract = %ledger.address(),
        rpc = %config.rpc_url,
        storage = %config.storage_api_endpoint,
        "Starting {} v{}", APP_NAME, APP_VERSION
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(Arc::new(ledger), Arc::new(store), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_form,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.alert.is_some(),
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Length(1),  // Image URL
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);
    draw_image_line(f, state, main_chunks[1]);

    match state.session {
        SessionState::Connecting => draw_connecting(f, main_chunks[2]),
        _ => draw_content(f, state, main_chunks[2]),
    }

    draw_status_bar(f, state, main_chunks[3]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(alert) = &state.alert {
        draw_alert_popup(f, alert, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let session = match &state.session {
        SessionState::Connecting => String::from("connecting..."),
        SessionState::Ready { account } => short_hex(&account.to_string()),
        SessionState::Failed { .. } => String::from("no session"),
    };

    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(" "),
        Span::styled(session, Style::default().fg(session_color(&state.session))),
        Span::raw("  "),
        Span::styled("Total tokens: ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.total_tokens.to_string(), Style::default().fg(Color::White).bold()),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_image_line(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Image: ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.image_url.as_str(), Style::default().fg(Color::Blue).underlined()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_connecting(f: &mut Frame, area: Rect) {
    let text = Paragraph::new("Connecting to ledger...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(text, area);
}

fn draw_content(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    draw_forms(f, state, columns[0]);
    draw_activity(f, state, columns[1]);
}

fn draw_forms(f: &mut Frame, state: &RenderState, area: Rect) {
    let form = state.active_form;
    let fields = form.fields();

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let titles: Vec<&str> = Form::ALL.iter().map(|form| form.title()).collect();
    f.render_widget(render_tabs(&titles, form.index()), chunks[0]);

    for (i, field) in fields.iter().enumerate() {
        let is_focused = i == state.selected_field;
        let is_editing = is_focused && state.input_mode == InputMode::Editing;
        let content = state.inputs.get(form, i);
        let chunk = chunks[i + 1];
        f.render_widget(render_input(content, field.label(), is_focused, is_editing), chunk);

        if is_editing {
            let column = content
                .get(..state.cursor_position)
                .map(|before| before.chars().count())
                .unwrap_or(0) as u16;
            f.set_cursor_position((chunk.x + 1 + column, chunk.y + 1));
        }
    }

    draw_result(f, state, chunks[fields.len() + 1]);
}

fn draw_result(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    match state.active_form {
        Form::Upload => {
            let color = if state.upload_ready { Color::Green } else { Color::DarkGray };
            lines.push(Line::from(Span::styled(
                state.upload_status.as_str(),
                Style::default().fg(color),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                if state.upload_ready {
                    "Press s to upload and mint"
                } else {
                    "Enter a path and press l to load it"
                },
                Style::default().fg(Color::DarkGray),
            )));
        }
        Form::GetToken => match &state.token_view {
            Some(view) => {
                lines.push(labeled("Token", view.token_id.to_string()));
                lines.push(labeled("Owner", view.owner.to_string()));
                lines.push(labeled("Content id", view.content_id.clone()));
            }
            None => lines.push(Line::from("No token fetched yet")),
        },
        Form::SellingPrice => match &state.sale_price {
            Some(sale) => {
                lines.push(labeled("Token", sale.token_id.to_string()));
                lines.push(labeled("Selling price", sale.price.to_string()));
                if sale.price.is_zero() {
                    lines.push(Line::from(Span::styled(
                        "Not listed for sale",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            None => lines.push(Line::from("No price fetched yet")),
        },
        Form::SellToken => lines.push(Line::from("Lists a token you own at the given price (wei)")),
        Form::BuyToken => lines.push(Line::from("Buys a listed token, paying the given price (wei)")),
    }

    let result = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Result "))
        .wrap(Wrap { trim: false });
    f.render_widget(result, area);
}

fn draw_activity(f: &mut Frame, state: &RenderState, area: Rect) {
    let lines: Vec<Line> = if state.activity.is_empty() {
        vec![Line::from(Span::styled(
            "No transactions yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state
            .activity
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        entry.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:<5} ", entry.operation.as_str()),
                        Style::default().fg(operation_color(entry.operation)),
                    ),
                    Span::raw(format!("{} ", entry.detail)),
                    Span::styled(
                        short_hex(&entry.tx_hash.to_string()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    let activity = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Activity "))
        .scroll((state.activity_scroll, 0));
    f.render_widget(activity, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if !state.pending.is_empty() {
        let waiting: Vec<&str> = state.pending.iter().map(|op| op.as_str()).collect();
        format!(" Waiting: {} ", waiting.join(", "))
    } else if state.input_mode == InputMode::Editing {
        String::from(editing_hint(state.active_form))
    } else {
        String::from(" Tab:form | ↑↓:field | e:edit | s:submit | ?:help | q:quit ")
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = format!(
        r#"
 {} v{} - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch form
   ↑ / ↓              Select field
   PgUp / PgDn        Scroll activity

 FORMS
   e / Enter          Edit current field
   Esc                Stop editing
   l                  Load file (Upload form)
   s                  Submit form

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#,
        APP_NAME, APP_VERSION
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_alert_popup(f: &mut Frame, alert: &str, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Error (any key to dismiss) ")
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(alert)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(text, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
