// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use intake_app::{
    AppCommand, AppMode, AppState, BeginOutcome, DispositionCoordinator, DispositionRequest,
    DispositionStatus, FetchError, FilterField, FilterState, FollowUpFormInput, LeadDirectory,
    LeadId, LeadPage, LeadRecord, UpdateError, quarter_hour_slots,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::Date;

const SUBMITTING_MARK: &str = "…";
const STATUS_CLEAR_SECS: u64 = 4;

/// Data access seam between the UI and the outside world. Network work runs
/// on worker threads that report back through the internal event channel;
/// the default `spawn_*` implementations resolve synchronously, which is
/// what scripted test runtimes want.
pub trait AppRuntime {
    fn fetch_leads(&mut self, page: u32) -> Result<LeadPage, FetchError>;
    fn submit_disposition(&mut self, request: &DispositionRequest) -> Result<(), UpdateError>;

    fn spawn_fetch_leads(
        &mut self,
        request_id: u64,
        page: u32,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let event = match self.fetch_leads(page) {
            Ok(page) => InternalEvent::Leads(LeadsEvent::Loaded { request_id, page }),
            Err(error) => InternalEvent::Leads(LeadsEvent::Failed { request_id, error }),
        };
        tx.send(event)
            .map_err(|_| anyhow::anyhow!("lead event channel closed"))?;
        Ok(())
    }

    fn spawn_submit_disposition(
        &mut self,
        request: DispositionRequest,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let lead_id = request.lead_id.clone();
        let event = match self.submit_disposition(&request) {
            Ok(()) => InternalEvent::Update(UpdateEvent::Committed { lead_id }),
            Err(error) => InternalEvent::Update(UpdateEvent::Failed { lead_id, error }),
        };
        tx.send(event)
            .map_err(|_| anyhow::anyhow!("update event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeadsEvent {
    Loaded { request_id: u64, page: LeadPage },
    Failed { request_id: u64, error: FetchError },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    Committed { lead_id: LeadId },
    Failed { lead_id: LeadId, error: UpdateError },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    Leads(LeadsEvent),
    Update(UpdateEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct TableUiState {
    selected_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct DispositionPickerUiState {
    lead_id: Option<LeadId>,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FollowUpField {
    Message,
    Date,
    Time,
}

impl FollowUpField {
    const fn next(self) -> Self {
        match self {
            Self::Message => Self::Date,
            Self::Date => Self::Time,
            Self::Time => Self::Message,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Message => Self::Time,
            Self::Date => Self::Message,
            Self::Time => Self::Date,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FollowUpUiState {
    lead_id: Option<LeadId>,
    form: FollowUpFormInput,
    field: FollowUpField,
    time_slot: usize,
}

impl Default for FollowUpUiState {
    fn default() -> Self {
        Self {
            lead_id: None,
            form: FollowUpFormInput::blank(),
            field: FollowUpField::Message,
            time_slot: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    directory: LeadDirectory,
    filters: FilterState,
    coordinator: DispositionCoordinator,
    table: TableUiState,
    filter_draft: String,
    picker: DispositionPickerUiState,
    follow_up: FollowUpUiState,
    help_visible: bool,
    pending_fetch: Option<u64>,
    status_token: u64,
    today: Date,
}

impl ViewData {
    fn new(today: Date) -> Self {
        Self {
            directory: LeadDirectory::default(),
            filters: FilterState::default(),
            coordinator: DispositionCoordinator::default(),
            table: TableUiState::default(),
            filter_draft: String::new(),
            picker: DispositionPickerUiState::default(),
            follow_up: FollowUpUiState::default(),
            help_visible: false,
            pending_fetch: None,
            status_token: 0,
            today,
        }
    }

    fn visible_leads(&self) -> Vec<LeadRecord> {
        self.filters.apply(self.directory.leads()).into_owned()
    }

    fn selected_lead(&self) -> Option<LeadRecord> {
        self.visible_leads().get(self.table.selected_row).cloned()
    }

    fn clamp_cursor(&mut self) {
        let count = self.visible_leads().len();
        if count == 0 {
            self.table.selected_row = 0;
        } else if self.table.selected_row >= count {
            self.table.selected_row = count - 1;
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(time::OffsetDateTime::now_utc().date());
    let (internal_tx, internal_rx) = mpsc::channel();

    start_fetch(state, runtime, &mut view_data, &internal_tx, 1);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Leads(event) => handle_leads_event(state, view_data, tx, event),
            InternalEvent::Update(event) => handle_update_event(state, view_data, tx, event),
        }
    }
}

fn handle_leads_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    event: LeadsEvent,
) {
    match event {
        LeadsEvent::Loaded { request_id, page } => {
            if view_data.directory.apply_fetch(request_id, page) {
                view_data.pending_fetch = None;
                view_data.clamp_cursor();
            }
        }
        LeadsEvent::Failed { request_id, error } => {
            // Stale failures are noise; the list stays whatever it was.
            if view_data.directory.fetch_failed(request_id) {
                view_data.pending_fetch = None;
                emit_status(state, view_data, tx, error.to_string());
            }
        }
    }
}

fn handle_update_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    event: UpdateEvent,
) {
    match event {
        UpdateEvent::Committed { lead_id } => {
            let Some(request) = view_data.coordinator.complete(&lead_id) else {
                return;
            };
            view_data.directory.apply_update(&request);
            emit_status(
                state,
                view_data,
                tx,
                format!("lead {lead_id}: {}", request.status.as_str()),
            );
        }
        UpdateEvent::Failed { lead_id, error } => {
            // Confirmed-only policy: nothing was mutated, so dropping the
            // pending entry is the whole rollback.
            view_data.coordinator.complete(&lead_id);
            emit_status(state, view_data, tx, error.to_string());
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(STATUS_CLEAR_SECS));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn start_fetch<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    page: u32,
) {
    let seq = view_data.directory.begin_fetch();
    view_data.pending_fetch = Some(seq);
    if let Err(error) = runtime.spawn_fetch_leads(seq, page, internal_tx.clone()) {
        view_data.pending_fetch = None;
        emit_status(state, view_data, internal_tx, format!("load failed: {error:#}"));
    }
}

fn start_submit<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    request: DispositionRequest,
) {
    let lead_id = request.lead_id.clone();
    let label = request.status.as_str();
    if let Err(error) = runtime.spawn_submit_disposition(request, internal_tx.clone()) {
        view_data.coordinator.complete(&lead_id);
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("update failed: {error:#}"),
        );
        return;
    }
    emit_status(state, view_data, internal_tx, format!("saving {label}..."));
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.mode {
        AppMode::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
        AppMode::FilterEdit(field) => {
            handle_filter_edit_key(state, runtime, view_data, internal_tx, field, key);
            false
        }
        AppMode::DispositionPicker => {
            handle_picker_key(state, runtime, view_data, internal_tx, key);
            false
        }
        AppMode::FollowUpForm => {
            handle_follow_up_key(state, runtime, view_data, internal_tx, key);
            false
        }
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            view_data.help_visible = true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let count = view_data.visible_leads().len();
            if count > 0 && view_data.table.selected_row + 1 < count {
                view_data.table.selected_row += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.table.selected_row = view_data.table.selected_row.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            view_data.table.selected_row = 0;
        }
        KeyCode::Char('G') => {
            let count = view_data.visible_leads().len();
            view_data.table.selected_row = count.saturating_sub(1);
        }
        KeyCode::Char('r') => {
            let page = view_data.directory.current_page();
            start_fetch(state, runtime, view_data, internal_tx, page);
        }
        KeyCode::Char(']') | KeyCode::Right => {
            let next = view_data
                .directory
                .page()
                .filter(|info| info.has_next())
                .map(|info| info.current_page + 1);
            match next {
                Some(page) => start_fetch(state, runtime, view_data, internal_tx, page),
                None => emit_status(state, view_data, internal_tx, "no next page"),
            }
        }
        KeyCode::Char('[') | KeyCode::Left => {
            let prev = view_data
                .directory
                .page()
                .filter(|info| info.has_prev())
                .map(|info| info.current_page - 1);
            match prev {
                Some(page) => start_fetch(state, runtime, view_data, internal_tx, page),
                None => emit_status(state, view_data, internal_tx, "no previous page"),
            }
        }
        KeyCode::Char('d') => open_filter_edit(state, view_data, FilterField::Date),
        KeyCode::Char('e') => open_filter_edit(state, view_data, FilterField::Email),
        KeyCode::Char('p') => open_filter_edit(state, view_data, FilterField::Phone),
        KeyCode::Char('i') => open_filter_edit(state, view_data, FilterField::Insurance),
        KeyCode::Char('c') => {
            if view_data.filters.is_empty() {
                emit_status(state, view_data, internal_tx, "no filters to clear");
            } else {
                view_data.filters.clear_all();
                view_data.clamp_cursor();
                emit_status(state, view_data, internal_tx, "filters cleared");
                start_fetch(state, runtime, view_data, internal_tx, 1);
            }
        }
        KeyCode::Enter => {
            let Some(lead) = view_data.selected_lead() else {
                emit_status(state, view_data, internal_tx, "no lead selected");
                return false;
            };
            view_data.picker = DispositionPickerUiState {
                cursor: DispositionStatus::ALL
                    .iter()
                    .position(|status| *status == lead.disposition)
                    .unwrap_or(0),
                lead_id: Some(lead.id),
            };
            state.dispatch(AppCommand::OpenDispositionPicker);
        }
        _ => {}
    }
    false
}

fn open_filter_edit(state: &mut AppState, view_data: &mut ViewData, field: FilterField) {
    view_data.filter_draft = view_data.filters.get(field).to_owned();
    state.dispatch(AppCommand::OpenFilterEdit(field));
}

fn handle_filter_edit_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    field: FilterField,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.filter_draft.clear();
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Enter => {
            let draft = std::mem::take(&mut view_data.filter_draft);
            let changed = view_data.filters.get(field) != draft;
            state.dispatch(AppCommand::ExitToNav);
            if changed {
                view_data.filters.set(field, draft);
                view_data.table.selected_row = 0;
                // Any filter mutation resets the page cursor to the first
                // page so a narrowed view never shows an out-of-range page.
                start_fetch(state, runtime, view_data, internal_tx, 1);
            }
        }
        KeyCode::Backspace => {
            view_data.filter_draft.pop();
        }
        KeyCode::Char(ch) => {
            view_data.filter_draft.push(ch);
        }
        _ => {}
    }
}

fn handle_picker_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.picker = DispositionPickerUiState::default();
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.picker.cursor =
                (view_data.picker.cursor + 1) % DispositionStatus::ALL.len();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.picker.cursor = view_data
                .picker
                .cursor
                .checked_sub(1)
                .unwrap_or(DispositionStatus::ALL.len() - 1);
        }
        KeyCode::Enter => {
            let Some(lead_id) = view_data.picker.lead_id.take() else {
                state.dispatch(AppCommand::ExitToNav);
                return;
            };
            let status = DispositionStatus::ALL[view_data.picker.cursor];
            view_data.picker = DispositionPickerUiState::default();

            match view_data.coordinator.begin(&lead_id, status) {
                Err(error) => {
                    state.dispatch(AppCommand::ExitToNav);
                    emit_status(state, view_data, internal_tx, error.to_string());
                }
                Ok(BeginOutcome::CollectFollowUp) => {
                    view_data.follow_up = FollowUpUiState {
                        lead_id: Some(lead_id),
                        ..FollowUpUiState::default()
                    };
                    state.dispatch(AppCommand::OpenFollowUpForm);
                }
                Ok(BeginOutcome::Submit(request)) => {
                    state.dispatch(AppCommand::ExitToNav);
                    start_submit(state, runtime, view_data, internal_tx, request);
                }
            }
        }
        _ => {}
    }
}

fn handle_follow_up_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            if let Some(lead_id) = view_data.follow_up.lead_id.take() {
                view_data.coordinator.cancel_follow_up(&lead_id);
            }
            view_data.follow_up = FollowUpUiState::default();
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Tab => {
            view_data.follow_up.field = view_data.follow_up.field.next();
        }
        KeyCode::BackTab => {
            view_data.follow_up.field = view_data.follow_up.field.prev();
        }
        KeyCode::Enter => {
            let Some(lead_id) = view_data.follow_up.lead_id.clone() else {
                state.dispatch(AppCommand::ExitToNav);
                return;
            };
            match view_data
                .coordinator
                .submit_follow_up(&lead_id, &view_data.follow_up.form)
            {
                Err(error) => {
                    // Validation failures keep the form open, nothing sent.
                    emit_status(state, view_data, internal_tx, error.to_string());
                }
                Ok(request) => {
                    view_data.follow_up = FollowUpUiState::default();
                    state.dispatch(AppCommand::ExitToNav);
                    start_submit(state, runtime, view_data, internal_tx, request);
                }
            }
        }
        KeyCode::Backspace => match view_data.follow_up.field {
            FollowUpField::Message => {
                view_data.follow_up.form.message.pop();
            }
            FollowUpField::Date => {
                view_data.follow_up.form.date.pop();
            }
            FollowUpField::Time => {}
        },
        KeyCode::Char('j') | KeyCode::Down
            if view_data.follow_up.field == FollowUpField::Time =>
        {
            let slots = quarter_hour_slots();
            view_data.follow_up.time_slot = (view_data.follow_up.time_slot + 1) % slots.len();
            view_data.follow_up.form.time = slots[view_data.follow_up.time_slot].clone();
        }
        KeyCode::Char('k') | KeyCode::Up if view_data.follow_up.field == FollowUpField::Time => {
            let slots = quarter_hour_slots();
            view_data.follow_up.time_slot = view_data
                .follow_up
                .time_slot
                .checked_sub(1)
                .unwrap_or(slots.len() - 1);
            view_data.follow_up.form.time = slots[view_data.follow_up.time_slot].clone();
        }
        KeyCode::Char(ch) => match view_data.follow_up.field {
            FollowUpField::Message => view_data.follow_up.form.message.push(ch),
            FollowUpField::Date => view_data.follow_up.form.date.push(ch),
            FollowUpField::Time => {}
        },
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_filter_bar(frame, chunks[0], state, view_data);
    render_lead_table(frame, chunks[1], view_data);
    render_footer(frame, chunks[2], view_data);
    render_status_line(frame, chunks[3], state, view_data);

    match state.mode {
        AppMode::DispositionPicker => render_picker_overlay(frame, view_data),
        AppMode::FollowUpForm => render_follow_up_overlay(frame, view_data),
        _ => {}
    }

    if view_data.help_visible {
        render_help_overlay(frame);
    }
}

fn filter_bar_text(state: &AppState, view_data: &ViewData) -> String {
    let parts = FilterField::ALL
        .iter()
        .map(|field| {
            let editing = state.mode == AppMode::FilterEdit(*field);
            let value = if editing {
                format!("{}_", view_data.filter_draft)
            } else {
                let current = view_data.filters.get(*field);
                if current.is_empty() {
                    "-".to_owned()
                } else {
                    current.to_owned()
                }
            };
            let mark = if editing { ">" } else { "" };
            format!("{mark}{}: {value}", field.label())
        })
        .collect::<Vec<_>>();
    parts.join("  |  ")
}

fn render_filter_bar(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let mut title = "filters".to_owned();
    let active = view_data.filters.active_count();
    if active > 0 {
        title.push_str(&format!(" ({active} active)"));
    }
    let bar = Paragraph::new(filter_bar_text(state, view_data))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(bar, area);
}

fn follow_up_cell(lead: &LeadRecord, today: Date) -> (String, Style) {
    match lead.days_late(today) {
        Some(days) => (
            format!("Late by {days}D"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => match lead.follow_up_at {
            Some(at) => (
                format!("{} {:02}:{:02}", at.date(), at.hour(), at.minute()),
                Style::default().fg(Color::Yellow),
            ),
            None => ("-".to_owned(), Style::default()),
        },
    }
}

fn render_lead_table(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let leads = view_data.visible_leads();

    let header = Row::new(
        [
            "Created", "Name", "Email", "Phone", "DOB", "Insurance", "Member ID", "Msg",
            "Disposition", "Follow Up", "Logs",
        ]
        .into_iter()
        .map(|label| {
            Cell::from(label).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        }),
    );

    let rows = leads.iter().enumerate().map(|(row_index, lead)| {
        let selected = row_index == view_data.table.selected_row;
        let row_style = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut disposition = lead.disposition.as_str().to_owned();
        if view_data.coordinator.is_submitting(&lead.id) {
            disposition.push_str(SUBMITTING_MARK);
        }
        let (follow_up, follow_up_style) = follow_up_cell(lead, view_data.today);

        Row::new(vec![
            Cell::from(lead.created_date().to_string()),
            Cell::from(lead.contact.name.clone()),
            Cell::from(lead.contact.email.clone()),
            Cell::from(lead.contact.phone.clone()),
            Cell::from(lead.date_of_birth.clone()),
            Cell::from(lead.insurance.kind.clone()),
            Cell::from(lead.insurance.member_id.clone()),
            Cell::from(if lead.has_message { "✉" } else { "-" }),
            Cell::from(disposition),
            Cell::from(follow_up).style(follow_up_style),
            Cell::from(if lead.has_logs { "≡" } else { "-" }),
        ])
        .style(row_style)
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(24),
        Constraint::Length(15),
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Length(3),
        Constraint::Length(15),
        Constraint::Length(17),
        Constraint::Length(4),
    ];

    let mut title = format!("leads r:{}", leads.len());
    if view_data.pending_fetch.is_some() {
        title.push_str(" | loading");
    }
    if !view_data.filters.is_empty() {
        title.push_str(" | filtered");
    }
    let submitting = view_data.coordinator.submitting_count();
    if submitting > 0 {
        title.push_str(&format!(" | saving {submitting}"));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn footer_text(view_data: &ViewData) -> String {
    match view_data.directory.page() {
        Some(info) => {
            let (from, to) = info.showing_range();
            let prev = if info.has_prev() { "[:prev" } else { "[:-" };
            let next = if info.has_next() { "]:next" } else { "]:-" };
            format!(
                "Showing {from} to {to} of {} entries  |  Page {} of {}  |  {prev} {next}",
                info.total,
                info.current_page,
                info.total_pages(),
            )
        }
        None => format!("{} entries", view_data.directory.leads().len()),
    }
}

fn render_footer(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let footer = Paragraph::new(footer_text(view_data))
        .block(Block::default().borders(Borders::ALL).title("pages"));
    frame.render_widget(footer, area);
}

fn render_status_line(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let text = match &state.status_line {
        Some(message) => message.clone(),
        None if state.show_key_hints => {
            let mut hint =
                "j/k:rows  [/]:pages  d/e/p/i:filters  c:clear  enter:disposition  r:refresh  ?:help  q:quit"
                    .to_owned();
            if view_data.pending_fetch.is_some() {
                hint.push_str("  (loading)");
            }
            hint
        }
        None => String::new(),
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_picker_overlay(frame: &mut ratatui::Frame<'_>, view_data: &ViewData) {
    let area = centered_rect(30, DispositionStatus::ALL.len() as u16 + 3, frame.area());
    frame.render_widget(Clear, area);

    let lines = DispositionStatus::ALL
        .iter()
        .enumerate()
        .map(|(index, status)| {
            let marker = if index == view_data.picker.cursor {
                "> "
            } else {
                "  "
            };
            format!("{marker}{}", status.as_str())
        })
        .collect::<Vec<_>>()
        .join("\n");

    let picker = Paragraph::new(format!("{lines}\nenter:save  esc:cancel")).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Disposition"),
    );
    frame.render_widget(picker, area);
}

fn follow_up_overlay_text(view_data: &ViewData) -> String {
    let follow_up = &view_data.follow_up;
    let mut out = String::new();
    for field in [FollowUpField::Message, FollowUpField::Date, FollowUpField::Time] {
        let marker = if follow_up.field == field { "> " } else { "  " };
        let value = match field {
            FollowUpField::Message => follow_up.form.message.clone(),
            FollowUpField::Date => follow_up.form.date.clone(),
            FollowUpField::Time => follow_up.form.time.clone(),
        };
        out.push_str(&format!("{marker}{}: {value}\n", field.label()));
    }
    out.push_str("\ndate is YYYY-MM-DD; j/k cycles time\n");
    out.push_str("tab:field  enter:save  esc:cancel");
    out
}

fn render_follow_up_overlay(frame: &mut ratatui::Frame<'_>, view_data: &ViewData) {
    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);
    let modal = Paragraph::new(follow_up_overlay_text(view_data))
        .block(Block::default().borders(Borders::ALL).title("Follow Up"));
    frame.render_widget(modal, area);
}

fn help_overlay_text() -> String {
    [
        "j/k, up/down    move row selection",
        "g/G             first/last row",
        "[ ] or arrows   previous/next page",
        "r               refetch the current page",
        "d e p i         edit date/email/phone/insurance filter",
        "c               clear all filters",
        "enter           change disposition for the selected lead",
        "?               toggle this help",
        "q, ctrl-q       quit",
    ]
    .join("\n")
}

fn render_help_overlay(frame: &mut ratatui::Frame<'_>) {
    let area = centered_rect(52, 12, frame.area());
    frame.render_widget(Clear, area);
    let help = Paragraph::new(help_overlay_text())
        .block(Block::default().borders(Borders::ALL).title("help"));
    frame.render_widget(help, area);
}
