// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod pages;
mod worker;

pub use pages::{
    AdminPanel, DELETE_FEE_PROMPT, DELETE_TRANSACTION_PROMPT, FeeEditor, FeesPage, MANAGE_LINKS,
    MerchantsPage, TransactionsPage,
};
pub use worker::{AppRuntime, Job, JobSender, Reply, serve, spawn_worker};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use paydesk_app::{
    AdminTab, AppCommand, AppEvent, AppState, FeeId, FeeType, ListEndpoint, ListResource,
    MerchantAction, MerchantTab, RegisterMerchantForm, RequestToken, TransactionId, View,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    Api(Reply),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Nav,
    Search,
    IdInput,
    RegisterForm,
    FeeForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingDelete {
    Fee(FeeId),
    Transaction(TransactionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConfirmOverlay {
    prompt: String,
    target: PendingDelete,
}

struct ViewData {
    admin: AdminPanel,
    merchants: MerchantsPage,
    fees: FeesPage,
    mode: InputMode,
    search_draft: String,
    confirm: Option<ConfirmOverlay>,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(jobs: &JobSender, page_size: u32) -> Self {
        Self {
            admin: AdminPanel::new(jobs, page_size),
            merchants: MerchantsPage::new(jobs, page_size),
            fees: FeesPage::new(jobs, page_size),
            mode: InputMode::Nav,
            search_draft: String::new(),
            confirm: None,
            help_visible: false,
            status_token: 0,
        }
    }

    fn activate(&mut self, view: View) -> Option<RequestToken> {
        match view {
            View::Admin => self.admin.activate(),
            View::Merchants => self.merchants.activate(),
            View::Fees => self.fees.activate(),
        }
    }

    fn error_message(&self, view: View) -> Option<&str> {
        match view {
            View::Admin => match self.admin.tabs.active() {
                AdminTab::Manage => None,
                AdminTab::Overview | AdminTab::Transactions => {
                    self.admin.transactions.error_message()
                }
            },
            View::Merchants => self.merchants.error_message(),
            View::Fees => self.fees.error_message(),
        }
    }

    fn dismiss_error(&mut self, view: View) {
        match view {
            View::Admin => self.admin.transactions.dismiss_error(),
            View::Merchants => self.merchants.dismiss_error(),
            View::Fees => self.fees.dismiss_error(),
        }
    }
}

pub fn run_app<R>(state: &mut AppState, runtime: R, page_size: u32) -> Result<()>
where
    R: AppRuntime + Send + 'static,
{
    let (internal_tx, internal_rx) = mpsc::channel();
    let (jobs, _worker) = spawn_worker(runtime, internal_tx.clone())?;
    let mut view_data = ViewData::new(&jobs, page_size);
    drop(jobs);
    view_data.activate(state.view);

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
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
            InternalEvent::Api(reply) => {
                if let Some(message) = apply_reply(view_data, reply) {
                    emit_status(state, view_data, tx, message);
                }
            }
        }
    }
}

/// Hands a worker reply to the controller that issued it. Returns the
/// success message to show, if any.
fn apply_reply(view_data: &mut ViewData, reply: Reply) -> Option<String> {
    match reply {
        Reply::Merchants { token, result } => {
            view_data.merchants.finish_list(token, result);
            None
        }
        Reply::MerchantDetail { token, result } => {
            view_data.merchants.finish_details(token, result)
        }
        Reply::MerchantTransactions { token, result } => {
            view_data.merchants.finish_transactions(token, result)
        }
        Reply::Registered { token, result } => {
            let message = view_data.merchants.finish_register(token, result);
            if message.is_some() && view_data.mode == InputMode::RegisterForm {
                view_data.mode = InputMode::Nav;
            }
            message
        }
        Reply::Decided {
            token,
            decision,
            result,
        } => view_data.merchants.finish_decision(token, &decision, result),
        Reply::Fees { token, result } => {
            view_data.fees.finish_list(token, result);
            None
        }
        Reply::FeeDetail { token, result } => {
            view_data.fees.finish_edit_fetch(token, result);
            if view_data.fees.editor.is_some() && view_data.mode == InputMode::Nav {
                view_data.mode = InputMode::FeeForm;
            }
            None
        }
        Reply::FeeSaved {
            token,
            change,
            result,
        } => {
            let message = view_data.fees.finish_save(token, &change, result);
            if view_data.fees.editor.is_none() && view_data.mode == InputMode::FeeForm {
                view_data.mode = InputMode::Nav;
            }
            message
        }
        Reply::FeeDeleted { token, result } => view_data.fees.finish_delete(token, result),
        Reply::Transactions { token, result } => {
            view_data.admin.transactions.finish_list(token, result);
            None
        }
        Reply::TransactionDeleted { token, result } => {
            view_data.admin.transactions.finish_delete(token, result)
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    let events = state.dispatch(AppCommand::SetStatus(message.into()));
    apply_app_events(view_data, internal_tx, events);
}

/// Returns true when the app should exit.
fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if let Some(overlay) = view_data.confirm.take() {
        handle_confirm_key(view_data, overlay, key);
        return false;
    }

    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    match view_data.mode {
        InputMode::Nav => handle_nav_key(state, view_data, internal_tx, key),
        InputMode::Search => {
            handle_search_key(view_data, key);
            false
        }
        InputMode::IdInput => {
            handle_id_input_key(view_data, key);
            false
        }
        InputMode::RegisterForm => {
            handle_register_form_key(view_data, key);
            false
        }
        InputMode::FeeForm => {
            handle_fee_form_key(view_data, key);
            false
        }
    }
}

fn handle_confirm_key(view_data: &mut ViewData, overlay: ConfirmOverlay, key: KeyEvent) {
    let answer = match key.code {
        KeyCode::Char('y' | 'Y') => true,
        KeyCode::Char('n' | 'N') | KeyCode::Esc => false,
        _ => {
            view_data.confirm = Some(overlay);
            return;
        }
    };

    let mut confirm = |_: &str| answer;
    match overlay.target {
        PendingDelete::Fee(id) => {
            view_data.fees.delete(id, &mut confirm);
        }
        PendingDelete::Transaction(id) => {
            view_data.admin.transactions.delete(id, &mut confirm);
        }
    }
}

fn handle_nav_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('v') => {
            let events = state.dispatch(AppCommand::CycleView);
            return apply_app_events(view_data, internal_tx, events);
        }
        KeyCode::Esc | KeyCode::Backspace => return go_back(state, view_data, internal_tx),
        KeyCode::Tab => cycle_tab(state.view, view_data, 1),
        KeyCode::BackTab => cycle_tab(state.view, view_data, -1),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = usize::from(digit as u8 - b'1');
            jump_to_tab(state.view, view_data, index);
        }
        KeyCode::Char('z') => view_data.dismiss_error(state.view),
        KeyCode::Char('r') => {
            refresh_active_list(state.view, view_data);
        }
        KeyCode::Char('n') => {
            step_active_list(state.view, view_data, true);
        }
        KeyCode::Char('p') => {
            step_active_list(state.view, view_data, false);
        }
        KeyCode::Char('j') | KeyCode::Down => move_selection(state.view, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_selection(state.view, view_data, -1),
        _ => match state.view {
            View::Admin => handle_admin_key(state, view_data, internal_tx, key),
            View::Merchants => handle_merchants_key(view_data, key),
            View::Fees => handle_fees_key(view_data, key),
        },
    }
    false
}

/// Returns true when an event asks the app to exit.
fn apply_app_events(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: Vec<AppEvent>,
) -> bool {
    let mut exit = false;
    for event in events {
        match event {
            AppEvent::ExitRequested => exit = true,
            AppEvent::ViewChanged(view) => {
                view_data.activate(view);
            }
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            AppEvent::StatusCleared => {}
        }
    }
    exit
}

/// Tab history first, then the route history, then exit.
fn go_back(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) -> bool {
    let mut left = false;
    {
        let mut leave = || left = true;
        match state.view {
            View::Admin => {
                view_data.admin.tabs.go_back(&mut leave);
            }
            View::Merchants => {
                view_data.merchants.tabs.go_back(&mut leave);
            }
            View::Fees => leave(),
        }
    }

    if !left {
        view_data.activate(state.view);
        return false;
    }

    let events = state.dispatch(AppCommand::Back);
    apply_app_events(view_data, internal_tx, events)
}

fn cycle_tab(view: View, view_data: &mut ViewData, delta: isize) {
    match view {
        View::Admin => {
            let tab = cycled(&AdminTab::ALL, view_data.admin.tabs.active(), delta);
            view_data.admin.switch_to(tab);
        }
        View::Merchants => {
            let tab = cycled(&MerchantTab::ALL, view_data.merchants.tabs.active(), delta);
            view_data.merchants.switch_to(tab);
        }
        View::Fees => {}
    }
}

fn jump_to_tab(view: View, view_data: &mut ViewData, index: usize) {
    match view {
        View::Admin => {
            if let Some(tab) = AdminTab::ALL.get(index) {
                view_data.admin.switch_to(*tab);
            }
        }
        View::Merchants => {
            if let Some(tab) = MerchantTab::ALL.get(index) {
                view_data.merchants.switch_to(*tab);
            }
        }
        View::Fees => {}
    }
}

fn cycled<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|item| *item == current).unwrap_or(0) as isize;
    all[(index + delta).rem_euclid(len) as usize]
}

fn refresh_active_list(view: View, view_data: &mut ViewData) -> RequestToken {
    match view {
        View::Admin => view_data.admin.transactions.list.refresh(),
        View::Merchants => view_data.merchants.list.refresh(),
        View::Fees => view_data.fees.list.refresh(),
    }
}

fn step_active_list(view: View, view_data: &mut ViewData, forward: bool) -> Option<RequestToken> {
    match view {
        View::Admin => step_page(&mut view_data.admin.transactions.list, forward),
        View::Merchants => step_page(&mut view_data.merchants.list, forward),
        View::Fees => step_page(&mut view_data.fees.list, forward),
    }
}

fn step_page<T, E: ListEndpoint<T>>(
    list: &mut ListResource<T, E>,
    forward: bool,
) -> Option<RequestToken> {
    if forward {
        list.next_page()
    } else {
        list.prev_page()
    }
}

fn move_selection(view: View, view_data: &mut ViewData, delta: isize) {
    match view {
        View::Admin => view_data.admin.move_selection(delta),
        View::Merchants => {
            if view_data.merchants.tabs.active() == MerchantTab::Register {
                view_data.merchants.move_form_focus(delta);
            } else {
                view_data.merchants.move_selection(delta);
            }
        }
        View::Fees => view_data.fees.move_selection(delta),
    }
}

fn handle_admin_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter => {
            if let Some(view) = view_data.admin.selected_link() {
                let events = state.dispatch(AppCommand::Navigate(view));
                apply_app_events(view_data, internal_tx, events);
            }
        }
        KeyCode::Char('d') if view_data.admin.tabs.active() == AdminTab::Transactions => {
            let Some(transaction) = view_data.admin.transactions.selected_transaction() else {
                emit_status(state, view_data, internal_tx, "no transaction selected");
                return;
            };
            let prompt = view_data
                .admin
                .transactions
                .delete
                .confirmation_prompt()
                .unwrap_or(DELETE_TRANSACTION_PROMPT)
                .to_owned();
            view_data.confirm = Some(ConfirmOverlay {
                prompt,
                target: PendingDelete::Transaction(transaction.id.clone()),
            });
        }
        _ => {}
    }
}

fn handle_merchants_key(view_data: &mut ViewData, key: KeyEvent) {
    let tab = view_data.merchants.tabs.active();
    match key.code {
        KeyCode::Char('/') => {
            view_data.search_draft = view_data.merchants.search().to_owned();
            view_data.mode = InputMode::Search;
        }
        KeyCode::Char('s') => {
            view_data.merchants.cycle_status();
        }
        KeyCode::Char('t') => {
            view_data.merchants.cycle_time();
        }
        KeyCode::Char('i') => {
            view_data.mode = match tab {
                MerchantTab::Register => InputMode::RegisterForm,
                MerchantTab::Approve | MerchantTab::Details => InputMode::IdInput,
                MerchantTab::List => InputMode::Nav,
            };
        }
        KeyCode::Char(ch @ ('a' | 'b')) => {
            let action = if ch == 'a' {
                MerchantAction::Approve
            } else {
                MerchantAction::Block
            };
            if tab == MerchantTab::List {
                if let Some(id) = view_data.merchants.selected_merchant().map(|m| m.id.clone()) {
                    view_data.merchants.decide(action, id);
                }
            } else {
                view_data.merchants.decide_typed(action);
            }
        }
        KeyCode::Char(ch @ ('g' | 'x')) => {
            if tab == MerchantTab::List
                && let Some(id) = view_data.merchants.selected_merchant().map(|m| m.id.clone())
            {
                view_data.merchants.set_lookup_id(id.as_str());
                view_data.merchants.switch_to(MerchantTab::Details);
            }
            if ch == 'g' {
                view_data.merchants.lookup_details();
            } else {
                view_data.merchants.lookup_transactions();
            }
        }
        KeyCode::Enter => match tab {
            MerchantTab::Register => {
                view_data.merchants.submit_register();
            }
            MerchantTab::Details => {
                view_data.merchants.lookup_details();
            }
            MerchantTab::Approve | MerchantTab::List => {}
        },
        _ => {}
    }
}

fn handle_fees_key(view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') => {
            view_data.fees.open_new();
            view_data.mode = InputMode::FeeForm;
        }
        KeyCode::Char('e') => {
            if let Some(id) = view_data.fees.selected_fee().map(|fee| fee.id.clone()) {
                view_data.fees.begin_edit(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = view_data.fees.selected_fee().map(|fee| fee.id.clone()) {
                let prompt = view_data
                    .fees
                    .delete
                    .confirmation_prompt()
                    .unwrap_or(DELETE_FEE_PROMPT)
                    .to_owned();
                view_data.confirm = Some(ConfirmOverlay {
                    prompt,
                    target: PendingDelete::Fee(id),
                });
            }
        }
        _ => {}
    }
}

fn edit_text(text: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(ch) => text.push(ch),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}

fn handle_search_key(view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let draft = std::mem::take(&mut view_data.search_draft);
            view_data.merchants.set_search(&draft);
            view_data.mode = InputMode::Nav;
        }
        KeyCode::Esc => {
            view_data.search_draft.clear();
            view_data.mode = InputMode::Nav;
        }
        code => edit_text(&mut view_data.search_draft, code),
    }
}

fn handle_id_input_key(view_data: &mut ViewData, key: KeyEvent) {
    let details = view_data.merchants.tabs.active() == MerchantTab::Details;
    match key.code {
        KeyCode::Enter | KeyCode::Esc => view_data.mode = InputMode::Nav,
        code if details => view_data
            .merchants
            .edit_lookup_id(|id| edit_text(id, code)),
        code => edit_text(&mut view_data.merchants.decision_id, code),
    }
}

fn handle_register_form_key(view_data: &mut ViewData, key: KeyEvent) {
    let merchants = &mut view_data.merchants;
    match key.code {
        KeyCode::Esc => view_data.mode = InputMode::Nav,
        KeyCode::Enter => {
            merchants.submit_register();
        }
        KeyCode::Tab | KeyCode::Down => merchants.move_form_focus(1),
        KeyCode::BackTab | KeyCode::Up => merchants.move_form_focus(-1),
        code => {
            if let Some(field) = merchants.form.field_mut(merchants.form_focus) {
                edit_text(field, code);
            }
        }
    }
}

fn handle_fee_form_key(view_data: &mut ViewData, key: KeyEvent) {
    let fees = &mut view_data.fees;
    match key.code {
        KeyCode::Esc => {
            fees.close_editor();
            view_data.mode = InputMode::Nav;
        }
        KeyCode::Enter => {
            fees.submit();
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(editor) = fees.editor.as_mut() {
                editor.move_focus(1);
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(editor) = fees.editor.as_mut() {
                editor.move_focus(-1);
            }
        }
        KeyCode::Backspace => {
            if let Some(editor) = fees.editor.as_mut() {
                editor.backspace();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(editor) = fees.editor.as_mut() {
                editor.type_char(ch);
            }
        }
        _ => {}
    }
}

/// Shortens long ids to `head...tail`; short values pass through and
/// empty ones render as `-`.
pub fn short_display(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.is_empty() {
        return "-".to_owned();
    }
    if chars.len() <= head + tail + 3 {
        return value.to_owned();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{start}...{end}")
}

fn short_id(value: &str) -> String {
    short_display(value, 6, 4)
}

fn format_amount(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_owned(), |amount| format!("${amount:.2}"))
}

fn format_date(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|value| value.format(DATE_FORMAT).ok())
        .unwrap_or_else(|| "-".to_owned())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|value| !value.trim().is_empty()).unwrap_or("-")
}

fn page_footer<T, E: ListEndpoint<T>>(list: &ListResource<T, E>) -> String {
    let mut footer = format!("Page {} of {}", list.page(), list.total_pages());
    if let Some(total) = list.total() {
        footer.push_str(&format!(" | {total} total"));
    }
    if list.is_loading() {
        footer.push_str(" | loading...");
    } else if list.is_stale() {
        footer.push_str(" | stale");
    }
    footer
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = View::ALL
        .iter()
        .position(|view| *view == state.view)
        .unwrap_or(0);
    let views = Tabs::new(View::ALL.iter().map(|view| view.label()).collect::<Vec<_>>())
        .block(Block::default().title("paydesk").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(views, layout[0]);

    match state.view {
        View::Admin => render_admin(frame, layout[1], view_data),
        View::Merchants => render_merchants(frame, layout[1], view_data),
        View::Fees => render_fees(frame, layout[1], view_data),
    }

    let (text, style) = match view_data.error_message(state.view) {
        Some(error) => (
            format!("{error} (z to dismiss)"),
            Style::default().fg(Color::Red),
        ),
        None => (status_text(state, view_data), Style::default().fg(Color::Yellow)),
    };
    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if let Some(editor) = &view_data.fees.editor
        && state.view == View::Fees
    {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);
        let title = if editor.target.is_some() {
            "Edit Fee"
        } else {
            "Add Fee"
        };
        let form = Paragraph::new(render_fee_editor_text(editor, view_data.fees.save.is_pending()))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(form, area);
    }

    if let Some(overlay) = &view_data.confirm {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);
        let prompt = Paragraph::new(format!("{}\n\n[y] yes   [n] no", overlay.prompt))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("confirm")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(prompt, area);
    }

    if view_data.help_visible {
        let area = centered_rect(80, 70, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn split_tabs(area: Rect) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);
    (parts[0], parts[1])
}

fn tab_bar<'a>(labels: Vec<&'a str>, selected: usize) -> Tabs<'a> {
    Tabs::new(labels)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected)
}

fn render_admin(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let (tabs_area, body) = split_tabs(area);
    let admin = &view_data.admin;
    let active = admin.tabs.active();
    let selected = AdminTab::ALL.iter().position(|tab| *tab == active).unwrap_or(0);
    frame.render_widget(
        tab_bar(AdminTab::ALL.iter().map(|tab| tab.label()).collect(), selected),
        tabs_area,
    );

    match active {
        AdminTab::Overview => {
            let overview = Paragraph::new(render_overview_text(&admin.transactions))
                .block(Block::default().title("Overview").borders(Borders::ALL));
            frame.render_widget(overview, body);
        }
        AdminTab::Manage => {
            let manage = Paragraph::new(render_manage_text(admin.manage_selected))
                .block(Block::default().title("Manage").borders(Borders::ALL));
            frame.render_widget(manage, body);
        }
        AdminTab::Transactions => {
            let page = &admin.transactions;
            let rows = page
                .list
                .items()
                .iter()
                .map(|transaction| {
                    vec![
                        transaction.id.to_string(),
                        format_amount(transaction.amount),
                        transaction.status.as_str().to_owned(),
                        short_id(transaction.user.as_deref().unwrap_or_default()),
                        short_id(transaction.merchant.as_deref().unwrap_or_default()),
                        format_date(transaction.created_at),
                    ]
                })
                .collect();
            render_rows(
                frame,
                body,
                &format!("Transactions | {}", page_footer(&page.list)),
                &["ID", "Amount", "Status", "User", "Merchant", "Date"],
                rows,
                page.selected,
            );
        }
    }
}

fn render_merchants(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let (tabs_area, body) = split_tabs(area);
    let merchants = &view_data.merchants;
    let active = merchants.tabs.active();
    let selected = MerchantTab::ALL
        .iter()
        .position(|tab| *tab == active)
        .unwrap_or(0);
    frame.render_widget(
        tab_bar(MerchantTab::ALL.iter().map(|tab| tab.label()).collect(), selected),
        tabs_area,
    );

    match active {
        MerchantTab::Register => {
            let editing = view_data.mode == InputMode::RegisterForm;
            let form = Paragraph::new(render_register_form_text(merchants, editing))
                .block(Block::default().title("Register Merchant").borders(Borders::ALL));
            frame.render_widget(form, body);
        }
        MerchantTab::Approve => {
            let editing = view_data.mode == InputMode::IdInput;
            let text = format!(
                "Merchant ID: {}{}\n\na approve | b block{}",
                merchants.decision_id,
                if editing { "_" } else { "" },
                if merchants.approve.is_pending() || merchants.block.is_pending() {
                    " | working..."
                } else {
                    ""
                }
            );
            let panel = Paragraph::new(text)
                .block(Block::default().title("Approve / Block").borders(Borders::ALL));
            frame.render_widget(panel, body);
        }
        MerchantTab::Details => {
            let editing = view_data.mode == InputMode::IdInput;
            let details = Paragraph::new(render_details_text(merchants, editing))
                .wrap(Wrap { trim: false })
                .block(Block::default().title("Merchant Details").borders(Borders::ALL));
            frame.render_widget(details, body);
        }
        MerchantTab::List => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(body);
            frame.render_widget(
                Paragraph::new(render_filter_text(view_data)),
                parts[0],
            );
            let rows = merchants
                .list
                .items()
                .iter()
                .map(|merchant| {
                    vec![
                        short_id(merchant.id.as_str()),
                        merchant.name.clone(),
                        merchant.email.clone(),
                        or_dash(merchant.company_name.as_deref()).to_owned(),
                        merchant.status.as_str().to_owned(),
                        format_amount(merchant.total_amount),
                        format_date(merchant.created_at),
                    ]
                })
                .collect();
            render_rows(
                frame,
                parts[1],
                &format!("Merchants | {}", page_footer(&merchants.list)),
                &["ID", "Name", "Email", "Company", "Status", "Total", "Created"],
                rows,
                merchants.selected,
            );
        }
    }
}

fn render_fees(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let fees = &view_data.fees;
    let rows = fees
        .list
        .items()
        .iter()
        .map(|fee| {
            vec![
                short_id(fee.id.as_str()),
                fee.fee_type.label().to_owned(),
                fee.display_value(),
                format_date(fee.created_at),
                format_date(fee.updated_at),
            ]
        })
        .collect();
    render_rows(
        frame,
        area,
        &format!("Fee Settings | {}", page_footer(&fees.list)),
        &["ID", "Type", "Value", "Created", "Updated"],
        rows,
        fees.selected,
    );
}

fn render_rows(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    header: &[&str],
    rows: Vec<Vec<String>>,
    selected: usize,
) {
    let widths = vec![Constraint::Min(6); header.len().max(1)];
    let header = Row::new(header.iter().map(|label| {
        Cell::from(label.to_string()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let empty = rows.is_empty();
    let rows = rows.into_iter().enumerate().map(|(index, cells)| {
        let style = if index == selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(cells.into_iter().map(Cell::from)).style(style)
    });
    let title = if empty {
        format!("{title} | no rows")
    } else {
        title.to_owned()
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_overview_text(page: &TransactionsPage) -> String {
    let mut lines = vec![format!(
        "Transactions on page {}: {}",
        page.list.page(),
        page.list.items().len()
    )];
    for (status, count) in page.status_counts() {
        lines.push(format!("  {:<10} {count}", status.as_str()));
    }
    let total: f64 = page
        .list
        .items()
        .iter()
        .filter_map(|transaction| transaction.amount)
        .sum();
    lines.push(format!("Volume: {}", format_amount(Some(total))));
    if page.list.is_loading() {
        lines.push("loading...".to_owned());
    }
    lines.join("\n")
}

fn render_manage_text(selected: usize) -> String {
    MANAGE_LINKS
        .iter()
        .enumerate()
        .map(|(index, (view, blurb))| {
            let marker = if index == selected { ">" } else { " " };
            format!("{marker} {}\n    {blurb}", view.label())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_register_form_text(page: &MerchantsPage, editing: bool) -> String {
    let mut lines = Vec::new();
    for (index, label) in RegisterMerchantForm::FIELDS.iter().enumerate() {
        let value = page.form.field(index).unwrap_or_default();
        let shown = if RegisterMerchantForm::is_secret(index) {
            "*".repeat(value.chars().count())
        } else {
            value.to_owned()
        };
        let marker = if index == page.form_focus { ">" } else { " " };
        let cursor = if editing && index == page.form_focus {
            "_"
        } else {
            ""
        };
        lines.push(format!("{marker} {label:<17} {shown}{cursor}"));
    }
    lines.push(String::new());
    let submit = if page.register.is_pending() {
        "registering..."
    } else if page.form.is_complete() {
        "enter register"
    } else {
        "fill every field except licence no. to register"
    };
    lines.push(submit.to_owned());
    lines.join("\n")
}

fn render_details_text(page: &MerchantsPage, editing: bool) -> String {
    let mut lines = vec![format!(
        "Merchant ID: {}{}",
        page.lookup_id(),
        if editing { "_" } else { "" }
    )];
    lines.push("g details | x transactions".to_owned());

    if page.details.is_pending() || page.transactions.is_pending() {
        lines.push("loading...".to_owned());
    }

    if let Some(merchant) = page.details.data() {
        lines.push(String::new());
        let fields = [
            ("Name", merchant.name.as_str()),
            ("Email", merchant.email.as_str()),
            ("Company", or_dash(merchant.company_name.as_deref())),
            ("Phone", or_dash(merchant.phone_no.as_deref())),
            ("Country", or_dash(merchant.country.as_deref())),
            ("Licence", or_dash(merchant.licence_no.as_deref())),
            ("Role", or_dash(merchant.role.as_deref())),
            ("Status", merchant.status.as_str()),
            ("Wallet", or_dash(merchant.wallet_address.as_deref())),
        ];
        for (label, value) in fields {
            lines.push(format!("{label:<9} {value}"));
        }
        lines.push(format!("{:<9} {}", "Total", format_amount(merchant.total_amount)));
        lines.push(format!(
            "{:<9} {}",
            "API key",
            short_id(merchant.api_key.as_deref().unwrap_or_default())
        ));
        lines.push(format!("{:<9} {}", "Joined", format_date(merchant.created_at)));
    }

    if let Some(transactions) = page.transactions.data() {
        lines.push(String::new());
        if transactions.is_empty() {
            lines.push("No transactions".to_owned());
        }
        for transaction in transactions {
            lines.push(format!(
                "{:<16} {:>12} {:<10} {}",
                short_id(transaction.id.as_str()),
                format_amount(transaction.amount),
                transaction.status.as_str(),
                format_date(transaction.created_at)
            ));
        }
    }
    lines.join("\n")
}

fn render_filter_text(view_data: &ViewData) -> String {
    let merchants = &view_data.merchants;
    let search = if view_data.mode == InputMode::Search {
        format!("{}_", view_data.search_draft)
    } else if merchants.search().is_empty() {
        "-".to_owned()
    } else {
        merchants.search().to_owned()
    };
    format!(
        "search: {search} | status: {} | time: {}",
        merchants.status_filter().label(),
        merchants.time_filter().label()
    )
}

fn render_fee_editor_text(editor: &FeeEditor, saving: bool) -> String {
    let type_choices = [FeeType::Percentage, FeeType::Fixed]
        .iter()
        .map(|fee_type| {
            if *fee_type == editor.form.fee_type {
                format!("[{}]", fee_type.label())
            } else {
                fee_type.label().to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let marker = |index: usize| if editor.focus == index { ">" } else { " " };
    let mut lines = vec![
        format!("{} {:<9} {type_choices}", marker(0), FeeEditor::FIELDS[0]),
        format!("{} {:<9} {}_", marker(1), FeeEditor::FIELDS[1], editor.form.value),
        String::new(),
    ];
    lines.push(if saving {
        "saving...".to_owned()
    } else {
        "enter save | esc cancel".to_owned()
    });
    lines.join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let mode = match view_data.mode {
        InputMode::Nav => "NAV",
        InputMode::Search => "SEARCH",
        InputMode::IdInput => "INPUT",
        InputMode::RegisterForm | InputMode::FeeForm => "FORM",
    };
    let hints = match (view_data.mode, state.view) {
        (InputMode::Nav, View::Admin) => "tab/1-3 tabs | j/k | n/p page | r refresh | d delete | enter open",
        (InputMode::Nav, View::Merchants) => {
            "tab/1-4 tabs | i input | / search | s/t filter | a/b approve/block | g/x lookup"
        }
        (InputMode::Nav, View::Fees) => "c new | e edit | d delete | j/k | n/p page | r refresh",
        (InputMode::Search | InputMode::IdInput, _) => "type | enter done | esc cancel",
        (InputMode::RegisterForm | InputMode::FeeForm, _) => {
            "type | tab/up/down field | enter submit | esc cancel"
        }
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints} | v view | esc back | ? help | q quit"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: q quit | v next view | esc/backspace back | ? help | z dismiss error\n\
tabs: tab/shift+tab cycle | 1-4 jump\n\
lists: j/k select | n/p next/prev page | r refresh\n\
merchants: / search | s status | t time | i edit input | a approve | b block | g details | x transactions\n\
fees: c new | e edit | d delete\n\
admin: enter open link (manage) | d delete transaction\n\
forms: type | tab/up/down field | enter submit | esc cancel\n\
confirm: y yes | n/esc no"
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

#[cfg(test)]
mod tests {
    use super::{
        InputMode, InternalEvent, Job, JobSender, Reply, ViewData, apply_reply, handle_key_event,
        process_internal_events, render, short_display, status_text,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use paydesk_app::{
        Ack, AdminTab, AppState, ListPage, MerchantAction, MerchantDecision, MerchantId,
        MerchantTab, View,
    };
    use paydesk_testkit::{sample_fees, sample_transactions};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::mpsc::{self, Receiver, Sender};

    struct Harness {
        state: AppState,
        view_data: ViewData,
        jobs: Receiver<Job>,
        events_tx: Sender<InternalEvent>,
        events_rx: Receiver<InternalEvent>,
    }

    impl Harness {
        fn new(view: View) -> Self {
            let (jobs_tx, jobs) = mpsc::channel();
            let (events_tx, events_rx) = mpsc::channel();
            let mut view_data = ViewData::new(&JobSender::new(jobs_tx), 10);
            view_data.activate(view);
            Self {
                state: AppState::new(view),
                view_data,
                jobs,
                events_tx,
                events_rx,
            }
        }

        fn press(&mut self, code: KeyCode) -> bool {
            handle_key_event(
                &mut self.state,
                &mut self.view_data,
                &self.events_tx,
                KeyEvent::new(code, KeyModifiers::NONE),
            )
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        fn drain_jobs(&self) -> Vec<Job> {
            self.jobs.try_iter().collect()
        }

        fn deliver(&mut self, reply: Reply) {
            self.events_tx
                .send(InternalEvent::Api(reply))
                .expect("event channel open");
            process_internal_events(
                &mut self.state,
                &mut self.view_data,
                &self.events_tx,
                &self.events_rx,
            );
        }
    }

    #[test]
    fn short_display_keeps_short_values() {
        assert_eq!(short_display("", 6, 4), "-");
        assert_eq!(short_display("TXN001", 6, 4), "TXN001");
        assert_eq!(short_display("abcdefghijklm", 6, 4), "abcdefghijklm");
        assert_eq!(
            short_display("64f0c2a9e1b3000000000007", 6, 4),
            "64f0c2...0007"
        );
    }

    #[test]
    fn back_from_fees_without_history_exits() {
        let mut harness = Harness::new(View::Fees);
        assert!(harness.press(KeyCode::Esc));
    }

    #[test]
    fn back_walks_tabs_before_leaving_view() {
        let mut harness = Harness::new(View::Admin);
        harness.press(KeyCode::Char('v'));
        assert_eq!(harness.state.view, View::Merchants);

        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Char('4'));
        assert_eq!(harness.view_data.merchants.tabs.active(), MerchantTab::List);

        assert!(!harness.press(KeyCode::Esc));
        assert_eq!(harness.view_data.merchants.tabs.active(), MerchantTab::Approve);
        assert!(!harness.press(KeyCode::Backspace));
        assert_eq!(harness.view_data.merchants.tabs.active(), MerchantTab::Register);

        assert!(!harness.press(KeyCode::Esc));
        assert_eq!(harness.state.view, View::Admin);
        assert!(harness.press(KeyCode::Esc));
    }

    #[test]
    fn reselecting_active_tab_does_not_grow_history() {
        let mut harness = Harness::new(View::Admin);
        harness.press(KeyCode::Char('3'));
        harness.press(KeyCode::Char('3'));
        assert_eq!(harness.view_data.admin.tabs.active(), AdminTab::Transactions);
        assert_eq!(harness.view_data.admin.tabs.history(), &[AdminTab::Overview]);
    }

    #[test]
    fn entering_a_view_loads_its_list_once() {
        let mut harness = Harness::new(View::Admin);
        assert!(matches!(
            harness.drain_jobs().as_slice(),
            [Job::ListTransactions(_)]
        ));

        harness.press(KeyCode::Char('v'));
        let jobs = harness.drain_jobs();
        assert!(matches!(jobs.as_slice(), [Job::ListMerchants(_)]));
        let Job::ListMerchants(request) = &jobs[0] else {
            unreachable!();
        };
        harness.deliver(Reply::Merchants {
            token: request.token,
            result: Ok(ListPage::new(Vec::new())),
        });

        harness.press(KeyCode::Char('v'));
        harness.drain_jobs();
        harness.press(KeyCode::Esc);
        assert_eq!(harness.state.view, View::Merchants);
        assert!(harness.drain_jobs().is_empty());
    }

    #[test]
    fn fee_delete_waits_for_confirmation() {
        let mut harness = Harness::new(View::Fees);
        let jobs = harness.drain_jobs();
        let Some(Job::ListFees(request)) = jobs.first() else {
            panic!("expected fee list job, got {jobs:?}");
        };
        harness.deliver(Reply::Fees {
            token: request.token,
            result: Ok(ListPage::new(sample_fees(3))),
        });

        harness.press(KeyCode::Char('j'));
        harness.press(KeyCode::Char('d'));
        assert!(harness.view_data.confirm.is_some());
        assert!(harness.drain_jobs().is_empty());

        harness.press(KeyCode::Char('x'));
        assert!(harness.view_data.confirm.is_some());
        harness.press(KeyCode::Char('n'));
        assert!(harness.view_data.confirm.is_none());
        assert!(harness.drain_jobs().is_empty());

        harness.press(KeyCode::Char('d'));
        harness.press(KeyCode::Char('y'));
        let jobs = harness.drain_jobs();
        let [Job::DeleteFee { id, .. }] = jobs.as_slice() else {
            panic!("expected one delete, got {jobs:?}");
        };
        assert_eq!(id.as_str(), "fee-1");
    }

    #[test]
    fn transaction_delete_refreshes_after_success() {
        let mut harness = Harness::new(View::Admin);
        harness.press(KeyCode::Char('3'));
        let jobs = harness.drain_jobs();
        let Some(Job::ListTransactions(request)) = jobs.first() else {
            panic!("expected transaction list job");
        };
        harness.deliver(Reply::Transactions {
            token: request.token,
            result: Ok(ListPage::new(sample_transactions(2)).with_total_pages(1)),
        });

        harness.press(KeyCode::Char('d'));
        harness.press(KeyCode::Char('y'));
        let jobs = harness.drain_jobs();
        let [Job::DeleteTransaction { token, id }] = jobs.as_slice() else {
            panic!("expected one delete, got {jobs:?}");
        };
        assert_eq!(id.as_str(), "TXN001");

        harness.deliver(Reply::TransactionDeleted {
            token: *token,
            result: Ok(Ack::default()),
        });
        assert_eq!(harness.state.status_line.as_deref(), Some("Transaction deleted"));
        assert!(matches!(
            harness.drain_jobs().as_slice(),
            [Job::ListTransactions(_)]
        ));
    }

    #[test]
    fn register_form_typing_fills_focused_field() {
        let mut harness = Harness::new(View::Merchants);
        harness.press(KeyCode::Char('i'));
        assert_eq!(harness.view_data.mode, InputMode::RegisterForm);

        harness.type_text("Ada");
        harness.press(KeyCode::Tab);
        harness.type_text("ada@acme.test");
        harness.press(KeyCode::Backspace);

        let form = &harness.view_data.merchants.form;
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@acme.tes");

        harness.press(KeyCode::Esc);
        assert_eq!(harness.view_data.mode, InputMode::Nav);
    }

    #[test]
    fn search_commits_on_enter() {
        let mut harness = Harness::new(View::Merchants);
        harness.drain_jobs();
        harness.press(KeyCode::Char('/'));
        harness.type_text("acme");
        assert!(harness.drain_jobs().is_empty());
        harness.press(KeyCode::Enter);

        let jobs = harness.drain_jobs();
        let [Job::ListMerchants(request)] = jobs.as_slice() else {
            panic!("expected one merchant list job, got {jobs:?}");
        };
        assert_eq!(request.query.filters.get("search").map(String::as_str), Some("acme"));
        assert_eq!(harness.view_data.mode, InputMode::Nav);
    }

    #[test]
    fn decided_reply_reports_success() {
        let mut harness = Harness::new(View::Merchants);
        harness.press(KeyCode::Char('2'));
        harness.press(KeyCode::Char('i'));
        harness.type_text("m1");
        harness.press(KeyCode::Enter);
        harness.drain_jobs();
        harness.press(KeyCode::Char('a'));

        let jobs = harness.drain_jobs();
        let [Job::DecideMerchant { token, decision }] = jobs.as_slice() else {
            panic!("expected one decision job, got {jobs:?}");
        };
        assert_eq!(
            decision,
            &MerchantDecision {
                merchant_id: MerchantId::new("m1"),
                action: MerchantAction::Approve,
            }
        );
        let message = apply_reply(
            &mut harness.view_data,
            Reply::Decided {
                token: *token,
                decision: decision.clone(),
                result: Ok(Ack::default()),
            },
        );
        assert_eq!(message.as_deref(), Some("Merchant m1 approved successfully"));
        assert!(harness.view_data.merchants.decision_id.is_empty());
    }

    #[test]
    fn status_text_shows_mode_and_status() {
        let mut harness = Harness::new(View::Fees);
        assert!(status_text(&harness.state, &harness.view_data).starts_with("NAV |"));
        harness.press(KeyCode::Char('c'));
        harness.state.status_line = Some("Fee created".to_owned());
        let text = status_text(&harness.state, &harness.view_data);
        assert!(text.starts_with("FORM | Fee created"));
    }

    #[test]
    fn render_draws_fee_table() -> anyhow::Result<()> {
        let mut harness = Harness::new(View::Fees);
        let jobs = harness.drain_jobs();
        let Some(Job::ListFees(request)) = jobs.first() else {
            panic!("expected fee list job");
        };
        harness.deliver(Reply::Fees {
            token: request.token,
            result: Ok(ListPage::new(sample_fees(2)).with_total_pages(1)),
        });

        let mut terminal = Terminal::new(TestBackend::new(100, 20))?;
        terminal.draw(|frame| render(frame, &harness.state, &harness.view_data))?;
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Fee Management"));
        assert!(screen.contains("Fee Settings | Page 1 of 1"));
        assert!(screen.contains("1.5%"));
        assert!(screen.contains("$2.5"));
        Ok(())
    }
}
