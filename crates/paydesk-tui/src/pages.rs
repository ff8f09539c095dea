// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Per-view controllers. Each page owns its own navigator, lists, and
//! runners; nothing here is shared between views.

use paydesk_app::{
    Ack, AdminTab, ApiError, AsyncRequestState, Confirm, Fee, FeeChange, FeeForm, FeeId,
    FeeType, FinishOutcome, ListPage, ListResource, ListUpdate, MISSING_MERCHANT_ID_MESSAGE,
    Merchant, MerchantAction, MerchantDecision, MerchantId, MerchantTab, MutationRunner,
    RegisterMerchantForm, RequestPhase, RequestToken, RunOutcome, StatusFilter, TabNavigator,
    TimeFilter, Transaction, TransactionId, TransactionStatus, View,
};

use crate::worker::{Job, JobSender};

pub const DELETE_TRANSACTION_PROMPT: &str = "Are you sure you want to delete this transaction?";
pub const DELETE_FEE_PROMPT: &str = "Are you sure you want to delete this fee setting?";

/// Entries on the admin panel's manage tab.
pub const MANAGE_LINKS: [(View, &str); 2] = [
    (View::Merchants, "Manage merchant accounts, verify documents, and handle approvals."),
    (View::Fees, "Manage fees."),
];

fn never_asked(_: &str) -> bool {
    true
}

fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

fn move_selection(selected: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.saturating_add_signed(delta).min(len - 1)
}

pub struct TransactionsPage {
    pub list: ListResource<Transaction, JobSender>,
    pub delete: MutationRunner<TransactionId, Ack, JobSender>,
    pub selected: usize,
}

impl TransactionsPage {
    pub fn new(jobs: &JobSender, page_size: u32) -> Self {
        Self {
            list: ListResource::new(jobs.clone(), page_size)
                .with_failure_message("Failed to fetch transactions"),
            delete: MutationRunner::new(jobs.clone(), "Failed to delete transaction")
                .with_confirmation(DELETE_TRANSACTION_PROMPT),
            selected: 0,
        }
    }

    /// First visit loads the list; later visits keep what is on screen.
    pub fn activate(&mut self) -> Option<RequestToken> {
        (self.list.phase() == RequestPhase::Idle && self.list.items().is_empty())
            .then(|| self.list.refresh())
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.list.items().get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = move_selection(self.selected, self.list.items().len(), delta);
    }

    pub fn delete(&mut self, id: TransactionId, confirm: &mut impl Confirm) -> RunOutcome {
        self.delete.run(id, confirm)
    }

    pub fn finish_list(
        &mut self,
        token: RequestToken,
        result: Result<ListPage<Transaction>, ApiError>,
    ) -> ListUpdate {
        let update = self.list.apply(token, result);
        self.selected = clamp_selection(self.selected, self.list.items().len());
        update
    }

    pub fn finish_delete(
        &mut self,
        token: RequestToken,
        result: Result<Ack, ApiError>,
    ) -> Option<String> {
        match self.delete.finish(token, result, Some(&mut self.list)) {
            FinishOutcome::Succeeded { .. } => Some("Transaction deleted".to_owned()),
            FinishOutcome::Failed | FinishOutcome::Stale => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.delete.error_message().or(self.list.error_message())
    }

    pub fn dismiss_error(&mut self) {
        self.delete.dismiss_error();
        self.list.dismiss_error();
    }

    /// Rows on the loaded page by status, in [`TransactionStatus::ALL`] order.
    pub fn status_counts(&self) -> [(TransactionStatus, usize); 3] {
        TransactionStatus::ALL.map(|status| {
            let count = self
                .list
                .items()
                .iter()
                .filter(|transaction| transaction.status == status)
                .count();
            (status, count)
        })
    }
}

pub struct AdminPanel {
    pub tabs: TabNavigator<AdminTab>,
    pub transactions: TransactionsPage,
    pub manage_selected: usize,
}

impl AdminPanel {
    pub fn new(jobs: &JobSender, page_size: u32) -> Self {
        Self {
            tabs: TabNavigator::new(AdminTab::Overview),
            transactions: TransactionsPage::new(jobs, page_size),
            manage_selected: 0,
        }
    }

    /// The overview summarizes the transaction page, so both tabs load it.
    pub fn activate(&mut self) -> Option<RequestToken> {
        match self.tabs.active() {
            AdminTab::Overview | AdminTab::Transactions => self.transactions.activate(),
            AdminTab::Manage => None,
        }
    }

    pub fn switch_to(&mut self, tab: AdminTab) -> bool {
        let switched = self.tabs.switch_to(tab);
        if switched {
            self.activate();
        }
        switched
    }

    pub fn move_selection(&mut self, delta: isize) {
        match self.tabs.active() {
            AdminTab::Manage => {
                self.manage_selected =
                    move_selection(self.manage_selected, MANAGE_LINKS.len(), delta);
            }
            AdminTab::Transactions => self.transactions.move_selection(delta),
            AdminTab::Overview => {}
        }
    }

    pub fn selected_link(&self) -> Option<View> {
        (self.tabs.active() == AdminTab::Manage)
            .then(|| MANAGE_LINKS.get(self.manage_selected).map(|(view, _)| *view))
            .flatten()
    }
}

pub struct MerchantsPage {
    pub tabs: TabNavigator<MerchantTab>,
    pub list: ListResource<Merchant, JobSender>,
    pub register: MutationRunner<RegisterMerchantForm, Ack, JobSender>,
    pub approve: MutationRunner<MerchantDecision, Ack, JobSender>,
    pub block: MutationRunner<MerchantDecision, Ack, JobSender>,
    pub details: AsyncRequestState<Merchant>,
    pub transactions: AsyncRequestState<Vec<Transaction>>,
    pub form: RegisterMerchantForm,
    pub form_focus: usize,
    pub decision_id: String,
    lookup_id: String,
    search: String,
    status: StatusFilter,
    time: TimeFilter,
    pub selected: usize,
    jobs: JobSender,
}

impl MerchantsPage {
    pub fn new(jobs: &JobSender, page_size: u32) -> Self {
        Self {
            tabs: TabNavigator::new(MerchantTab::Register),
            list: ListResource::new(jobs.clone(), page_size)
                .with_failure_message("Failed to fetch merchants"),
            register: MutationRunner::new(jobs.clone(), "Registration failed"),
            approve: MutationRunner::new(jobs.clone(), MerchantAction::Approve.failure_message()),
            block: MutationRunner::new(jobs.clone(), MerchantAction::Block.failure_message()),
            details: AsyncRequestState::new(),
            transactions: AsyncRequestState::new(),
            form: RegisterMerchantForm::default(),
            form_focus: 0,
            decision_id: String::new(),
            lookup_id: String::new(),
            search: String::new(),
            status: StatusFilter::All,
            time: TimeFilter::All,
            selected: 0,
            jobs: jobs.clone(),
        }
    }

    pub fn activate(&mut self) -> Option<RequestToken> {
        (self.list.phase() == RequestPhase::Idle && self.list.items().is_empty())
            .then(|| self.list.refresh())
    }

    pub fn switch_to(&mut self, tab: MerchantTab) -> bool {
        self.tabs.switch_to(tab)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status
    }

    pub fn time_filter(&self) -> TimeFilter {
        self.time
    }

    /// Blank search drops the parameter instead of sending an empty one.
    pub fn set_search(&mut self, text: &str) -> Option<RequestToken> {
        let text = text.trim();
        if text == self.search {
            return None;
        }
        self.search = text.to_owned();
        if text.is_empty() {
            self.list.clear_filter("search")
        } else {
            Some(self.list.set_filter("search", text))
        }
    }

    pub fn cycle_status(&mut self) -> Option<RequestToken> {
        self.status = self.status.next();
        match self.status {
            StatusFilter::All => self.list.clear_filter("status"),
            status => Some(self.list.set_filter("status", status.as_str())),
        }
    }

    pub fn cycle_time(&mut self) -> Option<RequestToken> {
        self.time = self.time.next();
        match self.time {
            TimeFilter::All => self.list.clear_filter("time"),
            time => Some(self.list.set_filter("time", time.as_str())),
        }
    }

    pub fn lookup_id(&self) -> &str {
        &self.lookup_id
    }

    /// A different id invalidates whatever was looked up for the old one.
    pub fn set_lookup_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id == self.lookup_id {
            return;
        }
        self.lookup_id = id;
        self.details.reset();
        self.transactions.reset();
    }

    pub fn edit_lookup_id(&mut self, edit: impl FnOnce(&mut String)) {
        let mut id = self.lookup_id.clone();
        edit(&mut id);
        self.set_lookup_id(id);
    }

    pub fn lookup_details(&mut self) -> Option<RequestToken> {
        let id = MerchantId::new(self.lookup_id.trim());
        if id.is_blank() {
            self.details.fail_immediately(MISSING_MERCHANT_ID_MESSAGE);
            return None;
        }
        let token = self.details.start();
        self.jobs.send(Job::MerchantDetail { token, id });
        Some(token)
    }

    pub fn lookup_transactions(&mut self) -> Option<RequestToken> {
        let id = MerchantId::new(self.lookup_id.trim());
        if id.is_blank() {
            self.transactions
                .fail_immediately(MISSING_MERCHANT_ID_MESSAGE);
            return None;
        }
        let token = self.transactions.start();
        self.jobs.send(Job::MerchantTransactions { token, id });
        Some(token)
    }

    pub fn submit_register(&mut self) -> RunOutcome {
        self.register.run(self.form.clone(), &mut never_asked)
    }

    pub fn decide(&mut self, action: MerchantAction, merchant_id: MerchantId) -> RunOutcome {
        let decision = MerchantDecision {
            merchant_id: MerchantId::new(merchant_id.trimmed()),
            action,
        };
        self.runner_mut(action).run(decision, &mut never_asked)
    }

    /// Acts on the id typed into the approve/block tab.
    pub fn decide_typed(&mut self, action: MerchantAction) -> RunOutcome {
        let id = MerchantId::new(self.decision_id.as_str());
        self.decide(action, id)
    }

    pub fn selected_merchant(&self) -> Option<&Merchant> {
        self.list.items().get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = move_selection(self.selected, self.list.items().len(), delta);
    }

    pub fn move_form_focus(&mut self, delta: isize) {
        let fields = RegisterMerchantForm::FIELDS.len() as isize;
        self.form_focus = (self.form_focus as isize + delta).rem_euclid(fields) as usize;
    }

    pub fn finish_list(
        &mut self,
        token: RequestToken,
        result: Result<ListPage<Merchant>, ApiError>,
    ) -> ListUpdate {
        let update = self.list.apply(token, result);
        self.selected = clamp_selection(self.selected, self.list.items().len());
        update
    }

    pub fn finish_register(
        &mut self,
        token: RequestToken,
        result: Result<Ack, ApiError>,
    ) -> Option<String> {
        match self.register.finish(token, result, Some(&mut self.list)) {
            FinishOutcome::Succeeded { .. } => {
                self.form = RegisterMerchantForm::default();
                self.form_focus = 0;
                Some("Merchant registered successfully".to_owned())
            }
            FinishOutcome::Failed | FinishOutcome::Stale => None,
        }
    }

    pub fn finish_decision(
        &mut self,
        token: RequestToken,
        decision: &MerchantDecision,
        result: Result<Ack, ApiError>,
    ) -> Option<String> {
        let runner = match decision.action {
            MerchantAction::Approve => &mut self.approve,
            MerchantAction::Block => &mut self.block,
        };
        match runner.finish(token, result, Some(&mut self.list)) {
            FinishOutcome::Succeeded { .. } => {
                self.decision_id.clear();
                Some(format!(
                    "Merchant {} {} successfully",
                    decision.merchant_id,
                    decision.action.past_tense()
                ))
            }
            FinishOutcome::Failed | FinishOutcome::Stale => None,
        }
    }

    pub fn finish_details(
        &mut self,
        token: RequestToken,
        result: Result<Merchant, ApiError>,
    ) -> Option<String> {
        let accepted = match result {
            Ok(merchant) => self.details.resolve(token, merchant),
            Err(error) => {
                self.details
                    .reject(token, error.user_message("Failed to fetch merchant details"));
                false
            }
        };
        accepted.then(|| "Merchant details fetched successfully".to_owned())
    }

    pub fn finish_transactions(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Transaction>, ApiError>,
    ) -> Option<String> {
        let accepted = match result {
            Ok(transactions) => self.transactions.resolve(token, transactions),
            Err(error) => {
                self.transactions
                    .reject(token, error.user_message("Failed to fetch transactions"));
                false
            }
        };
        accepted.then(|| "Merchant transactions fetched successfully".to_owned())
    }

    /// The most relevant failure for the tab on screen.
    pub fn error_message(&self) -> Option<&str> {
        let tab_error = match self.tabs.active() {
            MerchantTab::Register => self.register.error_message(),
            MerchantTab::Approve => self
                .approve
                .error_message()
                .or(self.block.error_message()),
            MerchantTab::Details => self
                .details
                .error_message()
                .or(self.transactions.error_message()),
            MerchantTab::List => None,
        };
        tab_error.or(self.list.error_message())
    }

    pub fn dismiss_error(&mut self) {
        self.register.dismiss_error();
        self.approve.dismiss_error();
        self.block.dismiss_error();
        self.details.dismiss_error();
        self.transactions.dismiss_error();
        self.list.dismiss_error();
    }

    pub fn is_busy(&self) -> bool {
        self.register.is_pending()
            || self.approve.is_pending()
            || self.block.is_pending()
            || self.details.is_pending()
            || self.transactions.is_pending()
    }

    fn runner_mut(
        &mut self,
        action: MerchantAction,
    ) -> &mut MutationRunner<MerchantDecision, Ack, JobSender> {
        match action {
            MerchantAction::Approve => &mut self.approve,
            MerchantAction::Block => &mut self.block,
        }
    }
}

/// The fee form while it is open. `target` is `None` for a new fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeEditor {
    pub target: Option<FeeId>,
    pub form: FeeForm,
    pub focus: usize,
}

impl FeeEditor {
    pub const FIELDS: [&'static str; 2] = ["Fee Type", "Value"];

    pub fn change(&self) -> FeeChange {
        match &self.target {
            Some(id) => FeeChange::Update {
                id: id.clone(),
                form: self.form.clone(),
            },
            None => FeeChange::Create(self.form.clone()),
        }
    }

    pub fn move_focus(&mut self, delta: isize) {
        let fields = Self::FIELDS.len() as isize;
        self.focus = (self.focus as isize + delta).rem_euclid(fields) as usize;
    }

    /// Typing on the type field picks by initial; anything else toggles.
    pub fn type_char(&mut self, ch: char) {
        if self.focus == 0 {
            self.form.fee_type = match ch.to_ascii_lowercase() {
                'p' | '%' => FeeType::Percentage,
                'f' | '$' => FeeType::Fixed,
                _ => self.form.fee_type.toggled(),
            };
        } else {
            self.form.value.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == 1 {
            self.form.value.pop();
        }
    }
}

pub struct FeesPage {
    pub list: ListResource<Fee, JobSender>,
    pub save: MutationRunner<FeeChange, Ack, JobSender>,
    pub delete: MutationRunner<FeeId, Ack, JobSender>,
    pub editing: AsyncRequestState<Fee>,
    pub editor: Option<FeeEditor>,
    pub selected: usize,
    jobs: JobSender,
}

impl FeesPage {
    pub fn new(jobs: &JobSender, page_size: u32) -> Self {
        Self {
            list: ListResource::new(jobs.clone(), page_size)
                .with_failure_message("Failed to fetch fees"),
            save: MutationRunner::new(jobs.clone(), "Failed to save fee"),
            delete: MutationRunner::new(jobs.clone(), "Failed to delete fee")
                .with_confirmation(DELETE_FEE_PROMPT),
            editing: AsyncRequestState::new(),
            editor: None,
            selected: 0,
            jobs: jobs.clone(),
        }
    }

    pub fn activate(&mut self) -> Option<RequestToken> {
        (self.list.phase() == RequestPhase::Idle && self.list.items().is_empty())
            .then(|| self.list.refresh())
    }

    pub fn selected_fee(&self) -> Option<&Fee> {
        self.list.items().get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = move_selection(self.selected, self.list.items().len(), delta);
    }

    pub fn open_new(&mut self) {
        self.editing.reset();
        self.editor = Some(FeeEditor {
            target: None,
            form: FeeForm::default(),
            focus: 1,
        });
    }

    /// Edits start from the server's latest copy, not the row on screen.
    pub fn begin_edit(&mut self, id: FeeId) -> RequestToken {
        let token = self.editing.start();
        self.jobs.send(Job::FeeDetail { token, id });
        token
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
        self.editing.reset();
    }

    pub fn submit(&mut self) -> Option<RunOutcome> {
        let change = self.editor.as_ref()?.change();
        Some(self.save.run(change, &mut never_asked))
    }

    pub fn delete(&mut self, id: FeeId, confirm: &mut impl Confirm) -> RunOutcome {
        self.delete.run(id, confirm)
    }

    pub fn finish_list(
        &mut self,
        token: RequestToken,
        result: Result<ListPage<Fee>, ApiError>,
    ) -> ListUpdate {
        let update = self.list.apply(token, result);
        self.selected = clamp_selection(self.selected, self.list.items().len());
        update
    }

    pub fn finish_edit_fetch(&mut self, token: RequestToken, result: Result<Fee, ApiError>) {
        match result {
            Ok(fee) => {
                let form = FeeForm::from_fee(&fee);
                let target = fee.id.clone();
                if self.editing.resolve(token, fee) {
                    self.editor = Some(FeeEditor {
                        target: Some(target),
                        form,
                        focus: 1,
                    });
                }
            }
            Err(error) => {
                self.editing
                    .reject(token, error.user_message("Failed to fetch fee for editing"));
            }
        }
    }

    /// The message follows the change that was sent, whatever the editor
    /// shows by the time the reply lands.
    pub fn finish_save(
        &mut self,
        token: RequestToken,
        change: &FeeChange,
        result: Result<Ack, ApiError>,
    ) -> Option<String> {
        match self.save.finish(token, result, Some(&mut self.list)) {
            FinishOutcome::Succeeded { .. } => {
                self.close_editor();
                let message = match change {
                    FeeChange::Update { .. } => "Fee updated",
                    FeeChange::Create(_) => "Fee created",
                };
                Some(message.to_owned())
            }
            FinishOutcome::Failed | FinishOutcome::Stale => None,
        }
    }

    pub fn finish_delete(
        &mut self,
        token: RequestToken,
        result: Result<Ack, ApiError>,
    ) -> Option<String> {
        match self.delete.finish(token, result, Some(&mut self.list)) {
            FinishOutcome::Succeeded { .. } => Some("Fee deleted".to_owned()),
            FinishOutcome::Failed | FinishOutcome::Stale => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.save
            .error_message()
            .or(self.delete.error_message())
            .or(self.editing.error_message())
            .or(self.list.error_message())
    }

    pub fn dismiss_error(&mut self) {
        self.save.dismiss_error();
        self.delete.dismiss_error();
        self.editing.dismiss_error();
        self.list.dismiss_error();
    }
}
