// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use paydesk_app::{
    Confirm, Fee, FeeId, FeeType, LeaveView, ListEndpoint, ListPage, ListRequest, Merchant,
    MerchantId, MerchantStatus, RequestToken, Transaction, TransactionId, TransactionStatus,
    WriteEndpoint,
};
use time::{Duration, OffsetDateTime, macros::datetime};

const COMPANY_NAMES: [&str; 8] = [
    "Northwind Traders",
    "Bluebird Goods",
    "Copperleaf Cafe",
    "Harbor Supply",
    "Juniper Labs",
    "Kestrel Outfitters",
    "Lumen Books",
    "Maple Mobile",
];

const FIRST_NAMES: [&str; 8] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Quinn", "Rowan",
];

const EPOCH: OffsetDateTime = datetime!(2026-01-05 09:30 UTC);

/// Records every list fetch instead of sending it anywhere.
#[derive(Debug, Clone, Default)]
pub struct RecordingListEndpoint {
    requests: Vec<ListRequest>,
}

impl RecordingListEndpoint {
    pub fn requests(&self) -> &[ListRequest] {
        &self.requests
    }

    pub fn last(&self) -> Option<&ListRequest> {
        self.requests.last()
    }

    pub fn count(&self) -> usize {
        self.requests.len()
    }
}

impl<T> ListEndpoint<T> for RecordingListEndpoint {
    fn fetch(&mut self, request: ListRequest) {
        self.requests.push(request);
    }
}

/// Records every write with the token it was issued under.
#[derive(Debug, Clone)]
pub struct RecordingWriteEndpoint<I> {
    submitted: Vec<(RequestToken, I)>,
}

impl<I> Default for RecordingWriteEndpoint<I> {
    fn default() -> Self {
        Self {
            submitted: Vec::new(),
        }
    }
}

impl<I> RecordingWriteEndpoint<I> {
    pub fn submitted(&self) -> &[(RequestToken, I)] {
        &self.submitted
    }

    pub fn count(&self) -> usize {
        self.submitted.len()
    }
}

impl<I> WriteEndpoint<I> for RecordingWriteEndpoint<I> {
    fn submit(&mut self, token: RequestToken, input: I) {
        self.submitted.push((token, input));
    }
}

/// Answers every prompt the same way and remembers what was asked.
#[derive(Debug, Clone)]
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Vec<String>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_owned());
        self.answer
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveCounter {
    pub count: usize,
}

impl LeaveView for LeaveCounter {
    fn leave_view(&mut self) {
        self.count += 1;
    }
}

pub fn merchant(id: &str, name: &str, status: MerchantStatus) -> Merchant {
    let slug = name.to_lowercase().replace(' ', ".");
    Merchant {
        id: MerchantId::new(id),
        name: name.to_owned(),
        email: format!("{slug}@example.com"),
        company_name: Some(format!("{name} Ltd")),
        phone_no: Some("+15550100".to_owned()),
        country: Some("US".to_owned()),
        licence_no: None,
        role: Some("merchant".to_owned()),
        status,
        total_amount: Some(0.0),
        wallet_address: None,
        api_key: None,
        api_secret: None,
        created_at: Some(EPOCH),
        updated_at: Some(EPOCH),
    }
}

pub fn fee(id: &str, fee_type: FeeType, value: f64) -> Fee {
    Fee {
        id: FeeId::new(id),
        fee_type,
        value,
        created_at: Some(EPOCH),
        updated_at: Some(EPOCH),
    }
}

pub fn transaction(id: &str, amount: f64, status: TransactionStatus) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        amount: Some(amount),
        status,
        user: None,
        merchant: None,
        created_at: Some(EPOCH),
    }
}

/// Deterministic merchants with rotating names and statuses.
pub fn sample_merchants(count: usize) -> Vec<Merchant> {
    let statuses = [
        MerchantStatus::Pending,
        MerchantStatus::Approved,
        MerchantStatus::Blocked,
    ];
    (0..count)
        .map(|index| {
            let name = format!(
                "{} {}",
                FIRST_NAMES[index % FIRST_NAMES.len()],
                COMPANY_NAMES[index % COMPANY_NAMES.len()]
            );
            let mut row = merchant(
                &format!("64f0c2a9e1b3{index:012}"),
                &name,
                statuses[index % statuses.len()],
            );
            row.created_at = Some(EPOCH + Duration::days(index as i64));
            row
        })
        .collect()
}

pub fn sample_fees(count: usize) -> Vec<Fee> {
    (0..count)
        .map(|index| {
            let fee_type = if index % 2 == 0 {
                FeeType::Percentage
            } else {
                FeeType::Fixed
            };
            fee(&format!("fee-{index}"), fee_type, 1.5 + index as f64)
        })
        .collect()
}

pub fn sample_transactions(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|index| {
            transaction(
                &format!("TXN{:03}", index + 1),
                100.0 * (index as f64 + 1.0),
                TransactionStatus::ALL[index % TransactionStatus::ALL.len()],
            )
        })
        .collect()
}

/// A page shaped the way the fee and transaction endpoints report it.
pub fn page_of<T>(items: Vec<T>, total_pages: u32) -> ListPage<T> {
    ListPage::new(items).with_total_pages(total_pages)
}
