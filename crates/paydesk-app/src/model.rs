// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantStatus {
    Approved,
    Blocked,
    #[default]
    #[serde(other)]
    Pending,
}

impl MerchantStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeType {
    Percentage,
    Fixed,
}

impl FeeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::Fixed => "Fixed Amount",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Percentage => Self::Fixed,
            Self::Fixed => Self::Percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Failed,
    #[default]
    #[serde(other)]
    Pending,
}

impl TransactionStatus {
    pub const ALL: [Self; 3] = [Self::Completed, Self::Pending, Self::Failed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    #[serde(rename = "_id")]
    pub id: MerchantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub licence_no: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "approved", deserialize_with = "null_as_default")]
    pub status: MerchantStatus,
    #[serde(default, rename = "totalAmt", deserialize_with = "lenient_amount")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    #[serde(rename = "_id")]
    pub id: FeeId,
    pub fee_type: FeeType,
    pub value: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Fee {
    pub fn display_value(&self) -> String {
        match self.fee_type {
            FeeType::Percentage => format!("{}%", self.value),
            FeeType::Fixed => format!("${}", self.value),
        }
    }
}

/// Reply body of a write that carries no entity back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TransactionRecord")]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Option<f64>,
    pub status: TransactionStatus,
    pub user: Option<String>,
    pub merchant: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

/// Wire shape of a transaction; the id key differs between endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecord {
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    amount: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    status: TransactionStatus,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        let id = record
            .transaction_id
            .or(record.id)
            .or(record.object_id)
            .unwrap_or_default();
        Self {
            id: TransactionId::new(id),
            amount: record.amount,
            status: record.status,
            user: record.user,
            merchant: record.merchant,
            created_at: record.created_at,
        }
    }
}

/// `null` reads as the default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Amount>::deserialize(deserializer)? {
        Some(Amount::Number(value)) => Some(value),
        Some(Amount::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Approved,
    Pending,
    Blocked,
}

impl StatusFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Approved, Self::Pending, Self::Blocked];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Blocked => "blocked",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Status",
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::Blocked => "Blocked",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    #[default]
    All,
    Today,
    Last7,
    Last30,
}

impl TimeFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Today, Self::Last7, Self::Last30];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Last7 => "last7",
            Self::Last30 => "last30",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Today => "Today",
            Self::Last7 => "Last 7 Days",
            Self::Last30 => "Last 30 Days",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Admin,
    Merchants,
    Fees,
}

impl View {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Merchants, Self::Fees];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin Panel",
            Self::Merchants => "Merchant Management",
            Self::Fees => "Fee Management",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Merchants => "merchants",
            Self::Fees => "fees",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "merchants" => Some(Self::Merchants),
            "fees" => Some(Self::Fees),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminTab {
    Overview,
    Manage,
    Transactions,
}

impl AdminTab {
    pub const ALL: [Self; 3] = [Self::Overview, Self::Manage, Self::Transactions];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Manage => "Manage",
            Self::Transactions => "Transactions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MerchantTab {
    Register,
    Approve,
    Details,
    List,
}

impl MerchantTab {
    pub const ALL: [Self; 4] = [Self::Register, Self::Approve, Self::Details, Self::List];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::Approve => "Approve / Block",
            Self::Details => "Details",
            Self::List => "Merchants",
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let index = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}
