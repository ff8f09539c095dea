// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::error::ApiError;
use crate::ids::{FeeId, MerchantId, TransactionId};
use crate::model::{Fee, FeeType};
use crate::mutation::Validate;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords don't match";
pub const MISSING_MERCHANT_ID_MESSAGE: &str = "Please enter a merchant ID";
pub const MISSING_FEE_VALUE_MESSAGE: &str = "Fee value required";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMerchantForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub country: String,
    pub phone_no: String,
    pub company_name: String,
    pub licence_no: String,
}

impl RegisterMerchantForm {
    pub const FIELDS: [&'static str; 8] = [
        "Name",
        "Email",
        "Password",
        "Confirm Password",
        "Country",
        "Phone No.",
        "Company Name",
        "Licence No.",
    ];

    pub fn field(&self, index: usize) -> Option<&str> {
        let value = match index {
            0 => &self.name,
            1 => &self.email,
            2 => &self.password,
            3 => &self.confirm_password,
            4 => &self.country,
            5 => &self.phone_no,
            6 => &self.company_name,
            7 => &self.licence_no,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        let value = match index {
            0 => &mut self.name,
            1 => &mut self.email,
            2 => &mut self.password,
            3 => &mut self.confirm_password,
            4 => &mut self.country,
            5 => &mut self.phone_no,
            6 => &mut self.company_name,
            7 => &mut self.licence_no,
            _ => return None,
        };
        Some(value)
    }

    pub const fn is_secret(index: usize) -> bool {
        matches!(index, 2 | 3)
    }

    /// Every field except the licence number is mandatory.
    pub fn is_complete(&self) -> bool {
        (0..7).all(|index| self.field(index).is_some_and(|value| !value.trim().is_empty()))
    }
}

impl Validate for RegisterMerchantForm {
    fn validate(&self) -> Result<(), ApiError> {
        if self.password != self.confirm_password {
            return Err(ApiError::validation(PASSWORD_MISMATCH_MESSAGE));
        }
        for (index, label) in Self::FIELDS.iter().enumerate().take(7) {
            if self.field(index).is_none_or(|value| value.trim().is_empty()) {
                return Err(ApiError::validation(format!("{label} is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(ApiError::validation("Email must be a valid address"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeForm {
    pub fee_type: FeeType,
    pub value: String,
}

impl Default for FeeForm {
    fn default() -> Self {
        Self {
            fee_type: FeeType::Percentage,
            value: "0".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePayload {
    pub fee_type: FeeType,
    pub value: f64,
}

impl FeeForm {
    pub fn from_fee(fee: &Fee) -> Self {
        Self {
            fee_type: fee.fee_type,
            value: fee.value.to_string(),
        }
    }

    pub fn parsed_value(&self) -> Result<f64, ApiError> {
        let raw = self.value.trim();
        if raw.is_empty() {
            return Err(ApiError::validation(MISSING_FEE_VALUE_MESSAGE));
        }
        let value: f64 = raw
            .parse()
            .map_err(|_| ApiError::validation("Fee value must be a non-negative number"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::validation("Fee value must be a non-negative number"));
        }
        if self.fee_type == FeeType::Percentage && value > 100.0 {
            return Err(ApiError::validation("Percentage fee cannot exceed 100"));
        }
        Ok(value)
    }

    pub fn to_payload(&self) -> Result<FeePayload, ApiError> {
        Ok(FeePayload {
            fee_type: self.fee_type,
            value: self.parsed_value()?,
        })
    }
}

impl Validate for FeeForm {
    fn validate(&self) -> Result<(), ApiError> {
        self.parsed_value().map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeChange {
    Create(FeeForm),
    Update { id: FeeId, form: FeeForm },
}

impl FeeChange {
    pub fn form(&self) -> &FeeForm {
        match self {
            Self::Create(form) | Self::Update { form, .. } => form,
        }
    }
}

impl Validate for FeeChange {
    fn validate(&self) -> Result<(), ApiError> {
        if let Self::Update { id, .. } = self
            && id.is_blank()
        {
            return Err(ApiError::validation("Fee id is required"));
        }
        self.form().validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerchantAction {
    Approve,
    Block,
}

impl MerchantAction {
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Block => "blocked",
        }
    }

    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Approve => "Approval failed",
            Self::Block => "Block failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantDecision {
    pub merchant_id: MerchantId,
    pub action: MerchantAction,
}

impl Validate for MerchantDecision {
    fn validate(&self) -> Result<(), ApiError> {
        self.merchant_id.validate()
    }
}

impl Validate for MerchantId {
    fn validate(&self) -> Result<(), ApiError> {
        if self.is_blank() {
            return Err(ApiError::validation(MISSING_MERCHANT_ID_MESSAGE));
        }
        Ok(())
    }
}

impl Validate for FeeId {
    fn validate(&self) -> Result<(), ApiError> {
        if self.is_blank() {
            return Err(ApiError::validation("Fee id is required"));
        }
        Ok(())
    }
}

impl Validate for TransactionId {
    fn validate(&self) -> Result<(), ApiError> {
        if self.is_blank() {
            return Err(ApiError::validation("Transaction id is required"));
        }
        Ok(())
    }
}
