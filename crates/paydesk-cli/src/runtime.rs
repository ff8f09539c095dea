// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use paydesk_api::Client;
use paydesk_app::{
    Ack, ApiError, Fee, FeeChange, FeeId, ListPage, ListQuery, Merchant, MerchantDecision,
    MerchantId, RegisterMerchantForm, Transaction, TransactionId,
};

/// Serves dashboard jobs against the live REST backend.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl paydesk_tui::AppRuntime for ApiRuntime {
    fn list_merchants(&mut self, query: &ListQuery) -> Result<ListPage<Merchant>, ApiError> {
        self.client.list_merchants(query)
    }

    fn merchant(&mut self, id: &MerchantId) -> Result<Merchant, ApiError> {
        self.client.merchant(id)
    }

    fn merchant_transactions(&mut self, id: &MerchantId) -> Result<Vec<Transaction>, ApiError> {
        self.client.merchant_transactions(id)
    }

    fn register_merchant(&mut self, form: &RegisterMerchantForm) -> Result<Ack, ApiError> {
        self.client.register_merchant(form)
    }

    fn decide_merchant(&mut self, decision: &MerchantDecision) -> Result<Ack, ApiError> {
        self.client.decide_merchant(decision)
    }

    fn list_fees(&mut self, query: &ListQuery) -> Result<ListPage<Fee>, ApiError> {
        self.client.list_fees(query)
    }

    fn fee(&mut self, id: &FeeId) -> Result<Fee, ApiError> {
        self.client.fee(id)
    }

    fn save_fee(&mut self, change: &FeeChange) -> Result<Ack, ApiError> {
        self.client.save_fee(change)
    }

    fn delete_fee(&mut self, id: &FeeId) -> Result<Ack, ApiError> {
        self.client.delete_fee(id)
    }

    fn list_transactions(&mut self, query: &ListQuery) -> Result<ListPage<Transaction>, ApiError> {
        self.client.list_transactions(query)
    }

    fn delete_transaction(&mut self, id: &TransactionId) -> Result<Ack, ApiError> {
        self.client.delete_transaction(id)
    }
}
