// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use paydesk_app::{
    Ack, ApiError, Fee, FeeChange, FeeId, ListEndpoint, ListPage, ListQuery, ListRequest,
    Merchant, MerchantDecision, MerchantId, RegisterMerchantForm, RequestToken, Transaction,
    TransactionId, WriteEndpoint,
};

use crate::InternalEvent;

/// Blocking backend calls. Runs on the worker thread, never on the UI loop.
pub trait AppRuntime {
    fn list_merchants(&mut self, query: &ListQuery) -> Result<ListPage<Merchant>, ApiError>;
    fn merchant(&mut self, id: &MerchantId) -> Result<Merchant, ApiError>;
    fn merchant_transactions(&mut self, id: &MerchantId) -> Result<Vec<Transaction>, ApiError>;
    fn register_merchant(&mut self, form: &RegisterMerchantForm) -> Result<Ack, ApiError>;
    fn decide_merchant(&mut self, decision: &MerchantDecision) -> Result<Ack, ApiError>;
    fn list_fees(&mut self, query: &ListQuery) -> Result<ListPage<Fee>, ApiError>;
    fn fee(&mut self, id: &FeeId) -> Result<Fee, ApiError>;
    fn save_fee(&mut self, change: &FeeChange) -> Result<Ack, ApiError>;
    fn delete_fee(&mut self, id: &FeeId) -> Result<Ack, ApiError>;
    fn list_transactions(&mut self, query: &ListQuery) -> Result<ListPage<Transaction>, ApiError>;
    fn delete_transaction(&mut self, id: &TransactionId) -> Result<Ack, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    ListMerchants(ListRequest),
    MerchantDetail {
        token: RequestToken,
        id: MerchantId,
    },
    MerchantTransactions {
        token: RequestToken,
        id: MerchantId,
    },
    RegisterMerchant {
        token: RequestToken,
        form: RegisterMerchantForm,
    },
    DecideMerchant {
        token: RequestToken,
        decision: MerchantDecision,
    },
    ListFees(ListRequest),
    FeeDetail {
        token: RequestToken,
        id: FeeId,
    },
    SaveFee {
        token: RequestToken,
        change: FeeChange,
    },
    DeleteFee {
        token: RequestToken,
        id: FeeId,
    },
    ListTransactions(ListRequest),
    DeleteTransaction {
        token: RequestToken,
        id: TransactionId,
    },
}

impl Job {
    pub const fn token(&self) -> RequestToken {
        match self {
            Self::ListMerchants(request)
            | Self::ListFees(request)
            | Self::ListTransactions(request) => request.token,
            Self::MerchantDetail { token, .. }
            | Self::MerchantTransactions { token, .. }
            | Self::RegisterMerchant { token, .. }
            | Self::DecideMerchant { token, .. }
            | Self::FeeDetail { token, .. }
            | Self::SaveFee { token, .. }
            | Self::DeleteFee { token, .. }
            | Self::DeleteTransaction { token, .. } => *token,
        }
    }
}

/// A finished job. The variant names the controller the reply belongs to;
/// the token decides whether that controller still wants it.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Merchants {
        token: RequestToken,
        result: Result<ListPage<Merchant>, ApiError>,
    },
    MerchantDetail {
        token: RequestToken,
        result: Result<Merchant, ApiError>,
    },
    MerchantTransactions {
        token: RequestToken,
        result: Result<Vec<Transaction>, ApiError>,
    },
    Registered {
        token: RequestToken,
        result: Result<Ack, ApiError>,
    },
    Decided {
        token: RequestToken,
        decision: MerchantDecision,
        result: Result<Ack, ApiError>,
    },
    Fees {
        token: RequestToken,
        result: Result<ListPage<Fee>, ApiError>,
    },
    FeeDetail {
        token: RequestToken,
        result: Result<Fee, ApiError>,
    },
    FeeSaved {
        token: RequestToken,
        change: FeeChange,
        result: Result<Ack, ApiError>,
    },
    FeeDeleted {
        token: RequestToken,
        result: Result<Ack, ApiError>,
    },
    Transactions {
        token: RequestToken,
        result: Result<ListPage<Transaction>, ApiError>,
    },
    TransactionDeleted {
        token: RequestToken,
        result: Result<Ack, ApiError>,
    },
}

/// Queue handle the controllers issue requests through. Every list and
/// write endpoint in the UI is one of these.
#[derive(Debug, Clone)]
pub struct JobSender {
    tx: Sender<Job>,
}

impl JobSender {
    pub fn new(tx: Sender<Job>) -> Self {
        Self { tx }
    }

    pub fn send(&self, job: Job) {
        let token = job.token();
        if self.tx.send(job).is_err() {
            tracing::error!(%token, "request worker is gone; job dropped");
        }
    }
}

impl ListEndpoint<Merchant> for JobSender {
    fn fetch(&mut self, request: ListRequest) {
        self.send(Job::ListMerchants(request));
    }
}

impl ListEndpoint<Fee> for JobSender {
    fn fetch(&mut self, request: ListRequest) {
        self.send(Job::ListFees(request));
    }
}

impl ListEndpoint<Transaction> for JobSender {
    fn fetch(&mut self, request: ListRequest) {
        self.send(Job::ListTransactions(request));
    }
}

impl WriteEndpoint<RegisterMerchantForm> for JobSender {
    fn submit(&mut self, token: RequestToken, form: RegisterMerchantForm) {
        self.send(Job::RegisterMerchant { token, form });
    }
}

impl WriteEndpoint<MerchantDecision> for JobSender {
    fn submit(&mut self, token: RequestToken, decision: MerchantDecision) {
        self.send(Job::DecideMerchant { token, decision });
    }
}

impl WriteEndpoint<FeeChange> for JobSender {
    fn submit(&mut self, token: RequestToken, change: FeeChange) {
        self.send(Job::SaveFee { token, change });
    }
}

impl WriteEndpoint<FeeId> for JobSender {
    fn submit(&mut self, token: RequestToken, id: FeeId) {
        self.send(Job::DeleteFee { token, id });
    }
}

impl WriteEndpoint<TransactionId> for JobSender {
    fn submit(&mut self, token: RequestToken, id: TransactionId) {
        self.send(Job::DeleteTransaction { token, id });
    }
}

/// Runs one job to completion.
pub fn serve<R: AppRuntime + ?Sized>(runtime: &mut R, job: Job) -> Reply {
    match job {
        Job::ListMerchants(ListRequest { token, query }) => Reply::Merchants {
            token,
            result: runtime.list_merchants(&query),
        },
        Job::MerchantDetail { token, id } => Reply::MerchantDetail {
            token,
            result: runtime.merchant(&id),
        },
        Job::MerchantTransactions { token, id } => Reply::MerchantTransactions {
            token,
            result: runtime.merchant_transactions(&id),
        },
        Job::RegisterMerchant { token, form } => Reply::Registered {
            token,
            result: runtime.register_merchant(&form),
        },
        Job::DecideMerchant { token, decision } => {
            let result = runtime.decide_merchant(&decision);
            Reply::Decided {
                token,
                decision,
                result,
            }
        }
        Job::ListFees(ListRequest { token, query }) => Reply::Fees {
            token,
            result: runtime.list_fees(&query),
        },
        Job::FeeDetail { token, id } => Reply::FeeDetail {
            token,
            result: runtime.fee(&id),
        },
        Job::SaveFee { token, change } => {
            let result = runtime.save_fee(&change);
            Reply::FeeSaved {
                token,
                change,
                result,
            }
        }
        Job::DeleteFee { token, id } => Reply::FeeDeleted {
            token,
            result: runtime.delete_fee(&id),
        },
        Job::ListTransactions(ListRequest { token, query }) => Reply::Transactions {
            token,
            result: runtime.list_transactions(&query),
        },
        Job::DeleteTransaction { token, id } => Reply::TransactionDeleted {
            token,
            result: runtime.delete_transaction(&id),
        },
    }
}

/// Starts the request worker. It exits once every [`JobSender`] is dropped
/// or the UI stops listening.
pub fn spawn_worker<R>(
    mut runtime: R,
    events: Sender<InternalEvent>,
) -> Result<(JobSender, JoinHandle<()>)>
where
    R: AppRuntime + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<Job>();
    let handle = thread::Builder::new()
        .name("paydesk-worker".to_owned())
        .spawn(move || {
            for job in rx {
                let token = job.token();
                let reply = serve(&mut runtime, job);
                if events.send(InternalEvent::Api(reply)).is_err() {
                    tracing::debug!(%token, "ui loop closed; stopping worker");
                    break;
                }
            }
        })
        .context("spawn request worker")?;
    Ok((JobSender::new(tx), handle))
}

#[cfg(test)]
mod tests {
    use super::{AppRuntime, Job, JobSender, Reply, serve, spawn_worker};
    use crate::InternalEvent;
    use paydesk_app::{
        Ack, ApiError, Fee, FeeChange, FeeId, ListEndpoint, ListPage, ListQuery, ListResource,
        Merchant, MerchantAction, MerchantDecision, MerchantId, RegisterMerchantForm,
        Transaction, TransactionId,
    };
    use paydesk_testkit::{sample_fees, sample_merchants};
    use std::sync::mpsc;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct StubRuntime {
        decisions: Vec<MerchantDecision>,
    }

    impl AppRuntime for StubRuntime {
        fn list_merchants(&mut self, _: &ListQuery) -> Result<ListPage<Merchant>, ApiError> {
            Ok(ListPage::new(sample_merchants(2)).with_total(2))
        }
        fn merchant(&mut self, _: &MerchantId) -> Result<Merchant, ApiError> {
            Err(ApiError::Http {
                status: 404,
                message: Some("Merchant not found".to_owned()),
            })
        }
        fn merchant_transactions(&mut self, _: &MerchantId) -> Result<Vec<Transaction>, ApiError> {
            Ok(Vec::new())
        }
        fn register_merchant(&mut self, _: &RegisterMerchantForm) -> Result<Ack, ApiError> {
            Ok(Ack::default())
        }
        fn decide_merchant(&mut self, decision: &MerchantDecision) -> Result<Ack, ApiError> {
            self.decisions.push(decision.clone());
            Ok(Ack::default())
        }
        fn list_fees(&mut self, query: &ListQuery) -> Result<ListPage<Fee>, ApiError> {
            Ok(ListPage::new(sample_fees(query.page_size as usize)).with_total_pages(2))
        }
        fn fee(&mut self, _: &FeeId) -> Result<Fee, ApiError> {
            Err(ApiError::Network("down".to_owned()))
        }
        fn save_fee(&mut self, _: &FeeChange) -> Result<Ack, ApiError> {
            Ok(Ack::default())
        }
        fn delete_fee(&mut self, _: &FeeId) -> Result<Ack, ApiError> {
            Ok(Ack::default())
        }
        fn list_transactions(&mut self, _: &ListQuery) -> Result<ListPage<Transaction>, ApiError> {
            Ok(ListPage::new(Vec::new()))
        }
        fn delete_transaction(&mut self, _: &TransactionId) -> Result<Ack, ApiError> {
            Ok(Ack::default())
        }
    }

    #[test]
    fn decided_reply_carries_the_decision() {
        let mut runtime = StubRuntime::default();
        let decision = MerchantDecision {
            merchant_id: MerchantId::new("m1"),
            action: MerchantAction::Block,
        };
        let token = paydesk_app::AsyncRequestState::<()>::new().start();
        let reply = serve(
            &mut runtime,
            Job::DecideMerchant {
                token,
                decision: decision.clone(),
            },
        );
        assert_eq!(
            reply,
            Reply::Decided {
                token,
                decision: decision.clone(),
                result: Ok(Ack::default()),
            }
        );
        assert_eq!(runtime.decisions, vec![decision]);
    }

    #[test]
    fn list_endpoint_enqueues_typed_jobs() {
        let (tx, rx) = mpsc::channel();
        let mut list: ListResource<Fee, JobSender> = ListResource::new(JobSender::new(tx), 5);
        let token = list.refresh();

        let Ok(Job::ListFees(request)) = rx.try_recv() else {
            panic!("expected a fee list job");
        };
        assert_eq!(request.token, token);
        assert_eq!(request.query.page_size, 5);
    }

    #[test]
    fn worker_round_trips_replies() -> anyhow::Result<()> {
        let (events_tx, events_rx) = mpsc::channel();
        let (jobs, handle) = spawn_worker(StubRuntime::default(), events_tx)?;
        let mut endpoint = jobs.clone();
        let token = paydesk_app::AsyncRequestState::<()>::new().start();
        ListEndpoint::<Merchant>::fetch(
            &mut endpoint,
            paydesk_app::ListRequest {
                token,
                query: ListQuery {
                    page: 1,
                    page_size: 10,
                    filters: Default::default(),
                },
            },
        );

        let event = events_rx.recv_timeout(Duration::from_secs(5))?;
        let InternalEvent::Api(Reply::Merchants { token: got, result }) = event else {
            panic!("expected merchants reply, got {event:?}");
        };
        assert_eq!(got, token);
        assert_eq!(result.map(|page| page.items.len()), Ok(2));

        drop(jobs);
        drop(endpoint);
        handle.join().map_err(|_| anyhow::anyhow!("worker panicked"))?;
        Ok(())
    }
}
