// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::marker::PhantomData;

use crate::error::ApiError;
use crate::list::Refresh;
use crate::request::{AsyncRequestState, RequestPhase, RequestToken};

/// Yes/no prompt shown before destructive writes.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Local checks that must pass before a write is sent.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Issues one write. The reply comes back through [`MutationRunner::finish`].
pub trait WriteEndpoint<I> {
    fn submit(&mut self, token: RequestToken, input: I);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Issued(RequestToken),
    /// Confirmation said no; nothing was sent and the state is untouched.
    Declined,
    /// Validation failed; the state now shows the message.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    Succeeded { refreshed: Option<RequestToken> },
    Failed,
    Stale,
}

pub struct MutationRunner<I, O, W> {
    endpoint: W,
    state: AsyncRequestState<O>,
    confirmation: Option<String>,
    failure_message: String,
    _input: PhantomData<fn(I)>,
}

impl<I: Validate, O, W: WriteEndpoint<I>> MutationRunner<I, O, W> {
    pub fn new(endpoint: W, failure_message: impl Into<String>) -> Self {
        Self {
            endpoint,
            state: AsyncRequestState::new(),
            confirmation: None,
            failure_message: failure_message.into(),
            _input: PhantomData,
        }
    }

    pub fn with_confirmation(mut self, prompt: impl Into<String>) -> Self {
        self.confirmation = Some(prompt.into());
        self
    }

    pub fn confirmation_required(&self) -> bool {
        self.confirmation.is_some()
    }

    pub fn confirmation_prompt(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn run(&mut self, input: I, confirm: &mut impl Confirm) -> RunOutcome {
        if let Err(error) = input.validate() {
            self.state
                .fail_immediately(error.user_message(&self.failure_message));
            return RunOutcome::Invalid;
        }

        if let Some(prompt) = &self.confirmation
            && !confirm.confirm(prompt)
        {
            return RunOutcome::Declined;
        }

        let token = self.state.start();
        tracing::debug!(%token, "mutation issued");
        self.endpoint.submit(token, input);
        RunOutcome::Issued(token)
    }

    /// Records the reply. On success the state is updated before `refresh`
    /// fires, so a list refetch is never issued ahead of the recorded write.
    pub fn finish(
        &mut self,
        token: RequestToken,
        result: Result<O, ApiError>,
        refresh: Option<&mut dyn Refresh>,
    ) -> FinishOutcome {
        match result {
            Ok(output) => {
                if !self.state.resolve(token, output) {
                    return FinishOutcome::Stale;
                }
                let refreshed = refresh.map(|target| target.refresh());
                FinishOutcome::Succeeded { refreshed }
            }
            Err(error) => {
                let message = error.user_message(&self.failure_message);
                if !self.state.reject(token, message) {
                    return FinishOutcome::Stale;
                }
                tracing::debug!(%token, %error, "mutation failed");
                FinishOutcome::Failed
            }
        }
    }

    pub fn state(&self) -> &AsyncRequestState<O> {
        &self.state
    }

    pub fn phase(&self) -> RequestPhase {
        self.state.phase()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.state.dismiss_error()
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn endpoint(&self) -> &W {
        &self.endpoint
    }

    pub fn endpoint_mut(&mut self) -> &mut W {
        &mut self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::{FinishOutcome, MutationRunner, RunOutcome, Validate, WriteEndpoint};
    use crate::error::ApiError;
    use crate::list::Refresh;
    use crate::request::{RequestPhase, RequestToken};

    #[derive(Debug, Clone, PartialEq)]
    struct Amount(i64);

    impl Validate for Amount {
        fn validate(&self) -> Result<(), ApiError> {
            if self.0 < 0 {
                return Err(ApiError::validation("amount must be positive"));
            }
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct Sent(Vec<(RequestToken, Amount)>);

    impl WriteEndpoint<Amount> for Sent {
        fn submit(&mut self, token: RequestToken, input: Amount) {
            self.0.push((token, input));
        }
    }

    #[derive(Debug, Default)]
    struct Counter(u64);

    impl Refresh for Counter {
        fn refresh(&mut self) -> RequestToken {
            self.0 += 1;
            RequestToken::default()
        }
    }

    fn runner() -> MutationRunner<Amount, (), Sent> {
        MutationRunner::new(Sent::default(), "Failed to save")
    }

    #[test]
    fn invalid_input_fails_without_remote_call() {
        let mut runner = runner();
        let outcome = runner.run(Amount(-1), &mut |_: &str| true);
        assert_eq!(outcome, RunOutcome::Invalid);
        assert!(runner.endpoint().0.is_empty());
        assert_eq!(runner.error_message(), Some("amount must be positive"));
    }

    #[test]
    fn unconfirmed_runner_never_prompts() {
        let mut runner = runner();
        let mut prompted = false;
        let outcome = runner.run(Amount(5), &mut |_: &str| {
            prompted = true;
            false
        });
        assert!(matches!(outcome, RunOutcome::Issued(_)));
        assert!(!prompted);
    }

    #[test]
    fn success_refreshes_after_recording_result() {
        let mut runner = runner();
        let RunOutcome::Issued(token) = runner.run(Amount(5), &mut |_: &str| true) else {
            panic!("expected issued request");
        };
        let mut counter = Counter::default();
        let outcome = runner.finish(token, Ok(()), Some(&mut counter));
        assert_eq!(
            outcome,
            FinishOutcome::Succeeded {
                refreshed: Some(RequestToken::default())
            }
        );
        assert_eq!(counter.0, 1);
        assert_eq!(runner.phase(), RequestPhase::Succeeded);
    }

    #[test]
    fn stale_success_does_not_refresh() {
        let mut runner = runner();
        let RunOutcome::Issued(first) = runner.run(Amount(1), &mut |_: &str| true) else {
            panic!("expected issued request");
        };
        runner.run(Amount(2), &mut |_: &str| true);

        let mut counter = Counter::default();
        let outcome = runner.finish(first, Ok(()), Some(&mut counter));
        assert_eq!(outcome, FinishOutcome::Stale);
        assert_eq!(counter.0, 0);
        assert!(runner.is_pending());
    }

    #[test]
    fn failure_without_server_message_uses_fallback() {
        let mut runner = runner();
        let RunOutcome::Issued(token) = runner.run(Amount(1), &mut |_: &str| true) else {
            panic!("expected issued request");
        };
        let outcome = runner.finish(
            token,
            Err(ApiError::Http {
                status: 500,
                message: None,
            }),
            None,
        );
        assert_eq!(outcome, FinishOutcome::Failed);
        assert_eq!(runner.error_message(), Some("Failed to save"));
    }
}
