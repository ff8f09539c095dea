// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

/// Identifies one issued request. Tokens only grow, so a reply carrying an
/// older token than the state's current one is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RequestPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Status<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

/// Lifecycle of one logical operation. Data exists only in the succeeded
/// state and a message only in the failed state; only the reply for the
/// latest token may move the state out of pending.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncRequestState<T> {
    status: Status<T>,
    token: RequestToken,
}

impl<T> Default for AsyncRequestState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncRequestState<T> {
    pub const fn new() -> Self {
        Self {
            status: Status::Idle,
            token: RequestToken(0),
        }
    }

    pub fn start(&mut self) -> RequestToken {
        self.token = self.token.next();
        self.status = Status::Pending;
        self.token
    }

    /// Returns false when the reply was stale and got dropped.
    pub fn resolve(&mut self, token: RequestToken, value: T) -> bool {
        if !self.is_current(token) {
            tracing::debug!(%token, current = %self.token, "dropping stale success");
            return false;
        }
        self.status = Status::Succeeded(value);
        true
    }

    pub fn reject(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            tracing::debug!(%token, current = %self.token, "dropping stale failure");
            return false;
        }
        self.status = Status::Failed(message.into());
        true
    }

    /// Back to idle. Also bumps the token so an in-flight reply is dropped.
    pub fn reset(&mut self) {
        self.token = self.token.next();
        self.status = Status::Idle;
    }

    /// Clears a displayed failure without touching the token.
    pub fn dismiss_error(&mut self) -> bool {
        if matches!(self.status, Status::Failed(_)) {
            self.status = Status::Idle;
            return true;
        }
        false
    }

    /// Puts a failure on display without issuing anything remote, used for
    /// checks that run before a request would be sent.
    pub fn fail_immediately(&mut self, message: impl Into<String>) -> RequestToken {
        let token = self.start();
        self.status = Status::Failed(message.into());
        token
    }

    pub const fn token(&self) -> RequestToken {
        self.token
    }

    pub const fn phase(&self) -> RequestPhase {
        match self.status {
            Status::Idle => RequestPhase::Idle,
            Status::Pending => RequestPhase::Pending,
            Status::Succeeded(_) => RequestPhase::Succeeded,
            Status::Failed(_) => RequestPhase::Failed,
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self.status, Status::Pending)
    }

    pub const fn data(&self) -> Option<&T> {
        match &self.status {
            Status::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// True when a reply carrying `token` would be applied.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token == self.token && self.is_pending()
    }
}
