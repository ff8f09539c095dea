// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub view: View,
    pub route_history: Vec<View>,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(View::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Navigate(View),
    CycleView,
    Back,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ViewChanged(View),
    ExitRequested,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(view: View) -> Self {
        Self {
            view,
            route_history: Vec::new(),
            status_line: None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::Navigate(view) => self.navigate(view),
            AppCommand::CycleView => self.navigate(self.view.next()),
            AppCommand::Back => match self.route_history.pop() {
                Some(previous) => {
                    self.view = previous;
                    vec![AppEvent::ViewChanged(previous)]
                }
                None => vec![AppEvent::ExitRequested],
            },
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Each view appears in the route history at most once; revisiting one
    /// drops its older entry, so back never replays a cycle.
    fn navigate(&mut self, view: View) -> Vec<AppEvent> {
        if view == self.view {
            return Vec::new();
        }
        let current = self.view;
        self.route_history
            .retain(|previous| *previous != view && *previous != current);
        self.route_history.push(current);
        self.view = view;
        vec![
            AppEvent::ViewChanged(view),
            self.set_status(view.label()),
        ]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
