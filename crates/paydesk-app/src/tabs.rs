// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Invoked when back-navigation runs out of tab history.
pub trait LeaveView {
    fn leave_view(&mut self);
}

impl<F: FnMut()> LeaveView for F {
    fn leave_view(&mut self) {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome<Tab> {
    Returned(Tab),
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabNavigator<Tab> {
    active: Tab,
    history: Vec<Tab>,
}

impl<Tab: Copy + PartialEq> TabNavigator<Tab> {
    pub fn new(initial: Tab) -> Self {
        Self {
            active: initial,
            history: Vec::new(),
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn history(&self) -> &[Tab] {
        &self.history
    }

    /// Reclicking the active tab does not grow the history.
    pub fn switch_to(&mut self, tab: Tab) -> bool {
        if tab == self.active {
            return false;
        }
        self.history.push(self.active);
        self.active = tab;
        true
    }

    pub fn go_back(&mut self, leave: &mut impl LeaveView) -> BackOutcome<Tab> {
        match self.history.pop() {
            Some(previous) => {
                self.active = previous;
                BackOutcome::Returned(previous)
            }
            None => {
                leave.leave_view();
                BackOutcome::Left
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BackOutcome, TabNavigator};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tab {
        Register,
        Approve,
        Details,
    }

    #[test]
    fn switching_records_the_tab_left_behind() {
        let mut tabs = TabNavigator::new(Tab::Register);
        assert!(tabs.switch_to(Tab::Approve));
        assert!(tabs.switch_to(Tab::Details));
        assert_eq!(tabs.active(), Tab::Details);
        assert_eq!(tabs.history(), &[Tab::Register, Tab::Approve]);
    }

    #[test]
    fn reclicking_active_tab_is_a_no_op() {
        let mut tabs = TabNavigator::new(Tab::Register);
        tabs.switch_to(Tab::Approve);
        let before = tabs.history().len();

        assert!(!tabs.switch_to(Tab::Approve));
        assert_eq!(tabs.history().len(), before);
    }

    #[test]
    fn back_with_empty_history_leaves_the_view() {
        let mut tabs = TabNavigator::new(Tab::Register);
        let mut left = 0;
        let outcome = tabs.go_back(&mut || left += 1);
        assert_eq!(outcome, BackOutcome::Left);
        assert_eq!(left, 1);
        assert_eq!(tabs.active(), Tab::Register);
    }
}
