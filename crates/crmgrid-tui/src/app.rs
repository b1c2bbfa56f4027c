// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crmgrid_crm::ListKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Filter,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_tab: ListKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ListKind::Leads)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    OpenFilter,
    OpenHelp,
    ExitToNav,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    TabChanged(ListKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(start_tab: ListKind) -> Self {
        Self {
            mode: AppMode::Nav,
            active_tab: start_tab,
            status_line: None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::OpenFilter => {
                self.mode = AppMode::Filter;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenHelp => {
                self.mode = AppMode::Help;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn tab_index(&self) -> usize {
        ListKind::ALL
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0)
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = ListKind::ALL;
        let current = self.tab_index() as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }

    fn set_status(&mut self, message: String) -> AppEvent {
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppMode, AppState};
    use crmgrid_crm::ListKind;

    #[test]
    fn tab_rotation_wraps_both_ways() {
        let mut state = AppState::new(ListKind::Quotes);

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, ListKind::Leads);
        assert_eq!(events, vec![AppEvent::TabChanged(ListKind::Leads)]);

        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab, ListKind::Quotes);
        assert_eq!(state.tab_index(), 3);
    }

    #[test]
    fn filter_and_help_modes_return_to_nav() {
        let mut state = AppState::default();
        assert_eq!(
            state.dispatch(AppCommand::OpenFilter),
            vec![AppEvent::ModeChanged(AppMode::Filter)]
        );
        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);

        state.dispatch(AppCommand::OpenHelp);
        assert_eq!(state.mode, AppMode::Help);
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        let events = state.dispatch(AppCommand::SetStatus("2 selected".to_owned()));
        assert_eq!(events, vec![AppEvent::StatusUpdated("2 selected".to_owned())]);
        assert_eq!(state.status_line.as_deref(), Some("2 selected"));

        state.dispatch(AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
    }
}
