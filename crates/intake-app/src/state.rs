// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::FilterField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    FilterEdit(FilterField),
    DispositionPicker,
    FollowUpForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub status_line: Option<String>,
    pub show_key_hints: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            status_line: None,
            show_key_hints: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    OpenFilterEdit(FilterField),
    OpenDispositionPicker,
    OpenFollowUpForm,
    ExitToNav,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::OpenFilterEdit(field) => {
                self.mode = AppMode::FilterEdit(field);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenDispositionPicker => {
                self.mode = AppMode::DispositionPicker;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenFollowUpForm => {
                self.mode = AppMode::FollowUpForm;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppMode, AppState};
    use crate::FilterField;

    #[test]
    fn mode_transitions() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::OpenFilterEdit(FilterField::Email));
        assert_eq!(state.mode, AppMode::FilterEdit(FilterField::Email));

        state.dispatch(AppCommand::OpenDispositionPicker);
        assert_eq!(state.mode, AppMode::DispositionPicker);

        state.dispatch(AppCommand::OpenFollowUpForm);
        assert_eq!(state.mode, AppMode::FollowUpForm);

        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn status_line_set_and_clear_emit_events() {
        let mut state = AppState::default();

        let set = state.dispatch(AppCommand::SetStatus("saved".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("saved"));
        assert_eq!(set, vec![AppEvent::StatusUpdated("saved".to_owned())]);

        let cleared = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
        assert_eq!(cleared, vec![AppEvent::StatusCleared]);
    }
}
