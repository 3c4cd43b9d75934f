//! Linked providers card.
//!
//! One row per configured provider. A row without an account links the
//! provider (the service answers with a redirect URL); a row with an account
//! unlinks it and refetches the account list.

use crate::config::ProvidersConfig;
use crate::entities::Account;
use crate::hooks::{Query, QueryState};
use crate::lifecycle::{ControllerArena, Toggle};
use crate::localization::{keys, Localization};
use crate::ui::components::provider_cell::ProviderCell;
use crate::ui::components::settings_card::{actions_line, render_card, split_footer, CardAction};
use crate::ui::components::skeleton::{spinner, SettingsCellSkeleton};
use crate::ui::core::{
    actions::{Action, DataKind, MutationRequest, RefreshHandle},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    widgets::{List, ListState, Paragraph},
    Frame,
};
use std::collections::HashSet;

pub struct ProvidersCard {
    cells: Vec<ProviderCell>,
    arena: ControllerArena<String>,
    accounts: Query<Vec<Account>>,
    callback_url: String,
    pending: bool,
    requested_info: HashSet<String>,
    list_state: ListState,
    pub focused: bool,
    tick: usize,
    localization: Localization,
}

impl ProvidersCard {
    pub fn new(
        providers: &ProvidersConfig,
        accounts: Query<Vec<Account>>,
        callback_url: String,
        localization: Localization,
    ) -> Self {
        let mut arena = ControllerArena::new();
        let cells = providers
            .social
            .iter()
            .map(|id| (id, false))
            .chain(providers.other.iter().map(|id| (id, true)))
            .map(|(id, other)| ProviderCell::new(id, other, arena.controller(id)))
            .collect::<Vec<_>>();

        let mut list_state = ListState::default();
        list_state.select(if cells.is_empty() { None } else { Some(0) });

        Self {
            cells,
            arena,
            accounts,
            callback_url,
            pending: true,
            requested_info: HashSet::new(),
            list_state,
            focused: false,
            tick: 0,
            localization,
        }
    }

    pub fn update_data(&mut self, accounts: QueryState<Vec<Account>>) {
        self.pending = accounts.is_pending;
        let accounts = accounts.data.unwrap_or_default();
        for cell in &mut self.cells {
            let account = accounts.iter().find(|a| a.provider_id == cell.provider_id).cloned();
            if account.as_ref().map(|a| &a.account_id) != cell.account.as_ref().map(|a| &a.account_id) {
                cell.email = None;
            }
            cell.account = account;
        }
    }

    /// Linked accounts whose provider email has not been requested yet
    pub fn take_missing_account_info(&mut self) -> Vec<String> {
        let missing: Vec<String> = self
            .cells
            .iter()
            .filter_map(|cell| cell.account.as_ref())
            .map(|account| account.account_id.clone())
            .filter(|id| !self.requested_info.contains(id))
            .collect();
        self.requested_info.extend(missing.iter().cloned());
        missing
    }

    pub fn set_account_email(&mut self, account_id: &str, email: Option<String>) {
        for cell in &mut self.cells {
            if cell.account.as_ref().is_some_and(|a| a.account_id == account_id) {
                cell.email = email.clone();
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    pub fn cells(&self) -> &[ProviderCell] {
        &self.cells
    }

    pub fn is_busy(&self, provider_id: &str) -> bool {
        self.arena.is_busy(&provider_id.to_string())
    }

    /// Silences in-flight link/unlink runs; called when the app shuts down
    pub fn teardown(&mut self) {
        self.arena.teardown_all();
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn selected_cell(&self) -> Option<&ProviderCell> {
        self.list_state.selected().and_then(|i| self.cells.get(i))
    }

    fn toggle_selected(&mut self) -> Action {
        let Some(cell) = self.selected_cell() else {
            return Action::None;
        };
        if cell.is_disabled() {
            return Action::None;
        }

        let toggle = cell.toggle(&self.callback_url);
        let request = MutationRequest::new(toggle.mutation(), cell.controller.clone(), &self.localization);
        if toggle.is_attached() {
            Action::Submit(request.refreshing(RefreshHandle::new(self.accounts.clone(), DataKind::Accounts)))
        } else {
            Action::Submit(request)
        }
    }
}

impl Component for ProvidersCard {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.pending {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::NextRow,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousRow,
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        if !self.focused || self.cells.is_empty() {
            return action;
        }
        let len = self.cells.len();
        let current = self.list_state.selected().unwrap_or(0);
        match action {
            Action::NextRow => {
                self.list_state.select(Some((current + 1) % len));
                Action::None
            }
            Action::PreviousRow => {
                self.list_state.select(Some((current + len - 1) % len));
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let body = render_card(
            f,
            rect,
            &self.localization.text(keys::PROVIDERS),
            &self.localization.text(keys::PROVIDERS_DESCRIPTION),
            self.focused,
        );
        let (list_area, footer) = split_footer(body);

        if self.pending {
            SettingsCellSkeleton::default().render(f, list_area);
        } else {
            let selected = self.list_state.selected();
            let frame = spinner(self.tick);
            let width = list_area.width;
            let localization = &self.localization;
            let items: Vec<_> = self
                .cells
                .iter_mut()
                .enumerate()
                .map(|(i, cell)| cell.to_list_item(selected == Some(i), width, frame, localization))
                .collect();
            f.render_stateful_widget(List::new(items), list_area, &mut self.list_state);
        }

        let linked = self.selected_cell().is_some_and(ProviderCell::is_linked);
        let footer_line = actions_line(&[CardAction {
            key: "Enter",
            label: self.localization.text(if linked { keys::UNLINK } else { keys::LINK }),
            enabled: self.selected_cell().is_some_and(|cell| !cell.is_disabled()),
        }]);
        f.render_widget(Paragraph::new(footer_line), footer);
    }
}
