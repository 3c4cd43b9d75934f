use crate::lifecycle::FeedbackKind;
use crate::ui::components::{DialogComponent, MembersCard, ProvidersCard, TeamsCard, ToastHost};
use crate::ui::core::{
    actions::{Action, CardFocus, DataKind, DialogType},
    event_handler::EventType,
    task_manager::TaskManager,
    AppContext, Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Tabs},
    Frame,
};
use std::time::Instant;
use tokio::sync::mpsc;

pub struct AppComponent {
    // Component composition
    teams_card: TeamsCard,
    members_card: MembersCard,
    providers_card: ProvidersCard,
    dialog: DialogComponent,
    toasts: ToastHost,

    // Services
    context: AppContext,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,

    // Simple UI state
    focus: CardFocus,
    last_redirect: Option<String>,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(context: AppContext) -> Self {
        let (task_manager, background_action_rx) =
            TaskManager::new(context.client.clone(), context.errors.clone());
        let localization = context.localization.clone();
        let focus = CardFocus::from_view(&context.config.ui.start_view);

        let mut app = Self {
            teams_card: TeamsCard::new(localization.clone()),
            members_card: MembersCard::new(localization.clone()),
            providers_card: ProvidersCard::new(
                &context.config.providers,
                context.accounts.clone(),
                context.config.auth.callback_url.clone(),
                localization,
            ),
            dialog: DialogComponent::new(),
            toasts: ToastHost::new(context.config.ui.toast_duration()),
            context,
            task_manager,
            background_action_rx,
            focus,
            last_redirect: None,
            should_quit: false,
        };
        app.apply_focus();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn focus(&self) -> CardFocus {
        self.focus
    }

    pub fn teams_card(&self) -> &TeamsCard {
        &self.teams_card
    }

    pub fn providers_card(&self) -> &ProvidersCard {
        &self.providers_card
    }

    pub fn dialog(&self) -> &DialogComponent {
        &self.dialog
    }

    pub fn toasts(&self) -> &ToastHost {
        &self.toasts
    }

    pub fn last_redirect(&self) -> Option<&str> {
        self.last_redirect.as_deref()
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Kick off the loads behind every card
    pub fn load_initial_data(&mut self) {
        log::info!("Loading data for organization {}", self.context.organization_id);
        self.task_manager
            .spawn_query(self.context.permissions.clone(), DataKind::Permissions);
        self.task_manager.spawn_query(self.context.teams.clone(), DataKind::Teams);
        self.task_manager.spawn_query(self.context.members.clone(), DataKind::Members);
        self.task_manager.spawn_query(self.context.accounts.clone(), DataKind::Accounts);
    }

    fn apply_focus(&mut self) {
        self.teams_card.focused = self.focus == CardFocus::Teams;
        self.members_card.focused = self.focus == CardFocus::Members;
        self.providers_card.focused = self.focus == CardFocus::Providers;
    }

    /// Copy the latest query state into the cards
    fn sync_component_data(&mut self) {
        self.teams_card.update_data(
            self.context.teams.snapshot(),
            self.context.permissions.snapshot(),
            &self.context.errors,
        );
        self.members_card.update_data(self.context.members.snapshot());
        self.providers_card.update_data(self.context.accounts.snapshot());

        for account_id in self.providers_card.take_missing_account_info() {
            self.task_manager.spawn_account_info(account_id);
        }
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                log::info!("Global key: 'q' - quitting application");
                Action::Quit
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Tab => Action::NextCard,
            KeyCode::BackTab => Action::PreviousCard,
            KeyCode::Char('L') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('r') => {
                self.load_initial_data();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn focused_card(&mut self) -> &mut dyn Component {
        match self.focus {
            CardFocus::Teams => &mut self.teams_card,
            CardFocus::Members => &mut self.members_card,
            CardFocus::Providers => &mut self.providers_card,
        }
    }

    /// Handle app-level actions that require business logic
    pub async fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.dialog.close();
                self.providers_card.teardown();
                self.should_quit = true;
                Action::None
            }
            Action::NextCard => {
                self.focus = self.focus.next();
                self.apply_focus();
                Action::None
            }
            Action::PreviousCard => {
                self.focus = self.focus.previous();
                self.apply_focus();
                Action::None
            }
            Action::ShowDialog(dialog_type) => {
                log::debug!("Dialog: Showing dialog {:?}", dialog_type);
                self.dialog.open(dialog_type, &self.context);
                if let Some((user_id, query)) = self.dialog.member_teams_query() {
                    self.task_manager.spawn_query(query, DataKind::MemberTeams(user_id));
                }
                Action::None
            }
            Action::Submit(request) => {
                self.task_manager.spawn_mutation(request);
                Action::None
            }
            Action::Toast(event) => {
                match event.kind {
                    FeedbackKind::Success => log::info!("Toast: {}", event.message),
                    FeedbackKind::Error => log::warn!("Toast: {}", event.message),
                }
                self.toasts.push(event);
                Action::None
            }
            Action::Navigate(url) => {
                log::info!("Continue linking at {}", url);
                self.last_redirect = Some(url);
                Action::None
            }
            Action::AccountInfoLoaded { account_id, email } => {
                self.providers_card.set_account_email(&account_id, email);
                Action::None
            }
            Action::DataRefreshed(_) => {
                self.sync_component_data();
                Action::None
            }
            other => other,
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        // Process all available background actions
        while let Ok(action) = self.background_action_rx.try_recv() {
            log::debug!("Background: Received action {:?}", action);
            actions.push(action);
        }

        // Clean up finished tasks
        let completed_tasks = self.task_manager.cleanup_finished_tasks();
        if !completed_tasks.is_empty() {
            log::debug!("Background: Cleaned up {} finished tasks", completed_tasks.len());
        }

        actions
    }

    /// Advance spinners and expire toasts
    pub fn on_tick(&mut self) {
        self.toasts.prune(Instant::now());
        self.providers_card.on_tick();
        self.dialog.on_tick();
    }

    /// Process an event through the component hierarchy
    pub async fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<()> {
        let action = match event_type {
            EventType::Key(key) => self.handle_key_events(key),
            EventType::Tick => {
                self.on_tick();
                Action::None
            }
            EventType::Resize(_, _) | EventType::Other => Action::None,
        };

        let action = self.update(action);
        self.handle_app_action(action).await;
        Ok(())
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        // Dialog has priority when visible
        if self.dialog.is_visible() {
            return self.dialog.handle_key_events(key);
        }

        let card_action = self.focused_card().handle_key_events(key);
        if !matches!(card_action, Action::None) {
            card_action
        } else {
            self.handle_global_key(key)
        }
    }

    fn update(&mut self, action: Action) -> Action {
        // Process through component hierarchy
        let action = self.dialog.update(action);
        let action = self.teams_card.update(action);
        let action = self.members_card.update(action);
        self.providers_card.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);
        let localization = &self.context.localization;

        let titles = [
            localization.text(crate::localization::keys::TEAMS),
            localization.text(crate::localization::keys::MEMBERS),
            localization.text(crate::localization::keys::PROVIDERS),
        ];
        let selected = match self.focus {
            CardFocus::Teams => 0,
            CardFocus::Members => 1,
            CardFocus::Providers => 2,
        };
        let tabs = Tabs::new(titles.into_iter().map(Line::from))
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, chunks[0]);

        self.focused_card().render(f, chunks[1]);

        let status = match &self.last_redirect {
            Some(url) => Paragraph::new(format!("↗ {}", url)).style(Style::default().fg(Color::Cyan)),
            None => Paragraph::new(crate::constants::STATUS_HINTS).style(Style::default().fg(Color::Gray)),
        };
        f.render_widget(status.alignment(Alignment::Center), chunks[2]);

        // Render dialog on top if visible
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }

        self.toasts.render(f, rect);
    }
}
