use std::sync::Arc;
use std::time::Duration;

use super::{buffer_text, directory, key, shared};
use authdeck::auth::{AuthClient, MemoryAuthClient};
use authdeck::config::{ClientKind, Config};
use authdeck::logger::Logger;
use authdeck::ui::components::ActiveDialog;
use authdeck::ui::core::{AppContext, CardFocus, Component, EventType};
use authdeck::ui::AppComponent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

fn app_with(memory: Arc<MemoryAuthClient>) -> AppComponent {
    let mut config = Config::default();
    config.auth.client = ClientKind::Memory;
    config.auth.organization_id = "org-1".to_string();
    let client: Arc<dyn AuthClient> = memory;
    AppComponent::new(AppContext::new(client, config, Logger::new()))
}

/// Feed background actions through the app until `done` holds.
async fn pump(app: &mut AppComponent, done: impl Fn(&AppComponent) -> bool) {
    for _ in 0..200 {
        for action in app.process_background_actions() {
            let action = app.update(action);
            app.handle_app_action(action).await;
        }
        if done(app) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("background work did not settle");
}

async fn press(app: &mut AppComponent, code: KeyCode) {
    app.handle_event(EventType::Key(key(code))).await.unwrap();
}

async fn loaded_app(memory: Arc<MemoryAuthClient>) -> AppComponent {
    let mut app = app_with(memory);
    app.load_initial_data();
    pump(&mut app, |app| {
        !app.teams_card().is_loading() && !app.providers_card().is_loading() && app.active_task_count() == 0
    })
    .await;
    app
}

#[tokio::test]
async fn test_initial_load_fills_teams_card() {
    let app = loaded_app(shared(directory())).await;

    let names: Vec<&str> = app.teams_card().teams().iter().map(|team| team.name.as_str()).collect();
    assert_eq!(names, vec!["Platform", "Research", "Design"]);
    assert_eq!(app.focus(), CardFocus::Teams);
}

#[tokio::test]
async fn test_create_team_flow() {
    let memory = shared(directory());
    let mut app = loaded_app(memory.clone()).await;

    press(&mut app, KeyCode::Char('n')).await;
    assert!(matches!(app.dialog().active(), Some(ActiveDialog::CreateTeam(_))));

    for c in "Infra".chars() {
        press(&mut app, KeyCode::Char(c)).await;
    }
    press(&mut app, KeyCode::Enter).await;

    pump(&mut app, |app| !app.dialog().is_visible()).await;

    let names: Vec<&str> = app.teams_card().teams().iter().map(|team| team.name.as_str()).collect();
    assert_eq!(names.last(), Some(&"Infra"));
    let toasts: Vec<&str> = app.toasts().visible().map(|t| t.event.message.as_str()).collect();
    assert_eq!(toasts, vec!["Team created successfully"]);
    assert!(memory
        .calls()
        .contains(&"createTeam(organizationId=org-1, name=Infra)".to_string()));
}

#[tokio::test]
async fn test_failed_delete_keeps_dialog_open() {
    let memory = shared(directory());
    let mut app = loaded_app(memory.clone()).await;
    memory.fail_next(
        "removeTeam",
        authdeck::auth::AuthError::api(403, "YOU_ARE_NOT_ALLOWED_TO_DELETE_THIS_TEAM", "forbidden"),
    );

    press(&mut app, KeyCode::Char('d')).await;
    press(&mut app, KeyCode::Char('y')).await;
    pump(&mut app, |app| !app.toasts().is_empty()).await;

    assert!(app.dialog().is_visible());
    let toast = app.toasts().visible().next().unwrap();
    assert_eq!(toast.event.message, "You are not allowed to delete this team");
    assert_eq!(app.teams_card().teams().len(), 3);
}

#[tokio::test]
async fn test_tab_cycles_cards() {
    let mut app = app_with(shared(directory()));

    press(&mut app, KeyCode::Tab).await;
    assert_eq!(app.focus(), CardFocus::Members);
    press(&mut app, KeyCode::Tab).await;
    assert_eq!(app.focus(), CardFocus::Providers);
    press(&mut app, KeyCode::BackTab).await;
    assert_eq!(app.focus(), CardFocus::Members);
}

#[tokio::test]
async fn test_link_surfaces_redirect() {
    let memory = shared(directory().with_account("credential", "user-owner", "olive@example.com"));
    let mut app = loaded_app(memory).await;

    press(&mut app, KeyCode::Tab).await;
    press(&mut app, KeyCode::Tab).await;
    press(&mut app, KeyCode::Enter).await;
    pump(&mut app, |app| app.last_redirect().is_some()).await;

    assert!(app.last_redirect().unwrap().contains("github"));
    let toasts: Vec<&str> = app.toasts().visible().map(|t| t.event.message.as_str()).collect();
    assert_eq!(toasts, vec!["Continue linking in your browser"]);

    let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();
    assert!(buffer_text(&terminal).contains("↗ https://github.example.com"));
}

#[tokio::test]
async fn test_logs_dialog_opens_and_closes() {
    let mut app = app_with(shared(directory()));

    press(&mut app, KeyCode::Char('L')).await;
    assert!(matches!(app.dialog().active(), Some(ActiveDialog::Logs(_))));

    press(&mut app, KeyCode::Esc).await;
    assert!(!app.dialog().is_visible());
}

#[tokio::test]
async fn test_quit_with_ctrl_c() {
    let mut app = app_with(shared(directory()));

    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
        .await
        .unwrap();

    assert!(app.should_quit());
}

#[tokio::test]
async fn test_render_main_view() {
    let mut app = loaded_app(shared(directory())).await;

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();

    let screen = buffer_text(&terminal);
    assert!(screen.contains("Members"));
    assert!(screen.contains("Providers"));
    assert!(screen.contains("Platform"));
}

fn member_dialog_pending(app: &AppComponent) -> Option<bool> {
    match app.dialog().active() {
        Some(ActiveDialog::UpdateMemberTeams(dialog)) => Some(dialog.is_pending()),
        _ => None,
    }
}

#[tokio::test]
async fn test_add_member_to_team_flow() {
    let memory = shared(directory());
    let mut app = loaded_app(memory.clone()).await;

    press(&mut app, KeyCode::Tab).await;
    press(&mut app, KeyCode::Char('j')).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(member_dialog_pending(&app), Some(true));

    pump(&mut app, |app| member_dialog_pending(app) == Some(false)).await;
    press(&mut app, KeyCode::Enter).await;
    pump(&mut app, |app| !app.toasts().is_empty()).await;

    let toasts: Vec<&str> = app.toasts().visible().map(|t| t.event.message.as_str()).collect();
    assert_eq!(toasts, vec!["Member added to team"]);
    let calls = memory.calls();
    let add = calls
        .iter()
        .position(|call| call == "addTeamMember(teamId=team-a, userId=user-ada)")
        .expect("add called");
    assert_eq!(calls[add + 1], "listMemberTeams(organizationId=org-1, userId=user-ada)");

    pump(&mut app, |app| match app.dialog().active() {
        Some(ActiveDialog::UpdateMemberTeams(dialog)) => dialog.cells()[0].added,
        _ => false,
    })
    .await;
}

fn create_dialog_state(app: &AppComponent) -> Option<(bool, bool)> {
    match app.dialog().active() {
        Some(ActiveDialog::CreateTeam(dialog)) => Some((dialog.is_busy(), dialog.is_submit_disabled())),
        _ => None,
    }
}

fn create_calls(memory: &MemoryAuthClient) -> usize {
    memory
        .calls()
        .iter()
        .filter(|call| call.starts_with("createTeam"))
        .count()
}

#[tokio::test]
async fn test_enter_before_dialog_closes_does_not_create_twice() {
    let memory = shared(directory());
    let mut app = loaded_app(memory.clone()).await;

    press(&mut app, KeyCode::Char('n')).await;
    for c in "Infra".chars() {
        press(&mut app, KeyCode::Char(c)).await;
    }
    press(&mut app, KeyCode::Enter).await;

    // The run settles before the next tick drains DialogCompleted
    for _ in 0..200 {
        if create_calls(&memory) == 1 && create_dialog_state(&app) == Some((false, true)) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(create_dialog_state(&app), Some((false, true)));

    press(&mut app, KeyCode::Enter).await;
    pump(&mut app, |app| !app.dialog().is_visible() && app.active_task_count() == 0).await;

    assert_eq!(create_calls(&memory), 1);
    let infra = app
        .teams_card()
        .teams()
        .iter()
        .filter(|team| team.name == "Infra")
        .count();
    assert_eq!(infra, 1);
}
