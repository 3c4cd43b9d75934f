use std::sync::Arc;
use std::time::Duration;

use super::{buffer_text, directory, hold_busy, key, shared, team};
use authdeck::auth::AuthClient;
use authdeck::hooks::{ListTeams, Query};
use authdeck::lifecycle::{FeedbackKind, Mutation};
use authdeck::localization::{ErrorLocalizer, Localization};
use authdeck::ui::components::dialogs::{CreateTeamDialog, DeleteTeamDialog, UpdateTeamDialog};
use authdeck::ui::core::{Action, Component, DataKind, TaskManager};
use authdeck::Team;
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};

fn teams_query(client: Arc<dyn AuthClient>) -> Query<Vec<Team>> {
    Query::new(
        client,
        ListTeams {
            organization_id: "org-1".to_string(),
        },
    )
}

fn type_text(dialog: &mut impl Component, text: &str) {
    for c in text.chars() {
        dialog.handle_key_events(key(KeyCode::Char(c)));
    }
}

#[test]
fn test_create_dialog_submits_trimmed_name() {
    let client: Arc<dyn AuthClient> = shared(directory());
    let mut dialog = CreateTeamDialog::new("org-1".to_string(), teams_query(client), Localization::default());

    assert!(dialog.is_submit_disabled());
    type_text(&mut dialog, "  Infra ");
    assert!(!dialog.is_submit_disabled());

    match dialog.handle_key_events(key(KeyCode::Enter)) {
        Action::Submit(request) => {
            assert_eq!(
                request.mutation,
                Mutation::CreateTeam {
                    organization_id: "org-1".to_string(),
                    name: "Infra".to_string(),
                }
            );
            assert_eq!(request.success_message, "Team created successfully");
            assert!(request.completes_dialog);
            assert_eq!(request.refresh.map(|refresh| refresh.data), Some(DataKind::Teams));
        }
        other => panic!("expected a submit, got {other:?}"),
    }
}

#[test]
fn test_create_dialog_blank_name_is_never_submitted() {
    let client: Arc<dyn AuthClient> = shared(directory());
    let mut dialog = CreateTeamDialog::new("org-1".to_string(), teams_query(client), Localization::default());

    type_text(&mut dialog, "   ");
    assert!(dialog.is_submit_disabled());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));
}

#[test]
fn test_whitespace_rename_is_never_submitted() {
    let memory = shared(directory());
    let client: Arc<dyn AuthClient> = memory.clone();
    let mut dialog = UpdateTeamDialog::new(team("team-a", "Platform", 5), teams_query(client), Localization::default());

    assert_eq!(dialog.input(), "Platform");
    for _ in 0.."Platform".len() {
        dialog.handle_key_events(key(KeyCode::Backspace));
    }
    type_text(&mut dialog, "    ");

    assert!(dialog.is_submit_disabled());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));
    assert!(memory.calls().is_empty());
}

#[test]
fn test_rename_submits_update() {
    let client: Arc<dyn AuthClient> = shared(directory());
    let mut dialog = UpdateTeamDialog::new(team("team-a", "Platform", 5), teams_query(client), Localization::default());

    type_text(&mut dialog, " 2");

    match dialog.handle_key_events(key(KeyCode::Enter)) {
        Action::Submit(request) => {
            assert_eq!(request.mutation.to_string(), "updateTeam(teamId=team-a, name=Platform 2)");
            assert_eq!(request.success_message, "Team updated successfully");
        }
        other => panic!("expected a submit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_busy_dialog_ignores_cancel_and_submit() {
    let client: Arc<dyn AuthClient> = shared(directory());
    let mut dialog = UpdateTeamDialog::new(team("team-a", "Platform", 5), teams_query(client), Localization::default());

    let Action::Submit(request) = dialog.handle_key_events(key(KeyCode::Enter)) else {
        panic!("expected a submit");
    };
    let (release, handle) = hold_busy(&request.controller).await;

    assert!(dialog.is_busy());
    assert!(dialog.is_submit_disabled());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::None));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));

    release.send(()).unwrap();
    handle.await.unwrap();
    assert!(!dialog.is_busy());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::HideDialog));
}

#[test]
fn test_delete_dialog_confirms_and_cancels() {
    let client: Arc<dyn AuthClient> = shared(directory());
    let mut dialog = DeleteTeamDialog::new(team("team-a", "Platform", 5), teams_query(client), Localization::default());

    assert!(matches!(dialog.handle_key_events(key(KeyCode::Char('n'))), Action::HideDialog));
    match dialog.handle_key_events(key(KeyCode::Char('y'))) {
        Action::Submit(request) => {
            assert_eq!(request.mutation.name(), "removeTeam");
            assert_eq!(request.success_message, "Team deleted successfully");
        }
        other => panic!("expected a submit, got {other:?}"),
    }
}

#[test]
fn test_update_dialog_renders_current_team() {
    let client: Arc<dyn AuthClient> = shared(directory());
    let mut dialog = UpdateTeamDialog::new(team("team-a", "Platform", 5), teams_query(client), Localization::default());

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| dialog.render(f, f.area())).unwrap();

    let screen = buffer_text(&terminal);
    assert!(screen.contains("Update Team"));
    assert!(screen.contains("Platform"));
}

#[tokio::test]
async fn test_create_runs_through_task_manager() {
    let memory = shared(directory().with_latency(Duration::from_millis(50)));
    let client: Arc<dyn AuthClient> = memory.clone();
    let teams = teams_query(Arc::clone(&client));
    let errors = Arc::new(ErrorLocalizer::new(Localization::default(), true));
    let (mut tasks, mut rx) = TaskManager::new(Arc::clone(&client), errors);

    let mut dialog = CreateTeamDialog::new("org-1".to_string(), teams.clone(), Localization::default());
    type_text(&mut dialog, "Infra");
    let Action::Submit(request) = dialog.handle_key_events(key(KeyCode::Enter)) else {
        panic!("expected a submit");
    };
    tasks.spawn_mutation(request);

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(dialog.is_busy());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::None));

    let mut received = Vec::new();
    while received.len() < 3 {
        let action = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("mutation settles")
            .expect("channel open");
        received.push(action);
    }

    assert!(matches!(&received[0], Action::Toast(event) if event.kind == FeedbackKind::Success
        && event.message == "Team created successfully"));
    assert!(matches!(&received[1], Action::DataRefreshed(DataKind::Teams)));
    assert!(matches!(&received[2], Action::DialogCompleted));
    assert!(!dialog.is_busy());

    let names: Vec<String> = teams.data().unwrap().into_iter().map(|team| team.name).collect();
    assert!(names.contains(&"Infra".to_string()));
    assert_eq!(memory.calls(), vec![
        "createTeam(organizationId=org-1, name=Infra)".to_string(),
        "listTeams(organizationId=org-1)".to_string(),
    ]);
}

#[tokio::test]
async fn test_failed_create_reports_error_and_keeps_dialog_open() {
    let memory = shared(directory());
    let client: Arc<dyn AuthClient> = memory.clone();
    let errors = Arc::new(ErrorLocalizer::new(Localization::default(), true));
    let (mut tasks, mut rx) = TaskManager::new(Arc::clone(&client), errors);

    let mut dialog = CreateTeamDialog::new("org-1".to_string(), teams_query(client), Localization::default());
    type_text(&mut dialog, "Design");
    let Action::Submit(request) = dialog.handle_key_events(key(KeyCode::Enter)) else {
        panic!("expected a submit");
    };
    tasks.spawn_mutation(request);

    let action = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(action, Action::Toast(ref event) if event.kind == FeedbackKind::Error
        && event.message == "A team with this name already exists"));

    // Nothing else follows a failure
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(memory.calls().len(), 1);
}
