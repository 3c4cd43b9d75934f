use std::sync::Arc;

use super::{buffer_text, directory, hold_busy, key, shared};
use authdeck::auth::{AuthClient, MemoryAuthClient};
use authdeck::entities::{Member, UserSummary};
use authdeck::hooks::{ListMemberTeams, ListTeams, Query};
use authdeck::lifecycle::Mutation;
use authdeck::localization::Localization;
use authdeck::ui::components::dialogs::UpdateMemberTeamsDialog;
use authdeck::ui::core::{Action, Component, DataKind};
use authdeck::Team;
use chrono::Utc;
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};

fn ada() -> Member {
    Member {
        id: "member-user-ada".to_string(),
        organization_id: "org-1".to_string(),
        user_id: "user-ada".to_string(),
        role: "member".to_string(),
        created_at: Utc::now(),
        user: Some(UserSummary {
            id: "user-ada".to_string(),
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
        }),
    }
}

struct Fixture {
    memory: Arc<MemoryAuthClient>,
    teams: Query<Vec<Team>>,
    member_teams: Query<Vec<Team>>,
}

fn fixture() -> Fixture {
    let memory = shared(directory());
    let client: Arc<dyn AuthClient> = memory.clone();
    let teams = Query::new(
        Arc::clone(&client),
        ListTeams {
            organization_id: "org-1".to_string(),
        },
    );
    let member_teams = Query::new(
        client,
        ListMemberTeams {
            organization_id: "org-1".to_string(),
            user_id: "user-ada".to_string(),
        },
    );
    Fixture {
        memory,
        teams,
        member_teams,
    }
}

async fn loaded_dialog(fixture: &Fixture) -> UpdateMemberTeamsDialog {
    fixture.teams.refetch().await.unwrap();
    fixture.member_teams.refetch().await.unwrap();
    UpdateMemberTeamsDialog::new(
        ada(),
        fixture.teams.clone(),
        fixture.member_teams.clone(),
        Localization::default(),
    )
}

#[test]
fn test_pending_dialog_shows_skeleton_and_disables_done() {
    let fixture = fixture();
    let mut dialog = UpdateMemberTeamsDialog::new(
        ada(),
        fixture.teams.clone(),
        fixture.member_teams.clone(),
        Localization::default(),
    );

    assert!(dialog.is_pending());
    assert!(dialog.cells().is_empty());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::None));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));

    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(|f| dialog.render(f, f.area())).unwrap();
    let screen = buffer_text(&terminal);
    assert!(screen.contains('░'));
    assert!(screen.contains("Ada Lovelace"));
}

#[tokio::test]
async fn test_cells_follow_creation_order_and_membership() {
    let fixture = fixture();
    let mut dialog = loaded_dialog(&fixture).await;

    let rows: Vec<(&str, bool)> = dialog
        .cells()
        .iter()
        .map(|cell| (cell.team.id.as_str(), cell.added))
        .collect();
    assert_eq!(rows, vec![("team-a", false), ("team-b", true), ("team-c", false)]);

    // Done is enabled once everything loaded
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::HideDialog));
}

#[tokio::test]
async fn test_enter_toggles_selected_row() {
    let fixture = fixture();
    let mut dialog = loaded_dialog(&fixture).await;

    match dialog.handle_key_events(key(KeyCode::Enter)) {
        Action::Submit(request) => {
            assert_eq!(
                request.mutation,
                Mutation::AddTeamMember {
                    team_id: "team-a".to_string(),
                    user_id: "user-ada".to_string(),
                }
            );
            assert_eq!(request.success_message, "Member added to team");
            assert!(!request.completes_dialog);
            assert_eq!(
                request.refresh.map(|refresh| refresh.data),
                Some(DataKind::MemberTeams("user-ada".to_string()))
            );
        }
        other => panic!("expected a submit, got {other:?}"),
    }

    dialog.handle_key_events(key(KeyCode::Char('j')));
    match dialog.handle_key_events(key(KeyCode::Enter)) {
        Action::Submit(request) => {
            assert_eq!(request.mutation.to_string(), "removeTeamMember(teamId=team-b, userId=user-ada)");
            assert_eq!(request.success_message, "Member removed from team");
        }
        other => panic!("expected a submit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_busy_row_is_disabled_while_siblings_stay_enabled() {
    let fixture = fixture();
    let mut dialog = loaded_dialog(&fixture).await;

    let (release, handle) = hold_busy(&dialog.cells()[0].controller).await;

    assert!(dialog.cells()[0].is_disabled());
    assert!(!dialog.cells()[1].is_disabled());
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));

    dialog.select(1);
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::Submit(_)));

    release.send(()).unwrap();
    handle.await.unwrap();
    assert!(!dialog.cells()[0].is_disabled());
}

#[tokio::test]
async fn test_member_refetch_resyncs_rows() {
    let fixture = fixture();
    let mut dialog = loaded_dialog(&fixture).await;

    fixture.memory.add_team_member("team-a", "user-ada").await.unwrap();
    fixture.member_teams.refetch().await.unwrap();

    // Another member's refetch leaves the rows alone
    dialog.update(Action::DataRefreshed(DataKind::MemberTeams("user-alan".to_string())));
    assert!(!dialog.cells()[0].added);

    dialog.update(Action::DataRefreshed(DataKind::MemberTeams("user-ada".to_string())));
    assert!(dialog.cells()[0].added);
}

#[tokio::test]
async fn test_removed_team_row_is_torn_down() {
    let fixture = fixture();
    let mut dialog = loaded_dialog(&fixture).await;
    let removed = dialog.cells()[2].controller.clone();
    let kept = dialog.cells()[0].controller.clone();

    fixture.memory.remove_team("team-c", "org-1").await.unwrap();
    fixture.teams.refetch().await.unwrap();
    dialog.update(Action::DataRefreshed(DataKind::Teams));

    assert_eq!(dialog.cells().len(), 2);
    assert!(removed.is_torn_down());
    assert!(!kept.is_torn_down());
}

#[tokio::test]
async fn test_teardown_silences_every_row() {
    let fixture = fixture();
    let mut dialog = loaded_dialog(&fixture).await;
    let controllers: Vec<_> = dialog.cells().iter().map(|cell| cell.controller.clone()).collect();

    dialog.teardown();

    assert!(controllers.iter().all(|controller| controller.is_torn_down()));
}

#[tokio::test]
async fn test_render_marks_membership() {
    let fixture = fixture();
    let mut dialog = loaded_dialog(&fixture).await;

    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(|f| dialog.render(f, f.area())).unwrap();

    let screen = buffer_text(&terminal);
    assert!(screen.contains("Update Teams"));
    assert!(screen.contains("✓ Research"));
    assert!(screen.contains("Platform [Add]"));
    assert!(screen.contains("Research [Remove]"));
}
