use super::{buffer_text, key, team};
use authdeck::hooks::{Permissions, QueryState};
use authdeck::localization::{ErrorLocalizer, Localization};
use authdeck::ui::components::TeamsCard;
use authdeck::ui::core::{Action, Component, DialogType};
use authdeck::auth::AuthError;
use authdeck::Team;
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};

fn loaded<T>(data: T) -> QueryState<T> {
    QueryState {
        is_pending: false,
        data: Some(data),
        error: None,
    }
}

fn errors() -> ErrorLocalizer {
    ErrorLocalizer::new(Localization::default(), true)
}

fn card_with(teams: Vec<Team>, permissions: Permissions) -> TeamsCard {
    let mut card = TeamsCard::new(Localization::default());
    card.update_data(loaded(teams), loaded(permissions), &errors());
    card.focused = true;
    card
}

fn render(card: &mut TeamsCard) -> String {
    let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
    terminal.draw(|f| card.render(f, f.area())).unwrap();
    buffer_text(&terminal)
}

#[test]
fn test_pending_card_shows_skeleton_and_ignores_keys() {
    let mut card = TeamsCard::new(Localization::default());
    card.focused = true;

    assert!(card.is_loading());
    assert!(matches!(card.handle_key_events(key(KeyCode::Char('n'))), Action::None));
    assert!(render(&mut card).contains('░'));
}

#[test]
fn test_pending_permissions_keep_skeleton() {
    let mut card = TeamsCard::new(Localization::default());
    card.update_data(loaded(vec![team("team-a", "Platform", 1)]), QueryState::default(), &errors());

    assert!(card.is_loading());
    let screen = render(&mut card);
    assert!(screen.contains('░'));
    assert!(!screen.contains("Platform"));
}

#[test]
fn test_empty_state() {
    let mut card = card_with(Vec::new(), Permissions::all());
    assert!(render(&mut card).contains("No teams found"));
}

#[test]
fn test_rows_sorted_by_creation_time() {
    let card = card_with(
        vec![
            team("team-c", "Design", 20),
            team("team-b", "Research", 5),
            team("team-a", "Platform", 5),
        ],
        Permissions::all(),
    );

    let ids: Vec<&str> = card.teams().iter().map(|team| team.id.as_str()).collect();
    assert_eq!(ids, vec!["team-a", "team-b", "team-c"]);
}

#[test]
fn test_render_lists_team_names_and_create_action() {
    let mut card = card_with(
        vec![team("team-b", "Research", 10), team("team-a", "Platform", 1)],
        Permissions::all(),
    );

    let screen = render(&mut card);
    assert!(screen.contains("Teams"));
    assert!(screen.contains("Create Team"));
    let platform = screen.find("Platform").unwrap();
    let research = screen.find("Research").unwrap();
    assert!(platform < research);
}

#[test]
fn test_controls_follow_permissions() {
    let mut card = card_with(
        vec![team("team-a", "Platform", 1)],
        Permissions {
            can_create: false,
            can_update: true,
            can_delete: false,
        },
    );

    assert!(matches!(card.handle_key_events(key(KeyCode::Char('n'))), Action::None));
    assert!(matches!(card.handle_key_events(key(KeyCode::Char('d'))), Action::None));
    assert!(matches!(
        card.handle_key_events(key(KeyCode::Char('e'))),
        Action::ShowDialog(DialogType::UpdateTeam(ref team)) if team.id == "team-a"
    ));
}

#[test]
fn test_owner_can_open_every_dialog() {
    let mut card = card_with(vec![team("team-a", "Platform", 1)], Permissions::all());

    assert!(matches!(
        card.handle_key_events(key(KeyCode::Char('n'))),
        Action::ShowDialog(DialogType::CreateTeam)
    ));
    assert!(matches!(
        card.handle_key_events(key(KeyCode::Char('d'))),
        Action::ShowDialog(DialogType::DeleteTeam(_))
    ));
}

#[test]
fn test_navigation_moves_selection() {
    let mut card = card_with(
        vec![team("team-a", "Platform", 1), team("team-b", "Research", 2)],
        Permissions::all(),
    );
    assert_eq!(card.selected_team().map(|t| t.id.as_str()), Some("team-a"));

    let action = card.handle_key_events(key(KeyCode::Char('j')));
    assert!(matches!(card.update(action), Action::None));
    assert_eq!(card.selected_team().map(|t| t.id.as_str()), Some("team-b"));

    // Wraps around
    card.update(Action::NextRow);
    assert_eq!(card.selected_team().map(|t| t.id.as_str()), Some("team-a"));
}

#[test]
fn test_selection_follows_team_across_refetch() {
    let mut card = card_with(
        vec![team("team-a", "Platform", 1), team("team-b", "Research", 2)],
        Permissions::all(),
    );
    card.update(Action::NextRow);

    // A newer team is inserted before team-b by creation time
    card.update_data(
        loaded(vec![
            team("team-a", "Platform", 1),
            team("team-b", "Research", 3),
            team("team-x", "Early", 2),
        ]),
        loaded(Permissions::all()),
        &errors(),
    );

    assert_eq!(card.selected_team().map(|t| t.id.as_str()), Some("team-b"));
}

#[test]
fn test_load_error_is_rendered() {
    let mut card = TeamsCard::new(Localization::default());
    card.update_data(
        QueryState {
            is_pending: false,
            data: None,
            error: Some(AuthError::Unauthenticated),
        },
        loaded(Permissions::all()),
        &errors(),
    );

    assert!(render(&mut card).contains("You need to sign in again"));
}
