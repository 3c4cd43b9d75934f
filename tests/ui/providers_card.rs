use std::sync::Arc;

use super::{buffer_text, directory, hold_busy, key, shared};
use authdeck::auth::AuthClient;
use authdeck::config::ProvidersConfig;
use authdeck::entities::Account;
use authdeck::hooks::{ListAccounts, Query};
use authdeck::lifecycle::Mutation;
use authdeck::localization::Localization;
use authdeck::ui::components::ProvidersCard;
use authdeck::ui::core::{Action, Component, DataKind};
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};

const CALLBACK: &str = "http://localhost:3000/settings";

fn providers() -> ProvidersConfig {
    ProvidersConfig {
        social: vec!["github".to_string(), "google".to_string()],
        other: vec!["keycloak".to_string()],
    }
}

async fn loaded_card() -> (ProvidersCard, Query<Vec<Account>>) {
    let client: Arc<dyn AuthClient> = shared(
        directory()
            .with_account("credential", "user-owner", "olive@example.com")
            .with_account("github", "gh-1", "olive.owner.with.a.long.handle@users.noreply.github.com"),
    );
    let accounts = Query::new(client, ListAccounts);
    accounts.refetch().await.unwrap();

    let mut card = ProvidersCard::new(&providers(), accounts.clone(), CALLBACK.to_string(), Localization::default());
    card.update_data(accounts.snapshot());
    card.focused = true;
    (card, accounts)
}

fn submitted(action: Action) -> authdeck::ui::core::MutationRequest {
    match action {
        Action::Submit(request) => request,
        other => panic!("expected a submit, got {other:?}"),
    }
}

#[test]
fn test_pending_card_ignores_keys() {
    let client: Arc<dyn AuthClient> = shared(directory());
    let accounts = Query::new(client, ListAccounts);
    let mut card = ProvidersCard::new(&providers(), accounts, CALLBACK.to_string(), Localization::default());

    assert_eq!(card.cells().len(), 3);
    assert!(matches!(card.handle_key_events(key(KeyCode::Enter)), Action::None));
}

#[tokio::test]
async fn test_cells_reflect_linked_accounts() {
    let (mut card, _) = loaded_card().await;

    let linked: Vec<(&str, bool, bool)> = card
        .cells()
        .iter()
        .map(|cell| (cell.provider_id.as_str(), cell.other, cell.is_linked()))
        .collect();
    assert_eq!(
        linked,
        vec![("github", false, true), ("google", false, false), ("keycloak", true, false)]
    );

    assert_eq!(card.take_missing_account_info(), vec!["gh-1".to_string()]);
    assert!(card.take_missing_account_info().is_empty());
}

#[tokio::test]
async fn test_linked_row_unlinks_and_refetches_accounts() {
    let (mut card, _) = loaded_card().await;

    let request = submitted(card.handle_key_events(key(KeyCode::Enter)));

    assert_eq!(
        request.mutation,
        Mutation::UnlinkAccount {
            provider_id: "github".to_string(),
            account_id: Some("gh-1".to_string()),
        }
    );
    assert_eq!(request.success_message, "Account unlinked");
    assert_eq!(request.refresh.map(|refresh| refresh.data), Some(DataKind::Accounts));
}

#[tokio::test]
async fn test_unlinked_rows_link_without_refetch() {
    let (mut card, _) = loaded_card().await;

    card.update(Action::NextRow);
    let social = submitted(card.handle_key_events(key(KeyCode::Enter)));
    assert_eq!(
        social.mutation,
        Mutation::LinkSocial {
            provider: "google".to_string(),
            callback_url: CALLBACK.to_string(),
        }
    );
    assert!(social.refresh.is_none());
    assert_eq!(social.success_message, "Continue linking in your browser");

    card.update(Action::NextRow);
    let generic = submitted(card.handle_key_events(key(KeyCode::Enter)));
    assert_eq!(generic.mutation.name(), "linkOAuth2");
}

#[tokio::test]
async fn test_busy_provider_is_disabled() {
    let (mut card, _) = loaded_card().await;

    let controller = card.cells()[0].controller.clone();
    let (release, handle) = hold_busy(&controller).await;

    assert!(card.is_busy("github"));
    assert!(!card.is_busy("google"));
    assert!(card.cells()[0].is_disabled());
    assert!(matches!(card.handle_key_events(key(KeyCode::Enter)), Action::None));

    release.send(()).unwrap();
    handle.await.unwrap();
    assert!(!card.is_busy("github"));
}

#[tokio::test]
async fn test_long_email_is_truncated_with_marker() {
    let (mut card, _) = loaded_card().await;
    card.set_account_email("gh-1", Some("olive.owner.with.a.long.handle@users.noreply.github.com".to_string()));

    let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
    terminal.draw(|f| card.render(f, f.area())).unwrap();

    assert!(card.cells()[0].is_email_truncated());
    let screen = buffer_text(&terminal);
    assert!(screen.contains("Github [Unlink]"));
    assert!(screen.contains("olive.owner"));
    assert!(screen.contains('…'));
}

#[tokio::test]
async fn test_short_email_is_not_truncated() {
    let (mut card, _) = loaded_card().await;
    card.set_account_email("gh-1", Some("o@gh.io".to_string()));

    let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
    terminal.draw(|f| card.render(f, f.area())).unwrap();

    assert!(!card.cells()[0].is_email_truncated());
    assert!(buffer_text(&terminal).contains("o@gh.io"));
}

#[tokio::test]
async fn test_teardown_silences_rows() {
    let (mut card, _) = loaded_card().await;
    let controllers: Vec<_> = card.cells().iter().map(|cell| cell.controller.clone()).collect();

    card.teardown();

    assert!(controllers.iter().all(|controller| controller.is_torn_down()));
}
