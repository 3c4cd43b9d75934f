use std::time::{Duration, Instant};

use super::buffer_text;
use authdeck::lifecycle::FeedbackEvent;
use authdeck::ui::components::ToastHost;
use ratatui::{backend::TestBackend, Terminal};

#[test]
fn test_toasts_expire_after_duration() {
    let mut host = ToastHost::new(Duration::from_secs(4));
    let start = Instant::now();

    host.push_at(FeedbackEvent::success("Team created successfully"), start);
    host.push_at(FeedbackEvent::error("Request failed"), start + Duration::from_secs(2));

    host.prune(start + Duration::from_secs(3));
    assert_eq!(host.len(), 2);

    host.prune(start + Duration::from_secs(5));
    assert_eq!(host.len(), 1);
    assert_eq!(host.visible().next().map(|t| t.event.message.as_str()), Some("Request failed"));

    host.prune(start + Duration::from_secs(7));
    assert!(host.is_empty());
}

#[test]
fn test_newest_toasts_are_visible_first() {
    let mut host = ToastHost::new(Duration::from_secs(4));
    for i in 0..5 {
        host.push(FeedbackEvent::success(format!("toast {i}")));
    }

    let visible: Vec<&str> = host.visible().map(|t| t.event.message.as_str()).collect();
    assert_eq!(visible, vec!["toast 4", "toast 3", "toast 2"]);
    assert_eq!(host.len(), 5);
}

#[test]
fn test_render_shows_message() {
    let mut host = ToastHost::new(Duration::from_secs(4));
    host.push(FeedbackEvent::success("Member added to team"));

    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal.draw(|f| host.render(f, f.area())).unwrap();

    assert!(buffer_text(&terminal).contains("Member added to team"));
}
