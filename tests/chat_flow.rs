//! End-to-end tests for the chat widget actor: welcome scheduling, reply
//! ordering, and timer cancellation. Time is paused, so delays are
//! deterministic.

use frontdesk::config::{ChatConfig, Config};
use frontdesk::matcher::Responder;
use frontdesk::types::Role;
use frontdesk::widget::ChatWidget;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::Instant;

fn responder(config: &Config) -> Responder {
    Responder::new(&config.practice, &config.contact)
}

#[tokio::test(start_paused = true)]
async fn welcome_arrives_only_after_its_delay() {
    let config = Config::default();
    let (widget, mut replies) = ChatWidget::spawn(&config);
    widget.toggle().unwrap();

    // Let the actor process the toggle without advancing the clock.
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert!(matches!(replies.try_recv(), Err(TryRecvError::Empty)));

    let started = Instant::now();
    let welcome = replies.recv().await.expect("welcome message");
    assert_eq!(started.elapsed(), Duration::from_millis(500));
    assert_eq!(welcome.role, Role::Assistant);
    assert_eq!(welcome.text, responder(&config).welcome());
}

#[tokio::test(start_paused = true)]
async fn send_grows_the_log_by_exactly_two() {
    let mut config = Config::default();
    config.chat = ChatConfig::instant();
    let (widget, mut replies) = ChatWidget::spawn(&config);
    widget.toggle().unwrap();
    let _welcome = replies.recv().await.expect("welcome message");

    widget.send("hello").unwrap();
    let reply = replies.recv().await.expect("reply to hello");
    assert_eq!(reply.text, responder(&config).respond("hello"));

    let state = widget.state().await.unwrap();
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[1].role, Role::User);
    assert_eq!(state.messages[1].text, "hello");
    assert_eq!(state.messages[2].role, Role::Assistant);
    assert!(!state.typing);
}

#[tokio::test(start_paused = true)]
async fn rapid_sends_are_answered_in_order() {
    let config = Config::default();
    let (widget, mut replies) = ChatWidget::spawn(&config);
    widget.toggle().unwrap();
    let _welcome = replies.recv().await.expect("welcome message");

    widget.send("Where is your clinic located?").unwrap();
    widget.send("What does a consultation cost?").unwrap();

    let first = replies.recv().await.expect("first reply");
    let second = replies.recv().await.expect("second reply");
    let r = responder(&config);
    assert_eq!(first.text, r.respond("Where is your clinic located?"));
    assert_eq!(second.text, r.respond("What does a consultation cost?"));
    assert_ne!(first.text, second.text);

    let state = widget.state().await.unwrap();
    assert_eq!(state.messages.len(), 5);
    assert!(!state.typing);
}

#[tokio::test(start_paused = true)]
async fn suggested_question_uses_the_short_delay() {
    let config = Config::default();
    let (widget, mut replies) = ChatWidget::spawn(&config);
    widget.toggle().unwrap();
    let _welcome = replies.recv().await.expect("welcome message");

    let started = Instant::now();
    widget.suggest("Emergency contact number?").unwrap();
    let reply = replies.recv().await.expect("suggested reply");
    assert_eq!(started.elapsed(), Duration::from_millis(800));
    assert_eq!(reply.text, responder(&config).respond("Emergency contact number?"));
}

#[tokio::test(start_paused = true)]
async fn double_toggle_closes_but_single_welcome_still_lands() {
    let config = Config::default();
    let (widget, mut replies) = ChatWidget::spawn(&config);
    widget.toggle().unwrap();
    widget.toggle().unwrap();

    let state = widget.state().await.unwrap();
    assert!(!state.open);

    // The original widget never cancels the welcome timer on close; the
    // message lands in the retained log.
    let welcome = replies.recv().await.expect("welcome message");
    assert_eq!(welcome.role, Role::Assistant);

    let state = widget.state().await.unwrap();
    assert_eq!(state.messages.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_input_is_ignored() {
    let config = Config::default();
    let (widget, _replies) = ChatWidget::spawn(&config);
    widget.send("   ").unwrap();

    let state = widget.state().await.unwrap();
    assert!(state.messages.is_empty());
    assert!(!state.typing);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels_the_pending_reply() {
    let config = Config::default();
    let (widget, mut replies) = ChatWidget::spawn(&config);
    widget.toggle().unwrap();
    drop(widget);

    assert!(replies.recv().await.is_none(), "no reply after teardown");
}
