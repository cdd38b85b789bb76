use crate::config::ChatConfig;
use crate::matcher::Responder;
use crate::types::Message;
use rand::RngExt;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ReplyDelays {
    pub welcome: Duration,
    pub suggested: Duration,
    pub typed_min: Duration,
    pub typed_max: Duration,
}

impl ReplyDelays {
    pub fn from_config(cfg: &ChatConfig) -> Self {
        Self {
            welcome: Duration::from_millis(cfg.welcome_delay_ms),
            suggested: Duration::from_millis(cfg.suggested_delay_ms),
            typed_min: Duration::from_millis(cfg.reply_delay_min_ms),
            typed_max: Duration::from_millis(cfg.reply_delay_max_ms),
        }
    }

    fn typed(&self) -> Duration {
        if self.typed_min >= self.typed_max {
            return self.typed_min;
        }
        let min = self.typed_min.as_millis() as u64;
        let max = self.typed_max.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

#[derive(Debug)]
struct QueuedReply {
    // None is the welcome message, which has no prompting user message.
    prompt: Option<String>,
    delay: Duration,
}

/// Per-widget conversational state: the append-only message log, the
/// visibility flag, and the FIFO of replies waiting on their simulated
/// typing delay. Owns no timers; the widget actor drives real time by
/// calling `next_delay` / `deliver_due`.
#[derive(Debug)]
pub struct ChatSession {
    responder: Responder,
    delays: ReplyDelays,
    messages: Vec<Message>,
    open: bool,
    welcomed: bool,
    queue: VecDeque<QueuedReply>,
}

impl ChatSession {
    pub fn new(responder: Responder, delays: ReplyDelays) -> Self {
        Self {
            responder,
            delays,
            messages: Vec::new(),
            open: false,
            welcomed: false,
            queue: VecDeque::new(),
        }
    }

    /// Flips visibility. The very first open of an empty conversation
    /// schedules the welcome message; the latch guarantees reopening never
    /// duplicates it. Closing does not cancel queued replies.
    pub fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        if self.open && !self.welcomed && self.messages.is_empty() {
            self.welcomed = true;
            self.queue.push_back(QueuedReply {
                prompt: None,
                delay: self.delays.welcome,
            });
        }
        self.open
    }

    /// Accepts typed input: appends the user message immediately and queues
    /// a reply after a randomized typing delay. Whitespace-only input is
    /// ignored and returns None.
    pub fn send(&mut self, text: &str) -> Option<&Message> {
        let delay = self.delays.typed();
        self.queue_prompt(text, delay)
    }

    /// Same as `send`, with the shorter fixed delay used for the suggested
    /// question shortcuts.
    pub fn suggest(&mut self, text: &str) -> Option<&Message> {
        self.queue_prompt(text, self.delays.suggested)
    }

    fn queue_prompt(&mut self, text: &str, delay: Duration) -> Option<&Message> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.messages.push(Message::user(trimmed));
        self.queue.push_back(QueuedReply {
            prompt: Some(trimmed.to_string()),
            delay,
        });
        self.messages.last()
    }

    /// Delay of the reply at the front of the queue, if any.
    pub fn next_delay(&self) -> Option<Duration> {
        self.queue.front().map(|queued| queued.delay)
    }

    /// Resolves the front queued reply: runs the matcher (or takes the
    /// welcome text) and appends the assistant message. No-op when nothing
    /// is queued.
    pub fn deliver_due(&mut self) -> Option<&Message> {
        let due = self.queue.pop_front()?;
        let reply = match due.prompt {
            Some(prompt) => self.responder.respond(&prompt).to_string(),
            None => self.responder.welcome().to_string(),
        };
        self.messages.push(Message::assistant(reply));
        self.messages.last()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The typing indicator tracks pending replies to user messages; the
    /// queued welcome does not count, matching the widget's behavior.
    pub fn is_typing(&self) -> bool {
        self.queue.iter().any(|queued| queued.prompt.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::Role;

    fn session() -> ChatSession {
        let cfg = Config::default();
        ChatSession::new(
            Responder::new(&cfg.practice, &cfg.contact),
            ReplyDelays::from_config(&cfg.chat),
        )
    }

    fn responder() -> Responder {
        let cfg = Config::default();
        Responder::new(&cfg.practice, &cfg.contact)
    }

    #[test]
    fn send_then_deliver_appends_exactly_two_messages() {
        let mut s = session();
        s.toggle_open();
        s.deliver_due(); // welcome

        assert!(s.send("hello").is_some());
        assert_eq!(s.messages().len(), 2);
        assert!(s.is_typing());

        let reply = s.deliver_due().expect("queued reply");
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(s.messages().len(), 3);
        assert!(!s.is_typing());

        let expected = responder().respond("hello").to_string();
        assert_eq!(s.messages().last().unwrap().text, expected);
    }

    #[test]
    fn whitespace_input_is_ignored() {
        let mut s = session();
        assert!(s.send("").is_none());
        assert!(s.send("   ").is_none());
        assert!(s.messages().is_empty());
        assert!(s.next_delay().is_none());
    }

    #[test]
    fn double_toggle_restores_state_without_duplicate_welcome() {
        let mut s = session();
        assert!(s.toggle_open());
        assert!(!s.toggle_open());
        assert!(s.toggle_open());

        assert!(s.deliver_due().is_some());
        assert!(s.deliver_due().is_none(), "welcome queued once");
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].role, Role::Assistant);
    }

    #[test]
    fn welcome_is_not_rescheduled_after_delivery() {
        let mut s = session();
        s.toggle_open();
        s.deliver_due();
        s.toggle_open();
        s.toggle_open();
        assert!(s.next_delay().is_none());
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn queued_sends_are_answered_in_order() {
        let mut s = session();
        s.toggle_open();
        s.deliver_due(); // welcome

        s.send("where is your clinic");
        s.send("do you take insurance");
        assert!(s.is_typing());

        let first = s.deliver_due().unwrap().text.clone();
        let second = s.deliver_due().unwrap().text.clone();
        let r = responder();
        assert_eq!(first, r.respond("where is your clinic"));
        assert_eq!(second, r.respond("do you take insurance"));
        assert!(!s.is_typing());
    }

    #[test]
    fn pending_welcome_does_not_show_typing() {
        let mut s = session();
        s.toggle_open();
        assert!(s.next_delay().is_some());
        assert!(!s.is_typing());
    }

    #[test]
    fn closing_keeps_the_pending_reply() {
        let mut s = session();
        s.toggle_open();
        s.deliver_due(); // welcome

        s.send("book an appointment");
        s.toggle_open(); // close the window
        assert!(!s.is_open());
        assert!(s.next_delay().is_some());

        assert!(s.deliver_due().is_some());
        assert_eq!(s.messages().len(), 3);
    }

    #[test]
    fn typed_delay_stays_within_configured_bounds() {
        let cfg = Config::default();
        let delays = ReplyDelays::from_config(&cfg.chat);
        for _ in 0..64 {
            let d = delays.typed();
            assert!((1_000..=2_000).contains(&(d.as_millis() as u64)));
        }
    }

    #[test]
    fn instant_delays_are_zero() {
        let delays = ReplyDelays::from_config(&ChatConfig::instant());
        assert_eq!(delays.typed(), Duration::ZERO);
        assert_eq!(delays.welcome, Duration::ZERO);
    }
}
