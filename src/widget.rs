use crate::config::Config;
use crate::matcher::Responder;
use crate::session::{ChatSession, ReplyDelays};
use crate::types::Message;
use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::debug;

#[derive(Debug)]
pub enum WidgetEvent {
    Toggle,
    Send(String),
    Suggest(String),
    State(oneshot::Sender<WidgetState>),
}

#[derive(Debug, Clone)]
pub struct WidgetState {
    pub open: bool,
    pub typing: bool,
    pub messages: Vec<Message>,
}

/// Cloneable front end to a running widget. Dropping every handle closes
/// the event channel, which stops the actor and cancels any armed reply
/// timer.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl WidgetHandle {
    pub fn toggle(&self) -> Result<()> {
        self.event(WidgetEvent::Toggle)
    }

    pub fn send(&self, text: impl Into<String>) -> Result<()> {
        self.event(WidgetEvent::Send(text.into()))
    }

    pub fn suggest(&self, text: impl Into<String>) -> Result<()> {
        self.event(WidgetEvent::Suggest(text.into()))
    }

    pub async fn state(&self) -> Result<WidgetState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.event(WidgetEvent::State(reply_tx))?;
        reply_rx.await.context("chat widget dropped state request")
    }

    fn event(&self, event: WidgetEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("chat widget has stopped"))
    }
}

/// Event-loop actor owning the session. One reply timer is armed at a
/// time, for the front of the session queue; delivered assistant messages
/// are forwarded on the outgoing channel.
pub struct ChatWidget {
    session: ChatSession,
    events: mpsc::UnboundedReceiver<WidgetEvent>,
    outgoing: mpsc::UnboundedSender<Message>,
    deadline: Option<Instant>,
}

impl ChatWidget {
    pub fn spawn(config: &Config) -> (WidgetHandle, mpsc::UnboundedReceiver<Message>) {
        let responder = Responder::new(&config.practice, &config.contact);
        let session = ChatSession::new(responder, ReplyDelays::from_config(&config.chat));
        Self::spawn_with(session)
    }

    pub fn spawn_with(session: ChatSession) -> (WidgetHandle, mpsc::UnboundedReceiver<Message>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let widget = ChatWidget {
            session,
            events: event_rx,
            outgoing: out_tx,
            deadline: None,
        };
        tokio::spawn(widget.run());
        (WidgetHandle { tx: event_tx }, out_rx)
    }

    async fn run(mut self) {
        loop {
            if self.deadline.is_none() {
                if let Some(delay) = self.session.next_delay() {
                    self.deadline = Some(Instant::now() + delay);
                }
            }

            tokio::select! {
                maybe_event = self.events.recv() => {
                    match maybe_event {
                        Some(event) => self.handle_event(event),
                        None => break,
                    }
                }
                _ = sleep_until(self.deadline.unwrap_or_else(Instant::now)),
                    if self.deadline.is_some() =>
                {
                    self.deadline = None;
                    if let Some(reply) = self.session.deliver_due() {
                        let _ = self.outgoing.send(reply.clone());
                    }
                }
            }
        }
        debug!("chat widget stopped");
    }

    fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Toggle => {
                let open = self.session.toggle_open();
                debug!(open, "widget toggled");
            }
            WidgetEvent::Send(text) => {
                if self.session.send(&text).is_none() {
                    debug!("ignored empty input");
                }
            }
            WidgetEvent::Suggest(text) => {
                self.session.suggest(&text);
            }
            WidgetEvent::State(reply_tx) => {
                let _ = reply_tx.send(WidgetState {
                    open: self.session.is_open(),
                    typing: self.session.is_typing(),
                    messages: self.session.messages().to_vec(),
                });
            }
        }
    }
}
