//! Named channels, their handlers, and the serve loop.

use super::codec::{Envelope, ErrorPayload, MethodCall, Outcome, Reply, Value};
use std::collections::HashMap;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Receives the calls made on one channel.
pub trait MethodCallHandler: Send {
    /// Handle `call`. Answering through `result` is optional: a call left
    /// unanswered produces no reply at all.
    fn on_method_call(&self, call: &MethodCall, result: &mut Responder);
}

/// Collects a handler's answer to a single call.
#[derive(Debug, Default)]
pub struct Responder {
    outcome: Option<Outcome>,
}

impl Responder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, result: Value) {
        self.answer(Outcome::Success { result });
    }

    pub fn error(&mut self, code: impl Into<String>, message: impl Into<String>, details: Value) {
        self.answer(Outcome::Error {
            error: ErrorPayload {
                code: code.into(),
                message: message.into(),
                details,
            },
        });
    }

    pub fn not_implemented(&mut self) {
        self.answer(Outcome::NotImplemented {
            not_implemented: true,
        });
    }

    pub fn into_outcome(self) -> Option<Outcome> {
        self.outcome
    }

    /// A call is answered at most once; later answers are dropped.
    fn answer(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            warn!("Call already answered, dropping second answer");
            return;
        }
        self.outcome = Some(outcome);
    }
}

/// Counters for one run of [`ChannelHost::serve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub received: usize,
    pub answered: usize,
    pub malformed: usize,
}

/// Routes calls to the handler registered for their channel.
#[derive(Default)]
pub struct ChannelHost {
    handlers: HashMap<String, Box<dyn MethodCallHandler>>,
}

impl ChannelHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` to `channel`, or detach the current one with `None`.
    pub fn set_method_call_handler(
        &mut self,
        channel: impl Into<String>,
        handler: Option<Box<dyn MethodCallHandler>>,
    ) {
        let channel = channel.into();
        match handler {
            Some(handler) => {
                debug!("Attached handler to channel {}", channel);
                self.handlers.insert(channel, handler);
            }
            None => {
                debug!("Detached handler from channel {}", channel);
                self.handlers.remove(&channel);
            }
        }
    }

    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers.contains_key(channel)
    }

    /// Deliver one call. Returns `None` when nobody answered it.
    pub fn dispatch(&self, envelope: Envelope) -> Option<Reply> {
        let (channel, id, call) = envelope.into_parts();

        let Some(handler) = self.handlers.get(&channel) else {
            debug!("No handler on channel {}, ignoring {}", channel, call.method);
            return None;
        };

        let mut responder = Responder::new();
        handler.on_method_call(&call, &mut responder);

        let outcome = responder.into_outcome()?;
        Some(Reply {
            channel,
            id,
            outcome,
        })
    }

    /// Read calls from `reader` one line at a time, writing each reply as a
    /// line to `writer`, until end of input.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> std::io::Result<ServeStats> {
        let mut stats = ServeStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            // Raw bytes, so a line that is not UTF-8 is only malformed, not fatal
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }

            stats.received += 1;
            let envelope = match serde_json::from_slice::<Envelope>(line) {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!("Ignoring malformed message: {}", e);
                    stats.malformed += 1;
                    continue;
                }
            };

            if let Some(reply) = self.dispatch(envelope) {
                serde_json::to_writer(&mut writer, &reply)?;
                writer.write_all(b"\n")?;
                writer.flush()?;
                stats.answered += 1;
            }
        }

        info!(
            "Channel input closed: {} calls, {} answered, {} malformed",
            stats.received, stats.answered, stats.malformed
        );
        Ok(stats)
    }
}
