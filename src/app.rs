use crate::api::GeminiClient;
use crate::errors::MentorResult;
use crate::profile::StudentProfile;
use crate::prompt::build_mentor_prompt;
use crate::status_indicator::StatusIndicator;
use crate::storage::{persist_transcript, KeyValueStore};
use crate::transcript::{Message, Transcript};
use log::{error, info};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shown in place of a reply for every failure cause; the user is never told
/// whether the key, the transport, or the response shape was at fault.
pub const CONNECTIVITY_ERROR_REPLY: &str =
    "Sorry, I encountered an error. Please check your internet connection and try again.";

/// A submitted query, tagged with the transcript generation it belongs to so
/// a reply that lands after a clear can be recognized as stale and dropped.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub prompt: String,
    pub generation: u64,
}

/// View-level state machine: idle (accepting input) or awaiting-reply (one
/// request in flight, input suppressed). All transcript mutations go through
/// here and are mirrored to the store.
pub struct App {
    pub profile: StudentProfile,
    pub transcript: Transcript,
    pub input: String,
    pub awaiting_reply: bool,
    pub should_quit: bool,
    pub chat_scroll: u16,
    pub status_indicator: StatusIndicator,
    pub command_history: Vec<String>,
    pub command_index: Option<usize>,
    generation: u64,
    store: Box<dyn KeyValueStore>,
}

impl App {
    pub fn new(
        profile: StudentProfile,
        store: Box<dyn KeyValueStore>,
        saved_messages: Vec<Message>,
    ) -> App {
        App {
            profile,
            transcript: Transcript::from_messages(saved_messages),
            input: String::new(),
            awaiting_reply: false,
            should_quit: false,
            chat_scroll: u16::MAX,
            status_indicator: StatusIndicator::new(),
            command_history: Vec::new(),
            command_index: None,
            generation: 0,
            store,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.awaiting_reply {
            return;
        }
        self.input.push(c);
        self.command_index = None;
    }

    pub fn backspace(&mut self) {
        if self.awaiting_reply {
            return;
        }
        self.input.pop();
        self.command_index = None;
    }

    /// Submits the current input. Only fires when idle and the trimmed input
    /// is non-empty; otherwise it is a no-op and no request is produced.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        if self.awaiting_reply {
            return None;
        }

        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.input.clear();
        self.command_history.push(query.clone());
        self.command_index = None;

        self.transcript.push(Message::from_user(query.clone()));
        self.persist();

        self.awaiting_reply = true;
        self.status_indicator.set_thinking(true);
        self.chat_scroll = u16::MAX;

        info!("query submitted ({} chars)", query.len());

        Some(PendingRequest {
            prompt: build_mentor_prompt(&self.profile, &query),
            generation: self.generation,
        })
    }

    /// Settles the pending request. A reply whose generation no longer
    /// matches (the transcript was cleared while it was in flight) is
    /// discarded without touching the transcript.
    pub fn apply_reply(&mut self, generation: u64, outcome: MentorResult<String>) {
        self.awaiting_reply = false;
        self.status_indicator.set_thinking(false);

        if generation != self.generation {
            info!("discarding reply for a cleared transcript");
            return;
        }

        let content = match outcome {
            Ok(text) => text,
            Err(e) => {
                error!("generation request failed: {}", e);
                CONNECTIVITY_ERROR_REPLY.to_string()
            }
        };

        self.transcript.push(Message::from_bot(content));
        self.persist();
        self.chat_scroll = u16::MAX;
    }

    /// Clears the transcript and its persisted record. Available in either
    /// state; an in-flight request is not cancelled, but bumping the
    /// generation makes its eventual reply stale.
    pub fn clear_chat(&mut self) {
        self.transcript.clear();
        self.persist();
        self.generation = self.generation.wrapping_add(1);
        self.chat_scroll = 0;
        info!("transcript cleared");
    }

    pub fn history_prev(&mut self) {
        if self.awaiting_reply || self.command_history.is_empty() {
            return;
        }
        let idx = match self.command_index {
            None => self.command_history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.command_index = Some(idx);
        self.input = self.command_history[idx].clone();
    }

    pub fn history_next(&mut self) {
        if self.awaiting_reply {
            return;
        }
        match self.command_index {
            Some(i) if i + 1 < self.command_history.len() => {
                self.command_index = Some(i + 1);
                self.input = self.command_history[i + 1].clone();
            }
            Some(_) => {
                self.command_index = None;
                self.input.clear();
            }
            None => {}
        }
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    fn persist(&mut self) {
        if let Err(e) = persist_transcript(self.store.as_ref(), self.transcript.messages()) {
            error!("failed to persist transcript: {}", e);
        }
    }
}

/// Runs one round trip against the endpoint and settles it into the app.
/// Spawned per submission; the generation tag travels with the request.
pub async fn request_reply(app: Arc<Mutex<App>>, request: PendingRequest) {
    let client = GeminiClient::from_config();
    let outcome = client.generate(&request.prompt).await;

    let mut guard = app.lock().await;
    guard.apply_reply(request.generation, outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MentorError;
    use crate::storage::{load_transcript, MemoryStore};
    use crate::transcript::Sender;

    fn test_app() -> (App, MemoryStore) {
        let store = MemoryStore::new();
        let app = App::new(
            StudentProfile::default(),
            Box::new(store.clone()),
            Vec::new(),
        );
        (app, store)
    }

    #[test]
    fn test_submit_appends_one_user_message_and_enters_awaiting_reply() {
        let (mut app, _store) = test_app();
        app.input = "How do I get better at History?".to_string();

        let request = app.submit().expect("submit should produce a request");

        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.transcript.messages()[0].sender, Sender::User);
        assert_eq!(
            app.transcript.messages()[0].content,
            "How do I get better at History?"
        );
        assert!(app.awaiting_reply);
        assert!(app.input.is_empty());
        assert!(request.prompt.contains("How do I get better at History?"));
        assert!(request.prompt.contains("Name: Riya"));
    }

    #[test]
    fn test_whitespace_only_submit_is_a_noop() {
        let (mut app, store) = test_app();
        app.input = "   \t ".to_string();

        assert!(app.submit().is_none());
        assert!(app.transcript.is_empty());
        assert!(!app.awaiting_reply);
        assert_eq!(load_transcript(&store).unwrap(), Vec::new());
    }

    #[test]
    fn test_second_submission_is_rejected_while_a_reply_is_pending() {
        let (mut app, _store) = test_app();
        app.input = "first".to_string();
        app.submit().unwrap();

        app.input = "second".to_string();
        assert!(app.submit().is_none());
        assert_eq!(app.transcript.len(), 1);
    }

    #[test]
    fn test_typing_is_suppressed_while_awaiting_reply() {
        let (mut app, _store) = test_app();
        app.input = "question".to_string();
        app.submit().unwrap();

        app.push_char('x');
        app.backspace();
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_successful_round_trip_appends_exactly_two_messages() {
        let (mut app, store) = test_app();
        app.input = "How is my History going?".to_string();
        let request = app.submit().unwrap();

        app.apply_reply(request.generation, Ok("Keep practicing History!".to_string()));

        assert_eq!(app.transcript.len(), 2);
        let bot = &app.transcript.messages()[1];
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.content, "Keep practicing History!");
        assert!(!app.awaiting_reply);

        let persisted = load_transcript(&store).unwrap();
        assert_eq!(persisted, app.transcript.messages());
    }

    #[test]
    fn test_failed_reply_appends_the_fixed_connectivity_text() {
        let (mut app, _store) = test_app();
        app.input = "question".to_string();
        let request = app.submit().unwrap();

        app.apply_reply(request.generation, Err(MentorError::transport_error(500)));

        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript.messages()[1].content, CONNECTIVITY_ERROR_REPLY);
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_config_failure_appends_the_same_connectivity_text() {
        let (mut app, _store) = test_app();
        app.input = "question".to_string();
        let request = app.submit().unwrap();

        app.apply_reply(
            request.generation,
            Err(MentorError::config_error("no API key configured")),
        );

        assert_eq!(app.transcript.messages()[1].content, CONNECTIVITY_ERROR_REPLY);
    }

    #[test]
    fn test_clear_empties_the_transcript_and_the_persisted_record() {
        let (mut app, store) = test_app();
        app.input = "question".to_string();
        let request = app.submit().unwrap();
        app.apply_reply(request.generation, Ok("answer".to_string()));

        app.clear_chat();

        assert!(app.transcript.is_empty());
        assert_eq!(load_transcript(&store).unwrap(), Vec::new());
    }

    #[test]
    fn test_reply_arriving_after_clear_is_discarded() {
        let (mut app, store) = test_app();
        app.input = "question".to_string();
        let request = app.submit().unwrap();

        app.clear_chat();
        app.apply_reply(request.generation, Ok("stale answer".to_string()));

        assert!(app.transcript.is_empty());
        assert!(!app.awaiting_reply);
        assert_eq!(load_transcript(&store).unwrap(), Vec::new());
    }

    #[test]
    fn test_submission_works_again_after_a_stale_reply_settles() {
        let (mut app, _store) = test_app();
        app.input = "question".to_string();
        let request = app.submit().unwrap();
        app.clear_chat();
        app.apply_reply(request.generation, Ok("stale".to_string()));

        app.input = "fresh question".to_string();
        let fresh = app.submit().expect("idle again after the stale reply settled");
        assert_ne!(fresh.generation, request.generation);
    }

    #[test]
    fn test_history_recall_walks_previous_queries() {
        let (mut app, _store) = test_app();
        app.input = "first".to_string();
        let r = app.submit().unwrap();
        app.apply_reply(r.generation, Ok("a".to_string()));
        app.input = "second".to_string();
        let r = app.submit().unwrap();
        app.apply_reply(r.generation, Ok("b".to_string()));

        app.history_prev();
        assert_eq!(app.input, "second");
        app.history_prev();
        assert_eq!(app.input, "first");
        app.history_next();
        assert_eq!(app.input, "second");
        app.history_next();
        assert!(app.input.is_empty());
        assert!(app.command_index.is_none());
    }

    #[test]
    fn test_saved_messages_seed_the_transcript() {
        let store = MemoryStore::new();
        let saved = vec![Message::from_user("hi"), Message::from_bot("hello")];
        let app = App::new(StudentProfile::default(), Box::new(store), saved.clone());
        assert_eq!(app.transcript.messages(), saved);
    }
}
