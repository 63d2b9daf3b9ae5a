// Relay pipeline: placeholder → completion → chunked delivery.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockito::Server;
use relay_agent::pipeline::{answer, relay_completion, Command, RelayContext, THINKING};
use relay_agent::{CompletionClient, CompletionProvider, ProviderError};
use relay_channels::{ChannelError, ChannelSink};
use relay_core::config::CompletionConfig;

/// Provider returning a canned reply and counting calls.
struct Canned {
    reply: String,
    calls: AtomicUsize,
}

impl Canned {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CompletionProvider for Canned {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct Ctx<P: CompletionProvider>(P);

impl<P: CompletionProvider> RelayContext for Ctx<P> {
    fn completion(&self) -> &dyn CompletionProvider {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Placeholder(String),
    Edit(String),
    Followup(String),
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSink for Recorder {
    async fn send_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        self.0.lock().unwrap().push(Event::Placeholder(text.to_string()));
        Ok(())
    }

    async fn edit_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        self.0.lock().unwrap().push(Event::Edit(text.to_string()));
        Ok(())
    }

    async fn send_followup(&mut self, text: &str) -> Result<(), ChannelError> {
        self.0.lock().unwrap().push(Event::Followup(text.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn short_reply_replaces_placeholder() {
    let ctx = Ctx(Canned::new("fine, thanks"));
    let mut sink = Recorder::default();

    relay_completion(&ctx, "how are you?", 4096, &mut sink)
        .await
        .unwrap();

    assert_eq!(
        sink.events(),
        vec![
            Event::Placeholder(THINKING.to_string()),
            Event::Edit("fine, thanks".to_string()),
        ]
    );
    assert_eq!(ctx.0.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reply_one_over_limit_is_split_in_two() {
    let reply = "x".repeat(4097);
    let ctx = Ctx(Canned::new(&reply));
    let mut sink = Recorder::default();

    relay_completion(&ctx, "long please", 4096, &mut sink)
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[1], Event::Edit("x".repeat(4096)));
    assert_eq!(events[2], Event::Followup("x".to_string()));
}

#[tokio::test]
async fn tweet_sized_limit_produces_many_followups() {
    let reply = "y".repeat(500);
    let ctx = Ctx(Canned::new(&reply));
    let mut sink = Recorder::default();

    relay_completion(&ctx, "q", 240, &mut sink).await.unwrap();

    let events = sink.events();
    // placeholder + 240 + 240 + 20
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[3], Event::Followup(t) if t.len() == 20));
}

#[tokio::test]
async fn empty_arguments_never_call_the_provider() {
    let ctx = Ctx(Canned::new("unused"));

    for command in [Command::Call, Command::Ask] {
        let mut sink = Recorder::default();
        answer(&ctx, command, "   ", 2000, &mut sink).await.unwrap();
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Event::Followup(t) if t.starts_with("Please provide")));
    }

    assert_eq!(ctx.0.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_arguments_never_reach_the_http_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/completions")
        .expect(0)
        .create_async()
        .await;

    let client = CompletionClient::new(&CompletionConfig {
        base_url: server.url(),
        ..CompletionConfig::default()
    })
    .unwrap();
    let ctx = Ctx(client);
    let mut sink = Recorder::default();

    answer(&ctx, Command::Ask, "", 4096, &mut sink).await.unwrap();
    answer(&ctx, Command::Call, "\n", 4096, &mut sink).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn ask_with_text_relays() {
    let ctx = Ctx(Canned::new("42"));
    let mut sink = Recorder::default();

    answer(&ctx, Command::Ask, "meaning of life?", 2000, &mut sink)
        .await
        .unwrap();

    assert_eq!(
        sink.events(),
        vec![
            Event::Placeholder(THINKING.to_string()),
            Event::Edit("42".to_string()),
        ]
    );
}
