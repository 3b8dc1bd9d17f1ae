use super::*;
use std::collections::VecDeque;

use sidekick_protocols::{ChatReply, Role};

/// Backend that replays scripted results and records what it was sent.
struct ScriptedBackend {
    results: Mutex<VecDeque<Result<ChatReply, DeliveryError>>>,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl ScriptedBackend {
    fn new(results: Vec<Result<ChatReply, DeliveryError>>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn replying(replies: &[&str]) -> Arc<Self> {
        Self::new(replies.iter().map(|r| Ok(ChatReply::new(*r))).collect())
    }

    fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn send(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChatReply, DeliveryError> {
        self.calls.lock().push((message.to_string(), history.to_vec()));
        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(DeliveryError::Transport("no scripted result".to_string())))
    }
}

fn controller(backend: Arc<ScriptedBackend>) -> PanelController {
    PanelController::new(backend, PanelSettings::default())
}

#[test]
fn test_format_alert_default_template() {
    let template = PanelSettings::default().alert_template;
    assert_eq!(
        format_alert(&template, "https://youtube.com/watch?v=1"),
        "<ACTIVITY ALERT: https://youtube.com/watch?v=1>"
    );
}

#[test]
fn test_format_alert_custom_template() {
    assert_eq!(format_alert("now on {url}!", "a.test"), "now on a.test!");
    assert_eq!(format_alert("no placeholder", "a.test"), "no placeholder");
}

#[tokio::test]
async fn test_blank_message_ignored() {
    let backend = ScriptedBackend::replying(&[]);
    let panel = controller(backend.clone());

    assert_eq!(panel.send_user_message("   \n").await, None);
    assert!(panel.history().is_empty());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_user_message_round_trip() {
    let backend = ScriptedBackend::replying(&["Hi! What are we watching?"]);
    let panel = controller(backend.clone());

    let shown = panel.send_user_message("  hello  ").await;
    assert_eq!(shown.as_deref(), Some("Hi! What are we watching?"));

    let history = panel.history();
    assert_eq!(
        history,
        vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant("Hi! What are we watching?"),
        ]
    );

    // The request already carries the new user message.
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "hello");
    assert_eq!(calls[0].1, vec![ChatMessage::user("hello")]);
}

#[tokio::test]
async fn test_user_message_failure_records_apology() {
    let backend = ScriptedBackend::new(vec![Err(DeliveryError::HttpStatus {
        status: 404,
        body: String::new(),
    })]);
    let panel = controller(backend);

    let shown = panel.send_user_message("hello").await.unwrap();
    assert!(shown.contains("not available"));

    let history = panel.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, shown);
}

#[tokio::test]
async fn test_activity_alert_not_recorded_as_user_message() {
    let backend = ScriptedBackend::replying(&["first", "Ooh, a cooking video?"]);
    let panel = controller(backend.clone());

    panel.send_user_message("hey").await;
    let reply = panel
        .send_activity_alert("https://youtube.com/watch?v=abc")
        .await
        .unwrap();
    assert_eq!(reply, "Ooh, a cooking video?");

    let calls = backend.calls();
    assert_eq!(calls[1].0, "<ACTIVITY ALERT: https://youtube.com/watch?v=abc>");
    assert_eq!(calls[1].1.len(), 2);

    let history = panel.history();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|m| !m.content.contains("ACTIVITY ALERT")));
    assert_eq!(history[2], ChatMessage::assistant("Ooh, a cooking video?"));
}

#[tokio::test]
async fn test_activity_alert_failure_returned_and_not_recorded() {
    let backend = ScriptedBackend::new(vec![Err(DeliveryError::Decode("bad".to_string()))]);
    let panel = controller(backend);

    let err = panel.send_activity_alert("https://a.test").await.unwrap_err();
    assert!(matches!(err, DeliveryError::Decode(_)));
    assert!(panel.history().is_empty());
}

#[tokio::test]
async fn test_alert_sink_delivers_through_panel() {
    let backend = ScriptedBackend::replying(&["noted"]);
    let panel = controller(backend.clone());
    let sink: &dyn AlertSink = &panel;

    sink.deliver("https://a.test").await.unwrap();
    assert_eq!(backend.calls()[0].0, "<ACTIVITY ALERT: https://a.test>");
    assert_eq!(panel.history(), vec![ChatMessage::assistant("noted")]);
}

#[tokio::test]
async fn test_events_published_in_order() {
    let backend = ScriptedBackend::replying(&["hello back"]);
    let panel = controller(backend);
    let mut events = panel.subscribe();

    panel.send_user_message("hello").await;
    panel.clear();

    assert_eq!(
        events.recv().await.unwrap(),
        PanelEvent::Message(ChatMessage::user("hello"))
    );
    assert_eq!(
        events.recv().await.unwrap(),
        PanelEvent::Message(ChatMessage::assistant("hello back"))
    );
    assert_eq!(events.recv().await.unwrap(), PanelEvent::Cleared);
    assert!(panel.history().is_empty());
}

#[tokio::test]
async fn test_custom_alert_template() {
    let backend = ScriptedBackend::replying(&["ok"]);
    let panel = PanelController::new(
        backend.clone(),
        PanelSettings {
            alert_template: "[tab changed] {url}".to_string(),
        },
    );

    panel.send_activity_alert("https://b.test").await.unwrap();
    assert_eq!(backend.calls()[0].0, "[tab changed] https://b.test");
}

/// Backend that yields before echoing, so concurrent requests interleave.
struct EchoBackend;

#[async_trait]
impl ChatBackend for EchoBackend {
    fn id(&self) -> &str {
        "echo"
    }

    async fn send(
        &self,
        message: &str,
        _history: &[ChatMessage],
    ) -> Result<ChatReply, DeliveryError> {
        tokio::task::yield_now().await;
        Ok(ChatReply::new(format!("re: {}", message)))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_events_match_history_under_concurrency() {
    let panel = Arc::new(PanelController::new(
        Arc::new(EchoBackend),
        PanelSettings::default(),
    ));
    let mut events = panel.subscribe();

    let mut tasks = Vec::new();
    for i in 0..10 {
        let user = panel.clone();
        tasks.push(tokio::spawn(async move {
            user.send_user_message(&format!("message {}", i)).await;
        }));
        let alert = panel.clone();
        tasks.push(tokio::spawn(async move {
            alert
                .send_activity_alert(&format!("https://site-{}.test", i))
                .await
                .unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let history = panel.history();
    assert_eq!(history.len(), 30);

    let mut published = Vec::new();
    while let Ok(event) = events.try_recv() {
        match event {
            PanelEvent::Message(message) => published.push(message),
            PanelEvent::Cleared => panic!("unexpected clear"),
        }
    }
    assert_eq!(published, history);
}
