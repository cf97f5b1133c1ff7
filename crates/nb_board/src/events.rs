use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::board::ArticleBoard;

/// Input coming from the page controls.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The search box changed.
    SearchInput(String),
    /// The theme switch was flipped.
    ThemeSwitch,
    /// The generate button was pressed, with whatever topic the user typed.
    GenerateClick(Option<String>),
    Reload,
    /// Page is going away; stop the loop.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SearchInput,
    ThemeSwitch,
    GenerateClick,
    Reload,
}

impl UiEvent {
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            UiEvent::SearchInput(_) => Some(EventKind::SearchInput),
            UiEvent::ThemeSwitch => Some(EventKind::ThemeSwitch),
            UiEvent::GenerateClick(_) => Some(EventKind::GenerateClick),
            UiEvent::Reload => Some(EventKind::Reload),
            UiEvent::Close => None,
        }
    }
}

/// How a handler runs relative to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Awaited before the next event is read.
    Inline,
    /// Spawned; the loop keeps reading events while it runs.
    Background,
}

type Handler = Arc<dyn Fn(Arc<ArticleBoard>, UiEvent) -> BoxFuture<'static, ()> + Send + Sync>;

struct Subscription {
    dispatch: Dispatch,
    handler: Handler,
}

/// Routes control events to the board.
///
/// The default subscriptions are registered in [`EventLoop::new`]; more can
/// be added before [`EventLoop::run`]. Nothing is ever unsubscribed.
pub struct EventLoop {
    board: Arc<ArticleBoard>,
    subscriptions: HashMap<EventKind, Vec<Subscription>>,
    tasks: JoinSet<()>,
}

impl EventLoop {
    pub fn new(board: Arc<ArticleBoard>) -> Self {
        let mut events = Self {
            board,
            subscriptions: HashMap::new(),
            tasks: JoinSet::new(),
        };

        events.subscribe(EventKind::SearchInput, Dispatch::Inline, |board, event| async move {
            if let UiEvent::SearchInput(term) = event {
                board.search(&term).await;
            }
        });
        events.subscribe(EventKind::ThemeSwitch, Dispatch::Inline, |board, _| async move {
            if let Err(e) = board.toggle_theme().await {
                error!("❌ Could not save theme preference: {}", e);
            }
        });
        events.subscribe(EventKind::GenerateClick, Dispatch::Background, |board, event| async move {
            if let UiEvent::GenerateClick(topic) = event {
                let outcome = board.trigger_generation(topic.as_deref()).await;
                debug!("Generation finished: {:?}", outcome);
            }
        });
        events.subscribe(EventKind::Reload, Dispatch::Background, |board, _| async move {
            board.load_articles().await;
        });

        events
    }

    pub fn subscribe<F, Fut>(&mut self, kind: EventKind, dispatch: Dispatch, handler: F)
    where
        F: Fn(Arc<ArticleBoard>, UiEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: Handler =
            Arc::new(move |board: Arc<ArticleBoard>, event: UiEvent| handler(board, event).boxed());
        self.subscriptions
            .entry(kind)
            .or_default()
            .push(Subscription { dispatch, handler });
    }

    pub fn board(&self) -> &Arc<ArticleBoard> {
        &self.board
    }

    /// Run every handler subscribed to `event`.
    pub async fn dispatch(&mut self, event: UiEvent) {
        let Some(kind) = event.kind() else {
            return;
        };
        let Some(subscriptions) = self.subscriptions.get(&kind) else {
            debug!("No subscribers for {:?}", kind);
            return;
        };
        for subscription in subscriptions {
            let run = (subscription.handler)(self.board.clone(), event.clone());
            match subscription.dispatch {
                Dispatch::Inline => run.await,
                Dispatch::Background => {
                    self.tasks.spawn(run);
                }
            }
        }
        // Reap finished background work so the set does not grow unbounded.
        while let Some(Some(result)) = self.tasks.join_next().now_or_never() {
            if let Err(e) = result {
                error!("❌ Background handler failed: {}", e);
            }
        }
    }

    /// Start the board, then handle events until `Close` or the sender is
    /// dropped. Waits for background handlers before returning.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) {
        self.board.start().await;
        info!("🚀 Board ready");

        while let Some(event) = events.recv().await {
            if event == UiEvent::Close {
                break;
            }
            self.dispatch(event).await;
        }

        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                error!("❌ Background handler failed: {}", e);
            }
        }
        info!("👋 Board closed");
    }
}
