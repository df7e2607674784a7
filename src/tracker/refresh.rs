//! Refresh loop.
//!
//! One task owns the `Tracker` and reacts to three triggers: page mutation
//! notices (debounced), a periodic tick, and requests from the display
//! surface. Every trigger is handled on that task, so scans never overlap
//! and reconciliation is strictly sequential.

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::messages::{Event, Request, Response};
use crate::page::PageSource;
use crate::settings::Theme;
use crate::tracker::Tracker;

const COMMAND_CAPACITY: usize = 32;

/// Where the loop is in its debounce cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Nothing pending.
    Idle,
    /// A scan is due when the debounce window closes.
    Scheduled,
    /// A scan is running.
    Scanning,
}

#[derive(Debug)]
enum Command {
    Mutation,
    Request(Request, oneshot::Sender<Response>),
    SetTheme(Theme, oneshot::Sender<Result<()>>),
    State(oneshot::Sender<LoopState>),
    Shutdown,
}

/// Cloneable handle to a running `RefreshLoop`.
///
/// The loop exits once every handle is dropped.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<Event>,
}

impl RefreshHandle {
    async fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).await.map_err(|_| Error::LoopClosed)
    }

    async fn ask<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.send(command(reply)).await?;
        response.await.map_err(|_| Error::LoopClosed)
    }

    /// Report that the page structure changed; restarts the debounce window.
    pub async fn notify_mutation(&self) -> Result<()> {
        self.send(Command::Mutation).await
    }

    /// Send a request and wait for the reply.
    pub async fn request(&self, request: Request) -> Result<Response> {
        self.ask(|reply| Command::Request(request, reply)).await
    }

    /// Persist a theme preference through the loop's tracker.
    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.ask(|reply| Command::SetTheme(theme, reply)).await?
    }

    /// Current loop state.
    pub async fn state(&self) -> Result<LoopState> {
        self.ask(Command::State).await
    }

    /// Ask the loop to exit.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    /// Receive future `Event`s.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}

/// Debounced scan driver for one page.
pub struct RefreshLoop<S> {
    tracker: Tracker,
    source: S,
    commands: mpsc::Receiver<Command>,
    state: LoopState,
    deadline: Option<Instant>,
}

impl<S: PageSource + 'static> RefreshLoop<S> {
    /// Create a loop and its handle. Nothing runs until `run` is polled.
    pub fn new(tracker: Tracker, source: S) -> (Self, RefreshHandle) {
        let (commands_tx, commands) = mpsc::channel(COMMAND_CAPACITY);
        let handle = RefreshHandle {
            commands: commands_tx,
            events: tracker.event_sender(),
        };
        let refresh_loop = Self {
            tracker,
            source,
            commands,
            state: LoopState::Idle,
            deadline: None,
        };
        (refresh_loop, handle)
    }

    /// Run a new loop on the current tokio runtime.
    pub fn spawn(tracker: Tracker, source: S) -> (RefreshHandle, JoinHandle<()>) {
        let (refresh_loop, handle) = Self::new(tracker, source);
        (handle, tokio::spawn(refresh_loop.run()))
    }

    /// Drive the loop until shutdown.
    ///
    /// The first scan happens one debounce window after start; the periodic
    /// tick first fires one interval after start.
    pub async fn run(mut self) {
        let period = self.tracker.options().refresh_interval;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.schedule();

        loop {
            let deadline = self.deadline;
            tokio::select! {
                () = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.deadline = None;
                    self.refresh();
                }
                _ = ticker.tick() => self.refresh(),
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.apply(command),
                },
            }
        }

        debug!("refresh loop stopped");
    }

    fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.tracker.options().debounce);
        self.state = LoopState::Scheduled;
    }

    fn refresh(&mut self) {
        let resume = if self.deadline.is_some() {
            LoopState::Scheduled
        } else {
            LoopState::Idle
        };

        self.state = LoopState::Scanning;
        match self.source.capture() {
            Ok(page) => {
                self.tracker.update(&page);
            }
            Err(err) => warn!(error = %err, "skipping refresh"),
        }
        self.state = resume;
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Mutation => self.schedule(),
            Command::Request(request, reply) => {
                if request == Request::ClearReferences {
                    self.deadline = None;
                    self.state = LoopState::Idle;
                }
                let response = self.tracker.handle(request, &self.source);
                let _ = reply.send(response);
            }
            Command::SetTheme(theme, reply) => {
                let _ = reply.send(self.tracker.set_theme(theme));
            }
            Command::State(reply) => {
                let _ = reply.send(self.state);
            }
            Command::Shutdown => {}
        }
    }
}
