mod controller;
mod shell;
mod transport;

pub use controller::{PendingRequest, RequestTicket, Status};
pub use shell::Shell;
pub use transport::TransportClient;

use crate::{
    components::Component,
    config::Config,
    display::{ClipboardSink, SystemClipboard},
    model::{OperationId, OperationResult},
    ui::{
        bottom_bar::BottomBar,
        main_view::{MainView, MainViewCommand},
        sidebar::{Sidebar, SidebarCommand},
        top::{TopBar, TopCommand},
    },
};
pub type AppResult<T> = color_eyre::Result<T>;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use std::{sync::mpsc, time::Duration};
use tokio::runtime::{Handle, Runtime};
use tracing::info;

pub use navigation::FocusedPane;

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Central application type that orchestrates state and delegates to UI components.
pub struct App {
    running: bool,
    pub state: AppState,
    top_bar: TopBar,
    sidebar: Sidebar,
    main_view: MainView,
    bottom_bar: BottomBar,
    transport: TransportClient,
    clipboard: SystemClipboard,
    // Owns the worker threads that `runtime_handle` spawns onto.
    #[allow(dead_code)]
    runtime: Runtime,
    runtime_handle: Handle,
    message_rx: mpsc::Receiver<Message>,
    message_tx: mpsc::Sender<Message>,
}

impl App {
    pub fn new(config: &Config) -> AppResult<Self> {
        let transport = TransportClient::new(&config.base_url, config.timeout)?;
        let mut state = AppState::new(transport.base_url(), &config.document_path);
        let mut clipboard = SystemClipboard::default();
        let mut top_bar = TopBar::default();
        let mut sidebar = Sidebar::default();
        let mut main_view = MainView::default();
        let mut bottom_bar = BottomBar;
        let runtime = Runtime::new()?;
        let runtime_handle = runtime.handle().clone();
        let (message_tx, message_rx) = mpsc::channel();

        {
            let mut ctx = AppContext {
                state: &mut state,
                commands: CommandBus::new(
                    message_tx.clone(),
                    runtime_handle.clone(),
                    transport.clone(),
                ),
                clipboard: &mut clipboard,
            };
            top_bar.init(&mut ctx)?;
            sidebar.init(&mut ctx)?;
            main_view.init(&mut ctx)?;
            bottom_bar.init(&mut ctx)?;
        }

        Ok(Self {
            running: false,
            state,
            top_bar,
            sidebar,
            main_view,
            bottom_bar,
            transport,
            clipboard,
            runtime,
            runtime_handle,
            message_rx,
            message_tx,
        })
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        self.running = true;
        while self.running {
            self.tick()?;
            terminal.draw(|frame| self.render(frame))?;
            if event::poll(EVENT_POLL)? {
                self.handle_events()?;
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let top_area = layout[0];
        let main_area = layout[1];
        let bottom_area = layout[2];

        let app_panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(1)])
            .split(main_area);

        let sidebar_area = app_panes[0];
        let content_area = app_panes[1];

        let view = AppView { state: &self.state };

        self.top_bar.render(frame, top_area, &view);
        self.sidebar.render(frame, sidebar_area, &view);
        self.main_view.render(frame, content_area, &view);
        self.bottom_bar.render(frame, bottom_area, &view);
    }

    fn handle_events(&mut self) -> AppResult<()> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
            Event::Mouse(_) | Event::Resize(_, _) => {}
            _ => {}
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) -> AppResult<()> {
        if self.main_view.is_editing() {
            match key.code {
                KeyCode::Esc => {
                    self.main_view_command(MainViewCommand::CancelEdit)?;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.main_view_command(MainViewCommand::CommitEdit)?;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    self.main_view_command(MainViewCommand::Backspace)?;
                    return Ok(());
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.main_view_command(MainViewCommand::InputChar(c))?;
                    return Ok(());
                }
                _ => {}
            }
        }

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.dispatch(Action::Quit)
            }
            (KeyModifiers::NONE, KeyCode::Tab) => self.dispatch(Action::FocusNextPane),
            (_, KeyCode::BackTab) | (KeyModifiers::SHIFT, KeyCode::Tab) => {
                self.dispatch(Action::FocusPreviousPane)
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.handle_movement(Movement::Down)?;
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.handle_movement(Movement::Up)?;
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                self.handle_movement(Movement::Left)?;
            }
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                self.handle_movement(Movement::Right)?;
            }
            (KeyModifiers::NONE, KeyCode::Char(d)) if d.is_ascii_digit() => {
                if let Some(id) = d
                    .to_digit(10)
                    .and_then(|n| OperationId::from_number(n as usize))
                {
                    self.sidebar_command(SidebarCommand::Activate(id))?;
                }
            }
            (KeyModifiers::NONE, KeyCode::Enter) => match self.state.navigation.focused_pane {
                FocusedPane::Sidebar => self.sidebar_command(SidebarCommand::ActivateCursor)?,
                FocusedPane::MainView => self.main_view_command(MainViewCommand::BeginEdit)?,
            },
            (KeyModifiers::NONE, KeyCode::Char('e')) => {
                self.dispatch(Action::FocusPane(FocusedPane::MainView));
                self.main_view_command(MainViewCommand::BeginEdit)?;
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.main_view_command(MainViewCommand::Submit)?;
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                self.main_view_command(MainViewCommand::Reset)?;
            }
            (KeyModifiers::NONE, KeyCode::Char('y')) => {
                self.main_view_command(MainViewCommand::CopySelected)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusPane(pane) => self.state.navigation.focused_pane = pane,
            Action::FocusNextPane => self.state.navigation.focus_next(),
            Action::FocusPreviousPane => self.state.navigation.focus_previous(),
            Action::SelectOperation(id) => {
                if self.state.shell.select_operation(id) {
                    let title = id.descriptor().title;
                    self.dispatch(Action::ShowStatus(format!("Switched to {title}")));
                }
                self.state.navigation.focused_pane = FocusedPane::MainView;
            }
            Action::ShowStatus(message) => {
                let _ = self.top_bar_command(TopCommand::ShowStatus(message));
            }
        }
    }

    fn handle_movement(&mut self, movement: Movement) -> AppResult<()> {
        match self.state.navigation.focused_pane {
            FocusedPane::Sidebar => match movement {
                Movement::Up => self.sidebar_command(SidebarCommand::MoveUp)?,
                Movement::Down => self.sidebar_command(SidebarCommand::MoveDown)?,
                Movement::Left | Movement::Right => {}
            },
            FocusedPane::MainView => match movement {
                Movement::Up => self.main_view_command(MainViewCommand::PreviousField)?,
                Movement::Down => self.main_view_command(MainViewCommand::NextField)?,
                Movement::Left => self.main_view_command(MainViewCommand::PreviousCopyTarget)?,
                Movement::Right => self.main_view_command(MainViewCommand::NextCopyTarget)?,
            },
        }
        Ok(())
    }

    fn sidebar_command(&mut self, command: SidebarCommand) -> AppResult<()> {
        let commands = self.command_bus();
        let mut ctx = AppContext {
            state: &mut self.state,
            commands,
            clipboard: &mut self.clipboard,
        };
        if let Some(action) = self.sidebar.update(&command, &mut ctx)? {
            self.dispatch(action);
        }
        Ok(())
    }

    fn main_view_command(&mut self, command: MainViewCommand) -> AppResult<()> {
        let commands = self.command_bus();
        let mut ctx = AppContext {
            state: &mut self.state,
            commands,
            clipboard: &mut self.clipboard,
        };
        if let Some(action) = self.main_view.update(&command, &mut ctx)? {
            self.dispatch(action);
        }
        Ok(())
    }

    fn top_bar_command(&mut self, command: TopCommand) -> AppResult<()> {
        let commands = self.command_bus();
        let mut ctx = AppContext {
            state: &mut self.state,
            commands,
            clipboard: &mut self.clipboard,
        };
        if let Some(action) = self.top_bar.update(&command, &mut ctx)? {
            self.dispatch(action);
        }
        Ok(())
    }

    fn command_bus(&self) -> CommandBus {
        CommandBus::new(
            self.message_tx.clone(),
            self.runtime_handle.clone(),
            self.transport.clone(),
        )
    }

    fn tick(&mut self) -> AppResult<()> {
        self.drain_messages();
        let commands = self.command_bus();
        let mut ctx = AppContext {
            state: &mut self.state,
            commands,
            clipboard: &mut self.clipboard,
        };
        let mut actions = Vec::new();
        actions.extend(self.top_bar.tick(&mut ctx)?);
        actions.extend(self.sidebar.tick(&mut ctx)?);
        actions.extend(self.main_view.tick(&mut ctx)?);
        actions.extend(self.bottom_bar.tick(&mut ctx)?);
        for action in actions {
            self.dispatch(action);
        }
        Ok(())
    }

    fn drain_messages(&mut self) {
        while let Ok(message) = self.message_rx.try_recv() {
            match message {
                Message::OperationSettled {
                    ticket,
                    operation,
                    result,
                } => {
                    let status = settled_status(operation, &result);
                    if self.state.shell.settle(ticket, result) {
                        info!(endpoint = operation.endpoint(), "result applied");
                        self.dispatch(Action::ShowStatus(status));
                    }
                }
            }
        }
    }
}

fn settled_status(operation: OperationId, result: &OperationResult) -> String {
    let title = operation.descriptor().title;
    match result.error() {
        Some(error) => format!("{title} failed: {error}"),
        None => format!("{title} finished"),
    }
}

enum Movement {
    Left,
    Right,
    Up,
    Down,
}

/// Immutable state shared across components.
#[derive(Debug)]
pub struct AppState {
    pub navigation: NavigationState,
    pub shell: Shell,
    pub server: String,
    pub document_path: String,
    pub editing: bool,
}

impl AppState {
    pub fn new(server: &str, document_path: &str) -> Self {
        Self {
            navigation: NavigationState::default(),
            shell: Shell::default(),
            server: server.to_string(),
            document_path: document_path.to_string(),
            editing: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct NavigationState {
    pub focused_pane: FocusedPane,
}

impl NavigationState {
    pub fn focus_next(&mut self) {
        self.focused_pane = match self.focused_pane {
            FocusedPane::Sidebar => FocusedPane::MainView,
            FocusedPane::MainView => FocusedPane::Sidebar,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus_next();
    }
}

/// Mutable context passed to components while handling logic.
pub struct AppContext<'a> {
    pub state: &'a mut AppState,
    pub commands: CommandBus,
    pub clipboard: &'a mut dyn ClipboardSink,
}

/// Read-only context used during rendering.
pub struct AppView<'a> {
    pub state: &'a AppState,
}

#[derive(Clone)]
pub struct CommandBus {
    sender: mpsc::Sender<Message>,
    handle: Handle,
    transport: TransportClient,
}

impl CommandBus {
    pub fn new(sender: mpsc::Sender<Message>, handle: Handle, transport: TransportClient) -> Self {
        Self {
            sender,
            handle,
            transport,
        }
    }

    pub fn spawn_async<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Message> + Send + 'static,
    {
        let sender = self.sender.clone();
        self.handle.spawn(async move {
            let message = task().await;
            let _ = sender.send(message);
        });
    }

    /// Runs one transport call and posts the completion back to the UI thread.
    pub fn submit(&self, request: PendingRequest) {
        let transport = self.transport.clone();
        self.spawn_async(move || async move {
            let result = transport
                .invoke(request.operation, &request.payload)
                .await;
            Message::OperationSettled {
                ticket: request.ticket,
                operation: request.operation,
                result,
            }
        });
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    OperationSettled {
        ticket: RequestTicket,
        operation: OperationId,
        result: OperationResult,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusPane(FocusedPane),
    FocusNextPane,
    FocusPreviousPane,
    SelectOperation(OperationId),
    ShowStatus(String),
}

mod navigation {
    /// Panes that take commands. The top and bottom bars only display state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum FocusedPane {
        #[default]
        Sidebar,
        MainView,
    }
}
