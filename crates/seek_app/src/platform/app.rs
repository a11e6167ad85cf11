use std::io::{self, BufRead};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use seek_client::ReqwestSearchService;
use seek_core::{update, AppState, FileHandle, Msg};
use seek_logging::{seek_info, seek_warn};

use super::config::{self, CONFIG_FILENAME};
use super::effects::{EffectRunner, EffectSink};
use super::export::ResultsExporter;
use super::logging;
use super::ui;
use super::ui::input::UserCommand;
use super::ui::surface::{Surface, SurfaceCommand};
use super::ui::terminal::TerminalSurface;

/// Everything the UI thread reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    /// Answer to a request the effect sink submitted.
    Reply(Msg),
    User(UserCommand),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let (config, config_problem) = config::load(Path::new(CONFIG_FILENAME));
    logging::initialize(config.log, &config.log_path);
    if let Some(problem) = config_problem {
        seek_warn!("{}", problem);
    }
    seek_info!("Using search service at {}", config.base_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let service = ReqwestSearchService::new(config.service_settings())?;
    let runner = EffectRunner::new(Arc::new(service), event_tx.clone())?;
    let surface = TerminalSurface::new(
        io::stdout(),
        Some(ResultsExporter::new(&config.results_path)),
    );
    let mut controller = Controller::new(
        AppState::with_toast_ttl(config.toast_ttl()),
        surface,
        runner,
    );

    spawn_input_reader(event_tx);
    controller.notify(format!(
        "{} at {}\n{}",
        ui::constants::APP_TITLE,
        config.base_url,
        ui::constants::HELP_TEXT
    ));
    controller.start();

    let mut draining = false;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(msg) => controller.dispatch(msg),
            AppEvent::Reply(msg) => controller.handle_reply(msg),
            AppEvent::User(UserCommand::Upload(files)) => controller.handle_upload(files),
            AppEvent::User(UserCommand::Search(query)) => controller.handle_search(&query),
            AppEvent::User(UserCommand::Help) => {
                controller.notify(ui::constants::HELP_TEXT.to_string())
            }
            AppEvent::User(UserCommand::Invalid(problem)) => {
                controller.notify(format!("{problem} (type :help)"))
            }
            AppEvent::User(UserCommand::Quit) => break,
            // Piped input: finish outstanding work before leaving.
            AppEvent::InputClosed => draining = true,
        }
        if draining && !controller.is_busy() {
            break;
        }
    }

    seek_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if events
                .send(AppEvent::User(ui::input::parse_line(&line)))
                .is_err()
            {
                return;
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}

/// Owns the UI state and routes user actions and async completions through
/// `update`, rendering to the injected surface and handing effects to the
/// injected sink.
pub struct Controller<S: Surface, E: EffectSink> {
    state: AppState,
    surface: S,
    effects: E,
}

impl<S: Surface, E: EffectSink> Controller<S, E> {
    pub fn new(state: AppState, surface: S, effects: E) -> Self {
        Self {
            state,
            surface,
            effects,
        }
    }

    pub fn start(&mut self) {
        let view = self.state.view();
        self.surface.apply(ui::render::render(&view));
        self.dispatch(Msg::Started);
    }

    pub fn handle_upload(&mut self, files: Vec<FileHandle>) {
        if files.is_empty() {
            return;
        }
        if self.state.batch_in_progress() {
            seek_warn!("Ignoring {} file(s): an upload batch is still running", files.len());
            self.notify("An upload is already in progress".to_string());
            return;
        }
        seek_info!("Starting file upload for {} files", files.len());
        self.dispatch(Msg::FilesSelected(files));
    }

    pub fn handle_search(&mut self, query: &str) {
        self.dispatch(Msg::SearchSubmitted(query.to_string()));
    }

    pub fn handle_reply(&mut self, msg: Msg) {
        self.effects.settle();
        self.dispatch(msg);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            let view = self.state.view();
            self.surface.apply(ui::render::render(&view));
        }
        self.effects.run(effects);
    }

    pub fn notify(&mut self, text: String) {
        self.surface.apply(vec![SurfaceCommand::Notice(text)]);
    }

    /// True while a batch is live or requests are outstanding.
    pub fn is_busy(&self) -> bool {
        self.state.batch_in_progress() || self.effects.is_busy()
    }

    #[cfg(test)]
    fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }
}
