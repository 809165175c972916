use std::env;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clarity_core::{update, AppState, AppViewModel, Msg};
use clarity_logging::{clarity_info, clarity_warn};
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use super::effects::EffectRunner;
use super::ui::keys::{map_key, UiCommand};
use super::ui::render::{self, OutputViewport};
use super::{logging, settings, terminal};

const INPUT_POLL: Duration = Duration::from_millis(30);
const TICK_INTERVAL: Duration = Duration::from_millis(120);

pub fn run_app() -> Result<()> {
    let dir = env::current_dir().context("resolve working directory")?;
    let (settings, settings_error) = settings::load_settings(&dir);
    logging::initialize(settings.log_destination(&dir));
    if let Some(err) = settings_error {
        clarity_warn!("Ignoring {}: {}", settings::SETTINGS_FILENAME, err);
    }
    clarity_info!("Starting ClarityAssist endpoint={}", settings.endpoint);

    terminal::install_panic_hook();
    let mut tui = terminal::init().context("initialize terminal")?;
    let mut screen = Screen::new(EffectRunner::new(settings.upload_settings()));
    let result = screen.run(&mut tui);
    terminal::restore().context("restore terminal")?;
    clarity_info!("ClarityAssist exiting");
    result
}

struct Screen {
    state: AppState,
    runner: EffectRunner,
    view: AppViewModel,
    scroll: u16,
    viewport: OutputViewport,
    should_quit: bool,
    redraw: bool,
}

impl Screen {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::default();
        let view = state.view();
        Self {
            state,
            runner,
            view,
            scroll: 0,
            viewport: OutputViewport::default(),
            should_quit: false,
            redraw: true,
        }
    }

    fn run(&mut self, tui: &mut terminal::Tui) -> Result<()> {
        let mut last_tick = Instant::now();
        while !self.should_quit {
            for msg in self.runner.poll() {
                self.dispatch_msg(msg);
            }

            if self.redraw {
                let (view, scroll) = (&self.view, self.scroll);
                let mut viewport = self.viewport;
                tui.draw(|frame| viewport = render::render(frame, view, scroll))?;
                self.viewport = viewport;
                self.redraw = false;
            }

            if event::poll(INPUT_POLL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(command) = map_key(key, self.view.notice.is_some()) {
                            self.apply(command);
                        }
                    }
                    Event::Resize(..) => self.redraw = true,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= TICK_INTERVAL {
                last_tick = Instant::now();
                self.dispatch_msg(Msg::Tick);
            }
        }
        Ok(())
    }

    fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::Quit => self.should_quit = true,
            UiCommand::Dispatch(msg) => self.dispatch_msg(msg),
            UiCommand::ScrollUp(lines) => self.scroll_to(self.scroll.saturating_sub(lines)),
            UiCommand::ScrollDown(lines) => self.scroll_to(self.scroll.saturating_add(lines)),
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            if view.output != self.view.output {
                self.scroll = 0;
            }
            self.view = view;
            self.redraw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn scroll_to(&mut self, target: u16) {
        let clamped = target.min(render::max_scroll(&self.view, self.viewport));
        if clamped != self.scroll {
            self.scroll = clamped;
            self.redraw = true;
        }
    }
}
