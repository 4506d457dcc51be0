use std::env;
use std::fs::{self, File};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::EventStream;
use futures::StreamExt;

mod command;
mod config;
mod console;
mod editor;
mod finder;
mod input;
mod project;
mod render;
mod scene;
mod script;
mod scripting;
mod session;
mod syntax;
mod theme;
mod world;

use config::ConfigEngine;
use editor::Workspace;
use render::Renderer;
use session::Session;
use theme::Theme;

/// Log to `<config_dir>/easel.log`; the terminal belongs to the UI
fn init_logging() -> anyhow::Result<()> {
    let dir = ConfigEngine::config_dir().context("no config directory on this platform")?;
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("easel.log");
    let file = File::create(&path).with_context(|| format!("opening {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut config = ConfigEngine::new();
    if let Err(e) = config.load_default() {
        log::warn!("{}", e);
    }
    let mut settings = config.settings();

    // A project named on the command line wins over init.rhai
    if let Some(project) = env::args().nth(1) {
        match project::check_name(&project) {
            Ok(()) => settings.project = project,
            Err(e) => log::warn!("ignoring project argument: {}", e),
        }
    }
    log::info!(
        "opening project '{}' in {}",
        settings.project,
        settings.projects_dir.display()
    );

    let tick = Duration::from_millis(settings.tick_ms);
    let mut workspace = Workspace::new(Session::open(settings));
    workspace.terminal_size = Renderer::size()?;

    Renderer::setup()?;
    let result = run(&mut workspace, tick).await;
    Renderer::teardown()?;

    workspace.session.shutdown();
    result
}

async fn run(workspace: &mut Workspace, tick: Duration) -> anyhow::Result<()> {
    let renderer = Renderer::new(Theme::default());
    renderer.render(workspace)?;

    let mut event_stream = EventStream::new();
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while workspace.running {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => input::handle_event(workspace, event),
                    Some(Err(e)) => return Err(e).context("reading terminal events"),
                    None => break,
                }
            }
            _ = ticker.tick() => {
                // Nothing changes between ticks unless batch running
                if !workspace.session.running {
                    continue;
                }
                workspace.session.tick();
            }
        }
        workspace.adjust_scroll();
        renderer.render(workspace)?;
    }

    Ok(())
}
