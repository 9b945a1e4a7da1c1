use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crawler_core::{init, update, AppState, Msg};
use crawler_engine::EngineHandle;
use crawler_logging::{crawler_info, LogDestination};
use log::LevelFilter;

use super::commands::{parse_command, Command, HELP};
use super::config::{load_config, CONFIG_FILENAME};
use super::effects::{resolve_output_dir, EffectRunner};
use super::render::render;

/// How long the loop waits for input before checking engine events.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    crawler_logging::initialize(&LogDestination::default(), LevelFilter::Info);

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = load_config(&config_path);
    let output_dir = resolve_output_dir(&config.output_dir);
    crawler_info!(
        "Starting crawler shell against {} (exports to {:?})",
        config.api_base_url,
        output_dir
    );

    let engine = EngineHandle::new(config.api_settings(), output_dir)
        .with_context(|| format!("invalid api_base_url `{}`", config.api_base_url))?;
    let mut shell = Shell::new(EffectRunner::new(engine));

    let line_rx = spawn_stdin_reader();
    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP}")?;

    let (state, effects) = init();
    shell.state = state;
    shell.runner.run(effects);

    loop {
        match line_rx.recv_timeout(TICK) {
            Ok(line) => match parse_command(&line) {
                Ok(Command::Send(msg)) => shell.dispatch(msg),
                Ok(Command::Help) => writeln!(stdout, "{HELP}")?,
                Ok(Command::Quit) => break,
                Err(err) => writeln!(stdout, "{err}")?,
            },
            Err(RecvTimeoutError::Timeout) => shell.dispatch(Msg::Tick),
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let drained = shell.runner.drain();
        for msg in drained.msgs {
            shell.dispatch(msg);
        }
        for note in drained.notes {
            writeln!(stdout, "{note}")?;
        }

        if shell.state.consume_dirty() {
            write!(stdout, "\n{}", render(&shell.state.view()))?;
            stdout.flush()?;
        }
    }

    shell.dispatch(Msg::Shutdown);
    crawler_info!("Crawler shell exiting");
    Ok(())
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
}

impl Shell {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
