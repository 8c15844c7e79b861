use analogy_trials::{
    config::ExperimentConfig,
    experiment::Experiment,
    logger::DataLogger,
    runtime::{CrosstermEventSource, ExperimentClock},
    stage::Stage,
    stimuli::StimulusSet,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::Path,
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;

/// terminal runner for the silent-production analogy study
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "Presents 36 cue/word trials with a photodiode sync flash and a two-option recall question. \
Reads stimuli_words.csv from the working directory and writes experiment_data.csv and experiment_data.json. \
Answer the recall question with 1 (first option) or 0 (second option); ctrl+c aborts the session."
)]
pub struct Cli {}

/// Leaves raw mode and the alternate screen when dropped, including on panic
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

fn init_tracing(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("analogy_trials=info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();
    let config = ExperimentConfig::default();

    let stimuli = match StimulusSet::from_path(&config.stimuli_path) {
        Ok(stimuli) => stimuli,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, e.to_string()).exit();
        }
    };

    // The diagnostic log is optional; a session still runs without it
    if let Err(e) = init_tracing(&config.log_path) {
        eprintln!(
            "warning: cannot open {}: {e}; diagnostic logging disabled",
            config.log_path.display()
        );
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut logger = DataLogger::create(&config.rows_path, &config.records_path)?;

    enable_raw_mode()?;
    let guard = TerminalGuard;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut rng = rand::thread_rng();
    let clock = ExperimentClock::start();
    let canvas = config.canvas;
    let trial_hold = config.trial_hold();
    let mut experiment = Experiment::new(config, stimuli, &mut rng);
    tracing::info!(
        "session plan: {} trials, {:.1}s of fixed holds per trial",
        experiment.plan.len(),
        trial_hold.as_secs_f64()
    );

    let mut stage = Stage::new(terminal, CrosstermEventSource::new(), clock, canvas);
    let result = experiment.run(&mut stage, &mut logger, &mut rng);

    drop(guard);

    match result {
        Ok(completed) => tracing::info!("session complete: {completed} trials"),
        Err(e) => {
            tracing::error!("An error occurred: {e}");
            eprintln!("An error occurred: {e}");
        }
    }

    Ok(())
}
