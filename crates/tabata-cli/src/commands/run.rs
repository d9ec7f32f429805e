//! Foreground session driver.
//!
//! Owns the one-tick-per-second recurring source the engine itself does
//! not have: a tokio interval delivers ticks while the engine is active,
//! and stdin lines are folded into the same serial loop so manual
//! navigation never races a tick. Pausing drops the interval entirely
//! and resuming arms a fresh one, so no drift accumulates while paused.
//!
//! Runtime commands (one per line on stdin):
//!   s  start/resume    p  pause    n  next interval
//!   b  previous interval    q  quit

use std::error::Error;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, Interval};

use tabata_core::exercises::{self, ExerciseRotation};
use tabata_core::timer::timeline::{self, TimelineEntry};
use tabata_core::{Event, IntervalEngine, Phase};

use crate::audio::{self, AudioCue, NullAudio, TerminalBell};

/// Number of upcoming timeline entries shown alongside the current one.
const LOOKAHEAD_ENTRIES: usize = 5;

#[derive(Args)]
pub struct RunArgs {
    /// Use the fast debug configuration
    #[arg(long)]
    pub debug: bool,
    /// Emit JSON events instead of human-readable output
    #[arg(long)]
    pub json: bool,
    /// Disable audio cues
    #[arg(long)]
    pub no_audio: bool,
    /// Run a bare countdown of the given seconds instead of a session
    #[arg(long, value_name = "SECS")]
    pub countdown: Option<u32>,
    /// Tick period in milliseconds (one second unless testing)
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_session(args))
}

async fn run_session(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let (mut engine, entries, assignment) = match args.countdown {
        Some(secs) => (IntervalEngine::countdown(secs), Vec::new(), Vec::new()),
        None => {
            let config = super::active_config(args.debug)?;
            let mut rotation = ExerciseRotation::default();
            let assignment = rotation.get_or_create(&config).to_vec();
            let entries = timeline::build(&config);
            (IntervalEngine::new(config), entries, assignment)
        }
    };

    // A zero-length countdown has nothing to tick and would otherwise
    // spin forever: the engine starts frozen at zero and never emits
    // its finish event.
    if !engine.state().is_session_mode && engine.remaining_secs() == 0 {
        emit(&Event::CountdownFinished { at: chrono::Utc::now() }, args.json)?;
        render(&engine, &assignment, args.json)?;
        if !args.json {
            println!("Countdown finished.");
        }
        return Ok(());
    }

    let cue: Box<dyn AudioCue> = if args.no_audio {
        Box::new(NullAudio)
    } else {
        Box::new(TerminalBell)
    };

    // Stdin commands are forwarded over a channel so they enter the same
    // select loop as the ticker.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    if let Some(event) = engine.start() {
        emit(&event, args.json)?;
    }
    let mut ticker = Some(arm_ticker(args.tick_ms));
    render_window(&entries, engine.sequential_number(), args.json);
    render(&engine, &assignment, args.json)?;

    let mut stdin_open = true;
    loop {
        // Paused with stdin closed: nothing can ever wake us again.
        if ticker.is_none() && !stdin_open {
            break;
        }
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                let exited_phase = engine.phase();
                let event = engine.tick();
                play_cues(cue.as_ref(), &engine, event.as_ref(), exited_phase);
                if let Some(event) = &event {
                    emit(event, args.json)?;
                    if matches!(event, Event::PhaseChanged { .. }) {
                        render_window(&entries, engine.sequential_number(), args.json);
                    }
                }
                render(&engine, &assignment, args.json)?;
                if engine.is_complete() || matches!(event, Some(Event::CountdownFinished { .. })) {
                    break;
                }
            }
            cmd = rx.recv(), if stdin_open => {
                match cmd.as_deref().map(str::trim) {
                    Some("p") | Some("pause") => {
                        if let Some(event) = engine.pause() {
                            emit(&event, args.json)?;
                        }
                        // Cancel the recurring source outright; merely
                        // ignoring its ticks would drift on resume.
                        ticker = None;
                    }
                    Some("s") | Some("start") => {
                        if let Some(event) = engine.start() {
                            emit(&event, args.json)?;
                            ticker = Some(arm_ticker(args.tick_ms));
                        }
                    }
                    Some("n") | Some("next") => {
                        if let Some(event) = engine.next_interval() {
                            emit(&event, args.json)?;
                            render_window(&entries, engine.sequential_number(), args.json);
                            render(&engine, &assignment, args.json)?;
                        }
                    }
                    Some("b") | Some("back") => {
                        if let Some(event) = engine.previous_interval() {
                            emit(&event, args.json)?;
                            render_window(&entries, engine.sequential_number(), args.json);
                            render(&engine, &assignment, args.json)?;
                        }
                    }
                    Some("q") | Some("quit") => break,
                    Some(_) => {}
                    None => stdin_open = false,
                }
            }
        }
    }

    if !args.json {
        if engine.is_complete() {
            println!("Session complete.");
        } else if !engine.state().is_session_mode && engine.remaining_secs() == 0 {
            println!("Countdown finished.");
        }
    }
    Ok(())
}

/// First tick lands one full period after arming.
fn arm_ticker(tick_ms: u64) -> Interval {
    let period = Duration::from_millis(tick_ms.max(1));
    interval_at(Instant::now() + period, period)
}

/// Resolves on the next tick, or never while paused.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn play_cues(cue: &dyn AudioCue, engine: &IntervalEngine, event: Option<&Event>, exited: Phase) {
    let is_transition = matches!(
        event,
        Some(
            Event::PhaseChanged { .. }
                | Event::SessionCompleted { .. }
                | Event::CountdownFinished { .. }
        )
    );
    if is_transition {
        // The transition cue uses the frequency of the phase just exited.
        cue.play_cue(
            audio::frequency_for(exited),
            audio::FINAL_BEEP_DURATION_MS,
            audio::FINAL_BEEP_VOLUME,
        );
    }
    // Not exclusive with the transition cue: a phase of three seconds or
    // shorter is already inside the 3/2/1 window when entered.
    if (1..=3).contains(&engine.remaining_secs()) {
        cue.play_cue(
            audio::frequency_for(engine.phase()),
            audio::BEEP_DURATION_MS,
            audio::BEEP_VOLUME,
        );
    }
}

fn emit(event: &Event, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::SessionStarted { phase, remaining_secs, .. } => {
            println!("Started: {phase} ({remaining_secs}s)");
        }
        Event::SessionPaused { remaining_secs, .. } => {
            println!("Paused at {remaining_secs}s remaining.");
        }
        Event::PhaseChanged { phase, interval, duration_secs, .. } => {
            println!("-- {phase} (interval {interval}), {duration_secs}s");
        }
        Event::SessionCompleted { total_intervals, .. } => {
            println!("-- All {total_intervals} intervals done");
        }
        Event::CountdownFinished { .. } => {}
        Event::IntervalSkipped { from_interval, to_interval, .. } => {
            println!("Skipped interval {from_interval} -> {to_interval}");
        }
        Event::IntervalRewound { interval, restarted, .. } => {
            if *restarted {
                println!("Restarting interval {interval}");
            } else {
                println!("Back to interval {interval}");
            }
        }
        Event::StateSnapshot { .. } => {}
    }
    Ok(())
}

fn render(engine: &IntervalEngine, assignment: &[String], json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string(&engine.snapshot())?);
        return Ok(());
    }
    let slot = exercises::exercise_slot(engine.phase(), engine.current_interval());
    let exercise = assignment.get(slot).map(String::as_str).unwrap_or("-");
    let label = match engine.phase() {
        Phase::Prepare => engine.phase().label().to_string(),
        _ => format!(
            "{} {}/{}",
            engine.phase(),
            engine.current_interval(),
            engine.config().total_intervals
        ),
    };
    println!(
        "{:>5}  {:<10} {:<20} {:>3.0}%",
        format_mmss(engine.remaining_secs()),
        label,
        exercise,
        engine.session_progress_pct()
    );
    Ok(())
}

/// Current entry plus the next [`LOOKAHEAD_ENTRIES`].
fn render_window(entries: &[TimelineEntry], sequential_number: u32, json: bool) {
    if json || entries.is_empty() {
        return;
    }
    let start = sequential_number as usize - 1;
    let end = (start + 1 + LOOKAHEAD_ENTRIES).min(entries.len());
    for (offset, entry) in entries[start..end].iter().enumerate() {
        let marker = if offset == 0 { ">" } else { " " };
        let owner = match entry.work_interval {
            Some(n) => format!("interval {n}"),
            None => "warm-up".to_string(),
        };
        println!(
            "{marker} {:>2}. {:<8} {:>3}s  ({owner})",
            entry.sequential_number,
            entry.phase.label(),
            entry.duration
        );
    }
}

fn format_mmss(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
