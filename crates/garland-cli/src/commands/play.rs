//! Play command — real-time loop driven by single-letter commands on stdin

use super::load_config;
use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver, TryRecvError};
use garland_player::TreeApp;
use std::io::BufRead;
use std::path::Path;
use std::time::{Duration, Instant};

pub struct PlayArgs<'a> {
    pub config: Option<&'a Path>,
    pub fps: u32,
    pub music: bool,
}

enum Input {
    ToggleAssembled,
    ToggleMusic,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim() {
        "a" | "assemble" => Some(Input::ToggleAssembled),
        "m" | "music" => Some(Input::ToggleMusic),
        "q" | "quit" | "exit" => Some(Input::Quit),
        _ => None,
    }
}

/// Forward stdin lines on a channel so the frame loop never blocks on input
fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = channel::unbounded();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

pub fn run(args: PlayArgs<'_>) -> Result<()> {
    let config = load_config(args.config)?;
    let mut app = TreeApp::new(config).context("Failed to start tree")?;

    println!("Tree ready: {} particles", app.store().counts().total());
    println!();
    println!("Controls (type then Enter):");
    println!("  a  - Assemble / scatter");
    println!("  m  - Toggle music box");
    println!("  q  - Quit");

    if args.music {
        app.toggle_music();
    }

    let frame_time = Duration::from_secs_f64(1.0 / args.fps.max(1) as f64);
    let input = spawn_stdin_reader();
    let mut last_phase = app.driver().phase();

    'frames: loop {
        let started = Instant::now();

        loop {
            match input.try_recv() {
                Ok(line) => match parse_input(&line) {
                    Some(Input::ToggleAssembled) => {
                        let assembled = app.toggle_assembled();
                        println!("assembled: {assembled}");
                    }
                    Some(Input::ToggleMusic) => {
                        let playing = app.toggle_music();
                        println!("music: {}", if playing { "on" } else { "off" });
                    }
                    Some(Input::Quit) => break 'frames,
                    None => println!("unknown command '{}'", line.trim()),
                },
                Err(TryRecvError::Empty) => break,
                // stdin closed
                Err(TryRecvError::Disconnected) => break 'frames,
            }
        }

        let report = app.frame_realtime()?;
        if report.phase != last_phase {
            println!("{} (frame {})", report.phase, report.frame);
            last_phase = report.phase;
        }

        if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    app.shutdown()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert!(matches!(parse_input("a\n"), Some(Input::ToggleAssembled)));
        assert!(matches!(parse_input(" m "), Some(Input::ToggleMusic)));
        assert!(matches!(parse_input("quit"), Some(Input::Quit)));
        assert!(parse_input("x").is_none());
    }
}
