//! Interactive REPL: load a level file and play it in ASCII.

use std::process::ExitCode;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use parable_engine::{Input, play_turn};
use parable_foundation::Orient;
use parable_lexicon::Catalog;
use parable_runtime::load_from_file;
use parable_runtime::render::render_level;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: parable <level-file>");
        return ExitCode::FAILURE;
    };
    let catalog = Catalog::new();
    let mut level = match load_from_file(&catalog, &path) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("failed to load {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("terminal error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", render_level(&level));
    println!("w/a/s/d to move, space to wait, q to quit");

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("terminal error: {err}");
                return ExitCode::FAILURE;
            }
        };
        let _ = editor.add_history_entry(&line);
        let input = match line.trim() {
            "w" => Input::Move(Orient::Up),
            "a" => Input::Move(Orient::Left),
            "s" => Input::Move(Orient::Down),
            "d" => Input::Move(Orient::Right),
            "" | "wait" => Input::Wait,
            "q" | "quit" => return ExitCode::SUCCESS,
            other => {
                println!("unknown command: {other}");
                continue;
            }
        };
        let outcome = play_turn(&mut level, input);
        println!("{}", render_level(&level));
        if !outcome.sounds.is_empty() {
            println!("[{:?}]", outcome.sounds);
        }
        if outcome.win {
            println!("you win!");
            return ExitCode::SUCCESS;
        }
        if outcome.end {
            println!("the end.");
            return ExitCode::SUCCESS;
        }
    }
}
