use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc;

use evline::builder::EditorBuilder;
use evline::events::Event;
use evline::sync_io::{StdinWrapper, StdoutWrapper};
use termion::raw::IntoRawMode;
use tracing_subscriber::EnvFilter;

static FRUIT_LIST: [&str; 6] = ["Apple", "Banana", "Lemon", "Lime", "Peach", "Pear"];

fn fruit(word: &str, _start: usize, _end: usize) -> Option<Vec<String>> {
    Some(
        FRUIT_LIST
            .iter()
            .filter(|candidate| candidate.starts_with(word))
            .map(|candidate| candidate.to_string())
            .collect(),
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let _raw = io::stdout().into_raw_mode()?;
    let (tx, rx) = mpsc::channel();

    let mut editor = EditorBuilder::new()
        .with_recorded_history(true)
        .with_completer(fruit)
        .build_sync(StdoutWrapper::new(), tx, StdinWrapper::new())?;

    editor.redraw()?;

    while editor.pump()? {
        for event in rx.try_iter() {
            if let Event::Line(line) = event {
                editor.clear()?;

                let mut stdout = io::stdout();
                write!(stdout, "Read: '{}'\r\n", line)?;
                stdout.flush()?;

                editor.redraw()?;
            }
        }
    }

    write!(io::stdout(), "\r\n")?;

    Ok(())
}
