//! Sus Notebook entry point
//!
//! Runs the text front end over stdin/stdout until `quit` or end of input.

use std::io::{self, BufRead, Write};

use sus_notebook::NotebookApp;
use sus_notebook::console::Console;

fn main() {
    env_logger::init();
    log::info!("Sus Notebook starting...");

    let mut console = Console::new(NotebookApp::default());
    println!("Body Report Log - type 'help' for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        }

        let reply = console.handle_line(&line);
        if !reply.text.is_empty() {
            println!("{}", reply.text);
        }
        if reply.quit {
            break;
        }
    }

    if let Some(err) = console.shutdown() {
        eprintln!("{}", err);
    }
    log::info!("Sus Notebook exiting");
}
