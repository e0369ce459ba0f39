//! Line-oriented front end
//!
//! Parses one command per line, applies it to a [`NotebookApp`] and renders
//! the result as text. Destructive commands ask for a `y`/`n` confirmation
//! on the next line.

use thiserror::Error;

use crate::app::NotebookApp;
use crate::color::Rgb;
use crate::consts::OVERLAY_TOP_N;
use crate::overlay::OverlayLine;
use crate::session::SessionEvent;
use crate::view;

pub const HELP: &str = "\
Commands:
  select <player>                       pick a player for the SUS buttons
  sus <+n|-n>                           adjust the selected player's SUS
  add <victim> | <location> | <nearby, ...> | <notes>
  delete <id>                           remove a body report (asks first)
  reset                                 zero every SUS score (asks first)
  board                                 SUS leaderboard
  recent [n]                            overlay view of the newest bodies
  log                                   full body log
  save <path> / load <path>             session file (.json)
  notes                                 open and print the notebook
  note <text>                           append a line to the notebook
  close-notes                           save and close the notebook
  clear-notes                           empty the open notebook
  settings <bg> | <font> | <size>       apply appearance (blank fields skipped)
  bg <#rrggbb>                          set the background colour
  font <family> | <size> | <alpha> | <#rrggbb>
  look                                  show appearance settings
  help / quit";

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Sus(i64),
    Add {
        victim: String,
        location: String,
        nearby: String,
        notes: String,
    },
    Delete(u32),
    Reset,
    Board,
    Recent(usize),
    Log,
    Save(String),
    Load(String),
    Notes,
    Note(String),
    CloseNotes,
    ClearNotes,
    Settings {
        bg: String,
        font: String,
        size: String,
    },
    Background(Rgb),
    Font {
        family: String,
        size: u32,
        alpha: u8,
        color: Rgb,
    },
    Look,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_lowercase().as_str() {
            "select" if !rest.is_empty() => Command::Select(rest.to_string()),
            "select" => return Err(CommandError::Usage("select <player>")),
            "sus" => Command::Sus(
                rest.parse()
                    .map_err(|_| CommandError::Usage("sus <+n|-n>"))?,
            ),
            "add" => {
                let mut fields = rest.splitn(4, '|').map(str::trim);
                Command::Add {
                    victim: fields.next().unwrap_or_default().to_string(),
                    location: fields.next().unwrap_or_default().to_string(),
                    nearby: fields.next().unwrap_or_default().to_string(),
                    notes: fields.next().unwrap_or_default().to_string(),
                }
            }
            "delete" | "del" => Command::Delete(
                rest.trim_start_matches('#')
                    .parse()
                    .map_err(|_| CommandError::Usage("delete <id>"))?,
            ),
            "reset" => Command::Reset,
            "board" | "leaderboard" => Command::Board,
            "recent" if rest.is_empty() => Command::Recent(OVERLAY_TOP_N),
            "recent" => Command::Recent(
                rest.parse()
                    .map_err(|_| CommandError::Usage("recent [n]"))?,
            ),
            "log" => Command::Log,
            "save" if !rest.is_empty() => Command::Save(rest.to_string()),
            "save" => return Err(CommandError::Usage("save <path>")),
            "load" if !rest.is_empty() => Command::Load(rest.to_string()),
            "load" => return Err(CommandError::Usage("load <path>")),
            "notes" => Command::Notes,
            "note" => Command::Note(rest.to_string()),
            "close-notes" => Command::CloseNotes,
            "clear-notes" => Command::ClearNotes,
            "settings" => {
                let mut fields = rest.splitn(3, '|').map(str::trim);
                Command::Settings {
                    bg: fields.next().unwrap_or_default().to_string(),
                    font: fields.next().unwrap_or_default().to_string(),
                    size: fields.next().unwrap_or_default().to_string(),
                }
            }
            "bg" => Command::Background(
                Rgb::parse(rest).ok_or(CommandError::Usage("bg <#rrggbb>"))?,
            ),
            "font" => Self::parse_font(rest)?,
            "look" => Command::Look,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(cmd)
    }

    fn parse_font(rest: &str) -> Result<Self, CommandError> {
        const USAGE: CommandError =
            CommandError::Usage("font <family> | <size> | <alpha> | <#rrggbb>");
        let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
        let [family, size, alpha, color] = fields.as_slice() else {
            return Err(USAGE);
        };
        if family.is_empty() {
            return Err(USAGE);
        }
        Ok(Command::Font {
            family: family.to_string(),
            size: size.parse().map_err(|_| USAGE)?,
            alpha: alpha.parse().map_err(|_| USAGE)?,
            color: Rgb::parse(color).ok_or(USAGE)?,
        })
    }
}

/// Action waiting for a yes/no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Delete(u32),
    Reset,
}

/// Result of one input line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub struct Console {
    app: NotebookApp,
    pending: Option<Pending>,
}

impl Console {
    pub fn new(app: NotebookApp) -> Self {
        Self { app, pending: None }
    }

    pub fn app(&self) -> &NotebookApp {
        &self.app
    }

    /// Handle one line of input
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if let Some(pending) = self.pending.take() {
            return self.confirm(pending, line);
        }
        if line.trim().is_empty() {
            return Reply::default();
        }

        let reply = match Command::parse(line) {
            Ok(cmd) => self.execute(cmd),
            Err(e) => Reply::say(e.to_string()),
        };

        // Change notifications drive the follow-up render
        let events = self.app.drain_events();
        if events.is_empty() {
            return reply;
        }
        let mut text = reply.text;
        if events.iter().any(|e| matches!(e, SessionEvent::SnapshotLoaded)) {
            text.push('\n');
            text.push_str(&view::format_log(&view::log_cards(self.app.model())));
        }
        Reply {
            text,
            quit: reply.quit,
        }
    }

    /// Save the notebook before exit
    pub fn shutdown(&mut self) -> Option<String> {
        match self.app.close_notebook() {
            Ok(_) => None,
            Err(e) => Some(format!("Failed to save notebook: {}", e)),
        }
    }

    fn confirm(&mut self, pending: Pending, answer: &str) -> Reply {
        let yes = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        if !yes {
            return Reply::say("Cancelled.");
        }
        let reply = match pending {
            Pending::Delete(id) => {
                if self.app.delete_body(id) {
                    Reply::say(format!("Deleted entry #{}.", id))
                } else {
                    Reply::say(format!("No entry #{}.", id))
                }
            }
            Pending::Reset => {
                self.app.reset_suspicion();
                Reply::say("All SUS reset.")
            }
        };
        self.app.drain_events();
        reply
    }

    fn execute(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Select(name) => {
                if self.app.select_player(&name) {
                    let (label, color) =
                        view::selection_label(self.app.model(), self.app.selected());
                    let (face, text) = view::accent_colors(color);
                    Reply::say(format!("{} (buttons {} on {})", label, text, face))
                } else {
                    Reply::say(format!("'{}' is not on the roster.", name))
                }
            }
            Command::Sus(delta) => match self.app.selected().map(str::to_string) {
                None => Reply::say("No player selected."),
                Some(name) => match self.app.change_selected_suspicion(delta) {
                    Some(score) => Reply::say(format!("{} SUS: {}", name, score)),
                    None => Reply::say("No player selected."),
                },
            },
            Command::Add {
                victim,
                location,
                nearby,
                notes,
            } => match self.app.submit_body_form(&victim, &location, &nearby, &notes) {
                Ok(report) => {
                    let card = view::LogCard::from_report(self.app.model(), &report);
                    Reply::say(format!("{}\n{}", card.header, card.details))
                }
                Err(e) => Reply::say(format!("Error: {}", e)),
            },
            Command::Delete(id) => {
                self.pending = Some(Pending::Delete(id));
                Reply::say(format!("Delete entry #{}? (y/n)", id))
            }
            Command::Reset => {
                self.pending = Some(Pending::Reset);
                Reply::say("Reset all SUS values? (y/n)")
            }
            Command::Board => {
                let board = self.app.model().leaderboard();
                let mut text = view::format_leaderboard(&board);
                match board.top_suspect() {
                    Some(top) => text.push_str(&format!("Top suspect: {} ({})", top.name, top.score)),
                    None => text.push_str("No suspects yet."),
                }
                if let Some(rank) = self.app.selected().and_then(|name| board.rank_of(name)) {
                    text.push_str(&format!("\nSelected player is #{}", rank));
                }
                Reply::say(text)
            }
            Command::Recent(n) => {
                // Only filled slots are printed, so no padding to `n`
                let model = self.app.model();
                let text = model
                    .recent_bodies(n)
                    .iter()
                    .filter_map(|body| match OverlayLine::for_report(model, body) {
                        OverlayLine::Body {
                            headline, details, ..
                        } => Some(format!("{}\n  {}", headline, details)),
                        OverlayLine::Empty => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Reply::say(format!("Recent Bodies\n{}", text))
            }
            Command::Log => Reply::say(view::format_log(&view::log_cards(self.app.model()))),
            Command::Save(path) => match self.app.save_session(&path) {
                Ok(()) => Reply::say(format!("Session saved to {}", path)),
                Err(e) => Reply::say(format!("Failed to save: {}", e)),
            },
            Command::Load(path) => match self.app.load_session(&path) {
                Ok(()) => Reply::say("Session loaded successfully."),
                Err(e) => Reply::say(format!("Failed to load file: {}", e)),
            },
            Command::Notes => match self.app.open_notebook() {
                Ok(notes) if notes.text.is_empty() => Reply::say("(notebook is empty)"),
                Ok(notes) => Reply::say(notes.text.clone()),
                Err(e) => Reply::say(format!("Failed to open notebook: {}", e)),
            },
            Command::Note(text) => match self.app.open_notebook() {
                Ok(notes) => {
                    notes.append_line(&text);
                    Reply::say("Noted.")
                }
                Err(e) => Reply::say(format!("Failed to open notebook: {}", e)),
            },
            Command::CloseNotes => match self.app.close_notebook() {
                Ok(true) => Reply::say("Notebook saved."),
                Ok(false) => Reply::say("Notebook is not open."),
                Err(e) => Reply::say(format!("Failed to save notebook: {}", e)),
            },
            Command::ClearNotes => match self.app.open_notebook() {
                Ok(notes) => {
                    notes.clear();
                    Reply::say("Notebook cleared.")
                }
                Err(e) => Reply::say(format!("Failed to open notebook: {}", e)),
            },
            Command::Settings { bg, font, size } => {
                let warnings = self.app.apply_settings_form(&bg, &font, &size);
                let mut lines: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
                lines.push("Appearance settings applied.".to_string());
                Reply::say(lines.join("\n"))
            }
            Command::Background(color) => {
                self.app.set_background(color);
                Reply::say(view::describe_appearance(self.app.appearance()))
            }
            Command::Font {
                family,
                size,
                alpha,
                color,
            } => {
                self.app.apply_font_choice(&family, size, alpha, color);
                Reply::say(view::describe_appearance(self.app.appearance()))
            }
            Command::Look => Reply::say(view::describe_appearance(self.app.appearance())),
            Command::Help => Reply::say(HELP),
            Command::Quit => Reply {
                text: String::new(),
                quit: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("select Blue"), Ok(Command::Select("Blue".into())));
        assert_eq!(Command::parse("sus +10"), Ok(Command::Sus(10)));
        assert_eq!(Command::parse("SUS -1"), Ok(Command::Sus(-1)));
        assert_eq!(Command::parse("delete #4"), Ok(Command::Delete(4)));
        assert_eq!(Command::parse("recent"), Ok(Command::Recent(5)));
        assert_eq!(
            Command::parse("add Red | Cafeteria | Blue, Blue"),
            Ok(Command::Add {
                victim: "Red".into(),
                location: "Cafeteria".into(),
                nearby: "Blue, Blue".into(),
                notes: String::new(),
            })
        );
        assert_eq!(
            Command::parse("bg #1c1c1e"),
            Ok(Command::Background(Rgb::new(0x1c, 0x1c, 0x1e)))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
        assert_eq!(Command::parse("sus lots"), Err(CommandError::Usage("sus <+n|-n>")));
        assert_eq!(Command::parse("save"), Err(CommandError::Usage("save <path>")));
        assert!(Command::parse("bg white").is_err());
        assert!(Command::parse("font Arial | 12").is_err());
        assert!(Command::parse("font Arial | 12 | 300 | #000000").is_err());
    }

    #[test]
    fn test_font_command() {
        assert_eq!(
            Command::parse("font Comic Sans MS | 50 | 128 | #ff0000"),
            Ok(Command::Font {
                family: "Comic Sans MS".into(),
                size: 50,
                alpha: 128,
                color: Rgb::new(255, 0, 0),
            })
        );

        let mut console = Console::new(NotebookApp::default());
        console.handle_line("font Impact | 50 | 128 | #ff0000");
        let look = console.app().appearance();
        assert_eq!(look.font_family, "Impact");
        assert_eq!(look.base_font_size, 40);
        assert_eq!(look.font_alpha, 128);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut console = Console::new(NotebookApp::default());
        console.handle_line("add Red | Admin | Pink |");
        assert_eq!(console.handle_line("delete 1").text, "Delete entry #1? (y/n)");
        assert_eq!(console.handle_line("n").text, "Cancelled.");
        assert_eq!(console.app().model().bodies().len(), 1);

        console.handle_line("delete 1");
        assert_eq!(console.handle_line("y").text, "Deleted entry #1.");
        assert!(console.app().model().bodies().is_empty());
        assert_eq!(console.app().model().score("Pink"), Some(1));
    }

    #[test]
    fn test_sus_flow() {
        let mut console = Console::new(NotebookApp::default());
        assert_eq!(console.handle_line("sus +1").text, "No player selected.");
        assert_eq!(
            console.handle_line("select Lime").text,
            "Selected: Lime (buttons #000000 on #a8e72e)"
        );
        assert_eq!(console.handle_line("sus +10").text, "Lime SUS: 10");
        assert_eq!(console.handle_line("sus -100").text, "Lime SUS: 0");
    }

    #[test]
    fn test_add_validation_reported() {
        let mut console = Console::new(NotebookApp::default());
        let reply = console.handle_line("add Red |  | Blue");
        assert_eq!(
            reply.text,
            "Error: Please specify at least victim and location"
        );
        assert!(!reply.quit);
    }

    #[test]
    fn test_recent_huge_n() {
        let mut console = Console::new(NotebookApp::default());
        console.handle_line("add Red | Admin | Pink |");
        let reply = console.handle_line(&format!("recent {}", usize::MAX));
        assert!(reply.text.starts_with("Recent Bodies\n#1 Red"));
        assert!(reply.text.ends_with("Location: Admin  |  Nearby: Pink"));
        assert!(!reply.quit);
    }

    #[test]
    fn test_board_reports_top_suspect_and_rank() {
        let mut console = Console::new(NotebookApp::default());
        assert!(console.handle_line("board").text.ends_with("No suspects yet."));

        console.handle_line("add Red | Admin | Pink, Pink, Cyan |");
        console.handle_line("select Cyan");
        let text = console.handle_line("board").text;
        assert!(text.contains("Top suspect: Pink (2)"));
        assert!(text.ends_with("Selected player is #2"));
    }

    #[test]
    fn test_clear_notes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.txt");
        let mut console = Console::new(NotebookApp::default().with_notebook_path(&path));
        console.handle_line("note Blue faked scan");
        assert_eq!(console.handle_line("clear-notes").text, "Notebook cleared.");
        assert_eq!(console.handle_line("notes").text, "(notebook is empty)");
        console.handle_line("close-notes");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_quit() {
        let mut console = Console::new(NotebookApp::default());
        assert!(console.handle_line("quit").quit);
    }
}
