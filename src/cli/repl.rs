// Interactive session
//
// Renders the current screen, reads one line, turns it into a controller
// operation. Transient screens are printed from a watcher task because the
// loop itself is parked on the remote call while they are showing.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::commands::{format_help, Command};
use super::render::{render, render_transient};
use crate::config::constants::DEFAULT_DOOM_LEVEL;
use crate::session::{Controller, Rejected, Screen};

enum Input {
    Line(String),
    Exit,
}

pub struct Repl {
    controller: Controller,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(controller: Controller) -> Result<Self> {
        Ok(Self {
            controller,
            editor: DefaultEditor::new()?,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut screens = self.controller.subscribe();
        tokio::spawn(async move {
            while screens.changed().await.is_ok() {
                let screen = *screens.borrow_and_update();
                if screen.is_transient() {
                    println!("\n{}", render_transient(screen));
                }
            }
        });

        println!("Type /help for commands.");

        loop {
            println!("\n{}", render(self.controller.state()));

            let screen = self.controller.state().screen;
            let line = match self.read_line(&prompt_for(screen))? {
                Input::Line(line) => line,
                Input::Exit => break,
            };
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse_for(screen, &line) {
                Some(Command::Quit) => break,
                Some(command) => self.handle_command(screen, command).await,
                None if screen == Screen::Landing => {
                    if !self.submit(line).await? {
                        break;
                    }
                }
                None => println!("Unknown command. Type /help for commands."),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(Input::Exit),
            Err(e) => Err(e.into()),
        }
    }

    /// Ask for the doom level and submit; `false` when the user quit
    async fn submit(&mut self, idea: String) -> Result<bool> {
        let doom_prompt = format!("doom level [1-10, default {}]> ", DEFAULT_DOOM_LEVEL);
        let doom_level = loop {
            let answer = match self.read_line(&doom_prompt)? {
                Input::Line(answer) => answer,
                Input::Exit => return Ok(false),
            };
            let answer = answer.trim();
            if answer.is_empty() {
                break i64::from(DEFAULT_DOOM_LEVEL);
            }
            match answer.parse::<i64>() {
                Ok(level) => break level,
                Err(_) => println!("Enter a number between 1 and 10."),
            }
        };

        report(self.controller.submit_idea(&idea, doom_level).await.err());
        Ok(true)
    }

    async fn handle_command(&mut self, screen: Screen, command: Command) {
        let rejected = match command {
            Command::Help => {
                println!("{}", format_help(screen));
                None
            }
            Command::Quit => None,
            Command::Restart => self.controller.restart().await.err(),
            Command::Dismiss => self.controller.dismiss_error().await.err(),
            Command::Autopsy => self.controller.view_autopsy().await.err(),
            Command::Back => self.controller.return_to_roadmap().await.err(),
            Command::Invert => self.controller.invert_selections().await.err(),
            Command::Toggle(ids) => {
                let mut rejected = None;
                for id in ids {
                    let found = self
                        .controller
                        .state()
                        .roadmap
                        .as_ref()
                        .and_then(|roadmap| roadmap.find_item(&id))
                        .is_some();
                    if !found {
                        println!("No failure point with id '{}'.", id);
                        continue;
                    }
                    if let Err(e) = self.controller.toggle_selection(&id).await {
                        rejected = Some(e);
                        break;
                    }
                }
                rejected
            }
        };
        report(rejected);
    }
}

fn report(rejected: Option<Rejected>) {
    if let Some(rejected) = rejected {
        println!("{}", rejected);
    }
}

fn prompt_for(screen: Screen) -> String {
    match screen {
        Screen::Landing => "target concept> ".to_string(),
        other => format!("{}> ", other),
    }
}
