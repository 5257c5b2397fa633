// REPL command parsing

use crate::session::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Restart,
    Dismiss,
    Autopsy,
    Back,
    Invert,
    Toggle(Vec<String>),
}

impl Command {
    /// Slash commands available on every screen
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "/help" => Some(Command::Help),
            "/quit" | "/exit" => Some(Command::Quit),
            "/restart" => Some(Command::Restart),
            "/dismiss" => Some(Command::Dismiss),
            _ => None,
        }
    }

    /// Screen-specific words on top of the slash commands.
    ///
    /// On the roadmap, anything that is not a keyword is a list of item ids
    /// to toggle. On the landing screen, free text is the idea and yields
    /// `None`.
    pub fn parse_for(screen: Screen, input: &str) -> Option<Self> {
        if let Some(command) = Self::parse(input) {
            return Some(command);
        }

        let input = input.trim();
        match (screen, input.to_ascii_lowercase().as_str()) {
            (Screen::Roadmap, "autopsy") => Some(Command::Autopsy),
            (Screen::Roadmap, "invert") => Some(Command::Invert),
            (Screen::Roadmap, _) if !input.is_empty() => {
                let list = match input.split_once(char::is_whitespace) {
                    Some((word, rest)) if word.eq_ignore_ascii_case("toggle") => rest,
                    _ => input,
                };
                let ids = list
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                (!ids.is_empty()).then_some(Command::Toggle(ids))
            }
            (Screen::Autopsy, "back") => Some(Command::Back),
            (Screen::Inversion, "restart" | "new") => Some(Command::Restart),
            _ => None,
        }
    }
}

/// Help text for a screen
pub fn format_help(screen: Screen) -> String {
    let screen_help = match screen {
        Screen::Landing => "  <idea>     - Describe the business idea, then pick a doom level",
        Screen::Roadmap => {
            "  <id> ...   - Toggle failure points (e.g. `m1 f2`)\n  \
             autopsy    - Read the obituary\n  \
             invert     - Invert the selected failure points into guardrails"
        }
        Screen::Autopsy => "  back       - Return to the roadmap",
        Screen::Inversion => "  restart    - Start a new simulation",
        Screen::Simulating | Screen::Inverting => "  (waiting for the model)",
    };

    format!(
        "Available commands:\n{}\n  /dismiss   - Clear the error message\n  \
         /restart   - Start over\n  /help      - Show this help message\n  \
         /quit      - Exit",
        screen_help
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_commands_everywhere() {
        assert_eq!(Command::parse_for(Screen::Landing, "/quit"), Some(Command::Quit));
        assert_eq!(Command::parse_for(Screen::Roadmap, " /help "), Some(Command::Help));
        assert_eq!(
            Command::parse_for(Screen::Inversion, "/dismiss"),
            Some(Command::Dismiss)
        );
    }

    #[test]
    fn test_landing_free_text_is_not_a_command() {
        assert_eq!(
            Command::parse_for(Screen::Landing, "Artisanal ice cube subscription"),
            None
        );
        assert_eq!(Command::parse_for(Screen::Landing, "invert"), None);
    }

    #[test]
    fn test_roadmap_toggles() {
        assert_eq!(
            Command::parse_for(Screen::Roadmap, "m1, f2 o3"),
            Some(Command::Toggle(vec![
                "m1".to_string(),
                "f2".to_string(),
                "o3".to_string()
            ]))
        );
        assert_eq!(
            Command::parse_for(Screen::Roadmap, "toggle m1"),
            Some(Command::Toggle(vec!["m1".to_string()]))
        );
        assert_eq!(
            Command::parse_for(Screen::Roadmap, "toggle1 toggletoggle"),
            Some(Command::Toggle(vec![
                "toggle1".to_string(),
                "toggletoggle".to_string()
            ]))
        );
        assert_eq!(
            Command::parse_for(Screen::Roadmap, "Toggle\tm2,o1"),
            Some(Command::Toggle(vec!["m2".to_string(), "o1".to_string()]))
        );
        assert_eq!(Command::parse_for(Screen::Roadmap, "INVERT"), Some(Command::Invert));
        assert_eq!(Command::parse_for(Screen::Roadmap, "   "), None);
    }

    #[test]
    fn test_screen_keywords() {
        assert_eq!(Command::parse_for(Screen::Autopsy, "back"), Some(Command::Back));
        assert_eq!(Command::parse_for(Screen::Roadmap, "back"), Some(Command::Toggle(vec!["back".to_string()])));
        assert_eq!(Command::parse_for(Screen::Inversion, "restart"), Some(Command::Restart));
        assert_eq!(Command::parse_for(Screen::Autopsy, "invert"), None);
    }
}
