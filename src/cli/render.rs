// Text rendering of each screen
//
// Every function returns a String so screens can be checked without a
// terminal. Colours switch to the light palette once the session is inverted.

use crossterm::style::{Color, Stylize};
use std::fmt::Write;

use crate::roadmap::{Annotation, Category, FailureItem};
use crate::session::{InteractionState, Screen};

const RULE_WIDTH: usize = 60;

struct Palette {
    accent: Color,
    danger: Color,
    muted: Color,
}

impl Palette {
    fn for_state(state: &InteractionState) -> Self {
        if state.inverted {
            Self {
                accent: Color::Blue,
                danger: Color::DarkBlue,
                muted: Color::Grey,
            }
        } else {
            Self {
                accent: Color::Yellow,
                danger: Color::Red,
                muted: Color::DarkGrey,
            }
        }
    }
}

fn rule(palette: &Palette) -> String {
    "─".repeat(RULE_WIDTH).with(palette.muted).to_string()
}

/// Render whatever screen the state is on, with header and error slot
pub fn render(state: &InteractionState) -> String {
    let mut out = String::new();
    if let Some(header) = render_header(state) {
        out.push_str(&header);
        out.push('\n');
    }
    let body = match state.screen {
        Screen::Landing => render_landing(state),
        Screen::Simulating | Screen::Inverting => render_transient(state.screen),
        Screen::Roadmap => render_roadmap(state),
        Screen::Autopsy => render_autopsy(state),
        Screen::Inversion => render_inversion(state),
    };
    out.push_str(&body);
    if let Some(error) = render_error(state) {
        out.push('\n');
        out.push_str(&error);
    }
    out
}

/// Version tag, hidden once inverted
pub fn render_header(state: &InteractionState) -> Option<String> {
    if state.inverted {
        return None;
    }
    let tag = format!("[PRE-MORTEM v{}]", env!("CARGO_PKG_VERSION"));
    Some(tag.with(Color::Yellow).to_string())
}

pub fn render_error(state: &InteractionState) -> Option<String> {
    state.error.as_ref().map(|message| {
        format!(
            "{} {}  {}",
            "ERROR:".red().bold(),
            message,
            "(/dismiss to clear)".dark_grey()
        )
    })
}

pub fn render_landing(state: &InteractionState) -> String {
    let palette = Palette::for_state(state);
    let mut out = String::new();
    let _ = writeln!(out, "{}", "THE PRE-MORTEM ENGINE".with(palette.accent).bold());
    let _ = writeln!(
        out,
        "{} {}",
        "SYSTEM STATUS:".with(palette.muted),
        "OPERATIONAL".green()
    );
    let _ = writeln!(
        out,
        "{}",
        "OBJECTIVE: IDENTIFY CRITICAL FAILURE PATHS THROUGH STRATEGIC INVERSION."
            .with(palette.muted)
    );
    let _ = writeln!(out, "{}", rule(&palette));
    let _ = write!(
        out,
        "DOOM MAGNITUDE {} {}",
        state.doom_level.to_string().with(palette.accent),
        state.doom_level.label().to_uppercase().with(palette.danger)
    );
    out
}

/// Banner for the two waiting screens
pub fn render_transient(screen: Screen) -> String {
    match screen {
        Screen::Inverting => format!(
            "{}\n{}",
            "INVERTING THE PROBLEM...".blue().bold(),
            "TURNING DESTRUCTION INTO DEFENSE".grey()
        ),
        _ => format!(
            "{}\n{}",
            "RUNNING FAILURE SCENARIOS...".yellow().bold(),
            "CALCULATING BURN RATES | ANALYZING MARKET VOIDS | SIMULATING COLLAPSE".dark_grey()
        ),
    }
}

fn annotation_text(item: &FailureItem) -> String {
    match &item.annotation {
        Annotation::Severity(severity) => format!("SEVERITY: {}", severity.as_str().to_uppercase()),
        Annotation::Burn(burn) => burn.clone(),
        Annotation::TimeCost(time) => time.clone(),
    }
}

fn render_card(out: &mut String, item: &FailureItem, selected: bool, palette: &Palette) {
    let marker = if selected { "[x]" } else { "[ ]" };
    let title = item.title.to_uppercase();
    let title = if selected {
        title.black().on(palette.accent).bold().to_string()
    } else {
        title.with(palette.accent).bold().to_string()
    };
    let _ = writeln!(
        out,
        "  {} {:<4} {} {}",
        marker,
        item.id,
        item.category().tag().with(palette.muted),
        title
    );
    let _ = writeln!(out, "        {}", item.description);
    let _ = writeln!(out, "        {}", annotation_text(item).with(palette.muted).italic());
}

pub fn render_roadmap(state: &InteractionState) -> String {
    let palette = Palette::for_state(state);
    let mut out = String::new();
    let Some(roadmap) = state.roadmap.as_ref() else {
        return out;
    };

    let _ = writeln!(out, "{}", "THE FAILURE ROADMAP".with(palette.accent));
    let _ = writeln!(out, "{}", state.idea.to_uppercase().bold());
    let _ = writeln!(out, "{}", roadmap.concept_summary.as_str().with(palette.muted));
    let _ = writeln!(
        out,
        "DOOM SCORE {}  {}",
        format!("{}%", roadmap.doom_score).with(palette.danger).bold(),
        format!(
            "MAGNITUDE {} {}",
            state.doom_level,
            state.doom_level.label().to_uppercase()
        )
        .with(palette.muted)
    );

    for (index, category) in Category::ALL.into_iter().enumerate() {
        let _ = writeln!(out, "{}", rule(&palette));
        let _ = writeln!(
            out,
            "{} {}",
            format!("{:02}.", index + 1).with(palette.accent),
            category.heading().bold()
        );
        for item in roadmap.items_in(category) {
            render_card(&mut out, item, state.is_selected(&item.id), &palette);
        }
    }

    let _ = writeln!(out, "{}", rule(&palette));
    let _ = writeln!(
        out,
        "{}",
        "CRITICAL PHASE: SELECTION REQUIRED".with(palette.danger).bold()
    );
    let _ = write!(
        out,
        "Select the decisions that tempt you most ({} selected), then `invert`. `autopsy` reads the obituary.",
        state.selected.len()
    );
    out
}

pub fn render_autopsy(state: &InteractionState) -> String {
    let palette = Palette::for_state(state);
    let mut out = String::new();
    let Some(roadmap) = state.roadmap.as_ref() else {
        return out;
    };

    let _ = writeln!(out, "{}", "POST-MORTEM RESULT".with(palette.muted));
    let _ = writeln!(
        out,
        "{}",
        format!("\"{}\"", roadmap.obituary.headline)
            .with(palette.danger)
            .bold()
            .italic()
    );
    let _ = writeln!(out, "{}", rule(&palette));
    let _ = writeln!(out, "{} BURN RATE", "100%".bold());
    let _ = writeln!(
        out,
        "{}",
        "ALL CAPITAL DEPLETED. ZERO PRODUCT-MARKET FIT. LOGISTICAL ENTROPY ACHIEVED."
            .with(palette.muted)
    );
    let _ = writeln!(out, "{}", rule(&palette));
    let _ = writeln!(out, "{}", "VIRAL RECAP".with(palette.muted));
    let _ = writeln!(out, "TechFuneral @techfuneral");
    let _ = writeln!(out, "\"{}\"", roadmap.obituary.short_form_summary);
    let _ = write!(out, "{}", "`back` returns to the roadmap.".with(palette.muted));
    out
}

pub fn render_inversion(state: &InteractionState) -> String {
    let palette = Palette::for_state(state);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        "THE ANTI-FRAGILE BLUEPRINT".with(palette.accent).bold()
    );
    let _ = writeln!(
        out,
        "{}",
        "WE TURNED YOUR DESTRUCTION INTO YOUR DEFENSE.".with(palette.muted)
    );

    for pair in state.inversion.iter().flatten() {
        let _ = writeln!(out, "{}", rule(&palette));
        let _ = writeln!(
            out,
            "{} {}",
            "THE TEMPTATION".red(),
            format!("\"{}\"", pair.bad_decision).crossed_out().with(palette.muted)
        );
        let _ = writeln!(
            out,
            "{} {}",
            "THE STRATEGIC RULE".with(palette.accent),
            pair.strategic_rule.as_str().bold()
        );
    }

    let _ = writeln!(out, "{}", rule(&palette));
    let _ = writeln!(out, "{}", "MISSION READY".with(palette.danger).bold());
    let _ = write!(
        out,
        "These rules are now your guardrails. `restart` starts a new simulation."
    );
    out
}
