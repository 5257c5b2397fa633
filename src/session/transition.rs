// Pure transition function for the interaction state machine
//
// `reduce` maps (state, action) to a new state plus at most one effect for
// the caller to run. Remote results come back in as actions, so every edge
// of the state machine can be exercised without a provider or a terminal.

use thiserror::Error;

use super::state::{InteractionState, Screen};
use crate::config::constants::{
    FALLBACK_WORKING_SET, INVERSION_FAILURE_MESSAGE, MAX_DOOM_LEVEL, MIN_DOOM_LEVEL,
    ROADMAP_FAILURE_MESSAGE,
};
use crate::roadmap::{DecisionBrief, DoomLevel, FailureItem, InversionPair, RoadmapResult};

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SubmitIdea { text: String, doom_level: i64 },
    ToggleSelection(String),
    ViewAutopsy,
    ReturnToRoadmap,
    InvertSelections,
    Restart,
    DismissError,
    RoadmapReady(RoadmapResult),
    RoadmapFailed,
    InversionReady(Vec<InversionPair>),
    InversionFailed,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SubmitIdea { .. } => "submit_idea",
            Action::ToggleSelection(_) => "toggle_selection",
            Action::ViewAutopsy => "view_autopsy",
            Action::ReturnToRoadmap => "return_to_roadmap",
            Action::InvertSelections => "invert_selections",
            Action::Restart => "restart",
            Action::DismissError => "dismiss_error",
            Action::RoadmapReady(_) => "roadmap_ready",
            Action::RoadmapFailed => "roadmap_failed",
            Action::InversionReady(_) => "inversion_ready",
            Action::InversionFailed => "inversion_failed",
        }
    }

    /// Outcome of a remote call rather than a user trigger
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Action::RoadmapReady(_)
                | Action::RoadmapFailed
                | Action::InversionReady(_)
                | Action::InversionFailed
        )
    }

    /// Completions are the only actions accepted on a transient screen, and
    /// only on the one waiting for them
    fn completes(&self, screen: Screen) -> bool {
        match self {
            Action::RoadmapReady(_) | Action::RoadmapFailed => screen == Screen::Simulating,
            Action::InversionReady(_) | Action::InversionFailed => screen == Screen::Inverting,
            _ => false,
        }
    }
}

/// Remote work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    GenerateRoadmap { idea: String, doom_level: DoomLevel },
    InvertDecisions { items: Vec<DecisionBrief> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: InteractionState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: InteractionState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Why an action was refused; the prior state is left untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("still {0}; wait for the current request to finish")]
    Busy(Screen),

    #[error("{action} is not available on the {screen} screen")]
    WrongScreen {
        action: &'static str,
        screen: Screen,
    },

    #[error("describe an idea first")]
    BlankIdea,

    #[error("doom level must be between {} and {}, got {0}", MIN_DOOM_LEVEL, MAX_DOOM_LEVEL)]
    DoomOutOfRange(i64),

    #[error("the roadmap has no failure points to invert")]
    NothingToInvert,
}

/// Apply one action to a state
pub fn reduce(state: &InteractionState, action: Action) -> Result<Transition, Rejected> {
    if state.is_busy() && action != Action::DismissError && !action.completes(state.screen) {
        return Err(Rejected::Busy(state.screen));
    }

    let wrong_screen = Rejected::WrongScreen {
        action: action.name(),
        screen: state.screen,
    };

    if action.is_completion() && !action.completes(state.screen) {
        return Err(wrong_screen);
    }

    match action {
        Action::DismissError => {
            let mut next = state.clone();
            next.error = None;
            Ok(Transition::to(next))
        }

        Action::SubmitIdea { text, doom_level } => {
            if state.screen != Screen::Landing {
                return Err(wrong_screen);
            }
            let idea = text.trim();
            if idea.is_empty() {
                return Err(Rejected::BlankIdea);
            }
            let doom_level =
                DoomLevel::new(doom_level).ok_or(Rejected::DoomOutOfRange(doom_level))?;

            let mut next = state.clone();
            next.screen = Screen::Simulating;
            next.idea = idea.to_string();
            next.doom_level = doom_level;
            next.error = None;
            Ok(Transition {
                state: next,
                effect: Some(Effect::GenerateRoadmap {
                    idea: idea.to_string(),
                    doom_level,
                }),
            })
        }

        Action::RoadmapReady(roadmap) => {
            let mut next = state.clone();
            next.screen = Screen::Roadmap;
            next.roadmap = Some(roadmap);
            next.selected = Default::default();
            next.inversion = None;
            Ok(Transition::to(next))
        }

        Action::RoadmapFailed => {
            let mut next = state.clone();
            next.screen = Screen::Landing;
            next.roadmap = None;
            next.selected = Default::default();
            next.inversion = None;
            next.error = Some(ROADMAP_FAILURE_MESSAGE.to_string());
            Ok(Transition::to(next))
        }

        Action::ToggleSelection(id) => {
            if state.screen != Screen::Roadmap {
                return Err(wrong_screen);
            }
            let mut next = state.clone();
            let known = state
                .roadmap
                .as_ref()
                .is_some_and(|roadmap| roadmap.contains_item(&id));
            if !known {
                tracing::debug!("Ignoring toggle for unknown item '{}'", id);
            } else if next.selected.contains(&id) {
                next.selected = next.selected.without(&id);
            } else {
                next.selected = next.selected.update(id);
            }
            Ok(Transition::to(next))
        }

        Action::ViewAutopsy => {
            if state.screen != Screen::Roadmap {
                return Err(wrong_screen);
            }
            let mut next = state.clone();
            next.screen = Screen::Autopsy;
            Ok(Transition::to(next))
        }

        Action::ReturnToRoadmap => {
            if state.screen != Screen::Autopsy {
                return Err(wrong_screen);
            }
            let mut next = state.clone();
            next.screen = Screen::Roadmap;
            Ok(Transition::to(next))
        }

        Action::InvertSelections => {
            if state.screen != Screen::Roadmap {
                return Err(wrong_screen);
            }
            let items: Vec<DecisionBrief> = match state.roadmap.as_ref() {
                Some(roadmap) => working_set(roadmap, state)
                    .into_iter()
                    .map(FailureItem::brief)
                    .collect(),
                None => Vec::new(),
            };
            if items.is_empty() {
                return Err(Rejected::NothingToInvert);
            }

            let mut next = state.clone();
            next.screen = Screen::Inverting;
            next.error = None;
            Ok(Transition {
                state: next,
                effect: Some(Effect::InvertDecisions { items }),
            })
        }

        Action::InversionReady(pairs) => {
            let mut next = state.clone();
            next.screen = Screen::Inversion;
            next.inversion = Some(pairs);
            next.inverted = true;
            Ok(Transition::to(next))
        }

        Action::InversionFailed => {
            let mut next = state.clone();
            next.screen = Screen::Roadmap;
            next.error = Some(INVERSION_FAILURE_MESSAGE.to_string());
            Ok(Transition::to(next))
        }

        Action::Restart => Ok(Transition::to(InteractionState::default())),
    }
}

/// Items to invert: the selection in category order, or the first few items
/// when nothing is selected (all of them if the roadmap is shorter)
pub fn working_set<'a>(roadmap: &'a RoadmapResult, state: &InteractionState) -> Vec<&'a FailureItem> {
    if state.selected.is_empty() {
        roadmap.items().take(FALLBACK_WORKING_SET).collect()
    } else {
        roadmap
            .items()
            .filter(|item| state.selected.contains(&item.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::{Annotation, Obituary, Severity};

    fn item(id: &str, annotation: Annotation) -> FailureItem {
        FailureItem {
            id: id.to_string(),
            title: format!("{} title", id),
            description: format!("{} description", id),
            annotation,
        }
    }

    fn roadmap() -> RoadmapResult {
        RoadmapResult {
            concept_summary: "Ice cubes by subscription".to_string(),
            doom_score: 88,
            market: vec![
                item("m1", Annotation::Severity(Severity::Killer)),
                item("m2", Annotation::Severity(Severity::Minor)),
            ],
            financial: vec![item("f1", Annotation::Burn("$1.2M".to_string()))],
            operational: vec![
                item("o1", Annotation::TimeCost("9 months".to_string())),
                item("o2", Annotation::TimeCost("3 weeks".to_string())),
            ],
            obituary: Obituary {
                headline: "Startup Melts".to_string(),
                short_form_summary: "Turns out people own freezers.".to_string(),
            },
        }
    }

    fn on_roadmap() -> InteractionState {
        let submitted = reduce(
            &InteractionState::new(),
            Action::SubmitIdea {
                text: "Artisanal ice cube subscription".to_string(),
                doom_level: 8,
            },
        )
        .unwrap();
        reduce(&submitted.state, Action::RoadmapReady(roadmap()))
            .unwrap()
            .state
    }

    fn apply(state: &InteractionState, action: Action) -> InteractionState {
        reduce(state, action).unwrap().state
    }

    #[test]
    fn test_submit_moves_to_simulating_and_requests_roadmap() {
        let t = reduce(
            &InteractionState::new(),
            Action::SubmitIdea {
                text: "  Artisanal ice cube subscription ".to_string(),
                doom_level: 8,
            },
        )
        .unwrap();
        assert_eq!(t.state.screen, Screen::Simulating);
        assert_eq!(t.state.idea, "Artisanal ice cube subscription");
        assert_eq!(
            t.effect,
            Some(Effect::GenerateRoadmap {
                idea: "Artisanal ice cube subscription".to_string(),
                doom_level: DoomLevel::new(8).unwrap(),
            })
        );
    }

    #[test]
    fn test_submit_validates_input() {
        let state = InteractionState::new();
        let blank = reduce(
            &state,
            Action::SubmitIdea {
                text: "   ".to_string(),
                doom_level: 5,
            },
        );
        assert_eq!(blank, Err(Rejected::BlankIdea));

        let too_doomed = reduce(
            &state,
            Action::SubmitIdea {
                text: "Idea".to_string(),
                doom_level: 11,
            },
        );
        assert_eq!(too_doomed, Err(Rejected::DoomOutOfRange(11)));
    }

    #[test]
    fn test_transient_screens_reject_triggers() {
        let simulating = reduce(
            &InteractionState::new(),
            Action::SubmitIdea {
                text: "Idea".to_string(),
                doom_level: 5,
            },
        )
        .unwrap()
        .state;

        for action in [
            Action::SubmitIdea {
                text: "Another".to_string(),
                doom_level: 5,
            },
            Action::Restart,
            Action::ViewAutopsy,
            Action::InvertSelections,
            Action::InversionFailed,
        ] {
            assert_eq!(
                reduce(&simulating, action),
                Err(Rejected::Busy(Screen::Simulating))
            );
        }

        let inverting = apply(&on_roadmap(), Action::InvertSelections);
        assert_eq!(inverting.screen, Screen::Inverting);
        assert_eq!(
            reduce(&inverting, Action::RoadmapFailed),
            Err(Rejected::Busy(Screen::Inverting))
        );
        assert_eq!(
            reduce(&inverting, Action::ToggleSelection("m1".to_string())),
            Err(Rejected::Busy(Screen::Inverting))
        );
    }

    #[test]
    fn test_roadmap_failure_rolls_back_to_landing() {
        let simulating = reduce(
            &InteractionState::new(),
            Action::SubmitIdea {
                text: "Idea".to_string(),
                doom_level: 3,
            },
        )
        .unwrap()
        .state;
        let failed = apply(&simulating, Action::RoadmapFailed);
        assert_eq!(failed.screen, Screen::Landing);
        assert!(failed.roadmap.is_none());
        assert_eq!(failed.error.as_deref(), Some(ROADMAP_FAILURE_MESSAGE));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let state = on_roadmap();
        let once = apply(&state, Action::ToggleSelection("f1".to_string()));
        assert!(once.is_selected("f1"));
        let twice = apply(&once, Action::ToggleSelection("f1".to_string()));
        assert_eq!(twice, state);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let state = on_roadmap();
        let next = apply(&state, Action::ToggleSelection("zz".to_string()));
        assert_eq!(next, state);
    }

    #[test]
    fn test_toggle_outside_roadmap_rejected() {
        let result = reduce(
            &InteractionState::new(),
            Action::ToggleSelection("m1".to_string()),
        );
        assert!(matches!(result, Err(Rejected::WrongScreen { .. })));
    }

    #[test]
    fn test_autopsy_round_trip_keeps_data() {
        let state = apply(&on_roadmap(), Action::ToggleSelection("o2".to_string()));
        let autopsy = apply(&state, Action::ViewAutopsy);
        assert_eq!(autopsy.screen, Screen::Autopsy);
        let back = apply(&autopsy, Action::ReturnToRoadmap);
        assert_eq!(back, state);
    }

    #[test]
    fn test_return_to_roadmap_only_from_autopsy() {
        let state = on_roadmap();
        assert!(reduce(&state, Action::ReturnToRoadmap).is_err());
    }

    #[test]
    fn test_invert_uses_selection_in_category_order() {
        let state = apply(&on_roadmap(), Action::ToggleSelection("o1".to_string()));
        let state = apply(&state, Action::ToggleSelection("m2".to_string()));
        let t = reduce(&state, Action::InvertSelections).unwrap();
        match t.effect {
            Some(Effect::InvertDecisions { items }) => {
                let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
                assert_eq!(titles, vec!["m2 title", "o1 title"]);
            }
            other => panic!("Expected InvertDecisions, got {:?}", other),
        }
    }

    #[test]
    fn test_invert_falls_back_to_first_three() {
        let t = reduce(&on_roadmap(), Action::InvertSelections).unwrap();
        match t.effect {
            Some(Effect::InvertDecisions { items }) => {
                let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
                assert_eq!(titles, vec!["m1 title", "m2 title", "f1 title"]);
            }
            other => panic!("Expected InvertDecisions, got {:?}", other),
        }
    }

    #[test]
    fn test_invert_short_roadmap_uses_everything() {
        let mut short = roadmap();
        short.market.truncate(1);
        short.operational.clear();
        let mut state = on_roadmap();
        state.roadmap = Some(short);
        let t = reduce(&state, Action::InvertSelections).unwrap();
        match t.effect {
            Some(Effect::InvertDecisions { items }) => assert_eq!(items.len(), 2),
            other => panic!("Expected InvertDecisions, got {:?}", other),
        }
    }

    #[test]
    fn test_invert_empty_roadmap_rejected() {
        let mut empty = roadmap();
        empty.market.clear();
        empty.financial.clear();
        empty.operational.clear();
        let mut state = on_roadmap();
        state.roadmap = Some(empty);
        assert_eq!(
            reduce(&state, Action::InvertSelections),
            Err(Rejected::NothingToInvert)
        );
    }

    #[test]
    fn test_inversion_failure_returns_to_roadmap() {
        let state = apply(&on_roadmap(), Action::ToggleSelection("m1".to_string()));
        let inverting = apply(&state, Action::InvertSelections);
        let failed = apply(&inverting, Action::InversionFailed);
        assert_eq!(failed.screen, Screen::Roadmap);
        assert_eq!(failed.roadmap, state.roadmap);
        assert_eq!(failed.selected, state.selected);
        assert!(failed.inversion.is_none());
        assert!(!failed.inverted);
        assert_eq!(failed.error.as_deref(), Some(INVERSION_FAILURE_MESSAGE));
    }

    #[test]
    fn test_inversion_success_is_terminal() {
        let inverting = apply(&on_roadmap(), Action::InvertSelections);
        let pairs = vec![InversionPair {
            bad_decision: "Ship ice by mail".to_string(),
            strategic_rule: "Never ship anything that melts".to_string(),
        }];
        let done = apply(&inverting, Action::InversionReady(pairs.clone()));
        assert_eq!(done.screen, Screen::Inversion);
        assert_eq!(done.inversion, Some(pairs));
        assert!(done.inverted);

        assert!(reduce(&done, Action::ReturnToRoadmap).is_err());
        assert!(reduce(&done, Action::InvertSelections).is_err());
        assert_eq!(apply(&done, Action::Restart), InteractionState::default());
    }

    #[test]
    fn test_dismiss_error_allowed_anywhere() {
        let mut state = on_roadmap();
        state.error = Some("boom".to_string());
        let inverting = apply(&state, Action::InvertSelections);
        assert!(inverting.error.is_none());

        let mut busy = inverting.clone();
        busy.error = Some("stale".to_string());
        let dismissed = apply(&busy, Action::DismissError);
        assert_eq!(dismissed.screen, Screen::Inverting);
        assert!(dismissed.error.is_none());
    }

    #[test]
    fn test_completions_rejected_without_outstanding_call() {
        let completions = || {
            vec![
                Action::RoadmapReady(roadmap()),
                Action::RoadmapFailed,
                Action::InversionReady(Vec::new()),
                Action::InversionFailed,
            ]
        };

        let landing = InteractionState::new();
        let roadmap_screen = on_roadmap();
        let autopsy = apply(&roadmap_screen, Action::ViewAutopsy);
        let inversion = apply(
            &apply(&roadmap_screen, Action::InvertSelections),
            Action::InversionReady(Vec::new()),
        );

        for state in [&landing, &roadmap_screen, &autopsy, &inversion] {
            assert!(!state.is_busy());
            for action in completions() {
                let name = action.name();
                assert_eq!(
                    reduce(state, action),
                    Err(Rejected::WrongScreen {
                        action: name,
                        screen: state.screen,
                    }),
                    "{} on {}",
                    name,
                    state.screen
                );
            }
        }
    }
}
