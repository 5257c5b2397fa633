// Interaction controller
//
// Owns the session state and the two collaborators. Each public operation
// feeds an action through `reduce`, runs the resulting effect (if any) and
// feeds the outcome back in. Only one remote call can be outstanding because
// the reducer refuses triggers while a transient screen is showing.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::state::{InteractionState, Screen};
use super::transition::{reduce, Action, Effect, Rejected};
use crate::providers::{DecisionInverter, RoadmapGenerator};

pub struct Controller {
    state: InteractionState,
    generator: Arc<dyn RoadmapGenerator>,
    inverter: Arc<dyn DecisionInverter>,
    screen_tx: watch::Sender<Screen>,
}

impl Controller {
    pub fn new(generator: Arc<dyn RoadmapGenerator>, inverter: Arc<dyn DecisionInverter>) -> Self {
        let (screen_tx, _) = watch::channel(Screen::default());
        Self {
            state: InteractionState::new(),
            generator,
            inverter,
            screen_tx,
        }
    }

    /// Use one provider for both calls
    pub fn with_provider<P>(provider: Arc<P>) -> Self
    where
        P: RoadmapGenerator + DecisionInverter + 'static,
    {
        Self::new(provider.clone(), provider)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Screen changes, including the transient ones a caller awaiting an
    /// operation would otherwise never see
    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.screen_tx.subscribe()
    }

    pub async fn submit_idea(
        &mut self,
        text: &str,
        doom_level: i64,
    ) -> Result<&InteractionState, Rejected> {
        self.dispatch(Action::SubmitIdea {
            text: text.to_string(),
            doom_level,
        })
        .await
    }

    pub async fn toggle_selection(&mut self, item_id: &str) -> Result<&InteractionState, Rejected> {
        self.dispatch(Action::ToggleSelection(item_id.to_string()))
            .await
    }

    pub async fn view_autopsy(&mut self) -> Result<&InteractionState, Rejected> {
        self.dispatch(Action::ViewAutopsy).await
    }

    pub async fn return_to_roadmap(&mut self) -> Result<&InteractionState, Rejected> {
        self.dispatch(Action::ReturnToRoadmap).await
    }

    pub async fn invert_selections(&mut self) -> Result<&InteractionState, Rejected> {
        self.dispatch(Action::InvertSelections).await
    }

    pub async fn restart(&mut self) -> Result<&InteractionState, Rejected> {
        self.dispatch(Action::Restart).await
    }

    pub async fn dismiss_error(&mut self) -> Result<&InteractionState, Rejected> {
        self.dispatch(Action::DismissError).await
    }

    /// Apply an action and drive any remote call it starts to completion
    async fn dispatch(&mut self, action: Action) -> Result<&InteractionState, Rejected> {
        if let Some(effect) = self.apply(action)? {
            let completion = self.run(effect).await;
            self.apply(completion)?;
        }
        Ok(&self.state)
    }

    fn apply(&mut self, action: Action) -> Result<Option<Effect>, Rejected> {
        let name = action.name();
        let transition = reduce(&self.state, action).inspect_err(|rejected| {
            debug!("Rejected {} on {}: {}", name, self.state.screen, rejected);
        })?;

        let from = self.state.screen;
        self.state = transition.state;
        if from != self.state.screen {
            info!("Screen {} -> {} ({})", from, self.state.screen, name);
            self.screen_tx.send_replace(self.state.screen);
        }
        Ok(transition.effect)
    }

    async fn run(&self, effect: Effect) -> Action {
        match effect {
            Effect::GenerateRoadmap { idea, doom_level } => {
                match self.generator.generate_roadmap(&idea, doom_level).await {
                    Ok(roadmap) => {
                        debug!(
                            "Roadmap ready: {} items, doom score {}",
                            roadmap.item_count(),
                            roadmap.doom_score
                        );
                        Action::RoadmapReady(roadmap)
                    }
                    Err(e) => {
                        warn!("Roadmap generation failed: {}", e);
                        Action::RoadmapFailed
                    }
                }
            }
            Effect::InvertDecisions { items } => {
                match self.inverter.invert_decisions(&items).await {
                    Ok(pairs) => {
                        debug!("Inversion ready: {} rules from {} items", pairs.len(), items.len());
                        Action::InversionReady(pairs)
                    }
                    Err(e) => {
                        warn!("Decision inversion failed: {}", e);
                        Action::InversionFailed
                    }
                }
            }
        }
    }
}
