//! The activation loop.
//!
//! A [`GameSession`] owns the world state, the turn scheduler, the message
//! log, and the injected RNG, and drives actor activations in due-tick
//! order. Control comes back to the caller whenever the player is due: the
//! input collaborator resolves one player action through the same resolver,
//! and the loop resumes.

use game_core::{
    Action, ActionError, ActionOutcome, AiDecision, EntityId, GameConfig, GameRng, GameState,
    EntitiesState, MessageLog, MessageTone, Tick, TurnContext, TurnScheduler,
};
use game_content::ActorTemplate;

use crate::error::EngineError;
use crate::generator::FloorGenerator;
use crate::save::SaveGame;

/// Why the activation loop returned control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopSignal {
    /// The player is due; supply an action via
    /// [`GameSession::perform_player_action`].
    AwaitingPlayer,
    /// The player is dead. The loop will not advance again.
    GameOver,
}

/// Outcome of submitting a player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerActionResult {
    /// The action resolved; time passed and the player was re-queued.
    Acted,
    /// The action was impossible: the reason was logged, no state changed,
    /// and the player is still due. Ask for input again.
    Refused,
}

pub struct GameSession {
    state: GameState,
    scheduler: TurnScheduler,
    log: MessageLog,
    config: GameConfig,
    rng: GameRng,
    generator: Box<dyn FloorGenerator>,
    depth: u32,
    awaiting_player: bool,
}

impl GameSession {
    /// Builds a session on the generator's first floor, with the player and
    /// every spawned NPC scheduled at tick 0 in encounter order.
    pub fn new(
        config: GameConfig,
        seed: u64,
        player: &ActorTemplate,
        mut generator: Box<dyn FloorGenerator>,
    ) -> Self {
        let mut rng = GameRng::seeded(seed);
        let floor = generator.generate(1, &mut rng);
        let mut entities = EntitiesState::new(player.build(EntityId::PLAYER, floor.player_start));
        let mut actors = vec![EntityId::PLAYER];
        for (template, position) in &floor.npcs {
            actors.push(template.spawn(&mut entities, *position));
        }
        for (template, position) in &floor.items {
            template.spawn_at(&mut entities, *position);
        }

        Self {
            state: GameState::new(floor.grid, entities),
            scheduler: TurnScheduler::new(actors),
            log: MessageLog::new(),
            config,
            rng,
            generator,
            depth: 1,
            awaiting_player: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Visibility and terrain mutators live on the grid; the FOV and
    /// world-generation collaborators reach it through here.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn current_tick(&self) -> Tick {
        self.scheduler.current_tick()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Runs NPC activations until the player is due or dead.
    ///
    /// Dead actors popped from the queue are discarded without being
    /// re-pushed; an AI action that resolves as impossible forfeits the turn
    /// for the fallback delay instead of stalling the schedule.
    pub fn run_until_player(&mut self) -> Result<LoopSignal, EngineError> {
        loop {
            if !self.state.entities.player().is_alive() {
                return Ok(LoopSignal::GameOver);
            }
            if self.awaiting_player {
                return Ok(LoopSignal::AwaitingPlayer);
            }

            let actor_id = self.scheduler.pop()?;
            if actor_id.is_player() {
                self.awaiting_player = true;
                return Ok(LoopSignal::AwaitingPlayer);
            }

            let Some(actor) = self.state.entities.actor_mut(actor_id) else {
                tracing::warn!(actor = %actor_id, "scheduled actor missing from the arena");
                continue;
            };
            let Some(mut behavior) = actor.behavior.take() else {
                tracing::debug!(actor = %actor_id, "dead actor leaves the schedule");
                continue;
            };

            let decision = {
                let mut ctx = TurnContext {
                    log: &mut self.log,
                    rng: &mut self.rng,
                    config: &self.config,
                };
                behavior.decide(actor_id, &self.state, &mut ctx)
            };

            match decision {
                AiDecision::Restore(previous) => {
                    if let Some(actor) = self.state.entities.actor_mut(actor_id) {
                        actor.behavior = Some(*previous);
                    }
                    self.scheduler.push(actor_id, 0);
                }
                AiDecision::Act(action) => {
                    if let Some(actor) = self.state.entities.actor_mut(actor_id) {
                        actor.behavior = Some(behavior);
                    }
                    let result = {
                        let mut ctx = TurnContext {
                            log: &mut self.log,
                            rng: &mut self.rng,
                            config: &self.config,
                        };
                        action.resolve(actor_id, &mut self.state, &mut ctx)
                    };
                    match result {
                        Ok(resolution) => self.scheduler.push(actor_id, resolution.delay),
                        Err(ActionError::Impossible(reason)) => {
                            tracing::debug!(
                                actor = %actor_id,
                                %reason,
                                "AI action came up impossible; turn forfeited"
                            );
                            self.scheduler.push(actor_id, GameConfig::FALLBACK_DELAY);
                        }
                        Err(error) => return Err(EngineError::Action(error)),
                    }
                }
            }
        }
    }

    /// Resolves one player action supplied by the input collaborator.
    ///
    /// An impossible action logs its reason and leaves the player due, so
    /// the caller re-prompts without any time passing.
    pub fn perform_player_action(
        &mut self,
        action: Action,
    ) -> Result<PlayerActionResult, EngineError> {
        if !self.awaiting_player {
            return Err(EngineError::NotAwaitingInput);
        }

        let result = {
            let mut ctx = TurnContext {
                log: &mut self.log,
                rng: &mut self.rng,
                config: &self.config,
            };
            action.resolve(EntityId::PLAYER, &mut self.state, &mut ctx)
        };

        match result {
            Ok(resolution) => {
                self.awaiting_player = false;
                if resolution.outcome == ActionOutcome::Descended {
                    self.descend();
                } else {
                    self.scheduler.push(EntityId::PLAYER, resolution.delay);
                }
                Ok(PlayerActionResult::Acted)
            }
            Err(ActionError::Impossible(message)) => {
                self.log.add(message, MessageTone::Impossible);
                Ok(PlayerActionResult::Refused)
            }
            Err(error) => Err(EngineError::Action(error)),
        }
    }

    /// Regenerates the floor below and reschedules everyone on it.
    fn descend(&mut self) {
        self.depth += 1;
        let floor = self.generator.generate(self.depth, &mut self.rng);
        tracing::debug!(depth = self.depth, "regenerating floor");

        self.state.entities.clear_floor();
        self.state.entities.player_mut().position = floor.player_start;
        self.state.grid = floor.grid;

        let mut actors = vec![EntityId::PLAYER];
        for (template, position) in &floor.npcs {
            actors.push(template.spawn(&mut self.state.entities, *position));
        }
        for (template, position) in &floor.items {
            template.spawn_at(&mut self.state.entities, *position);
        }
        self.scheduler = TurnScheduler::new(actors);
    }

    /// Clones the persistable parts of the session.
    pub fn snapshot(&self) -> SaveGame {
        SaveGame {
            state: self.state.clone(),
            scheduler: self.scheduler.clone(),
            log: self.log.clone(),
            config: self.config.clone(),
            depth: self.depth,
            awaiting_player: self.awaiting_player,
        }
    }

    /// Rebuilds a session from a snapshot. The RNG stream is not part of a
    /// save; the caller seeds a fresh one.
    pub fn restore(save: SaveGame, seed: u64, generator: Box<dyn FloorGenerator>) -> Self {
        Self {
            state: save.state,
            scheduler: save.scheduler,
            log: save.log,
            config: save.config,
            rng: GameRng::seeded(seed),
            generator,
            depth: save.depth,
            awaiting_player: save.awaiting_player,
        }
    }
}
