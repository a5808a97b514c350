//! Host-facing game driver
//!
//! The host calls [`Game::tick`] once per animation frame with its frame
//! timestamp, forwards input through [`Game::push_input`], and reads positions
//! and counters back through the getters. Audio and visual collaborators
//! consume [`Game::drain_events`].

use crate::input::{InputEvent, InputState};
use crate::sim::{
    Aabb, CharacterId, Entity, GameEvent, GamePhase, JumpEdge, RunState, Scroller,
    SimulationClock, TickInput, World, tick,
};
use crate::tuning::Tuning;
use crate::dt_to_ms;

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    clock: SimulationClock,
    world: World,
    run: RunState,
    input: InputState,
    events: Vec<GameEvent>,
    focused: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl Game {
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        log::info!(
            "game created: viewport {}x{}, seed {:#x}",
            tuning.viewport_width,
            tuning.viewport_height,
            tuning.seed
        );
        Self {
            clock: SimulationClock::new(),
            run: RunState::new(&tuning),
            world: World::new(tuning),
            input: InputState::new(),
            events: Vec::new(),
            focused: true,
        }
    }

    // === Input ===

    /// Queue an input event for the next tick. Ignored while unfocused.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.focused {
            log::trace!("input {:?} dropped while paused", event);
            return;
        }
        self.input.push(event);
    }

    pub fn jump_pressed(&mut self) {
        self.push_input(InputEvent::JumpPressed);
    }

    pub fn jump_released(&mut self) {
        self.push_input(InputEvent::JumpReleased);
    }

    /// Window focus changed. Losing focus freezes the simulation; on return
    /// the first frame only re-establishes the timing baseline.
    pub fn set_focus(&mut self, focused: bool) {
        if focused == self.focused {
            return;
        }
        self.focused = focused;
        if focused {
            self.clock.resume();
            log::info!("focus regained, resuming");
        } else {
            self.clock.suspend();
            self.input.clear();
            log::info!("auto-paused (focus lost)");
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // === Menu / economy ===

    pub fn select_character(&mut self, id: CharacterId) -> bool {
        self.run.select_character(id)
    }

    /// Buy a character at its configured price
    pub fn unlock_character(&mut self, id: CharacterId) -> bool {
        let price = self.world.tuning.prices.price(id);
        self.run.unlock(id, price)
    }

    /// Overwrite the coin balance (external shop flows)
    pub fn set_coins(&mut self, coins: u64) {
        self.run.set_coins(coins);
    }

    // === Frame ===

    /// Advance one animation frame. Does nothing while unfocused.
    pub fn tick(&mut self, timestamp_ms: f64) {
        if !self.focused {
            return;
        }

        let mut tick_input = TickInput::default();

        for event in self.input.drain() {
            let from = self.run.phase;
            let changed = match event {
                InputEvent::JumpPressed => {
                    tick_input.jump.push(JumpEdge::Pressed);
                    false
                }
                InputEvent::JumpReleased => {
                    tick_input.jump.push(JumpEdge::Released);
                    false
                }
                InputEvent::StartRequested => self.run.start(),
                InputEvent::RestartRequested => self.run.restart(),
                InputEvent::MainMenuRequested => self.run.main_menu(),
            };
            if changed {
                if self.run.phase == GamePhase::Playing {
                    self.world.reset();
                    // Edges seen before the run began belong to the old state
                    tick_input.jump.clear();
                }
                self.phase_changed(from);
            }
        }

        let dt = self.clock.tick(timestamp_ms);

        match self.run.phase {
            GamePhase::Playing => {
                tick(&mut self.world, &mut self.run, &tick_input, dt, &mut self.events);
                if self.run.phase != GamePhase::Playing {
                    self.phase_changed(GamePhase::Playing);
                }
            }
            GamePhase::GameOver => self.run.advance_countdown(dt_to_ms(dt)),
            GamePhase::Menu => {}
        }
    }

    fn phase_changed(&mut self, from: GamePhase) {
        let to = self.run.phase;
        self.clock.reset();
        self.events.push(GameEvent::PhaseChanged { from, to });
        log::info!("phase {:?} -> {:?}", from, to);
    }

    /// Take the notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Read-only views ===

    pub fn phase(&self) -> GamePhase {
        self.run.phase
    }

    pub fn score(&self) -> u64 {
        self.run.score
    }

    pub fn coins(&self) -> u64 {
        self.run.coins()
    }

    pub fn character_y(&self) -> f64 {
        self.world.body.y
    }

    pub fn character_box(&self) -> Aabb {
        self.world.character_box()
    }

    /// Coins currently on screen
    pub fn coin_entities(&self) -> &[Entity] {
        &self.world.coins
    }

    pub fn obstacles(&self) -> &[Entity] {
        &self.world.obstacles
    }

    pub fn scroller(&self) -> &Scroller {
        &self.world.scroller
    }

    /// Seconds of restart lockout left (0 outside GameOver)
    pub fn countdown_secs(&self) -> f64 {
        self.run.countdown_ms / 1000.0
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.world.tuning
    }

    /// Scripted setups (demos, tests) that need to place entities directly
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
