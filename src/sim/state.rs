//! Run state machine and per-tick notifications
//!
//! `RunState` is the single owner of the phase, score and coin economy.
//! Transition methods return `false` for requests that are not valid in the
//! current phase; they never panic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Character select, waiting for start input
    Menu,
    /// Simulation active
    Playing,
    /// Simulation frozen, restart locked until the countdown ends
    GameOver,
}

/// Playable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    Ben,
    Gonzalo,
    Motun,
}

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Ben, CharacterId::Gonzalo, CharacterId::Motun];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Ben => "ben",
            CharacterId::Gonzalo => "gonzalo",
            CharacterId::Motun => "motun",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ben" => Some(CharacterId::Ben),
            "gonzalo" => Some(CharacterId::Gonzalo),
            "motun" => Some(CharacterId::Motun),
            _ => None,
        }
    }
}

/// One-shot notifications for audio/visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump fired
    Jump,
    /// Character touched down after a jump
    Land,
    /// A coin was picked up; carries the new total
    CoinCollected { coins: u64 },
    /// Score advanced this tick
    ScoreTick { score: u64 },
    /// Obstacle impact ended the run
    GameOver { score: u64, coins: u64 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub score: u64,
    /// In-run currency, persists across runs
    coins: u64,
    pub selected_character: CharacterId,
    pub unlocked_characters: BTreeSet<CharacterId>,
    /// Best score reached this session
    pub best_score: u64,
    /// Restart lockout remaining (GameOver only)
    pub countdown_ms: f64,
    score_accum_ms: f64,
    score_period_ms: f64,
    countdown_total_ms: f64,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            coins: 0,
            selected_character: CharacterId::Ben,
            unlocked_characters: BTreeSet::from([CharacterId::Ben]),
            best_score: 0,
            countdown_ms: 0.0,
            score_accum_ms: 0.0,
            score_period_ms: tuning.score_period_ms,
            countdown_total_ms: tuning.game_over_countdown_ms,
        }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Direct write access for the external unlock/shop flow
    pub fn set_coins(&mut self, coins: u64) {
        self.coins = coins;
    }

    pub fn add_coin(&mut self) -> u64 {
        self.coins += 1;
        self.coins
    }

    pub fn is_unlocked(&self, id: CharacterId) -> bool {
        self.unlocked_characters.contains(&id)
    }

    /// Pick the character for the next run (menu only)
    pub fn select_character(&mut self, id: CharacterId) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("select_character ignored in {:?}", self.phase);
            return false;
        }
        self.selected_character = id;
        true
    }

    /// Buy a character. Fails without side effects if unaffordable; buying an
    /// owned character is a successful no-op.
    pub fn unlock(&mut self, id: CharacterId, price: u64) -> bool {
        if self.is_unlocked(id) {
            return true;
        }
        if self.coins < price {
            log::debug!("cannot unlock {}: {} < {}", id.as_str(), self.coins, price);
            return false;
        }
        self.coins -= price;
        self.unlocked_characters.insert(id);
        log::info!("unlocked {} for {} coins", id.as_str(), price);
        true
    }

    /// Menu -> Playing, if the selected character is unlocked
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu || !self.is_unlocked(self.selected_character) {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.begin_run();
        true
    }

    /// Playing -> GameOver
    pub fn game_over(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.countdown_ms = self.countdown_total_ms;
        self.best_score = self.best_score.max(self.score);
        log::info!("game over: score={} coins={}", self.score, self.coins);
        true
    }

    /// Whether restart input is currently accepted
    pub fn can_restart(&self) -> bool {
        self.phase == GamePhase::GameOver && self.countdown_ms <= 0.0
    }

    /// GameOver -> Playing once the countdown has finished
    pub fn restart(&mut self) -> bool {
        if !self.can_restart() {
            log::debug!(
                "restart ignored ({:?}, {:.0}ms left)",
                self.phase,
                self.countdown_ms.max(0.0)
            );
            return false;
        }
        self.begin_run();
        true
    }

    /// GameOver -> Menu
    pub fn main_menu(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::Menu;
        self.score = 0;
        self.score_accum_ms = 0.0;
        self.countdown_ms = 0.0;
        true
    }

    fn begin_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.score_accum_ms = 0.0;
        self.countdown_ms = 0.0;
        log::info!("run started as {}", self.selected_character.as_str());
    }

    /// Accrue score from PLAYING time. Returns `true` if the score changed.
    pub fn advance_score(&mut self, dt_ms: f64) -> bool {
        if self.phase != GamePhase::Playing || self.score_period_ms <= 0.0 {
            return false;
        }
        self.score_accum_ms += dt_ms.max(0.0);
        let ticks = (self.score_accum_ms / self.score_period_ms).floor();
        if ticks < 1.0 {
            return false;
        }
        self.score_accum_ms -= ticks * self.score_period_ms;
        self.score += ticks as u64;
        true
    }

    /// Run down the restart lockout
    pub fn advance_countdown(&mut self, dt_ms: f64) {
        if self.phase == GamePhase::GameOver && self.countdown_ms > 0.0 {
            self.countdown_ms = (self.countdown_ms - dt_ms.max(0.0)).max(0.0);
        }
    }
}
