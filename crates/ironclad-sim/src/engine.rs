//! Match engine — the core of the game.
//!
//! `MatchEngine` owns the hecs ECS world, processes player commands, runs
//! all systems, and produces `MatchSnapshot`s. Completely headless,
//! enabling deterministic testing: same seed and command script, same
//! snapshots.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ironclad_core::commands::PlayerCommand;
use ironclad_core::components::{ActiveEffects, Health, PlayerInfo, Tank, Turret};
use ironclad_core::constants::{KILL_LIMIT, MATCH_START_DELAY_SECS, SELF_DESTRUCT_DELAY_SECS, TANK_MAX_SPEED};
use ironclad_core::enums::{GamePhase, Team};
use ironclad_core::events::GameEvent;
use ironclad_core::state::MatchSnapshot;
use ironclad_core::types::{SimTime, Velocity};

use ironclad_targeting::TargetLockTracker;

use crate::scheduler::{EventScheduler, ScheduledAction, ScheduledEvent};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new match.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

/// Running team kill tallies.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub team1_kills: u32,
    pub team2_kills: u32,
}

/// The match engine. Owns the ECS world and all match state.
pub struct MatchEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    next_player_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    scheduler: EventScheduler,
    events: Vec<GameEvent>,
    score: ScoreState,
}

impl MatchEngine {
    /// Create a new match engine with the given config. The arena is laid
    /// out immediately; tanks appear as players join.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::setup_arena(&mut world);

        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_player_id: 1,
            command_queue: VecDeque::new(),
            scheduler: EventScheduler::new(),
            events: Vec::new(),
            score: ScoreState::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();

        if matches!(self.phase, GamePhase::Starting | GamePhase::Active) {
            let due = self.scheduler.drain_due(self.time.tick);
            for event in due {
                self.apply_scheduled(event);
            }

            if self.phase == GamePhase::Active {
                self.run_systems();
                self.check_match_end();
            }

            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, events, &self.score)
    }

    /// Get the current match phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Spawn a tank directly at a position, bypassing the spawn-point flow
    /// (for tests that need exact geometry).
    #[cfg(test)]
    pub fn spawn_test_tank(
        &mut self,
        name: &str,
        team: Team,
        position: ironclad_core::types::Position,
    ) -> u32 {
        let player_id = self.next_player_id;
        self.next_player_id += 1;
        world_setup::spawn_tank(&mut self.world, player_id, name, team, position);
        player_id
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::JoinMatch { name } => {
                if self.phase == GamePhase::Complete {
                    return;
                }
                let player_id = self.next_player_id;
                self.next_player_id += 1;

                let team = systems::respawn::assign_team(&self.world);
                let position = systems::respawn::take_spawn_point(
                    &mut self.world,
                    &mut self.scheduler,
                    &mut self.rng,
                    team,
                    self.time.tick,
                );
                world_setup::spawn_tank(&mut self.world, player_id, &name, team, position);
                self.events.push(GameEvent::PlayerJoined { player_id, team });
            }
            PlayerCommand::StartMatch => {
                if self.phase == GamePhase::Lobby {
                    self.phase = GamePhase::Starting;
                    self.scheduler.schedule_in(
                        0,
                        self.time.tick,
                        MATCH_START_DELAY_SECS,
                        ScheduledAction::BeginMatch,
                    );
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::Drive {
                player_id,
                heading,
                speed,
            } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                for (_entity, (_tank, info, health, effects, vel)) in self.world.query_mut::<(
                    &Tank,
                    &PlayerInfo,
                    &Health,
                    &ActiveEffects,
                    &mut Velocity,
                )>() {
                    if info.player_id == player_id && health.current > 0 {
                        let max_speed = TANK_MAX_SPEED * effects.speed_factor;
                        let speed = speed.clamp(0.0, max_speed);
                        *vel = Velocity::from_heading(heading, speed);
                    }
                }
            }
            PlayerCommand::AimTurret { player_id, yaw } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                for (_entity, (_tank, info, health, turret)) in self
                    .world
                    .query_mut::<(&Tank, &PlayerInfo, &Health, &mut Turret)>()
                {
                    if info.player_id == player_id && health.current > 0 {
                        turret.desired_yaw = yaw.rem_euclid(std::f64::consts::TAU);
                    }
                }
            }
            PlayerCommand::Fire { player_id } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                systems::projectile::fire(
                    &mut self.world,
                    &mut self.scheduler,
                    &mut self.events,
                    player_id,
                    self.time.tick,
                );
            }
            PlayerCommand::SetLockEnabled { player_id, enabled } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                for (_entity, (_tank, info, tracker)) in self
                    .world
                    .query_mut::<(&Tank, &PlayerInfo, &mut TargetLockTracker)>()
                {
                    if info.player_id == player_id {
                        tracker.set_enabled(enabled);
                    }
                }
            }
            PlayerCommand::SelfDestruct { player_id } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                self.scheduler.schedule_in(
                    player_id,
                    self.time.tick,
                    SELF_DESTRUCT_DELAY_SECS,
                    ScheduledAction::SelfDestruct,
                );
            }
        }
    }

    /// Execute one due scheduled event.
    fn apply_scheduled(&mut self, event: ScheduledEvent) {
        match event.action {
            ScheduledAction::BeginMatch => {
                if self.phase == GamePhase::Starting {
                    self.phase = GamePhase::Active;
                    self.events.push(GameEvent::MatchStarted);
                    log::info!("match started at tick {}", self.time.tick);
                }
            }
            ScheduledAction::RespawnTank => {
                systems::respawn::respawn_tank(
                    &mut self.world,
                    &mut self.scheduler,
                    &mut self.events,
                    &mut self.rng,
                    event.owner,
                    self.time.tick,
                );
            }
            ScheduledAction::ReleaseSpawnPoint => {
                systems::respawn::release_spawn_point(&mut self.world, event.owner);
            }
            ScheduledAction::ExpireEffect(kind) => {
                systems::power_ups::expire_effect(
                    &mut self.world,
                    &mut self.events,
                    event.owner,
                    kind,
                    self.time.tick,
                );
            }
            ScheduledAction::DeactivateProjectile { generation } => {
                systems::projectile::deactivate_slot(&mut self.world, event.owner, generation);
            }
            ScheduledAction::RespawnPowerUp => {
                systems::power_ups::reactivate_pickup(&mut self.world, event.owner);
            }
            ScheduledAction::SelfDestruct => {
                systems::damage::self_destruct(
                    &mut self.world,
                    &mut self.scheduler,
                    &mut self.events,
                    event.owner,
                    self.time.tick,
                );
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Turret slewing
        systems::aiming::run(&mut self.world);
        // 2. Kinematic integration + arena clamp
        systems::movement::run(&mut self.world);
        // 3. Perception (sight cones + occlusion) -> per-tank candidates
        let contact_lists = systems::perception::run(&self.world);
        // 4. Target-lock tracking
        systems::targeting::run(&mut self.world, &contact_lists, &mut self.events);
        // 5. Projectile flight, hits, blasts
        systems::projectile::run(
            &mut self.world,
            &mut self.scheduler,
            &mut self.events,
            &mut self.score,
            self.time.tick,
        );
        // 6. Power-up pickups and mines
        systems::power_ups::run(
            &mut self.world,
            &mut self.scheduler,
            &mut self.events,
            &mut self.score,
            self.time.tick,
        );
    }

    /// End the match when a team reaches the kill limit.
    fn check_match_end(&mut self) {
        let winner = if self.score.team1_kills >= KILL_LIMIT {
            Some(Team::Team1)
        } else if self.score.team2_kills >= KILL_LIMIT {
            Some(Team::Team2)
        } else {
            None
        };

        if let Some(winning_team) = winner {
            self.phase = GamePhase::Complete;
            self.events.push(GameEvent::MatchEnded { winning_team });
            log::info!("match ended, {winning_team:?} wins");
        }
    }
}
