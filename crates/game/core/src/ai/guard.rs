//! Guard movement policies.
//!
//! Each personality turns the guard's behaviour state plus a view of the
//! terrain into a single command. Applying the command and rolling it back
//! on a blocked cell is the engine's job.

use crate::config::GameConfig;
use crate::env::Dice;
use crate::state::{Command, Direction, Guard, GuardBehavior, GridError, Position, Terrain};

/// Side effects a policy wants reported alongside its command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardNote {
    Spotted(Direction),
    Dozed(u8),
    Woke,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardDecision {
    pub command: Command,
    pub note: Option<GuardNote>,
}

impl GuardDecision {
    fn command(command: Command) -> Self {
        Self {
            command,
            note: None,
        }
    }

    fn noted(command: Command, note: GuardNote) -> Self {
        Self {
            command,
            note: Some(note),
        }
    }
}

/// Picks the guard's command for this turn, updating its behaviour state.
///
/// Immobile guards always wait and draw nothing from the RNG.
pub fn decide(
    guard: &mut Guard,
    terrain: &Terrain<'_>,
    hero: Position,
    dice: &mut Dice<'_>,
    config: &GameConfig,
) -> Result<GuardDecision, GridError> {
    if !guard.character.body.is_movable() {
        return Ok(GuardDecision::command(Command::Wait));
    }

    let position = guard.position();
    match &mut guard.behavior {
        GuardBehavior::Rookie => Ok(GuardDecision::command(Command::Move(dice.direction()))),
        GuardBehavior::Suspicious {
            route,
            cursor,
            heading,
        } => {
            if dice.chance(config.suspicious_sight_chance) {
                if let Some(direction) = terrain.line_of_sight(position, hero)? {
                    *heading = direction;
                    return Ok(GuardDecision::noted(
                        Command::Move(direction),
                        GuardNote::Spotted(direction),
                    ));
                }
            }

            if route.is_empty() {
                return follow_wall(terrain, position, heading);
            }
            let direction = route[*cursor % route.len()];
            *cursor = (*cursor + 1) % route.len();
            Ok(GuardDecision::command(Command::Move(direction)))
        }
        GuardBehavior::Drunken {
            heading,
            asleep_for,
        } => {
            if *asleep_for > 0 {
                *asleep_for -= 1;
                let decision = if *asleep_for == 0 {
                    GuardDecision::noted(Command::Wait, GuardNote::Woke)
                } else {
                    GuardDecision::command(Command::Wait)
                };
                return Ok(decision);
            }

            if dice.chance(config.drunken_doze_chance) {
                *asleep_for = config.drunken_doze_turns;
                return Ok(GuardDecision::noted(
                    Command::Wait,
                    GuardNote::Dozed(config.drunken_doze_turns),
                ));
            }

            let direction = match *heading {
                Some(previous) if dice.chance(config.drunken_persistence) => previous,
                _ => dice.direction(),
            };
            *heading = Some(direction);
            Ok(GuardDecision::command(Command::Move(direction)))
        }
    }
}

/// Keeps walking straight, turning clockwise whenever the way is blocked.
fn follow_wall(
    terrain: &Terrain<'_>,
    position: Position,
    heading: &mut Direction,
) -> Result<GuardDecision, GridError> {
    for _ in 0..Direction::ALL.len() {
        if !terrain.blocks_enemy(position.step(*heading))? {
            return Ok(GuardDecision::command(Command::Move(*heading)));
        }
        *heading = heading.clockwise();
    }
    Ok(GuardDecision::command(Command::Wait))
}
