//! Game controller: turn phases, move dispatch and player elimination.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::Rules;
use crate::error::{GameError, GameResult, MoverError, RuleViolation};
use crate::game::{
    CellType, CellUpdate, Color, CombatResult, Coord, Map, MoveVector, Mover, Player, Rotation,
    TurnView,
};

/// What an applied move vector did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A unit moved.
    Moved {
        /// Resolution at the destination.
        combat: CombatResult,
        /// Color that lost a tower to this move.
        eliminated: Option<Color>,
    },
    /// A unit was built.
    Built {
        /// Build site.
        at: Coord,
    },
    /// The turn passed to the next player.
    TurnEnded {
        /// Player whose turn ended.
        color: Color,
        /// Resources credited to that player.
        collected: u32,
        /// Player to move next.
        next: Color,
    },
}

/// Everything that happened during one mover's turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Outcome of each applied vector, in order.
    pub outcomes: Vec<Outcome>,
    /// Colors eliminated during the turn.
    pub eliminated: Vec<Color>,
    /// Resources credited at the end of the turn.
    pub collected: u32,
}

/// A running game.
///
/// The game owns the map and the rotation. Movers only ever see copies.
#[derive(Debug, Clone)]
pub struct Game {
    /// Live board.
    map: Map,
    /// Board as it was at construction, for [`Game::reset_game`].
    initial_map: Map,
    /// Seated colors at construction, in turn order.
    initial_colors: Vec<Color>,
    /// Active players.
    rotation: Rotation,
    /// Destinations used by a move this turn.
    moved: BTreeSet<Coord>,
    /// Every applied vector.
    history: Vec<MoveVector>,
    /// Build rules.
    rules: Rules,
    /// Number of turns ended so far.
    turns: u32,
}

impl Game {
    /// Start a game on `map` with players seated in `colors` order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a color is `Empty` or repeated.
    pub fn new(map: Map, colors: &[Color]) -> GameResult<Self> {
        Self::with_rules(map, colors, Rules::default())
    }

    /// Start a game with all four player colors seated.
    ///
    /// # Errors
    ///
    /// Never fails for the standard seating; the signature matches [`Game::new`].
    pub fn with_default_players(map: Map) -> GameResult<Self> {
        Self::new(map, &Color::PLAYERS)
    }

    /// Start a game with custom build rules.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a color is `Empty` or repeated, or if
    /// `rules` would build units with no strength.
    pub fn with_rules(map: Map, colors: &[Color], rules: Rules) -> GameResult<Self> {
        if rules.unit_strength == 0 {
            return Err(GameError::InvalidArgument(
                "new units need positive strength".into(),
            ));
        }
        let rotation = Self::seat(colors)?;
        Ok(Self {
            initial_map: map.clone(),
            map,
            initial_colors: colors.to_vec(),
            rotation,
            moved: BTreeSet::new(),
            history: Vec::new(),
            rules,
            turns: 0,
        })
    }

    fn seat(colors: &[Color]) -> GameResult<Rotation> {
        let players = colors
            .iter()
            .map(|&color| Player::new(color))
            .collect::<GameResult<Vec<_>>>()?;
        Rotation::from_players(players)
    }

    /// The live board.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Active players in turn order.
    #[must_use]
    pub const fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Build rules in force.
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Colors seated when the game started, in turn order.
    #[must_use]
    pub fn seated_colors(&self) -> &[Color] {
        &self.initial_colors
    }

    /// Number of turns ended since the start (or the last reset).
    #[must_use]
    pub const fn turns_played(&self) -> u32 {
        self.turns
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.rotation.current_player()
    }

    /// Color of the player whose turn it is.
    #[must_use]
    pub fn current_color(&self) -> Option<Color> {
        self.rotation.current_color()
    }

    /// The player `index` seats after the current one.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless `index < num_players()`.
    pub fn player(&self, index: usize) -> GameResult<&Player> {
        self.rotation.player(index)
    }

    /// Number of active players.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.rotation.len()
    }

    /// Every applied vector, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveVector] {
        &self.history
    }

    /// Forget the history log.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if a move already ended at `coord` this turn.
    #[must_use]
    pub fn has_moved(&self, coord: Coord) -> bool {
        self.moved.contains(&coord)
    }

    /// Check if at most one player is left.
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.rotation.len() <= 1
    }

    /// The last player standing, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        if self.game_over() {
            self.rotation.current_color()
        } else {
            None
        }
    }

    fn active_color(&self) -> GameResult<Color> {
        Ok(self
            .rotation
            .current_color()
            .ok_or(RuleViolation::NoActivePlayer)?)
    }

    /// Apply one move vector for the current player.
    ///
    /// Nothing changes when an error is returned.
    ///
    /// # Errors
    ///
    /// - `InvalidState` when a game rule forbids the move
    /// - `InvalidArgument`/`OutOfRange` for coordinates off the board
    /// - `NotFound` when building without a tower
    pub fn make_move(&mut self, mv: MoveVector) -> GameResult<Outcome> {
        let color = self.active_color()?;
        let outcome = match mv {
            MoveVector::MoveUnit { from, to } => self.move_unit(color, from, to)?,
            MoveVector::MakeUnit { pos } => self.make_unit(color, pos)?,
            MoveVector::EndTurn => self.end_turn(color)?,
        };
        self.history.push(mv);
        debug!(%color, %mv, "Applied move");
        Ok(outcome)
    }

    fn move_unit(&mut self, color: Color, from: Coord, to: Coord) -> GameResult<Outcome> {
        let origin = self.map.cell(from)?;
        if origin.cell_type != CellType::Unit {
            return Err(RuleViolation::NotAUnit(from).into());
        }
        if origin.color != color {
            return Err(RuleViolation::WrongOwner {
                at: from,
                expected: color,
            }
            .into());
        }
        if self.moved.contains(&from) {
            return Err(RuleViolation::AlreadyMoved(from).into());
        }

        let combat = self.map.make_move(from, to)?;
        self.moved.insert(to);

        let defender = combat.defender_color;
        let eliminated = if combat.destroyed_tower() {
            Some(self.eliminate(defender)?)
        } else {
            None
        };

        Ok(Outcome::Moved { combat, eliminated })
    }

    /// Purge a color that lost a tower from the board and the rotation.
    fn eliminate(&mut self, color: Color) -> GameResult<Color> {
        self.map.remove_color(color);
        if self.rotation.has_color(color) {
            self.rotation.remove(color)?;
        }
        info!(%color, remaining = self.rotation.len(), "Player eliminated");
        Ok(color)
    }

    fn make_unit(&mut self, color: Color, pos: Coord) -> GameResult<Outcome> {
        let site = self.map.cell(pos)?;
        let tower = self.map.tower(color)?;
        if !self.map.are_adjacent(tower, pos)? {
            return Err(RuleViolation::NotAdjacentToTower { at: pos, tower }.into());
        }
        if !site.is_empty() {
            return Err(RuleViolation::TargetNotEmpty(pos).into());
        }
        let available = self
            .rotation
            .current_player()
            .map_or(0, Player::resources);
        let needed = self.rules.unit_cost;
        if available < needed {
            return Err(RuleViolation::InsufficientResources { needed, available }.into());
        }

        self.map.set_cell(
            pos,
            CellUpdate::new()
                .color(color)
                .cell_type(CellType::Unit)
                .strength(self.rules.unit_strength),
        )?;
        if let Some(player) = self.rotation.current_player_mut() {
            player.change_resources(-i64::from(needed))?;
        }
        Ok(Outcome::Built { at: pos })
    }

    fn end_turn(&mut self, color: Color) -> GameResult<Outcome> {
        let collected = self.map.collect_player_resources(color);
        let player = self
            .rotation
            .current_player_mut()
            .ok_or(RuleViolation::NoActivePlayer)?;
        let balance = player.change_resources(i64::from(collected))?;

        self.moved.clear();
        let next = self.rotation.rotate()?.color();
        self.turns += 1;
        info!(
            %color,
            collected,
            balance,
            %next,
            "Turn ended"
        );
        Ok(Outcome::TurnEnded {
            color,
            collected,
            next,
        })
    }

    /// Play the current player's turn by pulling commands from `mover`.
    ///
    /// The mover gets a copy of the board. Commands are applied one at a time
    /// as they are produced; the first end-turn finishes the turn and nothing
    /// further is pulled.
    ///
    /// # Errors
    ///
    /// - `Mover` if no stream is returned, or it runs dry before an end-turn
    /// - any error from [`Game::make_move`], which stops the turn where it is
    pub fn query_current_player<M: Mover + ?Sized>(
        &mut self,
        mover: &mut M,
    ) -> GameResult<TurnReport> {
        let color = self.active_color()?;
        let view = TurnView {
            color,
            resources: self.current_player().map_or(0, Player::resources),
            map: self.map.clone(),
        };

        let Some(stream) = mover.plan_turn(view) else {
            warn!(%color, "Mover produced no move stream");
            return Err(MoverError::NoMoveStream(color).into());
        };

        let mut report = TurnReport::default();
        for mv in stream {
            let outcome = self.make_move(mv)?;
            report.outcomes.push(outcome);
            match outcome {
                Outcome::Moved {
                    eliminated: Some(lost),
                    ..
                } => report.eliminated.push(lost),
                Outcome::TurnEnded { collected, .. } => {
                    report.collected = collected;
                    return Ok(report);
                }
                _ => {}
            }
        }

        warn!(%color, applied = report.outcomes.len(), "Move stream ended without end turn");
        Err(MoverError::ExhaustedWithoutEndTurn(color).into())
    }

    /// Put the board and the seating back to how the game started.
    ///
    /// Seated players keep their balances and the first seated color moves
    /// next. Eliminated colors are seated again in their original place with
    /// an empty balance. The history log is kept.
    ///
    /// # Errors
    ///
    /// Only fails if the stored seating was corrupted.
    pub fn reset_game(&mut self) -> GameResult<()> {
        if self
            .initial_colors
            .iter()
            .any(|&color| !self.rotation.has_color(color))
        {
            let players = self
                .initial_colors
                .iter()
                .map(|&color| match self.rotation.get(color) {
                    Some(&player) => Ok(player),
                    None => Player::new(color),
                })
                .collect::<GameResult<Vec<_>>>()?;
            self.rotation = Rotation::from_players(players)?;
        }
        if !self.rotation.is_empty() {
            self.rotation.reset()?;
        }
        self.map = self.initial_map.clone();
        self.moved.clear();
        self.turns = 0;
        info!(players = self.rotation.len(), "Game reset");
        Ok(())
    }
}
