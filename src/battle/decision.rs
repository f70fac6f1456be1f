//! Player decision sources
//!
//! The battle loop asks a `DecisionSource` for the player's action each
//! cycle and never reads input itself. Console, scripted and autopilot
//! sources are provided.

use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::constants::SPECIAL_ABILITY_NAME;
use crate::combat::{Monster, Player};
use crate::core::error::{BattleError, Result};

/// The three things a player can do on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Attack,
    Heal,
    ActivateSpecial,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[Action::Attack, Action::Heal, Action::ActivateSpecial]
    }

    /// Literal tag used on the decision interface
    pub fn tag(&self) -> &'static str {
        match self {
            Action::Attack => "attack",
            Action::Heal => "heal",
            Action::ActivateSpecial => "activate_special",
        }
    }

    /// Parse a console answer: a menu number or a tag
    pub fn from_menu(input: &str) -> Option<Action> {
        match input.trim() {
            "1" => Some(Action::Attack),
            "2" => Some(Action::Heal),
            "3" => Some(Action::ActivateSpecial),
            other => other.parse().ok(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Action::all()
            .iter()
            .copied()
            .find(|a| a.tag() == s)
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}

/// Trait for anything that can choose the player's action
pub trait DecisionSource {
    /// Choose an action for this cycle; may block
    fn decide(&mut self, player: &Player, monster: &Monster) -> Result<Action>;
}

/// Interactive menu over any reader/writer pair
///
/// Invalid answers are reported and the menu is shown again. End of input
/// is an error since no further decision can ever be made.
pub struct ConsoleDecision<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleDecision<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Choose your action:")?;
        writeln!(self.output, "1. Attack")?;
        writeln!(self.output, "2. Heal")?;
        writeln!(self.output, "3. Activate {}", SPECIAL_ABILITY_NAME)?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> DecisionSource for ConsoleDecision<R, W> {
    fn decide(&mut self, _player: &Player, _monster: &Monster) -> Result<Action> {
        self.print_menu()?;
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(BattleError::InputClosed);
            }

            if let Some(action) = Action::from_menu(&line) {
                return Ok(action);
            }

            writeln!(
                self.output,
                "Invalid choice. Please enter 1 for Attack, 2 for Heal, or 3 to Activate {}.",
                SPECIAL_ABILITY_NAME
            )?;
            write!(self.output, "> ")?;
            self.output.flush()?;
        }
    }
}

/// Pre-recorded actions, optionally followed by one action forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    actions: VecDeque<Action>,
    then: Option<Action>,
    used: usize,
}

impl ScriptedDecisions {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            then: None,
            used: 0,
        }
    }

    /// The same action every cycle
    pub fn repeating(action: Action) -> Self {
        Self {
            actions: VecDeque::new(),
            then: Some(action),
            used: 0,
        }
    }

    /// Once the script runs out, keep choosing `action`
    pub fn then_repeat(mut self, action: Action) -> Self {
        self.then = Some(action);
        self
    }

    /// Actions handed out so far
    pub fn used(&self) -> usize {
        self.used
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(&mut self, _player: &Player, _monster: &Monster) -> Result<Action> {
        let action = self
            .actions
            .pop_front()
            .or(self.then)
            .ok_or(BattleError::DecisionsExhausted(self.used))?;
        self.used += 1;
        Ok(action)
    }
}

/// Simple policy: heal when badly hurt and a heal can land, attack otherwise
///
/// Never uses the special ability, whose self-damage outweighs its heal.
#[derive(Debug, Clone)]
pub struct AutoPilot {
    /// Heal when health is below this percentage of max health
    pub heal_below_percent: i32,
}

impl Default for AutoPilot {
    fn default() -> Self {
        Self {
            heal_below_percent: 25,
        }
    }
}

impl DecisionSource for AutoPilot {
    fn decide(&mut self, player: &Player, _monster: &Monster) -> Result<Action> {
        let creature = &player.creature;
        let hurt = (creature.health as i64) * 100
            < (creature.max_health() as i64) * (self.heal_below_percent as i64);
        if hurt && creature.heal_ceiling() >= 1 {
            Ok(Action::Heal)
        } else {
            Ok(Action::Attack)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Creature;
    use std::io::Cursor;

    #[test]
    fn test_tags_round_trip() {
        for action in Action::all() {
            assert_eq!(action.tag().parse::<Action>().unwrap(), *action);
        }
        assert!("jump".parse::<Action>().is_err());
    }

    #[test]
    fn test_menu_numbers() {
        assert_eq!(Action::from_menu("1\n"), Some(Action::Attack));
        assert_eq!(Action::from_menu(" 2 "), Some(Action::Heal));
        assert_eq!(Action::from_menu("3"), Some(Action::ActivateSpecial));
        assert_eq!(Action::from_menu("4"), None);
    }

    #[test]
    fn test_console_reprompts_on_invalid_input() {
        let input = Cursor::new("x\n9\n\n2\n");
        let mut output = Vec::new();
        let action = {
            let mut console = ConsoleDecision::new(input, &mut output);
            console.decide(&Player::hero(), &Monster::brute()).unwrap()
        };

        assert_eq!(action, Action::Heal);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid choice").count(), 3);
        assert!(text.contains("3. Activate Light Hammer"));
    }

    #[test]
    fn test_console_end_of_input() {
        let mut console = ConsoleDecision::new(Cursor::new("bogus\n"), Vec::new());
        let err = console
            .decide(&Player::hero(), &Monster::brute())
            .unwrap_err();
        assert!(matches!(err, BattleError::InputClosed));
    }

    #[test]
    fn test_script_runs_out() {
        let (player, monster) = (Player::hero(), Monster::brute());
        let mut script = ScriptedDecisions::new([Action::Heal]);

        assert_eq!(script.decide(&player, &monster).unwrap(), Action::Heal);
        assert!(matches!(
            script.decide(&player, &monster),
            Err(BattleError::DecisionsExhausted(1))
        ));
    }

    #[test]
    fn test_script_then_repeat() {
        let (player, monster) = (Player::hero(), Monster::brute());
        let mut script =
            ScriptedDecisions::new([Action::ActivateSpecial]).then_repeat(Action::Attack);

        assert_eq!(
            script.decide(&player, &monster).unwrap(),
            Action::ActivateSpecial
        );
        assert_eq!(script.decide(&player, &monster).unwrap(), Action::Attack);
        assert_eq!(script.decide(&player, &monster).unwrap(), Action::Attack);
        assert_eq!(script.used(), 3);
    }

    #[test]
    fn test_autopilot_heals_when_low() {
        let monster = Monster::brute();
        let mut pilot = AutoPilot::default();
        let mut player = Player::hero();

        assert_eq!(pilot.decide(&player, &monster).unwrap(), Action::Attack);

        player.creature.health = 20;
        assert_eq!(pilot.decide(&player, &monster).unwrap(), Action::Heal);

        // Too weak for any heal to land
        player.creature.health = 3;
        assert_eq!(pilot.decide(&player, &monster).unwrap(), Action::Attack);
    }

    #[test]
    fn test_autopilot_large_health() {
        let monster = Monster::brute();
        let mut pilot = AutoPilot::default();
        let mut giant = Player::new(Creature::new("Giant", 5, 5, 100_000_000, 1..=1));

        assert_eq!(pilot.decide(&giant, &monster).unwrap(), Action::Attack);

        giant.creature.health = 20_000_000;
        assert_eq!(pilot.decide(&giant, &monster).unwrap(), Action::Heal);
    }
}
