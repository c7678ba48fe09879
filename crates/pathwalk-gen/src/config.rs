//! Generation parameters.
//!
//! [`Config`] holds every tunable of a run. It is read-only while a run is in
//! progress; edits (from a file, the command line or a text field) go through
//! [`Config::set_param`] and are checked by [`Config::validate`] before the
//! next run starts.

use std::str::FromStr;

use pathwalk_core::Direction;

use crate::error::ConfigError;

/// Tunable parameters of the pathwalker generator.
///
/// All chances are percentages in `0..=100`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Grid width in cells.
    pub x_size: i32,
    /// Grid height in cells.
    pub y_size: i32,
    /// World size of one cell. Only forwarded to sinks.
    pub map_scale: f64,
    /// Walkers stop once more than this many floor tiles exist.
    pub max_floor_count: usize,
    /// Step budget of the first walker. Children get half their parent's.
    pub path_walker_distance: u32,
    /// Chance per update that a walker spawns a child.
    pub child_spawn_chance: u32,
    pub chance_forward: u32,
    pub chance_left: u32,
    pub chance_right: u32,
    /// Turning back also drops a weapon chest.
    pub chance_backward: u32,
    /// Chance per update that a walker carves a room.
    pub room_spawn_chance: u32,
    pub room_size_x: i32,
    pub room_size_y: i32,
    /// Facings a new walker picks from, uniformly.
    pub initial_facings: Vec<Direction>,
    /// Scheduler callbacks per tick when driven through `Generator::frame`.
    pub tick_interval: u32,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            x_size: 50,
            y_size: 50,
            map_scale: 1.0,
            max_floor_count: 110,
            path_walker_distance: 10,
            child_spawn_chance: 30,
            chance_forward: 60,
            chance_left: 15,
            chance_right: 15,
            chance_backward: 10,
            room_spawn_chance: 10,
            room_size_x: 3,
            room_size_y: 3,
            initial_facings: vec![Direction::Right, Direction::Left, Direction::Up],
            tick_interval: 10,
            seed: 0,
        }
    }
}

/// Names accepted by [`Config::set_param`] and [`Config::param`].
pub const PARAM_NAMES: [&str; 16] = [
    "x_size",
    "y_size",
    "map_scale",
    "max_floor_count",
    "max_distance",
    "spawn_chance",
    "forward",
    "left",
    "right",
    "backward",
    "room_spawn",
    "room_size_x",
    "room_size_y",
    "initial_facings",
    "tick_interval",
    "seed",
];

fn parse<T: FromStr>(name: &str, text: &str) -> Result<T, ConfigError> {
    text.trim().parse().map_err(|_| ConfigError::ParseParam {
        name: name.to_string(),
        value: text.to_string(),
    })
}

fn parse_facings(name: &str, text: &str) -> Result<Vec<Direction>, ConfigError> {
    text.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            Direction::from_name(s).ok_or_else(|| ConfigError::ParseParam {
                name: name.to_string(),
                value: text.to_string(),
            })
        })
        .collect()
}

fn check_chance(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::ChanceOutOfRange { name, value });
    }
    Ok(())
}

impl Config {
    /// Reject parameter sets a run cannot start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x_size <= 0 || self.y_size <= 0 {
            return Err(ConfigError::InvalidSize(self.x_size, self.y_size));
        }
        if !(self.map_scale.is_finite() && self.map_scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.map_scale));
        }
        if self.path_walker_distance == 0 {
            return Err(ConfigError::ZeroDistance);
        }
        check_chance("child_spawn_chance", self.child_spawn_chance)?;
        check_chance("chance_forward", self.chance_forward)?;
        check_chance("chance_left", self.chance_left)?;
        check_chance("chance_right", self.chance_right)?;
        check_chance("chance_backward", self.chance_backward)?;
        check_chance("room_spawn_chance", self.room_spawn_chance)?;
        let turns = self.chance_forward + self.chance_left + self.chance_right + self.chance_backward;
        if turns > 100 {
            return Err(ConfigError::TurnWeightsExceed(turns));
        }
        if self.room_size_x <= 0 || self.room_size_y <= 0 {
            return Err(ConfigError::InvalidRoomSize(self.room_size_x, self.room_size_y));
        }
        if self.initial_facings.is_empty() {
            return Err(ConfigError::NoInitialFacing);
        }
        if self.tick_interval == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// Set a parameter from its text form, the way an editor field would.
    ///
    /// Only parsing is checked here; range checks happen in
    /// [`validate`](Self::validate).
    pub fn set_param(&mut self, name: &str, text: &str) -> Result<(), ConfigError> {
        match name {
            "x_size" => self.x_size = parse(name, text)?,
            "y_size" => self.y_size = parse(name, text)?,
            "map_scale" => self.map_scale = parse(name, text)?,
            "max_floor_count" => self.max_floor_count = parse(name, text)?,
            "max_distance" => self.path_walker_distance = parse(name, text)?,
            "spawn_chance" => self.child_spawn_chance = parse(name, text)?,
            "forward" => self.chance_forward = parse(name, text)?,
            "left" => self.chance_left = parse(name, text)?,
            "right" => self.chance_right = parse(name, text)?,
            "backward" => self.chance_backward = parse(name, text)?,
            "room_spawn" => self.room_spawn_chance = parse(name, text)?,
            "room_size_x" => self.room_size_x = parse(name, text)?,
            "room_size_y" => self.room_size_y = parse(name, text)?,
            "initial_facings" => self.initial_facings = parse_facings(name, text)?,
            "tick_interval" => self.tick_interval = parse(name, text)?,
            "seed" => self.seed = parse(name, text)?,
            _ => return Err(ConfigError::UnknownParam(name.to_string())),
        }
        Ok(())
    }

    /// Current value of a parameter as text, or `None` for unknown names.
    pub fn param(&self, name: &str) -> Option<String> {
        let s = match name {
            "x_size" => self.x_size.to_string(),
            "y_size" => self.y_size.to_string(),
            "map_scale" => self.map_scale.to_string(),
            "max_floor_count" => self.max_floor_count.to_string(),
            "max_distance" => self.path_walker_distance.to_string(),
            "spawn_chance" => self.child_spawn_chance.to_string(),
            "forward" => self.chance_forward.to_string(),
            "left" => self.chance_left.to_string(),
            "right" => self.chance_right.to_string(),
            "backward" => self.chance_backward.to_string(),
            "room_spawn" => self.room_spawn_chance.to_string(),
            "room_size_x" => self.room_size_x.to_string(),
            "room_size_y" => self.room_size_y.to_string(),
            "initial_facings" => self
                .initial_facings
                .iter()
                .map(|d| d.name())
                .collect::<Vec<_>>()
                .join(","),
            "tick_interval" => self.tick_interval.to_string(),
            "seed" => self.seed.to_string(),
            _ => return None,
        };
        Some(s)
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// TurnTable
// ---------------------------------------------------------------------------

/// The outcome of a walker's turn roll.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Forward,
    Left,
    Right,
    Backward,
}

/// Cumulative turn thresholds over a `1..=100` roll.
///
/// A roll `r` selects forward when `r <= forward`, left when
/// `r <= left`, and so on. Rolls above `backward` select nothing: the
/// walker keeps its direction and drops no chest.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TurnTable {
    pub forward: u32,
    pub left: u32,
    pub right: u32,
    pub backward: u32,
}

impl TurnTable {
    pub fn new(config: &Config) -> Self {
        let forward = config.chance_forward;
        let left = forward + config.chance_left;
        let right = left + config.chance_right;
        let backward = right + config.chance_backward;
        Self {
            forward,
            left,
            right,
            backward,
        }
    }

    pub fn pick(&self, roll: u32) -> Option<Turn> {
        if roll <= self.forward {
            Some(Turn::Forward)
        } else if roll <= self.left {
            Some(Turn::Left)
        } else if roll <= self.right {
            Some(Turn::Right)
        } else if roll <= self.backward {
            Some(Turn::Backward)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_values() {
        let c = Config {
            x_size: 0,
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSize(0, 50))));

        let c = Config {
            chance_forward: 50,
            chance_left: 30,
            chance_right: 30,
            chance_backward: 0,
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::TurnWeightsExceed(110))));

        let c = Config {
            room_spawn_chance: 101,
            ..Config::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::ChanceOutOfRange {
                name: "room_spawn_chance",
                value: 101
            })
        ));

        let c = Config {
            room_size_y: 0,
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidRoomSize(3, 0))));

        let c = Config {
            initial_facings: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::NoInitialFacing)));

        let c = Config {
            map_scale: 0.0,
            ..Config::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidScale(_))));
    }

    #[test]
    fn set_param_from_text() {
        let mut c = Config::default();
        c.set_param("max_distance", " 25 ").unwrap();
        c.set_param("backward", "5").unwrap();
        c.set_param("initial_facings", "up, down").unwrap();
        assert_eq!(c.path_walker_distance, 25);
        assert_eq!(c.chance_backward, 5);
        assert_eq!(c.initial_facings, vec![Direction::Up, Direction::Down]);
        assert_eq!(c.param("max_distance").as_deref(), Some("25"));
        assert_eq!(c.param("initial_facings").as_deref(), Some("up,down"));
    }

    #[test]
    fn set_param_errors() {
        let mut c = Config::default();
        assert!(matches!(
            c.set_param("forward", "-3"),
            Err(ConfigError::ParseParam { .. })
        ));
        assert!(matches!(
            c.set_param("sideways", "3"),
            Err(ConfigError::UnknownParam(_))
        ));
        assert!(c.set_param("initial_facings", "north").is_err());
        assert_eq!(c, Config::default());
    }

    #[test]
    fn every_param_name_round_trips() {
        let mut c = Config::default();
        for name in PARAM_NAMES {
            let text = c.param(name).unwrap();
            c.set_param(name, &text).unwrap();
        }
        assert_eq!(c, Config::default());
    }

    #[test]
    fn turn_table_partitions_rolls() {
        let c = Config {
            chance_forward: 40,
            chance_left: 20,
            chance_right: 20,
            chance_backward: 10,
            ..Config::default()
        };
        let t = TurnTable::new(&c);
        assert_eq!(t.pick(1), Some(Turn::Forward));
        assert_eq!(t.pick(40), Some(Turn::Forward));
        assert_eq!(t.pick(41), Some(Turn::Left));
        assert_eq!(t.pick(80), Some(Turn::Right));
        assert_eq!(t.pick(90), Some(Turn::Backward));
        assert_eq!(t.pick(91), None);
    }

    #[test]
    fn extreme_turn_tables() {
        let always_forward = TurnTable::new(&Config {
            chance_forward: 100,
            chance_left: 0,
            chance_right: 0,
            chance_backward: 0,
            ..Config::default()
        });
        let always_back = TurnTable::new(&Config {
            chance_forward: 0,
            chance_left: 0,
            chance_right: 0,
            chance_backward: 100,
            ..Config::default()
        });
        for roll in 1..=100 {
            assert_eq!(always_forward.pick(roll), Some(Turn::Forward));
            assert_eq!(always_back.pick(roll), Some(Turn::Backward));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_defaults_for_missing_fields() {
        let c = Config::from_json(r#"{ "x_size": 20, "initial_facings": ["down"] }"#).unwrap();
        assert_eq!(c.x_size, 20);
        assert_eq!(c.y_size, 50);
        assert_eq!(c.initial_facings, vec![Direction::Down]);

        let saved: serde_json::Value = serde_json::from_str(&c.to_json().unwrap()).unwrap();
        assert_eq!(saved["initial_facings"], serde_json::json!(["down"]));
        assert_eq!(saved["child_spawn_chance"], serde_json::json!(30));
        let back = Config::from_json(&saved.to_string()).unwrap();
        assert_eq!(back, c);
    }
}
