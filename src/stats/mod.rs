//! Player statistics files (`stats/<uuid>.json`).

pub mod tables;

use clap::ValueEnum;
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::StatsError;
use tables::{AchievementDef, StatDef, Unit, ACHIEVEMENTS, BIOMES, EXPLORE_ALL_BIOMES, STATS_BY_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub id: String,
    pub name: String,
    pub raw: i64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub has: bool,
    pub value: i64,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatGroup {
    General,
    Achievements,
    Killed,
    Mined,
    Crafted,
    Used,
    PickedUp,
    Dropped,
    Explored,
    Unexplored,
}

impl StatGroup {
    /// The stat table behind this group, if it is a plain stat group.
    pub fn table(self) -> Option<&'static [StatDef]> {
        match self {
            Self::General => Some(tables::GENERAL),
            Self::Killed => Some(tables::KILLED),
            Self::Mined => Some(tables::MINED),
            Self::Crafted => Some(tables::CRAFTED),
            Self::Used => Some(tables::USED),
            Self::PickedUp => Some(tables::PICKED_UP),
            Self::Dropped => Some(tables::DROPPED),
            Self::Achievements | Self::Explored | Self::Unexplored => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerStats {
    data: Map<String, Value>,
}

fn as_integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
        .or_else(|| value.as_f64().map(|v| v as i64))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |v| v != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

impl PlayerStats {
    pub fn from_value(value: Value) -> Result<Self, StatsError> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => Err(StatsError::NotAnObject),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, StatsError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stats = Self::from_json(&json)?;
        debug!("Loaded {} stat entries from {:?}", stats.data.len(), path);
        Ok(stats)
    }

    /// Raw entry by full key; JSON `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|value| !value.is_null())
    }

    fn resolve(&self, def: &StatDef) -> Stat {
        let raw = self.get(def.key).map(|value| as_integer(value).unwrap_or(0));
        Stat {
            id: def.id.to_string(),
            name: def.name.to_string(),
            raw: raw.unwrap_or(0),
            value: def.unit.format(raw),
        }
    }

    /// Looks up any stat by its full key. Keys missing from the built-in
    /// tables are reported as plain counts named after the key.
    pub fn stat(&self, key: &str) -> Stat {
        match STATS_BY_KEY.get(key) {
            Some(def) => self.resolve(def),
            None => {
                let raw = self.get(key).map(|value| as_integer(value).unwrap_or(0));
                Stat {
                    id: key.to_string(),
                    name: key.to_string(),
                    raw: raw.unwrap_or(0),
                    value: Unit::Count.format(raw),
                }
            }
        }
    }

    pub fn table(&self, table: &[StatDef]) -> Vec<Stat> {
        table.iter().map(|def| self.resolve(def)).collect()
    }

    pub fn general(&self) -> Vec<Stat> {
        self.table(tables::GENERAL)
    }

    pub fn killed(&self) -> Vec<Stat> {
        self.table(tables::KILLED)
    }

    pub fn mined(&self) -> Vec<Stat> {
        self.table(tables::MINED)
    }

    pub fn crafted(&self) -> Vec<Stat> {
        self.table(tables::CRAFTED)
    }

    pub fn used(&self) -> Vec<Stat> {
        self.table(tables::USED)
    }

    pub fn picked_up(&self) -> Vec<Stat> {
        self.table(tables::PICKED_UP)
    }

    pub fn dropped(&self) -> Vec<Stat> {
        self.table(tables::DROPPED)
    }

    fn achievement(&self, def: &'static AchievementDef) -> Achievement {
        let entry = self.get(&def.key());
        let (has, value) = if def.id == EXPLORE_ALL_BIOMES {
            let has = entry
                .and_then(|entry| entry.get("value"))
                .map_or(false, is_truthy);
            (has, self.explored().len() as i64)
        } else {
            (entry.is_some(), entry.and_then(as_integer).unwrap_or(0))
        };

        Achievement {
            id: def.id,
            name: def.name,
            has,
            value,
            image: def.image(),
        }
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        ACHIEVEMENTS.iter().map(|def| self.achievement(def)).collect()
    }

    /// Biomes recorded in the "Adventuring Time" progress list.
    pub fn explored(&self) -> Vec<String> {
        let key = format!("achievement.{}", EXPLORE_ALL_BIOMES);
        self.get(&key)
            .and_then(|entry| entry.get("progress"))
            .and_then(Value::as_array)
            .map(|progress| {
                progress
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn unexplored(&self) -> Vec<&'static str> {
        let explored = self.explored();
        BIOMES
            .iter()
            .copied()
            .filter(|biome| !explored.iter().any(|seen| seen == biome))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "stat.playOneMinute": 144000,
        "stat.walkOneCm": 250000,
        "stat.jump": 1234,
        "stat.damageDealt": 125,
        "stat.killEntity.Creeper": 7,
        "stat.mineBlock.minecraft.stone": 4096,
        "achievement.openInventory": 3,
        "achievement.mineWood": 1,
        "achievement.exploreAllBiomes": {
            "value": 0,
            "progress": ["Desert", "Plains", "Forest"]
        },
        "stat.custom.unlisted": 5
    }"#;

    fn sample() -> PlayerStats {
        PlayerStats::from_json(SAMPLE).unwrap()
    }

    fn find<'a>(stats: &'a [Stat], id: &str) -> &'a Stat {
        stats.iter().find(|stat| stat.id == id).unwrap()
    }

    #[test]
    fn general_formats_units() {
        let general = sample().general();
        assert_eq!(general.len(), tables::GENERAL.len());

        let play = find(&general, "play");
        assert_eq!(play.raw, 144_000);
        assert_eq!(play.value, "2.00 h");

        assert_eq!(find(&general, "walk").value, "2.50 km");
        assert_eq!(find(&general, "jump").value, "1,234");
        assert_eq!(find(&general, "damageDealt").value, "13");
    }

    #[test]
    fn absent_stats_default() {
        let general = sample().general();
        let swim = find(&general, "swim");
        assert_eq!((swim.raw, swim.value.as_str()), (0, "0 km"));

        let empty = PlayerStats::default().general();
        assert_eq!(find(&empty, "play").value, "0 h");
        assert_eq!(find(&empty, "death").value, "0");
    }

    #[test]
    fn killed_and_mined_tables() {
        let stats = sample();
        assert_eq!(find(&stats.killed(), "creeper").raw, 7);
        assert_eq!(find(&stats.mined(), "stone").value, "4,096");
        assert_eq!(find(&stats.mined(), "dirt").raw, 0);
    }

    #[test]
    fn achievements_report_presence() {
        let achievements = sample().achievements();
        let inventory = achievements.iter().find(|a| a.id == "openInventory").unwrap();
        assert!(inventory.has);
        assert_eq!(inventory.value, 3);
        assert_eq!(inventory.image, "openInventory.png");

        let diamonds = achievements.iter().find(|a| a.id == "diamonds").unwrap();
        assert!(!diamonds.has);
        assert_eq!(diamonds.value, 0);
    }

    #[test]
    fn adventuring_time_counts_progress() {
        let achievements = sample().achievements();
        let explore = achievements
            .iter()
            .find(|a| a.id == EXPLORE_ALL_BIOMES)
            .unwrap();
        assert!(!explore.has);
        assert_eq!(explore.value, 3);
    }

    #[test]
    fn unexplored_is_table_minus_explored() {
        let stats = sample();
        assert_eq!(stats.explored(), vec!["Desert", "Plains", "Forest"]);

        let unexplored = stats.unexplored();
        assert_eq!(unexplored.len(), BIOMES.len() - 3);
        assert!(!unexplored.contains(&"Desert"));
        assert_eq!(unexplored[0], "Extreme Hills M");
    }

    #[test]
    fn no_progress_means_everything_unexplored() {
        let stats = PlayerStats::default();
        assert!(stats.explored().is_empty());
        assert_eq!(stats.unexplored().len(), BIOMES.len());
    }

    #[test]
    fn single_lookup_by_key() {
        let stats = sample();
        assert_eq!(stats.stat("stat.walkOneCm").name, "Distance Walked");
        let custom = stats.stat("stat.custom.unlisted");
        assert_eq!((custom.raw, custom.value.as_str()), (5, "5"));
        assert_eq!(stats.stat("stat.nothing").raw, 0);
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(matches!(
            PlayerStats::from_json("[1, 2, 3]"),
            Err(StatsError::NotAnObject)
        ));
        assert!(matches!(
            PlayerStats::from_json("{ nope"),
            Err(StatsError::Json(_))
        ));
    }

    #[test]
    fn group_tables() {
        assert!(StatGroup::Killed.table().is_some());
        assert!(StatGroup::Achievements.table().is_none());
    }
}
