// src/stats/tables.rs
use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::utils::number_format;

const TICKS_PER_HOUR: f64 = 20.0 * 60.0 * 60.0;
const CM_PER_KM: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Game ticks shown as hours.
    Hours,
    /// Centimetres shown as kilometres.
    Kilometers,
    /// Stored in tenths, shown rounded to whole units.
    Tenths,
    Count,
}

impl Unit {
    pub fn format(self, raw: Option<i64>) -> String {
        match (self, raw) {
            (Self::Hours, None) => "0 h".to_string(),
            (Self::Hours, Some(raw)) => format!("{} h", number_format(raw as f64 / TICKS_PER_HOUR, 2)),
            (Self::Kilometers, None) => "0 km".to_string(),
            (Self::Kilometers, Some(raw)) => format!("{} km", number_format(raw as f64 / CM_PER_KM, 2)),
            (Self::Tenths, raw) => number_format(raw.unwrap_or(0) as f64 / 10.0, 0),
            (Self::Count, raw) => number_format(raw.unwrap_or(0) as f64, 0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatDef {
    pub id: &'static str,
    pub key: &'static str,
    pub name: &'static str,
    pub unit: Unit,
}

const fn stat(id: &'static str, key: &'static str, name: &'static str, unit: Unit) -> StatDef {
    StatDef { id, key, name, unit }
}

const fn count(id: &'static str, key: &'static str, name: &'static str) -> StatDef {
    stat(id, key, name, Unit::Count)
}

#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
}

impl AchievementDef {
    pub fn key(&self) -> String {
        format!("achievement.{}", self.id)
    }

    pub fn image(&self) -> String {
        format!("{}.png", self.id)
    }
}

const fn achievement(id: &'static str, name: &'static str) -> AchievementDef {
    AchievementDef { id, name }
}

pub const EXPLORE_ALL_BIOMES: &str = "exploreAllBiomes";

pub static GENERAL: &[StatDef] = &[
    stat("play", "stat.playOneMinute", "Time Played", Unit::Hours),
    stat("walk", "stat.walkOneCm", "Distance Walked", Unit::Kilometers),
    stat("swim", "stat.swimOneCm", "Distance Swum", Unit::Kilometers),
    stat("fall", "stat.fallOneCm", "Distance Fallen", Unit::Kilometers),
    stat("climb", "stat.climbOneCm", "Distance Climbed", Unit::Kilometers),
    stat("fly", "stat.flyOneCm", "Distance Flown", Unit::Kilometers),
    stat("dive", "stat.diveOneCm", "Distance Dove", Unit::Kilometers),
    stat("cart", "stat.minecartOneCm", "Distance by Minecart", Unit::Kilometers),
    stat("boat", "stat.boatOneCm", "Distance by Boat", Unit::Kilometers),
    stat("pig", "stat.pigOneCm", "Distance by Pig", Unit::Kilometers),
    stat("horse", "stat.horseOneCm", "Distance by Horse", Unit::Kilometers),
    count("jump", "stat.jump", "Jumps"),
    count("drop", "stat.drop", "Items Dropped"),
    stat("damageDealt", "stat.damageDealt", "Damage Dealt", Unit::Tenths),
    stat("damageTaken", "stat.damageTaken", "Damage Taken", Unit::Tenths),
    count("death", "stat.deaths", "Deaths"),
    count("mobkills", "stat.mobKills", "Mobs Killed"),
    count("playerkills", "stat.playerKills", "Players Killed"),
    count("bred", "stat.animalsBred", "Animals Bred"),
    count("fish", "stat.fishCaught", "Fish Caught"),
    count("junk", "stat.junkFished", "Junk Fished"),
    count("treasure", "stat.treasureFished", "Treasure Fished"),
];

pub static KILLED: &[StatDef] = &[
    count("enderman", "stat.killEntity.Enderman", "Endermen"),
    count("villager", "stat.killEntity.Villager", "Villagers"),
    count("creeper", "stat.killEntity.Creeper", "Creepers"),
    count("squid", "stat.killEntity.Squid", "Squid"),
    count("zombie", "stat.killEntity.Zombie", "Zombies"),
    count("blaze", "stat.killEntity.Blaze", "Blaze"),
    count("sheep", "stat.killEntity.Sheep", "Sheep"),
    count("slime", "stat.killEntity.Slime", "Slimes"),
    count("cavespider", "stat.killEntity.CaveSpider", "CaveSpiders"),
    count("chicken", "stat.killEntity.Chicken", "Chicken"),
    count("horse", "stat.killEntity.EntityHorse", "Horses"),
    count("pigzombie", "stat.killEntity.PigZombie", "Zombie Pigmen"),
    count("witch", "stat.killEntity.Witch", "Witches"),
    count("mushroomcow", "stat.killEntity.MushroomCow", "Mooshrooms"),
    count("ghast", "stat.killEntity.Ghast", "Ghasts"),
    count("bat", "stat.killEntity.Bat", "Bats"),
    count("guardian", "stat.killEntity.Guardian", "Guardians"),
    count("shulker", "stat.killEntity.Shulker", "Shulkers"),
    count("silverfish", "stat.killEntity.Silverfish", "Silverfish"),
    count("ozelot", "stat.killEntity.Ozelot", "Ozelots"),
    count("rabbit", "stat.killEntity.Rabbit", "Rabbits"),
    count("lavaslime", "stat.killEntity.LavaSlime", "Magma Slimes"),
    count("cow", "stat.killEntity.Cow", "Cows"),
    count("pig", "stat.killEntity.Pig", "Pigs"),
    count("skeleton", "stat.killEntity.Skeleton", "Skeletons"),
    count("spider", "stat.killEntity.Spider", "Spiders"),
];

pub static MINED: &[StatDef] = &[
    count("stone", "stat.mineBlock.minecraft.stone", "Stone"),
    count("dirt", "stat.mineBlock.minecraft.dirt", "Dirt"),
    count("sand", "stat.mineBlock.minecraft.sand", "Sand"),
    count("gravel", "stat.mineBlock.minecraft.gravel", "Gravel"),
    count("log", "stat.mineBlock.minecraft.log", "Wood"),
    count("coal_ore", "stat.mineBlock.minecraft.coal_ore", "Coal Ore"),
    count("iron_ore", "stat.mineBlock.minecraft.iron_ore", "Iron Ore"),
    count("gold_ore", "stat.mineBlock.minecraft.gold_ore", "Gold Ore"),
    count("diamond_ore", "stat.mineBlock.minecraft.diamond_ore", "Diamond Ore"),
    count("obsidian", "stat.mineBlock.minecraft.obsidian", "Obsidian"),
];

pub static CRAFTED: &[StatDef] = &[
    count("crafting_table", "stat.craftItem.minecraft.crafting_table", "Crafting Table"),
    count("furnace", "stat.craftItem.minecraft.furnace", "Furnace"),
    count("torch", "stat.craftItem.minecraft.torch", "Torch"),
    count("stone_pickaxe", "stat.craftItem.minecraft.stone_pickaxe", "Stone Pickaxe"),
    count("iron_pickaxe", "stat.craftItem.minecraft.iron_pickaxe", "Iron Pickaxe"),
    count("diamond_pickaxe", "stat.craftItem.minecraft.diamond_pickaxe", "Diamond Pickaxe"),
];

pub static USED: &[StatDef] = &[
    count("stone_pickaxe", "stat.useItem.minecraft.stone_pickaxe", "Stone Pickaxe"),
    count("iron_pickaxe", "stat.useItem.minecraft.iron_pickaxe", "Iron Pickaxe"),
    count("diamond_pickaxe", "stat.useItem.minecraft.diamond_pickaxe", "Diamond Pickaxe"),
    count("torch", "stat.useItem.minecraft.torch", "Torch"),
    count("bow", "stat.useItem.minecraft.bow", "Bow"),
];

pub static PICKED_UP: &[StatDef] = &[
    count("stone", "stat.pickup.minecraft.stone", "Stone"),
    count("cobblestone", "stat.pickup.minecraft.cobblestone", "Cobblestone"),
    count("dirt", "stat.pickup.minecraft.dirt", "Dirt"),
    count("coal", "stat.pickup.minecraft.coal", "Coal"),
    count("diamond", "stat.pickup.minecraft.diamond", "Diamond"),
];

pub static DROPPED: &[StatDef] = &[
    count("torch", "stat.drop.minecraft.torch", "Torch"),
    count("dirt", "stat.drop.minecraft.dirt", "Dirt"),
    count("cobblestone", "stat.drop.minecraft.cobblestone", "Cobblestone"),
    count("rotten_flesh", "stat.drop.minecraft.rotten_flesh", "Rotten Flesh"),
];

pub static ACHIEVEMENTS: &[AchievementDef] = &[
    achievement("openInventory", "Taking Inventory"),
    achievement("mineWood", "Getting Wood"),
    achievement("buildWorkBench", "Benchmarking"),
    achievement("buildPickaxe", "Time to Mine!"),
    achievement("buildFurnace", "Hot Topic"),
    achievement("acquireIron", "Acquire Hardware"),
    achievement("buildHoe", "Time to Farm!"),
    achievement("makeBread", "Bake Bread"),
    achievement("bakeCake", "The Lie"),
    achievement("buildBetterPickaxe", "Getting an Upgrade"),
    achievement("cookFish", "Delicious Fish"),
    achievement("onARail", "On A Rail"),
    achievement("buildSword", "Time to Strike!"),
    achievement("killEnemy", "Monster Hunter"),
    achievement("killCow", "Cow Tipper"),
    achievement("flyPig", "When Pigs Fly"),
    achievement("snipeSkeleton", "Sniper Duel"),
    achievement("diamonds", "DIAMONDS!"),
    achievement("portal", "We Need to Go Deeper"),
    achievement("ghast", "Return to Sender"),
    achievement("blazeRod", "Into Fire"),
    achievement("potion", "Local Brewery"),
    achievement("theEnd", "The End?"),
    achievement("theEnd2", "The End."),
    achievement("enchantments", "Enchanter"),
    achievement("overkill", "Overkill"),
    achievement("bookcase", "Librarian"),
    achievement(EXPLORE_ALL_BIOMES, "Adventuring Time"),
    achievement("spawnWither", "The Beginning?"),
    achievement("killWither", "The Beginning."),
    achievement("fullBeacon", "Beaconator"),
    achievement("breedCow", "Repopulation"),
    achievement("diamondsToYou", "Diamonds to you!"),
    achievement("overpowered", "Overpowered"),
];

pub static BIOMES: &[&str] = &[
    "Extreme Hills M", "Cold Taiga M", "Desert", "Deep Ocean", "Taiga",
    "Extreme Hills", "Ice Mountains", "FrozenOcean", "Jungle", "Extreme Hills Edge",
    "Savanna Plateau", "Birch Forest Hills", "DesertHills", "MushroomIsland",
    "Birch Forest", "Mesa", "Mega Taiga", "Savanna M", "Savanna", "River",
    "Swampland", "Sunflower Plains", "Extreme Hills+", "Mesa Plateau F",
    "Flower Forest", "Ocean", "Ice Plains Spikes", "Mega Taiga Hills", "TaigaHills",
    "Plains", "Ice Plains", "FrozenRiver", "MushroomIslandShore", "Hell",
    "ForestHills", "Cold Taiga", "Forest", "JungleHills", "Beach", "Roofed Forest",
    "Cold Beach", "Cold Taiga Hills", "Mesa Plateau", "Stone Beach", "JungleEdge",
    "Mesa (Bryce)", "Sky",
];

lazy_static! {
    /// Every known stat, keyed by its full document key.
    pub static ref STATS_BY_KEY: HashMap<&'static str, &'static StatDef> = {
        [GENERAL, KILLED, MINED, CRAFTED, USED, PICKED_UP, DROPPED]
            .into_iter()
            .flat_map(|table| table.iter())
            .map(|def| (def.key, def))
            .collect()
    };
}
