//! Fixed catalog data and reaction symbols.

/// Reaction used to accept a confirmation
pub const CONFIRM_REACTION_EMOJI: &str = "🟢";
/// Reaction used to cancel a confirmation
pub const CANCEL_REACTION_EMOJI: &str = "🟥";

/// Reaction used to turn a page backwards
pub const LEFT_REACTION_EMOJI: &str = "◀";
/// Reaction used to turn a page forwards
pub const RIGHT_REACTION_EMOJI: &str = "▶";

/// Moderator reaction marking a record as verified
pub const VERIFIED_EMOJI: &str = "✅";
/// Moderator reaction marking a record as not verified
pub const NOT_VERIFIED_EMOJI: &str = "❌";

/// Entries per page for map searches and tournament boards
pub const PAGE_SIZE: usize = 10;
/// Maps per page for personal best listings
pub const PB_MAPS_PER_PAGE: usize = 3;
/// Entries shown on scoreboards and leaderboards
pub const BOARD_LIMIT: u64 = 10;
/// Maps listed by the newest command
pub const NEWEST_MAPS_LIMIT: u64 = 10;
/// Discord embed field value limit
pub const FIELD_VALUE_MAX_LENGTH: usize = 1024;
/// Separator between personal bests inside an embed field
pub const PB_SEPARATOR: &str = "━━━━━━━━━━━━";

/// Accepted map types, in display order.
pub const TYPES_OF_MAP: &[&str] = &[
    "SINGLE",
    "MULTILEVEL",
    "PIONEER",
    "TIME-ATTACK",
    "MEGAMAP",
    "MULTIMAP",
    "TUTORIAL",
    "HARDCORE",
    "MILDCORE",
    "OUT-OF-MAP",
    "ABLOCK",
    "NOSTALGIA",
    "FRAMEWORK",
];

/// A playable Overwatch map with its accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapName {
    /// Canonical key stored in the database (also the first alias)
    pub key: &'static str,
    /// Human readable name
    pub pretty: &'static str,
    /// Accepted inputs after normalisation
    pub aliases: &'static [&'static str],
}

const fn map(
    key: &'static str,
    pretty: &'static str,
    aliases: &'static [&'static str],
) -> MapName {
    MapName {
        key,
        pretty,
        aliases,
    }
}

/// All maps accepted by submission and search commands.
pub const ALL_MAP_NAMES: &[MapName] = &[
    map("ayutthaya", "Ayutthaya", &["ayutthaya", "ayutt"]),
    map("blackforest", "Black Forest", &["blackforest", "bf"]),
    map(
        "blizzardworld",
        "Blizzard World",
        &["blizzardworld", "bw", "blizz", "blizzworld", "blizzard"],
    ),
    map("busan", "Busan", &["busan"]),
    map("castillo", "Castillo", &["castillo"]),
    map(
        "chateauguillard",
        "Chateau Guillard",
        &["chateauguillard", "chateau", "guillard"],
    ),
    map("dorado", "Dorado", &["dorado"]),
    map(
        "ecopointantarctica",
        "Ecopoint Antarctica",
        &["ecopointantarctica", "ecopoint", "antarctica"],
    ),
    map(
        "eichenwalde",
        "Eichenwalde",
        &["eichenwalde", "eich", "eichen", "eichenwald"],
    ),
    map("hanamura", "Hanamura", &["hanamura", "hana"]),
    map("havana", "Havana", &["havana"]),
    map("hollywood", "Hollywood", &["hollywood", "holly"]),
    map(
        "horizonlunarcolony",
        "Horizon Lunar Colony",
        &["horizonlunarcolony", "hlc", "horizon"],
    ),
    map("ilios", "Ilios", &["ilios"]),
    map("junkertown", "Junkertown", &["junkertown"]),
    map("kanezaka", "Kanezaka", &["kanezaka", "kz", "kane", "zaka"]),
    map("kingsrow", "King's Row", &["kingsrow", "kr"]),
    map("lijiangtower", "Lijiang Tower", &["lijiangtower", "lijiang"]),
    map("necropolis", "Necropolis", &["necropolis"]),
    map("nepal", "Nepal", &["nepal"]),
    map("numbani", "Numbani", &["numbani"]),
    map("oasis", "Oasis", &["oasis"]),
    map("paris", "Paris", &["paris"]),
    map("petra", "Petra", &["petra"]),
    map(
        "practicerange",
        "Practice Range",
        &["practicerange", "practice", "pr"],
    ),
    map("rialto", "Rialto", &["rialto"]),
    map("route66", "Route 66", &["route66", "r66"]),
    map("templeofanubis", "Temple of Anubis", &["templeofanubis", "anubis"]),
    map(
        "volskayaindustries",
        "Volskaya Industries",
        &["volskayaindustries", "volskaya"],
    ),
    map(
        "watchpointgibraltar",
        "Watchpoint Gibraltar",
        &["watchpointgibraltar", "gibraltar", "wpg"],
    ),
    map(
        "workshopchamber",
        "Workshop Chamber",
        &["workshopchamber", "chamber"],
    ),
    map(
        "workshopexpanse",
        "Workshop Expanse",
        &["workshopexpanse", "expanse"],
    ),
    map(
        "workshopgreenscreen",
        "Workshop Greenscreen",
        &["workshopgreenscreen", "green", "greenscreen"],
    ),
    map("workshopisland", "Workshop Island", &["workshopisland", "island"]),
    map("framework", "Framework", &["framework", "fw"]),
];
