//! Typed payloads for the event kinds a battle state engine acts on

mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
mod tests;

pub use battle::{
    HpStatus, Player, Pokemon, PokemonDetails, Side, Stat, parse_details, parse_hp_status,
    parse_number, parse_pokemon,
};

use crate::event::{Event, EventKind};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum BattleMessage {
    // === Initialization ===
    BattlePlayer {
        player: Player,
        username: String,
        avatar: String,
        rating: Option<u32>,
    },
    Gen(u8),
    Tier(String),
    Rule(String),
    Title(String),
    ClearPoke,
    Poke {
        player: Player,
        details: PokemonDetails,
        has_item: bool,
    },
    BattleStart,

    // === Progress ===
    Turn(u32),
    Inactive(String),
    Win(String),

    // === Major actions ===
    Move {
        pokemon: Pokemon,
        move_name: String,
        target: Option<Pokemon>,
        miss: bool,
        still: bool,
    },
    Switch {
        pokemon: Pokemon,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    Drag {
        pokemon: Pokemon,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    Replace {
        pokemon: Pokemon,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    DetailsChange {
        pokemon: Pokemon,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    FormeChange {
        pokemon: Pokemon,
        species: String,
        hp_status: Option<HpStatus>,
    },
    Swap {
        pokemon: Pokemon,
        position: u8,
    },
    Cant {
        pokemon: Pokemon,
        reason: String,
        move_name: Option<String>,
    },
    Faint(Pokemon),

    // === HP ===
    Damage {
        pokemon: Pokemon,
        hp_status: Option<HpStatus>,
    },
    Heal {
        pokemon: Pokemon,
        hp_status: Option<HpStatus>,
    },
    SetHp {
        pokemon: Pokemon,
        hp_status: Option<HpStatus>,
    },

    // === Status ===
    Status {
        pokemon: Pokemon,
        status: String,
    },
    CureStatus {
        pokemon: Pokemon,
        status: String,
    },
    CureTeam(Pokemon),

    // === Boosts ===
    Boost {
        pokemon: Pokemon,
        stat: Stat,
        amount: i8,
    },
    Unboost {
        pokemon: Pokemon,
        stat: Stat,
        amount: i8,
    },
    SetBoost {
        pokemon: Pokemon,
        stat: Stat,
        amount: i8,
    },
    SwapBoost {
        source: Pokemon,
        target: Pokemon,
        stats: Vec<Stat>,
    },
    InvertBoost(Pokemon),
    ClearBoost(Pokemon),
    ClearAllBoost,
    ClearPositiveBoost(Pokemon),
    ClearNegativeBoost(Pokemon),
    CopyBoost {
        source: Pokemon,
        target: Pokemon,
    },

    // === Field ===
    Weather {
        weather: String,
        upkeep: bool,
    },
    FieldStart(String),
    FieldEnd(String),
    SideStart {
        side: Side,
        condition: String,
    },
    SideEnd {
        side: Side,
        condition: String,
    },
    SwapSideConditions,

    // === Volatiles ===
    VolatileStart {
        pokemon: Pokemon,
        effect: String,
    },
    VolatileEnd {
        pokemon: Pokemon,
        effect: String,
    },
    Activate {
        pokemon: Option<Pokemon>,
        effect: String,
    },
    SingleTurn {
        pokemon: Pokemon,
        move_name: String,
    },
    SingleMove {
        pokemon: Pokemon,
        move_name: String,
    },
    Prepare {
        attacker: Pokemon,
        move_name: String,
    },
    MustRecharge(Pokemon),
    Immune(Pokemon),

    // === Reveals ===
    Item {
        pokemon: Pokemon,
        item: String,
    },
    EndItem {
        pokemon: Pokemon,
        item: String,
    },
    Ability {
        pokemon: Pokemon,
        ability: String,
    },
    EndAbility(Pokemon),

    // === Transformations ===
    Transform {
        pokemon: Pokemon,
        species: String,
    },
    Mega {
        pokemon: Pokemon,
        megastone: String,
    },
    Primal(Pokemon),
    ZPower(Pokemon),
    Terastallize {
        pokemon: Pokemon,
        tera_type: String,
    },

    // === Text ===
    Message(String),
    Raw(String),

    /// A kind with no typed payload
    Unhandled(String),
}

impl BattleMessage {
    /// Decode the payload of an event according to its kind
    pub fn decode(event: &Event) -> Result<BattleMessage> {
        let parts: Vec<&str> = event.fields().iter().map(String::as_str).collect();
        let parts = parts.as_slice();

        match event.kind() {
            EventKind::Player => battle_init::parse_player(parts),
            EventKind::Gen => battle_init::parse_gen(parts),
            EventKind::Tier => battle_init::parse_tier(parts),
            EventKind::Rule => battle_init::parse_rule(parts),
            EventKind::Title => battle_init::parse_title(parts),
            EventKind::ClearPoke => Ok(BattleMessage::ClearPoke),
            EventKind::Poke => battle_init::parse_poke(parts),
            EventKind::Start => Ok(BattleMessage::BattleStart),

            EventKind::Turn => battle_progress::parse_turn(parts),
            EventKind::Inactive => battle_progress::parse_inactive(parts),
            EventKind::Win => battle_progress::parse_win(parts),
            EventKind::Message | EventKind::MinorMessage => battle_progress::parse_message(parts),
            EventKind::Raw => battle_progress::parse_raw(parts),

            EventKind::Move => battle_major::parse_move(parts),
            EventKind::Switch => battle_major::parse_switch(parts),
            EventKind::Drag => battle_major::parse_drag(parts),
            EventKind::Replace => battle_major::parse_replace(parts),
            EventKind::DetailsChange => battle_major::parse_detailschange(parts),
            EventKind::FormeChange => battle_major::parse_formechange(parts),
            EventKind::Swap => battle_major::parse_swap(parts),
            EventKind::Cant => battle_major::parse_cant(parts),
            EventKind::Faint => battle_major::parse_faint(parts),

            EventKind::Damage => battle_minor::parse_damage(parts),
            EventKind::Heal => battle_minor::parse_heal(parts),
            EventKind::SetHp => battle_minor::parse_sethp(parts),
            EventKind::Status => battle_minor::parse_status(parts),
            EventKind::CureStatus => battle_minor::parse_curestatus(parts),
            EventKind::CureTeam => battle_minor::parse_cureteam(parts),
            EventKind::Boost => battle_minor::parse_boost(parts),
            EventKind::Unboost => battle_minor::parse_unboost(parts),
            EventKind::SetBoost => battle_minor::parse_setboost(parts),
            EventKind::SwapBoost => battle_minor::parse_swapboost(parts),
            EventKind::InvertBoost => battle_minor::parse_invertboost(parts),
            EventKind::ClearBoost => battle_minor::parse_clearboost(parts),
            EventKind::ClearAllBoost => Ok(BattleMessage::ClearAllBoost),
            EventKind::ClearPositiveBoost => battle_minor::parse_clearpositiveboost(parts),
            EventKind::ClearNegativeBoost => battle_minor::parse_clearnegativeboost(parts),
            EventKind::CopyBoost => battle_minor::parse_copyboost(parts),
            EventKind::Weather => battle_minor::parse_weather(parts),
            EventKind::FieldStart => battle_minor::parse_fieldstart(parts),
            EventKind::FieldEnd => battle_minor::parse_fieldend(parts),
            EventKind::SideStart => battle_minor::parse_sidestart(parts),
            EventKind::SideEnd => battle_minor::parse_sideend(parts),
            EventKind::SwapSideConditions => Ok(BattleMessage::SwapSideConditions),
            EventKind::VolatileStart => battle_minor::parse_start(parts),
            EventKind::VolatileEnd => battle_minor::parse_end(parts),
            EventKind::Activate => battle_minor::parse_activate(parts),
            EventKind::SingleTurn => battle_minor::parse_singleturn(parts),
            EventKind::SingleMove => battle_minor::parse_singlemove(parts),
            EventKind::Prepare => battle_minor::parse_prepare(parts),
            EventKind::MustRecharge => battle_minor::parse_mustrecharge(parts),
            EventKind::Immune => battle_minor::parse_immune(parts),
            EventKind::Item => battle_minor::parse_item(parts),
            EventKind::EndItem => battle_minor::parse_enditem(parts),
            EventKind::Ability => battle_minor::parse_ability(parts),
            EventKind::EndAbility => battle_minor::parse_endability(parts),
            EventKind::Transform => battle_minor::parse_transform(parts),
            EventKind::Mega => battle_minor::parse_mega(parts),
            EventKind::Primal => battle_minor::parse_primal(parts),
            EventKind::ZPower => battle_minor::parse_zpower(parts),
            EventKind::Terastallize => battle_minor::parse_terastallize(parts),

            EventKind::Other(kind) => Ok(BattleMessage::Unhandled(kind.clone())),
        }
    }
}
