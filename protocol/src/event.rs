//! Log tokenizer and event kinds
//!
//! A battle log is line oriented: every meaningful line starts with `|` and
//! its fields are separated by `|`. The first field names the event kind.

use crate::DELIMITER;
use crate::message::Pokemon;

/// Every event kind the replay knows about.
///
/// Kinds that never reach the state engine but still matter to the replay
/// (`win`) have their own variant; anything else decodes to [`EventKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Unit entry ===
    Switch,
    Drag,
    Replace,
    Swap,
    DetailsChange,
    FormeChange,

    // === Actions ===
    Move,
    Cant,
    Faint,
    Prepare,
    MustRecharge,

    // === HP ===
    Damage,
    Heal,
    SetHp,

    // === Status ===
    Status,
    CureStatus,
    CureTeam,

    // === Boosts ===
    Boost,
    Unboost,
    SetBoost,
    SwapBoost,
    InvertBoost,
    ClearBoost,
    ClearAllBoost,
    ClearPositiveBoost,
    ClearNegativeBoost,
    CopyBoost,

    // === Field and side ===
    Weather,
    FieldStart,
    FieldEnd,
    SideStart,
    SideEnd,
    SwapSideConditions,

    // === Volatiles and reveals ===
    VolatileStart,
    VolatileEnd,
    Activate,
    SingleTurn,
    SingleMove,
    Immune,
    Ability,
    EndAbility,
    Item,
    EndItem,

    // === Transformations ===
    Transform,
    Mega,
    Primal,
    ZPower,
    Terastallize,

    // === Bookkeeping ===
    Turn,
    Player,
    Rule,
    Title,
    Gen,
    Tier,
    ClearPoke,
    Poke,
    Start,
    Inactive,
    Raw,
    Message,
    MinorMessage,

    // === Recognized, never forwarded ===
    Win,

    /// Any kind outside the recognized set (kept in turn buckets, never applied)
    Other(String),
}

impl EventKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "switch" => EventKind::Switch,
            "drag" => EventKind::Drag,
            "replace" => EventKind::Replace,
            "swap" => EventKind::Swap,
            "detailschange" => EventKind::DetailsChange,
            "-formechange" => EventKind::FormeChange,
            "move" => EventKind::Move,
            "cant" => EventKind::Cant,
            "faint" => EventKind::Faint,
            "-prepare" => EventKind::Prepare,
            "-mustrecharge" => EventKind::MustRecharge,
            "-damage" => EventKind::Damage,
            "-heal" => EventKind::Heal,
            "-sethp" => EventKind::SetHp,
            "-status" => EventKind::Status,
            "-curestatus" => EventKind::CureStatus,
            "-cureteam" => EventKind::CureTeam,
            "-boost" => EventKind::Boost,
            "-unboost" => EventKind::Unboost,
            "-setboost" => EventKind::SetBoost,
            "-swapboost" => EventKind::SwapBoost,
            "-invertboost" => EventKind::InvertBoost,
            "-clearboost" => EventKind::ClearBoost,
            "-clearallboost" => EventKind::ClearAllBoost,
            "-clearpositiveboost" => EventKind::ClearPositiveBoost,
            "-clearnegativeboost" => EventKind::ClearNegativeBoost,
            "-copyboost" => EventKind::CopyBoost,
            "-weather" => EventKind::Weather,
            "-fieldstart" => EventKind::FieldStart,
            "-fieldend" => EventKind::FieldEnd,
            "-sidestart" => EventKind::SideStart,
            "-sideend" => EventKind::SideEnd,
            "-swapsideconditions" => EventKind::SwapSideConditions,
            "-start" => EventKind::VolatileStart,
            "-end" => EventKind::VolatileEnd,
            "-activate" => EventKind::Activate,
            "-singleturn" => EventKind::SingleTurn,
            "-singlemove" => EventKind::SingleMove,
            "-immune" => EventKind::Immune,
            "-ability" => EventKind::Ability,
            "-endability" => EventKind::EndAbility,
            "-item" => EventKind::Item,
            "-enditem" => EventKind::EndItem,
            "-transform" => EventKind::Transform,
            "-mega" => EventKind::Mega,
            "-primal" => EventKind::Primal,
            "-zpower" => EventKind::ZPower,
            "-terastallize" => EventKind::Terastallize,
            "turn" => EventKind::Turn,
            "player" => EventKind::Player,
            "rule" => EventKind::Rule,
            "title" => EventKind::Title,
            "gen" => EventKind::Gen,
            "tier" => EventKind::Tier,
            "clearpoke" => EventKind::ClearPoke,
            "poke" => EventKind::Poke,
            "start" => EventKind::Start,
            "inactive" => EventKind::Inactive,
            "raw" => EventKind::Raw,
            "message" => EventKind::Message,
            "-message" => EventKind::MinorMessage,
            "win" => EventKind::Win,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Whether this kind belongs to the replay allow-list.
    ///
    /// `win` and unknown kinds are retained in turn buckets but are never
    /// handed to the state engine.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, EventKind::Win | EventKind::Other(_))
    }

    /// Whether events of this kind are rendered into scenario text
    pub fn is_rendered(&self) -> bool {
        !matches!(self, EventKind::Inactive | EventKind::Raw)
    }

    /// Whether this kind moves a unit onto the field
    pub fn is_entry(&self) -> bool {
        matches!(self, EventKind::Switch | EventKind::Drag)
    }
}

/// One parsed protocol line: the decoded kind plus the ordered raw fields.
///
/// `fields[0]` is always the kind token exactly as it appeared in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    fields: Vec<String>,
    line_number: usize,
}

impl Event {
    /// Build an event from its fields (kind first)
    pub fn new(fields: Vec<String>, line_number: usize) -> Self {
        let kind = EventKind::parse(fields.first().map(String::as_str).unwrap_or(""));
        Self {
            kind,
            fields,
            line_number,
        }
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field by index, `None` when the line was too short
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// The acting unit or side token (`fields[1]`), empty when absent
    pub fn actor(&self) -> &str {
        self.field(1).unwrap_or("")
    }

    /// Whether the actor token belongs to the given side label ("p1", "p2")
    pub fn is_from(&self, side: &str) -> bool {
        !side.is_empty() && self.actor().starts_with(side)
    }

    /// 1-based source line this event was read from
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Return a copy with the actor field replaced
    pub fn with_actor(&self, actor: &str) -> Self {
        let mut fields = self.fields.clone();
        if let Some(slot) = fields.get_mut(1) {
            *slot = actor.to_string();
        }
        Self {
            kind: self.kind.clone(),
            fields,
            line_number: self.line_number,
        }
    }

    /// Parse the actor as a unit identifier, if it is one
    pub fn pokemon(&self) -> Option<Pokemon> {
        Pokemon::parse(self.actor())
    }

    /// Reassemble the protocol line
    pub fn to_line(&self) -> String {
        format!("{}{}", DELIMITER, self.fields.join("|"))
    }
}

/// Tokenize a single line. Lines not starting with the delimiter are ignored.
pub fn parse_line(line: &str, line_number: usize) -> Option<Event> {
    let line = line.trim();
    let rest = line.strip_prefix(DELIMITER)?;
    let fields = rest.split(DELIMITER).map(str::to_string).collect();
    Some(Event::new(fields, line_number))
}

/// Tokenize a whole log, keeping protocol lines in order
pub fn tokenize(text: &str) -> Vec<Event> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}
