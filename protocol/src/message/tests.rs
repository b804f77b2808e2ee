#[cfg(test)]
mod tests {
    use crate::message::{BattleMessage, HpStatus, Player, Pokemon, PokemonDetails, Stat};
    use crate::parse_line;

    fn decode(line: &str) -> anyhow::Result<BattleMessage> {
        BattleMessage::decode(&parse_line(line, 1).unwrap())
    }

    #[test]
    fn test_pokemon_parse() {
        let poke = Pokemon::parse("p1a: Char").unwrap();
        assert_eq!(poke.player, Player::P1);
        assert_eq!(poke.position, Some('a'));
        assert_eq!(poke.name, "Char");
        assert_eq!(poke.key(), "p1: Char");

        let bare = Pokemon::parse("p2: Mr. Mime").unwrap();
        assert_eq!(bare.position, None);
        assert_eq!(bare.name, "Mr. Mime");

        assert!(Pokemon::parse("p1a").is_none());
        assert!(Pokemon::parse("Alice").is_none());
    }

    #[test]
    fn test_details_parse() {
        let details = PokemonDetails::parse("Charizard, L50, M, shiny, tera:Fire");
        assert_eq!(details.species, "Charizard");
        assert_eq!(details.level, Some(50));
        assert_eq!(details.gender, Some('M'));
        assert!(details.shiny);
        assert_eq!(details.tera_type.as_deref(), Some("Fire"));
    }

    #[test]
    fn test_hp_status_parse() {
        assert_eq!(
            HpStatus::parse("50/100 slp"),
            Some(HpStatus {
                current: 50,
                max: Some(100),
                status: Some("slp".to_string()),
            })
        );
        let fainted = HpStatus::parse("0 fnt").unwrap();
        assert!(fainted.is_fainted());
        assert_eq!(fainted.max, None);
        assert!(HpStatus::parse("abc/100").is_none());
        assert!(HpStatus::parse("").is_none());
    }

    #[test]
    fn test_decode_switch() {
        let msg = decode("|switch|p1a: Char|Charizard, L50|100/100").unwrap();
        match msg {
            BattleMessage::Switch {
                pokemon,
                details,
                hp_status,
            } => {
                assert_eq!(pokemon.name, "Char");
                assert_eq!(details.species, "Charizard");
                assert_eq!(hp_status.unwrap().current, 100);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_decode_move_with_tags() {
        let msg = decode("|move|p2a: Squirtle|Tackle|p1a: Char|[miss]").unwrap();
        assert_eq!(
            msg,
            BattleMessage::Move {
                pokemon: Pokemon::parse("p2a: Squirtle").unwrap(),
                move_name: "Tackle".to_string(),
                target: Pokemon::parse("p1a: Char"),
                miss: true,
                still: false,
            }
        );
    }

    #[test]
    fn test_decode_boost() {
        let msg = decode("|-boost|p1a: Char|spa|2").unwrap();
        assert!(matches!(
            msg,
            BattleMessage::Boost {
                stat: Stat::Spa,
                amount: 2,
                ..
            }
        ));
        assert!(decode("|-boost|p1a: Char|spa|lots").is_err());
    }

    #[test]
    fn test_decode_turn() {
        assert_eq!(decode("|turn|7").unwrap(), BattleMessage::Turn(7));
        assert!(decode("|turn|abc").is_err());
    }

    #[test]
    fn test_decode_player() {
        let msg = decode("|player|p2|Bob|60|1500").unwrap();
        assert_eq!(
            msg,
            BattleMessage::BattlePlayer {
                player: Player::P2,
                username: "Bob".to_string(),
                avatar: "60".to_string(),
                rating: Some(1500),
            }
        );
    }

    #[test]
    fn test_decode_terastallize() {
        let msg = decode("|-terastallize|p1a: Char|Dragon").unwrap();
        assert!(matches!(
            msg,
            BattleMessage::Terastallize { ref tera_type, .. } if tera_type == "Dragon"
        ));
        assert!(decode("|-terastallize|p1a: Char|").is_err());
    }

    #[test]
    fn test_decode_unit_requires_identifier() {
        assert!(decode("|-damage|p1a|50/100").is_err());
        assert!(decode("|faint|").is_err());
    }

    #[test]
    fn test_decode_swapboost_defaults_to_all_stats() {
        let msg = decode("|-swapboost|p1a: Char|p2a: Squirtle|").unwrap();
        match msg {
            BattleMessage::SwapBoost { stats, .. } => assert_eq!(stats.len(), 7),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_kind() {
        assert_eq!(
            decode("|j|Alice").unwrap(),
            BattleMessage::Unhandled("j".to_string())
        );
    }
}
