mod support;

use std::collections::HashMap;

use common::{EquipmentType, Kill, Phase, Point, Team};
use overview::decoder::{
    BombState, Combatant, Detonation, HeldWeapon, Participant, Shooter, TeamInfo, Vector,
    WorldState,
};
use overview::{Config, GameEvent, Match, MatchError};
use pretty_assertions::assert_eq;
use support::{convars, ScriptedDecoder};
use time::Duration;
use tracing_test::traced_test;

fn vector(x: f64, y: f64) -> Vector {
    Vector { x, y, z: 0.0 }
}

fn world() -> WorldState {
    WorldState {
        convars: convars(&[
            ("mp_freezetime", "5"),
            ("mp_roundtime_defuse", "1.75"),
            ("mp_round_restart_delay", "7"),
        ]),
        ..Default::default()
    }
}

#[test]
fn phases_follow_round_events() {
    let events: HashMap<_, _> = [
        (0, vec![GameEvent::RoundStart]),
        (10, vec![GameEvent::FreezetimeEnd]),
        (50, vec![GameEvent::BombPlanted]),
    ]
    .into_iter()
    .collect();
    let decoder = ScriptedDecoder::new("de_dust2", 10.0, 10.0).frames(60, 100, &world(), events);

    let game = Match::parse(decoder, &Config::default()).unwrap();
    assert_eq!(60, game.states.len());

    for (frame, state) in game.states.iter().enumerate() {
        let expected = match frame {
            0..=9 => Phase::Freezetime,
            10..=49 => Phase::Regular,
            _ => Phase::Planted,
        };
        assert_eq!(expected, state.timer.phase, "frame {}", frame);
        assert_eq!(frame, state.frame);
    }

    assert_eq!(Duration::seconds(5), game.states[0].timer.time_remaining);
    assert_eq!(
        Duration::milliseconds(4100),
        game.states[9].timer.time_remaining
    );
    for frame in 1..10 {
        assert!(game.states[frame].timer.time_remaining < game.states[frame - 1].timer.time_remaining);
    }

    assert_eq!(Duration::seconds(105), game.states[10].timer.time_remaining);
    assert_eq!(Duration::seconds(40), game.states[50].timer.time_remaining);
    assert_eq!(
        Duration::milliseconds(39_100),
        game.states[59].timer.time_remaining
    );

    assert_eq!(vec![0], game.round_starts);
    assert_eq!(Some(0), game.round_at(42));
}

#[test]
fn warmup_overrides_phase() {
    let mut warmup = world();
    warmup.is_warmup = true;

    let decoder = ScriptedDecoder::new("de_dust2", 10.0, 10.0)
        .frame(0, vec![GameEvent::RoundStart], warmup.clone())
        .frame(1, vec![], warmup)
        .frame(2, vec![], world());

    let game = Match::parse(decoder, &Config::default()).unwrap();

    assert_eq!(Phase::Warmup, game.states[0].timer.phase);
    assert_eq!(Duration::ZERO, game.states[1].timer.time_remaining);
    assert_eq!(Phase::Freezetime, game.states[2].timer.phase);
    assert_eq!(Duration::milliseconds(4800), game.states[2].timer.time_remaining);
}

#[test]
#[traced_test]
fn skipped_tick_continues() {
    let decoder = ScriptedDecoder::new("de_dust2", 10.0, 10.0)
        .frame(0, vec![], world())
        .frame(1, vec![], world())
        .error(2, "broken packet entities")
        .frame(3, vec![], world())
        .frame(4, vec![], world());

    let game = Match::parse(decoder, &Config::default()).unwrap();

    assert_eq!(
        vec![0, 1, 3, 4],
        game.states.iter().map(|s| s.frame).collect::<Vec<_>>()
    );
    assert!(logs_contain("Skipping frame"));
    assert!(logs_contain("broken packet entities"));
}

#[test]
fn missing_rates_need_fallbacks() {
    let decoder = ScriptedDecoder::new("de_dust2", f64::NAN, 64.0);
    assert!(matches!(
        Match::parse(decoder, &Config::default()),
        Err(MatchError::MissingFrameRate)
    ));

    let decoder = ScriptedDecoder::new("de_dust2", 64.0, 0.0);
    assert!(matches!(
        Match::parse(decoder, &Config::default()),
        Err(MatchError::MissingTickRate)
    ));

    let decoder = ScriptedDecoder::new("de_dust2", 0.0, 0.0);
    let config = Config {
        fallback_frame_rate: Some(32.0),
        fallback_tick_rate: Some(128.0),
    };
    let game = Match::parse(decoder, &config).unwrap();
    assert_eq!(32.0, game.frame_rate);
    assert_eq!(32, game.frame_rate_rounded);
    assert_eq!(128.0, game.tick_rate);
    assert_eq!(576, game.smoke_effect_lifetime);

    let decoder = ScriptedDecoder::new("de_dust2", 0.0, 64.0);
    let config = Config {
        fallback_frame_rate: Some(f64::NAN),
        fallback_tick_rate: None,
    };
    assert!(matches!(
        Match::parse(decoder, &config),
        Err(MatchError::InvalidFallback { name: "framerate", .. })
    ));
}

#[test]
fn reported_rates_win_over_fallbacks() {
    let decoder = ScriptedDecoder::new("de_dust2", 64.0, 128.0);
    let config = Config {
        fallback_frame_rate: Some(32.0),
        fallback_tick_rate: Some(64.0),
    };
    let game = Match::parse(decoder, &config).unwrap();
    assert_eq!(64.0, game.frame_rate);
    assert_eq!(128.0, game.tick_rate);
}

#[test]
fn shots_linger_per_weapon() {
    let shooter = Some(Shooter {
        position: vector(10.0, 20.0),
        view_direction_x: 45.0,
    });
    let events: HashMap<_, _> = [(
        0,
        vec![
            GameEvent::WeaponFire {
                shooter,
                weapon: EquipmentType::Ak47,
            },
            GameEvent::WeaponFire {
                shooter,
                weapon: EquipmentType::Awp,
            },
            GameEvent::WeaponFire {
                shooter,
                weapon: EquipmentType::Knife,
            },
            GameEvent::WeaponFire {
                shooter,
                weapon: EquipmentType::He,
            },
            GameEvent::WeaponFire {
                shooter: None,
                weapon: EquipmentType::M4a1,
            },
        ],
    )]
    .into_iter()
    .collect();
    let decoder = ScriptedDecoder::new("de_dust2", 64.0, 64.0).frames(12, 15, &world(), events);

    let game = Match::parse(decoder, &Config::default()).unwrap();

    let counts: Vec<usize> = game.states.iter().map(|s| s.shots.len()).collect();
    assert_eq!(vec![2, 2, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0], counts);

    let awp = game.states[7].shots[0];
    assert!(awp.is_awp_shot);
    assert_eq!(Point::new(10.0, 20.0), awp.position);
    assert_eq!(45.0, awp.view_direction_x);
}

#[test]
fn grenade_effects_and_round_reset() {
    let events: HashMap<_, _> = [
        (
            2,
            vec![
                GameEvent::SmokeStart(Detonation {
                    position: vector(1.0, 1.0),
                    grenade: EquipmentType::Smoke,
                }),
                GameEvent::FlashExplode(Detonation {
                    position: vector(2.0, 2.0),
                    grenade: EquipmentType::Flash,
                }),
            ],
        ),
        (
            5,
            vec![GameEvent::HeExplode(Detonation {
                position: vector(3.0, 3.0),
                grenade: EquipmentType::He,
            })],
        ),
        (30, vec![GameEvent::RoundStart]),
    ]
    .into_iter()
    .collect();
    // 2 frames per second: smokes live 36 frames, everything else 10
    let decoder = ScriptedDecoder::new("de_dust2", 2.0, 64.0).frames(45, 500, &world(), events);

    let game = Match::parse(decoder, &Config::default()).unwrap();

    let kinds = |frame: usize| -> Vec<EquipmentType> {
        game.states[frame]
            .grenade_effects
            .iter()
            .map(|g| g.grenade_type)
            .collect()
    };

    assert_eq!(Vec::<EquipmentType>::new(), kinds(1));
    assert_eq!(vec![EquipmentType::Smoke, EquipmentType::Flash], kinds(2));
    assert_eq!(
        vec![EquipmentType::Smoke, EquipmentType::Flash, EquipmentType::He],
        kinds(5)
    );
    assert_eq!(vec![EquipmentType::Smoke, EquipmentType::He], kinds(12));
    assert_eq!(vec![EquipmentType::Smoke], kinds(15));
    // The round start frame still shows the smoke, the following ones do not
    assert_eq!(vec![EquipmentType::Smoke], kinds(30));
    assert_eq!(28, game.states[30].grenade_effects[0].lifetime);
    assert_eq!(Vec::<EquipmentType>::new(), kinds(31));
    assert_eq!(Vec::<EquipmentType>::new(), kinds(37));
}

#[test]
fn killfeed_names_the_world() {
    let player = Combatant {
        name: "s1mple".to_owned(),
        team: Team::CounterTerrorists,
    };
    let events: HashMap<_, _> = [
        (
            1,
            vec![GameEvent::Kill {
                killer: Some(player.clone()),
                victim: Some(Combatant {
                    name: "victim".to_owned(),
                    team: Team::Terrorists,
                }),
                weapon: EquipmentType::Awp,
            }],
        ),
        (
            2,
            vec![GameEvent::Kill {
                killer: None,
                victim: Some(player),
                weapon: EquipmentType::World,
            }],
        ),
    ]
    .into_iter()
    .collect();
    let decoder = ScriptedDecoder::new("de_dust2", 1.0, 64.0).frames(15, 1000, &world(), events);

    let game = Match::parse(decoder, &Config::default()).unwrap();

    assert!(game.states[0].killfeed.is_empty());
    assert_eq!(
        vec![
            Kill {
                killer_name: "s1mple".to_owned(),
                killer_team: Team::CounterTerrorists,
                victim_name: "victim".to_owned(),
                victim_team: Team::Terrorists,
                weapon: EquipmentType::Awp,
            },
            Kill {
                killer_name: "World".to_owned(),
                killer_team: Team::Unassigned,
                victim_name: "s1mple".to_owned(),
                victim_team: Team::CounterTerrorists,
                weapon: EquipmentType::World,
            },
        ],
        game.states[2].killfeed
    );
    // 1 frame per second keeps a kill for 10 frames
    assert_eq!(2, game.states[10].killfeed.len());
    assert_eq!(1, game.states[11].killfeed.len());
    assert!(game.states[12].killfeed.is_empty());
}

#[test]
fn half_and_round_starts() {
    let events: HashMap<_, _> = [
        (0, vec![GameEvent::MatchStart, GameEvent::RoundStart]),
        (20, vec![GameEvent::RoundEnd]),
        (25, vec![GameEvent::RoundStart]),
        (40, vec![GameEvent::HalfEnded]),
        (50, vec![GameEvent::RoundStart]),
        (70, vec![GameEvent::WinPanelMatch]),
    ]
    .into_iter()
    .collect();
    let decoder = ScriptedDecoder::new("de_dust2", 10.0, 64.0).frames(80, 100, &world(), events);

    let game = Match::parse(decoder, &Config::default()).unwrap();

    assert_eq!(vec![0, 40, 70], game.half_starts);
    assert_eq!(vec![0, 25, 50], game.round_starts);
    assert_eq!(Some(1), game.round_at(25));
    assert_eq!(Some(1), game.round_at(49));
    assert_eq!(Some(2), game.round_at(79));

    assert_eq!(Phase::Restart, game.states[22].timer.phase);
    assert_eq!(Duration::milliseconds(6800), game.states[22].timer.time_remaining);
    // Halftime counts down like a restart
    assert_eq!(Phase::Restart, game.states[45].timer.phase);
}

#[test]
fn snapshot_resolves_world_state() {
    let mut state = world();
    state.ingame_tick = 4242;
    state.participants = vec![
        Participant {
            name: "terrorist".to_owned(),
            steam_id64: 7,
            team: Team::Terrorists,
            position: vector(100.0, 200.0),
            health: 100,
            money: 800,
            is_alive: true,
            weapons: vec![
                HeldWeapon {
                    kind: EquipmentType::Bomb,
                    ammo_reserve: 0,
                },
                HeldWeapon {
                    kind: EquipmentType::Glock,
                    ammo_reserve: 120,
                },
            ],
            ..Default::default()
        },
        Participant {
            name: "caster".to_owned(),
            team: Team::Spectators,
            ..Default::default()
        },
    ];
    state.bomb = BombState {
        position: vector(100.0, 200.0),
        carrier: Some(7),
    };
    state.terrorists = TeamInfo {
        clan_name: "Team Spirit".to_owned(),
        score: 12,
    };

    let decoder = ScriptedDecoder::new("de_dust2", 64.0, 64.0).frame(0, vec![], state);
    let game = Match::parse(decoder, &Config::default()).unwrap();
    let snapshot = game.state(0).unwrap();

    assert_eq!(4242, snapshot.ingame_tick);
    assert_eq!(1, snapshot.players.len());
    let player = &snapshot.players[0];
    assert_eq!("terrorist", player.name);
    assert!(player.has_bomb);
    assert_eq!(vec![EquipmentType::Glock], player.inventory);
    assert_eq!(Point::new(100.0, 200.0), player.position);

    assert!(snapshot.bomb.is_being_carried);
    assert_eq!("Team Spirit", snapshot.team_terrorists.clan_name);
    assert_eq!(12, snapshot.team_terrorists.score);
    assert!(game.state(1).is_none());
}

#[test]
fn round_time_counts_whole_seconds() {
    let mut state = world();
    state.convars = convars(&[("mp_roundtime_defuse", "1.92")]);

    let decoder = ScriptedDecoder::new("de_dust2", 10.0, 10.0)
        .frame(0, vec![GameEvent::FreezetimeEnd], state.clone())
        .frame(1, vec![], state);
    let game = Match::parse(decoder, &Config::default()).unwrap();

    assert_eq!(Phase::Regular, game.states[0].timer.phase);
    assert_eq!(Duration::seconds(115), game.states[0].timer.time_remaining);
    assert_eq!(
        Duration::milliseconds(114_900),
        game.states[1].timer.time_remaining
    );
}

#[test]
fn absurd_rates_are_rejected() {
    let decoder = ScriptedDecoder::new("de_dust2", 0.0, 64.0);
    let config = Config {
        fallback_frame_rate: Some(1e15),
        fallback_tick_rate: None,
    };
    assert!(matches!(
        Match::parse(decoder, &config),
        Err(MatchError::InvalidFallback { name: "framerate", .. })
    ));

    let decoder = ScriptedDecoder::new("de_dust2", 64.0, 1e12);
    assert!(matches!(
        Match::parse(decoder, &Config::default()),
        Err(MatchError::MissingTickRate)
    ));

    // A corrupt reported rate falls back like a missing one
    let decoder = ScriptedDecoder::new("de_dust2", 1e15, 64.0);
    let config = Config {
        fallback_frame_rate: Some(64.0),
        fallback_tick_rate: None,
    };
    assert_eq!(64.0, Match::parse(decoder, &config).unwrap().frame_rate);
}
