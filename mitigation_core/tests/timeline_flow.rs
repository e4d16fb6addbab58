//! Integration test: Load timeline -> Replay casts -> Mitigate every hit
//!
//! Runs whole timelines through the bundled skill and status tables.

use mitigation_core::config::EngineConstants;
use mitigation_core::timeline::{parse_timeline, Composition, DamageEvent, DamageKind, Timeline};
use mitigation_core::{
    calculate_timeline, party_state_at, CastEvent, DamageType, Job, PlayerId, SkillCatalog, StatusCatalog,
    StatusEvent, StatusId,
};

const RAID_JSON: &str = r#"{
    "version": "1.0",
    "exportedAt": "2024-06-01T12:00:00Z",
    "timeline": {
        "id": "m1s-plan",
        "name": "M1S week one",
        "encounter": { "id": 93, "name": "Black Cat", "displayName": "AAC Light-heavyweight M1 (Savage)", "zone": "Arcadion" },
        "composition": {
            "players": [
                { "id": 1, "job": "PLD", "name": "MT" },
                { "id": 2, "job": "WAR", "name": "ST" },
                { "id": 3, "job": "SCH", "name": "H1" },
                { "id": 4, "job": "SGE", "name": "H2" }
            ]
        },
        "phases": [ { "id": "p1", "name": "Phase 1", "startTime": 0 } ],
        "damageEvents": [
            { "id": "buster", "name": "Quadruple Crossing", "time": 12, "damage": 100000,
              "type": "tankbuster", "damageType": "physical", "targetPlayerId": 1 },
            { "id": "raidwide-1", "name": "One-two Paw", "time": 5, "damage": 50000,
              "type": "raidwide", "damageType": "magical" },
            { "id": "raidwide-2", "name": "Bloody Scratch", "time": 8, "damage": 20000,
              "type": "raidwide", "damageType": "magical" },
            { "id": "late", "name": "Elevate and Eviscerate", "time": 45, "damage": 30000,
              "type": "aoe", "damageType": "physical" }
        ],
        "castEvents": [
            { "id": "c-reprisal", "actionId": 7535, "timestamp": 0, "playerId": 1, "job": "PLD" },
            { "id": "c-panhaima", "actionId": 24311, "timestamp": 1, "playerId": 4, "job": "SGE" },
            { "id": "c-adlo", "actionId": 185, "timestamp": 10, "playerId": 3, "job": "SCH", "targetPlayerId": 1 },
            { "id": "c-unknown", "actionId": 99999, "timestamp": 11, "playerId": 3, "job": "SCH" }
        ],
        "statusEvents": []
    }
}"#;

fn catalogs() -> (SkillCatalog, StatusCatalog, EngineConstants) {
    (
        SkillCatalog::with_defaults(),
        StatusCatalog::with_defaults(),
        EngineConstants::default(),
    )
}

fn roster() -> Composition {
    Composition::new()
        .with_player(1, Job::Pld, "MT")
        .with_player(2, Job::War, "ST")
        .with_player(3, Job::Sch, "H1")
        .with_player(4, Job::Sge, "H2")
}

#[test]
fn test_exported_timeline_end_to_end() {
    let (skills, statuses, constants) = catalogs();
    let timeline = parse_timeline(RAID_JSON).expect("timeline parses");
    timeline.validate().expect("timeline is valid");

    let results = calculate_timeline(&timeline, &skills, &statuses, &constants);
    assert_eq!(results.len(), 4);

    // Reprisal 0.9, then one Panhaima (10000) for the whole raid
    let first = &results["raidwide-1"];
    assert!((first.final_damage - 35000.0).abs() < f64::EPSILON);
    assert!((first.mitigation_percentage - 30.0).abs() < f64::EPSILON);

    // MT's Panhaima is spent, the next copy in roster order soaks this one
    let second = &results["raidwide-2"];
    assert!((second.final_damage - 8000.0).abs() < f64::EPSILON);
    assert!((second.mitigation_percentage - 60.0).abs() < f64::EPSILON);

    // Single-target Adloquium: 12.5% of 100000
    let buster = &results["buster"];
    assert!((buster.final_damage - 77500.0).abs() < f64::EPSILON);
    assert!((buster.mitigation_percentage - 22.5).abs() < f64::EPSILON);
    let applied: Vec<StatusId> = buster.applied_statuses.iter().map(|s| s.status_id).collect();
    assert_eq!(applied, vec![StatusId(1193), StatusId(297)]);

    // Everything has worn off
    let late = &results["late"];
    assert!((late.final_damage - 30000.0).abs() < f64::EPSILON);
    assert!(late.applied_statuses.is_empty());
}

#[test]
fn test_reordered_events_give_same_results() {
    let (skills, statuses, constants) = catalogs();
    let timeline = parse_timeline(RAID_JSON).expect("timeline parses");

    let mut shuffled = timeline.clone();
    shuffled.damage_events.reverse();
    shuffled.cast_events.reverse();

    assert_eq!(
        calculate_timeline(&timeline, &skills, &statuses, &constants),
        calculate_timeline(&shuffled, &skills, &statuses, &constants)
    );
}

#[test]
fn test_state_query_matches_replay() {
    let (skills, statuses, constants) = catalogs();
    let timeline = parse_timeline(RAID_JSON).expect("timeline parses");

    let state = timeline.party_state_at(10.0, &skills, &statuses, &constants);
    let direct = party_state_at(&timeline.initial_party_state(&constants), &timeline.cast_events, &skills, 10.0);
    assert_eq!(state, direct);

    // Reprisal on the boss, Panhaima on all four, Galvanize on the MT
    assert_eq!(state.enemy.statuses.len(), 1);
    assert_eq!(state.players[0].statuses.len(), 2);
    assert_eq!(state.players[1].statuses.len(), 1);
    assert_eq!(state.players[0].statuses[1].remaining_barrier, Some(12500.0));

    // Reprisal ended at 15
    let later = timeline.party_state_at(15.5, &skills, &statuses, &constants);
    assert!(later.enemy.statuses.is_empty());
}

#[test]
fn test_deployment_spreads_remaining_galvanize() {
    let (skills, statuses, constants) = catalogs();
    let timeline = Timeline::new("t", "spread", roster())
        .with_cast_event(CastEvent::new("adlo", 185, 0.0, 3, Job::Sch).with_target(1))
        .with_cast_event(CastEvent::new("deploy", 3585, 5.0, 3, Job::Sch).with_target(1))
        .with_damage_event(
            DamageEvent::new("hit", "raidwide", 10.0, 20000.0, DamageType::Magical).with_kind(DamageKind::Raidwide),
        );

    let state = timeline.party_state_at(6.0, &skills, &statuses, &constants);
    for player in &state.players {
        assert!(player
            .statuses
            .iter()
            .any(|s| s.status_id == StatusId(297) && s.remaining_barrier == Some(12500.0)));
    }

    // One Galvanize counts for an AOE hit
    let results = calculate_timeline(&timeline, &skills, &statuses, &constants);
    assert!((results["hit"].final_damage - 7500.0).abs() < f64::EPSILON);
}

#[test]
fn test_accession_without_recitation_grants_base_shield_only() {
    let (skills, statuses, constants) = catalogs();
    let timeline = Timeline::new("t", "accession", roster())
        .with_cast_event(CastEvent::new("acc", 37013, 0.0, 3, Job::Sch));

    let state = timeline.party_state_at(1.0, &skills, &statuses, &constants);
    for player in &state.players {
        let ids: Vec<StatusId> = player.statuses.iter().map(|s| s.status_id).collect();
        assert_eq!(ids, vec![StatusId(297)]);
        assert_eq!(player.statuses[0].remaining_barrier, Some(18000.0));
        assert_eq!(player.statuses[0].source_player_id, Some(PlayerId(3)));
    }
}

#[test]
fn test_replay_mode_timeline() {
    let (skills, statuses, constants) = catalogs();
    let feint = StatusEvent {
        status_id: StatusId(1195),
        start_time: 0.0,
        end_time: 15.0,
        source_player_id: None,
        target_player_id: None,
        target_instance: None,
        absorb: None,
    };
    let recitation = StatusEvent {
        status_id: StatusId(1896),
        target_player_id: Some(PlayerId(3)),
        ..feint.clone()
    };
    let mut timeline = Timeline::new("t", "replay", roster())
        .with_status_event(feint)
        .with_status_event(recitation)
        .with_damage_event(DamageEvent::new("magic", "x", 5.0, 10000.0, DamageType::Magical))
        .with_damage_event(DamageEvent::new("phys", "y", 6.0, 10000.0, DamageType::Physical));
    timeline.is_replay_mode = true;

    let results = calculate_timeline(&timeline, &skills, &statuses, &constants);
    assert!((results["magic"].final_damage - 9500.0).abs() < f64::EPSILON);
    assert!((results["phys"].final_damage - 9000.0).abs() < f64::EPSILON);

    // Recitation has no metadata and never reaches the party
    let state = timeline.party_state_at(5.0, &skills, &statuses, &constants);
    assert!(state.players.iter().all(|p| p.statuses.is_empty()));
    assert_eq!(state.enemy.statuses.len(), 1);
}
