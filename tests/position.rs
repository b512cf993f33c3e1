mod common;

use player_profiles::{
    position::{Position, PositionStrategy, RoleToken, normalize_field},
    roster::normalize,
};
use proptest::prelude::*;

use common::StatsFixture;

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(vec![
            "GK", "CB", "LB", "RB", "LWB", "RWB", "DM", "CM", "AM", "LW", "RW", "CF", "LWF",
            "RWF", "LCMF", "RCMF", "DMF", "RDMF", "LDMF", "AMF", "RAMF", "LAMF", "RCB", "LCB",
        ])
        .prop_map(str::to_string),
        "[A-Z]{1,4}",
        "[a-z]{2,3}",
    ]
}

fn field() -> impl Strategy<Value = String> {
    proptest::collection::vec(token(), 0..7).prop_map(|tokens| tokens.join(", "))
}

fn strategy() -> impl Strategy<Value = PositionStrategy> {
    prop_oneof![
        Just(PositionStrategy::Standard),
        Just(PositionStrategy::FoldWingBacks)
    ]
}

proptest! {
    #[test]
    fn normalizing_twice_changes_nothing(raw in field(), strategy in strategy()) {
        let once = normalize_field(&raw, strategy);
        let rejoined = (0..4)
            .map(|slot| once.get(slot).map(Position::to_string).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        let twice = normalize_field(&rejoined, strategy);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn fold_strategy_never_yields_wing_backs(raw in field()) {
        let slots = normalize_field(&raw, PositionStrategy::FoldWingBacks);
        prop_assert!(!slots.contains(RoleToken::LWB));
        prop_assert!(!slots.contains(RoleToken::RWB));
    }

    #[test]
    fn role_index_only_offers_roles_the_player_holds(
        fields in proptest::collection::vec(field(), 1..4)
    ) {
        let mut fixture = StatsFixture::new();
        for field in &fields {
            fixture = fixture.player("Same Name", field, "900", 1.0);
        }
        let roster = normalize(&fixture.table(), PositionStrategy::Standard).unwrap();
        let roles = roster.roles_for_player("Same Name");
        for role in roles.roles() {
            prop_assert!(roster.records.iter().any(|r| r.name == "Same Name" && r.plays(role)));
        }
        for record in &roster.records {
            for position in record.positions.iter() {
                prop_assert!(roles.as_slice().contains(position));
            }
        }
    }
}

#[test]
fn position_index_unions_rows_in_priority_order() {
    let fixture = StatsFixture::new()
        .player("Twice Listed", "CF, LWF", "900", 1.0)
        .player("Twice Listed", "RWF, CB", "300", 1.0)
        .player("Someone Else", "GK", "900", 1.0);
    let roster = normalize(&fixture.table(), PositionStrategy::Standard).unwrap();
    assert_eq!(
        roster.roles_for_player("Twice Listed").roles(),
        vec![RoleToken::CB, RoleToken::LW, RoleToken::RW, RoleToken::CF]
    );
    assert!(roster.roles_for_player("Nobody").is_empty());
}

#[test]
fn case_does_not_matter_for_known_codes() {
    let slots = normalize_field("lwf, cb", PositionStrategy::Standard);
    assert_eq!(slots.to_set().roles(), vec![RoleToken::CB, RoleToken::LW]);
}
