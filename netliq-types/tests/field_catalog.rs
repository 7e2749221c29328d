use std::collections::BTreeMap;

use netliq_types::{
    Change, ChangeRecord, Field, LiquidityTrend, NetliqError, SignalRecord, TrafficLight, Unit,
    Verdict, VolatilityRegime,
};

#[test]
fn column_names_parse_back_to_fields() {
    for f in Field::ALL {
        let parsed: Field = f.as_str().parse().expect("known column");
        assert_eq!(parsed, f);
    }
    assert!(matches!(
        "NOPE".parse::<Field>(),
        Err(NetliqError::Data(_))
    ));
}

#[test]
fn balance_sheet_is_reported_in_a_unit_1000x_smaller() {
    let walcl = Field::Walcl.unit().per_billion().unwrap();
    let rrp = Field::Rrp.unit().per_billion().unwrap();
    let tga = Field::Tga.unit().per_billion().unwrap();
    assert_eq!(walcl, 1000.0);
    assert_eq!(rrp, 1.0);
    assert_eq!(tga, 1.0);
    assert_eq!(Field::Vix.unit(), Unit::Points);
    assert!(Field::Spy.unit().per_billion().is_none());
}

#[test]
fn derived_fields_are_flagged() {
    let derived: Vec<Field> = Field::ALL.into_iter().filter(|f| f.is_derived()).collect();
    assert_eq!(derived, vec![Field::NetLiquidity, Field::NetLiquidityMa20]);
    assert!(Field::MACRO.iter().all(|f| !f.is_derived()));
    assert!(Field::MARKET.iter().all(|f| !f.is_derived()));
}

#[test]
fn labels_serialize_upper_case() {
    let json = serde_json::to_string(&VolatilityRegime::HighVol).unwrap();
    assert_eq!(json, "\"HIGH_VOL\"");
    let json = serde_json::to_string(&LiquidityTrend::Expanding).unwrap();
    assert_eq!(json, "\"EXPANDING\"");
    assert_eq!(TrafficLight::Gray.to_string(), "GRAY");
}

#[test]
fn metrics_map_uses_column_names_as_keys() {
    let mut metrics = BTreeMap::new();
    metrics.insert(
        Field::NetLiquidity,
        ChangeRecord {
            current: Some(5600.0),
            one_week: Change {
                delta: 100.0,
                pct: 2.5,
            },
            two_weeks: Change::ZERO,
            one_month: Change::ZERO,
        },
    );
    let value = serde_json::to_value(&metrics).unwrap();
    let rec = &value["Net Liquidity"];
    assert_eq!(rec["current"], 5600.0);
    assert_eq!(rec["1w"]["delta"], 100.0);
    assert_eq!(rec["1m"]["pct"], 0.0);

    let back: BTreeMap<Field, ChangeRecord> = serde_json::from_value(value).unwrap();
    assert_eq!(back, metrics);
}

#[test]
fn no_data_record_is_gray() {
    let rec = SignalRecord::no_data();
    assert_eq!(rec.overall, Verdict::new(TrafficLight::Gray, "No Data"));
    assert!(rec.liquidity_trend.is_none());
    assert!(rec.volatility_regime.is_none());
}

#[test]
fn missing_field_message_names_columns() {
    let err = NetliqError::missing(vec![Field::Rrp, Field::Tga]);
    assert_eq!(err.to_string(), "missing required fields: RRP, TGA");
}
