use georisk_model::{SourceKind, ZoneKey};
use georisk_transform::{Aggregator, Observation, PeriodPolicy, YearMonth};
use proptest::prelude::*;

fn month(year: i32, month: u32) -> YearMonth {
    YearMonth { year, month }
}

proptest! {
    #[test]
    fn total_is_order_independent(
        rows in prop::collection::vec((0usize..4, prop::option::of(1u32..=12), 0u32..50), 0..60)
    ) {
        let keys = ["A|B", "A|B|COM_1", "A|C", "SIN_INFO"];
        let observations: Vec<Observation<YearMonth>> = rows
            .iter()
            .map(|(zone, m, measure)| Observation {
                zone_key: ZoneKey::new(keys[*zone]),
                period: m.map(|m| month(2020, m)),
                measure: f64::from(*measure),
            })
            .collect();
        let mut reversed = observations.clone();
        reversed.reverse();

        let aggregator = Aggregator::new(SourceKind::Police, PeriodPolicy::CountUndated);
        let (forward, _) = aggregator.aggregate(observations);
        let (backward, _) = aggregator.aggregate(reversed);
        prop_assert_eq!(&forward, &backward);

        for (idx, key) in keys.iter().enumerate() {
            let expected: u32 = rows.iter().filter(|r| r.0 == idx).map(|r| r.2).sum();
            let actual = forward.get(&ZoneKey::new(*key)).map(|agg| agg.total);
            if rows.iter().any(|r| r.0 == idx) {
                prop_assert_eq!(actual, Some(f64::from(expected)));
            } else {
                prop_assert_eq!(actual, None);
            }
        }
    }
}

#[test]
fn monthly_average_uses_distinct_months() {
    let aggregator = Aggregator::new(SourceKind::Robberies, PeriodPolicy::CountUndated);
    let rows = [
        (month(2020, 1), 1.0),
        (month(2020, 1), 1.0),
        (month(2020, 1), 1.0),
        (month(2020, 6), 1.0),
        (month(2021, 1), 1.0),
        (month(2021, 1), 1.0),
    ];
    let (table, stats) = aggregator.aggregate(rows.into_iter().map(|(period, measure)| Observation {
        zone_key: ZoneKey::new("ANTIOQUIA|MEDELLIN|BAR_LAURELES"),
        period: Some(period),
        measure,
    }));
    let zone = table
        .get(&ZoneKey::new("ANTIOQUIA|MEDELLIN|BAR_LAURELES"))
        .unwrap();
    assert_eq!(stats.rows, 6);
    assert_eq!(zone.periods, 3);
    assert_eq!(zone.total, 6.0);
    assert_eq!(zone.average, Some(2.0));
    assert_eq!(zone.source, SourceKind::Robberies);
}
