use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vendo::domain::change::make_change;
use vendo::domain::money::{DenomKind, Denomination, PaymentTally};

fn pool(stocks: &[(i64, u32)]) -> Vec<Denomination> {
    let mut denoms: Vec<Denomination> = stocks
        .iter()
        .map(|(value, stock)| Denomination::new(DenomKind::Coin, value.to_string(), *value, *stock))
        .collect();
    denoms.sort_by(|a, b| b.value.cmp(&a.value));
    denoms
}

#[test]
fn test_unit_coin_pool_always_pays_out() {
    // With a unit coin in ample supply, every non-negative amount has a
    // decomposition and the greedy scan finds one.
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let owed = rng.gen_range(0..=500);
        let denoms = pool(&[(50, 5), (20, 5), (10, 5), (5, 5), (1, 1000)]);

        let change = make_change(owed, &denoms, &PaymentTally::new())
            .unwrap_or_else(|e| panic!("owed {owed}: {e}"));
        let sum: i64 = change.iter().map(|id| id.value).sum();
        assert_eq!(sum, owed);
    }
}

#[test]
fn test_payout_honors_stock() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let stocks: Vec<(i64, u32)> = [50, 20, 10, 5, 1]
            .iter()
            .map(|v| (*v, rng.gen_range(0..4)))
            .collect();
        let owed = rng.gen_range(0..=200);
        let denoms = pool(&stocks);

        if let Ok(change) = make_change(owed, &denoms, &PaymentTally::new()) {
            let sum: i64 = change.iter().map(|id| id.value).sum();
            assert_eq!(sum, owed);
            for denom in &denoms {
                let used = change.iter().filter(|id| id.label == denom.label).count();
                assert!(
                    used as u32 <= denom.stock,
                    "used {used} of {} with stock {}",
                    denom.label,
                    denom.stock
                );
            }
        }
    }
}

#[test]
fn test_identical_inputs_identical_output() {
    let mut rng = StdRng::seed_from_u64(13);
    let denoms = pool(&[(50, 2), (20, 3), (10, 4), (5, 5), (1, 20)]);
    for _ in 0..100 {
        let owed = rng.gen_range(0..=150);
        let first = make_change(owed, &denoms, &PaymentTally::new());
        let second = make_change(owed, &denoms, &PaymentTally::new());
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            (a, b) => panic!("diverged for owed {owed}: {a:?} vs {b:?}"),
        }
    }
}
