//! Price derivation from weighted two-season points.

use super::types::PlayerAggregate;

/// Price floor, in the game's currency.
pub const MIN_PRICE: f64 = 3_000_000.0;
/// Price ceiling.
pub const MAX_PRICE: f64 = 15_000_000.0;
/// Weight of the current season's total in the blended score.
pub const CURRENT_WEIGHT: f64 = 0.7;
/// Weight of the previous season's total.
pub const PREVIOUS_WEIGHT: f64 = 0.3;
/// Concave power curve applied to the normalized score. Compresses the top
/// of the range so the best performers don't dominate the price spread.
pub const PRICE_CURVE_EXPONENT: f64 = 0.4;

/// Computes `weighted_points` and `price` for every player.
///
/// Min and max are taken over the whole finished collection before any
/// player is priced; pricing a record never depends on where it sits in
/// the slice. When every player is tied (including a one-player
/// collection) everyone gets exactly [`MIN_PRICE`], avoiding the zero
/// denominator. Prices round half away from zero; all priced values are
/// positive, so that behaves as round-half-up.
pub fn apply_prices(players: &mut [PlayerAggregate]) {
    for p in players.iter_mut() {
        p.weighted_points =
            CURRENT_WEIGHT * p.current_total + PREVIOUS_WEIGHT * p.previous_total;
    }

    let Some(min_w) = players.iter().map(|p| p.weighted_points).reduce(f64::min) else {
        return;
    };
    let max_w = players
        .iter()
        .map(|p| p.weighted_points)
        .fold(min_w, f64::max);

    for p in players.iter_mut() {
        p.price = if min_w == max_w {
            MIN_PRICE as u64
        } else {
            let normalized = (p.weighted_points - min_w) / (max_w - min_w);
            let adjusted = normalized.powf(PRICE_CURVE_EXPONENT);
            (MIN_PRICE + adjusted * (MAX_PRICE - MIN_PRICE)).round() as u64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, current: f64, previous: f64) -> PlayerAggregate {
        PlayerAggregate {
            player: name.into(),
            values: Default::default(),
            current_total: current,
            previous_total: previous,
            weighted_points: 0.0,
            price: 0,
        }
    }

    #[test]
    fn test_weighted_points_blend() {
        let mut players = vec![player("A", 100.0, 50.0)];
        apply_prices(&mut players);
        assert_eq!(players[0].weighted_points, 85.0);
    }

    #[test]
    fn test_all_tied_players_get_min_price() {
        let mut players = vec![player("A", 10.0, 10.0), player("B", 10.0, 10.0)];
        apply_prices(&mut players);
        assert!(players.iter().all(|p| p.price == 3_000_000));
    }

    #[test]
    fn test_single_player_gets_min_price() {
        let mut players = vec![player("Solo", 500.0, 0.0)];
        apply_prices(&mut players);
        assert_eq!(players[0].price, 3_000_000);
    }

    #[test]
    fn test_extremes_hit_both_bounds() {
        let mut players = vec![player("Top", 100.0, 50.0), player("Bottom", 0.0, 0.0)];
        apply_prices(&mut players);
        assert_eq!(players[0].price, 15_000_000);
        assert_eq!(players[1].price, 3_000_000);
    }

    #[test]
    fn test_price_is_monotonic_in_weighted_points() {
        let mut players = vec![
            player("low", 10.0, 0.0),
            player("mid", 50.0, 0.0),
            player("high", 90.0, 0.0),
            player("top", 100.0, 0.0),
        ];
        apply_prices(&mut players);

        for pair in players.windows(2) {
            assert!(pair[0].price <= pair[1].price);
        }
    }

    #[test]
    fn test_curve_compresses_the_upper_range() {
        // Halfway up the normalized range lands well above the midpoint.
        let mut players = vec![
            player("min", 0.0, 0.0),
            player("mid", 50.0, 0.0),
            player("max", 100.0, 0.0),
        ];
        apply_prices(&mut players);

        let expected = MIN_PRICE + 0.5_f64.powf(PRICE_CURVE_EXPONENT) * (MAX_PRICE - MIN_PRICE);
        assert_eq!(players[1].price, expected.round() as u64);
        assert!(players[1].price > 9_000_000);
    }

    #[test]
    fn test_empty_collection_is_a_no_op() {
        apply_prices(&mut []);
    }
}
