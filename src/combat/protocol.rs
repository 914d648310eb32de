//! Combat arbitration shared by every archetype and the player.

/// How an overlap involving an enemy was classified.
///
/// Passed straight into the enemy's contact reactions for the dispatch that
/// produced it; nothing keeps it around afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player body against enemy body.
    PlayerTouch,
    /// Player attack box against enemy body.
    PlayerAttack,
    /// Enemy detect sensor against player body.
    PlayerDetected,
    /// Enemy attack box against player body.
    EnemyAttack,
    /// Enemy attack box against the player's parry box.
    PlayerParried,
}

/// Result of a player attack reaching a vulnerable enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// The enemy turned the blade aside.
    Parried,
    Hit,
}

/// Decide a player strike against a vulnerable enemy.
///
/// An enemy still reeling (`in_recoil`) always takes the hit. Otherwise it
/// parries when `roll` beats `threshold`, and always parries while the
/// player has not yet been taught to parry.
pub fn resolve_strike(in_recoil: bool, roll: f32, parry_taught: bool, threshold: f32) -> StrikeOutcome {
    if !in_recoil && (roll > threshold || !parry_taught) {
        StrikeOutcome::Parried
    } else {
        StrikeOutcome::Hit
    }
}

/// Multiplicative velocity decay: `damping` is the fraction left after one
/// second.
pub fn damp(velocity: f32, damping: f32, dt: f32) -> f32 {
    velocity * damping.powf(dt)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(false, 0.9, true, StrikeOutcome::Parried)]
    #[case(false, 0.1, true, StrikeOutcome::Hit)]
    #[case(false, 0.1, false, StrikeOutcome::Parried)]
    #[case(true, 0.9, true, StrikeOutcome::Hit)]
    #[case(true, 0.1, false, StrikeOutcome::Hit)]
    fn strike_arbitration(
        #[case] in_recoil: bool,
        #[case] roll: f32,
        #[case] taught: bool,
        #[case] expected: StrikeOutcome,
    ) {
        assert_eq!(resolve_strike(in_recoil, roll, taught, 0.5), expected);
    }

    #[test]
    fn roll_equal_to_threshold_is_a_hit() {
        assert_eq!(resolve_strike(false, 0.5, true, 0.5), StrikeOutcome::Hit);
    }

    #[test]
    fn damping_over_one_second_leaves_the_fraction() {
        assert_relative_eq!(damp(50.0, 0.01, 1.0), 0.5, epsilon = 1e-4);
        assert_relative_eq!(damp(50.0, 0.01, 0.0), 50.0);
        let half = damp(damp(50.0, 0.01, 0.5), 0.01, 0.5);
        assert_relative_eq!(half, 0.5, epsilon = 1e-4);
    }
}
