//! Canned quest catalog backing the engine's mock mode.
//!
//! Mock mode exists for demos and tests that want plausible quests without the
//! template machinery: the catalog is shuffled with a goal-seeded stream and
//! returned as-is, so output is deterministic per goal but requires no
//! configuration at all.

/// Fixed catalog of (name, description, points) triples.
///
/// Mock generation returns at most this many quests per call regardless of
/// how many were requested; callers must tolerate fewer results.
pub(super) const CATALOG: [(&str, &str, u32); 7] = [
    (
        "Quick Win",
        "Knock out the smallest possible task first thing.",
        5,
    ),
    (
        "Mini Habit",
        "Repeat a two-minute habit that supports the goal.",
        6,
    ),
    (
        "Boost",
        "Spend ten focused minutes pushing the goal ahead.",
        8,
    ),
    (
        "Momentum",
        "Build on yesterday's progress with one more step.",
        10,
    ),
    (
        "Push Forward",
        "Tackle the next concrete obstacle in the way.",
        12,
    ),
    (
        "Step Forward",
        "Finish one visible piece of the larger goal.",
        13,
    ),
    (
        "Micro Task",
        "Break the goal down and complete a single fragment.",
        15,
    ),
];

/// Point spread of the catalog, used to rate mock quests on the same
/// normalized difficulty scale as simulated ones.
pub(super) const CATALOG_POINTS_LOW: u32 = 5;
pub(super) const CATALOG_POINTS_HIGH: u32 = 15;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_points_stay_in_declared_spread() {
        for (name, _, points) in CATALOG {
            assert!(
                (CATALOG_POINTS_LOW..=CATALOG_POINTS_HIGH).contains(&points),
                "catalog entry {} has points outside the spread",
                name
            );
        }
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<&str> = CATALOG.iter().map(|(n, _, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }
}
