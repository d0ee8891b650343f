//! Title-structure archetype classification.

use crate::config::ArchetypeRules;
use crate::types::{ArchetypeKind, ArchetypeTally, TaggedVideo};

/// Classify every title in the tagged, ranked subset.
///
/// Returns one tally per archetype, in declaration order. Archetypes are not
/// mutually exclusive: a single title may increment several. Each tally's
/// best example is the matching video with the highest velocity, tracked
/// directly on the accumulator.
#[must_use]
pub fn classify(tagged: &[TaggedVideo], rules: &ArchetypeRules) -> Vec<ArchetypeTally> {
    let mut tallies: Vec<ArchetypeTally> =
        ArchetypeKind::ALL.iter().map(|&k| ArchetypeTally::new(k)).collect();

    for item in tagged {
        let title = &item.video.record.title;
        for tally in &mut tallies {
            if !rules.matches(tally.kind, title) {
                continue;
            }
            tally.match_count += 1;
            if tally.best_example_title.is_none()
                || item.video.velocity > tally.best_example_velocity
            {
                tally.best_example_title = Some(title.clone());
                tally.best_example_velocity = item.video.velocity;
            }
        }
    }

    tallies
}

/// The archetype with the highest match count.
///
/// Returns `None` iff every count is zero. Ties resolve to the archetype
/// declared first: the forward scan only replaces the current best on a
/// strictly greater count.
#[must_use]
pub fn dominant(tallies: &[ArchetypeTally]) -> Option<&ArchetypeTally> {
    let mut best: Option<&ArchetypeTally> = None;
    for tally in tallies {
        if tally.match_count == 0 {
            continue;
        }
        match best {
            Some(b) if tally.match_count <= b.match_count => {}
            _ => best = Some(tally),
        }
    }
    best
}
