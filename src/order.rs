use std::cmp::Ordering;

use crate::episode::Episode;

/// Compare two episodes for final feed order.
///
/// Provider sorts ascending; show, series, episode and title all sort
/// descending, so that within one provider the latest installments surface
/// first. This also puts shows with numbering embedded in the name (a
/// "... Series 3" before a "... Series 2") in the expected order.
pub fn episode_cmp(a: &Episode, b: &Episode) -> Ordering {
    a.provider
        .cmp(&b.provider)
        .then_with(|| b.show.cmp(&a.show))
        .then_with(|| b.series_number.cmp(&a.series_number))
        .then_with(|| b.episode_number.cmp(&a.episode_number))
        .then_with(|| b.title.cmp(&a.title))
}

/// Sort episodes in place into final feed order.
///
/// Episodes equal on all five keys are indistinguishable, so no stability
/// guarantee is needed.
pub fn sort_episodes(episodes: &mut [Episode]) {
    episodes.sort_unstable_by(episode_cmp);
}
