use crate::buckets::{BucketMap, CardSet, validate};
use crate::error::{Error, Result};
use crate::flashcard::Flashcard;
use std::borrow::Borrow;
use std::collections::HashSet;

/// Returned by [`hint`] when a card has no hint
pub const DEFAULT_HINT_FALLBACK: &str = "You do not deserve hint";

/// How well the user did on a card in one practice trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerDifficulty {
    /// Forgot - back to bucket 0
    Wrong,
    /// Recalled with effort - down one bucket
    Hard,
    /// Recalled easily - up one bucket
    Easy,
}

impl AnswerDifficulty {
    /// Bucket a card moves to after this answer, given the bucket it was in.
    /// `None` only for an easy answer in bucket `usize::MAX`.
    pub fn next_bucket(self, former: usize) -> Option<usize> {
        match self {
            AnswerDifficulty::Easy => former.checked_add(1),
            AnswerDifficulty::Hard => Some(former.saturating_sub(1)),
            AnswerDifficulty::Wrong => Some(0),
        }
    }
}

/// Whether cards in `bucket` are practiced on `day`.
///
/// Bucket 0 is due every day. Bucket `i >= 1` comes up every `2^i` days,
/// starting from day `2^i`; day 0 only practices bucket 0.
pub fn is_due(bucket: usize, day: u64) -> bool {
    if bucket == 0 {
        return true;
    }
    if day == 0 {
        return false;
    }

    // Past bucket 63 the interval does not fit in a u64 and no day reaches it
    u32::try_from(bucket)
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
        .is_some_and(|interval| day % interval == 0)
}

/// Select the cards to practice on `day` from a dense bucket view.
///
/// Unoccupied slots contribute nothing. A card showing up in several due
/// buckets is returned once.
pub fn practice<S: Borrow<CardSet>>(buckets: &[Option<S>], day: u64) -> HashSet<&Flashcard> {
    let mut due = HashSet::new();

    for (bucket, slot) in buckets.iter().enumerate() {
        if let Some(set) = slot
            && is_due(bucket, day)
        {
            let set: &CardSet = set.borrow();
            due.extend(set.iter());
        }
    }

    log::trace!("{} cards due on day {}", due.len(), day);
    due
}

/// Move a card to its new bucket after a practice trial.
///
/// The card is taken out of the bucket holding it and put into the bucket
/// chosen by `difficulty`, which is created if missing. The emptied bucket
/// is kept. A card that is in no bucket leaves the map untouched.
///
/// Returns the same map so calls can be chained.
pub fn update<'a>(
    buckets: &'a mut BucketMap,
    card: &Flashcard,
    difficulty: AnswerDifficulty,
) -> Result<&'a mut BucketMap> {
    validate(buckets)?;
    move_card(buckets, card, difficulty)?;
    Ok(buckets)
}

/// [`update`] without the whole-map shape check, for callers that keep
/// every card in a single bucket themselves.
pub(crate) fn move_card(
    buckets: &mut BucketMap,
    card: &Flashcard,
    difficulty: AnswerDifficulty,
) -> Result<()> {
    let Some(former) = buckets
        .iter()
        .find_map(|(&bucket, set)| set.contains(card).then_some(bucket))
    else {
        log::warn!(
            "Card '{}' is not in any bucket, leaving buckets unchanged",
            card.front()
        );
        return Ok(());
    };

    let Some(next) = difficulty.next_bucket(former) else {
        return Err(Error::InvalidArgument(format!(
            "card '{}' is in bucket {} and cannot be promoted further",
            card.front(),
            former
        )));
    };

    let Some(stored) = buckets.get_mut(&former).and_then(|set| set.take(card)) else {
        return Ok(());
    };

    log::debug!(
        "Card '{}' answered {:?}: bucket {} -> {}",
        stored.front(),
        difficulty,
        former,
        next
    );
    buckets.entry(next).or_default().insert(stored);

    Ok(())
}

/// The card's hint, or [`DEFAULT_HINT_FALLBACK`] if it has none
pub fn hint(card: &Flashcard) -> &str {
    card.hint().unwrap_or(DEFAULT_HINT_FALLBACK)
}
