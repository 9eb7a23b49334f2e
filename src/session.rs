use crate::buckets::{BucketMap, BucketRange, bucket_range, to_bucket_sets, validate};
use crate::config::Config;
use crate::deck::{Deck, list_decks};
use crate::error::Result;
use crate::flashcard::Flashcard;
use crate::scheduler::{AnswerDifficulty, move_card, practice};
use rand::seq::SliceRandom;

/// A practice session over one set of buckets.
///
/// The session owns the bucket map and the day counter. Every answer goes
/// through `&mut self`, so transitions on one map are never interleaved.
/// The map is checked once when the session is built; after that only
/// `register` and `answer` touch it, and both keep each card in one bucket.
pub struct Session {
    config: Config,
    buckets: BucketMap,
    day: u64,
}

impl Session {
    /// Start a session with no cards on day 0
    pub fn new(config: Config) -> Self {
        Self {
            config,
            buckets: BucketMap::new(),
            day: 0,
        }
    }

    /// Resume a session from existing buckets, starting at day 0.
    /// Fails if a card sits in more than one bucket.
    pub fn with_buckets(config: Config, buckets: BucketMap) -> Result<Self> {
        validate(&buckets)?;
        Ok(Self {
            config,
            buckets,
            day: 0,
        })
    }

    /// Load every deck in the configured decks directory.
    /// Returns the number of cards that were new to the session.
    pub fn load_decks(&mut self) -> anyhow::Result<usize> {
        let mut added = 0;

        for path in list_decks(&self.config.decks_dir)? {
            let deck = Deck::load(&path)?;
            for card in deck.cards {
                if self.register(card) {
                    added += 1;
                }
            }
        }

        log::info!(
            "Registered {} new cards from {}",
            added,
            self.config.decks_dir.display()
        );
        Ok(added)
    }

    /// Put a new card into bucket 0.
    /// Returns false if the card is already in some bucket.
    pub fn register(&mut self, card: Flashcard) -> bool {
        if self.buckets.values().any(|set| set.contains(&card)) {
            return false;
        }
        self.buckets.entry(0).or_default().insert(card)
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    /// Move on to the next day. The counter stops at `u64::MAX`.
    pub fn advance_day(&mut self) -> u64 {
        self.day = self.day.saturating_add(1);
        self.day
    }

    /// Cards due today, shuffled if the config asks for it
    pub fn due_cards(&self) -> Result<Vec<Flashcard>> {
        let sets = to_bucket_sets(&self.buckets)?;
        let mut cards: Vec<Flashcard> = practice(&sets, self.day).into_iter().cloned().collect();

        // Randomize card order to avoid sequence-based hints
        if self.config.shuffle_cards {
            cards.shuffle(&mut rand::rng());
        } else {
            cards.sort();
        }

        Ok(cards)
    }

    /// Record the outcome of one practice trial
    pub fn answer(&mut self, card: &Flashcard, difficulty: AnswerDifficulty) -> Result<()> {
        move_card(&mut self.buckets, card, difficulty)
    }

    /// Lowest and highest occupied buckets, `None` before any card is registered
    pub fn range(&self) -> Result<Option<BucketRange>> {
        Ok(bucket_range(&to_bucket_sets(&self.buckets)?))
    }

    /// The card's hint, or the configured fallback text
    pub fn hint<'a>(&'a self, card: &'a Flashcard) -> &'a str {
        card.hint().unwrap_or(self.config.hint_fallback.as_str())
    }

    pub fn buckets(&self) -> &BucketMap {
        &self.buckets
    }

    pub fn into_buckets(self) -> BucketMap {
        self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::CardSet;
    use tempfile::TempDir;

    fn card(front: &str) -> Flashcard {
        Flashcard::new(front, format!("{front} back"), "", Vec::new()).unwrap()
    }

    fn ordered_config() -> Config {
        Config {
            shuffle_cards: false,
            ..Config::default()
        }
    }

    fn fronts(cards: &[Flashcard]) -> Vec<&str> {
        cards.iter().map(|c| c.front()).collect()
    }

    #[test]
    fn test_register_once() {
        let mut session = Session::new(ordered_config());
        assert!(session.register(card("a")));
        assert!(!session.register(card("a")));
        assert_eq!(session.buckets()[&0].len(), 1);
    }

    #[test]
    fn test_register_skips_card_in_later_bucket() {
        let mut buckets = BucketMap::new();
        buckets.insert(3, [card("a")].into_iter().collect::<CardSet>());
        let mut session = Session::with_buckets(ordered_config(), buckets).unwrap();

        assert!(!session.register(card("a")));
        assert!(!session.buckets().contains_key(&0));
    }

    #[test]
    fn test_with_buckets_rejects_duplicate_card() {
        let mut buckets = BucketMap::new();
        buckets.insert(0, [card("a")].into_iter().collect::<CardSet>());
        buckets.insert(2, [card("a")].into_iter().collect::<CardSet>());

        assert!(Session::with_buckets(ordered_config(), buckets).is_err());
    }

    #[test]
    fn test_answer_in_high_bucket() {
        let mut buckets = BucketMap::new();
        buckets.insert(70_000, [card("a")].into_iter().collect::<CardSet>());
        let mut session = Session::with_buckets(ordered_config(), buckets).unwrap();

        session.answer(&card("a"), AnswerDifficulty::Easy).unwrap();
        assert!(session.buckets()[&70_001].contains(&card("a")));
        session.answer(&card("a"), AnswerDifficulty::Wrong).unwrap();
        assert!(session.buckets()[&0].contains(&card("a")));
    }

    #[test]
    fn test_advance_day_saturates() {
        let mut session = Session::new(ordered_config());
        session.day = u64::MAX - 1;

        assert_eq!(session.advance_day(), u64::MAX);
        assert_eq!(session.advance_day(), u64::MAX);
        assert_eq!(session.day(), u64::MAX);
    }

    #[test]
    fn test_unshuffled_order_is_total() {
        let mut session = Session::new(ordered_config());
        let plain = Flashcard::new("a", "b", "", Vec::new()).unwrap();
        let hinted = Flashcard::new("a", "b", "h", Vec::new()).unwrap();
        let tagged = Flashcard::new("a", "b", "h", vec!["t".to_string()]).unwrap();
        session.register(tagged.clone());
        session.register(plain.clone());
        session.register(hinted.clone());

        for _ in 0..5 {
            assert_eq!(
                session.due_cards().unwrap(),
                [plain.clone(), hinted.clone(), tagged.clone()]
            );
        }
    }

    #[test]
    fn test_practice_cycle() {
        let mut session = Session::new(ordered_config());
        session.register(card("a"));
        session.register(card("b"));

        assert_eq!(fronts(&session.due_cards().unwrap()), ["a", "b"]);

        session.answer(&card("a"), AnswerDifficulty::Easy).unwrap();
        session.answer(&card("b"), AnswerDifficulty::Wrong).unwrap();
        assert!(session.buckets()[&1].contains(&card("a")));

        assert_eq!(session.advance_day(), 1);
        assert_eq!(fronts(&session.due_cards().unwrap()), ["b"]);

        assert_eq!(session.advance_day(), 2);
        assert_eq!(fronts(&session.due_cards().unwrap()), ["a", "b"]);

        session.answer(&card("a"), AnswerDifficulty::Hard).unwrap();
        let buckets = session.into_buckets();
        assert!(buckets[&0].contains(&card("a")));
        assert!(buckets[&1].is_empty());
    }

    #[test]
    fn test_shuffled_due_cards_keep_members() {
        let mut session = Session::new(Config::default());
        for front in ["a", "b", "c", "d"] {
            session.register(card(front));
        }

        let mut due = session
            .due_cards()
            .unwrap()
            .iter()
            .map(|c| c.front().to_string())
            .collect::<Vec<_>>();
        due.sort();
        assert_eq!(due, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_range() {
        let mut session = Session::new(ordered_config());
        assert_eq!(session.range().unwrap(), None);

        session.register(card("a"));
        session.register(card("b"));
        session.answer(&card("a"), AnswerDifficulty::Easy).unwrap();
        session.answer(&card("a"), AnswerDifficulty::Easy).unwrap();

        assert_eq!(
            session.range().unwrap(),
            Some(BucketRange {
                min_bucket: 0,
                max_bucket: 2
            })
        );
    }

    #[test]
    fn test_hint_uses_configured_fallback() {
        let config = Config {
            hint_fallback: "No hint".to_string(),
            ..ordered_config()
        };
        let session = Session::new(config);
        let with_hint = Flashcard::new("f", "b", "h", Vec::new()).unwrap();

        assert_eq!(session.hint(&card("a")), "No hint");
        assert_eq!(session.hint(&with_hint), "h");
    }

    #[test]
    fn test_load_decks() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("one.tsv"), "a\tA\nb\tB\n").unwrap();
        std::fs::write(dir.path().join("two.tsv"), "b\tB\nc\tC\thint\n").unwrap();

        let config = Config {
            decks_dir: dir.path().to_path_buf(),
            ..ordered_config()
        };
        let mut session = Session::new(config);

        assert_eq!(session.load_decks().unwrap(), 3);
        assert_eq!(session.buckets()[&0].len(), 3);
        assert_eq!(session.load_decks().unwrap(), 0);
    }
}
