//! Modified-Leitner scheduling for flashcard practice.
//!
//! Cards live in numbered buckets. Bucket 0 is practiced every day and
//! bucket `i` every `2^i` days. An easy answer moves a card up one bucket,
//! a hard answer down one, and a wrong answer back to bucket 0.
//!
//! ```
//! use leitner::{AnswerDifficulty, BucketMap, Flashcard, practice, to_bucket_sets, update};
//!
//! let card = Flashcard::new("chat", "cat", "", Vec::new())?;
//! let mut buckets = BucketMap::new();
//! buckets.entry(0).or_default().insert(card.clone());
//!
//! update(&mut buckets, &card, AnswerDifficulty::Easy)?;
//! assert!(buckets[&1].contains(&card));
//!
//! let sets = to_bucket_sets(&buckets)?;
//! assert!(practice(&sets, 1).is_empty());
//! assert!(practice(&sets, 2).contains(&card));
//! # Ok::<(), leitner::Error>(())
//! ```

pub mod buckets;
pub mod config;
pub mod deck;
pub mod error;
pub mod flashcard;
pub mod scheduler;
pub mod session;

pub use buckets::{
    BucketMap, BucketRange, CardSet, bucket_range, to_bucket_sets, to_bucket_sets_mut,
};
pub use config::Config;
pub use error::{Error, Result};
pub use flashcard::Flashcard;
pub use scheduler::{AnswerDifficulty, hint, practice, update};
pub use session::Session;
