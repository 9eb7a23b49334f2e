use crate::error::{Error, Result};

/// A single flashcard
///
/// Cards are immutable once built. Two cards with the same fields are the
/// same card as far as bucket membership is concerned. Cards order by
/// front, then back, hint and tags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flashcard {
    front: String,
    back: String,
    hint: String,
    tags: Vec<String>,
}

impl Flashcard {
    /// Create a card. `hint` may be empty, meaning the card has no hint.
    /// Fails if the front or back is blank.
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        hint: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Self> {
        let front = front.into();
        let back = back.into();

        if front.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "flashcard front must not be empty".to_string(),
            ));
        }
        if back.trim().is_empty() {
            return Err(Error::InvalidArgument(format!(
                "flashcard '{}' has an empty back",
                front
            )));
        }

        Ok(Self {
            front,
            back,
            hint: hint.into(),
            tags,
        })
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    /// The stored hint, `None` if the card was built without one
    pub fn hint(&self) -> Option<&str> {
        if self.hint.is_empty() {
            None
        } else {
            Some(&self.hint)
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card() {
        let card = Flashcard::new("front", "back", "hint", vec!["tag".to_string()]).unwrap();
        assert_eq!(card.front(), "front");
        assert_eq!(card.back(), "back");
        assert_eq!(card.hint(), Some("hint"));
        assert_eq!(card.tags(), ["tag".to_string()]);
    }

    #[test]
    fn test_empty_hint_is_none() {
        let card = Flashcard::new("front", "back", "", Vec::new()).unwrap();
        assert_eq!(card.hint(), None);
    }

    #[test]
    fn test_blank_front_rejected() {
        let err = Flashcard::new("  ", "back", "", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_blank_back_rejected() {
        let err = Flashcard::new("front", "", "", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_equal_fields_equal_cards() {
        let a = Flashcard::new("a", "b", "c", Vec::new()).unwrap();
        let b = Flashcard::new("a", "b", "c", Vec::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ordering_breaks_ties_on_hint_and_tags() {
        let plain = Flashcard::new("a", "b", "", Vec::new()).unwrap();
        let hinted = Flashcard::new("a", "b", "h", Vec::new()).unwrap();
        let tagged = Flashcard::new("a", "b", "h", vec!["t".to_string()]).unwrap();
        let later = Flashcard::new("b", "a", "", Vec::new()).unwrap();

        let mut cards = vec![later.clone(), tagged.clone(), plain.clone(), hinted.clone()];
        cards.sort();
        assert_eq!(cards, [plain, hinted, tagged, later]);
    }
}
