//! The progress state machine.
//!
//! A [`Session`] owns the three pools for one scope: the persisted `known`
//! and `unknown` pools of every level in scope, and the derived `active`
//! queue being presented. The queue carries `(word, level)` pairs so that a
//! decision made in the merged scope writes back to the originating level's
//! pools, never to a merged pool.
//!
//! The session itself does no IO. [`Session::decide`] returns the level
//! whose pools changed; the owning controller is expected to write that
//! level through to storage before presenting the next card.

use crate::dictionary::Dictionary;
use crate::error::SessionError;
use crate::types::{ActiveCard, LevelId, Mode, Outcome, Pools, Progress, Scope, Word};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// What the session moved on to after a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next card's word.
    Next(Word),
    /// The learning pass is over. `review_available` is true when any
    /// unknown words remain in scope.
    Completed { review_available: bool },
    /// The review pass is over.
    ReviewComplete { review_available: bool },
}

/// Result of a decision: which level's pools changed (the write-through
/// target) and where the session went next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub level: LevelId,
    pub advance: Advance,
}

/// Progress state for one scope.
#[derive(Debug, Clone)]
pub struct Session {
    scope: Scope,
    mode: Mode,
    active: Vec<ActiveCard>,
    cursor: usize,
    review_total: usize,
    total_words: usize,
    pools: BTreeMap<LevelId, Pools>,
}

impl Session {
    /// Enter a scope with pools already loaded from storage.
    ///
    /// The active queue is (all words in scope) minus both pools, in the
    /// dictionary's deterministic order. Mode starts at `Learning`; an
    /// empty queue means the scope is already complete.
    pub fn begin(scope: Scope, dict: &Dictionary, loaded: BTreeMap<LevelId, Pools>) -> Self {
        let mut pools = loaded;
        for id in dict.scope_levels(&scope) {
            pools.entry(id).or_default();
        }

        let cards = dict.scope_cards(&scope);
        let total_words = cards.len();
        let active: Vec<ActiveCard> = cards
            .into_iter()
            .filter(|c| {
                pools
                    .get(&c.level)
                    .map_or(true, |p| !p.is_classified(&c.word))
            })
            .collect();

        Self {
            scope,
            mode: Mode::Learning,
            active,
            cursor: 0,
            review_total: 0,
            total_words,
            pools,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The card at the cursor, or `None` once the pass is complete.
    pub fn current(&self) -> Option<&ActiveCard> {
        self.active.get(self.cursor)
    }

    pub fn is_complete(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether a review pass could be started.
    pub fn review_available(&self) -> bool {
        self.pools.values().any(|p| !p.unknown.is_empty())
    }

    /// Pools of one level, as they would be persisted.
    pub fn pools(&self, level: &str) -> Option<&Pools> {
        self.pools.get(level)
    }

    pub fn known_count(&self) -> usize {
        self.pools.values().map(|p| p.known.len()).sum()
    }

    pub fn unknown_count(&self) -> usize {
        self.pools.values().map(|p| p.unknown.len()).sum()
    }

    /// Every unknown word in scope with its originating level.
    pub fn unknown_cards(&self) -> Vec<ActiveCard> {
        let mut cards = Vec::new();
        for (level, pools) in &self.pools {
            for word in &pools.unknown {
                cards.push(ActiveCard {
                    word: word.clone(),
                    level: level.clone(),
                });
            }
        }
        cards
    }

    /// Position indicator for the card currently shown.
    pub fn progress(&self) -> Progress {
        match self.mode {
            Mode::Learning => Progress {
                position: self.known_count() + self.unknown_count() + 1,
                total: self.total_words,
                mode: self.mode,
            },
            Mode::Reviewing => Progress {
                position: self.review_total - self.active.len() + 1,
                total: self.review_total,
                mode: self.mode,
            },
        }
    }

    /// Record the learner's verdict on the current card.
    ///
    /// `word` must be the word at the cursor; anything else is a frontend
    /// bug and is rejected without touching any pool. In `Learning` mode
    /// the word joins the pool matching the outcome. In `Reviewing` mode a
    /// `Known` verdict promotes it out of `unknown` (idempotently) and an
    /// `Unknown` verdict leaves the pools alone. Either way the card leaves
    /// the queue and the cursor wraps to 0 if the removal left it past the
    /// end.
    pub fn decide(&mut self, word: &str, outcome: Outcome) -> Result<Decision, SessionError> {
        let current = self.active.get(self.cursor).ok_or(SessionError::NoActiveCard)?;
        if current.word != word {
            return Err(SessionError::NotCurrentWord {
                word: word.to_string(),
            });
        }

        let card = self.active.remove(self.cursor);
        let pools = self.pools.entry(card.level.clone()).or_default();
        match self.mode {
            Mode::Learning => match outcome {
                Outcome::Known => pools.known.push(card.word.clone()),
                Outcome::Unknown => pools.unknown.push(card.word.clone()),
            },
            Mode::Reviewing => {
                if outcome == Outcome::Known {
                    pools.promote(&card.word);
                }
            }
        }
        debug_assert!(pools.known.iter().all(|w| !pools.unknown.contains(w)));

        let advance = if self.active.is_empty() {
            let review_available = self.review_available();
            match self.mode {
                Mode::Learning => Advance::Completed { review_available },
                Mode::Reviewing => Advance::ReviewComplete { review_available },
            }
        } else {
            if self.cursor >= self.active.len() {
                self.cursor = 0;
            }
            Advance::Next(self.active[self.cursor].word.clone())
        };

        Ok(Decision {
            level: card.level,
            advance,
        })
    }

    /// Rebuild the queue as a uniformly shuffled copy of the unknown pool
    /// and switch to `Reviewing`. Words stay in `unknown` until a `Known`
    /// verdict promotes them. Returns false (and changes nothing) when
    /// there is nothing to review.
    pub fn start_review<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let mut queue = self.unknown_cards();
        if queue.is_empty() {
            return false;
        }
        queue.shuffle(rng);
        self.review_total = queue.len();
        self.active = queue;
        self.cursor = 0;
        self.mode = Mode::Reviewing;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Level;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dict() -> Dictionary {
        let data = r#"{
            "cat": {"translation": "猫"},
            "dog": {"translation": "狗"},
            "owl": {"translation": "猫头鹰"}
        }"#;
        Dictionary::new(vec![Level::from_json("level1", "Level 1", data).unwrap()]).unwrap()
    }

    fn two_level_dict() -> Dictionary {
        let a = Level::from_json("a", "A", r#"{"x": {"translation": "x1"}}"#).unwrap();
        let b = Level::from_json("b", "B", r#"{"y": {"translation": "y1"}}"#).unwrap();
        Dictionary::new(vec![a, b]).unwrap()
    }

    fn scope() -> Scope {
        Scope::Level("level1".into())
    }

    #[test]
    fn fresh_scope_activates_every_word() {
        let session = Session::begin(scope(), &dict(), BTreeMap::new());
        assert_eq!(session.current().unwrap().word, "cat");
        assert!(!session.is_complete());
        assert_eq!(session.progress().position, 1);
        assert_eq!(session.progress().total, 3);
    }

    #[test]
    fn full_learning_pass() {
        // Scenario from the app's behavior: cat known, dog unknown, owl known.
        let d = dict();
        let mut session = Session::begin(scope(), &d, BTreeMap::new());

        let decision = session.decide("cat", Outcome::Known).unwrap();
        assert_eq!(decision.level, "level1");
        assert_eq!(decision.advance, Advance::Next("dog".into()));
        assert_eq!(session.pools("level1").unwrap().known, vec!["cat".to_string()]);

        let decision = session.decide("dog", Outcome::Unknown).unwrap();
        assert_eq!(decision.advance, Advance::Next("owl".into()));
        assert_eq!(
            session.pools("level1").unwrap().unknown,
            vec!["dog".to_string()]
        );

        let decision = session.decide("owl", Outcome::Known).unwrap();
        assert_eq!(
            decision.advance,
            Advance::Completed {
                review_available: true
            }
        );
        assert!(session.is_complete());
        assert_eq!(session.known_count(), 2);
        assert_eq!(session.unknown_count(), 1);
    }

    #[test]
    fn pools_stay_disjoint_through_decisions() {
        let d = dict();
        let mut session = Session::begin(scope(), &d, BTreeMap::new());
        for (word, outcome) in [
            ("cat", Outcome::Unknown),
            ("dog", Outcome::Known),
            ("owl", Outcome::Unknown),
        ] {
            session.decide(word, outcome).unwrap();
            let pools = session.pools("level1").unwrap();
            assert!(pools.known.iter().all(|w| !pools.unknown.contains(w)));
        }
    }

    #[test]
    fn persisted_pools_shrink_the_queue() {
        let mut loaded = BTreeMap::new();
        loaded.insert(
            "level1".to_string(),
            Pools {
                known: vec!["cat".into()],
                unknown: vec!["owl".into()],
            },
        );
        let session = Session::begin(scope(), &dict(), loaded);
        assert_eq!(session.current().unwrap().word, "dog");
        // Progress counts previously classified words.
        assert_eq!(session.progress().position, 3);
    }

    #[test]
    fn already_complete_scope_offers_review() {
        let mut loaded = BTreeMap::new();
        loaded.insert(
            "level1".to_string(),
            Pools {
                known: vec!["cat".into(), "owl".into()],
                unknown: vec!["dog".into()],
            },
        );
        let session = Session::begin(scope(), &dict(), loaded);
        assert!(session.is_complete());
        assert!(session.review_available());
    }

    #[test]
    fn deciding_a_non_cursor_word_is_rejected() {
        let d = dict();
        let mut session = Session::begin(scope(), &d, BTreeMap::new());
        let err = session.decide("owl", Outcome::Known).unwrap_err();
        assert!(matches!(err, SessionError::NotCurrentWord { .. }));
        // Nothing moved.
        assert_eq!(session.known_count(), 0);
        assert_eq!(session.current().unwrap().word, "cat");
    }

    #[test]
    fn deciding_on_a_complete_session_is_rejected() {
        let mut session = Session::begin(scope(), &dict(), BTreeMap::new());
        for word in ["cat", "dog", "owl"] {
            session.decide(word, Outcome::Known).unwrap();
        }
        assert!(matches!(
            session.decide("cat", Outcome::Known),
            Err(SessionError::NoActiveCard)
        ));
    }

    #[test]
    fn review_of_a_single_word() {
        let d = dict();
        let mut session = Session::begin(scope(), &d, BTreeMap::new());
        session.decide("cat", Outcome::Known).unwrap();
        session.decide("dog", Outcome::Unknown).unwrap();
        session.decide("owl", Outcome::Known).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        assert!(session.start_review(&mut rng));
        assert_eq!(session.mode(), Mode::Reviewing);
        assert_eq!(session.progress().total, 1);
        assert_eq!(session.current().unwrap().word, "dog");
        // The unknown pool keeps its member until promotion.
        assert_eq!(session.unknown_count(), 1);

        let decision = session.decide("dog", Outcome::Known).unwrap();
        assert_eq!(
            decision.advance,
            Advance::ReviewComplete {
                review_available: false
            }
        );
        assert_eq!(session.unknown_count(), 0);
        assert_eq!(session.known_count(), 3);
    }

    #[test]
    fn unknown_verdict_during_review_keeps_the_word() {
        let mut loaded = BTreeMap::new();
        loaded.insert(
            "level1".to_string(),
            Pools {
                known: vec!["cat".into(), "owl".into()],
                unknown: vec!["dog".into()],
            },
        );
        let mut session = Session::begin(scope(), &dict(), loaded);
        let mut rng = StdRng::seed_from_u64(1);
        session.start_review(&mut rng);

        let decision = session.decide("dog", Outcome::Unknown).unwrap();
        assert_eq!(
            decision.advance,
            Advance::ReviewComplete {
                review_available: true
            }
        );
        assert_eq!(
            session.pools("level1").unwrap().unknown,
            vec!["dog".to_string()]
        );
    }

    #[test]
    fn review_without_unknown_words_is_a_no_op() {
        let d = dict();
        let mut session = Session::begin(scope(), &d, BTreeMap::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!session.start_review(&mut rng));
        assert_eq!(session.mode(), Mode::Learning);
        assert_eq!(session.current().unwrap().word, "cat");
    }

    #[test]
    fn review_queue_is_a_permutation_of_unknown() {
        let data = r#"{
            "ant": {"translation": "a"},
            "bee": {"translation": "b"},
            "cow": {"translation": "c"},
            "elk": {"translation": "d"},
            "fox": {"translation": "e"}
        }"#;
        let d =
            Dictionary::new(vec![Level::from_json("level1", "Level 1", data).unwrap()]).unwrap();
        let mut session = Session::begin(scope(), &d, BTreeMap::new());
        for word in ["ant", "bee", "cow", "elk", "fox"] {
            session.decide(word, Outcome::Unknown).unwrap();
        }

        let mut rng = StdRng::seed_from_u64(42);
        session.start_review(&mut rng);
        let mut reviewed = Vec::new();
        while let Some(card) = session.current().cloned() {
            reviewed.push(card.word.clone());
            session.decide(&card.word, Outcome::Known).unwrap();
        }
        reviewed.sort();
        assert_eq!(reviewed, ["ant", "bee", "cow", "elk", "fox"]);
        assert_eq!(session.unknown_count(), 0);
    }

    #[test]
    fn global_review_writes_back_to_the_origin_level() {
        let d = two_level_dict();
        let mut loaded = BTreeMap::new();
        loaded.insert(
            "a".to_string(),
            Pools {
                known: vec![],
                unknown: vec!["x".into()],
            },
        );
        loaded.insert(
            "b".to_string(),
            Pools {
                known: vec![],
                unknown: vec!["y".into()],
            },
        );
        let mut session = Session::begin(Scope::Global, &d, loaded);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(session.start_review(&mut rng));
        assert_eq!(session.progress().total, 2);

        // Decide whichever card the shuffle put first; its origin level is
        // the only one whose pools may change.
        let card = session.current().cloned().unwrap();
        let decision = session.decide(&card.word, Outcome::Known).unwrap();
        assert_eq!(decision.level, card.level);

        let origin = session.pools(&card.level).unwrap();
        assert_eq!(origin.known, vec![card.word.clone()]);
        assert!(origin.unknown.is_empty());

        let other_level = if card.level == "a" { "b" } else { "a" };
        let other = session.pools(other_level).unwrap();
        assert!(other.known.is_empty());
        assert_eq!(other.unknown.len(), 1);
    }

    #[test]
    fn global_learning_queue_spans_levels_in_order() {
        let d = two_level_dict();
        let mut session = Session::begin(Scope::Global, &d, BTreeMap::new());
        assert_eq!(session.progress().total, 2);
        assert_eq!(session.current().unwrap().word, "x");
        let decision = session.decide("x", Outcome::Known).unwrap();
        assert_eq!(decision.level, "a");
        assert_eq!(decision.advance, Advance::Next("y".into()));
        assert_eq!(session.current().unwrap().level, "b");
    }
}
