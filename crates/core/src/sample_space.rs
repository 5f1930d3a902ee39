//! Sample spaces for the coin and dice exercises.

use std::collections::BTreeSet;
use std::fmt;

/// Face of the coin used in lessons: `E` (escudo) or `C` (cara).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoinSide {
    E,
    C,
}

impl CoinSide {
    pub const BOTH: [CoinSide; 2] = [CoinSide::E, CoinSide::C];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            CoinSide::E => 'E',
            CoinSide::C => 'C',
        }
    }
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Every sequence of `tosses` coin sides, in lexical E-before-C order.
#[must_use]
pub fn coin_sequences(tosses: usize) -> Vec<String> {
    (0..tosses).fold(vec![String::new()], |acc, _| {
        acc.iter()
            .flat_map(|prefix| {
                CoinSide::BOTH.iter().map(move |side| {
                    let mut next = prefix.clone();
                    next.push(side.symbol());
                    next
                })
            })
            .collect()
    })
}

/// Outcome cards the learner fills with coins, two slots each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinSlots {
    cards: Vec<[Option<CoinSide>; 2]>,
}

impl CoinSlots {
    /// Two tosses have four outcomes.
    pub const DEFAULT_CARDS: usize = 4;

    #[must_use]
    pub fn new(cards: usize) -> Self {
        Self {
            cards: vec![[None, None]; cards],
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[[Option<CoinSide>; 2]] {
        &self.cards
    }

    /// Out-of-range positions are ignored.
    pub fn place(&mut self, card: usize, slot: usize, side: CoinSide) {
        if let Some(target) = self.cards.get_mut(card).and_then(|c| c.get_mut(slot)) {
            *target = Some(side);
        }
    }

    /// Move a coin between slots, emptying the origin.
    pub fn relocate(&mut self, from: (usize, usize), to: (usize, usize)) {
        let coin = self
            .cards
            .get_mut(from.0)
            .and_then(|c| c.get_mut(from.1))
            .and_then(Option::take);
        if let Some(side) = coin {
            self.place(to.0, to.1, side);
        }
    }

    pub fn clear_card(&mut self, card: usize) {
        if let Some(target) = self.cards.get_mut(card) {
            *target = [None, None];
        }
    }

    pub fn clear_all(&mut self) {
        self.cards.iter_mut().for_each(|c| *c = [None, None]);
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.iter().all(Option::is_some))
            .count()
    }

    /// The sequences on the cards, once every slot holds a coin.
    #[must_use]
    pub fn response(&self) -> Option<Vec<String>> {
        if self.completed() != self.cards.len() {
            return None;
        }
        Some(
            self.cards
                .iter()
                .map(|card| card.iter().flatten().map(|s| s.symbol()).collect())
                .collect(),
        )
    }
}

impl Default for CoinSlots {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CARDS)
    }
}

/// Ordered pair of faces from two six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiceOutcome {
    pub first: u8,
    pub second: u8,
}

impl DiceOutcome {
    pub const FACES: u8 = 6;

    #[must_use]
    pub fn new(first: u8, second: u8) -> Option<Self> {
        let valid = |d: u8| (1..=Self::FACES).contains(&d);
        (valid(first) && valid(second)).then_some(Self { first, second })
    }

    #[must_use]
    pub fn sum(self) -> u8 {
        self.first + self.second
    }

    /// Cell key, `"d1-d2"`.
    #[must_use]
    pub fn key(self) -> String {
        format!("{}-{}", self.first, self.second)
    }

    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let (first, second) = key.split_once('-')?;
        Self::new(first.trim().parse().ok()?, second.trim().parse().ok()?)
    }

    /// All 36 outcomes, row by row.
    pub fn all() -> impl Iterator<Item = DiceOutcome> {
        (1..=Self::FACES)
            .flat_map(|first| (1..=Self::FACES).map(move |second| DiceOutcome { first, second }))
    }
}

impl fmt::Display for DiceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// Selection state for the 6x6 outcome grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiceSelection {
    selected: BTreeSet<DiceOutcome>,
}

impl DiceSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preselect every outcome satisfying `event`.
    #[must_use]
    pub fn matching(event: impl Fn(DiceOutcome) -> bool) -> Self {
        Self {
            selected: DiceOutcome::all().filter(|o| event(*o)).collect(),
        }
    }

    pub fn toggle(&mut self, outcome: DiceOutcome) {
        if !self.selected.remove(&outcome) {
            self.selected.insert(outcome);
        }
    }

    #[must_use]
    pub fn contains(&self, outcome: DiceOutcome) -> bool {
        self.selected.contains(&outcome)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected cell keys in grid order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.selected.iter().map(|o| o.key()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_tosses_have_four_sequences() {
        assert_eq!(coin_sequences(2), vec!["EE", "EC", "CE", "CC"]);
        assert_eq!(coin_sequences(3).len(), 8);
        assert_eq!(coin_sequences(0), vec![String::new()]);
    }

    #[test]
    fn coin_slots_respond_only_when_full() {
        let mut slots = CoinSlots::default();
        for (card, seq) in ["EE", "EC", "CE"].iter().enumerate() {
            for (slot, ch) in seq.chars().enumerate() {
                let side = if ch == 'E' { CoinSide::E } else { CoinSide::C };
                slots.place(card, slot, side);
            }
        }
        assert_eq!(slots.completed(), 3);
        assert_eq!(slots.response(), None);

        slots.place(3, 0, CoinSide::C);
        slots.place(3, 1, CoinSide::C);
        assert_eq!(
            slots.response(),
            Some(vec!["EE".into(), "EC".into(), "CE".into(), "CC".into()])
        );

        slots.relocate((3, 1), (9, 9));
        assert_eq!(slots.completed(), 3);
        slots.clear_all();
        assert_eq!(slots.completed(), 0);
    }

    #[test]
    fn dice_keys_parse_back() {
        let outcome = DiceOutcome::new(4, 6).unwrap();
        assert_eq!(outcome.key(), "4-6");
        assert_eq!(DiceOutcome::parse("4-6"), Some(outcome));
        assert_eq!(DiceOutcome::parse("7-1"), None);
        assert_eq!(DiceOutcome::parse("46"), None);
    }

    #[test]
    fn sum_greater_than_nine_has_six_outcomes() {
        let selection = DiceSelection::matching(|o| o.sum() > 9);
        assert_eq!(
            selection.keys(),
            vec!["4-6", "5-5", "5-6", "6-4", "6-5", "6-6"]
        );
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = DiceSelection::new();
        let cell = DiceOutcome::new(1, 2).unwrap();
        selection.toggle(cell);
        assert!(selection.contains(cell));
        selection.toggle(cell);
        assert!(selection.is_empty());
    }
}
