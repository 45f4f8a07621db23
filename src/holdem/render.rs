//! Canonical, compressed rendering of a set of combos.

use std::collections::BTreeSet;

use crate::core::Rank;

use super::{Combo, Hand, Shape};

/// A rendered element before run-length compression.
#[derive(Debug, Clone, Copy)]
enum Item {
    Hand(Hand),
    Combo(Combo),
}

/// Turn a set of combos into the pieces of its canonical string:
/// pairs, then suited, then offsuit, strongest first within each.
pub(crate) fn pieces(all_combos: &BTreeSet<Combo>) -> Vec<String> {
    if all_combos.len() == Combo::all().len() {
        return vec![String::from("XX")];
    }

    let mut pieces = Vec::new();
    for shape in [Shape::Pair, Shape::Suited, Shape::Offsuit] {
        let combos = all_combos.iter().rev().filter(|c| c.shape() == shape);
        let items = coalesce(combos, shape.combo_count());
        shorten(&items, &mut pieces);
    }
    pieces
}

/// Walk combos in descending order and replace every complete group of
/// `per_hand` combos belonging to one hand with that hand.
fn coalesce<'a>(combos: impl Iterator<Item = &'a Combo>, per_hand: usize) -> Vec<Item> {
    let mut items = Vec::new();
    let mut group: Vec<Combo> = Vec::with_capacity(per_hand);

    for combo in combos {
        if group.last().is_some_and(|l| l.to_hand() != combo.to_hand()) {
            flush_group(&mut group, per_hand, &mut items);
        }
        group.push(*combo);
    }
    flush_group(&mut group, per_hand, &mut items);
    items
}

fn flush_group(group: &mut Vec<Combo>, per_hand: usize, items: &mut Vec<Item>) {
    match group.first() {
        Some(c) if group.len() == per_hand => items.push(Item::Hand(c.to_hand())),
        _ => items.extend(group.iter().copied().map(Item::Combo)),
    }
    group.clear();
}

/// Does `next` directly follow `prev` in a run?
fn follows(prev: &Hand, next: &Hand) -> bool {
    if prev.is_pair() {
        Some(next.first()) == prev.first().prev()
    } else {
        next.first() == prev.first() && Some(next.second()) == prev.second().prev()
    }
}

fn shorten(items: &[Item], pieces: &mut Vec<String>) {
    let mut run: Vec<Hand> = Vec::new();
    for item in items {
        match item {
            Item::Hand(hand) => {
                if run.last().is_some_and(|prev| !follows(prev, hand)) {
                    flush_run(&mut run, pieces);
                }
                run.push(*hand);
            }
            Item::Combo(combo) => {
                flush_run(&mut run, pieces);
                pieces.push(combo.to_string());
            }
        }
    }
    flush_run(&mut run, pieces);
}

/// The strongest hand of its family: aces, or a connector.
fn is_family_top(hand: &Hand) -> bool {
    if hand.is_pair() {
        hand.first() == Rank::Ace
    } else {
        hand.is_connector()
    }
}

fn flush_run(run: &mut Vec<Hand>, pieces: &mut Vec<String>) {
    match run.as_slice() {
        [] => {}
        [single] => pieces.push(single.to_string()),
        [top, .., bottom] => {
            let piece = if is_family_top(top) {
                format!("{bottom}+")
            } else if bottom.second() == Rank::Two {
                format!("{top}-")
            } else {
                format!("{top}-{bottom}")
            };
            pieces.push(piece);
        }
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(hands: &[&str], combos: &[&str]) -> Vec<String> {
        let mut all: BTreeSet<Combo> = hands
            .iter()
            .flat_map(|h| h.parse::<Hand>().unwrap().to_combos())
            .collect();
        all.extend(combos.iter().map(|c| c.parse::<Combo>().unwrap()));
        pieces(&all)
    }

    #[test]
    fn test_empty() {
        assert!(render(&[], &[]).is_empty());
    }

    #[test]
    fn test_everything() {
        let all: BTreeSet<Combo> = Combo::all().iter().copied().collect();
        assert_eq!(vec!["XX"], pieces(&all));
    }

    #[test]
    fn test_pair_runs() {
        assert_eq!(vec!["KK+"], render(&["AA", "KK"], &[]));
        assert_eq!(vec!["44-"], render(&["44", "33", "22"], &[]));
        assert_eq!(vec!["JJ-99"], render(&["JJ", "TT", "99"], &[]));
        assert_eq!(vec!["AA", "QQ"], render(&["AA", "QQ"], &[]));
    }

    #[test]
    fn test_non_pair_runs() {
        assert_eq!(vec!["KJs+"], render(&["KQs", "KJs"], &[]));
        assert_eq!(vec!["K4o-"], render(&["K4o", "K3o", "K2o"], &[]));
        assert_eq!(vec!["Q9s-Q7s"], render(&["Q9s", "Q8s", "Q7s"], &[]));
        assert_eq!(vec!["AKs", "KQs"], render(&["AKs", "KQs"], &[]));
    }

    #[test]
    fn test_full_kicker_run_prefers_plus() {
        assert_eq!(vec!["62o+"], render(&["65o", "64o", "63o", "62o"], &[]));
        let pairs: Vec<String> = Hand::pairs().iter().map(|h| h.to_string()).collect();
        let pairs: Vec<&str> = pairs.iter().map(String::as_str).collect();
        assert_eq!(vec!["22+"], render(&pairs, &[]));
    }

    #[test]
    fn test_stragglers_stay_combos() {
        assert_eq!(vec!["A♠K♥"], render(&[], &["AsKh"]));
        assert_eq!(vec!["AA", "K♠K♥", "QQ"], render(&["AA", "QQ"], &["KsKh"]));
    }

    #[test]
    fn test_completed_combos_coalesce() {
        assert_eq!(vec!["AKs"], render(&[], &["AsKs", "AhKh", "AdKd", "AcKc"]));
    }

    #[test]
    fn test_group_order() {
        assert_eq!(vec!["22", "T9s", "AKo"], render(&["AKo", "T9s", "22"], &[]));
    }
}
