//! Box and row selection.

use strum::{Display, EnumCount, FromRepr};

/// The five list boxes, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumCount, FromRepr)]
#[repr(u8)]
pub enum BoxId {
    #[default]
    Device,
    Station,
    Vpn,
    Known,
    Scanned,
}

impl BoxId {
    fn step(self, forward: bool) -> Option<Self> {
        let index = self as u8;
        let next = if forward {
            index.checked_add(1)?
        } else {
            index.checked_sub(1)?
        };
        Self::from_repr(next)
    }
}

/// Row counts of each box, as currently displayed.
pub trait BoxLengths {
    fn box_len(&self, id: BoxId) -> usize;
}

/// (selectedBox, selectedEntry).
///
/// `entry` stays within `[0, max(1, len) - 1]` of the selected box, and the
/// selection never rests on the VPN box while it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    pub selected_box: BoxId,
    pub selected_entry: usize,
}

impl Navigation {
    pub fn up(&mut self) {
        self.selected_entry = self.selected_entry.saturating_sub(1);
    }

    pub fn down(&mut self, lists: &impl BoxLengths) {
        if self.selected_entry + 1 < lists.box_len(self.selected_box) {
            self.selected_entry += 1;
        }
    }

    /// Move to the next box. Stops at the last box rather than wrapping.
    pub fn next_box(&mut self, lists: &impl BoxLengths) {
        self.move_box(lists, true);
    }

    pub fn prev_box(&mut self, lists: &impl BoxLengths) {
        self.move_box(lists, false);
    }

    fn move_box(&mut self, lists: &impl BoxLengths, forward: bool) {
        let Some(mut target) = self.selected_box.step(forward) else {
            return;
        };
        if target == BoxId::Vpn && lists.box_len(BoxId::Vpn) == 0 {
            match target.step(forward) {
                Some(skipped) => target = skipped,
                None => return,
            }
        }
        self.selected_box = target;
        self.selected_entry = 0;
    }

    /// Re-establish the invariants after the lists changed underneath.
    pub fn clamp(&mut self, lists: &impl BoxLengths) {
        if self.selected_box == BoxId::Vpn && lists.box_len(BoxId::Vpn) == 0 {
            self.selected_box = BoxId::Known;
            self.selected_entry = 0;
        }
        let len = lists.box_len(self.selected_box).max(1);
        self.selected_entry = self.selected_entry.min(len - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Lens([usize; BoxId::COUNT]);

    impl BoxLengths for Lens {
        fn box_len(&self, id: BoxId) -> usize {
            self.0[id as usize]
        }
    }

    fn nav(selected_box: BoxId, selected_entry: usize) -> Navigation {
        Navigation {
            selected_box,
            selected_entry,
        }
    }

    #[test]
    fn tab_skips_empty_vpn_box_both_ways() {
        let lists = Lens([1, 1, 0, 3, 4]);
        let mut n = nav(BoxId::Station, 0);
        n.next_box(&lists);
        assert_eq!(n.selected_box, BoxId::Known);
        n.prev_box(&lists);
        assert_eq!(n.selected_box, BoxId::Station);
    }

    #[test]
    fn tab_visits_vpn_box_when_populated() {
        let lists = Lens([1, 1, 2, 3, 4]);
        let mut n = nav(BoxId::Station, 0);
        n.next_box(&lists);
        assert_eq!(n.selected_box, BoxId::Vpn);
    }

    #[test]
    fn tab_stops_at_the_ends_and_resets_entry() {
        let lists = Lens([1, 1, 0, 3, 4]);
        let mut n = nav(BoxId::Scanned, 2);
        n.next_box(&lists);
        assert_eq!(n, nav(BoxId::Scanned, 2));

        n.prev_box(&lists);
        assert_eq!(n, nav(BoxId::Known, 0));

        let mut first = nav(BoxId::Device, 0);
        first.prev_box(&lists);
        assert_eq!(first, nav(BoxId::Device, 0));
    }

    #[test]
    fn up_and_down_are_clamped() {
        let lists = Lens([1, 1, 0, 3, 0]);
        let mut n = nav(BoxId::Known, 0);
        n.up();
        assert_eq!(n.selected_entry, 0);
        for _ in 0..10 {
            n.down(&lists);
        }
        assert_eq!(n.selected_entry, 2);

        let mut empty = nav(BoxId::Scanned, 0);
        empty.down(&lists);
        assert_eq!(empty.selected_entry, 0);
    }

    #[test]
    fn clamp_follows_shrinking_lists() {
        let mut n = nav(BoxId::Known, 5);
        n.clamp(&Lens([1, 1, 0, 2, 0]));
        assert_eq!(n, nav(BoxId::Known, 1));

        n.clamp(&Lens([1, 1, 0, 0, 0]));
        assert_eq!(n, nav(BoxId::Known, 0));

        let mut on_vpn = nav(BoxId::Vpn, 1);
        on_vpn.clamp(&Lens([1, 1, 0, 2, 0]));
        assert_eq!(on_vpn, nav(BoxId::Known, 0));
    }

    #[test]
    fn invariant_holds_over_key_sequences() {
        let shapes = [[0, 0, 0, 0, 0], [1, 1, 0, 2, 5], [2, 2, 3, 0, 1]];
        for shape in shapes {
            let lists = Lens(shape);
            let mut n = Navigation::default();
            for step in 0..200_usize {
                match step % 7 {
                    0 | 3 => n.down(&lists),
                    1 => n.next_box(&lists),
                    2 => n.up(),
                    4 | 5 => n.next_box(&lists),
                    _ => n.prev_box(&lists),
                }
                let len = lists.box_len(n.selected_box);
                assert!(n.selected_entry < len.max(1), "{shape:?} step {step}");
                if shape[2] == 0 {
                    assert_ne!(n.selected_box, BoxId::Vpn);
                }
            }
        }
    }
}
