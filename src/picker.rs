// Location picker: incremental search over the fetched list.
//
// Typing narrows the list, a digit that names a listed entry selects it
// right away, and Enter only resolves once a single match is left.

use std::io::Write;

use anyhow::Result;
use log::debug;

use crate::api::Location;
use crate::input::{Key, KeySource};
use crate::render::{filter_locations, render_location_list};

/// What a single keystroke did to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerStep {
    /// Search term changed; the list needs redrawing.
    Redraw,
    /// Nothing to do.
    Ignored,
    Selected(Location),
    Cancelled,
}

#[derive(Debug)]
pub struct Picker<'a> {
    locations: &'a [Location],
    search_term: String,
}

impl<'a> Picker<'a> {
    pub fn new(locations: &'a [Location]) -> Self {
        Picker {
            locations,
            search_term: String::new(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filtered(&self) -> Vec<&'a Location> {
        filter_locations(self.locations, &self.search_term)
    }

    /// Current screen and the matches shown on it.
    pub fn render(&self) -> (String, Vec<&'a Location>) {
        render_location_list(self.locations, &self.search_term)
    }

    pub fn handle(&mut self, key: Key) -> PickerStep {
        match key {
            Key::Interrupt => PickerStep::Cancelled,
            Key::Enter => {
                let filtered = self.filtered();
                match filtered.as_slice() {
                    [only] => PickerStep::Selected((*only).clone()),
                    _ => PickerStep::Ignored,
                }
            }
            Key::Backspace => {
                if self.search_term.pop().is_some() {
                    PickerStep::Redraw
                } else {
                    PickerStep::Ignored
                }
            }
            Key::Char(c) if c.is_ascii_digit() => {
                let filtered = self.filtered();
                let index = c.to_digit(10).unwrap_or(0) as usize;
                if (1..=filtered.len()).contains(&index) {
                    PickerStep::Selected(filtered[index - 1].clone())
                } else {
                    self.search_term.push(c);
                    PickerStep::Redraw
                }
            }
            Key::Char(c) if c.is_alphabetic() || c == ' ' => {
                self.search_term.push(c);
                PickerStep::Redraw
            }
            Key::Char(_) | Key::Other => PickerStep::Ignored,
        }
    }
}

/// Run the picker until a location is chosen. `None` means the user
/// interrupted.
pub fn select_location<K, W>(
    keys: &mut K,
    locations: &[Location],
    out: &mut W,
) -> Result<Option<Location>>
where
    K: KeySource,
    W: Write,
{
    let mut picker = Picker::new(locations);
    draw(&picker, out)?;

    loop {
        match picker.handle(keys.next_key()?) {
            PickerStep::Redraw => draw(&picker, out)?,
            PickerStep::Ignored => {}
            PickerStep::Selected(location) => {
                debug!("selected location {} ({})", location.name, location.id);
                return Ok(Some(location));
            }
            PickerStep::Cancelled => return Ok(None),
        }
    }
}

fn draw<W: Write>(picker: &Picker<'_>, out: &mut W) -> Result<()> {
    let (frame, _) = picker.render();
    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys_from_str;
    use std::collections::VecDeque;

    fn locations() -> Vec<Location> {
        ["Oslo Sentrum", "Oslo Majorstuen", "Bergen Gym", "Tromsø"]
            .iter()
            .enumerate()
            .map(|(i, name)| Location {
                id: format!("id-{i}"),
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn digit_selects_listed_entry_without_enter() {
        let all = locations();
        let three = &all[..3];
        let mut picker = Picker::new(three);
        assert_eq!(picker.handle(Key::Char('2')), PickerStep::Selected(three[1].clone()));
    }

    #[test]
    fn digit_indexes_the_filtered_list() {
        let all = locations();
        let mut picker = Picker::new(&all);
        for c in "oslo".chars() {
            assert_eq!(picker.handle(Key::Char(c)), PickerStep::Redraw);
        }
        assert_eq!(picker.handle(Key::Char('2')), PickerStep::Selected(all[1].clone()));
    }

    #[test]
    fn out_of_range_digit_extends_search() {
        let all = locations();
        let mut picker = Picker::new(&all);
        assert_eq!(picker.handle(Key::Char('9')), PickerStep::Redraw);
        assert_eq!(picker.search_term(), "9");
        assert!(picker.filtered().is_empty());

        let mut picker = Picker::new(&all);
        assert_eq!(picker.handle(Key::Char('0')), PickerStep::Redraw);
        assert_eq!(picker.search_term(), "0");
    }

    #[test]
    fn enter_needs_exactly_one_match() {
        let all = locations();
        let mut picker = Picker::new(&all);
        assert_eq!(picker.handle(Key::Enter), PickerStep::Ignored);

        for c in "oslo".chars() {
            picker.handle(Key::Char(c));
        }
        assert_eq!(picker.filtered().len(), 2);
        assert_eq!(picker.handle(Key::Enter), PickerStep::Ignored);

        for c in "xx".chars() {
            picker.handle(Key::Char(c));
        }
        assert!(picker.filtered().is_empty());
        assert_eq!(picker.handle(Key::Enter), PickerStep::Ignored);

        picker.handle(Key::Backspace);
        picker.handle(Key::Backspace);
        for c in " maj".chars() {
            picker.handle(Key::Char(c));
        }
        assert_eq!(picker.handle(Key::Enter), PickerStep::Selected(all[1].clone()));
    }

    #[test]
    fn backspace_on_empty_term_is_noop() {
        let all = locations();
        let mut picker = Picker::new(&all);
        assert_eq!(picker.handle(Key::Backspace), PickerStep::Ignored);
        picker.handle(Key::Char('b'));
        assert_eq!(picker.handle(Key::Backspace), PickerStep::Redraw);
        assert_eq!(picker.search_term(), "");
    }

    #[test]
    fn accepts_norwegian_letters_and_skips_punctuation() {
        let all = locations();
        let mut picker = Picker::new(&all);
        assert_eq!(picker.handle(Key::Char('!')), PickerStep::Ignored);
        assert_eq!(picker.handle(Key::Other), PickerStep::Ignored);
        for c in "ø".chars() {
            assert_eq!(picker.handle(Key::Char(c)), PickerStep::Redraw);
        }
        assert_eq!(picker.handle(Key::Enter), PickerStep::Selected(all[3].clone()));
    }

    #[test]
    fn interrupt_cancels() {
        let all = locations();
        let mut picker = Picker::new(&all);
        assert_eq!(picker.handle(Key::Interrupt), PickerStep::Cancelled);
    }

    #[test]
    fn select_location_redraws_while_typing() {
        let all = locations();
        let mut keys = keys_from_str("berg");
        keys.push_back(Key::Enter);
        let mut out = Vec::new();

        let chosen = select_location(&mut keys, &all, &mut out).unwrap();
        assert_eq!(chosen, Some(all[2].clone()));

        let screen = String::from_utf8(out).unwrap();
        assert_eq!(screen.matches("Select a location:").count(), 5);
        assert!(screen.contains("Searching for: \"berg\""));
    }

    #[test]
    fn select_location_returns_none_on_interrupt() {
        let all = locations();
        let mut keys: VecDeque<Key> = VecDeque::from(vec![Key::Char('o'), Key::Interrupt]);
        let mut out = Vec::new();
        assert_eq!(select_location(&mut keys, &all, &mut out).unwrap(), None);
    }
}
