use crate::dial::DialValue;
use derive_more::Display;
use std::fmt;

pub const DEFAULT_CODE_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryState {
    #[display("entering ({_0} entered)")]
    Entering(usize),
    #[display("complete")]
    Complete,
}

/// Digits picked so far, capped at the code length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passcode {
    digits: Vec<DialValue>,
    code_length: usize,
}

impl Passcode {
    pub fn new(code_length: usize) -> Self {
        let code_length = code_length.max(1);
        Self {
            digits: Vec::with_capacity(code_length),
            code_length,
        }
    }

    pub fn state(&self) -> EntryState {
        if self.is_complete() {
            EntryState::Complete
        } else {
            EntryState::Entering(self.digits.len())
        }
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() >= self.code_length
    }

    /// Returns `false` when the code is already complete.
    pub fn append(&mut self, value: DialValue) -> bool {
        if self.is_complete() {
            return false;
        }
        self.digits.push(value);
        true
    }

    pub fn remove_last(&mut self) -> Option<DialValue> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn digits(&self) -> &[DialValue] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.code_length
    }

    /// Changes the code length, dropping digits that no longer fit.
    pub fn resize(&mut self, code_length: usize) {
        self.code_length = code_length.max(1);
        self.digits.truncate(self.code_length);
    }
}

impl Default for Passcode {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

/// The caption shown under the dots.
impl fmt::Display for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return write!(f, "Entered: -");
        }
        write!(f, "Entered:")?;
        for digit in &self.digits {
            write!(f, " {digit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(p: &Passcode) -> Vec<u32> {
        p.digits().iter().map(|d| **d).collect()
    }

    #[test]
    fn test_four_picks_complete_the_code() {
        let mut p = Passcode::new(4);
        for v in [3, 14, 27, 5] {
            assert!(p.append(DialValue::new(v)));
        }
        assert_eq!(digits(&p), vec![3, 14, 27, 5]);
        assert_eq!(p.state(), EntryState::Complete);

        assert!(!p.append(DialValue::new(9)));
        assert_eq!(p.len(), 4);
        assert_eq!(digits(&p), vec![3, 14, 27, 5]);
    }

    #[test]
    fn test_remove_last_reopens_entry() {
        let mut p = Passcode::new(2);
        p.append(DialValue::new(1));
        p.append(DialValue::new(2));
        assert_eq!(p.remove_last(), Some(DialValue::new(2)));
        assert_eq!(p.state(), EntryState::Entering(1));
        p.remove_last();
        assert_eq!(p.remove_last(), None);
        assert!(p.is_empty());
    }

    #[test]
    fn test_clear_from_any_state() {
        let mut p = Passcode::default();
        p.clear();
        assert_eq!(p.state(), EntryState::Entering(0));
        for v in 0..6 {
            p.append(DialValue::new(v));
        }
        p.clear();
        assert_eq!(p.len(), 0);
        assert_eq!(p.capacity(), DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn test_zero_length_floors_to_one() {
        let mut p = Passcode::new(0);
        assert!(p.append(DialValue::new(8)));
        assert!(!p.append(DialValue::new(9)));
        assert_eq!(p.state(), EntryState::Complete);
    }

    #[test]
    fn test_resize_truncates() {
        let mut p = Passcode::new(4);
        for v in [1, 2, 3] {
            p.append(DialValue::new(v));
        }
        p.resize(2);
        assert_eq!(digits(&p), vec![1, 2]);
        assert!(p.is_complete());
    }

    #[test]
    fn test_caption() {
        let mut p = Passcode::new(4);
        assert_eq!(p.to_string(), "Entered: -");
        p.append(DialValue::new(3));
        p.append(DialValue::new(14));
        assert_eq!(p.to_string(), "Entered: 3 14");
        assert_eq!(p.state().to_string(), "entering (2 entered)");
    }
}
