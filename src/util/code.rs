use super::Position;
use once_cell::unsync::OnceCell;

/// A wrapper around the input text which lazily computes line-break offsets
/// so a byte pointer can be turned into a [Position] without paying for it
/// unless an error actually needs to be reported.
pub struct Code<'c> {
    pub value: &'c str,
    line_breaks: OnceCell<Vec<usize>>,
}

impl<'c> From<&'c str> for Code<'c> {
    fn from(value: &'c str) -> Self {
        Code::new(value)
    }
}

impl<'c> Code<'c> {
    pub fn new(value: &'c str) -> Self {
        Self {
            value,
            line_breaks: OnceCell::new(),
        }
    }

    fn obtain_line_breaks(&self) -> &Vec<usize> {
        self.line_breaks.get_or_init(|| {
            self.value
                .char_indices()
                .filter_map(|(index, c)| if c == '\n' { Some(index) } else { None })
                .collect()
        })
    }

    /// Resolve a byte offset into `value` to a 1-indexed line/column pair.
    pub fn obtain_position(&self, pointer: usize) -> Position {
        let line_breaks = self.obtain_line_breaks();
        let index = match line_breaks.binary_search(&pointer) {
            Ok(index) | Err(index) => index,
        };

        if index == 0 {
            Position::new(1, self.value[..pointer].chars().count() + 1)
        } else {
            let break_point = line_breaks[index - 1] + 1;
            Position::new(index + 1, self.value[break_point..pointer].chars().count() + 1)
        }
    }
}
