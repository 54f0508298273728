//! Pagination arithmetic for `list`.
//!
//! Request parameters arrive as loose text. They are coerced, never rejected:
//! anything that is not a usable number silently means "no limit" or "no skip".

/// A `limit`/`skip` pair. `limit == 0` is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub skip: usize,
}

/// Which physical rows a page covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Window {
    /// Every data row, in one read of the used area.
    Everything,
    /// `num_rows` rows starting at physical row `start`.
    Rows { start: usize, num_rows: usize },
    /// Skipped far past the end; answered with one empty row.
    PastEnd,
    /// Nothing left after the skip.
    Empty,
}

impl Page {
    pub fn new(limit: usize, skip: usize) -> Page {
        Page { limit, skip }
    }

    pub fn from_params(limit: Option<&str>, skip: Option<&str>) -> Page {
        //! Build a page from raw request parameters through [`str_to_num`].

        Page {
            limit: str_to_num(limit),
            skip: str_to_num(skip),
        }
    }

    pub(crate) fn window(&self, last_row: usize) -> Window {
        //! Resolve the rows this page reads, given the store's last used row.
        //!
        //! The data window starts at `skip + 2` and is `last_row - skip - 1`
        //! rows tall. A skip beyond `last_row + 2` answers with a single empty
        //! row; that margin is observable and kept as is.

        if self.limit == 0 && self.skip == 0 {
            return Window::Everything;
        }

        if self.skip > last_row + 2 {
            return Window::PastEnd;
        }

        let num_rows = last_row.saturating_sub(self.skip + 1);
        if num_rows == 0 {
            return Window::Empty;
        }

        Window::Rows {
            start: self.skip + 2,
            num_rows,
        }
    }

    pub(crate) fn truncate<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if self.limit > 0 {
            rows.truncate(self.limit);
        }
        rows
    }
}

pub fn str_to_num(value: Option<&str>) -> usize {
    //! Permissive numeric coercion for request parameters.
    //!
    //! - absent, empty or blank: 0
    //! - a full numeric literal (`"12"`, `" 7 "`, `"2.9"`, `"1e2"`): that number,
    //!   truncated toward zero
    //! - otherwise a leading integer (`"12abc"`): that integer
    //! - otherwise: 0
    //!
    //! Negative results clamp to 0 since there is no negative page. Radix
    //! prefixes are not understood (`"0x10"` is 0), and neither is infinity.

    let Some(text) = value else {
        return 0;
    };

    let text = text.trim();
    if text.is_empty() {
        return 0;
    }

    if let Ok(number) = text.parse::<f64>() {
        return if number.is_finite() && number > 0.0 {
            number.trunc() as usize
        } else {
            0
        };
    }

    leading_integer(text).map_or(0, |number| number.max(0) as usize)
}

fn leading_integer(text: &str) -> Option<i64> {
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|number| sign * number)
}
