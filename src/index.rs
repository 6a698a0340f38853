//! Index normalization for sequence-like values.
//!
//! Positions are given as `isize` so that negative values count from the
//! end, and are converted into absolute `usize` positions before use.

use core::ops::Range;

use crate::error::{Error, ErrorRepr};

/// Converts a possibly negative index into an absolute one.
///
/// A negative index is wrapped by adding `len`. Only the lower bound is
/// checked here; callers check the upper bound against their own rules
/// (element access needs `< len`, insertion allows `== len`).
///
/// # Examples
///
/// ```
/// use uriplus::index::abs_index;
///
/// assert_eq!(abs_index(-1, 3)?, 2);
/// assert_eq!(abs_index(5, 3)?, 5);
/// assert!(abs_index(-4, 3).is_err());
/// # Ok::<_, uriplus::Error>(())
/// ```
pub fn abs_index(index: isize, len: usize) -> Result<usize, Error> {
    if index >= 0 {
        return Ok(index as usize);
    }
    let wrapped = len as isize + index;
    if wrapped < 0 {
        return Err(Error::out_of_range(index, len));
    }
    Ok(wrapped as usize)
}

/// Converts a possibly negative index into an absolute one pointing at an element.
pub(crate) fn element_index(index: isize, len: usize) -> Result<usize, Error> {
    let abs = abs_index(index, len)?;
    if abs >= len {
        return Err(Error::out_of_range(index, len));
    }
    Ok(abs)
}

/// Converts a possibly negative index into an insertion position.
///
/// Positions past the end clamp to the end, as list insertion does.
pub(crate) fn insertion_index(index: isize, len: usize) -> usize {
    if index >= 0 {
        (index as usize).min(len)
    } else {
        (len as isize + index).max(0) as usize
    }
}

/// Resolves a slice bound, which may be one past the last element.
fn bound(b: isize, len: usize) -> Result<usize, Error> {
    let abs = abs_index(b, len)?;
    if abs > len {
        return Err(Error::out_of_range(b, len));
    }
    Ok(abs)
}

/// A `start:stop:step` selection over a sequence.
///
/// Unset bounds mean "from the beginning" and "to the end", reversed for a
/// negative step. An unset step is `1` when `start <= stop` and `-1`
/// otherwise.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    /// First selected position.
    pub start: Option<isize>,
    /// Position one past the selection (in the direction of `step`).
    pub stop: Option<isize>,
    /// Distance between selected positions.
    pub step: Option<isize>,
}

impl Slice {
    /// Creates a slice.
    #[inline]
    #[must_use]
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// Creates a `start..stop` slice with the default step.
    #[inline]
    #[must_use]
    pub fn range(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    /// Creates a slice selecting everything from `start` to the end.
    #[inline]
    #[must_use]
    pub fn starting_at(start: isize) -> Self {
        Self::new(Some(start), None, None)
    }

    /// Creates a slice selecting everything before `stop`.
    #[inline]
    #[must_use]
    pub fn up_to(stop: isize) -> Self {
        Self::new(None, Some(stop), None)
    }

    /// Returns this slice with the given step.
    #[inline]
    #[must_use]
    pub fn step(self, step: isize) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Resolves a slice without an explicit step other than `1` into a range to splice.
    ///
    /// Returns `None` for stepped slices. A stop before the start yields an
    /// empty range at the start, so that assignment inserts there.
    pub(crate) fn splice_range(&self, len: usize) -> Result<Option<Range<usize>>, Error> {
        if !matches!(self.step, None | Some(1)) {
            return Ok(None);
        }
        let start = self.start.map(|b| bound(b, len)).transpose()?.unwrap_or(0);
        let stop = self.stop.map(|b| bound(b, len)).transpose()?.unwrap_or(len);
        Ok(Some(start..stop.max(start)))
    }

    /// Resolves the slice against a sequence length into absolute positions.
    ///
    /// # Errors
    ///
    /// Fails if the step is zero, or a bound is out of range after wrapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::index::Slice;
    ///
    /// assert_eq!(Slice::range(1, 3).indices(4)?, [1, 2]);
    /// assert_eq!(Slice::starting_at(-2).indices(4)?, [2, 3]);
    /// assert_eq!(Slice::default().step(2).indices(5)?, [0, 2, 4]);
    /// assert_eq!(Slice::range(3, 0).indices(4)?, [3, 2, 1]);
    /// # Ok::<_, uriplus::Error>(())
    /// ```
    pub fn indices(&self, len: usize) -> Result<Vec<usize>, Error> {
        if self.step == Some(0) {
            return Err(ErrorRepr::ZeroStep.into());
        }
        let start = self.start.map(|b| bound(b, len)).transpose()?;
        let stop = self.stop.map(|b| bound(b, len)).transpose()?;
        let step = self.step.unwrap_or_else(|| {
            if start.unwrap_or(0) <= stop.unwrap_or(len) {
                1
            } else {
                -1
            }
        });
        let (start, stop) = if step > 0 {
            (start.unwrap_or(0) as isize, stop.unwrap_or(len) as isize)
        } else {
            (
                start.map_or(len as isize - 1, |s| s as isize),
                stop.map_or(-1, |s| s as isize),
            )
        };

        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            if (i as usize) < len {
                out.push(i as usize);
            }
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(out)
    }
}
