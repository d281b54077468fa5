//! Axis-aligned windows in image coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular region of non-zero width and height, with its top-left
/// corner at a non-negative pixel position.
///
/// # Examples
/// ```
/// use hogscan::rect::Rect;
///
/// // Construct a rectangle with top-left corner at (4, 5), width 6 and height 7.
/// let rect = Rect::at(4, 5).of_size(6, 7);
///
/// // Contains top-left point:
/// assert_eq!(rect.left(), 4);
/// assert_eq!(rect.top(), 5);
/// assert!(rect.contains(rect.left(), rect.top()));
///
/// // Contains bottom-right point, at (left + width - 1, top + height - 1):
/// assert_eq!(rect.right(), 9);
/// assert_eq!(rect.bottom(), 11);
/// assert!(rect.contains(rect.right(), rect.bottom()));
///
/// // Fits inside a 10x12 image but not a 10x11 one.
/// assert!(rect.fits_within(10, 12));
/// assert!(!rect.fits_within(10, 11));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl Rect {
    /// Reduces possibility of confusing coordinates and dimensions
    /// when specifying rects.
    ///
    /// See the [struct-level documentation](Rect) for examples.
    pub fn at(x: u32, y: u32) -> RectPosition {
        RectPosition { left: x, top: y }
    }

    /// Smallest y-coordinate reached by rect.
    pub fn top(&self) -> u32 {
        self.top
    }

    /// Smallest x-coordinate reached by rect.
    pub fn left(&self) -> u32 {
        self.left
    }

    /// Greatest y-coordinate reached by rect.
    pub fn bottom(&self) -> u32 {
        self.top + self.height - 1
    }

    /// Greatest x-coordinate reached by rect.
    pub fn right(&self) -> u32 {
        self.left + self.width - 1
    }

    /// Width of rect.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of rect.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the rect contains the pixel at `(x, y)`.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.left <= x && x <= self.right() && self.top <= y && y <= self.bottom()
    }

    /// Whether the rect lies entirely within `[0, width) x [0, height)`.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        // u64 so that rects near u32::MAX cannot wrap
        self.left as u64 + self.width as u64 <= width as u64
            && self.top as u64 + self.height as u64 <= height as u64
    }
}

/// Position of the top left of a rectangle.
/// Only used when building a [`Rect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RectPosition {
    left: u32,
    top: u32,
}

impl RectPosition {
    /// Construct a rectangle from a position and size. Width and height
    /// are required to be strictly positive.
    ///
    /// See the [`Rect`] documentation for examples.
    pub fn of_size(self, width: u32, height: u32) -> Rect {
        assert!(width > 0, "width must be strictly positive");
        assert!(height > 0, "height must be strictly positive");
        Rect {
            left: self.left,
            top: self.top,
            width,
            height,
        }
    }
}
