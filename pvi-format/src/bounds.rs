//! Integer screen rectangles used for widget placement.

use serde::{Deserialize, Serialize};

use crate::FormatError;

/// A rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Bounds {
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle at the origin with the given size.
    #[inline]
    pub const fn sized(w: i32, h: i32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Right edge X coordinate.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge Y coordinate.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Split horizontally into a `width` wide left piece and the remainder,
    /// with `spacing` between them.
    pub fn split(&self, width: i32, spacing: i32) -> Result<(Bounds, Bounds), FormatError> {
        let to_split = width + spacing;
        if to_split >= self.w {
            return Err(FormatError::Split {
                requested: to_split,
                available: self.w,
            });
        }
        let left = Bounds::new(self.x, self.y, width, self.h);
        let right = Bounds::new(self.x + to_split, self.y, self.w - to_split, self.h);
        Ok((left, right))
    }

    /// The largest square that fits inside, centred.
    pub fn square(&self) -> Bounds {
        let size = self.w.min(self.h);
        Bounds {
            x: self.x + (self.w - size) / 2,
            y: self.y + (self.h - size) / 2,
            w: size,
            h: size,
        }
    }

    /// Component-wise sum of two rectangles.
    #[inline]
    pub fn added_to(&self, other: &Bounds) -> Bounds {
        Bounds {
            x: self.x + other.x,
            y: self.y + other.y,
            w: self.w + other.w,
            h: self.h + other.h,
        }
    }

    /// Shift right by `dx` pixels.
    #[inline]
    pub fn indented(&self, dx: i32) -> Bounds {
        Bounds {
            x: self.x + dx,
            ..*self
        }
    }

    /// Translate by an offset, keeping the size.
    #[inline]
    pub fn translate(&self, dx: i32, dy: i32) -> Bounds {
        Bounds {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
