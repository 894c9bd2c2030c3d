/// A 2D point in either data or pixel space (the owner decides which).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 1D numeric domain (min..max).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain1D {
    pub min: f32,
    pub max: f32,
}

impl Domain1D {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn center(&self) -> f32 {
        self.min + self.span() * 0.5
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Scale the span by `factor` and center the result on `center`.
    ///
    /// `factor < 1` narrows the domain (zoom in), `factor > 1` widens it.
    pub fn rescaled(&self, factor: f32, center: f32) -> Self {
        let span = self.span() * factor;
        let min = center - span * 0.5;
        Self::new(min, min + span)
    }

    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// 2D domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain2D {
    pub x: Domain1D,
    pub y: Domain1D,
}

impl Domain2D {
    pub fn new(x: Domain1D, y: Domain1D) -> Self {
        Self { x, y }
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x.min, self.y.min, self.x.span(), self.y.span())
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            Domain1D::new(rect.x, rect.x + rect.width),
            Domain1D::new(rect.y, rect.y + rect.height),
        )
    }
}

/// Axis-aligned rectangle given by its leading corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
