//! Geometric primitives for diagram layout.
//!
//! This module provides the value types every layouter works with.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//! - [`Segment`] - A straight line between two points
//! - [`Connector`] - A three-segment orthogonal route between two endpoints
//! - [`Direction`] - A compass direction used to orient feature icons
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! All operations are total: zero-sized, inverted or disjoint input yields a
//! defined result (usually the empty [`Bounds`]) instead of a panic.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Sum of the absolute coordinates.
    ///
    /// Layouters use this as the cost of moving an element by this offset.
    pub fn manhattan_length(self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Converts a point and size into bounds centered on this point
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns a new Size with the maximum width and height of both sizes
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size grown by the horizontal and vertical sums of the insets
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Area covered by this size; zero for degenerate sizes
    pub fn area(self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            0.0
        } else {
            self.width * self.height
        }
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// A bounds whose width or height is not positive is *empty*. Empty bounds
/// have zero area, never intersect anything and are produced by
/// [`Bounds::intersect`] for disjoint input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from left, top, width and height
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Bounds;
    /// let bounds = Bounds::new(10.0, 20.0, 30.0, 40.0);
    /// assert_eq!(bounds.max_x(), 40.0);
    /// assert_eq!(bounds.max_y(), 60.0);
    /// assert_eq!(bounds.area(), 1200.0);
    /// ```
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: left,
            min_y: top,
            max_x: left + width,
            max_y: top + height,
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates the smallest bounds containing both points
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Returns the minimum x-coordinate (left edge)
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate (top edge)
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate (right edge)
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate (bottom edge)
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// True if the bounds covers no area
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Area of the bounds, zero when empty
    pub fn area(self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width() * self.height()
        }
    }

    /// Returns the overlapping region of two bounds.
    ///
    /// Disjoint or merely touching bounds yield the empty default bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Bounds;
    /// let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
    /// let b = Bounds::new(5.0, 5.0, 10.0, 10.0);
    /// assert_eq!(a.intersect(&b), Bounds::new(5.0, 5.0, 5.0, 5.0));
    ///
    /// let far = Bounds::new(50.0, 50.0, 1.0, 1.0);
    /// assert!(a.intersect(&far).is_empty());
    /// ```
    pub fn intersect(&self, other: &Self) -> Self {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        if max_x <= min_x || max_y <= min_y {
            Self::default()
        } else {
            Self {
                min_x,
                min_y,
                max_x,
                max_y,
            }
        }
    }

    /// Area shared by two bounds
    pub fn intersect_area(&self, other: &Self) -> f64 {
        self.intersect(other).area()
    }

    /// True if both bounds share a region of positive area
    pub fn is_intersecting(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Area of `self` that lies outside of `outer`
    pub fn outside_area(&self, outer: &Self) -> f64 {
        (self.area() - self.intersect_area(outer)).max(0.0)
    }

    /// True if `other` lies completely within `self` (edges inclusive)
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// True if the point lies within `self` (edges inclusive)
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Bounds;
    /// let header = Bounds::new(0.0, 0.0, 100.0, 30.0);
    /// let content = Bounds::new(10.0, 40.0, 120.0, 80.0);
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Moves the bounds in the opposite direction of the specified offset
    pub fn inverse_translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x - offset.x,
            min_y: self.min_y - offset.y,
            max_x: self.max_x - offset.x,
            max_y: self.max_y - offset.y,
        }
    }

    /// Grows the bounds outward by the insets
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Shrinks the bounds inward by the insets.
    ///
    /// An axis that would become negative collapses onto its center line.
    pub fn shrink(&self, insets: Insets) -> Self {
        let mut min_x = self.min_x + insets.left();
        let mut max_x = self.max_x - insets.right();
        if max_x < min_x {
            let center = (self.min_x + self.max_x) / 2.0;
            min_x = center;
            max_x = center;
        }
        let mut min_y = self.min_y + insets.top();
        let mut max_y = self.max_y - insets.bottom();
        if max_y < min_y {
            let center = (self.min_y + self.max_y) / 2.0;
            min_y = center;
            max_y = center;
        }
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Grows width and height by the given deltas, keeping the center fixed
    pub fn expand(&self, delta_width: f64, delta_height: f64) -> Self {
        let size = Size::new(
            (self.width() + delta_width).max(0.0),
            (self.height() + delta_height).max(0.0),
        );
        Self::new_from_center(self.center(), size)
    }

    /// Grows width and height by the given deltas, keeping the top-left corner fixed
    pub fn enlarge(&self, delta_width: f64, delta_height: f64) -> Self {
        Self {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.min_x + (self.width() + delta_width).max(0.0),
            max_y: self.min_y + (self.height() + delta_height).max(0.0),
        }
    }

    /// Returns the offset that moves `self` inside `outer`.
    ///
    /// If `self` is larger than `outer` on an axis, the offset aligns the
    /// minimum edges on that axis.
    pub fn offset_into(&self, outer: &Self) -> Point {
        fn axis(min: f64, max: f64, outer_min: f64, outer_max: f64) -> f64 {
            if max - min >= outer_max - outer_min || min < outer_min {
                outer_min - min
            } else if max > outer_max {
                outer_max - max
            } else {
                0.0
            }
        }
        Point::new(
            axis(self.min_x, self.max_x, outer.min_x, outer.max_x),
            axis(self.min_y, self.max_y, outer.min_y, outer.max_y),
        )
    }

    /// Point inside `self` that is closest to `point`
    pub fn nearest_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.min_x, self.max_x.max(self.min_x)),
            point.y.clamp(self.min_y, self.max_y.max(self.min_y)),
        )
    }

    /// The four parts of `self` that remain free of `obstacle`.
    ///
    /// Returned in the order left, right, above, below. Each strip spans the
    /// full extent of `self` on the other axis; strips that would be empty are
    /// returned as the empty default bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Bounds;
    /// let free = Bounds::new(0.0, 0.0, 100.0, 100.0);
    /// let obstacle = Bounds::new(40.0, 40.0, 20.0, 20.0);
    /// let [left, right, above, below] = free.strips_outside(&obstacle);
    /// assert_eq!(left, Bounds::new(0.0, 0.0, 40.0, 100.0));
    /// assert_eq!(right, Bounds::new(60.0, 0.0, 40.0, 100.0));
    /// assert_eq!(above, Bounds::new(0.0, 0.0, 100.0, 40.0));
    /// assert_eq!(below, Bounds::new(0.0, 60.0, 100.0, 40.0));
    /// ```
    pub fn strips_outside(&self, obstacle: &Self) -> [Self; 4] {
        let non_empty = |bounds: Self| if bounds.is_empty() { Self::default() } else { bounds };
        [
            non_empty(Self {
                max_x: self.max_x.min(obstacle.min_x),
                ..*self
            }),
            non_empty(Self {
                min_x: self.min_x.max(obstacle.max_x),
                ..*self
            }),
            non_empty(Self {
                max_y: self.max_y.min(obstacle.min_y),
                ..*self
            }),
            non_empty(Self {
                min_y: self.min_y.max(obstacle.max_y),
                ..*self
            }),
        ]
    }
}

/// Spacing around an element with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f64 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f64 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f64 {
        self.left
    }

    /// Returns a new Insets with the specified top value
    pub fn with_top(self, top: f64) -> Self {
        Self { top, ..self }
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f64 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f64 {
        self.top + self.bottom
    }
}

/// A straight line from `start` to `end`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(self) -> Point {
        self.start
    }

    pub fn end(self) -> Point {
        self.end
    }

    pub fn length(self) -> f64 {
        self.end.sub_point(self.start).hypot()
    }

    /// The segment drawn with the given line width, as a rectangle.
    ///
    /// Zero-length segments have no extent and yield the empty bounds.
    pub fn thick_bounds(self, line_width: f64) -> Bounds {
        if self.length() == 0.0 {
            return Bounds::default();
        }
        Bounds::from_corners(self.start, self.end).expand(line_width, line_width)
    }
}

/// An orthogonal three-segment route.
///
/// The route runs from the source end to the start of the main line, along
/// the main line, and from the end of the main line to the destination end.
/// The main line is either vertical (at a fixed x) or horizontal (at a fixed
/// y); the two end segments are perpendicular to it.
///
/// ```text
///   source ●────┐            main line vertical at x
///               │
///               └────● destination
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Connector {
    source_end: Point,
    main_line_start: Point,
    main_line_end: Point,
    destination_end: Point,
}

impl Connector {
    /// Route whose main line is vertical at `main_x`
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Connector, Point};
    /// let connector = Connector::vertical(Point::new(0.0, 0.0), Point::new(20.0, 30.0), 10.0);
    /// assert_eq!(connector.length(), 50.0);
    /// assert_eq!(connector.main_line_middle(), Point::new(10.0, 15.0));
    /// ```
    pub fn vertical(source_end: Point, destination_end: Point, main_x: f64) -> Self {
        Self {
            source_end,
            main_line_start: Point::new(main_x, source_end.y),
            main_line_end: Point::new(main_x, destination_end.y),
            destination_end,
        }
    }

    /// Route whose main line is horizontal at `main_y`
    pub fn horizontal(source_end: Point, destination_end: Point, main_y: f64) -> Self {
        Self {
            source_end,
            main_line_start: Point::new(source_end.x, main_y),
            main_line_end: Point::new(destination_end.x, main_y),
            destination_end,
        }
    }

    pub fn source_end(&self) -> Point {
        self.source_end
    }

    pub fn destination_end(&self) -> Point {
        self.destination_end
    }

    pub fn main_line_start(&self) -> Point {
        self.main_line_start
    }

    pub fn main_line_end(&self) -> Point {
        self.main_line_end
    }

    /// The three segments in drawing order
    pub fn segments(&self) -> [Segment; 3] {
        [
            Segment::new(self.source_end, self.main_line_start),
            Segment::new(self.main_line_start, self.main_line_end),
            Segment::new(self.main_line_end, self.destination_end),
        ]
    }

    /// Total length of all segments
    pub fn length(&self) -> f64 {
        self.segments().iter().map(|segment| segment.length()).sum()
    }

    /// Bounding box of the route
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.source_end, self.destination_end)
            .merge(&Bounds::from_corners(
                self.main_line_start,
                self.main_line_end,
            ))
    }

    /// Midpoint of the main line, the natural anchor of a connector label
    pub fn main_line_middle(&self) -> Point {
        self.main_line_start.midpoint(self.main_line_end)
    }

    /// Moves the whole route by the offset
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            source_end: self.source_end.add_point(offset),
            main_line_start: self.main_line_start.add_point(offset),
            main_line_end: self.main_line_end.add_point(offset),
            destination_end: self.destination_end.add_point(offset),
        }
    }

    /// Area where the route, drawn with `line_width`, covers `bounds`
    pub fn overlap_area(&self, bounds: &Bounds, line_width: f64) -> f64 {
        self.segments()
            .iter()
            .map(|segment| segment.thick_bounds(line_width).intersect_area(bounds))
            .sum()
    }

    /// Area where two routes, both drawn with `line_width`, cover each other
    pub fn crossing_area(&self, other: &Connector, line_width: f64) -> f64 {
        let theirs = other.segments().map(|segment| segment.thick_bounds(line_width));
        self.segments()
            .iter()
            .map(|segment| {
                let ours = segment.thick_bounds(line_width);
                theirs.iter().map(|t| ours.intersect_area(t)).sum::<f64>()
            })
            .sum()
    }
}

/// Compass direction of an element relative to its anchor.
///
/// Features use it to orient their icon: an arrow on a pin points in this
/// direction, [`Direction::Center`] means the icon has no orientation.
///
/// Icons sit on a border or a corner of their anchor, so the eight compass
/// points are enough; the finer twelve-step subdivision some renderers use
/// between corner and border midpoint is not modeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Center,
    Left,
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
}

impl Direction {
    /// The direction pointing the other way
    pub fn opposite(self) -> Self {
        match self {
            Direction::Center => Direction::Center,
            Direction::Left => Direction::Right,
            Direction::UpLeft => Direction::DownRight,
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::Right => Direction::Left,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
        }
    }

    /// Unit step in screen coordinates
    pub fn unit(self) -> Point {
        match self {
            Direction::Center => Point::new(0.0, 0.0),
            Direction::Left => Point::new(-1.0, 0.0),
            Direction::UpLeft => Point::new(-1.0, -1.0),
            Direction::Up => Point::new(0.0, -1.0),
            Direction::UpRight => Point::new(1.0, -1.0),
            Direction::Right => Point::new(1.0, 0.0),
            Direction::DownRight => Point::new(1.0, 1.0),
            Direction::Down => Point::new(0.0, 1.0),
            Direction::DownLeft => Point::new(-1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.25);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.25);
    }

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
        assert_eq!(p1.midpoint(p2), Point::new(3.5, 5.5));
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
        assert_eq!(Point::new(-3.0, 4.0).manhattan_length(), 7.0);
    }

    #[test]
    fn test_point_to_bounds() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(6.0, 8.0));
        assert_eq!(bounds.min_x(), 7.0);
        assert_eq!(bounds.min_y(), 16.0);
        assert_eq!(bounds.max_x(), 13.0);
        assert_eq!(bounds.max_y(), 24.0);
    }

    #[test]
    fn test_size_area_of_degenerate_size_is_zero() {
        assert_eq!(Size::new(10.0, 2.0).area(), 20.0);
        assert_eq!(Size::new(-10.0, 2.0).area(), 0.0);
        assert_eq!(Size::new(10.0, 0.0).area(), 0.0);
    }

    #[test]
    fn test_size_add_padding() {
        let padded = Size::new(10.0, 20.0).add_padding(Insets::uniform(5.0));
        assert_eq!(padded, Size::new(20.0, 30.0));
    }

    #[test]
    fn test_bounds_new_from_center() {
        let center = Point::new(50.0, 60.0);
        let bounds = Bounds::new_from_center(center, Size::new(20.0, 30.0));
        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 75.0);
        assert_eq!(bounds.center(), center);
    }

    #[test]
    fn test_bounds_zero_size_is_empty() {
        let bounds = Bounds::new_from_center(Point::new(10.0, 20.0), Size::default());
        assert!(bounds.is_empty());
        assert_eq!(bounds.area(), 0.0);
    }

    #[test]
    fn test_bounds_intersect_overlapping() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(4.0, 6.0, 10.0, 10.0);
        let overlap = a.intersect(&b);
        assert_eq!(overlap, Bounds::new(4.0, 6.0, 6.0, 4.0));
        assert_eq!(a.intersect_area(&b), 24.0);
        assert!(a.is_intersecting(&b));
    }

    #[test]
    fn test_bounds_intersect_touching_is_empty() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_empty());
        assert!(!a.is_intersecting(&b));
        assert_eq!(a.intersect_area(&b), 0.0);
    }

    #[test]
    fn test_bounds_intersect_disjoint_is_default() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(100.0, 100.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Bounds::default());
    }

    #[test]
    fn test_bounds_outside_area() {
        let outer = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(Bounds::new(10.0, 10.0, 10.0, 10.0).outside_area(&outer), 0.0);
        assert_eq!(Bounds::new(95.0, 0.0, 10.0, 10.0).outside_area(&outer), 50.0);
        assert_eq!(Bounds::new(200.0, 0.0, 10.0, 10.0).outside_area(&outer), 100.0);
    }

    #[test]
    fn test_bounds_contains() {
        let outer = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&Bounds::new(0.0, 0.0, 100.0, 100.0)));
        assert!(outer.contains(&Bounds::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!outer.contains(&Bounds::new(90.0, 10.0, 20.0, 5.0)));
        assert!(outer.contains_point(Point::new(100.0, 0.0)));
        assert!(!outer.contains_point(Point::new(100.5, 0.0)));
    }

    #[test]
    fn test_bounds_merge() {
        let a = Bounds::new(1.0, 2.0, 4.0, 4.0);
        let b = Bounds::new(3.0, 0.0, 5.0, 4.0);
        let merged = a.merge(&b);
        assert_eq!(merged.min_x(), 1.0);
        assert_eq!(merged.min_y(), 0.0);
        assert_eq!(merged.max_x(), 8.0);
        assert_eq!(merged.max_y(), 6.0);
    }

    #[test]
    fn test_bounds_translate_and_inverse() {
        let bounds = Bounds::new(1.0, 2.0, 4.0, 4.0);
        let offset = Point::new(3.0, -1.0);
        let moved = bounds.translate(offset);
        assert_eq!(moved, Bounds::new(4.0, 1.0, 4.0, 4.0));
        assert_eq!(moved.inverse_translate(offset), bounds);
    }

    #[test]
    fn test_bounds_padding_and_shrink() {
        let bounds = Bounds::new(2.0, 3.0, 4.0, 5.0);
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        let padded = bounds.add_padding(insets);
        assert_eq!(padded.min_x(), -2.0);
        assert_eq!(padded.min_y(), 2.0);
        assert_eq!(padded.max_x(), 8.0);
        assert_eq!(padded.max_y(), 11.0);
        assert_eq!(padded.shrink(insets), bounds);
    }

    #[test]
    fn test_bounds_shrink_collapses_onto_center() {
        let bounds = Bounds::new(0.0, 0.0, 4.0, 100.0);
        let shrunk = bounds.shrink(Insets::uniform(10.0));
        assert_eq!(shrunk.width(), 0.0);
        assert_eq!(shrunk.center().x(), 2.0);
        assert_eq!(shrunk.height(), 80.0);
    }

    #[test]
    fn test_bounds_expand_keeps_center() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let expanded = bounds.expand(10.0, 4.0);
        assert_eq!(expanded.center(), bounds.center());
        assert_eq!(expanded.to_size(), Size::new(20.0, 14.0));
        assert_eq!(bounds.expand(-30.0, 0.0).width(), 0.0);
    }

    #[test]
    fn test_bounds_enlarge_keeps_top_left() {
        let bounds = Bounds::new(5.0, 6.0, 10.0, 10.0);
        let enlarged = bounds.enlarge(10.0, 4.0);
        assert_eq!(enlarged.min_x(), bounds.min_x());
        assert_eq!(enlarged.min_y(), bounds.min_y());
        assert_eq!(enlarged.to_size(), Size::new(20.0, 14.0));
    }

    #[test]
    fn test_bounds_offset_into() {
        let outer = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert!(Bounds::new(10.0, 10.0, 10.0, 10.0).offset_into(&outer).is_zero());
        assert_eq!(
            Bounds::new(-5.0, 95.0, 10.0, 10.0).offset_into(&outer),
            Point::new(5.0, -5.0)
        );
        assert_eq!(
            Bounds::new(30.0, 0.0, 200.0, 10.0).offset_into(&outer),
            Point::new(-30.0, 0.0)
        );
    }

    #[test]
    fn test_bounds_nearest_point() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(bounds.nearest_point(Point::new(5.0, 5.0)), Point::new(5.0, 5.0));
        assert_eq!(bounds.nearest_point(Point::new(-5.0, 50.0)), Point::new(0.0, 10.0));
    }

    #[test]
    fn test_bounds_strips_outside_of_disjoint_obstacle() {
        let free = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let obstacle = Bounds::new(200.0, 40.0, 20.0, 20.0);
        let [left, right, above, below] = free.strips_outside(&obstacle);
        assert_eq!(left, free);
        assert!(right.is_empty());
        assert_eq!(above, Bounds::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(below, Bounds::new(0.0, 60.0, 100.0, 40.0));
    }

    #[test]
    fn test_segment_thick_bounds() {
        let segment = Segment::new(Point::new(0.0, 10.0), Point::new(20.0, 10.0));
        assert_eq!(segment.length(), 20.0);
        assert_eq!(segment.thick_bounds(2.0), Bounds::new(-1.0, 9.0, 22.0, 2.0));

        let dot = Segment::new(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        assert!(dot.thick_bounds(2.0).is_empty());
    }

    #[test]
    fn test_connector_horizontal_segments() {
        let connector =
            Connector::horizontal(Point::new(0.0, 0.0), Point::new(40.0, 20.0), 10.0);
        let [first, main, last] = connector.segments();
        assert_eq!(first.end(), Point::new(0.0, 10.0));
        assert_eq!(main.end(), Point::new(40.0, 10.0));
        assert_eq!(last.end(), Point::new(40.0, 20.0));
        assert_eq!(connector.length(), 60.0);
        assert_eq!(connector.bounds(), Bounds::new(0.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_connector_overlap_area() {
        let connector =
            Connector::horizontal(Point::new(0.0, 50.0), Point::new(100.0, 50.0), 50.0);
        let crossing = Bounds::new(40.0, 0.0, 20.0, 100.0);
        let beside = Bounds::new(40.0, 60.0, 20.0, 20.0);
        assert_eq!(connector.overlap_area(&crossing, 2.0), 40.0);
        assert_eq!(connector.overlap_area(&beside, 2.0), 0.0);
    }

    #[test]
    fn test_connector_crossing_area() {
        let horizontal =
            Connector::horizontal(Point::new(0.0, 50.0), Point::new(100.0, 50.0), 50.0);
        let vertical = Connector::vertical(Point::new(50.0, 0.0), Point::new(50.0, 100.0), 50.0);
        let parallel =
            Connector::horizontal(Point::new(0.0, 80.0), Point::new(100.0, 80.0), 80.0);
        assert_eq!(horizontal.crossing_area(&vertical, 2.0), 4.0);
        assert_eq!(horizontal.crossing_area(&parallel, 2.0), 0.0);
    }

    #[test]
    fn test_connector_translate() {
        let connector = Connector::vertical(Point::new(0.0, 0.0), Point::new(20.0, 30.0), 10.0);
        let moved = connector.translate(Point::new(5.0, 5.0));
        assert_eq!(moved.source_end(), Point::new(5.0, 5.0));
        assert_eq!(moved.destination_end(), Point::new(25.0, 35.0));
        assert_eq!(moved.length(), connector.length());
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::UpRight.opposite(), Direction::DownLeft);
        assert_eq!(Direction::Center.opposite(), Direction::Center);
        assert_eq!(Direction::Down.unit(), Point::new(0.0, 1.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
            1.0f64..500.0,
            1.0f64..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new(x, y, w, h))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Merged bounds should contain both inputs.
    fn check_merge_contains_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);
        prop_assert!(merged.contains(&b1));
        prop_assert!(merged.contains(&b2));
        Ok(())
    }

    /// Intersection is symmetric and contained in both inputs.
    fn check_intersection_within_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let overlap = b1.intersect(&b2);
        prop_assert!(approx_eq!(f64, b1.intersect_area(&b2), b2.intersect_area(&b1)));
        if !overlap.is_empty() {
            prop_assert!(b1.contains(&overlap));
            prop_assert!(b2.contains(&overlap));
        }
        prop_assert!(overlap.area() <= b1.area().min(b2.area()) + 0.001);
        Ok(())
    }

    /// Translating then inverse translating returns the original bounds.
    fn check_translate_roundtrip(bounds: Bounds, offset: Point) -> Result<(), TestCaseError> {
        let roundtrip = bounds.translate(offset).inverse_translate(offset);
        prop_assert!(approx_eq!(f64, roundtrip.min_x(), bounds.min_x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f64, roundtrip.min_y(), bounds.min_y(), epsilon = 0.001));
        prop_assert!(approx_eq!(f64, roundtrip.max_x(), bounds.max_x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f64, roundtrip.max_y(), bounds.max_y(), epsilon = 0.001));
        Ok(())
    }

    /// No strip left over by an obstacle overlaps that obstacle.
    fn check_strips_avoid_obstacle(free: Bounds, obstacle: Bounds) -> Result<(), TestCaseError> {
        for strip in free.strips_outside(&obstacle) {
            prop_assert!(!strip.is_intersecting(&obstacle));
            if !strip.is_empty() {
                prop_assert!(free.contains(&strip));
            }
        }
        Ok(())
    }

    /// After moving by `offset_into`, small bounds lie inside the outer bounds.
    fn check_offset_into_fits(bounds: Bounds, outer: Bounds) -> Result<(), TestCaseError> {
        prop_assume!(bounds.width() < outer.width() && bounds.height() < outer.height());
        let moved = bounds.translate(bounds.offset_into(&outer));
        prop_assert!(moved.outside_area(&outer) < 0.01);
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_contains_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_contains_both(b1, b2)?;
        }

        #[test]
        fn intersection_within_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_intersection_within_both(b1, b2)?;
        }

        #[test]
        fn translate_roundtrip(bounds in bounds_strategy(), offset in point_strategy()) {
            check_translate_roundtrip(bounds, offset)?;
        }

        #[test]
        fn strips_avoid_obstacle(free in bounds_strategy(), obstacle in bounds_strategy()) {
            check_strips_avoid_obstacle(free, obstacle)?;
        }

        #[test]
        fn offset_into_fits(bounds in bounds_strategy(), outer in bounds_strategy()) {
            check_offset_into_fits(bounds, outer)?;
        }
    }
}
