//! Mapping of persisted order values onto pixel coordinates.
//!
//! Model elements carry sparse signed "order" keys (`x_order`, `y_order`,
//! `list_order`) that only express relative placement. A [`NonLinearScale`]
//! turns a set of such keys into evenly spread pixel positions along one axis,
//! and a [`Grid`] pairs two scales for a diagram.

use log::trace;

use crate::geometry::{Bounds, Point};

/// Piecewise-linear mapping between order values and locations on one axis.
///
/// Each distinct order added to the scale becomes an anchor. The anchors are
/// spread over `[lower, upper]` at the centers of equally sized cells, so `n`
/// anchors occupy locations `lower + (i + 0.5) * (upper - lower) / n`. Two
/// implicit anchors, `i32::MIN` at `lower` and `i32::MAX` at `upper`, extend
/// the mapping beyond the outermost real anchors.
///
/// Locations never decrease with increasing order.
///
/// # Examples
///
/// ```
/// # use trellis_core::scale::NonLinearScale;
/// let mut scale = NonLinearScale::new(0.0, 300.0);
/// scale.add_order(-5);
/// scale.add_order(0);
/// scale.add_order(7);
///
/// assert_eq!(scale.get_location(0), 150.0);
/// assert_eq!(scale.get_order(150.0, 1.0), 0);
/// assert!(scale.get_location(3) > scale.get_location(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NonLinearScale {
    lower: f64,
    upper: f64,
    orders: Vec<i32>,
    locations: Vec<f64>,
}

impl NonLinearScale {
    /// Creates an empty scale spanning `[lower, upper]`.
    ///
    /// Reversed bounds are swapped.
    pub fn new(lower: f64, upper: f64) -> Self {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        Self {
            lower,
            upper,
            orders: Vec::new(),
            locations: Vec::new(),
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// The distinct orders known to this scale, ascending
    pub fn orders(&self) -> &[i32] {
        &self.orders
    }

    /// Registers an order as an anchor; duplicates are ignored
    pub fn add_order(&mut self, order: i32) {
        if let Err(position) = self.orders.binary_search(&order) {
            self.orders.insert(position, order);
            self.update_locations();
        }
    }

    /// Moves the scale onto a new pixel range, keeping its anchors
    pub fn set_range(&mut self, lower: f64, upper: f64) {
        let rescaled = Self::new(lower, upper);
        self.lower = rescaled.lower;
        self.upper = rescaled.upper;
        self.update_locations();
    }

    fn update_locations(&mut self) {
        let count = self.orders.len() as f64;
        let cell = (self.upper - self.lower) / count.max(1.0);
        self.locations = (0..self.orders.len())
            .map(|index| self.lower + (index as f64 + 0.5) * cell)
            .collect();
    }

    /// All anchors including the implicit extremes
    fn anchors(&self) -> Vec<(f64, f64)> {
        let mut anchors = Vec::with_capacity(self.orders.len() + 2);
        if self.orders.first() != Some(&i32::MIN) {
            anchors.push((f64::from(i32::MIN), self.lower));
        }
        anchors.extend(
            self.orders
                .iter()
                .zip(&self.locations)
                .map(|(&order, &location)| (f64::from(order), location)),
        );
        if self.orders.last() != Some(&i32::MAX) {
            anchors.push((f64::from(i32::MAX), self.upper));
        }
        anchors
    }

    /// Location of an order value, interpolated between the nearest anchors
    pub fn get_location(&self, order: i32) -> f64 {
        let order = f64::from(order);
        let anchors = self.anchors();
        for pair in anchors.windows(2) {
            let (order_a, location_a) = pair[0];
            let (order_b, location_b) = pair[1];
            if order <= order_b {
                if order <= order_a || order_b == order_a {
                    return location_a;
                }
                if order == order_b {
                    return location_b;
                }
                let fraction = (order - order_a) / (order_b - order_a);
                return location_a + fraction * (location_b - location_a);
            }
        }
        self.upper
    }

    /// Order value belonging to a location.
    ///
    /// A location within `snap_interval` of an anchor snaps to that anchor's
    /// order; otherwise the interpolated order is rounded to the nearest
    /// integer. Locations outside the range map to the extreme orders.
    pub fn get_order(&self, location: f64, snap_interval: f64) -> i32 {
        let nearest = self
            .orders
            .iter()
            .zip(&self.locations)
            .map(|(&order, &anchor)| (order, (anchor - location).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((order, distance)) = nearest {
            if distance <= snap_interval {
                trace!(location, order; "Location snapped to anchor");
                return order;
            }
        }

        if location <= self.lower {
            return i32::MIN;
        }
        if location >= self.upper {
            return i32::MAX;
        }

        let anchors = self.anchors();
        for pair in anchors.windows(2) {
            let (order_a, location_a) = pair[0];
            let (order_b, location_b) = pair[1];
            if location <= location_b {
                if location_b <= location_a {
                    return order_a as i32;
                }
                let fraction = (location - location_a) / (location_b - location_a);
                let order = order_a + fraction * (order_b - order_a);
                return order.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
            }
        }
        i32::MAX
    }
}

/// Which axes of a [`Grid`] are driven by element orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridKind {
    /// Both axes come from `x_order` / `y_order` (structural diagrams)
    #[default]
    XY,
    /// X comes from `x_order`, Y is the time axis (sequence diagrams)
    TimeY,
    /// Y comes from `y_order`, X is the time axis (timing diagrams)
    TimeX,
}

/// A pair of scales covering a diagram's drawing area.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    kind: GridKind,
    x: NonLinearScale,
    y: NonLinearScale,
}

impl Grid {
    /// Creates a grid whose scales span the given bounds
    pub fn new(bounds: Bounds, kind: GridKind) -> Self {
        Self {
            kind,
            x: NonLinearScale::new(bounds.min_x(), bounds.max_x()),
            y: NonLinearScale::new(bounds.min_y(), bounds.max_y()),
        }
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn x_scale(&self) -> &NonLinearScale {
        &self.x
    }

    pub fn x_scale_mut(&mut self) -> &mut NonLinearScale {
        &mut self.x
    }

    pub fn y_scale(&self) -> &NonLinearScale {
        &self.y
    }

    pub fn y_scale_mut(&mut self) -> &mut NonLinearScale {
        &mut self.y
    }

    /// The scale measuring time, if this grid has one
    pub fn time_scale(&self) -> Option<&NonLinearScale> {
        match self.kind {
            GridKind::XY => None,
            GridKind::TimeY => Some(&self.y),
            GridKind::TimeX => Some(&self.x),
        }
    }

    /// Mutable access to the time scale, if this grid has one
    pub fn time_scale_mut(&mut self) -> Option<&mut NonLinearScale> {
        match self.kind {
            GridKind::XY => None,
            GridKind::TimeY => Some(&mut self.y),
            GridKind::TimeX => Some(&mut self.x),
        }
    }

    /// Pixel location of an (x_order, y_order) pair
    pub fn get_location(&self, x_order: i32, y_order: i32) -> Point {
        Point::new(self.x.get_location(x_order), self.y.get_location(y_order))
    }
}
