//! Drag/resize geometry
//!
//! Pure math behind a gesture: no DOM, so every rule here is unit tested.
//! Coordinates are CSS pixels relative to the parent container.

/// Smallest width/height a resize may produce.
pub const DEFAULT_MIN_SIZE: f64 = 80.0;

/// Grid step used when snapping is switched on without an explicit step.
pub const DEFAULT_SNAP_STEP: f64 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Size of the parent the element must stay inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f64,
    pub min_height: f64,
    /// Grid step; `None` disables snapping
    pub snap: Option<f64>,
    pub bounds: Option<Bounds>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
            snap: None,
            bounds: None,
        }
    }
}

impl Constraints {
    pub fn with_snap(mut self, step: Option<f64>) -> Self {
        self.snap = step.filter(|s| s.is_finite() && *s > 0.0);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    fn snap(&self, value: f64) -> f64 {
        match self.snap {
            Some(step) => (value / step).round() * step,
            None => value,
        }
    }

    /// The minimum rounded up to the grid, so a snapped size never dips below it.
    fn min_size(&self, min: f64) -> f64 {
        match self.snap {
            Some(step) => (min / step).ceil() * step,
            None => min,
        }
    }

    /// Round down to the grid, for values that must not grow.
    fn snap_down(&self, value: f64) -> f64 {
        match self.snap {
            Some(step) => (value / step).floor() * step,
            None => value,
        }
    }

    /// Cap a size to the bounds, on the grid when snapping. The minimum
    /// still wins over a parent smaller than it.
    fn fit_size(&self, w: f64, h: f64, min_w: f64, min_h: f64) -> (f64, f64) {
        match self.bounds {
            Some(b) => (
                w.min(self.snap_down(b.width)).max(min_w),
                h.min(self.snap_down(b.height)).max(min_h),
            ),
            None => (w, h),
        }
    }

    fn effective_min(&self) -> (f64, f64) {
        (self.min_size(self.min_width), self.min_size(self.min_height))
    }

    /// Keep a `w`×`h` box at `(x, y)` inside the bounds. The origin wins if
    /// the box is larger than the parent.
    fn clamp_position(&self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
        match self.bounds {
            Some(b) => (x.min(b.width - w).max(0.0), y.min(b.height - h).max(0.0)),
            None => (x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Top,
        ResizeHandle::Right,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::TopRight,
        ResizeHandle::BottomRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::TopLeft,
    ];

    fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::Left | ResizeHandle::TopLeft | ResizeHandle::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::Right | ResizeHandle::TopRight | ResizeHandle::BottomRight)
    }

    fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight)
    }

    /// Compass suffix, used for CSS classes and cursors (`n`, `se`, ...)
    pub fn compass(self) -> &'static str {
        match self {
            ResizeHandle::Top => "n",
            ResizeHandle::Right => "e",
            ResizeHandle::Bottom => "s",
            ResizeHandle::Left => "w",
            ResizeHandle::TopRight => "ne",
            ResizeHandle::BottomRight => "se",
            ResizeHandle::BottomLeft => "sw",
            ResizeHandle::TopLeft => "nw",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeHandle),
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// One resize along a single axis. Returns the new `(position, length)`.
#[allow(clippy::too_many_arguments)]
fn resize_axis(
    start: f64,
    length: f64,
    delta: f64,
    moves_start: bool,
    moves_end: bool,
    min: f64,
    limit: Option<f64>,
    constraints: &Constraints,
) -> (f64, f64) {
    if moves_end {
        let mut len = constraints.snap(length + delta).max(min);
        if let Some(limit) = limit {
            len = len.min(limit - start).max(min);
        }
        (start, len)
    } else if moves_start {
        // the far edge stays put
        let end = start + length;
        let mut len = constraints.snap(length - delta).max(min);
        if limit.is_some() {
            len = len.min(end).max(min);
        }
        (end - len, len)
    } else {
        (start, length)
    }
}

/// A drag or resize in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSession {
    kind: GestureKind,
    start: Rect,
    origin: Point,
    constraints: Constraints,
    current: Rect,
}

impl GestureSession {
    pub fn begin(kind: GestureKind, start: Rect, origin: Point, constraints: Constraints) -> Self {
        let start = Rect::new(
            finite_or_zero(start.x),
            finite_or_zero(start.y),
            finite_or_zero(start.w).max(constraints.min_width),
            finite_or_zero(start.h).max(constraints.min_height),
        );
        Self {
            kind,
            start,
            origin: Point::new(finite_or_zero(origin.x), finite_or_zero(origin.y)),
            constraints,
            current: start,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn start(&self) -> Rect {
        self.start
    }

    pub fn current(&self) -> Rect {
        self.current
    }

    /// Track the pointer; returns the rectangle to show right now.
    pub fn update(&mut self, pointer: Point) -> Rect {
        let dx = finite_or_zero(pointer.x - self.origin.x);
        let dy = finite_or_zero(pointer.y - self.origin.y);
        self.current = match self.kind {
            GestureKind::Drag => self.dragged(dx, dy),
            GestureKind::Resize(handle) => self.resized(handle, dx, dy),
        };
        self.current
    }

    /// End the gesture. Consumes the session, so it reports exactly once.
    pub fn finish(self) -> Rect {
        let c = &self.constraints;
        let (min_w, min_h) = c.effective_min();
        let r = self.current;
        let (w, h) = c.fit_size(c.snap(r.w.round()), c.snap(r.h.round()), min_w, min_h);
        let (x, y) = c.clamp_position(c.snap(r.x.round()), c.snap(r.y.round()), w, h);
        // a clamp against an off-grid parent edge can leave the grid
        Rect::new(c.snap_down(x), c.snap_down(y), w, h)
    }

    fn dragged(&self, dx: f64, dy: f64) -> Rect {
        let c = &self.constraints;
        let Rect { w, h, .. } = self.start;
        let (x, y) = c.clamp_position(c.snap(self.start.x + dx), c.snap(self.start.y + dy), w, h);
        Rect::new(x, y, w, h)
    }

    fn resized(&self, handle: ResizeHandle, dx: f64, dy: f64) -> Rect {
        let c = &self.constraints;
        let (min_w, min_h) = c.effective_min();
        let s = self.start;
        let (x, w) = resize_axis(
            s.x,
            s.w,
            dx,
            handle.moves_left(),
            handle.moves_right(),
            min_w,
            c.bounds.map(|b| b.width),
            c,
        );
        let (y, h) = resize_axis(
            s.y,
            s.h,
            dy,
            handle.moves_top(),
            handle.moves_bottom(),
            min_h,
            c.bounds.map(|b| b.height),
            c,
        );
        Rect::new(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> Bounds {
        Bounds::new(1200.0, 800.0)
    }

    fn drag(start: Rect, constraints: Constraints, dx: f64, dy: f64) -> Rect {
        let mut session = GestureSession::begin(GestureKind::Drag, start, Point::new(500.0, 500.0), constraints);
        session.update(Point::new(500.0 + dx, 500.0 + dy));
        session.finish()
    }

    fn resize(start: Rect, handle: ResizeHandle, constraints: Constraints, dx: f64, dy: f64) -> Rect {
        let origin = Point::new(10.0, 10.0);
        let mut session = GestureSession::begin(GestureKind::Resize(handle), start, origin, constraints);
        session.update(Point::new(origin.x + dx, origin.y + dy));
        session.finish()
    }

    #[test]
    fn test_drag_moves_by_pointer_delta() {
        let start = Rect::new(100.0, 120.0, 260.0, 173.0);
        let end = drag(start, Constraints::default().with_bounds(parent()), 50.0, 30.0);
        assert_eq!(end, Rect::new(150.0, 150.0, 260.0, 173.0));
    }

    #[test]
    fn test_drag_snaps_to_grid() {
        let start = Rect::new(0.0, 0.0, 260.0, 173.0);
        let constraints = Constraints::default().with_bounds(parent()).with_snap(Some(8.0));
        let end = drag(start, constraints, 50.0, 30.0);
        assert_eq!((end.x, end.y), (48.0, 32.0));
    }

    #[test]
    fn test_drag_is_clamped_to_parent() {
        let start = Rect::new(10.0, 10.0, 200.0, 100.0);
        let constraints = Constraints::default().with_bounds(Bounds::new(400.0, 300.0));
        assert_eq!(drag(start, constraints, -500.0, -500.0), Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(drag(start, constraints, 900.0, 900.0), Rect::new(200.0, 200.0, 200.0, 100.0));
    }

    #[test]
    fn test_intermediate_updates_track_pointer() {
        let start = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut session = GestureSession::begin(GestureKind::Drag, start, Point::new(0.0, 0.0), Constraints::default());
        assert_eq!(session.update(Point::new(5.0, 7.0)), Rect::new(5.0, 7.0, 100.0, 100.0));
        assert_eq!(session.update(Point::new(9.0, 1.0)), Rect::new(9.0, 1.0, 100.0, 100.0));
        // cumulative from the gesture origin, not incremental
        assert_eq!(session.finish(), Rect::new(9.0, 1.0, 100.0, 100.0));
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let start = Rect::new(40.0, 40.0, 100.0, 100.0);
        let mut session = GestureSession::begin(GestureKind::Drag, start, Point::new(0.0, 0.0), Constraints::default());
        session.update(Point::new(f64::NAN, f64::INFINITY));
        assert_eq!(session.finish(), start);
    }

    #[test]
    fn test_resize_never_below_minimum() {
        let start = Rect::new(100.0, 100.0, 200.0, 150.0);
        for handle in ResizeHandle::ALL {
            let shrunk = resize(start, handle, Constraints::default().with_bounds(parent()), 900.0, 900.0);
            assert!(shrunk.w >= 80.0 && shrunk.h >= 80.0, "{handle:?} gave {shrunk:?}");
            let shrunk = resize(start, handle, Constraints::default().with_bounds(parent()), -900.0, -900.0);
            assert!(shrunk.w >= 80.0 && shrunk.h >= 80.0, "{handle:?} gave {shrunk:?}");
        }
    }

    #[test]
    fn test_left_resize_keeps_right_edge() {
        let start = Rect::new(100.0, 100.0, 200.0, 150.0);
        let end = resize(start, ResizeHandle::Left, Constraints::default().with_bounds(parent()), 40.0, 0.0);
        assert_eq!(end, Rect::new(140.0, 100.0, 160.0, 150.0));
        assert_eq!(end.right(), start.right());
    }

    #[test]
    fn test_top_left_resize_hits_minimum_without_moving_far_edges() {
        let start = Rect::new(100.0, 100.0, 200.0, 150.0);
        let end = resize(start, ResizeHandle::TopLeft, Constraints::default().with_bounds(parent()), 500.0, 500.0);
        assert_eq!((end.w, end.h), (80.0, 80.0));
        assert_eq!(end.right(), start.right());
        assert_eq!(end.bottom(), start.bottom());
    }

    #[test]
    fn test_resize_stays_inside_parent() {
        let start = Rect::new(100.0, 100.0, 200.0, 150.0);
        let bounds = Bounds::new(400.0, 300.0);
        let grown = resize(start, ResizeHandle::BottomRight, Constraints::default().with_bounds(bounds), 1000.0, 1000.0);
        assert_eq!(grown, Rect::new(100.0, 100.0, 300.0, 200.0));
        let grown = resize(start, ResizeHandle::TopLeft, Constraints::default().with_bounds(bounds), -1000.0, -1000.0);
        assert_eq!(grown, Rect::new(0.0, 0.0, 300.0, 250.0));
    }

    #[test]
    fn test_snapped_gestures_land_on_grid() {
        let constraints = Constraints::default().with_bounds(parent()).with_snap(Some(DEFAULT_SNAP_STEP));
        let start = Rect::new(0.0, 0.0, 260.0, 173.0);
        let deltas = [(50.0, 30.0), (-13.0, 7.0), (333.3, 41.9), (3.0, 3.0)];

        for (dx, dy) in deltas {
            let mut results = vec![drag(start, constraints, dx, dy)];
            for handle in ResizeHandle::ALL {
                results.push(resize(start, handle, constraints, dx, dy));
            }
            for r in results {
                for v in [r.x, r.y, r.w, r.h] {
                    assert_eq!(v % 8.0, 0.0, "{r:?} not on the grid");
                }
            }
        }
    }

    #[test]
    fn test_snapped_gestures_stay_inside_off_grid_parent() {
        // a bordered 1200x800 board reports a 1198x798 client area
        let bounds = Bounds::new(1198.0, 798.0);
        let constraints = Constraints::default().with_bounds(bounds).with_snap(Some(DEFAULT_SNAP_STEP));

        let grown = resize(Rect::new(0.0, 0.0, 260.0, 173.0), ResizeHandle::BottomRight, constraints, 5000.0, 5000.0);
        assert_eq!(grown, Rect::new(0.0, 0.0, 1192.0, 792.0));

        let moved = drag(Rect::new(0.0, 0.0, 200.0, 160.0), constraints, 5000.0, 5000.0);
        assert_eq!(moved, Rect::new(992.0, 632.0, 200.0, 160.0));

        for r in [grown, moved] {
            assert!(r.right() <= bounds.width && r.bottom() <= bounds.height, "{r:?} left the parent");
        }
    }

    #[test]
    fn test_snapped_minimum_rounds_up() {
        let constraints = Constraints::default().with_snap(Some(24.0));
        let end = resize(Rect::new(0.0, 0.0, 200.0, 200.0), ResizeHandle::BottomRight, constraints, -500.0, -500.0);
        assert_eq!((end.w, end.h), (96.0, 96.0));
    }

    #[test]
    fn test_finish_rounds_fractional_pixels() {
        let start = Rect::new(0.0, 0.0, 100.0, 100.0);
        let end = drag(start, Constraints::default(), 10.4, 20.6);
        assert_eq!(end, Rect::new(10.0, 21.0, 100.0, 100.0));
    }
}
