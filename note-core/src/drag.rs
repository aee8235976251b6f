//! Pointer-drag repositioning for the image preview panel.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { anchor: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragController {
    state: DragState,
    offset: Point,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
            offset: Point::default(),
        }
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag unless the press landed on the dismiss control.
    pub fn pointer_down(&mut self, at: Point, on_dismiss_control: bool) -> bool {
        if on_dismiss_control {
            return false;
        }
        self.state = DragState::Dragging {
            anchor: Point::new(at.x - self.offset.x, at.y - self.offset.y),
        };
        true
    }

    pub fn pointer_move(&mut self, at: Point) -> Option<Point> {
        let DragState::Dragging { anchor } = self.state else {
            return None;
        };
        self.offset = Point::new(at.x - anchor.x, at.y - anchor.y);
        Some(self.offset)
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn transform(&self) -> String {
        format!("translate3d({}px, {}px, 0)", self.offset.x, self.offset.y)
    }
}
