//! Scroll container that reports its offset to the content it hosts.

use crate::surface::{Canvas, Translated};

/// Receives scroll position changes.
pub trait ScrollListener {
    /// Called after the container scrolled from `(old_x, old_y)` to `(x, y)`.
    fn on_view_scroll(&mut self, x: i32, y: i32, old_x: i32, old_y: i32);
}

/// Content hosted by a [`ConsoleScrollView`].
pub trait ScrollContent: ScrollListener {
    /// Full scrollable height in pixels.
    fn content_height(&self) -> u32;

    /// Draw in content coordinates.
    fn render_content(&self, canvas: &mut dyn Canvas);
}

/// A vertical scroll container around a single child.
///
/// Every offset change is forwarded to the child through
/// [`ScrollListener::on_view_scroll`]; the child decides what to draw.
pub struct ConsoleScrollView<C> {
    child: C,
    scroll_x: i32,
    scroll_y: i32,
    viewport_height: u32,
}

impl<C: ScrollContent> ConsoleScrollView<C> {
    /// Wrap `child` in a container `viewport_height` pixels tall.
    pub const fn new(child: C, viewport_height: u32) -> Self {
        Self {
            child,
            scroll_x: 0,
            scroll_y: 0,
            viewport_height,
        }
    }

    /// The hosted content.
    pub const fn child(&self) -> &C {
        &self.child
    }

    /// Mutable access to the hosted content.
    ///
    /// Call [`ConsoleScrollView::relayout`] after changing its height.
    pub const fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    /// Current vertical offset.
    pub const fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    /// Visible height.
    pub const fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Resize the visible window and re-clamp the offset.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
        self.relayout();
    }

    /// Largest valid offset for the current content.
    pub fn max_scroll(&self) -> i32 {
        let max = self
            .child
            .content_height()
            .saturating_sub(self.viewport_height);
        i32::try_from(max).unwrap_or(i32::MAX)
    }

    /// Check whether the bottom of the content is visible.
    pub fn is_at_end(&self) -> bool {
        self.scroll_y >= self.max_scroll()
    }

    /// Scroll to `y`, clamped to the content. Notifies the child on change.
    pub fn scroll_to(&mut self, y: i32) {
        let y = y.clamp(0, self.max_scroll());
        if y == self.scroll_y {
            return;
        }

        let old_y = std::mem::replace(&mut self.scroll_y, y);
        self.child
            .on_view_scroll(self.scroll_x, y, self.scroll_x, old_y);
    }

    /// Scroll by `dy` pixels.
    pub fn scroll_by(&mut self, dy: i32) {
        self.scroll_to(self.scroll_y.saturating_add(dy));
    }

    /// Scroll one viewport up.
    pub fn page_up(&mut self) {
        self.scroll_by(-self.page());
    }

    /// Scroll one viewport down.
    pub fn page_down(&mut self) {
        self.scroll_by(self.page());
    }

    /// Scroll to the newest content.
    pub fn scroll_to_end(&mut self) {
        self.scroll_to(self.max_scroll());
    }

    /// Re-clamp after the content height changed.
    pub fn relayout(&mut self) {
        self.scroll_to(self.scroll_y);
    }

    /// Draw the child shifted by the current offset.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let mut shifted = Translated::new(canvas, -self.scroll_x, -self.scroll_y);
        self.child.render_content(&mut shifted);
    }

    fn page(&self) -> i32 {
        i32::try_from(self.viewport_height).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingCanvas, Rgb, TextStyle};

    #[derive(Default)]
    struct Probe {
        height: u32,
        events: Vec<(i32, i32, i32, i32)>,
    }

    impl ScrollListener for Probe {
        fn on_view_scroll(&mut self, x: i32, y: i32, old_x: i32, old_y: i32) {
            self.events.push((x, y, old_x, old_y));
        }
    }

    impl ScrollContent for Probe {
        fn content_height(&self) -> u32 {
            self.height
        }

        fn render_content(&self, canvas: &mut dyn Canvas) {
            canvas.draw_text("row", 0, 50, TextStyle { color: Rgb::WHITE, size: 12 });
        }
    }

    fn scroll_view(height: u32, viewport: u32) -> ConsoleScrollView<Probe> {
        ConsoleScrollView::new(
            Probe {
                height,
                ..Probe::default()
            },
            viewport,
        )
    }

    #[test]
    fn test_scroll_notifies_listener() {
        let mut view = scroll_view(1000, 100);
        view.scroll_to(40);
        view.scroll_by(10);
        assert_eq!(view.child().events, vec![(0, 40, 0, 0), (0, 50, 0, 40)]);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut view = scroll_view(1000, 100);
        view.scroll_to(5000);
        assert_eq!(view.scroll_y(), 900);
        assert!(view.is_at_end());

        view.scroll_to(-5);
        assert_eq!(view.scroll_y(), 0);
    }

    #[test]
    fn test_no_event_without_change() {
        let mut view = scroll_view(50, 100);
        view.scroll_to(30);
        assert!(view.child().events.is_empty());
        assert!(view.is_at_end());
    }

    #[test]
    fn test_relayout_after_shrink() {
        let mut view = scroll_view(1000, 100);
        view.scroll_to_end();
        view.child_mut().height = 150;
        view.relayout();
        assert_eq!(view.scroll_y(), 50);
    }

    #[test]
    fn test_paging() {
        let mut view = scroll_view(1000, 100);
        view.page_down();
        view.page_down();
        assert_eq!(view.scroll_y(), 200);
        view.page_up();
        assert_eq!(view.scroll_y(), 100);
    }

    #[test]
    fn test_render_translates() {
        let mut view = scroll_view(1000, 100);
        view.scroll_to(30);
        let mut canvas = RecordingCanvas::new();
        view.render(&mut canvas);
        assert_eq!(canvas.texts(), vec![("row", 20)]);
    }
}
