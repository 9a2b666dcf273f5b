/// Bottom margin (px) subtracted from the viewport before reveal checks,
/// so elements fade in slightly before they would be flush with the edge.
pub const REVEAL_MARGIN_PX: f64 = 50.0;

/// Fraction of an element that must be inside the viewport to reveal it.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Scrolled fraction in [0, 1]. A page with nothing to scroll reports 0.
pub fn scroll_progress(offset: f64, content_height: f64, viewport_height: f64) -> f64 {
    let track = content_height - viewport_height;
    if track <= 0.0 {
        return 0.0;
    }
    (offset / track).clamp(0.0, 1.0)
}

/// Vertical offset for a parallax layer at the given rate.
pub fn parallax_offset(scroll_offset: f64, rate: f64) -> f64 {
    -scroll_offset * rate
}

fn reveal_visible(rect_top: f64, rect_height: f64, scroll_y: f64, viewport_height: f64) -> bool {
    if rect_height <= 0.0 {
        return false;
    }
    let window_top = scroll_y;
    let window_bottom = scroll_y + viewport_height - REVEAL_MARGIN_PX;
    let overlap =
        (rect_top + rect_height).min(window_bottom) - rect_top.max(window_top);
    overlap / rect_height >= REVEAL_THRESHOLD
}

/// Fade-in-on-scroll tracker: each element fires at most once.
#[derive(Debug, Clone)]
pub struct RevealSet {
    fired: Vec<bool>,
}

impl RevealSet {
    pub fn new(count: usize) -> Self {
        Self {
            fired: vec![false; count],
        }
    }

    /// Check the element rects against the current scroll window and return
    /// the indices that newly crossed the threshold.
    pub fn update(
        &mut self,
        rects: &[(f64, f64)], // (top, height) in document coordinates
        scroll_y: f64,
        viewport_height: f64,
    ) -> Vec<usize> {
        let mut newly = Vec::new();
        for (i, &(top, height)) in rects.iter().enumerate().take(self.fired.len()) {
            if !self.fired[i] && reveal_visible(top, height, scroll_y, viewport_height) {
                self.fired[i] = true;
                newly.push(i);
            }
        }
        newly
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.fired.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::{RevealSet, parallax_offset, scroll_progress};

    #[test]
    fn progress_spans_zero_to_one() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 1.0);
        // Overscroll clamps.
        assert_eq!(scroll_progress(2500.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn unscrollable_page_reports_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 1000.0), 0.0);
    }

    #[test]
    fn parallax_moves_against_scroll() {
        assert_eq!(parallax_offset(200.0, 0.3), -60.0);
        assert_eq!(parallax_offset(0.0, 0.3), 0.0);
    }

    #[test]
    fn reveal_fires_once_per_element() {
        // Element 0 in view, element 1 far below the fold.
        let rects = [(100.0, 200.0), (5000.0, 200.0)];
        let mut set = RevealSet::new(2);

        let newly = set.update(&rects, 0.0, 1000.0);
        assert_eq!(newly, vec![0]);

        // Same window again: nothing new.
        assert!(set.update(&rects, 0.0, 1000.0).is_empty());

        // Scroll down far enough and the second fires.
        let newly = set.update(&rects, 4500.0, 1000.0);
        assert_eq!(newly, vec![1]);
        assert!(set.is_revealed(1));
    }

    #[test]
    fn margin_delays_elements_at_the_bottom_edge() {
        // Element whose top sits exactly at the viewport bottom: the 50 px
        // margin keeps it hidden.
        let rects = [(1000.0, 300.0)];
        let mut set = RevealSet::new(1);
        assert!(set.update(&rects, 0.0, 1000.0).is_empty());
        // 80 px of it past the margin clears the 10% threshold (30 px).
        assert_eq!(set.update(&rects, 130.0, 1000.0), vec![0]);
    }
}
