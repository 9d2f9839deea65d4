use super::viewport::ScrollSample;

pub const DEFAULT_NAV_THRESHOLD_PX: u32 = 50;
pub const DEFAULT_TOP_BUTTON_THRESHOLD_PX: u32 = 300;

/// Flags the page chrome derives from the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollChromeState {
    /// Navigation bar gets its solid background.
    pub is_past_nav_threshold: bool,
    /// Scroll-to-top button is shown.
    pub is_past_top_button_threshold: bool,
    /// How far down the page the reader is, in `0.0..=1.0`.
    pub scroll_progress: f64,
}

pub fn compute_chrome(
    sample: ScrollSample,
    nav_threshold_px: u32,
    top_button_threshold_px: u32,
) -> ScrollChromeState {
    let scroll_progress = if sample.document_height <= sample.viewport_height {
        0.0
    } else {
        let scrollable = sample.max_scroll().max(1);
        (f64::from(sample.position_y) / f64::from(scrollable)).clamp(0.0, 1.0)
    };
    ScrollChromeState {
        is_past_nav_threshold: sample.position_y > nav_threshold_px,
        is_past_top_button_threshold: sample.position_y > top_button_threshold_px,
        scroll_progress,
    }
}

/// Remembers the last computed [`ScrollChromeState`] so callers only
/// re-render when something changed.
#[derive(Debug, Clone)]
pub struct ScrollChrome {
    nav_threshold_px: u32,
    top_button_threshold_px: u32,
    last: Option<ScrollChromeState>,
}

impl Default for ScrollChrome {
    fn default() -> Self {
        Self::new(DEFAULT_NAV_THRESHOLD_PX, DEFAULT_TOP_BUTTON_THRESHOLD_PX)
    }
}

impl ScrollChrome {
    pub fn new(nav_threshold_px: u32, top_button_threshold_px: u32) -> Self {
        Self {
            nav_threshold_px,
            top_button_threshold_px,
            last: None,
        }
    }

    /// Returns the new state, or `None` if it equals the previous one.
    pub fn update(&mut self, sample: ScrollSample) -> Option<ScrollChromeState> {
        let next = compute_chrome(sample, self.nav_threshold_px, self.top_button_threshold_px);
        if self.last == Some(next) {
            return None;
        }
        self.last = Some(next);
        Some(next)
    }

    pub fn last(&self) -> Option<ScrollChromeState> {
        self.last
    }
}

/// A page section's id and where it starts, in document pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAnchor {
    pub id: String,
    pub top: f64,
}

/// Picks the section to highlight in the navigation.
///
/// `sections` must be in document order. The active section is the last one
/// whose top has scrolled above `position_y + offset_px`; at the very bottom
/// of the page the last section wins even if it is too short to reach that
/// line.
pub fn active_section(
    sample: ScrollSample,
    sections: &[SectionAnchor],
    offset_px: u32,
) -> Option<&str> {
    let max_scroll = sample.max_scroll();
    if max_scroll > 0 && sample.position_y >= max_scroll {
        if let Some(last) = sections.last() {
            return Some(&last.id);
        }
    }
    let line = f64::from(sample.position_y) + f64::from(offset_px);
    sections
        .iter()
        .take_while(|section| section.top <= line)
        .last()
        .map(|section| section.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(position_y: u32) -> ScrollSample {
        ScrollSample::new(position_y, 1000, 2000)
    }

    #[test]
    fn test_compute_chrome_reference_points() {
        let top = compute_chrome(sample(0), 50, 300);
        assert!(!top.is_past_nav_threshold);
        assert!(!top.is_past_top_button_threshold);
        assert_eq!(top.scroll_progress, 0.0);

        let middle = compute_chrome(sample(500), 50, 300);
        assert!(middle.is_past_nav_threshold);
        assert!(middle.is_past_top_button_threshold);
        assert_eq!(middle.scroll_progress, 0.5);

        let bottom = compute_chrome(sample(1000), 50, 300);
        assert_eq!(bottom.scroll_progress, 1.0);

        let beyond = compute_chrome(sample(1400), 50, 300);
        assert_eq!(beyond.scroll_progress, 1.0);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let at = compute_chrome(sample(50), 50, 300);
        assert!(!at.is_past_nav_threshold);
        let past = compute_chrome(sample(51), 50, 300);
        assert!(past.is_past_nav_threshold);
        assert!(!past.is_past_top_button_threshold);
    }

    #[test]
    fn test_short_document_has_zero_progress() {
        let short = ScrollSample::new(0, 1000, 600);
        assert_eq!(compute_chrome(short, 50, 300).scroll_progress, 0.0);

        let equal = ScrollSample::new(0, 1000, 1000);
        assert_eq!(compute_chrome(equal, 50, 300).scroll_progress, 0.0);
    }

    #[test]
    fn test_progress_stays_in_range_and_follows_position() {
        let positions = [0, 10, 10, 250, 999, 1000, 1500, 700, 0];
        let mut previous: Option<(u32, f64)> = None;
        for y in positions {
            let progress = compute_chrome(sample(y), 50, 300).scroll_progress;
            assert!((0.0..=1.0).contains(&progress));
            if let Some((prev_y, prev_progress)) = previous {
                if y >= prev_y {
                    assert!(progress >= prev_progress);
                }
            }
            previous = Some((y, progress));
        }
    }

    #[test]
    fn test_update_only_reports_changes() {
        let mut chrome = ScrollChrome::default();
        assert!(chrome.update(sample(0)).is_some());
        assert!(chrome.update(sample(0)).is_none());

        let changed = chrome.update(sample(60)).expect("nav threshold crossed");
        assert!(changed.is_past_nav_threshold);
        assert!(chrome.update(sample(60)).is_none());
        assert_eq!(chrome.last(), Some(changed));
    }

    #[test]
    fn test_active_section() {
        let sections = vec![
            SectionAnchor {
                id: "hero".into(),
                top: 0.0,
            },
            SectionAnchor {
                id: "about".into(),
                top: 900.0,
            },
            SectionAnchor {
                id: "contact".into(),
                top: 1800.0,
            },
        ];
        let page = |y| ScrollSample::new(y, 800, 2200);

        assert_eq!(active_section(page(0), &sections, 80), Some("hero"));
        assert_eq!(active_section(page(819), &sections, 80), Some("hero"));
        assert_eq!(active_section(page(820), &sections, 80), Some("about"));
        assert_eq!(active_section(page(1000), &sections, 80), Some("about"));
        // bottom of the page: contact never reaches the line but still wins
        assert_eq!(active_section(page(1400), &sections, 80), Some("contact"));
        assert_eq!(active_section(page(0), &[], 80), None);

        let below_first = [SectionAnchor {
            id: "about".into(),
            top: 500.0,
        }];
        assert_eq!(active_section(page(0), &below_first, 80), None);
    }
}
