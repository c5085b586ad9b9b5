//! Floating panel placement relative to its input.
//!
//! A placement names the side of the reference the panel sits on and how it
//! lines up along that side. Candidates are tried in order (the preferred
//! placement, then the fallbacks) and the first that fits the viewport wins.
//! When nothing fits the preferred placement is kept, and overflow
//! prevention shifts the panel back on screen.

use ratatui::layout::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Fixed(Side, Align),
    /// Whichever side has the most room
    Auto(Align),
}

impl Placement {
    pub const BOTTOM_START: Placement = Placement::Fixed(Side::Bottom, Align::Start);
    pub const BOTTOM_END: Placement = Placement::Fixed(Side::Bottom, Align::End);
    pub const TOP_START: Placement = Placement::Fixed(Side::Top, Align::Start);
    pub const TOP_END: Placement = Placement::Fixed(Side::Top, Align::End);
    pub const AUTO: Placement = Placement::Auto(Align::Center);
    pub const AUTO_END: Placement = Placement::Auto(Align::End);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverOptions {
    pub placement: Placement,
    pub fallback_placements: Vec<Placement>,
    pub prevent_overflow: bool,
    /// Gap between reference and panel
    pub offset: u16,
}

impl PopoverOptions {
    pub fn range_picker() -> Self {
        Self {
            placement: Placement::BOTTOM_START,
            fallback_placements: vec![
                Placement::BOTTOM_END,
                Placement::TOP_START,
                Placement::TOP_END,
            ],
            prevent_overflow: true,
            offset: 0,
        }
    }

    /// Start-aligned dropdown that only flips vertically; overflow
    /// prevention slides it sideways
    pub fn calendar() -> Self {
        Self {
            placement: Placement::BOTTOM_START,
            fallback_placements: vec![Placement::TOP_START],
            prevent_overflow: true,
            offset: 0,
        }
    }

    pub fn date_time_picker() -> Self {
        Self {
            placement: Placement::AUTO,
            fallback_placements: vec![
                Placement::BOTTOM_END,
                Placement::TOP_START,
                Placement::TOP_END,
                Placement::AUTO_END,
                Placement::AUTO,
            ],
            prevent_overflow: true,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedPosition {
    pub area: Rect,
    pub side: Side,
    pub align: Align,
    /// The chosen placement fit without shifting
    pub fits: bool,
}

fn space_on(side: Side, reference: Rect, viewport: Rect) -> i32 {
    match side {
        Side::Top => reference.y as i32 - viewport.y as i32,
        Side::Bottom => viewport.bottom() as i32 - reference.bottom() as i32,
        Side::Left => reference.x as i32 - viewport.x as i32,
        Side::Right => viewport.right() as i32 - reference.right() as i32,
    }
}

fn expand(placement: Placement, reference: Rect, viewport: Rect) -> Vec<(Side, Align)> {
    match placement {
        Placement::Fixed(side, align) => vec![(side, align)],
        Placement::Auto(align) => {
            let mut sides = vec![Side::Bottom, Side::Top, Side::Right, Side::Left];
            // stable sort keeps bottom-first among equals
            sides.sort_by_key(|side| -space_on(*side, reference, viewport));
            sides.into_iter().map(|side| (side, align)).collect()
        }
    }
}

/// Unclamped origin of a panel of `size` placed on `side` of `reference`
fn origin(reference: Rect, size: Size, side: Side, align: Align, offset: u16) -> (i32, i32) {
    let (rx, ry) = (reference.x as i32, reference.y as i32);
    let (rw, rh) = (reference.width as i32, reference.height as i32);
    let (w, h) = (size.width as i32, size.height as i32);
    let offset = offset as i32;

    let along = |start: i32, len: i32, extent: i32| match align {
        Align::Start => start,
        Align::Center => start + len / 2 - extent / 2,
        Align::End => start + len - extent,
    };

    match side {
        Side::Bottom => (along(rx, rw, w), ry + rh + offset),
        Side::Top => (along(rx, rw, w), ry - h - offset),
        Side::Right => (rx + rw + offset, along(ry, rh, h)),
        Side::Left => (rx - w - offset, along(ry, rh, h)),
    }
}

fn fits(x: i32, y: i32, size: Size, viewport: Rect) -> bool {
    x >= viewport.x as i32
        && y >= viewport.y as i32
        && x + size.width as i32 <= viewport.right() as i32
        && y + size.height as i32 <= viewport.bottom() as i32
}

/// Shift (and if needed shrink) a panel so it lies inside the viewport
fn keep_inside(x: i32, y: i32, size: Size, viewport: Rect) -> Rect {
    let width = size.width.min(viewport.width);
    let height = size.height.min(viewport.height);
    let max_x = viewport.right() as i32 - width as i32;
    let max_y = viewport.bottom() as i32 - height as i32;
    let x = x.clamp(viewport.x as i32, max_x.max(viewport.x as i32));
    let y = y.clamp(viewport.y as i32, max_y.max(viewport.y as i32));
    Rect::new(x as u16, y as u16, width, height)
}

pub fn compute_position(
    reference: Rect,
    size: Size,
    viewport: Rect,
    options: &PopoverOptions,
) -> ComputedPosition {
    let mut candidates: Vec<(Side, Align)> = Vec::new();
    let placements =
        std::iter::once(options.placement).chain(options.fallback_placements.iter().copied());
    for placement in placements {
        for candidate in expand(placement, reference, viewport) {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let chosen = candidates.iter().copied().find(|(side, align)| {
        let (x, y) = origin(reference, size, *side, *align, options.offset);
        fits(x, y, size, viewport)
    });

    let (side, align, fit) = match chosen {
        Some((side, align)) => (side, align, true),
        None => {
            let (side, align) = candidates[0];
            (side, align, false)
        }
    };

    let (x, y) = origin(reference, size, side, align, options.offset);
    let area = if fit || options.prevent_overflow {
        keep_inside(x, y, size, viewport)
    } else {
        // off-screen parts get clipped to the viewport
        let clipped_x = x.max(viewport.x as i32);
        let clipped_y = y.max(viewport.y as i32);
        let right = (x + size.width as i32).min(viewport.right() as i32);
        let bottom = (y + size.height as i32).min(viewport.bottom() as i32);
        Rect::new(
            clipped_x as u16,
            clipped_y as u16,
            (right - clipped_x).max(0) as u16,
            (bottom - clipped_y).max(0) as u16,
        )
    };

    ComputedPosition {
        area,
        side,
        align,
        fits: fit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    #[test]
    fn test_bottom_start_when_room() {
        let input = Rect::new(5, 2, 30, 3);
        let pos = compute_position(
            input,
            Size::new(50, 12),
            VIEWPORT,
            &PopoverOptions::range_picker(),
        );
        assert_eq!(pos.area, Rect::new(5, 5, 50, 12));
        assert_eq!((pos.side, pos.align), (Side::Bottom, Align::Start));
        assert!(pos.fits);
    }

    #[test]
    fn test_falls_back_to_bottom_end_near_right_edge() {
        let input = Rect::new(70, 2, 30, 3);
        let pos = compute_position(
            input,
            Size::new(50, 12),
            VIEWPORT,
            &PopoverOptions::range_picker(),
        );
        assert_eq!((pos.side, pos.align), (Side::Bottom, Align::End));
        assert_eq!(pos.area, Rect::new(50, 5, 50, 12));
    }

    #[test]
    fn test_flips_to_top_near_bottom_edge() {
        let input = Rect::new(5, 34, 30, 3);
        let pos = compute_position(
            input,
            Size::new(50, 12),
            VIEWPORT,
            &PopoverOptions::range_picker(),
        );
        assert_eq!((pos.side, pos.align), (Side::Top, Align::Start));
        assert_eq!(pos.area, Rect::new(5, 22, 50, 12));
    }

    #[test]
    fn test_calendar_slides_instead_of_switching_alignment() {
        let input = Rect::new(90, 2, 10, 3);
        let pos = compute_position(
            input,
            Size::new(22, 10),
            VIEWPORT,
            &PopoverOptions::calendar(),
        );
        assert!(!pos.fits);
        assert_eq!((pos.side, pos.align), (Side::Bottom, Align::Start));
        assert_eq!(pos.area, Rect::new(78, 5, 22, 10));
    }

    #[test]
    fn test_auto_prefers_side_with_most_room() {
        let input = Rect::new(10, 30, 80, 3);
        let pos = compute_position(
            input,
            Size::new(30, 12),
            VIEWPORT,
            &PopoverOptions::date_time_picker(),
        );
        assert_eq!(pos.side, Side::Top);
        assert_eq!(pos.area, Rect::new(35, 18, 30, 12));
    }

    #[test]
    fn test_prevent_overflow_shifts_and_shrinks() {
        let tiny = Rect::new(0, 0, 40, 10);
        let input = Rect::new(20, 4, 10, 3);
        let pos = compute_position(
            input,
            Size::new(50, 12),
            tiny,
            &PopoverOptions::range_picker(),
        );
        assert!(!pos.fits);
        assert_eq!((pos.side, pos.align), (Side::Bottom, Align::Start));
        assert_eq!(pos.area, Rect::new(0, 0, 40, 10));
    }
}
