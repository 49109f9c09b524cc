//! Walkthrough rendering.
//!
//! Pure: reads state, writes cells. Sections are positioned by the paging
//! layout (shifted by any live drag offset), writing text is drawn glyph by
//! glyph up to the revealed count, and completed text blits its snapshot
//! buffer instead of re-placing every element.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as TermRect;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;
use vellum_core::geometry::{Axis, Rect};

use crate::events::ColorScheme;
use crate::features::paging::{PagingLayout, Proposal};
use crate::features::typewriter::{TypewriterStackState, TypewriterState};
use crate::features::walkthrough::{SectionState, WalkthroughState};
use crate::snapshot::{foreground, Snapshot};

/// Rows kept clear above the active section.
const TOP_MARGIN: f32 = 2.0;

/// Rows reserved at the bottom for the control hints.
const CONTROLS_HEIGHT: u16 = 1;

const FAST_FORWARD_HINT: &str = "f skip";

pub fn render(state: &WalkthroughState, scheme: ColorScheme, area: TermRect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let column = content_column(state, area);
    let max_width = Some(column.size.width);

    let layout = PagingLayout::new(
        state.active(),
        state.paging.axis,
        state.tuning.section_spacing,
    );
    let measure = |index: usize, proposal: Proposal| {
        state.sections[index].size_that_fits(proposal.width, state.tuning.paragraph_spacing)
    };
    let mut placed = layout.place(
        &measure,
        state.section_count(),
        column,
        Proposal::new(max_width, None),
    );

    // A live drag shifts the whole stack along the paging axis.
    let offset = state.paging.live_offset();
    if offset != 0.0 {
        for (_, rect) in &mut placed {
            match state.paging.axis {
                Axis::Horizontal => rect.origin.x += offset,
                Axis::Vertical => rect.origin.y += offset,
            }
        }
    }

    let base = Style::default().fg(foreground(scheme));
    for (index, rect) in placed {
        let style = section_style(state, index, base);
        render_section(
            &state.sections[index],
            rect,
            max_width,
            state.tuning.paragraph_spacing,
            style,
            area,
            buf,
        );
    }

    render_controls(state, base, area, buf);
}

/// Centered reading column, capped at the configured measure.
fn content_column(state: &WalkthroughState, area: TermRect) -> Rect {
    let width = f32::from(area.width).min(state.tuning.text_content_max_width);
    let x = f32::from(area.x) + (f32::from(area.width) - width) / 2.0;
    let y = f32::from(area.y) + TOP_MARGIN;
    let height = (f32::from(area.height.saturating_sub(CONTROLS_HEIGHT)) - TOP_MARGIN).max(0.0);
    Rect::new(x, y, width, height)
}

/// Inactive sections are dimmed; the dim lifts during a drag so neighbors
/// read while the user is choosing.
fn section_style(state: &WalkthroughState, index: usize, base: Style) -> Style {
    if index == state.active() || state.paging.is_dragging() {
        base
    } else {
        base.add_modifier(Modifier::DIM)
    }
}

fn render_section(
    section: &SectionState,
    rect: Rect,
    max_width: Option<f32>,
    paragraph_spacing: f32,
    style: Style,
    clip: TermRect,
    buf: &mut Buffer,
) {
    let mut y = rect.origin.y;
    if let Some(title) = &section.title {
        let title_rect = Rect::new(rect.origin.x, y, rect.size.width, 0.0);
        render_typewriter(title, title_rect, max_width, style.add_modifier(Modifier::BOLD), clip, buf);
        y += title.size_that_fits(max_width).height + paragraph_spacing;
    }
    let body_rect = Rect::new(rect.origin.x, y, rect.size.width, 0.0);
    render_stack(&section.body, body_rect, max_width, style, clip, buf);
}

fn render_stack(
    stack: &TypewriterStackState,
    rect: Rect,
    max_width: Option<f32>,
    style: Style,
    clip: TermRect,
    buf: &mut Buffer,
) {
    if let Some(snapshot) = stack.snapshot() {
        blit(snapshot, rect.origin.x, rect.origin.y, clip, buf);
        return;
    }
    for (member, offset) in stack.members().iter().zip(stack.member_offsets(max_width)) {
        let member_rect = Rect::new(rect.origin.x, rect.origin.y + offset, rect.size.width, 0.0);
        render_typewriter(member, member_rect, max_width, style, clip, buf);
    }
}

fn render_typewriter(
    typewriter: &TypewriterState,
    rect: Rect,
    max_width: Option<f32>,
    style: Style,
    clip: TermRect,
    buf: &mut Buffer,
) {
    if let Some(snapshot) = typewriter.snapshot() {
        blit(snapshot, rect.origin.x, rect.origin.y, clip, buf);
        return;
    }

    let revealed = typewriter.revealed();
    if revealed == 0 {
        return;
    }
    for placed in typewriter.placed(rect, max_width) {
        if placed.offset >= revealed {
            continue;
        }
        draw(buf, clip, placed.x, placed.y, &typewriter.elements()[placed.offset], style);
    }
}

/// Copies a snapshot's non-blank cells into the target buffer, clipped.
fn blit(snapshot: &Snapshot, x: f32, y: f32, clip: TermRect, buf: &mut Buffer) {
    let area = snapshot.buffer.area;
    for sy in 0..area.height {
        for sx in 0..area.width {
            let cell = &snapshot.buffer[(sx, sy)];
            if cell.symbol() == " " {
                continue;
            }
            draw(
                buf,
                clip,
                x + f32::from(sx),
                y + f32::from(sy),
                cell.symbol(),
                cell.style(),
            );
        }
    }
}

/// Writes one run at rounded layout coordinates, skipping anything outside
/// the clip area.
fn draw(buf: &mut Buffer, clip: TermRect, x: f32, y: f32, symbol: &str, style: Style) {
    let x = x.round();
    let y = y.round();
    if x < f32::from(clip.left())
        || y < f32::from(clip.top())
        || x >= f32::from(clip.right())
        || y >= f32::from(clip.bottom())
    {
        return;
    }
    buf.set_string(x as u16, y as u16, symbol, style);
}

fn render_controls(state: &WalkthroughState, base: Style, area: TermRect, buf: &mut Buffer) {
    let row = area.bottom() - 1;

    if state.fast_forward_visible {
        buf.set_string(
            area.left() + 2,
            row,
            FAST_FORWARD_HINT,
            base.add_modifier(Modifier::DIM),
        );
    }

    if state.continue_visible {
        let label = if state.is_last(state.active()) {
            "Finish ⏎"
        } else {
            "Continue ⏎"
        };
        let width = label.width() as u16;
        let x = area.right().saturating_sub(width + 2);
        buf.set_string(x, row, label, base.add_modifier(Modifier::BOLD));
    }
}
