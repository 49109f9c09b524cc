//! Paging stack layout.
//!
//! Positions N elements along one axis at fixed spacing, sized to the
//! active element: the reported intrinsic size is the active element's
//! size, and the whole run is offset so the active element's leading edge
//! lands at the container's origin. Surrounding containers therefore size
//! themselves to whatever is currently showing.

use vellum_core::geometry::{Axis, Point, Rect, Size};

/// A width/height constraint, either bounded or unconstrained per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Proposal {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Proposal {
    pub fn new(width: Option<f32>, height: Option<f32>) -> Proposal {
        Proposal { width, height }
    }
}

/// Paging stack layout state.
#[derive(Clone, Copy, Debug)]
pub struct PagingLayout {
    /// The active element's index.
    pub active: usize,
    pub axis: Axis,
    pub spacing: f32,
}

impl PagingLayout {
    pub fn new(active: usize, axis: Axis, spacing: f32) -> PagingLayout {
        PagingLayout {
            active,
            axis,
            spacing,
        }
    }

    /// Intrinsic size: exactly the active element's size (not a union).
    pub fn size_that_fits(
        &self,
        measure: &impl Fn(usize, Proposal) -> Size,
        count: usize,
        proposal: Proposal,
    ) -> Size {
        if self.active >= count {
            return Size::ZERO;
        }
        measure(self.active, self.child_proposal(measure, count, proposal))
    }

    /// Places all elements sequentially along the axis, offsetting the run
    /// so the active element's leading edge sits at the container origin.
    /// Perpendicular positioning centers each element on the container's
    /// midline.
    pub fn place(
        &self,
        measure: &impl Fn(usize, Proposal) -> Size,
        count: usize,
        bounds: Rect,
        proposal: Proposal,
    ) -> Vec<(usize, Rect)> {
        let proposal = self.child_proposal(measure, count, proposal);

        let leading = match self.axis {
            Axis::Horizontal => bounds.min_x(),
            Axis::Vertical => bounds.min_y(),
        };
        let mut position = leading - self.offset_before_active(measure, count, proposal);

        let mut placed = Vec::with_capacity(count);
        for index in 0..count {
            let size = measure(index, proposal);
            let origin = match self.axis {
                Axis::Horizontal => Point::new(position, bounds.mid_y() - size.height / 2.0),
                Axis::Vertical => Point::new(bounds.mid_x() - size.width / 2.0, position),
            };
            placed.push((index, Rect { origin, size }));
            position += size.along(self.axis) + self.spacing;
        }

        placed
    }

    /// Cumulative extent (plus spacing) of every element before the active
    /// index.
    fn offset_before_active(
        &self,
        measure: &impl Fn(usize, Proposal) -> Size,
        count: usize,
        proposal: Proposal,
    ) -> f32 {
        (0..count.min(self.active))
            .map(|index| measure(index, proposal).along(self.axis) + self.spacing)
            .sum()
    }

    /// On the vertical (wrapping) axis, every element is offered the same
    /// cross-axis extent: the maximum natural height among all elements.
    /// Horizontal stacks pass the proposal through unchanged.
    fn child_proposal(
        &self,
        measure: &impl Fn(usize, Proposal) -> Size,
        count: usize,
        proposal: Proposal,
    ) -> Proposal {
        match self.axis {
            Axis::Horizontal => proposal,
            Axis::Vertical => {
                let natural = Proposal::new(proposal.width, None);
                let max_height = (0..count)
                    .map(|index| measure(index, natural).height)
                    .fold(0.0_f32, f32::max);
                Proposal::new(proposal.width, Some(max_height))
            }
        }
    }
}
