use crate::core::geo::Point;
use crate::core::viewport::ViewportState;

/// One affine step of the overlay draw transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(Point),
    Scale(f64),
}

/// Ordered chain of affine steps, listed outer to inner: the last op is
/// applied to a point first, the first op last. Collapsible to a single
/// matrix for the draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformChain {
    ops: Vec<TransformOp>,
}

impl TransformChain {
    pub fn new(ops: Vec<TransformOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Runs a point through the chain, innermost step first.
    pub fn apply(&self, point: Point) -> Point {
        let mut current = point;
        for op in self.ops.iter().rev() {
            current = match op {
                TransformOp::Translate(t) => current.add(t),
                TransformOp::Scale(s) => current.multiply(*s),
            };
        }
        current
    }

    /// Collapses the chain into an affine matrix `[a, b, c, d, e, f]` where
    /// `x' = a*x + c*y + e` and `y' = b*x + d*y + f`. The chain is uniform
    /// scale + translation only, so b and c stay zero.
    pub fn matrix(&self) -> [f64; 6] {
        let mut scale = 1.0;
        let mut translate = Point::new(0.0, 0.0);
        for op in self.ops.iter().rev() {
            match op {
                TransformOp::Translate(t) => translate = translate.add(t),
                TransformOp::Scale(s) => {
                    scale *= s;
                    translate = translate.multiply(*s);
                }
            }
        }
        [scale, 0.0, 0.0, scale, translate.x, translate.y]
    }
}

/// Builds the transform chain that places cached route geometry exactly
/// where the viewport engine renders the same geographic points.
///
/// Outer to inner:
/// 1. translate to the overlay's anchor position in the window;
/// 2. invert the engine's in-flight pan-zoom animation transform; the
///    engine applies that transform to the overlay again on its own, and
///    geometry carrying it twice detaches visibly from the tiles while a
///    zoom gesture animates;
/// 3. apply the settled view scale and back out the pixel-space pan;
/// 4. translate by half the map edge, the constant factor hoisted out of
///    the per-point longitude math;
/// 5. translate by the cache offset so geometry stored near the origin
///    lands back at its true pixel position.
pub struct TransformComposer;

impl TransformComposer {
    pub fn compose(state: &ViewportState, offset: Point) -> TransformChain {
        let scatter = state.scatter;

        TransformChain::new(vec![
            TransformOp::Translate(state.origin),
            TransformOp::Scale(1.0 / scatter.scale),
            TransformOp::Translate(scatter.pos.multiply(-1.0)),
            TransformOp::Scale(state.scale),
            TransformOp::Translate(state.pos.multiply(-1.0)),
            TransformOp::Translate(Point::new(state.map_size() / 2.0, 0.0)),
            TransformOp::Translate(offset),
        ])
    }
}
