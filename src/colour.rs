//! Hierarchical colour assignment.
//!
//! Every root starts at the same green and owns the whole colour wheel. Each
//! node splits its slice of the wheel between its children (plus one spare
//! share), so siblings fan out in hue while staying clear of the parent.
//! Below the rendering depth, hue stops moving and the value darkens instead.

use crate::tree::Tree;

const ROOT_COLOUR: Hsv = Hsv { hue: 120.0, saturation: 100.0, value: 100.0 };
const FULL_WHEEL: f64 = 360.0;
/// Shares skipped before the first child's hue.
const HUE_OFFSET: f64 = 10.0;
const SATURATION_DECAY: f64 = 0.95;
const DARKEN: f64 = 0.8;

/// Hue in degrees `[0, 360)`, saturation and value in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    #[must_use]
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Hsv {
            hue: hue.rem_euclid(FULL_WHEEL),
            saturation: saturation.clamp(0.0, 100.0),
            value: value.clamp(0.0, 100.0),
        }
    }

    /// 8-bit RGB, standard six-sector conversion.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let h = self.hue.rem_euclid(FULL_WHEEL) / 60.0;
        let s = self.saturation / 100.0;
        let v = self.value / 100.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        let byte = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        (byte(r), byte(g), byte(b))
    }
}

/// Colour every node of `tree` for a render cut at `max_level`.
///
/// The result is indexed by token. Nodes strictly above `max_level` pass new
/// hues to their children; nodes at or below it pass a darker shade of their
/// own colour.
pub fn assign_colours(tree: &Tree, max_level: usize) -> Vec<Hsv> {
    let mut colours = vec![ROOT_COLOUR; tree.len()];
    let mut stack: Vec<(usize, Hsv, f64)> = Vec::new();

    for &root in tree.roots() {
        stack.push((root, ROOT_COLOUR, FULL_WHEEL));
        while let Some((i, colour, zone)) = stack.pop() {
            colours[i] = colour;
            let node = tree.node(i);
            let shift = zone / (node.children.len() + 1) as f64;
            // Reverse push keeps the visit order depth-first in child order.
            for (j, &child) in node.children.iter().enumerate().rev() {
                let next = if node.level < max_level {
                    Hsv::new(
                        colour.hue + (HUE_OFFSET + j as f64) * shift,
                        colour.saturation * SATURATION_DECAY,
                        colour.value,
                    )
                } else {
                    Hsv::new(colour.hue, colour.saturation, colour.value * DARKEN)
                };
                stack.push((child, next, shift));
            }
        }
    }

    colours
}
