//! CPU scalers applied before presentation

use rawplay_core::ScalerSpec;

/// Largest accepted magnification.
pub const MAX_FACTOR: u32 = 4;

/// Scaler resolved from a [`ScalerSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaler {
    None,
    /// Pixel replication
    Nearest(u32),
    /// EPX / Scale2x edge-aware doubling
    Scale2x,
}

impl Scaler {
    pub fn from_spec(spec: &ScalerSpec) -> Self {
        if !spec.is_enabled() || spec.factor <= 1 {
            return Self::None;
        }
        let factor = (spec.factor as u32).min(MAX_FACTOR);
        match spec.name.as_str() {
            "nearest" => Self::Nearest(factor),
            "scale2x" => {
                if factor != 2 {
                    tracing::warn!("scale2x only supports factor 2, ignoring {}", spec.factor);
                }
                Self::Scale2x
            }
            other => {
                tracing::warn!("Unknown scaler '{}', rendering unscaled", other);
                Self::None
            }
        }
    }

    pub fn factor(self) -> u32 {
        match self {
            Self::None => 1,
            Self::Nearest(factor) => factor,
            Self::Scale2x => 2,
        }
    }

    /// Scale a `width`x`height` frame, returning the new pixels.
    pub fn apply(self, src: &[u32], width: u32, height: u32) -> Vec<u32> {
        match self {
            Self::None => src.to_vec(),
            Self::Nearest(factor) => nearest(src, width, height, factor),
            Self::Scale2x => scale2x(src, width, height),
        }
    }
}

fn nearest(src: &[u32], width: u32, height: u32, factor: u32) -> Vec<u32> {
    let (w, f) = (width as usize, factor as usize);
    let mut out = Vec::with_capacity(src.len() * f * f);
    for row in src.chunks_exact(w).take(height as usize) {
        let start = out.len();
        for &pixel in row {
            out.extend(std::iter::repeat_n(pixel, f));
        }
        for _ in 1..f {
            out.extend_from_within(start..start + w * f);
        }
    }
    out
}

fn scale2x(src: &[u32], width: u32, height: u32) -> Vec<u32> {
    let (w, h) = (width as usize, height as usize);
    let at = |x: usize, y: usize| src[y * w + x];
    let mut out = vec![0; w * h * 4];
    let ow = w * 2;

    for y in 0..h {
        for x in 0..w {
            let p = at(x, y);
            let a = at(x, y.saturating_sub(1));
            let b = at((x + 1).min(w - 1), y);
            let c = at(x.saturating_sub(1), y);
            let d = at(x, (y + 1).min(h - 1));

            let mut e = [p; 4];
            if c == a && c != d && a != b {
                e[0] = a;
            }
            if a == b && a != c && b != d {
                e[1] = b;
            }
            if d == c && d != b && c != a {
                e[2] = c;
            }
            if b == d && b != a && d != c {
                e[3] = d;
            }

            let (ox, oy) = (x * 2, y * 2);
            out[oy * ow + ox] = e[0];
            out[oy * ow + ox + 1] = e[1];
            out[(oy + 1) * ow + ox] = e[2];
            out[(oy + 1) * ow + ox + 1] = e[3];
        }
    }
    out
}
