/// Quadratic depth slicing of the view volume.
///
/// Slice `k` starts at `calc_near(k) = opt * k^2 + near` with
/// `opt = (far - near) / count^2`, so slices get thicker with distance.

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ZSplit {
    near: f32,
    far: f32,
    count: u32,
    near_opt: f32,
}

impl ZSplit {
    pub(crate) fn new(near: f32, far: f32, count: u32) -> Self {
        debug_assert!(count > 0);
        let count_f = count as f32;
        Self {
            near,
            far,
            count,
            near_opt: (far - near) / (count_f * count_f),
        }
    }

    /// Split of a grid that has not been prepared yet.
    pub(crate) fn unprepared(count: u32) -> Self {
        Self { near: 0.0, far: 0.0, count, near_opt: 0.0 }
    }

    pub(crate) fn near(&self) -> f32 {
        self.near
    }

    pub(crate) fn far(&self) -> f32 {
        self.far
    }

    pub(crate) fn near_opt(&self) -> f32 {
        self.near_opt
    }

    /// Distance from the eye to the start of slice `k`.
    #[inline]
    pub(crate) fn calc_near(&self, k: u32) -> f32 {
        let k = k as f32;
        self.near_opt * k * k + self.near
    }

    /// Slice containing the view-space depth `z_view` (negative in front).
    ///
    /// Result is in `0..=count`; `count` is returned at the far plane.
    /// `calc_z(-calc_near(k)) == k` for every `k` in `0..=count`.
    pub(crate) fn calc_z(&self, z_view: f32) -> u32 {
        if !(self.near_opt > 0.0) {
            return 0;
        }

        let z = (-z_view).max(self.near).min(self.far);
        if z >= self.far {
            return self.count;
        }

        // sqrt estimate, then settle on the exact floor against calc_near
        let mut k = ((z - self.near) / self.near_opt).sqrt().floor() as u32;
        k = k.min(self.count);
        while k < self.count && self.calc_near(k + 1) <= z {
            k += 1;
        }
        while k > 0 && self.calc_near(k) > z {
            k -= 1;
        }
        k
    }
}

#[cfg(test)]
#[path = "z_split_tests.rs"]
mod tests;
