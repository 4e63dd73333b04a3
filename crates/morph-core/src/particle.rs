use std::ops::Index;

use glam::Vec3;

/// Ordered sequence of points. Index `i` always refers to particle `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { points: Vec::with_capacity(capacity) }
    }

    /// `count` points at the origin.
    pub fn zeros(count: usize) -> Self {
        Self { points: vec![Vec3::ZERO; count] }
    }

    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, p: Vec3) {
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Vec3] {
        &self.points
    }

    pub fn as_mut_slice(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    pub fn into_points(self) -> Vec<Vec3> {
        self.points
    }

    /// Interleaved `x, y, z` view (3 floats per point), ready for upload.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Overwrite every slot from `src` without changing the length.
    ///
    /// Slots beyond `src.len()` become the origin and surplus source points
    /// are dropped. Returns the number of origin-padded slots.
    pub fn overwrite_padded(&mut self, src: &[Vec3]) -> usize {
        let n = self.points.len();
        let copied = src.len().min(n);
        self.points[..copied].copy_from_slice(&src[..copied]);
        for p in &mut self.points[copied..] {
            *p = Vec3::ZERO;
        }
        n - copied
    }
}

impl Index<usize> for PointCloud {
    type Output = Vec3;

    fn index(&self, i: usize) -> &Vec3 {
        &self.points[i]
    }
}

impl FromIterator<Vec3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

impl Extend<Vec3> for PointCloud {
    fn extend<I: IntoIterator<Item = Vec3>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Paired render and target buffers of identical, fixed length.
pub struct MorphBuffers {
    pub count: usize,
    /// Render buffer, eased toward `target` each tick.
    pub current: PointCloud,
    /// Unscaled template shape; replaced wholesale on template change.
    pub target: PointCloud,
}

impl MorphBuffers {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: PointCloud::zeros(count),
            target: PointCloud::zeros(count),
        }
    }

    /// Replace the target shape, origin-padding any shortfall.
    pub fn load_target(&mut self, shape: &PointCloud) -> usize {
        self.target.overwrite_padded(shape.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_view_interleaves_xyz() {
        let cloud = PointCloud::from_points(vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(cloud.as_flat(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_overwrite_pads_short_source_with_origin() {
        let mut cloud = PointCloud::from_points(vec![Vec3::ONE; 4]);
        let padded = cloud.overwrite_padded(&[Vec3::X, Vec3::Y]);
        assert_eq!(padded, 2);
        assert_eq!(cloud.as_slice(), &[Vec3::X, Vec3::Y, Vec3::ZERO, Vec3::ZERO]);
    }

    #[test]
    fn test_overwrite_truncates_long_source() {
        let mut cloud = PointCloud::zeros(2);
        let padded = cloud.overwrite_padded(&[Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(padded, 0);
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[1], Vec3::Y);
    }

    #[test]
    fn test_buffers_start_equal_length() {
        let buffers = MorphBuffers::new(16);
        assert_eq!(buffers.current.len(), 16);
        assert_eq!(buffers.target.len(), 16);
    }
}
