use glam::Vec3;

pub trait Vec3Ext
where
    Self: Sized,
{
    /// Mirrors this vector around `normal`.
    ///
    /// Expects the vector to point away from the surface (e.g. towards the
    /// viewer) and returns a vector that points away from it as well.
    fn mirror(self, normal: Self) -> Self;
}

impl Vec3Ext for Vec3 {
    fn mirror(self, normal: Self) -> Self {
        2.0 * self.dot(normal) * normal - self
    }
}
