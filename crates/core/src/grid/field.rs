//! Padded scalar field storage
//!
//! Both heat-grid layers are stored as a flat `Vec<f32>` in row-major order
//! (`y * width + x`). The stored extent already includes the border padding,
//! so every interior cell has all eight neighbors addressable.

/// Flat 2D scalar field
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    /// Values in row-major order (y * width + x)
    pub(crate) data: Vec<f32>,
    /// Width in cells (padding included)
    pub(crate) width: usize,
    /// Height in cells (padding included)
    pub(crate) height: usize,
}

impl ScalarField {
    /// Create a zero-initialised field
    ///
    /// # Arguments
    ///
    /// * `width` - Width in cells, padding included
    /// * `height` - Height in cells, padding included
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index of `(x, y)`
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Fill the whole field, padding included
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = ScalarField::new(10, 20);
        assert_eq!(field.width(), 10);
        assert_eq!(field.height(), 20);
        assert_eq!(field.as_slice().len(), 200);
        assert!(field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_field_get_set_row_major() {
        let mut field = ScalarField::new(10, 10);
        field.set(3, 4, 123.45);
        assert_eq!(field.get(3, 4), 123.45);
        assert_eq!(field.as_slice()[field.index(3, 4)], 123.45);
        assert_eq!(field.index(3, 4), 43);
    }

    #[test]
    fn test_field_fill_covers_padding() {
        let mut field = ScalarField::new(4, 5);
        field.fill(2.0);
        assert!(field.as_slice().iter().all(|&v| v == 2.0));
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_field_bounds_check() {
        let field = ScalarField::new(10, 10);
        let _ = field.get(10, 5);
    }
}
