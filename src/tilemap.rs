/// A dense 2D grid of tiles stored row-major.
///
/// Maps are bounded on all four edges; out-of-grid positions are simply
/// not neighbours.
#[derive(Clone)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Get the 4-connected neighbours of a tile, clipped at the edges.
    /// Returns up to 4 coordinates (left, right, up, down).
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);

        if x > 0 {
            result.push((x - 1, y));
        }
        if x < self.width - 1 {
            result.push((x + 1, y));
        }
        if y > 0 {
            result.push((x, y - 1));
        }
        if y < self.height - 1 {
            result.push((x, y + 1));
        }

        result
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut tm = Tilemap::new_with(4, 3, 0u8);
        tm.set(3, 2, 7);
        assert_eq!(*tm.get(3, 2), 7);
        assert_eq!(*tm.get(0, 0), 0);
    }

    #[test]
    fn neighbors_clip_at_edges() {
        let tm = Tilemap::new_with(3, 3, 0u8);

        // Corner has two neighbours, no wrapping.
        let corner = tm.neighbors(0, 0);
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&(1, 0)));
        assert!(corner.contains(&(0, 1)));

        // Interior tile has all four.
        assert_eq!(tm.neighbors(1, 1).len(), 4);

        // Edge tile has three.
        assert_eq!(tm.neighbors(2, 1).len(), 3);
    }

    #[test]
    fn iter_yields_row_major_coords() {
        let tm = Tilemap::new_with(2, 2, 1u8);
        let coords: Vec<(usize, usize)> = tm.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
