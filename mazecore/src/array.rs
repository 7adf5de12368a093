use std::ops;

use crate::dims::Dims;

/// Fixed-size 2D array stored row by row in one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        if !pos.all_non_negative() {
            return None;
        }

        let (x, y) = (pos.0 as usize, pos.1 as usize);
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(pos.linear_index(self.size()))
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        let x = idx % self.width;
        let y = idx / self.width;

        Some(Dims(x as i32, y as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buf.iter_mut()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    /// Borrows two distinct cells mutably at once.
    ///
    /// Returns `None` if either position is out of bounds or both point to the same cell.
    pub fn get_pair_mut(&mut self, a: Dims, b: Dims) -> Option<(&mut T, &mut T)> {
        let (ia, ib) = (self.dim_to_idx(a)?, self.dim_to_idx(b)?);
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (lo, hi) = self.buf.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.buf.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, width: usize, height: usize) -> Self {
        Self {
            buf: vec![item; width * height],
            width,
            height,
        }
    }

    pub fn new_dims(item: T, size: Dims) -> Option<Self> {
        if !size.all_non_negative() {
            return None;
        }

        let (width, height) = (size.0 as usize, size.1 as usize);
        width.checked_mul(height)?;
        Some(Self::new(item, width, height))
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.dim_to_idx(index)
            .and_then(|i| self.buf.get(i))
            .expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.dim_to_idx(index)
            .and_then(|i| self.buf.get_mut(i))
            .expect("Index out of bounds")
    }
}
