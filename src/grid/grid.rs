use super::{Coord, Dimensions};
use crate::error::{MazeError, Result};

/// Dense row-major storage, one value per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T: Copy + Default> {
    dim: Dimensions,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(dim: Dimensions) -> Self {
        Self::filled(dim, T::default())
    }

    pub fn filled(dim: Dimensions, value: T) -> Self {
        Self {
            dim,
            data: vec![value; dim.size()],
        }
    }

    pub fn from_data(dim: Dimensions, data: Vec<T>) -> Result<Self> {
        if data.len() != dim.size() {
            return Err(MazeError::length_mismatch(dim.size(), data.len()));
        }
        Ok(Self { dim, data })
    }

    pub fn get(&self, idx: isize) -> Result<T> {
        let idx = self.checked(idx)?;
        Ok(self.data[idx])
    }

    pub fn set(&mut self, idx: isize, elem: T) -> Result<()> {
        let idx = self.checked(idx)?;
        self.data[idx] = elem;
        Ok(())
    }

    /// Like [`Grid::get`] but rejects coordinates outside the grid even when
    /// their index would wrap onto another row.
    pub fn get_at(&self, pos: Coord) -> Result<T> {
        if !self.dim.contains(pos) {
            return Err(MazeError::out_of_range(self.dim.index(pos), self.len()));
        }
        self.get(self.dim.index(pos))
    }

    pub fn set_at(&mut self, pos: Coord, elem: T) -> Result<()> {
        if !self.dim.contains(pos) {
            return Err(MazeError::out_of_range(self.dim.index(pos), self.len()));
        }
        self.set(self.dim.index(pos), elem)
    }

    #[inline]
    pub fn dim(&self) -> &Dimensions {
        &self.dim
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn switch_data(&mut self, new_data: Vec<T>) -> Result<()> {
        if new_data.len() != self.data.len() {
            return Err(MazeError::length_mismatch(self.data.len(), new_data.len()));
        }
        self.data = new_data;
        Ok(())
    }

    /// Builds a new grid from `f(old, index)`, visiting cells in index order.
    pub fn map_indexed<F>(&self, mut f: F) -> Self
    where
        F: FnMut(T, usize) -> T,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(idx, elem)| f(*elem, idx))
            .collect();
        Self { dim: self.dim, data }
    }

    pub fn fill(&mut self, value: T) {
        for elem in self.data.iter_mut() {
            *elem = value;
        }
    }

    fn checked(&self, idx: isize) -> Result<usize> {
        if self.dim.contains_index(idx) {
            Ok(idx as usize)
        } else {
            Err(MazeError::out_of_range(idx, self.len()))
        }
    }
}
