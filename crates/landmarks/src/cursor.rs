//! Navigation cursor over the current landmark index
//!
//! The cursor only stores a position. It borrows the index for each move and
//! never keeps it, so a rebuild cannot leave it pointing into an old list as
//! long as the engine calls [`NavigationCursor::reset`] after each scan.

use dom::{LandmarkIndex, LandmarkRegion};

use crate::error::{EngineError, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavigationCursor {
    current: Option<usize>,
}

impl NavigationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Forget the position; called on every rebuild
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Advance with wrap-around; from no position this lands on the first region
    pub fn next<'a>(&mut self, index: &'a LandmarkIndex) -> Result<&'a LandmarkRegion> {
        let count = index.count();
        if count == 0 {
            return Err(EngineError::NoLandmarks);
        }
        let target = match self.current {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.land(index, target)
    }

    /// Step back with wrap-around; from no position this lands on the last region
    pub fn previous<'a>(&mut self, index: &'a LandmarkIndex) -> Result<&'a LandmarkRegion> {
        let count = index.count();
        if count == 0 {
            return Err(EngineError::NoLandmarks);
        }
        let target = match self.current {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        };
        self.land(index, target)
    }

    /// Move to `target`; the position is untouched if it is out of range
    pub fn jump_to<'a>(
        &mut self,
        index: &'a LandmarkIndex,
        target: usize,
    ) -> Result<&'a LandmarkRegion> {
        self.land(index, target)
    }

    fn land<'a>(&mut self, index: &'a LandmarkIndex, target: usize) -> Result<&'a LandmarkRegion> {
        let region = index.region_at(target)?;
        self.current = Some(target);
        Ok(region)
    }
}
