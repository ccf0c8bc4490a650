use std::path::PathBuf;

use crate::geometry::PixelRect;

/// One committed crop. Never changed after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropRecord {
    pub rect: PixelRect,
    pub sequence: u32,
    pub output_path: PathBuf,
    /// The write replaced a file that was already at `output_path`.
    pub replaced: bool,
}

/// Crops committed on the currently displayed image, in commit order.
///
/// This is an overlay log only: resetting it never touches files on disk.
#[derive(Clone, Debug, Default)]
pub struct CropHistory {
    records: Vec<CropRecord>,
    counter: u32,
}

impl CropHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next commit will receive. Not consumed until
    /// [`record`](Self::record) is called, so a failed write leaves no gap.
    pub fn next_sequence(&self) -> u32 {
        self.counter + 1
    }

    pub fn last_sequence(&self) -> u32 {
        self.counter
    }

    /// Append a commit under the next sequence number.
    pub fn record(&mut self, rect: PixelRect, output_path: PathBuf, replaced: bool) -> &CropRecord {
        self.counter += 1;
        self.push(CropRecord {
            rect,
            sequence: self.counter,
            output_path,
            replaced,
        })
    }

    /// Append a commit whose sequence number was assigned by a paired viewport.
    pub fn record_synced(
        &mut self,
        rect: PixelRect,
        sequence: u32,
        output_path: PathBuf,
        replaced: bool,
    ) -> &CropRecord {
        self.counter = self.counter.max(sequence);
        self.push(CropRecord {
            rect,
            sequence,
            output_path,
            replaced,
        })
    }

    fn push(&mut self, record: CropRecord) -> &CropRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[CropRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop the overlay and restart numbering at 0.
    pub fn reset(&mut self) {
        self.records.clear();
        self.counter = 0;
    }
}
