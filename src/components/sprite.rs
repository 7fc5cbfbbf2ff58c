//! Sprite-sheet frame indexing and loop scheduling.
//!
//! A sprite sheet is a grid of equally sized frames. [`FrameIndexer`] walks a
//! cursor through a rectangular range of that grid under one of two layouts:
//!
//! - **wrap**: frames flow left to right across the whole sheet and continue
//!   at column 0 of the next row when the sheet width is reached.
//! - **squeeze**: frames stay within `[start_col, end_col]` on every row.
//!
//! [`Sprite`] binds an indexer to a texture and schedules its advancement,
//! either on a fixed real-time interval ([`AdvanceMode::Timer`]) or lazily
//! when drawn ([`AdvanceMode::Draw`]). Timer mode keeps time even when the
//! sprite is not drawn; draw mode never advances a frame nobody saw.
//!
//! Nothing happens until the backing sheet has been loaded and bound with
//! [`Sprite::bind_sheet`]: advancing, seeking and drawing are silent no-ops
//! before that.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::resources::renderer::{DrawRect, Renderer};
use crate::resources::sheetstore::{FlipCache, SheetStore};

/// Mirror transform applied to a whole sheet before frames are cut from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flip {
    #[serde(default)]
    pub horizontal: bool,
    #[serde(default)]
    pub vertical: bool,
}

impl Flip {
    pub const NONE: Flip = Flip {
        horizontal: false,
        vertical: false,
    };

    pub fn horizontal() -> Self {
        Flip {
            horizontal: true,
            vertical: false,
        }
    }

    pub fn vertical() -> Self {
        Flip {
            horizontal: false,
            vertical: true,
        }
    }

    pub fn is_none(&self) -> bool {
        !self.horizontal && !self.vertical
    }
}

/// Inclusive range of sheet cells a loop runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
    pub squeeze: bool,
}

impl FrameRange {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
            squeeze: false,
        }
    }

    pub fn squeezed(mut self) -> Self {
        self.squeeze = true;
        self
    }

    /// Single-row range covering `count` frames starting at `start_col`.
    pub fn row(row: u32, start_col: u32, count: u32) -> Self {
        Self::new(row, start_col, row, start_col + count.saturating_sub(1))
    }

    fn cols_in_range(&self) -> u32 {
        self.end_col - self.start_col + 1
    }
}

/// Result of a single [`FrameIndexer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// The cursor moved to the next frame.
    Advanced,
    /// The loop ran past its last frame and started over at frame 1.
    Restarted,
    /// A run-once loop ran past its last frame; the cursor is back on frame 1.
    Finished,
}

/// Cursor over a frame range of a sheet `total_cols` frames wide.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameIndexer {
    /// Zero-indexed sheet row of the current frame.
    pub row: u32,
    /// Zero-indexed sheet column of the current frame.
    pub col: u32,
    /// One-indexed position of the current frame inside the range.
    pub frame: u32,
    /// Stop (instead of restarting) after the last frame.
    pub once: bool,
    range: FrameRange,
    total_cols: u32,
    num_frames: u32,
}

impl FrameIndexer {
    pub fn new(range: FrameRange, total_cols: u32) -> Self {
        debug_assert!(total_cols > 0, "sheet must be at least one frame wide");
        debug_assert!(
            range.start_row <= range.end_row,
            "frame range starts after it ends"
        );
        debug_assert!(
            range.start_row < range.end_row || range.start_col <= range.end_col,
            "frame range starts after it ends"
        );
        debug_assert!(
            !range.squeeze || range.start_col <= range.end_col,
            "squeezed range needs start_col <= end_col"
        );
        Self {
            row: range.start_row,
            col: range.start_col,
            frame: 1,
            once: false,
            range,
            total_cols,
            num_frames: Self::count_frames(&range, total_cols),
        }
    }

    /// Number of frames a range covers on a sheet `total_cols` frames wide.
    pub fn count_frames(range: &FrameRange, total_cols: u32) -> u32 {
        if range.squeeze {
            (range.end_row - range.start_row + 1) * range.cols_in_range()
        } else {
            let rows = i64::from(range.end_row) - i64::from(range.start_row);
            let n = rows * i64::from(total_cols) - i64::from(range.start_col)
                + i64::from(range.end_col)
                + 1;
            n.max(0) as u32
        }
    }

    pub fn range(&self) -> FrameRange {
        self.range
    }

    pub fn total_cols(&self) -> u32 {
        self.total_cols
    }

    pub fn num_frames(&self) -> u32 {
        self.num_frames
    }

    /// Move the cursor back to frame 1 of the range.
    pub fn reset(&mut self) {
        self.row = self.range.start_row;
        self.col = self.range.start_col;
        self.frame = 1;
    }

    /// Seek to an arbitrary frame number.
    ///
    /// Numbers outside `[1, num_frames]` wrap around, with 0 mapping to the
    /// last frame.
    pub fn set_frame(&mut self, frame: i64) {
        let n = i64::from(self.num_frames);
        if n == 0 {
            return;
        }
        let wrapped = match frame.rem_euclid(n) {
            0 => n,
            f => f,
        };
        let offset = wrapped - 1;
        let r = &self.range;
        if r.squeeze {
            let cols = i64::from(r.cols_in_range());
            self.row = r.start_row + (offset / cols) as u32;
            self.col = (offset % cols) as u32 + r.start_col;
        } else {
            let total = i64::from(self.total_cols);
            let linear = offset + i64::from(r.start_col);
            self.row = r.start_row + (linear / total) as u32;
            self.col = (linear % total) as u32;
        }
        self.frame = wrapped as u32;
    }

    /// Step to the next frame, wrapping rows and restarting or finishing at the end.
    pub fn advance(&mut self) -> FrameStep {
        self.col += 1;
        self.frame += 1;

        let r = self.range;
        let past_row_end = if r.squeeze {
            self.col > r.end_col
        } else {
            self.col >= self.total_cols
        };
        if past_row_end {
            self.col = if r.squeeze { r.start_col } else { 0 };
            self.row += 1;
        }

        if self.row > r.end_row || (self.row == r.end_row && self.col > r.end_col) {
            self.reset();
            if self.once {
                return FrameStep::Finished;
            }
            return FrameStep::Restarted;
        }
        FrameStep::Advanced
    }
}

/// Shortest interval a loop runs at.
pub const MIN_INTERVAL_MS: f64 = 1.0;

/// How a running loop is advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvanceMode {
    /// Advance every `interval_ms` of real time, drawn or not.
    #[default]
    Timer,
    /// Advance at most once per draw, after `interval_ms` since the last advance.
    Draw,
}

/// Ownership token for a running loop, returned by [`Sprite::start_loop`].
///
/// Passing it back to [`Sprite::stop_loop`] releases the loop. Starting a new
/// loop invalidates the previous handle.
#[must_use = "a loop can only be stopped through its handle"]
#[derive(Debug, PartialEq, Eq)]
pub struct LoopHandle {
    id: u64,
}

#[derive(Debug, Clone)]
struct ActiveLoop {
    id: u64,
    interval_ms: f64,
    mode: AdvanceMode,
    accumulated_ms: f64,
    last_advance_ms: Option<f64>,
}

/// Pixel size of a loaded sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSize {
    pub width: f32,
    pub height: f32,
}

/// Source rectangle of the current frame inside the (possibly flipped) sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Animated view into a sprite sheet.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Key of the sheet in the [`SheetStore`].
    pub tex_key: String,
    pub frame_width: f32,
    pub frame_height: f32,
    pub flip: Flip,
    range: Option<FrameRange>,
    sheet: Option<SheetSize>,
    indexer: Option<FrameIndexer>,
    once: bool,
    active: Option<ActiveLoop>,
    next_loop_id: u64,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, frame_width: f32, frame_height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            frame_width,
            frame_height,
            flip: Flip::NONE,
            range: None,
            sheet: None,
            indexer: None,
            once: false,
            active: None,
            next_loop_id: 0,
        }
    }

    /// Restrict the sprite to a frame range. Without one, the whole sheet loops.
    pub fn with_range(mut self, range: FrameRange) -> Self {
        self.set_range(range);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.sheet.is_some()
    }

    pub fn sheet_size(&self) -> Option<SheetSize> {
        self.sheet
    }

    /// Attach the loaded sheet's pixel size and build the frame cursor.
    pub fn bind_sheet(&mut self, width: f32, height: f32) {
        self.sheet = Some(SheetSize { width, height });
        self.rebuild_indexer();
        debug!(
            "Sprite '{}' bound to {}x{} sheet ({} cols)",
            self.tex_key,
            width,
            height,
            self.total_cols()
        );
    }

    /// Columns in the bound sheet, or 0 before it is loaded.
    pub fn total_cols(&self) -> u32 {
        self.sheet
            .map(|s| ((s.width / self.frame_width).floor() as u32).max(1))
            .unwrap_or(0)
    }

    fn total_rows(&self) -> u32 {
        self.sheet
            .map(|s| ((s.height / self.frame_height).floor() as u32).max(1))
            .unwrap_or(0)
    }

    /// Switch to a new range; the cursor restarts at frame 1.
    pub fn set_range(&mut self, range: FrameRange) {
        self.range = Some(range);
        self.rebuild_indexer();
    }

    pub fn range(&self) -> Option<FrameRange> {
        self.indexer.as_ref().map(|i| i.range()).or(self.range)
    }

    fn rebuild_indexer(&mut self) {
        if !self.is_loaded() {
            return;
        }
        let range = self.range.unwrap_or_else(|| {
            FrameRange::new(0, 0, self.total_rows() - 1, self.total_cols() - 1)
        });
        let mut indexer = FrameIndexer::new(range, self.total_cols());
        indexer.once = self.once;
        self.indexer = Some(indexer);
    }

    pub fn indexer(&self) -> Option<&FrameIndexer> {
        self.indexer.as_ref()
    }

    /// Current frame number (one-indexed), if the sheet is loaded.
    pub fn frame(&self) -> Option<u32> {
        self.indexer.as_ref().map(|i| i.frame)
    }

    pub fn num_frames(&self) -> Option<u32> {
        self.indexer.as_ref().map(|i| i.num_frames())
    }

    /// Seek to a frame. No-op before the sheet is loaded.
    pub fn set_frame(&mut self, frame: i64) {
        if let Some(indexer) = self.indexer.as_mut() {
            indexer.set_frame(frame);
        }
    }

    /// Step one frame. Returns `None` before the sheet is loaded.
    ///
    /// Finishing a run-once loop releases it.
    pub fn advance(&mut self) -> Option<FrameStep> {
        let step = self.indexer.as_mut()?.advance();
        if step == FrameStep::Finished {
            debug!("Sprite '{}' finished its run-once loop", self.tex_key);
            self.active = None;
        }
        Some(step)
    }

    /// Start advancing every `interval_ms`. Replaces any running loop.
    ///
    /// Intervals below [`MIN_INTERVAL_MS`] (including zero, negative and NaN)
    /// run at [`MIN_INTERVAL_MS`].
    pub fn start_loop(&mut self, interval_ms: f64, mode: AdvanceMode, once: bool) -> LoopHandle {
        let interval_ms = if interval_ms >= MIN_INTERVAL_MS {
            interval_ms
        } else {
            warn!(
                "Sprite '{}' loop interval {} ms raised to {} ms",
                self.tex_key, interval_ms, MIN_INTERVAL_MS
            );
            MIN_INTERVAL_MS
        };
        self.next_loop_id += 1;
        let id = self.next_loop_id;
        self.once = once;
        if let Some(indexer) = self.indexer.as_mut() {
            indexer.once = once;
            indexer.reset();
        }
        self.active = Some(ActiveLoop {
            id,
            interval_ms,
            mode,
            accumulated_ms: 0.0,
            last_advance_ms: None,
        });
        LoopHandle { id }
    }

    /// Stop the loop owned by `handle` and rewind to frame 1.
    ///
    /// Returns false if the handle no longer owns the running loop.
    pub fn stop_loop(&mut self, handle: LoopHandle) -> bool {
        match &self.active {
            Some(active) if active.id == handle.id => {
                self.active = None;
                if let Some(indexer) = self.indexer.as_mut() {
                    indexer.reset();
                }
                true
            }
            _ => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn advance_mode(&self) -> Option<AdvanceMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    pub fn interval_ms(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.interval_ms)
    }

    /// Feed real elapsed time to a timer-driven loop.
    ///
    /// Advances once per whole interval elapsed. Returns the last step taken,
    /// or `Finished` if a run-once loop completed during this call.
    pub fn tick(&mut self, elapsed_ms: f64) -> Option<FrameStep> {
        if !self.is_loaded() {
            return None;
        }
        let active = self.active.as_mut()?;
        if active.mode != AdvanceMode::Timer {
            return None;
        }
        if elapsed_ms.is_finite() {
            active.accumulated_ms += elapsed_ms.max(0.0);
        }
        let interval = active.interval_ms;
        let whole = (active.accumulated_ms / interval).floor();
        if whole < 1.0 {
            return None;
        }
        active.accumulated_ms %= interval;

        // A run-once loop finishes within one pass over the range. A repeating
        // loop lands on the same frame after any number of whole passes, so
        // keep one pass plus the remainder.
        let frames = f64::from(self.num_frames().unwrap_or(1).max(1));
        let steps = if self.once {
            whole.min(frames)
        } else if whole > frames {
            frames + whole % frames
        } else {
            whole
        };
        let due = steps as u32;
        let mut last = None;
        for _ in 0..due {
            let step = self.advance();
            last = step;
            if step == Some(FrameStep::Finished) {
                break;
            }
        }
        last
    }

    /// Start the clock of a draw-driven loop that has not been timed yet.
    ///
    /// Lets the first draw of a loop that started earlier advance as soon as
    /// its interval has passed, instead of only starting the clock.
    pub fn start_draw_clock(&mut self, now_ms: f64) {
        if let Some(active) = self.active.as_mut()
            && active.mode == AdvanceMode::Draw
            && active.last_advance_ms.is_none()
        {
            active.last_advance_ms = Some(now_ms);
        }
    }

    /// Advance a draw-driven loop if its interval has elapsed since the last advance.
    ///
    /// Without a started clock the first draw only starts it.
    pub fn draw_tick(&mut self, now_ms: f64) -> Option<FrameStep> {
        if !self.is_loaded() {
            return None;
        }
        let active = self.active.as_mut()?;
        if active.mode != AdvanceMode::Draw {
            return None;
        }
        let due = match active.last_advance_ms {
            Some(last) => now_ms - last >= active.interval_ms,
            None => false,
        };
        if active.last_advance_ms.is_none() || due {
            active.last_advance_ms = Some(now_ms);
        }
        if due {
            self.advance()
        } else {
            None
        }
    }

    /// Source rectangle of the current frame, mirrored for the current flip.
    pub fn source_rect(&self) -> Option<SourceRect> {
        let sheet = self.sheet?;
        let indexer = self.indexer.as_ref()?;
        let mut x = indexer.col as f32 * self.frame_width;
        let mut y = indexer.row as f32 * self.frame_height;
        if self.flip.horizontal {
            x = self.total_cols() as f32 * self.frame_width - x - self.frame_width;
        }
        if self.flip.vertical {
            y = self.total_rows() as f32 * self.frame_height - y - self.frame_height;
        }
        debug_assert!(x >= 0.0 && x + self.frame_width <= sheet.width + f32::EPSILON);
        Some(SourceRect {
            x,
            y,
            width: self.frame_width,
            height: self.frame_height,
        })
    }

    /// Draw the current frame into `dest`, advancing a draw-driven loop first.
    ///
    /// Draws nothing if the sheet (or its flipped copy) is not ready yet.
    pub fn draw(
        &mut self,
        renderer: &mut dyn Renderer,
        sheets: &SheetStore,
        flips: &FlipCache,
        dest: DrawRect,
        rotation: f32,
        now_ms: f64,
    ) -> Option<FrameStep> {
        let step = self.draw_tick(now_ms);
        let image = if self.flip.is_none() {
            sheets.get(&self.tex_key).map(|s| s.image)
        } else {
            flips.get(&self.tex_key, self.flip)
        };
        if let (Some(image), Some(src)) = (image, self.source_rect()) {
            renderer.draw_image(image, src, dest, rotation);
        }
        step
    }
}
