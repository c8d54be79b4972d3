// Download progress accounting.
//
// Bytes flow from the network reader through `ProgressReader` into the destination file;
// the reader tallies them and `ProgressTracker` turns the tally into whole percentages.
// Everything happens inline on the calling thread, so the callback must return quickly or
// it stalls the download.

use std::io::{self, Read, Write};

/// Converts a running byte count into throttled whole-percent notifications.
///
/// The callback only fires when the whole percentage increases, values are clamped to 100
/// (the total may be an estimate that the real download exceeds), and 0 is never reported.
pub struct ProgressTracker<F: FnMut(u8)> {
    total: u64,
    current: u64,
    last_percent: u8,
    on_progress: F,
}

impl<F: FnMut(u8)> ProgressTracker<F> {
    pub fn new(total: u64, on_progress: F) -> Self {
        ProgressTracker {
            total,
            current: 0,
            last_percent: 0,
            on_progress,
        }
    }

    /// Records `bytes` more bytes and notifies if the whole percentage moved forward.
    pub fn advance(&mut self, bytes: u64) {
        self.current = self.current.saturating_add(bytes);
        if self.total == 0 {
            return;
        }
        let percent = (u128::from(self.current) * 100 / u128::from(self.total)).min(100) as u8;
        if percent > self.last_percent {
            self.last_percent = percent;
            (self.on_progress)(percent);
        }
    }

    /// Marks the transfer complete, reporting 100 if it has not been reported yet.
    /// Needed when the total was an over-estimate.
    pub fn finish(&mut self) {
        if self.last_percent < 100 {
            self.last_percent = 100;
            (self.on_progress)(100);
        }
    }

    /// Bytes seen so far.
    pub fn bytes(&self) -> u64 {
        self.current
    }
}

/// A reader that reports every chunk it yields to a [`ProgressTracker`].
pub struct ProgressReader<'a, R: Read, F: FnMut(u8)> {
    inner: R,
    tracker: &'a mut ProgressTracker<F>,
}

impl<'a, R: Read, F: FnMut(u8)> ProgressReader<'a, R, F> {
    pub fn new(inner: R, tracker: &'a mut ProgressTracker<F>) -> Self {
        ProgressReader { inner, tracker }
    }
}

impl<R: Read, F: FnMut(u8)> Read for ProgressReader<'_, R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.tracker.advance(n as u64);
        Ok(n)
    }
}

/// Streams `reader` into `writer`, reporting progress against `total` bytes.
///
/// # Returns
/// * `Ok(u64)` with the number of bytes copied. On success the callback has seen 100.
pub fn copy_with_progress<R: Read, W: Write + ?Sized, F: FnMut(u8)>(
    reader: R,
    writer: &mut W,
    total: u64,
    on_progress: F,
) -> io::Result<u64> {
    let mut tracker = ProgressTracker::new(total, on_progress);
    {
        let mut counting = ProgressReader::new(reader, &mut tracker);
        io::copy(&mut counting, writer)?;
    }
    tracker.finish();
    Ok(tracker.bytes())
}
