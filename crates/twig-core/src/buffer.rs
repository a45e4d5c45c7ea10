//! Line-oriented display surface mirrored from the entry store.

/// Line storage the tree engine writes its rows into.
///
/// Line indices are 0-based and line `i` always shows store entry `i`.
pub trait LineBuffer {
    /// Inserts `text` as a new line at `index`, shifting later lines down.
    fn insert_line(&mut self, index: usize, text: &str);
    /// Removes the line at `index`.
    fn delete_line(&mut self, index: usize);
    fn clear(&mut self);
    fn set_read_only(&mut self, read_only: bool);
    fn line_count(&self) -> usize;
}

/// In-memory [`LineBuffer`].
///
/// Edits made while the buffer is read-only are rejected and logged.
#[derive(Debug, Clone, Default)]
pub struct VecBuffer {
    lines: Vec<String>,
    read_only: bool,
    inserts: usize,
    deletes: usize,
}

impl VecBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Total `insert_line` calls applied so far.
    pub fn insert_count(&self) -> usize {
        self.inserts
    }

    /// Total `delete_line` calls applied so far.
    pub fn delete_count(&self) -> usize {
        self.deletes
    }
}

impl LineBuffer for VecBuffer {
    fn insert_line(&mut self, index: usize, text: &str) {
        if self.read_only {
            tracing::warn!("rejected insert at line {index}: buffer is read-only");
            return;
        }
        let index = index.min(self.lines.len());
        self.lines.insert(index, text.to_string());
        self.inserts += 1;
    }

    fn delete_line(&mut self, index: usize) {
        if self.read_only {
            tracing::warn!("rejected delete at line {index}: buffer is read-only");
            return;
        }
        if index < self.lines.len() {
            self.lines.remove(index);
            self.deletes += 1;
        }
    }

    fn clear(&mut self) {
        if self.read_only {
            tracing::warn!("rejected clear: buffer is read-only");
            return;
        }
        self.lines.clear();
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Clears the read-only flag for its lifetime and restores it on drop.
pub(crate) struct Writable<'a, B: LineBuffer> {
    buffer: &'a mut B,
}

impl<'a, B: LineBuffer> Writable<'a, B> {
    pub(crate) fn new(buffer: &'a mut B) -> Self {
        buffer.set_read_only(false);
        Self { buffer }
    }
}

impl<B: LineBuffer> std::ops::Deref for Writable<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.buffer
    }
}

impl<B: LineBuffer> std::ops::DerefMut for Writable<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.buffer
    }
}

impl<B: LineBuffer> Drop for Writable<'_, B> {
    fn drop(&mut self) {
        self.buffer.set_read_only(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete() {
        let mut buf = VecBuffer::new();
        buf.insert_line(0, "b");
        buf.insert_line(0, "a");
        buf.insert_line(2, "c");
        assert_eq!(buf.lines(), &["a", "b", "c"]);

        buf.delete_line(1);
        assert_eq!(buf.lines(), &["a", "c"]);
        assert_eq!(buf.insert_count(), 3);
        assert_eq!(buf.delete_count(), 1);
    }

    #[test]
    fn insert_past_end_appends() {
        let mut buf = VecBuffer::new();
        buf.insert_line(10, "x");
        assert_eq!(buf.line(0), Some("x"));
    }

    #[test]
    fn delete_out_of_range_is_ignored() {
        let mut buf = VecBuffer::new();
        buf.insert_line(0, "x");
        buf.delete_line(5);
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.delete_count(), 0);
    }

    #[test]
    fn read_only_rejects_edits() {
        let mut buf = VecBuffer::new();
        buf.insert_line(0, "x");
        buf.set_read_only(true);
        buf.insert_line(0, "y");
        buf.delete_line(0);
        buf.clear();
        assert_eq!(buf.lines(), &["x"]);
    }

    #[test]
    fn writable_guard_restores_read_only() {
        let mut buf = VecBuffer::new();
        buf.set_read_only(true);
        {
            let mut w = Writable::new(&mut buf);
            assert!(!w.is_read_only());
            w.insert_line(0, "row");
        }
        assert!(buf.is_read_only());
        assert_eq!(buf.lines(), &["row"]);
    }
}
