//! Growable byte buffer with the primitive writes Standard MIDI Files need.

/// Append-only byte buffer.
///
/// Multi-byte integers are written big-endian, as SMF requires.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Low 24 bits of `value`, big-endian.
    pub fn write_u24(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes()[1..]);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Variable-length quantity: 7 bits per byte, most significant group
    /// first, high bit set on every byte except the last.
    ///
    /// # Examples
    /// ```
    /// use lyre::midi::ByteWriter;
    ///
    /// let mut w = ByteWriter::new();
    /// w.write_vlq(0x80);
    /// assert_eq!(w.finish(), vec![0x81, 0x00]);
    /// ```
    pub fn write_vlq(&mut self, value: u32) {
        let mut groups = [0u8; 5];
        let mut count = 0;
        let mut rest = value;
        loop {
            groups[count] = (rest & 0x7F) as u8;
            count += 1;
            rest >>= 7;
            if rest == 0 {
                break;
            }
        }
        for idx in (0..count).rev() {
            let continuation = if idx > 0 { 0x80 } else { 0x00 };
            self.buf.push(groups[idx] | continuation);
        }
    }

    /// A chunk: 4-byte tag, 4-byte big-endian body length, body.
    pub fn write_chunk(&mut self, tag: &[u8; 4], body: &[u8]) {
        self.write_bytes(tag);
        self.write_u32(body.len() as u32);
        self.write_bytes(body);
    }

    /// Hand over the finished bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
