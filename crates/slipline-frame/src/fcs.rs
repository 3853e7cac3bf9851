//! 16-bit frame check sequence (RFC 1662 / PPP, CRC-16/X-25 family).
//!
//! The CRC is reflected with polynomial `0x8408`. A sender computes
//! [`calc`] over the payload and appends the 1's complement least-significant
//! byte first ([`append`]). A receiver runs the same CRC over payload *and*
//! trailer; an intact frame always lands on [`FCS_GOOD`].

/// Seed for a fresh FCS computation.
pub const FCS_INITIAL: u16 = 0xffff;

/// Residue of a frame whose trailing FCS is correct.
pub const FCS_GOOD: u16 = 0xf0b8;

/// Reflected CCITT polynomial (x^16 + x^12 + x^5 + 1).
const POLY: u16 = 0x8408;

static TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut v = i as u16;
        let mut bit = 0;
        while bit < 8 {
            v = if v & 1 != 0 { (v >> 1) ^ POLY } else { v >> 1 };
            bit += 1;
        }
        table[i] = v;
        i += 1;
    }
    table
}

#[inline]
fn fold(fcs: u16, byte: u8) -> u16 {
    (fcs >> 8) ^ TABLE[((fcs ^ u16::from(byte)) & 0xff) as usize]
}

/// Fold `data` into `seed`. Empty input returns `seed` unchanged.
pub fn calc_with_init(seed: u16, data: &[u8]) -> u16 {
    data.iter().fold(seed, |fcs, &b| fold(fcs, b))
}

/// CRC of `data` starting from [`FCS_INITIAL`].
pub fn calc(data: &[u8]) -> u16 {
    calc_with_init(FCS_INITIAL, data)
}

/// Check a packet that carries its FCS in the last two bytes.
///
/// Inputs shorter than two bytes cannot hold an FCS and never verify.
pub fn verify(packet: &[u8]) -> bool {
    packet.len() >= 2 && calc(packet) == FCS_GOOD
}

/// Return `payload` followed by the complemented `fcs`, LSB first.
pub fn append(payload: &[u8], fcs: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 2);
    out.extend_from_slice(payload);
    out.extend_from_slice(&trailer(fcs));
    out
}

/// Split a verified packet into its payload, dropping the FCS trailer.
///
/// Returns `None` when the trailer does not verify.
pub fn strip(packet: &[u8]) -> Option<&[u8]> {
    if verify(packet) {
        Some(&packet[..packet.len() - 2])
    } else {
        None
    }
}

/// The two wire bytes [`append`] writes for `fcs`: complemented, LSB first.
pub fn trailer(fcs: u16) -> [u8; 2] {
    (!fcs).to_le_bytes()
}

/// Incremental FCS accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fcs16 {
    value: u16,
}

impl Fcs16 {
    /// Start a new computation at [`FCS_INITIAL`].
    pub fn new() -> Self {
        Self::with_init(FCS_INITIAL)
    }

    /// Start from an explicit seed.
    pub fn with_init(seed: u16) -> Self {
        Self { value: seed }
    }

    /// Fold one byte.
    pub fn push(&mut self, byte: u8) {
        self.value = fold(self.value, byte);
    }

    /// Fold a slice.
    pub fn update(&mut self, data: &[u8]) {
        self.value = calc_with_init(self.value, data);
    }

    /// Current accumulator value.
    pub fn value(&self) -> u16 {
        self.value
    }

    /// True when the bytes folded so far end in a valid FCS trailer.
    pub fn is_good(&self) -> bool {
        self.value == FCS_GOOD
    }

    /// The two trailer bytes a sender appends for the bytes folded so far.
    pub fn finish_bytes(&self) -> [u8; 2] {
        trailer(self.value)
    }
}

impl Default for Fcs16 {
    fn default() -> Self {
        Self::new()
    }
}
