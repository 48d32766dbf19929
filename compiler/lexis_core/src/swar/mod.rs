//! SWAR (SIMD within a register) byte scanning.
//!
//! Every scanner loads 8 bytes at a time as a little-endian `u64` and uses
//! carry-free zero-byte detection to locate interesting lanes, then falls
//! back to a scalar loop for the 0–7 byte tail. Results are identical to a
//! naive byte-by-byte scan for every input, including empty slices and
//! slices shorter than one word.
//!
//! The byte offset of the first flagged lane is `trailing_zeros / 8`: the
//! word is loaded little-endian, so lane 0 is the lowest byte.

/// Bytes per SWAR step.
const WORD: usize = 8;

/// `0x01` in every lane; multiplying by a byte broadcasts it.
const ONES: u64 = 0x0101_0101_0101_0101;
/// Low 7 bits of every lane.
const LO7: u64 = 0x7F7F_7F7F_7F7F_7F7F;
/// High bit of every lane.
const HI: u64 = 0x8080_8080_8080_8080;
/// Top three bits of every lane.
const TOP3: u64 = 0xE0E0_E0E0_E0E0_E0E0;

const SPACES: u64 = 0x2020_2020_2020_2020;
const TABS: u64 = 0x0909_0909_0909_0909;
const LINE_FEEDS: u64 = 0x0A0A_0A0A_0A0A_0A0A;
const CARRIAGE_RETURNS: u64 = 0x0D0D_0D0D_0D0D_0D0D;
const QUOTES: u64 = 0x2222_2222_2222_2222;
const BACKSLASHES: u64 = 0x5C5C_5C5C_5C5C_5C5C;

/// Bias that pushes every lane `>= 0x20` into the high bit: `0x80 - 0x20`.
const CONTROL_BIAS: u64 = 0x6060_6060_6060_6060;

/// Above this many targets `find_any_byte` switches to a lookup table.
const MAX_SWAR_TARGETS: usize = 4;

/// Broadcast `b` into every lane of a `u64`.
#[inline]
const fn broadcast(b: u8) -> u64 {
    ONES * b as u64
}

/// Detects which bytes in a `u64` are zero, returning a mask with the high
/// bit (`0x80`) set in each zero byte lane.
///
/// Masks each byte to 7 bits and adds `0x7F` per lane (max `0xFE`, so no
/// carry crosses lanes), then ORs with the original to catch `0x80`.
/// Unlike the subtract-based formula this never flags a lane spuriously.
#[inline]
const fn byte_zero_mask(v: u64) -> u64 {
    !((v & LO7).wrapping_add(LO7) | v) & HI
}

/// High bit set in each lane whose byte is below `0x20`.
///
/// Adding `0x60` to a 7-bit lane sets its high bit exactly when the lane is
/// at least `0x20`; lanes that already had the high bit set are removed by
/// the `!v` term.
#[inline]
const fn control_mask(v: u64) -> u64 {
    !((v & LO7).wrapping_add(CONTROL_BIAS) | v) & HI
}

/// Lane offset of the lowest flagged lane in a non-zero mask.
#[inline]
fn first_lane(mask: u64) -> usize {
    mask.trailing_zeros() as usize / WORD
}

/// Load 8 bytes starting at `i` as a little-endian word.
///
/// Caller guarantees `i + 8 <= data.len()`.
#[inline]
#[allow(
    unsafe_code,
    reason = "unaligned u64 reads required for SWAR byte-parallel processing"
)]
fn load(data: &[u8], i: usize) -> u64 {
    debug_assert!(i + WORD <= data.len(), "SWAR load past end of slice");
    // SAFETY: callers only load while `i + 8 <= data.len()`, so the 8 bytes
    // at `i` are in bounds. `read_unaligned` is required because slices are
    // not 8-byte aligned.
    let raw = unsafe { data.as_ptr().add(i).cast::<u64>().read_unaligned() };
    u64::from_le(raw)
}

#[inline]
fn is_ascii_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Index of the first occurrence of `needle`, or `None`.
pub fn find_byte(data: &[u8], needle: u8) -> Option<usize> {
    let pattern = broadcast(needle);
    let len = data.len();
    let mut i = 0;

    while i + WORD <= len {
        let mask = byte_zero_mask(load(data, i) ^ pattern);
        if mask != 0 {
            return Some(i + first_lane(mask));
        }
        i += WORD;
    }

    data[i..].iter().position(|&b| b == needle).map(|p| i + p)
}

/// Index of the first byte contained in `targets`, or `None`.
///
/// Up to four targets are tested together in one pass over each word.
/// Larger sets gain nothing from batching and are resolved through a
/// 256-entry membership table instead.
pub fn find_any_byte(data: &[u8], targets: &[u8]) -> Option<usize> {
    match targets {
        [] => None,
        [single] => find_byte(data, *single),
        _ if targets.len() <= MAX_SWAR_TARGETS => find_any_swar(data, targets),
        _ => find_any_table(data, targets),
    }
}

fn find_any_swar(data: &[u8], targets: &[u8]) -> Option<usize> {
    let mut patterns = [0u64; MAX_SWAR_TARGETS];
    for (slot, &t) in patterns.iter_mut().zip(targets) {
        *slot = broadcast(t);
    }
    let patterns = &patterns[..targets.len()];

    let len = data.len();
    let mut i = 0;

    while i + WORD <= len {
        let chunk = load(data, i);
        let mask = patterns
            .iter()
            .fold(0, |acc, &p| acc | byte_zero_mask(chunk ^ p));
        if mask != 0 {
            return Some(i + first_lane(mask));
        }
        i += WORD;
    }

    data[i..]
        .iter()
        .position(|b| targets.contains(b))
        .map(|p| i + p)
}

fn find_any_table(data: &[u8], targets: &[u8]) -> Option<usize> {
    let mut table = [false; 256];
    for &t in targets {
        table[usize::from(t)] = true;
    }
    data.iter().position(|&b| table[usize::from(b)])
}

/// Index of the first byte that is not space, tab, `\n` or `\r`.
///
/// Returns `data.len()` when the whole slice is whitespace. A NUL byte is
/// not whitespace and stops the scan.
pub fn skip_whitespace(data: &[u8]) -> usize {
    let len = data.len();
    let mut i = 0;

    while i + WORD <= len {
        let chunk = load(data, i);

        // Whitespace lanes have top bits `000` (tab, LF, CR) or `001`
        // (space). Any other top bits prove this chunk ends the run.
        if chunk & TOP3 & !SPACES != 0 {
            return i + scalar_skip(&data[i..i + WORD]);
        }

        let ws = byte_zero_mask(chunk ^ SPACES)
            | byte_zero_mask(chunk ^ TABS)
            | byte_zero_mask(chunk ^ LINE_FEEDS)
            | byte_zero_mask(chunk ^ CARRIAGE_RETURNS);
        let non_ws = !ws & HI;
        if non_ws != 0 {
            return i + first_lane(non_ws);
        }
        i += WORD;
    }

    i + scalar_skip(&data[i..])
}

#[inline]
fn scalar_skip(data: &[u8]) -> usize {
    data.iter().take_while(|&&b| is_ascii_whitespace(b)).count()
}

/// Returns `true` if any byte is a control character (`< 0x20`), `"`,
/// `\`, or non-ASCII (`> 0x7F`).
pub fn needs_escaping(data: &[u8]) -> bool {
    let len = data.len();
    let mut i = 0;

    while i + WORD <= len {
        let chunk = load(data, i);
        let flagged = control_mask(chunk)
            | byte_zero_mask(chunk ^ QUOTES)
            | byte_zero_mask(chunk ^ BACKSLASHES)
            | (chunk & HI);
        if flagged != 0 {
            return true;
        }
        i += WORD;
    }

    data[i..]
        .iter()
        .any(|&b| b < 0x20 || b == b'"' || b == b'\\' || b > 0x7F)
}

/// Index of the first `"` or `\`, or `None`.
pub fn find_escape_or_quote(data: &[u8]) -> Option<usize> {
    let len = data.len();
    let mut i = 0;

    while i + WORD <= len {
        let chunk = load(data, i);
        let mask = byte_zero_mask(chunk ^ QUOTES) | byte_zero_mask(chunk ^ BACKSLASHES);
        if mask != 0 {
            return Some(i + first_lane(mask));
        }
        i += WORD;
    }

    data[i..]
        .iter()
        .position(|&b| b == b'"' || b == b'\\')
        .map(|p| i + p)
}

// Scalar reference implementations for property testing.

#[cfg(test)]
fn scalar_find_byte(data: &[u8], needle: u8) -> Option<usize> {
    data.iter().position(|&b| b == needle)
}

#[cfg(test)]
fn scalar_find_any_byte(data: &[u8], targets: &[u8]) -> Option<usize> {
    data.iter().position(|b| targets.contains(b))
}

#[cfg(test)]
fn scalar_skip_whitespace(data: &[u8]) -> usize {
    scalar_skip(data)
}

#[cfg(test)]
fn scalar_needs_escaping(data: &[u8]) -> bool {
    data.iter()
        .any(|&b| b < 0x20 || b == b'"' || b == b'\\' || b > 0x7F)
}

#[cfg(test)]
fn scalar_find_escape_or_quote(data: &[u8]) -> Option<usize> {
    data.iter().position(|&b| b == b'"' || b == b'\\')
}
