// Compiled detector tables: binary encoding and decoding.
//
// Layout (little-endian):
//   bytes 0..4    magic "BSQD"
//   bytes 4..6    format version (u16)
//   byte  6       flags: bit 0 = Mealy, bit 1 = overlapping
//   byte  7       reserved, zero
//   bytes 8..12   pattern length n (u32)
//   bytes 12..16  state count n + 1 (u32)
//   pattern as ASCII '0'/'1', zero-padded to a multiple of 8 bytes
//   n + 1 StateRecords (8 bytes each)

use bitseq_core::{Bit, Convention, Overlap, Pattern};

use crate::mealy::MealyDetector;
use crate::moore::MooreDetector;
use crate::transition::StateRecord;
use crate::{Automaton, Detector, FsmError};

const MAGIC: [u8; 4] = *b"BSQD";

/// Current compiled table version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 16;

const FLAG_MEALY: u8 = 0x01;
const FLAG_OVERLAPPING: u8 = 0x02;

/// Parsed compiled table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeader {
    pub convention: Convention,
    pub overlap: Overlap,
    pub pattern_len: usize,
    pub state_count: usize,
}

impl TableHeader {
    /// Total encoded size of a table with this header.
    ///
    /// Returns `None` if the size does not fit in `usize`.
    pub fn encoded_len(&self) -> Option<usize> {
        let records = self.state_count.checked_mul(size_of::<StateRecord>())?;
        HEADER_SIZE
            .checked_add(self.pattern_len.checked_next_multiple_of(8)?)?
            .checked_add(records)
    }
}

/// Parse and validate the 16-byte header.
pub fn parse_header(data: &[u8]) -> Result<TableHeader, FsmError> {
    if data.len() < HEADER_SIZE {
        return Err(FsmError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }
    if data[..4] != MAGIC {
        return Err(FsmError::InvalidMagic);
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version != FORMAT_VERSION {
        return Err(FsmError::UnsupportedVersion(version));
    }

    let flags = data[6];
    if flags & !(FLAG_MEALY | FLAG_OVERLAPPING) != 0 || data[7] != 0 {
        return Err(FsmError::InvalidFlags(flags));
    }
    let convention = if flags & FLAG_MEALY != 0 {
        Convention::Mealy
    } else {
        Convention::Moore
    };
    let overlap = Overlap::from_bool(flags & FLAG_OVERLAPPING != 0);

    let pattern_len = u32::from_le_bytes([data[8], data[9], data[10], data[11]]) as usize;
    let state_count = u32::from_le_bytes([data[12], data[13], data[14], data[15]]) as usize;
    if pattern_len.checked_add(1) != Some(state_count) {
        return Err(FsmError::StateCountMismatch {
            pattern_len,
            state_count,
        });
    }

    Ok(TableHeader {
        convention,
        overlap,
        pattern_len,
        state_count,
    })
}

/// Encode a built detector.
pub fn write<D: Detector + ?Sized>(detector: &D) -> Vec<u8> {
    let pattern = detector.pattern();
    let records = detector.records();

    let mut flags = 0u8;
    if detector.convention() == Convention::Mealy {
        flags |= FLAG_MEALY;
    }
    if detector.overlap().is_overlapping() {
        flags |= FLAG_OVERLAPPING;
    }

    let mut out = Vec::with_capacity(HEADER_SIZE + pattern.len() + 8 + records.len() * 8);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.push(flags);
    out.push(0);
    out.extend_from_slice(&(pattern.len() as u32).to_le_bytes());
    out.extend_from_slice(&(records.len() as u32).to_le_bytes());

    out.extend(pattern.bits().iter().map(|bit| bit.as_char() as u8));
    let aligned = HEADER_SIZE + pattern.len().next_multiple_of(8);
    out.resize(aligned, 0);

    out.extend_from_slice(bytemuck::cast_slice(records));
    tracing::debug!(
        pattern = %pattern,
        bytes = out.len(),
        "encoded compiled table"
    );
    out
}

/// Decode a compiled table into a ready-to-run detector.
///
/// Every transition target is checked against the state count and every
/// output flag against the convention, so the returned detector is total
/// and behaves exactly like a freshly built one.
pub fn read(data: &[u8]) -> Result<Automaton, FsmError> {
    let header = parse_header(data)?;
    let expected = header.encoded_len().unwrap_or(usize::MAX);
    if data.len() < expected {
        return Err(FsmError::TooShort {
            expected,
            actual: data.len(),
        });
    }
    if data.len() > expected {
        return Err(FsmError::TrailingBytes(data.len() - expected));
    }

    let pattern_bytes = &data[HEADER_SIZE..HEADER_SIZE + header.pattern_len];
    let text: String = pattern_bytes.iter().map(|&b| b as char).collect();
    let pattern = Pattern::parse(&text)?;

    // Copy into an aligned Vec; the source slice may not be 4-byte aligned.
    let table_offset = HEADER_SIZE + header.pattern_len.next_multiple_of(8);
    let mut records = vec![StateRecord::default(); header.state_count];
    bytemuck::cast_slice_mut::<StateRecord, u8>(&mut records).copy_from_slice(&data[table_offset..]);

    let max = header.pattern_len;
    for (state, record) in records.iter().enumerate() {
        for bit in Bit::ALL {
            let target = record.target(bit);
            if target > max {
                return Err(FsmError::TargetOutOfRange { state, target, max });
            }
            // Moore edges carry no output; Mealy edges output 1 iff they accept.
            let expected = match header.convention {
                Convention::Moore => Bit::Zero,
                Convention::Mealy => Bit::from(target == max),
            };
            let found = record.output(bit);
            if found != expected {
                return Err(FsmError::OutputMismatch {
                    state,
                    bit,
                    found,
                    expected,
                });
            }
        }
    }

    tracing::debug!(
        pattern = %pattern,
        convention = %header.convention,
        overlap = %header.overlap,
        "decoded compiled table"
    );

    Ok(match header.convention {
        Convention::Moore => MooreDetector::from_records(pattern, header.overlap, records).into(),
        Convention::Mealy => MealyDetector::from_records(pattern, header.overlap, records).into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use bitseq_core::{Field, ValidationError};

    fn encoded(p: &str, convention: Convention, overlap: Overlap) -> Vec<u8> {
        write(&build(&Pattern::parse(p).unwrap(), convention, overlap))
    }

    #[test]
    fn header_fields() {
        let data = encoded("1011", Convention::Mealy, Overlap::NonOverlapping);
        let header = parse_header(&data).unwrap();
        assert_eq!(header.convention, Convention::Mealy);
        assert_eq!(header.overlap, Overlap::NonOverlapping);
        assert_eq!(header.pattern_len, 4);
        assert_eq!(header.state_count, 5);
        // 16 header + 8 padded pattern + 5 * 8 records
        assert_eq!(data.len(), 64);
        assert_eq!(header.encoded_len(), Some(64));
    }

    #[test]
    fn pattern_is_padded() {
        let data = encoded("101", Convention::Moore, Overlap::Overlapping);
        assert_eq!(&data[16..24], b"101\0\0\0\0\0");
    }

    #[test]
    fn read_restores_detector() {
        let p = Pattern::parse("10010").unwrap();
        for convention in [Convention::Moore, Convention::Mealy] {
            for overlap in [Overlap::Overlapping, Overlap::NonOverlapping] {
                let built = build(&p, convention, overlap);
                let loaded = read(&write(&built)).unwrap();
                assert_eq!(loaded, built);
            }
        }
    }

    #[test]
    fn reject_too_short_header() {
        let err = parse_header(&[0u8; 8]).unwrap_err();
        assert!(matches!(
            err,
            FsmError::TooShort {
                expected: 16,
                actual: 8
            }
        ));
    }

    #[test]
    fn reject_invalid_magic() {
        let mut data = encoded("11", Convention::Moore, Overlap::Overlapping);
        data[0] = b'X';
        assert!(matches!(read(&data), Err(FsmError::InvalidMagic)));
    }

    #[test]
    fn reject_unknown_version() {
        let mut data = encoded("11", Convention::Moore, Overlap::Overlapping);
        data[4] = 9;
        assert!(matches!(read(&data), Err(FsmError::UnsupportedVersion(9))));
    }

    #[test]
    fn reject_unknown_flags() {
        let mut data = encoded("11", Convention::Moore, Overlap::Overlapping);
        data[6] |= 0x80;
        assert!(matches!(read(&data), Err(FsmError::InvalidFlags(_))));
    }

    #[test]
    fn reject_state_count_mismatch() {
        let mut data = encoded("11", Convention::Moore, Overlap::Overlapping);
        data[12] = 7;
        assert!(matches!(
            read(&data),
            Err(FsmError::StateCountMismatch {
                pattern_len: 2,
                state_count: 7
            })
        ));
    }

    #[test]
    fn reject_truncated_table() {
        let data = encoded("11", Convention::Moore, Overlap::Overlapping);
        let err = read(&data[..data.len() - 4]).unwrap_err();
        assert!(matches!(err, FsmError::TooShort { .. }));
    }

    #[test]
    fn reject_trailing_bytes() {
        let mut data = encoded("11", Convention::Moore, Overlap::Overlapping);
        data.extend_from_slice(&[0, 0]);
        assert!(matches!(read(&data), Err(FsmError::TrailingBytes(2))));
    }

    #[test]
    fn reject_corrupt_pattern() {
        let mut data = encoded("11", Convention::Moore, Overlap::Overlapping);
        data[17] = b'7';
        match read(&data).unwrap_err() {
            FsmError::InvalidPattern(ValidationError::InvalidSymbol {
                field,
                symbol,
                position,
            }) => {
                assert_eq!(field, Field::Pattern);
                assert_eq!(symbol, '7');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reject_cleared_mealy_output() {
        let mut data = encoded("11", Convention::Mealy, Overlap::Overlapping);
        // State 1, on_one edge (target 2 = n): high byte holds the output flag.
        let offset = 16 + 8 + 8 + 4 + 3;
        assert_eq!(data[offset], 0x80);
        data[offset] = 0;
        assert!(matches!(
            read(&data),
            Err(FsmError::OutputMismatch {
                state: 1,
                bit: Bit::One,
                found: Bit::Zero,
                expected: Bit::One,
            })
        ));
    }

    #[test]
    fn reject_spurious_mealy_output() {
        let mut data = encoded("11", Convention::Mealy, Overlap::Overlapping);
        // State 0, on_zero edge (target 0).
        data[16 + 8 + 3] |= 0x80;
        let err = read(&data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "transition from state 0 on 0 outputs 1, expected 0"
        );
    }

    #[test]
    fn reject_output_flag_on_moore_edge() {
        let mut data = encoded("11", Convention::Moore, Overlap::NonOverlapping);
        data[16 + 8 + 8 + 4 + 3] |= 0x80;
        assert!(matches!(
            read(&data),
            Err(FsmError::OutputMismatch {
                state: 1,
                bit: Bit::One,
                ..
            })
        ));
    }

    #[test]
    fn reject_out_of_range_target() {
        let mut data = encoded("11", Convention::Moore, Overlap::Overlapping);
        // State 1, on_zero edge: first record byte after header + padded pattern.
        let offset = 16 + 8 + 8;
        data[offset] = 5;
        assert!(matches!(
            read(&data),
            Err(FsmError::TargetOutOfRange {
                state: 1,
                target: 5,
                max: 2
            })
        ));
    }
}
