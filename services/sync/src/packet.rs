use byteorder::{ByteOrder, LittleEndian};

pub const SYNC_PORT: u16 = 6455;
const MAGIC: &[u8; 8] = b"LEDSYNC\0";
const PACKET_LEN: usize = 20;

/// Builds a sync packet: `MAGIC(8) | sequence(4, LE u32) | time(8, LE f64)`
/// (spec 4.G wire format).
pub fn encode(sequence: u32, animation_time: f64) -> [u8; PACKET_LEN] {
    let mut buf = [0u8; PACKET_LEN];
    buf[0..8].copy_from_slice(MAGIC);
    LittleEndian::write_u32(&mut buf[8..12], sequence);
    LittleEndian::write_f64(&mut buf[12..20], animation_time);
    buf
}

/// Parses a received sync packet, rejecting anything too short or
/// missing the magic header. The sequence number is returned for
/// diagnostics only; spec 4.G: "receivers do not use it for ordering".
pub fn decode(buf: &[u8]) -> Option<(u32, f64)> {
    if buf.len() < PACKET_LEN || &buf[0..8] != MAGIC {
        return None;
    }
    let sequence = LittleEndian::read_u32(&buf[8..12]);
    let time = LittleEndian::read_f64(&buf[12..20]);
    Some((sequence, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_roundtrips() {
        let buf = encode(42, 12.5);
        let (sequence, time) = decode(&buf).expect("should decode");
        assert_eq!(sequence, 42);
        assert_eq!(time, 12.5);
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut buf = encode(0, 0.0);
        buf[0] = b'X';
        assert!(decode(&buf).is_none());
    }

    #[test]
    fn rejects_short_buffer() {
        assert!(decode(&[0u8; 10]).is_none());
    }
}
