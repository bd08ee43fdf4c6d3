use byteorder::{ByteOrder, BigEndian, LittleEndian};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

pub const ARTNET_PORT: u16 = 6454;
const MAGIC: &[u8; 8] = b"Art-Net\0";
const HEADER_LEN: usize = 18;

/// Art-Net opcodes the receiver recognizes. Only `ArtDmx` is acted on;
/// every other opcode (ArtPoll included) is ignored per spec 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum OpCode {
    ArtDmx = 0x5000,
}

/// A parsed ArtDMX packet: the fields spec 4.E's layout table calls out,
/// plus the payload slice trimmed to whatever was actually received.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtDmxPacket<'a> {
    pub sequence: u8,
    pub universe: u16,
    pub payload: &'a [u8],
}

/// Why [`parse_art_dmx`] rejected a packet, split so the receiver can
/// keep separate malformed/dropped counters (spec 4.E "Operational
/// metrics"; spec 7 distinguishes "malformed input" from packets that
/// are simply not addressed to this node).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtDmxRejection {
    /// Too short to even contain an Art-Net header — genuinely broken
    /// input, not just a packet meant for someone else.
    Malformed,
    /// A well-formed header whose magic, opcode, or universe doesn't
    /// match what this receiver accepts (spec 4.E: "dropped silently").
    NotMatching,
}

/// Parses `buf` as an ArtDMX packet addressed to `expected_universe`.
/// A buffer too short to hold the header is [`ArtDmxRejection::Malformed`];
/// one with a valid-length header that doesn't match magic, opcode, or
/// universe is [`ArtDmxRejection::NotMatching`] (spec 4.E: "dropped
/// silently"). A payload shorter than the declared length is accepted
/// and truncated to what was actually received, per spec 4.E: "processed
/// up to `min(length, bytes_received-18)`".
pub fn parse_art_dmx(buf: &[u8], expected_universe: u16) -> Result<ArtDmxPacket<'_>, ArtDmxRejection> {
    if buf.len() < HEADER_LEN {
        return Err(ArtDmxRejection::Malformed);
    }
    if &buf[0..8] != MAGIC {
        return Err(ArtDmxRejection::NotMatching);
    }
    let op_code = LittleEndian::read_u16(&buf[8..10]);
    if OpCode::from_u16(op_code) != Some(OpCode::ArtDmx) {
        return Err(ArtDmxRejection::NotMatching);
    }
    let sequence = buf[12];
    let universe = LittleEndian::read_u16(&buf[14..16]);
    if universe != expected_universe {
        return Err(ArtDmxRejection::NotMatching);
    }
    let declared_length = BigEndian::read_u16(&buf[16..18]) as usize;
    let available = buf.len() - HEADER_LEN;
    let length = declared_length.min(available);
    Ok(ArtDmxPacket {
        sequence,
        universe,
        payload: &buf[HEADER_LEN..HEADER_LEN + length],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_packet(universe: u16, sequence: u8, payload: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_LEN + payload.len()];
        buf[0..8].copy_from_slice(MAGIC);
        LittleEndian::write_u16(&mut buf[8..10], OpCode::ArtDmx as u16);
        buf[12] = sequence;
        LittleEndian::write_u16(&mut buf[14..16], universe);
        BigEndian::write_u16(&mut buf[16..18], payload.len() as u16);
        buf[HEADER_LEN..].copy_from_slice(payload);
        buf
    }

    #[test]
    fn parses_minimal_valid_packet() {
        let payload = [255, 0, 0, 128, 0, 255, 0, 64, 0, 0, 255, 32];
        let buf = build_packet(0, 0, &payload);
        let packet = parse_art_dmx(&buf, 0).expect("should parse");
        assert_eq!(packet.sequence, 0);
        assert_eq!(packet.universe, 0);
        assert_eq!(packet.payload, &payload);
    }

    #[test]
    fn rejects_wrong_magic_as_not_matching() {
        let mut buf = build_packet(0, 0, &[1, 2, 3]);
        buf[0] = b'X';
        assert_eq!(parse_art_dmx(&buf, 0), Err(ArtDmxRejection::NotMatching));
    }

    #[test]
    fn rejects_wrong_universe_as_not_matching() {
        let buf = build_packet(3, 0, &[1, 2, 3]);
        assert_eq!(parse_art_dmx(&buf, 0), Err(ArtDmxRejection::NotMatching));
    }

    #[test]
    fn rejects_non_dmx_opcode_as_not_matching() {
        let mut buf = build_packet(0, 0, &[1, 2, 3]);
        LittleEndian::write_u16(&mut buf[8..10], 0x2000); // ArtPoll
        assert_eq!(parse_art_dmx(&buf, 0), Err(ArtDmxRejection::NotMatching));
    }

    #[test]
    fn truncated_payload_is_clamped_to_bytes_received() {
        let mut buf = build_packet(0, 0, &[1, 2, 3, 4]);
        BigEndian::write_u16(&mut buf[16..18], 100); // claim more than we sent
        let packet = parse_art_dmx(&buf, 0).expect("should parse");
        assert_eq!(packet.payload.len(), 4);
    }

    #[test]
    fn too_short_buffer_is_malformed() {
        assert_eq!(parse_art_dmx(&[0u8; 10], 0), Err(ArtDmxRejection::Malformed));
    }
}
