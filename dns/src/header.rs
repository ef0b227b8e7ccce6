use byteorder::{ReadBytesExt, BE};
use bytes::BufMut;
use std::io::Cursor;

use crate::error::{DnsError, Result};

pub const HEADER_SIZE: usize = 12;

pub const OPCODE_QUERY: u8 = 0;

pub const RCODE_NO_ERROR: u8 = 0;
pub const RCODE_NOT_IMPLEMENTED: u8 = 4;

// 12 bytes
//
// |     ID      |
// |QR|Opcode|AA|TC|RD|RA| Z |RCODE|
// |   QDCOUNT   |
// |   ANCOUNT   |
// |   NSCOUNT   |
// |   ARCOUNT   |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub response: bool,
    pub opcode: u8, // 4 bits
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub z: u8,     // 3 bits, reserved
    pub rcode: u8, // 4 bits
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Header of a standard query with recursion desired.
    pub fn query(id: u16, qdcount: u16) -> Self {
        Self {
            id,
            recursion_desired: true,
            qdcount,
            ..Self::default()
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) {
        let flags_hi = u8::from(self.response) << 7
            | (self.opcode & 0x0F) << 3
            | u8::from(self.authoritative) << 2
            | u8::from(self.truncated) << 1
            | u8::from(self.recursion_desired);
        let flags_lo =
            u8::from(self.recursion_available) << 7 | (self.z & 0x07) << 4 | (self.rcode & 0x0F);

        bytes.put_u16(self.id);
        bytes.put_u8(flags_hi);
        bytes.put_u8(flags_lo);
        bytes.put_u16(self.qdcount);
        bytes.put_u16(self.ancount);
        bytes.put_u16(self.nscount);
        bytes.put_u16(self.arcount);
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut rdr = Cursor::new(bytes);
        Self::parse_from_reader(&mut rdr)
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self> {
        let available = rdr.get_ref().len().saturating_sub(rdr.position() as usize);
        if available < HEADER_SIZE {
            return Err(DnsError::MalformedHeader(available));
        }

        // The length check above covers every read below.
        let short = |_| DnsError::MalformedHeader(available);

        let id = rdr.read_u16::<BE>().map_err(short)?;
        let flags_hi = rdr.read_u8().map_err(short)?;
        let flags_lo = rdr.read_u8().map_err(short)?;
        let qdcount = rdr.read_u16::<BE>().map_err(short)?;
        let ancount = rdr.read_u16::<BE>().map_err(short)?;
        let nscount = rdr.read_u16::<BE>().map_err(short)?;
        let arcount = rdr.read_u16::<BE>().map_err(short)?;

        let h = Self {
            id,
            response: flags_hi & 0b1000_0000 != 0,
            opcode: (flags_hi >> 3) & 0x0F,
            authoritative: flags_hi & 0b0000_0100 != 0,
            truncated: flags_hi & 0b0000_0010 != 0,
            recursion_desired: flags_hi & 0b0000_0001 != 0,
            recursion_available: flags_lo & 0b1000_0000 != 0,
            z: (flags_lo >> 4) & 0x07,
            rcode: flags_lo & 0x0F,
            qdcount,
            ancount,
            nscount,
            arcount,
        };

        Ok(h)
    }

    pub fn is_response(&self) -> bool {
        self.response
    }

    pub fn qd_count(&self) -> u16 {
        self.qdcount
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(h: Header) -> Header {
        let mut bytes = vec![];
        h.to_bytes(&mut bytes);
        assert_eq!(bytes.len(), HEADER_SIZE);
        Header::parse(&bytes).unwrap()
    }

    #[test]
    fn to_bytes_test() {
        let h = Header {
            id: 1234,
            response: true,
            opcode: 2,
            recursion_desired: true,
            z: 5,
            rcode: RCODE_NOT_IMPLEMENTED,
            qdcount: 1,
            ancount: 2,
            nscount: 3,
            arcount: 4,
            ..Header::default()
        };

        let mut bytes = vec![];
        h.to_bytes(&mut bytes);

        let expected = [
            4, 210, // id
            0b1001_0001, // qr, opcode 2, rd
            0b0101_0100, // z 5, rcode 4
            0, 1, 0, 2, 0, 3, 0, 4,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn default_encodes_zero() {
        let mut bytes = vec![];
        Header::default().to_bytes(&mut bytes);
        assert_eq!(bytes, [0; HEADER_SIZE]);
    }

    #[test]
    fn parse_flags() {
        let bytes = [0xD1, 0xB7, 0b0000_0111, 0b1000_0000, 0, 1, 0, 0, 0, 0, 0, 0];
        let h = Header::parse(&bytes).unwrap();

        assert_eq!(h.id, 209 * 256 + 183);
        assert!(!h.is_response());
        assert_eq!(h.opcode, OPCODE_QUERY);
        assert!(h.authoritative);
        assert!(h.truncated);
        assert!(h.recursion_desired);
        assert!(h.recursion_available);
        assert_eq!(h.z, 0);
        assert_eq!(h.rcode, RCODE_NO_ERROR);
        assert_eq!(h.qd_count(), 1);
        assert_eq!(h.answer_count(), 0);
    }

    #[test]
    fn round_trip_fields() {
        for opcode in 0..16 {
            for z in 0..8 {
                for rcode in 0..16 {
                    let h = Header {
                        id: u16::from(opcode) * 4096 + u16::from(rcode),
                        response: rcode % 2 == 0,
                        opcode,
                        authoritative: z % 2 == 1,
                        truncated: opcode % 3 == 0,
                        recursion_desired: rcode % 3 == 1,
                        recursion_available: z > 3,
                        z,
                        rcode,
                        ..Header::default()
                    };
                    assert_eq!(round_trip(h), h);
                }
            }
        }
    }

    #[test]
    fn round_trip_counts() {
        for value in [0, 1, 255, 256, 4660, 65535] {
            let h = Header {
                id: value,
                qdcount: value,
                ancount: value.rotate_left(4),
                nscount: value.rotate_left(8),
                arcount: !value,
                ..Header::default()
            };
            assert_eq!(round_trip(h), h);
        }
    }

    #[test]
    fn short_header() {
        assert_eq!(Header::parse(&[0; 11]), Err(DnsError::MalformedHeader(11)));
        assert_eq!(Header::parse(&[]), Err(DnsError::MalformedHeader(0)));
    }

    #[test]
    fn query_header() {
        let h = Header::query(7, 2);
        assert_eq!(h.id, 7);
        assert!(h.recursion_desired);
        assert!(!h.response);
        assert_eq!(h.qdcount, 2);
    }
}
