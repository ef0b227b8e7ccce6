use byteorder::{ReadBytesExt, BE};
use bytes::BufMut;
use std::io::Cursor;

use crate::error::{DnsError, Result};
use crate::labels::{read_name_from_reader, write_name};

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(domain: &str, qtype: u16, qclass: u16) -> Self {
        Self {
            name: domain.to_string(),
            qtype,
            qclass,
        }
    }

    pub fn a_record(domain: &str) -> Self {
        Self::new(domain, TYPE_A, CLASS_IN)
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        write_name(&self.name, bytes)?;

        bytes.put_u16(self.qtype);
        bytes.put_u16(self.qclass);

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self> {
        let name = read_name_from_reader(rdr)?;

        let offset = rdr.position() as usize;
        let truncated = |_| DnsError::MalformedRecord {
            offset,
            reason: "question type/class truncated",
        };
        let qtype = rdr.read_u16::<BE>().map_err(truncated)?;
        let qclass = rdr.read_u16::<BE>().map_err(truncated)?;

        let q = Self {
            name,
            qtype,
            qclass,
        };

        Ok(q)
    }

    /// Read `count` consecutive questions from the reader's position.
    pub fn parse_many(rdr: &mut Cursor<&[u8]>, count: u16) -> Result<Vec<Self>> {
        let mut questions = Vec::with_capacity(count as usize);
        for _ in 0..count {
            questions.push(Self::parse_from_reader(rdr)?);
        }

        Ok(questions)
    }
}
