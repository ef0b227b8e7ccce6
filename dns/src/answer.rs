use byteorder::{ReadBytesExt, BE};
use bytes::BufMut;
use std::io::{Cursor, Read};

use crate::error::{DnsError, Result};
use crate::labels::{read_name_from_reader, write_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl Answer {
    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        let rdlength =
            u16::try_from(self.rdata.len()).map_err(|_| DnsError::DataTooLong(self.rdata.len()))?;

        write_name(&self.name, bytes)?;

        bytes.put_u16(self.rtype);
        bytes.put_u16(self.rclass);
        bytes.put_u32(self.ttl);
        bytes.put_u16(rdlength);
        bytes.put_slice(&self.rdata);

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self> {
        let name = read_name_from_reader(rdr)?;

        let offset = rdr.position() as usize;
        let truncated = |_| DnsError::MalformedRecord {
            offset,
            reason: "answer record truncated",
        };
        let rtype = rdr.read_u16::<BE>().map_err(truncated)?;
        let rclass = rdr.read_u16::<BE>().map_err(truncated)?;
        let ttl = rdr.read_u32::<BE>().map_err(truncated)?;
        let rdlength = rdr.read_u16::<BE>().map_err(truncated)?;

        let mut rdata = vec![0; rdlength as usize];
        rdr.read_exact(&mut rdata).map_err(truncated)?;

        let record = Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        };

        Ok(record)
    }

    pub fn ipv4_address(&self) -> Option<[u8; 4]> {
        self.rdata.as_slice().try_into().ok()
    }
}
