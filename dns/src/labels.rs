use bytes::BufMut;
use std::io::Cursor;

use crate::error::{DnsError, Result};

const MAX_LABEL_LEN: usize = 63;

// Top two bits of a length byte: 00 = literal label, 11 = compression pointer.
const POINTER_MARK: u8 = 0b1100_0000;

// Write a dotted domain as length-prefixed labels followed by the zero-length
// root label. Empty labels are skipped, so "" and "." both encode as the root.
pub fn write_name(domain: &str, bytes: &mut Vec<u8>) -> Result<()> {
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        if label.len() > MAX_LABEL_LEN {
            return Err(DnsError::LabelTooLong(label.to_string()));
        }

        bytes.put_u8(label.len() as u8);
        bytes.put_slice(label.as_bytes());
    }

    bytes.put_u8(0);

    Ok(())
}

/// Decode the name starting at the absolute `offset` of `message`.
///
/// `message` must be the whole datagram, since compression pointers are
/// offsets from its first byte. Returns the dotted name and the offset right
/// after the name: past the zero byte, or past the first pointer when the name
/// is compressed.
///
/// A pointer has to jump strictly before the run of labels it ends. That rules
/// out pointers to themselves, forward pointers and cycles, so decoding always
/// terminates.
pub fn read_name(message: &[u8], offset: usize) -> Result<(String, usize)> {
    let mut labels: Vec<String> = Vec::new();
    let mut index = offset;
    let mut run_start = offset;
    let mut resume_at: Option<usize> = None;

    loop {
        let len_byte = *message.get(index).ok_or(DnsError::MalformedName {
            offset: index,
            reason: "name runs past end of message",
        })?;

        match len_byte & POINTER_MARK {
            0 if len_byte == 0 => {
                let next = resume_at.unwrap_or(index + 1);
                return Ok((labels.join("."), next));
            }
            0 => {
                let label_begin_index = index + 1;
                let next_index = label_begin_index + len_byte as usize;

                let label_bytes = message.get(label_begin_index..next_index).ok_or(
                    DnsError::MalformedName {
                        offset: index,
                        reason: "label runs past end of message",
                    },
                )?;
                labels.push(String::from_utf8_lossy(label_bytes).to_string());

                index = next_index;
            }
            POINTER_MARK => {
                let low = *message.get(index + 1).ok_or(DnsError::MalformedName {
                    offset: index,
                    reason: "truncated compression pointer",
                })?;
                let target = (usize::from(len_byte & !POINTER_MARK) << 8) | usize::from(low);

                if target >= run_start {
                    return Err(DnsError::MalformedName {
                        offset: index,
                        reason: "compression pointer does not point backwards",
                    });
                }

                resume_at.get_or_insert(index + 2);
                run_start = target;
                index = target;
            }
            _ => {
                return Err(DnsError::MalformedName {
                    offset: index,
                    reason: "reserved label type",
                });
            }
        }
    }
}

// Cursor flavour of `read_name`: the cursor wraps the whole message and its
// position is the absolute offset.
pub fn read_name_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<String> {
    let message: &[u8] = rdr.get_ref();
    let (name, next) = read_name(message, rdr.position() as usize)?;
    rdr.set_position(next as u64);

    Ok(name)
}
